use serde::{Deserialize, Serialize};

/// Which input group a model feature belongs to, for grouping in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCategory {
    Form,
    Opponent,
    Venue,
    Player,
    Match,
}

impl FeatureCategory {
    pub fn label(self) -> &'static str {
        match self {
            FeatureCategory::Form => "form",
            FeatureCategory::Opponent => "opponent",
            FeatureCategory::Venue => "venue",
            FeatureCategory::Player => "player",
            FeatureCategory::Match => "match",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
    pub category: FeatureCategory,
}

/// Importance ranking behind the runs model, highest first.
pub const FEATURE_IMPORTANCE_RUNS: [FeatureImportance; 10] = [
    FeatureImportance {
        feature: "Rolling Avg Runs (Last 3)",
        importance: 0.342,
        category: FeatureCategory::Form,
    },
    FeatureImportance {
        feature: "Player Age",
        importance: 0.156,
        category: FeatureCategory::Player,
    },
    FeatureImportance {
        feature: "Avg Runs vs Opponent",
        importance: 0.134,
        category: FeatureCategory::Opponent,
    },
    FeatureImportance {
        feature: "Batting Style",
        importance: 0.098,
        category: FeatureCategory::Player,
    },
    FeatureImportance {
        feature: "Venue History",
        importance: 0.087,
        category: FeatureCategory::Venue,
    },
    FeatureImportance {
        feature: "Playing Role",
        importance: 0.072,
        category: FeatureCategory::Player,
    },
    FeatureImportance {
        feature: "City",
        importance: 0.045,
        category: FeatureCategory::Venue,
    },
    FeatureImportance {
        feature: "Opponent Team",
        importance: 0.034,
        category: FeatureCategory::Opponent,
    },
    FeatureImportance {
        feature: "Player Team",
        importance: 0.022,
        category: FeatureCategory::Match,
    },
    FeatureImportance {
        feature: "Bowling Style",
        importance: 0.010,
        category: FeatureCategory::Player,
    },
];

/// Importance ranking behind the wickets model, highest first.
pub const FEATURE_IMPORTANCE_WICKETS: [FeatureImportance; 10] = [
    FeatureImportance {
        feature: "Rolling Avg Wickets (Last 3)",
        importance: 0.298,
        category: FeatureCategory::Form,
    },
    FeatureImportance {
        feature: "Bowling Style",
        importance: 0.187,
        category: FeatureCategory::Player,
    },
    FeatureImportance {
        feature: "Avg Wickets vs Opponent",
        importance: 0.142,
        category: FeatureCategory::Opponent,
    },
    FeatureImportance {
        feature: "Playing Role",
        importance: 0.112,
        category: FeatureCategory::Player,
    },
    FeatureImportance {
        feature: "Venue History",
        importance: 0.095,
        category: FeatureCategory::Venue,
    },
    FeatureImportance {
        feature: "Player Age",
        importance: 0.067,
        category: FeatureCategory::Player,
    },
    FeatureImportance {
        feature: "City",
        importance: 0.042,
        category: FeatureCategory::Venue,
    },
    FeatureImportance {
        feature: "Opponent Team",
        importance: 0.031,
        category: FeatureCategory::Opponent,
    },
    FeatureImportance {
        feature: "Player Team",
        importance: 0.018,
        category: FeatureCategory::Match,
    },
    FeatureImportance {
        feature: "Batting Style",
        importance: 0.008,
        category: FeatureCategory::Player,
    },
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub mae: f64,
    pub mse: f64,
    pub r2: f64,
    pub train_size: u32,
    pub test_size: u32,
}

pub const RUNS_MODEL_METRICS: ModelMetrics = ModelMetrics {
    mae: 12.45,
    mse: 298.34,
    r2: 0.4823,
    train_size: 45_678,
    test_size: 11_420,
};

pub const WICKETS_MODEL_METRICS: ModelMetrics = ModelMetrics {
    mae: 0.67,
    mse: 0.89,
    r2: 0.3156,
    train_size: 45_678,
    test_size: 11_420,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlatformStats {
    pub players_analyzed: u32,
    pub matches_processed: u32,
    pub balls_analyzed: u32,
    pub prediction_accuracy: f64,
}

pub const PLATFORM_STATS: PlatformStats = PlatformStats {
    players_analyzed: 847,
    matches_processed: 1_024,
    balls_analyzed: 245_678,
    prediction_accuracy: 82.4,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_tables_are_ranked_and_normalized() {
        for table in [&FEATURE_IMPORTANCE_RUNS, &FEATURE_IMPORTANCE_WICKETS] {
            for pair in table.windows(2) {
                assert!(pair[0].importance >= pair[1].importance);
            }
            let total: f64 = table.iter().map(|f| f.importance).sum();
            assert!(total <= 1.0 + 1e-9);
        }
    }
}
