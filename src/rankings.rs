use std::collections::HashMap;

use crate::prediction::DetailedPrediction;
use crate::roster::{self, Player, PlayerRole};
use crate::state::SortMode;

/// One leaderboard row, flattened from a player and their prediction for
/// cheap sorting and rendering.
#[derive(Debug, Clone)]
pub struct RankingEntry {
    pub player_id: String,
    pub player_name: String,
    pub team: String,
    pub role: PlayerRole,
    pub predicted_runs: f64,
    pub predicted_wickets: f64,
    pub overall_impact: f64,
    pub top_performer_probability: f64,
}

/// Build the leaderboard for the current round. Players without a prediction
/// (filtered rounds, mid-generate) are skipped rather than shown with zeros.
pub fn compute_rankings(
    players: &[Player],
    predictions: &HashMap<String, DetailedPrediction>,
    sort: SortMode,
) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = players
        .iter()
        .filter_map(|player| {
            let prediction = predictions.get(&player.id)?;
            Some(build_entry(player, prediction))
        })
        .collect();

    entries.sort_by(|a, b| {
        sort_key(b, sort)
            .partial_cmp(&sort_key(a, sort))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    entries
}

fn build_entry(player: &Player, prediction: &DetailedPrediction) -> RankingEntry {
    let team = roster::team_by_id(&player.team)
        .map(|t| t.short_name.clone())
        .unwrap_or_else(|| player.team.to_uppercase());
    RankingEntry {
        player_id: player.id.clone(),
        player_name: player.name.clone(),
        team,
        role: player.role,
        predicted_runs: prediction.batting.predicted_runs,
        predicted_wickets: prediction.bowling.predicted_wickets,
        overall_impact: prediction.overall_impact,
        top_performer_probability: prediction.top_performer_probability,
    }
}

fn sort_key(entry: &RankingEntry, sort: SortMode) -> f64 {
    match sort {
        SortMode::Impact => entry.overall_impact,
        SortMode::Runs => entry.predicted_runs,
        SortMode::Wickets => entry.predicted_wickets,
        SortMode::TopPerformer => entry.top_performer_probability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{BattingPrediction, BowlingPrediction, FieldingPrediction};

    fn stub_prediction(runs: f64, wickets: f64, impact: f64) -> DetailedPrediction {
        DetailedPrediction {
            batting: BattingPrediction {
                predicted_runs: runs,
                predicted_strike_rate: 130.0,
                boundary_probability: 0.4,
                confidence: 0.8,
            },
            bowling: BowlingPrediction {
                predicted_wickets: wickets,
                predicted_economy: 8.0,
                dot_ball_percentage: 0.3,
                confidence: 0.5,
            },
            fielding: FieldingPrediction {
                catch_probability: 0.5,
                run_out_probability: 0.2,
                confidence: 0.6,
            },
            overall_impact: impact,
            top_performer_probability: impact.min(0.95),
        }
    }

    #[test]
    fn rankings_sort_descending_by_selected_key() {
        let players = roster::PLAYERS.clone();
        let mut predictions = HashMap::new();
        predictions.insert("1".to_string(), stub_prediction(60.0, 0.0, 0.9));
        predictions.insert("4".to_string(), stub_prediction(5.0, 2.5, 0.7));

        let by_runs = compute_rankings(&players, &predictions, SortMode::Runs);
        assert_eq!(by_runs.len(), 2);
        assert_eq!(by_runs[0].player_name, "Virat Kohli");

        let by_wickets = compute_rankings(&players, &predictions, SortMode::Wickets);
        assert_eq!(by_wickets[0].player_name, "Jasprit Bumrah");
    }

    #[test]
    fn players_without_predictions_are_skipped() {
        let players = roster::PLAYERS.clone();
        let predictions = HashMap::new();
        assert!(compute_rankings(&players, &predictions, SortMode::Impact).is_empty());
    }
}
