use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::roster::{self, Player, PlayerRole, ScoringTier};

// Venue scoring multipliers by tier.
const VENUE_HIGH_FACTOR: f64 = 1.15;
const VENUE_LOW_FACTOR: f64 = 0.9;

// A rolling average of 40 runs over the last three matches is treated as
// neutral form.
const FORM_BASELINE_RUNS: f64 = 40.0;
const FORM_WEIGHT: f64 = 0.3;
const FORM_FLOOR: f64 = 0.7;

const RUNS_NOISE_SPAN: f64 = 10.0;
const BOUNDARY_PROB_CAP: f64 = 0.95;
const NON_BOWLER_ECONOMY: f64 = 10.0;
const IMPACT_FLOOR: f64 = 0.2;
const TOP_PERFORMER_CAP: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattingPrediction {
    pub predicted_runs: f64,
    pub predicted_strike_rate: f64,
    pub boundary_probability: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BowlingPrediction {
    pub predicted_wickets: f64,
    pub predicted_economy: f64,
    pub dot_ball_percentage: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldingPrediction {
    pub catch_probability: f64,
    pub run_out_probability: f64,
    pub confidence: f64,
}

/// One simulated-match forecast for one player. A pure value: the engine
/// hands ownership to the caller and keeps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetailedPrediction {
    pub batting: BattingPrediction,
    pub bowling: BowlingPrediction,
    pub fielding: FieldingPrediction,
    pub overall_impact: f64,
    pub top_performer_probability: f64,
}

/// Ground scoring multiplier. Known venues use the tier assigned in the
/// roster data; unknown venue strings fall back to a city-name match so that
/// ad-hoc venues still land in the right tier.
pub fn venue_factor(venue_id: &str) -> f64 {
    let tier = match roster::venue_by_id(venue_id) {
        Some(venue) => venue.tier,
        None => {
            if venue_id.contains("Mumbai") || venue_id.contains("Bangalore") {
                ScoringTier::HighScoring
            } else if venue_id.contains("Chennai") {
                ScoringTier::LowScoring
            } else {
                ScoringTier::Neutral
            }
        }
    };
    match tier {
        ScoringTier::HighScoring => VENUE_HIGH_FACTOR,
        ScoringTier::LowScoring => VENUE_LOW_FACTOR,
        ScoringTier::Neutral => 1.0,
    }
}

/// Recent-form multiplier, 1.0 at the 40-run baseline. Unbounded above,
/// floored at 0.7 when the player has no recent runs at all.
pub fn form_factor(last3_runs: f64) -> f64 {
    (last3_runs / FORM_BASELINE_RUNS) * FORM_WEIGHT + FORM_FLOOR
}

/// Forecast one player's output for a hypothetical match.
///
/// Infallible for any structurally valid player, including all-zero bowling
/// stats. Bounded random perturbation models estimation uncertainty, so
/// repeated calls differ; callers that need reproducibility pass a seeded
/// RNG.
///
/// `opponent_id` is part of the contract but carries no weight in the
/// current formula; see DESIGN.md.
pub fn predict(
    player: &Player,
    opponent_id: &str,
    venue_id: &str,
    rng: &mut impl Rng,
) -> DetailedPrediction {
    let _ = opponent_id;
    let role = player.role;
    let stats = &player.stats;

    let venue = venue_factor(venue_id);
    let form = form_factor(player.recent_form.last3_runs);

    // Batting channel.
    let base_runs = stats.batting_average * form * venue;
    let runs_noise = rng.gen_range(-RUNS_NOISE_SPAN..RUNS_NOISE_SPAN);
    let predicted_runs = (base_runs + runs_noise).max(0.0);
    let predicted_strike_rate = stats.batting_strike_rate * rng.gen_range(0.9..1.1) * venue;
    let boundary_rate = if stats.balls_faced > 0.0 {
        (stats.fours + stats.sixes) / stats.balls_faced
    } else {
        0.0
    };
    let boundary_probability = (boundary_rate * 2.5).min(BOUNDARY_PROB_CAP);
    let batting_confidence = if role.is_batsman() {
        rng.gen_range(0.75..0.95)
    } else if role.is_all_rounder() {
        rng.gen_range(0.6..0.8)
    } else {
        rng.gen_range(0.3..0.5)
    };

    // Bowling channel. Players with no career wickets get a flat zero with
    // no noise so a pure batsman never shows phantom wickets.
    let predicted_wickets = if stats.wickets_taken > 0.0 {
        (player.recent_form.last3_wickets * form + rng.gen_range(0.0..1.0)).max(0.0)
    } else {
        0.0
    };
    let predicted_economy = if stats.bowling_economy > 0.0 {
        stats.bowling_economy * rng.gen_range(0.85..1.15)
    } else {
        NON_BOWLER_ECONOMY
    };
    let dot_ball_percentage = if stats.wickets_taken > 0.0 {
        (0.25 + (10.0 - stats.bowling_economy) * 0.03).min(0.5)
    } else {
        0.15
    };
    let bowling_confidence = if role.is_bowler() {
        rng.gen_range(0.75..0.95)
    } else if role.is_all_rounder() {
        rng.gen_range(0.55..0.75)
    } else {
        rng.gen_range(0.2..0.35)
    };

    // Fielding is role independent.
    let catch_probability = rng.gen_range(0.3..0.7);
    let run_out_probability = rng.gen_range(0.1..0.3);
    let fielding_confidence = rng.gen_range(0.5..0.8);

    let batting_impact = (predicted_runs / 50.0) * channel_weight(role, role.is_batsman());
    let bowling_impact = (predicted_wickets / 3.0) * channel_weight(role, role.is_bowler());
    let fielding_impact = catch_probability * 0.1;
    let overall_impact = (batting_impact + bowling_impact + fielding_impact + IMPACT_FLOOR).min(1.0);

    let runs_component = if predicted_runs > 40.0 {
        0.3
    } else {
        predicted_runs / 133.0
    };
    let wickets_component = if predicted_wickets > 2.0 {
        0.3
    } else {
        predicted_wickets * 0.15
    };
    let top_performer_probability =
        (runs_component + wickets_component + rng.gen_range(0.0..0.2)).min(TOP_PERFORMER_CAP);

    DetailedPrediction {
        batting: BattingPrediction {
            predicted_runs,
            predicted_strike_rate,
            boundary_probability,
            confidence: batting_confidence,
        },
        bowling: BowlingPrediction {
            predicted_wickets,
            predicted_economy,
            dot_ball_percentage,
            confidence: bowling_confidence,
        },
        fielding: FieldingPrediction {
            catch_probability,
            run_out_probability,
            confidence: fielding_confidence,
        },
        overall_impact,
        top_performer_probability,
    }
}

/// Weight of a channel in the overall-impact blend: specialists 0.4,
/// all-rounders 0.25, everyone else 0.1.
fn channel_weight(role: PlayerRole, specialist: bool) -> f64 {
    if specialist {
        0.4
    } else if role.is_all_rounder() {
        0.25
    } else {
        0.1
    }
}
