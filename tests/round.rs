use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use ipl_terminal::prediction::{DetailedPrediction, predict};
use ipl_terminal::rankings::compute_rankings;
use ipl_terminal::roster::{PLAYERS, player_by_id};
use ipl_terminal::state::{AppState, MatchScenario, SortMode, generate_predictions};

fn scenario(opponent: &str, venue: &str) -> MatchScenario {
    MatchScenario {
        opponent_id: opponent.to_string(),
        venue_id: venue.to_string(),
    }
}

#[test]
fn batch_covers_the_whole_roster() {
    let round = generate_predictions(&PLAYERS, &scenario("csk", "wankhede"));
    assert_eq!(round.len(), PLAYERS.len());
    for player in PLAYERS.iter() {
        assert!(round.contains_key(&player.id), "missing {}", player.name);
    }
}

#[test]
fn predictions_are_referentially_independent() {
    let round = generate_predictions(&PLAYERS, &scenario("csk", "wankhede"));

    // Snapshot every entry field-by-field, then keep predicting one player
    // with the round still alive. The stored values for everyone else must
    // come back bit-identical.
    let snapshot: HashMap<String, DetailedPrediction> =
        round.iter().map(|(id, p)| (id.clone(), *p)).collect();

    let kohli = player_by_id("1").expect("roster player");
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..50 {
        let _ = predict(kohli, "csk", "wankhede", &mut rng);
    }

    for (id, stored) in &round {
        let before = snapshot.get(id).expect("snapshot entry");
        assert_eq!(before.batting, stored.batting, "batting drifted for {id}");
        assert_eq!(before.bowling, stored.bowling, "bowling drifted for {id}");
        assert_eq!(before.fielding, stored.fielding, "fielding drifted for {id}");
        assert_eq!(before.overall_impact, stored.overall_impact);
        assert_eq!(
            before.top_performer_probability,
            stored.top_performer_probability
        );
    }
}

#[test]
fn round_is_rebuilt_per_generate_and_dropped_on_scenario_change() {
    let mut state = AppState::new();
    state.generate_round();
    assert_eq!(state.predictions.len(), PLAYERS.len());
    let first_scenario = state.round_scenario.clone();
    assert!(first_scenario.is_some());

    state.cycle_scenario(1);
    assert!(state.predictions.is_empty());
    assert!(state.round_scenario.is_none());

    state.generate_round();
    assert_eq!(state.predictions.len(), PLAYERS.len());
    assert_ne!(state.round_scenario, first_scenario);
}

#[test]
fn leaderboard_orders_full_round() {
    let round = generate_predictions(&PLAYERS, &scenario("csk", "wankhede"));
    let rankings = compute_rankings(&PLAYERS, &round, SortMode::Impact);
    assert_eq!(rankings.len(), PLAYERS.len());
    for pair in rankings.windows(2) {
        assert!(pair[0].overall_impact >= pair[1].overall_impact);
    }

    let by_runs = compute_rankings(&PLAYERS, &round, SortMode::Runs);
    for pair in by_runs.windows(2) {
        assert!(pair[0].predicted_runs >= pair[1].predicted_runs);
    }
}
