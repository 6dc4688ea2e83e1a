use rand::SeedableRng;
use rand::rngs::StdRng;

use ipl_terminal::prediction::predict;
use ipl_terminal::roster::{PLAYERS, Player, PlayerRole, PlayerStats, RecentForm, player_by_id};

const OPPONENT: &str = "csk";
const SAMPLES: usize = 200;

fn synthetic_player(role: PlayerRole, stats: PlayerStats, form: RecentForm) -> Player {
    Player {
        id: "test".to_string(),
        name: "Test Player".to_string(),
        team: "mi".to_string(),
        role,
        batting_style: "Right-handed".to_string(),
        bowling_style: "Right-arm medium".to_string(),
        age: 28,
        nationality: "India".to_string(),
        stats,
        recent_form: form,
    }
}

#[test]
fn bounds_hold_for_every_roster_player() {
    let mut rng = StdRng::seed_from_u64(7);
    for player in PLAYERS.iter() {
        for _ in 0..SAMPLES {
            let p = predict(player, OPPONENT, "eden", &mut rng);

            assert!(p.batting.predicted_runs >= 0.0);
            assert!(p.batting.predicted_strike_rate >= 0.0);
            assert!((0.0..=0.95).contains(&p.batting.boundary_probability));
            assert!((0.0..=1.0).contains(&p.batting.confidence));

            assert!(p.bowling.predicted_wickets >= 0.0);
            assert!(p.bowling.predicted_economy >= 0.0);
            assert!((0.0..=1.0).contains(&p.bowling.dot_ball_percentage));
            assert!((0.0..=1.0).contains(&p.bowling.confidence));

            assert!((0.0..=1.0).contains(&p.fielding.catch_probability));
            assert!((0.0..=1.0).contains(&p.fielding.run_out_probability));
            assert!((0.0..=1.0).contains(&p.fielding.confidence));

            assert!(
                (0.2..=1.0).contains(&p.overall_impact),
                "impact {} outside floor..1 for {}",
                p.overall_impact,
                player.name
            );
            assert!((0.0..=0.95).contains(&p.top_performer_probability));
        }
    }
}

#[test]
fn confidence_bands_follow_role() {
    let mut rng = StdRng::seed_from_u64(11);
    let kohli = player_by_id("1").unwrap(); // Batsman
    let bumrah = player_by_id("4").unwrap(); // Bowler
    let hardik = player_by_id("7").unwrap(); // All-rounder
    let dhoni = player_by_id("3").unwrap(); // Wicketkeeper Batsman

    for _ in 0..SAMPLES {
        let p = predict(kohli, OPPONENT, "eden", &mut rng);
        assert!((0.75..=0.95).contains(&p.batting.confidence));
        assert!((0.2..=0.35).contains(&p.bowling.confidence));

        let p = predict(bumrah, OPPONENT, "eden", &mut rng);
        assert!((0.3..=0.5).contains(&p.batting.confidence));
        assert!((0.75..=0.95).contains(&p.bowling.confidence));

        let p = predict(hardik, OPPONENT, "eden", &mut rng);
        assert!((0.6..=0.8).contains(&p.batting.confidence));
        assert!((0.55..=0.75).contains(&p.bowling.confidence));

        // Keeper-batsmen take the batsman bands.
        let p = predict(dhoni, OPPONENT, "eden", &mut rng);
        assert!((0.75..=0.95).contains(&p.batting.confidence));
        assert!((0.2..=0.35).contains(&p.bowling.confidence));

        let p = predict(kohli, OPPONENT, "eden", &mut rng);
        assert!((0.5..=0.8).contains(&p.fielding.confidence));
        assert!((0.3..=0.7).contains(&p.fielding.catch_probability));
        assert!((0.1..=0.3).contains(&p.fielding.run_out_probability));
    }
}

#[test]
fn wicketless_player_never_shows_wickets() {
    let mut rng = StdRng::seed_from_u64(13);
    let dhoni = player_by_id("3").unwrap();
    assert_eq!(dhoni.stats.wickets_taken, 0.0);

    for _ in 0..SAMPLES {
        let p = predict(dhoni, OPPONENT, "eden", &mut rng);
        // Deterministic zero: the wicket branch must not draw any noise.
        assert_eq!(p.bowling.predicted_wickets, 0.0);
        assert_eq!(p.bowling.predicted_economy, 10.0);
        assert_eq!(p.bowling.dot_ball_percentage, 0.15);
    }
}

#[test]
fn zero_balls_faced_is_safe() {
    let player = synthetic_player(
        PlayerRole::Bowler,
        PlayerStats {
            wickets_taken: 30.0,
            bowling_economy: 7.0,
            bowling_average: 22.0,
            ..Default::default()
        },
        RecentForm {
            last3_runs: 0.0,
            last3_wickets: 1.5,
        },
    );
    assert_eq!(player.stats.balls_faced, 0.0);

    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..SAMPLES {
        let p = predict(&player, OPPONENT, "eden", &mut rng);
        assert_eq!(p.batting.boundary_probability, 0.0);
        assert!(p.batting.predicted_runs >= 0.0);
    }
}

#[test]
fn mumbai_outscores_chennai_in_expectation() {
    let kohli = player_by_id("1").unwrap();
    let mut rng = StdRng::seed_from_u64(19);

    let mean_runs = |venue: &str, rng: &mut StdRng| -> f64 {
        let total: f64 = (0..400)
            .map(|_| predict(kohli, OPPONENT, venue, rng).batting.predicted_runs)
            .sum();
        total / 400.0
    };

    let mumbai = mean_runs("wankhede", &mut rng);
    let chennai = mean_runs("chidambaram", &mut rng);
    // Expected gap is batting_average * form * 0.25, far beyond noise at
    // this sample size.
    assert!(
        mumbai > chennai,
        "expected Mumbai mean {mumbai:.2} > Chennai mean {chennai:.2}"
    );
}

#[test]
fn kohli_scenario_lands_in_documented_window() {
    let kohli = player_by_id("1").unwrap();
    let form: f64 = 45.3 / 40.0 * 0.3 + 0.7;
    let base = 36.61 * form * 1.15;
    assert!((base - 43.78).abs() < 0.01);

    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..SAMPLES {
        // Free-form venue string exercises the city-name fallback.
        let p = predict(kohli, OPPONENT, "Wankhede Stadium, Mumbai", &mut rng);
        assert!(p.batting.predicted_runs >= base - 10.0 - 1e-9);
        assert!(p.batting.predicted_runs <= base + 10.0 + 1e-9);
    }
}
