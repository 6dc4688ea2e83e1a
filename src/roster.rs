use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Playing role, fixed at data-definition time. The prediction engine gates
/// its confidence bands and impact weights on this instead of matching on
/// free-form role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketkeeperBatsman,
}

impl PlayerRole {
    /// Keeper-batsmen count as batsmen for every batting gate.
    pub fn is_batsman(self) -> bool {
        matches!(self, PlayerRole::Batsman | PlayerRole::WicketkeeperBatsman)
    }

    pub fn is_bowler(self) -> bool {
        matches!(self, PlayerRole::Bowler)
    }

    pub fn is_all_rounder(self) -> bool {
        matches!(self, PlayerRole::AllRounder)
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerRole::Batsman => "Batsman",
            PlayerRole::Bowler => "Bowler",
            PlayerRole::AllRounder => "All-rounder",
            PlayerRole::WicketkeeperBatsman => "Wicketkeeper Batsman",
        }
    }
}

/// Career statistics. All fields are non-negative; bowling fields are zero
/// for players who have never bowled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_runs: f64,
    pub balls_faced: f64,
    pub fours: f64,
    pub sixes: f64,
    pub dismissals: f64,
    pub batting_average: f64,
    pub batting_strike_rate: f64,
    pub wickets_taken: f64,
    pub runs_conceded: f64,
    pub balls_bowled: f64,
    pub bowling_average: f64,
    pub bowling_economy: f64,
}

/// Rolling short-term form over the last three matches.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RecentForm {
    pub last3_runs: f64,
    pub last3_wickets: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: String,
    pub role: PlayerRole,
    pub batting_style: String,
    pub bowling_style: String,
    pub age: u8,
    pub nationality: String,
    pub stats: PlayerStats,
    pub recent_form: RecentForm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
}

/// Coarse ground scoring tendency, assigned per venue at data-definition
/// time rather than re-derived from the venue string on every prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringTier {
    HighScoring,
    LowScoring,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub tier: ScoringTier,
}

pub static TEAMS: Lazy<Vec<Team>> = Lazy::new(|| {
    [
        ("csk", "Chennai Super Kings", "CSK"),
        ("mi", "Mumbai Indians", "MI"),
        ("rcb", "Royal Challengers Bangalore", "RCB"),
        ("kkr", "Kolkata Knight Riders", "KKR"),
        ("dc", "Delhi Capitals", "DC"),
        ("pbks", "Punjab Kings", "PBKS"),
        ("rr", "Rajasthan Royals", "RR"),
        ("srh", "Sunrisers Hyderabad", "SRH"),
        ("gt", "Gujarat Titans", "GT"),
        ("lsg", "Lucknow Super Giants", "LSG"),
    ]
    .into_iter()
    .map(|(id, name, short_name)| Team {
        id: id.to_string(),
        name: name.to_string(),
        short_name: short_name.to_string(),
    })
    .collect()
});

pub static VENUES: Lazy<Vec<Venue>> = Lazy::new(|| {
    [
        ("wankhede", "Wankhede Stadium, Mumbai", ScoringTier::HighScoring),
        (
            "chinnaswamy",
            "M. Chinnaswamy Stadium, Bangalore",
            ScoringTier::HighScoring,
        ),
        (
            "chidambaram",
            "MA Chidambaram Stadium, Chennai",
            ScoringTier::LowScoring,
        ),
        ("eden", "Eden Gardens, Kolkata", ScoringTier::Neutral),
        ("jaitley", "Arun Jaitley Stadium, Delhi", ScoringTier::Neutral),
        (
            "rajiv-gandhi",
            "Rajiv Gandhi Intl Stadium, Hyderabad",
            ScoringTier::Neutral,
        ),
        (
            "mohali",
            "Punjab Cricket Association IS Bindra Stadium, Mohali",
            ScoringTier::Neutral,
        ),
        (
            "sawai-mansingh",
            "Sawai Mansingh Stadium, Jaipur",
            ScoringTier::Neutral,
        ),
        (
            "narendra-modi",
            "Narendra Modi Stadium, Ahmedabad",
            ScoringTier::Neutral,
        ),
        (
            "ekana",
            "BRSABV Ekana Cricket Stadium, Lucknow",
            ScoringTier::Neutral,
        ),
    ]
    .into_iter()
    .map(|(id, name, tier)| Venue {
        id: id.to_string(),
        name: name.to_string(),
        tier,
    })
    .collect()
});

struct PlayerRow {
    id: &'static str,
    name: &'static str,
    team: &'static str,
    role: PlayerRole,
    batting_style: &'static str,
    bowling_style: &'static str,
    age: u8,
    nationality: &'static str,
    // total_runs, balls_faced, fours, sixes, dismissals, bat_avg, bat_sr,
    // wickets, runs_conceded, balls_bowled, bowl_avg, economy
    stats: [f64; 12],
    last3_runs: f64,
    last3_wickets: f64,
}

const PLAYER_ROWS: [PlayerRow; 10] = [
    PlayerRow {
        id: "1",
        name: "Virat Kohli",
        team: "rcb",
        role: PlayerRole::Batsman,
        batting_style: "Right-handed",
        bowling_style: "Right-arm medium",
        age: 35,
        nationality: "India",
        stats: [
            7579.0, 5742.0, 698.0, 251.0, 207.0, 36.61, 132.0, 4.0, 166.0, 120.0, 41.5, 8.3,
        ],
        last3_runs: 45.3,
        last3_wickets: 0.0,
    },
    PlayerRow {
        id: "2",
        name: "Rohit Sharma",
        team: "mi",
        role: PlayerRole::Batsman,
        batting_style: "Right-handed",
        bowling_style: "Right-arm off break",
        age: 36,
        nationality: "India",
        stats: [
            6211.0, 4678.0, 512.0, 283.0, 201.0, 30.90, 132.8, 15.0, 321.0, 228.0, 21.4, 8.4,
        ],
        last3_runs: 38.7,
        last3_wickets: 0.0,
    },
    PlayerRow {
        id: "3",
        name: "MS Dhoni",
        team: "csk",
        role: PlayerRole::WicketkeeperBatsman,
        batting_style: "Right-handed",
        bowling_style: "Right-arm medium",
        age: 42,
        nationality: "India",
        stats: [
            5082.0, 3536.0, 292.0, 242.0, 144.0, 35.29, 143.7, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        last3_runs: 28.3,
        last3_wickets: 0.0,
    },
    PlayerRow {
        id: "4",
        name: "Jasprit Bumrah",
        team: "mi",
        role: PlayerRole::Bowler,
        batting_style: "Right-handed",
        bowling_style: "Right-arm fast",
        age: 30,
        nationality: "India",
        stats: [
            56.0, 78.0, 5.0, 2.0, 15.0, 3.73, 71.8, 165.0, 3542.0, 2418.0, 21.5, 7.4,
        ],
        last3_runs: 2.3,
        last3_wickets: 2.7,
    },
    PlayerRow {
        id: "5",
        name: "Rashid Khan",
        team: "gt",
        role: PlayerRole::Bowler,
        batting_style: "Right-handed",
        bowling_style: "Right-arm leg break",
        age: 25,
        nationality: "Afghanistan",
        stats: [
            367.0, 215.0, 23.0, 29.0, 42.0, 8.74, 170.7, 128.0, 2756.0, 2136.0, 21.5, 6.5,
        ],
        last3_runs: 15.0,
        last3_wickets: 1.7,
    },
    PlayerRow {
        id: "6",
        name: "Suryakumar Yadav",
        team: "mi",
        role: PlayerRole::Batsman,
        batting_style: "Right-handed",
        bowling_style: "Right-arm off break",
        age: 33,
        nationality: "India",
        stats: [
            2644.0, 1842.0, 234.0, 142.0, 78.0, 33.9, 143.5, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        last3_runs: 52.3,
        last3_wickets: 0.0,
    },
    PlayerRow {
        id: "7",
        name: "Hardik Pandya",
        team: "mi",
        role: PlayerRole::AllRounder,
        batting_style: "Right-handed",
        bowling_style: "Right-arm medium fast",
        age: 30,
        nationality: "India",
        stats: [
            2344.0, 1523.0, 156.0, 132.0, 86.0, 27.3, 153.9, 56.0, 1456.0, 894.0, 26.0, 9.8,
        ],
        last3_runs: 35.0,
        last3_wickets: 1.0,
    },
    PlayerRow {
        id: "8",
        name: "KL Rahul",
        team: "lsg",
        role: PlayerRole::WicketkeeperBatsman,
        batting_style: "Right-handed",
        bowling_style: "Right-arm off break",
        age: 31,
        nationality: "India",
        stats: [
            4683.0, 3542.0, 412.0, 168.0, 145.0, 32.3, 132.2, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        last3_runs: 41.7,
        last3_wickets: 0.0,
    },
    PlayerRow {
        id: "9",
        name: "Yuzvendra Chahal",
        team: "rr",
        role: PlayerRole::Bowler,
        batting_style: "Right-handed",
        bowling_style: "Right-arm leg break",
        age: 33,
        nationality: "India",
        stats: [
            78.0, 112.0, 8.0, 2.0, 28.0, 2.79, 69.6, 187.0, 4123.0, 3012.0, 22.0, 8.2,
        ],
        last3_runs: 0.0,
        last3_wickets: 2.3,
    },
    PlayerRow {
        id: "10",
        name: "Ravindra Jadeja",
        team: "csk",
        role: PlayerRole::AllRounder,
        batting_style: "Left-handed",
        bowling_style: "Left-arm orthodox",
        age: 35,
        nationality: "India",
        stats: [
            2502.0, 1687.0, 182.0, 98.0, 108.0, 23.2, 148.3, 152.0, 3245.0, 2634.0, 21.3, 7.4,
        ],
        last3_runs: 28.0,
        last3_wickets: 1.3,
    },
];

pub static PLAYERS: Lazy<Vec<Player>> = Lazy::new(|| {
    PLAYER_ROWS
        .iter()
        .map(|row| {
            let [total_runs, balls_faced, fours, sixes, dismissals, batting_average, batting_strike_rate, wickets_taken, runs_conceded, balls_bowled, bowling_average, bowling_economy] =
                row.stats;
            Player {
                id: row.id.to_string(),
                name: row.name.to_string(),
                team: row.team.to_string(),
                role: row.role,
                batting_style: row.batting_style.to_string(),
                bowling_style: row.bowling_style.to_string(),
                age: row.age,
                nationality: row.nationality.to_string(),
                stats: PlayerStats {
                    total_runs,
                    balls_faced,
                    fours,
                    sixes,
                    dismissals,
                    batting_average,
                    batting_strike_rate,
                    wickets_taken,
                    runs_conceded,
                    balls_bowled,
                    bowling_average,
                    bowling_economy,
                },
                recent_form: RecentForm {
                    last3_runs: row.last3_runs,
                    last3_wickets: row.last3_wickets,
                },
            }
        })
        .collect()
});

static PLAYERS_BY_ID: Lazy<HashMap<&'static str, &'static Player>> =
    Lazy::new(|| PLAYERS.iter().map(|p| (p.id.as_str(), p)).collect());

pub fn player_by_id(id: &str) -> Option<&'static Player> {
    PLAYERS_BY_ID.get(id).copied()
}

pub fn team_by_id(id: &str) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.id == id)
}

pub fn venue_by_id(id: &str) -> Option<&'static Venue> {
    VENUES.iter().find(|v| v.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_references_are_consistent() {
        for player in PLAYERS.iter() {
            assert!(
                team_by_id(&player.team).is_some(),
                "player {} references unknown team {}",
                player.name,
                player.team
            );
        }
        assert_eq!(player_by_id("1").map(|p| p.name.as_str()), Some("Virat Kohli"));
        assert!(player_by_id("no-such-id").is_none());
    }

    #[test]
    fn pure_batsmen_have_zero_bowling_stats() {
        let dhoni = player_by_id("3").unwrap();
        assert_eq!(dhoni.stats.wickets_taken, 0.0);
        assert_eq!(dhoni.stats.bowling_economy, 0.0);
        assert!(dhoni.role.is_batsman());
        assert!(!dhoni.role.is_bowler());
    }
}
