use std::collections::HashMap;
use std::collections::VecDeque;

use rayon::prelude::*;

use crate::prediction::{self, DetailedPrediction};
use crate::roster::{self, Player, TEAMS, VENUES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Roster,
    Prediction,
    Insights,
}

/// Sort key for the prediction leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Impact,
    Runs,
    Wickets,
    TopPerformer,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Impact => SortMode::Runs,
            SortMode::Runs => SortMode::Wickets,
            SortMode::Wickets => SortMode::TopPerformer,
            SortMode::TopPerformer => SortMode::Impact,
        }
    }
}

/// Which selector the Prediction screen is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFocus {
    Opponent,
    Venue,
}

/// One opponent + venue combination. Predictions are only meaningful for the
/// scenario they were generated under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScenario {
    pub opponent_id: String,
    pub venue_id: String,
}

const LOG_CAPACITY: usize = 50;

pub struct AppState {
    pub screen: Screen,
    pub search_query: String,
    pub search_active: bool,
    pub team_filter: Option<String>,
    pub selected: usize,
    pub sort: SortMode,
    pub scenario_focus: ScenarioFocus,
    pub opponent_idx: usize,
    pub venue_idx: usize,
    /// Scenario the current round was generated for, if any.
    pub round_scenario: Option<MatchScenario>,
    /// Caller-owned round: player id -> prediction, rebuilt as a whole on
    /// each generate and dropped when the scenario changes.
    pub predictions: HashMap<String, DetailedPrediction>,
    pub detail_overlay: bool,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Roster,
            search_query: String::new(),
            search_active: false,
            team_filter: None,
            selected: 0,
            sort: SortMode::Impact,
            scenario_focus: ScenarioFocus::Opponent,
            opponent_idx: 0,
            venue_idx: 0,
            round_scenario: None,
            predictions: HashMap::new(),
            detail_overlay: false,
            help_overlay: false,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() >= LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }

    /// Roster rows matching the search query and team filter.
    pub fn filtered_players(&self) -> Vec<&'static Player> {
        let query = self.search_query.to_lowercase();
        roster::PLAYERS
            .iter()
            .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
            .filter(|p| {
                self.team_filter
                    .as_deref()
                    .map(|team| p.team == team)
                    .unwrap_or(true)
            })
            .collect()
    }

    pub fn selected_player(&self) -> Option<&'static Player> {
        self.filtered_players().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.filtered_players().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }

    pub fn cycle_team_filter(&mut self) {
        let next = match &self.team_filter {
            None => TEAMS.first().map(|t| t.id.clone()),
            Some(current) => {
                let idx = TEAMS.iter().position(|t| &t.id == current);
                match idx {
                    Some(i) if i + 1 < TEAMS.len() => Some(TEAMS[i + 1].id.clone()),
                    _ => None,
                }
            }
        };
        self.team_filter = next;
        self.selected = 0;
    }

    pub fn scenario(&self) -> MatchScenario {
        MatchScenario {
            opponent_id: TEAMS[self.opponent_idx % TEAMS.len()].id.clone(),
            venue_id: VENUES[self.venue_idx % VENUES.len()].id.clone(),
        }
    }

    pub fn cycle_scenario(&mut self, delta: isize) {
        match self.scenario_focus {
            ScenarioFocus::Opponent => {
                self.opponent_idx = step_index(self.opponent_idx, delta, TEAMS.len());
            }
            ScenarioFocus::Venue => {
                self.venue_idx = step_index(self.venue_idx, delta, VENUES.len());
            }
        }
        // A round belongs to the scenario it was generated for.
        if self.round_scenario.as_ref() != Some(&self.scenario()) {
            self.predictions.clear();
            self.round_scenario = None;
        }
    }

    pub fn toggle_scenario_focus(&mut self) {
        self.scenario_focus = match self.scenario_focus {
            ScenarioFocus::Opponent => ScenarioFocus::Venue,
            ScenarioFocus::Venue => ScenarioFocus::Opponent,
        };
    }

    /// Rebuild the prediction round for the current scenario: one engine call
    /// per roster player, fanned out across the rayon pool. Each call only
    /// reads the immutable roster, so ordering is irrelevant.
    pub fn generate_round(&mut self) {
        let scenario = self.scenario();
        self.predictions = generate_predictions(&roster::PLAYERS, &scenario);
        self.round_scenario = Some(scenario.clone());
        self.push_log(format!(
            "[INFO] Generated {} predictions vs {} at {}",
            self.predictions.len(),
            scenario.opponent_id,
            scenario.venue_id
        ));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Batch prediction over a roster slice. Pure apart from RNG draws; returns
/// a fresh map the caller owns.
pub fn generate_predictions(
    players: &[Player],
    scenario: &MatchScenario,
) -> HashMap<String, DetailedPrediction> {
    players
        .par_iter()
        .map(|player| {
            let mut rng = rand::thread_rng();
            let prediction =
                prediction::predict(player, &scenario.opponent_id, &scenario.venue_id, &mut rng);
            (player.id.clone(), prediction)
        })
        .collect()
}

fn step_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (((current as isize + delta) % len + len) % len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtered_players_respects_team_filter() {
        let mut state = AppState::new();
        state.team_filter = Some("mi".to_string());
        let players = state.filtered_players();
        assert!(!players.is_empty());
        assert!(players.iter().all(|p| p.team == "mi"));
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut state = AppState::new();
        state.search_query = "kohli".to_string();
        let players = state.filtered_players();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Virat Kohli");
    }

    #[test]
    fn scenario_change_drops_round() {
        let mut state = AppState::new();
        state.generate_round();
        assert!(!state.predictions.is_empty());
        assert!(state.round_scenario.is_some());

        state.cycle_scenario(1);
        assert!(state.predictions.is_empty());
        assert!(state.round_scenario.is_none());
    }

    #[test]
    fn regenerate_without_scenario_change_replaces_round() {
        let mut state = AppState::new();
        state.generate_round();
        let first = state.predictions.clone();
        state.generate_round();
        assert_eq!(first.len(), state.predictions.len());
        assert_eq!(state.round_scenario, Some(state.scenario()));
    }

    #[test]
    fn step_index_wraps_both_directions() {
        assert_eq!(step_index(0, -1, 10), 9);
        assert_eq!(step_index(9, 1, 10), 0);
        assert_eq!(step_index(5, 0, 10), 5);
    }
}
