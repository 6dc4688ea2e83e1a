use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::Serialize;

use crate::insights::{FEATURE_IMPORTANCE_RUNS, FEATURE_IMPORTANCE_WICKETS, FeatureImportance};
use crate::prediction::DetailedPrediction;
use crate::roster::{self, Player};
use crate::state::MatchScenario;

pub struct ExportReport {
    pub players: usize,
    pub predictions: usize,
    pub features: usize,
}

/// Write the roster and the current prediction round to an .xlsx workbook.
/// Players without a prediction still appear on the Roster sheet.
pub fn export_round(
    path: &Path,
    players: &[Player],
    scenario: &MatchScenario,
    predictions: &HashMap<String, DetailedPrediction>,
) -> Result<ExportReport> {
    let roster_rows = roster_rows(players);
    let prediction_rows = prediction_rows(players, scenario, predictions);
    let feature_rows = feature_rows();

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Roster")?;
        write_rows(sheet, &roster_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Predictions")?;
        write_rows(sheet, &prediction_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("FeatureImportance")?;
        write_rows(sheet, &feature_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook to {}", path.display()))?;

    Ok(ExportReport {
        players: roster_rows.len().saturating_sub(1),
        predictions: prediction_rows.len().saturating_sub(1),
        features: feature_rows.len().saturating_sub(1),
    })
}

/// JSON sibling of the workbook export, for piping the round into other
/// tools.
pub fn export_round_json(
    path: &Path,
    scenario: &MatchScenario,
    predictions: &HashMap<String, DetailedPrediction>,
) -> Result<usize> {
    #[derive(Serialize)]
    struct RoundFile<'a> {
        opponent_id: &'a str,
        venue_id: &'a str,
        predictions: &'a HashMap<String, DetailedPrediction>,
    }

    let json = serde_json::to_string_pretty(&RoundFile {
        opponent_id: &scenario.opponent_id,
        venue_id: &scenario.venue_id,
        predictions,
    })
    .context("serialize prediction round")?;
    fs::write(path, json).with_context(|| format!("write round to {}", path.display()))?;
    Ok(predictions.len())
}

fn roster_rows(players: &[Player]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Player ID".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "Role".to_string(),
        "Batting Avg".to_string(),
        "Strike Rate".to_string(),
        "Wickets".to_string(),
        "Economy".to_string(),
        "Last 3 Runs".to_string(),
        "Last 3 Wickets".to_string(),
    ]];
    for player in players {
        let team = roster::team_by_id(&player.team)
            .map(|t| t.short_name.clone())
            .unwrap_or_else(|| player.team.to_uppercase());
        rows.push(vec![
            player.id.clone(),
            player.name.clone(),
            team,
            player.role.label().to_string(),
            format!("{:.2}", player.stats.batting_average),
            format!("{:.1}", player.stats.batting_strike_rate),
            format!("{:.0}", player.stats.wickets_taken),
            format!("{:.2}", player.stats.bowling_economy),
            format!("{:.1}", player.recent_form.last3_runs),
            format!("{:.1}", player.recent_form.last3_wickets),
        ]);
    }
    rows
}

fn prediction_rows(
    players: &[Player],
    scenario: &MatchScenario,
    predictions: &HashMap<String, DetailedPrediction>,
) -> Vec<Vec<String>> {
    let opponent = roster::team_by_id(&scenario.opponent_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| scenario.opponent_id.clone());
    let venue = roster::venue_by_id(&scenario.venue_id)
        .map(|v| v.name.clone())
        .unwrap_or_else(|| scenario.venue_id.clone());

    let mut rows = vec![vec![
        "Player".to_string(),
        "Opponent".to_string(),
        "Venue".to_string(),
        "Pred Runs".to_string(),
        "Pred SR".to_string(),
        "Boundary %".to_string(),
        "Bat Conf".to_string(),
        "Pred Wickets".to_string(),
        "Pred Econ".to_string(),
        "Dot Ball %".to_string(),
        "Bowl Conf".to_string(),
        "Catch %".to_string(),
        "Run Out %".to_string(),
        "Overall Impact".to_string(),
        "Top Performer %".to_string(),
    ]];
    for player in players {
        let Some(p) = predictions.get(&player.id) else {
            continue;
        };
        rows.push(vec![
            player.name.clone(),
            opponent.clone(),
            venue.clone(),
            format!("{:.1}", p.batting.predicted_runs),
            format!("{:.1}", p.batting.predicted_strike_rate),
            format!("{:.0}%", p.batting.boundary_probability * 100.0),
            format!("{:.0}%", p.batting.confidence * 100.0),
            format!("{:.1}", p.bowling.predicted_wickets),
            format!("{:.2}", p.bowling.predicted_economy),
            format!("{:.0}%", p.bowling.dot_ball_percentage * 100.0),
            format!("{:.0}%", p.bowling.confidence * 100.0),
            format!("{:.0}%", p.fielding.catch_probability * 100.0),
            format!("{:.0}%", p.fielding.run_out_probability * 100.0),
            format!("{:.2}", p.overall_impact),
            format!("{:.0}%", p.top_performer_probability * 100.0),
        ]);
    }
    rows
}

fn feature_rows() -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Model".to_string(),
        "Feature".to_string(),
        "Importance".to_string(),
        "Category".to_string(),
    ]];
    let push = |rows: &mut Vec<Vec<String>>, model: &str, table: &[FeatureImportance]| {
        for entry in table {
            rows.push(vec![
                model.to_string(),
                entry.feature.to_string(),
                format!("{:.3}", entry.importance),
                entry.category.label().to_string(),
            ]);
        }
    };
    push(&mut rows, "Runs", &FEATURE_IMPORTANCE_RUNS);
    push(&mut rows, "Wickets", &FEATURE_IMPORTANCE_WICKETS);
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::generate_predictions;

    #[test]
    fn prediction_rows_skip_players_outside_round() {
        let players = roster::PLAYERS.clone();
        let scenario = MatchScenario {
            opponent_id: "csk".to_string(),
            venue_id: "wankhede".to_string(),
        };
        let mut predictions = generate_predictions(&players, &scenario);
        predictions.remove("1");

        let rows = prediction_rows(&players, &scenario, &predictions);
        assert_eq!(rows.len(), players.len()); // header + (players - 1)
        assert!(rows.iter().skip(1).all(|r| r[0] != "Virat Kohli"));
    }

    #[test]
    fn roster_rows_cover_all_players_with_header() {
        let rows = roster_rows(&roster::PLAYERS);
        assert_eq!(rows.len(), roster::PLAYERS.len() + 1);
        assert_eq!(rows[0][0], "Player ID");
    }
}
