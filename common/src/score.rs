use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::constants::*;

/// One team's submitted result for one game night. Stored as a single row
/// in the scores sheet; append-only, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub score_id: String,
    pub date: String,
    pub week: String,
    pub location: String,
    pub team_id: String,
    pub team_name: String,
    pub rounds: Vec<f64>,
    pub bonus_round: f64,
    pub total: f64,
    pub submitted_by: String,
    pub submitted_at: String,
}

/// Text cell at `idx`, or None when the cell is absent or empty.
fn text_cell(row: &[Value], idx: usize) -> Option<String> {
    match row.get(idx)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // The values API normally hands back strings, but tolerate raw
        // numbers (e.g. an unformatted week column).
        other => Some(other.to_string()),
    }
}

/// Numeric cell at `idx`. Absent and empty cells are None; so are cells
/// that fail to parse as a finite number, which additionally get a
/// data-quality warning. NaN never escapes this function.
fn numeric_cell(row: &[Value], idx: usize, score_id: &str) -> Option<f64> {
    match row.get(idx)? {
        Value::Null => None,
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                log::warn!(
                    "score {score_id}: unparseable numeric cell {s:?} at column {idx}, treating as absent"
                );
                None
            }
        },
        other => {
            log::warn!(
                "score {score_id}: non-numeric cell {other:?} at column {idx}, treating as absent"
            );
            None
        }
    }
}

impl ScoreRecord {
    /// Normalizes one raw stored row into a record.
    ///
    /// Returns None for malformed rows: anything without a score id or a
    /// team id never becomes a record and is excluded from aggregation.
    /// Round cells that are absent or empty are omitted entirely, so
    /// `rounds` is compacted (a present R1 and R3 with an absent R2 yields
    /// two entries, not three). Bonus and total fall back to 0; the stored
    /// total is trusted as-is, never recomputed from the rounds.
    pub fn from_row(row: &[Value]) -> Option<ScoreRecord> {
        let score_id = text_cell(row, COL_SCORE_ID)?;
        let team_id = text_cell(row, COL_TEAM_ID)?;

        let mut rounds = Vec::new();
        for i in 0..MAX_ROUNDS {
            if let Some(score) = numeric_cell(row, COL_ROUND_1 + i, &score_id) {
                rounds.push(score);
            }
        }

        Some(ScoreRecord {
            date: text_cell(row, COL_DATE).unwrap_or_default(),
            week: text_cell(row, COL_WEEK).unwrap_or_default(),
            location: text_cell(row, COL_LOCATION).unwrap_or_default(),
            team_name: text_cell(row, COL_TEAM_NAME).unwrap_or_default(),
            rounds,
            bonus_round: numeric_cell(row, COL_BONUS_ROUND, &score_id).unwrap_or(0.0),
            total: numeric_cell(row, COL_TOTAL, &score_id).unwrap_or(0.0),
            submitted_by: text_cell(row, COL_SUBMITTED_BY).unwrap_or_default(),
            submitted_at: text_cell(row, COL_SUBMITTED_AT).unwrap_or_default(),
            score_id,
            team_id,
        })
    }

    /// Renders the record as a 16-cell row in the fixed column layout.
    /// Unplayed round columns are written as empty cells, not zeros.
    pub fn to_row(&self) -> Vec<Value> {
        let mut row = vec![
            json!(self.score_id),
            json!(self.date),
            json!(self.week),
            json!(self.location),
            json!(self.team_id),
            json!(self.team_name),
        ];
        for i in 0..MAX_ROUNDS {
            match self.rounds.get(i) {
                Some(score) => row.push(json!(score)),
                None => row.push(json!("")),
            }
        }
        row.push(json!(self.bonus_round));
        row.push(json!(self.total));
        row.push(json!(self.submitted_by));
        row.push(json!(self.submitted_at));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> Vec<Value> {
        vec![
            json!("score-1"),
            json!("2024-01-08"),
            json!("3"),
            json!("Harbor Taproom"),
            json!("team-1"),
            json!("The Quizzards"),
            json!("8"),
            json!("7"),
            json!("9"),
            json!("6"),
            json!("8"),
            json!("10"),
            json!("5"),
            json!("53"),
            json!("alice"),
            json!("2024-01-08T21:30:00Z"),
        ]
    }

    #[test]
    fn normalizes_a_full_row() {
        let record = ScoreRecord::from_row(&full_row()).unwrap();
        assert_eq!(record.score_id, "score-1");
        assert_eq!(record.team_id, "team-1");
        assert_eq!(record.team_name, "The Quizzards");
        assert_eq!(record.rounds, vec![8.0, 7.0, 9.0, 6.0, 8.0, 10.0]);
        assert_eq!(record.bonus_round, 5.0);
        assert_eq!(record.total, 53.0);
        assert_eq!(record.date, "2024-01-08");
    }

    #[test]
    fn compacts_missing_rounds() {
        let mut row = full_row();
        row[COL_ROUND_1 + 1] = json!(""); // R2 empty
        row[COL_ROUND_1 + 3] = json!(""); // R4 empty
        let record = ScoreRecord::from_row(&row).unwrap();
        assert_eq!(record.rounds, vec![8.0, 9.0, 8.0, 10.0]);
    }

    #[test]
    fn short_row_yields_empty_tail_fields() {
        // Trailing cells absent entirely, not just empty.
        let row = vec![
            json!("score-2"),
            json!("2024-01-01"),
            json!("1"),
            json!("Crown & Anchor"),
            json!("team-2"),
        ];
        let record = ScoreRecord::from_row(&row).unwrap();
        assert!(record.rounds.is_empty());
        assert_eq!(record.bonus_round, 0.0);
        assert_eq!(record.total, 0.0);
        assert_eq!(record.team_name, "");
        assert_eq!(record.submitted_by, "");
    }

    #[test]
    fn missing_score_id_is_rejected() {
        let mut row = full_row();
        row[COL_SCORE_ID] = json!("");
        assert!(ScoreRecord::from_row(&row).is_none());
        assert!(ScoreRecord::from_row(&[]).is_none());
    }

    #[test]
    fn missing_team_id_is_rejected() {
        let mut row = full_row();
        row[COL_TEAM_ID] = json!("");
        assert!(ScoreRecord::from_row(&row).is_none());
    }

    #[test]
    fn malformed_numeric_cells_are_treated_as_absent() {
        let mut row = full_row();
        row[COL_ROUND_1] = json!("eight");
        row[COL_BONUS_ROUND] = json!("n/a");
        row[COL_TOTAL] = json!("NaN");
        let record = ScoreRecord::from_row(&row).unwrap();
        assert_eq!(record.rounds, vec![7.0, 9.0, 6.0, 8.0, 10.0]);
        assert_eq!(record.bonus_round, 0.0);
        assert_eq!(record.total, 0.0);
    }

    #[test]
    fn numeric_week_cell_is_preserved_as_text() {
        let mut row = full_row();
        row[COL_WEEK] = json!(3);
        let record = ScoreRecord::from_row(&row).unwrap();
        assert_eq!(record.week, "3");
    }

    #[test]
    fn row_round_trip() {
        let record = ScoreRecord::from_row(&full_row()).unwrap();
        let row = record.to_row();
        assert_eq!(row.len(), 16);
        assert_eq!(ScoreRecord::from_row(&row).unwrap(), record);
    }

    #[test]
    fn to_row_writes_empty_cells_for_unplayed_rounds() {
        let mut record = ScoreRecord::from_row(&full_row()).unwrap();
        record.rounds = vec![8.0, 7.0];
        let row = record.to_row();
        assert_eq!(row[COL_ROUND_1 + 1], json!(7.0));
        assert_eq!(row[COL_ROUND_1 + 2], json!(""));
        assert_eq!(row[COL_ROUND_1 + 5], json!(""));
    }
}
