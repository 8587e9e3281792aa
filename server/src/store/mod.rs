pub mod sheets;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use sheets::GoogleSheetsStore;

// Fixed sheet ranges. The scores sheet holds 16 columns (A..P), the teams
// sheet 4 (A..D), the standings cache 9 (A..I). Row 1 of every sheet is a
// header and is never read or cleared.
pub const SCORES_READ_RANGE: &str = "Scores!A2:P";
pub const SCORES_APPEND_RANGE: &str = "Scores!A:P";
pub const TEAMS_READ_RANGE: &str = "Teams!A2:D";
pub const TEAMS_APPEND_RANGE: &str = "Teams!A:D";
pub const STANDINGS_SHEET: &str = "Standings";
/// Cleared before every cache rewrite; sized well beyond any realistic
/// number of league teams.
pub const STANDINGS_CLEAR_RANGE: &str = "Standings!A2:I1000";

/// The backing tabular store: an ordered, append-only collection of sparse
/// rows addressable by range. The system of record for everything this
/// service does.
///
/// All operations are safe to retry except `append`, which produces a
/// distinct new row on every call; nothing in this service retries it.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Reads every data row in the range. Rows are sparse: trailing empty
    /// cells may be absent entirely, and rows may be shorter than the
    /// range width.
    async fn read_all(&self, range: &str) -> Result<Vec<Vec<Value>>>;

    /// Appends one row after the last data row of the range's table.
    async fn append(&self, range: &str, row: Vec<Value>) -> Result<()>;

    /// Overwrites the range with the given rows.
    async fn overwrite(&self, range: &str, rows: Vec<Vec<Value>>) -> Result<()>;

    /// Clears all values in the range, leaving the cells empty.
    async fn clear(&self, range: &str) -> Result<()>;
}
