use anyhow::Result;
use serde_json::{Value, json};
use tracing::info;

use common::TeamStanding;

use crate::store::{STANDINGS_CLEAR_RANGE, STANDINGS_SHEET, SheetStore};

/// Persists a computed standings snapshot to the standings sheet,
/// replacing its entire prior body. Two steps, not atomic: the fixed cache
/// range is cleared first, then the new rows are written immediately below
/// the header. A failure between the steps leaves the cache empty; callers
/// must treat any failure as "cache state unknown". No rollback, no retry.
///
/// An empty snapshot stops after the clear, leaving the sheet header-only
/// rather than keeping stale rows around.
pub async fn persist_standings(store: &dyn SheetStore, standings: &[TeamStanding]) -> Result<()> {
    store.clear(STANDINGS_CLEAR_RANGE).await?;

    if standings.is_empty() {
        info!("Persisted empty standings snapshot, cache is now header-only");
        return Ok(());
    }

    let rows: Vec<Vec<Value>> = standings.iter().map(standing_row).collect();
    let range = format!("{}!A2:I{}", STANDINGS_SHEET, standings.len() + 1);
    store.overwrite(&range, rows).await?;

    info!("Persisted standings snapshot with {} teams", standings.len());
    Ok(())
}

// Column order in the standings sheet: rank, teamId, teamName, location,
// gamesPlayed, totalPoints, bestScore, averageScore, lastPlayed.
fn standing_row(standing: &TeamStanding) -> Vec<Value> {
    vec![
        json!(standing.rank),
        json!(standing.team_id),
        json!(standing.team_name),
        json!(standing.location),
        json!(standing.games_played),
        json!(standing.total_points),
        json!(standing.best_score),
        json!(standing.average_score),
        json!(standing.last_played),
    ]
}
