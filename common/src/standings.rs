use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::score::ScoreRecord;

/// A team's aggregated season statistics plus its rank. Fully derived from
/// the score records it was computed from; has no identity of its own
/// outside a single aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub rank: usize,
    pub team_id: String,
    pub team_name: String,
    pub location: String,
    pub games_played: u32,
    pub total_points: f64,
    pub best_score: f64,
    pub average_score: f64,
    pub last_played: String,
}

// Running totals for one team during the fold. Index into the accumulator
// vector is assigned on first sight of the team id, which is what keeps
// full ties in a deterministic order.
#[derive(Debug)]
struct TeamAccumulator {
    team_id: String,
    team_name: String,
    location: String,
    games_played: u32,
    total_points: f64,
    best_score: f64,
    last_played: String,
}

/// Rounds to one decimal place, the precision standings are displayed at.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Folds score records into a ranked list of team standings.
///
/// A record qualifies when `location_filter` is absent or exactly equals
/// its location (case-sensitive, no trimming). Records are grouped by team
/// id; each group's `team_name` and `location` snapshot comes from the last
/// qualifying record in input order (store order, top to bottom), not the
/// most recent by date. `best_score` is a running max starting at 0, so a
/// team with only negative totals shows 0. `last_played` is the
/// lexicographic max of the date strings, which matches chronological
/// order for YYYY-MM-DD.
///
/// Groups are sorted by total points descending, ties broken by games
/// played descending; any remaining tie keeps first-insertion order.
/// Ranks are 1..N with no sharing. Empty input yields empty output.
pub fn compute_standings(
    records: &[ScoreRecord],
    location_filter: Option<&str>,
) -> Vec<TeamStanding> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut teams: Vec<TeamAccumulator> = Vec::new();

    for record in records {
        if record.team_id.is_empty() {
            continue;
        }
        if let Some(location) = location_filter {
            if record.location != location {
                continue;
            }
        }

        let i = *index.entry(record.team_id.clone()).or_insert_with(|| {
            teams.push(TeamAccumulator {
                team_id: record.team_id.clone(),
                team_name: String::new(),
                location: String::new(),
                games_played: 0,
                total_points: 0.0,
                best_score: 0.0,
                last_played: String::new(),
            });
            teams.len() - 1
        });

        let team = &mut teams[i];
        // Last qualifying record wins the identity snapshot.
        team.team_name = record.team_name.clone();
        team.location = record.location.clone();
        team.games_played += 1;
        team.total_points += record.total;
        team.best_score = team.best_score.max(record.total);
        if record.date > team.last_played {
            team.last_played = record.date.clone();
        }
    }

    // Stable sort: full ties stay in first-insertion order.
    teams.sort_by(|a, b| {
        b.total_points
            .partial_cmp(&a.total_points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.games_played.cmp(&a.games_played))
    });

    teams
        .into_iter()
        .enumerate()
        .map(|(i, team)| {
            let average_score = if team.games_played > 0 {
                round1(team.total_points / team.games_played as f64)
            } else {
                0.0
            };
            TeamStanding {
                rank: i + 1,
                team_id: team.team_id,
                team_name: team.team_name,
                location: team.location,
                games_played: team.games_played,
                total_points: team.total_points,
                best_score: team.best_score,
                average_score,
                last_played: team.last_played,
            }
        })
        .collect()
}
