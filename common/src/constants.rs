/// Venues the league currently plays at. Locations on incoming score
/// submissions must match one of these exactly.
pub const VENUES: [&str; 4] = [
    "The Thirsty Scholar",
    "Harbor Taproom",
    "Crown & Anchor",
    "Mulligan's Public House",
];

/// Maximum number of scored rounds in a single game night.
pub const MAX_ROUNDS: usize = 6;

// Column layout of a stored score row. Positions are fixed by contract
// with the spreadsheet; the six round columns are COL_ROUND_1..=COL_ROUND_1+5.
pub const COL_SCORE_ID: usize = 0;
pub const COL_DATE: usize = 1;
pub const COL_WEEK: usize = 2;
pub const COL_LOCATION: usize = 3;
pub const COL_TEAM_ID: usize = 4;
pub const COL_TEAM_NAME: usize = 5;
pub const COL_ROUND_1: usize = 6;
pub const COL_BONUS_ROUND: usize = 12;
pub const COL_TOTAL: usize = 13;
pub const COL_SUBMITTED_BY: usize = 14;
pub const COL_SUBMITTED_AT: usize = 15;

/// Returns true when `location` is a recognized league venue.
pub fn is_valid_venue(location: &str) -> bool {
    VENUES.contains(&location)
}
