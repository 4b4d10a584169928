use crate::error::{Result, TrackerError};
use crate::models::Role;

/// Separator between the away and home team in a game description
pub const GAME_SEPARATOR: &str = " vs ";

/// Case-insensitive match of an operator-entered name against a full team name
///
/// Equality or substring both count, so "knicks" matches "New York Knicks".
pub fn teams_match(input_name: &str, full_name: &str) -> bool {
    let input = input_name.to_lowercase();
    let full = full_name.to_lowercase();
    input == full || full.contains(&input)
}

/// Match a name against a home/away pair, checking home first
pub fn match_role(team_name: &str, home_team: &str, away_team: &str) -> Option<Role> {
    if teams_match(team_name, home_team) {
        Some(Role::Home)
    } else if teams_match(team_name, away_team) {
        Some(Role::Away)
    } else {
        None
    }
}

/// Split an "Away vs Home" description into `(away, home)`
pub fn split_game(game: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = game.split(GAME_SEPARATOR).collect();
    match parts[..] {
        [away, home] => Some((away.trim(), home.trim())),
        _ => None,
    }
}

/// Determine whether `team_name` is home or away in an "Away vs Home" description
pub fn resolve_role(game: &str, team_name: &str) -> Result<Role> {
    split_game(game)
        .and_then(|(away, home)| match_role(team_name, home, away))
        .ok_or_else(|| TrackerError::RoleResolutionFailed {
            team: team_name.to_string(),
            game: game.to_string(),
        })
}
