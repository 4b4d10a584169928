use crate::error::Result;
use crate::models::{Bet, Direction, PickResult, Role};
use crate::utils::team_resolver::resolve_role;
use std::cmp::Ordering;

/// Final score of a game, keyed by side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalScore {
    pub home: f64,
    pub away: f64,
}

impl FinalScore {
    pub fn new(home: f64, away: f64) -> Self {
        Self { home, away }
    }

    /// `(picked, opponent)` scores for the given side
    fn for_role(&self, role: Role) -> (f64, f64) {
        match role {
            Role::Home => (self.home, self.away),
            Role::Away => (self.away, self.home),
        }
    }
}

/// Map a signed margin onto a result; exactly zero is a push
fn grade(margin: Ordering) -> PickResult {
    match margin {
        Ordering::Greater => PickResult::Win,
        Ordering::Less => PickResult::Loss,
        Ordering::Equal => PickResult::Push,
    }
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Spread: picked score - opponent score + line, compared against zero
pub fn evaluate_spread(role: Role, line: f64, score: FinalScore) -> PickResult {
    let (picked, opponent) = score.for_role(role);
    let margin = picked - opponent + line;
    grade(compare(margin, 0.0))
}

/// Total: combined score against the posted number
pub fn evaluate_total(direction: Direction, number: f64, score: FinalScore) -> PickResult {
    let total = score.home + score.away;
    match direction {
        Direction::Over => grade(compare(total, number)),
        Direction::Under => grade(compare(number, total)),
    }
}

/// Moneyline: straight up, a tie is a push
pub fn evaluate_moneyline(role: Role, score: FinalScore) -> PickResult {
    let (picked, opponent) = score.for_role(role);
    grade(compare(picked, opponent))
}

/// Grade a bet against the final score
///
/// Team-based bets resolve their side from the "Away vs Home" game description.
pub fn settle(bet: &Bet, game: &str, score: FinalScore) -> Result<PickResult> {
    let result = match bet {
        Bet::Spread { team, line } => evaluate_spread(resolve_role(game, team)?, *line, score),
        Bet::Total { direction, number } => evaluate_total(*direction, *number, score),
        Bet::Moneyline { team } => evaluate_moneyline(resolve_role(game, team)?, score),
    };
    Ok(result)
}
