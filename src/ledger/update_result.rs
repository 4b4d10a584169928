use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::models::{Game, PickResult, Role};
use crate::store::{GameStore, HistoryStore, JsonGameStore, JsonHistoryStore};
use crate::utils::pick_parser::parse_pick;
use crate::utils::settlement::{settle, FinalScore};
use crate::utils::team_resolver::{match_role, split_game, teams_match};
use crate::utils::title_case;
use tracing::{info, warn};

/// A team name as typed by the operator, with its final score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamScore {
    pub name: String,
    pub score: i64,
}

impl TeamScore {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Final result for one game, teams in either order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultUpdate {
    pub game_id: String,
    pub team1: TeamScore,
    pub team2: TeamScore,
}

impl ResultUpdate {
    /// Build from raw CLI strings; both scores must be integers
    pub fn parse(
        game_id: &str,
        team1_name: &str,
        team1_score: &str,
        team2_name: &str,
        team2_score: &str,
    ) -> Result<Self> {
        let invalid = || {
            TrackerError::InvalidScoreFormat(team1_score.to_string(), team2_score.to_string())
        };
        let score1: i64 = team1_score.trim().parse().map_err(|_| invalid())?;
        let score2: i64 = team2_score.trim().parse().map_err(|_| invalid())?;

        Ok(Self {
            game_id: game_id.to_string(),
            team1: TeamScore::new(team1_name, score1),
            team2: TeamScore::new(team2_name, score2),
        })
    }
}

/// What happened to the history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Settled {
        game_id: String,
        pick: String,
        result: PickResult,
        final_score: String,
    },
    /// The entry already held a terminal result and was left untouched
    AlreadySettled { game_id: String, result: PickResult },
}

impl UpdateOutcome {
    pub fn format(&self) -> String {
        match self {
            UpdateOutcome::Settled {
                game_id,
                pick,
                result,
                final_score,
            } => format!("Updated {}: {} -> {} ({})", game_id, pick, result, final_score),
            UpdateOutcome::AlreadySettled { game_id, result } => format!(
                "Warning: {} already has result '{}'. Skipping.",
                game_id, result
            ),
        }
    }
}

/// Home and away sides as the operator entered them
#[derive(Debug)]
struct Sides<'a> {
    home: &'a TeamScore,
    away: &'a TeamScore,
}

/// Assign each entered team to home or away on the game record
fn assign_sides<'a>(game: &Game, update: &'a ResultUpdate) -> Result<Sides<'a>> {
    let role_of = |team: &TeamScore| {
        match_role(&team.name, &game.home_team, &game.away_team).ok_or_else(|| {
            TrackerError::TeamMismatch(format!(
                "'{}' does not match home team '{}' or away team '{}'",
                team.name, game.home_team, game.away_team
            ))
        })
    };

    let role1 = role_of(&update.team1)?;
    let role2 = role_of(&update.team2)?;

    match (role1, role2) {
        (Role::Home, Role::Away) => Ok(Sides {
            home: &update.team1,
            away: &update.team2,
        }),
        (Role::Away, Role::Home) => Ok(Sides {
            home: &update.team2,
            away: &update.team1,
        }),
        (role, _) => {
            let full_name = match role {
                Role::Home => &game.home_team,
                Role::Away => &game.away_team,
            };
            Err(TrackerError::TeamMismatch(format!(
                "Both '{}' and '{}' match {} team '{}'",
                update.team1.name, update.team2.name, role, full_name
            )))
        }
    }
}

/// "<Home> <score>, <Away> <score>" using the names as entered, title-cased
pub fn format_final_score(home: &TeamScore, away: &TeamScore) -> String {
    format!(
        "{} {}, {} {}",
        title_case(&home.name),
        home.score,
        title_case(&away.name),
        away.score
    )
}

/// Settles pending history entries against final scores
pub struct ResultUpdater<G, H> {
    games: G,
    history: H,
}

impl ResultUpdater<JsonGameStore, JsonHistoryStore> {
    /// Open the games and history documents named in the config
    pub fn from_config(config: &Config) -> Result<Self> {
        let games = JsonGameStore::open(&config.games_path)?;
        let history = JsonHistoryStore::open(&config.history_path)?;
        Ok(Self::new(games, history))
    }
}

impl<G: GameStore, H: HistoryStore> ResultUpdater<G, H> {
    pub fn new(games: G, history: H) -> Self {
        Self { games, history }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Grade the pending pick for `update.game_id` and persist the ledger
    ///
    /// Nothing is written unless every check passes. An entry that already
    /// holds a result is reported as `AlreadySettled` and left alone.
    pub fn update(&mut self, update: &ResultUpdate) -> Result<UpdateOutcome> {
        let game_id = update.game_id.as_str();

        let game = self
            .games
            .find(game_id)
            .ok_or_else(|| TrackerError::GameNotFound(game_id.to_string()))?;
        let sides = assign_sides(game, update)?;

        let entry = self
            .history
            .find(game_id)
            .ok_or_else(|| TrackerError::HistoryEntryNotFound(game_id.to_string()))?;

        if !entry.result.is_pending() {
            info!(game_id, result = %entry.result, "already settled, skipping");
            return Ok(UpdateOutcome::AlreadySettled {
                game_id: game_id.to_string(),
                result: entry.result,
            });
        }

        let bet = parse_pick(&entry.pick)
            .ok_or_else(|| TrackerError::UnparseablePick(entry.pick.clone()))?;

        warn_on_description_mismatch(game, &entry.game);

        let score = FinalScore::new(sides.home.score as f64, sides.away.score as f64);
        let result = settle(&bet, &entry.game, score)?;
        let final_score = format_final_score(sides.home, sides.away);

        let mut settled = entry.clone();
        settled.result = result;
        settled.final_score = Some(final_score.clone());
        let pick = settled.pick.clone();

        self.history.upsert(settled);
        self.history.persist()?;

        info!(game_id, %result, final_score = %final_score, "settled pick");
        Ok(UpdateOutcome::Settled {
            game_id: game_id.to_string(),
            pick,
            result,
            final_score,
        })
    }
}

/// The free-text description and the game record should name the same teams
fn warn_on_description_mismatch(game: &Game, description: &str) {
    let consistent = split_game(description).is_some_and(|(away, home)| {
        teams_match(home, &game.home_team) && teams_match(away, &game.away_team)
    });
    if !consistent {
        warn!(
            game_id = %game.game_id,
            description,
            home_team = %game.home_team,
            away_team = %game.away_team,
            "history game description does not match the game record"
        );
    }
}
