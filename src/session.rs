use crate::game::{check_names, normalize_name, Game, RoleConfig, WordPair};
use crate::error::GameError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;

/// Key of the single session slot.
const CURRENT: &[u8] = b"current";

/// The result of a failed attempt to load or persist the session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("storage failure: {0}")]
    Storage(#[from] sled::Error),
    #[error("could not encode the session: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Persists the current session, and keeps a record of every finished game.
#[derive(Clone)]
pub struct SessionStore {
    db: sled::Db,
    session: sled::Tree,
    archive: sled::Tree,
}

/// Everything needed to resume play: the setup, and the game in progress, if any.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
pub struct Session {
    player_names: Vec<String>,
    config: RoleConfig,
    game: Option<Match>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
struct Match {
    /// The game itself.
    game: Game,
    /// Timestamp that the game was created.
    started_ts: SystemTime,
    /// Whether this game has been archived.
    archived: bool,
}

impl SessionStore {
    /// Opens the store at the given path, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        Self::with_db(sled::open(path)?)
    }

    /// Opens a store that is deleted once dropped.
    pub fn temporary() -> Result<Self, SessionError> {
        Self::with_db(sled::Config::new().temporary(true).open()?)
    }

    fn with_db(db: sled::Db) -> Result<Self, SessionError> {
        Ok(Self {
            session: db.open_tree("session")?,
            archive: db.open_tree("archive")?,
            db,
        })
    }

    /// Loads the current session, if one was saved.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let Some(data) = self.session.get(CURRENT)? else {
            return Ok(None);
        };
        let Ok(session) = serde_json::from_slice(&data) else {
            log::error!("Discarding unreadable session");
            return Ok(None);
        };
        Ok(Some(session))
    }

    /// Saves the session, archiving its game first if it has just finished.
    pub fn save(&self, session: &mut Session) -> Result<(), SessionError> {
        if let Err(err) = self.archive(session) {
            log::error!("Could not archive game: {}", err);
        }
        self.session
            .insert(CURRENT, serde_json::to_vec(&*session)?)?;
        self.session.flush()?;
        Ok(())
    }

    /// Loads the session, applies a change to it, and saves it again.
    /// Nothing is saved if the change is rejected.
    pub fn update<F, R>(&self, mutation: F) -> Result<R, SessionError>
    where
        F: FnOnce(&mut Session) -> Result<R, GameError>,
    {
        let mut session = self.load()?.unwrap_or_default();
        let result = mutation(&mut session)?;
        self.save(&mut session)?;
        Ok(result)
    }

    /// Forgets the current session entirely.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.session.remove(CURRENT)?;
        self.session.flush()?;
        Ok(())
    }

    /// Archives the session's game if it is over and hasn't been archived yet.
    /// Returns whether a record was written.
    pub fn archive(&self, session: &mut Session) -> Result<bool, SessionError> {
        let Some(Match { game, started_ts, archived }) = &mut session.game else {
            return Ok(false);
        };
        if !game.game_over() || *archived {
            return Ok(false);
        }
        let key = self.db.generate_id()?.to_be_bytes();
        let data = json!({
            "players": game.player_names().collect::<Value>(),
            "started": timestamp(*started_ts),
            "finished": timestamp(SystemTime::now()),
            "outcome": game.get_outcome_json()
        });
        self.archive.insert(key, serde_json::to_vec(&data)?)?;
        *archived = true;
        Ok(true)
    }

    /// Gets the records of every archived game, oldest first.
    pub fn past_games(&self) -> Result<Vec<Value>, SessionError> {
        let mut games = vec![];
        for entry in self.archive.iter() {
            let (_, data) = entry?;
            games.push(serde_json::from_slice(&data)?);
        }
        Ok(games)
    }
}

/// Formats a time as an RFC 3339 timestamp in UTC.
fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339()
}

impl Session {
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    /// Adds a player to the setup. Returns `false` if the name is blank or already taken.
    pub fn add_player(&mut self, name: &str) -> bool {
        let Ok(name) = normalize_name(name) else {
            return false;
        };
        if self.player_names.contains(&name) {
            return false;
        }
        self.player_names.push(name);
        true
    }

    /// Removes a player from the setup. Returns `false` if there was no such player.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let len = self.player_names.len();
        self.player_names.retain(|n| n != name);
        self.player_names.len() != len
    }

    pub fn clear_players(&mut self) {
        self.player_names.clear();
    }

    pub fn config(&self) -> &RoleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RoleConfig) {
        self.config = config;
    }

    /// Checks that a game can be started with the current setup.
    pub fn validate(&self) -> Result<(), GameError> {
        check_names(&self.player_names)?;
        self.config.validate(self.player_names.len())
    }

    /// Deals roles and starts a new game.
    pub fn start_game(&mut self, words: WordPair, seed: u64) -> Result<(), GameError> {
        if self.has_active_game() {
            return Err(GameError::InvalidAction);
        }
        self.validate()?;
        let game = Game::new(self.config, &self.player_names, words, seed)?;
        self.game = Some(Match {
            game,
            started_ts: SystemTime::now(),
            archived: false,
        });
        Ok(())
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref().map(|m| &m.game)
    }

    /// Performs an action on the game.
    pub fn mutate_game<F, R>(&mut self, mutation: F) -> Result<R, GameError>
    where
        F: FnOnce(&mut Game) -> Result<R, GameError>,
    {
        let Some(Match { game, .. }) = &mut self.game else {
            return Err(GameError::InvalidAction);
        };
        mutation(game)
    }

    /// Returns whether a game has been started and is not yet over.
    pub fn has_active_game(&self) -> bool {
        self.game().map_or(false, |game| !game.game_over())
    }

    /// Abandons the current game, keeping the setup.
    pub fn reset_game(&mut self) {
        self.game = None;
    }

    /// Abandons the current game and the setup.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}
