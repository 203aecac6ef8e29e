use super::options::RoleConfig;
use super::role::{Role, Team};
use super::words::WordPair;
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::iter::repeat;

/// A game player.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Player {
    pub name: String,
    pub role: Role,
    /// The team the player currently plays for; only a chameleon ever leaves its role's team.
    pub team: Team,
    pub word: Option<String>,
    pub eliminated: bool,
    pub has_voted: bool,
    pub voted_for: Option<String>,
    pub ability_used: bool,
}

impl Player {
    pub fn new(name: String, role: Role, words: &WordPair) -> Self {
        Self {
            name,
            role,
            team: role.team(),
            word: words.word_for(role.word_type()).map(str::to_string),
            eliminated: false,
            has_voted: false,
            voted_for: None,
            ability_used: false,
        }
    }

    pub fn alive(&self) -> bool {
        !self.eliminated
    }

    /// Clears the player's vote for a new voting round.
    pub fn reset_vote(&mut self) {
        self.has_voted = false;
        self.voted_for = None;
    }
}

/// Roles are dealt in this order, and every remaining player becomes a civil.
const DEAL_ORDER: [Role; 5] = [
    Role::Undercover,
    Role::MrWhite,
    Role::MrMime,
    Role::Seer,
    Role::Chameleon,
];

/// Deals roles and words to the named players.
///
/// The names are shuffled before roles are dealt, and the resulting players are
/// shuffled again so that a player's position never hints at their role.
pub fn assign_roles<S: AsRef<str>>(
    names: &[S],
    config: &RoleConfig,
    words: &WordPair,
    rng: &mut impl Rng,
) -> Result<Vec<Player>, GameError> {
    let slots = config.num_special_roles();
    if slots > names.len() {
        return Err(GameError::RoleSlotsExceedPlayers {
            slots,
            players: names.len(),
        });
    }

    let mut names: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
    names.shuffle(rng);

    let roles = DEAL_ORDER
        .iter()
        .flat_map(|role| repeat(*role).take(config.count(*role)))
        .chain(repeat(Role::Civil));
    let mut players = names
        .into_iter()
        .zip(roles)
        .map(|(name, role)| Player::new(name.to_string(), role, words))
        .collect::<Vec<_>>();

    players.shuffle(rng);
    Ok(players)
}
