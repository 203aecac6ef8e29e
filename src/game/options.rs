use super::role::Role;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// No game can be played with fewer players than this.
pub const MIN_PLAYERS: usize = 4;

/// Whether an optional role is in play, and how many players receive it.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct RoleSlot {
    pub enabled: bool,
    pub count: usize,
}

impl RoleSlot {
    pub fn enabled(count: usize) -> Self {
        Self { enabled: true, count }
    }

    pub fn disabled() -> Self {
        Self { enabled: false, count: 1 }
    }

    /// The number of players dealt this role; an enabled slot always deals at least one.
    fn active_count(&self) -> usize {
        if self.enabled {
            self.count.max(1)
        } else {
            0
        }
    }
}

/// Selects which roles are dealt at the start of a game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct RoleConfig {
    /// The undercover role is mandatory; `enabled` is ignored.
    pub undercover: RoleSlot,
    pub mr_white: RoleSlot,
    pub mr_mime: RoleSlot,
    pub seer: RoleSlot,
    pub chameleon: RoleSlot,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            undercover: RoleSlot::enabled(1),
            mr_white: RoleSlot::disabled(),
            mr_mime: RoleSlot::disabled(),
            seer: RoleSlot::disabled(),
            chameleon: RoleSlot::disabled(),
        }
    }
}

impl RoleConfig {
    /// Gets the default configuration with the recommended number of undercovers for the player count.
    pub fn recommended(num_players: usize) -> Self {
        Self {
            undercover: RoleSlot::enabled(recommended_undercovers(num_players)),
            ..Default::default()
        }
    }

    /// The number of players that will be dealt the given role, not counting civils.
    pub fn count(&self, role: Role) -> usize {
        match role {
            Role::Civil => 0,
            Role::Undercover => self.undercover.count.max(1),
            Role::MrWhite => self.mr_white.active_count(),
            Role::MrMime => self.mr_mime.active_count(),
            Role::Seer => self.seer.active_count().min(1),
            Role::Chameleon => self.chameleon.active_count().min(1),
        }
    }

    /// The total number of players dealt a role other than civil.
    pub fn num_special_roles(&self) -> usize {
        Role::ALL.iter().map(|role| self.count(*role)).sum()
    }

    /// Returns the minimum number of players this configuration needs.
    pub fn min_players(&self) -> usize {
        let mut minimum = MIN_PLAYERS.max(self.count(Role::Undercover) + 3);
        minimum += self.count(Role::MrWhite);
        minimum += self.count(Role::MrMime);
        minimum
    }

    /// Checks that a game can be started with this configuration and the given number of players.
    pub fn validate(&self, num_players: usize) -> Result<(), GameError> {
        self.check_bounds()?;

        if num_players < MIN_PLAYERS {
            return Err(GameError::TooFewPlayers {
                required: MIN_PLAYERS,
                actual: num_players,
            });
        }

        // At least two plain civils must remain
        if self.num_special_roles() + 2 > num_players {
            return Err(GameError::TooManySpecialRoles);
        }

        let required = self.min_players();
        if num_players < required {
            return Err(GameError::TooFewPlayers {
                required,
                actual: num_players,
            });
        }

        Ok(())
    }

    fn check_bounds(&self) -> Result<(), GameError> {
        let slots = [
            (Role::Undercover, &self.undercover, 3),
            (Role::MrWhite, &self.mr_white, 2),
            (Role::MrMime, &self.mr_mime, 2),
            (Role::Seer, &self.seer, 1),
            (Role::Chameleon, &self.chameleon, 1),
        ];
        for (role, slot, max) in slots {
            let enabled = slot.enabled || role == Role::Undercover;
            if enabled && slot.count > max {
                return Err(GameError::InvalidRoleCount { role: role.id(), max });
            }
        }
        Ok(())
    }
}

/// The number of undercovers recommended for the given number of players.
pub fn recommended_undercovers(num_players: usize) -> usize {
    match num_players {
        0..=5 => 1,
        6..=8 => 2,
        _ => 3,
    }
}

/// Trims a player name, rejecting names that are blank.
pub fn normalize_name(name: &str) -> Result<String, GameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GameError::InvalidPlayerName);
    }
    Ok(name.to_string())
}

/// Checks that every name is non-blank and that no name appears twice.
pub fn check_names<S: AsRef<str>>(names: &[S]) -> Result<(), GameError> {
    for (idx, name) in names.iter().enumerate() {
        let name = normalize_name(name.as_ref())?;
        if names[..idx].iter().any(|other| other.as_ref().trim() == name) {
            return Err(GameError::DuplicatePlayerName(name));
        }
    }
    Ok(())
}
