use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game](crate::game::Game).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("at least {required} players are needed, but there are only {actual}")]
    TooFewPlayers { required: usize, actual: usize },
    #[error("too many special roles for the number of players")]
    TooManySpecialRoles,
    #[error("at most {max} {role} can be in a game")]
    InvalidRoleCount { role: &'static str, max: usize },
    #[error("a player named {0:?} has already joined")]
    DuplicatePlayerName(String),
    #[error("player names cannot be blank")]
    InvalidPlayerName,
    #[error("{slots} role slots were requested for only {players} players")]
    RoleSlotsExceedPlayers { slots: usize, players: usize },
    #[error("no player exists with the given name")]
    PlayerNotFound,
    #[error("this player cannot be chosen for this action")]
    InvalidPlayerChoice,
    #[error("invalid player index")]
    InvalidPlayerIndex,
    #[error("this player has been eliminated")]
    PlayerEliminated,
    #[error("this player has already voted this round")]
    AlreadyVoted,
    #[error("this player cannot use that ability")]
    AbilityUnavailable,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
    #[error("the game is already over")]
    GameOver,
}
