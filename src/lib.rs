//! Rules engine for Undercover, a social deduction party game.
//!
//! The engine is headless: [game::Game] holds the state of one match and every
//! transition is a method that either applies the change or rejects it with a
//! [GameError]. [session::SessionStore] persists the single active session.

pub mod error;
pub mod game;
pub mod session;

pub use error::GameError;
