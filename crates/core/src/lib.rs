//! Core of the rock–paper–scissors voice agent.
//!
//! This crate holds the session state machine and everything it needs that
//! does not touch the outside world: the game rules, answer validation, streak
//! tracking and the templated lines the agent speaks. Speech recognition,
//! actuation and persistence are reached through the traits in
//! [`collaborators`].

pub mod collaborators;
pub mod context;
pub mod controller;
pub mod error;
pub mod game;
pub mod phrases;
pub mod streak;
pub mod summary;
pub mod validator;

pub use controller::{Collaborators, ListenSettings, SessionController};
