//! Errors surfaced by the engine's external command API.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("no live agent with id {0}")]
    UnknownAgent(u32),
}
