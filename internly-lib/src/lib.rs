//! Core logic for the Internly fundraising portal.
//!
//! The portal tracks intern fundraising records in a single document
//! collection. This crate owns the record store ([`Repository`]), the
//! persisted login session ([`SessionStore`]), and the pure aggregation
//! used by the dashboard and leaderboard views ([`stats`], [`milestones`]).
//! Rendering lives in the CLI crate.

use thiserror::Error;

pub mod config;
pub mod fs;
pub mod milestones;
pub mod repository;
pub mod session;
pub mod stats;

pub use repository::{InternPatch, InternRecord, JoinDate, NewIntern, Repository};
pub use session::{Session, SessionStore};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The backing store could not be reached or rejected a query.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] agdb::DbError),
    #[error("no intern record with id `{0}`")]
    NotFound(String),
    /// A credential query matched no record.
    #[error("no record matches the given credentials")]
    NoMatch,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("session state unreadable: {0}")]
    SessionIo(#[from] std::io::Error),
    #[error("session state corrupt: {0}")]
    SessionDecode(#[from] toml::de::Error),
    #[error("session state unwritable: {0}")]
    SessionEncode(#[from] toml::ser::Error),
}
