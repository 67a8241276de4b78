//! # Vote Engine Repository
//! This crate provides traits and implementations for the vote engine's
//! durable state. It includes definitions for errors, interfaces, and
//! concrete implementations for PostgreSQL.
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::{NotificationsRepositoryError, VoteStoreError};
pub use interfaces::{NotificationsRepository, VoteStore, VoteUnit};
pub use postgres::{PostgresNotificationsRepository, PostgresVoteStore};
