//! PostgreSQL implementations of the vote engine repositories.
mod notifications_repository;
mod vote_store;

pub use notifications_repository::PostgresNotificationsRepository;
pub use vote_store::PostgresVoteStore;
