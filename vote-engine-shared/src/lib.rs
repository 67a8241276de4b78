//! # Vote Engine Shared
//! This crate defines shared data structures and types used across the vote
//! engine ecosystem. It includes common definitions for vote values, vote
//! targets, ledger records, receipts, and notifications.
pub mod types;
