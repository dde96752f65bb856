//! Fundamental types for the guild governance engine.
//!
//! This crate defines the leaf types every other crate in the workspace
//! depends on: member/asset addresses, timestamps, detail hashes, and the
//! governance configuration.

pub mod address;
pub mod config;
pub mod hash;
pub mod time;

pub use address::Address;
pub use config::GovConfig;
pub use hash::DetailsHash;
pub use time::Timestamp;
