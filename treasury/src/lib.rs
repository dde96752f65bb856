//! Treasury side of the guild engine.
//!
//! Holds the list of asset identifiers recognized for ragequit payout, the
//! `AssetBank` trait that abstracts the external fungible-token modules
//! actually holding the pooled balances, and the pro-rata settlement math.
//! The engine crate decides *when* a payout happens; this crate only knows
//! *how much*.

pub mod assets;
pub mod bank;
pub mod error;
pub mod settlement;

pub use assets::AssetList;
pub use bank::AssetBank;
pub use error::TreasuryError;
pub use settlement::pro_rata_claim;
