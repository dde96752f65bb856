//! Nullable infrastructure for deterministic testing.
//!
//! The engine's external collaborators (the ledger clock and the fungible
//! asset modules) are abstracted behind explicit parameters and traits. This
//! crate provides implementations that are fully controllable from tests and
//! never touch the outside world.

pub mod bank;
pub mod clock;

pub use bank::NullBank;
pub use clock::NullClock;
