//! Treasury-specific errors.

use guild_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreasuryError {
    #[error("arithmetic overflow in payout computation")]
    Overflow,

    #[error("cannot settle against zero total stake")]
    ZeroTotalStake,

    #[error("insufficient pooled {token}: need {needed}, available {available}")]
    InsufficientAssets {
        token: Address,
        needed: u128,
        available: u128,
    },
}
