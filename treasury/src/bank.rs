//! The fungible-asset collaborator boundary.
//!
//! The engine never holds token balances itself; the external modules that do
//! are abstracted behind this trait, so settlement can be driven against a
//! live token system or a deterministic test double.

use crate::error::TreasuryError;
use guild_types::Address;

/// External fungible-asset module holding the organization's pooled balances.
pub trait AssetBank {
    /// The organization's pooled balance of `token`.
    fn balance(&self, token: &Address) -> u128;

    /// Transfer `amount` of `token` out of the pool to `to`.
    fn transfer(&mut self, token: &Address, to: &Address, amount: u128)
        -> Result<(), TreasuryError>;
}
