//! Nullable asset bank — an in-memory pool with a payout trail.

use guild_treasury::{AssetBank, TreasuryError};
use guild_types::Address;
use std::collections::HashMap;

/// In-memory `AssetBank` holding one pooled balance per token and recording
/// every outbound transfer so tests can assert exact payouts.
#[derive(Debug, Default)]
pub struct NullBank {
    pooled: HashMap<Address, u128>,
    paid: HashMap<(Address, Address), u128>,
}

impl NullBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the pool with `amount` of `token`.
    pub fn deposit(&mut self, token: Address, amount: u128) {
        *self.pooled.entry(token).or_insert(0) += amount;
    }

    /// Total amount of `token` paid out to `recipient` so far.
    pub fn paid_to(&self, token: &Address, recipient: &Address) -> u128 {
        self.paid
            .get(&(token.clone(), recipient.clone()))
            .copied()
            .unwrap_or(0)
    }
}

impl AssetBank for NullBank {
    fn balance(&self, token: &Address) -> u128 {
        self.pooled.get(token).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        token: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), TreasuryError> {
        let available = self.balance(token);
        if available < amount {
            return Err(TreasuryError::InsufficientAssets {
                token: token.clone(),
                needed: amount,
                available,
            });
        }
        self.pooled.insert(token.clone(), available - amount);
        *self.paid.entry((token.clone(), to.clone())).or_insert(0) += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Address {
        Address::new("gld_token_weth")
    }

    fn member() -> Address {
        Address::new("gld_member_one")
    }

    #[test]
    fn transfer_moves_from_pool_and_records() {
        let mut bank = NullBank::new();
        bank.deposit(token(), 1000);
        bank.transfer(&token(), &member(), 400).unwrap();
        assert_eq!(bank.balance(&token()), 600);
        assert_eq!(bank.paid_to(&token(), &member()), 400);
    }

    #[test]
    fn overdraw_is_rejected() {
        let mut bank = NullBank::new();
        bank.deposit(token(), 100);
        let err = bank.transfer(&token(), &member(), 200).unwrap_err();
        assert!(matches!(err, TreasuryError::InsufficientAssets { .. }));
        assert_eq!(bank.balance(&token()), 100);
    }
}
