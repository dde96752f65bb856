//! The ordered, duplicate-free list of recognized treasury assets.
//!
//! Only successfully processed whitelist-type proposals mutate this list
//! (plus the initial set fixed at summoning).

use guild_types::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssetList {
    tokens: Vec<Address>,
}

impl AssetList {
    /// Build the initial list, dropping duplicates while keeping order.
    pub fn new(initial: Vec<Address>) -> Self {
        let mut list = Self { tokens: Vec::new() };
        for token in initial {
            list.add(token);
        }
        list
    }

    /// Add a token; returns false if it was already recognized.
    pub fn add(&mut self, token: Address) -> bool {
        if self.tokens.contains(&token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    /// Remove a token; returns false if it was not recognized.
    pub fn remove(&mut self, token: &Address) -> bool {
        match self.tokens.iter().position(|t| t == token) {
            Some(pos) => {
                self.tokens.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, token: &Address) -> bool {
        self.tokens.contains(token)
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
