//! Pro-rata ragequit settlement math.

use crate::error::TreasuryError;

/// A member's claim on one asset when burning `stake_burned` out of
/// `total_stake` (loot + shares, both sides).
///
/// Integer division truncates toward zero, so the payout is bounded above by
/// the member's exact stake fraction; the remainder stays in the pool.
pub fn pro_rata_claim(
    asset_balance: u128,
    stake_burned: u128,
    total_stake: u128,
) -> Result<u128, TreasuryError> {
    if stake_burned == 0 {
        return Ok(0);
    }
    if total_stake == 0 {
        return Err(TreasuryError::ZeroTotalStake);
    }
    let scaled = asset_balance
        .checked_mul(stake_burned)
        .ok_or(TreasuryError::Overflow)?;
    Ok(scaled / total_stake)
}
