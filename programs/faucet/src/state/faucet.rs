use anchor_lang::prelude::*;

use crate::constants::DISCRIMINATOR_LEN;
use crate::errors::FaucetError;

/// Faucet record: one per mint, PDA seeds `[b"mint", mint]`.
/// Written once by `initialize_faucet` and read-only afterwards.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Faucet {
    /// PDA bump, reused to sign pool transfers
    pub bump: u8,
    /// Mint dispensed by this faucet
    pub mint: Pubkey,
    /// Wallet that initialized the faucet
    pub owner: Pubkey,
    /// Largest `n` a single withdrawal may request
    pub max_withdraw: u64,
    /// Multiplier turning `n` into raw token units
    pub decimals: u64,
}

impl Faucet {
    pub const SIZE: usize = DISCRIMINATOR_LEN +
        1 +                      // bump
        32 +                     // mint
        32 +                     // owner
        8 +                      // max_withdraw
        8;                       // decimals
    // Total: 89 bytes

    pub fn init(&mut self, bump: u8, mint: Pubkey, owner: Pubkey, decimals: u64, max_withdraw: u64) {
        self.bump = bump;
        self.mint = mint;
        self.owner = owner;
        self.decimals = decimals;
        self.max_withdraw = max_withdraw;
    }

    pub fn ensure_mint(&self, mint: &Pubkey) -> Result<()> {
        require_keys_eq!(*mint, self.mint, FaucetError::MintMismatch);
        Ok(())
    }

    /// Raw token units paid out for a request of `n`.
    pub fn payout(&self, n: u64) -> Result<u64> {
        n.checked_mul(self.decimals)
            .ok_or_else(|| error!(FaucetError::AmountOverflow))
    }

    pub fn ensure_within_limit(&self, n: u64) -> Result<()> {
        require!(n <= self.max_withdraw, FaucetError::WithdrawLimitExceeded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faucet(decimals: u64, max_withdraw: u64) -> Faucet {
        let mut faucet = Faucet::default();
        faucet.init(254, Pubkey::new_unique(), Pubkey::new_unique(), decimals, max_withdraw);
        faucet
    }

    #[test]
    fn test_size_matches_serialized_len() {
        let data = faucet(1_000_000, 5).try_to_vec().unwrap();
        assert_eq!(DISCRIMINATOR_LEN + data.len(), Faucet::SIZE);
    }

    #[test]
    fn test_payout_scales_by_decimals() {
        assert_eq!(faucet(1_000_000, 5).payout(5).unwrap(), 5_000_000);
        assert_eq!(faucet(1_000_000, 5).payout(0).unwrap(), 0);
    }

    #[test]
    fn test_payout_overflow() {
        let err = faucet(u64::MAX, u64::MAX).payout(2).unwrap_err();
        assert_eq!(err, FaucetError::AmountOverflow.into());
    }

    #[test]
    fn test_limit_is_inclusive() {
        let f = faucet(1, 5);
        assert!(f.ensure_within_limit(5).is_ok());
        assert_eq!(f.ensure_within_limit(6).unwrap_err(), FaucetError::WithdrawLimitExceeded.into());
    }

    #[test]
    fn test_mint_mismatch() {
        let f = faucet(1, 5);
        assert!(f.ensure_mint(&f.mint).is_ok());
        assert_eq!(
            f.ensure_mint(&Pubkey::new_unique()).unwrap_err(),
            FaucetError::MintMismatch.into()
        );
    }
}
