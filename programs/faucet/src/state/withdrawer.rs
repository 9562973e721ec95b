use anchor_lang::prelude::*;

use crate::constants::{DISCRIMINATOR_LEN, RATE_LIMIT_SECONDS};
use crate::errors::FaucetError;

/// Per-user rate limit state, PDA seeds `[b"withdrawer", owner]`.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Withdrawer {
    /// Wallet allowed to withdraw through this record
    pub owner: Pubkey,
    /// Unix timestamp of the last successful withdrawal, 0 if none yet
    pub last_withdraw: i64,
}

impl Withdrawer {
    pub const SIZE: usize = DISCRIMINATOR_LEN +
        32 +                     // owner
        8;                       // last_withdraw
    // Total: 48 bytes

    pub fn init(&mut self, owner: Pubkey) {
        self.owner = owner;
        self.last_withdraw = 0;
    }

    pub fn ensure_owner(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.owner, FaucetError::UnauthorizedWithdrawer);
        Ok(())
    }

    /// Eligible only once strictly more than `RATE_LIMIT_SECONDS` have elapsed.
    pub fn is_eligible(&self, now: i64) -> bool {
        now.saturating_sub(RATE_LIMIT_SECONDS) > self.last_withdraw
    }

    pub fn ensure_eligible(&self, now: i64) -> Result<()> {
        require!(self.is_eligible(now), FaucetError::RateLimited);
        Ok(())
    }

    pub fn record_withdraw(&mut self, now: i64) {
        self.last_withdraw = now;
    }
}
