#![allow(unexpected_cfgs)]

//! # Token Faucet
//!
//! One pool per mint, owned by a keyless PDA. Anyone can top it up; registered
//! users withdraw at most `max_withdraw * decimals` raw units, no more than
//! once per minute.

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod instructions;
pub mod pda;
pub mod state;

#[cfg(any(test, feature = "local-executor"))]
pub mod executor;

use instructions::*;

declare_id!("EtTeTRSJSRBBgm5nrmodadBpToGFrwWjo2syiVAjvjuT");

#[program]
pub mod faucet {
    use super::*;

    /// Create the faucet record and pool token account for a mint
    pub fn initialize_faucet(
        ctx: Context<InitializeFaucet>,
        decimals: u64,
        max_withdraw: u64,
    ) -> Result<()> {
        instructions::initialize_faucet::handler(ctx, decimals, max_withdraw)
    }

    /// Move `n` raw token units from the signer into the pool
    pub fn deposit(ctx: Context<Deposit>, n: u64) -> Result<()> {
        instructions::deposit::handler(ctx, n)
    }

    /// Register the signer as a withdrawer
    pub fn initialize_withdrawer(ctx: Context<InitializeWithdrawer>) -> Result<()> {
        instructions::initialize_withdrawer::handler(ctx)
    }

    /// Pay out `n * decimals` from the pool, rate limited per withdrawer
    pub fn withdraw(ctx: Context<Withdraw>, n: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, n)
    }
}
