use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{FAUCET_SEED, FAUCET_VAULT_SEED};
use crate::events::FaucetInitialized;
use crate::state::Faucet;

/// Creates the faucet record and its pool token account for `mint`.
/// `init` makes a second call for the same mint fail.
#[derive(Accounts)]
pub struct InitializeFaucet<'info> {
    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = signer,
        space = Faucet::SIZE,
        seeds = [FAUCET_SEED, mint.key().as_ref()],
        bump,
    )]
    pub faucet: Account<'info, Faucet>,

    #[account(mut)]
    pub signer: Signer<'info>,

    /// Pool account, transfer authority is the faucet PDA
    #[account(
        init,
        payer = signer,
        seeds = [FAUCET_VAULT_SEED, mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = faucet,
    )]
    pub faucet_account: Account<'info, TokenAccount>,

    pub rent: Sysvar<'info, Rent>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<InitializeFaucet>, decimals: u64, max_withdraw: u64) -> Result<()> {
    let mint = ctx.accounts.mint.key();
    let owner = ctx.accounts.signer.key();
    let faucet = &mut ctx.accounts.faucet;

    faucet.init(ctx.bumps.faucet, mint, owner, decimals, max_withdraw);

    emit!(FaucetInitialized {
        faucet: faucet.key(),
        mint,
        owner,
        decimals,
        max_withdraw,
    });

    msg!(
        "FAUCET: initialized mint={} decimals={} max_withdraw={}",
        mint,
        decimals,
        max_withdraw
    );

    Ok(())
}
