use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::FaucetError;
use crate::events::Deposited;
use crate::gateway::{SplTokenGateway, TransferAuthority, TransferGateway};

/// Tops up the pool. Anyone may deposit; `n` is moved as raw token units.
#[derive(Accounts)]
pub struct Deposit<'info> {
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = signer_account.mint == mint.key() @ FaucetError::MintMismatch,
    )]
    pub signer_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = faucet_account.mint == mint.key() @ FaucetError::MintMismatch,
    )]
    pub faucet_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Moves `n` from the signer's account into the pool, no scaling applied.
pub fn process<G: TransferGateway>(gateway: &mut G, signer: &Pubkey, n: u64) -> Result<()> {
    gateway.transfer(n, TransferAuthority::Signer(*signer))
}

pub fn handler(ctx: Context<Deposit>, n: u64) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let mut gateway = SplTokenGateway {
        token_program: ctx.accounts.token_program.to_account_info(),
        from: ctx.accounts.signer_account.to_account_info(),
        to: ctx.accounts.faucet_account.to_account_info(),
        authority: ctx.accounts.signer.to_account_info(),
        from_balance: ctx.accounts.signer_account.amount,
        from_owner: ctx.accounts.signer_account.owner,
    };

    process(&mut gateway, &signer, n)?;

    emit!(Deposited {
        mint: ctx.accounts.mint.key(),
        depositor: signer,
        amount: n,
    });

    msg!("FAUCET: deposit amount={} by {}", n, signer);

    Ok(())
}
