use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::events::Withdrawn;
use crate::gateway::{SplTokenGateway, TransferAuthority, TransferGateway};
use crate::pda;
use crate::state::{Faucet, Withdrawer};

#[derive(Accounts)]
#[instruction(n: u64)]
pub struct Withdraw<'info> {
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub withdrawer_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub faucet_account: Account<'info, TokenAccount>,

    pub faucet: Account<'info, Faucet>,

    #[account(mut)]
    pub withdrawer: Account<'info, Withdrawer>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub clock: Sysvar<'info, Clock>,
    pub token_program: Program<'info, Token>,
}

/// Effects of a withdrawal that passed every check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawPlan {
    /// Raw token units leaving the pool
    pub amount: u64,
    /// New `last_withdraw` of the withdrawer
    pub timestamp: i64,
}

/// Run the withdrawal checks in order without touching any state.
pub fn plan(
    mint: &Pubkey,
    faucet: &Faucet,
    withdrawer: &Withdrawer,
    signer: &Pubkey,
    n: u64,
    now: i64,
) -> Result<WithdrawPlan> {
    faucet.ensure_mint(mint)?;
    withdrawer.ensure_owner(signer)?;
    withdrawer.ensure_eligible(now)?;
    faucet.ensure_within_limit(n)?;
    let amount = faucet.payout(n)?;

    Ok(WithdrawPlan {
        amount,
        timestamp: now,
    })
}

/// Plan, pay out from the pool as the faucet PDA, then stamp the withdrawer.
pub fn process<G: TransferGateway>(
    gateway: &mut G,
    mint: &Pubkey,
    faucet: &Faucet,
    withdrawer: &mut Withdrawer,
    signer: &Pubkey,
    n: u64,
    now: i64,
) -> Result<WithdrawPlan> {
    let plan = plan(mint, faucet, withdrawer, signer, n, now)?;

    let bump = [faucet.bump];
    let seeds = pda::faucet_signer_seeds(mint, &bump);
    gateway.transfer(plan.amount, TransferAuthority::Derived(&seeds))?;

    withdrawer.record_withdraw(plan.timestamp);
    Ok(plan)
}

pub fn handler(ctx: Context<Withdraw>, n: u64) -> Result<()> {
    let mint = ctx.accounts.mint.key();
    let signer = ctx.accounts.signer.key();
    let now = ctx.accounts.clock.unix_timestamp;

    let mut gateway = SplTokenGateway {
        token_program: ctx.accounts.token_program.to_account_info(),
        from: ctx.accounts.faucet_account.to_account_info(),
        to: ctx.accounts.withdrawer_account.to_account_info(),
        authority: ctx.accounts.faucet.to_account_info(),
        from_balance: ctx.accounts.faucet_account.amount,
        from_owner: ctx.accounts.faucet_account.owner,
    };

    let plan = process(
        &mut gateway,
        &mint,
        &ctx.accounts.faucet,
        &mut ctx.accounts.withdrawer,
        &signer,
        n,
        now,
    )?;

    emit!(Withdrawn {
        mint,
        recipient: ctx.accounts.withdrawer_account.key(),
        amount: plan.amount,
        timestamp: plan.timestamp,
    });

    msg!(
        "FAUCET: withdraw n={} amount={} by {} at {}",
        n,
        plan.amount,
        signer,
        plan.timestamp
    );

    Ok(())
}
