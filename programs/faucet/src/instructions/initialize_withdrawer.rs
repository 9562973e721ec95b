use anchor_lang::prelude::*;

use crate::constants::WITHDRAWER_SEED;
use crate::events::WithdrawerRegistered;
use crate::state::Withdrawer;

#[derive(Accounts)]
pub struct InitializeWithdrawer<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = Withdrawer::SIZE,
        seeds = [WITHDRAWER_SEED, signer.key().as_ref()],
        bump,
    )]
    pub withdrawer: Account<'info, Withdrawer>,

    pub rent: Sysvar<'info, Rent>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeWithdrawer>) -> Result<()> {
    let owner = ctx.accounts.signer.key();
    let withdrawer = &mut ctx.accounts.withdrawer;

    withdrawer.init(owner);

    emit!(WithdrawerRegistered {
        withdrawer: withdrawer.key(),
        owner,
    });

    msg!("FAUCET: withdrawer registered for {}", owner);

    Ok(())
}
