use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use super::{TransferAuthority, TransferGateway};
use crate::errors::FaucetError;

/// Transfers through the SPL Token program via CPI.
pub struct SplTokenGateway<'info> {
    pub token_program: AccountInfo<'info>,
    pub from: AccountInfo<'info>,
    pub to: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    /// Token balance of `from` as loaded for this instruction
    pub from_balance: u64,
    /// Authority recorded on `from`
    pub from_owner: Pubkey,
}

impl<'info> TransferGateway for SplTokenGateway<'info> {
    fn transfer(&mut self, amount: u64, authority: TransferAuthority<'_>) -> Result<()> {
        authority.ensure_matches(&self.from_owner)?;
        require!(self.from_balance >= amount, FaucetError::InsufficientBalance);

        let accounts = Transfer {
            from: self.from.clone(),
            to: self.to.clone(),
            authority: self.authority.clone(),
        };

        match authority {
            TransferAuthority::Signer(_) => {
                token::transfer(CpiContext::new(self.token_program.clone(), accounts), amount)?
            }
            TransferAuthority::Derived(seeds) => {
                let signer = &[seeds];
                token::transfer(
                    CpiContext::new_with_signer(self.token_program.clone(), accounts, signer),
                    amount,
                )?
            }
        }

        self.from_balance -= amount;
        Ok(())
    }
}
