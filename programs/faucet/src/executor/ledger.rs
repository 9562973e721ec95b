use anchor_lang::prelude::*;

use super::store::{Record, Txn};
use crate::errors::FaucetError;
use crate::gateway::{TransferAuthority, TransferGateway};

/// Token transfers staged into an executor transaction.
pub struct LedgerGateway<'t> {
    txn: &'t mut Txn,
    from: Pubkey,
    to: Pubkey,
}

impl<'t> LedgerGateway<'t> {
    pub fn new(txn: &'t mut Txn, from: Pubkey, to: Pubkey) -> Self {
        Self { txn, from, to }
    }
}

impl TransferGateway for LedgerGateway<'_> {
    fn transfer(&mut self, amount: u64, authority: TransferAuthority<'_>) -> Result<()> {
        let mut from = self.txn.token(&self.from)?;
        let mut to = self.txn.token(&self.to)?;

        require_keys_eq!(from.mint, to.mint, FaucetError::MintMismatch);
        authority.ensure_matches(&from.authority)?;
        require!(from.amount >= amount, FaucetError::InsufficientBalance);

        if self.from == self.to {
            return Ok(());
        }

        from.amount -= amount;
        to.amount = to
            .amount
            .checked_add(amount)
            .ok_or_else(|| error!(FaucetError::AmountOverflow))?;

        self.txn.put(self.from, Record::Token(from))?;
        self.txn.put(self.to, Record::Token(to))
    }
}
