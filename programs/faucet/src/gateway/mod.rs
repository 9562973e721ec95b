use anchor_lang::prelude::*;

use crate::errors::FaucetError;

pub mod spl;

pub use spl::*;

/// Who approves a transfer out of the source account.
#[derive(Clone, Copy, Debug)]
pub enum TransferAuthority<'a> {
    /// A wallet that signed the transaction.
    Signer(Pubkey),
    /// A program address proven by its seeds (bump included).
    Derived(&'a [&'a [u8]]),
}

impl TransferAuthority<'_> {
    /// The address this authority acts as.
    pub fn key(&self) -> Result<Pubkey> {
        match self {
            TransferAuthority::Signer(key) => Ok(*key),
            TransferAuthority::Derived(seeds) => Pubkey::create_program_address(seeds, &crate::ID)
                .map_err(|_| error!(FaucetError::AuthorityMismatch)),
        }
    }

    /// Fail unless this authority is the one recorded on the source account.
    pub fn ensure_matches(&self, recorded: &Pubkey) -> Result<()> {
        require_keys_eq!(self.key()?, *recorded, FaucetError::AuthorityMismatch);
        Ok(())
    }
}

/// Moves token balance between the two accounts a gateway is bound to.
/// A transfer either moves the full amount or fails without effect.
pub trait TransferGateway {
    fn transfer(&mut self, amount: u64, authority: TransferAuthority<'_>) -> Result<()>;
}
