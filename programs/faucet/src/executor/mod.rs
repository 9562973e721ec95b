//! In-process executor for the faucet instructions.
//!
//! Plays the runtime's part so the whole program can be driven natively:
//! it locks the accounts an instruction declares, runs the instruction
//! against a staged transaction and commits the writes only on success.

use std::sync::atomic::{AtomicI64, Ordering};

use anchor_lang::prelude::*;
use solana_program::instruction::AccountMeta;

use crate::constants::{FAUCET_SEED, FAUCET_VAULT_SEED, WITHDRAWER_SEED};
use crate::errors::FaucetError;
use crate::instructions::{deposit, withdraw};
use crate::pda;
use crate::state::{Faucet, Withdrawer};

pub mod ledger;
pub mod lock;
pub mod store;

#[cfg(test)]
pub mod fixture;

pub use ledger::LedgerGateway;
pub use lock::{LockGuard, LockTable};
pub use store::{Record, Store, TokenBalance, Txn};

/// A faucet instruction with the accounts a client would pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    InitializeFaucet {
        mint: Pubkey,
        faucet: Pubkey,
        faucet_account: Pubkey,
        signer: Pubkey,
        decimals: u64,
        max_withdraw: u64,
    },
    Deposit {
        mint: Pubkey,
        signer_account: Pubkey,
        faucet_account: Pubkey,
        signer: Pubkey,
        n: u64,
    },
    InitializeWithdrawer {
        signer: Pubkey,
        withdrawer: Pubkey,
    },
    Withdraw {
        mint: Pubkey,
        withdrawer_account: Pubkey,
        faucet_account: Pubkey,
        faucet: Pubkey,
        withdrawer: Pubkey,
        signer: Pubkey,
        n: u64,
    },
}

impl Instruction {
    pub fn initialize_faucet(mint: Pubkey, signer: Pubkey, decimals: u64, max_withdraw: u64) -> Self {
        Instruction::InitializeFaucet {
            mint,
            faucet: pda::faucet_address(&mint).0,
            faucet_account: pda::faucet_vault_address(&mint).0,
            signer,
            decimals,
            max_withdraw,
        }
    }

    pub fn deposit(mint: Pubkey, signer: Pubkey, signer_account: Pubkey, n: u64) -> Self {
        Instruction::Deposit {
            mint,
            signer_account,
            faucet_account: pda::faucet_vault_address(&mint).0,
            signer,
            n,
        }
    }

    pub fn initialize_withdrawer(signer: Pubkey) -> Self {
        Instruction::InitializeWithdrawer {
            signer,
            withdrawer: pda::withdrawer_address(&signer).0,
        }
    }

    pub fn withdraw(mint: Pubkey, signer: Pubkey, withdrawer_account: Pubkey, n: u64) -> Self {
        Instruction::Withdraw {
            mint,
            withdrawer_account,
            faucet_account: pda::faucet_vault_address(&mint).0,
            faucet: pda::faucet_address(&mint).0,
            withdrawer: pda::withdrawer_address(&signer).0,
            signer,
            n,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Instruction::InitializeFaucet { .. } => "initialize_faucet",
            Instruction::Deposit { .. } => "deposit",
            Instruction::InitializeWithdrawer { .. } => "initialize_withdrawer",
            Instruction::Withdraw { .. } => "withdraw",
        }
    }

    /// Accounts the instruction touches, in client order.
    pub fn account_metas(&self) -> Vec<AccountMeta> {
        match *self {
            Instruction::InitializeFaucet {
                mint,
                faucet,
                faucet_account,
                signer,
                ..
            } => vec![
                AccountMeta::new_readonly(mint, false),
                AccountMeta::new(faucet, false),
                AccountMeta::new(signer, true),
                AccountMeta::new(faucet_account, false),
            ],
            Instruction::Deposit {
                mint,
                signer_account,
                faucet_account,
                signer,
                ..
            } => vec![
                AccountMeta::new_readonly(mint, false),
                AccountMeta::new(signer_account, false),
                AccountMeta::new(faucet_account, false),
                AccountMeta::new(signer, true),
            ],
            Instruction::InitializeWithdrawer { signer, withdrawer } => vec![
                AccountMeta::new(signer, true),
                AccountMeta::new(withdrawer, false),
            ],
            Instruction::Withdraw {
                mint,
                withdrawer_account,
                faucet_account,
                faucet,
                withdrawer,
                signer,
                ..
            } => vec![
                AccountMeta::new_readonly(mint, false),
                AccountMeta::new(withdrawer_account, false),
                AccountMeta::new(faucet_account, false),
                AccountMeta::new_readonly(faucet, false),
                AccountMeta::new(withdrawer, false),
                AccountMeta::new(signer, true),
            ],
        }
    }
}

/// Runs instructions one at a time per account, all-or-nothing.
#[derive(Debug, Default)]
pub struct Executor {
    store: Store,
    locks: LockTable,
    clock: AtomicI64,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unix timestamp handed to instructions as `now`.
    pub fn set_clock(&self, unix_timestamp: i64) {
        self.clock.store(unix_timestamp, Ordering::SeqCst);
    }

    pub fn now(&self) -> i64 {
        self.clock.load(Ordering::SeqCst)
    }

    /// Create a token account outside of any instruction.
    pub fn create_token_account(&self, address: Pubkey, mint: Pubkey, authority: Pubkey, amount: u64) {
        self.store
            .insert(address, Record::Token(TokenBalance::new(mint, authority, amount)));
    }

    pub fn token_account(&self, address: &Pubkey) -> Option<TokenBalance> {
        match self.store.get(address)? {
            Record::Token(balance) => Some(balance),
            _ => None,
        }
    }

    pub fn balance(&self, address: &Pubkey) -> Option<u64> {
        self.token_account(address).map(|balance| balance.amount)
    }

    pub fn faucet(&self, address: &Pubkey) -> Option<Faucet> {
        match self.store.get(address)? {
            Record::Faucet(faucet) => Some(faucet),
            _ => None,
        }
    }

    pub fn withdrawer(&self, address: &Pubkey) -> Option<Withdrawer> {
        match self.store.get(address)? {
            Record::Withdrawer(withdrawer) => Some(withdrawer),
            _ => None,
        }
    }

    /// Execute one instruction. On error no write of it is visible.
    pub fn execute(&self, ix: &Instruction) -> Result<()> {
        let metas = ix.account_metas();
        let _guard = self.locks.acquire(&metas);
        let mut txn = self.store.begin(metas.iter().map(|meta| meta.pubkey));

        match dispatch(&mut txn, ix, self.now()) {
            Ok(()) => {
                self.store.commit(txn);
                Ok(())
            }
            Err(err) => {
                msg!("FAUCET: {} rolled back: {}", ix.name(), err);
                Err(err)
            }
        }
    }
}

fn dispatch(txn: &mut Txn, ix: &Instruction, now: i64) -> Result<()> {
    match *ix {
        Instruction::InitializeFaucet {
            mint,
            faucet,
            faucet_account,
            signer,
            decimals,
            max_withdraw,
        } => {
            let bump = pda::verify(&[FAUCET_SEED, mint.as_ref()], &faucet)?;
            pda::verify(&[FAUCET_VAULT_SEED, mint.as_ref()], &faucet_account)?;
            txn.ensure_vacant(&faucet)?;
            txn.ensure_vacant(&faucet_account)?;

            let mut record = Faucet::default();
            record.init(bump, mint, signer, decimals, max_withdraw);
            txn.put(faucet, Record::Faucet(record))?;
            txn.put(
                faucet_account,
                Record::Token(TokenBalance::new(mint, faucet, 0)),
            )
        }
        Instruction::Deposit {
            mint,
            signer_account,
            faucet_account,
            signer,
            n,
        } => {
            for account in [signer_account, faucet_account] {
                require_keys_eq!(txn.token(&account)?.mint, mint, FaucetError::MintMismatch);
            }
            let mut gateway = LedgerGateway::new(txn, signer_account, faucet_account);
            deposit::process(&mut gateway, &signer, n)
        }
        Instruction::InitializeWithdrawer { signer, withdrawer } => {
            pda::verify(&[WITHDRAWER_SEED, signer.as_ref()], &withdrawer)?;
            txn.ensure_vacant(&withdrawer)?;

            let mut record = Withdrawer::default();
            record.init(signer);
            txn.put(withdrawer, Record::Withdrawer(record))
        }
        Instruction::Withdraw {
            mint,
            withdrawer_account,
            faucet_account,
            faucet,
            withdrawer,
            signer,
            n,
        } => {
            let faucet = txn.faucet(&faucet)?;
            let mut record = txn.withdrawer(&withdrawer)?;

            let mut gateway = LedgerGateway::new(txn, faucet_account, withdrawer_account);
            withdraw::process(&mut gateway, &mint, &faucet, &mut record, &signer, n, now)?;

            txn.put(withdrawer, Record::Withdrawer(record))
        }
    }
}
