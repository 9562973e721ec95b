use anchor_lang::prelude::*;

use super::{Executor, Instruction};
use crate::pda;

/// An executor holding one mint, an admin wallet and its funded token account.
pub struct Fixture {
    pub executor: Executor,
    pub mint: Pubkey,
    pub admin: Pubkey,
    pub admin_account: Pubkey,
}

impl Fixture {
    pub const ADMIN_FUNDS: u64 = 1_000_000_000_000;

    /// No faucet yet.
    pub fn empty() -> Self {
        let executor = Executor::new();
        let mint = Pubkey::new_unique();
        let admin = Pubkey::new_unique();
        let admin_account = Pubkey::new_unique();
        executor.create_token_account(admin_account, mint, admin, Self::ADMIN_FUNDS);

        Self {
            executor,
            mint,
            admin,
            admin_account,
        }
    }

    /// Faucet initialized by the admin, pool still empty.
    pub fn new(decimals: u64, max_withdraw: u64) -> Self {
        let fx = Self::empty();
        fx.executor
            .execute(&Instruction::initialize_faucet(fx.mint, fx.admin, decimals, max_withdraw))
            .unwrap();
        fx
    }

    pub fn faucet(&self) -> Pubkey {
        pda::faucet_address(&self.mint).0
    }

    pub fn pool(&self) -> Pubkey {
        pda::faucet_vault_address(&self.mint).0
    }

    pub fn deposit(&self, n: u64) -> Result<()> {
        self.executor
            .execute(&Instruction::deposit(self.mint, self.admin, self.admin_account, n))
    }

    /// A new wallet with an empty token account and a withdrawer record.
    pub fn register_user(&self) -> (Pubkey, Pubkey) {
        let user = Pubkey::new_unique();
        let account = Pubkey::new_unique();
        self.executor.create_token_account(account, self.mint, user, 0);
        self.executor
            .execute(&Instruction::initialize_withdrawer(user))
            .unwrap();
        (user, account)
    }

    pub fn withdraw(&self, user: Pubkey, account: Pubkey, n: u64) -> Result<()> {
        self.executor
            .execute(&Instruction::withdraw(self.mint, user, account, n))
    }

    pub fn last_withdraw(&self, user: &Pubkey) -> i64 {
        self.executor
            .withdrawer(&pda::withdrawer_address(user).0)
            .unwrap()
            .last_withdraw
    }
}
