use anchor_lang::prelude::*;

#[event]
pub struct FaucetInitialized {
    pub faucet: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub decimals: u64,
    pub max_withdraw: u64,
}

#[event]
pub struct Deposited {
    pub mint: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
}

#[event]
pub struct WithdrawerRegistered {
    pub withdrawer: Pubkey,
    pub owner: Pubkey,
}

#[event]
pub struct Withdrawn {
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
