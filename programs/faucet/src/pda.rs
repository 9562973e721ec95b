use anchor_lang::prelude::*;

use crate::constants::{FAUCET_SEED, FAUCET_VAULT_SEED, WITHDRAWER_SEED};
use crate::errors::FaucetError;

/// Derive a program address and its canonical bump from `seeds`.
///
/// The result is reproducible by any client holding the same seeds and lies
/// off the ed25519 curve, so no private key can sign for it. Only the program
/// can act as this address, by handing the seeds (plus bump) to the runtime.
pub fn derive(seeds: &[&[u8]]) -> (Pubkey, u8) {
    Pubkey::find_program_address(seeds, &crate::ID)
}

/// Check that `actual` is the address derived from `seeds` and return the bump.
pub fn verify(seeds: &[&[u8]], actual: &Pubkey) -> Result<u8> {
    let (expected, bump) = derive(seeds);
    require_keys_eq!(expected, *actual, FaucetError::AddressMismatch);
    Ok(bump)
}

/// Faucet record: `("mint", mint)`.
pub fn faucet_address(mint: &Pubkey) -> (Pubkey, u8) {
    derive(&[FAUCET_SEED, mint.as_ref()])
}

/// Pool token account: `("token-seed", mint)`.
pub fn faucet_vault_address(mint: &Pubkey) -> (Pubkey, u8) {
    derive(&[FAUCET_VAULT_SEED, mint.as_ref()])
}

/// Withdrawer record: `("withdrawer", owner)`.
pub fn withdrawer_address(owner: &Pubkey) -> (Pubkey, u8) {
    derive(&[WITHDRAWER_SEED, owner.as_ref()])
}

/// Seeds that let the program sign as the faucet record: `("mint", mint, bump)`.
pub fn faucet_signer_seeds<'a>(mint: &'a Pubkey, bump: &'a [u8; 1]) -> [&'a [u8]; 3] {
    [FAUCET_SEED, mint.as_ref(), bump]
}
