/// Seed prefix of the faucet record and of its transfer authority.
pub const FAUCET_SEED: &[u8] = b"mint";
/// Seed prefix of the pool token account.
pub const FAUCET_VAULT_SEED: &[u8] = b"token-seed";
/// Seed prefix of a user's withdrawer record.
pub const WITHDRAWER_SEED: &[u8] = b"withdrawer";

/// A withdrawal is allowed only once strictly more than this many seconds
/// have passed since the previous one.
pub const RATE_LIMIT_SECONDS: i64 = 60;

pub const DISCRIMINATOR_LEN: usize = 8;
