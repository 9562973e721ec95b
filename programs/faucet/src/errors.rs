use anchor_lang::prelude::*;

#[error_code]
pub enum FaucetError {
    #[msg("Account is already initialized")]
    AccountAlreadyInitialized,
    #[msg("Account address does not match its seed derivation")]
    AddressMismatch,
    #[msg("The Token mint you are trying to withdraw does not match the faucet mint")]
    MintMismatch,
    #[msg("You have provided a wrong Withdrawer account")]
    UnauthorizedWithdrawer,
    #[msg("Your transaction has been rate limited, please try again in one minute")]
    RateLimited,
    #[msg("The maximal amount you can withdraw is exceeded")]
    WithdrawLimitExceeded,
    #[msg("Insufficient balance in source token account")]
    InsufficientBalance,
    #[msg("Transfer authority does not match the source account")]
    AuthorityMismatch,
    #[msg("Withdraw amount overflows u64")]
    AmountOverflow,
    #[msg("Account does not exist")]
    AccountNotFound,
    #[msg("Account was not declared by the instruction")]
    AccountNotDeclared,
}
