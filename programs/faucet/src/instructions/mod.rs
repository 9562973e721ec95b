#![allow(ambiguous_glob_reexports)]

pub mod deposit;
pub mod initialize_faucet;
pub mod initialize_withdrawer;
pub mod withdraw;

pub use deposit::*;
pub use initialize_faucet::*;
pub use initialize_withdrawer::*;
pub use withdraw::*;
