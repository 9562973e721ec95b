pub mod faucet;
pub mod withdrawer;

pub use faucet::*;
pub use withdrawer::*;
