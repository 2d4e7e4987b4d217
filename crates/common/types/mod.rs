mod block;
mod constants;
mod genesis;

pub use block::*;
pub use constants::*;
pub use genesis::*;
