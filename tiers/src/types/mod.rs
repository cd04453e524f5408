mod allocation;
mod breakdown;

pub use allocation::*;
pub use breakdown::*;
