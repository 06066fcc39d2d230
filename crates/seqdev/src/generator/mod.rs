mod atomic;
mod basic;
mod interface;
#[cfg(test)]
mod tests;

pub use atomic::*;
pub use basic::*;
pub use interface::*;
