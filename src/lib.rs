pub mod addr;
pub mod loader;
pub mod memory;
pub mod utils;

pub use addr::{InvalidAddress, VirtualAddr};
pub use memory::{Memory, Resolution};
