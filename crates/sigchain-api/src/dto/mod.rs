//! Request and response DTOs

mod common;
mod device;
mod transaction;

pub use common::*;
pub use device::*;
pub use transaction::*;
