mod interface;
mod iso;
mod precision;

pub use interface::*;
pub use iso::*;
pub use precision::*;
