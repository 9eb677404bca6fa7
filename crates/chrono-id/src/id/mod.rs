mod assemble;
mod chrono_id;
mod layout;
mod variant;

pub use chrono_id::*;
pub use variant::*;
