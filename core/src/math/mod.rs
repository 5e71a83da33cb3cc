pub mod hash;
pub mod interp;

pub use hash::{hash_degrees, string_hash};
pub use interp::InterpHelper;
