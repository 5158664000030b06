pub mod number;
pub mod whitespace;

pub use number::{canonical_float, canonical_integer, float, integer};
pub use whitespace::{non_empty_string, whitespace};
