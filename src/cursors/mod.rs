pub mod memory;
pub mod stream;

pub use memory::StrCursor;
pub use stream::{StreamConfig, StreamCursor};
