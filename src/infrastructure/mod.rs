pub mod upload;
pub mod persistence;
pub mod clipboard;

pub use upload::*;
pub use persistence::*;
pub use clipboard::*;
