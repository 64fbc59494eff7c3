pub mod models;
pub mod navigation;
pub mod lifecycle;
pub mod errors;

pub use models::*;
pub use navigation::*;
pub use lifecycle::*;
pub use errors::*;
