pub mod error;
pub mod form;
pub mod irr;
pub mod payback;
pub mod project;
pub mod time_value;
pub mod timeline;
pub mod types;

pub use error::CapexError;
pub use types::*;

/// Standard result type for all capex operations
pub type CapexResult<T> = Result<T, CapexError>;
