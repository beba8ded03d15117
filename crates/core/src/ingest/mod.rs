pub mod aggregate;
pub mod error;
pub mod source;
pub mod table;
pub mod types;

pub use aggregate::summarize;
pub use error::DataUnavailable;
