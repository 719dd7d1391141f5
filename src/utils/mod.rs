pub mod error;
pub mod logger;
pub mod serde;
pub mod validation;
