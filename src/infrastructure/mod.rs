//! Infrastructure layer: graph description emission and input reading

pub mod dot;
pub mod error;
pub mod input;

pub use error::{InfraError, InfraResult};
