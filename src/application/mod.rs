//! Application layer: graph serialization of outline trees
//!
//! This layer turns domain outlines into graph descriptions and owns the
//! styling rules.

pub mod error;
pub mod error_ext;
pub mod render;
pub mod style;
pub mod text;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use render::{GraphRenderer, RenderConfig, DEFAULT_WRAP_LIMIT};
