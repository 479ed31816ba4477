//! Domain layer: outline entries and the outline parser
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod parser;
pub mod shortid;

pub use arena::{Entry, Outline, OutlineIter, ROOT_LEVEL};
pub use error::{DomainError, DomainResult};
pub use parser::{OutlineParser, ParserOptions, DEFAULT_MARKER};
pub use shortid::{IdGenerator, DEFAULT_ALPHABET, DEFAULT_ID_SEED};
