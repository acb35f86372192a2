#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{Config, DisplayConfig, MarkerStyle};
pub use error::{Error, Result};
pub use types::{Citation, CitationMetadata, ParsedAnswer, RawAnswer, ToolMessageContent};
