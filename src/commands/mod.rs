pub mod delete;
pub mod get;
pub mod put;

#[cfg(feature = "mcp")]
pub mod catalog;
#[cfg(feature = "mcp")]
pub mod prompt;
