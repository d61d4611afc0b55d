//! `bundle-cli` library.

pub mod commands;
pub mod config;
pub mod connector;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod manifest;
pub mod paths;
pub mod persist;
pub mod placeholder;
pub mod prompt;
pub mod scaffold;
pub mod skill;
pub mod styles;
pub mod templates;
pub mod validate;
pub mod vars;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use commands::*;
pub use config::*;
pub use connector::*;
pub use constants::*;
pub use error::*;
pub use manifest::*;
pub use scaffold::*;
pub use validate::*;
