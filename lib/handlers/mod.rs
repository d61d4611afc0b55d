//! Command handlers.

mod add_mcp;
mod add_skill;
mod create;
mod validate_cmd;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use add_mcp::{ConnectorOptions, handle_add_mcp};
pub use add_skill::handle_add_skill;
pub use create::handle_create_bundle;
pub use validate_cmd::handle_validate_bundle;
