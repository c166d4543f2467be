//! MCP tool servers over stdio.
//!
//! [`McpSession`] owns one [`McpProcess`](process::McpProcess) per configured
//! server and exposes them to the agent through the [`ToolSession`] trait.

mod error;
mod interface;
mod process;
mod session;

pub use error::ToolInvokeError;
pub use interface::{ServerToolInfo, ToolSession};
pub use process::McpProcess;
pub use session::McpSession;
