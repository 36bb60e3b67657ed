//! Tool system for function calling.

pub mod arguments;
pub mod registry;
pub mod research;
pub mod tool;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use registry::ToolRegistry;
pub use research::research_tools;
pub use tool::{AgentTool, Tool};
pub use types::AgentToolParameters;
pub use validation::validate_arguments;
