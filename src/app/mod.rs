//! Web UI: the submission flow and the page that drives it.
//!
//! Flow per submission: blank query → warning; incomplete configuration →
//! error; otherwise invoke the agent and render its final answer under
//! "Recommendations". Failures end the submission, never the process.

pub mod answer;
pub mod flow;
pub mod page;
pub mod server;

pub use answer::{extract_answer, FinalAnswer};
pub use flow::{submit, Outcome, DEFAULT_QUERY};
pub use server::{router, serve, AppState};
