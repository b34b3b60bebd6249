//! Operator-facing interactive flows
//!
//! Flows talk to the operator through a [`Prompter`]: a dialoguer-backed one
//! on a terminal, a stream-backed one for piped input and tests.

mod add_domains;
mod prompt;
mod query;

pub use add_domains::{add_domains, AddDomainsSummary, DONE_SENTINEL};
pub use prompt::{Prompter, StreamPrompter, TerminalPrompter};
pub use query::{prompt_and_query, query_prefix};
