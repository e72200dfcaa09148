//! Global setup writes and status query answers.

pub mod layout;
pub mod parser;

pub use parser::{parse_setup_change, parse_status_response};
