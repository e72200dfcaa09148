//! Set selection and set metadata.

pub mod layout;
pub mod parser;

pub use parser::{parse_set_change, parse_set_load};
