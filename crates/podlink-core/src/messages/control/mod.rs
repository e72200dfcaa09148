//! Item-targeted control messages.
//!
//! ActiveChange, the three ParameterChange flavours, the two tempo change
//! variants and TypeChange all address a pedal-board item on the current
//! preset by id. A missing item or parameter is an error with no mutation;
//! a setter rejecting a value is a diagnostic for the value-change kinds and
//! an error only for TypeChange.

pub mod layout;
pub mod parser;

pub use parser::{
    parse_active_change, parse_parameter_change, parse_parameter_change_max,
    parse_parameter_change_min, parse_parameter_tempo_change, parse_parameter_tempo_change2,
    parse_type_change,
};
