//! Preset selection and the full preset snapshot.
//!
//! PresetLoad is the largest decoder: a 16-byte name, twelve 256-byte item
//! blocks assigned through a fixed permutation, then DT units, cab
//! parameters and setup bytes at absolute offsets. Per-field failures in the
//! trailing sections are diagnostics, never errors; the snapshot applies
//! everything it can.

pub mod layout;
pub mod parser;
mod snapshot;

pub use parser::{parse_preset_change, parse_preset_change_alert, parse_preset_load};
