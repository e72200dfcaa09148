//! podlink core library: codec layer for POD HD control messages.
//!
//! This crate decodes the binary control messages a modeling-amplifier unit
//! emits over its serial/USB link and applies them to an in-memory device
//! model. The transport (framing, checksums, the read loop) and the GUI sit
//! outside; callers hand one complete message buffer per call to `dispatch`,
//! which routes it to the decoder for its kind and mutates the supplied
//! `Pod` in place. Byte offsets and discriminants are reverse-engineered
//! hardware constants and live in per-kind `layout` modules.
//!
//! Invariants:
//! - A decode call yields exactly one outcome: a `Decoded` status (possibly
//!   `None`) or a `ParseError` that maps to `Status::Warning`.
//! - A missing target entity never mutates the model.
//! - Per-field failures inside a preset snapshot are reported as
//!   `Diagnostic` records and never fail the snapshot as a whole.
//! - Decoding is synchronous and stateless; the model is the only state and
//!   the caller serializes access to it.
//!
//! Version française (résumé):
//! Cette crate décode les messages de contrôle binaires de l'ampli et les
//! applique au modèle en mémoire. Le transport et l'IHM restent à
//! l'extérieur ; `dispatch` route chaque trame vers son décodeur. Garanties :
//! un résultat unique par appel, aucune mutation quand la cible est absente,
//! échecs par champ remontés en diagnostics structurés.
//!
//! # Examples
//! ```
//! use podlink_core::{Pod, Status, dispatch};
//!
//! // SetChange frame: kind code, then the set index at offset 8.
//! let mut frame = vec![0u8; 9];
//! frame[0..4].copy_from_slice(&0x0000_021Du32.to_le_bytes());
//! frame[8] = 3;
//!
//! let mut pod = Pod::new();
//! let decoded = dispatch(&frame, &mut pod)?;
//! assert_eq!(decoded.status, Status::SetChange);
//! assert_eq!(pod.current_set_index(), 3);
//! # Ok::<(), podlink_core::ParseError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod messages;
pub mod model;

pub use messages::value::{decode_float, decode_tempo_or_float, encode_float};
pub use messages::{MessageKind, ParseError, Target, dispatch, parse, peek_kind};
pub use model::Pod;

/// Outcome code of a single decode call, consumed by the observer layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    None,
    Warning,
    ActiveChange,
    ParameterChange,
    ParameterChangeMin,
    ParameterChangeMax,
    PresetChange,
    PresetLoad,
    SetChange,
    SetLoad,
    TypeChange,
}

/// Identifies the model entity a successful decode touched.
///
/// Entities are returned as id descriptors rather than references; the
/// observer layer owns the model and re-reads it with these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Item { id: u32 },
    ItemParam { item: u32, param: u32 },
    PresetParam { id: u32 },
    Preset { index: u8 },
    Set { index: u8 },
}

/// Non-fatal decode event with a stable identifier.
///
/// Replaces in-decoder logging: the caller decides how and whether to
/// surface these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable identifier (e.g. `PL-ITEM-MISSING`).
    pub id: String,
    /// Human-readable context for the event.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(id: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            message: message.into(),
        }
    }
}

/// Result of one successful decode call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoded {
    /// Outcome status for the observer layer.
    pub status: Status,
    /// Entity touched by the decode, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<Entity>,
    /// Non-fatal events collected while decoding.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
    pub(crate) fn status_only(status: Status) -> Self {
        Self {
            status,
            entity: None,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn with_entity(status: Status, entity: Entity) -> Self {
        Self {
            status,
            entity: Some(entity),
            diagnostics: Vec::new(),
        }
    }
}
