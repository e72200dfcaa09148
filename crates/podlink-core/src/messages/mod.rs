//! Message identification and dispatch.
//!
//! Every frame starts with a little-endian u32 message code. [`peek_kind`]
//! classifies a frame without touching the model, [`dispatch`] classifies and
//! applies it in one step, and [`parse`] applies a frame whose kind is
//! already known.
//!
//! # Version française (résumé)
//!
//! Chaque trame commence par un code de message u32 petit-boutiste.
//! `peek_kind` classifie une trame sans toucher au modèle, `dispatch`
//! classifie et applique en une étape, et `parse` applique une trame dont le
//! genre est déjà connu.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

pub(crate) mod common;
pub mod control;
mod error;
pub mod preset;
pub mod set;
pub mod setup;
pub mod value;

pub use error::{ParseError, Target};

use crate::Decoded;
use crate::model::Pod;
use common::reader::MessageReader;

/// Message codes, little-endian at the head of every frame.
pub mod codes {
    pub const ACTIVE_CHANGE: u32 = 0x0000_0413;
    pub const TYPE_CHANGE: u32 = 0x0000_0415;
    pub const PARAMETER_CHANGE: u32 = 0x0000_0416;
    pub const PARAMETER_CHANGE_MIN: u32 = 0x0000_0417;
    pub const PARAMETER_CHANGE_MAX: u32 = 0x0000_0418;
    pub const PARAMETER_TEMPO_CHANGE: u32 = 0x0000_0419;
    pub const PARAMETER_TEMPO_CHANGE2: u32 = 0x0000_041A;
    pub const SETUP_CHANGE: u32 = 0x0000_041C;
    pub const PRESET_CHANGE: u32 = 0x0000_0219;
    pub const PRESET_CHANGE_ALERT: u32 = 0x0000_021B;
    pub const SET_CHANGE: u32 = 0x0000_021D;
    pub const STATUS_RESPONSE: u32 = 0x0000_0221;
    pub const PRESET_LOAD: u32 = 0x0000_1001;
    pub const SET_LOAD: u32 = 0x0000_1002;
}

const KIND_CODE_RANGE: Range<usize> = 0..4;

/// Recognised message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    ActiveChange,
    TypeChange,
    ParameterChange,
    ParameterChangeMin,
    ParameterChangeMax,
    ParameterTempoChange,
    ParameterTempoChange2,
    SetupChange,
    PresetChange,
    PresetChangeAlert,
    SetChange,
    StatusResponse,
    PresetLoad,
    SetLoad,
}

impl MessageKind {
    pub fn from_code(code: u32) -> Option<Self> {
        let kind = match code {
            codes::ACTIVE_CHANGE => MessageKind::ActiveChange,
            codes::TYPE_CHANGE => MessageKind::TypeChange,
            codes::PARAMETER_CHANGE => MessageKind::ParameterChange,
            codes::PARAMETER_CHANGE_MIN => MessageKind::ParameterChangeMin,
            codes::PARAMETER_CHANGE_MAX => MessageKind::ParameterChangeMax,
            codes::PARAMETER_TEMPO_CHANGE => MessageKind::ParameterTempoChange,
            codes::PARAMETER_TEMPO_CHANGE2 => MessageKind::ParameterTempoChange2,
            codes::SETUP_CHANGE => MessageKind::SetupChange,
            codes::PRESET_CHANGE => MessageKind::PresetChange,
            codes::PRESET_CHANGE_ALERT => MessageKind::PresetChangeAlert,
            codes::SET_CHANGE => MessageKind::SetChange,
            codes::STATUS_RESPONSE => MessageKind::StatusResponse,
            codes::PRESET_LOAD => MessageKind::PresetLoad,
            codes::SET_LOAD => MessageKind::SetLoad,
            _ => return None,
        };
        Some(kind)
    }

    pub fn code(self) -> u32 {
        match self {
            MessageKind::ActiveChange => codes::ACTIVE_CHANGE,
            MessageKind::TypeChange => codes::TYPE_CHANGE,
            MessageKind::ParameterChange => codes::PARAMETER_CHANGE,
            MessageKind::ParameterChangeMin => codes::PARAMETER_CHANGE_MIN,
            MessageKind::ParameterChangeMax => codes::PARAMETER_CHANGE_MAX,
            MessageKind::ParameterTempoChange => codes::PARAMETER_TEMPO_CHANGE,
            MessageKind::ParameterTempoChange2 => codes::PARAMETER_TEMPO_CHANGE2,
            MessageKind::SetupChange => codes::SETUP_CHANGE,
            MessageKind::PresetChange => codes::PRESET_CHANGE,
            MessageKind::PresetChangeAlert => codes::PRESET_CHANGE_ALERT,
            MessageKind::SetChange => codes::SET_CHANGE,
            MessageKind::StatusResponse => codes::STATUS_RESPONSE,
            MessageKind::PresetLoad => codes::PRESET_LOAD,
            MessageKind::SetLoad => codes::SET_LOAD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::ActiveChange => "ActiveChange",
            MessageKind::TypeChange => "TypeChange",
            MessageKind::ParameterChange => "ParameterChange",
            MessageKind::ParameterChangeMin => "ParameterChangeMin",
            MessageKind::ParameterChangeMax => "ParameterChangeMax",
            MessageKind::ParameterTempoChange => "ParameterTempoChange",
            MessageKind::ParameterTempoChange2 => "ParameterTempoChange2",
            MessageKind::SetupChange => "SetupChange",
            MessageKind::PresetChange => "PresetChange",
            MessageKind::PresetChangeAlert => "PresetChangeAlert",
            MessageKind::SetChange => "SetChange",
            MessageKind::StatusResponse => "StatusResponse",
            MessageKind::PresetLoad => "PresetLoad",
            MessageKind::SetLoad => "SetLoad",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a frame by its leading code without applying it.
///
/// Returns `None` both for unknown codes and for frames too short to carry
/// one.
pub fn peek_kind(data: &[u8]) -> Option<MessageKind> {
    let reader = MessageReader::new(data);
    let code = reader.read_u32_le(KIND_CODE_RANGE).ok()?;
    MessageKind::from_code(code)
}

/// Classify a frame and apply it to the model.
pub fn dispatch(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let code = reader.read_u32_le(KIND_CODE_RANGE)?;
    let kind = MessageKind::from_code(code).ok_or(ParseError::UnknownMessage { code })?;
    parse(kind, data, pod)
}

/// Apply a frame whose kind is already known.
pub fn parse(kind: MessageKind, data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    match kind {
        MessageKind::ActiveChange => control::parse_active_change(data, pod),
        MessageKind::TypeChange => control::parse_type_change(data, pod),
        MessageKind::ParameterChange => control::parse_parameter_change(data, pod),
        MessageKind::ParameterChangeMin => control::parse_parameter_change_min(data, pod),
        MessageKind::ParameterChangeMax => control::parse_parameter_change_max(data, pod),
        MessageKind::ParameterTempoChange => control::parse_parameter_tempo_change(data, pod),
        MessageKind::ParameterTempoChange2 => control::parse_parameter_tempo_change2(data, pod),
        MessageKind::SetupChange => setup::parse_setup_change(data, pod),
        MessageKind::PresetChange => preset::parse_preset_change(data, pod),
        MessageKind::PresetChangeAlert => preset::parse_preset_change_alert(data, pod),
        MessageKind::SetChange => set::parse_set_change(data, pod),
        MessageKind::StatusResponse => setup::parse_status_response(data, pod),
        MessageKind::PresetLoad => preset::parse_preset_load(data, pod),
        MessageKind::SetLoad => set::parse_set_load(data, pod),
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageKind, ParseError, codes, dispatch, peek_kind};
    use crate::Status;
    use crate::model::Pod;

    const ALL_KINDS: [MessageKind; 14] = [
        MessageKind::ActiveChange,
        MessageKind::TypeChange,
        MessageKind::ParameterChange,
        MessageKind::ParameterChangeMin,
        MessageKind::ParameterChangeMax,
        MessageKind::ParameterTempoChange,
        MessageKind::ParameterTempoChange2,
        MessageKind::SetupChange,
        MessageKind::PresetChange,
        MessageKind::PresetChangeAlert,
        MessageKind::SetChange,
        MessageKind::StatusResponse,
        MessageKind::PresetLoad,
        MessageKind::SetLoad,
    ];

    #[test]
    fn codes_round_trip_through_from_code() {
        for kind in ALL_KINDS {
            assert_eq!(MessageKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn peek_kind_reads_the_leading_code() {
        let mut data = vec![0u8; 12];
        data[..4].copy_from_slice(&codes::SET_CHANGE.to_le_bytes());
        assert_eq!(peek_kind(&data), Some(MessageKind::SetChange));
        assert_eq!(peek_kind(&data[..3]), None);
        assert_eq!(peek_kind(&[0xFF; 8]), None);
    }

    #[test]
    fn dispatch_rejects_unknown_codes() {
        let mut pod = Pod::new();
        let data = 0xBEEF_u32.to_le_bytes();
        let err = dispatch(&data, &mut pod).unwrap_err();
        assert_eq!(err, ParseError::UnknownMessage { code: 0xBEEF });
    }

    #[test]
    fn dispatch_routes_to_the_kind_parser() {
        let mut data = vec![0u8; 9];
        data[..4].copy_from_slice(&codes::SET_CHANGE.to_le_bytes());
        data[8] = 5;
        let mut pod = Pod::new();
        let decoded = dispatch(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::SetChange);
        assert_eq!(pod.current_set_index(), 5);
    }

    #[test]
    fn dispatch_on_a_truncated_frame_is_truncated() {
        let mut pod = Pod::new();
        let err = dispatch(&[0x13], &mut pod).unwrap_err();
        assert!(matches!(err, ParseError::Truncated { .. }));
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(MessageKind::PresetLoad.to_string(), "PresetLoad");
        assert_eq!(MessageKind::ParameterTempoChange2.name(), "ParameterTempoChange2");
    }
}
