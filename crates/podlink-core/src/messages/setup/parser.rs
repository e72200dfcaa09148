use super::layout;
use crate::messages::common::reader::MessageReader;
use crate::messages::error::{ParseError, Target};
use crate::model::{
    CAB_PARAM_DECAY, CAB_PARAM_ER, CAB_PARAM_LOW_CUT, CAB_PARAM_MIC, CAB_PARAM_RES_LEVEL,
    CAB_PARAM_THUMP, PRESET_PARAM_GUITAR_IN_Z, PRESET_PARAM_INPUT1_SOURCE,
    PRESET_PARAM_INPUT2_SOURCE, PRESET_PARAM_TEMPO, Pod, ValueSlot,
};
use crate::{Decoded, Entity, Status};

/// Model location a global-setup discriminant resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupTarget {
    Cab { cab: usize, param: u32 },
    Preset { param: u32 },
}

fn resolve_setup_target(type_id: u32) -> Option<SetupTarget> {
    let target = match type_id {
        layout::SETUP_CAB0_ER => SetupTarget::Cab { cab: 0, param: CAB_PARAM_ER },
        layout::SETUP_CAB0_MIC => SetupTarget::Cab { cab: 0, param: CAB_PARAM_MIC },
        layout::SETUP_CAB0_LOW_CUT => SetupTarget::Cab { cab: 0, param: CAB_PARAM_LOW_CUT },
        layout::SETUP_CAB0_RES_LEVEL => SetupTarget::Cab { cab: 0, param: CAB_PARAM_RES_LEVEL },
        layout::SETUP_CAB0_THUMP => SetupTarget::Cab { cab: 0, param: CAB_PARAM_THUMP },
        layout::SETUP_CAB0_DECAY => SetupTarget::Cab { cab: 0, param: CAB_PARAM_DECAY },
        layout::SETUP_CAB1_ER => SetupTarget::Cab { cab: 1, param: CAB_PARAM_ER },
        layout::SETUP_CAB1_MIC => SetupTarget::Cab { cab: 1, param: CAB_PARAM_MIC },
        layout::SETUP_CAB1_LOW_CUT => SetupTarget::Cab { cab: 1, param: CAB_PARAM_LOW_CUT },
        layout::SETUP_CAB1_RES_LEVEL => SetupTarget::Cab { cab: 1, param: CAB_PARAM_RES_LEVEL },
        layout::SETUP_CAB1_THUMP => SetupTarget::Cab { cab: 1, param: CAB_PARAM_THUMP },
        layout::SETUP_CAB1_DECAY => SetupTarget::Cab { cab: 1, param: CAB_PARAM_DECAY },
        layout::SETUP_INPUT1_SOURCE => SetupTarget::Preset { param: PRESET_PARAM_INPUT1_SOURCE },
        layout::SETUP_INPUT2_SOURCE => SetupTarget::Preset { param: PRESET_PARAM_INPUT2_SOURCE },
        layout::SETUP_GUITAR_IN_Z => SetupTarget::Preset { param: PRESET_PARAM_GUITAR_IN_Z },
        layout::SETUP_TEMPO => SetupTarget::Preset { param: PRESET_PARAM_TEMPO },
        _ => return None,
    };
    Some(target)
}

/// Unlike per-item parameter changes, a rejected setup value is an error:
/// these frames are device-initiated state reports, so a bad value means we
/// and the device disagree about the parameter's kind.
pub fn parse_setup_change(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let type_id = reader.read_u32_le(layout::SETUP_TYPE_RANGE)?;
    let raw = reader.read_raw4(layout::SETUP_VALUE_OFFSET)?;

    let Some(target) = resolve_setup_target(type_id) else {
        return Ok(Decoded::status_only(Status::None));
    };

    let preset = pod.current_preset_mut().ok_or(ParseError::EntityNotFound {
        target: Target::CurrentPreset,
    })?;

    let entity = match target {
        SetupTarget::Cab { cab, param } => {
            let item_id = preset
                .cab(cab)
                .map(|item| item.id())
                .ok_or(ParseError::EntityNotFound {
                    target: Target::Cab { id: cab },
                })?;
            let parameter =
                preset
                    .cab_mut(cab)
                    .and_then(|item| item.param_mut(param))
                    .ok_or(ParseError::EntityNotFound {
                        target: Target::CabParam { cab, param },
                    })?;
            parameter
                .set_value(ValueSlot::Current, raw)
                .map_err(|source| ParseError::ValueRejected {
                    target: Target::CabParam { cab, param },
                    source,
                })?;
            Entity::ItemParam {
                item: item_id,
                param,
            }
        }
        SetupTarget::Preset { param } => {
            let parameter = preset
                .param_mut(param)
                .ok_or(ParseError::EntityNotFound {
                    target: Target::PresetParam { id: param },
                })?;
            parameter
                .set_value(ValueSlot::Current, raw)
                .map_err(|source| ParseError::ValueRejected {
                    target: Target::PresetParam { id: param },
                    source,
                })?;
            Entity::PresetParam { id: param }
        }
    };

    Ok(Decoded::with_entity(Status::ParameterChange, entity))
}

/// Answers to the status queries sent at connection time. Only the current
/// preset and current set reports are applied; other ids are ignored.
pub fn parse_status_response(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let status_id = reader.read_u32_le(layout::STATUS_ID_RANGE)?;
    let value = reader.read_u32_le(layout::STATUS_VALUE_RANGE)?;

    match status_id {
        layout::STATUS_ID_PRESET => {
            let index = value as u8;
            pod.set_current_preset(index);
            Ok(Decoded::with_entity(
                Status::PresetChange,
                Entity::Preset { index },
            ))
        }
        layout::STATUS_ID_SET => {
            let index = value as u8;
            pod.set_current_set(index);
            Ok(Decoded::with_entity(
                Status::SetChange,
                Entity::Set { index },
            ))
        }
        _ => Ok(Decoded::status_only(Status::None)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::layout;
    use super::{parse_setup_change, parse_status_response};
    use crate::messages::error::{ParseError, Target};
    use crate::model::{
        CAB_PARAM_ER, CAB_PARAM_MIC, PRESET_PARAM_GUITAR_IN_Z, PRESET_PARAM_TEMPO, Pod,
    };
    use crate::{Entity, Status};

    fn setup_frame(type_id: u32, value: [u8; 4]) -> Vec<u8> {
        let mut data = vec![0u8; 24];
        data[layout::SETUP_TYPE_RANGE].copy_from_slice(&type_id.to_le_bytes());
        data[layout::SETUP_VALUE_OFFSET..layout::SETUP_VALUE_OFFSET + 4].copy_from_slice(&value);
        data
    }

    #[test]
    fn cab_er_write_lands_on_first_cab() {
        // 0.2 as a little-endian f32.
        let data = setup_frame(layout::SETUP_CAB0_ER, [0xCD, 0xCC, 0x4C, 0x3E]);
        let mut pod = Pod::new();
        let decoded = parse_setup_change(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::ParameterChange);
        assert_eq!(
            decoded.entity,
            Some(Entity::ItemParam {
                item: 2,
                param: CAB_PARAM_ER
            })
        );
        let preset = pod.current_preset().unwrap();
        let param = preset.cab(0).unwrap().param(CAB_PARAM_ER).unwrap();
        assert_eq!(param.current(), [0xCD, 0xCC, 0x4C, 0x3E]);
    }

    #[test]
    fn second_cab_discriminants_target_cab_one() {
        let data = setup_frame(layout::SETUP_CAB1_MIC, [3, 0, 0, 0]);
        let mut pod = Pod::new();
        let decoded = parse_setup_change(&data, &mut pod).unwrap();
        assert_eq!(
            decoded.entity,
            Some(Entity::ItemParam {
                item: 3,
                param: CAB_PARAM_MIC
            })
        );
    }

    #[test]
    fn preset_discriminants_target_setup_params() {
        let data = setup_frame(layout::SETUP_GUITAR_IN_Z, [7, 0, 0, 0]);
        let mut pod = Pod::new();
        let decoded = parse_setup_change(&data, &mut pod).unwrap();
        assert_eq!(
            decoded.entity,
            Some(Entity::PresetParam {
                id: PRESET_PARAM_GUITAR_IN_Z
            })
        );
        let preset = pod.current_preset().unwrap();
        let param = preset.param(PRESET_PARAM_GUITAR_IN_Z).unwrap();
        assert_eq!(param.current(), [7, 0, 0, 0]);
    }

    #[test]
    fn unknown_discriminant_is_ignored() {
        let data = setup_frame(0xFF, [1, 0, 0, 0]);
        let mut pod = Pod::new();
        let before = pod.clone();
        let decoded = parse_setup_change(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::None);
        assert_eq!(pod, before);
    }

    #[test]
    fn rejected_setup_value_is_an_error() {
        // Mic selection is a byte parameter; high bytes must be clear.
        let data = setup_frame(layout::SETUP_CAB0_MIC, [1, 2, 3, 4]);
        let mut pod = Pod::new();
        let err = parse_setup_change(&data, &mut pod).unwrap_err();
        assert!(matches!(
            err,
            ParseError::ValueRejected {
                target: Target::CabParam {
                    cab: 0,
                    param: CAB_PARAM_MIC
                },
                ..
            }
        ));
    }

    #[test]
    fn setup_change_without_current_preset_is_entity_not_found() {
        let data = setup_frame(layout::SETUP_TEMPO, [0, 0, 0xF0, 0x42]);
        let mut pod = Pod::new();
        pod.set_current_preset(200);
        let err = parse_setup_change(&data, &mut pod).unwrap_err();
        assert_eq!(
            err,
            ParseError::EntityNotFound {
                target: Target::CurrentPreset
            }
        );
    }

    #[test]
    fn tempo_discriminant_accepts_float_values() {
        // 120.0 as a little-endian f32.
        let data = setup_frame(layout::SETUP_TEMPO, [0x00, 0x00, 0xF0, 0x42]);
        let mut pod = Pod::new();
        parse_setup_change(&data, &mut pod).unwrap();
        let preset = pod.current_preset().unwrap();
        let param = preset.param(PRESET_PARAM_TEMPO).unwrap();
        assert_eq!(param.current(), [0x00, 0x00, 0xF0, 0x42]);
    }

    fn status_frame(status_id: u32, value: u32) -> Vec<u8> {
        let mut data = vec![0u8; 20];
        data[layout::STATUS_ID_RANGE].copy_from_slice(&status_id.to_le_bytes());
        data[layout::STATUS_VALUE_RANGE].copy_from_slice(&value.to_le_bytes());
        data
    }

    #[test]
    fn preset_status_moves_the_current_preset() {
        let data = status_frame(layout::STATUS_ID_PRESET, 4);
        let mut pod = Pod::new();
        let decoded = parse_status_response(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::PresetChange);
        assert_eq!(decoded.entity, Some(Entity::Preset { index: 4 }));
        assert_eq!(pod.current_preset_index(), 4);
    }

    #[test]
    fn set_status_moves_the_current_set() {
        let data = status_frame(layout::STATUS_ID_SET, 3);
        let mut pod = Pod::new();
        let decoded = parse_status_response(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::SetChange);
        assert_eq!(pod.current_set_index(), 3);
    }

    #[test]
    fn other_status_ids_are_ignored() {
        let data = status_frame(0x30, 9);
        let mut pod = Pod::new();
        let decoded = parse_status_response(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::None);
        assert_eq!(pod.current_set_index(), 0);
        assert_eq!(pod.current_preset_index(), 0);
    }

    #[test]
    fn truncated_status_frame_is_reported() {
        let mut pod = Pod::new();
        let err = parse_status_response(&[0u8; 14], &mut pod).unwrap_err();
        assert!(matches!(err, ParseError::Truncated { .. }));
    }
}
