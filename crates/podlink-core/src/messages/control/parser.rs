use super::layout;
use crate::messages::common::reader::MessageReader;
use crate::messages::error::{ParseError, Target};
use crate::messages::value;
use crate::model::{Pod, Preset, ValueSlot};
use crate::{Decoded, Diagnostic, Entity, Status};

fn current_preset_mut(pod: &mut Pod) -> Result<&mut Preset, ParseError> {
    pod.current_preset_mut().ok_or(ParseError::EntityNotFound {
        target: Target::CurrentPreset,
    })
}

pub fn parse_active_change(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let item_id = reader.read_u32_le(layout::ITEM_ID_RANGE)?;
    let flag = reader.read_u32_le(layout::ACTIVE_FLAG_RANGE)?;

    let preset = current_preset_mut(pod)?;
    let item = preset.item_mut(item_id).ok_or(ParseError::EntityNotFound {
        target: Target::Item { id: item_id },
    })?;
    item.set_active(flag > 0);

    Ok(Decoded::with_entity(
        Status::ActiveChange,
        Entity::Item { id: item_id },
    ))
}

/// Shared body of the three ParameterChange flavours; only the slot and the
/// success status differ.
fn apply_parameter_change(
    data: &[u8],
    pod: &mut Pod,
    slot: ValueSlot,
    status: Status,
) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let item_id = reader.read_u32_le(layout::ITEM_ID_RANGE)?;
    let param_id = reader.read_u32_le(layout::PARAM_ID_RANGE)?;
    let raw = reader.read_raw4(layout::PARAM_VALUE_OFFSET)?;

    let preset = current_preset_mut(pod)?;
    let item = preset.item_mut(item_id).ok_or(ParseError::EntityNotFound {
        target: Target::Item { id: item_id },
    })?;
    let item_name = item.name();
    let param = item
        .param_mut(param_id)
        .ok_or(ParseError::EntityNotFound {
            target: Target::ItemParam {
                item: item_id,
                param: param_id,
            },
        })?;

    // A slot rejecting the bytes is non-fatal here; the lookup is the only
    // consistency-checked step.
    let mut decoded = Decoded::with_entity(
        status,
        Entity::ItemParam {
            item: item_id,
            param: param_id,
        },
    );
    if let Err(err) = param.set_value(slot, raw) {
        decoded.diagnostics.push(Diagnostic::new(
            "PL-VALUE-REJECTED",
            format!("{item_name} parameter {}: {err}", param.name()),
        ));
    }
    Ok(decoded)
}

pub fn parse_parameter_change(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    apply_parameter_change(data, pod, ValueSlot::Current, Status::ParameterChange)
}

pub fn parse_parameter_change_min(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    apply_parameter_change(data, pod, ValueSlot::Min, Status::ParameterChangeMin)
}

pub fn parse_parameter_change_max(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    apply_parameter_change(data, pod, ValueSlot::Max, Status::ParameterChangeMax)
}

/// Tempo changes target a fixed parameter id on the addressed item. The wire
/// value is an integer tempo converted to a float slot value.
fn apply_tempo_change(data: &[u8], pod: &mut Pod, param_id: u32) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let item_id = reader.read_u32_le(layout::ITEM_ID_RANGE)?;
    let tempo = reader.read_u32_le(layout::TEMPO_VALUE_RANGE)?;

    let preset = current_preset_mut(pod)?;
    let item = preset.item_mut(item_id).ok_or(ParseError::EntityNotFound {
        target: Target::Item { id: item_id },
    })?;
    let item_name = item.name();
    let param = item
        .param_mut(param_id)
        .ok_or(ParseError::EntityNotFound {
            target: Target::ItemParam {
                item: item_id,
                param: param_id,
            },
        })?;

    let raw = value::encode_float(tempo as f32);
    let mut decoded = Decoded::with_entity(
        Status::ParameterChange,
        Entity::ItemParam {
            item: item_id,
            param: param_id,
        },
    );
    if let Err(err) = param.set_value(ValueSlot::Current, raw) {
        decoded.diagnostics.push(Diagnostic::new(
            "PL-VALUE-REJECTED",
            format!("{item_name} parameter {}: {err}", param.name()),
        ));
    }
    Ok(decoded)
}

pub fn parse_parameter_tempo_change(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    apply_tempo_change(data, pod, layout::TEMPO_PARAM_ID)
}

pub fn parse_parameter_tempo_change2(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    apply_tempo_change(data, pod, layout::TEMPO2_PARAM_ID)
}

pub fn parse_type_change(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let item_id = reader.read_u32_le(layout::ITEM_ID_RANGE)?;
    let type_id = reader.read_u32_le(layout::TYPE_ID_RANGE)?;

    let preset = current_preset_mut(pod)?;
    let item = preset.item_mut(item_id).ok_or(ParseError::EntityNotFound {
        target: Target::Item { id: item_id },
    })?;
    // Unlike value changes, a rejected type id fails the whole message.
    item.set_type(type_id)
        .map_err(|source| ParseError::ValueRejected {
            target: Target::Item { id: item_id },
            source,
        })?;

    Ok(Decoded::with_entity(
        Status::TypeChange,
        Entity::Item { id: item_id },
    ))
}
