//! Sub-record decoders for the preset snapshot.
//!
//! All failures in here are per-field: a missing item, parameter, cab or DT
//! unit skips that record with a diagnostic and the rest of the snapshot
//! still applies.

use super::layout;
use crate::messages::common::reader::MessageReader;
use crate::messages::error::ParseError;
use crate::messages::value;
use crate::model::{CAB_PARAM_ER, CAB_PARAM_MIC, ItemKind, ParamKind, PedalBoardItem, Preset, ValueSlot};
use crate::Diagnostic;

/// Decode one 256-byte item block and apply it to the logical item id the
/// permutation assigned to it.
pub(super) fn apply_item_block(
    preset: &mut Preset,
    item_id: u32,
    block: &[u8],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ParseError> {
    let reader = MessageReader::new(block);
    let type_id = reader.read_u32_le(layout::ITEM_TYPE_RANGE)?;
    let position = reader.read_u16_le(layout::ITEM_POSITION_RANGE)?;
    let position_kind = reader.read_u8(layout::ITEM_POSITION_KIND_OFFSET)?;
    let active = reader.read_u8(layout::ITEM_ACTIVE_OFFSET)? == 1;
    let tempo_flags = [
        reader.read_u8(layout::ITEM_TEMPO_FLAG_OFFSETS[0])?,
        reader.read_u8(layout::ITEM_TEMPO_FLAG_OFFSETS[1])?,
    ];

    let Some(item) = preset.item_mut(item_id) else {
        diagnostics.push(Diagnostic::new(
            "PL-ITEM-MISSING",
            format!("snapshot block for item {item_id} has no model item"),
        ));
        return Ok(());
    };

    if let Err(err) = item.set_type(type_id) {
        diagnostics.push(Diagnostic::new(
            "PL-TYPE-REJECTED",
            format!("item {item_id}: {err}"),
        ));
    }
    item.set_position_unchecked(position, position_kind);
    item.set_active(active);

    match item.kind() {
        ItemKind::Cab => {
            for (index, &param_id) in layout::CAB_BLOCK_PARAM_IDS.iter().enumerate() {
                let start = layout::PARAM_BLOCKS_OFFSET + index * layout::PARAM_BLOCK_SIZE;
                let param_block =
                    reader.read_slice(start..start + layout::PARAM_BLOCK_SIZE)?;
                apply_cab_param_block(item, param_id, param_block, diagnostics)?;
            }
        }
        _ => {
            let count = usize::from(item.param_count());
            let mut next_tempo = 0usize;
            for index in 0..count {
                let start = layout::PARAM_BLOCKS_OFFSET + index * layout::PARAM_BLOCK_SIZE;
                let param_block =
                    reader.read_slice(start..start + layout::PARAM_BLOCK_SIZE)?;
                apply_normal_param_block(
                    item,
                    param_block,
                    &tempo_flags,
                    &mut next_tempo,
                    diagnostics,
                )?;
            }
        }
    }
    Ok(())
}

/// Cab blocks carry no usable parameter id; position in the run selects the
/// target parameter, and only the current value is meaningful.
fn apply_cab_param_block(
    item: &mut PedalBoardItem,
    param_id: u32,
    block: &[u8],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ParseError> {
    let reader = MessageReader::new(block);
    let raw = reader.read_raw4(layout::PARAM_CURRENT_OFFSET)?;
    let item_name = item.name();
    let Some(param) = item.param_mut(param_id) else {
        diagnostics.push(Diagnostic::new(
            "PL-PARAM-MISSING",
            format!("{item_name} has no parameter {param_id}"),
        ));
        return Ok(());
    };
    if let Err(err) = param.set_value(ValueSlot::Current, raw) {
        diagnostics.push(Diagnostic::new(
            "PL-VALUE-REJECTED",
            format!("{item_name} parameter {}: {err}", param.name()),
        ));
    }
    Ok(())
}

/// Normal blocks name their parameter and carry current/min/max. Tempo-kind
/// parameters consume the item's tempo flags in declaration order; a flag
/// above 1 overrides the stored current value.
fn apply_normal_param_block(
    item: &mut PedalBoardItem,
    block: &[u8],
    tempo_flags: &[u8; 2],
    next_tempo: &mut usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ParseError> {
    let reader = MessageReader::new(block);
    let param_id = reader.read_u32_le(layout::PARAM_ID_RANGE)?;
    let raw_current = reader.read_raw4(layout::PARAM_CURRENT_OFFSET)?;
    let raw_min = reader.read_raw4(layout::PARAM_MIN_OFFSET)?;
    let raw_max = reader.read_raw4(layout::PARAM_MAX_OFFSET)?;

    let item_name = item.name();
    let Some(param) = item.param_mut(param_id) else {
        diagnostics.push(Diagnostic::new(
            "PL-PARAM-MISSING",
            format!("{item_name} has no parameter {param_id}"),
        ));
        return Ok(());
    };

    let current = match param.kind() {
        ParamKind::Tempo => {
            let flag = tempo_flags.get(*next_tempo).copied().unwrap_or(0);
            *next_tempo += 1;
            value::decode_tempo_or_float(raw_current, flag)
        }
        _ => value::decode_float(raw_current),
    };

    let writes = [
        (ValueSlot::Current, value::encode_float(current), "current"),
        (ValueSlot::Min, raw_min, "min"),
        (ValueSlot::Max, raw_max, "max"),
    ];
    for (slot, raw, label) in writes {
        if let Err(err) = param.set_value(slot, raw) {
            diagnostics.push(Diagnostic::new(
                "PL-VALUE-REJECTED",
                format!("{item_name} parameter {} {label}: {err}", param.name()),
            ));
        }
    }
    Ok(())
}

/// Two DT units at fixed absolute offset triples (topology, class, mode).
pub(super) fn apply_dt_units(
    preset: &mut Preset,
    reader: &MessageReader<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ParseError> {
    for (index, offsets) in layout::DT_OFFSETS.iter().enumerate() {
        let topology = reader.read_u8(offsets[0])?;
        let class = reader.read_u8(offsets[1])?;
        let mode = reader.read_u8(offsets[2])?;
        let Some(dt) = preset.dt_mut(index) else {
            diagnostics.push(Diagnostic::new(
                "PL-DT-MISSING",
                format!("DT unit {index} not present"),
            ));
            continue;
        };
        for (result, field) in [
            (dt.set_topology(topology), "topology"),
            (dt.set_class(class), "class"),
            (dt.set_mode(mode), "mode"),
        ] {
            if let Err(err) = result {
                diagnostics.push(Diagnostic::new(
                    "PL-DT-REJECTED",
                    format!("DT unit {index} {field}: {err}"),
                ));
            }
        }
    }
    Ok(())
}

/// Cab ER (4 bytes) and mic selection (1 byte) at absolute offsets.
pub(super) fn apply_cab_units(
    preset: &mut Preset,
    reader: &MessageReader<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ParseError> {
    for cab_index in 0..layout::CAB_ER_OFFSETS.len() {
        let er_raw = reader.read_raw4(layout::CAB_ER_OFFSETS[cab_index])?;
        let mic_raw = [reader.read_u8(layout::CAB_MIC_OFFSETS[cab_index])?, 0, 0, 0];
        let Some(cab) = preset.cab_mut(cab_index) else {
            diagnostics.push(Diagnostic::new(
                "PL-CAB-MISSING",
                format!("cab {cab_index} not present"),
            ));
            continue;
        };
        let cab_name = cab.name();
        for (param_id, raw) in [(CAB_PARAM_ER, er_raw), (CAB_PARAM_MIC, mic_raw)] {
            let Some(param) = cab.param_mut(param_id) else {
                diagnostics.push(Diagnostic::new(
                    "PL-PARAM-MISSING",
                    format!("{cab_name} has no parameter {param_id}"),
                ));
                continue;
            };
            if let Err(err) = param.set_value(ValueSlot::Current, raw) {
                diagnostics.push(Diagnostic::new(
                    "PL-VALUE-REJECTED",
                    format!("{cab_name} parameter {}: {err}", param.name()),
                ));
            }
        }
    }
    Ok(())
}

/// Preset-level setup bytes written into the low byte of the 4-byte slot.
pub(super) fn apply_setup_params(
    preset: &mut Preset,
    reader: &MessageReader<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ParseError> {
    for (param_id, offset) in layout::SETUP_PARAMS {
        let raw = [reader.read_u8(offset)?, 0, 0, 0];
        let Some(param) = preset.param_mut(param_id) else {
            diagnostics.push(Diagnostic::new(
                "PL-PARAM-MISSING",
                format!("preset parameter {param_id} not present"),
            ));
            continue;
        };
        if let Err(err) = param.set_value(ValueSlot::Current, raw) {
            diagnostics.push(Diagnostic::new(
                "PL-VALUE-REJECTED",
                format!("preset parameter {}: {err}", param.name()),
            ));
        }
    }
    Ok(())
}
