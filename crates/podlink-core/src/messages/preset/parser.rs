use super::{layout, snapshot};
use crate::messages::common::reader::MessageReader;
use crate::messages::error::{ParseError, Target};
use crate::model::Pod;
use crate::{Decoded, Entity, Status};

pub fn parse_preset_change(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let index = reader.read_u8(layout::PRESET_INDEX_OFFSET)?;
    // The index is accepted as the hardware sends it; there is no failure
    // path here.
    pod.set_current_preset(index);
    Ok(Decoded::with_entity(
        Status::PresetChange,
        Entity::Preset { index },
    ))
}

/// The unit announces an upcoming preset change; nothing to apply.
pub fn parse_preset_change_alert(_data: &[u8], _pod: &mut Pod) -> Result<Decoded, ParseError> {
    Ok(Decoded::status_only(Status::None))
}

pub fn parse_preset_load(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    reader.require_len(layout::MIN_LEN)?;

    let preset_index = pod.current_preset_index();
    let preset = pod.current_preset_mut().ok_or(ParseError::EntityNotFound {
        target: Target::CurrentPreset,
    })?;

    preset.set_name_bytes(reader.read_slice(layout::NAME_RANGE)?);

    let mut diagnostics = Vec::new();
    for (storage_index, &item_id) in layout::ITEM_STORAGE_ORDER.iter().enumerate() {
        let start = layout::ITEM_BLOCKS_OFFSET + storage_index * layout::ITEM_BLOCK_SIZE;
        let block = reader.read_slice(start..start + layout::ITEM_BLOCK_SIZE)?;
        snapshot::apply_item_block(preset, item_id, block, &mut diagnostics)?;
    }
    snapshot::apply_dt_units(preset, &reader, &mut diagnostics)?;
    snapshot::apply_cab_units(preset, &reader, &mut diagnostics)?;
    snapshot::apply_setup_params(preset, &reader, &mut diagnostics)?;

    Ok(Decoded {
        status: Status::PresetLoad,
        entity: Some(Entity::Preset {
            index: preset_index,
        }),
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::super::layout;
    use super::{parse_preset_change, parse_preset_change_alert, parse_preset_load};
    use crate::messages::error::ParseError;
    use crate::model::{
        CAB_PARAM_DECAY, CAB_PARAM_ER, CAB_PARAM_LOW_CUT, CAB_PARAM_MIC,
        PRESET_PARAM_GUITAR_IN_Z, PRESET_PARAM_INPUT1_SOURCE, PRESET_PARAM_INPUT2_SOURCE,
        CAB_TYPES, EFFECT_TYPES, Pod,
    };
    use crate::{Entity, Status};

    /// Minimal well-formed snapshot buffer; individual tests overwrite the
    /// sections they exercise. Parameter blocks carry each item's real
    /// parameter ids in declaration order with zeroed values.
    fn snapshot_frame() -> Vec<u8> {
        let mut data = vec![0u8; layout::MIN_LEN];
        data[layout::NAME_RANGE].copy_from_slice(b"Test Tone\0\0\0\0\0\0\0");
        for storage_index in 0..layout::ITEM_STORAGE_ORDER.len() {
            let base = layout::ITEM_BLOCKS_OFFSET + storage_index * layout::ITEM_BLOCK_SIZE;
            let item_id = layout::ITEM_STORAGE_ORDER[storage_index];
            let (type_id, param_count) = match item_id {
                0 | 1 => (crate::model::AMP_TYPES[1], 6),
                2 | 3 => (CAB_TYPES[1], 4),
                _ => (EFFECT_TYPES[1], 5),
            };
            data[base..base + 4].copy_from_slice(&type_id.to_le_bytes());
            data[base + layout::ITEM_POSITION_RANGE.start..base + layout::ITEM_POSITION_RANGE.end]
                .copy_from_slice(&(item_id as u16).to_le_bytes());
            for index in 0..param_count {
                let start = base + layout::PARAM_BLOCKS_OFFSET + index * layout::PARAM_BLOCK_SIZE;
                data[start..start + 4].copy_from_slice(&(index as u32).to_le_bytes());
            }
        }
        data
    }

    fn item_block_base(item_id: u32) -> usize {
        let storage_index = layout::ITEM_STORAGE_ORDER
            .iter()
            .position(|&id| id == item_id)
            .unwrap();
        layout::ITEM_BLOCKS_OFFSET + storage_index * layout::ITEM_BLOCK_SIZE
    }

    fn write_param_block(data: &mut [u8], base: usize, index: usize, id: u32, current: [u8; 4]) {
        let start = base + layout::PARAM_BLOCKS_OFFSET + index * layout::PARAM_BLOCK_SIZE;
        data[start..start + 4].copy_from_slice(&id.to_le_bytes());
        data[start + layout::PARAM_CURRENT_OFFSET..start + layout::PARAM_CURRENT_OFFSET + 4]
            .copy_from_slice(&current);
        data[start + layout::PARAM_MIN_OFFSET..start + layout::PARAM_MIN_OFFSET + 4]
            .copy_from_slice(&0.0f32.to_le_bytes());
        data[start + layout::PARAM_MAX_OFFSET..start + layout::PARAM_MAX_OFFSET + 4]
            .copy_from_slice(&1.0f32.to_le_bytes());
    }

    #[test]
    fn preset_change_updates_current_index() {
        let mut data = vec![0u8; 9];
        data[layout::PRESET_INDEX_OFFSET] = 7;
        let mut pod = Pod::new();
        let decoded = parse_preset_change(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::PresetChange);
        assert_eq!(decoded.entity, Some(Entity::Preset { index: 7 }));
        assert_eq!(pod.current_preset_index(), 7);
    }

    #[test]
    fn preset_change_alert_is_a_no_op() {
        let mut pod = Pod::new();
        let before = pod.clone();
        let decoded = parse_preset_change_alert(&[0u8; 8], &mut pod).unwrap();
        assert_eq!(decoded.status, Status::None);
        assert!(decoded.entity.is_none());
        assert_eq!(pod, before);
    }

    #[test]
    fn preset_load_requires_full_snapshot_length() {
        let mut pod = Pod::new();
        let err = parse_preset_load(&vec![0u8; 512], &mut pod).unwrap_err();
        assert_eq!(
            err,
            ParseError::Truncated {
                needed: layout::MIN_LEN,
                actual: 512
            }
        );
    }

    #[test]
    fn preset_load_sets_name_and_permutes_item_blocks() {
        let mut data = snapshot_frame();
        // Storage block 1 belongs to logical item 2, storage block 2 to
        // logical item 1.
        let base_item2 = layout::ITEM_BLOCKS_OFFSET + layout::ITEM_BLOCK_SIZE;
        let base_item1 = layout::ITEM_BLOCKS_OFFSET + 2 * layout::ITEM_BLOCK_SIZE;
        data[base_item2 + layout::ITEM_ACTIVE_OFFSET] = 1;
        data[base_item1 + layout::ITEM_POSITION_RANGE.start
            ..base_item1 + layout::ITEM_POSITION_RANGE.end]
            .copy_from_slice(&9u16.to_le_bytes());
        data[base_item1 + layout::ITEM_POSITION_KIND_OFFSET] = 2;

        let mut pod = Pod::new();
        let decoded = parse_preset_load(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::PresetLoad);

        let preset = pod.current_preset().unwrap();
        assert_eq!(preset.name(), "Test Tone");
        assert!(preset.item(2).unwrap().active());
        assert!(!preset.item(1).unwrap().active());
        assert_eq!(preset.item(1).unwrap().position(), (9, 2));
    }

    #[test]
    fn item_permutation_is_a_bijection() {
        let mut seen = [false; 12];
        for &id in &layout::ITEM_STORAGE_ORDER {
            assert!(!seen[id as usize], "item id {id} assigned twice");
            seen[id as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn normal_params_apply_current_min_max() {
        let mut data = snapshot_frame();
        let base = item_block_base(5);
        write_param_block(&mut data, base, 1, 1, 0.75f32.to_le_bytes());

        let mut pod = Pod::new();
        parse_preset_load(&data, &mut pod).unwrap();

        let preset = pod.current_preset().unwrap();
        let param = preset.item(5).unwrap().param(1).unwrap();
        assert_eq!(param.current(), 0.75f32.to_le_bytes());
        assert_eq!(param.min(), 0.0f32.to_le_bytes());
        assert_eq!(param.max(), 1.0f32.to_le_bytes());
    }

    #[test]
    fn tempo_flags_are_consumed_in_declaration_order() {
        let mut data = snapshot_frame();
        let base = item_block_base(4);
        // First tempo flag overrides parameter 0, second is 1 so parameter 2
        // keeps its raw bytes.
        data[base + layout::ITEM_TEMPO_FLAG_OFFSETS[0]] = 110;
        data[base + layout::ITEM_TEMPO_FLAG_OFFSETS[1]] = 1;
        write_param_block(&mut data, base, 0, 0, 0.5f32.to_le_bytes());
        write_param_block(&mut data, base, 2, 2, 0.25f32.to_le_bytes());

        let mut pod = Pod::new();
        parse_preset_load(&data, &mut pod).unwrap();

        let preset = pod.current_preset().unwrap();
        let item = preset.item(4).unwrap();
        assert_eq!(item.param(0).unwrap().current(), 110.0f32.to_le_bytes());
        assert_eq!(item.param(2).unwrap().current(), 0.25f32.to_le_bytes());
    }

    #[test]
    fn cab_blocks_map_to_fixed_parameter_ids() {
        let mut data = snapshot_frame();
        let base = item_block_base(2);
        // Cab blocks: position in the run selects the parameter; the id
        // field is ignored.
        write_param_block(&mut data, base, 0, 0xFFFF, 0.1f32.to_le_bytes());
        write_param_block(&mut data, base, 3, 0xFFFF, 0.9f32.to_le_bytes());

        let mut pod = Pod::new();
        parse_preset_load(&data, &mut pod).unwrap();

        let preset = pod.current_preset().unwrap();
        let cab = preset.item(2).unwrap();
        assert_eq!(
            cab.param(CAB_PARAM_LOW_CUT).unwrap().current(),
            0.1f32.to_le_bytes()
        );
        assert_eq!(
            cab.param(CAB_PARAM_DECAY).unwrap().current(),
            0.9f32.to_le_bytes()
        );
    }

    #[test]
    fn dt_cab_and_setup_sections_apply_from_absolute_offsets() {
        let mut data = snapshot_frame();
        data[layout::DT_OFFSETS[0][0]] = 2;
        data[layout::DT_OFFSETS[0][1]] = 1;
        data[layout::DT_OFFSETS[0][2]] = 1;
        data[layout::CAB_ER_OFFSETS[0]..layout::CAB_ER_OFFSETS[0] + 4]
            .copy_from_slice(&0.2f32.to_le_bytes());
        data[layout::CAB_MIC_OFFSETS[0]] = 5;
        data[layout::SETUP_PARAMS[0].1] = 1;
        data[layout::SETUP_PARAMS[1].1] = 2;
        data[layout::SETUP_PARAMS[2].1] = 3;

        let mut pod = Pod::new();
        let decoded = parse_preset_load(&data, &mut pod).unwrap();
        assert!(decoded.diagnostics.is_empty());

        let preset = pod.current_preset().unwrap();
        let dt = preset.dt(0).unwrap();
        assert_eq!((dt.topology(), dt.class(), dt.mode()), (2, 1, 1));
        let cab = preset.cab(0).unwrap();
        assert_eq!(cab.param(CAB_PARAM_ER).unwrap().current(), 0.2f32.to_le_bytes());
        assert_eq!(cab.param(CAB_PARAM_MIC).unwrap().current(), [5, 0, 0, 0]);
        assert_eq!(
            preset.param(PRESET_PARAM_GUITAR_IN_Z).unwrap().current(),
            [1, 0, 0, 0]
        );
        assert_eq!(
            preset.param(PRESET_PARAM_INPUT1_SOURCE).unwrap().current(),
            [2, 0, 0, 0]
        );
        assert_eq!(
            preset.param(PRESET_PARAM_INPUT2_SOURCE).unwrap().current(),
            [3, 0, 0, 0]
        );
    }

    #[test]
    fn rejected_dt_values_become_diagnostics_not_errors() {
        let mut data = snapshot_frame();
        data[layout::DT_OFFSETS[1][0]] = 9; // topology out of range

        let mut pod = Pod::new();
        let decoded = parse_preset_load(&data, &mut pod).unwrap();
        assert_eq!(decoded.status, Status::PresetLoad);
        assert!(
            decoded
                .diagnostics
                .iter()
                .any(|d| d.id == "PL-DT-REJECTED")
        );
        // Unit keeps its previous value.
        let preset = pod.current_preset().unwrap();
        assert_eq!(preset.dt(1).unwrap().topology(), 0);
    }

    #[test]
    fn unknown_item_type_in_block_is_a_diagnostic() {
        let mut data = snapshot_frame();
        let base = item_block_base(6);
        data[base..base + 4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());

        let mut pod = Pod::new();
        let decoded = parse_preset_load(&data, &mut pod).unwrap();
        assert!(
            decoded
                .diagnostics
                .iter()
                .any(|d| d.id == "PL-TYPE-REJECTED")
        );
        let preset = pod.current_preset().unwrap();
        assert_eq!(preset.item(6).unwrap().type_id(), EFFECT_TYPES[0]);
    }

    #[test]
    fn missing_current_preset_fails_the_whole_parse() {
        let data = snapshot_frame();
        let mut pod = Pod::new();
        pod.set_current_preset(200);
        let err = parse_preset_load(&data, &mut pod).unwrap_err();
        assert!(matches!(err, ParseError::EntityNotFound { .. }));
    }
}
