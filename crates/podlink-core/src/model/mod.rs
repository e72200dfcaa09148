//! In-memory device model mutated by the message decoders.
//!
//! The tree is Pod -> Set -> Preset -> {items, cabs, DT units, setup
//! parameters}. Lookups return `Option` on miss and setters return `Result`,
//! so decoders can classify each failure instead of panicking; the decoders
//! decide which failures are fatal for a message.
//!
//! Current set/preset indices are accepted as the hardware sends them; reads
//! through `current_set`/`current_preset` resolve them and report misses as
//! `None`.

mod dt;
mod item;
mod param;

pub use dt::DtUnit;
pub use item::{
    AMP_TYPES, CAB_PARAM_DECAY, CAB_PARAM_ER, CAB_PARAM_LOW_CUT, CAB_PARAM_MIC,
    CAB_PARAM_RES_LEVEL, CAB_PARAM_THUMP, CAB_TYPES, EFFECT_TYPES, ItemKind, PedalBoardItem,
};
pub use param::{ParamKind, Parameter, ValueError, ValueSlot};

pub const NUM_SETS: usize = 8;
pub const PRESETS_PER_SET: usize = 64;
pub const ITEMS_PER_PRESET: usize = 12;
pub const CABS_PER_PRESET: usize = 2;
pub const DT_UNITS_PER_PRESET: usize = 2;

/// Preset-level setup parameter ids.
pub const PRESET_PARAM_GUITAR_IN_Z: u32 = 0x0000_0100;
pub const PRESET_PARAM_INPUT1_SOURCE: u32 = 0x0000_0101;
pub const PRESET_PARAM_INPUT2_SOURCE: u32 = 0x0000_0102;
pub const PRESET_PARAM_TEMPO: u32 = 0x0000_0103;

/// Root device model instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Pod {
    sets: Vec<Set>,
    current_set: u8,
    current_preset: u8,
}

impl Pod {
    pub fn new() -> Self {
        let sets = (0..NUM_SETS).map(|i| Set::new(i as u8)).collect();
        Self {
            sets,
            current_set: 0,
            current_preset: 0,
        }
    }

    pub fn current_set_index(&self) -> u8 {
        self.current_set
    }

    pub fn current_preset_index(&self) -> u8 {
        self.current_preset
    }

    /// Indices are stored as received; out-of-range values simply make the
    /// current set unresolvable until the device sends a valid one.
    pub fn set_current_set(&mut self, index: u8) {
        self.current_set = index;
    }

    pub fn set_current_preset(&mut self, index: u8) {
        self.current_preset = index;
    }

    pub fn set(&self, index: u8) -> Option<&Set> {
        self.sets.get(usize::from(index))
    }

    pub fn set_mut(&mut self, index: u8) -> Option<&mut Set> {
        self.sets.get_mut(usize::from(index))
    }

    pub fn current_set(&self) -> Option<&Set> {
        self.set(self.current_set)
    }

    pub fn current_set_mut(&mut self) -> Option<&mut Set> {
        let index = self.current_set;
        self.set_mut(index)
    }

    pub fn current_preset(&self) -> Option<&Preset> {
        self.current_set()?.preset(self.current_preset)
    }

    pub fn current_preset_mut(&mut self) -> Option<&mut Preset> {
        let index = self.current_preset;
        self.current_set_mut()?.preset_mut(index)
    }
}

impl Default for Pod {
    fn default() -> Self {
        Self::new()
    }
}

/// Named collection of presets.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    index: u8,
    name: String,
    presets: Vec<Preset>,
}

impl Set {
    fn new(index: u8) -> Self {
        let presets = (0..PRESETS_PER_SET).map(|i| Preset::new(i as u8)).collect();
        Self {
            index,
            name: format!("Setlist {}", index + 1),
            presets,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name straight from the wire; trailing NULs and padding are
    /// stripped, invalid UTF-8 is replaced.
    pub fn set_name_bytes(&mut self, raw: &[u8]) {
        self.name = decode_name(raw);
    }

    pub fn preset(&self, index: u8) -> Option<&Preset> {
        self.presets.get(usize::from(index))
    }

    pub fn preset_mut(&mut self, index: u8) -> Option<&mut Preset> {
        self.presets.get_mut(usize::from(index))
    }
}

/// One saved configuration: pedal-board items, cabs, DT units and setup
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    index: u8,
    name: String,
    items: Vec<PedalBoardItem>,
    dts: Vec<DtUnit>,
    params: Vec<Parameter>,
}

impl Preset {
    fn new(index: u8) -> Self {
        let items = vec![
            PedalBoardItem::amp(0, "Amp A"),
            PedalBoardItem::amp(1, "Amp B"),
            PedalBoardItem::cab(2, "Cab A"),
            PedalBoardItem::cab(3, "Cab B"),
            PedalBoardItem::effect(4, "FX1"),
            PedalBoardItem::effect(5, "FX2"),
            PedalBoardItem::effect(6, "FX3"),
            PedalBoardItem::effect(7, "FX4"),
            PedalBoardItem::effect(8, "FX5"),
            PedalBoardItem::effect(9, "FX6"),
            PedalBoardItem::effect(10, "FX7"),
            PedalBoardItem::effect(11, "FX8"),
        ];
        let dts = (0..DT_UNITS_PER_PRESET).map(|i| DtUnit::new(i as u8)).collect();
        let params = vec![
            Parameter::new(PRESET_PARAM_GUITAR_IN_Z, "Guitar In-Z", ParamKind::Byte),
            Parameter::new(PRESET_PARAM_INPUT1_SOURCE, "Input 1 Source", ParamKind::Byte),
            Parameter::new(PRESET_PARAM_INPUT2_SOURCE, "Input 2 Source", ParamKind::Byte),
            Parameter::new(PRESET_PARAM_TEMPO, "Tempo", ParamKind::Tempo),
        ];
        Self {
            index,
            name: String::new(),
            items,
            dts,
            params,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name_bytes(&mut self, raw: &[u8]) {
        self.name = decode_name(raw);
    }

    pub fn item(&self, id: u32) -> Option<&PedalBoardItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn item_mut(&mut self, id: u32) -> Option<&mut PedalBoardItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn items(&self) -> &[PedalBoardItem] {
        &self.items
    }

    /// Nth cabinet item in chain order.
    pub fn cab(&self, index: usize) -> Option<&PedalBoardItem> {
        self.items
            .iter()
            .filter(|item| item.kind() == ItemKind::Cab)
            .nth(index)
    }

    pub fn cab_mut(&mut self, index: usize) -> Option<&mut PedalBoardItem> {
        self.items
            .iter_mut()
            .filter(|item| item.kind() == ItemKind::Cab)
            .nth(index)
    }

    pub fn dt(&self, index: usize) -> Option<&DtUnit> {
        self.dts.get(index)
    }

    pub fn dt_mut(&mut self, index: usize) -> Option<&mut DtUnit> {
        self.dts.get_mut(index)
    }

    pub fn param(&self, id: u32) -> Option<&Parameter> {
        self.params.iter().find(|p| p.id() == id)
    }

    pub fn param_mut(&mut self, id: u32) -> Option<&mut Parameter> {
        self.params.iter_mut().find(|p| p.id() == id)
    }
}

fn decode_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\0', ' '])
        .to_string()
}
