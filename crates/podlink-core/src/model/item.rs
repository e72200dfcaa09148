use super::param::{ParamKind, Parameter, ValueError, ValueSlot};

/// Cabinet parameter ids. These do not travel on the wire inside item
/// blocks; the snapshot decoder maps fixed block positions onto them.
pub const CAB_PARAM_ER: u32 = 0;
pub const CAB_PARAM_MIC: u32 = 1;
pub const CAB_PARAM_LOW_CUT: u32 = 2;
pub const CAB_PARAM_RES_LEVEL: u32 = 3;
pub const CAB_PARAM_THUMP: u32 = 4;
pub const CAB_PARAM_DECAY: u32 = 5;

/// Known amp model ids (hardware catalog excerpt).
pub const AMP_TYPES: &[u32] = &[
    0x0005_0000, 0x0005_0001, 0x0005_0002, 0x0005_0003, 0x0005_0004, 0x0005_0005,
];

/// Known cab model ids.
pub const CAB_TYPES: &[u32] = &[
    0x0006_0000, 0x0006_0001, 0x0006_0002, 0x0006_0003, 0x0006_0004, 0x0006_0005,
];

/// Known effect model ids.
pub const EFFECT_TYPES: &[u32] = &[
    0x0002_0000, 0x0002_0001, 0x0002_0002, 0x0002_0003, 0x0002_0004, 0x0002_0005, 0x0002_0006,
    0x0002_0007,
];

/// Signal-chain slot category; decides how snapshot parameter blocks are
/// interpreted for the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Amp,
    Cab,
    Effect,
}

impl ItemKind {
    fn label(self) -> &'static str {
        match self {
            ItemKind::Amp => "amp",
            ItemKind::Cab => "cab",
            ItemKind::Effect => "effect",
        }
    }

    fn known_types(self) -> &'static [u32] {
        match self {
            ItemKind::Amp => AMP_TYPES,
            ItemKind::Cab => CAB_TYPES,
            ItemKind::Effect => EFFECT_TYPES,
        }
    }
}

/// One effect/amp block in the signal chain.
#[derive(Debug, Clone, PartialEq)]
pub struct PedalBoardItem {
    id: u32,
    kind: ItemKind,
    name: &'static str,
    type_id: u32,
    position: u16,
    position_kind: u8,
    active: bool,
    params: Vec<Parameter>,
}

impl PedalBoardItem {
    fn new(
        id: u32,
        kind: ItemKind,
        name: &'static str,
        type_id: u32,
        params: Vec<Parameter>,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            type_id,
            position: id as u16,
            position_kind: 0,
            active: false,
            params,
        }
    }

    pub(crate) fn amp(id: u32, name: &'static str) -> Self {
        let params = vec![
            Parameter::new(0, "Drive", ParamKind::Float),
            Parameter::new(1, "Bass", ParamKind::Float),
            Parameter::new(2, "Mid", ParamKind::Float),
            Parameter::new(3, "Treble", ParamKind::Float),
            Parameter::new(4, "Presence", ParamKind::Float),
            Parameter::new(5, "Volume", ParamKind::Float),
        ];
        Self::new(id, ItemKind::Amp, name, AMP_TYPES[0], params)
    }

    pub(crate) fn cab(id: u32, name: &'static str) -> Self {
        let params = vec![
            Parameter::new(CAB_PARAM_ER, "Early Reflections", ParamKind::Float),
            Parameter::new(CAB_PARAM_MIC, "Mic", ParamKind::Byte),
            Parameter::new(CAB_PARAM_LOW_CUT, "Low Cut", ParamKind::Float),
            Parameter::new(CAB_PARAM_RES_LEVEL, "Res Level", ParamKind::Float),
            Parameter::new(CAB_PARAM_THUMP, "Thump", ParamKind::Float),
            Parameter::new(CAB_PARAM_DECAY, "Decay", ParamKind::Float),
        ];
        Self::new(id, ItemKind::Cab, name, CAB_TYPES[0], params)
    }

    pub(crate) fn effect(id: u32, name: &'static str) -> Self {
        let params = vec![
            Parameter::new(0, "Speed", ParamKind::Tempo),
            Parameter::new(1, "Depth", ParamKind::Float),
            Parameter::new(2, "Time", ParamKind::Tempo),
            Parameter::new(3, "Mix", ParamKind::Float),
            Parameter::new(4, "Level", ParamKind::Float),
        ];
        Self::new(id, ItemKind::Effect, name, EFFECT_TYPES[0], params)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> u32 {
        self.type_id
    }

    pub fn position(&self) -> (u16, u8) {
        (self.position, self.position_kind)
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Change the item's model type. Unknown ids for the slot category are
    /// rejected and the current type is kept.
    pub fn set_type(&mut self, type_id: u32) -> Result<(), ValueError> {
        if !self.kind.known_types().contains(&type_id) {
            return Err(ValueError::UnknownTypeId {
                type_id,
                kind: self.kind.label(),
            });
        }
        self.type_id = type_id;
        Ok(())
    }

    /// Move the item in the chain. The snapshot format carries positions the
    /// model cannot verify, so no check is applied here.
    pub fn set_position_unchecked(&mut self, position: u16, position_kind: u8) {
        self.position = position;
        self.position_kind = position_kind;
    }

    pub fn param_count(&self) -> u16 {
        self.params.len() as u16
    }

    pub fn param(&self, id: u32) -> Option<&Parameter> {
        self.params.iter().find(|p| p.id() == id)
    }

    pub fn param_mut(&mut self, id: u32) -> Option<&mut Parameter> {
        self.params.iter_mut().find(|p| p.id() == id)
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}
