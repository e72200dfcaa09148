use std::ops::Range;

pub const SETUP_TYPE_RANGE: Range<usize> = 16..20;
pub const SETUP_VALUE_OFFSET: usize = 20;

/// Global-setup discriminants addressing the two cabinets.
pub const SETUP_CAB0_ER: u32 = 0x11;
pub const SETUP_CAB0_MIC: u32 = 0x12;
pub const SETUP_CAB0_LOW_CUT: u32 = 0x13;
pub const SETUP_CAB0_RES_LEVEL: u32 = 0x14;
pub const SETUP_CAB0_THUMP: u32 = 0x15;
pub const SETUP_CAB0_DECAY: u32 = 0x16;
pub const SETUP_CAB1_ER: u32 = 0x19;
pub const SETUP_CAB1_MIC: u32 = 0x1A;
pub const SETUP_CAB1_LOW_CUT: u32 = 0x1B;
pub const SETUP_CAB1_RES_LEVEL: u32 = 0x1C;
pub const SETUP_CAB1_THUMP: u32 = 0x1D;
pub const SETUP_CAB1_DECAY: u32 = 0x1E;

/// Global-setup discriminants addressing preset-level parameters.
pub const SETUP_INPUT1_SOURCE: u32 = 0x3C;
pub const SETUP_INPUT2_SOURCE: u32 = 0x3D;
pub const SETUP_GUITAR_IN_Z: u32 = 0x3E;
pub const SETUP_TEMPO: u32 = 0x3F;

pub const STATUS_ID_RANGE: Range<usize> = 12..16;
pub const STATUS_VALUE_RANGE: Range<usize> = 16..20;

/// Status report discriminants the device answers queries with.
pub const STATUS_ID_PRESET: u32 = 0x04;
pub const STATUS_ID_SET: u32 = 0x06;
