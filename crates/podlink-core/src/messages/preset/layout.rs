use crate::model::{
    CAB_PARAM_DECAY, CAB_PARAM_LOW_CUT, CAB_PARAM_RES_LEVEL, CAB_PARAM_THUMP,
    PRESET_PARAM_GUITAR_IN_Z, PRESET_PARAM_INPUT1_SOURCE, PRESET_PARAM_INPUT2_SOURCE,
};

pub const PRESET_INDEX_OFFSET: usize = 8;

pub const NAME_RANGE: std::ops::Range<usize> = 8..24;

pub const ITEM_BLOCKS_OFFSET: usize = 48;
pub const ITEM_BLOCK_SIZE: usize = 256;

/// Storage blocks are consumed in order; this table assigns each block to
/// its logical item id (not raw storage order).
pub const ITEM_STORAGE_ORDER: [u32; 12] = [0, 2, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11];

// Inside one 256-byte item block.
pub const ITEM_TYPE_RANGE: std::ops::Range<usize> = 0..4;
pub const ITEM_POSITION_RANGE: std::ops::Range<usize> = 4..6;
pub const ITEM_POSITION_KIND_OFFSET: usize = 6;
pub const ITEM_ACTIVE_OFFSET: usize = 8;
pub const ITEM_TEMPO_FLAG_OFFSETS: [usize; 2] = [9, 10];
pub const PARAM_BLOCKS_OFFSET: usize = 16;
pub const PARAM_BLOCK_SIZE: usize = 20;

// Inside one 20-byte parameter block.
pub const PARAM_ID_RANGE: std::ops::Range<usize> = 0..4;
pub const PARAM_CURRENT_OFFSET: usize = 4;
pub const PARAM_MIN_OFFSET: usize = 8;
pub const PARAM_MAX_OFFSET: usize = 12;

/// Cab item blocks carry exactly four parameter blocks mapped onto these
/// ids in order; the block-local id field is not used for cabs.
pub const CAB_BLOCK_PARAM_IDS: [u32; 4] = [
    CAB_PARAM_LOW_CUT,
    CAB_PARAM_RES_LEVEL,
    CAB_PARAM_THUMP,
    CAB_PARAM_DECAY,
];

// Absolute offsets after the item blocks.
pub const DT_OFFSETS: [[usize; 3]; 2] = [[3124, 3125, 3126], [3132, 3133, 3134]];
pub const CAB_ER_OFFSETS: [usize; 2] = [3412, 3420];
pub const CAB_MIC_OFFSETS: [usize; 2] = [4096, 4097];
pub const SETUP_PARAMS: [(u32, usize); 3] = [
    (PRESET_PARAM_GUITAR_IN_Z, 3546),
    (PRESET_PARAM_INPUT1_SOURCE, 4102),
    (PRESET_PARAM_INPUT2_SOURCE, 4103),
];

/// Smallest buffer that covers every absolute offset of the snapshot.
pub const MIN_LEN: usize = 4104;
