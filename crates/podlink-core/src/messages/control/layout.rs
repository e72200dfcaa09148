pub const ITEM_ID_RANGE: std::ops::Range<usize> = 12..16;

pub const ACTIVE_FLAG_RANGE: std::ops::Range<usize> = 16..20;

pub const PARAM_ID_RANGE: std::ops::Range<usize> = 20..24;
pub const PARAM_VALUE_OFFSET: usize = 24;

pub const TEMPO_VALUE_RANGE: std::ops::Range<usize> = 16..20;
pub const TEMPO_PARAM_ID: u32 = 0;
pub const TEMPO2_PARAM_ID: u32 = 2;

pub const TYPE_ID_RANGE: std::ops::Range<usize> = 16..20;
