pub const SET_INDEX_OFFSET: usize = 8;

/// Set display name runs from here to the end of the buffer.
pub const NAME_OFFSET: usize = 12;
