use super::super::error::ParseError;

/// Bounds-checked access to one raw message buffer.
///
/// Message layouts are fixed-offset; every read reports how many bytes it
/// needed so truncated frames surface as `ParseError::Truncated` instead of
/// a panic.
pub(crate) struct MessageReader<'a> {
    data: &'a [u8],
}

impl<'a> MessageReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ParseError> {
        if self.data.len() < needed {
            return Err(ParseError::Truncated {
                needed,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ParseError> {
        self.data
            .get(offset)
            .copied()
            .ok_or(ParseError::Truncated {
                needed: offset + 1,
                actual: self.data.len(),
            })
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, ParseError> {
        let bytes = self.read_slice(range)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_le(&self, range: std::ops::Range<usize>) -> Result<u32, ParseError> {
        let bytes = self.read_slice(range)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Four raw value bytes starting at `offset`, kept in wire order.
    pub fn read_raw4(&self, offset: usize) -> Result<[u8; 4], ParseError> {
        let bytes = self.read_slice(offset..offset + 4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], ParseError> {
        self.data
            .get(range.clone())
            .ok_or(ParseError::Truncated {
                needed: range.end,
                actual: self.data.len(),
            })
    }

    /// Everything from `offset` to the end of the buffer.
    pub fn read_tail(&self, offset: usize) -> Result<&'a [u8], ParseError> {
        self.data.get(offset..).ok_or(ParseError::Truncated {
            needed: offset,
            actual: self.data.len(),
        })
    }
}
