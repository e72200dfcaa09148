use thiserror::Error;

/// Errors returned by model setters when a decoded value does not fit the
/// target slot or field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    #[error("not a float value: bits {bits:#010x}")]
    NotAFloat { bits: u32 },
    #[error("expected a switch value of 0 or 1, got {value}")]
    NotASwitch { value: f32 },
    #[error("expected a single-byte value, got bits {bits:#010x}")]
    NotAByte { bits: u32 },
    #[error("unknown type id {type_id:#010x} for {kind} item")]
    UnknownTypeId { type_id: u32, kind: &'static str },
    #[error("{field} {value} out of range (max {max})")]
    OutOfRange {
        field: &'static str,
        value: u8,
        max: u8,
    },
}

/// Interpretation of a parameter's 4-byte slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Plain little-endian float32.
    Float,
    /// Float32 that may carry a tap-tempo index instead of a plain value.
    Tempo,
    /// Float32 restricted to 0.0 / 1.0.
    Switch,
    /// Low byte carries the value, upper bytes must be zero.
    Byte,
}

/// Which of the three value slots a write targets.
///
/// Selection is an explicit variant matched against the slot fields, so the
/// set of writable slots is closed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSlot {
    Current,
    Min,
    Max,
}

/// A named value slot on an item or preset, with current/min/max binary
/// representations kept in wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    id: u32,
    name: &'static str,
    kind: ParamKind,
    current: [u8; 4],
    min: [u8; 4],
    max: [u8; 4],
}

impl Parameter {
    pub(crate) fn new(id: u32, name: &'static str, kind: ParamKind) -> Self {
        Self {
            id,
            name,
            kind,
            current: [0; 4],
            min: [0; 4],
            max: [0; 4],
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn current(&self) -> [u8; 4] {
        self.current
    }

    pub fn min(&self) -> [u8; 4] {
        self.min
    }

    pub fn max(&self) -> [u8; 4] {
        self.max
    }

    /// Write raw wire bytes into the selected slot.
    ///
    /// The bytes are validated against the parameter kind; on rejection the
    /// slot is left untouched.
    pub fn set_value(&mut self, slot: ValueSlot, raw: [u8; 4]) -> Result<(), ValueError> {
        self.check(raw)?;
        match slot {
            ValueSlot::Current => self.current = raw,
            ValueSlot::Min => self.min = raw,
            ValueSlot::Max => self.max = raw,
        }
        Ok(())
    }

    fn check(&self, raw: [u8; 4]) -> Result<(), ValueError> {
        let bits = u32::from_le_bytes(raw);
        let value = f32::from_le_bytes(raw);
        match self.kind {
            ParamKind::Float | ParamKind::Tempo => {
                if value.is_nan() {
                    return Err(ValueError::NotAFloat { bits });
                }
            }
            ParamKind::Switch => {
                if value != 0.0 && value != 1.0 {
                    return Err(ValueError::NotASwitch { value });
                }
            }
            ParamKind::Byte => {
                if raw[1] != 0 || raw[2] != 0 || raw[3] != 0 {
                    return Err(ValueError::NotAByte { bits });
                }
            }
        }
        Ok(())
    }
}
