use super::param::ValueError;

/// Amplifier topology/class/mode sub-unit inside a preset.
///
/// The hardware exposes two of these per preset. Values arrive as single
/// bytes from the snapshot format and are range-checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DtUnit {
    id: u8,
    topology: u8,
    class: u8,
    mode: u8,
}

impl DtUnit {
    const MAX_TOPOLOGY: u8 = 3;
    const MAX_CLASS: u8 = 1;
    const MAX_MODE: u8 = 1;

    pub(crate) fn new(id: u8) -> Self {
        Self {
            id,
            topology: 0,
            class: 0,
            mode: 0,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn topology(&self) -> u8 {
        self.topology
    }

    pub fn class(&self) -> u8 {
        self.class
    }

    pub fn mode(&self) -> u8 {
        self.mode
    }

    pub fn set_topology(&mut self, value: u8) -> Result<(), ValueError> {
        if value > Self::MAX_TOPOLOGY {
            return Err(ValueError::OutOfRange {
                field: "topology",
                value,
                max: Self::MAX_TOPOLOGY,
            });
        }
        self.topology = value;
        Ok(())
    }

    pub fn set_class(&mut self, value: u8) -> Result<(), ValueError> {
        if value > Self::MAX_CLASS {
            return Err(ValueError::OutOfRange {
                field: "class",
                value,
                max: Self::MAX_CLASS,
            });
        }
        self.class = value;
        Ok(())
    }

    pub fn set_mode(&mut self, value: u8) -> Result<(), ValueError> {
        if value > Self::MAX_MODE {
            return Err(ValueError::OutOfRange {
                field: "mode",
                value,
                max: Self::MAX_MODE,
            });
        }
        self.mode = value;
        Ok(())
    }
}
