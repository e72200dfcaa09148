use super::layout;
use crate::messages::common::reader::MessageReader;
use crate::messages::error::{ParseError, Target};
use crate::model::Pod;
use crate::{Decoded, Entity, Status};

pub fn parse_set_change(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let index = reader.read_u8(layout::SET_INDEX_OFFSET)?;
    pod.set_current_set(index);
    Ok(Decoded::with_entity(
        Status::SetChange,
        Entity::Set { index },
    ))
}

/// The trailing bytes carry the display name of the current set.
pub fn parse_set_load(data: &[u8], pod: &mut Pod) -> Result<Decoded, ParseError> {
    let reader = MessageReader::new(data);
    let name = reader.read_tail(layout::NAME_OFFSET)?;
    let set = pod.current_set_mut().ok_or(ParseError::EntityNotFound {
        target: Target::CurrentSet,
    })?;
    set.set_name_bytes(name);
    Ok(Decoded::status_only(Status::SetLoad))
}
