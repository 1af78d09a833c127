use rkyv::rancor::Error;

use crate::level::{Level, LevelSnapshot};

/// Byte form of a level for the external store. Corrupt or foreign bytes are
/// the store's problem, not a fault here, so both directions are Option.
pub fn encode_level(level: &Level) -> Option<Vec<u8>> {
    let snapshot = LevelSnapshot::new(level.clone());
    rkyv::to_bytes::<Error>(&snapshot)
        .ok()
        .map(|bytes| bytes.into_vec())
}

pub fn decode_level(bytes: &[u8]) -> Option<Level> {
    let snapshot = rkyv::from_bytes::<LevelSnapshot, Error>(bytes).ok()?;
    if snapshot.version != crate::level::LEVEL_SNAPSHOT_VERSION {
        return None;
    }
    Some(snapshot.level)
}
