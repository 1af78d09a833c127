use crate::magnet::MagnetHint;

/// Core-to-host notifications. The session queues these synchronously as it
/// commits state; the host drains them after each action and never gets
/// called back into mid-mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum CoreEvent {
    Snapped {
        piece_id: u32,
        target_id: u32,
    },
    Unsnapped {
        piece_id: u32,
        target_id: u32,
    },
    Completed,
    /// Fired after every committed authoring move, raw or magnetism-adjusted.
    PieceMoved {
        piece_id: u32,
        x: f32,
        y: f32,
        rotation_deg: f32,
    },
    /// Non-binding alignment hints for the authoring UI.
    MagnetIndicators {
        hints: Vec<MagnetHint>,
    },
}
