use crate::level::Level;

/// Host-to-core inputs. The host serializes these; the core assumes at most
/// one piece is being manipulated at a time.
#[derive(Clone, Debug)]
pub enum CoreAction {
    LoadLevel(Level),
    BeginDrag {
        piece_id: u32,
    },
    DragMove {
        piece_id: u32,
        x: f32,
        y: f32,
    },
    DragEnd {
        piece_id: u32,
    },
    Rotate {
        piece_id: u32,
        delta_deg: f32,
    },
    /// Authoring only; a benign no-op on non-chiral kinds.
    SetMirror {
        piece_id: u32,
        mirrored: bool,
    },
    Reset,
}
