pub mod action;
pub mod canvas;
pub mod catalog;
pub mod codec;
pub mod event;
pub mod game;
pub mod level;
pub mod magnet;
pub mod session;
pub mod state;

pub use action::CoreAction;
pub use canvas::{CanvasSize, to_canvas, to_percent};
pub use catalog::{PieceKind, canonical_polygon, centroid, kind_by_name, polygon_area, scale_polygon};
pub use codec::{decode_level, encode_level};
pub use event::CoreEvent;
pub use game::{Aabb, Edge, Transform, angular_distance, is_complete, normalize_angle};
pub use level::{
    Difficulty, Level, LevelError, LevelSnapshot, MagnetismConfig, PieceRecord, SnapRules,
    TargetRecord,
};
pub use magnet::{MagnetFeature, MagnetHint, MagnetOutcome};
pub use session::Session;
pub use state::{GameState, Mode, Piece, Target};
