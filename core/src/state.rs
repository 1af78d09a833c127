use crate::canvas::CanvasSize;
use crate::catalog::PieceKind;
use crate::game::{PIECE_SCALE_RATIO, Transform};
use crate::level::{MagnetismConfig, SnapRules};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Snap against the level's targets; win when all are occupied.
    Play,
    /// No targets; magnetism assists free placement and every committed move
    /// is reported so the host can persist the layout.
    Author,
}

#[derive(Clone, Debug)]
pub struct Piece {
    pub id: u32,
    pub kind: PieceKind,
    pub transform: Transform,
    pub bound_target: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct Target {
    pub id: u32,
    pub kind: PieceKind,
    pub transform: Transform,
    pub occupied: bool,
    pub bound_piece: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub level_id: String,
    pub pieces: Vec<Piece>,
    pub targets: Vec<Target>,
    pub canvas: CanvasSize,
    pub unit_size: f32,
    pub rules: SnapRules,
    pub magnetism: MagnetismConfig,
    pub mode: Mode,
    pub solved: bool,
    /// Id of the piece currently being dragged, if any.
    pub drag: Option<u32>,
}

impl GameState {
    pub fn new(canvas: CanvasSize, mode: Mode) -> Self {
        Self {
            level_id: String::new(),
            pieces: Vec::new(),
            targets: Vec::new(),
            canvas,
            unit_size: canvas.width.min(canvas.height) * PIECE_SCALE_RATIO,
            rules: SnapRules::default(),
            magnetism: MagnetismConfig::default(),
            mode,
            solved: false,
            drag: None,
        }
    }

    pub fn piece_index(&self, piece_id: u32) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.id == piece_id)
    }

    pub fn target_index(&self, target_id: u32) -> Option<usize> {
        self.targets.iter().position(|target| target.id == target_id)
    }
}
