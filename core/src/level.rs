use rkyv::{Archive, Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::PieceKind;
use crate::game::{
    MAGNET_ANGLE_TOLERANCE_DEFAULT_DEG, MAGNET_ANGLE_TOLERANCE_MAX_DEG,
    MAGNET_ANGLE_TOLERANCE_MIN_DEG, MAGNET_DISTANCE_DEFAULT, MAGNET_DISTANCE_MAX,
    MAGNET_DISTANCE_MIN, ROTATION_TOLERANCE_DEFAULT_DEG, ROTATION_TOLERANCE_MAX_DEG,
    ROTATION_TOLERANCE_MIN_DEG, SNAP_DISTANCE_DEFAULT, SNAP_DISTANCE_MAX, SNAP_DISTANCE_MIN,
};

pub const LEVEL_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[repr(u8)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A solution slot: where a piece of this kind must end up, in percentage
/// coordinates so the level is canvas-size independent.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct TargetRecord {
    pub id: u32,
    pub kind: PieceKind,
    pub x_pct: f32,
    pub y_pct: f32,
    pub rotation_deg: f32,
    pub mirrored: bool,
}

/// A starting pose for one piece. `color_tag` is a presentation hint; the
/// matching logic never reads it.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct PieceRecord {
    pub id: u32,
    pub kind: PieceKind,
    pub x_pct: f32,
    pub y_pct: f32,
    pub rotation_deg: f32,
    pub color_tag: String,
}

/// A complete authored level. Immutable once loaded; the authoring flow
/// produces a new `Level` from captured piece poses rather than editing one
/// in place.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    pub targets: Vec<TargetRecord>,
    pub pieces: Vec<PieceRecord>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("duplicate target id {0}")]
    DuplicateTargetId(u32),
    #[error("duplicate piece id {0}")]
    DuplicatePieceId(u32),
    #[error("target {id}: {axis} percentage {value} outside 0-100")]
    TargetPercentOutOfRange { id: u32, axis: char, value: f32 },
    #[error("piece {id}: {axis} percentage {value} outside 0-100")]
    PiecePercentOutOfRange { id: u32, axis: char, value: f32 },
    #[error("target {id}: rotation {value} is not finite")]
    TargetRotationNotFinite { id: u32, value: f32 },
    #[error("piece {id}: rotation {value} is not finite")]
    PieceRotationNotFinite { id: u32, value: f32 },
}

fn pct_in_range(value: f32) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

impl Level {
    /// An empty level is valid; it simply has no targets or pieces.
    pub fn validate(&self) -> Result<(), LevelError> {
        let mut seen = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            if seen.contains(&target.id) {
                return Err(LevelError::DuplicateTargetId(target.id));
            }
            seen.push(target.id);
            if !pct_in_range(target.x_pct) {
                return Err(LevelError::TargetPercentOutOfRange {
                    id: target.id,
                    axis: 'x',
                    value: target.x_pct,
                });
            }
            if !pct_in_range(target.y_pct) {
                return Err(LevelError::TargetPercentOutOfRange {
                    id: target.id,
                    axis: 'y',
                    value: target.y_pct,
                });
            }
            if !target.rotation_deg.is_finite() {
                return Err(LevelError::TargetRotationNotFinite {
                    id: target.id,
                    value: target.rotation_deg,
                });
            }
        }
        let mut seen = Vec::with_capacity(self.pieces.len());
        for piece in &self.pieces {
            if seen.contains(&piece.id) {
                return Err(LevelError::DuplicatePieceId(piece.id));
            }
            seen.push(piece.id);
            if !pct_in_range(piece.x_pct) {
                return Err(LevelError::PiecePercentOutOfRange {
                    id: piece.id,
                    axis: 'x',
                    value: piece.x_pct,
                });
            }
            if !pct_in_range(piece.y_pct) {
                return Err(LevelError::PiecePercentOutOfRange {
                    id: piece.id,
                    axis: 'y',
                    value: piece.y_pct,
                });
            }
            if !piece.rotation_deg.is_finite() {
                return Err(LevelError::PieceRotationNotFinite {
                    id: piece.id,
                    value: piece.rotation_deg,
                });
            }
        }
        Ok(())
    }
}

/// Gameplay snap thresholds. Setters clamp into the supported band rather
/// than reject.
#[derive(Debug, Clone, Copy, PartialEq, Archive, Serialize, Deserialize)]
pub struct SnapRules {
    pub position_threshold: f32,
    pub rotation_threshold_deg: f32,
}

impl SnapRules {
    pub fn clamped(self) -> Self {
        Self {
            position_threshold: self
                .position_threshold
                .clamp(SNAP_DISTANCE_MIN, SNAP_DISTANCE_MAX),
            rotation_threshold_deg: self
                .rotation_threshold_deg
                .clamp(ROTATION_TOLERANCE_MIN_DEG, ROTATION_TOLERANCE_MAX_DEG),
        }
    }
}

impl Default for SnapRules {
    fn default() -> Self {
        Self {
            position_threshold: SNAP_DISTANCE_DEFAULT,
            rotation_threshold_deg: ROTATION_TOLERANCE_DEFAULT_DEG,
        }
    }
}

/// Authoring-mode assisted placement settings; supplied by the host, not
/// owned by any entity.
#[derive(Debug, Clone, Copy, PartialEq, Archive, Serialize, Deserialize)]
pub struct MagnetismConfig {
    pub enabled: bool,
    pub snap_distance: f32,
    pub angle_snap_tolerance_deg: f32,
    pub corner_snap: bool,
    pub edge_snap: bool,
    pub angle_align: bool,
    pub prevent_overlap: bool,
    pub show_indicators: bool,
}

impl MagnetismConfig {
    pub fn clamped(self) -> Self {
        Self {
            snap_distance: self
                .snap_distance
                .clamp(MAGNET_DISTANCE_MIN, MAGNET_DISTANCE_MAX),
            angle_snap_tolerance_deg: self.angle_snap_tolerance_deg.clamp(
                MAGNET_ANGLE_TOLERANCE_MIN_DEG,
                MAGNET_ANGLE_TOLERANCE_MAX_DEG,
            ),
            ..self
        }
    }
}

impl Default for MagnetismConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            snap_distance: MAGNET_DISTANCE_DEFAULT,
            angle_snap_tolerance_deg: MAGNET_ANGLE_TOLERANCE_DEFAULT_DEG,
            corner_snap: true,
            edge_snap: true,
            angle_align: true,
            prevent_overlap: true,
            show_indicators: true,
        }
    }
}

/// Versioned wrapper the codec works on, so stored levels can evolve.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub version: u32,
    pub level: Level,
}

impl LevelSnapshot {
    pub fn new(level: Level) -> Self {
        Self {
            version: LEVEL_SNAPSHOT_VERSION,
            level,
        }
    }
}
