use tracing::{debug, warn};

use crate::action::CoreAction;
use crate::canvas::CanvasSize;
use crate::event::CoreEvent;
use crate::game::{self, Transform, normalize_angle};
use crate::level::{Difficulty, Level, LevelError, MagnetismConfig, PieceRecord, SnapRules, TargetRecord};
use crate::magnet;
use crate::state::{GameState, Mode, Piece, Target};

/// Synchronous, single-threaded driver around `GameState`. Every action runs
/// to completion before the next is accepted; logical state (occupancy,
/// final transforms) commits at decision time, never deferred to animation.
pub struct Session {
    state: GameState,
    level: Option<Level>,
    events: Vec<CoreEvent>,
}

impl Session {
    pub fn new(canvas: CanvasSize, mode: Mode) -> Self {
        Self {
            state: GameState::new(canvas, mode),
            level: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        game::is_complete(&self.state.targets)
    }

    /// Drain queued core-to-host events.
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_snap_rules(&mut self, rules: SnapRules) {
        self.state.rules = rules.clamped();
    }

    pub fn set_magnetism(&mut self, config: MagnetismConfig) {
        self.state.magnetism = config.clamped();
    }

    /// Returns whether the action changed state. Benign no-ops (no active
    /// drag, nothing in range) return false without being errors.
    pub fn apply(&mut self, action: CoreAction) -> bool {
        match action {
            CoreAction::LoadLevel(level) => self.load_level(level).is_ok(),
            CoreAction::BeginDrag { piece_id } => self.begin_drag(piece_id),
            CoreAction::DragMove { piece_id, x, y } => self.drag_move(piece_id, x, y),
            CoreAction::DragEnd { piece_id } => self.drag_end(piece_id),
            CoreAction::Rotate { piece_id, delta_deg } => self.rotate(piece_id, delta_deg),
            CoreAction::SetMirror { piece_id, mirrored } => self.set_mirror(piece_id, mirrored),
            CoreAction::Reset => self.reset(),
        }
    }

    pub fn load_level(&mut self, level: Level) -> Result<(), LevelError> {
        if let Err(err) = level.validate() {
            warn!(%err, "rejecting invalid level");
            return Err(err);
        }
        self.instantiate(&level);
        self.state.level_id = level.id.clone();
        self.level = Some(level);
        Ok(())
    }

    fn instantiate(&mut self, level: &Level) {
        let canvas = self.state.canvas;
        self.state.pieces = level
            .pieces
            .iter()
            .map(|record| {
                let (x, y) = canvas.to_canvas(record.x_pct, record.y_pct);
                Piece {
                    id: record.id,
                    kind: record.kind,
                    transform: Transform::new(x, y, record.rotation_deg, false),
                    bound_target: None,
                }
            })
            .collect();
        self.state.targets = level
            .targets
            .iter()
            .map(|record| {
                let (x, y) = canvas.to_canvas(record.x_pct, record.y_pct);
                Target {
                    id: record.id,
                    kind: record.kind,
                    transform: Transform::new(x, y, record.rotation_deg, record.mirrored),
                    occupied: false,
                    bound_piece: None,
                }
            })
            .collect();
        self.state.drag = None;
        self.state.solved = game::is_complete(&self.state.targets);
    }

    fn begin_drag(&mut self, piece_id: u32) -> bool {
        let Some(index) = self.state.piece_index(piece_id) else {
            debug_assert!(false, "begin_drag: unknown piece {piece_id}");
            warn!(piece_id, "begin_drag on unknown piece");
            return false;
        };
        // Occupied -> Free happens here, before any new position applies.
        if let Some(target_id) = self.state.pieces[index].bound_target.take() {
            if let Some(target_index) = self.state.target_index(target_id) {
                let target = &mut self.state.targets[target_index];
                target.occupied = false;
                target.bound_piece = None;
            }
            self.state.solved = false;
            debug!(piece_id, target_id, "unsnapped on redrag");
            self.events.push(CoreEvent::Unsnapped { piece_id, target_id });
        }
        self.state.drag = Some(piece_id);
        true
    }

    fn drag_move(&mut self, piece_id: u32, x: f32, y: f32) -> bool {
        if self.state.drag != Some(piece_id) {
            return false;
        }
        let Some(index) = self.state.piece_index(piece_id) else {
            debug_assert!(false, "drag_move: unknown piece {piece_id}");
            return false;
        };
        match self.state.mode {
            Mode::Play => {
                let piece = &mut self.state.pieces[index];
                piece.transform.x = x;
                piece.transform.y = y;
            }
            Mode::Author => {
                let outcome = magnet::evaluate_move(index, (x, y), &self.state);
                let piece = &mut self.state.pieces[index];
                piece.transform.x = outcome.position.0;
                piece.transform.y = outcome.position.1;
                piece.transform.rotation_deg = outcome.rotation_deg;
                if let Some(feature) = outcome.committed {
                    debug!(piece_id, ?feature, "magnetism committed");
                }
                self.events.push(CoreEvent::PieceMoved {
                    piece_id,
                    x: outcome.position.0,
                    y: outcome.position.1,
                    rotation_deg: outcome.rotation_deg,
                });
                if !outcome.hints.is_empty() {
                    self.events.push(CoreEvent::MagnetIndicators {
                        hints: outcome.hints,
                    });
                }
            }
        }
        true
    }

    fn drag_end(&mut self, piece_id: u32) -> bool {
        if self.state.drag != Some(piece_id) {
            return false;
        }
        self.state.drag = None;
        let Some(index) = self.state.piece_index(piece_id) else {
            debug_assert!(false, "drag_end: unknown piece {piece_id}");
            return false;
        };
        if self.state.mode == Mode::Author {
            return true;
        }

        let piece = &self.state.pieces[index];
        let matched = game::find_snap_target(
            piece.kind,
            piece.transform.position(),
            piece.transform.rotation_deg,
            &self.state.targets,
            self.state.rules.position_threshold,
            self.state.rules.rotation_threshold_deg,
        );
        // No match: the piece stays exactly where it was dropped.
        let Some(target_index) = matched else {
            return true;
        };

        let target_id;
        {
            let target = &mut self.state.targets[target_index];
            target.occupied = true;
            target.bound_piece = Some(piece_id);
            target_id = target.id;
        }
        let target_transform = self.state.targets[target_index].transform;
        let piece = &mut self.state.pieces[index];
        // Discrete snap to the exact target pose; easing is presentation.
        // The mirror flag rides along: pieces load unmirrored and the flip
        // gesture is authoring-only, so this is the only way a mirrored
        // parallelogram target gets filled in play.
        piece.transform.x = target_transform.x;
        piece.transform.y = target_transform.y;
        piece.transform.rotation_deg = target_transform.rotation_deg;
        piece.transform.mirrored = target_transform.mirrored;
        piece.bound_target = Some(target_id);
        debug!(piece_id, target_id, "snapped");
        self.events.push(CoreEvent::Snapped { piece_id, target_id });

        let was_solved = self.state.solved;
        self.state.solved = game::is_complete(&self.state.targets);
        if self.state.solved && !was_solved {
            self.events.push(CoreEvent::Completed);
        }
        true
    }

    fn rotate(&mut self, piece_id: u32, delta_deg: f32) -> bool {
        let Some(index) = self.state.piece_index(piece_id) else {
            debug_assert!(false, "rotate: unknown piece {piece_id}");
            warn!(piece_id, "rotate on unknown piece");
            return false;
        };
        let piece = &mut self.state.pieces[index];
        piece.transform.rotation_deg = normalize_angle(piece.transform.rotation_deg + delta_deg);
        if self.state.mode == Mode::Author {
            let transform = self.state.pieces[index].transform;
            self.events.push(CoreEvent::PieceMoved {
                piece_id,
                x: transform.x,
                y: transform.y,
                rotation_deg: transform.rotation_deg,
            });
        }
        true
    }

    fn set_mirror(&mut self, piece_id: u32, mirrored: bool) -> bool {
        if self.state.mode != Mode::Author {
            return false;
        }
        let Some(index) = self.state.piece_index(piece_id) else {
            debug_assert!(false, "set_mirror: unknown piece {piece_id}");
            warn!(piece_id, "set_mirror on unknown piece");
            return false;
        };
        let piece = &mut self.state.pieces[index];
        // The flag only carries meaning for the chiral parallelogram.
        if !piece.kind.is_chiral() {
            return false;
        }
        if piece.transform.mirrored == mirrored {
            return false;
        }
        piece.transform.mirrored = mirrored;
        let transform = piece.transform;
        self.events.push(CoreEvent::PieceMoved {
            piece_id,
            x: transform.x,
            y: transform.y,
            rotation_deg: transform.rotation_deg,
        });
        true
    }

    fn reset(&mut self) -> bool {
        let Some(level) = self.level.clone() else {
            self.state.pieces.clear();
            self.state.targets.clear();
            self.state.drag = None;
            self.state.solved = false;
            return true;
        };
        self.instantiate(&level);
        true
    }

    /// Authoring output: a new level built from the current piece poses,
    /// converted back to percentage coordinates.
    pub fn capture_level(&self, id: &str, name: &str, difficulty: Difficulty) -> Level {
        let canvas = self.state.canvas;
        let pieces = self
            .state
            .pieces
            .iter()
            .map(|piece| {
                let (x_pct, y_pct) = canvas.to_percent(piece.transform.position());
                PieceRecord {
                    id: piece.id,
                    kind: piece.kind,
                    x_pct,
                    y_pct,
                    rotation_deg: normalize_angle(piece.transform.rotation_deg),
                    color_tag: String::new(),
                }
            })
            .collect();
        let targets = self
            .state
            .targets
            .iter()
            .map(|target| {
                let (x_pct, y_pct) = canvas.to_percent(target.transform.position());
                TargetRecord {
                    id: target.id,
                    kind: target.kind,
                    x_pct,
                    y_pct,
                    rotation_deg: normalize_angle(target.transform.rotation_deg),
                    mirrored: target.transform.mirrored,
                }
            })
            .collect();
        Level {
            id: id.to_string(),
            name: name.to_string(),
            difficulty,
            targets,
            pieces,
        }
    }

    /// Deterministic reshuffle of every unbound piece.
    pub fn scatter(&mut self, seed: u32) {
        let positions = game::scatter_positions(
            seed,
            self.state.pieces.len(),
            self.state.canvas.width,
            self.state.canvas.height,
        );
        for (piece, position) in self.state.pieces.iter_mut().zip(positions) {
            if piece.bound_target.is_some() {
                continue;
            }
            piece.transform.x = position.0;
            piece.transform.y = position.1;
        }
    }
}
