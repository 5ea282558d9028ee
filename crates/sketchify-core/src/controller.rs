//! Pointer-driven interaction state machine.
//!
//! The [`Controller`] turns raw pointer events into edits on a [`Canvas`]. Each
//! gesture (down, moves, up) runs inside exactly one [`GestureState`]; the state
//! also carries everything the renderer needs to draw live previews.

use crate::canvas::Canvas;
use crate::geometry::DragRect;
use crate::input::PointerEvent;
use crate::shapes::{Shape, ShapeKind};
use crate::tools::ToolKind;
use kurbo::Point;

/// What the active gesture is doing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No button held.
    #[default]
    Idle,
    /// Brush stroke in progress.
    FreehandDrawing {
        /// Points captured so far, seeded with the press position.
        points: Vec<Point>,
    },
    /// Parametric shape being dragged out.
    ShapeDrawing {
        kind: ShapeKind,
        /// Press position.
        start: Point,
        /// Latest pointer position; the preview's far point.
        current: Point,
    },
    /// Eraser held down.
    Erasing {
        /// Where the most recent erase that removed something happened.
        last_hit: Option<Point>,
    },
    /// Rubber-band selection.
    RectSelecting { drag: DragRect },
    /// Dragging the current selection.
    MovingSelection {
        /// Pointer position the last translation was measured from.
        anchor: Point,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::FreehandDrawing { .. } => "freehand",
            GestureState::ShapeDrawing { .. } => "shape",
            GestureState::Erasing { .. } => "erasing",
            GestureState::RectSelecting { .. } => "rect-select",
            GestureState::MovingSelection { .. } => "moving",
        }
    }
}

/// What an event changed, so the host knows how much to refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum EventOutcome {
    /// Nothing visible changed.
    #[default]
    Ignored,
    /// Only previews or positions changed; redraw.
    Redraw,
    /// The scene or its history changed; redraw and refresh the status.
    Committed,
}

impl EventOutcome {
    /// The stronger of two outcomes.
    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        self.max(other)
    }

    pub fn needs_redraw(self) -> bool {
        self != EventOutcome::Ignored
    }
}

/// Routes pointer events to the current tool.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: GestureState,
    last_position: Option<Point>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Last pointer position seen, if any.
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Dispatch a pointer event.
    pub fn handle_event(&mut self, canvas: &mut Canvas, event: PointerEvent) -> EventOutcome {
        match event {
            PointerEvent::Down { position, .. } => self.pointer_down(canvas, position),
            PointerEvent::Move { position } => self.pointer_move(canvas, position),
            PointerEvent::Up { position, .. } => self.pointer_up(canvas, position),
        }
    }

    /// Start a gesture with the current tool.
    ///
    /// A press that arrives while another gesture is still active (a lost
    /// release) first finishes that gesture at the last known position.
    pub fn pointer_down(&mut self, canvas: &mut Canvas, position: Point) -> EventOutcome {
        let finished = self.finalize(canvas);
        self.last_position = Some(position);

        let (state, started) = match canvas.current_tool() {
            ToolKind::Select => {
                if canvas.selection.hit_test(&canvas.scene, position) {
                    (GestureState::MovingSelection { anchor: position }, EventOutcome::Redraw)
                } else {
                    let drag = DragRect::new(position);
                    (GestureState::RectSelecting { drag }, EventOutcome::Redraw)
                }
            }
            ToolKind::Eraser => {
                let removed = canvas.erase_at(position);
                let last_hit = (removed > 0).then_some(position);
                let outcome = if removed > 0 {
                    EventOutcome::Committed
                } else {
                    EventOutcome::Redraw
                };
                (GestureState::Erasing { last_hit }, outcome)
            }
            tool => {
                let had_redo = canvas.scene.can_redo();
                canvas.scene.clear_redo();
                let state = match tool.shape_kind() {
                    Some(kind) => GestureState::ShapeDrawing {
                        kind,
                        start: position,
                        current: position,
                    },
                    None => GestureState::FreehandDrawing {
                        points: vec![position],
                    },
                };
                let outcome = if had_redo {
                    EventOutcome::Committed
                } else {
                    EventOutcome::Redraw
                };
                (state, outcome)
            }
        };

        log::trace!("pointer down at {:?}: {}", position, state.name());
        self.state = state;
        finished.merge(started)
    }

    /// Advance the active gesture. Ignored while idle.
    pub fn pointer_move(&mut self, canvas: &mut Canvas, position: Point) -> EventOutcome {
        self.last_position = Some(position);
        match &mut self.state {
            GestureState::Idle => EventOutcome::Ignored,
            GestureState::FreehandDrawing { points } => {
                points.push(position);
                EventOutcome::Redraw
            }
            GestureState::ShapeDrawing { current, .. } => {
                *current = position;
                EventOutcome::Redraw
            }
            GestureState::Erasing { last_hit } => {
                if canvas.erase_at(position) > 0 {
                    *last_hit = Some(position);
                    EventOutcome::Committed
                } else {
                    EventOutcome::Ignored
                }
            }
            GestureState::RectSelecting { drag } => {
                drag.resize_to(position);
                EventOutcome::Redraw
            }
            GestureState::MovingSelection { anchor } => {
                let delta = position - *anchor;
                canvas.selection.move_by(&mut canvas.scene, delta);
                *anchor = position;
                EventOutcome::Redraw
            }
        }
    }

    /// Finish the active gesture at `position` and return to idle. Ignored while idle.
    pub fn pointer_up(&mut self, canvas: &mut Canvas, position: Point) -> EventOutcome {
        self.last_position = Some(position);
        match std::mem::take(&mut self.state) {
            GestureState::Idle => EventOutcome::Ignored,
            GestureState::FreehandDrawing { points } => {
                if canvas.commit_freehand(points) {
                    EventOutcome::Committed
                } else {
                    EventOutcome::Redraw
                }
            }
            GestureState::ShapeDrawing { kind, start, .. } => {
                let shape = Shape::create(
                    kind,
                    start,
                    position,
                    canvas.tools.style.clone(),
                    canvas.tools.polygon_sides(),
                );
                canvas.commit(shape);
                EventOutcome::Committed
            }
            GestureState::Erasing { .. } => EventOutcome::Redraw,
            GestureState::RectSelecting { mut drag } => {
                drag.resize_to(position);
                canvas.select_within(&drag);
                log::debug!("selected {} shape(s)", canvas.selection.len());
                EventOutcome::Redraw
            }
            GestureState::MovingSelection { .. } => EventOutcome::Redraw,
        }
    }

    /// Switch tools. An unfinished gesture is completed first, as if the
    /// pointer had been released where it last was.
    pub fn set_tool(&mut self, canvas: &mut Canvas, tool: ToolKind) -> EventOutcome {
        let outcome = self.finalize(canvas);
        if canvas.tools.current_tool != tool {
            log::debug!("tool {} -> {}", canvas.tools.current_tool, tool);
            canvas.tools.current_tool = tool;
        }
        outcome
    }

    fn finalize(&mut self, canvas: &mut Canvas) -> EventOutcome {
        if self.state.is_idle() {
            return EventOutcome::Ignored;
        }
        match self.last_position {
            Some(position) => self.pointer_up(canvas, position),
            None => {
                self.state = GestureState::Idle;
                EventOutcome::Redraw
            }
        }
    }
}
