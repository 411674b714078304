//! Follow-camera state machine and click/drag discrimination.

use glam::{Vec2, Vec3};
use orrery_engine::EngineContext;

use crate::builder::{Pick, SystemGraph};

/// Which planet, if any, the camera is locked onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Follow {
    #[default]
    Unselected,
    Following(usize),
}

/// Tells a click apart from the tail end of a drag.
///
/// The browser sends `click` after `mouseup`, so the drag flag survives
/// `pointer_up` and is only cleared by the click itself or the next press.
#[derive(Debug, Clone, PartialEq)]
pub struct DragTracker {
    threshold: f32,
    down_ndc: Option<Vec2>,
    last_ndc: Option<Vec2>,
    pressed: bool,
    dragging: bool,
}

impl DragTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            down_ndc: None,
            last_ndc: None,
            pressed: false,
            dragging: false,
        }
    }

    pub fn pointer_down(&mut self, ndc: Vec2) {
        self.down_ndc = Some(ndc);
        self.last_ndc = Some(ndc);
        self.pressed = true;
        self.dragging = false;
    }

    /// Returns the pointer delta while the button is held (for orbiting).
    pub fn pointer_move(&mut self, ndc: Vec2) -> Option<Vec2> {
        if let Some(down) = self.down_ndc {
            if down.distance(ndc) > self.threshold {
                self.dragging = true;
            }
        }
        if !self.pressed {
            return None;
        }
        let delta = self.last_ndc.map(|last| ndc - last);
        self.last_ndc = Some(ndc);
        delta
    }

    pub fn pointer_up(&mut self) {
        self.pressed = false;
    }

    /// Consume the drag flag for a click; `true` means the click is real.
    pub fn take_click(&mut self) -> bool {
        let was_drag = self.dragging;
        self.dragging = false;
        !was_drag
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Result of evaluating one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click ended a drag.
    Ignored,
    /// Nothing clickable under the pointer.
    Missed,
    /// A body was hit; `follow` is the new state.
    Selected { pick: Pick, follow: Follow },
}

pub struct SelectionController {
    pub follow: Follow,
    pub drag: DragTracker,
}

impl SelectionController {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            follow: Follow::Unselected,
            drag: DragTracker::new(drag_threshold),
        }
    }

    /// State transition for a hit. Clicking the followed planet again
    /// releases it; a moon selects its parent.
    pub fn select(&mut self, pick: Pick) -> Follow {
        self.follow = match (pick, self.follow) {
            (Pick::Planet(p), Follow::Following(current)) if p == current => Follow::Unselected,
            (Pick::Planet(p), _) => Follow::Following(p),
            (Pick::Moon { planet, .. }, _) => Follow::Following(planet),
        };
        self.follow
    }

    /// Evaluate a click at `ndc` against the clickable bodies.
    pub fn click(&mut self, ndc: Vec2, graph: &SystemGraph, ctx: &mut EngineContext, slack: f32) -> ClickOutcome {
        if !self.drag.take_click() {
            log::debug!("click ignored: drag");
            return ClickOutcome::Ignored;
        }

        let ray = ctx.camera.ray_from_ndc(ndc);
        let candidates = graph.clickable_entities();
        let Some(hit) = orrery_engine::pick(&ctx.scene, &graph.transforms, &ray, &candidates, true, slack) else {
            return ClickOutcome::Missed;
        };
        let Some(pick) = graph.pick_for(hit.entity) else {
            return ClickOutcome::Missed;
        };

        let follow = self.select(pick);
        ctx.controls.target = match follow {
            Follow::Unselected => Vec3::ZERO,
            Follow::Following(planet) => graph
                .planet(planet)
                .and_then(|p| ctx.scene.position(p.entity))
                .unwrap_or(Vec3::ZERO),
        };
        log::debug!("selection: {:?} -> {:?}", pick, follow);
        ClickOutcome::Selected { pick, follow }
    }

    /// Drop any selection (the "reset view" action).
    pub fn reset(&mut self) {
        self.follow = Follow::Unselected;
    }
}

/// Camera offset from a followed body of display radius `radius`.
pub fn follow_offset(radius: f32) -> Vec3 {
    Vec3::new(0.0, radius * 2.0, radius * 5.0)
}

/// Keep the camera locked onto the followed planet. Run after kinematics.
pub fn track(follow: Follow, graph: &SystemGraph, ctx: &mut EngineContext) {
    let Follow::Following(index) = follow else {
        return;
    };
    let Some(planet) = graph.planet(index) else {
        return;
    };
    let Some(pos) = ctx.scene.position(planet.entity) else {
        return;
    };
    ctx.controls.target = pos;
    ctx.camera.position = pos + follow_offset(planet.radius);
}
