//! Dead-zone viewport scrolling.
//!
//! The view only moves when the actor crosses one of the four margins, and
//! then by exactly the amount needed to restore that margin.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::math::{Aabb, Vec2};

/// Scroll offsets of the visible window, in whole world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub left: i32,
    pub bottom: i32,
}

impl Viewport {
    pub const ORIGIN: Self = Self { left: 0, bottom: 0 };

    pub fn new(left: i32, bottom: i32) -> Self {
        Self { left, bottom }
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.left as f32, self.bottom as f32)
    }

    /// Visible world rectangle for a screen of the given size.
    pub fn visible_rect(&self, screen_width: f32, screen_height: f32) -> Aabb {
        let left = self.left as f32;
        let bottom = self.bottom as f32;
        Aabb::from_edges(left, bottom, left + screen_width, bottom + screen_height)
    }

    /// Orthographic projection mapping the visible window to clip space (y up).
    pub fn view_projection(&self, screen_width: f32, screen_height: f32) -> Mat4 {
        let projection = Mat4::orthographic_rh_gl(0.0, screen_width, 0.0, screen_height, -1.0, 1.0);
        let translation = Mat4::from_translation(Vec3::new(-(self.left as f32), -(self.bottom as f32), 0.0));
        projection * translation
    }

    /// Converts screen coordinates (origin bottom-left) to world coordinates.
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos + self.offset()
    }

    /// Converts world coordinates to screen coordinates (origin bottom-left).
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos - self.offset()
    }
}

/// Recomputes the viewport from the actor's box each frame.
///
/// By default offsets are clamped at the level origin, so a reset view stays at
/// (0, 0) while the actor stands at its spawn point. Plain margin scrolling
/// would drag the view left of the origin there (about -200 with the default
/// margins); set [`CameraConfig::clamp_to_origin`] to `false` for that.
#[derive(Clone, Copy, Debug)]
pub struct ViewportScroller {
    config: CameraConfig,
}

impl ViewportScroller {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Scroll `view` just enough to keep `actor` inside the margin box.
    ///
    /// All four margins are evaluated in floating point; the result is truncated once at the end.
    pub fn scroll(&self, view: Viewport, actor: &Aabb) -> Viewport {
        let c = &self.config;
        let mut left = view.left as f32;
        let mut bottom = view.bottom as f32;

        let left_boundary = left + c.margin_left;
        if actor.left() < left_boundary {
            left -= left_boundary - actor.left();
        }

        let right_boundary = left + c.screen_width - c.margin_right;
        if actor.right() > right_boundary {
            left += actor.right() - right_boundary;
        }

        let top_boundary = bottom + c.screen_height - c.margin_top;
        if actor.top() > top_boundary {
            bottom += actor.top() - top_boundary;
        }

        let bottom_boundary = bottom + c.margin_bottom;
        if actor.bottom() < bottom_boundary {
            bottom -= bottom_boundary - actor.bottom();
        }

        // Unclamped offsets may go negative near the level's left or bottom edge.
        if c.clamp_to_origin {
            left = left.max(0.0);
            bottom = bottom.max(0.0);
        }

        Viewport {
            left: left as i32,
            bottom: bottom as i32,
        }
    }

    /// True when `actor` lies strictly inside the margin box of `view`.
    pub fn in_dead_zone(&self, view: Viewport, actor: &Aabb) -> bool {
        let c = &self.config;
        let left = view.left as f32;
        let bottom = view.bottom as f32;
        actor.left() > left + c.margin_left
            && actor.right() < left + c.screen_width - c.margin_right
            && actor.bottom() > bottom + c.margin_bottom
            && actor.top() < bottom + c.screen_height - c.margin_top
    }
}
