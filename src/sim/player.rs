//! The controlled character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TILT, TILT_FACTOR};
use crate::tuning::Tuning;

/// Player kinematics. `pos` is the top-left corner of the hitbox; `pos.x`
/// never changes during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub pos: Vec2,
    /// Vertical velocity (units/tick, positive is down)
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayerBody {
    /// Player at mid-field, at rest
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.player_start_y()),
            velocity: 0.0,
            width: tuning.player_width,
            height: tuning.player_height,
        }
    }

    /// velocity += gravity, then y += velocity (no terminal velocity)
    pub fn apply_gravity_step(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
    }

    /// Replace the current velocity with the jump impulse
    pub fn jump(&mut self, jump_power: f32) {
        self.velocity = jump_power;
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) * 0.5
    }

    /// Cosmetic nose-up/nose-down angle in radians
    pub fn tilt(&self) -> f32 {
        (self.velocity * TILT_FACTOR).clamp(-MAX_TILT, MAX_TILT)
    }
}
