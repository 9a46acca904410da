//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override it.
//! Validation happens once at load time; the simulation assumes a valid tuning.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence;

/// Invalid tuning values
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("gap {gap} plus margins {margin}x2 does not fit in field height {height}")]
    GapDoesNotFit { gap: f32, margin: f32, height: f32 },

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("player does not fit inside the field")]
    PlayerOutsideField,

    #[error("trail chance {0} is outside [0, 1]")]
    TrailChance(f32),

    #[error("failed to read tuning: {0}")]
    Load(#[from] persistence::PersistenceError),
}

/// Hard size limit per particle pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolCapacities {
    pub trail: usize,
    pub explosion: usize,
    pub sparkle: usize,
    pub confetti: usize,
}

impl Default for PoolCapacities {
    fn default() -> Self {
        Self {
            trail: MAX_TRAIL_PARTICLES,
            explosion: MAX_EXPLOSION_PARTICLES,
            sparkle: MAX_SPARKLE_PARTICLES,
            confetti: MAX_CONFETTI_PARTICLES,
        }
    }
}

impl PoolCapacities {
    pub const NONE: Self = Self {
        trail: 0,
        explosion: 0,
        sparkle: 0,
        confetti: 0,
    };

    /// Scale every capacity, rounding down
    pub fn scaled(&self, factor: f32) -> Self {
        let scale = |n: usize| (n as f32 * factor.max(0.0)).floor() as usize;
        Self {
            trail: scale(self.trail),
            explosion: scale(self.explosion),
            sparkle: scale(self.sparkle),
            confetti: scale(self.confetti),
        }
    }
}

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_power: f32,

    pub obstacle_speed: f32,
    /// Ticks between obstacle spawns
    pub obstacle_spawn_rate: u64,
    pub obstacle_gap: f32,
    pub obstacle_width: f32,
    pub obstacle_margin: f32,

    pub trail_chance: f32,
    pub capacities: PoolCapacities,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            player_x: PLAYER_X,
            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_spawn_rate: OBSTACLE_SPAWN_RATE,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_margin: OBSTACLE_MARGIN,
            trail_chance: TRAIL_CHANCE,
            capacities: PoolCapacities::default(),
        }
    }
}

impl Tuning {
    /// Check the geometric preconditions the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_gap", self.obstacle_gap),
            ("obstacle_width", self.obstacle_width),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive(name));
            }
        }
        if self.obstacle_spawn_rate == 0 {
            return Err(TuningError::NotPositive("obstacle_spawn_rate"));
        }
        if self.obstacle_margin < 0.0
            || self.obstacle_gap + 2.0 * self.obstacle_margin >= self.field_height
        {
            return Err(TuningError::GapDoesNotFit {
                gap: self.obstacle_gap,
                margin: self.obstacle_margin,
                height: self.field_height,
            });
        }
        if self.player_x < 0.0
            || self.player_x + self.player_width > self.field_width
            || self.player_height > self.field_height
        {
            return Err(TuningError::PlayerOutsideField);
        }
        if !(0.0..=1.0).contains(&self.trail_chance) {
            return Err(TuningError::TrailChance(self.trail_chance));
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning document (missing keys keep defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(persistence::PersistenceError::from)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let tuning: Tuning = persistence::read_json(path)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Mid-field spawn height for the player's top edge
    pub fn player_start_y(&self) -> f32 {
        self.field_height / 2.0
    }
}
