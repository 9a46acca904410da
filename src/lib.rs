//! Flappy Kiro - A side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, particles, session)
//! - `clock`: Fixed-step tick driver
//! - `renderer`: Read-only frame snapshots and CPU tessellation
//! - `highscores`: Best-score persistence collaborators
//! - `persistence`: Versioned JSON save files
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `platform`: Input mapping

pub mod clock;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use clock::FixedStepClock;
pub use highscores::{HighScoreStore, MemoryStore};
pub use settings::{QualityPreset, Settings};
pub use tuning::{PoolCapacities, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults (x never changes during a session)
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.3;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_POWER: f32 = -6.0;
    /// Tilt = velocity * factor, clamped to ±MAX_TILT radians
    pub const TILT_FACTOR: f32 = 0.05;
    pub const MAX_TILT: f32 = 0.5;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 1.5;
    pub const OBSTACLE_SPAWN_RATE: u64 = 180;
    pub const OBSTACLE_GAP: f32 = 150.0;
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    /// Minimum pipe length above and below the gap
    pub const OBSTACLE_MARGIN: f32 = 50.0;

    /// Chance per Playing tick of dropping a trail particle
    pub const TRAIL_CHANCE: f32 = 0.7;

    /// Particle pool capacities
    pub const MAX_TRAIL_PARTICLES: usize = 100;
    pub const MAX_EXPLOSION_PARTICLES: usize = 50;
    pub const MAX_SPARKLE_PARTICLES: usize = 30;
    pub const MAX_CONFETTI_PARTICLES: usize = 100;
}

/// Colors as 0xRRGGBB (Kiro brand palette)
pub mod palette {
    pub const PURPLE: u32 = 0x790ECB;
    pub const PURPLE_LIGHT: u32 = 0x9D4EDB;
    pub const GOLD: u32 = 0xFFD700;
    pub const WHITE: u32 = 0xFFFFFF;
    pub const PINK: u32 = 0xFF6B9D;
    pub const TEAL: u32 = 0x4ECDC4;
    pub const BACKGROUND: u32 = 0x1A1A1A;
}
