//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (obstacles oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod particles;
pub mod player;
pub mod random;
pub mod state;
pub mod tick;

pub use collision::{Contact, ContactKind};
pub use obstacle::{Obstacle, ObstacleField, ScoringEvent};
pub use particles::{Particle, ParticleBehavior, ParticleEngine, ParticlePool, PoolKind};
pub use player::PlayerBody;
pub use random::{RandomSource, SequenceSource, seeded};
pub use state::{GameEvent, GamePhase, GameSession};
pub use tick::{TickInput, tick, update};
