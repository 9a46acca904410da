//! Cosmetic particle effects
//!
//! Four independent pools (trail, explosion, sparkle, confetti), each with a
//! hard capacity. Spawns past capacity are truncated to the remaining
//! headroom. Particles never affect gameplay.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use crate::palette;
use crate::tuning::PoolCapacities;

pub const TRAIL_LIFETIME: u32 = 30;
pub const EXPLOSION_LIFETIME: u32 = 60;
pub const SPARKLE_LIFETIME: u32 = 45;
pub const CONFETTI_LIFETIME: u32 = 180;

/// Trail particles start semi-transparent
pub const TRAIL_OPACITY: f32 = 0.6;

pub const EXPLOSION_GRAVITY: f32 = 0.2;
pub const CONFETTI_GRAVITY: f32 = 0.15;
/// Sparkle velocity multiplier per tick
pub const SPARKLE_DRAG: f32 = 0.95;
/// Sparkle twinkle phase advance per tick (radians)
pub const TWINKLE_SPEED: f32 = 0.3;

const EXPLOSION_COLORS: [u32; 3] = [palette::PURPLE, palette::PURPLE_LIGHT, palette::WHITE];
const SPARKLE_COLORS: [u32; 2] = [palette::GOLD, palette::WHITE];
const CONFETTI_COLORS: [u32; 6] = [
    palette::PURPLE,
    palette::PURPLE_LIGHT,
    palette::GOLD,
    palette::WHITE,
    palette::PINK,
    palette::TEAL,
];

/// Which pool a particle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolKind {
    Trail,
    Explosion,
    Sparkle,
    Confetti,
}

impl PoolKind {
    pub fn base_opacity(&self) -> f32 {
        match self {
            PoolKind::Trail => TRAIL_OPACITY,
            _ => 1.0,
        }
    }

    pub fn lifetime(&self) -> u32 {
        match self {
            PoolKind::Trail => TRAIL_LIFETIME,
            PoolKind::Explosion => EXPLOSION_LIFETIME,
            PoolKind::Sparkle => SPARKLE_LIFETIME,
            PoolKind::Confetti => CONFETTI_LIFETIME,
        }
    }
}

/// Per-tick physics for a particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleBehavior {
    /// Straight-line motion, no forces (trail)
    Drift,
    /// Falls under explosion gravity
    Explosion,
    /// Slows down and twinkles around `base_size`
    Sparkle { base_size: f32, phase: f32 },
    /// Falls under confetti gravity while spinning
    Confetti { rotation: f32, spin: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
    /// `life / max_life * base_opacity`
    pub opacity: f32,
    pub life: u32,
    pub max_life: u32,
    pub base_opacity: f32,
    pub behavior: ParticleBehavior,
}

impl Particle {
    pub fn new(
        kind: PoolKind,
        pos: Vec2,
        vel: Vec2,
        color: u32,
        size: f32,
        behavior: ParticleBehavior,
    ) -> Self {
        let max_life = kind.lifetime().max(1);
        Self {
            pos,
            vel,
            color,
            size,
            opacity: kind.base_opacity(),
            life: max_life,
            max_life,
            base_opacity: kind.base_opacity(),
            behavior,
        }
    }

    /// Rotation in radians (only confetti spins)
    pub fn rotation(&self) -> f32 {
        match self.behavior {
            ParticleBehavior::Confetti { rotation, .. } => rotation,
            _ => 0.0,
        }
    }

    /// Advance one tick. Returns false once the particle has expired.
    pub fn step(&mut self) -> bool {
        match &mut self.behavior {
            ParticleBehavior::Drift => {}
            ParticleBehavior::Explosion => self.vel.y += EXPLOSION_GRAVITY,
            ParticleBehavior::Sparkle { base_size, phase } => {
                self.vel *= SPARKLE_DRAG;
                *phase += TWINKLE_SPEED;
                self.size = *base_size * (0.75 + 0.25 * phase.sin());
            }
            ParticleBehavior::Confetti { rotation, spin } => {
                self.vel.y += CONFETTI_GRAVITY;
                *rotation += *spin;
            }
        }
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.opacity = self.life as f32 / self.max_life as f32 * self.base_opacity;
        self.life > 0
    }

    /// Safe to hand to a renderer (no NaN/inf leaked from bad inputs)
    pub fn is_drawable(&self) -> bool {
        self.pos.is_finite()
            && self.size.is_finite()
            && self.opacity.is_finite()
            && self.rotation().is_finite()
    }
}

/// A capacity-bounded collection of particles sharing one behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlePool {
    kind: PoolKind,
    capacity: usize,
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new(kind: PoolKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            particles: Vec::with_capacity(capacity),
        }
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn headroom(&self) -> usize {
        self.capacity.saturating_sub(self.particles.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Change the capacity, dropping the oldest particles if now over it
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.particles.len() > capacity {
            let excess = self.particles.len() - capacity;
            self.particles.drain(..excess);
        }
    }

    /// Spawn up to `requested` particles; returns how many fit
    pub fn spawn_with(&mut self, requested: usize, mut make: impl FnMut() -> Particle) -> usize {
        let count = requested.min(self.headroom());
        self.particles.extend((0..count).map(|_| make()));
        count
    }

    pub fn update(&mut self) {
        self.particles.retain_mut(Particle::step);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Owns all four pools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleEngine {
    pub trail: ParticlePool,
    pub explosion: ParticlePool,
    pub sparkle: ParticlePool,
    pub confetti: ParticlePool,
    /// Confetti rains across this width
    field_width: f32,
}

impl ParticleEngine {
    pub fn new(capacities: PoolCapacities, field_width: f32) -> Self {
        Self {
            trail: ParticlePool::new(PoolKind::Trail, capacities.trail),
            explosion: ParticlePool::new(PoolKind::Explosion, capacities.explosion),
            sparkle: ParticlePool::new(PoolKind::Sparkle, capacities.sparkle),
            confetti: ParticlePool::new(PoolKind::Confetti, capacities.confetti),
            field_width,
        }
    }

    pub fn set_capacities(&mut self, capacities: PoolCapacities) {
        self.trail.set_capacity(capacities.trail);
        self.explosion.set_capacity(capacities.explosion);
        self.sparkle.set_capacity(capacities.sparkle);
        self.confetti.set_capacity(capacities.confetti);
    }

    pub fn pools(&self) -> [&ParticlePool; 4] {
        [&self.trail, &self.explosion, &self.sparkle, &self.confetti]
    }

    fn pools_mut(&mut self) -> [&mut ParticlePool; 4] {
        [
            &mut self.trail,
            &mut self.explosion,
            &mut self.sparkle,
            &mut self.confetti,
        ]
    }

    /// Total live particles across all pools
    pub fn len(&self) -> usize {
        self.pools().iter().map(|p| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every live particle, pool by pool
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.trail
            .iter()
            .chain(self.explosion.iter())
            .chain(self.sparkle.iter())
            .chain(self.confetti.iter())
    }

    /// Drop one semi-transparent particle near `center`
    pub fn spawn_trail(&mut self, center: Vec2, rng: &mut dyn RandomSource) -> usize {
        self.trail.spawn_with(1, || {
            let jitter = Vec2::new(rng.range(-5.0, 5.0), rng.range(-5.0, 5.0));
            let color = if rng.next_unit() < 0.5 {
                palette::PURPLE
            } else {
                palette::PURPLE_LIGHT
            };
            let size = rng.range(4.0, 8.0);
            Particle::new(
                PoolKind::Trail,
                center + jitter,
                Vec2::ZERO,
                color,
                size,
                ParticleBehavior::Drift,
            )
        })
    }

    /// Burst of 15–20 particles
    pub fn spawn_explosion(&mut self, at: Vec2, rng: &mut dyn RandomSource) -> usize {
        let count = rng.count(15, 20);
        self.emit_explosion(at, count, rng)
    }

    pub fn emit_explosion(&mut self, at: Vec2, count: usize, rng: &mut dyn RandomSource) -> usize {
        self.explosion.spawn_with(count, || {
            let vel = random_direction(rng) * rng.range(2.0, 5.0);
            let color = pick(&EXPLOSION_COLORS, rng);
            let size = rng.range(3.0, 8.0);
            Particle::new(
                PoolKind::Explosion,
                at,
                vel,
                color,
                size,
                ParticleBehavior::Explosion,
            )
        })
    }

    /// Twinkling burst of 8–12 particles
    pub fn spawn_sparkles(&mut self, at: Vec2, rng: &mut dyn RandomSource) -> usize {
        let count = rng.count(8, 12);
        self.emit_sparkles(at, count, rng)
    }

    pub fn emit_sparkles(&mut self, at: Vec2, count: usize, rng: &mut dyn RandomSource) -> usize {
        self.sparkle.spawn_with(count, || {
            let vel = random_direction(rng) * rng.range(1.0, 3.0);
            let color = pick(&SPARKLE_COLORS, rng);
            let base_size = rng.range(2.0, 5.0);
            let phase = rng.range(0.0, TAU);
            Particle::new(
                PoolKind::Sparkle,
                at,
                vel,
                color,
                base_size,
                ParticleBehavior::Sparkle { base_size, phase },
            )
        })
    }

    /// Rain of 30–40 pieces across the field width
    pub fn spawn_confetti(&mut self, rng: &mut dyn RandomSource) -> usize {
        let count = rng.count(30, 40);
        self.emit_confetti(count, rng)
    }

    pub fn emit_confetti(&mut self, count: usize, rng: &mut dyn RandomSource) -> usize {
        let width = self.field_width;
        self.confetti.spawn_with(count, || {
            let pos = Vec2::new(rng.range(0.0, width), rng.range(-50.0, -10.0));
            let vel = Vec2::new(rng.range(-1.0, 1.0), rng.range(2.0, 4.0));
            let color = pick(&CONFETTI_COLORS, rng);
            let size = rng.range(6.0, 10.0);
            let rotation = rng.range(0.0, TAU);
            let spin = rng.range(-0.1, 0.1);
            Particle::new(
                PoolKind::Confetti,
                pos,
                vel,
                color,
                size,
                ParticleBehavior::Confetti { rotation, spin },
            )
        })
    }

    /// Advance and expire every particle in every pool
    pub fn update(&mut self) {
        for pool in self.pools_mut() {
            pool.update();
        }
    }

    pub fn clear(&mut self) {
        for pool in self.pools_mut() {
            pool.clear();
        }
    }
}

fn random_direction(rng: &mut dyn RandomSource) -> Vec2 {
    Vec2::from_angle(rng.range(0.0, TAU))
}

fn pick(colors: &[u32], rng: &mut dyn RandomSource) -> u32 {
    let idx = (rng.next_unit() * colors.len() as f32) as usize;
    colors[idx.min(colors.len() - 1)]
}
