//! Gapped obstacles scrolling right to left

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use crate::tuning::Tuning;

/// A top/bottom pipe pair with a fixed-height gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Bottom of the top pipe (top of the gap)
    pub top_height: f32,
    gap: f32,
    /// Latched once the player has passed it
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, top_height: f32, gap: f32) -> Self {
        Self {
            x,
            top_height,
            gap,
            scored: false,
        }
    }

    /// Top of the bottom pipe; always `top_height + gap`
    pub fn bottom_y(&self) -> f32 {
        self.top_height + self.gap
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    pub fn gap_center(&self, width: f32) -> Vec2 {
        Vec2::new(self.x + width / 2.0, self.top_height + self.gap / 2.0)
    }
}

/// Emitted when the player clears an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringEvent {
    pub gap_center: Vec2,
}

/// Ordered obstacles, oldest (leftmost) first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    pub width: f32,
    pub gap: f32,
    pub margin: f32,
    pub spawn_x: f32,
    pub field_height: f32,
    pub spawn_rate: u64,
}

impl ObstacleField {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: Vec::new(),
            width: tuning.obstacle_width,
            gap: tuning.obstacle_gap,
            margin: tuning.obstacle_margin,
            spawn_x: tuning.field_width,
            field_height: tuning.field_height,
            spawn_rate: tuning.obstacle_spawn_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Legal range for `top_height`: `[margin, height - gap - margin)`
    pub fn top_height_range(&self) -> (f32, f32) {
        (self.margin, self.field_height - self.gap - self.margin)
    }

    /// Append an obstacle at the right edge every `spawn_rate` ticks
    pub fn maybe_spawn(&mut self, tick: u64, rng: &mut dyn RandomSource) -> bool {
        if tick == 0 || !tick.is_multiple_of(self.spawn_rate) {
            return false;
        }
        self.spawn(rng);
        true
    }

    /// Append an obstacle with a uniformly placed gap
    pub fn spawn(&mut self, rng: &mut dyn RandomSource) {
        let (min, max) = self.top_height_range();
        let top_height = rng.range(min, max);
        self.obstacles
            .push(Obstacle::new(self.spawn_x, top_height, self.gap));
    }

    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Mark and report obstacles whose right edge is now left of `player_x`
    pub fn collect_scoring_events(&mut self, player_x: f32) -> Vec<ScoringEvent> {
        let width = self.width;
        self.obstacles
            .iter_mut()
            .filter(|o| !o.scored && o.right(width) < player_x)
            .map(|o| {
                o.scored = true;
                ScoringEvent {
                    gap_center: o.gap_center(width),
                }
            })
            .collect()
    }

    /// Drop obstacles fully past the left edge
    pub fn prune(&mut self) {
        let width = self.width;
        self.obstacles.retain(|o| o.right(width) >= 0.0);
    }
}
