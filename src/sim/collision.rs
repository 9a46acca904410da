//! Collision detection for the player's axis-aligned hitbox
//!
//! Field bounds are checked before obstacles. The first violation wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleField;
use super::player::PlayerBody;

/// What the player hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Ceiling,
    Floor,
    TopPipe,
    BottomPipe,
}

/// A collision and where the explosion should appear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub kind: ContactKind,
    /// Player's horizontal center at the violated edge's y
    pub point: Vec2,
}

/// Ceiling/floor test: `bottom > field_height || top < 0`
pub fn field_bounds_contact(player: &PlayerBody, field_height: f32) -> Option<Contact> {
    let x = player.center().x;
    if player.bottom() > field_height {
        return Some(Contact {
            kind: ContactKind::Floor,
            point: Vec2::new(x, field_height),
        });
    }
    if player.top() < 0.0 {
        return Some(Contact {
            kind: ContactKind::Ceiling,
            point: Vec2::new(x, 0.0),
        });
    }
    None
}

/// Overlap with any obstacle's solid (non-gap) region
pub fn obstacle_contact(player: &PlayerBody, field: &ObstacleField) -> Option<Contact> {
    let x = player.center().x;
    field.iter().find_map(|obstacle| {
        let overlaps_x =
            player.right() > obstacle.x && player.left() < obstacle.right(field.width);
        if !overlaps_x {
            return None;
        }
        if player.top() < obstacle.top_height {
            Some(Contact {
                kind: ContactKind::TopPipe,
                point: Vec2::new(x, obstacle.top_height),
            })
        } else if player.bottom() > obstacle.bottom_y() {
            Some(Contact {
                kind: ContactKind::BottomPipe,
                point: Vec2::new(x, obstacle.bottom_y()),
            })
        } else {
            None
        }
    })
}

/// Full per-tick check
pub fn detect(player: &PlayerBody, field: &ObstacleField, field_height: f32) -> Option<Contact> {
    field_bounds_contact(player, field_height).or_else(|| obstacle_contact(player, field))
}
