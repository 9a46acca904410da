//! Rendering boundary
//!
//! The simulation never draws. Between ticks a [`Frame`] snapshot is captured
//! from the session and handed to a [`Renderer`], which may only read it.
//! [`tessellate`] turns a frame into colored triangles for a GPU or software
//! backend.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::{GamePhase, GameSession};
pub use vertex::{Vertex, colors};

/// Pipe cap height
pub const CAP_HEIGHT: f32 = 20.0;
/// How far a cap sticks out either side of its pipe
pub const CAP_OVERHANG: f32 = 5.0;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, cosmetic only
    pub tilt: f32,
}

/// Both halves of one obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleRects {
    pub top: Rect,
    pub bottom: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub color: u32,
    pub size: f32,
    pub opacity: f32,
    pub rotation: f32,
}

/// Read-only snapshot of everything a frame needs
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub field: Vec2,
    pub player: PlayerPose,
    pub obstacles: Vec<ObstacleRects>,
    pub particles: Vec<ParticleSprite>,
}

impl Frame {
    /// Snapshot the session. Particles with non-finite fields are dropped
    /// here so no backend ever sees them.
    pub fn capture(session: &GameSession) -> Self {
        let field = Vec2::new(session.tuning.field_width, session.tuning.field_height);
        let width = session.obstacles.width;

        let obstacles = session
            .obstacles
            .iter()
            .map(|o| ObstacleRects {
                top: Rect {
                    x: o.x,
                    y: 0.0,
                    w: width,
                    h: o.top_height,
                },
                bottom: Rect {
                    x: o.x,
                    y: o.bottom_y(),
                    w: width,
                    h: field.y - o.bottom_y(),
                },
            })
            .collect();

        let particles = session
            .particles
            .iter()
            .filter(|p| p.is_drawable())
            .map(|p| ParticleSprite {
                pos: p.pos,
                color: p.color,
                size: p.size,
                opacity: p.opacity,
                rotation: p.rotation(),
            })
            .collect();

        let player = &session.player;
        Self {
            phase: session.phase,
            score: session.score,
            high_score: session.high_score,
            field,
            player: PlayerPose {
                pos: player.pos,
                size: Vec2::new(player.width, player.height),
                tilt: player.tilt(),
            },
            obstacles,
            particles,
        }
    }

    /// HUD text lines for the current phase
    pub fn hud_lines(&self) -> Vec<String> {
        match self.phase {
            GamePhase::Start => vec![
                "Flappy Kiro".to_string(),
                "Press to start".to_string(),
                format!("High score: {}", self.high_score),
            ],
            GamePhase::Playing => vec![
                format!("Score: {}", self.score),
                format!("High: {}", self.high_score),
            ],
            GamePhase::GameOver => vec![
                "Game over".to_string(),
                format!("Score: {}", self.score),
                format!("High score: {}", self.high_score),
                "Press to restart".to_string(),
            ],
        }
    }
}

/// Anything that can paint a frame
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Build the full triangle list for a frame, back to front
pub fn tessellate(frame: &Frame) -> Vec<Vertex> {
    let mut verts = shapes::rect(
        Rect {
            x: 0.0,
            y: 0.0,
            w: frame.field.x,
            h: frame.field.y,
        },
        colors::background(),
    );

    for obstacle in &frame.obstacles {
        verts.extend(obstacle_vertices(obstacle));
    }

    for particle in &frame.particles {
        verts.extend(particle_vertices(particle));
    }

    let half = frame.player.size * 0.5;
    verts.extend(shapes::rotated_quad(
        frame.player.pos + half,
        half,
        frame.player.tilt,
        colors::player(),
    ));

    if frame.phase == GamePhase::GameOver {
        verts.extend(shapes::rect(
            Rect {
                x: 0.0,
                y: 0.0,
                w: frame.field.x,
                h: frame.field.y,
            },
            colors::OVERLAY,
        ));
    }

    verts
}

/// Pipes plus a lighter cap on each gap edge
fn obstacle_vertices(obstacle: &ObstacleRects) -> Vec<Vertex> {
    let mut verts = shapes::rect(obstacle.top, colors::pipe());
    verts.extend(shapes::rect(obstacle.bottom, colors::pipe()));

    let cap_w = obstacle.top.w + CAP_OVERHANG * 2.0;
    let cap_x = obstacle.top.x - CAP_OVERHANG;
    verts.extend(shapes::rect(
        Rect {
            x: cap_x,
            y: obstacle.top.h - CAP_HEIGHT,
            w: cap_w,
            h: CAP_HEIGHT,
        },
        colors::pipe_cap(),
    ));
    verts.extend(shapes::rect(
        Rect {
            x: cap_x,
            y: obstacle.bottom.y,
            w: cap_w,
            h: CAP_HEIGHT,
        },
        colors::pipe_cap(),
    ));
    verts
}

fn particle_vertices(p: &ParticleSprite) -> Vec<Vertex> {
    let finite = p.pos.is_finite() && p.size.is_finite() && p.opacity.is_finite();
    if !finite || p.opacity <= 0.0 {
        return Vec::new();
    }
    let half = Vec2::splat(p.size * 0.5);
    shapes::rotated_quad(p.pos, half, p.rotation, colors::rgba(p.color, p.opacity))
}
