//! Fixed-step simulation tick
//!
//! One call to [`tick`] applies the frame's one-shot input and then runs
//! [`update`]. Only `Playing` advances the player, obstacles, score and tick
//! counter; particles keep animating in every phase.

use super::collision;
use super::state::{GamePhase, GameSession};

/// Autopilot jumps when the player's bottom edge sinks this close to the
/// bottom pipe of the next gap
const AUTOPILOT_CLEARANCE: f32 = 10.0;

/// Input signals for a single tick (edge-triggered)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Upward impulse (only while playing)
    pub jump: bool,
    /// Start / restart
    pub confirm: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Apply input, then advance the session by one tick
pub fn tick(session: &mut GameSession, input: &TickInput) {
    session.events.clear();

    let mut input = input.clone();
    if input.idle_mode {
        match session.phase {
            GamePhase::Start | GamePhase::GameOver => input.confirm = true,
            GamePhase::Playing => input.jump |= autopilot_wants_jump(session),
        }
    }

    if input.confirm {
        session.confirm();
    }
    if input.jump {
        session.jump();
    }

    update(session);
}

/// One simulation step, in order: tick counter, gravity, trail, spawn,
/// advance, score, prune, particles, collisions
pub fn update(session: &mut GameSession) {
    if session.phase != GamePhase::Playing {
        session.particles.update();
        return;
    }

    session.time_ticks += 1;
    session.player.apply_gravity_step(session.tuning.gravity);

    if session.trails_enabled && session.rng.next_unit() < session.tuning.trail_chance {
        let center = session.player.center();
        session.particles.spawn_trail(center, session.rng.as_mut());
    }

    session
        .obstacles
        .maybe_spawn(session.time_ticks, session.rng.as_mut());
    session.obstacles.advance(session.tuning.obstacle_speed);

    let scoring = session
        .obstacles
        .collect_scoring_events(session.player.left());
    for event in scoring {
        session.record_score(event.gap_center);
    }

    session.obstacles.prune();
    session.particles.update();

    if let Some(contact) = collision::detect(
        &session.player,
        &session.obstacles,
        session.tuning.field_height,
    ) {
        session.crash(contact);
    }
}

/// Idle autopilot: flap whenever falling too close to the next gap's floor
fn autopilot_wants_jump(session: &GameSession) -> bool {
    let player = &session.player;
    let width = session.obstacles.width;
    let floor = session
        .obstacles
        .iter()
        .find(|o| o.right(width) >= player.left())
        .map(|o| o.bottom_y())
        .unwrap_or((session.tuning.field_height + session.tuning.obstacle_gap) / 2.0);

    player.velocity >= 0.0 && player.bottom() >= floor - AUTOPILOT_CLEARANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::collision::ContactKind;
    use crate::sim::obstacle::Obstacle;
    use crate::sim::random::{SequenceSource, seeded};
    use crate::sim::state::GameEvent;
    use crate::tuning::Tuning;

    fn playing_session() -> GameSession {
        let mut session = GameSession::new(Tuning::default(), seeded(12345), MemoryStore::new());
        tick(
            &mut session,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
        );
        session
    }

    #[test]
    fn test_start_to_playing() {
        let mut session = GameSession::new(Tuning::default(), seeded(1), MemoryStore::new());
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase, GamePhase::Start);
        assert_eq!(session.time_ticks, 0);

        tick(
            &mut session,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
        );
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.time_ticks, 1);
        assert!(session.events.contains(&GameEvent::Started));
    }

    #[test]
    fn test_first_tick_kinematics() {
        let mut session = GameSession::new(Tuning::default(), seeded(1), MemoryStore::new());
        session.confirm();
        update(&mut session);
        assert!((session.player.velocity - 0.3).abs() < 1e-5);
        assert!((session.player.pos.y - 300.3).abs() < 1e-4);
    }

    #[test]
    fn test_jump_then_gravity() {
        let mut session = playing_session();
        for _ in 0..10 {
            tick(&mut session, &TickInput::default());
        }
        tick(
            &mut session,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert!((session.player.velocity - (-5.7)).abs() < 1e-5);
    }

    #[test]
    fn test_falls_to_floor_and_explodes() {
        let mut session = playing_session();
        let mut ticks = 0;
        while session.phase == GamePhase::Playing {
            tick(&mut session, &TickInput::default());
            ticks += 1;
            assert!(ticks < 1000, "never hit the floor");
        }
        assert_eq!(session.phase, GamePhase::GameOver);
        let crash = session
            .events
            .iter()
            .find_map(|e| match e {
                GameEvent::Crashed(c) => Some(*c),
                _ => None,
            })
            .expect("crash event");
        assert_eq!(crash.kind, ContactKind::Floor);
        assert!((15..=20).contains(&session.particles.explosion.len()));
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut session = playing_session();
        while session.phase == GamePhase::Playing {
            tick(&mut session, &TickInput::default());
        }
        let player = session.player.clone();
        let ticks = session.time_ticks;
        let explosion = session.particles.explosion.len();

        for _ in 0..5 {
            tick(
                &mut session,
                &TickInput {
                    jump: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(session.player, player);
        assert_eq!(session.time_ticks, ticks);
        // Cosmetic particles still age
        assert!(session.particles.explosion.iter().all(|p| p.life < 60));
        assert_eq!(session.particles.explosion.len(), explosion);
    }

    #[test]
    fn test_restart_cycle() {
        let mut session = playing_session();
        session.phase = GamePhase::GameOver;
        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut session, &confirm);
        assert_eq!(session.phase, GamePhase::Start);
        tick(&mut session, &confirm);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.time_ticks, 1);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_obstacle_spawns_on_cadence() {
        let mut session = playing_session();
        // Keep the player airborne in the middle of the field
        while session.time_ticks < 180 {
            let jump = session.player.pos.y > 320.0 && session.player.velocity > 0.0;
            tick(
                &mut session,
                &TickInput {
                    jump,
                    ..Default::default()
                },
            );
            assert_eq!(session.phase, GamePhase::Playing);
        }
        assert_eq!(session.obstacles.len(), 1);
        // Spawned at the right edge then advanced once in the same tick
        assert_eq!(session.obstacles.obstacles[0].x, 798.5);
    }

    #[test]
    fn test_scoring_through_update() {
        let mut session = GameSession::new(
            Tuning::default(),
            SequenceSource::constant(0.9),
            MemoryStore::with_value(0),
        );
        session.confirm();
        // Gap spans 240..390 and the player sits at 300..340
        session
            .obstacles
            .obstacles
            .push(Obstacle::new(39.0, 240.0, 150.0));
        session.player.velocity = -0.3;
        update(&mut session);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.score, 1);
        assert_eq!(session.high_score, 1);
        assert!(!session.particles.sparkle.is_empty());
        assert!(!session.particles.confetti.is_empty());

        // Already scored: no second point
        session.player.velocity = -0.3;
        update(&mut session);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_trail_respects_chance() {
        // 0.9 >= 0.7: never spawns a trail
        let mut session = GameSession::new(
            Tuning::default(),
            SequenceSource::constant(0.9),
            MemoryStore::new(),
        );
        session.confirm();
        for _ in 0..5 {
            update(&mut session);
        }
        assert!(session.particles.trail.is_empty());

        // 0.1 < 0.7: one trail particle per tick
        let mut session = GameSession::new(
            Tuning::default(),
            SequenceSource::constant(0.1),
            MemoryStore::new(),
        );
        session.confirm();
        for _ in 0..5 {
            update(&mut session);
        }
        assert_eq!(session.particles.trail.len(), 5);
    }

    #[test]
    fn test_autopilot_survives() {
        let mut session = GameSession::new(Tuning::default(), seeded(7), MemoryStore::new());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut session, &input);
        assert_eq!(session.phase, GamePhase::Playing);
        for _ in 0..600 {
            tick(&mut session, &input);
            assert_eq!(session.phase, GamePhase::Playing);
        }
        assert!(!session.obstacles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed produce identical results
        let mut a = GameSession::new(Tuning::default(), seeded(99999), MemoryStore::new());
        let mut b = GameSession::new(Tuning::default(), seeded(99999), MemoryStore::new());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.obstacles.obstacles, b.obstacles.obstacles);
        assert_eq!(a.particles.len(), b.particles.len());
    }
}
