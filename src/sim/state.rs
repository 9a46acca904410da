//! Game session state machine
//!
//! `Start --confirm--> Playing --collision--> GameOver --confirm--> Start`.
//! The session owns the player, obstacles and particles plus its two
//! collaborators (random source and high-score store).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Contact;
use super::obstacle::ObstacleField;
use super::particles::ParticleEngine;
use super::player::PlayerBody;
use super::random::RandomSource;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for confirm
    #[default]
    Start,
    /// Simulation running
    Playing,
    /// Frozen after a crash, waiting for confirm
    GameOver,
}

/// Things that happened during a tick, for HUD/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    Jumped,
    Scored { score: u32, at: Vec2 },
    /// First time this session the score passed the session-start record
    RecordBroken { score: u32 },
    Crashed(Contact),
    ReturnedToStart,
}

pub struct GameSession {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Best score ever; never decreases
    pub high_score: u32,
    /// Ticks since the last reset
    pub time_ticks: u64,
    /// `high_score` as it was when this session started
    pub record_baseline: u32,
    record_broken: bool,
    pub player: PlayerBody,
    pub obstacles: ObstacleField,
    pub particles: ParticleEngine,
    pub trails_enabled: bool,
    pub events: Vec<GameEvent>,
    pub(crate) rng: Box<dyn RandomSource>,
    store: Box<dyn HighScoreStore>,
}

impl GameSession {
    /// Create an idle session; loads the stored high score once
    pub fn new(
        tuning: Tuning,
        rng: impl RandomSource + 'static,
        store: impl HighScoreStore + 'static,
    ) -> Self {
        let mut store: Box<dyn HighScoreStore> = Box::new(store);
        let high_score = store.load();
        Self {
            phase: GamePhase::Start,
            score: 0,
            high_score,
            time_ticks: 0,
            record_baseline: high_score,
            record_broken: false,
            player: PlayerBody::spawn(&tuning),
            obstacles: ObstacleField::new(&tuning),
            particles: ParticleEngine::new(tuning.capacities, tuning.field_width),
            trails_enabled: true,
            events: Vec::new(),
            rng: Box::new(rng),
            store,
            tuning,
        }
    }

    /// Apply player preferences (pool capacities and trail toggle)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.particles
            .set_capacities(settings.pool_capacities(self.tuning.capacities));
        self.trails_enabled = settings.trails && settings.particles;
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.apply_settings(settings);
        self
    }

    /// Confirm/restart signal. Start → Playing (with reset), GameOver → Start.
    pub fn confirm(&mut self) {
        match self.phase {
            GamePhase::Start => {
                self.reset();
                self.set_phase(GamePhase::Playing);
                self.events.push(GameEvent::Started);
            }
            GamePhase::GameOver => {
                self.set_phase(GamePhase::Start);
                self.events.push(GameEvent::ReturnedToStart);
            }
            GamePhase::Playing => {}
        }
    }

    /// Jump signal; only has an effect while playing
    pub fn jump(&mut self) {
        if self.phase == GamePhase::Playing {
            self.player.jump(self.tuning.jump_power);
            self.events.push(GameEvent::Jumped);
        }
    }

    /// Fresh run: player mid-field at rest, no obstacles, score 0, tick 0,
    /// particles cleared, record baseline re-captured
    pub fn reset(&mut self) {
        self.player = PlayerBody::spawn(&self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.record_baseline = self.high_score;
        self.record_broken = false;
        self.particles.clear();
        log::debug!("Session reset (record baseline {})", self.record_baseline);
    }

    /// Whether confetti has already fired this session
    pub fn record_broken(&self) -> bool {
        self.record_broken
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Count one cleared obstacle: sparkles, record celebration, persistence
    pub(crate) fn record_score(&mut self, gap_center: Vec2) {
        self.score += 1;
        self.particles.spawn_sparkles(gap_center, self.rng.as_mut());
        self.events.push(GameEvent::Scored {
            score: self.score,
            at: gap_center,
        });

        if !self.record_broken && self.score > self.record_baseline {
            self.record_broken = true;
            self.particles.spawn_confetti(self.rng.as_mut());
            self.events.push(GameEvent::RecordBroken { score: self.score });
            log::info!("New record: {} (was {})", self.score, self.record_baseline);
        }

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
        }
    }

    /// Crash: explosion at the contact point, simulation frozen
    pub(crate) fn crash(&mut self, contact: Contact) {
        self.particles.spawn_explosion(contact.point, self.rng.as_mut());
        self.events.push(GameEvent::Crashed(contact));
        log::info!(
            "Crashed into {:?} at tick {} with score {}",
            contact.kind,
            self.time_ticks,
            self.score
        );
        self.set_phase(GamePhase::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::random::seeded;

    fn session_with_record(record: u32) -> (GameSession, MemoryStore) {
        let store = MemoryStore::with_value(record);
        let session = GameSession::new(Tuning::default(), seeded(1), store.clone());
        (session, store)
    }

    #[test]
    fn test_new_session_loads_high_score() {
        let (session, _) = session_with_record(12);
        assert_eq!(session.phase, GamePhase::Start);
        assert_eq!(session.high_score, 12);
        assert_eq!(session.record_baseline, 12);
    }

    #[test]
    fn test_phase_cycle() {
        let (mut session, _) = session_with_record(0);
        session.confirm();
        assert_eq!(session.phase, GamePhase::Playing);

        // Confirm while playing is a no-op
        session.confirm();
        assert_eq!(session.phase, GamePhase::Playing);

        session.phase = GamePhase::GameOver;
        session.jump();
        assert_eq!(session.phase, GamePhase::GameOver);

        session.confirm();
        assert_eq!(session.phase, GamePhase::Start);
    }

    #[test]
    fn test_game_over_to_start_keeps_state() {
        let (mut session, _) = session_with_record(0);
        session.confirm();
        session.score = 4;
        session.time_ticks = 99;
        session.phase = GamePhase::GameOver;
        session.confirm();
        assert_eq!(session.phase, GamePhase::Start);
        assert_eq!(session.score, 4);
        assert_eq!(session.time_ticks, 99);
    }

    #[test]
    fn test_jump_ignored_outside_playing() {
        let (mut session, _) = session_with_record(0);
        session.jump();
        assert_eq!(session.player.velocity, 0.0);
        session.confirm();
        session.jump();
        assert_eq!(session.player.velocity, -6.0);
    }

    #[test]
    fn test_confetti_fires_once_per_session() {
        let (mut session, store) = session_with_record(5);
        session.confirm();
        session.score = 4;

        session.record_score(Vec2::new(100.0, 200.0)); // 5: ties the record
        assert!(session.particles.confetti.is_empty());
        assert!(!session.record_broken());

        session.record_score(Vec2::new(100.0, 200.0)); // 6: new record
        let confetti = session.particles.confetti.len();
        assert!((30..=40).contains(&confetti));
        assert!(session.record_broken());

        session.record_score(Vec2::new(100.0, 200.0)); // 7: still above, no more confetti
        assert_eq!(session.particles.confetti.len(), confetti);

        assert_eq!(session.high_score, 7);
        assert_eq!(store.saves(), vec![6, 7]);
        let broken = session
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::RecordBroken { .. }))
            .count();
        assert_eq!(broken, 1);
    }

    #[test]
    fn test_reset_captures_new_baseline() {
        let (mut session, _) = session_with_record(2);
        session.confirm();
        for _ in 0..3 {
            session.record_score(Vec2::ZERO);
        }
        assert_eq!(session.high_score, 3);
        session.phase = GamePhase::GameOver;
        session.confirm();
        session.confirm();
        assert_eq!(session.record_baseline, 3);
        assert!(!session.record_broken());
        assert!(session.particles.is_empty());
    }

    #[test]
    fn test_sparkles_on_score() {
        let (mut session, _) = session_with_record(100);
        session.confirm();
        session.record_score(Vec2::new(400.0, 300.0));
        let sparkles = session.particles.sparkle.len();
        assert!((8..=12).contains(&sparkles));
        assert!(session.particles.confetti.is_empty());
    }
}
