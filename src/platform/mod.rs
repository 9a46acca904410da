//! Platform abstraction layer
//!
//! The game has a single button (space, click, tap). Hosts report the raw
//! button level; this module turns it into the edge-triggered signals the
//! simulation consumes.

use crate::sim::{GamePhase, TickInput};

/// Map one press to the signal that makes sense in the current phase:
/// confirm on the title and game-over screens, jump while playing
pub fn press_to_input(phase: GamePhase) -> TickInput {
    match phase {
        GamePhase::Start | GamePhase::GameOver => TickInput {
            confirm: true,
            ..Default::default()
        },
        GamePhase::Playing => TickInput {
            jump: true,
            ..Default::default()
        },
    }
}

/// Fold a press into pending input without dropping signals already queued
pub fn queue_press(input: &mut TickInput, phase: GamePhase) {
    let press = press_to_input(phase);
    input.jump |= press.jump;
    input.confirm |= press.confirm;
}

/// Converts a held button level into press edges (key repeat and held
/// touches don't re-trigger)
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonLatch {
    held: bool,
}

impl ButtonLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the current level; true only on the up→down edge
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.held;
        self.held = down;
        pressed
    }

    /// Forget the held state, e.g. when the window loses focus
    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}
