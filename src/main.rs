//! Flappy Kiro - headless native runner
//!
//! Drives the simulation through the fixed-step clock without a window.
//! With the autopilot on (default) it plays, crashes, and restarts on its
//! own; the high score is persisted between runs.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use flappy_kiro::consts::SIM_DT;
    use flappy_kiro::highscores::JsonFileStore;
    use flappy_kiro::platform::queue_press;
    use flappy_kiro::renderer::{Frame, Renderer, tessellate};
    use flappy_kiro::sim::{GamePhase, GameSession, TickInput, seeded};
    use flappy_kiro::{FixedStepClock, MemoryStore, Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "flappy-kiro")]
    #[command(about = "Headless Flappy Kiro runner", long_about = None)]
    struct Cli {
        /// RNG seed for obstacle placement and particles
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Simulation ticks to run (60 per second)
        #[arg(long, default_value_t = 3600)]
        ticks: u64,

        /// Gameplay tuning JSON
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Settings JSON (quality, particles, trails)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// High score file (defaults to the platform data directory)
        #[arg(long)]
        highscore_file: Option<PathBuf>,

        /// Press once to start, then let the player fall
        #[arg(long)]
        no_autopilot: bool,
    }

    /// Logs HUD changes and tessellates every frame
    #[derive(Default)]
    struct HeadlessRenderer {
        frames: u64,
        vertices: u64,
        last_phase: Option<GamePhase>,
        last_score: u32,
    }

    impl Renderer for HeadlessRenderer {
        fn render(&mut self, frame: &Frame) {
            self.frames += 1;
            self.vertices += tessellate(frame).len() as u64;

            if self.last_phase != Some(frame.phase) || self.last_score != frame.score {
                log::info!("{}", frame.hud_lines().join(" | "));
                self.last_phase = Some(frame.phase);
                self.last_score = frame.score;
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();

        let cli = Cli::parse();
        log::info!("Flappy Kiro (native) starting, seed {}", cli.seed);

        let tuning = match &cli.tuning {
            Some(path) => match Tuning::load(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Rejected tuning file {}: {}", path.display(), e);
                    return Err(e)
                        .with_context(|| format!("invalid tuning file {}", path.display()));
                }
            },
            None => Tuning::default(),
        };
        let settings = cli
            .settings
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();
        log::info!(
            "Quality {}, particles {}, trails {}",
            settings.quality.as_str(),
            settings.particles,
            settings.trails
        );

        let store = match cli.highscore_file {
            Some(path) => Some(JsonFileStore::new(path)),
            None => JsonFileStore::default_location(),
        };
        let mut session = match store {
            Some(store) => {
                log::info!("High score file: {}", store.path().display());
                GameSession::new(tuning, seeded(cli.seed), store)
            }
            None => {
                log::warn!("No data directory available; high score will not persist");
                GameSession::new(tuning, seeded(cli.seed), MemoryStore::new())
            }
        }
        .with_settings(&settings);

        let mut input = TickInput {
            idle_mode: !cli.no_autopilot,
            ..Default::default()
        };
        if cli.no_autopilot {
            queue_press(&mut input, session.phase);
        }

        let mut clock = FixedStepClock::default();
        let mut renderer = HeadlessRenderer::default();
        while clock.total_ticks() < cli.ticks {
            clock.run_frame(SIM_DT, &mut session, &mut input, &mut renderer);
        }

        log::info!(
            "Done: {} ticks, {} frames, {} vertices, score {}, high score {}",
            clock.total_ticks(),
            renderer.frames,
            renderer.vertices,
            session.score,
            session.high_score
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly
}
