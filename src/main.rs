//! Hopper - 2D platformer movement sandbox
//!
//! Runs the player controller headless against a level, driven by a scripted
//! keyboard sequence, and logs what the player does.
//!
//! Usage: `hopper [level.json]`

mod demo;
mod settings;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hopper_core::GameTime;
use hopper_game::{InputHandler, LevelLayout, PlayerController};
use hopper_physics::{PhysicsConfig, PhysicsWorld};

use demo::InputScript;
use settings::GameSettings;

/// Application state
struct HopperApp {
    game_time: GameTime,
    physics: PhysicsWorld,
    player: PlayerController,
    input: InputHandler,
    script: InputScript,
    log_interval: u64,
}

impl HopperApp {
    fn new(settings: GameSettings, level: &LevelLayout) -> Self {
        let game_time = GameTime::new(settings.time);
        // The player applies its own gravity; world gravity only moves
        // dynamic bodies, which hopper levels do not have
        let mut physics = PhysicsWorld::with_config(PhysicsConfig {
            timestep: game_time.fixed_delta(),
            ..Default::default()
        });

        level.build(&mut physics);

        let mut player = PlayerController::with_config(settings.movement);
        player.spawn(&mut physics, level.spawn);

        Self {
            game_time,
            physics,
            player,
            input: InputHandler::new(),
            script: InputScript::default(),
            log_interval: settings.demo.log_interval.max(1),
        }
    }

    /// Advance one frame, running however many physics ticks are due
    fn update(&mut self, delta: f32) -> Result<()> {
        self.game_time.update(delta);
        let steps = self.game_time.fixed_steps();
        let first_tick = self.game_time.tick_count - steps as u64;

        for i in 0..steps as u64 {
            self.tick(first_tick + i)?;
        }
        Ok(())
    }

    fn tick(&mut self, tick: u64) -> Result<()> {
        let dt = self.game_time.fixed_delta();

        if self.script.apply(tick, &mut self.input) > 0 {
            debug!("tick {}: input {:?}", tick, self.input.state.held);
        }

        self.physics.update_queries();
        self.player
            .physics_process(&mut self.physics, &self.input.state, dt)
            .with_context(|| format!("Player update failed at tick {}", tick))?;
        self.input.end_frame();

        if tick % self.log_interval == 0 {
            let position = self.player.position();
            let velocity = self.player.velocity();
            info!(
                "tick {:>4}: pos ({:>7.2}, {:>6.2}) vel ({:>7.2}, {:>7.2}) floor={} facing={:?}",
                tick,
                position.x,
                position.y,
                velocity.x,
                velocity.y,
                self.player.is_on_floor(),
                self.player.facing(),
            );
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Hopper...");

    let settings = GameSettings::load();
    settings
        .time
        .validate()
        .context("Invalid [time] settings")?;
    if settings.demo.write_defaults && settings.write_if_missing()? {
        info!("Wrote default settings file");
    }

    let level = match std::env::args().nth(1) {
        Some(path) => LevelLayout::load(&path)
            .with_context(|| format!("Failed to load level from {}", path))?,
        None => {
            info!("No level given, using the built-in layout");
            LevelLayout::default()
        }
    };

    let total_ticks = settings.demo.ticks;
    let frame_delta = settings.time.fixed_timestep;
    let mut app = HopperApp::new(settings, &level);

    info!(
        "Simulating {} ticks (script ends at tick {})",
        total_ticks,
        app.script.last_tick()
    );

    while app.game_time.tick_count < total_ticks {
        app.update(frame_delta)?;
    }

    let position = app.player.position();
    info!(
        "Finished after {} ticks at ({:.2}, {:.2}), state {:?}",
        app.game_time.tick_count,
        position.x,
        position.y,
        app.player.state()
    );
    Ok(())
}
