//! NBodySim - Sun/Earth/Moon gravity demo
//!
//! Headless host: runs the simulation for a configured number of frames and
//! logs body positions. A renderer would read `GravityWorld::instances()`
//! after each frame instead.

use nbody_physics::{GravityWorld, SimulationState};
use nbodysim::config::AppConfig;
use nbodysim::input::{InputMapper, SimulationCommand};
use nbodysim::scene::sun_earth_moon;
use nbodysim::systems::{FrameResult, ParameterPanel, SimulationSystem};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    world: GravityWorld,
    /// Tunables bound to `world`
    panel: ParameterPanel,
    simulation: SimulationSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let mut world = sun_earth_moon(&config.scenario, config.simulation.to_gravity_params());

        let panel = ParameterPanel::for_world(&world);
        for e in panel.apply_all(&mut world, &config.parameters) {
            log::warn!("Ignoring parameter override: {}", e);
        }

        log::info!(
            "Loaded scene with {} bodies (G = {}, distance ratio = {})",
            world.body_count(),
            world.params.gravitational_constant,
            world.params.distance_ratio
        );

        let mut simulation = SimulationSystem::new(config.simulation.time_step);
        if config.simulation.autostart {
            simulation.handle_command(&mut world, SimulationCommand::Start);
        }

        Self {
            config,
            world,
            panel,
            simulation,
        }
    }

    /// Run the frame loop until the frame budget is spent or Exit is pressed
    fn run(&mut self) {
        let report_interval = self.config.host.report_interval;

        for frame in 0..self.config.host.frames {
            for scripted in self.config.host.script.iter().filter(|s| s.frame == frame) {
                match InputMapper::map_key(&scripted.key) {
                    Some(command) => {
                        if !self.simulation.handle_command(&mut self.world, command) {
                            log::info!("Exit requested at frame {}", frame);
                            return;
                        }
                    }
                    None => log::warn!("Unbound key '{}' at frame {}", scripted.key, frame),
                }
            }

            let result = self.simulation.update(&mut self.world);

            if report_interval > 0 && (frame + 1) % report_interval == 0 {
                self.report(frame, &result);
            }
        }

        log::info!("Finished after {} frames", self.config.host.frames);
    }

    /// Log the state of every body
    fn report(&self, frame: u64, result: &FrameResult) {
        let state = match self.world.state() {
            SimulationState::Running => "running",
            SimulationState::Idle => "idle",
        };
        log::info!(
            "Frame {} | tick {} | {:.1} fps | {}",
            frame + 1,
            result.tick,
            result.fps,
            state
        );
        for (_, body) in self.world.bodies() {
            let p = body.position();
            let v = body.velocity();
            log::info!(
                "  {:<6} pos ({:8.2}, {:8.2}, {:8.2}) vel ({:6.3}, {:6.3}, {:6.3})",
                body.label(),
                p.x,
                p.y,
                p.z,
                v.x,
                v.y,
                v.z
            );
        }
        for parameter in self.panel.parameters() {
            if let Ok(value) = self.panel.get(&self.world, &parameter.key) {
                log::debug!(
                    "  [{}] {} = {:.*}",
                    parameter.group,
                    parameter.label,
                    parameter.precision as usize,
                    value
                );
            }
        }
    }
}

fn main() {
    // Load configuration before logging so the configured level applies
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging (RUST_LOG overrides the configured level)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting NBodySim");

    let mut app = App::new(config);
    app.run();
}
