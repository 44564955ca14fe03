//! Simulation frame system
//!
//! Drives the gravity world once per frame:
//! - Frame time and FPS measurement
//! - Command handling (start/reset)
//! - One fixed-size tick per frame

use std::time::Instant;
use nbody_physics::GravityWorld;

use crate::input::SimulationCommand;

/// Result of a simulation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    /// Whether the world integrated a tick this frame
    pub advanced: bool,
    /// Frames per second measured from the previous frame
    pub fps: f32,
    /// Ticks since the last reset
    pub tick: u64,
}

/// Manages the per-frame simulation step
pub struct SimulationSystem {
    last_frame: Instant,
    time_step: f32,
    fps: f32,
}

impl SimulationSystem {
    /// Create a simulation system advancing `time_step` per frame
    pub fn new(time_step: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            time_step,
            fps: 0.0,
        }
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Last measured frames per second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Apply a host command to the world
    ///
    /// Returns false when the host should stop.
    pub fn handle_command(&mut self, world: &mut GravityWorld, command: SimulationCommand) -> bool {
        match command {
            SimulationCommand::Start => {
                world.start();
                log::info!("Simulation started");
            }
            SimulationCommand::Reset => {
                world.reset();
                log::info!("Simulation reset");
            }
            SimulationCommand::Exit => return false,
        }
        true
    }

    /// Run one frame: measure frame time, then tick the world once
    ///
    /// The tick completes before this returns, so positions read afterwards
    /// are never mid-update.
    pub fn update(&mut self, world: &mut GravityWorld) -> FrameResult {
        let now = Instant::now();
        let frame_time = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        if frame_time > 0.0 {
            self.fps = 1.0 / frame_time;
        }

        let advanced = world.tick(self.time_step);

        FrameResult {
            advanced,
            fps: self.fps,
            tick: world.tick_count(),
        }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbody_math::Vec3;
    use nbody_physics::Body;

    fn world_with_mover() -> GravityWorld {
        let mut world = GravityWorld::new();
        world.add_body(Body::free(Vec3::ZERO, Vec3::X, 1.0).with_name("mover"));
        world
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert_eq!(sim.time_step(), 1.0);
        assert!(sim.last_frame.elapsed().as_millis() < 100);
    }

    #[test]
    fn test_idle_frame_does_not_advance() {
        let mut sim = SimulationSystem::new(1.0);
        let mut world = world_with_mover();

        let result = sim.update(&mut world);

        assert!(!result.advanced);
        assert_eq!(result.tick, 0);
    }

    #[test]
    fn test_frames_tick_with_fixed_step() {
        let mut sim = SimulationSystem::new(0.5);
        let mut world = world_with_mover();
        assert!(sim.handle_command(&mut world, SimulationCommand::Start));

        for _ in 0..4 {
            assert!(sim.update(&mut world).advanced);
        }

        let (_, mover) = world.find_by_name("mover").unwrap();
        assert!((mover.position().x - 2.0).abs() < 1e-6);
        assert_eq!(world.tick_count(), 4);
    }

    #[test]
    fn test_fps_measured() {
        let mut sim = SimulationSystem::new(1.0);
        let mut world = world_with_mover();
        std::thread::sleep(std::time::Duration::from_millis(20));

        let result = sim.update(&mut world);

        assert!(result.fps > 0.0 && result.fps < 100.0, "fps = {}", result.fps);
        assert_eq!(sim.fps(), result.fps);
    }

    #[test]
    fn test_reset_command() {
        let mut sim = SimulationSystem::new(1.0);
        let mut world = world_with_mover();
        sim.handle_command(&mut world, SimulationCommand::Start);
        sim.update(&mut world);

        assert!(sim.handle_command(&mut world, SimulationCommand::Reset));

        assert!(!world.is_running());
        let (_, mover) = world.find_by_name("mover").unwrap();
        assert_eq!(mover.position(), Vec3::ZERO);
    }

    #[test]
    fn test_exit_command() {
        let mut sim = SimulationSystem::new(1.0);
        let mut world = world_with_mover();
        assert!(!sim.handle_command(&mut world, SimulationCommand::Exit));
    }
}
