//! Integration tests for the host pipeline
//!
//! Config -> scene -> parameter panel -> frame driver, without a window.

use nbody_math::Vec3;
use nbodysim::config::AppConfig;
use nbodysim::input::{InputMapper, SimulationCommand};
use nbodysim::scene::sun_earth_moon;
use nbodysim::systems::{ParameterPanel, SimulationSystem};

fn reference_app() -> (nbody_physics::GravityWorld, ParameterPanel, SimulationSystem) {
    let config = AppConfig::default();
    let world = sun_earth_moon(&config.scenario, config.simulation.to_gravity_params());
    let panel = ParameterPanel::for_world(&world);
    let simulation = SimulationSystem::new(config.simulation.time_step);
    (world, panel, simulation)
}

#[test]
fn test_space_then_frames_moves_planets_not_sun() {
    let (mut world, _, mut simulation) = reference_app();
    let command = InputMapper::map_key("space").unwrap();
    assert!(simulation.handle_command(&mut world, command));

    for _ in 0..60 {
        assert!(simulation.update(&mut world).advanced);
    }

    let (_, sun) = world.find_by_name("sun").unwrap();
    assert_eq!(sun.position(), Vec3::new(0.0, 0.0, -300.0));
    let (_, earth) = world.find_by_name("earth").unwrap();
    assert_ne!(earth.position(), Vec3::new(0.0, 80.0, -300.0));
}

#[test]
fn test_reset_key_restores_scene() {
    let (mut world, _, mut simulation) = reference_app();
    simulation.handle_command(&mut world, SimulationCommand::Start);
    for _ in 0..30 {
        simulation.update(&mut world);
    }

    let reset = InputMapper::map_key("r").unwrap();
    simulation.handle_command(&mut world, reset);
    let frame = simulation.update(&mut world);

    assert!(!frame.advanced);
    assert_eq!(frame.tick, 0);
    let (_, moon) = world.find_by_name("moon").unwrap();
    assert_eq!(moon.position(), Vec3::new(0.0, 87.0, -300.0));
    assert_eq!(moon.velocity(), Vec3::new(0.4, 0.0, 0.0));
}

#[test]
fn test_parameter_edit_then_reset_keeps_edit() {
    let (mut world, panel, mut simulation) = reference_app();
    simulation.handle_command(&mut world, SimulationCommand::Start);
    simulation.update(&mut world);

    panel.set(&mut world, "earth_velocity_x", 0.3).unwrap();
    simulation.handle_command(&mut world, SimulationCommand::Reset);

    let (_, earth) = world.find_by_name("earth").unwrap();
    assert_eq!(earth.velocity(), Vec3::new(0.3, 0.0, 0.0));
    assert_eq!(earth.position(), Vec3::new(0.0, 80.0, -300.0));
}

#[test]
fn test_zero_distance_ratio_freezes_gravity_without_fault() {
    let (mut world, panel, mut simulation) = reference_app();
    panel.set(&mut world, "distance_ratio", 0.0).unwrap();
    simulation.handle_command(&mut world, SimulationCommand::Start);

    simulation.update(&mut world);

    // Every pair is degenerate, so bodies coast on their initial velocity
    let (_, earth) = world.find_by_name("earth").unwrap();
    assert_eq!(earth.velocity(), Vec3::new(0.35, 0.0, 0.0));
    assert!(earth.position().is_finite());
}
