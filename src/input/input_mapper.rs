//! Input mapping from key names to simulation commands
//!
//! Start is bound to the space bar and Reset to `r`, as in the overlay.
//! Keys arrive as names so any host (window, terminal, script) can feed them.

/// Commands the host can issue to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    /// Idle -> Running (space)
    Start,
    /// Restore initial conditions and return to Idle (r)
    Reset,
    /// Leave the host loop (escape)
    Exit,
}

/// Maps key names to simulation commands
pub struct InputMapper;

impl InputMapper {
    /// Map a key name to a command
    ///
    /// Accepts `"space"`/`" "`, `"r"` and `"escape"`/`"esc"`, case-insensitive.
    /// Returns `None` for unbound keys.
    pub fn map_key(key: &str) -> Option<SimulationCommand> {
        if key == " " {
            return Some(SimulationCommand::Start);
        }
        match key.trim().to_ascii_lowercase().as_str() {
            "space" => Some(SimulationCommand::Start),
            "r" => Some(SimulationCommand::Reset),
            "escape" | "esc" => Some(SimulationCommand::Exit),
            _ => None,
        }
    }
}
