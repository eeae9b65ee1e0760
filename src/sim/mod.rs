pub mod metrics;
pub mod runner;

pub use metrics::{SessionResult, SimMetrics, SimulationSummary};
pub use runner::{AgentKind, SessionRunner, SimulationConfig};
