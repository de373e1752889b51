pub mod reports;
pub mod simulation;
pub mod tester;

pub use simulation::{CarePolicy, PetSimulator, SimulationPlan, SimulationSummary};
pub use tester::*;
