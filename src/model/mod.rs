pub mod case;
pub mod container;
pub mod optimizer;
pub mod runner;
pub mod simulation;
pub mod variable;
pub mod well;

pub use self::case::Case;
pub use self::container::{CaseContainer, InclusionPolicy};
pub use self::optimizer::{IterationFold, OptimizerStatus, OptimizerSummary};
pub use self::runner::RunnerStats;
pub use self::simulation::{SimulationLedger, SimulationRecord};
pub use self::variable::{NameMap, Variable};
pub use self::well::Well;
