pub mod cache;
pub mod collision;
pub mod common;
pub mod config;
pub mod constraint;
pub mod error;
pub mod highlevel;
pub mod loader;
pub mod lowlevel;
pub mod map;
pub mod split;
pub mod stats;

pub use collision::{all_collisions, first_collision, Collision};
pub use common::{Agent, Path, Solution};
pub use config::Config;
pub use constraint::{Constraint, ConstraintSet, ConstraintTable, Location};
pub use error::{CbsError, MapError};
pub use highlevel::Cbs;
pub use loader::{load_instance, Instance};
pub use lowlevel::plan_single;
pub use map::{GridMap, Vertex};
pub use split::{disjoint_splitting, standard_splitting, Splitting};
pub use stats::Stats;
