#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod classify;
mod config;
mod equations;
mod equilibrium;
mod errors;
mod force;
mod geometry;
mod polygon;
mod resultant;
mod system;

pub use classify::{classify, unknowns, Case, Unknown};
pub use config::{SolverConfig, DEFAULT_TOLERANCE};
pub use equations::{component_equations, ComponentEquations};
pub use equilibrium::{solve_equilibrium, Assignment, Equilibrium, SolveResult, Solution, Solver};
pub use errors::{AttributeError, ConfigError, ForceEditError, Precondition, SolveError};
pub use force::{Attribute, Force, ForceId, Provenance, Resultant};
pub use geometry::{angle_difference, normalize_angle, to_cartesian, to_polar, Components};
pub use polygon::ForcePolygon;
pub use resultant::{solve_resultant, PrescribedResultant, ResultantSolution};
pub use system::{ForceSystem, Mode};
