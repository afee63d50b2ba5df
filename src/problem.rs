use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use forcex::{
    component_equations, Attribute, ComponentEquations, ConfigError, Equilibrium, Force,
    ForceEditError, ForcePolygon, ForceSystem, Mode, PrescribedResultant, Resultant, SolveError,
    Solver, SolverConfig,
};
use serde::{Deserialize, Serialize};

/// One force as written in a problem file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForceEntry {
    /// Optional display name; defaults to `F<n>`.
    #[serde(default)]
    pub label: Option<String>,
    /// Magnitude, or `null` when unknown.
    pub magnitude: Attribute,
    /// Angle in degrees, or `null` when unknown.
    pub angle: Attribute,
    /// Length of the line the force was sketched with, if any.
    #[serde(default)]
    pub drawn_length: Option<f64>,
}

/// Resultant written in a problem file; either attribute may be `null`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultantEntry {
    /// Magnitude `R`, or `null` when unknown.
    pub magnitude: Attribute,
    /// Angle `α` in degrees, or `null` when unknown.
    pub angle: Attribute,
}

impl ResultantEntry {
    /// A resultant with both attributes left for the solver.
    pub const UNKNOWN: Self = Self {
        magnitude: Attribute::Unknown,
        angle: Attribute::Unknown,
    };

    /// The entry as a resultant when both attributes are given.
    pub fn known(self) -> Option<Resultant> {
        Some(Resultant {
            magnitude: self.magnitude.value()?,
            angle: self.angle.value()?,
        })
    }
}

/// Contents of a JSON problem file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Problem {
    /// Requested analysis.
    #[serde(default)]
    pub mode: Mode,
    /// Tolerance override for this problem.
    #[serde(default)]
    pub tolerance: Option<f64>,
    /// Forces in order.
    pub forces: Vec<ForceEntry>,
    /// Resultant checked or solved against in resultant mode.
    #[serde(default, alias = "expected_resultant")]
    pub resultant: Option<ResultantEntry>,
}

impl Problem {
    /// Read and parse a problem file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read problem file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("cannot parse problem file {}", path.display()))
    }

    /// Solver settings, preferring an explicit tolerance over the file's.
    pub fn solver_config(&self, tolerance: Option<f64>) -> Result<SolverConfig, ConfigError> {
        match tolerance.or(self.tolerance) {
            Some(tolerance) => SolverConfig::new(tolerance),
            None => Ok(SolverConfig::default()),
        }
    }

    /// Build the force system described by the file.
    pub fn build_system(&self) -> Result<ForceSystem, ForceEditError> {
        let mut system = ForceSystem::new(self.mode);
        for entry in &self.forces {
            let id = match entry.drawn_length {
                Some(length) => system.add_drawn_force(entry.magnitude, entry.angle, length)?,
                None => system.add_force(entry.magnitude, entry.angle)?,
            };
            if let Some(label) = &entry.label {
                system.set_label(id, label.clone())?;
            }
        }
        Ok(system)
    }
}

/// Everything the report needs after a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Analysis that was run.
    pub mode: Mode,
    /// Component equations before solving.
    pub equations: ComponentEquations,
    /// Forces after solved values were written back.
    pub forces: Vec<Force>,
    /// Outcome of an equilibrium solve.
    pub equilibrium: Option<Equilibrium>,
    /// Outcome of a resultant solve, when it is unique.
    pub resultant: Option<Resultant>,
    /// Outcome of a solve against a prescribed resultant.
    pub prescribed: Option<PrescribedResultant>,
    /// Closing gap of the force polygon when every force is known.
    pub polygon_gap: Option<f64>,
}

/// Run the analysis selected by the system's mode.
///
/// In resultant mode a fully known system is summed, and checked against a fully
/// known `target`. Any unknown, in the forces or in `target`, turns the run into a
/// solve against the prescribed resultant.
pub fn run(
    mut system: ForceSystem,
    solver: Solver,
    target: Option<ResultantEntry>,
) -> Result<Summary, SolveError> {
    let equations = component_equations(&system);
    let fully_known = system.unknown_count() == 0;
    let (equilibrium, resultant, prescribed) = match system.mode() {
        Mode::Equilibrium => (Some(solver.equilibrium(&mut system)?), None, None),
        Mode::Resultant => match (target, target.and_then(ResultantEntry::known)) {
            (None, _) if fully_known => (None, Some(solver.resultant(&system)?), None),
            (Some(_), Some(expected)) if fully_known => {
                (None, Some(solver.verify_resultant(&system, &expected)?), None)
            }
            _ => {
                let entry = target.unwrap_or(ResultantEntry::UNKNOWN);
                let prescribed =
                    solver.resultant_with_target(&mut system, entry.magnitude, entry.angle)?;
                let resultant = match prescribed.solutions.as_slice() {
                    [only] => Some(only.resultant),
                    _ => None,
                };
                (None, resultant, Some(prescribed))
            }
        },
    };
    let polygon_gap = ForcePolygon::from_system(&system).map(|polygon| polygon.closing_gap());

    Ok(Summary {
        mode: system.mode(),
        equations,
        forces: system.forces().to_vec(),
        equilibrium,
        resultant,
        prescribed,
        polygon_gap,
    })
}
