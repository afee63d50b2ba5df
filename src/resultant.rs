//! Net force of a concurrent system, either computed from known forces or
//! prescribed and used to solve for unknown ones.

use serde::Serialize;
use tracing::debug;

use crate::classify::{classify, Unknown};
use crate::equilibrium::{finite_sum, Assignment, Solution, Solver};
use crate::errors::{AttributeError, ForceEditError, Precondition, SolveError};
use crate::force::{Attribute, ForceId, Resultant};
use crate::geometry::{normalize_angle, Components};
use crate::system::{ForceSystem, Mode};

/// Compute the resultant of `system` using the default configuration.
///
/// # Errors
///
/// See [`Solver::resultant`].
///
/// # Examples
/// ```
/// use forcex::{solve_resultant, Attribute, ForceSystem, Mode};
///
/// let mut system = ForceSystem::new(Mode::Resultant);
/// system.add_force(Attribute::Known(3.0), Attribute::Known(0.0)).expect("valid");
/// system.add_force(Attribute::Known(4.0), Attribute::Known(90.0)).expect("valid");
///
/// let resultant = solve_resultant(&system).expect("all forces known");
/// assert!((resultant.magnitude - 5.0).abs() < 1.0e-12);
/// ```
pub fn solve_resultant(system: &ForceSystem) -> Result<Resultant, SolveError> {
    Solver::default().resultant(system)
}

/// One way of meeting a prescribed resultant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultantSolution {
    /// Values for the unknown attributes of the forces.
    pub forces: Solution,
    /// Resultant with its unknown magnitude or angle filled in.
    pub resultant: Resultant,
}

/// Outcome of solving a system against a prescribed resultant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrescribedResultant {
    /// Every physically valid solution.
    pub solutions: Vec<ResultantSolution>,
    /// Largest difference between the net force and the resultant over all solutions.
    pub residual: Components,
    /// Whether the single solution was written back onto the forces.
    pub applied: bool,
}

impl PrescribedResultant {
    /// Whether exactly one solution exists.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.solutions.len() == 1
    }
}

impl Solver {
    /// Sum the forces of `system` into a single net force.
    ///
    /// A net force within tolerance of zero is reported as exactly zero with
    /// angle `0`. The forces are not modified.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::PreconditionViolated`] when the system is not in
    /// resultant mode or when any attribute is unknown, and
    /// [`SolveError::NonFiniteSum`] when the forces overflow.
    pub fn resultant(&self, system: &ForceSystem) -> Result<Resultant, SolveError> {
        require_resultant_mode(system)?;
        classify(system)?;
        let sum = finite_sum(system)?;
        let resultant = if sum.norm() <= self.tolerance() {
            Resultant {
                magnitude: 0.0,
                angle: 0.0,
            }
        } else {
            Resultant::from_components(sum)
        };
        debug!(
            magnitude = resultant.magnitude,
            angle = resultant.angle,
            "resultant computed"
        );
        Ok(resultant)
    }

    /// Compute the resultant and compare it with an expected value.
    ///
    /// The two agree when their components differ by at most the tolerance.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Solver::resultant`] and
    /// [`SolveError::Inconsistent`] with the difference between computed and
    /// expected components when they disagree beyond tolerance.
    pub fn verify_resultant(
        &self,
        system: &ForceSystem,
        expected: &Resultant,
    ) -> Result<Resultant, SolveError> {
        let computed = self.resultant(system)?;
        let residual = computed.components().to_vector() - expected.components().to_vector();
        if residual.norm() <= self.tolerance() {
            return Ok(computed);
        }
        Err(SolveError::Inconsistent {
            residual: residual.into(),
        })
    }

    /// Solve the unknown attributes of `system` so that its forces add up to a
    /// resultant of the given `magnitude` and `angle`, either of which may
    /// itself be unknown.
    ///
    /// The prescribed resultant is balanced by a reversed force and the system is
    /// then solved like an equilibrium problem, so the same two-unknown limit
    /// applies to the forces and the resultant together. A unique solution is
    /// written back onto the forces; several solutions leave them untouched.
    ///
    /// # Errors
    ///
    /// * [`SolveError::PreconditionViolated`] when the system is not in resultant mode.
    /// * [`SolveError::InvalidTarget`] when the prescribed values are invalid or the
    ///   resultant magnitude would have to be negative.
    /// * Every error of [`Solver::equilibrium`] for the combined problem.
    ///
    /// # Examples
    /// ```
    /// use forcex::{Attribute, ForceSystem, Mode, Solver};
    ///
    /// let mut system = ForceSystem::new(Mode::Resultant);
    /// system.add_force(Attribute::Known(3.0), Attribute::Known(0.0)).expect("valid");
    /// let id = system.add_force(Attribute::Unknown, Attribute::Known(90.0)).expect("valid");
    ///
    /// let solved = Solver::default()
    ///     .resultant_with_target(&mut system, Attribute::Known(5.0), Attribute::Unknown)
    ///     .expect("solvable");
    /// assert!(solved.applied);
    /// let force = system.force(id).expect("present");
    /// assert!((force.magnitude().value().unwrap_or_default() - 4.0).abs() < 1.0e-9);
    /// ```
    pub fn resultant_with_target(
        &self,
        system: &mut ForceSystem,
        magnitude: Attribute,
        angle: Attribute,
    ) -> Result<PrescribedResultant, SolveError> {
        require_resultant_mode(system)?;

        let mut balanced = system.clone();
        balanced.set_mode(Mode::Equilibrium);
        let reversed = match angle {
            Attribute::Known(value) => Attribute::Known(value + 180.0),
            Attribute::Unknown => Attribute::Unknown,
        };
        let target = balanced
            .add_force(magnitude, reversed)
            .map_err(|error| match error {
                ForceEditError::InvalidAttribute(error) => SolveError::InvalidTarget(error),
                other => SolveError::WriteBack(other),
            })?;

        let equilibrium = match self.equilibrium(&mut balanced) {
            Err(SolveError::InvalidMagnitude { force, magnitude }) if force == target => {
                return Err(SolveError::InvalidTarget(
                    AttributeError::NegativeMagnitude { magnitude },
                ))
            }
            other => other?,
        };

        let solutions = equilibrium
            .solutions
            .iter()
            .map(|solution| self.split(solution, target, magnitude, angle))
            .collect::<Result<Vec<_>, _>>()?;

        let applied = solutions.len() == 1;
        if applied {
            system
                .apply_solution(&solutions[0].forces)
                .map_err(SolveError::WriteBack)?;
        }
        debug!(
            solutions = solutions.len(),
            applied, "prescribed resultant solved"
        );

        Ok(PrescribedResultant {
            solutions,
            residual: equilibrium.residual,
            applied,
        })
    }

    /// Separate the reversed resultant from the force assignments of a solution.
    fn split(
        &self,
        solution: &Solution,
        target: ForceId,
        magnitude: Attribute,
        angle: Attribute,
    ) -> Result<ResultantSolution, SolveError> {
        let forces = solution
            .assignments()
            .iter()
            .copied()
            .filter(|assignment: &Assignment| assignment.unknown.force() != target)
            .collect();

        let resultant_magnitude = magnitude
            .value()
            .or_else(|| solution.value_of(Unknown::Magnitude(target)))
            .ok_or(SolveError::Underdetermined { unknowns: 1 })?;
        let resultant_angle = if resultant_magnitude <= self.tolerance() {
            0.0
        } else {
            match angle {
                Attribute::Known(value) => normalize_angle(value),
                Attribute::Unknown => solution
                    .value_of(Unknown::Angle(target))
                    .map(|reversed| normalize_angle(reversed + 180.0))
                    .ok_or(SolveError::Underdetermined { unknowns: 1 })?,
            }
        };

        Ok(ResultantSolution {
            forces: Solution::new(forces),
            resultant: Resultant {
                magnitude: resultant_magnitude,
                angle: resultant_angle,
            },
        })
    }
}

/// Reject systems that are not tagged for a resultant analysis.
fn require_resultant_mode(system: &ForceSystem) -> Result<(), SolveError> {
    if system.mode() == Mode::Resultant {
        Ok(())
    } else {
        Err(SolveError::PreconditionViolated(Precondition::WrongMode {
            expected: Mode::Resultant,
            found: system.mode(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn build(forces: &[(f64, f64)]) -> ForceSystem {
        let mut system = ForceSystem::new(Mode::Resultant);
        for &(magnitude, angle) in forces {
            system
                .add_force(Attribute::Known(magnitude), Attribute::Known(angle))
                .expect("valid force");
        }
        system
    }

    #[test]
    fn symmetric_forces_cancel() {
        let system = build(&[(7.0, 0.0), (7.0, 120.0), (7.0, 240.0)]);
        let resultant = solve_resultant(&system).expect("all known");
        assert_eq!(resultant.magnitude, 0.0);
        assert_eq!(resultant.angle, 0.0);
    }

    #[test]
    fn sums_components() {
        let system = build(&[(10.0, 0.0), (10.0, 90.0), (5.0, 225.0)]);
        let resultant = solve_resultant(&system).expect("all known");
        let x = 10.0 - 5.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(resultant.magnitude, x.hypot(x), epsilon = 1.0e-9);
        assert_relative_eq!(resultant.angle, 45.0, epsilon = 1.0e-9);
    }

    #[test]
    fn empty_system_has_zero_resultant() {
        let system = ForceSystem::new(Mode::Resultant);
        let resultant = solve_resultant(&system).expect("nothing unknown");
        assert_eq!(resultant.magnitude, 0.0);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let system = build(&[(2.0, 30.0), (3.0, 300.0)]);
        let before = system.clone();
        solve_resultant(&system).expect("all known");
        assert_eq!(system, before);
    }

    #[test]
    fn unknown_attributes_violate_precondition() {
        let mut system = build(&[(2.0, 30.0)]);
        let id = system
            .add_force(Attribute::Unknown, Attribute::Known(10.0))
            .expect("valid force");
        assert_eq!(
            solve_resultant(&system),
            Err(SolveError::PreconditionViolated(
                Precondition::UnknownAttribute(Unknown::Magnitude(id))
            ))
        );
    }

    #[test]
    fn equilibrium_mode_is_refused() {
        let mut system = build(&[(2.0, 30.0)]);
        system.set_mode(Mode::Equilibrium);
        assert!(matches!(
            solve_resultant(&system),
            Err(SolveError::PreconditionViolated(Precondition::WrongMode { .. }))
        ));
    }

    #[test]
    fn verification_against_expected_resultant() {
        let system = build(&[(3.0, 0.0), (4.0, 90.0)]);
        let solver = Solver::default();
        let expected = Resultant {
            magnitude: 5.0,
            angle: 4.0_f64.atan2(3.0).to_degrees(),
        };
        let computed = solver
            .verify_resultant(&system, &expected)
            .expect("matches");
        assert_relative_eq!(computed.magnitude, 5.0, epsilon = 1.0e-12);

        let wrong = Resultant {
            magnitude: 5.0,
            angle: 90.0,
        };
        let error = solver
            .verify_resultant(&system, &wrong)
            .expect_err("angle differs");
        let SolveError::Inconsistent { residual } = error else {
            panic!("unexpected error: {error:?}");
        };
        assert_relative_eq!(residual.x, 3.0, epsilon = 1.0e-9);
        assert_relative_eq!(residual.y, -1.0, epsilon = 1.0e-9);
    }

    #[test]
    fn zero_resultant_ignores_expected_angle() {
        let system = build(&[(1.0, 10.0), (1.0, 190.0)]);
        let expected = Resultant {
            magnitude: 0.0,
            angle: 123.0,
        };
        assert!(Solver::default()
            .verify_resultant(&system, &expected)
            .is_ok());
    }

    #[test]
    fn overflowing_forces_have_no_resultant() {
        let system = build(&[(1.0e308, 0.0), (1.0e308, 0.0)]);
        assert_eq!(solve_resultant(&system), Err(SolveError::NonFiniteSum));
    }

    #[test]
    fn verification_tolerance_is_in_force_units() {
        let system = build(&[(1.0e6, 0.0)]);
        let solver = Solver::default();
        let off_by_a_millidegree = Resultant {
            magnitude: 1.0e6,
            angle: 0.001,
        };
        assert!(matches!(
            solver.verify_resultant(&system, &off_by_a_millidegree),
            Err(SolveError::Inconsistent { .. })
        ));

        let system = build(&[(1.0e-3, 0.0)]);
        let far_in_angle = Resultant {
            magnitude: 1.0e-3,
            angle: 0.01,
        };
        assert!(solver.verify_resultant(&system, &far_in_angle).is_ok());
    }

    #[test]
    fn prescribed_resultant_fixes_unknown_force() {
        let mut system = build(&[(10.0, 0.0)]);
        let id = system
            .add_force(Attribute::Unknown, Attribute::Unknown)
            .expect("valid force");

        let solved = Solver::default()
            .resultant_with_target(&mut system, Attribute::Known(10.0), Attribute::Known(90.0))
            .expect("solvable");
        assert!(solved.is_unique());
        assert!(solved.applied);
        assert_eq!(
            solved.solutions[0].resultant,
            Resultant {
                magnitude: 10.0,
                angle: 90.0
            }
        );

        let force = system.force(id).expect("present");
        let magnitude = force.magnitude().value().expect("solved");
        let angle = force.angle().value().expect("solved");
        assert_relative_eq!(magnitude, 200.0_f64.sqrt(), epsilon = 1.0e-9);
        assert_relative_eq!(angle, 135.0, epsilon = 1.0e-9);
    }

    #[test]
    fn prescribed_magnitude_finds_resultant_angle() {
        let mut system = build(&[(3.0, 0.0)]);
        let id = system
            .add_force(Attribute::Unknown, Attribute::Known(90.0))
            .expect("valid force");

        let solved = Solver::default()
            .resultant_with_target(&mut system, Attribute::Known(5.0), Attribute::Unknown)
            .expect("solvable");
        assert_eq!(solved.solutions.len(), 1);
        let solution = &solved.solutions[0];
        assert_relative_eq!(
            solution
                .forces
                .value_of(Unknown::Magnitude(id))
                .expect("solved"),
            4.0,
            epsilon = 1.0e-9
        );
        assert_relative_eq!(solution.resultant.magnitude, 5.0);
        assert_relative_eq!(
            solution.resultant.angle,
            4.0_f64.atan2(3.0).to_degrees(),
            epsilon = 1.0e-9
        );
        assert_eq!(solution.forces.assignments().len(), 1);
    }

    #[test]
    fn unknown_resultant_of_known_forces() {
        let mut system = build(&[(3.0, 0.0), (4.0, 90.0)]);
        let solved = Solver::default()
            .resultant_with_target(&mut system, Attribute::Unknown, Attribute::Unknown)
            .expect("solvable");
        let resultant = solved.solutions[0].resultant;
        assert_relative_eq!(resultant.magnitude, 5.0, epsilon = 1.0e-9);
        assert_relative_eq!(resultant.angle, 4.0_f64.atan2(3.0).to_degrees(), epsilon = 1.0e-9);
        assert!(solved.solutions[0].forces.is_empty());
    }

    #[test]
    fn prescribed_resultant_counts_towards_unknowns() {
        let mut system = build(&[(3.0, 0.0)]);
        system
            .add_force(Attribute::Unknown, Attribute::Unknown)
            .expect("valid force");
        let before = system.clone();

        assert_eq!(
            Solver::default().resultant_with_target(
                &mut system,
                Attribute::Unknown,
                Attribute::Known(45.0)
            ),
            Err(SolveError::Overdetermined { unknowns: 3 })
        );
        assert_eq!(system, before);
    }

    #[test]
    fn prescribed_resultant_must_be_reachable() {
        let mut system = build(&[(10.0, 0.0)]);
        let solver = Solver::default();
        assert_eq!(
            solver.resultant_with_target(&mut system, Attribute::Unknown, Attribute::Known(180.0)),
            Err(SolveError::InvalidTarget(AttributeError::NegativeMagnitude {
                magnitude: -10.0
            }))
        );
        assert!(matches!(
            solver.resultant_with_target(&mut system, Attribute::Known(-1.0), Attribute::Unknown),
            Err(SolveError::InvalidTarget(_))
        ));

        system.set_mode(Mode::Equilibrium);
        assert!(matches!(
            solver.resultant_with_target(&mut system, Attribute::Unknown, Attribute::Unknown),
            Err(SolveError::PreconditionViolated(Precondition::WrongMode { .. }))
        ));
    }
}
