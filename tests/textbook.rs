#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use forcex::{
    classify, component_equations, normalize_angle, solve_equilibrium, solve_resultant, to_cartesian,
    to_polar, Attribute, Case, ForceId, ForcePolygon, ForceSystem, Mode, SolveError, Unknown,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
struct BracketGeometry {
    load: ForceId,
    horizontal: ForceId,
    vertical: ForceId,
}

fn build_bracket() -> (ForceSystem, BracketGeometry) {
    let mut system = ForceSystem::new(Mode::Equilibrium);
    let load = system
        .add_force(Attribute::Known(10.0), Attribute::Known(180.0))
        .expect("load assignment succeeds");
    let horizontal = system
        .add_force(Attribute::Unknown, Attribute::Known(0.0))
        .expect("horizontal reaction assignment succeeds");
    let vertical = system
        .add_force(Attribute::Unknown, Attribute::Known(90.0))
        .expect("vertical reaction assignment succeeds");

    (
        system,
        BracketGeometry {
            load,
            horizontal,
            vertical,
        },
    )
}

fn magnitude_of(system: &ForceSystem, id: ForceId) -> f64 {
    system
        .force(id)
        .and_then(|force| force.magnitude().value())
        .expect("magnitude is known")
}

fn angle_of(system: &ForceSystem, id: ForceId) -> f64 {
    system
        .force(id)
        .and_then(|force| force.angle().value())
        .expect("angle is known")
}

#[test]
fn builds_expected_bracket() {
    let (system, geometry) = build_bracket();

    assert_eq!(system.len(), 3);
    assert_eq!(system.unknown_count(), 2);
    assert_eq!(geometry.load.index(), 1);
    assert_eq!(
        classify(&system),
        Ok(Case::TwoMagnitudes {
            first: geometry.horizontal,
            second: geometry.vertical,
        })
    );
}

#[test]
fn bracket_reactions_match_hand_calculation() {
    let (mut system, geometry) = build_bracket();
    let equations = component_equations(&system);
    assert_eq!(equations.x, "-10.000 + F2");
    assert_eq!(equations.y, "F3");

    let equilibrium = solve_equilibrium(&mut system).expect("bracket is solvable");
    assert!(equilibrium.applied);
    assert_relative_eq!(magnitude_of(&system, geometry.horizontal), 10.0, epsilon = 1.0e-9);
    assert_relative_eq!(magnitude_of(&system, geometry.vertical), 0.0, epsilon = 1.0e-9);
    assert_eq!(system.unknown_count(), 0);

    let polygon = ForcePolygon::from_system(&system).expect("every force is known");
    assert!(polygon.is_closed(1.0e-9));
}

#[test]
fn single_unknown_force_closes_the_polygon() {
    let mut system = ForceSystem::new(Mode::Equilibrium);
    system
        .add_force(Attribute::Known(10.0), Attribute::Known(0.0))
        .expect("valid force");
    system
        .add_force(Attribute::Known(10.0), Attribute::Known(90.0))
        .expect("valid force");
    let unknown = system
        .add_force(Attribute::Unknown, Attribute::Unknown)
        .expect("valid force");

    let equilibrium = solve_equilibrium(&mut system).expect("one unknown force is solvable");
    assert!(equilibrium.is_unique());
    assert_relative_eq!(magnitude_of(&system, unknown), 14.142, epsilon = 1.0e-3);
    assert_relative_eq!(angle_of(&system, unknown), 225.0, epsilon = 1.0e-9);
}

#[test]
fn three_equal_forces_at_thirds_have_no_resultant() {
    let mut system = ForceSystem::new(Mode::Resultant);
    for angle in [0.0, 120.0, 240.0] {
        system
            .add_force(Attribute::Known(5.0), Attribute::Known(angle))
            .expect("valid force");
    }

    let resultant = solve_resultant(&system).expect("every force is known");
    assert_relative_eq!(resultant.magnitude, 0.0, epsilon = 1.0e-9);
    assert_relative_eq!(resultant.angle, 0.0);
}

#[test]
fn three_unknown_scalars_are_overdetermined() {
    let mut system = ForceSystem::new(Mode::Equilibrium);
    system
        .add_force(Attribute::Known(10.0), Attribute::Known(0.0))
        .expect("valid force");
    system
        .add_force(Attribute::Unknown, Attribute::Unknown)
        .expect("valid force");
    system
        .add_force(Attribute::Unknown, Attribute::Known(90.0))
        .expect("valid force");

    let before = system.clone();
    assert_eq!(
        solve_equilibrium(&mut system),
        Err(SolveError::Overdetermined { unknowns: 3 })
    );
    assert_eq!(system, before);
}

#[test]
fn negative_reaction_is_reported_not_flipped() {
    let mut system = ForceSystem::new(Mode::Equilibrium);
    system
        .add_force(Attribute::Known(10.0), Attribute::Known(0.0))
        .expect("valid force");
    let reaction = system
        .add_force(Attribute::Unknown, Attribute::Known(0.0))
        .expect("valid force");

    let error = solve_equilibrium(&mut system).expect_err("reaction would point backwards");
    let SolveError::InvalidMagnitude { force, magnitude } = error else {
        panic!("unexpected error: {error:?}");
    };
    assert_eq!(force, reaction);
    assert!(magnitude < 0.0);
    assert!(system.force(reaction).expect("present").magnitude().is_unknown());
}

#[test]
fn two_unknown_angles_surface_every_root() {
    let mut system = ForceSystem::new(Mode::Equilibrium);
    system
        .add_force(Attribute::Known(10.0), Attribute::Known(180.0))
        .expect("valid force");
    let first = system
        .add_force(Attribute::Known(8.0), Attribute::Unknown)
        .expect("valid force");
    let second = system
        .add_force(Attribute::Known(6.0), Attribute::Unknown)
        .expect("valid force");

    let equilibrium = solve_equilibrium(&mut system).expect("triangle closes");
    assert_eq!(equilibrium.solutions.len(), 2);
    assert!(!equilibrium.applied);
    for solution in &equilibrium.solutions {
        let a = solution.value_of(Unknown::Angle(first)).expect("solved");
        let b = solution.value_of(Unknown::Angle(second)).expect("solved");
        let (ax, ay) = (8.0 * a.to_radians().cos(), 8.0 * a.to_radians().sin());
        let (bx, by) = (6.0 * b.to_radians().cos(), 6.0 * b.to_radians().sin());
        assert_relative_eq!(ax + bx, 10.0, epsilon = 1.0e-9);
        assert_relative_eq!(ay + by, 0.0, epsilon = 1.0e-9);
    }
}

#[test]
fn overflowing_known_forces_are_rejected_without_panicking() {
    let mut system = ForceSystem::new(Mode::Equilibrium);
    for _ in 0..2 {
        system
            .add_force(Attribute::Known(1.0e308), Attribute::Known(0.0))
            .expect("finite force");
    }
    let unknown = system
        .add_force(Attribute::Unknown, Attribute::Unknown)
        .expect("valid force");

    assert_eq!(solve_equilibrium(&mut system), Err(SolveError::NonFiniteSum));
    assert!(system.force(unknown).expect("present").magnitude().is_unknown());
}

proptest! {
    #[test]
    fn polar_round_trip(magnitude in 1.0e-3_f64..1.0e4, angle in -1080.0_f64..1080.0) {
        let components = to_cartesian(magnitude, angle).expect("nonnegative magnitude");
        let (back_magnitude, back_angle) = to_polar(components.x, components.y);
        prop_assert!((back_magnitude - magnitude).abs() <= 1.0e-9 * magnitude.max(1.0));
        let drift = (back_angle - normalize_angle(angle)).abs();
        prop_assert!(drift.min(360.0 - drift) <= 1.0e-6);
    }

    #[test]
    fn normalize_angle_is_idempotent(angle in -1.0e6_f64..1.0e6) {
        let once = normalize_angle(angle);
        prop_assert!((0.0..360.0).contains(&once));
        prop_assert_eq!(normalize_angle(once), once);
    }

    #[test]
    fn whole_force_solution_balances(
        m1 in 0.0_f64..100.0,
        a1 in 0.0_f64..360.0,
        m2 in 0.0_f64..100.0,
        a2 in 0.0_f64..360.0,
    ) {
        let mut system = ForceSystem::new(Mode::Equilibrium);
        system.add_force(Attribute::Known(m1), Attribute::Known(a1)).expect("valid force");
        system.add_force(Attribute::Known(m2), Attribute::Known(a2)).expect("valid force");
        system.add_force(Attribute::Unknown, Attribute::Unknown).expect("valid force");

        let equilibrium = solve_equilibrium(&mut system).expect("always solvable");
        prop_assert!(equilibrium.applied);
        prop_assert!(system.known_sum().norm() <= 1.0e-6);
    }
}
