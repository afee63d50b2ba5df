use forcex::{component_equations, Attribute, ForceSystem, Mode, Solver, SolverConfig, Unknown};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A 500 N sign hangs from two cables at 30° and 135°
    let mut system = ForceSystem::new(Mode::Equilibrium);
    let weight = system.add_force(Attribute::Known(500.0), Attribute::Known(270.0))?;
    system.set_label(weight, "W")?;
    let left = system.add_force(Attribute::Unknown, Attribute::Known(135.0))?;
    system.set_label(left, "T_AB")?;
    let right = system.add_force(Attribute::Unknown, Attribute::Known(30.0))?;
    system.set_label(right, "T_AC")?;

    println!("{}", component_equations(&system));

    let solver = Solver::new(SolverConfig::new(1.0e-9)?);
    let equilibrium = solver.equilibrium(&mut system)?;

    for solution in &equilibrium.solutions {
        if let Some(tension) = solution.value_of(Unknown::Magnitude(left)) {
            println!("T_AB = {tension:.1} N");
        }
        if let Some(tension) = solution.value_of(Unknown::Magnitude(right)) {
            println!("T_AC = {tension:.1} N");
        }
    }

    Ok(())
}
