use forcex::{solve_resultant, Attribute, ForcePolygon, ForceSystem, Mode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut system = ForceSystem::new(Mode::Resultant);
    system.add_force(Attribute::Known(600.0), Attribute::Known(20.0))?;
    system.add_force(Attribute::Known(400.0), Attribute::Known(150.0))?;
    // Sketched on screen; the magnitude is still the entered value
    system.add_drawn_force(Attribute::Known(250.0), Attribute::Known(255.0), 120.0)?;

    let resultant = solve_resultant(&system)?;
    println!(
        "R = {:.1} N at {:.1}°",
        resultant.magnitude, resultant.angle
    );

    if let Some(polygon) = ForcePolygon::from_system(&system) {
        for (index, vertex) in polygon.vertices().iter().enumerate() {
            println!("vertex {index}: ({:.1}, {:.1})", vertex.x, vertex.y);
        }
    }

    Ok(())
}
