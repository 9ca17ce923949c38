use em_sandbox::prelude::*;

fn main() -> Result<(), SandboxError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut sandbox = Sandbox::new(SandboxConfig::canvas(800.0, 600.0))?;
    // The values a user would type into the charge prompt.
    let a = sandbox.apply(Command::add_from_input(V2::new(300.0, 300.0), "2.0")?)?;
    let b = sandbox.apply(Command::add_from_input(V2::new(500.0, 300.0), "-2.0")?)?;
    for outcome in [a, b] {
        if let Outcome::Added(charge) = outcome {
            sandbox.apply(Command::ToggleSelection { id: charge.id })?;
        }
    }
    sandbox.apply(Command::SetGaussianSurface(Some(GaussianSurface::new(V2::new(300.0, 300.0), 80.0))))?;

    let frame = sandbox.frame();
    for entry in &frame.panel.charges {
        println!("{}", entry.label);
    }
    if let Some(gauss) = frame.panel.gauss {
        println!("Q_enc = {:.2} µC, flux = {:.2e} N·m²/C", gauss.enclosed, gauss.flux);
    }
    if let Some(coulomb) = frame.panel.coulomb {
        println!("F({}, {}) = {:.2e} N", coulomb.first.1, coulomb.second.1, coulomb.force);
    }
    println!("{} grid arrows, {} field lines", frame.arrows.len(), frame.streamlines.len());

    println!("line, x, y");
    for (i, rendered) in frame.streamlines.iter().enumerate() {
        for p in rendered.line.points() {
            println!("{i}, {:.2}, {:.2}", p.x, p.y);
        }
    }
    Ok(())
}
