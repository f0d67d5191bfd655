use std::fs::File;

use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use simvars::{assign, load_model, stepper::der_indices, EulerStepper, ResultWriter};

/// loads a model description, applies assignments and optionally integrates the states
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model description filename
    input: String,

    /// Assign a value before the run, as name=value (repeatable)
    #[arg(short, long)]
    set: Vec<String>,

    /// Number of Euler steps to take
    #[arg(long)]
    steps: Option<usize>,

    /// Step size
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// Write every output step to this CSV file
    #[arg(long)]
    csv: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Args::parse();
    let mut registry = load_model(&cli.input)?;
    for assignment in cli.set.iter() {
        assign(&mut registry, assignment)?;
    }
    let changed = registry.drain_dirty();
    println!(
        "changed: [{}]",
        changed
            .iter()
            .filter_map(|&i| registry.variable(i).ok())
            .map(|var| var.name())
            .join(", ")
    );

    if let Some(steps) = cli.steps {
        // a state x is driven by der_x when the model declares it, otherwise it is held
        let der = der_indices(&registry);
        let mut stepper = EulerStepper::new(&registry);
        let mut writer = match &cli.csv {
            Some(path) => Some(ResultWriter::new(File::create(path)?, &registry)?),
            None => None,
        };
        if let Some(writer) = writer.as_mut() {
            writer.write_row(0.0, &registry)?;
        }
        let t_end = stepper.run(
            &mut registry,
            0.0,
            cli.dt,
            steps,
            |_t, reg, _x, mut dx| {
                for (d, i) in dx.iter_mut().zip(der.iter()) {
                    if let Some(i) = i {
                        *d = reg.get_real(*i)?;
                    }
                }
                Ok::<(), anyhow::Error>(())
            },
            |t, reg| {
                reg.drain_dirty();
                if let Some(writer) = writer.as_mut() {
                    writer.write_row(t, reg)?;
                }
                Ok(())
            },
        )?;
        if let Some(writer) = writer.as_mut() {
            writer.flush()?;
        }
        println!("t = {}", t_end);
    }

    for var in registry.iter() {
        println!("{}", var);
    }
    Ok(())
}
