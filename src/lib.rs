extern crate pest;
#[macro_use]
extern crate pest_derive;

pub mod error;
pub mod output;
pub mod parser;
pub mod registry;
pub mod stepper;
pub mod variable;

pub use error::{Result, SimVarError};
pub use output::{OutputError, ResultWriter};
pub use parser::{parse_model_string, Declaration, ModelDescription};
pub use registry::{ChangeTracker, VariableRegistry};
pub use stepper::EulerStepper;
pub use variable::{Value, VarKind, Variable};

use anyhow::{anyhow, Context};
use std::path::Path;

/// Read a model description file and build a sealed registry from it.
pub fn load_model(path: impl AsRef<Path>) -> anyhow::Result<VariableRegistry> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let model = parse_model_string(&text)
        .map_err(|e| anyhow!("{}: {}", path.display(), e))?;
    let registry = VariableRegistry::from_description(&model)
        .with_context(|| format!("invalid model {} in {}", model.name, path.display()))?;
    Ok(registry)
}

/// Parse `name=value` and write it to the registry with the kind of the named variable.
pub fn assign(registry: &mut VariableRegistry, assignment: &str) -> anyhow::Result<usize> {
    let (name, text) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name=value, got {:?}", assignment))?;
    let name = name.trim();
    let text = text.trim();
    let index = registry.resolve(name)?;
    let value = match registry.variable(index)?.kind() {
        VarKind::Real => Value::Real(
            text.parse::<f64>()
                .with_context(|| format!("{} is not a real number", text))?,
        ),
        VarKind::Integer => Value::Integer(
            text.parse::<i64>()
                .with_context(|| format!("{} is not an integer", text))?,
        ),
        VarKind::Boolean => match text {
            "true" | "1" => Value::Boolean(true),
            "false" | "0" => Value::Boolean(false),
            _ => return Err(anyhow!("{} is not a boolean", text)),
        },
        VarKind::String => Value::String(text.trim_matches('"').to_string()),
    };
    registry.set(index, value)?;
    Ok(index)
}
