use std::io::Write;

use thiserror::Error;

use crate::error::SimVarError;
use crate::registry::VariableRegistry;
use crate::variable::Value;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Variable(#[from] SimVarError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the values of every live variable to CSV, one row per output step.
///
/// The columns are fixed when the writer is created: `time` followed by each live
/// variable in index order.
pub struct ResultWriter<W: Write> {
    wtr: csv::Writer<W>,
    columns: Vec<usize>,
    record: Vec<String>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(writer: W, registry: &VariableRegistry) -> Result<Self, OutputError> {
        let mut wtr = csv::Writer::from_writer(writer);
        let columns = registry.iter().map(|var| var.index()).collect::<Vec<_>>();
        let mut header = vec!["time".to_string()];
        header.extend(registry.iter().map(|var| var.name().to_string()));
        wtr.write_record(&header)?;
        Ok(Self {
            wtr,
            record: Vec::with_capacity(header.len()),
            columns,
        })
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len() + 1
    }

    pub fn write_row(&mut self, t: f64, registry: &VariableRegistry) -> Result<(), OutputError> {
        self.record.clear();
        self.record.push(t.to_string());
        for &i in self.columns.iter() {
            let cell = match registry.get(i)? {
                Value::Real(v) => v.to_string(),
                Value::Integer(v) => v.to_string(),
                Value::Boolean(v) => u8::from(*v).to_string(),
                Value::String(v) => v.clone(),
            };
            self.record.push(cell);
        }
        self.wtr.write_record(&self.record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.wtr.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, OutputError> {
        self.wtr
            .into_inner()
            .map_err(|err| {
                let io_err = err.error();
                OutputError::Io(std::io::Error::new(io_err.kind(), io_err.to_string()))
            })
    }
}
