use std::fmt;

use crate::error::{Result, SimVarError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Real,
    Integer,
    Boolean,
    String,
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VarKind::Real => write!(f, "Real"),
            VarKind::Integer => write!(f, "Integer"),
            VarKind::Boolean => write!(f, "Boolean"),
            VarKind::String => write!(f, "String"),
        }
    }
}

/// A kind-tagged variable payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Real(f64),
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl Value {
    /// the value a freshly declared variable of this kind starts with
    pub fn default_for(kind: VarKind) -> Self {
        match kind {
            VarKind::Real => Value::Real(0.0),
            VarKind::Integer => Value::Integer(0),
            VarKind::Boolean => Value::Boolean(false),
            VarKind::String => Value::String(String::new()),
        }
    }

    pub fn kind(&self) -> VarKind {
        match self {
            Value::Real(_) => VarKind::Real,
            Value::Integer(_) => VarKind::Integer,
            Value::Boolean(_) => VarKind::Boolean,
            Value::String(_) => VarKind::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Real(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            // unescaped, model descriptions have no escape sequences
            Value::String(v) => write!(f, "\"{}\"", v),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// A single named simulation variable.
///
/// The name, index and kind are fixed at construction. Only the value
/// changes, and only to another value of the same kind.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    index: usize,
    value: Value,
    is_state: bool,
    is_discrete: bool,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        index: usize,
        kind: VarKind,
        is_state: bool,
        is_discrete: bool,
    ) -> Self {
        Self {
            name: name.into(),
            index,
            value: Value::default_for(kind),
            is_state,
            is_discrete,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> VarKind {
        self.value.kind()
    }

    pub fn is_state(&self) -> bool {
        self.is_state
    }

    pub fn is_discrete(&self) -> bool {
        self.is_discrete
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: Value) -> Result<()> {
        self.check_kind(value.kind())?;
        self.value = value;
        Ok(())
    }

    pub fn as_real(&self) -> Result<f64> {
        match self.value {
            Value::Real(v) => Ok(v),
            _ => Err(self.mismatch(VarKind::Real)),
        }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self.value {
            Value::Integer(v) => Ok(v),
            _ => Err(self.mismatch(VarKind::Integer)),
        }
    }

    pub fn as_boolean(&self) -> Result<bool> {
        match self.value {
            Value::Boolean(v) => Ok(v),
            _ => Err(self.mismatch(VarKind::Boolean)),
        }
    }

    pub fn set_str(&mut self, value: &str) -> Result<()> {
        match &mut self.value {
            Value::String(v) => {
                v.clear();
                v.push_str(value);
                Ok(())
            }
            _ => Err(self.mismatch(VarKind::String)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match &self.value {
            Value::String(v) => Ok(v.as_str()),
            _ => Err(self.mismatch(VarKind::String)),
        }
    }

    // hot path for the solver: no allocation, no clone of the payload
    pub fn set_real(&mut self, value: f64) -> Result<()> {
        match &mut self.value {
            Value::Real(v) => {
                *v = value;
                Ok(())
            }
            _ => Err(self.mismatch(VarKind::Real)),
        }
    }

    pub fn set_integer(&mut self, value: i64) -> Result<()> {
        match &mut self.value {
            Value::Integer(v) => {
                *v = value;
                Ok(())
            }
            _ => Err(self.mismatch(VarKind::Integer)),
        }
    }

    pub fn set_boolean(&mut self, value: bool) -> Result<()> {
        match &mut self.value {
            Value::Boolean(v) => {
                *v = value;
                Ok(())
            }
            _ => Err(self.mismatch(VarKind::Boolean)),
        }
    }

    pub(crate) fn check_kind(&self, found: VarKind) -> Result<()> {
        if self.kind() == found {
            Ok(())
        } else {
            Err(SimVarError::type_mismatch(
                self.name.as_str(),
                self.kind(),
                found,
            ))
        }
    }

    fn mismatch(&self, requested: VarKind) -> SimVarError {
        SimVarError::type_mismatch(self.name.as_str(), self.kind(), requested)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {} {} = {}", self.index, self.kind(), self.name, self.value)?;
        if self.is_state {
            write!(f, " state")?;
        }
        if self.is_discrete {
            write!(f, " discrete")?;
        }
        Ok(())
    }
}
