use std::fmt;

use pest::error::Error;

use crate::variable::{Value, VarKind};

pub mod model_parser;
pub use model_parser::{ModelParser, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSpan {
    pub pos_start: usize,
    pub pos_end: usize,
}

impl fmt::Display for StringSpan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.pos_start, self.pos_end)
    }
}

/// One declaration line of a model description.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub kind: VarKind,
    /// `Some(n)` for an array of `n` elements
    pub len: Option<usize>,
    pub start: Option<Value>,
    pub is_state: bool,
    pub is_discrete: bool,
    pub span: StringSpan,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.kind.to_string().to_lowercase(), self.name)?;
        if let Some(len) = self.len {
            write!(f, "[{}]", len)?;
        }
        if let Some(start) = &self.start {
            write!(f, " = {}", start)?;
        }
        if self.is_state {
            write!(f, " state")?;
        }
        if self.is_discrete {
            write!(f, " discrete")?;
        }
        write!(f, ";")
    }
}

/// The variables of one model, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescription {
    pub name: String,
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for ModelDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "model {} {{", self.name)?;
        for decl in self.declarations.iter() {
            writeln!(f, "    {}", decl)?;
        }
        write!(f, "}}")
    }
}

pub fn parse_model_string(text: &str) -> Result<ModelDescription, Box<Error<Rule>>> {
    model_parser::parse_string(text)
}
