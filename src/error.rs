use thiserror::Error;

use crate::variable::VarKind;

pub type Result<T> = std::result::Result<T, SimVarError>;

/// Errors raised by the variable registry and its collaborators.
///
/// Every error is returned at the call that violates the contract, the
/// registry is left as it was before that call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimVarError {
    #[error("variable {0:?} is already declared")]
    DuplicateName(String),

    #[error("unknown variable {0:?}")]
    UnknownVariable(String),

    #[error("index {index} is out of range for a registry of {len} variables")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("type mismatch on {name:?}: variable is {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: VarKind,
        found: VarKind,
    },

    #[error("size mismatch: expected {expected} values, got {found}")]
    SizeMismatch { expected: usize, found: usize },

    /// The index belongs to a variable that has been removed.
    #[error("variable at index {index} has been removed")]
    Removed { index: usize },

    #[error("registry is sealed, cannot change structure for {name:?}")]
    Sealed { name: String },

    /// State variables make up the solver state vector and must be real.
    #[error("state variable {name:?} must be Real, not {kind}")]
    NotReal { name: String, kind: VarKind },

    /// Array elements are removed together with their array.
    #[error("{name:?} is an element of array {array:?}, remove the array instead")]
    ArrayElement { name: String, array: String },
}

impl SimVarError {
    pub fn type_mismatch(name: impl Into<String>, expected: VarKind, found: VarKind) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected,
            found,
        }
    }

    /// True for errors that indicate a broken model rather than bad runtime data.
    /// A run that hits one of these during a step is aborted.
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. } | Self::IndexOutOfRange { .. } | Self::Removed { .. }
        )
    }
}
