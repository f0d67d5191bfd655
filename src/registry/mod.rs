use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use log::{debug, info};
use ndarray::{ArrayView1, ArrayViewMut1};

use crate::error::{Result, SimVarError};
use crate::parser::ModelDescription;
use crate::variable::{Value, VarKind, Variable};

pub mod change_tracker;

pub use change_tracker::ChangeTracker;

/// Largest number of elements in a single array.
pub const MAX_ARRAY_LEN: usize = 1 << 20;

// The registry keeps three views of the same variables:
// 1. `vars` is dense and indexed by variable index. Removed variables leave a `None`
//    behind so an index, once handed out, always refers to the same variable.
// 2. `name_index_map` resolves live names to indices, `array_map` resolves array names
//    to the contiguous index range of their elements.
// 3. `state_indices` lists the indices of live state variables in index order, this is
//    the order of the solver state vector.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    vars: Vec<Option<Variable>>,
    name_index_map: HashMap<String, usize>,
    array_map: HashMap<String, Range<usize>>,
    state_indices: Vec<usize>,
    tracker: ChangeTracker,
    sealed: bool,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            vars: Vec::with_capacity(n),
            name_index_map: HashMap::with_capacity(n),
            tracker: ChangeTracker::with_capacity(n),
            ..Default::default()
        }
    }

    /// Declare every variable of a parsed model description, assign the start values and
    /// seal the registry. The dirty set is empty on return.
    pub fn from_description(model: &ModelDescription) -> Result<Self> {
        let mut n = 0usize;
        for decl in model.declarations.iter() {
            let len = decl.len.unwrap_or(1);
            Self::check_array_len(len)?;
            n = n.checked_add(len).ok_or(SimVarError::SizeMismatch {
                expected: usize::MAX - n,
                found: len,
            })?;
        }
        let mut registry = Self::with_capacity(n.min(MAX_ARRAY_LEN));
        for decl in model.declarations.iter() {
            let indices = match decl.len {
                Some(len) => registry.declare_array(
                    decl.name.as_str(),
                    decl.kind,
                    len,
                    decl.is_state,
                    decl.is_discrete,
                )?,
                None => {
                    let index = registry.declare(
                        decl.name.as_str(),
                        decl.kind,
                        decl.is_state,
                        decl.is_discrete,
                    )?;
                    index..index + 1
                }
            };
            if let Some(start) = &decl.start {
                for index in indices {
                    registry.set(index, start.clone())?;
                }
            }
        }
        registry.seal();
        registry.drain_dirty();
        info!(
            "Built registry for model {}: {} variables, {} states",
            model.name,
            registry.live_count(),
            registry.state_count()
        );
        Ok(registry)
    }

    /// Declare a new variable holding the default value of `kind`, returns its index.
    pub fn declare(
        &mut self,
        name: &str,
        kind: VarKind,
        is_state: bool,
        is_discrete: bool,
    ) -> Result<usize> {
        self.check_structural(name)?;
        self.check_new_name(name)?;
        Self::check_state_kind(name, kind, is_state)?;
        Ok(self.push(name.to_string(), kind, is_state, is_discrete))
    }

    /// Declare an array of `len` variables named `name[1]` to `name[len]` at contiguous
    /// indices. Either every element is declared or none is.
    pub fn declare_array(
        &mut self,
        name: &str,
        kind: VarKind,
        len: usize,
        is_state: bool,
        is_discrete: bool,
    ) -> Result<Range<usize>> {
        self.check_structural(name)?;
        Self::check_array_len(len)?;
        Self::check_state_kind(name, kind, is_state)?;
        self.check_new_name(name)?;
        let element_names = (1..=len)
            .map(|i| format!("{}[{}]", name, i))
            .collect::<Vec<_>>();
        for element_name in element_names.iter() {
            self.check_new_name(element_name)?;
        }
        let start = self.vars.len();
        for element_name in element_names {
            self.push(element_name, kind, is_state, is_discrete);
        }
        let range = start..self.vars.len();
        self.array_map.insert(name.to_string(), range.clone());
        Ok(range)
    }

    fn push(&mut self, name: String, kind: VarKind, is_state: bool, is_discrete: bool) -> usize {
        let index = self.vars.len();
        debug!("Declared {} {} at index {}", kind, name, index);
        self.name_index_map.insert(name.clone(), index);
        self.vars.push(Some(Variable::new(
            name,
            index,
            kind,
            is_state,
            is_discrete,
        )));
        if is_state {
            self.state_indices.push(index);
        }
        self.tracker.resize(self.vars.len());
        index
    }

    fn check_structural(&self, name: &str) -> Result<()> {
        if self.sealed {
            Err(SimVarError::Sealed {
                name: name.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn check_new_name(&self, name: &str) -> Result<()> {
        if self.name_index_map.contains_key(name) || self.array_map.contains_key(name) {
            Err(SimVarError::DuplicateName(name.to_string()))
        } else {
            Ok(())
        }
    }

    fn check_array_len(len: usize) -> Result<()> {
        match len {
            0 => Err(SimVarError::SizeMismatch {
                expected: 1,
                found: 0,
            }),
            n if n > MAX_ARRAY_LEN => Err(SimVarError::SizeMismatch {
                expected: MAX_ARRAY_LEN,
                found: n,
            }),
            _ => Ok(()),
        }
    }

    fn check_state_kind(name: &str, kind: VarKind, is_state: bool) -> Result<()> {
        if is_state && kind != VarKind::Real {
            Err(SimVarError::NotReal {
                name: name.to_string(),
                kind,
            })
        } else {
            Ok(())
        }
    }

    /// Remove a variable (or a whole array) by name. The index is retired, never reused.
    /// A single element of an array cannot be removed, the array stays contiguous.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        self.check_structural(name)?;
        let indices = if let Some(range) = self.array_map.remove(name) {
            range
        } else {
            let index = self.resolve(name)?;
            if let Some(array) = self.array_of(index) {
                return Err(SimVarError::ArrayElement {
                    name: name.to_string(),
                    array: array.to_string(),
                });
            }
            index..index + 1
        };
        for index in indices {
            if let Some(var) = self.vars[index].take() {
                debug!("Removed {} at index {}", var.name(), index);
                self.name_index_map.remove(var.name());
                self.tracker.forget(index);
            }
        }
        let vars = &self.vars;
        self.state_indices.retain(|&i| vars[i].is_some());
        Ok(())
    }

    /// The name of the array that `index` is an element of, if any.
    pub fn array_of(&self, index: usize) -> Option<&str> {
        self.array_map
            .iter()
            .find(|(_, range)| range.contains(&index))
            .map(|(name, _)| name.as_str())
    }

    /// End structural setup, after this only values may change.
    pub fn seal(&mut self) {
        info!(
            "Sealed registry with {} variables ({} states)",
            self.live_count(),
            self.state_count()
        );
        self.name_index_map.shrink_to_fit();
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.name_index_map
            .get(name)
            .copied()
            .ok_or_else(|| SimVarError::UnknownVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_index_map.contains_key(name)
    }

    /// The index range of the elements of array `name`.
    pub fn array(&self, name: &str) -> Result<Range<usize>> {
        self.array_map
            .get(name)
            .cloned()
            .ok_or_else(|| SimVarError::UnknownVariable(name.to_string()))
    }

    pub fn variable(&self, index: usize) -> Result<&Variable> {
        match self.vars.get(index) {
            Some(Some(var)) => Ok(var),
            Some(None) => Err(SimVarError::Removed { index }),
            None => Err(self.out_of_range(index)),
        }
    }

    fn variable_mut(&mut self, index: usize) -> Result<&mut Variable> {
        let len = self.vars.len();
        match self.vars.get_mut(index) {
            Some(Some(var)) => Ok(var),
            Some(None) => Err(SimVarError::Removed { index }),
            None => Err(SimVarError::IndexOutOfRange { index, len }),
        }
    }

    fn out_of_range(&self, index: usize) -> SimVarError {
        SimVarError::IndexOutOfRange {
            index,
            len: self.vars.len(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&Value> {
        self.variable(index).map(|var| var.value())
    }

    pub fn get_real(&self, index: usize) -> Result<f64> {
        self.variable(index)?.as_real()
    }

    pub fn get_integer(&self, index: usize) -> Result<i64> {
        self.variable(index)?.as_integer()
    }

    pub fn get_boolean(&self, index: usize) -> Result<bool> {
        self.variable(index)?.as_boolean()
    }

    pub fn get_str(&self, index: usize) -> Result<&str> {
        self.variable(index)?.as_str()
    }

    /// Write a value and mark the index dirty. The value must match the variable's kind.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        self.variable_mut(index)?.set_value(value.into())?;
        self.tracker.mark_dirty(index);
        Ok(())
    }

    pub fn set_real(&mut self, index: usize, value: f64) -> Result<()> {
        self.variable_mut(index)?.set_real(value)?;
        self.tracker.mark_dirty(index);
        Ok(())
    }

    pub fn set_integer(&mut self, index: usize, value: i64) -> Result<()> {
        self.variable_mut(index)?.set_integer(value)?;
        self.tracker.mark_dirty(index);
        Ok(())
    }

    pub fn set_boolean(&mut self, index: usize, value: bool) -> Result<()> {
        self.variable_mut(index)?.set_boolean(value)?;
        self.tracker.mark_dirty(index);
        Ok(())
    }

    pub fn set_str(&mut self, index: usize, value: &str) -> Result<()> {
        self.variable_mut(index)?.set_str(value)?;
        self.tracker.mark_dirty(index);
        Ok(())
    }

    /// Read a contiguous block of real variables, e.g. the elements of an array.
    pub fn reals(&self, indices: Range<usize>) -> Result<Vec<f64>> {
        indices.map(|i| self.get_real(i)).collect()
    }

    pub fn state_count(&self) -> usize {
        self.state_indices.len()
    }

    pub fn state_indices(&self) -> &[usize] {
        self.state_indices.as_slice()
    }

    /// Copy the state variables, in index order, into a new vector.
    pub fn snapshot_states(&self) -> Vec<f64> {
        let mut states = vec![0.0; self.state_count()];
        self.fill_states(states.iter_mut());
        states
    }

    /// Copy the state variables into a caller-owned buffer of exactly `state_count()` values.
    pub fn snapshot_states_into(&self, states: &mut [f64]) -> Result<()> {
        self.check_state_len(states.len())?;
        self.fill_states(states.iter_mut());
        Ok(())
    }

    /// As [`snapshot_states_into`](Self::snapshot_states_into), for a solver-owned array.
    pub fn snapshot_states_view(&self, mut states: ArrayViewMut1<f64>) -> Result<()> {
        self.check_state_len(states.len())?;
        self.fill_states(states.iter_mut());
        Ok(())
    }

    fn fill_states<'a>(&self, states: impl Iterator<Item = &'a mut f64>) {
        for (x, &i) in states.zip(self.state_indices.iter()) {
            // state_indices only holds live Real variables
            if let Some(Some(var)) = self.vars.get(i) {
                *x = var.as_real().unwrap_or_default();
            }
        }
    }

    /// Write the state vector back in the order of `snapshot_states`. Nothing is written
    /// if the length is wrong.
    pub fn restore_states(&mut self, states: &[f64]) -> Result<()> {
        self.check_state_len(states.len())?;
        self.write_states(states.iter().copied())
    }

    /// As [`restore_states`](Self::restore_states), from a solver-owned array.
    pub fn restore_states_view(&mut self, states: ArrayView1<f64>) -> Result<()> {
        self.check_state_len(states.len())?;
        self.write_states(states.iter().copied())
    }

    fn write_states(&mut self, states: impl Iterator<Item = f64>) -> Result<()> {
        for (x, &i) in states.zip(self.state_indices.iter()) {
            if let Some(Some(var)) = self.vars.get_mut(i) {
                var.set_real(x)?;
                self.tracker.mark_dirty(i);
            }
        }
        Ok(())
    }

    fn check_state_len(&self, found: usize) -> Result<()> {
        if found == self.state_count() {
            Ok(())
        } else {
            Err(SimVarError::SizeMismatch {
                expected: self.state_count(),
                found,
            })
        }
    }

    /// Return every index written since the last drain, and clear the dirty set.
    pub fn drain_dirty(&mut self) -> BTreeSet<usize> {
        self.tracker.drain_dirty()
    }

    pub fn is_dirty(&self, index: usize) -> bool {
        self.tracker.is_dirty(index)
    }

    pub fn dirty_count(&self) -> usize {
        self.tracker.len()
    }

    /// Number of indices handed out, including removed ones.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.name_index_map.len()
    }

    /// Live variables in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter().flatten()
    }

    pub fn format_values(&self) -> String {
        let mut s = String::new();
        s += "[";
        for var in self.iter() {
            s += &format!("{}: {}, ", var.name(), var.value());
        }
        s += "]";
        s
    }
}

#[cfg(test)]
mod tests {
    use super::{VariableRegistry, MAX_ARRAY_LEN};
    use crate::error::SimVarError;
    use crate::parser::{Declaration, ModelDescription, StringSpan};
    use crate::variable::{Value, VarKind};
    use ndarray::Array1;
    use std::collections::BTreeSet;

    fn registry() -> VariableRegistry {
        let mut registry = VariableRegistry::new();
        registry.declare("x", VarKind::Real, true, false).unwrap();
        registry.declare("k", VarKind::Integer, false, true).unwrap();
        registry.declare("y", VarKind::Real, true, false).unwrap();
        registry.declare("on", VarKind::Boolean, false, true).unwrap();
        registry
    }

    #[test]
    fn declare_and_resolve() {
        let mut registry = VariableRegistry::new();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            let index = registry.declare(name, VarKind::Real, false, false).unwrap();
            assert_eq!(index, i);
            assert_eq!(registry.resolve(name).unwrap(), index);
        }
        assert_eq!(
            registry.resolve("d"),
            Err(SimVarError::UnknownVariable("d".to_string()))
        );
    }

    #[test]
    fn duplicate_leaves_registry_unchanged() {
        let mut registry = registry();
        registry.set_real(0, 1.5).unwrap();
        let before = registry.format_values();
        assert_eq!(
            registry.declare("k", VarKind::Real, true, false),
            Err(SimVarError::DuplicateName("k".to_string()))
        );
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.state_count(), 2);
        assert_eq!(registry.format_values(), before);
        assert_eq!(registry.variable(1).unwrap().kind(), VarKind::Integer);
    }

    #[test]
    fn states_must_be_real() {
        let mut registry = VariableRegistry::new();
        assert_eq!(
            registry.declare("n", VarKind::Integer, true, false),
            Err(SimVarError::NotReal {
                name: "n".to_string(),
                kind: VarKind::Integer
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn state_snapshot_tracks_writes() {
        let mut registry = VariableRegistry::new();
        assert_eq!(registry.declare("x", VarKind::Real, true, false).unwrap(), 0);
        assert_eq!(registry.declare("k", VarKind::Integer, false, false).unwrap(), 1);
        assert_eq!(registry.snapshot_states(), vec![0.0]);
        registry.set(0, 3.5).unwrap();
        assert_eq!(registry.snapshot_states(), vec![3.5]);
        assert_eq!(registry.drain_dirty(), BTreeSet::from([0]));
    }

    #[test]
    fn get_set_bounds_and_types() {
        let mut registry = registry();
        registry.set(1, 4i64).unwrap();
        assert_eq!(registry.get(1).unwrap(), &Value::Integer(4));
        assert_eq!(
            registry.get(9),
            Err(SimVarError::IndexOutOfRange { index: 9, len: 4 })
        );
        assert_eq!(
            registry.set(9, 1.0),
            Err(SimVarError::IndexOutOfRange { index: 9, len: 4 })
        );
        registry.drain_dirty();
        assert_eq!(
            registry.set(3, 1.0),
            Err(SimVarError::type_mismatch(
                "on",
                VarKind::Boolean,
                VarKind::Real
            ))
        );
        // a rejected write is not a write
        assert!(!registry.is_dirty(3));
        assert!(registry.drain_dirty().is_empty());
    }

    #[test]
    fn dirty_reported_once() {
        let mut registry = registry();
        registry.set_real(2, 1.0).unwrap();
        registry.set_real(2, 2.0).unwrap();
        registry.set_boolean(3, true).unwrap();
        assert_eq!(registry.dirty_count(), 2);
        assert_eq!(registry.get_real(2).unwrap(), 2.0);
        assert_eq!(registry.drain_dirty(), BTreeSet::from([2, 3]));
        assert!(registry.drain_dirty().is_empty());
    }

    #[test]
    fn snapshot_in_index_order() {
        let mut registry = registry();
        registry.set_real(0, 1.0).unwrap();
        registry.set_real(2, 2.0).unwrap();
        assert_eq!(registry.state_indices(), &[0, 2]);
        assert_eq!(registry.snapshot_states(), vec![1.0, 2.0]);
        assert_eq!(registry.snapshot_states(), vec![1.0, 2.0]);
        let mut buf = [0.0; 2];
        registry.snapshot_states_into(&mut buf).unwrap();
        assert_eq!(buf, [1.0, 2.0]);
        assert_eq!(
            registry.snapshot_states_into(&mut [0.0; 3]),
            Err(SimVarError::SizeMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn restore_round_trip() {
        let mut registry = registry();
        registry.restore_states(&[0.25, -4.0]).unwrap();
        assert_eq!(registry.get_real(0).unwrap(), 0.25);
        assert_eq!(registry.get_real(2).unwrap(), -4.0);
        assert_eq!(registry.drain_dirty(), BTreeSet::from([0, 2]));

        let snapshot = registry.snapshot_states();
        registry.restore_states(&snapshot).unwrap();
        assert_eq!(registry.snapshot_states(), snapshot);

        assert_eq!(
            registry.restore_states(&[1.0]),
            Err(SimVarError::SizeMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(registry.snapshot_states(), snapshot);
    }

    #[test]
    fn arrays() {
        let mut registry = registry();
        let range = registry
            .declare_array("p", VarKind::Real, 3, true, false)
            .unwrap();
        assert_eq!(range, 4..7);
        assert_eq!(registry.array("p").unwrap(), 4..7);
        assert_eq!(registry.resolve("p[1]").unwrap(), 4);
        assert_eq!(registry.resolve("p[3]").unwrap(), 6);
        assert_eq!(registry.state_indices(), &[0, 2, 4, 5, 6]);
        registry.set_real(5, 2.0).unwrap();
        assert_eq!(registry.reals(range).unwrap(), vec![0.0, 2.0, 0.0]);

        assert_eq!(
            registry.declare_array("p", VarKind::Real, 2, false, false),
            Err(SimVarError::DuplicateName("p".to_string()))
        );
        assert_eq!(
            registry.declare_array("q", VarKind::Real, 0, false, false),
            Err(SimVarError::SizeMismatch {
                expected: 1,
                found: 0
            })
        );
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn array_conflict_declares_nothing() {
        let mut registry = VariableRegistry::new();
        registry.declare("v[2]", VarKind::Real, false, false).unwrap();
        assert_eq!(
            registry.declare_array("v", VarKind::Real, 3, false, false),
            Err(SimVarError::DuplicateName("v[2]".to_string()))
        );
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("v[1]"));
    }

    #[test]
    fn removal_is_a_tombstone() {
        let mut registry = registry();
        registry.set_real(0, 9.0).unwrap();
        registry.remove("x").unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.live_count(), 3);
        assert_eq!(
            registry.resolve("x"),
            Err(SimVarError::UnknownVariable("x".to_string()))
        );
        assert_eq!(registry.get(0), Err(SimVarError::Removed { index: 0 }));
        assert_eq!(registry.set(0, 1.0), Err(SimVarError::Removed { index: 0 }));
        assert_eq!(registry.state_indices(), &[2]);
        assert!(registry.drain_dirty().is_empty());

        // the retired index is not reused, and the name is free again
        let index = registry.declare("x", VarKind::Real, true, false).unwrap();
        assert_eq!(index, 4);
        assert_eq!(registry.state_indices(), &[2, 4]);
        assert_eq!(
            registry.iter().map(|v| v.index()).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(
            registry.remove("nope"),
            Err(SimVarError::UnknownVariable("nope".to_string()))
        );
    }

    #[test]
    fn array_elements_are_not_removed_alone() {
        let mut registry = VariableRegistry::new();
        let range = registry
            .declare_array("p", VarKind::Real, 3, false, false)
            .unwrap();
        assert_eq!(registry.array_of(1), Some("p"));
        assert_eq!(
            registry.remove("p[2]"),
            Err(SimVarError::ArrayElement {
                name: "p[2]".to_string(),
                array: "p".to_string()
            })
        );
        assert_eq!(
            registry.declare("p[2]", VarKind::Real, false, false),
            Err(SimVarError::DuplicateName("p[2]".to_string()))
        );
        assert_eq!(registry.array("p").unwrap(), range);
        assert_eq!(registry.reals(range).unwrap(), vec![0.0; 3]);
        assert_eq!(registry.live_count(), 3);
    }

    #[test]
    fn remove_array() {
        let mut registry = VariableRegistry::new();
        registry.declare_array("p", VarKind::Real, 2, true, false).unwrap();
        registry.remove("p").unwrap();
        assert_eq!(registry.state_count(), 0);
        assert!(registry.array("p").is_err());
        assert!(!registry.contains("p[1]"));
        assert_eq!(registry.array_of(0), None);
    }

    #[test]
    fn array_length_is_capped() {
        let mut registry = VariableRegistry::new();
        assert_eq!(
            registry.declare_array("p", VarKind::Real, MAX_ARRAY_LEN + 1, false, false),
            Err(SimVarError::SizeMismatch {
                expected: MAX_ARRAY_LEN,
                found: MAX_ARRAY_LEN + 1
            })
        );
        assert!(registry.is_empty());
    }

    fn array_declaration(name: &str, len: usize) -> Declaration {
        Declaration {
            name: name.to_string(),
            kind: VarKind::Real,
            len: Some(len),
            start: None,
            is_state: false,
            is_discrete: false,
            span: StringSpan { pos_start: 0, pos_end: 0 },
        }
    }

    #[test]
    fn huge_description_is_an_error() {
        let model = ModelDescription {
            name: "m".to_string(),
            declarations: vec![array_declaration("p", usize::MAX)],
        };
        assert_eq!(
            VariableRegistry::from_description(&model).unwrap_err(),
            SimVarError::SizeMismatch {
                expected: MAX_ARRAY_LEN,
                found: usize::MAX
            }
        );
        let model = ModelDescription {
            name: "m".to_string(),
            declarations: vec![array_declaration("p", 2), array_declaration("q", usize::MAX)],
        };
        assert!(matches!(
            VariableRegistry::from_description(&model),
            Err(SimVarError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn state_views() {
        let mut registry = registry();
        let mut x = Array1::zeros(2);
        registry.restore_states_view(Array1::from(vec![1.0, 2.0]).view()).unwrap();
        registry.snapshot_states_view(x.view_mut()).unwrap();
        assert_eq!(x.to_vec(), vec![1.0, 2.0]);
        assert_eq!(registry.drain_dirty(), BTreeSet::from([0, 2]));
        assert_eq!(
            registry.snapshot_states_view(Array1::zeros(3).view_mut()),
            Err(SimVarError::SizeMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn sealed_structure() {
        let mut registry = registry();
        registry.seal();
        assert!(registry.is_sealed());
        assert_eq!(
            registry.declare("z", VarKind::Real, false, false),
            Err(SimVarError::Sealed {
                name: "z".to_string()
            })
        );
        assert!(matches!(
            registry.declare_array("w", VarKind::Real, 2, false, false),
            Err(SimVarError::Sealed { .. })
        ));
        assert!(matches!(
            registry.remove("x"),
            Err(SimVarError::Sealed { .. })
        ));
        // values stay writable
        registry.set_integer(1, 3).unwrap();
        assert_eq!(registry.get_integer(1).unwrap(), 3);
    }

    #[test]
    fn strings() {
        let mut registry = VariableRegistry::new();
        let i = registry.declare("label", VarKind::String, false, false).unwrap();
        registry.set(i, "ball").unwrap();
        assert_eq!(registry.get_str(i).unwrap(), "ball");
        assert_eq!(registry.format_values(), "[label: \"ball\", ]");
        registry.drain_dirty();
        registry.set_str(i, "C:\\dir").unwrap();
        assert_eq!(registry.get_str(i).unwrap(), "C:\\dir");
        assert_eq!(registry.format_values(), "[label: \"C:\\dir\", ]");
        assert_eq!(registry.drain_dirty(), BTreeSet::from([i]));
        assert_eq!(
            registry.set_str(i + 1, "x"),
            Err(SimVarError::IndexOutOfRange { index: 1, len: 1 })
        );
        let n = registry.declare("n", VarKind::Integer, false, false).unwrap();
        assert_eq!(
            registry.set_str(n, "1"),
            Err(SimVarError::type_mismatch("n", VarKind::Integer, VarKind::String))
        );
        assert!(!registry.is_dirty(n));
    }
}
