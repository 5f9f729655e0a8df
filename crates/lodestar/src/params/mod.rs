//! Parameter binding: declared parameter descriptors, per-type bindings,
//! and the memoized setter cache.
//!
//! A type opts into parameter resolution by implementing [`NavParams`],
//! either by hand or through `#[derive(NavParams)]`. The declaration is
//! plain data: a table of [`ParameterDescriptor`]s, each carrying the
//! external parameter name and a setter. The first resolution of a type
//! compiles its descriptors into a case-insensitive [`ParameterBinding`];
//! the result (success or failure) is memoized per type and computed at
//! most once even under concurrent first access.

mod resolver;

pub use resolver::ParameterResolver;

use crate::error::ParameterError;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Writes one externally supplied value onto a target instance.
///
/// The target arrives type-erased; the setter downcasts to the concrete
/// type and converts the value through serde.
pub type SetterFn = fn(&mut dyn Any, &Value) -> Result<(), String>;

/// The declaration of one bindable parameter: its external name and the
/// setter that assigns it.
#[derive(Clone, Copy)]
pub struct ParameterDescriptor {
    /// External parameter name (matched case-insensitively)
    pub name: &'static str,
    /// Setter invoked with the supplied value
    pub set: SetterFn,
}

impl ParameterDescriptor {
    pub const fn new(name: &'static str, set: SetterFn) -> Self {
        Self { name, set }
    }
}

impl std::fmt::Debug for ParameterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// Declares which parameters a type receives from the navigation layer.
///
/// Usually generated with `#[derive(NavParams)]`:
///
/// ```rust,ignore
/// #[derive(Default, NavParams)]
/// struct EditViewModel {
///     #[param]
///     id: u32,
///     #[param(name = "Title")]
///     title: String,
///     untouched: String,
/// }
/// ```
pub trait NavParams: Any {
    /// The declared parameter table for this type.
    fn parameter_descriptors() -> &'static [ParameterDescriptor]
    where
        Self: Sized;
}

/// Object-safe resolution target, implemented for every [`NavParams`] type.
///
/// This is the seam the resolver works through: it erases the concrete
/// type while keeping the identity and descriptor table reachable.
pub trait ResolveTarget: Any {
    fn descriptors(&self) -> &'static [ParameterDescriptor];
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn target_type_id(&self) -> TypeId;
    fn target_type_name(&self) -> &'static str;
}

impl<T: NavParams> ResolveTarget for T {
    fn descriptors(&self) -> &'static [ParameterDescriptor] {
        T::parameter_descriptors()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn target_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn target_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Externally supplied name/value parameter pairs.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    values: HashMap<String, Value>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any previous value under the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, Value>> for ParameterSet {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// The compiled binding for one concrete type: external name (folded to
/// lowercase) → setter.
#[derive(Debug)]
pub(crate) struct ParameterBinding {
    type_name: &'static str,
    setters: HashMap<String, SetterFn>,
}

impl ParameterBinding {
    /// Compile a descriptor table, rejecting case-insensitive duplicates.
    fn build(
        type_name: &'static str,
        descriptors: &[ParameterDescriptor],
    ) -> Result<Self, ParameterError> {
        let mut setters = HashMap::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let folded = descriptor.name.to_ascii_lowercase();
            if setters.insert(folded, descriptor.set).is_some() {
                return Err(ParameterError::DuplicateName {
                    type_name,
                    name: descriptor.name.to_string(),
                });
            }
        }
        Ok(Self { type_name, setters })
    }

    /// Push every matching parameter onto `target`. Parameters with no
    /// matching declaration are ignored.
    pub(crate) fn apply(
        &self,
        target: &mut dyn Any,
        parameters: &ParameterSet,
    ) -> Result<(), ParameterError> {
        for (name, value) in parameters.iter() {
            let Some(setter) = self.setters.get(&name.to_ascii_lowercase()) else {
                continue;
            };
            setter(target, value).map_err(|reason| ParameterError::Assignment {
                type_name: self.type_name,
                name: name.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}

type BindingResult = Result<Arc<ParameterBinding>, ParameterError>;

/// Per-type memoization of compiled bindings.
///
/// The map stores one once-cell per type; the cell, not the map, runs the
/// compilation, so racing first callers agree on a single computation and
/// every later caller reuses the memoized result, including a memoized
/// failure, which re-surfaces deterministically.
#[derive(Default)]
pub(crate) struct SetterCache {
    entries: RwLock<HashMap<TypeId, Arc<OnceCell<BindingResult>>>>,
}

impl SetterCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn binding_for(&self, target: &dyn ResolveTarget) -> BindingResult {
        let type_id = target.target_type_id();

        let cell = {
            let entries = self.entries.read().expect("setter cache lock poisoned");
            entries.get(&type_id).cloned()
        };
        let cell = match cell {
            Some(cell) => cell,
            None => {
                let mut entries = self.entries.write().expect("setter cache lock poisoned");
                entries
                    .entry(type_id)
                    .or_insert_with(|| Arc::new(OnceCell::new()))
                    .clone()
            }
        };

        cell.get_or_init(|| {
            tracing::debug!("compiling parameter binding for {}", target.target_type_name());
            ParameterBinding::build(target.target_type_name(), target.descriptors()).map(Arc::new)
        })
        .clone()
    }
}
