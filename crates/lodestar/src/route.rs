// File: src/route.rs
// Purpose: Route registrations and the immutable view-model route table

use crate::error::NavigationError;
use crate::uri::apply_base_path;
use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Marker for types addressable by the navigation layer.
///
/// A view-model is a plain struct; implementing this marker makes it usable
/// as a navigation identity with [`RouteTable`] and
/// [`NavigationManager`](crate::NavigationManager).
pub trait ViewModel: Any {}

/// The identity of a view-model type: its `TypeId` plus the type name used
/// in diagnostics and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewModelId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ViewModelId {
    /// The identity of `VM`.
    pub fn of<VM: ViewModel>() -> Self {
        Self {
            type_id: TypeId::of::<VM>(),
            type_name: std::any::type_name::<VM>(),
        }
    }

    /// Full name of the identified type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// One startup registration: a view-model identity, its declared route
/// template, and an optional opaque navigation key.
///
/// Registrations are plain data; they are collected by
/// [`RouteTableBuilder`] and frozen into a [`RouteTable`].
#[derive(Debug, Clone)]
pub struct RouteRegistration {
    /// The addressable view-model
    pub view_model: ViewModelId,
    /// Declared route template, before base-path composition
    pub template: String,
    /// Optional key for keyed navigation
    pub key: Option<String>,
}

impl RouteRegistration {
    /// A registration mapping `VM` to `template`.
    pub fn new<VM: ViewModel>(template: impl Into<String>) -> Self {
        Self {
            view_model: ViewModelId::of::<VM>(),
            template: template.into(),
            key: None,
        }
    }

    /// Additionally register the route under an opaque key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// A provider contributing a batch of route registrations at build time.
///
/// Sources are the pluggable discovery seam: a module, a plugin, or
/// generated registration code can each contribute a batch. A failing
/// source is logged and skipped; it never fails the build as a whole.
pub trait RouteSource {
    /// Name used in diagnostics when the source is skipped.
    fn name(&self) -> &str;

    /// The registrations this source contributes.
    fn routes(&self) -> anyhow::Result<Vec<RouteRegistration>>;
}

/// Builder collecting registrations and sources, frozen by [`build`].
///
/// [`build`]: RouteTableBuilder::build
#[derive(Default)]
pub struct RouteTableBuilder {
    base_path: Option<String>,
    registrations: Vec<RouteRegistration>,
    sources: Vec<Box<dyn RouteSource>>,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every resolved route with `base_path` (subpath hosting).
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Apply the routing-relevant settings from a [`NavigationConfig`].
    pub fn with_config(mut self, config: &crate::config::NavigationConfig) -> Self {
        self.base_path = config.base_path.clone();
        self
    }

    /// Register `VM` under `template`.
    pub fn route<VM: ViewModel>(mut self, template: impl Into<String>) -> Self {
        self.registrations.push(RouteRegistration::new::<VM>(template));
        self
    }

    /// Register `VM` under `template`, additionally addressable by `key`.
    pub fn keyed_route<VM: ViewModel>(
        mut self,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.registrations
            .push(RouteRegistration::new::<VM>(template).with_key(key));
        self
    }

    /// Add a registration record directly.
    pub fn registration(mut self, registration: RouteRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Add a registration source. Sources are drained at build time; a
    /// source that fails is logged at warn level and skipped.
    pub fn source(mut self, source: impl RouteSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Freeze the collected registrations into an immutable [`RouteTable`].
    ///
    /// Direct registrations with an empty template or key fail the build
    /// with [`NavigationError::InvalidArgument`]. Source failures (and
    /// sources containing invalid records) are logged and skipped.
    pub fn build(self) -> Result<RouteTable, NavigationError> {
        let mut table = RouteTable::default();
        let base_path = self.base_path.as_deref();

        for registration in &self.registrations {
            validate(registration)?;
        }
        for registration in self.registrations {
            table.insert(base_path, registration);
        }

        for source in self.sources {
            match source.routes() {
                Ok(registrations) => {
                    // Validate the whole batch before inserting anything, so
                    // a bad source never contributes a partial batch.
                    if let Some(err) = registrations.iter().find_map(|r| validate(r).err()) {
                        tracing::warn!(
                            "skipping route source `{}` with invalid registration: {}",
                            source.name(),
                            err
                        );
                        continue;
                    }
                    for registration in registrations {
                        table.insert(base_path, registration);
                    }
                }
                Err(err) => {
                    tracing::warn!("skipping failed route source `{}`: {:#}", source.name(), err);
                }
            }
        }

        tracing::debug!(
            "route table built: {} type routes, {} keyed routes",
            table.by_type.len(),
            table.by_key.len()
        );
        Ok(table)
    }
}

fn validate(registration: &RouteRegistration) -> Result<(), NavigationError> {
    if registration.template.trim().is_empty() {
        return Err(NavigationError::InvalidArgument {
            what: "route template",
            reason: format!(
                "empty template registered for `{}`",
                registration.view_model.type_name()
            ),
        });
    }
    if let Some(key) = &registration.key {
        if key.trim().is_empty() {
            return Err(NavigationError::InvalidArgument {
                what: "navigation key",
                reason: format!(
                    "empty key registered for `{}`",
                    registration.view_model.type_name()
                ),
            });
        }
    }
    Ok(())
}

/// Immutable mappings from view-model identity and navigation key to the
/// effective route. Built once at startup, read for the process lifetime.
#[derive(Debug, Default)]
pub struct RouteTable {
    by_type: HashMap<ViewModelId, String>,
    by_key: HashMap<String, String>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// First-wins insertion into both maps.
    fn insert(&mut self, base_path: Option<&str>, registration: RouteRegistration) {
        let route = apply_base_path(base_path, &registration.template);
        let id = registration.view_model;

        match self.by_type.entry(id) {
            Entry::Vacant(entry) => {
                tracing::debug!("route registered: {} -> {}", id.type_name(), route);
                entry.insert(route.clone());
            }
            Entry::Occupied(_) => {
                tracing::debug!(
                    "ignoring duplicate route registration for {}",
                    id.type_name()
                );
            }
        }

        if let Some(key) = registration.key {
            match self.by_key.entry(key) {
                Entry::Vacant(entry) => {
                    tracing::debug!("keyed route registered: `{}` -> {}", entry.key(), route);
                    entry.insert(route);
                }
                Entry::Occupied(entry) => {
                    tracing::debug!(
                        "ignoring duplicate keyed route registration for `{}`",
                        entry.key()
                    );
                }
            }
        }
    }

    /// The route registered for `VM`, if any.
    pub fn route_for<VM: ViewModel>(&self) -> Option<&str> {
        self.route_for_id(&ViewModelId::of::<VM>())
    }

    /// The route registered for a view-model identity, if any.
    pub fn route_for_id(&self, id: &ViewModelId) -> Option<&str> {
        self.by_type.get(id).map(String::as_str)
    }

    /// The route registered under `key`, if any.
    pub fn route_for_key(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    /// Read-only view of the type → route map.
    pub fn types(&self) -> &HashMap<ViewModelId, String> {
        &self.by_type
    }

    /// Read-only view of the key → route map.
    pub fn keys(&self) -> &HashMap<String, String> {
        &self.by_key
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty() && self.by_key.is_empty()
    }
}
