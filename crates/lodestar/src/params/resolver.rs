// File: src/params/resolver.rs
// Purpose: Pushes externally supplied parameters onto views and view-models

use super::{ParameterSet, ResolveTarget, SetterCache};
use crate::config::ParameterResolveMode;
use crate::error::ParameterError;

/// Binds external name/value parameter sets onto a view and/or its
/// view-model, according to the configured [`ParameterResolveMode`].
///
/// The resolver owns the per-type setter cache; one resolver instance is
/// intended to live for the process lifetime and be shared across
/// component activations.
pub struct ParameterResolver {
    mode: ParameterResolveMode,
    cache: SetterCache,
}

impl ParameterResolver {
    pub fn new(mode: ParameterResolveMode) -> Self {
        Self {
            mode,
            cache: SetterCache::new(),
        }
    }

    /// A resolver using the mode from a [`NavigationConfig`].
    pub fn from_config(config: &crate::config::NavigationConfig) -> Self {
        Self::new(config.resolve_mode)
    }

    /// The configured resolve mode.
    pub fn mode(&self) -> ParameterResolveMode {
        self.mode
    }

    /// Resolve `parameters` onto the given view and view-model.
    ///
    /// Returns `Ok(false)` when resolution is disabled (mode
    /// [`ParameterResolveMode::None`]), `Ok(true)` when the parameters
    /// were handled. Under `ViewAndViewModel` the view's own declared
    /// parameters are bound first, then the view-model's.
    pub fn set_parameters(
        &self,
        view: &mut dyn ResolveTarget,
        view_model: &mut dyn ResolveTarget,
        parameters: &ParameterSet,
    ) -> Result<bool, ParameterError> {
        match self.mode {
            ParameterResolveMode::None => Ok(false),
            ParameterResolveMode::ViewModelOnly => {
                self.bind(view_model, parameters)?;
                Ok(true)
            }
            ParameterResolveMode::ViewAndViewModel => {
                self.bind(view, parameters)?;
                self.bind(view_model, parameters)?;
                Ok(true)
            }
        }
    }

    /// Bind onto a single target, building and memoizing its binding on
    /// first use.
    pub fn bind(
        &self,
        target: &mut dyn ResolveTarget,
        parameters: &ParameterSet,
    ) -> Result<(), ParameterError> {
        let binding = self.cache.binding_for(target)?;
        binding.apply(target.as_any_mut(), parameters)
    }
}
