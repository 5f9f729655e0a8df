//! # Lodestar
//!
//! View-model addressed navigation and parameter resolution for
//! component-based UIs. Application code navigates with **identities**
//! (view-model types or opaque keys) instead of literal URI strings:
//!
//! - [`RouteTable`]: immutable identity-to-route mappings, built once at
//!   startup from explicit registrations and pluggable sources
//! - [`NavigationManager`]: resolves an identity (plus an optional
//!   relative path/query) to a concrete URI and drives the injected
//!   [`UriNavigator`] primitive
//! - [`ParameterResolver`]: pushes externally supplied name/value
//!   parameters onto views and view-models, with a per-type binding cache
//!   that is computed at most once even under concurrent first access
//! - [`NavLink`]: active-link state machine over the current location
//!
//! ## Example
//!
//! ```
//! use lodestar::{MemoryNavigator, NavigationManager, RouteTable, UriNavigator, ViewModel};
//! use std::sync::Arc;
//!
//! struct ProductsViewModel;
//! impl ViewModel for ProductsViewModel {}
//!
//! let table = RouteTable::builder()
//!     .keyed_route::<ProductsViewModel>("products", "/products")
//!     .build()?;
//!
//! let navigator = Arc::new(MemoryNavigator::default());
//! let manager = NavigationManager::new(Arc::new(table), navigator.clone());
//!
//! manager.navigate_to_with::<ProductsViewModel>("123/?sort=name")?;
//! assert_eq!(navigator.current_uri(), "/products/123?sort=name");
//! # Ok::<(), lodestar::NavigationError>(())
//! ```

pub mod config;
pub mod error;
pub mod link;
pub mod navigator;
pub mod params;
pub mod route;
pub mod uri;

// Re-export the primary surface
pub use config::{NavigationConfig, ParameterResolveMode};
pub use error::{NavigationError, ParameterError};
pub use link::{should_match, LinkMatchMode, NavLink};
pub use navigator::{
    ListenerId, LocationListener, MemoryNavigator, NavigationManager, NavigationOptions,
    UriNavigator,
};
pub use params::{
    NavParams, ParameterDescriptor, ParameterResolver, ParameterSet, ResolveTarget, SetterFn,
};
pub use route::{RouteRegistration, RouteSource, RouteTable, RouteTableBuilder, ViewModel, ViewModelId};
pub use uri::build_uri;

/// A collection of useful types most applications might need.
pub mod prelude {
    pub use crate::config::{NavigationConfig, ParameterResolveMode};
    pub use crate::error::{NavigationError, ParameterError};
    pub use crate::link::{LinkMatchMode, NavLink};
    pub use crate::navigator::{NavigationManager, NavigationOptions, UriNavigator};
    pub use crate::params::{NavParams, ParameterResolver, ParameterSet};
    pub use crate::route::{RouteTable, ViewModel};
}

// Support for code generated by lodestar-derive; not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use serde_json;
    pub use serde_json::{from_value, Value};
}
