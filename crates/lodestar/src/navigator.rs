// File: src/navigator.rs
// Purpose: Navigation primitive boundary and the view-model navigation manager

use crate::error::NavigationError;
use crate::route::{RouteTable, ViewModel, ViewModelId};
use crate::uri::build_uri;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Options passed through verbatim to the underlying navigation primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationOptions {
    /// Bypass client-side routing and force a full load
    pub force_load: bool,
    /// Replace the current history entry instead of pushing a new one
    pub replace_history: bool,
    /// Opaque state attached to the new history entry
    pub history_state: Option<serde_json::Value>,
}

impl NavigationOptions {
    pub fn force_load(mut self) -> Self {
        self.force_load = true;
        self
    }

    pub fn replace_history(mut self) -> Self {
        self.replace_history = true;
        self
    }

    pub fn with_history_state(mut self, state: serde_json::Value) -> Self {
        self.history_state = Some(state);
        self
    }
}

/// Callback invoked with the new absolute URI on every location change.
pub type LocationListener = Box<dyn Fn(&str) + Send + Sync>;

/// Identifies a location-change subscription for later removal.
pub type ListenerId = usize;

/// The low-level URI navigation primitive this subsystem wraps.
///
/// Implementations own the real browser/OS navigation and any asynchrony
/// it involves; everything at this boundary is synchronous. The crate
/// ships [`MemoryNavigator`] for tests and headless hosts.
pub trait UriNavigator: Send + Sync {
    /// The current absolute URI.
    fn current_uri(&self) -> String;

    /// Navigate to `uri`, applying `options` verbatim.
    fn navigate(&self, uri: &str, options: &NavigationOptions);

    /// Subscribe to location changes. The listener fires after the
    /// location has changed, with the new URI.
    fn subscribe(&self, listener: LocationListener) -> ListenerId;

    /// Remove a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);
}

/// In-memory [`UriNavigator`]: tracks a current URI, records every
/// navigation, and fires location-change listeners synchronously.
pub struct MemoryNavigator {
    current: Mutex<String>,
    log: Mutex<Vec<(String, NavigationOptions)>>,
    listeners: Mutex<Vec<(ListenerId, LocationListener)>>,
    next_listener: AtomicUsize,
}

impl MemoryNavigator {
    pub fn new(initial_uri: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial_uri.into()),
            log: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicUsize::new(0),
        }
    }

    /// Move the location without recording a navigation, as an external
    /// actor (back button, address bar) would. Listeners still fire.
    pub fn set_uri(&self, uri: impl Into<String>) {
        let uri = uri.into();
        *self.current.lock().expect("navigator lock poisoned") = uri.clone();
        self.notify(&uri);
    }

    /// Every `(uri, options)` pair passed to [`UriNavigator::navigate`],
    /// in order.
    pub fn navigations(&self) -> Vec<(String, NavigationOptions)> {
        self.log.lock().expect("navigator lock poisoned").clone()
    }

    fn notify(&self, uri: &str) {
        let listeners = self.listeners.lock().expect("navigator lock poisoned");
        for (_, listener) in listeners.iter() {
            listener(uri);
        }
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl UriNavigator for MemoryNavigator {
    fn current_uri(&self) -> String {
        self.current.lock().expect("navigator lock poisoned").clone()
    }

    fn navigate(&self, uri: &str, options: &NavigationOptions) {
        *self.current.lock().expect("navigator lock poisoned") = uri.to_string();
        self.log
            .lock()
            .expect("navigator lock poisoned")
            .push((uri.to_string(), options.clone()));
        self.notify(uri);
    }

    fn subscribe(&self, listener: LocationListener) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("navigator lock poisoned")
            .push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners
            .lock()
            .expect("navigator lock poisoned")
            .retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Translates view-model identities into URIs and performs navigation
/// through the injected [`UriNavigator`].
///
/// Reads the [`RouteTable`] on every call; both collaborators are shared
/// and the manager itself is cheap to clone.
#[derive(Clone)]
pub struct NavigationManager {
    routes: Arc<RouteTable>,
    navigator: Arc<dyn UriNavigator>,
}

impl NavigationManager {
    pub fn new(routes: Arc<RouteTable>, navigator: Arc<dyn UriNavigator>) -> Self {
        Self { routes, navigator }
    }

    /// The route registered for `VM`.
    pub fn get_uri<VM: ViewModel>(&self) -> Result<&str, NavigationError> {
        self.routes
            .route_for::<VM>()
            .ok_or(NavigationError::RouteNotFound {
                type_name: ViewModelId::of::<VM>().type_name(),
            })
    }

    /// The route registered under `key`.
    pub fn get_uri_by_key(&self, key: &str) -> Result<&str, NavigationError> {
        self.routes
            .route_for_key(key)
            .ok_or_else(|| NavigationError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Navigate to the route registered for `VM`.
    pub fn navigate_to<VM: ViewModel>(&self) -> Result<(), NavigationError> {
        self.navigate_to_full::<VM>("", NavigationOptions::default())
    }

    /// Navigate to `VM`'s route composed with a relative path/query.
    pub fn navigate_to_with<VM: ViewModel>(&self, relative: &str) -> Result<(), NavigationError> {
        self.navigate_to_full::<VM>(relative, NavigationOptions::default())
    }

    /// Navigate to `VM`'s route with explicit options.
    pub fn navigate_to_opts<VM: ViewModel>(
        &self,
        options: NavigationOptions,
    ) -> Result<(), NavigationError> {
        self.navigate_to_full::<VM>("", options)
    }

    /// Navigate to `VM`'s route composed with a relative path/query and
    /// explicit options.
    pub fn navigate_to_full<VM: ViewModel>(
        &self,
        relative: &str,
        options: NavigationOptions,
    ) -> Result<(), NavigationError> {
        let base = self.get_uri::<VM>()?;
        self.go(base, relative, options);
        Ok(())
    }

    /// Navigate to the route registered under `key`.
    pub fn navigate_to_key(&self, key: &str) -> Result<(), NavigationError> {
        self.navigate_to_key_full(key, "", NavigationOptions::default())
    }

    /// Navigate to `key`'s route composed with a relative path/query.
    pub fn navigate_to_key_with(
        &self,
        key: &str,
        relative: &str,
    ) -> Result<(), NavigationError> {
        self.navigate_to_key_full(key, relative, NavigationOptions::default())
    }

    /// Navigate to `key`'s route with explicit options.
    pub fn navigate_to_key_opts(
        &self,
        key: &str,
        options: NavigationOptions,
    ) -> Result<(), NavigationError> {
        self.navigate_to_key_full(key, "", options)
    }

    /// Navigate to `key`'s route composed with a relative path/query and
    /// explicit options.
    pub fn navigate_to_key_full(
        &self,
        key: &str,
        relative: &str,
        options: NavigationOptions,
    ) -> Result<(), NavigationError> {
        let base = self.get_uri_by_key(key)?;
        self.go(base, relative, options);
        Ok(())
    }

    fn go(&self, base: &str, relative: &str, options: NavigationOptions) {
        let target = build_uri(base, relative);
        tracing::debug!("navigating to {}", target);
        self.navigator.navigate(&target, &options);
    }

    /// The shared route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The wrapped navigation primitive.
    pub fn navigator(&self) -> &Arc<dyn UriNavigator> {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteTable;

    struct ProductsViewModel;
    impl ViewModel for ProductsViewModel {}

    struct OrphanViewModel;
    impl ViewModel for OrphanViewModel {}

    fn manager() -> (NavigationManager, Arc<MemoryNavigator>) {
        let table = RouteTable::builder()
            .keyed_route::<ProductsViewModel>("products", "/products")
            .build()
            .unwrap();
        let navigator = Arc::new(MemoryNavigator::default());
        (
            NavigationManager::new(Arc::new(table), navigator.clone()),
            navigator,
        )
    }

    #[test]
    fn test_get_uri_returns_registered_route() {
        let (manager, _) = manager();
        assert_eq!(manager.get_uri::<ProductsViewModel>().unwrap(), "/products");
        assert_eq!(manager.get_uri_by_key("products").unwrap(), "/products");
    }

    #[test]
    fn test_get_uri_unknown_type_names_identity() {
        let (manager, _) = manager();
        let err = manager.get_uri::<OrphanViewModel>().unwrap_err();
        assert!(err.to_string().contains("OrphanViewModel"));
    }

    #[test]
    fn test_navigate_composes_relative_uri() {
        let (manager, navigator) = manager();
        manager
            .navigate_to_with::<ProductsViewModel>("123/?sort=name")
            .unwrap();

        assert_eq!(navigator.current_uri(), "/products/123?sort=name");
    }

    #[test]
    fn test_options_pass_through_verbatim() {
        let (manager, navigator) = manager();
        let options = NavigationOptions::default()
            .force_load()
            .replace_history()
            .with_history_state(serde_json::json!({"from": "test"}));

        manager
            .navigate_to_opts::<ProductsViewModel>(options.clone())
            .unwrap();

        let navigations = navigator.navigations();
        assert_eq!(navigations.len(), 1);
        assert_eq!(navigations[0], ("/products".to_string(), options));
    }

    #[test]
    fn test_navigate_unknown_key_does_not_navigate() {
        let (manager, navigator) = manager();
        let err = manager.navigate_to_key("missing").unwrap_err();

        assert!(matches!(err, NavigationError::KeyNotFound { .. }));
        assert!(navigator.navigations().is_empty());
    }

    #[test]
    fn test_memory_navigator_listeners() {
        let navigator = MemoryNavigator::default();
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));

        let seen_by_listener = seen.clone();
        let id = navigator.subscribe(Box::new(move |uri| {
            seen_by_listener
                .lock()
                .expect("test lock poisoned")
                .push(uri.to_string());
        }));

        navigator.navigate("/a", &NavigationOptions::default());
        navigator.set_uri("/b");
        navigator.unsubscribe(id);
        navigator.navigate("/c", &NavigationOptions::default());

        assert_eq!(*seen.lock().expect("test lock poisoned"), vec!["/a", "/b"]);
    }
}
