//! Active-link matching: decides whether a navigable link matches the
//! current location, and tracks the Active/Inactive state of a link
//! across location changes.
//!
//! The predicate itself is pure; [`NavLink`] layers the two-state machine
//! on top and only recomputes its CSS class (and requests a UI refresh)
//! when the state actually transitions.

use crate::error::NavigationError;
use crate::navigator::NavigationManager;
use crate::route::ViewModel;

/// How a link's href is compared against the current URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMatchMode {
    /// Active only when the current URI equals the href (modulo a single
    /// trailing slash).
    #[default]
    Exact,
    /// Additionally active when the current URI starts with the href at a
    /// path-segment boundary.
    Prefix,
}

/// Whether a link with `href` is active for `current_uri`.
///
/// An unset href never matches. Comparison is ASCII case-insensitive.
/// A href of `/abc/` is equivalent to a current URI of `/abc`. In
/// [`LinkMatchMode::Prefix`] mode, `/abc` matches `/abc/def` but not
/// `/abcdef`: the prefix must end on a genuine segment boundary.
///
/// # Examples
///
/// ```
/// use lodestar::link::{should_match, LinkMatchMode};
///
/// assert!(should_match("/abc", Some("/abc"), LinkMatchMode::Exact));
/// assert!(should_match("/abc", Some("/abc/"), LinkMatchMode::Exact));
/// assert!(should_match("/abc/def", Some("/abc"), LinkMatchMode::Prefix));
/// assert!(!should_match("/abcdef", Some("/abc"), LinkMatchMode::Prefix));
/// ```
pub fn should_match(current_uri: &str, href: Option<&str>, mode: LinkMatchMode) -> bool {
    let Some(href) = href else {
        return false;
    };

    if equals_or_trailing_slash_added(current_uri, href) {
        return true;
    }

    mode == LinkMatchMode::Prefix && is_strict_prefix_with_separator(current_uri, href)
}

/// Exact match, or the current URI is the href minus its trailing slash.
fn equals_or_trailing_slash_added(current_uri: &str, href: &str) -> bool {
    if current_uri.eq_ignore_ascii_case(href) {
        return true;
    }

    current_uri.len() + 1 == href.len()
        && href.ends_with('/')
        && starts_with_ignore_ascii_case(href, current_uri)
}

/// The current URI starts with the href, and the join point is a real
/// path-segment boundary rather than the middle of a word: either the
/// href's own last character or the character following it in the
/// current URI must be non-alphanumeric.
fn is_strict_prefix_with_separator(current_uri: &str, href: &str) -> bool {
    if current_uri.len() <= href.len() || !starts_with_ignore_ascii_case(current_uri, href) {
        return false;
    }
    if href.is_empty() {
        return true;
    }

    let last_of_href = href.as_bytes()[href.len() - 1];
    let boundary = current_uri.as_bytes()[href.len()];
    !last_of_href.is_ascii_alphanumeric() || !boundary.is_ascii_alphanumeric()
}

fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Link state machine: Active/Inactive, driven by location changes.
///
/// The link receives its collaborators explicitly: a resolved href (or a
/// [`NavigationManager`] to resolve one from an identity) and location
/// updates pushed by the caller from the navigation primitive's
/// location-changed event.
#[derive(Debug, Clone)]
pub struct NavLink {
    href: Option<String>,
    mode: LinkMatchMode,
    active_class: String,
    extra_class: Option<String>,
    active: bool,
    css_class: Option<String>,
}

impl NavLink {
    pub fn new(mode: LinkMatchMode) -> Self {
        Self {
            href: None,
            mode,
            active_class: "active".to_string(),
            extra_class: None,
            active: false,
            css_class: None,
        }
    }

    /// A link whose href is the route registered for `VM`.
    pub fn for_type<VM: ViewModel>(
        manager: &NavigationManager,
        mode: LinkMatchMode,
    ) -> Result<Self, NavigationError> {
        let href = manager.get_uri::<VM>()?.to_string();
        Ok(Self::new(mode).with_href(href))
    }

    /// A link whose href is the route registered under `key`.
    pub fn for_key(
        manager: &NavigationManager,
        key: &str,
        mode: LinkMatchMode,
    ) -> Result<Self, NavigationError> {
        let href = manager.get_uri_by_key(key)?.to_string();
        Ok(Self::new(mode).with_href(href))
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Class applied while the link is active (default `"active"`).
    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    /// Class always applied, combined with the active class when active.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.extra_class = Some(class.into());
        self
    }

    /// Compute the initial state against the current location. Called once
    /// when the link's parameters are first set.
    pub fn initialize(&mut self, current_uri: &str) {
        self.active = should_match(current_uri, self.href.as_deref(), self.mode);
        self.css_class = self.compute_class();
    }

    /// React to a location change. Returns `true` when the active state
    /// transitioned and the caller should refresh the UI; on `false` the
    /// class string is untouched.
    pub fn on_location_changed(&mut self, new_uri: &str) -> bool {
        let active = should_match(new_uri, self.href.as_deref(), self.mode);
        if active == self.active {
            return false;
        }
        self.active = active;
        self.css_class = self.compute_class();
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// The rendered class string: the extra class, plus the active class
    /// while active.
    pub fn css_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    fn compute_class(&self) -> Option<String> {
        match (&self.extra_class, self.active) {
            (Some(extra), true) => Some(format!("{} {}", extra, self.active_class)),
            (Some(extra), false) => Some(extra.clone()),
            (None, true) => Some(self.active_class.clone()),
            (None, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_href_never_matches() {
        assert!(!should_match("/abc", None, LinkMatchMode::Exact));
        assert!(!should_match("/abc", None, LinkMatchMode::Prefix));
    }

    #[test]
    fn test_exact_match_ignores_case() {
        assert!(should_match("/abc", Some("/abc"), LinkMatchMode::Exact));
        assert!(should_match("/ABC", Some("/abc"), LinkMatchMode::Exact));
        assert!(!should_match("/abc", Some("/def"), LinkMatchMode::Exact));
    }

    #[test]
    fn test_trailing_slash_equivalence() {
        assert!(should_match("/abc", Some("/abc/"), LinkMatchMode::Exact));
        // Only a single trailing slash is equivalent
        assert!(!should_match("/abc", Some("/abc//"), LinkMatchMode::Exact));
        // The equivalence is not symmetric at exact level
        assert!(!should_match("/abc/", Some("/abc"), LinkMatchMode::Exact));
    }

    #[test]
    fn test_prefix_match_requires_segment_boundary() {
        assert!(should_match("/abc/def", Some("/abc"), LinkMatchMode::Prefix));
        assert!(!should_match("/abcdef", Some("/abc"), LinkMatchMode::Prefix));
        // Boundary provided by the href's own trailing slash
        assert!(should_match("/abc/def", Some("/abc/"), LinkMatchMode::Prefix));
    }

    #[test]
    fn test_prefix_match_not_applied_in_exact_mode() {
        assert!(!should_match("/abc/def", Some("/abc"), LinkMatchMode::Exact));
    }

    #[test]
    fn test_empty_href_prefix_matches_everything() {
        assert!(should_match("/anything", Some(""), LinkMatchMode::Prefix));
    }

    #[test]
    fn test_initialize_computes_state_and_class() {
        let mut link = NavLink::new(LinkMatchMode::Exact).with_href("/home");
        link.initialize("/home");

        assert!(link.is_active());
        assert_eq!(link.css_class(), Some("active"));
    }

    #[test]
    fn test_refresh_requested_only_on_transition() {
        let mut link = NavLink::new(LinkMatchMode::Exact).with_href("/home");
        link.initialize("/home");

        // Same state: no refresh, class untouched
        assert!(!link.on_location_changed("/home"));
        assert!(link.is_active());

        // Transition to inactive
        assert!(link.on_location_changed("/other"));
        assert!(!link.is_active());
        assert_eq!(link.css_class(), None);

        // Still inactive: no refresh
        assert!(!link.on_location_changed("/elsewhere"));

        // Transition back
        assert!(link.on_location_changed("/home"));
        assert_eq!(link.css_class(), Some("active"));
    }

    #[test]
    fn test_extra_class_combines_with_active_class() {
        let mut link = NavLink::new(LinkMatchMode::Exact)
            .with_href("/home")
            .with_class("nav-link")
            .with_active_class("nav-current");

        link.initialize("/home");
        assert_eq!(link.css_class(), Some("nav-link nav-current"));

        link.on_location_changed("/other");
        assert_eq!(link.css_class(), Some("nav-link"));
    }
}
