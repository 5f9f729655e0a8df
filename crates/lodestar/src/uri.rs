/// URI composition helpers for navigation targets
///
/// All functions are **pure**: given same input, always produce same output
/// with no side effects.

/// Compose a navigation target from a resolved base route and an optional
/// relative addition.
///
/// # Rules
///
/// - Empty (or whitespace-only) `relative` returns `base` unchanged
/// - `relative` starting with `?` replaces any existing query on `base`
/// - `relative` containing `?` splits into path + query: the path part is
///   appended as a single trimmed segment, the query part replaces any
///   existing query on `base`
/// - Anything else is appended as a single trimmed path segment, joined
///   with exactly one `/`
///
/// # Examples
///
/// ```
/// use lodestar::uri::build_uri;
///
/// assert_eq!(build_uri("/products", ""), "/products");
/// assert_eq!(build_uri("/products", "123"), "/products/123");
/// assert_eq!(build_uri("/products", "?sort=name"), "/products?sort=name");
/// assert_eq!(build_uri("/products", "123/?sort=name"), "/products/123?sort=name");
/// ```
pub fn build_uri(base: &str, relative: &str) -> String {
    let relative = relative.trim();
    if relative.is_empty() {
        return base.to_string();
    }

    if let Some(query) = relative.strip_prefix('?') {
        return format!("{}?{}", strip_query(base), query);
    }

    if let Some((path, query)) = relative.split_once('?') {
        return format!("{}?{}", join_segment(strip_query(base), path), query);
    }

    join_segment(base, relative)
}

/// Prefix a declared route template with the configured base path.
///
/// Both sides are trimmed so the join never produces a double slash:
/// base path `/app` + template `/home` → `/app/home`.
///
/// # Examples
///
/// ```
/// use lodestar::uri::apply_base_path;
///
/// assert_eq!(apply_base_path(Some("/app"), "/home"), "/app/home");
/// assert_eq!(apply_base_path(Some("/app/"), "home"), "/app/home");
/// assert_eq!(apply_base_path(None, "/home"), "/home");
/// ```
pub fn apply_base_path(base_path: Option<&str>, template: &str) -> String {
    match base_path {
        Some(base) if !base.trim().is_empty() => {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                template.trim_start_matches('/')
            )
        }
        _ => template.to_string(),
    }
}

/// The URI with any query string removed.
fn strip_query(uri: &str) -> &str {
    uri.split_once('?').map_or(uri, |(path, _)| path)
}

/// Append `segment` to `base` with exactly one `/` between them.
fn join_segment(base: &str, segment: &str) -> String {
    let segment = segment.trim_matches('/');
    if segment.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), segment)
}
