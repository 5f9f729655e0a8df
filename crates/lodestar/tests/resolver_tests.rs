//! Integration tests for parameter resolution.
//!
//! Tests are organized by feature area and cover:
//! - `#[derive(NavParams)]` descriptor generation
//! - Resolve modes (none / view-model only / view and view-model)
//! - Case-insensitive name matching and unmatched-name tolerance
//! - Duplicate external names failing deterministically
//! - Exactly-once binding compilation under concurrent first access

use lodestar::{
    NavParams, ParameterDescriptor, ParameterResolveMode, ParameterResolver, ParameterSet,
};
use lodestar_derive::NavParams;
use serde_json::{json, Value};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

#[derive(Default, NavParams)]
struct EditView {
    #[param(name = "Heading")]
    heading: String,

    // not bindable: no attribute
    #[allow(dead_code)]
    dirty: bool,
}

#[derive(Default, NavParams)]
struct EditViewModel {
    #[param]
    id: u32,

    #[param(name = "Title")]
    title: String,

    #[param]
    published: bool,
}

fn params() -> ParameterSet {
    ParameterSet::new()
        .set("id", json!(17))
        .set("title", json!("Edit me"))
        .set("PUBLISHED", json!(true))
        .set("Heading", json!("Editor"))
        .set("unrelated", json!("ignored"))
}

#[test]
fn test_derive_binds_view_model_fields() {
    let resolver = ParameterResolver::new(ParameterResolveMode::ViewModelOnly);
    let mut view = EditView::default();
    let mut vm = EditViewModel::default();

    let handled = resolver
        .set_parameters(&mut view, &mut vm, &params())
        .unwrap();

    assert!(handled);
    assert_eq!(vm.id, 17);
    assert_eq!(vm.title, "Edit me");
    assert!(vm.published);
    // View untouched under view-model-only mode
    assert_eq!(view.heading, "");
}

#[test]
fn test_both_mode_binds_view_then_view_model() {
    let resolver = ParameterResolver::new(ParameterResolveMode::ViewAndViewModel);
    let mut view = EditView::default();
    let mut vm = EditViewModel::default();

    let handled = resolver
        .set_parameters(&mut view, &mut vm, &params())
        .unwrap();

    assert!(handled);
    assert_eq!(view.heading, "Editor");
    assert_eq!(vm.title, "Edit me");
}

#[test]
fn test_mode_none_touches_nothing() {
    let resolver = ParameterResolver::new(ParameterResolveMode::None);
    let mut view = EditView::default();
    let mut vm = EditViewModel::default();

    let handled = resolver
        .set_parameters(&mut view, &mut vm, &params())
        .unwrap();

    assert!(!handled);
    assert_eq!(vm.id, 0);
    assert_eq!(view.heading, "");
}

#[test]
fn test_names_match_case_insensitively() {
    let resolver = ParameterResolver::new(ParameterResolveMode::ViewModelOnly);
    let mut vm = EditViewModel::default();

    let params = ParameterSet::new().set("TITLE", json!("shouted"));
    resolver.bind(&mut vm, &params).unwrap();

    assert_eq!(vm.title, "shouted");
}

#[test]
fn test_unmatched_names_are_ignored() {
    let resolver = ParameterResolver::new(ParameterResolveMode::ViewModelOnly);
    let mut vm = EditViewModel::default();

    let params = ParameterSet::new()
        .set("nobody", json!("home"))
        .set("id", json!(3));
    resolver.bind(&mut vm, &params).unwrap();

    assert_eq!(vm.id, 3);
}

#[derive(Default, NavParams)]
struct CollidingViewModel {
    #[param(name = "ID")]
    external_id: u32,

    #[param]
    id: u32,
}

#[test]
fn test_duplicate_names_fail_deterministically() {
    let resolver = ParameterResolver::new(ParameterResolveMode::ViewModelOnly);
    let mut vm = CollidingViewModel::default();
    let params = ParameterSet::new().set("id", json!(1));

    let first = resolver.bind(&mut vm, &params).unwrap_err();
    assert!(first.to_string().contains("CollidingViewModel"));
    assert!(first.to_string().to_lowercase().contains("duplicate"));

    // The failed binding is memoized: the same error again, not a rescan.
    let second = resolver.bind(&mut vm, &params).unwrap_err();
    assert_eq!(first, second);
}

static SCANS: AtomicUsize = AtomicUsize::new(0);

#[derive(Default)]
struct CountingViewModel {
    id: u32,
}

fn set_counting_id(target: &mut dyn Any, value: &Value) -> Result<(), String> {
    let vm = target
        .downcast_mut::<CountingViewModel>()
        .ok_or_else(|| "target type mismatch".to_string())?;
    vm.id = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
    Ok(())
}

impl NavParams for CountingViewModel {
    fn parameter_descriptors() -> &'static [ParameterDescriptor] {
        SCANS.fetch_add(1, Ordering::SeqCst);
        const DESCRIPTORS: &[ParameterDescriptor] =
            &[ParameterDescriptor::new("id", set_counting_id)];
        DESCRIPTORS
    }
}

#[test]
fn test_concurrent_first_resolution_scans_exactly_once() {
    const CALLERS: usize = 16;

    let resolver = Arc::new(ParameterResolver::new(ParameterResolveMode::ViewModelOnly));
    let barrier = Arc::new(Barrier::new(CALLERS));
    let params = ParameterSet::new().set("id", json!(9));

    std::thread::scope(|scope| {
        for _ in 0..CALLERS {
            let resolver = resolver.clone();
            let barrier = barrier.clone();
            let params = params.clone();
            scope.spawn(move || {
                let mut vm = CountingViewModel::default();
                barrier.wait();
                resolver.bind(&mut vm, &params).unwrap();
                assert_eq!(vm.id, 9);
            });
        }
    });

    assert_eq!(SCANS.load(Ordering::SeqCst), 1);
}
