//! End-to-end name resolution through the mock matcher

mod common;

use std::sync::Arc;

use common::{MockRasterizer, MockSession};
use fontbridge::{FontBackend, FontSpec};
use fontbridge_core::SpecSize;

fn backend() -> FontBackend {
    FontBackend::new(
        Arc::new(MockSession::new()),
        Arc::new(MockRasterizer::default()),
    )
}

#[test]
fn test_resolve_legacy_name_round_trips_buckets() {
    let backend = backend();
    let resolved = backend
        .resolve_name("-*-times-bold-i-*-*-12-*-*-*-*-*-*-*")
        .unwrap();
    assert_eq!(resolved, "-*-times-bold-i-*-*-12-*-*-*-*-0-iso10646-1");
}

#[test]
fn test_resolve_every_weight_bucket_survives_matching() {
    let backend = backend();
    for bucket in ["light", "regular", "demibold", "bold", "black"] {
        let name = format!("-foo-fam-{bucket}-r-*-*-10-*-*-*-*-*-*-*");
        let resolved = backend.resolve_name(&name).unwrap();
        assert_eq!(
            resolved,
            format!("-foo-fam-{bucket}-r-*-*-10-*-*-*-*-0-iso10646-1")
        );
    }
}

#[test]
fn test_resolve_every_slant_bucket_survives_matching() {
    let backend = backend();
    for bucket in ["r", "i", "o"] {
        let name = format!("-foo-fam-bold-{bucket}-*-*-10-*-*-*-*-*-*-*");
        let resolved = backend.resolve_name(&name).unwrap();
        assert_eq!(
            resolved,
            format!("-foo-fam-bold-{bucket}-*-*-10-*-*-*-*-0-iso10646-1")
        );
    }
}

#[test]
fn test_resolve_free_form_name() {
    let backend = backend();
    let resolved = backend.resolve_name("Serif-12.5:weight=bold").unwrap();
    // The matcher resolved "bold" to its reference weight and the point
    // size rode through; the pixel field rounds to nearest.
    assert_eq!(resolved, "-*-Serif-bold-*-*-*-13-*-*-*-*-0-iso10646-1");
}

#[test]
fn test_resolve_never_fails_for_short_specs() {
    let backend = backend();
    // No size, no attributes, not legacy-shaped: still resolvable.
    let resolved = backend.resolve_name("fixed").unwrap();
    assert!(resolved.starts_with("-*-fixed-"));
    assert!(resolved.ends_with("-0-iso10646-1"));
}

#[test]
fn test_parse_name_fills_spec_slots() {
    let backend = backend();
    let mut spec = FontSpec::default();
    backend
        .parse_name("Mono:weight=200:slant=0:pixelsize=14", &mut spec)
        .unwrap();
    assert_eq!(spec.family.as_deref(), Some("mono"));
    assert_eq!(spec.weight, Some(200));
    assert_eq!(spec.slant, Some(100));
    assert_eq!(spec.size, Some(SpecSize::Pixels(14)));
}
