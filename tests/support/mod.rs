#![allow(dead_code)]

pub mod workspace;

/// Assert two amounts agree within a relative tolerance.
pub fn assert_near(actual: f64, expected: f64, rel_tol: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= rel_tol * scale,
        "expected {expected} ± {}, got {actual}",
        rel_tol * scale
    );
}
