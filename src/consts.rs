// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.00001;

// Offset along the surface normal for shadow rays, so a surface never
// shadows itself through rounding error.
pub const SHADOW_BIAS: f64 = FEQ_EPSILON * 10.0;

// Runtime defaults for the binary
pub const CANVAS_WIDTH: usize = 200;
pub const CANVAS_HEIGHT: usize = 200;
pub const OUT_FILE: &str = "out.ppm";

/// Compares two floats, tolerating accumulated rounding error.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}

#[test]
fn feq_tolerates_rounding() {
    assert!(feq(0.1 + 0.2, 0.3));
    assert!(feq(1.0, 1.000001));
    assert!(!feq(1.0, 1.0001));
}
