/// Compares with an absolute and a relative tolerance, so that checks stay
/// meaningful for results far away from 1.
pub fn assert_float_eq<T: num::Float + std::fmt::Display>(f1: T, f2: T, atol: T, rtol: T) {
    let tol = atol + rtol * f2.abs();
    assert!(
        (f1 - f2).abs() < tol,
        "floats not almost equal.\nf1: {}\nf2: {}",
        f1,
        f2
    );
}

pub fn assert_float_eq_f64(f1: f64, f2: f64) {
    assert_float_eq(f1, f2, 1e-12, 1e-12);
}
