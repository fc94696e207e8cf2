use std::sync::Mutex;

use approx::assert_relative_eq;

use regmetric_core::error::MetricError;
use regmetric_core::metric::derivative::central_difference;

#[test]
fn test_linear_function_recovers_slopes() {
    let f = |p: &[f64]| Ok(3.0 * p[0] - 2.0 * p[1] + 7.0);
    let d = central_difference(f, &[1.0, 2.0], &[1.0, 1.0], 0.001, false).unwrap();
    assert_relative_eq!(d[0], 3.0, epsilon = 1e-9);
    assert_relative_eq!(d[1], -2.0, epsilon = 1e-9);
}

#[test]
fn test_quadratic_is_exact_at_any_step() {
    let f = |p: &[f64]| Ok(p[0] * p[0] + 0.5 * p[1] * p[1]);
    let d = central_difference(f, &[1.5, -4.0], &[1.0, 1.0], 0.5, false).unwrap();
    assert_relative_eq!(d[0], 3.0, epsilon = 1e-12);
    assert_relative_eq!(d[1], -4.0, epsilon = 1e-12);
}

#[test]
fn test_step_is_scaled_by_inverse_sqrt_of_scale() {
    let seen = Mutex::new(Vec::new());
    let f = |p: &[f64]| {
        seen.lock().unwrap().push(p.to_vec());
        Ok(p[0])
    };
    central_difference(f, &[1.0], &[4.0], 0.1, false).unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 2);
    assert_relative_eq!(seen[0][0], 0.95, epsilon = 1e-12);
    assert_relative_eq!(seen[1][0], 1.05, epsilon = 1e-12);
}

#[test]
fn test_only_one_parameter_moves_per_evaluation() {
    let base = [1.0, 2.0, 3.0];
    let seen = Mutex::new(Vec::new());
    let f = |p: &[f64]| {
        seen.lock().unwrap().push(p.to_vec());
        Ok(0.0)
    };
    central_difference(f, &base, &[1.0; 3], 0.01, false).unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 6);
    for (n, point) in seen.iter().enumerate() {
        let moved = n / 2;
        for k in 0..3 {
            if k != moved {
                assert_eq!(point[k], base[k]);
            }
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let f = |p: &[f64]| Ok((p[0] * 1.3).sin() * p[1].exp() + p[2] * p[0]);
    let p = [0.4, -0.2, 1.1];
    let scales = [1.0, 9.0, 0.25];
    let seq = central_difference(f, &p, &scales, 0.01, false).unwrap();
    let par = central_difference(f, &p, &scales, 0.01, true).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn test_evaluation_errors_propagate() {
    let f = |_: &[f64]| Err(MetricError::invalid_input("boom"));
    let err = central_difference(f, &[0.0], &[1.0], 0.01, false).unwrap_err();
    assert!(matches!(err, MetricError::InvalidInput(_)));
}

#[test]
fn test_rejects_bad_scales_and_delta() {
    let f = |p: &[f64]| Ok(p[0]);
    assert!(matches!(
        central_difference(f, &[0.0, 0.0], &[1.0], 0.01, false),
        Err(MetricError::ParameterCount { .. })
    ));
    assert!(matches!(
        central_difference(f, &[0.0], &[0.0], 0.01, false),
        Err(MetricError::InvalidConfig(_))
    ));
    assert!(matches!(
        central_difference(f, &[0.0], &[1.0], -1.0, false),
        Err(MetricError::InvalidConfig(_))
    ));
}
