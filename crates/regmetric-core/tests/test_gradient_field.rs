mod common;

use ndarray::{arr1, ArrayD};

use regmetric_core::error::MetricError;
use regmetric_core::image::ScalarImage;
use regmetric_core::metric::gradient_field::compute_axis;
use regmetric_core::metric::{BoundaryCondition, GradientField};

use common::{constant_image, image_3d, textured};

fn line(values: &[f64]) -> ScalarImage<1> {
    let data: ArrayD<f64> = arr1(values).into_dyn();
    ScalarImage::from_array(data).unwrap()
}

fn samples_1d(image: &ScalarImage<1>) -> Vec<f64> {
    image.data().iter().copied().collect()
}

// ---------------------------------------------------------------------------
// Kernel shape
// ---------------------------------------------------------------------------

#[test]
fn test_one_dimensional_operator_is_central_difference() {
    let image = line(&[0.0, 1.0, 4.0, 9.0]);
    let field = GradientField::compute(&image, &BoundaryCondition::ZeroFluxNeumann, false).unwrap();
    assert_eq!(samples_1d(field.axis(0)), vec![1.0, 4.0, 8.0, 5.0]);
}

#[test]
fn test_three_dimensional_linear_ramp() {
    let image = image_3d(3, 3, 3, |z, r, c| (100 * z + 10 * r + c) as f64);
    let field = GradientField::compute(&image, &BoundaryCondition::ZeroFluxNeumann, false).unwrap();

    // Central difference of 2 * slope, smoothed by [1, 2, 1] on the two
    // other axes (weight 16).
    assert_eq!(field.axis(0).get(&[1, 1, 1]), 3200.0);
    assert_eq!(field.axis(1).get(&[1, 1, 1]), 320.0);
    assert_eq!(field.axis(2).get(&[1, 1, 1]), 32.0);
}

#[test]
fn test_constant_image_has_zero_gradient_everywhere() {
    let image = constant_image(4, 4, 10.0);
    let field = GradientField::compute(&image, &BoundaryCondition::ZeroFluxNeumann, false).unwrap();
    for axis in field.axes() {
        assert!(axis.data().iter().all(|&g| g == 0.0));
    }
}

#[test]
fn test_field_keeps_image_geometry() {
    let image = textured(6, 7);
    let field = GradientField::compute(&image, &BoundaryCondition::default(), false).unwrap();
    assert_eq!(field.axes().len(), 2);
    assert_eq!(field.size(), [6, 7]);
    assert!(field.axis(1).same_grid(&image));
}

// ---------------------------------------------------------------------------
// Boundary conditions
// ---------------------------------------------------------------------------

#[test]
fn test_periodic_wraps_at_both_ends() {
    let image = line(&[0.0, 1.0, 4.0, 9.0]);
    let field = GradientField::compute(&image, &BoundaryCondition::Periodic, false).unwrap();
    assert_eq!(samples_1d(field.axis(0)), vec![-8.0, 4.0, 8.0, -4.0]);
}

#[test]
fn test_constant_boundary_one_dimensional() {
    let image = line(&[0.0, 1.0, 4.0, 9.0]);
    let bc = BoundaryCondition::Constant { value: 5.0 };
    let field = GradientField::compute(&image, &bc, false).unwrap();
    assert_eq!(samples_1d(field.axis(0)), vec![-4.0, 4.0, 8.0, 1.0]);
}

#[test]
fn test_boundary_condition_only_changes_boundary_samples() {
    let image = textured(8, 9);
    let conditions = [
        BoundaryCondition::ZeroFluxNeumann,
        BoundaryCondition::Periodic,
        BoundaryCondition::Constant { value: -3.0 },
    ];
    let fields: Vec<GradientField<2>> = conditions
        .iter()
        .map(|bc| GradientField::compute(&image, bc, false).unwrap())
        .collect();

    for axis in 0..2 {
        for r in 1..7 {
            for c in 1..8 {
                let reference = fields[0].axis(axis).get(&[r, c]);
                for field in &fields[1..] {
                    assert_eq!(field.axis(axis).get(&[r, c]), reference);
                }
            }
        }
        let corner_differs = fields[1..]
            .iter()
            .any(|f| f.axis(axis).get(&[0, 0]) != fields[0].axis(axis).get(&[0, 0]));
        assert!(corner_differs, "axis {axis}");
    }
}

#[test]
fn test_parallel_axes_match_sequential() {
    let image = textured(12, 10);
    let bc = BoundaryCondition::Constant { value: 1.5 };
    let seq = GradientField::compute(&image, &bc, false).unwrap();
    let par = GradientField::compute(&image, &bc, true).unwrap();
    for axis in 0..2 {
        assert_eq!(seq.axis(axis).data(), par.axis(axis).data());
    }
}

#[test]
fn test_compute_axis_rejects_out_of_range_axis() {
    let image = textured(4, 4);
    let err = compute_axis(&image, 5, &BoundaryCondition::ZeroFluxNeumann).unwrap_err();
    assert!(matches!(err, MetricError::InvalidInput(_)));
}
