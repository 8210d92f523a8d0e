//! Model, view and projection transforms for the spinning cube.

use cgmath::{InnerSpace, Matrix4, Rad, Vector3};

/// cgmath builds OpenGL-style projections with clip space z in [-1, 1];
/// wgpu expects [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const ROTATION_AXIS: Vector3<f32> = Vector3::new(0.5, 1.0, 0.0);
pub const EYE_OFFSET: Vector3<f32> = Vector3::new(0.0, 0.0, -3.0);

/// Rotation by `seconds` radians about [`ROTATION_AXIS`].
pub fn model_at(seconds: f32) -> Matrix4<f32> {
    Matrix4::from_axis_angle(ROTATION_AXIS.normalize(), Rad(seconds))
}

/// Moves the scene away from the camera.
pub fn view() -> Matrix4<f32> {
    Matrix4::from_translation(EYE_OFFSET)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Deg, SquareMatrix, Vector4};

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn mat_close(a: Matrix4<f32>, b: Matrix4<f32>) -> bool {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        a.iter().zip(b.iter()).all(|(x, y)| close(*x, *y))
    }

    #[test]
    fn model_is_identity_at_time_zero() {
        assert!(mat_close(model_at(0.0), Matrix4::identity()));
    }

    #[test]
    fn model_rotates_about_the_normalized_axis() {
        let axis = ROTATION_AXIS.normalize();
        let model = model_at(1.3);
        // the axis itself is left untouched
        let rotated = model * axis.extend(0.0);
        assert!(close(rotated.x, axis.x) && close(rotated.y, axis.y) && close(rotated.z, axis.z));
        assert!(mat_close(model, Matrix4::from_axis_angle(axis, Rad(1.3))));
        // a full turn comes back to the start
        assert!(mat_close(model_at(std::f32::consts::TAU), Matrix4::identity()));
    }

    #[test]
    fn view_translates_three_units_back() {
        let origin = view() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin, Vector4::new(0.0, 0.0, -3.0, 1.0));
    }

    #[test]
    fn projection_matches_the_perspective_formula() {
        let projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
        let m = projection.calc_matrix();
        let f = 1.0 / (std::f32::consts::FRAC_PI_4 / 2.0).tan();
        let aspect = 800.0 / 600.0;

        assert!(close(projection.aspect(), aspect));
        assert!(close(m[0][0], f / aspect));
        assert!(close(m[1][1], f));
        assert_eq!(m, Projection::new(800, 600, Deg(45.0), 0.1, 100.0).calc_matrix());
    }

    #[test]
    fn projection_maps_near_and_far_planes_to_wgpu_depth() {
        let m = Projection::new(800, 600, Deg(45.0), 0.1, 100.0).calc_matrix();
        let depth = |z: f32| {
            let clip = m * Vector4::new(0.0, 0.0, -z, 1.0);
            clip.z / clip.w
        };
        assert!(close(depth(0.1), 0.0));
        assert!(close(depth(100.0), 1.0));
    }
}
