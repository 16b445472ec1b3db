//! Composite rotation for the current platform
//!
//! Rotations do not commute, so the order of the generator product is part
//! of the contract. The platform is chosen once when the engine is built.

use serde::{Deserialize, Serialize};
use tessera_input::{AxisId, RotationAxisSet};
use tessera_math::mat4::{self, Mat4};

/// Which composition the engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// `R_WY(rwy) · R_Y(ry) · R_X(rx)`
    #[default]
    Desktop,
    /// `camera · R_WX(rwx) · R_WY(rwy) · R_Y(ry) · R_X(rx)`
    Mobile,
}

/// Builds the matrix applied to every vertex each frame
#[derive(Debug, Clone, Copy)]
pub struct RotationComposer {
    platform: Platform,
}

impl RotationComposer {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    #[inline]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The full rotation for the configured platform
    pub fn compose(&self, axes: &RotationAxisSet) -> Mat4 {
        match self.platform {
            Platform::Desktop => Self::desktop(axes),
            Platform::Mobile => mat4::mul(Self::camera(axes), Self::hypercube(axes)),
        }
    }

    fn desktop(axes: &RotationAxisSet) -> Mat4 {
        mat4::chain([
            mat4::rotation_wy(axes.angle(AxisId::Rwy)),
            mat4::rotation_y(axes.angle(AxisId::Ry)),
            mat4::rotation_x(axes.angle(AxisId::Rx)),
        ])
    }

    /// Magic-window camera: `R_Z(cameraRz) · R_Y(cameraRy) · R_X(cameraRx)`
    pub fn camera(axes: &RotationAxisSet) -> Mat4 {
        mat4::chain([
            mat4::rotation_z(axes.angle(AxisId::CameraRz)),
            mat4::rotation_y(axes.angle(AxisId::CameraRy)),
            mat4::rotation_x(axes.angle(AxisId::CameraRx)),
        ])
    }

    /// Hypercube orientation: `R_WX(rwx) · R_WY(rwy) · R_Y(ry) · R_X(rx)`
    pub fn hypercube(axes: &RotationAxisSet) -> Mat4 {
        mat4::chain([
            mat4::rotation_wx(axes.angle(AxisId::Rwx)),
            mat4::rotation_wy(axes.angle(AxisId::Rwy)),
            mat4::rotation_y(axes.angle(AxisId::Ry)),
            mat4::rotation_x(axes.angle(AxisId::Rx)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_math::mat4::{transform, IDENTITY};
    use tessera_math::Vec4;

    const EPSILON: f32 = 0.0001;

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        (0..4).all(|i| (0..4).all(|j| (a[i][j] - b[i][j]).abs() < EPSILON))
    }

    fn axes_with(values: &[(AxisId, f32)]) -> RotationAxisSet {
        let mut axes = RotationAxisSet::new();
        for &(id, angle) in values {
            axes.get_mut(id).set_angle(angle);
        }
        axes
    }

    #[test]
    fn test_zero_angles_compose_to_identity() {
        let axes = RotationAxisSet::new();
        for platform in [Platform::Desktop, Platform::Mobile] {
            assert!(mat_approx_eq(RotationComposer::new(platform).compose(&axes), IDENTITY));
        }
    }

    #[test]
    fn test_desktop_ignores_camera_and_rwx() {
        let base = axes_with(&[(AxisId::Rx, 0.3), (AxisId::Ry, 1.1), (AxisId::Rwy, 2.0)]);
        let extra = axes_with(&[
            (AxisId::Rx, 0.3),
            (AxisId::Ry, 1.1),
            (AxisId::Rwy, 2.0),
            (AxisId::Rwx, 0.7),
            (AxisId::CameraRx, 0.2),
            (AxisId::CameraRz, 0.9),
        ]);
        let composer = RotationComposer::new(Platform::Desktop);
        assert!(mat_approx_eq(composer.compose(&base), composer.compose(&extra)));
    }

    #[test]
    fn test_desktop_order_rx_first() {
        use std::f32::consts::FRAC_PI_2;
        // rx then ry: Y -> Z (about X) -> X (about Y)
        let axes = axes_with(&[(AxisId::Rx, FRAC_PI_2), (AxisId::Ry, FRAC_PI_2)]);
        let m = RotationComposer::new(Platform::Desktop).compose(&axes);
        let v = transform(m, Vec4::Y);
        assert!((v.x - 1.0).abs() < EPSILON, "got {:?}", v);
    }

    #[test]
    fn test_mobile_is_camera_times_hypercube() {
        let axes = axes_with(&[
            (AxisId::Rx, 0.4),
            (AxisId::Ry, -0.2),
            (AxisId::Rwx, 1.3),
            (AxisId::Rwy, 0.6),
            (AxisId::CameraRx, 0.1),
            (AxisId::CameraRy, -0.15),
            (AxisId::CameraRz, 0.05),
        ]);
        let expected = mat4::mul(RotationComposer::camera(&axes), RotationComposer::hypercube(&axes));
        let actual = RotationComposer::new(Platform::Mobile).compose(&axes);
        assert!(mat_approx_eq(expected, actual));

        // And it differs from the reverse product
        let reversed = mat4::mul(RotationComposer::hypercube(&axes), RotationComposer::camera(&axes));
        assert!(!mat_approx_eq(reversed, actual));
    }

    #[test]
    fn test_mobile_without_rwx_or_camera_matches_desktop() {
        let axes = axes_with(&[(AxisId::Rx, 0.8), (AxisId::Ry, 2.5), (AxisId::Rwy, 4.0)]);
        let desktop = RotationComposer::new(Platform::Desktop).compose(&axes);
        let mobile = RotationComposer::new(Platform::Mobile).compose(&axes);
        assert!(mat_approx_eq(desktop, mobile));
    }

    #[test]
    fn test_platform_deserializes_lowercase() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            platform: Platform,
        }
        let w: Wrapper = ron::from_str("(platform: mobile)").unwrap();
        assert_eq!(w.platform, Platform::Mobile);
    }
}
