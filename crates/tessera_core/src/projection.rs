//! 4D → 3D → 2D projection of the rotated vertices
//!
//! The fourth coordinate acts as a depth cue: each vertex's `xyz` is scaled
//! by `w + perspective_strength` before an ordinary pinhole projection from a
//! camera on the +z axis looking toward the origin.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tessera_math::mat4::{self, Mat4};
use tessera_math::tesseract::VERTEX_COUNT;
use tessera_math::{Vec2, Vec4};

/// Depth floor for points at or behind the camera plane
pub const MIN_DEPTH: f32 = 1e-3;

/// Field-of-view limits accepted by [`ProjectionPipeline::set_target`]
const FOV_RANGE: (f32, f32) = (5.0, 170.0);

/// Current projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub fov_degrees: f32,
    pub perspective_strength: f32,
    pub camera_z: f32,
    /// Output size in pixels, `[width, height]`
    pub resolution: [u32; 2],
}

impl ProjectionParams {
    /// Focal length for the current field of view
    pub fn focal_length(&self) -> f32 {
        1.0 / (self.fov_degrees.to_radians() * 0.5).tan()
    }

    /// Half of the shorter output side, in pixels
    fn half_short_side(&self) -> f32 {
        self.resolution[0].min(self.resolution[1]) as f32 * 0.5
    }
}

/// Operator-adjustable projection parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionParam {
    Fov,
    PerspectiveStrength,
    CameraZ,
}

impl ProjectionParam {
    pub fn name(self) -> &'static str {
        match self {
            ProjectionParam::Fov => "fov",
            ProjectionParam::PerspectiveStrength => "perspectiveStrength",
            ProjectionParam::CameraZ => "cameraZ",
        }
    }
}

impl fmt::Display for ProjectionParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fov" | "fovDegrees" | "fov_degrees" => Ok(ProjectionParam::Fov),
            "perspectiveStrength" | "perspective_strength" | "perspective" => {
                Ok(ProjectionParam::PerspectiveStrength)
            }
            "cameraZ" | "camera_z" => Ok(ProjectionParam::CameraZ),
            other => Err(other.to_string()),
        }
    }
}

/// Projection configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub perspective_strength: f32,
    pub camera_z: f32,
    /// Fraction of the distance to the target covered per tick
    pub smoothing: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            perspective_strength: 2.0,
            camera_z: 10.0,
            smoothing: 0.1,
        }
    }
}

/// A vertex after projection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectedVertex {
    /// Short side spans [-1, 1], y up
    pub ndc: Vec2,
    /// Origin top-left, y down
    pub pixel: Vec2,
    /// Distance in front of the camera after clamping
    pub depth: f32,
}

/// Owns the interpolated parameters and projects vertex sets
#[derive(Debug, Clone)]
pub struct ProjectionPipeline {
    config: ProjectionConfig,
    current: ProjectionParams,
    target: ProjectionParams,
}

impl ProjectionPipeline {
    pub fn new(config: ProjectionConfig, resolution: [u32; 2]) -> Self {
        let params = ProjectionParams {
            fov_degrees: config.fov_degrees,
            perspective_strength: config.perspective_strength,
            camera_z: config.camera_z,
            resolution,
        };
        Self {
            config,
            current: params,
            target: params,
        }
    }

    /// Parameters used for this tick's projection
    #[inline]
    pub fn params(&self) -> &ProjectionParams {
        &self.current
    }

    /// Where the parameters are heading
    #[inline]
    pub fn target(&self) -> &ProjectionParams {
        &self.target
    }

    /// Set a new target; the value is reached gradually over later ticks.
    /// Returns the value actually stored after range limiting.
    pub fn set_target(&mut self, param: ProjectionParam, value: f32) -> f32 {
        let stored = match param {
            ProjectionParam::Fov => {
                self.target.fov_degrees = value.clamp(FOV_RANGE.0, FOV_RANGE.1);
                self.target.fov_degrees
            }
            ProjectionParam::PerspectiveStrength => {
                self.target.perspective_strength = value;
                value
            }
            ProjectionParam::CameraZ => {
                self.target.camera_z = value;
                value
            }
        };
        log::debug!("Projection target {} = {}", param, stored);
        stored
    }

    /// Read the target of one parameter
    pub fn target_value(&self, param: ProjectionParam) -> f32 {
        match param {
            ProjectionParam::Fov => self.target.fov_degrees,
            ProjectionParam::PerspectiveStrength => self.target.perspective_strength,
            ProjectionParam::CameraZ => self.target.camera_z,
        }
    }

    /// Resolution changes apply immediately
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        let resolution = [width.max(1), height.max(1)];
        self.current.resolution = resolution;
        self.target.resolution = resolution;
    }

    /// Move the current parameters one step toward their targets
    pub fn interpolate(&mut self) {
        let t = self.config.smoothing;
        let step = |current: &mut f32, target: f32| *current += (target - *current) * t;
        step(&mut self.current.fov_degrees, self.target.fov_degrees);
        step(&mut self.current.perspective_strength, self.target.perspective_strength);
        step(&mut self.current.camera_z, self.target.camera_z);
    }

    /// Targets back to configured defaults; current values follow smoothly
    pub fn reset(&mut self) {
        self.target.fov_degrees = self.config.fov_degrees;
        self.target.perspective_strength = self.config.perspective_strength;
        self.target.camera_z = self.config.camera_z;
    }

    /// Rotate and project all vertices with the current parameters
    pub fn project(&self, rotation: Mat4, vertices: &[Vec4; VERTEX_COUNT]) -> [ProjectedVertex; VERTEX_COUNT] {
        std::array::from_fn(|i| project_vertex(&self.current, mat4::transform(rotation, vertices[i])))
    }
}

/// Project an already rotated 4D vertex
pub fn project_vertex(params: &ProjectionParams, v: Vec4) -> ProjectedVertex {
    let scaled = v.scale_xyz(v.w + params.perspective_strength);
    project_point(params, scaled.xyz())
}

/// Plain 3D pinhole projection with the same camera
pub fn project_point(params: &ProjectionParams, p: [f32; 3]) -> ProjectedVertex {
    let depth = (params.camera_z - p[2]).max(MIN_DEPTH);
    let f = params.focal_length();
    let ndc = Vec2::new(f * p[0] / depth, f * p[1] / depth);
    ProjectedVertex {
        ndc,
        pixel: ndc_to_pixel(params, ndc),
        depth,
    }
}

/// NDC (short side spans [-1, 1], y up) to pixels (top-left origin, y down)
pub fn ndc_to_pixel(params: &ProjectionParams, ndc: Vec2) -> Vec2 {
    let half = params.half_short_side();
    Vec2::new(
        params.resolution[0] as f32 * 0.5 + ndc.x * half,
        params.resolution[1] as f32 * 0.5 - ndc.y * half,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_math::mat4::IDENTITY;
    use tessera_math::Tesseract4D;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn params(fov: f32, strength: f32, camera_z: f32) -> ProjectionParams {
        ProjectionParams {
            fov_degrees: fov,
            perspective_strength: strength,
            camera_z,
            resolution: [800, 600],
        }
    }

    #[test]
    fn test_w_zero_matches_plain_3d_projection() {
        let p = params(60.0, 2.3, 10.0);
        let full = project_vertex(&p, Vec4::new(1.0, 0.0, 0.0, 0.0));
        let plain = project_point(&p, [2.3, 0.0, 0.0]);
        assert!(approx_eq(full.ndc.x, plain.ndc.x));
        assert!(approx_eq(full.ndc.y, plain.ndc.y));
        assert!(approx_eq(full.pixel.x, plain.pixel.x));

        let expected = (1.0 / (30.0f32).to_radians().tan()) * 2.3 / 10.0;
        assert!(approx_eq(full.ndc.x, expected));
    }

    #[test]
    fn test_positive_w_enlarges() {
        let p = params(60.0, 2.0, 10.0);
        let near_w = project_vertex(&p, Vec4::new(1.0, 1.0, 0.0, 1.0));
        let far_w = project_vertex(&p, Vec4::new(1.0, 1.0, 0.0, -1.0));
        assert!(near_w.ndc.x > far_w.ndc.x);
    }

    #[test]
    fn test_origin_maps_to_center_pixel() {
        let p = params(60.0, 2.0, 10.0);
        let v = project_vertex(&p, Vec4::ZERO);
        assert!(approx_eq(v.pixel.x, 400.0));
        assert!(approx_eq(v.pixel.y, 300.0));
    }

    #[test]
    fn test_short_side_spans_unit_ndc() {
        let p = params(60.0, 2.0, 10.0);
        let top = ndc_to_pixel(&p, Vec2::new(0.0, 1.0));
        let right = ndc_to_pixel(&p, Vec2::new(1.0, 0.0));
        // 600 is the short side: ndc y = 1 lands on the top edge
        assert!(approx_eq(top.y, 0.0));
        assert!(approx_eq(right.x, 700.0));
    }

    #[test]
    fn test_points_behind_camera_stay_finite() {
        let p = params(60.0, 2.0, 1.0);
        for z in [1.0, 5.0, 100.0] {
            let v = project_point(&p, [1.0, 1.0, z]);
            assert!(v.ndc.x.is_finite() && v.ndc.y.is_finite());
            assert!(v.depth >= MIN_DEPTH);
        }
    }

    #[test]
    fn test_interpolation_approaches_target() {
        let mut pipeline = ProjectionPipeline::new(ProjectionConfig::default(), [640, 480]);
        pipeline.set_target(ProjectionParam::Fov, 90.0);

        pipeline.interpolate();
        let first = pipeline.params().fov_degrees;
        assert!(first > 60.0 && first < 90.0, "snapped to {}", first);

        for _ in 0..300 {
            pipeline.interpolate();
        }
        assert!(approx_eq(pipeline.params().fov_degrees, 90.0));
    }

    #[test]
    fn test_fov_target_is_limited() {
        let mut pipeline = ProjectionPipeline::new(ProjectionConfig::default(), [640, 480]);
        assert_eq!(pipeline.set_target(ProjectionParam::Fov, 400.0), 170.0);
        assert_eq!(pipeline.set_target(ProjectionParam::Fov, -3.0), 5.0);
    }

    #[test]
    fn test_resolution_applies_immediately() {
        let mut pipeline = ProjectionPipeline::new(ProjectionConfig::default(), [640, 480]);
        pipeline.set_resolution(1024, 0);
        assert_eq!(pipeline.params().resolution, [1024, 1]);
    }

    #[test]
    fn test_reset_restores_configured_targets() {
        let mut pipeline = ProjectionPipeline::new(ProjectionConfig::default(), [640, 480]);
        pipeline.set_target(ProjectionParam::CameraZ, 25.0);
        pipeline.reset();
        assert_eq!(pipeline.target_value(ProjectionParam::CameraZ), 10.0);
    }

    #[test]
    fn test_project_identity_is_symmetric() {
        let pipeline = ProjectionPipeline::new(ProjectionConfig::default(), [600, 600]);
        let tesseract = Tesseract4D::default();
        let projected = pipeline.project(IDENTITY, tesseract.vertices());
        // Vertex i and its x-mirror (bit 0 flipped) land symmetric about the center
        for i in 0..VERTEX_COUNT {
            let a = projected[i].pixel;
            let b = projected[i ^ 1].pixel;
            assert!(approx_eq(a.x + b.x, 600.0));
            assert!(approx_eq(a.y, b.y));
        }
    }

    #[test]
    fn test_param_names_parse() {
        assert_eq!("fov".parse(), Ok(ProjectionParam::Fov));
        assert_eq!("perspectiveStrength".parse(), Ok(ProjectionParam::PerspectiveStrength));
        assert_eq!("camera_z".parse(), Ok(ProjectionParam::CameraZ));
        assert!("zoom".parse::<ProjectionParam>().is_err());
    }
}
