//! Distance-field line rasterization
//!
//! Every output pixel asks the same question: how far is the nearest of the
//! 32 projected edges? The answer is shaded through a smoothstep band, which
//! gives anti-aliased lines with no per-edge bookkeeping. The GPU presenter
//! evaluates the identical field in its fragment shader.

use serde::{Deserialize, Serialize};
use tessera_math::tesseract::{CYCLE_LENGTH, EDGE_COUNT, VERTEX_COUNT};
use tessera_math::Vec2;

/// Line appearance in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    /// Full line thickness
    pub width: f32,
    /// Width of the anti-alias band on each side of the edge
    pub feather: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            feather: 1.0,
        }
    }
}

impl LineStyle {
    /// Coverage in [0, 1] for a pixel at `distance` from the nearest segment
    pub fn coverage(&self, distance: f32) -> f32 {
        let half = self.width * 0.5;
        1.0 - smoothstep(half - self.feather, half + self.feather, distance)
    }
}

/// Hermite interpolation between two edges, clamped
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// The 32 projected segments of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRasterizer {
    segments: [(Vec2, Vec2); EDGE_COUNT],
}

impl EdgeRasterizer {
    /// Build segments from consecutive cycle pairs
    pub fn new(points: &[Vec2; VERTEX_COUNT], cycle: &[usize; CYCLE_LENGTH]) -> Self {
        let segments = std::array::from_fn(|i| (points[cycle[i]], points[cycle[i + 1]]));
        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[(Vec2, Vec2); EDGE_COUNT] {
        &self.segments
    }

    /// Segment endpoints in cycle order (the 33 walk points)
    pub fn walk_points(&self) -> [Vec2; CYCLE_LENGTH] {
        std::array::from_fn(|i| {
            if i < EDGE_COUNT {
                self.segments[i].0
            } else {
                self.segments[EDGE_COUNT - 1].1
            }
        })
    }

    /// Distance from `p` to the nearest segment
    pub fn min_distance(&self, p: Vec2) -> f32 {
        self.segments
            .iter()
            .map(|&(a, b)| p.distance_to_segment(a, b))
            .fold(f32::INFINITY, f32::min)
    }
}

/// CPU coverage image, row-major, one byte-ready float per pixel
#[derive(Debug, Clone)]
pub struct LineField {
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl LineField {
    /// Shade every pixel center against the rasterizer
    pub fn rasterize(rasterizer: &EdgeRasterizer, width: u32, height: u32, style: &LineStyle) -> Self {
        let coverage = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                style.coverage(rasterizer.min_distance(p))
            })
            .collect();
        Self {
            width,
            height,
            coverage,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at a pixel, `None` outside the image
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.coverage.get((y * self.width + x) as usize).copied()
    }

    /// Number of pixels with any coverage
    pub fn lit_pixels(&self) -> usize {
        self.coverage.iter().filter(|&&c| c > 0.0).count()
    }

    /// Binary greyscale PGM (P5), white lines on black
    pub fn to_pgm(&self) -> Vec<u8> {
        let mut out = format!("P5\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.extend(self.coverage.iter().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
        out
    }
}
