//! 2D vector type for projected screen-space points

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

/// 2D vector, used for projected vertex positions and raster samples
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Distance from `self` to the closed segment `a`–`b`.
    ///
    /// The projection parameter is clamped to [0, 1]; a degenerate segment
    /// (a == b) falls back to the distance to `a`.
    #[inline]
    pub fn distance_to_segment(self, a: Self, b: Self) -> f32 {
        let pa = self - a;
        let ba = b - a;
        let len_sq = ba.dot(ba);
        let h = if len_sq > 0.0 {
            (pa.dot(ba) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (pa - ba * h).length()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}
