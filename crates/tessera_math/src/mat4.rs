//! 4x4 matrix utilities for hypercube rotations
//!
//! Every rotation the engine uses is a Givens rotation in one coordinate
//! plane, embedded in a 4x4 identity. Three of them are the familiar 3D
//! generators (about X, Y and Z); the other three mix one spatial axis with W.

use crate::Vec4;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by axes `p1` and `p2`.
///
/// Rotates `p1` toward `p2` by `angle` radians. Axis indices are
/// 0=X, 1=Y, 2=Z, 3=W.
///
/// # Example
/// ```
/// use tessera_math::mat4::plane_rotation;
/// // Rotation about X (Y toward Z)
/// let m = plane_rotation(0.5, 1, 2);
/// ```
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Rotation about the X axis (YZ plane)
pub fn rotation_x(angle: f32) -> Mat4 {
    plane_rotation(angle, 1, 2)
}

/// Rotation about the Y axis (ZX plane)
pub fn rotation_y(angle: f32) -> Mat4 {
    plane_rotation(angle, 2, 0)
}

/// Rotation about the Z axis (XY plane)
pub fn rotation_z(angle: f32) -> Mat4 {
    plane_rotation(angle, 0, 1)
}

/// 4D rotation in the XW plane
pub fn rotation_wx(angle: f32) -> Mat4 {
    plane_rotation(angle, 0, 3)
}

/// 4D rotation in the YW plane
pub fn rotation_wy(angle: f32) -> Mat4 {
    plane_rotation(angle, 1, 3)
}

/// 4D rotation in the ZW plane
pub fn rotation_wz(angle: f32) -> Mat4 {
    plane_rotation(angle, 2, 3)
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Multiply a chain of matrices left to right: `chain([a, b, c]) = a * b * c`
///
/// The rightmost matrix is applied first.
pub fn chain<const N: usize>(matrices: [Mat4; N]) -> Mat4 {
    matrices.into_iter().fold(IDENTITY, mul)
}

/// Transform a Vec4 by a 4x4 matrix (column-major)
///
/// result = M * v
pub fn transform(m: Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
        m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
    )
}
