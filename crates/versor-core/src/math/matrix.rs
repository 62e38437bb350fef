// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the generic `Mat3` type and associated operations.

use approx::{AbsDiffEq, RelativeEq};

use super::{Quaternion, Scalar, Vec3};
use std::ops::{Index, IndexMut, Mul};

/// A 3x3 column-major matrix, used here as a rotation (and scale) matrix.
///
/// Matrices multiply column vectors, so `a * b * v` applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3<T> {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec3<T>; 3],
}

// SAFETY: `Mat3<T>` is `#[repr(C)]` around an array of `Pod` vectors.
unsafe impl<T: Scalar> bytemuck::Zeroable for Mat3<T> {}
unsafe impl<T: Scalar> bytemuck::Pod for Mat3<T> {}

impl<T: Scalar> Mat3<T> {
    /// The 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// A 3x3 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec3::ZERO; 3],
    };

    /// Creates a new matrix from three column vectors.
    #[inline]
    pub fn from_cols(c0: Vec3<T>, c1: Vec3<T>, c2: Vec3<T>) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Creates a matrix from nine scalars in column-major order.
    ///
    /// The first three values form the first column. This is the inverse of
    /// [`Mat3::as_slice`].
    #[inline]
    pub fn from_cols_array(m: [T; 9]) -> Self {
        Self::from_cols(
            Vec3::new(m[0], m[1], m[2]),
            Vec3::new(m[3], m[4], m[5]),
            Vec3::new(m[6], m[7], m[8]),
        )
    }

    /// Returns the nine elements in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        bytemuck::cast_slice(&self.cols)
    }

    /// Returns the element at `row`, `col`.
    ///
    /// # Panics
    /// Panics if either index is greater than 2.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.cols[col][row]
    }

    /// Returns a row of the matrix as a `Vec3`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec3<T> {
        Vec3::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
        )
    }

    /// Creates a 3D scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3<T>) -> Self {
        Self::from_cols(
            Vec3::new(scale.x, T::ZERO, T::ZERO),
            Vec3::new(T::ZERO, scale.y, T::ZERO),
            Vec3::new(T::ZERO, T::ZERO, scale.z),
        )
    }

    /// Creates a matrix for a rotation around the X-axis.
    #[inline]
    pub fn from_rotation_x(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::new(T::ONE, T::ZERO, T::ZERO),
            Vec3::new(T::ZERO, c, s),
            Vec3::new(T::ZERO, -s, c),
        )
    }

    /// Creates a matrix for a rotation around the Y-axis.
    #[inline]
    pub fn from_rotation_y(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::new(c, T::ZERO, -s),
            Vec3::new(T::ZERO, T::ONE, T::ZERO),
            Vec3::new(s, T::ZERO, c),
        )
    }

    /// Creates a matrix for a rotation around the Z-axis.
    #[inline]
    pub fn from_rotation_z(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::new(c, s, T::ZERO),
            Vec3::new(-s, c, T::ZERO),
            Vec3::new(T::ZERO, T::ZERO, T::ONE),
        )
    }

    /// Creates the rotation `Rz(angles[2]) * Ry(angles[1]) * Rx(angles[0])`.
    ///
    /// `angles` holds roll, pitch and yaw, in that order. This is the same
    /// convention as [`Quaternion::from_euler_angles`].
    #[inline]
    pub fn from_euler_angles(angles: Vec3<T>) -> Self {
        Self::from_rotation_z(angles.z)
            * Self::from_rotation_y(angles.y)
            * Self::from_rotation_x(angles.x)
    }

    /// Creates a rotation matrix from an angle and a normalized axis.
    ///
    /// # Arguments
    ///
    /// * `angle`: The angle of rotation in radians.
    /// * `axis`: The axis of rotation. Must be a unit vector.
    #[inline]
    pub fn from_angle_axis(angle: T, axis: Vec3<T>) -> Self {
        let (s, c) = angle.sin_cos();
        let t = T::ONE - c;
        let Vec3 { x, y, z } = axis;
        Self::from_cols(
            Vec3::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y),
            Vec3::new(t * y * x - s * z, t * y * y + c, t * y * z + s * x),
            Vec3::new(t * z * x + s * y, t * z * y - s * x, t * z * z + c),
        )
    }

    /// Creates a rotation matrix from a quaternion.
    ///
    /// Equivalent to [`Quaternion::to_matrix`].
    #[inline]
    pub fn from_quat(q: Quaternion<T>) -> Self {
        q.to_matrix()
    }

    /// Computes the determinant of the matrix.
    #[inline]
    pub fn determinant(&self) -> T {
        let [c0, c1, c2] = self.cols;
        c0.x * (c1.y * c2.z - c2.y * c1.z) - c1.x * (c0.y * c2.z - c2.y * c0.z)
            + c2.x * (c0.y * c1.z - c1.y * c0.z)
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    ///
    /// For a rotation matrix this is also its inverse.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2))
    }

    /// Computes the inverse of the matrix.
    ///
    /// Returns `None` when the matrix is singular, i.e. its determinant is
    /// negligible relative to the product of its column lengths. Uniformly
    /// small but well-conditioned matrices remain invertible.
    pub fn inverse(&self) -> Option<Self> {
        let [c0, c1, c2] = self.cols;
        let m00 = c1.y * c2.z - c2.y * c1.z;
        let m10 = c2.y * c0.z - c0.y * c2.z;
        let m20 = c0.y * c1.z - c1.y * c0.z;
        let det = c0.x * m00 + c1.x * m10 + c2.x * m20;

        // |det| is bounded by the product of the column lengths.
        let bound = c0.length() * c1.length() * c2.length();
        if det.abs() <= T::TOLERANCE * bound {
            return None;
        }

        let inv_det = T::ONE / det;
        let m01 = c2.x * c1.z - c1.x * c2.z;
        let m11 = c0.x * c2.z - c2.x * c0.z;
        let m21 = c1.x * c0.z - c0.x * c1.z;
        let m02 = c1.x * c2.y - c2.x * c1.y;
        let m12 = c2.x * c0.y - c0.x * c2.y;
        let m22 = c0.x * c1.y - c1.x * c0.y;

        Some(Self::from_cols(
            Vec3::new(m00, m10, m20) * inv_det,
            Vec3::new(m01, m11, m21) * inv_det,
            Vec3::new(m02, m12, m22) * inv_det,
        ))
    }
}

// --- Operator Overloads ---

impl<T: Scalar> Default for Mat3<T> {
    /// Returns the 3x3 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Scalar> Mul<Mat3<T>> for Mat3<T> {
    type Output = Self;
    /// Multiplies this matrix by another `Mat3`.
    #[inline]
    fn mul(self, rhs: Mat3<T>) -> Self::Output {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1], self * rhs.cols[2])
    }
}

impl<T: Scalar> Mul<Vec3<T>> for Mat3<T> {
    type Output = Vec3<T>;
    /// Transforms a `Vec3` by this matrix.
    #[inline]
    fn mul(self, v: Vec3<T>) -> Self::Output {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

impl<T: Scalar> Index<usize> for Mat3<T> {
    type Output = Vec3<T>;
    /// Allows accessing a matrix column by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.cols[index]
    }
}

impl<T: Scalar> IndexMut<usize> for Mat3<T> {
    /// Allows mutably accessing a matrix column by index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.cols[index]
    }
}

// --- Approximate Comparison ---

impl<T: Scalar> AbsDiffEq for Mat3<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Scalar> RelativeEq for Mat3<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f32::consts::PI;

    type M = Mat3<f32>;
    type V = Vec3<f32>;
    const EPSILON: f32 = <f32 as Scalar>::TOLERANCE;

    #[test]
    fn test_mat3_identity_default() {
        assert_eq!(M::default(), M::IDENTITY);

        let m = M::from_scale(V::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(m * M::IDENTITY, m, epsilon = EPSILON);
        assert_abs_diff_eq!(M::IDENTITY * m, m, epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_element_access() {
        let m = M::from_cols_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m[1], V::new(4.0, 5.0, 6.0));
        assert_eq!(m.get(0, 1), 4.0);
        assert_eq!(m.get(2, 0), 3.0);
        assert_eq!(m.row(0), V::new(1.0, 4.0, 7.0));
        assert_eq!(
            m.as_slice(),
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );

        let mut m = m;
        m[2] = V::ZERO;
        assert_eq!(m.get(1, 2), 0.0);
    }

    #[test]
    fn test_mat3_from_scale() {
        let s = V::new(2.0, -3.0, 0.5);
        let m = M::from_scale(s);
        assert_abs_diff_eq!(m * V::ONE, s, epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_rotations() {
        let angle = PI / 6.0;
        let mx = M::from_rotation_x(angle);
        let my = M::from_rotation_y(angle);
        let mz = M::from_rotation_z(angle);

        let expected_px = V::new(0.0, angle.cos(), angle.sin());
        assert_abs_diff_eq!(mx * V::Y, expected_px, epsilon = EPSILON);

        let expected_py = V::new(angle.cos(), 0.0, -angle.sin());
        assert_abs_diff_eq!(my * V::X, expected_py, epsilon = EPSILON);

        let expected_pz = V::new(angle.cos(), angle.sin(), 0.0);
        assert_abs_diff_eq!(mz * V::X, expected_pz, epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_from_angle_axis_matches_basis_rotations() {
        let angle = 0.83;
        assert_abs_diff_eq!(
            M::from_angle_axis(angle, V::X),
            M::from_rotation_x(angle),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            M::from_angle_axis(angle, V::Y),
            M::from_rotation_y(angle),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            M::from_angle_axis(angle, V::Z),
            M::from_rotation_z(angle),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_mat3_from_euler_angles_composition_order() {
        let angles = V::new(1.5, 2.3, 0.6);
        let m = M::from_euler_angles(angles);

        // Roll is applied first, yaw last.
        let v = V::new(3.5, 6.4, 7.0);
        let step_by_step = M::from_rotation_z(angles.z)
            * (M::from_rotation_y(angles.y) * (M::from_rotation_x(angles.x) * v));
        assert_abs_diff_eq!(m * v, step_by_step, epsilon = EPSILON * 10.0);
    }

    #[test]
    fn test_mat3_from_quat() {
        let axis = V::new(1.0, -2.0, 3.0).normalize();
        let angle = PI / 7.0;
        let q = Quaternion::from_angle_axis(angle, axis);
        let m_from_q = M::from_quat(q);

        assert_abs_diff_eq!(m_from_q, M::from_angle_axis(angle, axis), epsilon = EPSILON);

        let v = V::new(0.5, 1.0, -0.2);
        assert_abs_diff_eq!(q * v, m_from_q * v, epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_determinant() {
        assert_relative_eq!(M::IDENTITY.determinant(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(M::ZERO.determinant(), 0.0, epsilon = EPSILON);

        let m_scale = M::from_scale(V::new(2.0, 3.0, 4.0));
        assert_relative_eq!(m_scale.determinant(), 24.0, epsilon = EPSILON);

        let m_rot = M::from_euler_angles(V::new(0.3, -1.1, 2.0));
        assert_relative_eq!(m_rot.determinant(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_transpose() {
        let m = M::from_cols(
            V::new(1.0, 2.0, 3.0),
            V::new(4.0, 5.0, 6.0),
            V::new(7.0, 8.0, 9.0),
        );
        let expected = M::from_cols(
            V::new(1.0, 4.0, 7.0),
            V::new(2.0, 5.0, 8.0),
            V::new(3.0, 6.0, 9.0),
        );
        assert_eq!(m.transpose(), expected);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = M::from_cols(
            V::new(2.0, 0.0, 1.0),
            V::new(1.0, 3.0, 0.0),
            V::new(0.0, 1.0, 4.0),
        );
        let inv = m.inverse().expect("matrix should be invertible");
        assert_abs_diff_eq!(m * inv, M::IDENTITY, epsilon = EPSILON);
        assert_abs_diff_eq!(inv * m, M::IDENTITY, epsilon = EPSILON);

        let rot = M::from_euler_angles(V::new(0.4, 0.2, -1.3));
        let rot_inv = rot.inverse().expect("rotation should be invertible");
        assert_abs_diff_eq!(rot_inv, rot.transpose(), epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_inverse_singular() {
        let singular = M::from_cols(V::X, V::X * 2.0, V::Z);
        assert!(singular.inverse().is_none());
        assert!(M::ZERO.inverse().is_none());

        let nearly_parallel = M::from_cols(V::X, V::new(1.0, 1e-7, 0.0), V::Z);
        assert!(nearly_parallel.inverse().is_none());
    }

    #[test]
    fn test_mat3_inverse_small_scale() {
        let m = M::from_scale(V::new(0.02, 0.02, 0.02));
        let inv = m.inverse().expect("uniform scale should be invertible");
        assert_abs_diff_eq!(inv, M::from_scale(V::new(50.0, 50.0, 50.0)), epsilon = 1e-3);
        assert_abs_diff_eq!(m * inv, M::IDENTITY, epsilon = EPSILON);
    }
}
