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

//! Provides a Quaternion type for representing 3D rotations.

use approx::{AbsDiffEq, RelativeEq};

use super::{Mat3, Scalar, Vec3};
use std::fmt;
use std::ops::{Add, Index, Mul, MulAssign, Neg, Sub};

/// Represents a quaternion for efficient 3D rotations.
///
/// A quaternion is stored as `(w, x, y, z)`, where `w` is the scalar part and
/// `[x, y, z]` is the vector part. For representing rotations it should be a
/// "unit quaternion" where `w² + x² + y² + z² = 1`. The type does not enforce
/// this: intermediate results may be unnormalized, and callers normalize when
/// needed.
///
/// `q` and `-q` represent the same rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Quaternion<T> {
    /// The scalar (real) part.
    pub w: T,
    /// The x component of the vector part.
    pub x: T,
    /// The y component of the vector part.
    pub y: T,
    /// The z component of the vector part.
    pub z: T,
}

// SAFETY: `Quaternion<T>` is `#[repr(C)]` with four fields of the same `Pod` type.
unsafe impl<T: Scalar> bytemuck::Zeroable for Quaternion<T> {}
unsafe impl<T: Scalar> bytemuck::Pod for Quaternion<T> {}

impl<T: Scalar> Quaternion<T> {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Self = Self {
        w: T::ONE,
        x: T::ZERO,
        y: T::ZERO,
        z: T::ZERO,
    };

    /// Creates a new quaternion from its raw components, scalar part first.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating rotations,
    /// prefer using `from_angle_axis` or other rotation-specific constructors.
    #[inline]
    pub const fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// Creates a new quaternion from a scalar part and a vector part.
    #[inline]
    pub fn from_scalar_vector(w: T, v: Vec3<T>) -> Self {
        Self::new(w, v.x, v.y, v.z)
    }

    /// Returns the scalar (real) part.
    #[inline]
    pub fn scalar(&self) -> T {
        self.w
    }

    /// Returns the vector (imaginary) part.
    #[inline]
    pub fn vector(&self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Creates a quaternion representing a rotation of `angle` radians around `axis`.
    ///
    /// The axis must already be normalized; it is used as given.
    #[inline]
    pub fn from_angle_axis(angle: T, axis: Vec3<T>) -> Self {
        let (s, c) = (angle * T::HALF).sin_cos();
        Self::from_scalar_vector(c, axis * s)
    }

    /// Decomposes the rotation into an angle and a unit axis.
    ///
    /// The quaternion is first moved to the `w >= 0` hemisphere, so the returned
    /// angle lies in `[0, PI]`. It does not need to be normalized. When the
    /// rotation is (numerically) zero the angle is `0` and the axis is `Vec3::X`.
    pub fn to_angle_axis(&self) -> (T, Vec3<T>) {
        let q = if self.w < T::ZERO { -*self } else { *self };
        let v = q.vector();
        let length = v.length();

        if length <= T::epsilon() * q.magnitude() {
            log::trace!("Zero rotation in to_angle_axis, falling back to the X axis.");
            return (T::ZERO, Vec3::X);
        }
        (T::TWO * length.atan2(q.w), v / length)
    }

    /// Creates a quaternion from Euler angles `(roll, pitch, yaw)`.
    ///
    /// The rotations are applied about the fixed x, y and z axes in that order,
    /// which is the same rotation as `Rz(yaw) * Ry(pitch) * Rx(roll)`.
    pub fn from_euler_angles(angles: Vec3<T>) -> Self {
        let (sr, cr) = (angles.x * T::HALF).sin_cos();
        let (sp, cp) = (angles.y * T::HALF).sin_cos();
        let (sy, cy) = (angles.z * T::HALF).sin_cos();

        Self {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        }
    }

    /// Extracts Euler angles `(roll, pitch, yaw)` for this rotation.
    ///
    /// Roll and yaw lie in `(-PI, PI]` and pitch lies in `[-PI/2, PI/2]`, so the
    /// result is not always the triple the quaternion was built from. An input
    /// pitch outside `[-PI/2, PI/2]` comes back as the equivalent triple
    /// `(roll ± PI, PI - pitch, yaw ± PI)`.
    ///
    /// At gimbal lock (pitch of `±PI/2`) only the sum or difference of roll and
    /// yaw is defined; roll is then reported as `0`.
    pub fn to_euler_angles(&self) -> Vec3<T> {
        let m = self.to_matrix();
        let (m00, m10, m20) = (m.cols[0].x, m.cols[0].y, m.cols[0].z);
        let cos_pitch_sq = m00 * m00 + m10 * m10;

        if cos_pitch_sq < T::epsilon() {
            log::trace!("Gimbal lock in to_euler_angles, reporting roll as 0.");
            let pitch = if m20 < T::ZERO {
                T::FRAC_PI_2()
            } else {
                -T::FRAC_PI_2()
            };
            let yaw = -m.cols[1].x.atan2(m.cols[1].y);
            return Vec3::new(T::ZERO, pitch, yaw);
        }

        Vec3::new(
            m.cols[1].z.atan2(m.cols[2].z),
            (-m20).atan2(cos_pitch_sq.sqrt()),
            m10.atan2(m00),
        )
    }

    /// Creates a quaternion from a 3x3 rotation matrix.
    ///
    /// The matrix is assumed to be a pure rotation (orthonormal, determinant 1).
    pub fn from_matrix(m: &Mat3<T>) -> Self {
        let m00 = m.cols[0].x;
        let m10 = m.cols[0].y;
        let m20 = m.cols[0].z;
        let m01 = m.cols[1].x;
        let m11 = m.cols[1].y;
        let m21 = m.cols[1].z;
        let m02 = m.cols[2].x;
        let m12 = m.cols[2].y;
        let m22 = m.cols[2].z;

        // Branch on the largest of w, x, y, z to keep the square root away from zero.
        let quarter = T::HALF * T::HALF;
        let trace = m00 + m11 + m22;
        let q = if trace > T::ZERO {
            let s = T::TWO * (trace + T::ONE).sqrt();
            Self::new(quarter * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
        } else if m00 > m11 && m00 > m22 {
            let s = T::TWO * (T::ONE + m00 - m11 - m22).sqrt();
            Self::new((m21 - m12) / s, quarter * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = T::TWO * (T::ONE + m11 - m00 - m22).sqrt();
            Self::new((m02 - m20) / s, (m01 + m10) / s, quarter * s, (m12 + m21) / s)
        } else {
            let s = T::TWO * (T::ONE + m22 - m00 - m11).sqrt();
            Self::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, quarter * s)
        };
        q.normalize()
    }

    /// Converts the rotation to a 3x3 rotation matrix.
    ///
    /// The quaternion does not need to be normalized; the zero quaternion maps
    /// to the identity matrix.
    pub fn to_matrix(&self) -> Mat3<T> {
        let mag_sq = self.magnitude_squared();
        if mag_sq < T::min_positive_value() {
            return Mat3::IDENTITY;
        }

        let s = T::TWO / mag_sq;
        let Self { w, x, y, z } = *self;
        let (xs, ys, zs) = (x * s, y * s, z * s);
        let (wx, wy, wz) = (w * xs, w * ys, w * zs);
        let (xx, xy, xz) = (x * xs, x * ys, x * zs);
        let (yy, yz, zz) = (y * ys, y * zs, z * zs);

        Mat3::from_cols(
            Vec3::new(T::ONE - (yy + zz), xy + wz, xz - wy),
            Vec3::new(xy - wz, T::ONE - (xx + zz), yz + wx),
            Vec3::new(xz + wy, yz - wx, T::ONE - (xx + yy)),
        )
    }

    /// Creates the shortest rotation that turns direction `from` onto direction `to`.
    ///
    /// Neither vector needs to be normalized. Opposite directions yield a half
    /// turn about some axis perpendicular to `from`.
    pub fn from_rotation_arc(from: Vec3<T>, to: Vec3<T>) -> Self {
        let start = from.normalize();
        let end = to.normalize();
        let cos_angle = start.dot(end);

        if cos_angle < T::TOLERANCE - T::ONE {
            return Self::from_scalar_vector(T::ZERO, start.any_orthogonal());
        }
        Self::from_scalar_vector(T::ONE + cos_angle, start.cross(end)).normalize()
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> T {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> T {
        self.magnitude_squared().sqrt()
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    /// Any nonzero quaternion keeps its direction, however small; only the zero
    /// quaternion (or one whose squared magnitude underflows) yields the identity.
    pub fn normalize(&self) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq < T::min_positive_value() {
            log::trace!("Normalizing a zero quaternion, returning the identity.");
            return Self::IDENTITY;
        }
        self.scale(T::ONE / mag_sq.sqrt())
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Computes the inverse of the quaternion, so that `q.inverse() * q` is the identity.
    ///
    /// For a unit quaternion, the inverse is equal to its conjugate. Works for
    /// unnormalized quaternions of any scale; the zero quaternion yields the identity.
    #[inline]
    pub fn inverse(&self) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq < T::min_positive_value() {
            return Self::IDENTITY;
        }
        self.conjugate().scale(T::ONE / mag_sq)
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> T {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Scales all four components by `k`.
    ///
    /// This is the algebraic scalar product. To scale the rotation angle instead,
    /// use [`Quaternion::scale_angle`] or the `*` operator with a scalar.
    #[inline]
    pub fn scale(&self, k: T) -> Self {
        Self::new(self.w * k, self.x * k, self.y * k, self.z * k)
    }

    /// Returns the unit rotation about the same axis with the angle multiplied by `k`.
    ///
    /// The angle is taken from [`Quaternion::to_angle_axis`], so it is the short
    /// way round (`[0, PI]`) before scaling.
    #[inline]
    pub fn scale_angle(&self, k: T) -> Self {
        let (angle, axis) = self.to_angle_axis();
        Self::from_angle_axis(angle * k, axis)
    }

    /// Rotates a 3D vector by this quaternion, assuming it is normalized.
    ///
    /// The `*` operator normalizes first; use this directly when the quaternion
    /// is known to be a unit quaternion.
    pub fn rotate_vec3(&self, v: Vec3<T>) -> Vec3<T> {
        let u = self.vector();
        let s = self.w;
        u * (T::TWO * u.dot(v)) + v * (s * s - u.dot(u)) + u.cross(v) * (T::TWO * s)
    }

    /// Returns `true` if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two rotations.
    ///
    /// Follows the shortest arc, so the result for `t = 1` may be `-end`, which is
    /// the same rotation. `t` is not clamped: values outside `[0, 1]` extrapolate
    /// along the same arc.
    ///
    /// Both inputs are normalized first, so only the rotations they represent
    /// matter and the result is a unit quaternion.
    ///
    /// When the inputs are almost identical the interpolation falls back to a
    /// normalized linear interpolation, which avoids dividing by a vanishing
    /// sine and keeps `slerp(q, q, t) == q` for unit `q`.
    pub fn slerp(start: Self, end: Self, t: T) -> Self {
        let (start, end) = (start.normalize(), end.normalize());
        if start.dot(end) > T::SLERP_LINEAR_THRESHOLD {
            log::trace!("Slerp endpoints nearly identical, using linear interpolation.");
            return (start.scale(T::ONE - t) + end.scale(t)).normalize();
        }
        start * (start.conjugate() * end).scale_angle(t)
    }
}

// --- Operator Overloads ---

impl<T: Scalar> Default for Quaternion<T> {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Scalar> Mul<Quaternion<T>> for Quaternion<T> {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    /// `a * b` applies `b` first, then `a`. Quaternion multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

impl<T: Scalar> MulAssign<Quaternion<T>> for Quaternion<T> {
    /// Combines this rotation with another.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> Mul<Vec3<T>> for Quaternion<T> {
    type Output = Vec3<T>;
    /// Rotates a `Vec3` by this quaternion.
    #[inline]
    fn mul(self, rhs: Vec3<T>) -> Self::Output {
        self.normalize().rotate_vec3(rhs)
    }
}

impl<T: Scalar> Mul<T> for Quaternion<T> {
    type Output = Self;
    /// Scales the rotation angle by a scalar. See [`Quaternion::scale_angle`].
    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        self.scale_angle(rhs)
    }
}

impl<T: Scalar> Add<Quaternion<T>> for Quaternion<T> {
    type Output = Self;
    /// Adds two quaternions component-wise.
    /// Note: This is not a standard rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w + rhs.w,
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl<T: Scalar> Sub<Quaternion<T>> for Quaternion<T> {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w - rhs.w,
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl<T: Scalar> Neg for Quaternion<T> {
    type Output = Self;
    /// Negates all components. The result represents the same rotation.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl<T: Scalar> Index<usize> for Quaternion<T> {
    type Output = T;
    /// Accesses a component by index: `0` is `w`, `1..=3` are `x`, `y`, `z`.
    ///
    /// # Panics
    /// Panics if `index` is greater than 3.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.w,
            1 => &self.x,
            2 => &self.y,
            3 => &self.z,
            _ => panic!("Index out of bounds for Quaternion"),
        }
    }
}

impl<T: Scalar> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(
                f,
                "(w: {:.*}, x: {:.*}, y: {:.*}, z: {:.*})",
                p, self.w, p, self.x, p, self.y, p, self.z
            ),
            None => write!(
                f,
                "(w: {}, x: {}, y: {}, z: {})",
                self.w, self.x, self.y, self.z
            ),
        }
    }
}

// --- Approximate Comparison ---

impl<T: Scalar> AbsDiffEq for Quaternion<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    /// Compares component-wise. `q` and `-q` are *not* considered equal.
    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T: Scalar> RelativeEq for Quaternion<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
