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

//! Provides the mathematics primitives used to describe 3D rotations.
//!
//! Every type in this module is generic over a [`Scalar`] (`f32` or `f64`) and
//! follows the same conventions:
//!
//! * Angles are in **radians** unless explicitly specified otherwise
//!   (e.g., `degrees_to_radians`).
//! * Rotations are right-handed and active: a positive angle about an axis
//!   turns vectors counter-clockwise when looking down that axis.
//! * Matrices are column-major and multiply column vectors (`m * v`).
//! * Euler angles are stored as `(roll, pitch, yaw)` about `(x, y, z)` and
//!   compose as `Rz(yaw) * Ry(pitch) * Rx(roll)`.

// --- Declare Sub-Modules ---

pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod scalar;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::error::ParseVec3Error;
pub use self::matrix::Mat3;
pub use self::quaternion::Quaternion;
pub use self::scalar::Scalar;
pub use self::vector::Vec3;

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use versor_core::math::degrees_to_radians;
/// assert!((degrees_to_radians(180.0_f64) - std::f64::consts::PI).abs() < 1e-12);
/// ```
#[inline]
pub fn degrees_to_radians<T: Scalar>(degrees: T) -> T {
    degrees.to_radians()
}

/// Converts an angle from radians to degrees.
///
/// # Examples
///
/// ```
/// use versor_core::math::radians_to_degrees;
/// assert!((radians_to_degrees(std::f64::consts::PI) - 180.0).abs() < 1e-10);
/// ```
#[inline]
pub fn radians_to_degrees<T: Scalar>(radians: T) -> T {
    radians.to_degrees()
}
