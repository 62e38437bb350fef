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

//! Defines the [`Scalar`] trait shared by every generic math type.

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{Float, FloatConst, FromPrimitive};
use std::fmt::{Debug, Display};
use std::num::ParseFloatError;
use std::str::FromStr;

/// Gathers the traits and constants needed to build rotations over a
/// floating point type.
///
/// Implemented for `f32` and `f64`. The constants are associated consts so
/// that generic types such as `Vec3<T>` can expose `const` values.
pub trait Scalar:
    Float
    + FloatConst
    + FromPrimitive
    + Debug
    + Display
    + Default
    + FromStr<Err = ParseFloatError>
    + bytemuck::Pod
    + AbsDiffEq<Epsilon = Self>
    + RelativeEq
    + Send
    + Sync
    + 'static
{
    /// `0`.
    const ZERO: Self;
    /// `1`.
    const ONE: Self;
    /// `2`.
    const TWO: Self;
    /// `0.5`.
    const HALF: Self;
    /// Tolerance for approximate comparisons and near-zero guards.
    ///
    /// `1e-5` for `f32` and `1e-12` for `f64`.
    const TOLERANCE: Self;
    /// Quaternion dot product above which [`Quaternion::slerp`](super::Quaternion::slerp)
    /// switches to a normalized linear interpolation.
    const SLERP_LINEAR_THRESHOLD: Self;
}

macro_rules! impl_scalar {
    ($f:ty, $tolerance:expr, $slerp_threshold:expr) => {
        impl Scalar for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const TOLERANCE: Self = $tolerance;
            const SLERP_LINEAR_THRESHOLD: Self = $slerp_threshold;
        }
    };
}

impl_scalar!(f32, 1e-5, 0.999_999);
impl_scalar!(f64, 1e-12, 1.0 - 1e-12);
