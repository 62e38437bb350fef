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

//! Error types for the math module.

use std::fmt;

/// An error returned when parsing a [`Vec3`](super::Vec3) from text fails.
///
/// Vectors are written as three comma-separated components, e.g. `"1.5, 2.3, 0.6"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseVec3Error {
    /// The text did not contain exactly three components.
    WrongComponentCount {
        /// The number of components that were found.
        found: usize,
    },
    /// A component could not be parsed as a floating point number.
    InvalidComponent {
        /// The position of the offending component (0, 1 or 2).
        index: usize,
        /// The text of the offending component.
        value: String,
    },
}

impl fmt::Display for ParseVec3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseVec3Error::WrongComponentCount { found } => {
                write!(f, "Expected 3 comma-separated components, found {found}")
            }
            ParseVec3Error::InvalidComponent { index, value } => {
                write!(f, "Component {index} is not a valid number: '{value}'")
            }
        }
    }
}

impl std::error::Error for ParseVec3Error {}
