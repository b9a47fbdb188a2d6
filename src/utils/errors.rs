/*
 * Copyright 2020 UT OVERSEAS INC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */


use thiserror::Error;

use crate::utils::types::Index;

pub type Result<T> = std::result::Result<T, OverlayError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    #[error("Range error: {0}")]
    Range(RangeError),
    #[error("Invalid length of {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: Index,
        actual: Index,
    },
    #[error("Malformed field layout: {0}")]
    Layout(LayoutError),
}

/**
 * Accesses which would touch bytes outside of a header or a buffer, or governing
 * values which fall outside of the bound a protocol mandates for them.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("access at offset {offset} with length {length} exceeds bound {bound}")]
    OutOfBounds { offset: Index, length: Index, bound: Index },
    #[error("{field} value {value} is out of range 0..={max}")]
    ValueOutOfBounds { field: &'static str, value: u64, max: u64 },
    #[error("scalar width of {width} bytes is outside 1..=8")]
    ScalarWidth { width: Index },
}

// Layout errors are programming errors: tables are built once, on first use,
// and never fail afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{layout}: field {field} declared twice")]
    DuplicateField { layout: &'static str, field: &'static str },
    #[error("{layout}: field {field} has zero length")]
    EmptyField { layout: &'static str, field: &'static str },
    #[error("{layout}: field {field} declared after variable-length tail {tail}")]
    FieldAfterTail {
        layout: &'static str,
        field: &'static str,
        tail: &'static str,
    },
    #[error("{layout}: no field named {field}")]
    UnknownField { layout: &'static str, field: String },
}

impl From<RangeError> for OverlayError {
    fn from(err: RangeError) -> Self {
        OverlayError::Range(err)
    }
}

impl From<LayoutError> for OverlayError {
    fn from(err: LayoutError) -> Self {
        OverlayError::Layout(err)
    }
}

impl OverlayError {
    pub fn is_range_error(&self) -> bool {
        matches!(self, OverlayError::Range(_))
    }

    pub fn is_invalid_length(&self) -> bool {
        matches!(self, OverlayError::InvalidLength { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_converts_and_formats() {
        let err: OverlayError = RangeError::OutOfBounds {
            offset: 14,
            length: 4,
            bound: 16,
        }
        .into();

        assert!(err.is_range_error());
        assert!(!err.is_invalid_length());
        assert_eq!(
            err.to_string(),
            "Range error: access at offset 14 with length 4 exceeds bound 16"
        );
    }

    #[test]
    fn invalid_length_formats() {
        let err = OverlayError::InvalidLength {
            field: "sender_hardware_address",
            expected: 6,
            actual: 5,
        };

        assert!(err.is_invalid_length());
        assert_eq!(
            err.to_string(),
            "Invalid length of sender_hardware_address: expected 6 bytes, got 5"
        );
    }
}
