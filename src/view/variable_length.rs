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


use crate::layout::Field;
use crate::utils::errors::{OverlayError, RangeError, Result};
use crate::utils::types::Index;
use crate::view::HeaderView;

/// How many bytes an address written into a window may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressWidth {
    /// Exactly the window size. The governing length field is left alone on write.
    Fixed,
    /// Anything from zero up to the window size. Writing updates the governing length field.
    UpTo,
}

/**
 * Address field whose effective length is the current value of a sibling length field.
 *
 * The window (position and capacity) is fixed relative to the header, the number of bytes
 * that are meaningful in it is read from the governing length field on every access. When the
 * address is written the length goes first, so that a following read sees the new length.
 *
 * A window has exactly one governing length field. Several windows may share the same one.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLengthField {
    pub length_field: Field,
    pub window: Field,
    pub width: AddressWidth,
}

impl VariableLengthField {
    pub const fn fixed(length_field: Field, window: Field) -> Self {
        Self {
            length_field,
            window,
            width: AddressWidth::Fixed,
        }
    }

    pub const fn up_to(length_field: Field, window: Field) -> Self {
        Self {
            length_field,
            window,
            width: AddressWidth::UpTo,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> Index {
        self.window.length
    }

    /// Current value of the governing length field, checked against the window capacity.
    pub fn length(&self, view: &HeaderView) -> Result<Index> {
        let length = view.get_uint(&self.length_field)?;
        self.check_length(length)?;
        Ok(length as Index)
    }

    pub fn set_length(&self, view: &HeaderView, length: Index) -> Result<()> {
        self.check_length(length as u64)?;
        view.put_uint(&self.length_field, length as u64)
    }

    pub fn get(&self, view: &HeaderView) -> Result<Vec<u8>> {
        let length = self.length(view)?;
        view.read(self.window.offset, length)
    }

    /// Writes the address. Everything is validated before the first byte changes, so a failed
    /// write leaves the header as it was.
    pub fn set(&self, view: &HeaderView, address: &[u8]) -> Result<()> {
        match self.width {
            AddressWidth::Fixed => {
                if address.len() != self.capacity() {
                    log::debug!(
                        "rejected {} byte address for {}, need {}",
                        address.len(),
                        self.window.name,
                        self.capacity()
                    );
                    return Err(OverlayError::InvalidLength {
                        field: self.window.name,
                        expected: self.capacity(),
                        actual: address.len(),
                    });
                }
                view.write(self.window.offset, address)
            }
            AddressWidth::UpTo => {
                self.check_length(address.len() as u64)?;
                view.check_field(&self.window)?;
                view.check_field(&self.length_field)?;

                let mut padded = vec![0u8; self.capacity()];
                padded[..address.len()].copy_from_slice(address);

                view.put_uint(&self.length_field, address.len() as u64)?;
                view.write(self.window.offset, &padded)
            }
        }
    }

    fn check_length(&self, length: u64) -> Result<()> {
        let max = self.capacity() as u64;
        if length > max {
            log::debug!("{} of {} exceeds {}", self.length_field.name, length, max);
            return Err(RangeError::ValueOutOfBounds {
                field: self.length_field.name,
                value: length,
                max,
            }
            .into());
        }
        Ok(())
    }
}
