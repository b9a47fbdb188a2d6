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


use num_traits::AsPrimitive;

use crate::buffer::SharedBuffer;
use crate::layout::Field;
use crate::ttrace;
use crate::utils::errors::{OverlayError, RangeError, Result};
use crate::utils::types::Index;

/**
 * Non-owning window onto one protocol header inside a shared buffer.
 *
 * The view holds no bytes of its own, only the buffer handle, the base offset of the header and
 * its declared length. All field offsets are relative to the base offset.
 */
#[derive(Clone, Debug)]
pub struct HeaderView {
    buffer: SharedBuffer,
    base_offset: Index,
    length: Index,
}

impl HeaderView {
    pub fn new(buffer: SharedBuffer, base_offset: Index, length: Index) -> Result<Self> {
        buffer.bounds_check(base_offset, length)?;
        Ok(Self {
            buffer,
            base_offset,
            length,
        })
    }

    #[inline]
    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    #[inline]
    pub fn base_offset(&self) -> Index {
        self.base_offset
    }

    #[inline]
    pub fn length(&self) -> Index {
        self.length
    }

    // Variable-length headers move their end as length-governing fields change.
    // Extending the buffer itself is up to the owner of the buffer.
    pub fn set_length(&mut self, length: Index) -> Result<()> {
        self.buffer.bounds_check(self.base_offset, length)?;
        self.length = length;
        Ok(())
    }

    pub fn check(&self, offset: Index, length: Index) -> Result<()> {
        match offset.checked_add(length) {
            Some(end) if end <= self.length => {}
            _ => {
                log::debug!(
                    "rejected access at {}+{} (len {}) beyond header length {}",
                    self.base_offset,
                    offset,
                    length,
                    self.length
                );
                return Err(RangeError::OutOfBounds {
                    offset,
                    length,
                    bound: self.length,
                }
                .into());
            }
        }
        self.buffer.bounds_check(self.base_offset + offset, length)
    }

    #[inline]
    pub fn check_field(&self, field: &Field) -> Result<()> {
        self.check(field.offset, field.length)
    }

    pub fn read(&self, offset: Index, length: Index) -> Result<Vec<u8>> {
        self.check(offset, length)?;
        self.buffer.get_bytes(self.base_offset + offset, length)
    }

    pub fn write(&self, offset: Index, bytes: &[u8]) -> Result<()> {
        self.check(offset, bytes.len())?;
        ttrace!("write {} bytes at {}+{}", bytes.len(), self.base_offset, offset);
        self.buffer.put_bytes(self.base_offset + offset, bytes)
    }

    pub fn fill(&self, offset: Index, length: Index, value: u8) -> Result<()> {
        self.check(offset, length)?;
        self.buffer.set_memory(self.base_offset + offset, length, value)
    }

    // Whole field as raw bytes
    pub fn get_bytes(&self, field: &Field) -> Result<Vec<u8>> {
        self.read(field.offset, field.length)
    }

    pub fn put_bytes(&self, field: &Field, bytes: &[u8]) -> Result<()> {
        if bytes.len() != field.length {
            log::debug!("rejected {} bytes for {} of {} bytes", bytes.len(), field.name, field.length);
            return Err(OverlayError::InvalidLength {
                field: field.name,
                expected: field.length,
                actual: bytes.len(),
            });
        }
        self.write(field.offset, bytes)
    }

    // Unsigned big-endian scalar of the field's width
    pub fn get_uint(&self, field: &Field) -> Result<u64> {
        self.check_field(field)?;
        self.buffer.get_uint_be(self.base_offset + field.offset, field.length)
    }

    // Writes the lowest field.length bytes of value, big-endian
    pub fn put_uint(&self, field: &Field, value: u64) -> Result<()> {
        self.check_field(field)?;
        ttrace!("put {} = {:#x} at {}", field.name, value, self.base_offset + field.offset);
        self.buffer.put_uint_be(self.base_offset + field.offset, field.length, value)
    }

    pub fn get_uint_le(&self, field: &Field) -> Result<u64> {
        self.check_field(field)?;
        self.buffer.get_uint_le(self.base_offset + field.offset, field.length)
    }

    pub fn put_uint_le(&self, field: &Field, value: u64) -> Result<()> {
        self.check_field(field)?;
        ttrace!("put {} = {:#x} (le) at {}", field.name, value, self.base_offset + field.offset);
        self.buffer.put_uint_le(self.base_offset + field.offset, field.length, value)
    }

    /// Reads a big-endian scalar and truncates it into T. Signed types get two's complement
    /// reinterpretation of the field bits.
    #[inline]
    pub fn get<T>(&self, field: &Field) -> Result<T>
    where
        T: Copy + 'static,
        u64: AsPrimitive<T>,
    {
        Ok(self.get_uint(field)?.as_())
    }

    #[inline]
    pub fn put<T>(&self, field: &Field, value: T) -> Result<()>
    where
        T: AsPrimitive<u64>,
    {
        self.put_uint(field, value.as_())
    }

    // Copy of the header bytes
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        self.read(0, self.length)
    }
}
