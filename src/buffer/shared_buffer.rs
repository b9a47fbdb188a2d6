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


use std::cell::RefCell;
use std::fmt::{Debug, Error, Formatter};
use std::rc::Rc;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::utils::bit_utils::width_mask;
use crate::utils::errors::{RangeError, Result};
use crate::utils::types::{Index, MAX_SCALAR_WIDTH};
use crate::view::HeaderView;

// Owns the bytes of a frame. Clones are handles onto the same storage, so every header
// view taken from a buffer sees the writes done through any other one.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl Debug for SharedBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        const TAKE_LIMIT: usize = 8;
        let bytes = self.bytes.borrow();
        for (i, chunk) in bytes.chunks(TAKE_LIMIT).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_fmt(format_args!("{:02x?}", chunk))?;
        }
        Ok(())
    }
}

impl SharedBuffer {
    // Zero filled buffer used when a header is built from scratch
    pub fn with_capacity(len: Index) -> SharedBuffer {
        SharedBuffer::from_vec(vec![0u8; len])
    }

    pub fn from_vec(bytes: Vec<u8>) -> SharedBuffer {
        SharedBuffer {
            bytes: Rc::new(RefCell::new(bytes)),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> SharedBuffer {
        SharedBuffer::from_vec(bytes.to_vec())
    }

    pub fn capacity(&self) -> Index {
        self.bytes.borrow().len()
    }

    // Create a header view on the contents of the buffer
    pub fn view(&self, offset: Index, len: Index) -> Result<HeaderView> {
        HeaderView::new(self.clone(), offset, len)
    }

    // True when both handles point at the same storage
    pub fn same_storage(&self, other: &SharedBuffer) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }

    #[inline]
    pub(crate) fn bounds_check(&self, idx: Index, len: Index) -> Result<()> {
        let capacity = self.capacity();
        match idx.checked_add(len) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(RangeError::OutOfBounds {
                offset: idx,
                length: len,
                bound: capacity,
            }
            .into()),
        }
    }

    // Copy "len" bytes starting at "offset" out of the buffer
    pub fn get_bytes(&self, offset: Index, len: Index) -> Result<Vec<u8>> {
        self.bounds_check(offset, len)?;
        Ok(self.bytes.borrow()[offset..offset + len].to_vec())
    }

    // Put bytes in to this buffer at specified offset
    pub fn put_bytes(&self, offset: Index, src: &[u8]) -> Result<()> {
        self.bounds_check(offset, src.len())?;
        self.bytes.borrow_mut()[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    pub fn set_memory(&self, offset: Index, len: Index, value: u8) -> Result<()> {
        self.bounds_check(offset, len)?;
        for byte in &mut self.bytes.borrow_mut()[offset..offset + len] {
            *byte = value;
        }
        Ok(())
    }

    pub fn get_uint_be(&self, offset: Index, width: Index) -> Result<u64> {
        check_width(width)?;
        self.bounds_check(offset, width)?;
        Ok(BigEndian::read_uint(&self.bytes.borrow()[offset..offset + width], width))
    }

    pub fn get_uint_le(&self, offset: Index, width: Index) -> Result<u64> {
        check_width(width)?;
        self.bounds_check(offset, width)?;
        Ok(LittleEndian::read_uint(&self.bytes.borrow()[offset..offset + width], width))
    }

    // Value is truncated to "width" bytes before it is written
    pub fn put_uint_be(&self, offset: Index, width: Index, value: u64) -> Result<()> {
        check_width(width)?;
        self.bounds_check(offset, width)?;
        BigEndian::write_uint(
            &mut self.bytes.borrow_mut()[offset..offset + width],
            value & width_mask(width),
            width,
        );
        Ok(())
    }

    pub fn put_uint_le(&self, offset: Index, width: Index, value: u64) -> Result<()> {
        check_width(width)?;
        self.bounds_check(offset, width)?;
        LittleEndian::write_uint(
            &mut self.bytes.borrow_mut()[offset..offset + width],
            value & width_mask(width),
            width,
        );
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.borrow().clone()
    }
}

fn check_width(width: Index) -> Result<()> {
    if width == 0 || width > MAX_SCALAR_WIDTH {
        return Err(RangeError::ScalarWidth { width }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::OverlayError;

    #[test]
    fn that_buffer_can_be_created() {
        let buffer = SharedBuffer::with_capacity(16);

        //assert zeroed
        assert_eq!(buffer.capacity(), 16);
        assert_eq!(buffer.to_vec(), vec![0u8; 16]);
    }

    #[test]
    fn that_buffer_can_write() {
        let buffer = SharedBuffer::with_capacity(8);
        buffer.put_uint_be(2, 2, 0x0806).unwrap();

        assert_eq!(buffer.get_uint_be(2, 2).unwrap(), 0x0806);
        assert_eq!(buffer.to_vec(), vec![0, 0, 0x08, 0x06, 0, 0, 0, 0]);
    }

    #[test]
    fn test_put_bytes() {
        let data: Vec<u8> = (0u8..=7).collect();
        let buffer = SharedBuffer::from_vec(data);
        buffer.put_bytes(4, &[0, 1, 2, 3]).unwrap();

        assert_eq!(buffer.to_vec(), vec![0, 1, 2, 3, 0, 1, 2, 3])
    }

    #[test]
    fn get_sub_slice() {
        let data: Vec<u8> = (0u8..=7).collect();
        let buffer = SharedBuffer::from_vec(data);

        assert_eq!(buffer.get_bytes(3, 2).unwrap(), vec![3, 4])
    }

    #[test]
    fn get_sub_slice_out_of_bounds() {
        let data: Vec<u8> = (0u8..=7).collect();
        let buffer = SharedBuffer::from_vec(data);

        assert_eq!(
            buffer.get_bytes(7, 2),
            Err(OverlayError::Range(RangeError::OutOfBounds {
                offset: 7,
                length: 2,
                bound: 8
            }))
        );
    }

    #[test]
    fn failed_put_leaves_buffer_untouched() {
        let buffer = SharedBuffer::from_slice(&[1, 2, 3, 4]);

        assert!(buffer.put_bytes(2, &[9, 9, 9]).is_err());
        assert!(buffer.put_uint_be(3, 2, 0xffff).is_err());
        assert_eq!(buffer.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn overflowing_offset_is_a_range_error() {
        let buffer = SharedBuffer::with_capacity(4);

        assert!(buffer.get_bytes(usize::MAX, 2).unwrap_err().is_range_error());
    }

    #[test]
    fn clones_share_storage() {
        let buffer = SharedBuffer::with_capacity(4);
        let other = buffer.clone();
        other.set_memory(1, 2, 0xaa).unwrap();

        assert!(buffer.same_storage(&other));
        assert_eq!(buffer.to_vec(), vec![0, 0xaa, 0xaa, 0]);
        assert!(!buffer.same_storage(&SharedBuffer::with_capacity(4)));
    }

    #[test]
    fn wide_scalars_are_rejected() {
        let buffer = SharedBuffer::with_capacity(16);

        assert_eq!(
            buffer.get_uint_be(0, 9),
            Err(OverlayError::Range(RangeError::ScalarWidth { width: 9 }))
        );
        assert_eq!(
            buffer.put_uint_le(0, 0, 1),
            Err(OverlayError::Range(RangeError::ScalarWidth { width: 0 }))
        );
        assert_eq!(buffer.to_vec(), vec![0u8; 16]);
    }

    #[test]
    fn scalars_keep_the_lowest_bytes() {
        let buffer = SharedBuffer::with_capacity(6);
        buffer.put_uint_be(0, 2, 0x0001_0203).unwrap();
        buffer.put_uint_le(2, 3, 0xffaa_bbcc_ddee).unwrap();
        buffer.put_uint_be(5, 1, u64::MAX).unwrap();

        assert_eq!(buffer.to_vec(), vec![0x02, 0x03, 0xee, 0xdd, 0xcc, 0xff]);
        assert_eq!(buffer.get_uint_be(0, 2).unwrap(), 0x0203);
        assert_eq!(buffer.get_uint_le(2, 3).unwrap(), 0xcc_ddee);
    }

    #[test]
    fn full_width_scalars() {
        let buffer = SharedBuffer::with_capacity(8);
        buffer.put_uint_be(0, 8, 0x0102_0304_0506_0708).unwrap();

        assert_eq!(buffer.to_vec(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(buffer.get_uint_le(0, 8).unwrap(), 0x0807_0605_0403_0201);
    }

    #[test]
    fn little_endian_scalars() {
        let buffer = SharedBuffer::with_capacity(2);
        buffer.put_uint_le(0, 2, 0x0421).unwrap();

        assert_eq!(buffer.to_vec(), vec![0x21, 0x04]);
        assert_eq!(buffer.get_uint_le(0, 2).unwrap(), 0x0421);
    }
}
