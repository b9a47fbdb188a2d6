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


// Index type is used to express offset and size dimensions of fields in buffers.
// Header fields never start before the header itself, so unlike a signed index
// there are no "inverted" values to care about.
pub type Index = usize;

// Widest scalar a field accessor will decode in one go.
pub const MAX_SCALAR_WIDTH: Index = std::mem::size_of::<u64>();

// Define commonly used sizeoffs to shorten field tables.
pub const U8_SIZE: Index = std::mem::size_of::<u8>();
pub const U16_SIZE: Index = std::mem::size_of::<u16>();
pub const U32_SIZE: Index = std::mem::size_of::<u32>();

pub const MAC_ADDRESS_LENGTH: Index = 6;
pub const IPV4_ADDRESS_LENGTH: Index = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_sizes() {
        assert_eq!(U8_SIZE, 1);
        assert_eq!(U16_SIZE, 2);
        assert_eq!(U32_SIZE, 4);
        assert_eq!(MAX_SCALAR_WIDTH, 8);
    }
}
