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


use crate::utils::types::{Index, MAX_SCALAR_WIDTH};

// Mask covering the lowest "width" bytes
#[inline]
pub fn width_mask(width: Index) -> u64 {
    if width >= MAX_SCALAR_WIDTH {
        u64::MAX
    } else {
        (1u64 << (width * 8)) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_mask() {
        assert_eq!(width_mask(0), 0);
        assert_eq!(width_mask(1), 0xff);
        assert_eq!(width_mask(2), 0xffff);
        assert_eq!(width_mask(4), 0xffff_ffff);
        assert_eq!(width_mask(8), u64::MAX);
    }
}
