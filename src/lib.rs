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


//! Typed, zero-copy views over packet header fields.
//!
//! Headers never own their bytes: each one is a [`view::HeaderView`] window into a
//! [`buffer::SharedBuffer`], and every getter and setter works on the buffer in place.

pub mod buffer;
pub mod context;
pub mod layout;
pub mod protocol;
pub mod utils;
pub mod view;

pub use buffer::SharedBuffer;
pub use context::Context;
pub use utils::errors::{LayoutError, OverlayError, RangeError, Result};
pub use view::HeaderView;
