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


//! Header views: typed, bounds-checked windows onto a [`SharedBuffer`](crate::buffer::SharedBuffer).
//!
//! Every read and write resolves the absolute position as the view's base offset plus the
//! field's offset from its layout table, checks it against the declared header length, and
//! converts the bytes in place.

pub mod header_view;
pub mod variable_length;

pub use header_view::HeaderView;
pub use variable_length::{AddressWidth, VariableLengthField};
