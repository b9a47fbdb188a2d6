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


pub mod bit_utils;
pub mod errors;
pub mod types;

#[macro_export]
macro_rules! ttrace {
        ($log_message:expr) => {
            if let Some(name) = std::thread::current().name() {
                log::trace!("({}) {}", name, $log_message);
            } else {
                log::trace!(concat!("(NoName) ", $log_message));
            }
        };
        ($log_message:expr, $($args:tt)*) => {
            if let Some(name) = std::thread::current().name() {
                log::trace!(concat!("({}) ", $log_message), name, $($args)*);
            } else {
                log::trace!(concat!("(NoName) ", $log_message), $($args)*);
            }
        };
    }

/// Declares an open enumeration: a newtype over the raw wire integer with a named
/// constant per known value. Values without a name are carried through untouched.
#[macro_export]
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($repr:ty) {
            $(
                $(#[$const_meta:meta])*
                $constant:ident = $value:expr,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub $repr);

        impl $name {
            $(
                $(#[$const_meta])*
                pub const $constant: $name = $name($value);
            )*

            #[inline]
            pub const fn new(raw: $repr) -> Self {
                $name(raw)
            }

            #[inline]
            pub const fn raw(self) -> $repr {
                self.0
            }

            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $(x if x == $value => Some(stringify!($constant)),)*
                    _ => None,
                }
            }

            pub fn is_known(self) -> bool {
                self.name().is_some()
            }
        }

        impl From<$repr> for $name {
            fn from(raw: $repr) -> Self {
                $name(raw)
            }
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.name() {
                    Some(name) => write!(f, "{}::{}", stringify!($name), name),
                    None => write!(f, "{}({:#x})", stringify!($name), self.0),
                }
            }
        }
    };
}
