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


//! Field layout tables.
//!
//! A layout lists the fields of one header format in wire order. Offsets are never written by
//! hand: each field starts where the previous one ends, so a table is fully described by the
//! ordered list of field lengths. Tables are built once, inside `lazy_static!`, and shared by
//! every header of that format.

use crate::utils::errors::{LayoutError, OverlayError, Result};
use crate::utils::types::Index;

/// Position of one field relative to the start of its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: &'static str,
    pub offset: Index,
    pub length: Index,
}

impl Field {
    pub const fn new(name: &'static str, offset: Index, length: Index) -> Self {
        Self { name, offset, length }
    }

    #[inline]
    pub const fn end(&self) -> Index {
        self.offset + self.length
    }

    /// Same field, moved "bytes" further into the header. Used for records repeated inside a
    /// header at a computed position.
    #[inline]
    pub const fn shift(self, bytes: Index) -> Self {
        Self {
            name: self.name,
            offset: self.offset + bytes,
            length: self.length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    name: &'static str,
    fields: Vec<Field>,
    tail: Option<(&'static str, Index)>,
}

impl FieldLayout {
    /// Builds a layout from (name, length) pairs given in wire order.
    pub fn from_lengths(name: &'static str, lengths: &[(&'static str, Index)]) -> Result<Self> {
        let mut builder = LayoutBuilder::new(name);
        for (field, length) in lengths {
            builder.append(*field, *length);
        }
        builder.finish().map_err(OverlayError::from)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field(&self, name: &str) -> Result<Field> {
        self.fields.iter().find(|field| field.name == name).copied().ok_or_else(|| {
            LayoutError::UnknownField {
                layout: self.name,
                field: name.to_string(),
            }
            .into()
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn offsets(&self) -> Vec<Index> {
        self.fields.iter().map(|field| field.offset).collect()
    }

    /// Length of the fixed part of the header.
    pub fn length(&self) -> Index {
        self.fields.last().map_or(0, Field::end)
    }

    /// Position of the variable-length region following the fixed fields, if the format has one.
    pub fn tail(&self) -> Option<Index> {
        self.tail.map(|(_, position)| position)
    }
}

/// Accumulates fields in wire order, handing out each field's position as it goes.
///
/// The first mistake (duplicate name, empty field, field declared after the tail) is kept and
/// reported by [`LayoutBuilder::finish`].
#[derive(Debug)]
pub struct LayoutBuilder {
    name: &'static str,
    fields: Vec<Field>,
    position: Index,
    tail: Option<(&'static str, Index)>,
    error: Option<LayoutError>,
}

impl LayoutBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            position: 0,
            tail: None,
            error: None,
        }
    }

    pub fn append(&mut self, field: &'static str, length: Index) -> Field {
        if let Some((tail, _)) = self.tail {
            self.fail(LayoutError::FieldAfterTail {
                layout: self.name,
                field,
                tail,
            });
        }
        if length == 0 {
            self.fail(LayoutError::EmptyField { layout: self.name, field });
        }
        if self.fields.iter().any(|existing| existing.name == field) {
            self.fail(LayoutError::DuplicateField { layout: self.name, field });
        }

        let declared = Field::new(field, self.position, length);
        self.position += length;
        self.fields.push(declared);
        declared
    }

    /// Marks the start of a region whose length depends on header contents. Nothing may be
    /// appended after it.
    pub fn tail(&mut self, field: &'static str) -> Index {
        if let Some((tail, _)) = self.tail {
            self.fail(LayoutError::FieldAfterTail {
                layout: self.name,
                field,
                tail,
            });
        }
        self.tail = Some((field, self.position));
        self.position
    }

    pub fn finish(self) -> std::result::Result<FieldLayout, LayoutError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        log::trace!(
            "{} layout: {} fields, {} bytes",
            self.name,
            self.fields.len(),
            self.position
        );
        Ok(FieldLayout {
            name: self.name,
            fields: self.fields,
            tail: self.tail,
        })
    }

    /// Finishes a table of process-wide constant data.
    ///
    /// # Panics
    ///
    /// A malformed static table is a programming error and aborts its first user.
    pub fn finish_static(self) -> FieldLayout {
        match self.finish() {
            Ok(layout) => layout,
            Err(err) => panic!("{}", err),
        }
    }

    fn fail(&mut self, err: LayoutError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
