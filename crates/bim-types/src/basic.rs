// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal entity/aggregation taxonomy

use crate::{TypeCode, TypeRegistry};

/// A generic entity
pub const BASIC_ENTITY: TypeCode = 1001;

/// Aggregation relationship: the relating object is composed of the related object
pub const BASIC_AGGREGATION: TypeCode = 1002;

/// Registry holding only [`BASIC_ENTITY`] and [`BASIC_AGGREGATION`]
///
/// This is the default registry for a data graph when none is injected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasicTypes;

impl BasicTypes {
    /// All name/code pairs of this taxonomy
    pub const ENTRIES: [(&'static str, TypeCode); 2] = [
        ("BasicEntity", BASIC_ENTITY),
        ("BasicAggregation", BASIC_AGGREGATION),
    ];
}

impl TypeRegistry for BasicTypes {
    fn name(&self, code: TypeCode) -> Option<&str> {
        Self::ENTRIES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(name, _)| *name)
    }

    fn code(&self, name: &str) -> Option<TypeCode> {
        Self::ENTRIES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, code)| *code)
    }
}
