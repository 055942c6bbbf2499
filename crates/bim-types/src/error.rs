// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for type registry operations

use crate::TypeCode;
use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, TypeError>;

/// Errors raised while building or querying a type registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A type name is registered twice
    #[error("Type name {0:?} is already registered")]
    DuplicateName(String),

    /// A type code is registered twice
    #[error("Type code {0} is already registered")]
    DuplicateCode(TypeCode),

    /// A type name is not known to the registry
    #[error("Unknown type name: {0}")]
    UnknownName(String),

    /// A type code is not known to the registry
    #[error("Unknown type code: {0}")]
    UnknownCode(TypeCode),
}
