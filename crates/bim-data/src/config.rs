// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Container configuration

use bim_types::{BasicTypes, TypeCode, TypeRegistry};
use std::fmt;
use std::sync::Arc;

/// Configuration for a [`Data`](crate::Data) container
///
/// ```
/// use bim_data::{Data, DataConfig};
/// use bim_types::IfcTypes;
/// use std::sync::Arc;
///
/// let data = Data::with_config(
///     DataConfig::new()
///         .with_registry(Arc::new(IfcTypes))
///         .with_strict_types(true),
/// );
/// assert!(data.config().strict_types());
/// ```
#[derive(Clone)]
pub struct DataConfig {
    registry: Arc<dyn TypeRegistry>,
    strict_types: bool,
}

impl DataConfig {
    /// Create the default configuration ([`BasicTypes`], lenient types)
    pub fn new() -> Self {
        Self {
            registry: Arc::new(BasicTypes),
            strict_types: false,
        }
    }

    /// Set the type registry
    pub fn with_registry(mut self, registry: Arc<dyn TypeRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Reject object and relationship type codes unknown to the registry
    pub fn with_strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }

    /// The configured registry
    pub fn registry(&self) -> &dyn TypeRegistry {
        self.registry.as_ref()
    }

    /// Whether unknown type codes are rejected
    pub fn strict_types(&self) -> bool {
        self.strict_types
    }

    /// Check a type code against the strictness setting
    pub(crate) fn accepts_type(&self, code: TypeCode) -> bool {
        !self.strict_types || self.registry.contains(code)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataConfig")
            .field("strict_types", &self.strict_types)
            .finish_non_exhaustive()
    }
}
