// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The registry trait and a table-backed implementation

use crate::{Result, TypeError};
use rustc_hash::FxHashMap;

/// Integer type code carried by objects and relationships
pub type TypeCode = u32;

/// Maps integer type codes to names and back
///
/// The semantic data graph stores only [`TypeCode`]s. A registry gives those
/// codes meaning for loaders that read string type names and for log output.
///
/// # Example
///
/// ```
/// use bim_types::{TypeRegistry, TypeTable};
///
/// let table = TypeTable::new()
///     .with("Room", 10)
///     .unwrap()
///     .with("Contains", 20)
///     .unwrap();
///
/// assert_eq!(table.code("Room"), Some(10));
/// assert_eq!(table.name(20), Some("Contains"));
/// ```
pub trait TypeRegistry: Send + Sync {
    /// Get the name registered for a code
    fn name(&self, code: TypeCode) -> Option<&str>;

    /// Get the code registered for a name
    fn code(&self, name: &str) -> Option<TypeCode>;

    /// Check whether a code is known to this registry
    fn contains(&self, code: TypeCode) -> bool {
        self.name(code).is_some()
    }

    /// Get the code for a name or return an error
    fn code_or_err(&self, name: &str) -> Result<TypeCode> {
        self.code(name)
            .ok_or_else(|| TypeError::UnknownName(name.to_string()))
    }

    /// Get the name for a code or return an error
    fn name_or_err(&self, code: TypeCode) -> Result<&str> {
        self.name(code).ok_or(TypeError::UnknownCode(code))
    }

    /// Human-readable label for logs: the name if known, the code otherwise
    fn label(&self, code: TypeCode) -> String {
        match self.name(code) {
            Some(name) => name.to_string(),
            None => format!("type#{code}"),
        }
    }
}

/// A caller-defined taxonomy backed by two hash maps
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    by_code: FxHashMap<TypeCode, String>,
    by_name: FxHashMap<String, TypeCode>,
}

impl TypeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name/code pair, consuming and returning the table
    pub fn with(mut self, name: impl Into<String>, code: TypeCode) -> Result<Self> {
        self.insert(name, code)?;
        Ok(self)
    }

    /// Register a name/code pair
    ///
    /// Both the name and the code must be new to the table.
    pub fn insert(&mut self, name: impl Into<String>, code: TypeCode) -> Result<()> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TypeError::DuplicateName(name));
        }
        if self.by_code.contains_key(&code) {
            return Err(TypeError::DuplicateCode(code));
        }
        self.by_code.insert(code, name.clone());
        self.by_name.insert(name, code);
        Ok(())
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Build a table from name/code pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, TypeCode)>) -> Result<Self> {
        let mut table = Self::new();
        for (name, code) in pairs {
            table.insert(name, code)?;
        }
        Ok(table)
    }
}

impl TypeRegistry for TypeTable {
    fn name(&self, code: TypeCode) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    fn code(&self, name: &str) -> Option<TypeCode> {
        self.by_name.get(name).copied()
    }
}
