// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for data graph operations

use bim_types::{TypeCode, TypeError};
use thiserror::Error;

/// Result type alias for data graph operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors returned by the data graph
///
/// Every variant is recoverable: a failed call leaves the graph unchanged.
#[derive(Error, Debug)]
pub enum DataError {
    /// The container was destroyed
    #[error("Data already destroyed")]
    DataDestroyed,

    /// A model with this ID is already registered
    #[error("Model {0} already exists")]
    DuplicateModel(String),

    /// No model with this ID is registered
    #[error("Model {0} not found")]
    ModelNotFound(String),

    /// The model was destroyed
    #[error("Model {0} already destroyed")]
    ModelDestroyed(String),

    /// The model was built and accepts no further changes
    #[error("Model {0} already built")]
    ModelBuilt(String),

    /// An object ID was created twice within one model
    #[error("Object {id} already created in model {model}")]
    DuplicateObject { model: String, id: String },

    /// A property set ID was created twice within one model
    #[error("PropertySet {id} already created in model {model}")]
    DuplicatePropertySet { model: String, id: String },

    /// An object refers to a property set its model does not have
    #[error("PropertySet {id} not found in model {model}")]
    PropertySetNotFound { model: String, id: String },

    /// An object ID is not present in the container
    #[error("Object {0} not found")]
    ObjectNotFound(String),

    /// A search was started from an object of another container
    #[error("Object {0} belongs to a different Data")]
    ForeignObject(String),

    /// A type code is not known to the configured registry
    #[error("Unknown type code: {0}")]
    UnknownType(TypeCode),

    /// A required parameter is missing or empty
    #[error("Missing required parameter: {0}")]
    MissingArgument(String),

    /// A type name could not be resolved
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataError {
    /// Create a missing-argument error
    pub fn missing(name: impl Into<String>) -> Self {
        DataError::MissingArgument(name.into())
    }

    /// Create a duplicate-object error
    pub fn duplicate_object(model: impl Into<String>, id: impl Into<String>) -> Self {
        DataError::DuplicateObject {
            model: model.into(),
            id: id.into(),
        }
    }

    /// Create a duplicate-property-set error
    pub fn duplicate_property_set(model: impl Into<String>, id: impl Into<String>) -> Self {
        DataError::DuplicatePropertySet {
            model: model.into(),
            id: id.into(),
        }
    }

    /// Create a missing-property-set error
    pub fn property_set_not_found(model: impl Into<String>, id: impl Into<String>) -> Self {
        DataError::PropertySetNotFound {
            model: model.into(),
            id: id.into(),
        }
    }
}
