// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property sets and their properties

use crate::params::{PropertyParams, PropertySetParams};
use bim_types::TypeCode;
use serde_json::Value;

/// A single named value inside a property set
///
/// Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    name: String,
    value: Value,
    property_type: Option<TypeCode>,
    value_type: Option<TypeCode>,
    description: Option<String>,
}

impl Property {
    pub(crate) fn from_params(params: &PropertyParams) -> Self {
        Self {
            name: params.name.clone(),
            value: params.value.clone(),
            property_type: params.property_type,
            value_type: params.value_type,
            description: params.description.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn property_type(&self) -> Option<TypeCode> {
        self.property_type
    }

    pub fn value_type(&self) -> Option<TypeCode> {
        self.value_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the parameters this property was built from
    pub fn to_params(&self) -> PropertyParams {
        PropertyParams {
            name: self.name.clone(),
            value: self.value.clone(),
            property_type: self.property_type,
            value_type: self.value_type,
            description: self.description.clone(),
        }
    }
}

/// A named, ordered bag of properties shared by the models that created it
#[derive(Clone, Debug)]
pub struct PropertySet {
    id: String,
    name: String,
    set_type: String,
    properties: Vec<Property>,
    pub(crate) models: Vec<String>,
}

impl PropertySet {
    pub(crate) fn from_params(params: &PropertySetParams, model_id: &str) -> Self {
        Self {
            id: params.id.clone(),
            name: params.name.clone(),
            set_type: params.set_type.clone(),
            properties: params.properties.iter().map(Property::from_params).collect(),
            models: vec![model_id.to_string()],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_type(&self) -> &str {
        &self.set_type
    }

    /// Properties in creation order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Get the first property with the given name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// IDs of the models that own this property set
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Get the parameters this property set was built from
    pub fn to_params(&self) -> PropertySetParams {
        PropertySetParams {
            id: self.id.clone(),
            name: self.name.clone(),
            set_type: self.set_type.clone(),
            properties: self.properties.iter().map(Property::to_params).collect(),
        }
    }
}
