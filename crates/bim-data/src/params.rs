// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter bundles consumed by the model builder
//!
//! These are the plain data shapes that importers produce and that
//! [`DataModel::to_params`](crate::DataModel::to_params) emits. Field names
//! serialize in camelCase to match the JSON exchange format.

use crate::{DataError, Result};
use bim_types::TypeCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for creating a model, optionally with content
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelParams {
    /// Model ID, unique within its container
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creating_application: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_sets: Vec<PropertySetParams>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ObjectParams>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<RelationshipParams>,
}

impl ModelParams {
    /// Create parameters for an empty model
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Check whether the bundle carries any entities
    pub fn has_content(&self) -> bool {
        !self.property_sets.is_empty() || !self.objects.is_empty() || !self.relationships.is_empty()
    }
}

/// Parameters for creating an object
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectParams {
    pub id: String,
    /// ID in the authoring system; defaults to `id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_system_id: Option<String>,
    #[serde(rename = "type")]
    pub object_type: TypeCode,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Property sets of the creating model to attach
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_set_ids: Vec<String>,
}

impl ObjectParams {
    /// Create object parameters
    pub fn new(id: impl Into<String>, object_type: TypeCode, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            object_type,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Check that the required fields are present
    pub(crate) fn check_required(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(DataError::missing("objects[].id"));
        }
        if self.name.is_empty() {
            return Err(DataError::missing(format!("objects[{}].name", self.id)));
        }
        Ok(())
    }

    /// Attach property sets by ID
    pub fn with_property_sets<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_set_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the original system ID
    pub fn with_original_system_id(mut self, id: impl Into<String>) -> Self {
        self.original_system_id = Some(id.into());
        self
    }
}

/// Parameters for creating a property set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySetParams {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub set_type: String,
    #[serde(default)]
    pub properties: Vec<PropertyParams>,
}

impl PropertySetParams {
    /// Create property set parameters with no properties
    pub fn new(id: impl Into<String>, name: impl Into<String>, set_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            set_type: set_type.into(),
            properties: Vec::new(),
        }
    }

    /// Check that the required fields are present
    pub(crate) fn check_required(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(DataError::missing("propertySets[].id"));
        }
        if self.name.is_empty() {
            return Err(DataError::missing(format!("propertySets[{}].name", self.id)));
        }
        if self.set_type.is_empty() {
            return Err(DataError::missing(format!("propertySets[{}].type", self.id)));
        }
        Ok(())
    }

    /// Append a property
    pub fn with_property(mut self, property: PropertyParams) -> Self {
        self.properties.push(property);
        self
    }
}

/// Parameters for one property of a property set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyParams {
    pub name: String,
    /// Any JSON value: number, string, boolean, array or object
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<TypeCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<TypeCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyParams {
    /// Create property parameters
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }
}

/// Parameters for a directed, typed relationship
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipParams {
    #[serde(rename = "type")]
    pub relationship_type: TypeCode,
    pub relating_object_id: String,
    pub related_object_id: String,
}

impl RelationshipParams {
    /// Create relationship parameters
    pub fn new(
        relationship_type: TypeCode,
        relating_object_id: impl Into<String>,
        related_object_id: impl Into<String>,
    ) -> Self {
        Self {
            relationship_type,
            relating_object_id: relating_object_id.into(),
            related_object_id: related_object_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_params_json_shape() {
        let params = ObjectParams::new("wall", 200, "Wall 1").with_property_sets(["pset1"]);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["type"], 200);
        assert_eq!(json["propertySetIds"][0], "pset1");
        assert!(json.get("originalSystemId").is_none());
    }

    #[test]
    fn test_model_params_from_json() {
        let params: ModelParams = serde_json::from_str(
            r#"{
                "id": "m1",
                "author": "xeolabs",
                "objects": [{ "id": "a", "type": 1001, "name": "A" }],
                "relationships": [{ "type": 1002, "relatingObjectId": "a", "relatedObjectId": "b" }]
            }"#,
        )
        .unwrap();
        assert_eq!(params.id, "m1");
        assert_eq!(params.author.as_deref(), Some("xeolabs"));
        assert_eq!(params.objects[0].object_type, 1001);
        assert_eq!(params.relationships[0].related_object_id, "b");
        assert!(params.has_content());
        assert!(!ModelParams::new("empty").has_content());
    }
}
