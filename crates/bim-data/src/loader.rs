// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON loaders that populate models through the builder API
//!
//! Two formats are understood:
//!
//! - the native parameter bundle ([`ModelParams`] as JSON)
//! - the legacy metadata format, a flat list of `metaObjects` whose `type`
//!   is a type name and whose hierarchy is given by `parent` links

use crate::params::{ModelParams, ObjectParams, PropertySetParams, RelationshipParams};
use crate::{Data, DataError, DataModelMut, Result};
use bim_types::{BasicTypes, TypeCode, TypeRegistry, BASIC_AGGREGATION};
use log::debug;
use serde::Deserialize;
use std::sync::Arc;

impl Data {
    /// Create a model from a JSON [`ModelParams`] document
    ///
    /// The document must carry a non-empty `id`.
    pub fn load_model_json(&mut self, json: &str) -> Result<DataModelMut<'_>> {
        let params: ModelParams = serde_json::from_str(json)?;
        if params.id.is_empty() {
            return Err(DataError::missing("id"));
        }
        self.create_model(&params)
    }
}

impl DataModelMut<'_> {
    /// Apply the content of a JSON [`ModelParams`] document to this model
    ///
    /// Model metadata in the document is ignored.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let params: ModelParams = serde_json::from_str(json)?;
        self.from_params(&params)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaModelDocument {
    #[serde(default)]
    meta_objects: Vec<MetaObjectEntry>,
    #[serde(default)]
    property_sets: Vec<PropertySetParams>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaObjectEntry {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    object_type: Option<String>,
    parent: Option<String>,
    #[serde(default)]
    property_set_ids: Vec<String>,
}

/// Loader for the legacy metadata format
///
/// ```
/// use bim_data::{Data, MetaModelLoader, ModelParams};
/// use bim_types::{IfcEntityType, IfcTypes};
/// use std::sync::Arc;
///
/// # fn main() -> bim_data::Result<()> {
/// let json = r#"{ "metaObjects": [
///     { "id": "site", "name": "Site", "type": "IfcSite" },
///     { "id": "wall", "name": "Wall", "type": "IfcWall", "parent": "site" }
/// ] }"#;
///
/// let mut data = Data::new();
/// let loader = MetaModelLoader::new(Arc::new(IfcTypes))
///     .with_aggregation_type(IfcEntityType::IfcRelAggregates.code());
/// let mut model = data.create_model(&ModelParams::new("duplex"))?;
/// loader.load(&mut model, json)?;
/// model.build()?;
///
/// assert_eq!(data.root_objects()[0].id(), "site");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MetaModelLoader {
    registry: Arc<dyn TypeRegistry>,
    aggregation_type: TypeCode,
    default_object_type: Option<TypeCode>,
}

impl MetaModelLoader {
    /// Create a loader resolving type names with `registry`
    pub fn new(registry: Arc<dyn TypeRegistry>) -> Self {
        Self {
            registry,
            aggregation_type: BASIC_AGGREGATION,
            default_object_type: None,
        }
    }

    /// Relationship type used for `parent` links
    pub fn with_aggregation_type(mut self, aggregation_type: TypeCode) -> Self {
        self.aggregation_type = aggregation_type;
        self
    }

    /// Type given to objects whose type name the registry does not know;
    /// without it such objects are an error
    pub fn with_default_object_type(mut self, object_type: TypeCode) -> Self {
        self.default_object_type = Some(object_type);
        self
    }

    /// Convert a legacy document into a parameter bundle
    pub fn parse(&self, json: &str) -> Result<ModelParams> {
        let document: MetaModelDocument = serde_json::from_str(json)?;
        let mut params = ModelParams {
            property_sets: document.property_sets,
            ..ModelParams::default()
        };

        for entry in document.meta_objects {
            let id = entry
                .id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| DataError::missing("metaObjects[].id"))?;
            let type_name = entry
                .object_type
                .ok_or_else(|| DataError::missing(format!("metaObjects[{id}].type")))?;
            let object_type = match (self.registry.code(&type_name), self.default_object_type) {
                (Some(code), _) => code,
                (None, Some(fallback)) => fallback,
                (None, None) => self.registry.code_or_err(&type_name)?,
            };

            if let Some(parent) = entry.parent.filter(|p| !p.is_empty()) {
                params.relationships.push(RelationshipParams::new(
                    self.aggregation_type,
                    parent,
                    id.clone(),
                ));
            }
            params.objects.push(ObjectParams {
                name: entry.name.unwrap_or_else(|| id.clone()),
                id,
                object_type,
                property_set_ids: entry.property_set_ids,
                ..ObjectParams::default()
            });
        }
        Ok(params)
    }

    /// Load a legacy document into `model`
    pub fn load(&self, model: &mut DataModelMut<'_>, json: &str) -> Result<()> {
        let params = self.parse(json)?;
        debug!(
            "Loading {} legacy metaobject(s) into model {}",
            params.objects.len(),
            model.id()
        );
        model.from_params(&params)
    }
}

impl Default for MetaModelLoader {
    fn default() -> Self {
        Self::new(Arc::new(BasicTypes))
    }
}
