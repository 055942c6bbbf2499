// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Objects and the relationships between them

use crate::data::DataId;
use crate::params::{ObjectParams, RelationshipParams};
use crate::{Data, PropertySet};
use bim_types::TypeCode;
use std::collections::BTreeMap;
use std::fmt;

/// Identifies one relationship within its container
///
/// Relationships are not deduplicated, so two edges with the same type and
/// endpoints are told apart by this ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct RelationshipId(pub u64);

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rel#{}", self.0)
    }
}

/// A typed, directed edge from a relating object to a related object
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    id: RelationshipId,
    relationship_type: TypeCode,
    relating_object: String,
    related_object: String,
}

impl Relationship {
    pub(crate) fn new(id: RelationshipId, params: &RelationshipParams) -> Self {
        Self {
            id,
            relationship_type: params.relationship_type,
            relating_object: params.relating_object_id.clone(),
            related_object: params.related_object_id.clone(),
        }
    }

    pub fn id(&self) -> RelationshipId {
        self.id
    }

    pub fn relationship_type(&self) -> TypeCode {
        self.relationship_type
    }

    /// ID of the source object
    pub fn relating_object_id(&self) -> &str {
        &self.relating_object
    }

    /// ID of the target object
    pub fn related_object_id(&self) -> &str {
        &self.related_object
    }

    pub fn to_params(&self) -> RelationshipParams {
        RelationshipParams::new(
            self.relationship_type,
            self.relating_object.clone(),
            self.related_object.clone(),
        )
    }
}

/// Relationships of one object, grouped by relationship type
pub type RelationshipMap = BTreeMap<TypeCode, Vec<Relationship>>;

pub(crate) fn remove_edge(map: &mut RelationshipMap, relationship: &Relationship) {
    let key = relationship.relationship_type;
    if let Some(edges) = map.get_mut(&key) {
        edges.retain(|r| r.id != relationship.id);
        if edges.is_empty() {
            map.remove(&key);
        }
    }
}

/// A semantic entity in a [`Data`] container
///
/// One instance exists per global ID; every model that created that ID is
/// listed in [`models`](Self::models).
#[derive(Clone, Debug)]
pub struct DataObject {
    pub(crate) data_id: DataId,
    pub(crate) seq: u64,
    id: String,
    original_system_id: String,
    name: String,
    description: Option<String>,
    object_type: TypeCode,
    pub(crate) property_set_ids: Vec<String>,
    /// Incoming edges: this object is the related participant
    pub(crate) relating: RelationshipMap,
    /// Outgoing edges: this object is the relating participant
    pub(crate) related: RelationshipMap,
    pub(crate) models: Vec<String>,
}

impl DataObject {
    pub(crate) fn from_params(
        data_id: DataId,
        seq: u64,
        params: &ObjectParams,
        model_id: &str,
    ) -> Self {
        Self {
            data_id,
            seq,
            id: params.id.clone(),
            original_system_id: params
                .original_system_id
                .clone()
                .unwrap_or_else(|| params.id.clone()),
            name: params.name.clone(),
            description: params.description.clone(),
            object_type: params.object_type,
            property_set_ids: params.property_set_ids.clone(),
            relating: RelationshipMap::new(),
            related: RelationshipMap::new(),
            models: vec![model_id.to_string()],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn original_system_id(&self) -> &str {
        &self.original_system_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn object_type(&self) -> TypeCode {
        self.object_type
    }

    pub fn property_set_ids(&self) -> &[String] {
        &self.property_set_ids
    }

    /// Resolve this object's property sets in `data`
    pub fn property_sets<'a>(&'a self, data: &'a Data) -> impl Iterator<Item = &'a PropertySet> + 'a {
        self.property_set_ids
            .iter()
            .filter_map(move |id| data.property_set(id))
    }

    /// Edges in which this object is the related (target) participant
    pub fn relating(&self) -> &RelationshipMap {
        &self.relating
    }

    /// Edges in which this object is the relating (source) participant
    pub fn related(&self) -> &RelationshipMap {
        &self.related
    }

    /// Incoming edges of one type
    pub fn relating_of(&self, relationship_type: TypeCode) -> &[Relationship] {
        self.relating
            .get(&relationship_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Outgoing edges of one type
    pub fn related_of(&self, relationship_type: TypeCode) -> &[Relationship] {
        self.related
            .get(&relationship_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Objects this one points at through edges of one type
    pub fn related_objects<'a>(
        &'a self,
        data: &'a Data,
        relationship_type: TypeCode,
    ) -> impl Iterator<Item = &'a DataObject> + 'a {
        self.related_of(relationship_type)
            .iter()
            .filter_map(move |r| data.object(r.related_object_id()))
    }

    /// Objects pointing at this one through edges of one type
    pub fn relating_objects<'a>(
        &'a self,
        data: &'a Data,
        relationship_type: TypeCode,
    ) -> impl Iterator<Item = &'a DataObject> + 'a {
        self.relating_of(relationship_type)
            .iter()
            .filter_map(move |r| data.object(r.relating_object_id()))
    }

    /// True if no relationship points at this object
    pub fn is_root(&self) -> bool {
        self.relating.is_empty()
    }

    /// IDs of the models sharing this object, in the order they created it
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Get the parameters this object was built from
    pub fn to_params(&self) -> ObjectParams {
        ObjectParams {
            id: self.id.clone(),
            original_system_id: (self.original_system_id != self.id)
                .then(|| self.original_system_id.clone()),
            object_type: self.object_type,
            name: self.name.clone(),
            description: self.description.clone(),
            property_set_ids: self.property_set_ids.clone(),
        }
    }
}
