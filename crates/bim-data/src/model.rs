// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Models: the builder sessions that contribute entities to a container
//!
//! A model moves through `constructed -> built`, and can be destroyed from
//! either state. Only a constructed model accepts new property sets, objects
//! and relationships.

use crate::data::DataId;
use crate::events::EventEmitter;
use crate::object::Relationship;
use crate::params::{ModelParams, ObjectParams, PropertySetParams, RelationshipParams};
use crate::{Data, DataError, DataObject, PropertySet, Result};
use bim_types::TypeCode;
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::mem;

/// Notifications raised by one model
#[derive(Debug, Default)]
pub struct ModelEvents {
    /// The model was built
    pub on_built: EventEmitter<DataModel>,
    /// The model was destroyed
    pub on_destroyed: EventEmitter<DataModel>,
}

/// A model's record: metadata, its view of the shared entities, lifecycle
#[derive(Debug)]
pub struct DataModel {
    data_id: DataId,
    pub(crate) seq: u64,
    id: String,
    project_id: Option<String>,
    revision_id: Option<String>,
    author: Option<String>,
    created_at: Option<String>,
    creating_application: Option<String>,
    schema: Option<String>,
    pub(crate) property_set_ids: Vec<String>,
    property_set_index: FxHashSet<String>,
    pub(crate) object_ids: Vec<String>,
    object_index: FxHashSet<String>,
    objects_by_type: FxHashMap<TypeCode, Vec<String>>,
    type_counts: FxHashMap<TypeCode, usize>,
    pub(crate) relationships: Vec<Relationship>,
    pub(crate) built: bool,
    pub(crate) destroyed: bool,
    pub(crate) events: ModelEvents,
}

impl DataModel {
    pub(crate) fn new(data_id: DataId, seq: u64, params: &ModelParams) -> Self {
        Self {
            data_id,
            seq,
            id: params.id.clone(),
            project_id: params.project_id.clone(),
            revision_id: params.revision_id.clone(),
            author: params.author.clone(),
            created_at: params.created_at.clone(),
            creating_application: params.creating_application.clone(),
            schema: params.schema.clone(),
            property_set_ids: Vec::new(),
            property_set_index: FxHashSet::default(),
            object_ids: Vec::new(),
            object_index: FxHashSet::default(),
            objects_by_type: FxHashMap::default(),
            type_counts: FxHashMap::default(),
            relationships: Vec::new(),
            built: false,
            destroyed: false,
            events: ModelEvents::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identity of the owning container
    pub fn data_id(&self) -> DataId {
        self.data_id
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn revision_id(&self) -> Option<&str> {
        self.revision_id.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    pub fn creating_application(&self) -> Option<&str> {
        self.creating_application.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// IDs of the property sets this model created or reused, in order
    pub fn property_set_ids(&self) -> &[String] {
        &self.property_set_ids
    }

    /// IDs of the objects this model created or reused, in order
    pub fn object_ids(&self) -> &[String] {
        &self.object_ids
    }

    pub fn has_object(&self, id: &str) -> bool {
        self.object_index.contains(id)
    }

    pub fn has_property_set(&self, id: &str) -> bool {
        self.property_set_index.contains(id)
    }

    /// Relationships this model created, in order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// IDs of this model's objects of one type
    pub fn object_ids_by_type(&self, object_type: TypeCode) -> &[String] {
        self.objects_by_type
            .get(&object_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of this model's objects of each type
    pub fn type_counts(&self) -> &FxHashMap<TypeCode, usize> {
        &self.type_counts
    }

    /// This model's objects, resolved in `data`
    pub fn objects<'a>(&'a self, data: &'a Data) -> impl Iterator<Item = &'a DataObject> + 'a {
        self.object_ids.iter().filter_map(move |id| data.object(id))
    }

    /// This model's property sets, resolved in `data`
    pub fn property_sets<'a>(
        &'a self,
        data: &'a Data,
    ) -> impl Iterator<Item = &'a PropertySet> + 'a {
        self.property_set_ids
            .iter()
            .filter_map(move |id| data.property_set(id))
    }

    /// Serialize this model's own entities (not the whole container)
    ///
    /// A shared object lists only the property sets this model owns, so the
    /// bundle loads on its own.
    pub fn to_params(&self, data: &Data) -> Result<ModelParams> {
        if self.destroyed {
            return Err(DataError::ModelDestroyed(self.id.clone()));
        }
        Ok(ModelParams {
            id: self.id.clone(),
            project_id: self.project_id.clone(),
            revision_id: self.revision_id.clone(),
            author: self.author.clone(),
            created_at: self.created_at.clone(),
            creating_application: self.creating_application.clone(),
            schema: self.schema.clone(),
            property_sets: self.property_sets(data).map(PropertySet::to_params).collect(),
            objects: self
                .objects(data)
                .map(|object| {
                    let mut params = object.to_params();
                    params
                        .property_set_ids
                        .retain(|id| self.property_set_index.contains(id));
                    params
                })
                .collect(),
            relationships: self
                .relationships
                .iter()
                .map(Relationship::to_params)
                .collect(),
        })
    }

    /// Serialize this model's own entities to JSON
    pub fn to_json(&self, data: &Data) -> Result<String> {
        Ok(serde_json::to_string(&self.to_params(data)?)?)
    }

    pub(crate) fn fire_built(&mut self) {
        let mut emitter = mem::take(&mut self.events.on_built);
        emitter.fire(self);
        self.events.on_built = emitter;
    }

    pub(crate) fn fire_destroyed(&mut self) {
        let mut emitter = mem::take(&mut self.events.on_destroyed);
        emitter.fire(self);
        self.events.on_destroyed = emitter;
    }

    fn register_object(&mut self, id: &str, object_type: TypeCode) {
        self.object_ids.push(id.to_string());
        self.object_index.insert(id.to_string());
        self.objects_by_type
            .entry(object_type)
            .or_default()
            .push(id.to_string());
        *self.type_counts.entry(object_type).or_insert(0) += 1;
    }

    fn register_property_set(&mut self, id: &str) {
        self.property_set_ids.push(id.to_string());
        self.property_set_index.insert(id.to_string());
    }
}

/// Builder handle for one model of a [`Data`] container
///
/// Obtained from [`Data::create_model`] or [`Data::model_mut`]. Every call
/// checks the model's lifecycle first; once the model is built or destroyed,
/// create calls fail and leave the container untouched.
#[derive(Debug)]
pub struct DataModelMut<'a> {
    data: &'a mut Data,
    id: String,
}

impl<'a> DataModelMut<'a> {
    pub(crate) fn new(data: &'a mut Data, id: String) -> Self {
        Self { data, id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The container this model contributes to
    pub fn data(&self) -> &Data {
        &*self.data
    }

    /// The model's record
    pub fn model(&self) -> Result<&DataModel> {
        self.data
            .models
            .get(&self.id)
            .ok_or_else(|| DataError::ModelDestroyed(self.id.clone()))
    }

    /// Subscribe to this model's notifications
    pub fn events(&mut self) -> Result<&mut ModelEvents> {
        let model = self
            .data
            .models
            .get_mut(&self.id)
            .ok_or_else(|| DataError::ModelDestroyed(self.id.clone()))?;
        Ok(&mut model.events)
    }

    /// Create a property set, or link the container's existing one with the same ID
    pub fn create_property_set(&mut self, params: &PropertySetParams) -> Result<&PropertySet> {
        let model = self.writable()?;
        params.check_required()?;
        if model.has_property_set(&params.id) {
            return Err(DataError::duplicate_property_set(&self.id, &params.id));
        }
        self.apply_property_set(params);
        self.data
            .property_sets
            .get(&params.id)
            .ok_or_else(|| DataError::property_set_not_found(&self.id, &params.id))
    }

    /// Create an object, or link the container's existing one with the same ID
    ///
    /// Every listed property set must already belong to this model.
    pub fn create_object(&mut self, params: &ObjectParams) -> Result<&DataObject> {
        let model = self.writable()?;
        params.check_required()?;
        if model.has_object(&params.id) {
            return Err(DataError::duplicate_object(&self.id, &params.id));
        }
        if let Some(missing) = params
            .property_set_ids
            .iter()
            .find(|id| !model.has_property_set(id))
        {
            return Err(DataError::property_set_not_found(&self.id, missing));
        }
        self.check_type(params.object_type)?;

        self.apply_object(params);
        self.data
            .objects
            .get(&params.id)
            .ok_or_else(|| DataError::ObjectNotFound(params.id.clone()))
    }

    /// Create a relationship between two objects of the container
    ///
    /// Endpoints are looked up in the whole container, so a model may relate
    /// objects contributed by other models.
    pub fn create_relationship(&mut self, params: &RelationshipParams) -> Result<&Relationship> {
        self.writable()?;
        for endpoint in [&params.relating_object_id, &params.related_object_id] {
            if !self.data.objects.contains_key(endpoint) {
                return Err(DataError::ObjectNotFound(endpoint.clone()));
            }
        }
        self.check_type(params.relationship_type)?;

        self.apply_relationship(params);
        self.model()?
            .relationships
            .last()
            .ok_or_else(|| DataError::ModelDestroyed(self.id.clone()))
    }

    /// Apply a whole bundle: property sets, then objects, then relationships
    ///
    /// The bundle is validated against the model and the container before
    /// anything is applied; on error nothing changes.
    pub fn from_params(&mut self, params: &ModelParams) -> Result<()> {
        self.validate(params)?;
        for pset in &params.property_sets {
            self.apply_property_set(pset);
        }
        for object in &params.objects {
            self.apply_object(object);
        }
        for relationship in &params.relationships {
            self.apply_relationship(relationship);
        }
        debug!(
            "Loaded {} property set(s), {} object(s), {} relationship(s) into model {}",
            params.property_sets.len(),
            params.objects.len(),
            params.relationships.len(),
            self.id
        );
        Ok(())
    }

    /// Serialize this model's own entities
    pub fn to_params(&self) -> Result<ModelParams> {
        self.model()?.to_params(&*self.data)
    }

    /// Finalize the model
    ///
    /// Fires the model's `on_built`, then the container's `on_model_created`,
    /// before returning.
    pub fn build(&mut self) -> Result<&DataModel> {
        let data = &mut *self.data;
        let model = data
            .models
            .get_mut(&self.id)
            .ok_or_else(|| DataError::ModelDestroyed(self.id.clone()))?;
        if model.built {
            return Err(DataError::ModelBuilt(self.id.clone()));
        }
        model.built = true;
        debug!(
            "Built model {} ({} object(s), {} relationship(s))",
            model.id,
            model.object_ids.len(),
            model.relationships.len()
        );
        model.fire_built();
        data.events.on_model_created.fire(model);
        self.model()
    }

    /// Destroy the model, releasing the entities only it owned
    pub fn destroy(&mut self) -> Result<()> {
        self.data.destroy_model(&self.id)
    }

    /// The model's record if it may still be modified
    fn writable(&self) -> Result<&DataModel> {
        let model = self.model()?;
        if model.built {
            return Err(DataError::ModelBuilt(self.id.clone()));
        }
        Ok(model)
    }

    fn check_type(&self, code: TypeCode) -> Result<()> {
        if self.data.config().accepts_type(code) {
            Ok(())
        } else {
            Err(DataError::UnknownType(code))
        }
    }

    /// Check a bundle without applying it
    fn validate(&self, params: &ModelParams) -> Result<()> {
        let model = self.writable()?;

        let mut psets: FxHashSet<&str> = FxHashSet::default();
        for pset in &params.property_sets {
            pset.check_required()?;
            if model.has_property_set(&pset.id) || !psets.insert(pset.id.as_str()) {
                return Err(DataError::duplicate_property_set(&self.id, &pset.id));
            }
        }

        let mut objects: FxHashSet<&str> = FxHashSet::default();
        for object in &params.objects {
            object.check_required()?;
            if model.has_object(&object.id) || !objects.insert(object.id.as_str()) {
                return Err(DataError::duplicate_object(&self.id, &object.id));
            }
            if let Some(missing) = object
                .property_set_ids
                .iter()
                .find(|id| !model.has_property_set(id) && !psets.contains(id.as_str()))
            {
                return Err(DataError::property_set_not_found(&self.id, missing));
            }
            self.check_type(object.object_type)?;
        }

        for relationship in &params.relationships {
            for endpoint in [
                &relationship.relating_object_id,
                &relationship.related_object_id,
            ] {
                if !self.data.objects.contains_key(endpoint) && !objects.contains(endpoint.as_str())
                {
                    return Err(DataError::ObjectNotFound(endpoint.clone()));
                }
            }
            self.check_type(relationship.relationship_type)?;
        }
        Ok(())
    }

    fn apply_property_set(&mut self, params: &PropertySetParams) {
        let data = &mut *self.data;
        match data.property_sets.get_mut(&params.id) {
            Some(existing) => {
                existing.models.push(self.id.clone());
                trace!("Model {} reuses property set {}", self.id, params.id);
            }
            None => {
                data.property_sets
                    .insert(params.id.clone(), PropertySet::from_params(params, &self.id));
                trace!("Model {} created property set {}", self.id, params.id);
            }
        }
        if let Some(model) = data.models.get_mut(&self.id) {
            model.register_property_set(&params.id);
        }
    }

    fn apply_object(&mut self, params: &ObjectParams) {
        let data = &mut *self.data;
        match data.objects.get_mut(&params.id) {
            Some(existing) => {
                existing.models.push(self.id.clone());
                trace!("Model {} reuses object {}", self.id, params.id);
            }
            None => {
                let seq = data.next_seq();
                let object = DataObject::from_params(data.id(), seq, params, &self.id);
                data.objects_by_type
                    .entry(params.object_type)
                    .or_default()
                    .push(params.id.clone());
                *data.type_counts.entry(params.object_type).or_insert(0) += 1;
                data.objects.insert(params.id.clone(), object);
                trace!(
                    "Model {} created object {} ({})",
                    self.id,
                    params.id,
                    data.config().registry().label(params.object_type)
                );
                if let Some(object) = data.objects.get(&params.id) {
                    data.events.on_object_created.fire(object);
                }
            }
        }
        if let Some(model) = data.models.get_mut(&self.id) {
            model.register_object(&params.id, params.object_type);
        }
    }

    fn apply_relationship(&mut self, params: &RelationshipParams) {
        let id = self.data.next_relationship_id();
        let relationship = Relationship::new(id, params);
        let data = &mut *self.data;
        if let Some(source) = data.objects.get_mut(&params.relating_object_id) {
            source
                .related
                .entry(params.relationship_type)
                .or_default()
                .push(relationship.clone());
        }
        if let Some(target) = data.objects.get_mut(&params.related_object_id) {
            target
                .relating
                .entry(params.relationship_type)
                .or_default()
                .push(relationship.clone());
        }
        if let Some(model) = data.models.get_mut(&self.id) {
            model.relationships.push(relationship);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PropertyParams;
    use crate::DataConfig;
    use bim_types::{IfcEntityType, IfcTypes, BASIC_AGGREGATION, BASIC_ENTITY};
    use std::sync::{Arc, Mutex};

    fn object(id: &str) -> ObjectParams {
        ObjectParams::new(id, BASIC_ENTITY, id.to_uppercase())
    }

    fn aggregation(relating: &str, related: &str) -> RelationshipParams {
        RelationshipParams::new(BASIC_AGGREGATION, relating, related)
    }

    fn pset(id: &str) -> PropertySetParams {
        PropertySetParams::new(id, "Pset_Common", "Default")
            .with_property(PropertyParams::new("Height", 2.5))
    }

    #[test]
    fn test_duplicate_object_in_same_model() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        model.create_object(&object("x")).unwrap();

        let err = model.create_object(&object("x")).unwrap_err();
        assert!(matches!(&err, DataError::DuplicateObject { id, .. } if id == "x"));
        assert!(err.to_string().contains("x"));
        assert_eq!(model.model().unwrap().object_ids().len(), 1);
    }

    #[test]
    fn test_object_shared_across_models() {
        let mut data = Data::new();
        data.create_model(&ModelParams::new("m1"))
            .unwrap()
            .create_object(&object("x"))
            .unwrap();
        data.create_model(&ModelParams::new("m2"))
            .unwrap()
            .create_object(&object("x"))
            .unwrap();

        let x = data.object("x").unwrap();
        assert_eq!(x.models(), ["m1".to_string(), "m2".to_string()]);
        assert!(data.model("m1").unwrap().has_object("x"));
        assert!(data.model("m2").unwrap().has_object("x"));
        assert_eq!(data.object_count(), 1);
        assert_eq!(data.type_count(BASIC_ENTITY), 1);
        assert_eq!(data.model("m2").unwrap().type_counts()[&BASIC_ENTITY], 1);
        assert_eq!(
            data.model("m2").unwrap().object_ids_by_type(BASIC_ENTITY),
            ["x".to_string()]
        );
    }

    #[test]
    fn test_first_creator_wins() {
        let mut data = Data::new();
        data.create_model(&ModelParams::new("m1"))
            .unwrap()
            .create_object(&ObjectParams::new("x", BASIC_ENTITY, "First"))
            .unwrap();
        let mut m2 = data.create_model(&ModelParams::new("m2")).unwrap();
        let x = m2
            .create_object(&ObjectParams::new("x", BASIC_ENTITY, "Second"))
            .unwrap();
        assert_eq!(x.name(), "First");
    }

    #[test]
    fn test_create_after_build_fails() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        model.create_object(&object("a")).unwrap();
        model.build().unwrap();

        assert!(matches!(
            model.create_object(&object("b")),
            Err(DataError::ModelBuilt(_))
        ));
        assert!(matches!(
            model.create_property_set(&pset("p")),
            Err(DataError::ModelBuilt(_))
        ));
        assert!(matches!(
            model.create_relationship(&aggregation("a", "a")),
            Err(DataError::ModelBuilt(_))
        ));
        assert!(matches!(
            model.from_params(&ModelParams::new("m1")),
            Err(DataError::ModelBuilt(_))
        ));
        assert!(matches!(model.build(), Err(DataError::ModelBuilt(_))));

        assert!(data.object("b").is_none());
        assert!(data.property_set("p").is_none());
        assert!(data.object("a").unwrap().related().is_empty());
    }

    #[test]
    fn test_create_after_destroy_fails() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        model.destroy().unwrap();

        assert!(matches!(
            model.create_object(&object("a")),
            Err(DataError::ModelDestroyed(_))
        ));
        assert!(matches!(model.build(), Err(DataError::ModelDestroyed(_))));
        assert!(matches!(model.destroy(), Err(DataError::ModelDestroyed(_))));
        assert!(matches!(model.to_params(), Err(DataError::ModelDestroyed(_))));
        assert_eq!(data.object_count(), 0);
        assert!(data.model("m1").is_none());
    }

    #[test]
    fn test_missing_property_set() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        model.create_property_set(&pset("p1")).unwrap();

        let err = model
            .create_object(&object("a").with_property_sets(["p1", "p2"]))
            .unwrap_err();
        assert!(matches!(&err, DataError::PropertySetNotFound { id, .. } if id == "p2"));
        assert!(err.to_string().contains("p2"));
        assert!(data.object("a").is_none());
    }

    #[test]
    fn test_property_set_resolved_against_own_model() {
        let mut data = Data::new();
        data.create_model(&ModelParams::new("m1"))
            .unwrap()
            .create_property_set(&pset("p1"))
            .unwrap();

        let mut m2 = data.create_model(&ModelParams::new("m2")).unwrap();
        let err = m2
            .create_object(&object("a").with_property_sets(["p1"]))
            .unwrap_err();
        assert!(matches!(err, DataError::PropertySetNotFound { .. }));

        let shared = m2.create_property_set(&pset("p1")).unwrap();
        assert_eq!(shared.models(), ["m1".to_string(), "m2".to_string()]);
        let a = m2
            .create_object(&object("a").with_property_sets(["p1"]))
            .unwrap();
        assert_eq!(a.property_set_ids(), ["p1".to_string()]);
        assert_eq!(data.property_set_count(), 1);
    }

    #[test]
    fn test_duplicate_property_set_in_same_model() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        model.create_property_set(&pset("p1")).unwrap();
        let err = model.create_property_set(&pset("p1")).unwrap_err();
        assert!(matches!(&err, DataError::DuplicatePropertySet { id, .. } if id == "p1"));
    }

    #[test]
    fn test_relationship_indexes_both_endpoints() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        model.create_object(&object("a")).unwrap();
        model.create_object(&object("b")).unwrap();
        let rel = model.create_relationship(&aggregation("a", "b")).unwrap().clone();
        model.build().unwrap();

        let a = data.object("a").unwrap();
        let b = data.object("b").unwrap();
        assert_eq!(a.related_of(BASIC_AGGREGATION), [rel.clone()]);
        assert_eq!(a.related_of(BASIC_AGGREGATION)[0].related_object_id(), "b");
        assert_eq!(b.relating_of(BASIC_AGGREGATION)[0].relating_object_id(), "a");
        assert!(a.relating().is_empty());
        assert!(b.related().is_empty());

        let children: Vec<_> = a.related_objects(&data, BASIC_AGGREGATION).map(|o| o.id()).collect();
        assert_eq!(children, vec!["b"]);
        let parents: Vec<_> = b.relating_objects(&data, BASIC_AGGREGATION).map(|o| o.id()).collect();
        assert_eq!(parents, vec!["a"]);
        assert_eq!(data.model("m1").unwrap().relationships(), [rel]);
    }

    #[test]
    fn test_relationship_missing_endpoint() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        model.create_object(&object("a")).unwrap();

        let err = model.create_relationship(&aggregation("a", "ghost")).unwrap_err();
        assert!(matches!(&err, DataError::ObjectNotFound(id) if id == "ghost"));
        assert!(err.to_string().contains("ghost"));
        assert!(model.model().unwrap().relationships().is_empty());
        assert!(data.object("a").unwrap().related().is_empty());
    }

    #[test]
    fn test_relationship_across_models() {
        let mut data = Data::new();
        data.create_model(&ModelParams::new("structure"))
            .unwrap()
            .create_object(&object("storey"))
            .unwrap();
        let mut mep = data.create_model(&ModelParams::new("mep")).unwrap();
        mep.create_object(&object("duct")).unwrap();
        mep.create_relationship(&aggregation("storey", "duct")).unwrap();

        let storey = data.object("storey").unwrap();
        assert_eq!(storey.related_of(BASIC_AGGREGATION).len(), 1);
        assert!(!data.model("structure").unwrap().has_object("duct"));
    }

    #[test]
    fn test_relationships_are_not_deduplicated() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        model.create_object(&object("a")).unwrap();
        model.create_object(&object("b")).unwrap();
        let first = model.create_relationship(&aggregation("a", "b")).unwrap().id();
        let second = model.create_relationship(&aggregation("a", "b")).unwrap().id();

        assert_ne!(first, second);
        assert_eq!(data.object("a").unwrap().related_of(BASIC_AGGREGATION).len(), 2);
        assert_eq!(data.object("b").unwrap().relating_of(BASIC_AGGREGATION).len(), 2);
    }

    #[test]
    fn test_build_events() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut data = Data::new();
        let events = Arc::clone(&log);
        data.events()
            .on_model_created
            .subscribe(move |m: &DataModel| events.lock().unwrap().push(format!("data:{}", m.id())));

        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        let events = Arc::clone(&log);
        model
            .events()
            .unwrap()
            .on_built
            .subscribe(move |m: &DataModel| {
                assert!(m.is_built());
                events.lock().unwrap().push(format!("model:{}", m.id()));
            });

        assert!(log.lock().unwrap().is_empty());
        let built = model.build().unwrap();
        assert!(built.is_built());
        assert_eq!(*log.lock().unwrap(), vec!["model:m1", "data:m1"]);
    }

    #[test]
    fn test_object_created_event_only_for_new_objects() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let mut data = Data::new();
        let sink = Arc::clone(&created);
        data.events()
            .on_object_created
            .subscribe(move |o: &DataObject| sink.lock().unwrap().push(o.id().to_string()));

        data.create_model(&ModelParams::new("m1"))
            .unwrap()
            .create_object(&object("x"))
            .unwrap();
        data.create_model(&ModelParams::new("m2"))
            .unwrap()
            .create_object(&object("x"))
            .unwrap();
        assert_eq!(*created.lock().unwrap(), vec!["x"]);
    }

    #[test]
    fn test_from_params_order() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        let params = ModelParams {
            property_sets: vec![pset("p1")],
            objects: vec![object("a").with_property_sets(["p1"]), object("b")],
            relationships: vec![aggregation("a", "b")],
            ..ModelParams::default()
        };
        model.from_params(&params).unwrap();

        let record = model.model().unwrap();
        assert_eq!(record.property_set_ids(), ["p1".to_string()]);
        assert_eq!(record.object_ids(), ["a".to_string(), "b".to_string()]);
        assert_eq!(record.relationships().len(), 1);
    }

    #[test]
    fn test_from_params_is_all_or_nothing() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        let params = ModelParams {
            property_sets: vec![pset("p1")],
            objects: vec![object("a"), object("b")],
            relationships: vec![aggregation("a", "b"), aggregation("a", "ghost")],
            ..ModelParams::default()
        };

        let err = model.from_params(&params).unwrap_err();
        assert!(matches!(&err, DataError::ObjectNotFound(id) if id == "ghost"));
        assert_eq!(data.object_count(), 0);
        assert_eq!(data.property_set_count(), 0);

        let duplicated = ModelParams {
            objects: vec![object("a"), object("a")],
            ..ModelParams::default()
        };
        let mut model = data.model_mut("m1").unwrap();
        assert!(matches!(
            model.from_params(&duplicated),
            Err(DataError::DuplicateObject { .. })
        ));
        assert!(model.model().unwrap().object_ids().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut data = Data::new();
        let mut source = data.create_model(&ModelParams::new("m1")).unwrap();
        source.create_property_set(&pset("p1")).unwrap();
        source
            .create_object(&object("a").with_property_sets(["p1"]).with_description("root"))
            .unwrap();
        source.create_object(&object("b")).unwrap();
        source.create_relationship(&aggregation("a", "b")).unwrap();
        source.build().unwrap();
        let params = source.to_params().unwrap();
        assert_eq!(params.id, "m1");

        let mut other = Data::new();
        let mut copy = other.create_model(&ModelParams::new("m2")).unwrap();
        copy.from_params(&params).unwrap();
        copy.build().unwrap();
        let mut copied = copy.to_params().unwrap();
        copied.id = params.id.clone();
        assert_eq!(copied, params);
    }

    #[test]
    fn test_round_trip_of_model_reusing_object() {
        let mut data = Data::new();
        let mut m1 = data.create_model(&ModelParams::new("m1")).unwrap();
        m1.create_property_set(&pset("p1")).unwrap();
        m1.create_object(&object("x").with_property_sets(["p1"])).unwrap();
        m1.build().unwrap();
        let mut m2 = data.create_model(&ModelParams::new("m2")).unwrap();
        m2.create_object(&object("x")).unwrap();
        m2.build().unwrap();

        let params = m2.to_params().unwrap();
        assert!(params.objects[0].property_set_ids.is_empty());
        assert_eq!(data.object("x").unwrap().property_set_ids(), ["p1"]);

        let mut other = Data::new();
        let mut copy = other.create_model(&ModelParams::new("copy")).unwrap();
        copy.from_params(&params).unwrap();
        copy.build().unwrap();
        assert!(other.object("x").is_some());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut data = Data::new();
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();

        let err = model
            .create_object(&ObjectParams::new("x", BASIC_ENTITY, ""))
            .unwrap_err();
        assert!(matches!(&err, DataError::MissingArgument(name) if name == "objects[x].name"));
        let err = model
            .create_property_set(&PropertySetParams::new("p", "Pset", ""))
            .unwrap_err();
        assert!(matches!(&err, DataError::MissingArgument(name) if name == "propertySets[p].type"));
        let err = model
            .create_property_set(&PropertySetParams::new("p", "", "Default"))
            .unwrap_err();
        assert!(matches!(&err, DataError::MissingArgument(name) if name == "propertySets[p].name"));

        let err = model
            .load_json(r#"{ "objects": [{ "id": "y", "type": 1001 }] }"#)
            .unwrap_err();
        assert!(matches!(&err, DataError::MissingArgument(name) if name == "objects[y].name"));
        assert_eq!(model.data().object_count(), 0);
    }

    #[test]
    fn test_model_metadata() {
        let mut data = Data::new();
        let params = ModelParams {
            id: "m1".into(),
            author: Some("xeolabs".into()),
            schema: Some("IFC4".into()),
            creating_application: Some("Revit".into()),
            ..ModelParams::default()
        };
        let model = data.create_model(&params).unwrap();
        let record = model.model().unwrap();
        assert_eq!(record.author(), Some("xeolabs"));
        assert_eq!(record.schema(), Some("IFC4"));
        assert_eq!(record.creating_application(), Some("Revit"));
        assert_eq!(record.project_id(), None);
        assert!(!record.is_built());
        assert_eq!(record.to_params(model.data()).unwrap(), params);
    }

    #[test]
    fn test_strict_types() {
        let mut data = Data::with_config(
            DataConfig::new()
                .with_registry(Arc::new(IfcTypes))
                .with_strict_types(true),
        );
        let mut model = data.create_model(&ModelParams::new("m1")).unwrap();
        let wall = IfcEntityType::IfcWall.code();
        model.create_object(&ObjectParams::new("w", wall, "Wall")).unwrap();
        assert!(matches!(
            model.create_object(&ObjectParams::new("x", 9999, "X")),
            Err(DataError::UnknownType(9999))
        ));
        assert!(matches!(
            model.create_relationship(&RelationshipParams::new(9999, "w", "w")),
            Err(DataError::UnknownType(9999))
        ));
    }
}
