// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The container: models, canonical objects and property sets

use crate::events::EventEmitter;
use crate::model::{DataModel, DataModelMut};
use crate::object::{remove_edge, Relationship, RelationshipId};
use crate::params::ModelParams;
use crate::{DataConfig, DataError, DataObject, PropertySet, Result};
use bim_types::TypeCode;
use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DATA_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a [`Data`] container
///
/// Used to reject objects that were obtained from another container.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DataId(pub(crate) u64);

impl fmt::Display for DataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data#{}", self.0)
    }
}

/// Notifications raised by a [`Data`] container
#[derive(Debug, Default)]
pub struct DataEvents {
    /// A model finished building
    pub on_model_created: EventEmitter<DataModel>,
    /// A model was destroyed and removed
    pub on_model_destroyed: EventEmitter<DataModel>,
    /// A new canonical object was created
    pub on_object_created: EventEmitter<DataObject>,
    /// A canonical object lost its last owning model
    pub on_object_destroyed: EventEmitter<DataObject>,
    /// The container itself was destroyed
    pub on_destroyed: EventEmitter<DataId>,
}

/// Registry of models and of the objects and property sets they share
///
/// Objects and property sets are stored once per global ID. Models hold their
/// IDs, and each entity lists the models that own it; an entity leaves the
/// container when its last owner is destroyed.
///
/// # Example
///
/// ```
/// use bim_data::{Data, ModelParams, ObjectParams};
/// use bim_types::BASIC_ENTITY;
///
/// # fn main() -> bim_data::Result<()> {
/// let mut data = Data::new();
/// let mut model = data.create_model(&ModelParams::new("model1"))?;
/// model.create_object(&ObjectParams::new("wall", BASIC_ENTITY, "Wall"))?;
/// model.build()?;
///
/// assert_eq!(data.object_ids_by_type(BASIC_ENTITY)?, vec!["wall"]);
/// # Ok(())
/// # }
/// ```
pub struct Data {
    id: DataId,
    config: DataConfig,
    pub(crate) models: FxHashMap<String, DataModel>,
    pub(crate) objects: FxHashMap<String, DataObject>,
    pub(crate) property_sets: FxHashMap<String, PropertySet>,
    pub(crate) objects_by_type: FxHashMap<TypeCode, Vec<String>>,
    pub(crate) type_counts: FxHashMap<TypeCode, usize>,
    pub(crate) events: DataEvents,
    next_seq: u64,
    next_relationship: u64,
    destroyed: bool,
}

impl Data {
    /// Create an empty container with the default configuration
    pub fn new() -> Self {
        Self::with_config(DataConfig::default())
    }

    /// Create an empty container
    pub fn with_config(config: DataConfig) -> Self {
        Self {
            id: DataId(NEXT_DATA_ID.fetch_add(1, Ordering::Relaxed)),
            config,
            models: FxHashMap::default(),
            objects: FxHashMap::default(),
            property_sets: FxHashMap::default(),
            objects_by_type: FxHashMap::default(),
            type_counts: FxHashMap::default(),
            events: DataEvents::default(),
            next_seq: 0,
            next_relationship: 0,
            destroyed: false,
        }
    }

    pub fn id(&self) -> DataId {
        self.id
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Subscribe to container notifications
    pub fn events(&mut self) -> &mut DataEvents {
        &mut self.events
    }

    /// Create a model and return a builder for it
    ///
    /// If `params` carries property sets, objects or relationships they are
    /// applied with [`DataModelMut::from_params`]; when that fails, the model
    /// is discarded and the error is returned.
    pub fn create_model(&mut self, params: &ModelParams) -> Result<DataModelMut<'_>> {
        self.check_alive()?;
        if params.id.is_empty() {
            return Err(DataError::missing("id"));
        }
        if self.models.contains_key(&params.id) {
            return Err(DataError::DuplicateModel(params.id.clone()));
        }

        let seq = self.next_seq();
        let model = DataModel::new(self.id, seq, params);
        self.models.insert(params.id.clone(), model);
        debug!("Created model {}", params.id);

        if params.has_content() {
            let result = DataModelMut::new(self, params.id.clone()).from_params(params);
            if let Err(err) = result {
                self.models.remove(&params.id);
                return Err(err);
            }
        }
        Ok(DataModelMut::new(self, params.id.clone()))
    }

    /// Get a builder for an existing model
    pub fn model_mut(&mut self, id: &str) -> Result<DataModelMut<'_>> {
        self.check_alive()?;
        if !self.models.contains_key(id) {
            return Err(DataError::ModelNotFound(id.to_string()));
        }
        Ok(DataModelMut::new(self, id.to_string()))
    }

    pub fn model(&self, id: &str) -> Option<&DataModel> {
        self.models.get(id)
    }

    /// All models in creation order
    pub fn models(&self) -> Vec<&DataModel> {
        let mut models: Vec<_> = self.models.values().collect();
        models.sort_by_key(|m| m.seq);
        models
    }

    pub fn object(&self, id: &str) -> Option<&DataObject> {
        self.objects.get(id)
    }

    /// All objects in creation order
    pub fn objects(&self) -> Vec<&DataObject> {
        let mut objects: Vec<_> = self.objects.values().collect();
        objects.sort_by_key(|o| o.seq);
        objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn property_set(&self, id: &str) -> Option<&PropertySet> {
        self.property_sets.get(id)
    }

    pub fn property_set_count(&self) -> usize {
        self.property_sets.len()
    }

    /// Objects that are not the related participant of any relationship,
    /// in creation order
    pub fn root_objects(&self) -> Vec<&DataObject> {
        let mut roots: Vec<_> = self.objects.values().filter(|o| o.is_root()).collect();
        roots.sort_by_key(|o| o.seq);
        roots
    }

    /// IDs of the objects of one type
    pub fn object_ids_by_type(&self, object_type: TypeCode) -> Result<Vec<String>> {
        self.check_alive()?;
        Ok(self
            .objects_by_type
            .get(&object_type)
            .cloned()
            .unwrap_or_default())
    }

    /// Number of canonical objects of each type
    pub fn type_counts(&self) -> &FxHashMap<TypeCode, usize> {
        &self.type_counts
    }

    pub fn type_count(&self, object_type: TypeCode) -> usize {
        self.type_counts.get(&object_type).copied().unwrap_or(0)
    }

    /// Destroy every model
    pub fn clear(&mut self) -> Result<()> {
        self.check_alive()?;
        let ids: Vec<String> = self.models().iter().map(|m| m.id().to_string()).collect();
        for id in ids {
            self.destroy_model(&id)?;
        }
        Ok(())
    }

    /// Destroy every model and mark the container destroyed
    pub fn destroy(&mut self) -> Result<()> {
        self.check_alive()?;
        self.clear()?;
        self.destroyed = true;
        debug!("Destroyed {}", self.id);
        self.events.on_destroyed.fire(&self.id);
        Ok(())
    }

    pub(crate) fn check_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(DataError::DataDestroyed)
        } else {
            Ok(())
        }
    }

    pub(crate) fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub(crate) fn next_relationship_id(&mut self) -> RelationshipId {
        let id = RelationshipId(self.next_relationship);
        self.next_relationship += 1;
        id
    }

    /// Remove a model and release everything it owned
    pub(crate) fn destroy_model(&mut self, model_id: &str) -> Result<()> {
        let mut model = self
            .models
            .remove(model_id)
            .ok_or_else(|| DataError::ModelDestroyed(model_id.to_string()))?;
        model.destroyed = true;

        for relationship in &model.relationships {
            self.unlink(relationship);
        }

        let mut removed: FxHashSet<String> = FxHashSet::default();
        for object_id in &model.object_ids {
            let Some(object) = self.objects.get_mut(object_id) else {
                continue;
            };
            object.models.retain(|m| m != model_id);
            if object.models.is_empty() {
                self.remove_object(object_id);
                removed.insert(object_id.clone());
            }
        }

        let mut removed_psets: FxHashSet<&str> = FxHashSet::default();
        for pset_id in &model.property_set_ids {
            let Some(pset) = self.property_sets.get_mut(pset_id) else {
                continue;
            };
            pset.models.retain(|m| m != model_id);
            if pset.models.is_empty() {
                self.property_sets.remove(pset_id);
                removed_psets.insert(pset_id.as_str());
            }
        }
        if !removed_psets.is_empty() {
            for object in self.objects.values_mut() {
                object
                    .property_set_ids
                    .retain(|id| !removed_psets.contains(id.as_str()));
            }
        }

        if !removed.is_empty() {
            for other in self.models.values_mut() {
                let before = other.relationships.len();
                other.relationships.retain(|r| {
                    !removed.contains(r.relating_object_id()) && !removed.contains(r.related_object_id())
                });
                let pruned = before - other.relationships.len();
                if pruned > 0 {
                    warn!(
                        "Pruned {} relationship(s) of model {} whose objects left with model {}",
                        pruned,
                        other.id(),
                        model_id
                    );
                }
            }
        }

        debug!(
            "Destroyed model {} ({} object(s) removed from {})",
            model_id,
            removed.len(),
            self.id
        );
        model.fire_destroyed();
        self.events.on_model_destroyed.fire(&model);
        Ok(())
    }

    /// Remove a canonical object and unwind its edges on both endpoints
    fn remove_object(&mut self, object_id: &str) {
        let Some(object) = self.objects.remove(object_id) else {
            return;
        };

        let object_type = object.object_type();
        if let Some(ids) = self.objects_by_type.get_mut(&object_type) {
            ids.retain(|id| id != object_id);
        }
        if let Some(count) = self.type_counts.get_mut(&object_type) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.type_counts.remove(&object_type);
                self.objects_by_type.remove(&object_type);
            }
        }

        for relationship in object.related.values().flatten() {
            if let Some(target) = self.objects.get_mut(relationship.related_object_id()) {
                remove_edge(&mut target.relating, relationship);
            }
        }
        for relationship in object.relating.values().flatten() {
            if let Some(source) = self.objects.get_mut(relationship.relating_object_id()) {
                remove_edge(&mut source.related, relationship);
            }
        }

        self.events.on_object_destroyed.fire(&object);
    }

    /// Remove one edge from both of its endpoints
    fn unlink(&mut self, relationship: &Relationship) {
        if let Some(source) = self.objects.get_mut(relationship.relating_object_id()) {
            remove_edge(&mut source.related, relationship);
        }
        if let Some(target) = self.objects.get_mut(relationship.related_object_id()) {
            remove_edge(&mut target.relating, relationship);
        }
    }
}

impl Default for Data {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("id", &self.id)
            .field("models", &self.models.len())
            .field("objects", &self.objects.len())
            .field("property_sets", &self.property_sets.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
