// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-Data - Federated semantic data graph for BIM models
//!
//! A [`Data`] container holds models, and the objects, property sets and
//! relationships those models contribute. Objects and property sets are
//! canonical per global ID: when two models create the same ID they share one
//! instance, which stays in the container until its last owning model is
//! destroyed.
//!
//! # Architecture
//!
//! - [`Data`] - registry of models and canonical entities, with type indices
//! - [`DataModelMut`] - builder for one model (`create_*`, `build`, `destroy`)
//! - [`DataModel`] - a model's record: metadata, owned IDs, lifecycle flags
//! - [`DataObject`] / [`Relationship`] - typed nodes and directed, typed edges
//! - [`PropertySet`] / [`Property`] - attribute bags attached to objects
//! - [`search_objects`] - depth-first traversal with type filters
//! - [`MetaModelLoader`] - import of the legacy metadata JSON format
//!
//! Type codes are plain integers; their meaning comes from the
//! [`TypeRegistry`](bim_types::TypeRegistry) set in [`DataConfig`].
//!
//! # Concurrency
//!
//! Every mutation takes `&mut Data`, so each create or destroy runs as one
//! exclusive operation. Hosts that share a container between threads wrap it
//! in a single `Mutex` or `RwLock`.
//!
//! # Example
//!
//! ```
//! use bim_data::{Data, ModelParams, ObjectParams, RelationshipParams, SearchParams};
//! use bim_types::{BASIC_AGGREGATION, BASIC_ENTITY};
//!
//! # fn main() -> bim_data::Result<()> {
//! let mut data = Data::new();
//! let mut model = data.create_model(&ModelParams::new("furniture"))?;
//! model.create_object(&ObjectParams::new("table", BASIC_ENTITY, "Table"))?;
//! model.create_object(&ObjectParams::new("top", BASIC_ENTITY, "Table top"))?;
//! model.create_relationship(&RelationshipParams::new(BASIC_AGGREGATION, "table", "top"))?;
//! model.build()?;
//!
//! let ids = data.search_object_ids(&SearchParams::from_object_id("table"))?;
//! assert_eq!(ids, vec!["table", "top"]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod loader;
pub mod model;
pub mod object;
pub mod params;
pub mod property;
pub mod search;

pub use config::DataConfig;
pub use data::{Data, DataEvents, DataId};
pub use error::{DataError, Result};
pub use events::{EventEmitter, Listener, SubscriptionId, SubscriptionMode};
pub use loader::MetaModelLoader;
pub use model::{DataModel, DataModelMut, ModelEvents};
pub use object::{DataObject, Relationship, RelationshipId, RelationshipMap};
pub use params::{ModelParams, ObjectParams, PropertyParams, PropertySetParams, RelationshipParams};
pub use property::{Property, PropertySet};
pub use search::{search_objects, SearchParams};
