// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Depth-first search over the relationship graph
//!
//! Traversal starts at an explicit object, an object ID, or every root object
//! of the container, and follows each object's outgoing (`related`) edges.
//! Objects are reported in visit order. An object that is already on the
//! current path is not entered again, so cyclic graphs terminate; acyclic
//! graphs are reported once per distinct path.

use crate::{Data, DataError, DataObject, Relationship, Result};
use bim_types::TypeCode;
use log::warn;
use rustc_hash::FxHashSet;
use std::ops::ControlFlow;

/// Search parameters
///
/// Type filters follow one rule: a type on an exclude list is rejected;
/// otherwise, if an include list is given, only its types pass; otherwise
/// every type passes.
///
/// # Example
///
/// ```
/// use bim_data::{Data, ModelParams, ObjectParams, RelationshipParams, SearchParams};
/// use bim_types::{BASIC_AGGREGATION, BASIC_ENTITY};
///
/// # fn main() -> bim_data::Result<()> {
/// # let mut data = Data::new();
/// # let mut model = data.create_model(&ModelParams::new("m1"))?;
/// # model.create_object(&ObjectParams::new("table", BASIC_ENTITY, "Table"))?;
/// # model.create_object(&ObjectParams::new("leg", BASIC_ENTITY, "Leg"))?;
/// # model.create_relationship(&RelationshipParams::new(BASIC_AGGREGATION, "table", "leg"))?;
/// # model.build()?;
/// let params = SearchParams::from_object_id("table").with_include_related([BASIC_AGGREGATION]);
/// let ids = data.search_object_ids(&params)?;
/// assert_eq!(ids, vec!["table", "leg"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct SearchParams<'a> {
    /// Start at this object; takes precedence over `start_object_id`
    pub start_object: Option<&'a DataObject>,
    /// Start at the object with this ID
    pub start_object_id: Option<String>,
    /// `Some(false)` leaves the start object(s) out of the results
    pub include_start: Option<bool>,
    pub include_objects: Option<Vec<TypeCode>>,
    pub exclude_objects: Option<Vec<TypeCode>>,
    pub include_relating: Option<Vec<TypeCode>>,
    pub exclude_relating: Option<Vec<TypeCode>>,
    pub include_related: Option<Vec<TypeCode>>,
    pub exclude_related: Option<Vec<TypeCode>>,
}

impl<'a> SearchParams<'a> {
    /// Search from every root object
    pub fn new() -> Self {
        Self::default()
    }

    /// Search from the object with the given ID
    pub fn from_object_id(id: impl Into<String>) -> Self {
        Self {
            start_object_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Search from the given object
    pub fn from_object(object: &'a DataObject) -> Self {
        Self {
            start_object: Some(object),
            ..Self::default()
        }
    }

    pub fn with_include_start(mut self, include: bool) -> Self {
        self.include_start = Some(include);
        self
    }

    pub fn with_include_objects(mut self, types: impl IntoIterator<Item = TypeCode>) -> Self {
        self.include_objects = Some(types.into_iter().collect());
        self
    }

    pub fn with_exclude_objects(mut self, types: impl IntoIterator<Item = TypeCode>) -> Self {
        self.exclude_objects = Some(types.into_iter().collect());
        self
    }

    pub fn with_include_relating(mut self, types: impl IntoIterator<Item = TypeCode>) -> Self {
        self.include_relating = Some(types.into_iter().collect());
        self
    }

    pub fn with_exclude_relating(mut self, types: impl IntoIterator<Item = TypeCode>) -> Self {
        self.exclude_relating = Some(types.into_iter().collect());
        self
    }

    pub fn with_include_related(mut self, types: impl IntoIterator<Item = TypeCode>) -> Self {
        self.include_related = Some(types.into_iter().collect());
        self
    }

    pub fn with_exclude_related(mut self, types: impl IntoIterator<Item = TypeCode>) -> Self {
        self.exclude_related = Some(types.into_iter().collect());
        self
    }
}

/// Include/exclude rule over type codes
struct TypeFilter {
    include: Option<FxHashSet<TypeCode>>,
    exclude: Option<FxHashSet<TypeCode>>,
}

impl TypeFilter {
    fn new(include: &Option<Vec<TypeCode>>, exclude: &Option<Vec<TypeCode>>) -> Self {
        Self {
            include: include.as_ref().map(|t| t.iter().copied().collect()),
            exclude: exclude.as_ref().map(|t| t.iter().copied().collect()),
        }
    }

    fn accepts(&self, code: TypeCode) -> bool {
        if self.exclude.as_ref().is_some_and(|e| e.contains(&code)) {
            return false;
        }
        self.include.as_ref().map_or(true, |i| i.contains(&code))
    }
}

struct Search<'d, F> {
    data: &'d Data,
    include_start: bool,
    objects: TypeFilter,
    relating: TypeFilter,
    related: TypeFilter,
    path: FxHashSet<&'d str>,
    sink: F,
}

/// An entered object and the outgoing edges still to follow
struct Frame<'d> {
    object: &'d DataObject,
    depth: usize,
    edges: std::vec::IntoIter<&'d Relationship>,
}

impl<'d, F> Search<'d, F>
where
    F: FnMut(&'d DataObject) -> bool,
{
    /// Pre-order traversal from `start` on an explicit stack
    fn run(&mut self, start: &'d DataObject) -> ControlFlow<()> {
        let mut stack = Vec::new();
        self.enter(start, 0, &mut stack)?;
        while let Some(frame) = stack.last_mut() {
            match frame.edges.next() {
                Some(relationship) => {
                    let depth = frame.depth + 1;
                    if let Some(child) = self.data.object(relationship.related_object_id()) {
                        self.enter(child, depth, &mut stack)?;
                    }
                }
                None => {
                    if let Some(frame) = stack.pop() {
                        self.path.remove(frame.object.id());
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn enter(
        &mut self,
        object: &'d DataObject,
        depth: usize,
        stack: &mut Vec<Frame<'d>>,
    ) -> ControlFlow<()> {
        if !self.path.insert(object.id()) {
            warn!("Search reached object {} again along its own path; not re-entering", object.id());
            return ControlFlow::Continue(());
        }
        let included =
            self.objects.accepts(object.object_type()) && (depth > 0 || self.include_start);
        if included && (self.sink)(object) {
            return ControlFlow::Break(());
        }
        let edges: Vec<&'d Relationship> = object
            .related()
            .iter()
            .filter(|(&code, _)| self.relating.accepts(code) && self.related.accepts(code))
            .flat_map(|(_, relationships)| relationships.iter())
            .collect();
        stack.push(Frame {
            object,
            depth,
            edges: edges.into_iter(),
        });
        ControlFlow::Continue(())
    }
}

/// Run a search, passing each included object to `sink` in visit order
///
/// Traversal stops entirely as soon as `sink` returns `true`.
pub fn search_objects<'d, F>(data: &'d Data, params: &SearchParams<'_>, sink: F) -> Result<()>
where
    F: FnMut(&'d DataObject) -> bool,
{
    data.check_alive()?;

    let starts: Vec<&'d DataObject> = if let Some(start) = params.start_object {
        if start.data_id != data.id() {
            return Err(DataError::ForeignObject(start.id().to_string()));
        }
        let object = data
            .object(start.id())
            .ok_or_else(|| DataError::ObjectNotFound(start.id().to_string()))?;
        vec![object]
    } else if let Some(id) = &params.start_object_id {
        let object = data
            .object(id)
            .ok_or_else(|| DataError::ObjectNotFound(id.clone()))?;
        vec![object]
    } else {
        data.root_objects()
    };

    let mut search = Search {
        data,
        include_start: params.include_start != Some(false),
        objects: TypeFilter::new(&params.include_objects, &params.exclude_objects),
        relating: TypeFilter::new(&params.include_relating, &params.exclude_relating),
        related: TypeFilter::new(&params.include_related, &params.exclude_related),
        path: FxHashSet::default(),
        sink,
    };
    for start in starts {
        if search.run(start).is_break() {
            break;
        }
    }
    Ok(())
}

impl Data {
    /// Run a search with a callback sink; see [`search_objects`]
    pub fn search_objects<'d, F>(&'d self, params: &SearchParams<'_>, sink: F) -> Result<()>
    where
        F: FnMut(&'d DataObject) -> bool,
    {
        search_objects(self, params, sink)
    }

    /// Run a search and collect the IDs of the included objects
    pub fn search_object_ids(&self, params: &SearchParams<'_>) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        search_objects(self, params, |object| {
            ids.push(object.id().to_string());
            false
        })?;
        Ok(ids)
    }

    /// Run a search and collect the included objects
    pub fn search_object_refs<'d>(&'d self, params: &SearchParams<'_>) -> Result<Vec<&'d DataObject>> {
        let mut objects = Vec::new();
        search_objects(self, params, |object| {
            objects.push(object);
            false
        })?;
        Ok(objects)
    }
}
