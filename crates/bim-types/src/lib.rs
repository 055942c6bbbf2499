// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-Types - Injectable type taxonomies for the semantic data graph
//!
//! Objects and relationships in `bim-data` carry plain integer type codes.
//! What those integers mean is decided by a [`TypeRegistry`] supplied by the
//! caller, never by the graph itself.
//!
//! # Registries
//!
//! - [`BasicTypes`] - a minimal entity/aggregation taxonomy
//! - [`IfcTypes`] - codes derived from the [`IfcEntityType`] enumeration
//! - [`TypeTable`] - an arbitrary, caller-defined taxonomy
//!
//! # Example
//!
//! ```
//! use bim_types::{BasicTypes, IfcEntityType, IfcTypes, TypeRegistry, BASIC_AGGREGATION};
//!
//! let basic = BasicTypes;
//! assert_eq!(basic.code("BasicAggregation"), Some(BASIC_AGGREGATION));
//!
//! let ifc = IfcTypes;
//! assert_eq!(ifc.code("IfcWall"), Some(IfcEntityType::IfcWall.code()));
//! ```

pub mod basic;
pub mod error;
pub mod ifc;
pub mod registry;

pub use basic::*;
pub use error::*;
pub use ifc::*;
pub use registry::*;
