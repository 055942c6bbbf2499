// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-derived taxonomy
//!
//! Covers the semantic (non-geometric) IFC entities that end up as objects in
//! a data graph, plus the IFC relationship entities that end up as
//! relationship types. Geometry, profile and presentation entities are not
//! part of this taxonomy: they never become data objects.

use crate::{TypeCode, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! ifc_entity_types {
    ($($(#[$meta:meta])* $variant:ident = $code:literal,)+) => {
        /// IFC entity type with a stable integer code
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        #[repr(u32)]
        pub enum IfcEntityType {
            $($(#[$meta])* $variant = $code,)+
        }

        impl IfcEntityType {
            /// Every type in this taxonomy, in code order
            pub const ALL: &'static [IfcEntityType] = &[$(IfcEntityType::$variant,)+];

            /// Get the schema name (e.g. "IfcWall")
            pub fn name(&self) -> &'static str {
                match self {
                    $(IfcEntityType::$variant => stringify!($variant),)+
                }
            }

            /// Look up a type by its integer code
            pub fn from_code(code: TypeCode) -> Option<Self> {
                match code {
                    $($code => Some(IfcEntityType::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

ifc_entity_types! {
    // ========================================================================
    // Spatial Structure
    // ========================================================================
    IfcProject = 100,
    IfcSite = 101,
    IfcBuilding = 102,
    IfcBuildingStorey = 103,
    IfcSpace = 104,
    IfcFacility = 105,
    IfcFacilityPart = 106,
    IfcRoad = 107,
    IfcRoadPart = 108,
    IfcBridge = 109,
    IfcBridgePart = 110,
    IfcRailway = 111,
    IfcRailwayPart = 112,

    // ========================================================================
    // Building Elements
    // ========================================================================
    IfcWall = 200,
    IfcWallStandardCase = 201,
    IfcCurtainWall = 202,
    IfcSlab = 203,
    IfcRoof = 204,
    IfcBeam = 205,
    IfcColumn = 206,
    IfcDoor = 207,
    IfcWindow = 208,
    IfcStair = 209,
    IfcStairFlight = 210,
    IfcRamp = 211,
    IfcRampFlight = 212,
    IfcRailing = 213,
    IfcCovering = 214,
    IfcPlate = 215,
    IfcMember = 216,
    IfcFooting = 217,
    IfcPile = 218,
    IfcBuildingElementProxy = 219,

    // ========================================================================
    // Distribution Elements (MEP)
    // ========================================================================
    IfcDistributionElement = 300,
    IfcDistributionFlowElement = 301,
    IfcFlowTerminal = 302,
    IfcFlowSegment = 303,
    IfcFlowFitting = 304,
    IfcFlowController = 305,
    IfcFlowMovingDevice = 306,
    IfcFlowStorageDevice = 307,
    IfcFlowTreatmentDevice = 308,
    IfcEnergyConversionDevice = 309,
    IfcDistributionControlElement = 310,

    // ========================================================================
    // Furnishing, Openings and Features
    // ========================================================================
    IfcFurnishingElement = 400,
    IfcFurniture = 401,
    IfcSystemFurnitureElement = 402,
    IfcOpeningElement = 403,
    IfcOpeningStandardCase = 404,
    IfcVoidingFeature = 405,
    IfcProjectionElement = 406,

    // ========================================================================
    // Relationships
    // ========================================================================
    IfcRelAggregates = 500,
    IfcRelContainedInSpatialStructure = 501,
    IfcRelDefinesByProperties = 502,
    IfcRelDefinesByType = 503,
    IfcRelAssociatesMaterial = 504,
    IfcRelVoidsElement = 505,
    IfcRelFillsElement = 506,
    IfcRelConnectsPathElements = 507,
    IfcRelSpaceBoundary = 508,
    IfcRelNests = 509,

    // ========================================================================
    // Property Definitions
    // ========================================================================
    IfcPropertySet = 600,
    IfcElementQuantity = 601,
}

impl IfcEntityType {
    /// Get the integer code used in the data graph
    pub fn code(&self) -> TypeCode {
        *self as TypeCode
    }

    /// Parse a type name (case-insensitive, e.g. "IFCWALL" or "IfcWall")
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .copied()
    }

    /// Check if this type is part of the spatial structure
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            IfcEntityType::IfcProject
                | IfcEntityType::IfcSite
                | IfcEntityType::IfcBuilding
                | IfcEntityType::IfcBuildingStorey
                | IfcEntityType::IfcSpace
                | IfcEntityType::IfcFacility
                | IfcEntityType::IfcFacilityPart
                | IfcEntityType::IfcRoad
                | IfcEntityType::IfcRoadPart
                | IfcEntityType::IfcBridge
                | IfcEntityType::IfcBridgePart
                | IfcEntityType::IfcRailway
                | IfcEntityType::IfcRailwayPart
        )
    }

    /// Check if this type is a relationship entity
    pub fn is_relationship(&self) -> bool {
        (500..600).contains(&self.code())
    }
}

impl fmt::Display for IfcEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IfcEntityType {
    type Err = crate::TypeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::TypeError::UnknownName(s.to_string()))
    }
}

impl From<IfcEntityType> for TypeCode {
    fn from(t: IfcEntityType) -> Self {
        t.code()
    }
}

/// Registry over [`IfcEntityType`]
///
/// Name lookup is case-insensitive so that STEP-style upper-case names
/// ("IFCBUILDINGSTOREY") resolve as well as schema names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfcTypes;

impl TypeRegistry for IfcTypes {
    fn name(&self, code: TypeCode) -> Option<&str> {
        IfcEntityType::from_code(code).map(|t| t.name())
    }

    fn code(&self, name: &str) -> Option<TypeCode> {
        IfcEntityType::parse(name).map(|t| t.code())
    }
}
