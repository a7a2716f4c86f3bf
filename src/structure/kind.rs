//! Closed set of structure kinds and their constants

use serde::{Deserialize, Serialize};

/// Role a kind plays in supply planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Produces or consumes; may need supply links
    Primary,
    /// Exists to satisfy supply demand
    Auxiliary,
    /// Blocked cell with no part in coverage
    Reserved,
}

/// Shape of a kind's zone of effect relative to its footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Range equals footprint
    None,
    /// Footprint plus a strip directly below it, flush with its left column
    Apron { depth: i32, width: i32 },
    /// Footprint plus orthogonal arms of the given length
    Cross(i32),
}

impl Reach {
    /// Largest distance the range extends beyond the footprint in any direction
    pub fn max_extent(&self) -> i32 {
        match *self {
            Reach::None => 0,
            Reach::Apron { depth, .. } => depth,
            Reach::Cross(arm) => arm,
        }
    }
}

/// Kind of structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StructureKind {
    /// Boosts nearby primaries; affects nothing outside its own footprint
    RangeAmplifier,
    /// Consumes input and emits output; needs two supply links
    Producer,
    /// Storage a feeder pulls from or pushes to
    SupplyNode,
    /// Single-cell lane moving items between a supply node and a primary
    Feeder,
    /// Cell kept empty on purpose
    Reserved,
}

impl StructureKind {
    pub const ALL: [StructureKind; 5] = [
        StructureKind::RangeAmplifier,
        StructureKind::Producer,
        StructureKind::SupplyNode,
        StructureKind::Feeder,
        StructureKind::Reserved,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Dense index, stable for the lifetime of the enum
    pub fn index(&self) -> usize {
        match self {
            StructureKind::RangeAmplifier => 0,
            StructureKind::Producer => 1,
            StructureKind::SupplyNode => 2,
            StructureKind::Feeder => 3,
            StructureKind::Reserved => 4,
        }
    }

    /// Footprint size (height, width in cells)
    pub fn size(&self) -> (i32, i32) {
        match self {
            StructureKind::RangeAmplifier => (3, 3),
            StructureKind::Producer => (3, 3),
            StructureKind::SupplyNode => (1, 1),
            StructureKind::Feeder => (1, 1),
            StructureKind::Reserved => (1, 1),
        }
    }

    pub fn cell_count(&self) -> usize {
        let (h, w) = self.size();
        (h * w) as usize
    }

    pub fn reach(&self) -> Reach {
        match self {
            StructureKind::RangeAmplifier => Reach::None,
            // Output apron under the two leftmost columns
            StructureKind::Producer => Reach::Apron { depth: 2, width: 2 },
            StructureKind::SupplyNode => Reach::Cross(2),
            StructureKind::Feeder => Reach::Cross(1),
            StructureKind::Reserved => Reach::None,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            StructureKind::RangeAmplifier | StructureKind::Producer => Role::Primary,
            StructureKind::SupplyNode | StructureKind::Feeder => Role::Auxiliary,
            StructureKind::Reserved => Role::Reserved,
        }
    }

    /// Number of distinct supply nodes a placed structure must be linked to
    pub fn supply_demand(&self) -> u32 {
        match self {
            StructureKind::Producer => 2,
            StructureKind::RangeAmplifier
            | StructureKind::SupplyNode
            | StructureKind::Feeder
            | StructureKind::Reserved => 0,
        }
    }

    /// Electric draw in kW
    pub fn power_kw(&self) -> u32 {
        match self {
            StructureKind::RangeAmplifier => 480,
            StructureKind::Producer => 180,
            StructureKind::SupplyNode => 0,
            StructureKind::Feeder => 46,
            StructureKind::Reserved => 0,
        }
    }

    /// Single-character map symbol
    pub fn symbol(&self) -> char {
        match self {
            StructureKind::RangeAmplifier => 'a',
            StructureKind::Producer => 'p',
            StructureKind::SupplyNode => 's',
            StructureKind::Feeder => 'f',
            StructureKind::Reserved => 'x',
        }
    }

    pub fn is_primary(&self) -> bool {
        self.role() == Role::Primary
    }
}
