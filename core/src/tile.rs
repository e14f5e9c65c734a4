use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

bitflags! {
    /// Open sides of a tile.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Edges: u8 {
        const NORTH = 0b0001;
        const SOUTH = 0b0010;
        const EAST = 0b0100;
        const WEST = 0b1000;
    }
}

impl Edges {
    /// Straight pieces and corner bends, the only shapes used for decoys.
    pub const SIMPLE_SHAPES: [Edges; 6] = [
        Edges::NORTH.union(Edges::SOUTH),
        Edges::EAST.union(Edges::WEST),
        Edges::NORTH.union(Edges::EAST),
        Edges::NORTH.union(Edges::WEST),
        Edges::SOUTH.union(Edges::EAST),
        Edges::SOUTH.union(Edges::WEST),
    ];

    pub const fn from_direction(dir: Direction) -> Self {
        match dir {
            Direction::North => Edges::NORTH,
            Direction::South => Edges::SOUTH,
            Direction::East => Edges::EAST,
            Direction::West => Edges::WEST,
        }
    }

    pub fn is_open(self, dir: Direction) -> bool {
        self.contains(Self::from_direction(dir))
    }

    pub fn open_count(self) -> u32 {
        self.bits().count_ones()
    }
}

impl From<Direction> for Edges {
    fn from(dir: Direction) -> Self {
        Self::from_direction(dir)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Path,
}

/// Collectible or marker carried by a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Special {
    Gem,
    Key,
    Time,
}

/// Stable identity of a tile. Start and goal identities mark the endpoint roles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileId {
    #[default]
    Empty,
    Start,
    Goal,
    Route(CellCount),
    GemBranch(CellCount),
    Decoy(CellCount),
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileId::Empty => f.write_str("empty"),
            TileId::Start => f.write_str("start-tile"),
            TileId::Goal => f.write_str("goal-tile"),
            TileId::Route(n) => write!(f, "route-{n}"),
            TileId::GemBranch(n) => write!(f, "gem-branch-{n}"),
            TileId::Decoy(n) => write!(f, "decoy-{n}"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub edges: Edges,
    pub special: Option<Special>,
    pub locked: bool,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        id: TileId::Empty,
        kind: TileKind::Empty,
        edges: Edges::empty(),
        special: None,
        locked: false,
    };

    pub const fn path(id: TileId, edges: Edges) -> Self {
        Self {
            id,
            kind: TileKind::Path,
            edges,
            special: None,
            locked: false,
        }
    }

    pub const fn is_path(&self) -> bool {
        matches!(self.kind, TileKind::Path)
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        self.is_path() && self.edges.is_open(dir)
    }

    pub const fn has_gem(&self) -> bool {
        matches!(self.special, Some(Special::Gem))
    }

    pub const fn is_endpoint(&self) -> bool {
        matches!(self.id, TileId::Start | TileId::Goal)
    }

    /// Path tile with at least one open side.
    pub fn is_connectable(&self) -> bool {
        self.is_path() && !self.edges.is_empty()
    }

    /// Empty tiles carry no edges and no special marker.
    pub fn is_well_formed(&self) -> bool {
        self.is_path() || (self.edges.is_empty() && self.special.is_none())
    }
}
