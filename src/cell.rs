//! Cell marker definitions for generated and hand-built mazes.

/// Marker stored in every position of a maze grid.
///
/// This enumeration holds the mutually exclusive states a grid position can be in. Generation
/// starts from an all-[`Cell::Wall`] grid and carves [`Cell::Path`] through it, after which the
/// special markers are written over path cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Open, walkable space.
    ///
    /// This variant represents both carved lattice cells and carved connectors between them.
    Path,
    /// Solid wall.
    ///
    /// This variant represents every position that has not been carved, including the outer
    /// border of the grid.
    Wall,
    /// Player spawn point.
    ///
    /// This variant represents the single cell where the surrounding game places the player.
    Start,
    /// Level exit.
    ///
    /// This variant represents the single cell the player has to reach to finish the level.
    Exit,
    /// Enemy spawn point.
    ///
    /// This variant represents a former path cell on which the surrounding game spawns one enemy.
    EnemySpawn,
}

impl Cell {
    /// Returns the small integer used for this marker in the save format.
    pub const fn code(self) -> u8 {
        match self {
            Self::Path => 0,
            Self::Wall => 1,
            Self::Start => 2,
            Self::Exit => 3,
            Self::EnemySpawn => 4,
        }
    }

    /// Parses a save format integer back into a marker.
    ///
    /// This function is the inverse of [`Cell::code`] and returns [`None`] for any integer that
    /// does not name a marker.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Path),
            1 => Some(Self::Wall),
            2 => Some(Self::Start),
            3 => Some(Self::Exit),
            4 => Some(Self::EnemySpawn),
            _ => None,
        }
    }

    /// Returns whether the marker can be walked through.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Returns the character used for this marker in the plain text rendering of a grid.
    pub const fn glyph(self) -> char {
        match self {
            Self::Path => ' ',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::Exit => 'E',
            Self::EnemySpawn => 'X',
        }
    }
}
