//! Perfect maze construction.
//!
//! A [`MazeBuilder`] owns a freshly allocated all-wall grid and carves a spanning tree over its
//! lattice with either randomized depth-first backtracking or randomized Prim's algorithm. Once the
//! tree is carved the builder marks a start cell in the top-left third of the grid, an exit cell in
//! the bottom-right third, and optionally scatters enemy spawns over the remaining path cells.

use std::{collections::HashSet, fmt};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    cell::Cell,
    chooser,
    context::GenerationContext,
    error::{MazeError, MissingMarkers, Result},
    grid::{Grid, Pos},
};

/// Carving algorithm used to build the spanning tree.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Randomized depth-first backtracking from the top-left lattice cell.
    ///
    /// This variant produces long, winding corridors with few branches.
    #[default]
    Dfs,
    /// Randomized Prim's algorithm from a random lattice cell.
    ///
    /// This variant produces many short dead ends branching off the main routes.
    Prim,
}

impl Algorithm {
    /// Returns the other algorithm.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Dfs => Self::Prim,
            Self::Prim => Self::Dfs,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Dfs => "dfs",
            Self::Prim => "prim",
        })
    }
}

/// Largest number of grid positions a builder will allocate, after odd coercion.
pub const MAX_CELLS: usize = 1 << 24;

/// Everything needed to generate one maze apart from the random source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeRequest {
    /// Requested number of columns, coerced to odd by the builder.
    pub width: usize,
    /// Requested number of rows, coerced to odd by the builder.
    pub height: usize,
    /// Carving algorithm.
    pub algorithm: Algorithm,
    /// Number of enemy spawns to scatter, if any.
    pub enemies: Option<usize>,
}

impl MazeRequest {
    /// Builds a request without enemies.
    pub const fn new(width: usize, height: usize, algorithm: Algorithm) -> Self {
        Self {
            width,
            height,
            algorithm,
            enemies: None,
        }
    }

    /// Asks for `count` enemy spawns on top of the maze.
    #[must_use]
    pub const fn with_enemies(mut self, count: usize) -> Self {
        self.enemies = Some(count);
        self
    }
}

/// Incrementally builds a perfect maze.
///
/// The steps are exposed separately so the surrounding game can inspect or adjust the grid between
/// them, but they must run in order: carve, then [`MazeBuilder::place_start_and_exit`], then
/// [`MazeBuilder::scatter_enemies`], then [`MazeBuilder::finish`]. [`generate`] runs all of them.
#[derive(Clone, Debug)]
pub struct MazeBuilder {
    /// Grid being carved.
    grid: Grid,
}

impl MazeBuilder {
    /// Allocates an all-wall grid for the requested dimensions.
    ///
    /// Even dimensions are incremented by one so the outer border and every connector fall on the
    /// right parity.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidDimensions`] if either dimension is zero or the
    /// coerced grid would hold more than [`MAX_CELLS`] positions, before allocating anything.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = MazeError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }

        let (Some(columns), Some(rows)) = (coerce_odd(width), coerce_odd(height)) else {
            return Err(invalid);
        };
        match columns.checked_mul(rows) {
            Some(cells) if cells <= MAX_CELLS => Ok(Self {
                grid: Grid::filled(columns, rows, Cell::Wall),
            }),
            _ => Err(invalid),
        }
    }

    /// Returns the grid in its current state.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Carves the spanning tree with the selected algorithm.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::BudgetExceeded`] if the context's budget runs out.
    pub fn carve(&mut self, algorithm: Algorithm, ctx: &mut GenerationContext) -> Result<()> {
        match algorithm {
            Algorithm::Dfs => self.carve_dfs(ctx),
            Algorithm::Prim => self.carve_prim(ctx),
        }
    }

    /// Carves the spanning tree with randomized depth-first backtracking.
    ///
    /// The walk starts at lattice cell `(0, 0)` and keeps an explicit stack. Each step picks one
    /// unvisited lattice neighbour of the stack top uniformly, knocks down the connector between
    /// them and pushes it; a stack top without unvisited neighbours is popped. Only never-visited
    /// cells are ever linked, so the result is a tree.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::BudgetExceeded`] if the context's budget runs out.
    pub fn carve_dfs(&mut self, ctx: &mut GenerationContext) -> Result<()> {
        let origin = Grid::lattice_to_grid(0, 0);
        if !self.grid.is_interior(origin) {
            return Ok(());
        }

        let mut watch = ctx.stopwatch();
        self.grid.set(origin, Cell::Path);
        let mut stack = vec![origin];

        while let Some(&current) = stack.last() {
            watch.tick()?;

            let candidates: Vec<Pos> = current
                .cardinal(2)
                .filter(|&next| {
                    self.grid.is_interior(next) && self.grid.get(next) == Some(Cell::Wall)
                })
                .collect();

            if let Some(&next) = chooser::choose(ctx.chooser(), &candidates) {
                self.grid.set(current.midpoint(next), Cell::Path);
                self.grid.set(next, Cell::Path);
                stack.push(next);
            } else {
                let _ = stack.pop();
            }
        }

        Ok(())
    }

    /// Carves the spanning tree with randomized Prim's algorithm.
    ///
    /// The tree grows from a uniformly chosen lattice cell. The frontier holds connectors touching
    /// the carved region; each step removes one uniformly and carves it only if, at that moment,
    /// exactly one side is path and the other is still wall. A connector whose far side was reached
    /// some other way in the meantime is dropped, which is what keeps the maze free of loops.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::BudgetExceeded`] if the context's budget runs out.
    pub fn carve_prim(&mut self, ctx: &mut GenerationContext) -> Result<()> {
        let columns = self.grid.lattice_columns();
        let rows = self.grid.lattice_rows();
        if columns == 0 || rows == 0 {
            return Ok(());
        }

        let mut watch = ctx.stopwatch();
        let column = ctx.chooser().pick(columns).min(columns - 1);
        let row = ctx.chooser().pick(rows).min(rows - 1);
        let seed = Grid::lattice_to_grid(column, row);
        self.grid.set(seed, Cell::Path);

        let mut frontier = Vec::new();
        let mut queued = HashSet::new();
        self.extend_frontier(seed, &mut frontier, &mut queued);

        while !frontier.is_empty() {
            watch.tick()?;

            let len = frontier.len();
            let wall = frontier.swap_remove(ctx.chooser().pick(len).min(len - 1));
            let _ = queued.remove(&wall);

            let Some((near, far)) = wall.connector_sides() else {
                continue;
            };
            let unvisited = match (self.grid.get(near), self.grid.get(far)) {
                (Some(Cell::Path), Some(Cell::Wall)) => far,
                (Some(Cell::Wall), Some(Cell::Path)) => near,
                _ => continue,
            };

            self.grid.set(wall, Cell::Path);
            self.grid.set(unvisited, Cell::Path);
            self.extend_frontier(unvisited, &mut frontier, &mut queued);
        }

        Ok(())
    }

    /// Queues the uncarved interior connectors around a freshly carved lattice cell.
    fn extend_frontier(&self, cell: Pos, frontier: &mut Vec<Pos>, queued: &mut HashSet<Pos>) {
        for wall in cell.cardinal(1) {
            if self.grid.is_interior(wall)
                && self.grid.get(wall) == Some(Cell::Wall)
                && queued.insert(wall)
            {
                frontier.push(wall);
            }
        }
    }

    /// Marks the start and exit cells.
    ///
    /// The start is the first path cell found scanning the top-left third of the grid row by row.
    /// The exit is the first path cell found scanning the bottom-right third backwards from the
    /// inner corner. Both scans stop at their first hit. The two regions never overlap, so start
    /// and exit never share a cell. A region without path cells leaves its marker unplaced, which
    /// [`MazeBuilder::finish`] reports.
    pub fn place_start_and_exit(&mut self) {
        let width = self.grid.width();
        let height = self.grid.height();

        let start = (1..height / 3)
            .flat_map(|y| (1..width / 3).map(move |x| Pos::new(x, y)))
            .find(|&pos| self.grid.get(pos) == Some(Cell::Path));
        if let Some(pos) = start {
            self.grid.set(pos, Cell::Start);
        }

        let exit = (2 * height / 3 + 1..=height.saturating_sub(2))
            .rev()
            .flat_map(|y| {
                (2 * width / 3 + 1..=width.saturating_sub(2))
                    .rev()
                    .map(move |x| Pos::new(x, y))
            })
            .find(|&pos| self.grid.get(pos) == Some(Cell::Path));
        if let Some(pos) = exit {
            self.grid.set(pos, Cell::Exit);
        }
    }

    /// Turns up to `count` path cells into enemy spawns and returns how many were placed.
    ///
    /// The spawns are drawn uniformly without replacement from the cells that are currently
    /// [`Cell::Path`], so start and exit are never overwritten. Asking for more spawns than there
    /// are path cells places one on every path cell.
    pub fn scatter_enemies(&mut self, count: usize, ctx: &mut GenerationContext) -> usize {
        let mut spawns = self.grid.positions_of(Cell::Path);
        if spawns.is_empty() {
            return 0;
        }
        if count > spawns.len() {
            log::debug!(
                "requested {count} enemy spawns but only {} path cells are free",
                spawns.len()
            );
        }

        chooser::sample(ctx.chooser(), &mut spawns, count);
        for pos in &spawns {
            self.grid.set(*pos, Cell::EnemySpawn);
        }

        spawns.len()
    }

    /// Hands over the finished grid.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::DegenerateLayout`] naming the missing markers if the
    /// grid has no start, no exit, or neither.
    pub fn finish(self) -> Result<Grid> {
        let has_start = self.grid.find(Cell::Start).is_some();
        let has_exit = self.grid.find(Cell::Exit).is_some();

        if let Some(missing) = MissingMarkers::from_presence(has_start, has_exit) {
            log::warn!(
                "{}x{} maze is too small to hold a {missing} marker",
                self.grid.width(),
                self.grid.height()
            );
            return Err(MazeError::DegenerateLayout { missing });
        }

        Ok(self.grid)
    }
}

/// Rounds an even dimension up to the next odd one.
const fn coerce_odd(dimension: usize) -> Option<usize> {
    if dimension % 2 == 0 {
        dimension.checked_add(1)
    } else {
        Some(dimension)
    }
}

/// Generates a complete maze in one call.
///
/// This function allocates the grid, carves it with the requested algorithm, places start and
/// exit, scatters the requested enemies and validates the result.
///
/// # Errors
///
/// This function returns [`MazeError::InvalidDimensions`] for zero dimensions,
/// [`MazeError::BudgetExceeded`] if carving runs out of time, and [`MazeError::DegenerateLayout`] if
/// the grid is too small to hold a start and an exit.
pub fn generate(request: &MazeRequest, ctx: &mut GenerationContext) -> Result<Grid> {
    let mut builder = MazeBuilder::new(request.width, request.height)?;
    builder.carve(request.algorithm, ctx)?;
    builder.place_start_and_exit();

    let enemies = request
        .enemies
        .map_or(0, |count| builder.scatter_enemies(count, ctx));

    let grid = builder.finish()?;
    log::debug!(
        "generated {}x{} maze with {} and {enemies} enemy spawns",
        grid.width(),
        grid.height(),
        request.algorithm
    );

    Ok(grid)
}
