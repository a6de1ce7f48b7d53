//! Structural queries over finished grids.
//!
//! This module answers the questions a consumer of a maze cares about: can every open cell be
//! reached from the start, is the carved structure a tree, and what is the shortest route from the
//! start to the exit.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{
    cell::Cell,
    error::{MazeError, MissingMarkers, Result},
    grid::{Grid, Pos},
};

/// Returns the start position or the degenerate-layout error describing what is missing.
fn require_start(grid: &Grid) -> Result<Pos> {
    grid.find(Cell::Start).ok_or_else(|| MazeError::DegenerateLayout {
        missing: MissingMarkers::from_presence(false, grid.find(Cell::Exit).is_some())
            .unwrap_or(MissingMarkers::Start),
    })
}

/// Returns the open neighbours of a position in the order up, right, down, left.
fn open_neighbours(grid: &Grid, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
    pos.cardinal(1)
        .filter(move |next| grid.get(*next).is_some_and(Cell::is_open))
}

/// Collects every open cell reachable from the start through 4-directional moves.
///
/// # Errors
///
/// This function returns [`MazeError::DegenerateLayout`] if the grid has no start.
pub fn reachable_from_start(grid: &Grid) -> Result<HashSet<Pos>> {
    let start = require_start(grid)?;
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for next in open_neighbours(grid, current) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Ok(seen)
}

/// Returns whether every open cell of the grid is reachable from the start.
///
/// # Errors
///
/// This function returns [`MazeError::DegenerateLayout`] if the grid has no start.
pub fn is_connected(grid: &Grid) -> Result<bool> {
    let reachable = reachable_from_start(grid)?;
    let open = grid.iter().filter(|(_, cell)| cell.is_open()).count();

    Ok(reachable.len() == open)
}

/// Counts the carved connectors, i.e. the open connectors whose two lattice neighbours are open.
///
/// Each one is an edge of the graph whose vertices are the open lattice cells.
pub fn passage_count(grid: &Grid) -> usize {
    grid.iter()
        .filter(|&(pos, cell)| {
            cell.is_open()
                && pos.connector_sides().is_some_and(|(near, far)| {
                    grid.get(near).is_some_and(Cell::is_open)
                        && grid.get(far).is_some_and(Cell::is_open)
                })
        })
        .count()
}

/// Counts the open lattice cells, i.e. the vertices of the carved graph.
pub fn open_lattice_cells(grid: &Grid) -> usize {
    grid.iter()
        .filter(|&(pos, cell)| Grid::is_lattice(pos) && cell.is_open())
        .count()
}

/// Returns whether the grid is a perfect maze.
///
/// A connected graph is a tree exactly when it has one edge fewer than it has vertices, so this
/// checks connectivity from the start and then compares passages against open lattice cells.
///
/// # Errors
///
/// This function returns [`MazeError::DegenerateLayout`] if the grid has no start.
pub fn is_perfect(grid: &Grid) -> Result<bool> {
    if !is_connected(grid)? {
        return Ok(false);
    }

    Ok(passage_count(grid) + 1 == open_lattice_cells(grid))
}

/// Finds the shortest route from the start to the exit.
///
/// The route includes both endpoints. [`None`] means the exit exists but cannot be reached.
///
/// # Errors
///
/// This function returns [`MazeError::DegenerateLayout`] if the grid lacks a start or an exit.
pub fn solve(grid: &Grid) -> Result<Option<Vec<Pos>>> {
    let start = grid.find(Cell::Start);
    let exit = grid.find(Cell::Exit);
    let (Some(start), Some(exit)) = (start, exit) else {
        return Err(MazeError::DegenerateLayout {
            missing: MissingMarkers::from_presence(start.is_some(), exit.is_some())
                .unwrap_or(MissingMarkers::Both),
        });
    };

    let mut parents: HashMap<Pos, Pos> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    let mut found = false;

    while let Some(current) = queue.pop_front() {
        if current == exit {
            found = true;
            break;
        }
        for next in open_neighbours(grid, current) {
            if next != start && !parents.contains_key(&next) {
                let _ = parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    if !found {
        return Ok(None);
    }

    let mut route = vec![exit];
    let mut current = exit;
    while let Some(&parent) = parents.get(&current) {
        route.push(parent);
        current = parent;
    }
    route.reverse();

    Ok(Some(route))
}
