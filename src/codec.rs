//! Save format for mazes.
//!
//! A maze is persisted as its row-major grid of cell codes (see [`Cell::code`]), which as JSON is
//! a bare array of arrays such as `[[1,1,1],[1,2,1],[1,1,1]]`. Generated mazes and mazes drawn by
//! hand in the editor share this format, so decoding validates its input instead of trusting it,
//! and never reshapes it: a hand-drawn maze with even dimensions loads back with the same shape.

use std::{fs, path::Path};

use crate::{
    cell::Cell,
    error::{MazeError, MissingMarkers, Result},
    grid::Grid,
};

/// Encodes a grid as rows of cell codes.
pub fn encode(grid: &Grid) -> Vec<Vec<u8>> {
    grid.rows()
        .map(|row| row.iter().map(|cell| cell.code()).collect())
        .collect()
}

/// Decodes rows of cell codes back into a grid.
///
/// # Errors
///
/// This function returns [`MazeError::EmptyGrid`] if there are no rows or the first row is
/// empty, [`MazeError::RaggedRows`] if a row differs in length from the first one, and
/// [`MazeError::UnknownCellCode`] if a code does not name a marker.
pub fn decode(rows: &[Vec<u8>]) -> Result<Grid> {
    let width = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(MazeError::EmptyGrid);
    }

    let mut cells = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(MazeError::RaggedRows {
                row: y,
                expected: width,
                found: row.len(),
            });
        }

        for (x, &code) in row.iter().enumerate() {
            cells.push(Cell::from_code(code).ok_or(MazeError::UnknownCellCode { code, x, y })?);
        }
    }

    Ok(Grid::from_cells(width, rows.len(), cells))
}

/// Serializes a grid to its JSON save payload.
///
/// # Errors
///
/// This function returns [`MazeError::Json`] if serialization fails.
pub fn to_json(grid: &Grid) -> Result<String> {
    Ok(serde_json::to_string(&encode(grid))?)
}

/// Parses a JSON save payload back into a grid.
///
/// # Errors
///
/// This function returns [`MazeError::Json`] for malformed JSON and any error of [`decode`] for
/// well-formed JSON that does not describe a grid.
pub fn from_json(input: &str) -> Result<Grid> {
    let rows: Vec<Vec<u8>> = serde_json::from_str(input)?;
    decode(&rows)
}

/// Writes a grid to a file as JSON.
///
/// # Errors
///
/// This function returns [`MazeError::Io`] if the file cannot be written.
pub fn write_file<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    fs::write(path, to_json(grid)?)?;
    Ok(())
}

/// Reads a grid from a JSON file.
///
/// # Errors
///
/// This function returns [`MazeError::Io`] if the file cannot be read and any error of
/// [`from_json`] for its contents.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    from_json(&fs::read_to_string(path)?)
}

/// Checks that a grid can be played, i.e. that it holds both a start and an exit.
///
/// The editor applies this before saving a hand-drawn maze.
///
/// # Errors
///
/// This function returns [`MazeError::DegenerateLayout`] naming the missing markers.
pub fn ensure_playable(grid: &Grid) -> Result<()> {
    match MissingMarkers::from_presence(
        grid.find(Cell::Start).is_some(),
        grid.find(Cell::Exit).is_some(),
    ) {
        Some(missing) => Err(MazeError::DegenerateLayout { missing }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;
    use crate::{
        builder::{generate, Algorithm, MazeRequest},
        context::GenerationContext,
    };

    #[test]
    fn test_round_trip_at_configured_extremes() {
        for algorithm in [Algorithm::Dfs, Algorithm::Prim] {
            for size in [15, 51] {
                let grid = generate(
                    &MazeRequest::new(size, size, algorithm).with_enemies(5),
                    &mut GenerationContext::seeded(13),
                )
                .expect("generation should succeed");

                assert_eq!(
                    decode(&encode(&grid)).expect("encoded grid should decode"),
                    grid
                );
                assert_eq!(
                    from_json(&to_json(&grid).expect("grid should serialize"))
                        .expect("serialized grid should parse"),
                    grid
                );
            }
        }
    }

    #[test]
    fn test_encode_is_row_major_codes() {
        let grid = decode(&[vec![1, 1, 1], vec![1, 2, 0], vec![4, 3, 1]])
            .expect("rows should decode");

        assert_eq!(
            to_json(&grid).expect("grid should serialize"),
            "[[1,1,1],[1,2,0],[4,3,1]]"
        );
    }

    #[test]
    fn test_decode_keeps_even_shape() {
        let grid = decode(&[vec![1, 1, 1, 1], vec![1, 2, 3, 1]]).expect("rows should decode");

        assert_eq!((grid.width(), grid.height()), (4, 2));
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(matches!(decode(&[]), Err(MazeError::EmptyGrid)));
        assert!(matches!(decode(&[vec![]]), Err(MazeError::EmptyGrid)));
    }

    #[test]
    fn test_decode_rejects_ragged_rows() {
        assert!(matches!(
            decode(&[vec![1, 1, 1], vec![1, 1]]),
            Err(MazeError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_codes() {
        assert!(matches!(
            decode(&[vec![1, 1, 1], vec![1, 9, 1]]),
            Err(MazeError::UnknownCellCode { code: 9, x: 1, y: 1 })
        ));
    }

    #[test]
    fn test_from_json_rejects_malformed_payloads() {
        assert!(matches!(from_json("[[1,1],"), Err(MazeError::Json(_))));
        assert!(matches!(from_json("[[1,-1]]"), Err(MazeError::Json(_))));
        assert!(matches!(from_json("{}"), Err(MazeError::Json(_))));
    }

    #[test]
    fn test_ensure_playable() {
        let playable = decode(&[vec![2, 0, 3]]).expect("rows should decode");
        let no_exit = decode(&[vec![2, 0, 0]]).expect("rows should decode");
        let blank = decode(&[vec![1, 0, 1]]).expect("rows should decode");

        assert!(ensure_playable(&playable).is_ok());
        assert!(matches!(
            ensure_playable(&no_exit),
            Err(MazeError::DegenerateLayout {
                missing: MissingMarkers::Exit
            })
        ));
        assert!(matches!(
            ensure_playable(&blank),
            Err(MazeError::DegenerateLayout {
                missing: MissingMarkers::Both
            })
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let grid = generate(
            &MazeRequest::new(15, 15, Algorithm::Prim),
            &mut GenerationContext::seeded(99),
        )
        .expect("generation should succeed");
        let path = env::temp_dir().join(format!("mazeforge-codec-{}.json", std::process::id()));

        write_file(&path, &grid).expect("file should be written");
        let loaded = read_file(&path).expect("file should be read back");
        fs::remove_file(&path).expect("temporary file should be removed");

        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let path = env::temp_dir().join("mazeforge-codec-does-not-exist.json");

        assert!(matches!(read_file(path), Err(MazeError::Io(_))));
    }
}
