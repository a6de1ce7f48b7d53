//! Event handling functions for user input and viewer state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::app::App;

/// Handles input events and updates the viewer state accordingly.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. It uses a
/// timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key.code)?;
        }
    }

    Ok(())
}

/// Applies a single key press to the viewer.
///
/// - `q` quits.
/// - `s` toggles the solution overlay.
/// - `r` regenerates the level from a fresh random seed.
/// - `a` regenerates the level with the other algorithm on the same seed.
/// - `l` and `h` step to the next and previous level.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('s') => app.show_solution = !app.show_solution,
        KeyCode::Char('r') => {
            app.seed = rand::random();
            app.regenerate()?;
        }
        KeyCode::Char('a') => {
            app.algorithm = app.algorithm.other();
            app.regenerate()?;
        }
        KeyCode::Char('l') => app.set_level(app.level.saturating_add(1))?,
        KeyCode::Char('h') if app.level > 1 => app.set_level(app.level - 1)?,
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::Algorithm, level::LevelConfig};

    /// Creates a viewer on the first level with a fixed seed.
    fn create_test_app() -> App {
        App::new(LevelConfig::default(), 1, 11).expect("viewer should start")
    }

    #[test]
    fn test_q_exits() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('q')).expect("key should be handled");

        assert!(app.exit);
    }

    #[test]
    fn test_s_toggles_solution() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('s')).expect("key should be handled");
        assert!(app.show_solution);

        handle_key(&mut app, KeyCode::Char('s')).expect("key should be handled");
        assert!(!app.show_solution);
    }

    #[test]
    fn test_a_flips_algorithm_on_same_seed() {
        let mut app = create_test_app();
        let before = app.grid.clone();

        handle_key(&mut app, KeyCode::Char('a')).expect("key should be handled");

        assert_eq!(app.algorithm, Algorithm::Prim);
        assert_eq!(app.seed, 11);
        assert_ne!(app.grid, before);
    }

    #[test]
    fn test_l_and_h_step_levels() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('l')).expect("key should be handled");
        assert_eq!(app.level, 2);
        assert_eq!(app.algorithm, Algorithm::Prim);
        assert_eq!(app.grid.width(), 19);

        handle_key(&mut app, KeyCode::Char('h')).expect("key should be handled");
        assert_eq!(app.level, 1);
        assert_eq!(app.algorithm, Algorithm::Dfs);
        assert_eq!(app.grid.width(), 15);
    }

    #[test]
    fn test_h_stops_at_first_level() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('h')).expect("key should be handled");

        assert_eq!(app.level, 1);
    }

    #[test]
    fn test_r_keeps_maze_solvable() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('r')).expect("key should be handled");

        assert!(!app.solution.is_empty());
        assert_eq!(app.grid.width(), 15);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut app = create_test_app();
        let before = app.grid.clone();

        handle_key(&mut app, KeyCode::Char('x')).expect("key should be handled");
        handle_key(&mut app, KeyCode::Enter).expect("key should be handled");

        assert_eq!(app.grid, before);
        assert!(!app.exit);
    }
}
