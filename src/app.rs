//! State of the terminal maze viewer.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::DefaultTerminal;

use crate::{
    analysis,
    builder::{generate, Algorithm},
    cell::Cell,
    context::GenerationContext,
    events,
    grid::{Grid, Pos},
    level::LevelConfig,
    ui,
};

/// Application state container for the maze viewer.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui renders the viewer and to which Crossterm events are applied.
pub(crate) struct App {
    /// Application exit flag.
    ///
    /// This field is set to `true` when the user wants to quit; it starts off `false`.
    pub(crate) exit: bool,
    /// Level progression numbers used to size each level's maze.
    pub(crate) config: LevelConfig,
    /// Level currently displayed, starting at 1.
    pub(crate) level: u32,
    /// Carving algorithm of the displayed maze.
    ///
    /// This field follows the level's planned algorithm whenever the level changes, and can be
    /// flipped by the user to compare both algorithms on the same seed.
    pub(crate) algorithm: Algorithm,
    /// Seed the displayed maze was generated from.
    pub(crate) seed: u64,
    /// Displayed maze.
    pub(crate) grid: Grid,
    /// Shortest route from start to exit in the displayed maze.
    pub(crate) solution: Vec<Pos>,
    /// Whether the solution overlay is drawn.
    pub(crate) show_solution: bool,
}

impl App {
    /// Creates the viewer on a level and seed.
    ///
    /// # Errors
    ///
    /// This function returns an error if the level is invalid or its maze cannot be generated.
    pub(crate) fn new(config: LevelConfig, level: u32, seed: u64) -> Result<Self> {
        let plan = config.plan(level)?;
        let mut app = Self {
            exit: false,
            config,
            level,
            algorithm: plan.algorithm,
            seed,
            grid: Grid::filled(1, 1, Cell::Wall),
            solution: Vec::new(),
            show_solution: false,
        };
        app.regenerate()?;

        Ok(app)
    }

    /// Runs the main loop of the viewer.
    ///
    /// This function draws the current state and applies user input until the exit flag is set,
    /// after which it returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Rebuilds the displayed maze from the current level, algorithm and seed.
    ///
    /// # Errors
    ///
    /// This function returns an error if generation fails or the maze turns out unsolvable.
    pub(crate) fn regenerate(&mut self) -> Result<()> {
        let plan = self.config.plan(self.level)?;
        let mut request = plan.request();
        request.algorithm = self.algorithm;

        let grid = generate(&request, &mut GenerationContext::seeded(self.seed))?;
        let solution = analysis::solve(&grid)?.ok_or_eyre("generated maze has no solution")?;
        log::debug!(
            "viewer showing level {} ({}, seed {}), solution of {} cells",
            self.level,
            self.algorithm,
            self.seed,
            solution.len()
        );

        self.grid = grid;
        self.solution = solution;

        Ok(())
    }

    /// Switches to another level, adopting that level's planned algorithm.
    ///
    /// # Errors
    ///
    /// This function returns an error if the level is invalid or its maze cannot be generated.
    pub(crate) fn set_level(&mut self, level: u32) -> Result<()> {
        let plan = self.config.plan(level)?;
        self.level = level;
        self.algorithm = plan.algorithm;

        self.regenerate()
    }
}
