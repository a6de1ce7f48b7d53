//! Rendering of the maze viewer screen.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    app::App,
    cell::Cell,
    grid::{Grid, Pos},
};

/// Key bindings shown under the maze.
const TOOLTIP: &str = "(q) quit / (r) reroll / (s) solution / (a) algorithm / (h) prev / (l) next";

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for rendering
/// new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Transforms grid positions to canvas coordinates centred on the maze.
///
/// Columns map to `x = col - (n - 1) / 2` and rows to `y = (n - 1) / 2 - row`, so the top-left
/// corner of the maze ends up in the top-left of the canvas.
///
/// # Errors
///
/// This function returns an error if a coordinate does not fit a terminal dimension.
pub(crate) fn to_screen(positions: &[Pos], grid: &Grid) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(grid.height())?);
    let cols_n = f64::from(u16::try_from(grid.width())?);

    positions
        .iter()
        .map(|pos| {
            let screen_x = f64::from(u16::try_from(pos.x)?) - (cols_n - 1.) / 2.;
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(pos.y)?);

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Splits the screen into the centred maze space and the tooltip area below it.
///
/// # Errors
///
/// This function returns an error if any of the layouts does not yield the expected areas.
fn split_screen(area: Rect, maze_columns: u16, maze_rows: u16) -> Result<(Rect, Rect)> {
    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(area);
    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let tooltip_area = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(TOOLTIP.len())?.max(maze_columns).saturating_add(2)),
        Constraint::Min(1),
    ])
    .split(tooltip_full_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered tooltip area from horizontal layout")?;

    let maze_area = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(maze_rows),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;
    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(maze_columns),
        Constraint::Min(1),
    ])
    .split(maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    Ok((space, tooltip_area))
}

/// Renders the viewer: the maze, an optional solution overlay and a status tooltip.
///
/// Walls are drawn in green, the start in yellow, the exit in cyan, enemy spawns in red and the
/// solution in magenta.
///
/// # Errors
///
/// This function returns an error if the layout cannot be split or the maze does not fit the
/// coordinate conversion.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let maze_rows = u16::try_from(app.grid.height())?;
    let maze_columns = u16::try_from(app.grid.width())?;
    let (space, tooltip_area) = split_screen(frame.area(), maze_columns, maze_rows)?;

    let walls = to_screen(&app.grid.positions_of(Cell::Wall), &app.grid)?;
    let starts = to_screen(&app.grid.positions_of(Cell::Start), &app.grid)?;
    let exits = to_screen(&app.grid.positions_of(Cell::Exit), &app.grid)?;
    let enemies = to_screen(&app.grid.positions_of(Cell::EnemySpawn), &app.grid)?;
    let solution = if app.show_solution {
        to_screen(&app.solution, &app.grid)?
    } else {
        Vec::new()
    };

    let half_width = f64::from(rounded_div::i32(i32::from(maze_columns) - 1, 2));
    let half_height = f64::from(rounded_div::i32(i32::from(maze_rows) - 1, 2));
    let maze = Canvas::default()
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &walls,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &solution,
                color: Color::Magenta,
            });
            ctx.draw(&Points {
                coords: &enemies,
                color: Color::Red,
            });
            ctx.draw(&Points {
                coords: &starts,
                color: Color::Yellow,
            });
            ctx.draw(&Points {
                coords: &exits,
                color: Color::Cyan,
            });
        });
    frame.render_widget(maze, space);

    let tooltip_block = Block::bordered()
        .title(TOOLTIP)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status = Line::styled(
        format!(
            "level {} / {} / seed {} / solution {} cells",
            app.level,
            app.algorithm,
            app.seed,
            app.solution.len()
        ),
        Style::default().fg(Color::White),
    )
    .centered();

    let status_area = tooltip_block.inner(tooltip_area);
    frame.render_widget(tooltip_block, tooltip_area);
    frame.render_widget(status, status_area);

    Ok(())
}
