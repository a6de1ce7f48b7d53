//! Command-line surface of the `mazeforge` binary.

use std::{fs, path::PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, Result, WrapErr as _};

use crate::{
    analysis,
    app::App,
    builder::{generate, Algorithm, MazeRequest},
    cell::Cell,
    codec,
    context::GenerationContext,
    grid::Grid,
    level::{generate_level, LevelConfig},
};

/// Perfect-maze generator with depth-first and Prim's carving.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands understood by the binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a single maze from explicit parameters.
    Generate(GenerateArgs),
    /// Generate the maze for a level of the game's progression.
    Level(LevelArgs),
    /// Verify a saved maze file.
    Check(CheckArgs),
    /// Browse generated levels in the terminal.
    View(ViewArgs),
}

/// Arguments of the `generate` subcommand.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Number of columns; even values are rounded up.
    #[arg(long, default_value_t = 15)]
    pub width: usize,
    /// Number of rows; even values are rounded up.
    #[arg(long, default_value_t = 15)]
    pub height: usize,
    /// Carving algorithm.
    #[arg(long, value_enum, default_value_t = Algorithm::Dfs)]
    pub algorithm: Algorithm,
    /// Number of enemy spawns to scatter over the paths.
    #[arg(long)]
    pub enemies: Option<usize>,
    /// Seed for a reproducible maze.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Where and how to write the maze.
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments of the `level` subcommand.
#[derive(Debug, Args)]
pub struct LevelArgs {
    /// Level number, starting at 1.
    pub level: u32,
    /// Seed for a reproducible maze.
    #[arg(long)]
    pub seed: Option<u64>,
    /// JSON file overriding the level progression numbers.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Where and how to write the maze.
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments of the `check` subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Saved maze in the JSON save format.
    pub path: PathBuf,
}

/// Arguments of the `view` subcommand.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Level to open the viewer on.
    #[arg(long, default_value_t = 1)]
    pub level: u32,
    /// Seed of the first maze shown.
    #[arg(long)]
    pub seed: Option<u64>,
    /// JSON file overriding the level progression numbers.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Output options shared by the generating subcommands.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// File to write instead of standard output.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Rendering of a generated maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per row: `#` wall, space path, `S` start, `E` exit, `X` enemy spawn.
    #[default]
    Text,
    /// The JSON save format, a row-major array of cell codes.
    Json,
}

impl Cli {
    /// Runs the selected subcommand.
    ///
    /// # Errors
    ///
    /// This function returns any generation, I/O or terminal error of the subcommand, and fails
    /// the `check` subcommand when the maze is not playable.
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Generate(args) => run_generate(&args),
            Command::Level(args) => run_level(&args),
            Command::Check(args) => run_check(&args),
            Command::View(args) => run_view(&args),
        }
    }
}

/// Installs the logger, honouring `RUST_LOG` on top of a default `warn` level.
///
/// # Errors
///
/// This function returns an error if a logger was already installed.
pub fn init_logging() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init()?;

    Ok(())
}

/// Builds the generation context for an optional seed.
fn context_for(seed: Option<u64>) -> GenerationContext {
    seed.map_or_else(GenerationContext::from_entropy, GenerationContext::seeded)
}

/// Loads the level configuration, falling back to the defaults.
fn load_config(path: Option<&PathBuf>) -> Result<LevelConfig> {
    path.map_or_else(
        || Ok(LevelConfig::default()),
        |path| {
            LevelConfig::from_path(path)
                .wrap_err_with(|| format!("failed to load level config {}", path.display()))
        },
    )
}

/// Renders a maze in the requested format.
pub(crate) fn render(grid: &Grid, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => grid.to_string(),
        Format::Json => codec::to_json(grid)?,
    })
}

/// Writes a rendered maze to its destination.
fn emit(grid: &Grid, output: &OutputArgs) -> Result<()> {
    let rendered = render(grid, output.format)?;

    match &output.output {
        Some(path) => {
            fs::write(path, rendered)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}x{} maze to {}", grid.width(), grid.height(), path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Runs the `generate` subcommand.
fn run_generate(args: &GenerateArgs) -> Result<()> {
    let mut request = MazeRequest::new(args.width, args.height, args.algorithm);
    if let Some(count) = args.enemies {
        request = request.with_enemies(count);
    }

    let grid = generate(&request, &mut context_for(args.seed))?;
    emit(&grid, &args.output)
}

/// Runs the `level` subcommand.
fn run_level(args: &LevelArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let grid = generate_level(&config, args.level, &mut context_for(args.seed))?;
    emit(&grid, &args.output)
}

/// Runs the `check` subcommand.
fn run_check(args: &CheckArgs) -> Result<()> {
    let grid = codec::read_file(&args.path)
        .wrap_err_with(|| format!("failed to load maze {}", args.path.display()))?;
    let report = summarize(&grid)?;
    println!("{report}");

    codec::ensure_playable(&grid)?;
    if analysis::solve(&grid)?.is_none() {
        bail!("the exit cannot be reached from the start");
    }

    Ok(())
}

/// Describes a maze's size, markers and structure.
pub(crate) fn summarize(grid: &Grid) -> Result<String> {
    let mut lines = vec![
        format!("size: {}x{}", grid.width(), grid.height()),
        format!("start: {}", grid.count(Cell::Start)),
        format!("exit: {}", grid.count(Cell::Exit)),
        format!("enemy spawns: {}", grid.count(Cell::EnemySpawn)),
    ];

    if grid.find(Cell::Start).is_some() {
        lines.push(format!("connected: {}", analysis::is_connected(grid)?));
        lines.push(format!("perfect: {}", analysis::is_perfect(grid)?));
    }
    if grid.find(Cell::Start).is_some() && grid.find(Cell::Exit).is_some() {
        lines.push(match analysis::solve(grid)? {
            Some(route) => format!("solution length: {}", route.len()),
            None => "solution length: unreachable".to_owned(),
        });
    }

    Ok(lines.join("\n"))
}

/// Runs the `view` subcommand.
fn run_view(args: &ViewArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut app = App::new(config, args.level, seed)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory as _;

        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["mazeforge", "generate"]).expect("arguments should parse");

        let Command::Generate(args) = cli.command else {
            panic!("expected the generate subcommand");
        };
        assert_eq!((args.width, args.height), (15, 15));
        assert_eq!(args.algorithm, Algorithm::Dfs);
        assert_eq!(args.enemies, None);
        assert_eq!(args.output.format, Format::Text);
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "mazeforge",
            "generate",
            "--width",
            "20",
            "--algorithm",
            "prim",
            "--enemies",
            "3",
            "--seed",
            "9",
            "--format",
            "json",
            "-o",
            "out.json",
        ])
        .expect("arguments should parse");

        let Command::Generate(args) = cli.command else {
            panic!("expected the generate subcommand");
        };
        assert_eq!(args.width, 20);
        assert_eq!(args.algorithm, Algorithm::Prim);
        assert_eq!(args.enemies, Some(3));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.output.format, Format::Json);
        assert_eq!(args.output.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_level_requires_number() {
        assert!(Cli::try_parse_from(["mazeforge", "level"]).is_err());

        let cli = Cli::try_parse_from(["mazeforge", "level", "4", "--seed", "1"])
            .expect("arguments should parse");
        let Command::Level(args) = cli.command else {
            panic!("expected the level subcommand");
        };
        assert_eq!(args.level, 4);
        assert_eq!(args.seed, Some(1));
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(Cli::try_parse_from(["mazeforge", "generate", "--algorithm", "kruskal"]).is_err());
    }

    #[test]
    fn test_render_formats() {
        let grid = codec::decode(&[vec![1, 2, 0, 3, 1]]).expect("rows should decode");

        assert_eq!(render(&grid, Format::Text).expect("text renders"), "#S E#");
        assert_eq!(
            render(&grid, Format::Json).expect("json renders"),
            "[[1,2,0,3,1]]"
        );
    }

    #[test]
    fn test_summarize_generated_maze() {
        let grid = generate(
            &MazeRequest::new(15, 15, Algorithm::Dfs).with_enemies(2),
            &mut GenerationContext::seeded(4),
        )
        .expect("generation should succeed");
        let report = summarize(&grid).expect("summary should succeed");

        assert!(report.starts_with("size: 15x15\nstart: 1\nexit: 1\nenemy spawns: 2"));
        assert!(report.contains("connected: true"));
        assert!(report.contains("perfect: true"));
        assert!(report.contains("solution length: "));
    }

    #[test]
    fn test_summarize_without_markers() {
        let grid = codec::decode(&[vec![1, 0, 1]]).expect("rows should decode");
        let report = summarize(&grid).expect("summary should succeed");

        assert_eq!(report, "size: 3x1\nstart: 0\nexit: 0\nenemy spawns: 0");
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let path = PathBuf::from("/nonexistent/mazeforge-config.json");
        let err = load_config(Some(&path)).expect_err("missing file should fail");

        assert!(err.to_string().contains("failed to load level config"));
    }
}
