//! Level progression policy.
//!
//! The game generates one maze per level. Mazes grow by a fixed step per level up to a cap, the
//! carving algorithm alternates between depth-first (odd levels) and Prim's (even levels), and each
//! level adds enemies. The numbers are configurable through a JSON document whose missing fields
//! fall back to the defaults.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    builder::{generate, Algorithm, MazeRequest},
    context::GenerationContext,
    error::{MazeError, Result},
    grid::Grid,
};

/// Tunable numbers behind the level progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Side length of the first level's maze.
    pub min_size: usize,
    /// Largest side length any level may reach.
    pub max_size: usize,
    /// Growth of the side length from one level to the next.
    pub size_increment: usize,
    /// Number of enemies on the first level.
    pub base_enemies: usize,
    /// Enemies added from one level to the next.
    pub enemy_increment: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            min_size: 15,
            max_size: 51,
            size_increment: 4,
            base_enemies: 2,
            enemy_increment: 1,
        }
    }
}

impl LevelConfig {
    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::Json`] for malformed input and
    /// [`MazeError::InvalidConfig`] if the values fail [`LevelConfig::validate`].
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::Io`] if the file cannot be read and any error of
    /// [`LevelConfig::from_json`] for its contents.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Checks that the configured sizes describe a non-empty range.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidConfig`] if `min_size` is zero or larger than
    /// `max_size`.
    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            return Err(MazeError::InvalidConfig("min_size must be at least 1"));
        }
        if self.min_size > self.max_size {
            return Err(MazeError::InvalidConfig(
                "min_size must not exceed max_size",
            ));
        }

        Ok(())
    }

    /// Works out the maze parameters for a 1-based level.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidLevel`] for level zero.
    pub fn plan(&self, level: u32) -> Result<LevelPlan> {
        let Some(steps) = level.checked_sub(1) else {
            return Err(MazeError::InvalidLevel(level));
        };
        let steps = usize::try_from(steps).unwrap_or(usize::MAX);

        let size = self
            .min_size
            .saturating_add(steps.saturating_mul(self.size_increment))
            .min(self.max_size);
        let enemies = self
            .base_enemies
            .saturating_add(steps.saturating_mul(self.enemy_increment));
        let algorithm = if level % 2 == 1 {
            Algorithm::Dfs
        } else {
            Algorithm::Prim
        };

        Ok(LevelPlan {
            level,
            size,
            algorithm,
            enemies,
        })
    }
}

/// Maze parameters for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelPlan {
    /// Level the plan was made for.
    pub level: u32,
    /// Side length of the square maze, before odd coercion.
    pub size: usize,
    /// Carving algorithm for the level.
    pub algorithm: Algorithm,
    /// Number of enemy spawns to scatter.
    pub enemies: usize,
}

impl LevelPlan {
    /// Turns the plan into a generation request.
    pub const fn request(&self) -> MazeRequest {
        MazeRequest::new(self.size, self.size, self.algorithm).with_enemies(self.enemies)
    }
}

/// Generates the maze for a level.
///
/// # Errors
///
/// This function returns [`MazeError::InvalidLevel`] for level zero and any error of
/// [`generate`].
pub fn generate_level(
    config: &LevelConfig,
    level: u32,
    ctx: &mut GenerationContext,
) -> Result<Grid> {
    let plan = config.plan(level)?;
    log::debug!(
        "level {level}: {size}x{size} {algorithm} maze with {enemies} enemies",
        size = plan.size,
        algorithm = plan.algorithm,
        enemies = plan.enemies
    );

    generate(&plan.request(), ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analysis, cell::Cell};

    #[test]
    fn test_first_level_uses_defaults() {
        let plan = LevelConfig::default()
            .plan(1)
            .expect("level 1 should be valid");

        assert_eq!(
            plan,
            LevelPlan {
                level: 1,
                size: 15,
                algorithm: Algorithm::Dfs,
                enemies: 2,
            }
        );
    }

    #[test]
    fn test_levels_alternate_algorithms() {
        let config = LevelConfig::default();

        for level in 1..12 {
            let plan = config.plan(level).expect("level should be valid");
            let expected = if level % 2 == 1 {
                Algorithm::Dfs
            } else {
                Algorithm::Prim
            };

            assert_eq!(plan.algorithm, expected);
        }
    }

    #[test]
    fn test_size_grows_then_caps() {
        let config = LevelConfig::default();
        let sizes: Vec<usize> = [2, 9, 10, 11, 500]
            .into_iter()
            .map(|level| config.plan(level).expect("level should be valid").size)
            .collect();

        assert_eq!(sizes, vec![19, 47, 51, 51, 51]);
    }

    #[test]
    fn test_enemies_grow_without_cap() {
        let config = LevelConfig::default();

        assert_eq!(config.plan(2).expect("level should be valid").enemies, 3);
        assert_eq!(config.plan(11).expect("level should be valid").enemies, 12);
    }

    #[test]
    fn test_level_zero_is_rejected() {
        assert!(matches!(
            LevelConfig::default().plan(0),
            Err(MazeError::InvalidLevel(0))
        ));
    }

    #[test]
    fn test_extreme_level_saturates() {
        let plan = LevelConfig::default()
            .plan(u32::MAX)
            .expect("level should be valid");

        assert_eq!(plan.size, 51);
        assert_eq!(plan.algorithm, Algorithm::Dfs);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LevelConfig::from_json(r#"{"max_size": 31, "base_enemies": 0}"#)
            .expect("partial config should parse");

        assert_eq!(config.min_size, 15);
        assert_eq!(config.max_size, 31);
        assert_eq!(config.base_enemies, 0);
        assert_eq!(config.plan(20).expect("level should be valid").size, 31);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        assert!(matches!(
            LevelConfig::from_json(r#"{"min_size": 0}"#),
            Err(MazeError::InvalidConfig(_))
        ));
        assert!(matches!(
            LevelConfig::from_json(r#"{"min_size": 61}"#),
            Err(MazeError::InvalidConfig(_))
        ));
        assert!(matches!(
            LevelConfig::from_json("not json"),
            Err(MazeError::Json(_))
        ));
    }

    #[test]
    fn test_config_survives_json() {
        let config = LevelConfig {
            min_size: 9,
            max_size: 25,
            size_increment: 2,
            base_enemies: 1,
            enemy_increment: 2,
        };
        let json = serde_json::to_string(&config).expect("config should serialize");

        assert_eq!(
            LevelConfig::from_json(&json).expect("config should parse"),
            config
        );
    }

    #[test]
    fn test_generate_level_follows_plan() {
        let config = LevelConfig::default();
        let grid = generate_level(&config, 3, &mut GenerationContext::seeded(5))
            .expect("level should generate");

        assert_eq!((grid.width(), grid.height()), (23, 23));
        assert_eq!(grid.count(Cell::EnemySpawn), 4);
        assert!(analysis::is_perfect(&grid).expect("maze should have a start"));
    }
}
