//! Optional TOML configuration for the command-line adapter.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use micromouse_core::Position;
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;
const DEFAULT_LOG_FILTER: &str = "info";

/// Settings read from the configuration file. Every section is optional.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default = "default_version")]
    version: u32,
    /// Default endpoints for newly created mazes.
    #[serde(default)]
    pub(crate) maze: MazeSection,
    /// Printout settings.
    #[serde(default)]
    pub(crate) render: RenderSection,
    /// Logging settings.
    #[serde(default)]
    pub(crate) log: LogSection,
}

/// `[maze]` section.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct MazeSection {
    start: Option<[i32; 2]>,
    goal: Option<[i32; 2]>,
}

impl MazeSection {
    /// Configured start cell.
    pub(crate) fn start(&self) -> Option<Position> {
        self.start.map(|[row, col]| Position::new(row, col))
    }

    /// Configured goal cell.
    pub(crate) fn goal(&self) -> Option<Position> {
        self.goal.map(|[row, col]| Position::new(row, col))
    }
}

/// `[render]` section.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct RenderSection {
    #[serde(default = "default_show_mouse")]
    pub(crate) show_mouse: bool,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            show_mouse: default_show_mouse(),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct LogSection {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub(crate) filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            maze: MazeSection::default(),
            render: RenderSection::default(),
            log: LogSection::default(),
        }
    }
}

impl Config {
    /// Loads the file at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml contents")?;
        if config.version != SUPPORTED_CONFIG_VERSION {
            bail!(
                "unsupported config version {}; expected {}",
                config.version,
                SUPPORTED_CONFIG_VERSION
            );
        }
        Ok(config)
    }
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_show_mouse() -> bool {
    true
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}
