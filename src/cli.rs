//! Command line options for the terminal runner.
//!
//! ```text
//! tui-match3 [--seed <n>] [--config <path.json>] [--timed <secs>]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::types::BoardConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub seed: Option<u32>,
    pub config_path: Option<PathBuf>,
    pub round_secs: Option<u32>,
}

pub fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut run = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                run.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                run.config_path = Some(PathBuf::from(v));
            }
            "--timed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --timed"))?;
                run.round_secs = Some(
                    v.parse::<u32>()
                        .ok()
                        .filter(|&s| s > 0)
                        .ok_or_else(|| anyhow!("invalid --timed value: {}", v))?,
                );
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(run)
}

/// Parse a JSON board config. Omitted fields keep their defaults.
pub fn parse_config(json: &str) -> Result<BoardConfig> {
    let config: BoardConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<BoardConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parsing config {}", path.display()))
}

impl RunConfig {
    /// Board config from the file (or defaults) with command line overrides.
    pub fn board_config(&self) -> Result<BoardConfig> {
        let mut config = match &self.config_path {
            Some(path) => load_config(path)?,
            None => BoardConfig::default(),
        };
        if let Some(secs) = self.round_secs {
            config = config.with_round_duration_ms(secs.saturating_mul(1000));
        }
        Ok(config)
    }
}
