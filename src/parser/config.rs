//! Parser and trainer configuration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::data::{NULL_WORD, UNKNOWN_WORD};
use crate::digraph::ROOT_WORD;
use crate::parser::constants::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_DECODE_STEP_CAP, DEFAULT_ORACLE_STEP_CAP,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Transitions allowed while decoding one sentence before giving up
    pub decode_step_cap: usize,
    /// Transitions allowed while replaying the oracle over one gold tree
    pub oracle_step_cap: usize,
    /// Bound of every queue in the streaming pipeline
    pub channel_capacity: usize,
    pub unknown_word: String,
    pub root_word: String,
    pub null_word: String,
    /// Run the proper-noun compound repair after decoding
    pub apply_fixes: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            decode_step_cap: DEFAULT_DECODE_STEP_CAP,
            oracle_step_cap: DEFAULT_ORACLE_STEP_CAP,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            unknown_word: UNKNOWN_WORD.to_string(),
            root_word: ROOT_WORD.to_string(),
            null_word: NULL_WORD.to_string(),
            apply_fixes: true,
        }
    }
}

impl ParserConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml_str: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml_str)
            .map_err(|e| anyhow!("Invalid parser config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref();
        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }
        let yaml_str = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config = Self::from_yaml_str(&yaml_str)
            .map_err(|e| anyhow!("{} ({})", e, path.display()))?;
        log::info!("Loaded parser config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.decode_step_cap == 0 || self.oracle_step_cap == 0 {
            return Err(anyhow!("Step caps must be positive"));
        }
        if self.channel_capacity == 0 {
            return Err(anyhow!("channel_capacity must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub epochs: usize,
    /// Cross-validate every n epochs; 0 only evaluates after the last epoch
    pub eval_per_iter: usize,
    /// Seed of the example shuffling between epochs
    pub seed: u64,
    /// Where to write the best performance snapshot, if anywhere
    pub save_best: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            eval_per_iter: 1,
            seed: 1337,
            save_best: None,
        }
    }
}

impl TrainerConfig {
    pub fn from_yaml_str(yaml_str: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_str).map_err(|e| anyhow!("Invalid trainer config: {}", e))
    }
}
