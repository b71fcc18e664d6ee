//! Runner configuration from `NEO_TETRIS_*` environment variables.

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS};

pub const SEED_ENV: &str = "NEO_TETRIS_SEED";
pub const DAS_ENV: &str = "NEO_TETRIS_DAS_MS";
pub const ARR_ENV: &str = "NEO_TETRIS_ARR_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Fixed engine seed; a fresh random seed per game when unset.
    pub seed: Option<u64>,
    /// Delay before a held movement key starts repeating.
    pub das_ms: u32,
    /// Interval between repeats once repeating.
    pub arr_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank values fall back to
    /// defaults; values that don't parse are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            seed: parse_var(&lookup, SEED_ENV)?,
            das_ms: parse_var(&lookup, DAS_ENV)?.unwrap_or(defaults.das_ms),
            arr_ms: parse_var(&lookup, ARR_ENV)?.unwrap_or(defaults.arr_ms),
        })
    }

    /// Seed for the next game.
    pub fn game_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .with_context(|| format!("invalid {key}={raw:?}"))
}
