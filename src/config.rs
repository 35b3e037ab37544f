/// Command-line and environment configuration for the terminal game.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::level::MAX_LEVELS;
use crate::session::STARTING_LIVES;

#[derive(Clone, Debug, Parser)]
#[command(name = "wonkey_kong", version, about = "Climb, jump and burp your way past Kong")]
pub struct GameConfig {
    /// Directory holding `levelNN.txt` files.
    #[arg(long, env = "WONKEY_LEVELS_DIR", default_value = "levels")]
    pub levels_dir: PathBuf,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_LEVELS)))]
    pub start_level: u32,

    #[arg(long, default_value_t = STARTING_LIVES)]
    pub lives: u32,

    /// Seed for enemy facing and goodie drops; random when omitted.
    #[arg(long, env = "WONKEY_SEED")]
    pub seed: Option<u64>,

    /// Milliseconds per simulation tick.
    #[arg(long, default_value_t = 50)]
    pub tick_ms: u64,

    /// Write tracing output here (the terminal itself is taken by the game).
    #[arg(long, env = "WONKEY_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl GameConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
