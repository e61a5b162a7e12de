use anyhow::{anyhow, Result};
use clap::Parser;

use crate::split::Splitting;

#[derive(Parser, Debug)]
#[command(
    name = "cbs-mapf",
    about = "Optimal multi-agent pathfinding on a 4-connected grid via Conflict-Based Search",
    version
)]
pub struct Cli {
    #[arg(long, help = "Path to the instance file (grid + agents)")]
    pub instance_path: String,

    #[arg(long, help = "Path to write the solution to (stdout if omitted)")]
    pub output_path: Option<String>,

    #[arg(
        long,
        value_enum,
        help = "Splitting rule used at each high-level branch",
        default_value = "standard"
    )]
    pub splitting: SplittingArg,

    #[arg(
        long,
        help = "Seed for disjoint splitting's random agent choice",
        default_value_t = 0
    )]
    pub seed: u64,

    #[arg(
        long,
        help = "Wall-clock timeout in seconds for the whole solve",
        default_value_t = 60
    )]
    pub timeout_secs: u64,

    #[arg(long, help = "Emit the solution as JSON instead of plain text")]
    pub json: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplittingArg {
    Standard,
    Disjoint,
}

impl From<SplittingArg> for Splitting {
    fn from(arg: SplittingArg) -> Self {
        match arg {
            SplittingArg::Standard => Splitting::Standard,
            SplittingArg::Disjoint => Splitting::Disjoint,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub instance_path: String,
    pub output_path: Option<String>,
    pub splitting: Splitting,
    pub seed: u64,
    pub timeout_secs: u64,
    pub json: bool,
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        Self {
            instance_path: cli.instance_path.clone(),
            output_path: cli.output_path.clone(),
            splitting: cli.splitting.into(),
            seed: cli.seed,
            timeout_secs: cli.timeout_secs,
            json: cli.json,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.instance_path.trim().is_empty() {
            return Err(anyhow!("instance-path must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout-secs must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_select_standard_splitting() {
        let cli = Cli::parse_from(["cbs-mapf", "--instance-path", "map.txt"]);
        let config = Config::new(&cli);
        assert_eq!(config.splitting, Splitting::Standard);
        assert_eq!(config.timeout_secs, 60);
        config.validate().unwrap();
    }

    #[test]
    fn rejects_a_zero_timeout() {
        let cli = Cli::parse_from([
            "cbs-mapf",
            "--instance-path",
            "map.txt",
            "--timeout-secs",
            "0",
        ]);
        let config = Config::new(&cli);
        assert!(config.validate().is_err());
    }
}
