use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cbs_mapf::config::{Cli, Config};
use cbs_mapf::error::CbsError;
use cbs_mapf::loader::load_instance;
use cbs_mapf::{Cbs, Path, Stats};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::new(&cli);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn run(config: &Config) -> Result<()> {
    config.validate()?;

    let instance = load_instance(&config.instance_path)
        .with_context(|| format!("loading instance from {}", config.instance_path))?;
    info!(
        agents = instance.agents.len(),
        height = instance.map.height(),
        width = instance.map.width(),
        "instance loaded"
    );

    let splitting = config.splitting;
    let seed = config.seed;
    let map = instance.map;
    let agents = instance.agents;

    let solve = tokio::task::spawn_blocking(move || -> Result<(Vec<Path>, Stats), CbsError> {
        let mut cbs = Cbs::new(map, agents)?;
        let solution = cbs.solve(splitting, seed)?;
        let paths = solution.paths.iter().map(|p| (**p).clone()).collect();
        Ok((paths, cbs.stats().clone()))
    });

    let result = tokio::time::timeout(Duration::from_secs(config.timeout_secs), solve)
        .await
        .context("solve timed out")?
        .context("solve task panicked")?;

    let (paths, stats) = result?;
    let cost: usize = paths.iter().map(|p| p.cost()).sum();

    info!(
        cost,
        high_level_generated = stats.high_level_generated,
        high_level_expanded = stats.high_level_expanded,
        low_level_expanded = stats.low_level_expanded,
        "solution found"
    );

    let rendered = if config.json {
        serde_json::to_string_pretty(&paths).context("serializing solution to JSON")?
    } else {
        render_solution(cost, &paths)
    };
    match &config.output_path {
        Some(path) => fs::write(path, rendered).with_context(|| format!("writing solution to {path}"))?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_solution(cost: usize, paths: &[Path]) -> String {
    let mut out = format!("cost {cost}\n");
    for (agent_id, path) in paths.iter().enumerate() {
        let cells: Vec<String> = path.0.iter().map(|(x, y)| format!("({x},{y})")).collect();
        out.push_str(&format!("agent {agent_id}: {}\n", cells.join(" -> ")));
    }
    out
}
