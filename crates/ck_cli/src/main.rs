//! Corner-kick optimizer CLI
//!
//! Thin presentation layer over `ck_core`: runs the grid search, simulates a
//! single kick, or sweeps the grid into a goal-distribution CSV. All physics
//! and ranking happen in the core crate; this binary only parses flags,
//! formats output, and writes files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ck_core::{
    collect_goal_records, search, Config, GoalRecord, KickParameters, SelectedTrajectory,
    Simulator,
};

#[derive(Parser)]
#[command(name = "ck")]
#[command(about = "Corner kick trajectory optimizer", long_about = None)]
struct Cli {
    /// JSON config file overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the grid search and print the best trajectories
    Search {
        /// Write the selected trajectories (with samples) as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Simulate a single kick
    Simulate {
        /// Launch speed (m/s)
        #[arg(long)]
        speed: f64,

        /// Elevation angle (degrees)
        #[arg(long)]
        elevation: f64,

        /// Horizontal angle (degrees)
        #[arg(long)]
        horizontal: f64,

        /// Spin rate about the vertical axis (rad/s)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        spin: f64,

        /// Write the traced trajectory samples as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Sweep the grid and export every goal as a CSV row
    Goals {
        /// Output CSV path
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Search { out } => run_search(&config, out),
        Commands::Simulate { speed, elevation, horizontal, spin, out } => {
            run_simulate(&config, KickParameters::new(speed, elevation, horizontal, spin), out)
        }
        Commands::Goals { out } => run_goals(&config, out),
    }
}

fn run_search(config: &Config, out: Option<PathBuf>) -> Result<()> {
    let selected = search(&config.simulation, &config.search)?;

    println!("Selected {} trajectories (fastest first):", selected.len());
    for (i, trajectory) in selected.iter().enumerate() {
        print_trajectory(i + 1, trajectory);
    }

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&selected)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("\nTrajectory JSON written to {}", path.display());
    }
    Ok(())
}

fn print_trajectory(rank: usize, trajectory: &SelectedTrajectory) {
    let p = &trajectory.params;
    let o = &trajectory.outcome;
    println!("\nTrajectory {rank}:");
    println!("  Flight time:      {:.4} s", o.flight_time_s);
    println!("  Near post:        {}", if o.near_post { "yes" } else { "no" });
    println!("  Speed:            {:.2} m/s", p.speed_mps);
    println!("  Elevation angle:  {:.2} deg", p.elevation_deg);
    println!("  Horizontal angle: {:.2} deg", p.horizontal_deg);
    println!("  Spin rate:        {:.2} rad/s", p.spin_rad_s);
}

fn run_simulate(config: &Config, params: KickParameters, out: Option<PathBuf>) -> Result<()> {
    let simulator = Simulator::new(&config.simulation);
    let outcome = simulator.simulate_traced(&params)?;

    println!("Scored:           {}", if outcome.scored { "yes" } else { "no" });
    println!("Near post:        {}", if outcome.near_post { "yes" } else { "no" });
    println!("Flight time:      {:.4} s", outcome.flight_time_s);
    println!("Min dist to goal: {:.3} m", outcome.min_distance_to_goal_m);
    if let Some(last) = outcome.samples.last() {
        println!(
            "Final position:   ({:.3}, {:.3}, {:.3}) m",
            last.position.x, last.position.y, last.position.z
        );
    }

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&outcome)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Outcome JSON written to {}", path.display());
    }
    Ok(())
}

fn run_goals(config: &Config, out: PathBuf) -> Result<()> {
    let records = collect_goal_records(&config.simulation, &config.search)?;

    let mut writer =
        csv::Writer::from_path(&out).with_context(|| format!("creating {}", out.display()))?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    println!("{} goal records written to {}", records.len(), out.display());
    if !records.is_empty() {
        print_goal_stats(config, &records);
    }
    Ok(())
}

/// Distribution summary over the goal mouth, split into thirds.
fn print_goal_stats(config: &Config, records: &[GoalRecord]) {
    let goal_width = config.simulation.pitch.goal_width_m;
    let goal_height = config.simulation.pitch.goal_height_m;
    let near_post = records.iter().filter(|r| r.is_near_post).count();
    let mean_height: f64 = records.iter().map(|r| r.z_pos).sum::<f64>() / records.len() as f64;

    println!("\nGoal statistics:");
    println!("  Total goals:      {}", records.len());
    println!("  Near-post goals:  {near_post}");
    println!("  Mean height:      {mean_height:.2} m");

    let left = records.iter().filter(|r| r.y_pos < -goal_width / 6.0).count();
    let right = records.iter().filter(|r| r.y_pos > goal_width / 6.0).count();
    let center = records.len() - left - right;
    println!("  Left / center / right thirds:  {left} / {center} / {right}");

    let lower = records.iter().filter(|r| r.z_pos <= goal_height / 3.0).count();
    let upper = records.iter().filter(|r| r.z_pos > 2.0 * goal_height / 3.0).count();
    let middle = records.len() - lower - upper;
    println!("  Lower / middle / upper thirds: {lower} / {middle} / {upper}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_simulate_with_negative_spin() {
        let cli = Cli::try_parse_from([
            "ck",
            "simulate",
            "--speed",
            "28.5",
            "--elevation",
            "17",
            "--horizontal",
            "14",
            "--spin",
            "-95",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate { speed, spin, .. } => {
                assert_eq!(speed, 28.5);
                assert_eq!(spin, -95.0);
            }
            _ => panic!("expected simulate subcommand"),
        }
    }

    #[test]
    fn goals_csv_roundtrips_through_serde() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goals.csv");
        let record = GoalRecord {
            speed_mps: 32.0,
            elevation_deg: 15.0,
            horizontal_deg: 15.0,
            spin_rad_s: -95.0,
            y_pos: -0.94,
            z_pos: 0.26,
            is_near_post: false,
            flight_time_s: 1.456,
        };

        let mut writer = csv::Writer::from_path(&path).unwrap();
        writer.serialize(record).unwrap();
        writer.flush().unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let back: GoalRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(back.y_pos, record.y_pos);
        assert_eq!(back.is_near_post, record.is_near_post);
    }
}
