//! Offline tools for the map-to-tensor pipeline: build a static map once, then replay planning
//! cycles against it and check the results.

#[macro_use]
extern crate log;

mod tensorize;

use anyhow::{Context, Result};
use structopt::StructOpt;

use abstutil::Timer;
use map_model::StaticMap;

#[derive(StructOpt)]
#[structopt(name = "dpmap", about = "Turns HD maps into planner tensors")]
enum Command {
    /// Builds a static map from upstream primitives and writes it as JSON.
    BuildMap {
        /// The path to a raw map, as produced by the upstream loader
        #[structopt(long)]
        input: String,
        /// Where to write the built map. Defaults to the input name with a `.built.json` suffix.
        #[structopt(long)]
        output: Option<String>,
    },
    /// Runs one planning cycle and writes the tensors as JSON.
    Tensorize {
        #[structopt(flatten)]
        args: tensorize::Args,
    },
    /// Checks that every padding row of a tensor file is fully masked and comes after the lanes.
    Validate {
        /// The path to a tensor file written by `tensorize`
        #[structopt(long)]
        tensors: String,
    },
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    match Command::from_args() {
        Command::BuildMap { input, output } => build_map(input, output),
        Command::Tensorize { args } => args.run(),
        Command::Validate { tensors } => validate(tensors),
    }
}

fn build_map(input: String, output: Option<String>) -> Result<()> {
    let mut timer = Timer::new(format!("build {}", input));
    let map = StaticMap::load_raw(&input, &mut timer)?;
    let output = output.unwrap_or_else(|| {
        format!(
            "{}.built.json",
            input.strip_suffix(".json").unwrap_or(&input)
        )
    });
    timer.note(format!(
        "Map {} has ID {} and {} lanes",
        map.get_name(),
        map.get_id(),
        abstutil::prettyprint_usize(map.num_lanes())
    ));
    map.save(&output)
}

fn validate(path: String) -> Result<()> {
    let tensors: lane_tensor::MapTensors = abstutil::read_json(&path)?;
    for (name, tensor) in [
        ("lanes", &tensors.lanes),
        ("route_lanes", &tensors.route_lanes),
    ] {
        let filled = lane_tensor::validate::check_masks(tensor)
            .with_context(|| format!("{} in {}", name, path))?;
        info!("{}: {} of {} rows filled", name, filled, tensor.capacity());
    }
    println!("{} is consistent", path);
    Ok(())
}
