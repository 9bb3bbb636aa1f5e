use grid_diff::{DiffConfig, Grid, diff_grids, serialize_grid_diff};
use std::fs::File;
use std::io::BufReader;

fn usage() -> ! {
    eprintln!("Usage: custom_config <OLD.json> <NEW.json> [MAX_LCS_CELLS]");
    std::process::exit(2);
}

fn load(path: &str) -> Result<Grid, Box<dyn std::error::Error>> {
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let old_path = args.next().unwrap_or_else(|| usage());
    let new_path = args.next().unwrap_or_else(|| usage());
    let limit: Option<u64> = args.next().map(|s| s.parse()).transpose()?;

    let mut builder = DiffConfig::builder().blank_lines_match(true);
    if let Some(limit) = limit {
        builder = builder.max_lcs_cells(limit);
    }
    let cfg = builder.build()?;

    let result = diff_grids(&load(&old_path)?, &load(&new_path)?, &cfg)?;

    println!("{}", serialize_grid_diff(&result)?);
    Ok(())
}
