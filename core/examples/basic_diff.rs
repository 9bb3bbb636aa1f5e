use grid_diff::{Grid, diff};
use std::fs::File;
use std::io::BufReader;

fn usage() -> ! {
    eprintln!("Usage: basic_diff <OLD.json> <NEW.json>");
    eprintln!("  each file holds a JSON array of equally long rows");
    std::process::exit(2);
}

fn load(path: &str) -> Result<Grid, Box<dyn std::error::Error>> {
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let old_path = args.next().unwrap_or_else(|| usage());
    let new_path = args.next().unwrap_or_else(|| usage());

    let before = load(&old_path)?;
    let after = load(&new_path)?;

    let result = diff(&before, &after)?;

    let rows: Vec<String> = result.row_tokens.iter().map(ToString::to_string).collect();
    let cols: Vec<String> = result.col_tokens.iter().map(ToString::to_string).collect();
    println!("rows: {}", rows.join(" "));
    println!("cols: {}", cols.join(" "));

    for change in &result.cell_changes {
        println!("{} -> {}: {} => {}", change.before, change.after, change.from, change.to);
    }

    Ok(())
}
