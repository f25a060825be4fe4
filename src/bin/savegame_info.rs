use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;

use insel_assets::{BuildingCatalog, BuildingTable, Footprint, Savegame};

#[derive(Parser)]
#[command(name = "savegame-info")]
#[command(about = "Dump island records and layer statistics from a savegame")]
struct Cli {
    /// Savegame file to inspect
    file: PathBuf,

    /// Building catalog file: one "graphic width height" triple per line,
    /// '#' starts a comment. Without it every graphic is assumed 1x1.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

/// Fallback catalog that treats every building as a single tile.
struct UnitCatalog;

impl BuildingCatalog for UnitCatalog {
    fn footprint(&self, _graphic: u16) -> Option<Footprint> {
        Some(Footprint { width: 1, height: 1 })
    }
}

fn load_catalog(path: &PathBuf) -> Result<BuildingTable, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let mut table = BuildingTable::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(graphic), Some(width), Some(height)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(format!("{}:{}: expected 3 fields", path.display(), line_no + 1).into());
        };
        table.insert(graphic.parse()?, width.parse()?, height.parse()?);
    }
    Ok(table)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let source = BufReader::new(File::open(&cli.file)?);

    let savegame = match &cli.catalog {
        Some(path) => {
            let table = load_catalog(path)?;
            eprintln!("catalog: {} buildings", table.len());
            Savegame::from_reader(source, &table)?
        }
        None => Savegame::from_reader(source, &UnitCatalog)?,
    };

    println!("{}: {} island(s)", cli.file.display(), savegame.islands().len());
    for island in savegame.islands() {
        let record = &island.record;
        println!(
            "island {:3}  {}x{} at ({}, {})  size={:?} climate={:?} fertility={:?}{}",
            record.island_number,
            record.width,
            record.height,
            record.x,
            record.y,
            record.size,
            record.climate,
            record.fertility,
            if record.modified { "  [modified]" } else { "" },
        );
        println!(
            "            bottom: {:5} occupied cells, top: {:5} occupied cells",
            island.layers.bottom.occupied(),
            island.layers.top.occupied(),
        );
    }
    Ok(())
}
