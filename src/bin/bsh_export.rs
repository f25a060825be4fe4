use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;

use insel_assets::{BshAtlas, Palette, SpriteCodec};

#[derive(Parser)]
#[command(name = "bsh-export")]
#[command(about = "Decode a sprite atlas and write every image as a PNG")]
struct Cli {
    /// Palette file (a single COL chunk)
    palette: PathBuf,

    /// Sprite atlas file (a single BSH chunk)
    atlas: PathBuf,

    /// Output directory
    #[arg(long, default_value = "sprites")]
    out: PathBuf,

    /// Also write placeholder entries (fully transparent images)
    #[arg(long)]
    placeholders: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let palette = Palette::from_reader(BufReader::new(File::open(&cli.palette)?))?;
    let atlas = BshAtlas::from_reader(BufReader::new(File::open(&cli.atlas)?), &palette)?;

    std::fs::create_dir_all(&cli.out)?;
    let mut written = 0;
    for (index, sprite) in atlas.images().iter().enumerate() {
        if sprite.codec == SpriteCodec::Placeholder && !cli.placeholders {
            continue;
        }
        let mut rgba = image::RgbaImage::new(sprite.width, sprite.height);
        for y in 0..sprite.height {
            for x in 0..sprite.width {
                let argb = sprite.pixel(x, y);
                rgba.put_pixel(
                    x,
                    y,
                    image::Rgba([
                        (argb >> 16) as u8,
                        (argb >> 8) as u8,
                        argb as u8,
                        (argb >> 24) as u8,
                    ]),
                );
            }
        }
        rgba.save(cli.out.join(format!("{index}.png")))?;
        written += 1;
    }

    println!(
        "{}: exported {} of {} sprites to {}",
        cli.atlas.display(),
        written,
        atlas.len(),
        cli.out.display()
    );
    Ok(())
}
