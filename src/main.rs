use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tilegen::session::{Command, Session, Tick};
use tilegen::terrain_renderer::TerrainRenderer;
use tilegen::{Biome, BiomeStats, GenerationSettings, Map, MapError, MapGenerator};

#[derive(Parser, Debug)]
#[command(name = "tilegen")]
#[command(about = "Generate procedural tile maps with biomes and rivers")]
struct Args {
    /// Width of the map in tiles
    #[arg(short = 'W', long, default_value = "400")]
    width: usize,

    /// Height of the map in tiles
    #[arg(short = 'H', long, default_value = "300")]
    height: usize,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generation settings as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the map as a PNG image
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per tile in the PNG export
    #[arg(long, default_value = "4")]
    scale: u32,

    /// Save the map as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print a down-sampled ASCII view of the map
    #[arg(long)]
    ascii: bool,

    /// Explore the map from the terminal (WASD to move, R to regenerate, Q to quit)
    #[arg(short, long)]
    interactive: bool,
}

fn load_settings(path: &Path) -> Result<GenerationSettings, MapError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn save_json(map: &Map, path: &Path) -> Result<(), MapError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, map)?;
    writer.flush()?;
    Ok(())
}

fn save_png(map: &Map, path: &Path, scale: u32) -> Result<(), MapError> {
    TerrainRenderer::render_to_image(map, scale).save(path)?;
    Ok(())
}

fn print_map_info(map: &Map, stats: &BiomeStats) {
    println!("\nMap: {}x{} tiles", map.width, map.height);
    println!("Biome Distribution:");
    for biome in Biome::ALL {
        let count = stats.count(biome);
        if count > 0 {
            println!("  {} {:<10} {:>7} ({}%)", biome.glyph(), biome.name(), count, stats.percent(count));
        }
    }
    if let Some((x, y)) = map.entrance() {
        println!("Entrance at ({}, {})", x, y);
    }
}

fn run_interactive(generator: MapGenerator, args: &Args, rng: ChaCha8Rng) -> Result<(), MapError> {
    let mut session = Session::new(generator, args.width, args.height, rng)?;
    println!("World generated! WASD to move, R to regenerate, Q to exit.");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("{}", TerrainRenderer::render_viewport(session.map(), session.player(), 60, 20));
        let (x, y) = session.player();
        print!("[map #{} at ({}, {})] > ", session.generation(), x, y);
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(());
        }

        // Every key on the line is one tick's worth of input
        for key in input.trim().chars() {
            match Command::from_key(key) {
                Some(command) => {
                    if session.apply(command)? == Tick::Exit {
                        println!("Exiting...");
                        return Ok(());
                    }
                }
                None => println!("Unknown key '{}'", key),
            }
        }
    }
}

fn run(args: Args) -> Result<(), MapError> {
    let settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => GenerationSettings::default(),
    };
    let generator = MapGenerator::new(settings);

    let rng = match args.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };

    if args.interactive {
        return run_interactive(generator, &args, rng);
    }

    let mut rng = rng;
    info!("Generating world ({}x{} tiles)...", args.width, args.height);
    let (map, stats) = generator.generate_with_stats(args.width, args.height, &mut rng)?;

    if args.ascii {
        print!("{}", TerrainRenderer::render_ascii(&map, 80, 30));
    }
    print_map_info(&map, &stats);

    if let Some(path) = &args.png {
        save_png(&map, path, args.scale)?;
        println!("Map saved as: {}", path.display());
    }
    if let Some(path) = &args.json {
        save_json(&map, path)?;
        println!("Map data saved as: {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
