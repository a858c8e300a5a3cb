//! unsea - Node.js SEA bundle extraction CLI
//!
//! Extract the bundled script, code cache, and assets from a single
//! executable application.

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "unsea")]
#[command(
    author,
    version,
    about = "Extract Node.js single-executable application bundles"
)]
#[command(long_about = "
unsea locates the SEA blob embedded in an ELF, PE, or Mach-O executable,
decodes it, and unpacks the bundled script (sea.js), code cache (sea.jsc),
and assets (sea_assets/) into a directory. It also reconstructs the
sea-config.json the bundle was built from.

EXAMPLES:
    unsea app                 # Unpack into the current directory
    unsea -o out app          # Unpack into out/
    unsea --dry-run app       # Show the config, write nothing
    unsea --json app          # Bundle metadata as JSON for tooling
")]
struct Cli {
    /// Target executable containing an embedded SEA blob
    #[arg(required = true)]
    target: String,

    /// Directory to unpack the bundle into
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: String,

    /// Decode and print the config without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Output bundle metadata as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = Path::new(&cli.target);
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", cli.target);
    }

    let data = fs::read(path)?;
    let sea = unsea::parse_sea(&data)?;
    let config = sea.create_config();

    if cli.json {
        let meta = serde_json::json!({
            "codePath": sea.code_path,
            "flags": sea.flags.bits(),
            "codeSize": sea.code.len(),
            "codeCacheSize": sea.code_cache.as_ref().map(Vec::len),
            "assetCount": sea.assets.as_ref().map(|a| a.len()),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&meta)?);
    } else {
        println!("Original code path: {}", sea.code_path);
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    if !cli.dry_run {
        unsea::write_bundle(&sea, Path::new(&cli.output_dir))?;
        if !cli.json {
            println!("Unpacked bundle into {}", cli.output_dir);
        }
    }

    Ok(())
}
