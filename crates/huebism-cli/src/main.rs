//! Huebism palette file tools.
//!
//! Converts palette files between the supported exchange formats, inspects
//! them, and round-trips the persisted palette store from the terminal.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use huebism_core::storage::{PALETTES_KEY, Storage};
use huebism_core::{FileStorage, FormatKind, PaletteDoc, exchange};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "huebism", about = "Palette file tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the palettes and swatches in a file.
    Show {
        /// Palette file (.json or .css).
        file: PathBuf,
    },
    /// Convert a palette file to another format.
    Convert {
        /// Palette file (.json or .css).
        file: PathBuf,
        /// Target format: json or css.
        #[arg(long)]
        to: String,
        /// Output path. Defaults to the export filename next to the input.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Save a palette file into the persistent store.
    Stash {
        /// Palette file (.json or .css).
        file: PathBuf,
    },
    /// Write the persisted palettes back out as JSON.
    Unstash {
        /// Output path. Prints to stdout when omitted.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Show { file } => show(&file),
        Command::Convert { file, to, out } => convert(&file, &to, out),
        Command::Stash { file } => stash(&file),
        Command::Unstash { out } => unstash(out),
    }
}

/// Read and parse a palette file, dispatching on its extension.
fn read_palettes(file: &Path) -> Result<Vec<PaletteDoc>> {
    let name = file.display().to_string();
    let kind = FormatKind::from_filename(&name)?;
    let text = fs::read_to_string(file).with_context(|| format!("reading {name}"))?;
    let docs = exchange::parse(kind, &text).with_context(|| format!("parsing {name}"))?;
    Ok(docs)
}

fn show(file: &Path) -> Result<()> {
    let docs = read_palettes(file)?;
    for doc in &docs {
        println!("{} ({} swatches)", doc.name, doc.swatches.len());
        for swatch in &doc.swatches {
            println!("  {}  {}", swatch.color, swatch.name);
        }
    }
    log::info!("{} palette(s) in {}", docs.len(), file.display());
    Ok(())
}

fn convert(file: &Path, to: &str, out: Option<PathBuf>) -> Result<()> {
    let Some(kind) = FormatKind::from_extension(to) else {
        bail!("unknown target format {to:?} (expected json or css)");
    };

    let docs = read_palettes(file)?;
    let contents = exchange::format(kind, &docs);
    let out = out.unwrap_or_else(|| {
        file.with_file_name(exchange::export_filename(&docs, kind))
    });

    fs::write(&out, contents).with_context(|| format!("writing {}", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}

fn stash(file: &Path) -> Result<()> {
    let docs = read_palettes(file)?;
    let serialized = exchange::format(FormatKind::Json, &docs);

    let store = FileStorage::default_location().context("opening the palette store")?;
    pollster::block_on(store.save(PALETTES_KEY, &serialized))
        .context("saving to the palette store")?;
    println!(
        "stashed {} palette(s) in {}",
        docs.len(),
        store.base_path().display()
    );
    Ok(())
}

fn unstash(out: Option<PathBuf>) -> Result<()> {
    let store = FileStorage::default_location().context("opening the palette store")?;
    let serialized =
        pollster::block_on(store.load(PALETTES_KEY)).context("no stashed palettes")?;

    match out {
        Some(path) => {
            fs::write(&path, serialized).with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{serialized}"),
    }
    Ok(())
}
