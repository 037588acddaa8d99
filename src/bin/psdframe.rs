use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use psdframe::{Document, FrameRenderer as _, LayerCompositor, Profiled, ReplacementTable};

#[derive(Parser, Debug)]
#[command(name = "psdframe", version)]
struct Cli {
    /// Log every layer decision.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a template with replacements applied and write a PNG.
    Render(RenderArgs),
    /// Print the layer tree of a template, top-most layer first.
    Layers(LayersArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input template (.psd or .json manifest).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Replacement table JSON. Without it the template is flattened as-is.
    #[arg(long)]
    replacements: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct LayersArgs {
    /// Input template (.psd or .json manifest).
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layers(args) => cmd_layers(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let doc = Document::open(&args.in_path)
        .with_context(|| format!("open template '{}'", args.in_path.display()))?;

    let table = match &args.replacements {
        Some(path) => ReplacementTable::load(path)
            .with_context(|| format!("load replacements '{}'", path.display()))?,
        None => ReplacementTable::new(),
    };

    let renderer = Profiled::new(LayerCompositor, args.in_path.display().to_string());
    let frame = renderer.render(&doc, &table)?;
    frame.save_png(&args.out)?;

    tracing::info!(out = %args.out.display(), "wrote frame");
    Ok(())
}

fn cmd_layers(args: LayersArgs) -> anyhow::Result<()> {
    let doc = Document::open(&args.in_path)
        .with_context(|| format!("open template '{}'", args.in_path.display()))?;
    println!("{}x{}", doc.canvas.width, doc.canvas.height);
    print!("{}", doc.outline());
    Ok(())
}
