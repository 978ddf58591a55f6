//! BannerKit command-line shell.
//!
//! Renders a scene file, or a freshly randomized design, to PNG or JPEG.

use anyhow::{Context, Result, anyhow, bail};
use bannerkit_core::{Catalogs, Editor, EditorConfig, ExportFormat, ExportOptions, Scene};
use bannerkit_render::{
    FontBook, HttpLoader, RasterSurface, RenderOutcome, Renderer, SourceLoader,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "bannerkit")]
#[command(about = "Render banner designs to images")]
#[command(version)]
struct Cli {
    /// Editor configuration file (JSON)
    #[arg(long, env = "BANNERKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Font file to register for text; repeatable, first is the fallback
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Output format (png or jpg); defaults to the output extension
    #[arg(long)]
    format: Option<String>,

    /// Encoder quality in [0, 1], used for JPEG
    #[arg(long)]
    quality: Option<f64>,

    /// Output image path
    #[arg(long, short, default_value = "banner.png")]
    out: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a scene JSON file
    Render {
        scene: PathBuf,
        /// Directory relative image paths resolve against; defaults to the scene's directory
        #[arg(long)]
        assets: Option<PathBuf>,
    },
    /// Generate and render a randomized design
    Random {
        /// Banner size id
        #[arg(long)]
        size: Option<String>,
        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Also write the generated scene as JSON
        #[arg(long)]
        save_scene: Option<PathBuf>,
    },
    /// List the available banner sizes
    Sizes,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EditorConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    let catalogs = Arc::new(Catalogs::builtin());

    match &cli.command {
        Command::Sizes => {
            for size in &catalogs.sizes {
                println!(
                    "{:<18} {:>5} x {:<5} {} ({})",
                    size.id, size.width, size.height, size.name, size.category
                );
            }
            Ok(())
        }
        Command::Render { scene, assets } => {
            let json = std::fs::read_to_string(scene)
                .with_context(|| format!("reading scene {}", scene.display()))?;
            let scene_data = Scene::from_json(&json)
                .with_context(|| format!("parsing scene {}", scene.display()))?;
            let base_dir = assets
                .clone()
                .or_else(|| scene.parent().map(Path::to_path_buf))
                .unwrap_or_default();
            render_to_file(&cli, &config, catalogs, &scene_data, base_dir)
        }
        Command::Random {
            size,
            seed,
            save_scene,
        } => {
            let mut editor = Editor::new(config.clone(), Arc::clone(&catalogs));
            if let Some(size) = size {
                if !editor.select_size(size) {
                    bail!("unknown size id {size:?}; run `bannerkit sizes` for the list");
                }
            }
            let seed = seed.unwrap_or_else(rand::random);
            log::info!("Randomizing with seed {seed}");
            editor.randomize(seed);

            if let Some(path) = save_scene {
                let json = editor.scene().to_json()?;
                std::fs::write(path, json)
                    .with_context(|| format!("writing scene {}", path.display()))?;
                log::info!("Saved scene to {}", path.display());
            }
            let base_dir = std::env::current_dir()?;
            render_to_file(&cli, &config, catalogs, editor.scene(), base_dir)
        }
    }
}

fn export_options(cli: &Cli, config: &EditorConfig) -> Result<ExportOptions> {
    let format = match &cli.format {
        Some(name) => {
            ExportFormat::from_extension(name).ok_or_else(|| anyhow!("unknown format {name:?}"))?
        }
        None => cli
            .out
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ExportFormat::from_extension)
            .unwrap_or(config.export.format),
    };
    let quality = cli.quality.unwrap_or(config.export.quality);
    Ok(ExportOptions::new(format, quality))
}

fn render_to_file(
    cli: &Cli,
    config: &EditorConfig,
    catalogs: Arc<Catalogs>,
    scene: &Scene,
    base_dir: PathBuf,
) -> Result<()> {
    let options = export_options(cli, config)?;

    let mut fonts = FontBook::default();
    for path in &cli.fonts {
        fonts
            .register_file(path)
            .with_context(|| format!("loading font {}", path.display()))?;
    }
    if fonts.is_empty() {
        log::warn!("No --font given; text elements will not be drawn");
    }

    let loader = HttpLoader::new(SourceLoader::with_base_dir(base_dir))?;
    let mut renderer =
        Renderer::new(RasterSurface::with_fonts(fonts), catalogs).with_loader(loader);
    match pollster::block_on(renderer.render(scene))? {
        RenderOutcome::Completed { skipped_assets } if skipped_assets > 0 => {
            log::warn!("{skipped_assets} image(s) could not be loaded and were skipped");
        }
        RenderOutcome::Completed { .. } => {}
        RenderOutcome::Superseded => bail!("render was superseded"),
    }

    let blob = pollster::block_on(renderer.export(&options))?;
    std::fs::write(&cli.out, &blob.bytes)
        .with_context(|| format!("writing {}", cli.out.display()))?;
    log::info!(
        "Wrote {} ({}, {} bytes)",
        cli.out.display(),
        blob.mime_type,
        blob.bytes.len()
    );
    Ok(())
}
