//! wallpack command-line shell

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use wallpack_core::{
    classify_overlap, has_significant_overlap, is_valid_horizontal_position,
    is_valid_vertical_position, overlap_percentage, overlap_severity, Block, Design,
    PlacementConfig, Position, Rect, Size, Wall,
};
use wallpack_design::{
    codec, ids, DesignArchive, DesignFile, DesignLibrary, FileBackend, ImportPreview, Timestamp,
};
use wallpack_placement::{LayoutGenerator, Placer};
use wallpack_texture::CropArea;

#[derive(Parser)]
#[command(name = "wallpack")]
#[command(about = "Lay out, check and manage wall designs")]
#[command(version)]
struct Cli {
    /// Placement configuration (JSON). Missing fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random layout on an empty wall
    Layout {
        /// Wall width in cm
        #[arg(long, default_value = "300")]
        width: f64,

        /// Wall height in cm
        #[arg(long, default_value = "150")]
        height: f64,

        /// Maximum number of blocks to place
        #[arg(short, long, default_value = "20")]
        max_blocks: usize,

        /// Block sizes as WIDTHxHEIGHT (defaults to the built-in templates)
        #[arg(short, long)]
        block: Vec<String>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Design name
        #[arg(short, long, default_value = "Generated Layout")]
        name: String,

        /// Output file for the design (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve where a dropped block lands in a design
    Drop {
        /// Design file (JSON)
        design: PathBuf,

        /// Drop target x
        #[arg(short)]
        x: f64,

        /// Drop target y
        #[arg(short)]
        y: f64,

        /// Block size as WIDTHxHEIGHT (defaults to the moved block's size)
        #[arg(long)]
        size: Option<String>,

        /// Id of the block being moved
        #[arg(short, long)]
        exclude: Option<String>,

        /// Move the block and write the design back
        #[arg(long, requires = "exclude")]
        apply: bool,
    },

    /// Report overlaps and out-of-bounds blocks in a design
    Check {
        /// Design file (JSON)
        design: PathBuf,
    },

    /// List saved designs
    List {
        #[arg(long, default_value = "wallpack-designs.json")]
        store: PathBuf,
    },

    /// Save a design file into the library (updates by id)
    Save {
        /// Design file (JSON)
        design: PathBuf,

        #[arg(long, default_value = "wallpack-designs.json")]
        store: PathBuf,
    },

    /// Delete a saved design by its list index
    Delete {
        index: usize,

        #[arg(long, default_value = "wallpack-designs.json")]
        store: PathBuf,
    },

    /// Import a design or archive file
    Import {
        file: PathBuf,

        /// Replace saved designs with the same name
        #[arg(long)]
        overwrite: bool,

        /// Only show what would be imported
        #[arg(long)]
        preview: bool,

        #[arg(long, default_value = "wallpack-designs.json")]
        store: PathBuf,
    },

    /// Export one saved design, or all of them as an archive
    Export {
        /// Index of a single design to export
        #[arg(short, long)]
        index: Option<usize>,

        /// Include this design file as "Current Design" in the archive
        #[arg(long, conflicts_with = "index")]
        current: Option<PathBuf>,

        /// Output file (defaults to the design name or a dated archive name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, default_value = "wallpack-designs.json")]
        store: PathBuf,
    },

    /// Process an image into a block texture
    Texture {
        /// Input image
        input: PathBuf,

        /// Output PNG
        output: PathBuf,

        #[command(subcommand)]
        op: TextureOp,
    },
}

#[derive(Subcommand)]
enum TextureOp {
    /// Cut a rectangle out of the image
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Tint the image with a block color
    Blend {
        /// Color as #rrggbb
        color: String,

        #[arg(short, long, default_value = "0.5")]
        strength: f32,
    },
    /// Shrink the image for cropping
    Resize {
        #[arg(short, long, default_value = "400")]
        max_size: u32,
    },
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PlacementConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: PlacementConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(Some(config))
}

fn parse_size(s: &str) -> anyhow::Result<Size> {
    let Some((w, h)) = s.split_once(|c: char| c == 'x' || c == 'X') else {
        bail!("Invalid size '{}': expected WIDTHxHEIGHT", s);
    };
    let size = Size::new(w.trim().parse()?, h.trim().parse()?);
    if !size.is_valid() {
        bail!("Invalid size '{}': width and height must be positive", s);
    }
    Ok(size)
}

fn now() -> String {
    Timestamp::now().to_rfc3339()
}

fn load_design(path: &Path) -> anyhow::Result<Design> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    match codec::parse(&bytes)? {
        DesignFile::Single(data) => {
            let id = data.id.clone().unwrap_or_else(ids::new_design_id);
            Ok(data.into_design(id, &now()))
        }
        DesignFile::Archive(_) => bail!("{} is an archive; expected a single design", path.display()),
    }
}

fn write_design(path: &Path, design: &Design) -> anyhow::Result<()> {
    fs::write(path, codec::serialize_design(design)?)?;
    Ok(())
}

fn open_library(store: &Path) -> anyhow::Result<DesignLibrary<FileBackend>> {
    DesignLibrary::open(FileBackend::new(store))
        .with_context(|| format!("opening design library {}", store.display()))
}

fn print_design_summary(design: &Design) {
    let preview = design.compute_preview();
    println!("Design: {}", design.name);
    println!("  Wall: {}", preview.wall_dimensions);
    println!("  Blocks: {}", preview.block_count);
    println!("  Templates: {}", preview.template_count);
    let overflowing = design.blocks.iter().filter(|b| b.is_overflow == Some(true)).count();
    if overflowing > 0 {
        println!("  Overflowing: {}", overflowing);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_override = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Layout {
            width,
            height,
            max_blocks,
            block,
            seed,
            name,
            output,
        } => {
            let wall = Wall::new(width, height);
            wall.validate()?;

            let mut design = Design::new(ids::new_design_id(), name, wall, now());
            let catalog: Vec<Size> = if block.is_empty() {
                let mut sizes: Vec<Size> = design.block_templates.iter().map(|t| t.size()).collect();
                sizes.dedup();
                sizes
            } else {
                block.iter().map(|s| parse_size(s)).collect::<anyhow::Result<_>>()?
            };
            let config = config_override
                .unwrap_or_else(|| PlacementConfig::for_templates(&design.block_templates));

            let mut generator = match seed {
                Some(seed) => LayoutGenerator::with_seed(seed),
                None => LayoutGenerator::new(),
            }
            .try_with_config(config)?;
            let result = generator.generate(&design.wall, &catalog, max_blocks);
            println!(
                "Placed {}/{} blocks in {} attempts",
                result.placed_count(),
                max_blocks,
                result.attempts
            );

            design.blocks = result.into_blocks(ids::new_block_id);
            for block in &mut design.blocks {
                block.refresh_overflow(&design.wall);
            }
            design.preview = Some(design.compute_preview());
            print_design_summary(&design);

            if let Some(path) = output {
                write_design(&path, &design)?;
                println!("Design saved to: {}", path.display());
            }
        }

        Commands::Drop {
            design: path,
            x,
            y,
            size,
            exclude,
            apply,
        } => {
            let mut design = load_design(&path)?;
            let config = config_override
                .unwrap_or_else(|| PlacementConfig::for_templates(&design.block_templates));
            let moved = match &exclude {
                Some(id) => match design.block(id) {
                    Some(block) => Some(block.clone()),
                    None => bail!("No block with id '{}' in {}", id, path.display()),
                },
                None => None,
            };
            let size = match (size, &moved) {
                (Some(s), _) => parse_size(&s)?,
                (None, Some(block)) => block.size(),
                (None, None) => bail!("Pass --size or --exclude to know the block size"),
            };
            let target = Position::new(x, y);

            let others: Vec<&Block> = design
                .blocks
                .iter()
                .filter(|b| Some(b.id.as_str()) != exclude.as_deref())
                .collect();
            let candidate = size.at(target);
            let report = classify_overlap(&candidate, &others, config.small_overlap_threshold);
            if report.is_small {
                for offender in &report.offenders {
                    println!(
                        "Warning: target overlaps {} by {:.1}%",
                        offender.id.as_deref().unwrap_or("?"),
                        offender.percentage
                    );
                }
            }
            log::debug!("Target overlap severity: {:?}", overlap_severity(&candidate, &others, &config));

            let placer = Placer::try_new(config)?;
            let resolution = placer.resolve_drop(target, size, &design.blocks, &design.wall, exclude.as_deref());
            if !resolution.is_resolved() {
                bail!(
                    "No valid position for a {}x{} block near ({}, {})",
                    size.width,
                    size.height,
                    x,
                    y
                );
            }
            println!(
                "Resolved ({}, {}) -> ({}, {}) via {:?}",
                x, y, resolution.position.x, resolution.position.y, resolution.stage
            );

            if apply {
                if let Some(id) = exclude {
                    let wall = design.wall.clone();
                    if let Some(block) = design.blocks.iter_mut().find(|b| b.id == id) {
                        block.move_to(resolution.position);
                        block.refresh_overflow(&wall);
                    }
                    design.preview = Some(design.compute_preview());
                    write_design(&path, &design)?;
                    println!("Moved {} and saved {}", id, path.display());
                }
            }
        }

        Commands::Check { design: path } => {
            let design = load_design(&path)?;
            let config = config_override
                .unwrap_or_else(|| PlacementConfig::for_templates(&design.block_templates));
            print_design_summary(&design);

            let mut problems = 0;
            for (i, a) in design.blocks.iter().enumerate() {
                let ra = Rect::new(a.x, a.y, a.width, a.height);
                for b in &design.blocks[i + 1..] {
                    let rb = Rect::new(b.x, b.y, b.width, b.height);
                    if ra.overlaps(&rb) {
                        problems += 1;
                        let severity = if has_significant_overlap(&ra, &rb, config.significant_overlap_threshold) {
                            "significant"
                        } else {
                            "minor"
                        };
                        println!(
                            "  Overlap ({}): {} / {} ({:.1}% of {})",
                            severity,
                            a.id,
                            b.id,
                            overlap_percentage(&ra, &rb),
                            a.id
                        );
                    }
                }
                if !is_valid_horizontal_position(&ra, &design.wall, config.max_block_width)
                    || !is_valid_vertical_position(&ra, &design.wall, config.max_block_height)
                {
                    problems += 1;
                    println!("  Out of bounds: {} at ({}, {})", a.id, a.x, a.y);
                }
            }

            if problems == 0 {
                println!("No problems found");
            } else {
                bail!("{} problem(s) found", problems);
            }
        }

        Commands::List { store } => {
            let library = open_library(&store)?;
            if library.is_empty() {
                println!("No saved designs in {}", store.display());
            }
            for (i, design) in library.designs().iter().enumerate() {
                let preview = design.preview.clone().unwrap_or_else(|| design.compute_preview());
                println!(
                    "  [{}] {:<24} {:>12}  {:>3} blocks  {}",
                    i, design.name, preview.wall_dimensions, preview.block_count, design.created_at
                );
            }
        }

        Commands::Save { design: path, store } => {
            let mut design = load_design(&path)?;
            design.preview = Some(design.compute_preview());
            let name = design.name.clone();
            let mut library = open_library(&store)?;
            library.save(design)?;
            println!("Saved '{}' ({} designs in library)", name, library.len());
        }

        Commands::Delete { index, store } => {
            let mut library = open_library(&store)?;
            let removed = library.delete(index)?;
            println!("Deleted '{}'", removed.name);
        }

        Commands::Import {
            file,
            overwrite,
            preview,
            store,
        } => {
            let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let parsed = codec::parse(&bytes)?;

            let info = ImportPreview::from_file(&parsed);
            println!("{}", info.name);
            if let Some(count) = info.block_count {
                println!("  Blocks: {}", count);
            }
            if let Some(dims) = &info.wall_dimensions {
                println!("  Wall: {}", dims);
            }
            if let Some(count) = info.template_count {
                println!("  Templates: {}", count);
            }
            if let Some(date) = info.created_at.as_deref().or(info.export_date.as_deref()) {
                println!("  Date: {}", date);
            } else {
                println!("  Date: Unknown");
            }
            if preview {
                return Ok(());
            }

            let designs = codec::prepare_import(parsed, ids::new_design_id, &now());
            let mut library = open_library(&store)?;
            let summary = library.import_batch(designs, overwrite)?;
            println!(
                "Imported {}, overwritten {}, skipped {}",
                summary.imported, summary.overwritten, summary.skipped
            );
        }

        Commands::Export {
            index,
            current,
            output,
            store,
        } => {
            let library = open_library(&store)?;

            if let Some(index) = index {
                let Some(design) = library.designs().get(index) else {
                    bail!("No design at index {} ({} saved)", index, library.len());
                };
                let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.json", design.name)));
                write_design(&path, design)?;
                println!("Design '{}' exported to: {}", design.name, path.display());
                return Ok(());
            }

            let stamp = Timestamp::now();
            let mut archive = DesignArchive::new(stamp.to_rfc3339()).with_designs(library.designs().to_vec());
            if let Some(path) = current {
                let snapshot = load_design(&path)?;
                archive = archive.with_current(
                    ids::new_design_id(),
                    snapshot.wall,
                    snapshot.blocks,
                    snapshot.block_templates,
                );
            }
            if archive.designs.is_empty() {
                bail!("Nothing to export: the library is empty");
            }

            let path = output.unwrap_or_else(|| {
                PathBuf::from(format!("{}.json", codec::default_archive_filename(&stamp)))
            });
            fs::write(&path, codec::serialize_archive(&archive)?)?;
            let count = archive.designs.len();
            println!(
                "Exported {} design{} to: {}",
                count,
                if count == 1 { "" } else { "s" },
                path.display()
            );
        }

        Commands::Texture { input, output, op } => {
            let bytes = fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let out = match op {
                TextureOp::Crop { x, y, width, height } => {
                    wallpack_texture::crop(&bytes, CropArea::new(x, y, width, height))?
                }
                TextureOp::Blend { color, strength } => {
                    wallpack_texture::blend_with_color(&bytes, &color, strength)?
                }
                TextureOp::Resize { max_size } => {
                    let resized = wallpack_texture::resize_for_cropping(&bytes, max_size)?;
                    println!(
                        "Original {}x{}, resized to {}x{}",
                        resized.original_width, resized.original_height, resized.width, resized.height
                    );
                    resized.bytes
                }
            };
            fs::write(&output, out)?;
            println!("Texture saved to: {}", output.display());
        }
    }

    Ok(())
}
