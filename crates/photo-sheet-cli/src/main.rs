mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use photo_sheet::codec::{self, ImageFormat};
use photo_sheet::constants::{DEFAULT_FONT_SIZE, EDIT_JPEG_QUALITY, EXPORT_JPEG_QUALITY};
use photo_sheet::{
    AdjustmentSpec, FilterKind, MaskSession, MaskStroke, PaperSize, PhotoSize, PixelRect,
    PrintConfig, Quantity, SheetOptions, SheetStatistics, TextOverlay,
};

use logger::CliLogger;

#[derive(Parser)]
#[command(name = "psheet", about = "Passport and ID photo print sheets", version)]
struct Cli {
    /// More log output (repeat for debug and trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how many photos of a size fit on a paper
    Capacity {
        /// Paper size
        #[arg(long, default_value = "4x6", value_enum)]
        paper: PaperArg,

        /// Photo size
        #[arg(long, default_value = "35x45", value_enum)]
        photo: PhotoArg,

        /// Print resolution
        #[arg(long, default_value = "300")]
        dpi: f32,
    },

    /// Tile photos onto a print sheet
    Sheet {
        /// Subject image(s), used round-robin
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output file (JPEG, or PDF with --pdf)
        #[arg(short, long)]
        output: PathBuf,

        /// JSON options file; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Photo size
        #[arg(long, value_enum)]
        photo: Option<PhotoArg>,

        /// Number of copies, or "max" to fill the sheet
        #[arg(long)]
        quantity: Option<Quantity>,

        /// Print resolution
        #[arg(long)]
        dpi: Option<f32>,

        /// Write a one-page PDF sized to the paper
        #[arg(long)]
        pdf: bool,

        /// Show statistics only, don't render
        #[arg(long)]
        stats_only: bool,
    },

    /// Adjust brightness, contrast, sharpness and color filter
    Adjust {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Brightness in percent (100 = unchanged)
        #[arg(long, default_value = "100")]
        brightness: f32,

        /// Contrast in percent (100 = unchanged)
        #[arg(long, default_value = "100")]
        contrast: f32,

        /// Sharpness in percent (0 = off)
        #[arg(long, default_value = "0")]
        sharpness: f32,

        /// Color filter
        #[arg(long, default_value = "none", value_enum)]
        filter: FilterArg,

        /// JPEG quality in (0, 1]
        #[arg(long, default_value_t = EDIT_JPEG_QUALITY)]
        quality: f32,
    },

    /// Cut a rectangle out of an image
    Crop {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        x: u32,

        #[arg(long)]
        y: u32,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        /// Crop whatever part of the rectangle overlaps the image instead of
        /// rejecting it
        #[arg(long)]
        clamp: bool,
    },

    /// Replay painted strokes into a black and white PNG mask
    Mask {
        /// Mask width in pixels
        #[arg(long)]
        width: u32,

        /// Mask height in pixels
        #[arg(long)]
        height: u32,

        /// JSON array of strokes in image pixels
        #[arg(long)]
        strokes: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Blend a generated image over its source
    Blend {
        #[arg(long)]
        source: PathBuf,

        #[arg(long)]
        generated: PathBuf,

        /// 0 keeps the source, 100 takes the generated image
        #[arg(long, default_value = "100", value_parser = clap::value_parser!(u8).range(0..=100))]
        intensity: u8,

        /// Output file (format from extension)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Draw a line of text over an image
    Text {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// TrueType/OpenType font file
        #[arg(long)]
        font: PathBuf,

        /// Text to draw
        #[arg(long, default_value = "Add Text")]
        text: String,

        /// Horizontal center in percent of the width
        #[arg(long, default_value = "50")]
        x: f32,

        /// Vertical center in percent of the height
        #[arg(long, default_value = "50")]
        y: f32,

        /// Font size in preview pixels
        #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
        size: f32,

        /// Width the image was previewed at; scales size and shadow
        #[arg(long)]
        display_width: Option<f32>,

        /// Text color as #rgb, #rrggbb or #rrggbbaa
        #[arg(long, default_value = "#ffffff")]
        color: String,

        /// Skip the drop shadow
        #[arg(long)]
        no_shadow: bool,
    },

    /// Normalize an upload: bound to 800 px and re-encode as JPEG
    Prepare {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    #[value(name = "4x6")]
    FourBySix,
    #[value(name = "5x7")]
    FiveBySeven,
    A4,
    Letter,
}

#[derive(Clone, Copy, ValueEnum)]
enum PhotoArg {
    #[value(name = "35x45")]
    Eu,
    #[value(name = "2x2")]
    Us,
    #[value(name = "50x70")]
    Canada,
    #[value(name = "33x48")]
    China,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    None,
    Grayscale,
    Sepia,
    Invert,
    Vintage,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::FourBySix => Self::FourBySix,
            PaperArg::FiveBySeven => Self::FiveBySeven,
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

impl From<PhotoArg> for PhotoSize {
    fn from(arg: PhotoArg) -> Self {
        match arg {
            PhotoArg::Eu => Self::Eu35x45,
            PhotoArg::Us => Self::Us2x2,
            PhotoArg::Canada => Self::Canada50x70,
            PhotoArg::China => Self::China33x48,
        }
    }
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::None => Self::None,
            FilterArg::Grayscale => Self::Grayscale,
            FilterArg::Sepia => Self::Sepia,
            FilterArg::Invert => Self::Invert,
            FilterArg::Vintage => Self::Vintage,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::from_flags(cli.verbose, cli.quiet)
        .init()
        .context("failed to install logger")?;

    match cli.command {
        Commands::Capacity { paper, photo, dpi } => {
            let config = PrintConfig::with_dpi(dpi);
            let photo = PhotoSize::from(photo);
            let stats = photo_sheet::capacity_statistics(paper.into(), photo, &config)?;
            print_statistics(&stats, photo);
        }

        Commands::Sheet {
            input,
            output,
            config,
            paper,
            photo,
            quantity,
            dpi,
            pdf,
            stats_only,
        } => {
            let mut options = match config {
                Some(path) => SheetOptions::load(&path)
                    .await
                    .with_context(|| format!("failed to load {}", path.display()))?,
                None => SheetOptions::default(),
            };
            if let Some(paper) = paper {
                options.paper = paper.into();
            }
            if let Some(photo) = photo {
                options.photo = photo.into();
            }
            if let Some(quantity) = quantity {
                options.quantity = quantity;
            }
            if let Some(dpi) = dpi {
                options.print.dpi = dpi;
            }
            options.validate()?;

            let subjects = photo_sheet::load_images(&input).await?;
            let request = options.request(subjects);

            let layout = request.layout(&options.print)?;
            let stats = photo_sheet::calculate_statistics(&layout, request.subjects.len());
            print_statistics(&stats, options.photo);

            if stats_only {
                return Ok(());
            }

            let bytes = if pdf {
                let sheet = photo_sheet::compose_sheet(&request, &options.print)?;
                photo_sheet::export_pdf(&sheet, options.paper, &options.print)?
            } else {
                photo_sheet::compose::render_sheet_with_quality(
                    &request,
                    &options.print,
                    options.jpeg_quality,
                )?
            };
            photo_sheet::save_bytes(&bytes, &output).await?;
            println!(
                "Composed {} copies of {} on {} → {}",
                stats.copies,
                options.photo,
                options.paper,
                output.display()
            );
        }

        Commands::Adjust {
            input,
            output,
            brightness,
            contrast,
            sharpness,
            filter,
            quality,
        } => {
            let spec = AdjustmentSpec {
                brightness,
                contrast,
                sharpness,
                filter: filter.into(),
            };
            let image = photo_sheet::load_image(&input).await?;
            let bytes = photo_sheet::adjust::render_adjusted_with_quality(&image, &spec, quality)?;
            photo_sheet::save_bytes(&bytes, &output).await?;
            println!("Adjusted → {}", output.display());
        }

        Commands::Crop {
            input,
            output,
            x,
            y,
            width,
            height,
            clamp,
        } => {
            let image = photo_sheet::load_image(&input).await?;
            let mut rect = PixelRect::new(x, y, width, height);
            if clamp {
                rect = rect.clamp_to(image.width(), image.height());
            }
            let bytes = photo_sheet::render_crop(&image, rect)?;
            photo_sheet::save_bytes(&bytes, &output).await?;
            println!("Cropped {}x{} → {}", rect.width, rect.height, output.display());
        }

        Commands::Mask {
            width,
            height,
            strokes,
            output,
        } => {
            let json = tokio::fs::read(&strokes)
                .await
                .with_context(|| format!("failed to read {}", strokes.display()))?;
            let strokes: Vec<MaskStroke> =
                serde_json::from_slice(&json).context("failed to parse strokes")?;

            let mut session = MaskSession::new(width, height)?;
            for stroke in &strokes {
                session.apply_stroke(stroke)?;
            }
            let mask = session.commit()?;
            photo_sheet::save_bytes(&mask.to_png()?, &output).await?;
            println!(
                "Mask with {} selected pixels → {}",
                mask.selected_count(),
                output.display()
            );
        }

        Commands::Blend {
            source,
            generated,
            intensity,
            output,
        } => {
            let source = photo_sheet::load_image(&source).await?;
            let generated = photo_sheet::load_image(&generated).await?;
            let blended = photo_sheet::blend_result(&source, &generated, intensity)?;
            let bytes = codec::encode(&blended, output_format(&output)?, EXPORT_JPEG_QUALITY)?;
            photo_sheet::save_bytes(&bytes, &output).await?;
            println!("Blended at {}% → {}", intensity, output.display());
        }

        Commands::Text {
            input,
            output,
            font,
            text,
            x,
            y,
            size,
            display_width,
            color,
            no_shadow,
        } => {
            let overlay = TextOverlay {
                text,
                x_percent: x,
                y_percent: y,
                font_size: size,
                display_width,
                color: photo_sheet::parse_hex_color(&color)?,
                shadow: !no_shadow,
            };
            let font = photo_sheet::load_font(&font)
                .await
                .with_context(|| format!("failed to load font {}", font.display()))?;
            let image = photo_sheet::load_image(&input).await?;
            let bytes = photo_sheet::render_text(&image, &overlay, &font)?;
            photo_sheet::save_bytes(&bytes, &output).await?;
            println!("Added text {:?} → {}", overlay.text, output.display());
        }

        Commands::Prepare { input, output } => {
            let bytes = tokio::fs::read(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;
            let prepared = photo_sheet::prepare_upload(&bytes)?;
            photo_sheet::save_bytes(&prepared.bytes, &output).await?;
            println!(
                "Prepared {}x{} → {}",
                prepared.width,
                prepared.height,
                output.display()
            );
        }
    }

    Ok(())
}

fn print_statistics(stats: &SheetStatistics, photo: PhotoSize) {
    println!("Sheet Statistics:");
    println!("  Photo: {}", photo.label());
    println!("  Paper: {}x{} px", stats.paper_px.0, stats.paper_px.1);
    println!("  Slot: {}x{} px", stats.slot_px.0, stats.slot_px.1);
    println!(
        "  Grid: {} x {} ({} slots)",
        stats.cols, stats.rows, stats.capacity
    );
    if stats.copies > 0 {
        println!("  Copies: {}", stats.copies);
        println!("  Empty slots: {}", stats.empty_slots);
        if stats.copies_per_subject.len() > 1 {
            println!("  Copies per photo: {:?}", stats.copies_per_subject);
        }
    }
    if stats.capacity == 0 {
        println!("  The photo does not fit on this paper");
    }
}

fn output_format(path: &Path) -> Result<ImageFormat> {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Ok(ImageFormat::default());
    };
    match ImageFormat::from_extension(ext) {
        Some(format) => Ok(format),
        None => bail!("unsupported output extension: {}", ext),
    }
}
