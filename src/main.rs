use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use fruitspot::vision::color_detector::ColorBlobParams;
use fruitspot::vision::ripeness::RipenessParams;
use fruitspot::{FruitPipeline, VisionContext};

#[derive(Parser)]
#[command(name = "fruitspot")]
#[command(about = "Detect and classify fruit in photos")]
struct Cli {
    /// Path to input image file (omit to launch the interactive window)
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// Object category to look for
    #[arg(long, default_value = "apple")]
    target_label: String,

    /// Minimum detection confidence
    #[arg(long, default_value_t = 0.5)]
    threshold: f32,

    /// Save the annotated image to this path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Smallest detected region kept, in pixels
    #[arg(long, default_value_t = 400)]
    min_region: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let Some(image_path) = args.image_path else {
        #[cfg(feature = "gui")]
        return fruitspot::gui::run().map_err(|e| anyhow::anyhow!("GUI error: {e}"));
        #[cfg(not(feature = "gui"))]
        anyhow::bail!("No image given, and this build has no GUI feature");
    };

    if args.verbose {
        println!("Loading image: {:?}", image_path);
    }

    let img = ImageReader::open(&image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;

    if args.verbose {
        println!("Image loaded: {}x{}\n", img.width(), img.height());
    }

    let detector_params = ColorBlobParams {
        min_region_area: args.min_region,
        ..Default::default()
    };
    let ctx = VisionContext::initialize(detector_params, RipenessParams::default(), args.verbose);

    let pipeline = FruitPipeline::new()
        .with_target_label(args.target_label)
        .with_score_threshold(args.threshold)
        .with_verbose(args.verbose);

    let outcome = pipeline.process(&ctx, Some(&img));

    println!("{}", outcome.summary);

    if let (Some(annotated), Some(path)) = (&outcome.image, &args.output) {
        annotated
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;
        if args.verbose {
            println!("Annotated image saved to {:?}", path);
        }
    }

    Ok(())
}
