use argh::FromArgs;
use std::{path::PathBuf, time::Instant};

use gauss_iir::array::BlurParams;
use gauss_iir::io::functional as F;

#[derive(FromArgs)]
/// Blur an image with a recursive Gaussian filter
struct Args {
    /// the standard deviation of the Gaussian, in pixels
    #[argh(option, short = 's', default = "10.0")]
    sigma: f64,

    /// the number of recursive filter passes per axis
    #[argh(option, short = 'n', default = "3")]
    numsteps: i64,

    /// the JPEG quality when writing a JPEG file, from 1 to 100
    #[argh(option, short = 'q', default = "F::DEFAULT_JPEG_QUALITY")]
    quality: u8,

    /// path to an input image
    #[argh(positional)]
    input: PathBuf,

    /// path to the output image
    #[argh(positional, default = "PathBuf::from(\"out.bmp\")")]
    output: PathBuf,
}

/// Validate the blur flags, `None` when sigma is zero in single precision.
fn blur_params(
    sigma: f64,
    numsteps: i64,
) -> Result<Option<BlurParams>, Box<dyn std::error::Error>> {
    // sigma is checked in single precision
    let sigma_f32 = sigma as f32;
    if sigma_f32 < 0.0 {
        return Err("sigma must be nonnegative".into());
    }

    if numsteps <= 0 {
        return Err("numsteps must be positive".into());
    }

    if sigma_f32 > 0.0 {
        Ok(Some(BlurParams::new(sigma, numsteps)?))
    } else {
        Ok(None)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let params = blur_params(args.sigma, args.numsteps)?;

    if !(1..=100).contains(&args.quality) {
        return Err("quality must be between 1 and 100".into());
    }

    // read the image as float planes in [0, 1]
    let mut image = F::read_image_planar(&args.input)?;
    log::info!(
        "read {} ({}x{}, {} channel(s))",
        args.input.display(),
        image.width(),
        image.height(),
        image.num_channels()
    );

    // a zero sigma leaves the image untouched
    if let Some(params) = params {
        log::info!(
            "applying Gaussian blur with sigma = {}, numsteps = {}",
            params.sigma(),
            params.numsteps()
        );

        let start = Instant::now();
        image.blur(&params)?;
        log::info!("blur took {:.3} ms", start.elapsed().as_secs_f64() * 1e3);
    }

    F::write_image_planar(&args.output, &image, args.quality)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
