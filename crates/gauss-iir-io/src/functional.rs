use std::{fs::File, io::BufWriter, path::Path};

use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageBuffer};
use log::debug;

use crate::{error::IoError, planar::PlanarImage};

/// The JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Reads an image from the given file path into single precision planes.
///
/// The format is guessed from the file content. Grayscale images give one plane, color
/// images give three and an alpha channel adds one more. Values are scaled to `[0, 1]`.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// The decoded planar image.
pub fn read_image_planar(file_path: impl AsRef<Path>) -> Result<PlanarImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let (width, height) = (img.width() as usize, img.height() as usize);
    let color = img.color();

    let image = match (color.has_color(), color.has_alpha()) {
        (false, false) => PlanarImage::from_interleaved_u8(width, height, 1, &img.into_luma8()),
        (false, true) => {
            PlanarImage::from_interleaved_u8(width, height, 2, &img.into_luma_alpha8())
        }
        (true, false) => PlanarImage::from_interleaved_u8(width, height, 3, &img.into_rgb8()),
        (true, true) => PlanarImage::from_interleaved_u8(width, height, 4, &img.into_rgba8()),
    }?;

    debug!(
        "read {} ({}x{}, {} channel(s), {:?})",
        file_path.display(),
        width,
        height,
        image.num_channels(),
        color
    );

    Ok(image)
}

/// Writes a planar image to the given file path.
///
/// The format is picked from the file extension. JPEG files are encoded with the given
/// quality and lose their alpha channel; other formats ignore the quality.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `image` - The planar image, with values in `[0, 1]`.
/// * `quality` - The JPEG quality, from 1 to 100.
pub fn write_image_planar(
    file_path: impl AsRef<Path>,
    image: &PlanarImage,
    quality: u8,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    if !(1..=100).contains(&quality) {
        return Err(IoError::InvalidJpegQuality(quality));
    }

    let (width, height) = (image.width() as u32, image.height() as u32);
    let pixels = image.to_interleaved_u8();
    let shape_error = IoError::InvalidChannelShape(
        pixels.len(),
        image.width() * image.height() * image.num_channels(),
    );

    let img = match image.num_channels() {
        1 => ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
        2 => ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageLumaA8),
        3 => ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
        4 => ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8),
        n => return Err(IoError::UnsupportedChannelCount(n)),
    }
    .ok_or(shape_error)?;

    let is_jpeg = file_path.extension().is_some_and(|ext| {
        ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
    });

    if is_jpeg {
        let img = match img {
            DynamicImage::ImageLumaA8(_) => DynamicImage::ImageLuma8(img.to_luma8()),
            DynamicImage::ImageRgba8(_) => DynamicImage::ImageRgb8(img.to_rgb8()),
            img => img,
        };
        let writer = BufWriter::new(File::create(file_path)?);
        img.write_with_encoder(JpegEncoder::new_with_quality(writer, quality))?;
    } else {
        img.save(file_path)?;
    }

    debug!(
        "wrote {} ({}x{}, {} channel(s))",
        file_path.display(),
        width,
        height,
        image.num_channels()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Vec<f32> {
        (0..width * height)
            .map(|i| ((i % width) * 255 / (width - 1)) as f32 / 255.0)
            .collect()
    }

    #[test]
    fn read_write_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let (width, height) = (16, 8);
        let plane = gradient(width, height);
        let image = PlanarImage::new(
            width,
            height,
            vec![plane.clone(), plane.iter().map(|v| 1.0 - v).collect(), plane],
        )?;

        write_image_planar(&file_path, &image, DEFAULT_JPEG_QUALITY)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_planar(&file_path)?;
        assert_eq!(image_back.num_channels(), 3);
        assert_eq!(image_back.to_interleaved_u8(), image.to_interleaved_u8());
        assert_eq!(image_back.channel(0), image.channel(0));
        Ok(())
    }

    #[test]
    fn read_write_grayscale_bmp() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.bmp");

        let image = PlanarImage::new(4, 3, vec![gradient(4, 3)])?;
        write_image_planar(&file_path, &image, DEFAULT_JPEG_QUALITY)?;

        let image_back = read_image_planar(&file_path)?;
        assert_eq!(image_back.width(), 4);
        assert_eq!(image_back.height(), 3);
        assert_eq!(image_back.channel(0), image.channel(0));
        Ok(())
    }

    #[test]
    fn write_jpeg_drops_alpha() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("flat.jpg");

        let image = PlanarImage::new(8, 8, vec![vec![0.5; 64]; 4])?;
        write_image_planar(&file_path, &image, 90)?;

        let image_back = read_image_planar(&file_path)?;
        assert_eq!(image_back.num_channels(), 3);
        for v in image_back.channel(0).unwrap_or_default() {
            approx::assert_abs_diff_eq!(*v, 0.5, epsilon = 0.02);
        }
        Ok(())
    }

    #[test]
    fn invalid_quality() -> Result<(), IoError> {
        let image = PlanarImage::new(2, 2, vec![vec![0.0; 4]])?;
        for quality in [0, 101] {
            assert!(matches!(
                write_image_planar("unused.jpg", &image, quality),
                Err(IoError::InvalidJpegQuality(q)) if q == quality
            ));
        }
        Ok(())
    }

    #[test]
    fn unsupported_channels() -> Result<(), IoError> {
        let image = PlanarImage::new(2, 2, vec![vec![0.0; 4]; 5])?;
        assert!(matches!(
            write_image_planar("unused.png", &image, DEFAULT_JPEG_QUALITY),
            Err(IoError::UnsupportedChannelCount(5))
        ));
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        assert!(matches!(
            read_image_planar("does/not/exist.png"),
            Err(IoError::FileDoesNotExist(_))
        ));
    }
}
