use gauss_iir_array::{blur_planes, BlurParams};
use gauss_iir_core::Shape;

use crate::error::IoError;

/// An image stored as one single precision plane per channel.
///
/// Each plane is stored row by row, so the plane shape is `[width, height]` with the
/// horizontal axis fastest. Values decoded from 8-bit files are in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarImage {
    width: usize,
    height: usize,
    channels: Vec<Vec<f32>>,
}

impl PlanarImage {
    /// Create a new planar image.
    ///
    /// # Arguments
    ///
    /// * `width` - The number of columns.
    /// * `height` - The number of rows.
    /// * `channels` - One plane of `width * height` values per channel.
    ///
    /// # Errors
    ///
    /// If there are no channels or a plane does not hold one value per pixel.
    pub fn new(width: usize, height: usize, channels: Vec<Vec<f32>>) -> Result<Self, IoError> {
        if channels.is_empty() {
            return Err(IoError::UnsupportedChannelCount(0));
        }

        if let Some(plane) = channels.iter().find(|c| c.len() != width * height) {
            return Err(IoError::InvalidChannelShape(plane.len(), width * height));
        }

        Ok(Self {
            width,
            height,
            channels,
        })
    }

    /// Create a planar image from interleaved 8-bit pixels.
    ///
    /// # Arguments
    ///
    /// * `width` - The number of columns.
    /// * `height` - The number of rows.
    /// * `num_channels` - The number of interleaved channels per pixel.
    /// * `pixels` - The interleaved pixel data, scaled to `[0, 1]`.
    pub fn from_interleaved_u8(
        width: usize,
        height: usize,
        num_channels: usize,
        pixels: &[u8],
    ) -> Result<Self, IoError> {
        if num_channels == 0 {
            return Err(IoError::UnsupportedChannelCount(0));
        }

        if pixels.len() != width * height * num_channels {
            return Err(IoError::InvalidChannelShape(
                pixels.len(),
                width * height * num_channels,
            ));
        }

        let channels = (0..num_channels)
            .map(|c| {
                pixels
                    .iter()
                    .skip(c)
                    .step_by(num_channels)
                    .map(|&v| v as f32 / 255.0)
                    .collect()
            })
            .collect();

        Self::new(width, height, channels)
    }

    /// Interleave the channels back into 8-bit pixels.
    ///
    /// Values are clamped to `[0, 1]` and rounded to the nearest 8-bit level.
    pub fn to_interleaved_u8(&self) -> Vec<u8> {
        let num_channels = self.channels.len();
        let mut pixels = vec![0u8; self.width * self.height * num_channels];
        for (c, plane) in self.channels.iter().enumerate() {
            pixels
                .iter_mut()
                .skip(c)
                .step_by(num_channels)
                .zip(plane.iter())
                .for_each(|(dst, &v)| *dst = (v.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        pixels
    }

    /// The number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// The plane of the given channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(|c| c.as_slice())
    }

    /// Blur every channel in place with the same parameters.
    ///
    /// # Arguments
    ///
    /// * `params` - The blur parameters.
    pub fn blur(&mut self, params: &BlurParams) -> Result<(), IoError> {
        if self.width * self.height == 0 {
            return Ok(());
        }

        let shape =
            Shape::new(&[self.width, self.height]).map_err(gauss_iir_array::ArrayError::from)?;
        for plane in self.channels.iter_mut() {
            blur_planes(plane, &shape, params)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_roundtrip_u8() -> Result<(), IoError> {
        let pixels = [0u8, 128, 255, 10, 20, 30];
        let image = PlanarImage::from_interleaved_u8(2, 1, 3, &pixels)?;

        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.channel(0), Some(&[0.0, 10.0 / 255.0][..]));
        assert_eq!(image.channel(2), Some(&[1.0, 30.0 / 255.0][..]));
        assert_eq!(image.to_interleaved_u8(), pixels.to_vec());
        Ok(())
    }

    #[test]
    fn test_planar_clamps() -> Result<(), IoError> {
        let image = PlanarImage::new(3, 1, vec![vec![-0.5, 0.5, 1.5]])?;
        assert_eq!(image.to_interleaved_u8(), vec![0, 128, 255]);
        Ok(())
    }

    #[test]
    fn test_planar_invalid() {
        assert!(matches!(
            PlanarImage::new(2, 2, vec![vec![0.0; 4], vec![0.0; 3]]),
            Err(IoError::InvalidChannelShape(3, 4))
        ));
        assert!(matches!(
            PlanarImage::new(2, 2, vec![]),
            Err(IoError::UnsupportedChannelCount(0))
        ));
        assert!(matches!(
            PlanarImage::from_interleaved_u8(2, 2, 3, &[0u8; 11]),
            Err(IoError::InvalidChannelShape(11, 12))
        ));
    }

    #[test]
    fn test_planar_blur_channels() -> Result<(), Box<dyn std::error::Error>> {
        let (width, height) = (9, 7);
        let mut red = vec![0.0f32; width * height];
        red[3 * width + 4] = 1.0;
        let green = vec![0.25f32; width * height];

        let mut image = PlanarImage::new(width, height, vec![red.clone(), green])?;
        image.blur(&BlurParams::new(1.5, 3)?)?;

        let mut expected = red;
        gauss_iir_core::blur(&mut expected, &Shape::new(&[width, height])?, 1.5, 3)?;
        assert_eq!(image.channel(0), Some(expected.as_slice()));

        for v in image.channel(1).unwrap_or_default() {
            approx::assert_relative_eq!(*v, 0.25, max_relative = 1e-4);
        }
        Ok(())
    }
}
