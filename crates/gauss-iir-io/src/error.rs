/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode or encode the image.
    #[error("Failed to decode or encode the image. {0}")]
    ImageCodecError(#[from] image::ImageError),

    /// Error when the JPEG quality is out of range.
    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidJpegQuality(u8),

    /// Error when the number of channels cannot be encoded.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannelCount(usize),

    /// Error when a channel does not hold one value per pixel.
    #[error("Channel length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error to blur the channels.
    #[error("Failed to blur the image. {0}")]
    BlurError(#[from] gauss_iir_array::ArrayError),
}
