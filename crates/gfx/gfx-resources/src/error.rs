//! Resource errors

use crate::bitmap::BitmapFormat;

/// Why a resource could not be resolved or decoded.
///
/// These never abort a test run: the loader logs them and reports the image
/// as absent, and the assertion layer turns that into a failed test.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// No asset with this name exists in the store
    #[error("no asset named \"{0}\"")]
    UnknownAsset(String),

    /// Asset names are plain file names; separators and `..` are rejected
    #[error("invalid asset name \"{0}\"")]
    InvalidName(String),

    /// No name is currently mapped to this resource id
    #[error("resource id {0} is not mapped")]
    Unmapped(u32),

    /// The asset exists but could not be read
    #[error("could not read asset \"{name}\"")]
    Io {
        /// Asset name
        name: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The asset bytes are not a decodable image
    #[error("could not decode asset \"{name}\"")]
    Decode {
        /// Asset name
        name: String,
        /// Underlying codec failure
        #[source]
        source: image::ImageError,
    },

    /// The image has more distinct colors than the palette format can index
    #[error("{colors} distinct colors do not fit a {format} palette")]
    TooManyColors {
        /// Distinct colors found in the image
        colors: usize,
        /// Requested format
        format: BitmapFormat,
    },

    /// The image is wider or taller than screen coordinates can address
    #[error("image of {width}x{height} exceeds the addressable size")]
    TooLarge {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },
}
