//! Variant rendering: decode once, resize and re-encode per target width
//!
//! The renderer never touches the network; it maps an in-memory original to
//! an in-memory encoded variant. The output format mirrors the content type
//! guessed from the object key, so PNG originals stay PNG and everything else
//! becomes JPEG.

use std::io::Cursor;

use bytes::Bytes;
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat, ImageReader};
use mime::Mime;

/// Decodes an original image buffer, sniffing the format from the bytes.
///
/// # Errors
///
/// Returns an `ImageError` when the bytes are not a supported image format
/// or are corrupt.
pub fn decode(data: &[u8]) -> Result<DynamicImage, image::ImageError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?
        .decode()
}

/// Output encoding for a guessed content type: PNG stays PNG, else JPEG
#[must_use]
pub fn target_format(content_type: &Mime) -> ImageFormat {
    if *content_type == mime::IMAGE_PNG {
        ImageFormat::Png
    } else {
        ImageFormat::Jpeg
    }
}

/// Renders one variant of a decoded image at the given target width.
///
/// Height is derived from the source aspect ratio; widths larger than the
/// source upscale. JPEG output is flattened to RGB8 first, since JPEG has no
/// alpha channel.
///
/// # Errors
///
/// Returns an `ImageError` when encoding the resized image fails.
pub fn render(
    image: &DynamicImage,
    target_width: u32,
    format: ImageFormat,
) -> Result<Bytes, image::ImageError> {
    let (orig_width, orig_height) = image.dimensions();
    let target_height = scaled_height(orig_width, orig_height, target_width);
    let filter = select_filter(orig_width, orig_height, target_width, target_height);

    let resized = image.resize_exact(target_width, target_height, filter);
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        _ => resized,
    };

    let mut buffer = Vec::with_capacity(estimated_rgb_size(target_width, target_height));
    resized.write_to(&mut Cursor::new(&mut buffer), format)?;

    Ok(Bytes::from(buffer))
}

/// Uncompressed RGB byte count, computed in usize so large dimensions
/// cannot overflow
const fn estimated_rgb_size(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(3)
}

/// Height preserving the source aspect ratio for a target width, never zero
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scaled_height(orig_width: u32, orig_height: u32, target_width: u32) -> u32 {
    let aspect_ratio = orig_height as f32 / orig_width as f32;
    let height = (target_width as f32 * aspect_ratio).round() as u32;
    height.max(1)
}

/// Resampling filter by downscale ratio: cheaper filters for heavier shrinks
#[allow(clippy::cast_precision_loss)]
fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}
