use thiserror::Error;

/// 5 MB upload limit for item images and avatars
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Please choose an image file.")]
    NotAnImage,
    #[error("Image must be under 5MB.")]
    TooLarge,
    #[error("Image is empty.")]
    Empty,
}

/// Validate an upload before it reaches the object store.
/// Returns the file extension to store the object under.
pub fn validate_image(content_type: Option<&str>, len: usize) -> Result<&'static str, ImageError> {
    let mime = content_type
        .map(|ct| ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/"))
        .ok_or(ImageError::NotAnImage)?;

    if len == 0 {
        return Err(ImageError::Empty);
    }
    if len > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge);
    }

    Ok(extension_for(&mime))
}

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        _ => "jpg",
    }
}
