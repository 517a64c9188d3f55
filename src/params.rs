//! Output parameter validation and format mapping.

/// Portrait orientation used for every fashion shot unless overridden.
pub const DEFAULT_ASPECT_RATIO: &str = "3:4";

const GEMINI_ASPECT_RATIOS: [&str; 10] =
    ["1:1", "2:3", "3:2", "3:4", "4:3", "4:5", "5:4", "9:16", "16:9", "21:9"];

/// Validate that an aspect ratio is supported by Gemini image models.
///
/// # Errors
///
/// Returns an error if the ratio is not recognized.
pub fn validate_aspect_ratio(ratio: &str) -> Result<(), String> {
    if GEMINI_ASPECT_RATIOS.contains(&ratio) {
        Ok(())
    } else {
        Err(format!("Unsupported aspect ratio '{ratio}'. Valid: {GEMINI_ASPECT_RATIOS:?}"))
    }
}

/// File extension for an image MIME type. Unknown types save as PNG.
#[must_use]
pub fn mime_extension(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ratio_is_portrait() {
        assert!(validate_aspect_ratio(DEFAULT_ASPECT_RATIO).is_ok());
    }

    #[test]
    fn validate_aspect_ratio_valid() {
        assert!(validate_aspect_ratio("1:1").is_ok());
        assert!(validate_aspect_ratio("16:9").is_ok());
        assert!(validate_aspect_ratio("21:9").is_ok());
    }

    #[test]
    fn validate_aspect_ratio_invalid() {
        assert!(validate_aspect_ratio("100:200").is_err());
        assert!(validate_aspect_ratio("portrait").is_err());
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(mime_extension("image/png"), "png");
        assert_eq!(mime_extension("image/jpeg"), "jpg");
        assert_eq!(mime_extension("image/webp"), "webp");
        assert_eq!(mime_extension("application/octet-stream"), "png");
    }
}
