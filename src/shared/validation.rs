use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for item image paths
    /// Either a site-relative static asset path or an http(s) URL
    /// - Valid: "/images/drinks/latte.jpg", "https://x.supabase.co/storage/v1/object/public/items/menu-images/a.jpg"
    /// - Invalid: "images/latte.jpg", "ftp://host/a.jpg", "javascript:alert(1)"
    pub static ref IMAGE_PATH_REGEX: Regex = Regex::new(r"^(/[^/\s]|https?://\S+$)").unwrap();
}

/// `true` when nothing but whitespace is left
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validator hook: empty paths are allowed, anything else must match `IMAGE_PATH_REGEX`
pub fn validate_image_path(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || IMAGE_PATH_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("image_path")
            .with_message("image_path must be a /relative path or an http(s) URL".into()))
    }
}
