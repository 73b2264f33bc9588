//! Uploaded image rules.

use crate::validation::validate_choice;

pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

pub const UPLOAD_PAGE_SIZES: &[i64] = &[10, 20, 50, 100];
pub const DEFAULT_UPLOAD_PAGE_SIZE: i64 = 20;

/// Storage folder for admin uploads.
pub const UPLOAD_FOLDER: &str = "uploads";

pub const MAX_TITLE_LENGTH: usize = 255;

/// Lowercased extension of `file_name`, if it has one.
pub fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn validate_image_file_name(file_name: &str) -> Result<String, String> {
    let ext = extension(file_name)
        .ok_or_else(|| "Upload a valid image file with an extension.".to_string())?;
    validate_choice(&ext, ALLOWED_IMAGE_EXTENSIONS, "image type")?;
    Ok(ext)
}

/// Collision-free stored name that keeps the original extension.
pub fn stored_file_name(ext: &str) -> String {
    format!("{}.{ext}", uuid::Uuid::now_v7().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("Front View.JPG"), Some("jpg".to_string()));
        assert_eq!(extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension(".hidden"), None);
    }

    #[test]
    fn only_image_types_pass() {
        assert_eq!(validate_image_file_name("hero.webp"), Ok("webp".to_string()));
        assert!(validate_image_file_name("brochure.pdf").is_err());
        assert!(validate_image_file_name("image").is_err());
    }

    #[test]
    fn stored_name_keeps_extension() {
        let name = stored_file_name("png");
        assert!(name.ends_with(".png"));
        assert_ne!(name, stored_file_name("png"));
    }
}
