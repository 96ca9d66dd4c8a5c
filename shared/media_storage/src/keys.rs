//! Object key derivation for originals and their resized variants
//!
//! Keys are derived once, at grant issuance time, and flow unchanged through
//! the rest of the pipeline: the key of an original is the identity of all
//! records and variants produced from it.

use chrono::Utc;
use mime::Mime;
use uuid::Uuid;

/// Derives the storage key for a new original upload.
///
/// Keys have the shape `<YYYY-MM-DD>/<uuid>.<extension>` where the date
/// partition is the UTC calendar day of issuance. The random identifier makes
/// key collisions negligible, so grants are issued without checking the
/// bucket first.
#[must_use]
pub fn source_key(extension: &str) -> String {
    let date = Utc::now().format("%Y-%m-%d");
    format!("{date}/{}.{extension}", Uuid::new_v4())
}

/// Derives the storage key for one resized variant of an original.
///
/// Variant keys prefix the full source key with the target width:
/// `<width>/<source_key>`. Deriving the same width for the same source key
/// always yields the same variant key, which makes reprocessing overwrite
/// variants in place instead of accumulating copies.
#[must_use]
pub fn variant_key(width: u32, source_key: &str) -> String {
    format!("{width}/{source_key}")
}

/// File extension for a requested content type.
///
/// The extension is the MIME subtype, lower-cased, or `jpg` when the subtype
/// is absent or empty. The content type itself is not validated; callers that
/// send an arbitrary string get an arbitrary extension back.
#[must_use]
pub fn extension_for(content_type: &str) -> String {
    content_type
        .split('/')
        .nth(1)
        .filter(|subtype| !subtype.is_empty())
        .unwrap_or("jpg")
        .to_lowercase()
}

/// Guesses the content type of a stored object from its key.
///
/// Keys ending in `.png` are PNG, everything else is assumed JPEG. Object
/// bytes are never inspected.
#[must_use]
pub fn guess_content_type(key: &str) -> Mime {
    if key.ends_with(".png") {
        mime::IMAGE_PNG
    } else {
        mime::IMAGE_JPEG
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn source_key_is_partitioned_by_utc_date() {
        let key = source_key("png");

        let (date, file_name) = key.split_once('/').expect("key has a date partition");
        assert_eq!(date, Utc::now().format("%Y-%m-%d").to_string());

        let (id, extension) = file_name.split_once('.').expect("file name has an extension");
        assert!(Uuid::parse_str(id).is_ok(), "file stem is a uuid: {id}");
        assert_eq!(extension, "png");
    }

    #[test]
    fn source_keys_are_unique_per_call() {
        assert_ne!(source_key("jpg"), source_key("jpg"));
    }

    #[test]
    fn variant_key_prefixes_the_full_source_key_with_width() {
        assert_eq!(
            variant_key(200, "2026-08-23/0a1b2c3d.jpg"),
            "200/2026-08-23/0a1b2c3d.jpg"
        );
        assert_eq!(
            variant_key(800, "2026-08-23/0a1b2c3d.jpg"),
            "800/2026-08-23/0a1b2c3d.jpg"
        );
    }

    #[test]
    fn extension_is_the_lowercased_mime_subtype() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/JPEG"), "jpeg");
        assert_eq!(extension_for("image/svg+xml"), "svg+xml");
    }

    #[test]
    fn extension_defaults_to_jpg_when_subtype_is_missing() {
        assert_eq!(extension_for("image/"), "jpg");
        assert_eq!(extension_for("not-a-mime"), "jpg");
        assert_eq!(extension_for(""), "jpg");
    }

    #[test]
    fn content_type_guess_only_recognizes_png() {
        assert_eq!(guess_content_type("2026-08-23/a.png"), mime::IMAGE_PNG);
        assert_eq!(guess_content_type("2026-08-23/a.jpg"), mime::IMAGE_JPEG);
        assert_eq!(guess_content_type("2026-08-23/a.webp"), mime::IMAGE_JPEG);
        assert_eq!(guess_content_type("no-extension"), mime::IMAGE_JPEG);
    }
}
