//! Content-derived identifiers.
//!
//! Ids are part of the output contract: downstream graph databases merge on
//! them, so the hash, its truncation and the text normalization must not
//! change.

use md5::{Digest, Md5};

/// Hex digits of the digest kept in an id
const ID_HASH_LEN: usize = 16;

/// Trim, lowercase and collapse internal whitespace to single spaces.
pub fn normalize_text(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic node id: `<class>_<first 16 hex digits of md5("<class>:<normalized text>")>`.
pub fn node_id(class: &str, text: &str) -> String {
    let digest = Md5::digest(format!("{class}:{}", normalize_text(text)).as_bytes());
    let hex = format!("{digest:x}");
    format!("{class}_{}", &hex[..ID_HASH_LEN])
}

/// Graph label for an entity class.
pub fn class_to_label(class: &str) -> String {
    class.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Romeo \t and\n  JULIET "), "romeo and juliet");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_id_ignores_case_and_spacing() {
        assert_eq!(node_id("character", "Romeo"), node_id("character", "  romeo  "));
        assert_ne!(node_id("character", "Romeo"), node_id("emotion", "Romeo"));
    }

    #[test]
    fn test_id_shape_is_stable() {
        // md5("character:romeo")
        let id = node_id("character", "ROMEO");
        assert_eq!(id, "character_61aa0578f43d4b18");
        assert_eq!(id.len(), "character_".len() + 16);
    }

    #[test]
    fn test_class_to_label() {
        assert_eq!(class_to_label(" character "), "CHARACTER");
    }
}
