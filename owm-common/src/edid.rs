//! Editor ID generation
//!
//! Generated editor IDs must survive the Creation Kit, which appends
//! `DUPLICATE000` (12 chars) to IDs it considers clashing. The engine limit is
//! 99, so generated IDs are capped at 87.

use sha2::{Digest, Sha256};

use crate::FormKey;

/// Maximum length of a generated editor ID
pub const MAX_EDITOR_ID_LENGTH: usize = 87;

/// Clean a string for use as an editor ID
///
/// Strips everything outside `[A-Za-z0-9_-]`. Results longer than
/// [`MAX_EDITOR_ID_LENGTH`] are cut and suffixed with `_` plus the hex hash of
/// the full cleaned string, so distinct long inputs stay distinct.
pub fn to_edid(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if cleaned.len() <= MAX_EDITOR_ID_LENGTH {
        return cleaned;
    }

    let hash = format!("{:X}", string_hash(&cleaned));
    let keep = MAX_EDITOR_ID_LENGTH - hash.len() - 1;

    // cleaned is pure ASCII, byte slicing is char slicing
    format!("{}_{}", &cleaned[..keep], hash)
}

/// Stable 32-bit hash of a string (leading bytes of its SHA-256)
pub fn string_hash(input: &str) -> u32 {
    let digest = Sha256::digest(input.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Stand-in label for a record that has no editor ID of its own
pub fn fallback_label(key: &FormKey) -> String {
    format!("{:X}", string_hash(&key.to_string()))
}
