use crate::FormatError;

/// Verify that `segment` is acceptable as a single tree entry name, and so
/// is safe to create beneath a checkout directory.
///
/// Rejects empty names, names containing `/` or NUL, the reserved names `.`
/// and `..`, and any spelling of `.git` that some file system would treat as
/// the real thing (any case, the Windows short name `git~1`, or HFS+ variants
/// padded with ignorable Unicode characters).
pub fn check_segment(segment: &[u8]) -> Result<(), FormatError> {
    let invalid = segment.is_empty()
        || segment.contains(&b'/')
        || segment.contains(&0)
        || segment == b"."
        || segment == b".."
        || segment.eq_ignore_ascii_case(b".git")
        || segment.eq_ignore_ascii_case(b"git~1")
        || match_mac_hfs_path(segment, b".git");

    if invalid {
        Err(FormatError::InvalidPathSegment(
            String::from_utf8_lossy(segment).into_owned(),
        ))
    } else {
        Ok(())
    }
}

// HFS+ ignores these code points when comparing names, and also folds case.
fn ignorable_prefix(segment: &[u8]) -> bool {
    match segment {
        // U+200C..U+200F: ZERO WIDTH NON-JOINER, ZERO WIDTH JOINER,
        // LEFT-TO-RIGHT MARK, RIGHT-TO-LEFT MARK
        [0xE2, 0x80, 0x8C..=0x8F, ..] => true,

        // U+202A..U+202E: directional embeddings and overrides
        [0xE2, 0x80, 0xAA..=0xAE, ..] => true,

        // U+206A..U+206F: deprecated format characters
        [0xE2, 0x81, 0xAA..=0xAF, ..] => true,

        // U+FEFF BYTE ORDER MARK
        [0xEF, 0xBB, 0xBF, ..] => true,

        _ => false,
    }
}

fn match_mac_hfs_path(mut segment: &[u8], mut m: &[u8]) -> bool {
    loop {
        if ignorable_prefix(segment) {
            segment = &segment[3..];
            continue;
        }

        match (segment.first(), m.first()) {
            (None, None) => return true,
            (Some(s), Some(c)) if s.eq_ignore_ascii_case(c) => {
                segment = &segment[1..];
                m = &m[1..];
            }
            _ => return false,
        }
    }
}
