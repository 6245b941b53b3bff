use std::fmt;

use rand::Rng;

use crate::error::IngestError;

const MAX_LEN: usize = 64;
const RANDOM_LEN: usize = 6;
const RANDOM_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// The infix used by snapshot directories; user slugs must never contain it
/// or a chosen slug could shadow (or be shadowed by) a backup.
const RESERVED_BACKUP_INFIX: &str = "_backup_";

/// A validated artifact identifier.
///
/// A slug is a single safe path segment: 1-64 ASCII letters, digits, `-`
/// or `_`. That rules out empty names, separators, `..`, hidden dotfiles,
/// and the reserved backup infix, so a slug can always be joined onto the
/// storage root without further checks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn parse(raw: &str) -> Result<Self, IngestError> {
        let invalid = |reason| IngestError::InvalidSlug {
            slug: raw.to_owned(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if raw.len() > MAX_LEN {
            return Err(invalid("longer than 64 bytes"));
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(invalid(
                "may only contain ASCII letters, digits, '-' and '_'",
            ));
        }
        if raw.contains(RESERVED_BACKUP_INFIX) {
            return Err(invalid("collides with the backup namespace"));
        }

        Ok(Self(raw.to_owned()))
    }

    /// A fresh six-character lowercase-alphanumeric slug.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let slug = (0..RANDOM_LEN)
            .map(|_| RANDOM_ALPHABET[rng.gen_range(0..RANDOM_ALPHABET.len())] as char)
            .collect();
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
