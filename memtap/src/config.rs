//! Shared target-length configuration.
//!
//! The target sample length is the one piece of mutable state that outlives
//! individual sampling sessions. It is held behind a cheap cloneable handle,
//! [`crate::config::TargetLength`], that the trigger front-end and any other
//! owner can share. Updates are single atomic writes; a session reads the
//! value once at start time and is not affected by later changes.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::{Error, Result};

/// The default target sample length in bytes.
pub const DEFAULT_TARGET_LEN: usize = 16;

/// Textual updates are clamped to this many leading bytes.
const MAX_DIGITS: usize = 10;

/// Shared, mutable target sample length.
///
/// Clones share the same underlying value. The length is always at least 1;
/// writes of zero are rejected and leave the previous value in place.
///
/// # Examples
///
/// ```rust
/// use memtap::TargetLength;
///
/// let target = TargetLength::default();
/// assert_eq!(target.get(), 16);
///
/// let consumed = target.set_from_text(b"32\n")?;
/// assert_eq!(consumed, 3);
/// assert_eq!(target.get(), 32);
///
/// assert!(target.set_from_text(b"0").is_err());
/// assert_eq!(target.get(), 32);
/// # Ok::<(), memtap::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TargetLength {
    value: Arc<AtomicUsize>,
}

impl Default for TargetLength {
    fn default() -> TargetLength {
        TargetLength {
            value: Arc::new(AtomicUsize::new(DEFAULT_TARGET_LEN)),
        }
    }
}

impl TargetLength {
    /// Create a handle holding `len`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if `len` is zero.
    pub fn new(len: usize) -> Result<TargetLength> {
        if len == 0 {
            return Err(Error::InvalidConfig);
        }

        Ok(TargetLength {
            value: Arc::new(AtomicUsize::new(len)),
        })
    }

    /// The current target length.
    pub fn get(&self) -> usize {
        self.value.load(Ordering::Relaxed)
    }

    /// Store a new target length.
    ///
    /// Visible to the next session start; an in-flight session keeps the
    /// length it read at start time.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if `len` is zero. The
    /// previous value is left unchanged.
    pub fn set(&self, len: usize) -> Result<()> {
        if len == 0 {
            return Err(Error::InvalidConfig);
        }

        self.value.store(len, Ordering::Relaxed);
        Ok(())
    }

    /// Parse a textual update and store the new target length.
    ///
    /// At most the first ten bytes of `input` are considered, mirroring the
    /// classic fixed-size configuration write. The text must be a base-10
    /// unsigned 32-bit integer; a single trailing newline is tolerated. On
    /// success the full input length is echoed back as the number of bytes
    /// consumed.
    ///
    /// # Errors
    /// - [`crate::Error::ParseError`] if the text is not valid UTF-8 or not
    ///   a base-10 integer in range.
    /// - [`crate::Error::InvalidConfig`] if the parsed value is zero.
    ///
    /// The previous value is left unchanged on any error.
    pub fn set_from_text(&self, input: &[u8]) -> Result<usize> {
        let window = &input[..input.len().min(MAX_DIGITS)];

        let text = std::str::from_utf8(window)
            .map_err(|_| Error::ParseError("input is not valid UTF-8".to_string()))?;
        let text = text.strip_suffix('\n').unwrap_or(text);

        let value = text
            .parse::<u32>()
            .map_err(|error| Error::ParseError(format!("'{text}': {error}")))?;

        self.set(value as usize)?;
        Ok(input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sixteen() {
        assert_eq!(TargetLength::default().get(), DEFAULT_TARGET_LEN);
    }

    #[test]
    fn zero_writes_are_rejected_without_mutation() {
        let target = TargetLength::new(24).unwrap();

        assert!(matches!(target.set(0), Err(Error::InvalidConfig)));
        assert!(matches!(
            target.set_from_text(b"0"),
            Err(Error::InvalidConfig)
        ));
        assert_eq!(target.get(), 24);

        assert!(matches!(TargetLength::new(0), Err(Error::InvalidConfig)));
    }

    #[test]
    fn textual_updates_parse_and_echo_consumed_bytes() {
        let target = TargetLength::default();

        assert_eq!(target.set_from_text(b"32").unwrap(), 2);
        assert_eq!(target.get(), 32);

        assert_eq!(target.set_from_text(b"128\n").unwrap(), 4);
        assert_eq!(target.get(), 128);
    }

    #[test]
    fn malformed_text_is_rejected_without_mutation() {
        let target = TargetLength::default();

        assert!(matches!(
            target.set_from_text(b"abc"),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            target.set_from_text(b""),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            target.set_from_text(&[0xFF, 0xFE]),
            Err(Error::ParseError(_))
        ));
        assert_eq!(target.get(), DEFAULT_TARGET_LEN);
    }

    #[test]
    fn only_the_first_ten_bytes_are_considered() {
        let target = TargetLength::default();

        // Thirteen digits, but the parsed window is the first ten.
        assert_eq!(target.set_from_text(b"1234567890123").unwrap(), 13);
        assert_eq!(target.get(), 1_234_567_890);

        // Ten nines overflow a u32 and are rejected.
        assert!(matches!(
            target.set_from_text(b"99999999999"),
            Err(Error::ParseError(_))
        ));
        assert_eq!(target.get(), 1_234_567_890);
    }

    #[test]
    fn clones_share_state() {
        let target = TargetLength::default();
        let alias = target.clone();

        target.set(64).unwrap();
        assert_eq!(alias.get(), 64);
    }
}
