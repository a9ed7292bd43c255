use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while configuring the
/// sampler, drawing entropy, and extracting bytes from a host address space. Each variant
/// provides specific context about the failure mode to enable appropriate error handling.
///
/// # Error Categories
///
/// ## Entropy Errors
/// - [`Error::EntropyUnavailable`] - The generator could not be allocated or seeded
///
/// ## Extraction Errors
/// - [`Error::ReadFault`] - A raw memory read was denied by the host
/// - [`Error::Underfilled`] - The pass budget ran out before the buffer filled
/// - [`Error::BufferFull`] - Internal assertion, append after completion
///
/// ## Configuration Errors
/// - [`Error::InvalidConfig`] - A zero or otherwise unusable configuration value
/// - [`Error::ParseError`] - Malformed textual configuration input
/// - [`Error::InvalidArgument`] - A caller-supplied buffer was too small
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Error`] - Miscellaneous failures
///
/// ## Synchronization Errors
/// - [`Error::LockError`] - Thread synchronization failure
///
/// # Examples
///
/// ```rust
/// use memtap::{Error, TargetLength};
///
/// let target = TargetLength::default();
/// match target.set_from_text(b"0") {
///     Err(Error::InvalidConfig) => {} // zero is rejected, state unchanged
///     other => panic!("unexpected result: {:?}", other),
/// }
/// assert_eq!(target.get(), 16);
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The entropy generator could not be allocated, seeded, or drawn from.
    ///
    /// This error is fatal at startup. Nothing in the engine can operate without
    /// a working generator, so callers should treat it as unrecoverable rather
    /// than retrying. It is also returned for draws attempted before the
    /// generator has been seeded.
    #[error("Entropy source unavailable - {0}")]
    EntropyUnavailable(String),

    /// A raw memory read was denied or failed at the host boundary.
    ///
    /// Reading at an arbitrary address is inherently fallible from the engine's
    /// perspective. The host capability decides what an address means and may
    /// refuse any given access. The in-progress pass is abandoned when this
    /// occurs, its partial contribution is discarded, and the session may retry
    /// with a fresh pass up to its fault budget.
    ///
    /// # Fields
    ///
    /// * `address` - The absolute address of the denied read
    /// * `length` - The number of bytes that were requested
    #[error("Read fault at 0x{address:x} ({length} bytes)")]
    ReadFault {
        /// The absolute address of the denied read
        address: u64,
        /// The number of bytes that were requested
        length: usize,
    },

    /// The pass budget was exhausted before the sample buffer filled.
    ///
    /// Too few entries were accepted, or too much of the visited memory was
    /// zero. A badly calibrated population estimate can also land here. The
    /// partial fill count is reported so callers can decide whether to retune
    /// and retry.
    ///
    /// # Fields
    ///
    /// * `filled` - Bytes accumulated when the budget ran out
    /// * `target` - The requested sample length
    /// * `passes` - Enumeration passes consumed
    #[error("Sample buffer underfilled - {filled}/{target} bytes after {passes} passes")]
    Underfilled {
        /// Bytes accumulated when the budget ran out
        filled: usize,
        /// The requested sample length
        target: usize,
        /// Enumeration passes consumed
        passes: u32,
    },

    /// A configuration write carried a zero or otherwise unusable value.
    ///
    /// The previous configuration is left unchanged.
    #[error("Invalid configuration value")]
    InvalidConfig,

    /// Textual configuration input could not be parsed.
    ///
    /// The input was not a base-10 unsigned integer within range, or was not
    /// valid UTF-8. The previous configuration is left unchanged.
    #[error("Could not parse configuration input - {0}")]
    ParseError(String),

    /// A caller-supplied buffer was too small for the requested operation.
    ///
    /// A trigger read needs room for the full sample plus its terminating
    /// NUL byte.
    #[error("Supplied buffer is too small")]
    InvalidArgument,

    /// An append was attempted on an already complete accumulator.
    ///
    /// This is a defensive invariant. Correct orchestration clamps every run
    /// to the remaining capacity, so this indicates a defect in the caller,
    /// not a user-facing condition.
    #[error("Output accumulator is already complete")]
    BufferFull,

    /// Failed to lock target.
    ///
    /// This error occurs when thread synchronization fails, typically
    /// when trying to acquire a mutex that is in an invalid state.
    #[error("Failed to lock target")]
    LockError,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening an image file
    /// for a file-backed host.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories or for
    /// wrapping external library errors with additional context.
    #[error("{0}")]
    Error(String),
}
