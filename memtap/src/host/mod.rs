//! Host capability seams and address space backends.
//!
//! The sampling engine never owns the address space it samples from. It asks
//! the host for two capabilities and is otherwise indifferent to where the
//! bytes live:
//!
//! - [`crate::host::SymbolSource`] - Enumerates the known `(name, address)`
//!   pairs of the space, one callback invocation per entry, with early-stop
//!   support.
//! - [`crate::host::MemoryAccess`] - Reads raw bytes at an address. Any read
//!   may be denied; denial is reported as [`crate::Error::ReadFault`], never
//!   hidden behind zero bytes.
//!
//! How a host resolves these capabilities is entirely outside the engine's
//! concern. This module ships two self-contained backends that treat a byte
//! buffer as the address space and synthesize a symbol table over it at a
//! fixed stride:
//!
//! - [`crate::host::Image`] - An owned in-memory buffer.
//! - [`crate::host::Physical`] - A memory-mapped file.
//!
//! # Examples
//!
//! ```rust
//! use memtap::host::{Image, IterFlow, MemoryAccess, SymbolSource};
//!
//! let image = Image::new(vec![0xEE; 4096], 1024)?;
//!
//! // Four synthesized symbols, one per kilobyte.
//! let mut seen = 0;
//! image.for_each_symbol(&mut |entry| {
//!     assert!(entry.address < 4096);
//!     seen += 1;
//!     Ok(IterFlow::Continue)
//! })?;
//! assert_eq!(seen, 4);
//!
//! // Bounds-checked raw reads.
//! assert_eq!(image.read_bytes(100, 4)?, &[0xEE; 4]);
//! assert!(image.read_bytes(4090, 16).is_err());
//! # Ok::<(), memtap::Error>(())
//! ```

mod image;
mod physical;

pub use image::Image;
pub use physical::Physical;

use crate::Result;

/// One named, addressed region of the host address space.
///
/// Entries are ephemeral. They are valid only for the duration of a single
/// enumeration callback and must not be retained; the borrow makes that
/// explicit.
#[derive(Debug, Clone, Copy)]
pub struct SymbolEntry<'a> {
    /// The symbol's name, owned by the enumerator.
    pub name: &'a str,
    /// The symbol's absolute address within the host address space.
    pub address: u64,
}

/// Continuation decision returned by an enumeration callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterFlow {
    /// Visit the next entry.
    Continue,
    /// End the pass early; remaining entries are not visited.
    Stop,
}

/// Enumerates every known entry of the host address space.
///
/// The engine requests one full enumeration pass at a time and routes each
/// entry through its per-entry callback. The callback may end the pass early
/// by returning [`IterFlow::Stop`], and any error it returns aborts the pass
/// and propagates to the caller.
///
/// Implementations must be thread-safe; a single source may back many
/// sampling runs over its lifetime.
pub trait SymbolSource: Send + Sync {
    /// Invoke `visit` once per known entry, in host-defined order, until the
    /// callback returns [`IterFlow::Stop`] or entries are exhausted.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `visit`, abandoning the rest of
    /// the pass.
    fn for_each_symbol(
        &self,
        visit: &mut dyn FnMut(&SymbolEntry<'_>) -> Result<IterFlow>,
    ) -> Result<()>;
}

/// Reads raw bytes out of the host address space.
///
/// This is the fallible boundary of the whole system. The host decides what
/// "reading at an address" means and whether any given access is allowed, so
/// every read returns a [`crate::Result`] and a denied access surfaces as
/// [`crate::Error::ReadFault`].
pub trait MemoryAccess: Send + Sync {
    /// Returns `len` bytes starting at the absolute address `address`.
    ///
    /// # Arguments
    ///
    /// * `address` - The absolute starting address of the read.
    /// * `len` - The number of bytes to read. Zero-length reads succeed at
    ///   any in-range address.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ReadFault`] if the access is denied or falls
    /// outside the readable range.
    fn read_bytes(&self, address: u64, len: usize) -> Result<&[u8]>;
}

/// Builds the synthetic symbol table shared by the buffer-backed hosts.
///
/// One symbol per `stride` bytes, named after its absolute address.
pub(crate) fn synthesize_symbols(len: usize, base: u64, stride: usize) -> Vec<(String, u64)> {
    let mut symbols = Vec::with_capacity(len / stride + 1);
    let mut offset = 0usize;
    while offset < len {
        let address = base + offset as u64;
        symbols.push((format!("sym_{address:08x}"), address));
        offset += stride;
    }

    symbols
}
