//! Memory-mapped file backend for the sampling host.
//!
//! This module provides the [`crate::host::Physical`] backend that implements
//! the host capability traits over a file mapped into the process's virtual
//! address space. The file's bytes become the readable space and a symbol
//! table is synthesized over them at a fixed stride, so any on-disk image can
//! stand in for a host address space without loading it into memory upfront.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use memtap::host::{MemoryAccess, Physical};
//! use std::path::Path;
//!
//! let physical = Physical::new(Path::new("image.bin"), 0, 4096)?;
//! println!("Mapped {} bytes, {} symbols", physical.len(), physical.symbol_count());
//!
//! let head = physical.read_bytes(0, 4)?;
//! println!("First bytes: {:02x?}", head);
//! # Ok::<(), memtap::Error>(())
//! ```

use super::{synthesize_symbols, IterFlow, MemoryAccess, SymbolEntry, SymbolSource};
use crate::{
    Error::{self, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// Address space backed by a memory-mapped file.
///
/// [`crate::host::Physical`] maps a file read-only into the process and serves
/// bounds-checked reads out of the mapping. Only touched pages are faulted in
/// by the operating system, which keeps sampling cheap even for very large
/// images.
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
    base: u64,
    symbols: Vec<(String, u64)>,
}

impl Physical {
    /// Map the file at `path` and synthesize a symbol table over it.
    ///
    /// # Arguments
    /// * `path` - Path to the image file on disk.
    /// * `base` - Absolute address of the file's first byte.
    /// * `stride` - Distance between synthesized symbols, must be non-zero.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened,
    /// [`crate::Error::Error`] if memory mapping fails, or
    /// [`crate::Error::InvalidConfig`] if `stride` is zero.
    pub fn new(path: impl AsRef<Path>, base: u64, stride: usize) -> Result<Physical> {
        if stride == 0 {
            return Err(Error::InvalidConfig);
        }

        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(Error::Error(error.to_string())),
        };

        let symbols = synthesize_symbols(mmap.len(), base, stride);
        Ok(Physical {
            data: mmap,
            base,
            symbols,
        })
    }

    /// Number of entries in the synthesized symbol table.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Total length of the mapped space in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the mapped space is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl SymbolSource for Physical {
    fn for_each_symbol(
        &self,
        visit: &mut dyn FnMut(&SymbolEntry<'_>) -> Result<IterFlow>,
    ) -> Result<()> {
        for (name, address) in &self.symbols {
            let entry = SymbolEntry {
                name,
                address: *address,
            };

            if visit(&entry)? == IterFlow::Stop {
                return Ok(());
            }
        }

        Ok(())
    }
}

impl MemoryAccess for Physical {
    fn read_bytes(&self, address: u64, len: usize) -> Result<&[u8]> {
        let fault = || Error::ReadFault {
            address,
            length: len,
        };

        let relative = address.checked_sub(self.base).ok_or_else(fault)?;
        let start = usize::try_from(relative).map_err(|_| fault())?;
        let Some(end) = start.checked_add(len) else {
            return Err(fault());
        };

        if end > self.data.len() {
            return Err(fault());
        }

        Ok(&self.data[start..end])
    }
}
