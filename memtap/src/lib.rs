// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
//#![deny(unsafe_code)]
// - 'host/physical.rs' uses mmap to map a file into memory

//! # memtap
//!
//! A small, testable engine for pulling a short stream of unpredictable bytes out of a very
//! large, sparsely enumerable address space - without ever materializing or indexing that
//! space in full. `memtap` visits the entries of a host-supplied symbol enumeration, keeps
//! each one with a fixed calibrated probability, and extracts a short, randomly placed run
//! of bytes from a safety-bounded window around each accepted entry. Zero bytes are
//! dropped; everything else accumulates into a fixed-size buffer until the requested
//! length is reached.
//!
//! ## Features
//!
//! - **Injected capabilities** - Symbol enumeration, raw memory access and the entropy
//!   generator are traits supplied at construction, so the engine runs unchanged against a
//!   live host, a memory-mapped file, or deterministic test doubles
//! - **Safety-windowed extraction** - A read never crosses the page boundary following its
//!   entry's address
//! - **Honest fault handling** - A denied read abandons and rolls back the pass instead of
//!   leaking partial state, and is retried up to an explicit budget
//! - **Bounded liveness** - Sessions that cannot fill their buffer fail with a distinct
//!   error instead of looping forever
//! - **Virtual-file front-end** - The classic read-to-sample / write-to-configure file
//!   contract, terminator byte and ten-digit length parser included
//!
//! ## Quick Start
//!
//! Add `memtap` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! memtap = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use memtap::prelude::*;
//!
//! // A synthetic address space: 64 KiB of data, one symbol every 256 bytes.
//! let host = Arc::new(Image::new(vec![0xA5; 1 << 16], 256)?);
//!
//! let mut entropy = Drbg::open(Algorithm::Chacha20);
//! entropy.reseed(&[])?;
//!
//! let config = SamplerConfig {
//!     population_hint: 256,
//!     page_size: 256,
//!     ..SamplerConfig::default()
//! };
//! let sampler = Sampler::with_config(Box::new(entropy), host.clone(), host, config)?;
//!
//! let bytes = sampler.sample(16)?;
//! assert_eq!(bytes.len(), 16);
//! assert!(bytes.iter().all(|&b| b != 0));
//! # Ok::<(), memtap::Error>(())
//! ```
//!
//! ### Triggering Through the File Contract
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use memtap::{host::Physical, Drbg, Sampler, TargetLength, TriggerFile};
//!
//! let host = Arc::new(Physical::new("image.bin", 0, 4096)?);
//! let mut entropy = Drbg::open_named("chacha20")?;
//! entropy.reseed(&[])?;
//!
//! let sampler = Sampler::new(Box::new(entropy), host.clone(), host);
//! let trigger = TriggerFile::new(sampler, TargetLength::default());
//!
//! trigger.write(b"32")?;
//!
//! let mut offset = 0;
//! let mut buf = vec![0u8; 64];
//! let produced = trigger.read(&mut offset, &mut buf)?;
//! assert_eq!(produced, 33); // 32 sampled bytes plus the NUL terminator
//! # Ok::<(), memtap::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `memtap` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`sampler`] - The selection, extraction and orchestration engine
//! - [`entropy`] - The draw interface and the ChaCha generator registry
//! - [`host`] - Capability seams plus in-memory and memory-mapped backends
//! - [`config`] - The shared target-length handle
//! - [`trigger`] - The virtual-file front-end
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Sampling Model
//!
//! Each enumerated entry is kept with probability `1 / ((P / N) << 3)`, where `P` is a
//! tunable estimate of the population size and `N` the target length. An accepted entry
//! yields a run uniform over `0..16` bytes - about 8 expected - read from a random offset
//! inside the window between the entry's address and the next page boundary. The expected
//! number of entries accepted before the buffer fills is therefore independent of `P`'s
//! absolute magnitude; only the order of magnitude matters. Because zero bytes are
//! filtered out, the number of accepted entries a session really needs is data-dependent
//! and not predictable from `N` alone.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with comprehensive error information:
//!
//! ```rust
//! use memtap::{Error, TargetLength};
//!
//! let target = TargetLength::default();
//! match target.set_from_text(b"abc") {
//!     Err(Error::ParseError(message)) => println!("rejected: {message}"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Thread Safety
//!
//! A [`Sampler`] is `Send + Sync`; concurrent [`Sampler::sample`] calls serialize behind
//! an internal mutex so only one session runs at a time and draws stay in their fixed
//! per-entry order. [`TargetLength`] updates are single atomic writes, read once per
//! session at start time.

pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the memtap library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust,no_run
/// use memtap::prelude::*;
///
/// let mut entropy = Drbg::open_named("chacha20")?;
/// entropy.reseed(&[])?;
/// # Ok::<(), memtap::Error>(())
/// ```
pub mod prelude;

/// Shared target-length configuration.
pub mod config;

/// Entropy acquisition: the draw interface and the ChaCha generator registry.
pub mod entropy;

/// Host capability seams and address space backends.
pub mod host;

/// The sampling and extraction engine.
pub mod sampler;

/// The virtual-file front-end for triggering samples.
pub mod trigger;

/// `memtap` Result type
///
/// The result type used throughout the crate. All fallible operations return this,
/// carrying [`Error`] on failure.
pub type Result<T> = std::result::Result<T, Error>;

/// `memtap` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for entropy acquisition, configuration and extraction.
pub use error::Error;

/// The sampling facade and its tuning constants
pub use sampler::{Sampler, SamplerConfig, SamplingSession};

/// The shared target sample length handle
pub use config::TargetLength;

/// The virtual-file front-end
pub use trigger::TriggerFile;

/// The entropy draw interface and the production generator
pub use entropy::{Algorithm, Drbg, EntropySource};
