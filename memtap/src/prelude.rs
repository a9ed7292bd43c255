//! # memtap Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the memtap library. Import this module to get quick access to the essential
//! types for address space sampling.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all memtap operations
pub use crate::Error;

/// The result type used throughout memtap
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The sampling facade owning the injected collaborators
pub use crate::Sampler;

/// Tuning constants for the sampling engine
pub use crate::SamplerConfig;

/// The virtual-file front-end
pub use crate::TriggerFile;

// ================================================================================================
// Engine Components
// ================================================================================================

/// One-shot sampling orchestration
pub use crate::sampler::SamplingSession;

/// Per-entry accept/reject decision
pub use crate::sampler::SelectionFilter;

/// Randomized bounded extraction from accepted entries
pub use crate::sampler::{ByteExtractor, Progress};

/// The fixed-capacity output buffer
pub use crate::sampler::OutputAccumulator;

// ================================================================================================
// Configuration
// ================================================================================================

/// The shared target sample length
pub use crate::config::{TargetLength, DEFAULT_TARGET_LEN};

// ================================================================================================
// Entropy
// ================================================================================================

/// The entropy draw interface and its production implementation
pub use crate::entropy::{Algorithm, Drbg, EntropySource};

// ================================================================================================
// Host Capabilities
// ================================================================================================

/// The host capability seams and buffer-backed backends
pub use crate::host::{Image, IterFlow, MemoryAccess, Physical, SymbolEntry, SymbolSource};
