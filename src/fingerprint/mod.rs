//! Change detection: stat-based fingerprints and the per-tracker cache.
//!
//! # When fingerprints lie
//!
//! Comparison granularity is coarse: an edit that preserves device, inode,
//! size and lands within the filesystem's timestamp resolution is invisible.
//! That is a documented limitation, acceptable for human edit-test cycles.

mod cache;
mod stat;

pub use cache::FingerprintCache;
pub use stat::Fingerprint;
