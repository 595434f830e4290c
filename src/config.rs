// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

const DEFAULT_DIV: u32 = 256;

/// Build- and search-time configuration.
///
/// `div` and `merge_orientations` govern both construction and search, and
/// must agree between `build`/`serialize` and every subsequent `search`
/// call over the same dataset: mixing data built under one convention with
/// a search performed under the other is undefined (spec design note).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Records per block in `.idb`. Controls sparse-index granularity and
    /// I/O amplification for the file-backed searcher. Must be `>= 1`.
    pub div: u32,

    /// When enabled, records with `start < 0` are folded into positive
    /// orientation at build time, and un-folded back to their original
    /// sign on search output.
    pub merge_orientations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            div: DEFAULT_DIV,
            merge_orientations: false,
        }
    }
}

impl Config {
    /// Creates a config with default `div` and orientation merging off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block size used by the on-disk format.
    ///
    /// # Panics
    ///
    /// Panics if `div` is `0`.
    #[must_use]
    pub fn div(mut self, div: u32) -> Self {
        assert!(div >= 1, "div must be at least 1");
        self.div = div;
        self
    }

    /// Enables or disables signed-coordinate orientation merging.
    #[must_use]
    pub fn merge_orientations(mut self, enabled: bool) -> Self {
        self.merge_orientations = enabled;
        self
    }
}
