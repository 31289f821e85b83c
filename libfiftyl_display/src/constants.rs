//! Constants of the 50L readout geometry and timing.

/// Nominal number of frames (time ticks) in a trigger record. Records with
/// fewer frames are treated as mismatched and skipped by whole-file analyses.
pub const FRAMES_PER_RECORD: usize = 2240;

/// Total number of detector channels across all planes.
pub const TOTAL_CHANNELS: usize = 128;

/// Number of channels carried by a single WIB link.
pub const CHANNELS_PER_LINK: usize = 64;

/// Number of WIB links in a trigger record.
pub const LINKS_PER_RECORD: usize = 2;

/// Sampling period of the readout in seconds (512 ns per tick).
pub const TICK_SECONDS: f64 = 512.0e-9;

/// First detector channel of the Induction 1 plane; the collection plane
/// occupies channels below this.
pub const INDUCTION1_START: usize = 48;

/// First detector channel of the Induction 2 plane.
pub const INDUCTION2_START: usize = 88;
