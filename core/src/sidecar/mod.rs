//! Sidecar (`.ics`) file parsing
//!
//! A sidecar file describes every image scanned in one case: one geometry
//! line per view plus a single `DIGITIZER` line for the whole group.

mod digitizer;
mod line;
mod locate;

pub use digitizer::{resolve_digitizer, HOWTEK};
pub use line::{
    SidecarLine, BITS_PER_PIXEL, DIGITIZER, LINES, OVERLAY, PIXELS_PER_LINE, RESOLUTION,
};
pub use locate::{find_sidecar, find_sidecar_for, SIDECAR_EXTENSION};
