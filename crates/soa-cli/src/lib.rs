//! CLI library components for the Schedule of Activities pipeline.

pub mod io;
pub mod logging;
