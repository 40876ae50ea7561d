//! `hr-output`: trace writers for the hexrail world.
//!
//! | Backend | Files created                        |
//! |---------|--------------------------------------|
//! | CSV     | `car_poses.csv`, `track_diffs.csv`   |
//!
//! Writers implement [`TraceWriter`] and are driven by [`TraceObserver`],
//! which implements `hr_sim::WorldObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hr_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer);
//! world.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{CarPoseRow, TrackDiffRow};
pub use writer::TraceWriter;
