//! CSV trace backend.
//!
//! Creates two files in the output directory:
//! - `car_poses.csv`
//! - `track_diffs.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{CarPoseRow, OutputResult, TrackDiffRow};

pub struct CsvWriter {
    poses:    Writer<File>,
    diffs:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut poses = Writer::from_path(dir.join("car_poses.csv"))?;
        poses.write_record(["tick", "train", "car", "x", "y", "z", "yaw"])?;

        let mut diffs = Writer::from_path(dir.join("track_diffs.csv"))?;
        diffs.write_record(["tick", "x", "y", "added", "removed"])?;

        Ok(Self { poses, diffs, finished: false })
    }
}

impl TraceWriter for CsvWriter {
    fn write_car_poses(&mut self, rows: &[CarPoseRow]) -> OutputResult<()> {
        for row in rows {
            self.poses.write_record(&[
                row.tick.to_string(),
                row.train.to_string(),
                row.car.to_string(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.y),
                format!("{:.4}", row.z),
                format!("{:.4}", row.yaw),
            ])?;
        }
        Ok(())
    }

    fn write_track_diff(&mut self, row: &TrackDiffRow) -> OutputResult<()> {
        self.diffs.write_record(&[
            row.tick.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            format!("{:#06x}", row.added),
            format!("{:#06x}", row.removed),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.poses.flush()?;
        self.diffs.flush()?;
        Ok(())
    }
}
