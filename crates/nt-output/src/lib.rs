//! `nt-output` - world output writers for the navtree framework.
//!
//! | Backend | Files created                                |
//! |---------|----------------------------------------------|
//! | CSV     | `agent_snapshots.csv`, `tick_summaries.csv`  |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`WorldOutputObserver`], which implements `nt_sim::WorldObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use nt_output::{CsvWriter, WorldOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = WorldOutputObserver::new(writer);
//! world.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::WorldOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
