//! WCL I/O
//!
//! The boundary between files and the linter.
//!
//! # Core Operations
//!
//! - **Ingress**: read a JSON or YAML file into a [`Snapshot`](wcl_config::Snapshot)
//! - **Flatten**: turn a [`ValidationResult`](wcl_rules::ValidationResult) into [`FlatRow`]s
//! - **Egress**: serialize rows as a [`JsonReport`] or CSV and write them out
//!
//! # Architecture
//!
//! ```text
//! File System → load_snapshot → Snapshot → validate → ValidationResult → flatten → JSON / CSV → File System
//! ```
//!
//! # Example
//!
//! ```rust
//! use wcl_config::Snapshot;
//! use wcl_io::to_csv;
//! use wcl_rules::validate;
//!
//! let snapshot = Snapshot::from_json(r#"{"pressures": [{"id": "fear", "decay": 0}]}"#).unwrap();
//! let csv = to_csv(&validate(&snapshot)).unwrap();
//! assert_eq!(csv.lines().count(), 3);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod egress;
pub mod error;
pub mod ingress;
pub mod report;

// Re-exports for convenience
pub use egress::{to_csv, to_json, write_csv, write_json, ExportFormat, CSV_HEADER};
pub use error::{ExportError, IngressError, IoError, IoResult};
pub use ingress::{load_snapshot, SnapshotFormat};
pub use report::{flatten, FlatRow, JsonReport, ReportSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for loading snapshots and exporting reports
    pub use crate::{
        flatten, load_snapshot, to_csv, to_json, write_csv, write_json, ExportFormat, IoError,
        JsonReport,
    };
}
