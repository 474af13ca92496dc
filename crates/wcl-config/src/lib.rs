//! WCL Config
//!
//! Typed data model for the configuration snapshot a world simulation is
//! built from: the schema catalogs, pressures, generators, systems and the
//! era timeline.
//!
//! # Overview
//!
//! - [`Snapshot`]: the immutable input to a lint run
//! - [`Schema`]: entity/relationship kinds, cultures and tags
//! - [`Pressure`], [`Factor`], [`CountSpec`]: pressure definitions and feedback terms
//! - [`Generator`]: declarative entity/relationship generators
//! - [`SystemEntry`] / [`SystemConfig`]: simulation systems
//! - [`Era`]: timeline phases and their weight maps
//!
//! Decoding is lenient: every optional or collection field defaults when
//! absent, `null` or of the wrong shape, and list elements that do not
//! decode are dropped, so one malformed record never hides the rest.
//!
//! # Example
//!
//! ```rust
//! use wcl_config::Snapshot;
//!
//! let snapshot = Snapshot::from_json(r#"{ "pressures": [{ "id": "fear" }] }"#).unwrap();
//! assert_eq!(snapshot.pressures.len(), 1);
//! assert!(snapshot.generators.is_empty());
//! ```

#![warn(missing_docs)]

pub mod era;
pub mod error;
pub mod generator;
mod lenient;
pub mod listing;
pub mod pressure;
pub mod schema;
pub mod snapshot;
pub mod system;

// Re-exports
pub use era::Era;
pub use error::ConfigError;
pub use generator::{
    Applicability, ApplicabilityRule, Contract, CreationItem, Generator, Lineage,
    RelationshipItem, Selection, StateUpdate, MODIFY_PRESSURE,
};
pub use listing::Listing;
pub use pressure::{CountSpec, Factor, Growth, Pressure};
pub use schema::{
    CatalogEntry, Culture, EntityKindSchema, RelationshipKindSchema, Schema, SemanticPlane,
    SemanticRegion, TagDefinition,
};
pub use snapshot::{OrphanEntry, Snapshot, UsageMap, UsageValidation};
pub use system::{
    Contagion, InfectionAction, SharedMetric, SystemAction, SystemConfig, SystemEntry,
    SystemRule, Vector,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with configuration snapshots
    pub use crate::{
        CountSpec, Era, Factor, Generator, Pressure, Schema, Snapshot, SystemConfig, SystemEntry,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
