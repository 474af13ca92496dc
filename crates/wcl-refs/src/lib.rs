//! WCL Reference Collector
//!
//! Walks a configuration snapshot and extracts typed cross-references.
//!
//! # Overview
//!
//! - [`Reference`]: one mention of an id, tagged with its owner and provenance
//! - [`ScopedReference`]: a reference that only makes sense inside an entity kind
//!   (subtypes, statuses)
//! - [`collect`]: one collector per reference kind
//! - [`Catalog`]: the set of ids each reference kind may resolve against
//! - [`group_by_value`]: folds references into one group per offending value
//!
//! Collectors return sequences, not sets: the same value referenced from two
//! places yields two [`Reference`]s so diagnostics can name both sources.
//! Disabled generators contribute nothing.
//!
//! # Example
//!
//! ```rust
//! use wcl_config::Snapshot;
//! use wcl_refs::{collect, Catalog};
//!
//! let snapshot = Snapshot::from_json(
//!     r#"{"generators": [{"id": "g1", "selection": {"strategy": "random", "kind": "ghost"}}]}"#,
//! ).unwrap();
//!
//! let catalog = Catalog::build(&snapshot);
//! let refs = collect::entity_kind_refs(&snapshot);
//! assert_eq!(refs[0].value, "ghost");
//! assert!(!catalog.has_entity_kind("ghost"));
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod collect;
pub mod group;
pub mod reference;

// Re-exports
pub use catalog::{is_always_running, Catalog, ALWAYS_RUNNING_SYSTEMS};
pub use collect::MAX_RULE_DEPTH;
pub use group::{group_by_key, group_by_value, ReferenceGroup};
pub use reference::{Reference, ScopedReference, SourceType};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for reference collection
    pub use crate::{
        collect, group_by_value, Catalog, Reference, ReferenceGroup, ScopedReference, SourceType,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
