//! WCL Rules
//!
//! The consistency checks run over a configuration snapshot before the
//! simulation starts.
//!
//! # Core Concepts
//!
//! - [`Rule`]: one stateless check, returning a [`RuleOutcome`]
//! - [`Issue`] / [`AffectedItem`]: the normalized finding of a rule
//! - [`RuleRegistry`]: the ordered set of rules (sixteen by default)
//! - [`RuleExecutor`]: runs a registry and splits issues by [`Severity`]
//! - [`ValidationStatus`] / [`validation_status`]: counts without detail
//!
//! # Example
//!
//! ```rust
//! use wcl_config::Snapshot;
//! use wcl_rules::{validate, ValidationStatus};
//!
//! let snapshot = Snapshot::from_json(r#"{
//!     "pressures": [{ "id": "fear", "decay": 0, "growth": {} }]
//! }"#).unwrap();
//!
//! let result = validate(&snapshot);
//! assert_eq!(result.status(), ValidationStatus::Warning);
//! assert!(result.issue("pressureWithoutSources").is_some());
//! assert!(result.issue("pressureWithoutSinks").is_some());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod executor;
mod issue;
mod registry;
mod rule;
pub mod rules;
mod status;

// Re-exports
pub use executor::{validate, RuleExecutor, ValidationResult};
pub use issue::{AffectedItem, Issue, Severity};
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleCategory, RuleOutcome};
pub use status::{validation_status, StatusSummary, ValidationStatus};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running rules
    pub use crate::{
        validate, validation_status, Issue, Rule, RuleExecutor, RuleRegistry, Severity,
        ValidationResult, ValidationStatus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
