//! Tiento: Find-and-Act Core for GUI Test Automation
//!
//! Tiento (Spanish: "touch, feel") locates controls among their siblings by
//! pluggable criteria and acts on them: it walks multi-level menu paths to
//! a selectable leaf, and nudges carets, sliders and scroll bars until they
//! land on a target position.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    TIENTO Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────────┐        │
//! │   │ Criteria + │    │ Menu path  │    │ MenuHierarchy  │        │
//! │   │ Policy     │───►│ selector   │───►│ (live widgets) │        │
//! │   └────────────┘    └────────────┘    └────────────────┘        │
//! │   ┌────────────┐    ┌────────────┐    ┌────────────────┐        │
//! │   │ ToPosition │───►│ drive loop │───►│ Positionable   │        │
//! │   └────────────┘    └────────────┘    └────────────────┘        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never talks to a toolkit directly. Toolkit bindings implement
//! [`MenuHierarchy`] and [`Positionable`]; the [`mock`] module ships
//! in-memory implementations for tests.

#![warn(missing_docs)]

mod caret;
mod config;
mod lookup;
mod menu;
mod policy;
mod result;
mod wait;

/// Tracing subscriber setup for binaries and test suites
pub mod logging;

/// In-memory menu and caret doubles
///
/// Deterministic implementations of the UI capabilities that record every
/// operation they receive.
pub mod mock;

pub use caret::{
    drive, CaretOwner, CaretTarget, Direction, DriveReport, Positionable, ToPosition,
};
pub use config::TientoConfig;
pub use lookup::{
    And, Any, ByStringLookup, CriteriaExt, FnCriteria, HasText, Lookup, LookupCriteria, Not, Or,
    Parent,
};
pub use menu::{MenuHierarchy, MenuPath, MenuPathSelector, PathToken};
pub use policy::{ComparePolicy, StringComparePolicy};
pub use result::{TientoError, TientoResult};
pub use wait::{
    wait_until, DriveOptions, WaitOptions, WaitResult, DEFAULT_MAX_STEPS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::caret::{drive, CaretOwner, Direction, Positionable, ToPosition};
    pub use super::config::TientoConfig;
    pub use super::lookup::{ByStringLookup, CriteriaExt, HasText, LookupCriteria, Parent};
    pub use super::menu::{MenuHierarchy, MenuPathSelector, PathToken};
    pub use super::policy::StringComparePolicy;
    pub use super::result::{TientoError, TientoResult};
    pub use super::wait::{DriveOptions, WaitOptions};
}
