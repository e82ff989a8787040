//! In-memory test doubles for the UI capabilities.
//!
//! [`MockMenu`] is a menu tree that records every expand and toggle it
//! receives, and [`MockSlider`] is a caret that moves by a fixed increment.
//! Both are deterministic, so tests can assert exactly which operations the
//! selector or the drive loop issued.
//!
//! ## Example
//!
//! ```
//! use tiento::mock::{MenuCall, MockMenu};
//! use tiento::MenuPathSelector;
//!
//! let menu = MockMenu::builder()
//!     .submenu("View", |view| view.checked_item("Status Bar", false))
//!     .build();
//!
//! let mut selector = MenuPathSelector::new(menu);
//! selector.push(true, ["View", "Status Bar"]).unwrap();
//!
//! assert_eq!(
//!     selector.menu().calls(),
//!     &[
//!         MenuCall::Expand("View".to_string()),
//!         MenuCall::Toggle("Status Bar".to_string()),
//!     ]
//! );
//! ```

mod menu;
mod slider;

pub use menu::{MenuCall, MockMenu, MockMenuBuilder, MockMenuItem};
pub use slider::MockSlider;
