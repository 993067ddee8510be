//! Theme subsystem.
//!
//! # Data Flow
//! ```text
//! ThemeSource (tenant store)
//!     → ThemeQuery { data, is_loading }
//!     → applier.rs (decide state for current path)
//!     → sink.rs (set/clear data-* attributes)
//! ```
//!
//! # Design Decisions
//! - Missing configuration means defaults, never an error
//! - The document root is injected, never global
//! - Excluded paths are checked first

pub mod applier;
pub mod config;
pub mod sink;

pub use applier::{ThemeApplier, ThemeState, DEFAULT_ACCENT};
pub use config::{ColorMode, Layout, ThemeConfig};
pub use sink::{AttributeMap, PresentationSink};
