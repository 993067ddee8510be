//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (host, path)
//!     → classifier.rs (main domain / tenant subdomain / local development)
//!     → route_base.rs (route prefix, URL building)
//!     → site.rs (landing vs. tenant site)
//!     → router.rs (tenant lookup, theme application)
//!     → Resolution
//!
//! Compilation (at startup and on reload):
//!     TenancyConfig
//!     → allow-lists, exclusion matchers, theme store
//!     → Freeze as immutable TenancyRouter
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always resolves the same way

pub mod classifier;
pub mod matcher;
pub mod route_base;
pub mod router;
pub mod site;

pub use classifier::{HostClassification, HostClassifier};
pub use route_base::{RouteBase, RouteBaseResolver};
pub use router::{Resolution, TenancyRouter};
pub use site::SiteVariant;
