//! Tenant subsystem.
//!
//! # Data Flow
//! ```text
//! hostname + classification
//!     → resolver.rs (subdomain label or dev tenant)
//!     → TenantId
//!     → store.rs (ThemeSource::fetch)
//!     → ThemeQuery for the theme applier
//! ```

pub mod id;
pub mod resolver;
pub mod store;

pub use id::{TenantId, TenantIdError};
pub use resolver::TenantResolver;
pub use store::{InMemoryThemeStore, ThemeQuery, ThemeSource};
