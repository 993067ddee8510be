//! FlowClik tenant and theme resolution library.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod tenant;
pub mod theme;

pub use config::schema::TenancyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{HostClassification, Resolution, TenancyRouter};
pub use theme::{PresentationSink, ThemeApplier, ThemeState};
