//! Service configuration trait for CLI binaries
//!
//! The binary implements this trait to tell the library which Initializr
//! instance to talk to and how to identify itself.

/// Configuration for a client of an Initializr service
pub trait ServiceConfig: Clone + Send + Sync + 'static {
    /// Internal name (used for the user agent)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Service root used when nothing overrides it
    fn default_service_url(&self) -> &'static str;

    /// Environment variable name for overriding the service URL
    fn service_url_env(&self) -> &'static str;

    /// URL for the service's own documentation
    fn docs_url(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
