//! API server configuration.

/// Configuration for the API server.
///
/// Read once at startup; handlers only look at it.
#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8000").
    pub bind_addr: String,
    /// Whether a store connection string was configured.
    pub database_url_set: bool,
    /// Whether a database name was configured.
    pub database_name_set: bool,
}

impl ApiConfig {
    /// Builds the configuration from the resolved startup settings.
    pub fn new(
        host: &str,
        port: u16,
        database_url: Option<&str>,
        database_name: Option<&str>,
    ) -> Self {
        Self {
            bind_addr: format!("{host}:{port}"),
            database_url_set: is_set(database_url),
            database_name_set: is_set(database_name),
        }
    }
}

fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
