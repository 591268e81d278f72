pub mod domain;
pub mod infrastructure;

pub use domain::content_id::{ContentId, ParseContentIdError};
pub use infrastructure::{
    ConfigError, GatewayList, GatewayResolver, HttpProbe, LocatorConfig, ReachabilityProbe,
};

/// Initialize a resolver from a configuration file
pub fn init_resolver_from_file<P: AsRef<std::path::Path>>(
    config_path: P,
) -> Result<GatewayResolver, ConfigError> {
    let config = LocatorConfig::from_file(config_path)?;
    Ok(GatewayResolver::new(&config))
}

/// Initialize a resolver from a configuration string
pub fn init_resolver_from_str(config_str: &str) -> Result<GatewayResolver, ConfigError> {
    let config = LocatorConfig::from_toml_str(config_str)?;
    Ok(GatewayResolver::new(&config))
}

/// Initialize a resolver with default configuration
pub fn init_resolver_default() -> GatewayResolver {
    let config = LocatorConfig::default();
    GatewayResolver::new(&config)
}
