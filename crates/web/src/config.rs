use chess_tactics_core::AnalysisConfig;

/// Server configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Resolver, classifier and phase settings applied to every request.
    pub analysis: AnalysisConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = ServerConfig::default();
        ServerConfig {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            analysis: AnalysisConfig::from_env(),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            analysis: AnalysisConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.analysis, AnalysisConfig::default());
    }
}
