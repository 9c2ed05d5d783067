use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Advisor model name is not blank
/// - Advisor output cap is at least one token
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let llm = &config.advisor.llm;

    if llm.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "advisor.llm.model cannot be empty".to_string(),
        ));
    }

    if llm.max_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "advisor.llm.max_tokens must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{AdvisorConfig, LlmConfig};
    use crate::config::ServerConfig;
    use std::net::IpAddr;

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse::<IpAddr>().unwrap(),
                port: 0,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_model_fails() {
        let config = Config {
            advisor: AdvisorConfig {
                llm: LlmConfig {
                    model: "  ".to_string(),
                    ..Default::default()
                },
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_max_tokens_fails() {
        let config = Config {
            advisor: AdvisorConfig {
                llm: LlmConfig {
                    max_tokens: 0,
                    ..Default::default()
                },
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }
}
