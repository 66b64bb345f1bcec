use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::{Config, Origins};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes the result. Validation is left to the caller so that
    /// command line overrides can be applied first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails or TOML parsing fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable expansion or TOML parsing fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))
    }

    /// Replace the configured Gemini API key
    pub fn set_api_key(&mut self, api_key: SecretString) {
        self.gemini.api_key = Some(api_key);
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, a CORS entry is not a
    /// valid header value, or a timeout is zero
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_api_key()?;
        self.validate_cors()?;
        self.validate_timeouts()?;
        Ok(())
    }

    fn validate_api_key(&self) -> anyhow::Result<()> {
        let present = self
            .gemini
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty());

        if !present {
            anyhow::bail!("GEMINI_API_KEY environment variable is not set");
        }

        Ok(())
    }

    fn validate_cors(&self) -> anyhow::Result<()> {
        let cors = &self.server.cors;

        if let Origins::List(origins) = &cors.origins {
            for origin in origins {
                http::HeaderValue::from_str(origin)
                    .map_err(|e| anyhow::anyhow!("invalid CORS origin '{origin}': {e}"))?;
            }
        }

        for method in &cors.methods {
            method
                .parse::<http::Method>()
                .map_err(|e| anyhow::anyhow!("invalid CORS method '{method}': {e}"))?;
        }

        for header in &cors.headers {
            header
                .parse::<http::HeaderName>()
                .map_err(|e| anyhow::anyhow!("invalid CORS header '{header}': {e}"))?;
        }

        Ok(())
    }

    fn validate_timeouts(&self) -> anyhow::Result<()> {
        if self.extract.timeout_secs == 0 {
            anyhow::bail!("extract.timeout_secs must be greater than 0");
        }

        if self.gemini.timeout_secs == 0 {
            anyhow::bail!("gemini.timeout_secs must be greater than 0");
        }

        Ok(())
    }
}
