//! Store connection configuration
//!
//! Loaded from a JSON settings file in the store's `appsettings.json` shape,
//! with per-field environment variable overrides for deployment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection settings for the remote store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreConfig {
    /// Tenant the namespace belongs to
    pub tenant_id: String,

    /// Namespace holding the streams
    pub namespace_id: String,

    /// Base URL of the store, e.g. `https://uswe.datahub.connect.aveva.com`
    pub resource: String,

    /// Client-credentials client id
    pub client_id: String,

    /// Client-credentials client secret
    pub client_secret: String,

    /// Stream to query
    pub stream_id: String,
}

impl StoreConfig {
    /// Load settings from a JSON file, then apply environment overrides
    /// (`TEMPEST_TENANT_ID`, `TEMPEST_NAMESPACE_ID`, `TEMPEST_RESOURCE`,
    /// `TEMPEST_CLIENT_ID`, `TEMPEST_CLIENT_SECRET`, `TEMPEST_STREAM_ID`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: StoreConfig = serde_json::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        override_from_env(&mut self.tenant_id, "TEMPEST_TENANT_ID");
        override_from_env(&mut self.namespace_id, "TEMPEST_NAMESPACE_ID");
        override_from_env(&mut self.resource, "TEMPEST_RESOURCE");
        override_from_env(&mut self.client_id, "TEMPEST_CLIENT_ID");
        override_from_env(&mut self.client_secret, "TEMPEST_CLIENT_SECRET");
        override_from_env(&mut self.stream_id, "TEMPEST_STREAM_ID");
    }

    /// Reject settings with required fields left empty
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("TenantId", &self.tenant_id),
            ("NamespaceId", &self.namespace_id),
            ("Resource", &self.resource),
            ("ClientId", &self.client_id),
            ("ClientSecret", &self.client_secret),
            ("StreamId", &self.stream_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

fn override_from_env(field: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            *field = value;
        }
    }
}
