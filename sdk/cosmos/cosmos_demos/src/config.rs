// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Command line arguments and `appsettings.json`.

use clap::Parser;
use azure_core::{
    error::{Error, ErrorKind},
    Result,
};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Settings file holding `CosmosEndpoint` and `CosmosMasterKey`.
    #[arg(long, default_value = "appsettings.json")]
    pub config: PathBuf,

    /// The account endpoint, e.g. https://myaccount.documents.azure.com:443/. Overrides the settings file.
    #[arg(long, env = "AZURE_COSMOS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// The account master key. Overrides the settings file.
    #[arg(short, long, env = "AZURE_COSMOS_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// The database the demos work in.
    #[arg(long, default_value = "mydb")]
    pub database: String,

    /// The container holding the customer documents.
    #[arg(long, default_value = "mystore")]
    pub container: String,
}

/// The contents of `appsettings.json`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    pub cosmos_endpoint: Option<String>,
    pub cosmos_master_key: Option<String>,
}

impl AppSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        azure_core::from_json(json)
    }

    /// Reads the settings file. A file that doesn't exist yields `None`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map(Some).map_err(|e| {
                Error::full(
                    ErrorKind::DataConversion,
                    e,
                    format!("could not parse {}", path.display()),
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::full(
                ErrorKind::Io,
                e,
                format!("could not read {}", path.display()),
            )),
        }
    }
}

/// Everything the demos need to connect, after merging the command line, environment and settings file.
#[derive(Clone)]
pub struct DemoConfig {
    pub endpoint: String,
    pub key: String,
    pub database: String,
    pub container: String,
}

impl DemoConfig {
    /// Builds the configuration from parsed arguments, reading the settings file only when needed.
    pub fn from_args(args: &Args) -> Result<Self> {
        let settings = if args.endpoint.is_some() && args.key.is_some() {
            None
        } else {
            AppSettings::load(&args.config)?
        };
        Self::resolve(args, settings)
    }

    /// Merges arguments over settings. Command line and environment values win.
    pub fn resolve(args: &Args, settings: Option<AppSettings>) -> Result<Self> {
        let settings = settings.unwrap_or_default();
        let endpoint = args
            .endpoint
            .clone()
            .or(settings.cosmos_endpoint)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing("CosmosEndpoint", "--endpoint", "AZURE_COSMOS_ENDPOINT"))?;
        let key = args
            .key
            .clone()
            .or(settings.cosmos_master_key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing("CosmosMasterKey", "--key", "AZURE_COSMOS_KEY"))?;

        Ok(Self {
            endpoint,
            key,
            database: args.database.clone(),
            container: args.container.clone(),
        })
    }
}

fn missing(setting: &str, flag: &str, var: &str) -> Error {
    Error::message(
        ErrorKind::Other,
        format!("{setting} is not set; add it to appsettings.json, pass {flag}, or set {var}"),
    )
}

impl fmt::Debug for DemoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .field("database", &self.database)
            .field("container", &self.container)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["client-demos"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    const SETTINGS: &str = r#"{
        "CosmosEndpoint": "https://from-file.documents.azure.com:443/",
        "CosmosMasterKey": "ZmlsZS1rZXk="
    }"#;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["client-demos"]).unwrap();
        assert_eq!(args.config, PathBuf::from("appsettings.json"));
        assert_eq!(args.database, "mydb");
        assert_eq!(args.container, "mystore");
    }

    #[test]
    fn settings_file_supplies_connection() {
        let config =
            DemoConfig::resolve(&args(&[]), Some(AppSettings::from_json(SETTINGS).unwrap()))
                .unwrap();
        assert_eq!(config.endpoint, "https://from-file.documents.azure.com:443/");
        assert_eq!(config.key, "ZmlsZS1rZXk=");
    }

    #[test]
    fn arguments_override_settings() {
        let config = DemoConfig::resolve(
            &args(&[
                "--endpoint",
                "https://localhost:8081/",
                "--database",
                "otherdb",
            ]),
            Some(AppSettings::from_json(SETTINGS).unwrap()),
        )
        .unwrap();
        assert_eq!(config.endpoint, "https://localhost:8081/");
        assert_eq!(config.key, "ZmlsZS1rZXk=");
        assert_eq!(config.database, "otherdb");
    }

    #[test]
    fn missing_values_are_configuration_errors() {
        let error = DemoConfig::resolve(&args(&["--key", "a2V5"]), None).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Other));
        assert!(error.to_string().contains("CosmosEndpoint"));

        let settings = AppSettings::from_json(r#"{"CosmosEndpoint":"https://x/","CosmosMasterKey":""}"#)
            .unwrap();
        let error = DemoConfig::resolve(&args(&[]), Some(settings)).unwrap_err();
        assert!(error.to_string().contains("CosmosMasterKey"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join(format!("no-such-{}.json", uuid::Uuid::new_v4()));
        assert!(AppSettings::load(&path).unwrap().is_none());
    }

    #[test]
    fn debug_hides_key() {
        let config =
            DemoConfig::resolve(&args(&[]), Some(AppSettings::from_json(SETTINGS).unwrap()))
                .unwrap();
        assert!(!format!("{:?}", config).contains("ZmlsZS1rZXk="));
    }
}
