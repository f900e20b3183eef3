//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::event::{ArrivalBatch, ArrivalRecord};
use crate::landing::LandingProducer;
use crate::reshape::{derive_output_key, ReshapeDriver};
use crate::store::{CloudStore, SharedBlobStore};
use crate::types::LogLevel;
use chrono::Utc;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Exit code when some records of a batch (or some landing iterations) failed
pub const EXIT_PARTIAL_FAILURE: i32 = 2;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load configuration: file, then environment, then command-line flags
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        config.apply_env();
        if let Some(store) = &self.cli.store {
            config.store_url.clone_from(store);
        }
        Ok(config)
    }

    /// Effective log level
    pub fn log_level(&self, config: &AppConfig) -> LogLevel {
        if self.cli.verbose {
            LogLevel::Debug
        } else {
            config.log_level
        }
    }

    /// Run the CLI command, returning the process exit code
    pub async fn run(&self, config: AppConfig) -> Result<i32> {
        match &self.cli.command {
            Commands::Reshape { event, event_json } => {
                self.reshape(&config, event.as_deref(), event_json.as_deref())
                    .await
            }
            Commands::ReshapeObject { container, key } => {
                self.reshape_object(&config, container, key).await
            }
            Commands::Land { once } => self.land(&config, *once).await,
            Commands::DeriveKey { key } => {
                println!("{}", derive_output_key(key, &config.reshape));
                Ok(0)
            }
        }
    }

    /// Open the configured blob store
    fn open_store(config: &AppConfig) -> Result<SharedBlobStore> {
        let store = CloudStore::parse(&config.store_url)?;
        info!("Using {} store", store.backend().scheme());
        Ok(Arc::new(store))
    }

    /// Load the arrival event
    fn load_event(path: Option<&Path>, inline: Option<&str>) -> Result<ArrivalBatch> {
        if let Some(json_str) = inline {
            return ArrivalBatch::from_json_str(json_str);
        }
        if let Some(path) = path {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::config(format!("Failed to read event file: {e}")))?;
            return ArrivalBatch::from_json_str(&content);
        }
        Err(Error::config("No event given (use --event or --event-json)"))
    }

    /// Reshape a batch
    async fn reshape(
        &self,
        config: &AppConfig,
        event: Option<&Path>,
        event_json: Option<&str>,
    ) -> Result<i32> {
        let batch = Self::load_event(event, event_json)?;
        let driver = ReshapeDriver::new(Self::open_store(config)?, config.reshape.clone())?;

        let report = driver.process(&batch).await;
        println!("{}", report.summary());

        Ok(if report.is_complete_success() {
            0
        } else {
            EXIT_PARTIAL_FAILURE
        })
    }

    /// Reshape one object
    async fn reshape_object(&self, config: &AppConfig, container: &str, key: &str) -> Result<i32> {
        let driver = ReshapeDriver::new(Self::open_store(config)?, config.reshape.clone())?;
        let output = driver
            .process_record(&ArrivalRecord::new(container, key))
            .await?;

        println!(
            "{}",
            json!({
                "type": "RECORD",
                "source": output.source.to_string(),
                "destination": output.destination.to_string(),
                "records": output.records,
                "bytes": output.bytes,
            })
        );
        Ok(0)
    }

    /// Land API responses
    async fn land(&self, config: &AppConfig, once: bool) -> Result<i32> {
        let producer = LandingProducer::new(Self::open_store(config)?, config.landing.clone())?;

        if once {
            let location = producer.land_once(Utc::now()).await?;
            println!("{}", json!({"type": "LANDED", "location": location.to_string()}));
            return Ok(0);
        }

        let summary = producer.run().await;
        let landed: Vec<String> = summary.landed.iter().map(ToString::to_string).collect();
        println!(
            "{}",
            json!({
                "type": "LANDING",
                "iterations": summary.iterations(),
                "landed": landed,
                "failures": summary.failures,
            })
        );
        Ok(if summary.failures == 0 {
            0
        } else {
            EXIT_PARTIAL_FAILURE
        })
    }
}
