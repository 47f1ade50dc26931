//! The `treeline` application: command dispatch on top of a loaded config.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use treeline_api::ApiState;
use treeline_core::{Error, Result};
use treeline_store::{GraphStore, MemoryStore, Neo4jStore, SeedSet, fetch_forest_with_report, seed};

use crate::cli::{CliArgs, Command};
use crate::config::{StoreBackend, TreelineConfig};
use crate::{config_handlers, render};

// ============================================================================
// TreelineCli
// ============================================================================

/// CLI application holding the effective configuration.
pub struct TreelineCli {
    name: String,
    config: Arc<TreelineConfig>,
    version: String,
}

impl TreelineCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = TreelineConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: TreelineConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The effective configuration.
    pub fn config(&self) -> &TreelineConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Serve { port, host }) => self.cmd_serve(host, port).await,
            Some(Command::Seed { fixture }) => {
                let summary = self.cmd_seed(fixture.as_deref()).await?;
                println!(
                    "Seeded {} nodes and {} edges",
                    summary.nodes_created, summary.edges_created
                );
                Ok(())
            }
            Some(Command::Tree { json }) => {
                print!("{}", self.cmd_tree(json).await?);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Open the configured graph store.
    pub async fn open_store(&self) -> Result<Arc<dyn GraphStore>> {
        match self.config.store.backend {
            StoreBackend::Neo4j => {
                let settings = self.config.neo4j_settings();
                tracing::info!(uri = %settings.uri, "connecting to neo4j");
                let store = Neo4jStore::connect(&settings).await?;
                Ok(Arc::new(store))
            }
            StoreBackend::Memory => {
                tracing::info!("using in-memory store");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }

    /// The seed dataset: `fixture` if given, else whatever the config selects.
    pub fn seed_set(&self, fixture: Option<&str>) -> Result<SeedSet> {
        let set = match fixture {
            Some(path) => SeedSet::load(path)?,
            None => SeedSet::from_config(self.config.as_ref())?,
        };
        set.validate()?;
        Ok(set)
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    async fn cmd_serve(&self, host: Option<String>, port: Option<u16>) -> Result<()> {
        let host = host.unwrap_or_else(|| self.config.server.host.clone());
        let port = port.unwrap_or(self.config.server.port);

        let seed_set = self.seed_set(None)?;
        let store = self.open_store().await?;
        if let Err(err) = store.ping().await {
            tracing::warn!(error = %err, "store is not reachable yet");
        }

        tracing::info!(project = %self.config.project_name, "starting {}", self.name);
        treeline_api::serve(ApiState::new(store, seed_set), &host, port).await
    }

    async fn cmd_seed(&self, fixture: Option<&str>) -> Result<treeline_store::SeedSummary> {
        let set = self.seed_set(fixture)?;
        if self.config.store.backend == StoreBackend::Memory {
            tracing::warn!("seeding the in-memory store; data is discarded on exit");
        }
        let store = self.open_store().await?;
        seed(store.as_ref(), &set).await
    }

    async fn cmd_tree(&self, json: bool) -> Result<String> {
        let store = self.open_store().await?;
        let (forest, report) = fetch_forest_with_report(store.as_ref()).await?;
        tracing::debug!(
            nodes = report.node_count,
            roots = report.root_count,
            "fetched forest"
        );

        if json {
            let mut out = serde_json::to_string_pretty(&forest)
                .map_err(|e| Error::serialization(e.to_string()))?;
            out.push('\n');
            Ok(out)
        } else {
            Ok(render::render_forest(&forest))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
