use crate::cli::Args;
use crate::config;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::output::OutputManager;
use crate::resolver::{DnsResolver, Resolve};
use crate::types::{Config, OutputFormat, ScanReport, ScanStats};
use crate::wordlist;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub struct SubprobeEngine {
    config: Config,
    domain: String,
    wordlist: PathBuf,
    output_manager: OutputManager,
    resolver: Option<Arc<dyn Resolve>>,
}

impl SubprobeEngine {
    pub fn new(args: &Args) -> Result<Self> {
        let mut config = config::load_config(args.config_path.as_deref())?;

        // Command line flags win over file and environment
        if let Some(output_file) = args.output_file.clone() {
            config.output.file = Some(output_file);
        }
        if let Some(threads) = args.threads {
            config.resolver.threads = usize::try_from(threads).unwrap_or(usize::MAX);
        }
        if let Some(timeout) = args.timeout {
            config.resolver.timeout = Duration::from_secs(timeout);
        }
        if !args.resolvers.is_empty() {
            config.resolver.nameservers = args.resolvers.clone();
            config.resolver.use_system_resolver = false;
        }
        if args.json {
            config.output.format = OutputFormat::Json;
        }
        if args.csv {
            config.output.format = OutputFormat::Csv;
        }
        if args.silent {
            config.output.silent = true;
        }

        Self::with_config(args.domain.trim(), args.wordlist.clone(), config)
    }

    pub fn with_config(domain: &str, wordlist: PathBuf, config: Config) -> Result<Self> {
        config::validate_config(&config)?;
        let output_manager = OutputManager::new(config.output.clone());

        Ok(Self {
            config,
            domain: domain.to_string(),
            wordlist,
            output_manager,
            resolver: None,
        })
    }

    /// Uses `resolver` instead of building a DNS resolver from the config.
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one full scan: read the wordlist, resolve every candidate, render
    /// the hits.
    pub async fn run(&self) -> Result<ScanStats> {
        let candidates = wordlist::load_candidates(&self.wordlist)?;
        let report = self.scan(&candidates).await?;
        self.output_manager.write_report(&report)?;
        Ok(report.stats)
    }

    pub async fn scan(&self, candidates: &[String]) -> Result<ScanReport> {
        let resolver = match &self.resolver {
            Some(resolver) => Arc::clone(resolver),
            None => Arc::new(DnsResolver::new(&self.config.resolver)?) as Arc<dyn Resolve>,
        };
        let dispatcher = Dispatcher::new(resolver, self.config.resolver.threads)?;

        self.output_manager.status(&format!(
            "Starting subdomain enumeration for {} with {} threads...",
            self.domain,
            dispatcher.concurrency()
        ));

        let report = dispatcher
            .scan(&self.domain, candidates, |resolution| self.output_manager.notify(resolution))
            .await;

        info!(
            "Scan of {} finished: {}/{} resolved, {} transient failures",
            self.domain, report.stats.found, report.stats.attempted, report.stats.transient
        );

        Ok(report)
    }
}
