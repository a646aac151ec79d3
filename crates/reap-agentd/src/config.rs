//! Process configuration.
//!
//! Every flag falls back to an environment variable, so the daemon can be
//! configured entirely from the deployment environment:
//!
//! ```bash
//! TIME_LIMIT=180 REGION=europe-west1 PROJECT=my-project reap-agentd
//! reap-agentd --max-duration-minutes 180 --region europe-west1 --port 9090
//! ```
use std::{net::SocketAddr, time::Duration};

use anyhow::{Context, bail};
use clap::Parser;

use reap_core::ReapOptions;
use reap_exec::gcloud::GcloudConfig;
use reap_model::{DEFAULT_MAX_DURATION_MINUTES, DEFAULT_REGION, MaxDuration, ReapPolicy, Region};
use reap_observe::LoggerConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "reap-agentd")]
#[command(about = "Cancels Dataflow jobs that run longer than a configured limit")]
#[command(version)]
pub struct Config {
    /// Jobs running for strictly more whole minutes than this are cancelled
    #[arg(
        long = "max-duration-minutes",
        env = "TIME_LIMIT",
        default_value_t = DEFAULT_MAX_DURATION_MINUTES
    )]
    pub max_duration_minutes: u64,

    /// Region whose active jobs are inspected
    #[arg(long, env = "REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Project to operate on (gcloud default project when unset)
    #[arg(long, env = "PROJECT")]
    pub project: Option<String>,

    /// Path of the gcloud binary
    #[arg(long = "gcloud", env = "GCLOUD_BIN", default_value = "gcloud")]
    pub gcloud_bin: String,

    // === Server ===
    /// Port the trigger endpoint listens on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Host/IP the trigger endpoint binds to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // === Execution ===
    /// Maximum number of cancel requests in flight (1 = sequential)
    #[arg(long, env = "CANCEL_CONCURRENCY", default_value_t = 4)]
    pub cancel_concurrency: usize,

    /// Upper bound of any single gcloud call, in seconds
    #[arg(long, env = "CALL_TIMEOUT_SECS", default_value_t = 120)]
    pub call_timeout_secs: u64,

    // === Logging ===
    /// Log output: text, json or journald
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log filter expression, e.g. "info" or "reap_core=debug,info"
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Check the settings that clap cannot check on its own.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cancel_concurrency == 0 {
            bail!("cancel concurrency must be at least 1");
        }
        if self.call_timeout_secs == 0 {
            bail!("call timeout must be greater than zero");
        }
        self.policy()?;
        self.gcloud_config().validate()?;
        self.socket_addr()?;
        self.logger_config()?;
        Ok(())
    }

    /// Default policy applied to every pass.
    pub fn policy(&self) -> anyhow::Result<ReapPolicy> {
        let region: Region = self
            .region
            .parse()
            .with_context(|| format!("invalid region '{}'", self.region))?;
        Ok(ReapPolicy::new(
            MaxDuration::from_minutes(self.max_duration_minutes),
            region,
        ))
    }

    pub fn reap_options(&self) -> ReapOptions {
        ReapOptions {
            cancel_concurrency: self.cancel_concurrency,
            call_timeout: Duration::from_secs(self.call_timeout_secs),
        }
    }

    pub fn gcloud_config(&self) -> GcloudConfig {
        GcloudConfig {
            program: self.gcloud_bin.clone(),
            project: self.project.clone(),
            ..Default::default()
        }
    }

    pub fn logger_config(&self) -> anyhow::Result<LoggerConfig> {
        LoggerConfig::from_parts(&self.log_format, &self.log_level)
            .context("invalid logger configuration")
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("reap-agentd").chain(args.iter().copied()))
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--max-duration-minutes",
            "180",
            "--region",
            "europe-west1",
            "--project",
            "my-project",
            "--cancel-concurrency",
            "1",
        ])
        .unwrap();

        cfg.validate().unwrap();
        let policy = cfg.policy().unwrap();
        assert_eq!(policy.max_duration.minutes(), 180);
        assert_eq!(policy.region.as_str(), "europe-west1");
        assert_eq!(cfg.gcloud_config().project.as_deref(), Some("my-project"));
        assert_eq!(cfg.reap_options().cancel_concurrency, 1);
    }

    #[test]
    fn non_numeric_threshold_fails_to_parse() {
        assert!(parse(&["--max-duration-minutes", "sixty"]).is_err());
        assert!(parse(&["--max-duration-minutes", "-5"]).is_err());
    }

    #[test]
    fn invalid_region_fails_validation() {
        let cfg = parse(&["--region", "US Central"]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_concurrency_fails_validation() {
        let cfg = parse(&["--cancel-concurrency", "0"]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn invalid_host_fails_validation() {
        let cfg = parse(&["--host", "not an ip"]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_log_format_fails_validation() {
        let cfg = parse(&["--log-format", "xml"]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn options_carry_the_call_timeout() {
        let cfg = parse(&["--call-timeout-secs", "30"]).unwrap();
        assert_eq!(cfg.reap_options().call_timeout, Duration::from_secs(30));
    }
}
