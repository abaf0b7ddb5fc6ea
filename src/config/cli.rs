use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the RentApp binary.
#[derive(Debug, Parser)]
#[command(name = "rentapp", version, about = "RentApp landing page server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "RENTAPP_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP server.
    Serve(Box<ServeArgs>),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the site title shown in the header.
    #[arg(long = "site-title", value_name = "TITLE")]
    pub site_title: Option<String>,

    /// Session endpoint of the authentication provider.
    #[arg(long = "auth-session-url", value_name = "URL")]
    pub auth_session_url: Option<String>,

    /// Read sessions from `x-auth-user-id`/`x-auth-user-name` when no session endpoint is set.
    #[arg(
        long = "auth-trust-proxy-headers",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub auth_trust_proxy_headers: Option<bool>,

    /// Override the session lookup timeout.
    #[arg(long = "auth-timeout-ms", value_name = "MS")]
    pub auth_timeout_ms: Option<u64>,

    /// Base URL of the RPC backend used for prefetching; prefetching is disabled when unset.
    #[arg(long = "rpc-base-url", value_name = "URL")]
    pub rpc_base_url: Option<String>,

    /// Override the prefetch request timeout.
    #[arg(long = "rpc-timeout-ms", value_name = "MS")]
    pub rpc_timeout_ms: Option<u64>,
}
