use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::ClientConfig;
use crate::http::AcknowledgeOptions;

#[derive(Parser)]
#[command(name = "checkmk")]
#[command(about = "Checkmk REST API client", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Path to the configuration file",
        default_value = "config/config.toml"
    )]
    pub config: PathBuf,
    #[arg(long, global = true, help = "Override the configured Checkmk server host")]
    pub host_name: Option<String>,
    #[arg(long, global = true, help = "Override the configured Checkmk site")]
    pub site: Option<String>,
    #[arg(long, global = true, help = "Override the configured bearer token")]
    pub bearer_token: Option<String>,
    #[arg(long, global = true, help = "Override the number of attempts per request")]
    pub max_retries: Option<u32>,
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies command line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(host) = &self.host_name {
            config.host = host.clone();
        }
        if let Some(site) = &self.site {
            config.site = site.clone();
        }
        if let Some(token) = &self.bearer_token {
            config.bearer_token = Some(token.clone());
        }
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List hosts
    Hosts {
        #[arg(long, help = "Only show hosts that are not UP")]
        problems: bool,
        #[arg(long, help = "Also list the services of every host")]
        services: bool,
    },
    /// List services
    Services {
        #[arg(long, help = "Only show services of this host")]
        host: Option<String>,
        #[arg(long, help = "Only show services that are not OK")]
        problems: bool,
    },
    /// Add a comment to a host
    CommentHost {
        #[arg(long, help = "Name of the host")]
        host: String,
        #[arg(short, long, help = "Comment text")]
        comment: String,
        #[arg(long, help = "Keep the comment across core restarts")]
        persistent: bool,
    },
    /// Add a comment to a service
    CommentService {
        #[arg(long, help = "Name of the host")]
        host: String,
        #[arg(short, long, help = "Service description")]
        service: String,
        #[arg(short, long, help = "Comment text")]
        comment: String,
        #[arg(long, help = "Keep the comment across core restarts")]
        persistent: bool,
    },
    /// Acknowledge a host problem
    AckHost {
        #[arg(long, help = "Name of the host")]
        host: String,
        #[arg(short, long, help = "Acknowledgement comment")]
        comment: String,
        #[command(flatten)]
        options: AckArgs,
    },
    /// Acknowledge a service problem
    AckService {
        #[arg(long, help = "Name of the host")]
        host: String,
        #[arg(short, long, help = "Service description")]
        service: String,
        #[arg(short, long, help = "Acknowledgement comment")]
        comment: String,
        #[command(flatten)]
        options: AckArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct AckArgs {
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        help = "Keep the acknowledgement until the problem recovers"
    )]
    pub sticky: bool,
    #[arg(long, help = "Keep the acknowledgement comment across core restarts")]
    pub persistent: bool,
    #[arg(long, help = "Do not send an acknowledgement notification")]
    pub no_notify: bool,
}

impl AckArgs {
    pub fn options(&self) -> AcknowledgeOptions {
        AcknowledgeOptions {
            sticky: self.sticky,
            persistent: self.persistent,
            notify: !self.no_notify,
        }
    }
}
