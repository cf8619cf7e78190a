use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{error, info};

use checkmk::cli::{Cli, Commands};
use checkmk::log::init_logging;
use checkmk::{Client, Host, Service, load_configuration};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    init_logging()?;

    let mut config = load_configuration(&cli.config)
        .with_context(|| format!("Could not load configuration from {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);

    let client = Client::new(config).context("Could not create Checkmk client")?;
    let result = run(&client, cli.command).await;

    if let Err(e) = client.close().await {
        error!(error:% = e; "Failed to close HTTP session");
    }
    result
}

async fn run(client: &Client, command: Commands) -> Result<()> {
    match command {
        Commands::Hosts { problems, services } => {
            let hosts = client.get_hosts().await.context("Could not list hosts")?;
            for host in hosts.iter().filter(|h| !problems || h.problem()) {
                print_host(host);
                if services {
                    for service in host.services().await? {
                        print!("  ");
                        print_service(&service);
                    }
                }
            }
        },
        Commands::Services { host, problems } => {
            let services = match host {
                Some(host) => client.services_for_host(&host).await?,
                None => client.get_services().await?,
            };
            for service in services.iter().filter(|s| !problems || s.problem()) {
                print_service(service);
            }
        },
        Commands::CommentHost {
            host,
            comment,
            persistent,
        } => {
            find_host(client, &host).await?.add_comment(&comment, persistent).await?;
            info!(host = &*host; "Host comment added");
            println!("Comment added to {}", host);
        },
        Commands::CommentService {
            host,
            service,
            comment,
            persistent,
        } => {
            find_service(client, &host, &service)
                .await?
                .add_comment(&comment, persistent)
                .await?;
            info!(host = &*host, service = &*service; "Service comment added");
            println!("Comment added to {}/{}", host, service);
        },
        Commands::AckHost { host, comment, options } => {
            find_host(client, &host)
                .await?
                .acknowledge(&comment, options.options())
                .await?;
            println!("Acknowledged problem on {}", host);
        },
        Commands::AckService {
            host,
            service,
            comment,
            options,
        } => {
            find_service(client, &host, &service)
                .await?
                .acknowledge(&comment, options.options())
                .await?;
            println!("Acknowledged problem on {}/{}", host, service);
        },
    }
    Ok(())
}

async fn find_host(client: &Client, name: &str) -> Result<Host> {
    client
        .get_hosts()
        .await?
        .into_iter()
        .find(|h| h.name() == name)
        .ok_or_else(|| anyhow!("Host '{}' not found", name))
}

async fn find_service(client: &Client, host: &str, description: &str) -> Result<Service> {
    client
        .services_for_host(host)
        .await?
        .into_iter()
        .find(|s| s.description() == description)
        .ok_or_else(|| anyhow!("Service '{}' not found on host '{}'", description, host))
}

fn print_host(host: &Host) {
    println!(
        "{:<32} {:<12} {}",
        host.name(),
        host.state(),
        if host.acknowledged() { "acknowledged" } else { "" }
    );
}

fn print_service(service: &Service) {
    println!(
        "{:<24} {:<32} {:<8} {}",
        service.host_name(),
        service.description(),
        service.state(),
        service.details.output.plugin_output.as_deref().unwrap_or("")
    );
}
