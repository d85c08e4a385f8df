use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use consolenav::config::{Cli, Command, ConfigFile, Settings};
use consolenav::event::{ReplayInput, RouterEvent};
use consolenav::host::MemoryBrowser;
use consolenav::input::{help_lines, parse_command, ReplayCommand};
use consolenav::nav::{tenant, TreeIndex};
use consolenav::NavigationTreeService;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_file.as_deref())?;

    let settings = Settings::resolve(&cli, ConfigFile::load().unwrap_or_default());
    let tree = settings.load_tree()?;
    let index = TreeIndex::build(&tree)?;
    tracing::info!(
        "navigation tree loaded: {} nodes, {} patterns",
        tree.count(),
        index.len()
    );

    if cli.command == Command::Tree {
        for pattern in index.patterns() {
            println!("{}", pattern);
        }
        return Ok(());
    }

    let start = cli
        .location
        .clone()
        .or_else(|| match &cli.command {
            Command::Context { url } | Command::Breadcrumbs { url, .. } => Some(url.clone()),
            _ => None,
        })
        .unwrap_or_else(|| String::from("/"));
    let (browser, mut router_rx) = MemoryBrowser::new(settings.tenant.clone(), start.clone());
    let browser = Arc::new(browser);
    let mut service =
        NavigationTreeService::new(index, browser.clone(), browser.clone(), browser)
            .with_history_limit(settings.history_limit);
    service.record_navigation(&start);

    match cli.command {
        Command::Context { url } => {
            visit(&mut service, &mut router_rx, &url);
            print_json(&service.navigation_context())
        }
        Command::Breadcrumbs { url, no_home } => {
            visit(&mut service, &mut router_rx, &url);
            print_json(&service.breadcrumbs(!no_home))
        }
        Command::Replay => replay(service, router_rx).await,
        Command::Tree => Ok(()),
    }
}

/// Navigate to `url` unless already there, and apply the resulting router events.
fn visit(
    service: &mut NavigationTreeService,
    router_rx: &mut mpsc::UnboundedReceiver<RouterEvent>,
    url: &str,
) {
    if service.current_path_without_account() != tenant::strip_tenant_prefix(url) {
        service.navigate_to(url);
    }
    while let Ok(event) = router_rx.try_recv() {
        service.handle_event(event);
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("consolenav=info"));

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
            Ok(None)
        }
    }
}

async fn replay(
    mut service: NavigationTreeService,
    mut router_rx: mpsc::UnboundedReceiver<RouterEvent>,
) -> Result<()> {
    let mut input = ReplayInput::stdin();

    loop {
        tokio::select! {
            biased;

            Some(event) = router_rx.recv() => {
                service.handle_event(event);
            }
            line = input.next() => {
                let Some(line) = line else {
                    break;
                };
                match parse_command(&line) {
                    Ok(ReplayCommand::Quit) => break,
                    Ok(command) => execute(&service, command)?,
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }

    Ok(())
}

fn execute(service: &NavigationTreeService, command: ReplayCommand) -> Result<()> {
    match command {
        ReplayCommand::Go(url) => print_outcome("go", service.navigate_to(&url)),
        ReplayCommand::Up => print_outcome("up", service.navigate_up(false)),
        ReplayCommand::Cancel => print_outcome("cancel", service.navigate_cancel()),
        ReplayCommand::Back => print_outcome("back", service.navigate_back()),
        ReplayCommand::Context => print_json(&service.navigation_context()),
        ReplayCommand::Parent => print_json(&service.logical_parent()),
        ReplayCommand::Crumbs => print_json(&service.breadcrumbs(true)),
        ReplayCommand::History => {
            let entries: Vec<_> = service.history().all().collect();
            print_json(&entries)
        }
        ReplayCommand::Help => {
            for line in help_lines() {
                println!("{}", line);
            }
            Ok(())
        }
        ReplayCommand::Quit => Ok(()),
    }
}

#[derive(Serialize)]
struct Outcome<'a> {
    command: &'a str,
    ok: bool,
}

fn print_outcome(command: &str, ok: bool) -> Result<()> {
    print_json(&Outcome { command, ok })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
