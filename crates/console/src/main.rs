mod cli;
mod render;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use manga_admin_core::{
    credential, load_config_or_default, validate_config, AdminConsole, GateDecision,
};

use cli::{Cli, Commands};
use terminal::TerminalUi;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Initialize logging; stdout stays clean for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    info!("Loading configuration from {:?}", cli.config);
    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    validate_config(&config).context("Configuration validation failed")?;

    let console = AdminConsole::from_config(config, Arc::new(TerminalUi))
        .context("Failed to create HTTP client")?;

    let succeeded = match cli.command {
        Commands::Login { username, password } => {
            login(&console, &username, password.as_deref().unwrap_or_default()).await
        }
        Commands::Logout => {
            console.auth().logout().context("Failed to clear session")?;
            true
        }
        Commands::Whoami => whoami(&console),
        Commands::List { tag, page, json } => list(&console, tag, page - 1, json).await?,
        Commands::Tags => tags(&console).await,
        Commands::Delete { ids } => {
            console.enter_catalog() && console.batch().delete_many(&ids).await.is_ok()
        }
        Commands::Import { file } => {
            console.enter_catalog() && console.batch().import_file(&file).await.is_ok()
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn login(console: &AdminConsole, username: &str, password: &str) -> bool {
    if console.login(username, password).await.is_err() {
        return false;
    }
    if let Some(page) = console.catalog().page().await {
        println!("{}", render::render_page(&page, None));
    }
    true
}

fn whoami(console: &AdminConsole) -> bool {
    let GateDecision::Allow(session) = console.gate().check() else {
        println!("未登录");
        return false;
    };

    match &session.user {
        Some(user) => println!("{} (id {}, {})", user.username, user.id, user.role),
        None => println!("(未知用户)"),
    }
    if let Some(exp) = credential::decode(&session.token).and_then(|p| p.expires_at()) {
        println!("令牌过期时间: {}", exp);
    }
    true
}

async fn list(
    console: &AdminConsole,
    tag: Option<String>,
    page_index: u32,
    json: bool,
) -> Result<bool> {
    if !console.enter_catalog() {
        return Ok(false);
    }

    let catalog = console.catalog();
    if tag.is_some() {
        if catalog.set_filter(tag).await.is_err() {
            return Ok(false);
        }
        if page_index > 0 && catalog.goto_page(page_index).await.is_err() {
            return Ok(false);
        }
    } else if catalog.goto_page(page_index).await.is_err() {
        return Ok(false);
    }

    let Some(page) = catalog.page().await else {
        return Ok(false);
    };
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&page).context("Failed to encode page")?
        );
    } else {
        let filter = catalog.filter().await;
        println!("{}", render::render_page(&page, filter.as_deref()));
    }
    Ok(true)
}

async fn tags(console: &AdminConsole) -> bool {
    if !console.enter_catalog() {
        return false;
    }
    let catalog = console.catalog();
    catalog.load_tag_vocabulary().await;
    for tag in catalog.tags().await {
        println!("{}", tag);
    }
    true
}
