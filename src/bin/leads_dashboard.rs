//! Terminal admin dashboard: signs in, polls the lead list and accepts
//! commands on stdin.

use std::env;
use std::time::Duration;

use chrono::Utc;
use config::Config;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};

use evcare_leads::dashboard::client::LeadsApi;
use evcare_leads::dashboard::render::render;
use evcare_leads::dashboard::view::{LeadsView, resolve_lead_id};
use evcare_leads::dashboard::{Dashboard, StatusChange};
use evcare_leads::domain::types::LeadStatus;
use evcare_leads::models::config::DashboardConfig;

const HELP: &str = "Commands: search <q> | clear | sort | open <id> | status <id> <status> | refresh | quit";

enum Command {
    Search(String),
    Clear,
    Sort,
    Open(String),
    Status(String, String),
    Refresh,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match head {
        "search" => Command::Search(rest.to_string()),
        "clear" => Command::Clear,
        "sort" => Command::Sort,
        "open" => Command::Open(rest.to_string()),
        "status" => match rest.split_once(' ') {
            Some((id, status)) => Command::Status(id.to_string(), status.trim().to_string()),
            None => Command::Unknown,
        },
        "refresh" => Command::Refresh,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

fn load_config() -> Result<DashboardConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::File::with_name(&format!("config/dashboard-{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD"))
        .build()?
        .try_deserialize()
}

fn redraw(dashboard: &Dashboard, view: &LeadsView) {
    let state = dashboard.cache().snapshot();
    println!("\n{}", render(&state, view, Utc::now().date_naive()));
    println!("{HELP}");
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let dashboard_config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading dashboard config: {err}");
            std::process::exit(1);
        }
    };

    let api = match LeadsApi::new(&dashboard_config.api_url) {
        Ok(api) => api,
        Err(err) => {
            log::error!("Error building HTTP client: {err}");
            std::process::exit(1);
        }
    };

    let dashboard =
        match Dashboard::connect(api, &dashboard_config.email, &dashboard_config.password).await {
            Ok(dashboard) => dashboard,
            Err(err) => {
                log::error!("Sign-in failed: {err}");
                std::process::exit(1);
            }
        };

    let poller =
        dashboard.start_polling(Duration::from_secs(dashboard_config.poll_interval_secs.max(1)));
    let mut updates = dashboard.cache().subscribe();
    let mut view = LeadsView::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                updates.borrow_and_update();
                redraw(&dashboard, &view);
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        log::error!("Failed to read stdin: {err}");
                        break;
                    }
                };
                match parse_command(&line) {
                    Command::Search(query) => view.set_search(query),
                    Command::Clear => view.clear_search(),
                    Command::Sort => view.toggle_sort(),
                    Command::Open(needle) => {
                        match resolve_lead_id(&dashboard.cache().snapshot().leads, &needle) {
                            Some(id) => view.toggle_expanded(id),
                            None => println!("No single lead matches `{needle}`"),
                        }
                    }
                    Command::Status(needle, status) => {
                        let Ok(status) = status.parse::<LeadStatus>() else {
                            println!("Unknown status `{status}`; use pending, contacted or resolved");
                            continue;
                        };
                        let Some(id) = resolve_lead_id(&dashboard.cache().snapshot().leads, &needle) else {
                            println!("No single lead matches `{needle}`");
                            continue;
                        };
                        match dashboard.change_status(id, status).await {
                            Ok(StatusChange::Updated(_)) => {
                                println!("Status updated to \"{}\"", status.label());
                            }
                            Ok(StatusChange::Unchanged) => {
                                println!("Lead is already {}", status.label());
                            }
                            Err(err) => println!("Failed to update status: {err}"),
                        }
                    }
                    Command::Refresh => {
                        dashboard.refresh().await;
                    }
                    Command::Quit => break,
                    Command::Unknown => println!("{HELP}"),
                }
                redraw(&dashboard, &view);
            }
        }
    }

    poller.stop();
}
