use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use requisitor::clock::{Clock, FixedClock, SystemClock};
use requisitor::config::Config;
use requisitor::constants::NOT_AVAILABLE;
use requisitor::dashboard::DashboardStats;
use requisitor::logger;
use requisitor::models::{Request, Role, User};
use requisitor::panel::{Panel, PanelFilter, PanelTab};
use requisitor::status::{self, StatusCalculator};
use requisitor::utils::{currency, date};
use requisitor::RequestBook;

#[derive(Parser)]
#[command(name = "requisitor", version, about = "Track construction-site purchases, rentals and services")]
struct Cli {
    /// Configuration file (defaults to ./requisitor.toml, then the XDG config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate statuses as of this date instead of now (YYYY-MM-DD)
    #[arg(long, global = true)]
    at: Option<String>,

    /// Only show requests raised by this person
    #[arg(long, global = true)]
    requester: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the lifecycle status of every request in a file
    Status {
        file: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print dashboard counters for a request file
    Dashboard { file: PathBuf },
    /// List one panel tab, optionally filtered
    Panel {
        file: PathBuf,
        #[arg(long, default_value = "overdue")]
        tab: PanelTab,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        site: Option<String>,
    },
    /// Print the span between two dates
    Duration { start: String, end: String },
    /// Write a default configuration file
    InitConfig { path: Option<PathBuf> },
}

/// Clock pinned to `--at` when given, the system clock otherwise
fn clock_for(at: Option<&str>) -> Result<Box<dyn Clock>> {
    match at {
        Some(value) => date::parse_datetime(value)
            .map(|dt| Box::new(FixedClock::new(dt)) as Box<dyn Clock>)
            .ok_or_else(|| anyhow::anyhow!("'{}' is not a valid date", value)),
        None => Ok(Box::new(SystemClock)),
    }
}

/// Load a request file with the configured display patterns
fn load_book(file: &Path, config: &Config) -> Result<RequestBook> {
    Ok(RequestBook::load_from_file(file)?.with_display(config.display.clone()))
}

/// Requests visible to the `--requester` filter, or all of them
fn visible<'a>(book: &'a RequestBook, requester: Option<&str>) -> Vec<&'a Request> {
    match requester {
        Some(name) => book.visible_to(&User {
            id: "cli".to_string(),
            full_name: name.to_string(),
            email: String::new(),
            role: Role::User,
        }),
        None => book.iter().collect(),
    }
}

fn print_status(requests: &[&Request], calculator: &StatusCalculator, now: NaiveDateTime, json: bool) -> Result<()> {
    let mut rows = Vec::new();

    for &request in requests {
        let base = request.base();
        let (label, info, days) = match request {
            Request::Rental(rental) => {
                let status = calculator.rental(rental, now);
                (status.status.label(), status.info, status.days)
            }
            Request::Service(service) => {
                let status = calculator.service(service, now);
                (status.status.label(), status.info, status.days)
            }
            Request::Purchase(_) => (NOT_AVAILABLE, String::new(), None),
        };

        if json {
            rows.push(serde_json::json!({
                "id": base.id,
                "kind": request.kind().to_string(),
                "title": base.title,
                "approval": base.approval_status.to_string(),
                "status": label,
                "info": info,
                "days": days,
            }));
        } else {
            let value = request
                .as_service()
                .map(|s| format!(" [{}]", currency::format_currency(Some(s.value))))
                .unwrap_or_default();
            println!(
                "{:<8} {:<9} {:<12} {:<12} {}{} - {}",
                base.id,
                request.kind(),
                base.approval_status,
                label,
                base.title,
                value,
                info
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows).context("Failed to serialize statuses")?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    logger::init(&config.logging)?;

    let now = clock_for(cli.at.as_deref())?.now();
    let calculator = config.status_calculator();

    match cli.command {
        Command::Status { file, json } => {
            let book = load_book(&file, &config)?;
            let requests = visible(&book, cli.requester.as_deref());
            print_status(&requests, &calculator, now, json)?;
        }
        Command::Dashboard { file } => {
            let book = load_book(&file, &config)?;
            let requests = visible(&book, cli.requester.as_deref());
            let stats = DashboardStats::compute_with(&calculator, requests, now);
            println!("Total requests:        {}", stats.total_requests);
            println!("Pending approval:      {}", stats.pending_requests);
            println!("Active:                {}", stats.active);
            println!("Overdue rentals:       {}", stats.overdue_rentals);
            println!("Rentals due soon:      {}", stats.rentals_due_soon);
            println!("Critical:              {}", stats.critical);
            println!("Services in progress:  {}", stats.services_in_progress);
        }
        Command::Panel {
            file,
            tab,
            search,
            site,
        } => {
            let book = load_book(&file, &config)?;
            let requests = visible(&book, cli.requester.as_deref());
            let panel = Panel::build_with(&calculator, requests, now);

            for t in PanelTab::ALL {
                let marker = if t == tab { '*' } else { ' ' };
                println!("{} {:<22} {}", marker, t.to_string(), panel.count(t));
            }
            println!();

            let filter = PanelFilter { search, site };
            let entries = panel.filtered(tab, &filter);
            print_status(&entries, &calculator, now, false)?;
        }
        Command::Duration { start, end } => {
            println!("{}", status::calculate_duration(Some(start.as_str()), Some(end.as_str())));
        }
        Command::InitConfig { path } => {
            let path = match path {
                Some(path) => path,
                None => Config::get_default_config_path()?,
            };
            Config::generate_default_config(path)?;
        }
    }

    Ok(())
}
