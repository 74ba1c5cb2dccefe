//! `dashboard` command line client.
//!
//! A thin driver over the library state: every command goes through the same
//! [`App`] handlers a view layer would use, then prints the resulting state.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use dashboard::app::{FetchStatus, Screen};
use dashboard::core::SystemClock;
use dashboard::services::api::ApiClient;
use dashboard::services::storage::FileTokenStore;
use dashboard::{logger, App, AppError, AppServices, DashboardConfig, Result};
use shared::{format_vnd, ChangePasswordRequest, CreateUserRequest, FilterType};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Filter {
    Day,
    Month,
    Year,
}

impl From<Filter> for FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Day => FilterType::Day,
            Filter::Month => FilterType::Month,
            Filter::Year => FilterType::Year,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dashboard", version, about = "Business reporting client: revenue, products, users")]
struct Cli {
    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Login { username: String, password: String },

    /// Remove the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Revenue report for the period containing a date
    Revenue {
        #[arg(long, value_enum, default_value_t = Filter::Year)]
        filter: Filter,

        /// Date inside the period, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List products, or show one
    Products {
        #[arg(long)]
        id: Option<i64>,
    },

    /// List users, or show one
    Users {
        #[arg(long)]
        id: Option<i64>,
    },

    /// Create a user account
    CreateUser {
        username: String,
        email: String,
        password: String,
        #[arg(long, default_value = "")]
        full_name: String,
        /// Gender flag sent as `true`
        #[arg(long)]
        male: bool,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        date_of_birth: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        avatar: String,
        #[arg(long, default_value = "Member")]
        role: String,
    },

    /// Change a user's password
    ChangePassword {
        username: String,
        password: String,
        confirm_password: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = logger::init(&config, cli.verbose);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &DashboardConfig) -> Result<()> {
    let services = AppServices::new(
        Arc::new(ApiClient::new(&config.api_base_url, config.request_timeout_secs)?),
        Arc::new(FileTokenStore::new(&config.data_dir)),
        Arc::new(SystemClock),
        config.retry_policy(),
    );
    let mut app = App::new(services);

    match command {
        Command::Login { username, password } => {
            let payload = app.services().session.login(username, password).await?;
            match payload.user {
                Some(user) => println!("Signed in as {} ({})", user.display_name(), user.role().label()),
                None => println!("Signed in"),
            }
        }
        Command::Logout => {
            app.handle_logout();
            println!("Signed out");
        }
        Command::Status => {
            let state = app.state.read();
            println!("API:     {}", config.api_base_url);
            println!(
                "Session: {}",
                if state.is_authenticated() { "signed in" } else { "signed out" }
            );
        }
        Command::Revenue { filter, date } => revenue(&mut app, filter.into(), date).await?,
        Command::Products { id } => products(&mut app, id).await?,
        Command::Users { id } => users(&mut app, id).await?,
        Command::CreateUser {
            username,
            email,
            password,
            full_name,
            male,
            date_of_birth,
            address,
            phone,
            avatar,
            role,
        } => {
            require_session(&app)?;
            app.handle_create_user(CreateUserRequest {
                username,
                email,
                password,
                full_name,
                gender: male,
                date_of_birth,
                address,
                phone,
                avatar,
                role_name: role,
            });
            while app.state.read().create_user.submitting {
                app.process_next_event().await;
            }
            check_session(&app)?;
            let state = app.state.read();
            if let Some(error) = &state.create_user.error {
                return Err(AppError::Api(error.clone()));
            }
            println!("{}", state.create_user.message.as_deref().unwrap_or_default());
        }
        Command::ChangePassword {
            username,
            password,
            confirm_password,
        } => {
            app.handle_change_password(ChangePasswordRequest {
                username,
                password,
                confirm_password,
            });
            while app.state.read().change_password.submitting {
                app.process_next_event().await;
            }
            let state = app.state.read();
            if let Some(error) = &state.change_password.error {
                return Err(AppError::Api(error.clone()));
            }
            println!("{}", state.change_password.message.as_deref().unwrap_or_default());
        }
    }

    Ok(())
}

fn require_session(app: &App) -> Result<()> {
    if app.state.read().is_authenticated() {
        Ok(())
    } else {
        Err(AppError::Authentication("Not signed in. Run `dashboard login` first.".to_string()))
    }
}

/// Error out if the last event signed the session out.
fn check_session(app: &App) -> Result<()> {
    if app.state.read().current_screen == Screen::Login {
        Err(AppError::Authentication(
            "Session expired. Run `dashboard login` again.".to_string(),
        ))
    } else {
        Ok(())
    }
}

async fn revenue(app: &mut App, filter: FilterType, date: Option<String>) -> Result<()> {
    require_session(app)?;

    let date = match date {
        Some(value) => lib_utils::parse_date(&value)?,
        None => lib_utils::now_local().date_naive(),
    };

    app.handle_report_select(filter, lib_utils::start_of_day_millis(date));
    if let Some(alert) = app.state.read().dashboard.alert.clone() {
        return Err(AppError::Validation(alert));
    }

    while app.state.read().dashboard.is_loading() {
        app.process_next_event().await;
    }
    check_session(app)?;

    let state = app.state.read();
    let dashboard = &state.dashboard;
    match &dashboard.status {
        FetchStatus::Loaded(_) => {
            let query = dashboard.query()?;
            println!("Revenue report: {} ({})", query, dashboard.filter_type);
            if let Some(kpis) = dashboard.kpis() {
                println!("  Revenue: {:>20}", format_vnd(kpis.revenue));
                println!("  Profit:  {:>20}", format_vnd(kpis.profit));
            }
            if let Some(chart) = dashboard.chart() {
                println!();
                for (label, value) in chart.labels.iter().zip(chart.values.iter()) {
                    println!("  {:<8} {:>20}", label, format_vnd(*value));
                }
            }
            Ok(())
        }
        FetchStatus::Errored(message) => Err(AppError::Transient(message.clone())),
        FetchStatus::Idle | FetchStatus::Loading => Ok(()),
    }
}

async fn products(app: &mut App, id: Option<i64>) -> Result<()> {
    require_session(app)?;

    app.handle_screen_change(Screen::Products);
    while app.state.read().products.loading {
        app.process_next_event().await;
    }

    if let Some(id) = id {
        app.handle_screen_change(Screen::ProductDetail(id));
    }

    let state = app.state.read();
    if let Some(error) = &state.products.error {
        return Err(AppError::Api(error.clone()));
    }

    match id {
        Some(id) => {
            let product = state
                .products
                .selected_item()
                .ok_or_else(|| AppError::Api(format!("Product {} not found", id)))?;
            println!("#{} {}", product.id, product.name);
            println!("  Price:       {}", format_vnd(product.price));
            if let Some(description) = &product.description {
                println!("  Description: {}", description);
            }
            if let Some(image_url) = &product.image_url {
                println!("  Image:       {}", image_url);
            }
        }
        None => {
            for product in &state.products.items {
                println!("{:>6}  {:<40} {:>16}", product.id, product.name, format_vnd(product.price));
            }
            println!("{} products", state.products.items.len());
        }
    }
    Ok(())
}

async fn users(app: &mut App, id: Option<i64>) -> Result<()> {
    require_session(app)?;

    app.handle_screen_change(Screen::Users);
    if app.state.read().current_screen != Screen::Users {
        return Err(AppError::Api("The user list is not available for this account".to_string()));
    }
    while app.state.read().users.loading {
        app.process_next_event().await;
    }

    if let Some(id) = id {
        app.handle_screen_change(Screen::UserDetail(id));
    }

    let state = app.state.read();
    if let Some(error) = &state.users.error {
        return Err(AppError::Api(error.clone()));
    }

    match id {
        Some(id) => {
            let user = state
                .users
                .selected_item()
                .ok_or_else(|| AppError::Api(format!("User {} not found", id)))?;
            println!("#{} {} ({})", user.id, user.display_name(), user.username);
            println!("  Role:    {}", user.role().label());
            let fields = [
                ("Email", &user.email),
                ("Phone", &user.phone),
                ("Address", &user.address),
                ("Born", &user.date_of_birth),
            ];
            for (label, value) in fields {
                if let Some(value) = value {
                    println!("  {:<8} {}", format!("{}:", label), value);
                }
            }
        }
        None => {
            for user in &state.users.items {
                println!(
                    "{:>6}  {:<24} {:<32} {}",
                    user.id,
                    user.username,
                    user.display_name(),
                    user.role().label()
                );
            }
            println!("{} users", state.users.items.len());
        }
    }
    Ok(())
}
