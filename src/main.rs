//! `maintenance`: command-line front-end for the marketplace backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! A third front-end next to the admin console and the web app. It builds the
//! same `ApiClient` + `AuthProvider` pair from an app profile, keeps the
//! session in a JSON file between runs, and prints every response as pretty
//! JSON on stdout. Diagnostics go to stderr through `tracing`.


use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use maintenance_client::{
    ApiClient, ApiError, AppProfile, AuthProvider, ClientConfig, ConfigError, FileStorage, LOGIN_PATH,
    LoginCredentials, LoginOutcome, MemoryNavigator, Query,
};
use serde_json::{Map, Value};

const STORE_ENV: &str = "MAINTENANCE_STORE";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("login failed: {0}")]
    Login(String),
    #[error("no session store path; pass --store or set {STORE_ENV} or HOME")]
    MissingStorePath,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "maintenance", about = "Maintenance marketplace API CLI")]
struct Cli {
    /// Backend root including `/api`. Defaults per app profile.
    #[arg(long, env = "MAINTENANCE_API_BASE_URL")]
    base_url: Option<String>,

    /// Which application's session and role gate to use.
    #[arg(long, env = "MAINTENANCE_APP", default_value = "web")]
    app: AppProfile,

    /// Session store file.
    #[arg(long, env = STORE_ENV)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session.
    Login {
        /// Email address or phone number.
        identifier: String,
        #[arg(long, env = "MAINTENANCE_PASSWORD")]
        password: String,
    },
    Logout,
    /// Print the stored user.
    Whoami,
    Health,
    Profile,
    Admin(AdminCommand),
    Web(WebCommand),
}

// =============================================================================
// ADMIN
// =============================================================================

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Stats,
    Users(ListArgs),
    Providers(ListArgs),
    /// Approve or reject a provider's verification documents.
    Verification {
        provider_id: String,
        #[arg(value_enum)]
        decision: Decision,
        #[arg(long)]
        notes: Option<String>,
    },
    Bookings(ListArgs),
    Analytics {
        #[arg(long)]
        period: Option<String>,
    },
    Revenue {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    Settings,
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    user_type: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    page: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Decision {
    Approve,
    Reject,
}

// =============================================================================
// WEB
// =============================================================================

#[derive(Args, Debug)]
struct WebCommand {
    #[command(subcommand)]
    command: WebSubcommand,
}

#[derive(Subcommand, Debug)]
enum WebSubcommand {
    Categories {
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Services in one category.
    Services {
        category_id: String,
        #[arg(long, default_value = "en")]
        lang: String,
    },
    Bookings {
        #[arg(long)]
        status: Option<String>,
    },
    Booking(BookingCommand),
    Providers(ProvidersCommand),
}

#[derive(Args, Debug)]
struct BookingCommand {
    #[command(subcommand)]
    command: BookingSubcommand,
}

#[derive(Subcommand, Debug)]
enum BookingSubcommand {
    Create {
        /// Booking body as a JSON object.
        #[arg(long)]
        data: String,
    },
}

#[derive(Args, Debug)]
struct ProvidersCommand {
    #[command(subcommand)]
    command: ProvidersSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProvidersSubcommand {
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        radius: Option<f64>,
        #[arg(long)]
        service_id: Option<String>,
    },
}

// =============================================================================
// ENTRY
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = ClientConfig::new(cli.app).with_base_url_opt(cli.base_url.as_deref())?;
    let store = store_path(cli.store, std::env::var_os("HOME").map(PathBuf::from))?;
    let start = if matches!(cli.command, Command::Login { .. }) { LOGIN_PATH } else { "/" };

    let navigator = Arc::new(MemoryNavigator::new(start));
    let api = ApiClient::from_config(&config, Arc::new(FileStorage::new(store)), navigator.clone())?;
    tracing::debug!(app = %config.profile, base_url = %config.base_url, "client ready");

    let report_expiry = reports_session_expiry(&cli.command);
    let result = run(&api, config.profile, cli.command).await;
    if report_expiry && navigator.redirected_to_login() {
        eprintln!("session expired; run `maintenance --app {} login` again", config.profile);
    }
    result
}

async fn run(api: &ApiClient, profile: AppProfile, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { identifier, password } => {
            let auth = AuthProvider::new(api.clone(), profile.role_gate());
            match auth.login(&LoginCredentials::new(identifier, password)).await {
                LoginOutcome::Success(user) => print_json(&serde_json::to_value(user)?),
                LoginOutcome::AccessDenied { message } | LoginOutcome::Failed { message } => Err(CliError::Login(message)),
            }
        }
        Command::Logout => {
            AuthProvider::new(api.clone(), profile.role_gate()).logout().await;
            println!("signed out");
            Ok(())
        }
        Command::Whoami => match api.session().user() {
            Some(user) => print_json(&serde_json::to_value(user)?),
            None => {
                println!("not signed in");
                Ok(())
            }
        },
        Command::Health => print_json(&api.health_check().await?),
        Command::Profile => print_json(&serde_json::to_value(api.get_profile().await?)?),
        Command::Admin(admin) => run_admin(api, admin).await,
        Command::Web(web) => run_web(api, web).await,
    }
}

async fn run_admin(api: &ApiClient, admin: AdminCommand) -> Result<(), CliError> {
    let json = match admin.command {
        AdminSubcommand::Stats => api.get_dashboard_stats().await?,
        AdminSubcommand::Users(args) => api.get_users(&list_query(&args)).await?,
        AdminSubcommand::Providers(args) => api.get_providers(&list_query(&args)).await?,
        AdminSubcommand::Verification { provider_id, decision, notes } => {
            let body = verification_body(decision, notes);
            match decision {
                Decision::Approve => api.verify_provider(&provider_id, &body).await?,
                Decision::Reject => api.reject_provider(&provider_id, &body).await?,
            }
        }
        AdminSubcommand::Bookings(args) => api.get_all_bookings(&list_query(&args)).await?,
        AdminSubcommand::Analytics { period } => {
            api.get_analytics(&Query::new().with_opt("period", period)).await?
        }
        AdminSubcommand::Revenue { days } => api.get_revenue_analytics(days).await?,
        AdminSubcommand::Settings => api.get_settings().await?,
    };
    print_json(&json)
}

async fn run_web(api: &ApiClient, web: WebCommand) -> Result<(), CliError> {
    let json = match web.command {
        WebSubcommand::Categories { lang } => api.get_service_categories(&lang).await?,
        WebSubcommand::Services { category_id, lang } => api.get_category_services(&category_id, &lang).await?,
        WebSubcommand::Bookings { status } => api.get_bookings(&Query::new().with_opt("status", status)).await?,
        WebSubcommand::Booking(booking) => match booking.command {
            BookingSubcommand::Create { data } => api.create_booking(&parse_object(&data)?).await?,
        },
        WebSubcommand::Providers(providers) => match providers.command {
            ProvidersSubcommand::Nearby { lat, lng, radius, service_id } => {
                api.get_nearby_providers(&nearby_body(lat, lng, radius, service_id)).await?
            }
        },
    };
    print_json(&json)
}

// =============================================================================
// HELPERS
// =============================================================================

/// Logout clears the session whatever the backend says, so a 401 from the
/// remote call is not worth a re-login hint.
fn reports_session_expiry(command: &Command) -> bool {
    !matches!(command, Command::Logout)
}

fn store_path(explicit: Option<PathBuf>, home: Option<PathBuf>) -> Result<PathBuf, CliError> {
    explicit
        .or_else(|| home.map(|home| home.join(".maintenance").join("storage.json")))
        .ok_or(CliError::MissingStorePath)
}

fn list_query(args: &ListArgs) -> Query {
    Query::new()
        .with_opt("status", args.status.as_deref())
        .with_opt("user_type", args.user_type.as_deref())
        .with_opt("search", args.search.as_deref())
        .with_opt("page", args.page)
}

fn verification_body(decision: Decision, notes: Option<String>) -> Value {
    let mut body = Map::new();
    if let Some(notes) = notes {
        let key = match decision {
            Decision::Approve => "notes",
            Decision::Reject => "reason",
        };
        body.insert(key.to_owned(), Value::String(notes));
    }
    Value::Object(body)
}

fn nearby_body(lat: f64, lng: f64, radius: Option<f64>, service_id: Option<String>) -> Value {
    let mut body = Map::new();
    body.insert("latitude".to_owned(), Value::from(lat));
    body.insert("longitude".to_owned(), Value::from(lng));
    if let Some(radius) = radius {
        body.insert("radius".to_owned(), Value::from(radius));
    }
    if let Some(service_id) = service_id {
        body.insert("service_id".to_owned(), Value::String(service_id));
    }
    Value::Object(body)
}

fn parse_object(raw: &str) -> Result<Value, CliError> {
    let value = serde_json::from_str::<Value>(raw)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(CliError::InvalidJson(serde::de::Error::custom("expected a JSON object")))
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
