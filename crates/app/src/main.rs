use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{ReportId, VipStudentId};
use services::api::{
    API_BASE_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_MEDIA_BASE_URL, MEDIA_BASE_URL_ENV,
};
use services::{AdminService, ApiConfig, AppServices};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz-local.sqlite3";
const DEFAULT_LOG_FILTER: &str = "app=info,services=info,storage=warn";

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Parser)]
#[command(name = "quiz", version, about = "Question-bank practice for signed-in students")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Local store (`SQLite` URL or file path).
    #[arg(long = "db", global = true, env = "QUIZ_DB_URL", default_value = DEFAULT_DB_URL)]
    db_url: String,

    /// Backend API base URL.
    #[arg(long, global = true, env = API_BASE_URL_ENV, default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Base URL for question images.
    #[arg(long, global = true, env = MEDIA_BASE_URL_ENV, default_value = DEFAULT_MEDIA_BASE_URL)]
    media_base_url: String,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the desktop quiz (default).
    Ui,
    /// Eligibility list and question reports.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Sign in as admin; the flag persists in the local store.
    Login { username: String, password: String },
    Logout,
    /// List phone numbers allowed to sign in.
    ListStudents,
    AddStudent {
        name: String,
        phone: String,
        #[arg(long)]
        gender: Option<String>,
    },
    DeleteStudent { id: u64 },
    /// Upload a spreadsheet of students.
    Upload { path: PathBuf },
    /// List question reports sent by students.
    Reports,
    DeleteReport { id: u64 },
}

fn normalize_sqlite_url(raw: &str) -> Result<String, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: raw.to_string(),
        });
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_string());
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; real env vars and flags still apply.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let db_url = normalize_sqlite_url(&cli.config.db_url)?;
    let api_config = ApiConfig::new(&cli.config.api_base_url, &cli.config.media_base_url)?;

    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, api_config).await?;
    info!(db = %db_url, api = %services.config().base_url(), "local store ready");

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(services);
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("اختبارات الأمثل")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Admin(command) => run_admin(&services.admin(), command).await,
    }
}

async fn run_admin(
    admin: &AdminService,
    command: AdminCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        AdminCommand::Login { username, password } => {
            admin.login(&username, &password).await?;
            println!("signed in as {username}");
        }
        AdminCommand::Logout => {
            admin.logout().await?;
            println!("signed out");
        }
        AdminCommand::ListStudents => {
            for student in admin.list_vip_students().await? {
                let gender = student.gender.as_deref().unwrap_or("-");
                println!("{}\t{}\t{}\t{gender}", student.id, student.name, student.phone);
            }
        }
        AdminCommand::AddStudent {
            name,
            phone,
            gender,
        } => {
            admin.add_vip_student(&name, &phone, gender).await?;
            println!("added {name}");
        }
        AdminCommand::DeleteStudent { id } => {
            admin.delete_vip_student(VipStudentId::new(id)).await?;
            println!("deleted student {id}");
        }
        AdminCommand::Upload { path } => {
            let bytes = std::fs::read(&path)?;
            let file_name = path
                .file_name()
                .map_or_else(|| "students.xlsx".to_string(), |name| name.to_string_lossy().into_owned());
            let message = admin.bulk_upload_vip_students(&file_name, bytes).await?;
            println!("{}", message.unwrap_or_else(|| format!("uploaded {file_name}")));
        }
        AdminCommand::Reports => {
            for report in admin.list_reports().await? {
                let number = report
                    .question_number
                    .map_or_else(|| "-".to_string(), |n| n.to_string());
                let category = report.question_category.as_deref().unwrap_or("-");
                println!(
                    "{}\t{}\t{}\t{category}#{number}\t{}",
                    report.id, report.student_name, report.student_phone, report.message
                );
            }
        }
        AdminCommand::DeleteReport { id } => {
            admin.delete_report(ReportId::new(id)).await?;
            println!("deleted report {id}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_urls_are_normalized() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:").unwrap(), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/quiz.db").unwrap(),
            "sqlite:///tmp/quiz.db"
        );
        assert_eq!(normalize_sqlite_url("/tmp/quiz.db").unwrap(), "sqlite:///tmp/quiz.db");
        assert!(normalize_sqlite_url("  ").is_err());
    }

    #[test]
    fn admin_subcommands_parse() {
        let cli = Cli::try_parse_from([
            "quiz", "admin", "add-student", "Ali", "0555123456", "--gender", "ذكر",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Admin(AdminCommand::AddStudent { ref gender, .. })) if gender.as_deref() == Some("ذكر")
        ));
    }

    #[test]
    fn ui_is_the_default_command() {
        let cli = Cli::try_parse_from(["quiz", "--db", "sqlite::memory:"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config.db_url, "sqlite::memory:");
    }

    #[test]
    fn prepare_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("store.sqlite3");
        let url = format!("sqlite://{}", file.display());
        prepare_sqlite_file(&url).unwrap();
        assert!(file.exists());
    }
}
