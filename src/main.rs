//! CLI entry point for `mailquery`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use mailquery::api::client::HttpMailApi;
use mailquery::api::{ListQuery, MailApi};
use mailquery::config::{self, Config};
use mailquery::i18n;
use mailquery::model::mail::{format_date_time, Email, EmailId, EmailPage};
use mailquery::store::credentials::{
    CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore,
};

#[derive(Parser)]
#[command(name = "mailquery", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// API base URL (overrides config and MAILQUERY_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, zh). Defaults to config, then system locale.
    #[arg(long, global = true, value_name = "LANG")]
    lang: Option<String>,

    /// Do not read or save credentials on disk for this session
    #[arg(long)]
    no_remember: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive mailbox
    Open,
    /// List one page of emails
    List {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Sync the mailbox on the server before listing
        #[arg(long)]
        sync: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show one email
    Show {
        id: EmailId,
        #[arg(long)]
        json: bool,
    },
    /// Forget saved credentials
    Logout,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Width used when rendering bodies outside the TUI.
const BODY_WIDTH: usize = 100;

/// Detect language early from the --lang arg, before clap processes --help.
fn lang_from_args() -> Option<i18n::Lang> {
    let args: Vec<String> = std::env::args().collect();
    for (i, arg) in args.iter().enumerate() {
        if arg == "--lang" {
            if let Some(lang) = args.get(i + 1).and_then(|c| i18n::Lang::from_code(c)) {
                return Some(lang);
            }
        }
        if let Some(lang) = arg.strip_prefix("--lang=").and_then(i18n::Lang::from_code) {
            return Some(lang);
        }
    }
    None
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command().about(i18n::app_about());

    let subcommands: Vec<clap::Command> = cmd
        .get_subcommands()
        .map(|sub| {
            let about = match sub.get_name() {
                "open" => i18n::help_cmd_open(),
                "list" => i18n::help_cmd_list(),
                "show" => i18n::help_cmd_show(),
                "logout" => i18n::help_cmd_logout(),
                "completions" => i18n::help_cmd_completions(),
                "manpage" => i18n::help_cmd_manpage(),
                _ => return sub.clone(),
            };
            sub.clone().about(about)
        })
        .collect();

    for sub in subcommands {
        cmd = cmd.mut_subcommand(sub.get_name(), |_| sub.clone());
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    let mut config = config::load_config();

    // Language must be known BEFORE clap parsing so --help is localized
    let lang = lang_from_args()
        .or_else(|| config.general.lang.as_deref().and_then(i18n::Lang::from_code))
        .unwrap_or_else(i18n::detect_system_lang);
    i18n::set_lang(lang);

    let matches = build_localized_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    if let Some(url) = cli.base_url {
        config.server.base_url = url;
    }

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // The TUI owns the terminal: log to the file only.
    let interactive = matches!(cli.command, None | Some(Commands::Open));
    setup_logging(log_level, &config, !interactive);

    match cli.command {
        None | Some(Commands::Open) => cmd_open(&config, cli.no_remember),
        Some(Commands::List { page, sync, json }) => cmd_list(&config, page, sync, json),
        Some(Commands::Show { id, json }) => cmd_show(&config, id, json),
        Some(Commands::Logout) => cmd_logout(&config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with file logging and optional stderr output.
fn setup_logging(level: &str, config: &Config, to_stderr: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = to_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let log_dir = config::cache_dir(config);
    let file_layer = std::fs::create_dir_all(&log_dir).is_ok().then(|| {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mailquery.log");
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

fn credential_store(config: &Config) -> FileCredentialStore {
    FileCredentialStore::new(config::data_dir(config))
}

/// Saved credentials, or a localized error for the non-interactive commands.
fn saved_credentials(config: &Config) -> anyhow::Result<Credentials> {
    credential_store(config)
        .load()
        .ok_or_else(|| anyhow!(i18n::err_no_saved_credentials()))
}

fn cmd_open(config: &Config, no_remember: bool) -> anyhow::Result<()> {
    let api = HttpMailApi::from_config(config)?;
    tracing::info!(base_url = api.base_url(), no_remember, "Starting interactive mailbox");
    let store: Box<dyn CredentialStore> = if no_remember {
        Box::new(MemoryCredentialStore::new())
    } else {
        Box::new(credential_store(config))
    };
    mailquery::tui::run_tui(config, Arc::new(api), store)
}

fn cmd_list(config: &Config, page: u32, sync: bool, json: bool) -> anyhow::Result<()> {
    let creds = saved_credentials(config)?;
    let api = HttpMailApi::from_config(config)?;
    let query = ListQuery::page(page)
        .with_sync(sync)
        .with_order(config.list.sort_by.clone(), config.list.sort_order.clone());

    let spinner = if sync {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(i18n::msg_syncing());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = api.list_emails(&creds.email, &creds.password, &query);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let page = result.map_err(|e| anyhow!(e.user_message()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page_table(&page);
    }
    Ok(())
}

fn cmd_show(config: &Config, id: EmailId, json: bool) -> anyhow::Result<()> {
    let creds = saved_credentials(config)?;
    let api = HttpMailApi::from_config(config)?;
    let email = api
        .fetch_detail(&creds.email, &creds.password, id)
        .map_err(|e| anyhow!(e.user_message()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&email)?);
    } else {
        print_email(&email);
    }
    Ok(())
}

fn cmd_logout(config: &Config) -> anyhow::Result<()> {
    credential_store(config).clear()?;
    println!("{}", i18n::msg_logged_out());
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mailquery", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Print one page as a human-readable table.
fn print_page_table(page: &EmailPage) {
    let total_pages = mailquery::controller::pagination::total_pages(page.total, page.page_size);

    println!();
    println!(
        "  {}  {}",
        i18n::total_emails(page.total),
        i18n::page_indicator(page.page, total_pages)
    );
    println!();

    if page.emails.is_empty() {
        println!("  {}", i18n::msg_no_emails());
        println!();
        return;
    }

    println!(
        "  {:<1} {:<8} {:<19} {:<25} {}",
        "", "ID", "Date", "From", "Subject"
    );
    println!("  {}", "-".repeat(98));

    for email in &page.emails {
        let mark = if email.is_read { " " } else { "*" };
        let sender = email.sender();
        let from = if sender.is_empty() {
            i18n::tui_unknown_sender().to_string()
        } else {
            sender.label().to_string()
        };
        let subject = if email.subject.trim().is_empty() {
            i18n::tui_no_subject()
        } else {
            email.subject.as_str()
        };
        let from_trunc: String = from.chars().take(24).collect();
        let subj_trunc: String = subject.chars().take(50).collect();

        println!(
            "  {:<1} {:<8} {:<19} {:<25} {}",
            mark,
            email.id,
            format_date_time(&email.date),
            from_trunc,
            subj_trunc
        );
    }
    println!();
}

/// Print one email: headers then the rendered body.
fn print_email(email: &Email) {
    let subject = if email.subject.trim().is_empty() {
        i18n::tui_no_subject()
    } else {
        email.subject.as_str()
    };
    println!();
    println!("  {subject}");
    println!();
    println!("  {}{}", i18n::tui_header_from(), email.sender().display());
    let to = email.recipients();
    if !to.is_empty() {
        println!("  {}{}", i18n::tui_header_to(), to.join(", "));
    }
    println!("  {}{}", i18n::tui_header_date(), format_date_time(&email.date));
    println!("  {}", "-".repeat(BODY_WIDTH.min(78)));
    println!();
    match email.render_body(BODY_WIDTH) {
        Some(body) => println!("{body}"),
        None => println!("  {}", i18n::tui_empty_body()),
    }
    println!();
}
