use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use meetlens_core::{
    ChatSession, Config, ExportData, ExportFormat, HttpBackend, InsightsBackend,
    MediaElement, MeetingInsight, MeetlensError, ScriptedChat, SessionContext, export_all,
    fetch_insight, format::format_chat_line, format_insight_readable, format_timestamp, seek,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::player::PlaybackCursor;

mod player;

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for ExportFormat (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliFormat {
    #[default]
    Pdf,
    Docx,
    Text,
    Json,
    All,
}

impl CliFormat {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            CliFormat::Pdf => vec![ExportFormat::Pdf],
            CliFormat::Docx => vec![ExportFormat::Docx],
            CliFormat::Text => vec![ExportFormat::Text],
            CliFormat::Json => vec![ExportFormat::Json],
            CliFormat::All => ExportFormat::ALL.to_vec(),
        }
    }
}

#[derive(Parser)]
#[command(name = "meetlens")]
#[command(about = "Browse meeting analyses, jump to chapters, chat about them, and export reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Analysis backend base URL. Defaults to MEETLENS_API_URL or http://localhost:8000
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// User id sent with chat requests. Defaults to MEETLENS_USER_ID
    #[arg(long, global = true)]
    user_id: Option<String>,

    /// Bearer token for the backend. Defaults to MEETLENS_ACCESS_TOKEN
    #[arg(long, global = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the insights of a meeting
    Show { media_id: String },

    /// Export meeting insights to files
    Export {
        media_id: String,

        /// Output format
        #[arg(short, long, default_value = "pdf")]
        format: CliFormat,

        /// Output directory. Defaults to the downloads directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Jump to a chapter (1-based) and print the playback position
    Seek { media_id: String, chapter: usize },

    /// Chat with the meeting assistant
    Chat {
        media_id: String,

        /// Answer with the built-in scripted assistant instead of POST /chat
        #[arg(long)]
        scripted: bool,

        /// Output directory for /export. Defaults to the downloads directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

const DEFAULT_LOG_FILTER: &str = "meetlens=info,meetlens_core=info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_session(
    user_id: Option<String>,
    token: Option<String>,
) -> meetlens_core::Result<SessionContext> {
    let token = token.or_else(|| {
        std::env::var(meetlens_core::config::ACCESS_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty())
    });
    let session = match user_id {
        Some(user_id) => SessionContext::new(user_id),
        None => SessionContext::from_env()?,
    };
    Ok(match token {
        Some(token) => session.with_token(token),
        None => session,
    })
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    std::process::exit(1);
}

/// Fetch and normalize, or stop with the load error.
async fn load_insight(backend: &dyn InsightsBackend, media_id: &str) -> MeetingInsight {
    let started = Instant::now();
    let spinner = create_spinner("Loading meeting insights...");

    match fetch_insight(backend, media_id).await {
        Ok(insight) => {
            spinner.finish_with_message(format!(
                "{} Loaded: {} {}",
                style("✓").green().bold(),
                style(&insight.title).bold(),
                style(format!("[{}]", format_elapsed(started.elapsed()))).dim()
            ));
            insight
        }
        Err(e) => {
            spinner.finish_and_clear();
            match e {
                MeetlensError::NotReady { .. } => fail("Analysis not complete or failed"),
                _ => fail("Failed to load meeting insights"),
            }
        }
    }
}

async fn run_exports(data: &ExportData, formats: &[ExportFormat], dir: &Path) -> usize {
    let mut failures = 0;
    for (format, result) in export_all(data, formats, dir).await {
        match result {
            Ok(path) => println!(
                "{} {} {}",
                style("✓").green().bold(),
                format,
                style(path.display()).cyan()
            ),
            Err(e) => {
                failures += 1;
                println!("{} {} {}", style("✗").red().bold(), format, style(e).dim());
            }
        }
    }
    failures
}

fn seek_chapter(insight: &MeetingInsight, player: &mut PlaybackCursor, chapter: usize) {
    let Some(target) = chapter.checked_sub(1).and_then(|idx| insight.chapters.get(idx)) else {
        println!(
            "{} No chapter {} (this meeting has {})",
            style("!").yellow().bold(),
            chapter,
            insight.chapters.len()
        );
        return;
    };

    if seek(player, &target.start_time) {
        println!(
            "{} {} {} {}",
            style("▶").cyan().bold(),
            style(&target.title).bold(),
            style(format!("at {}", format_timestamp(player.position()))).yellow(),
            style(player.source()).dim()
        );
    } else {
        println!(
            "{} {} {}",
            style("▶").cyan().bold(),
            style(&target.title).bold(),
            style(format!("still at {}", format_timestamp(player.position()))).dim()
        );
    }
}

async fn chat_loop(
    backend: &dyn InsightsBackend,
    session: &SessionContext,
    insight: &MeetingInsight,
    out_dir: &Path,
) -> Result<()> {
    let mut chat = ChatSession::new();
    let mut player = PlaybackCursor::new(&insight.media_url);

    for message in chat.messages() {
        println!("{}", style(format_chat_line(message)).cyan());
    }
    println!(
        "{}",
        style("Commands: /chapters, /seek <n>, /export <pdf|docx|text|json|all>, /quit").dim()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("›").bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "/quit" | "/exit" => break,
            "/chapters" => {
                for (idx, chapter) in insight.chapters.iter().enumerate() {
                    println!("{:>3}. [{}] {}", idx + 1, chapter.start_time, chapter.title);
                }
            }
            "/seek" => match arg.trim().parse::<usize>() {
                Ok(n) => seek_chapter(insight, &mut player, n),
                Err(_) => println!("{} usage: /seek <chapter>", style("!").yellow().bold()),
            },
            "/export" => match CliFormat::from_str(arg.trim(), true) {
                Ok(format) => {
                    let snapshot = ExportData::snapshot(insight, chat.messages());
                    run_exports(&snapshot, &format.formats(), out_dir).await;
                }
                Err(_) => println!(
                    "{} usage: /export <pdf|docx|text|json|all>",
                    style("!").yellow().bold()
                ),
            },
            _ => {
                let spinner = create_spinner("Thinking...");
                let result = chat.send(backend, session, &insight.id, line).await;
                spinner.finish_and_clear();
                match result {
                    Ok(reply) => println!("{}", style(format_chat_line(reply)).cyan()),
                    Err(e) => println!("{} {}", style("✗").red().bold(), e),
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.api_url.map(Config::new).unwrap_or_else(Config::from_env);
    let session = resolve_session(cli.user_id, cli.token);
    tracing::debug!(api_url = %config.api_url, signed_in = session.is_ok(), "starting");

    let mut backend = HttpBackend::new(config);
    if let Ok(session) = &session {
        backend = backend.with_session(session);
    }

    println!(
        "\n{}  {}\n",
        style("meetlens").cyan().bold(),
        style("Meeting Insights").dim()
    );

    match cli.command {
        Command::Show { media_id } => {
            let insight = load_insight(&backend, &media_id).await;
            println!("{}", style("─".repeat(60)).dim());
            println!("{}", format_insight_readable(&insight));
        }
        Command::Export {
            media_id,
            format,
            out,
        } => {
            let insight = load_insight(&backend, &media_id).await;
            let dir = out.unwrap_or_else(meetlens_core::config::default_export_dir);
            let formats = format.formats();

            let failures = run_exports(&ExportData::snapshot(&insight, &[]), &formats, &dir).await;
            if failures > 0 {
                anyhow::bail!("{} of {} exports failed", failures, formats.len());
            }
        }
        Command::Seek { media_id, chapter } => {
            let insight = load_insight(&backend, &media_id).await;
            let mut player = PlaybackCursor::new(&insight.media_url);
            seek_chapter(&insight, &mut player, chapter);
        }
        Command::Chat {
            media_id,
            scripted,
            out,
        } => {
            // Validate the session early
            let session = session.unwrap_or_else(|e| fail(e));
            let dir = out.unwrap_or_else(meetlens_core::config::default_export_dir);

            if scripted {
                let backend = ScriptedChat::new(backend);
                let insight = load_insight(&backend, &media_id).await;
                chat_loop(&backend, &session, &insight, &dir).await?;
            } else {
                let insight = load_insight(&backend, &media_id).await;
                chat_loop(&backend, &session, &insight, &dir).await?;
            }
        }
    }

    Ok(())
}
