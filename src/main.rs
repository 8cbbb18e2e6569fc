//! CLI entry point for `capsuleShell`.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use capsuleshell::clock::SystemClock;
use capsuleshell::i18n;
use capsuleshell::model::{CapsuleDraft, DraftGeneration};
use capsuleshell::preview::{self, PreviewPipeline};
use capsuleshell::submit::{SimulatedService, SubmissionController, SubmissionState};

#[derive(Parser)]
#[command(name = "capsuleshell", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, value_name = "LANG", global = true)]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the compose screen in the TUI
    Open,
    /// Compose and seal a capsule without the TUI
    Seal {
        /// Email address to deliver the capsule to
        #[arg(short, long)]
        email: String,
        /// Delivery date (YYYY-MM-DD, must be in the future)
        #[arg(short, long, value_name = "DATE")]
        date: String,
        /// Letter text
        #[arg(short, long, conflicts_with = "letter_file")]
        letter: Option<String>,
        /// Read the letter from a file
        #[arg(long, value_name = "FILE")]
        letter_file: Option<PathBuf>,
        /// Attach a file (repeatable)
        #[arg(short, long, value_name = "FILE")]
        attach: Vec<PathBuf>,
        /// Print the sealed record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the HTML snippet that embeds the capsule page
    Embed {
        /// Page address to embed (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg or system env, before clap processes --help.
fn detect_lang_early() -> i18n::Lang {
    // Check --lang flag in raw args
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--lang" {
            if let Some(code) = args.get(i + 1) {
                if let Some(lang) = i18n::Lang::from_code(code) {
                    return lang;
                }
            }
        }
        if let Some(code) = args[i].strip_prefix("--lang=") {
            if let Some(lang) = i18n::Lang::from_code(code) {
                return lang;
            }
        }
    }
    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command();
    cmd = cmd
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .after_help(i18n::app_after_help())
        .mut_arg("verbose", |a| a.help(i18n::help_verbose()))
        .mut_arg("lang", |a| a.help(i18n::help_lang()));

    // Localize subcommands
    let subcommands: Vec<clap::Command> = cmd
        .get_subcommands()
        .map(|sub| {
            let mut s = sub.clone();
            match s.get_name() {
                "open" => { s = s.about(i18n::help_cmd_open()); }
                "seal" => { s = s.about(i18n::help_cmd_seal()); }
                "embed" => { s = s.about(i18n::help_cmd_embed()); }
                "completions" => { s = s.about(i18n::help_cmd_completions()); }
                "manpage" => { s = s.about(i18n::help_cmd_manpage()); }
                _ => {}
            }
            s
        })
        .collect();

    // Replace subcommands (clear and re-add)
    for sub in subcommands {
        cmd = cmd.mut_subcommand(sub.get_name(), |_| sub.clone());
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    // Detect language BEFORE clap parsing so --help is localized
    let lang = detect_lang_early();
    i18n::set_lang(lang);

    // Build localized command and parse
    let cmd = build_localized_command();
    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    // Load configuration
    let config = capsuleshell::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        None | Some(Commands::Open) => capsuleshell::tui::run_tui(&config),
        Some(Commands::Seal {
            email,
            date,
            letter,
            letter_file,
            attach,
            json,
        }) => cmd_seal(&config, email, date, letter, letter_file, &attach, json),
        Some(Commands::Embed { url }) => {
            let url = url.unwrap_or_else(|| config.embed.page_url.clone());
            println!("{}", capsuleshell::embed::embed_snippet(&url));
            Ok(())
        }
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &capsuleshell::config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = capsuleshell::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "capsuleshell.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Compose and seal a capsule headlessly.
fn cmd_seal(
    config: &capsuleshell::config::Config,
    email: String,
    date: String,
    letter: Option<String>,
    letter_file: Option<PathBuf>,
    attach: &[PathBuf],
    json: bool,
) -> anyhow::Result<()> {
    let clock = SystemClock;

    let mut draft = CapsuleDraft::new(DraftGeneration(0));
    draft.email = email;
    draft.delivery_date = date;
    draft.letter = match (letter, letter_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read letter file '{}': {e}", path.display()))?,
        (None, None) => anyhow::bail!("Provide the letter with --letter or --letter-file"),
    };

    // Attach files and resolve their previews before sealing.
    let (preview_tx, preview_rx) = mpsc::channel();
    let pipeline = PreviewPipeline::new(preview_tx);
    for path in attach {
        let info = preview::probe(path)?;
        let id = draft.add_attachment(
            path.clone(),
            info.filename,
            info.content_type.clone(),
            info.size,
        );
        pipeline.request(draft.generation(), id, path.clone(), &info.content_type);
    }

    if draft.pending_previews() > 0 {
        eprintln!("{}", i18n::seal_waiting_previews());
    }
    while draft.pending_previews() > 0 {
        let update = preview_rx.recv_timeout(Duration::from_secs(60))?;
        if update.generation == draft.generation() {
            draft.set_preview(update.id, update.preview);
        }
    }

    // Validate and run the simulated submission with a spinner.
    let (outcome_tx, outcome_rx) = mpsc::channel();
    let service = SimulatedService::new(Duration::from_millis(config.submission.delay_ms));
    let mut controller = SubmissionController::new(Box::new(service), outcome_tx);

    if !controller.submit(&draft, &clock) {
        match controller.error() {
            Some(err) => anyhow::bail!("{err}"),
            None => anyhow::bail!("Submission could not be started"),
        }
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(i18n::seal_spinner().to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = outcome_rx.recv()?;
    controller.handle_outcome(outcome);
    pb.finish_and_clear();

    match controller.state() {
        SubmissionState::Succeeded(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                println!(
                    "{} {} {} {}.",
                    i18n::seal_done_prefix(),
                    record.email,
                    i18n::seal_done_on(),
                    record.long_delivery_date()
                );
            }
            Ok(())
        }
        SubmissionState::Failed(reason) => anyhow::bail!("Submission failed: {reason}"),
        _ => anyhow::bail!("Submission did not complete"),
    }
}

/// Print shell completions to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "capsuleshell", &mut std::io::stdout());
    Ok(())
}

/// Print a man page to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = build_localized_command();
    let man = clap_mangen::Man::new(cmd);
    man.render(&mut std::io::stdout())?;
    Ok(())
}
