mod api;
mod config;
mod error;
mod interview;
mod logging;
mod models;
mod readiness;
mod reminder;
mod render;
mod resume;
mod skills;
mod state;
mod tracker;
mod tui;
mod validate;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result, anyhow, bail};
use api::HttpBackend;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use api::CareerApi;
use interview::{Interview, Stage};
use models::{ApplicationId, ApplicationStatus};
use state::AppState;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "careerbot")]
#[command(about = "Career assistant client - readiness, skill gaps, resume critique, tracking and mock interviews")]
struct Cli {
    /// Backend root URL (overrides CAREERBOT_BASE_URL and the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a career readiness score
    Score {
        /// Resume length in words (omit if you have no resume)
        #[arg(long)]
        resume_length: Option<u32>,

        /// Number of relevant skills
        #[arg(long, default_value = "0")]
        skills: u32,

        /// Years of experience
        #[arg(long, default_value = "0")]
        experience: f64,

        /// Number of portfolio projects (omit if you have none)
        #[arg(long)]
        projects: Option<u32>,
    },

    /// Compare your skills with a job description
    Skills {
        /// File containing the job description (read from stdin if omitted)
        #[arg(short, long)]
        job_file: Option<PathBuf>,

        /// Your skills, comma separated (prompted if omitted)
        #[arg(long)]
        have: Option<String>,
    },

    /// Get a critique of a PDF or DOCX resume
    Resume {
        /// Path to resume file
        file: PathBuf,
    },

    /// Track job applications
    Track {
        #[command(subcommand)]
        command: TrackCommands,
    },

    /// Run a mock interview
    Interview {
        /// Job role to practice for
        #[arg(short, long)]
        role: String,

        /// Company name (backend default if omitted)
        #[arg(short, long)]
        company: Option<String>,
    },
}

#[derive(Subcommand)]
enum TrackCommands {
    /// List applications
    List {
        /// Show full details for each application
        #[arg(short, long)]
        verbose: bool,
    },

    /// Add an application
    Add {
        /// Company name
        #[arg(short, long)]
        company: String,

        /// Position title
        #[arg(short, long)]
        position: String,

        /// Link to the job posting
        #[arg(short, long)]
        url: Option<String>,

        /// Date applied (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Change an application's status
    Status {
        /// Application ID
        id: String,

        /// New status (applied, viewed, interview-scheduled, interviewed, rejected, offer)
        #[arg(value_parser = parse_status_arg)]
        status: ApplicationStatus,
    },

    /// Delete an application
    Delete {
        /// Application ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show application statistics
    Stats,

    /// Show follow-ups that are due
    Reminders,

    /// Generate a follow-up email for an application
    Email {
        /// Application ID
        id: String,

        /// Save the email to this file instead of printing it
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Browse applications interactively
    Board,
}

fn parse_date_arg(raw: &str) -> std::result::Result<NaiveDate, String> {
    models::parse_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got '{}'", raw))
}

fn parse_status_arg(raw: &str) -> std::result::Result<ApplicationStatus, String> {
    ApplicationStatus::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = ApplicationStatus::ALL.iter().map(|s| s.label()).collect();
        format!("unknown status '{}' (expected one of: {})", raw, known.join(", "))
    })
}

fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm_with<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    let answer = read_line(input, out, &format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn prompt(label: &str) -> Result<String> {
    read_line(&mut io::stdin().lock(), &mut io::stdout(), label)
}

fn confirm(question: &str) -> Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stdout(), question)
}

/// Writes generated text to a file, newline-terminated.
fn export(path: &Path, text: &str) -> Result<()> {
    let mut contents = text.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write to {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_file = config::ConfigFile::locate(cli.config.clone());
    let cfg = config::resolve(
        config_file.as_ref(),
        std::env::var(config::BASE_URL_ENV).ok(),
        cli.base_url.clone(),
    )?;
    logging::init(&cfg.log_level);
    debug!(config = ?config_file, "configuration loaded");

    let backend = HttpBackend::new(&cfg.base_url, cfg.request_timeout())
        .context("Failed to set up backend client")?;
    debug!(base_url = backend.base_url(), timeout_secs = cfg.request_timeout_secs, "backend ready");
    let today = state::today();
    let mut app = AppState::new(Box::new(backend), today);

    match cli.command {
        Commands::Score {
            resume_length,
            skills,
            experience,
            projects,
        } => {
            let request = readiness::request(
                resume_length.is_some(),
                resume_length.unwrap_or(0),
                skills,
                experience,
                projects.is_some(),
                projects.unwrap_or(0),
            )?;
            let report = readiness::score(app.api(), &request)?;
            print!("{}", render::readiness(&report));
        }

        Commands::Skills { job_file, have } => {
            let job_description = match job_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read job description: {}", path.display()))?,
                None => {
                    eprintln!("Paste the job description, then press Ctrl-D:");
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text)?;
                    text
                }
            };

            let (api, gap) = app.skills_mut();
            let required = gap.extract(api, &job_description)?;
            print!("{}", render::required_skills(required));

            let have = match have {
                Some(have) => have,
                None => prompt("Your skills (comma separated): ")?,
            };
            let analysis = gap.analyze(api, &have)?;
            println!();
            print!("{}", render::gap(analysis));
        }

        Commands::Resume { file } => {
            let (api, roast) = app.resume_mut();
            let upload = roast.select(&file)?;
            println!("Analyzing {}...\n", upload.file_name);
            let analysis = roast.analyze(api)?;
            print!("{}", render::resume(&analysis));
        }

        Commands::Track { command } => run_track(&mut app, command, today)?,

        Commands::Interview { role, company } => run_interview(&mut app, &role, company.as_deref())?,
    }

    Ok(())
}

fn run_track(app: &mut AppState, command: TrackCommands, today: NaiveDate) -> Result<()> {
    let (api, tracker) = app.tracker_mut();

    match command {
        TrackCommands::List { verbose } => {
            if !tracker.reload_applications(api) {
                bail!("Failed to load applications");
            }
            tracker.check_reminders(api);
            let cards = tracker.cards(today);
            if verbose {
                for card in &cards {
                    println!("{}", render::application_detail(card));
                }
                if cards.is_empty() {
                    print!("{}", render::application_table(&cards));
                }
            } else {
                print!("{}", render::application_table(&cards));
            }
            let due = tracker.reminder_count();
            if due > 0 {
                println!("\n{} follow-up(s) due. Run `careerbot track reminders` for details.", due);
            }
        }

        TrackCommands::Add {
            company,
            position,
            url,
            date,
            notes,
        } => {
            let draft = &mut tracker.form.draft;
            draft.company = company;
            draft.position = position;
            draft.job_url = url.unwrap_or_default();
            draft.date_applied = date.unwrap_or(today);
            draft.notes = notes.unwrap_or_default();

            let created = tracker.add(api, today)?;
            println!("Added application {} ({} - {})", created.id, created.company, created.position);
            if let Some(stats) = tracker.statistics() {
                println!("Now tracking {} application(s).", stats.total_applications);
            }
        }

        TrackCommands::Status { id, status } => {
            let id = ApplicationId(id);
            tracker.change_status(api, &id, status)?;
            match tracker.find(&id) {
                Some(app) => println!("{} - {} is now {}.", app.company, app.position, app.status),
                None => println!("Status of {} updated to {}.", id, status),
            }
        }

        TrackCommands::Delete { id, yes } => {
            let id = ApplicationId(id);
            let confirmed = yes || confirm(&format!("Are you sure you want to delete {}?", id))?;
            if tracker.delete(api, &id, confirmed)? {
                println!("Deleted {}.", id);
            } else {
                println!("Nothing deleted.");
            }
        }

        TrackCommands::Stats => {
            if !tracker.reload_statistics(api) {
                bail!("Failed to load statistics");
            }
            let stats = tracker
                .statistics()
                .ok_or_else(|| anyhow!("No statistics available"))?;
            print!("{}", render::statistics(stats));
        }

        TrackCommands::Reminders => {
            let digest = tracker.show_reminders(api)?;
            print!("{}", render::reminders(&digest));
        }

        TrackCommands::Email { id, out } => {
            let id = ApplicationId(id);
            let email = tracker.follow_up_email(api, &id)?;
            match out {
                Some(path) => {
                    export(&path, &email)?;
                    println!("Follow-up email for {} saved to {}", id, path.display());
                }
                None => println!("{}", email),
            }
        }

        TrackCommands::Board => tui::run_board(api, tracker, today)?,
    }

    Ok(())
}

const END_COMMAND: &str = ":end";

fn run_interview(app: &mut AppState, role: &str, company: Option<&str>) -> Result<()> {
    let (api, interview) = app.interview_mut();
    drive_interview(
        api,
        interview,
        role,
        company.unwrap_or(""),
        &mut io::stdin().lock(),
        &mut io::stdout(),
    )
}

/// Asks before ending. Returns true once the session has been discarded.
fn end_requested<R: BufRead, W: Write>(
    interview: &mut Interview,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let confirmed = confirm_with(input, out, "End the interview? Progress will be lost.")?;
    if interview.end(confirmed) {
        writeln!(out, "Interview ended.")?;
        return Ok(true);
    }
    Ok(false)
}

/// Interactive interview loop. A failed submit or results fetch is reported
/// and the same step is offered again; only `:end` (confirmed) or closed
/// input stops the loop early.
fn drive_interview<R: BufRead, W: Write>(
    api: &dyn CareerApi,
    interview: &mut Interview,
    role: &str,
    company: &str,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    interview.start(api, company, role)?;
    writeln!(out, "Type your answer on one line. Enter {} to stop early.\n", END_COMMAND)?;

    loop {
        match interview.stage() {
            Stage::NotStarted => break,

            Stage::InProgress { session, question } => {
                writeln!(out, "{}", render::question(session, question))?;
                let answer = read_line(input, out, "> ")?;
                if answer.trim() == END_COMMAND {
                    if end_requested(interview, input, out)? {
                        break;
                    }
                    continue;
                }
                match interview.submit(api, &answer) {
                    Ok(outcome) => writeln!(out, "\n{}", render::outcome(outcome))?,
                    Err(err) => eprintln!("{}\n", err),
                }
            }

            Stage::Feedback { outcome, .. } => {
                let label = if outcome.is_complete() {
                    "Press Enter to see your results "
                } else {
                    "Press Enter for the next question "
                };
                let line = read_line(input, out, label)?;
                if line.trim() == END_COMMAND {
                    if end_requested(interview, input, out)? {
                        break;
                    }
                    continue;
                }
                writeln!(out)?;
                if let Err(err) = interview.advance(api) {
                    eprintln!("{}\n", err);
                }
            }

            Stage::Final { session, results } => {
                write!(out, "{}", render::interview_results(session, results))?;
                break;
            }
        }
    }

    Ok(())
}
