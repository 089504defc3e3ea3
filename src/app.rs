use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::agent::{ProcessRunner, Roster, SearchPaths};
use crate::cli::{Cli, Commands, parse_command};
use crate::config::Config;
use crate::consts::{DEFAULT_INTERPRETER, DEFAULT_REQUIRED_ENV, LAB_DIR};
use crate::error::AppError;
use crate::input::StdinSource;
use crate::interrupt::Interrupts;
use crate::launcher::{Launcher, LauncherOptions};
use crate::output::{output_roster_json, render_roster_table};
use crate::session::Session;

/// Where the lab lives on disk
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LabPaths {
    pub(crate) logs_dir: PathBuf,
    pub(crate) agents_dir: PathBuf,
    pub(crate) root_dir: PathBuf,
}

impl LabPaths {
    /// Unset directories default to `~/test_labs`, its `agents/`, and its
    /// `logs/dojo_controller/`.
    pub(crate) fn resolve(
        cli: &Cli,
        home: impl FnOnce() -> Option<PathBuf>,
    ) -> Result<Self, AppError> {
        let root_dir = match &cli.root_dir {
            Some(root) => root.clone(),
            None => home().ok_or(AppError::NoHomeDir)?.join(LAB_DIR),
        };
        let agents_dir = cli
            .agents_dir
            .clone()
            .unwrap_or_else(|| root_dir.join("agents"));
        let logs_dir = cli
            .logs_dir
            .clone()
            .unwrap_or_else(|| root_dir.join("logs").join("dojo_controller"));
        Ok(LabPaths {
            logs_dir,
            agents_dir,
            root_dir,
        })
    }
}

/// The credential only has to be present and non-empty; its value is never read.
pub(crate) fn check_credential(
    var: &str,
    lookup: impl FnOnce(&str) -> Option<OsString>,
) -> Result<(), AppError> {
    match lookup(var) {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(AppError::MissingCredential {
            var: var.to_string(),
        }),
    }
}

pub(crate) fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let mut cli = cli.with_config(&config);
    let roster = Roster::from_config(&config.agents);
    let paths = LabPaths::resolve(&cli, dirs::home_dir)?;
    let search = SearchPaths::new(paths.agents_dir.clone(), paths.root_dir.clone());
    debug!(?paths, agents = roster.agents().len(), "lab resolved");

    match parse_command(cli.command.take()) {
        Commands::Agents { json } => {
            if json {
                println!("{}", output_roster_json(&roster, &search));
            } else {
                println!("{}", render_roster_table(&roster, &search, cli.use_color()));
            }
            Ok(())
        }
        Commands::Run => handle_run(&cli, &roster, &search, paths),
    }
}

fn handle_run(
    cli: &Cli,
    roster: &Roster,
    search: &SearchPaths,
    paths: LabPaths,
) -> Result<(), AppError> {
    let session = Session::start(&paths.logs_dir)?;
    debug!(log = %session.log_path().display(), "session started");

    let required = cli.require_env.as_deref().unwrap_or(DEFAULT_REQUIRED_ENV);
    check_credential(required, |var| std::env::var_os(var))?;

    let (input, notify_prompt) = StdinSource::spawn()?;
    let interrupts = Interrupts::install(notify_prompt)?;
    let options = LauncherOptions {
        show_banner: !cli.no_banner,
        use_color: cli.use_color(),
        log_screens: !cli.no_log_screens,
        interpreter: Some(
            cli.interpreter
                .clone()
                .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
        ),
        logs_dir: paths.logs_dir,
    };

    let stdout = io::stdout();
    Launcher::new(
        &session,
        roster,
        search,
        &options,
        input,
        ProcessRunner::new(interrupts),
        stdout.lock(),
    )
    .run()?;
    Ok(())
}
