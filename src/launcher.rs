//! Interactive menu loop
//!
//! Renders the menu, reads a choice, and runs the selected agent. Every
//! recoverable problem (unknown choice, missing agent, failed spawn,
//! Ctrl-C) is reported and control returns to the menu. Only the exit
//! choice and end of input leave the loop.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::agent::{
    AgentDescriptor, AgentRunner, Invocation, MenuChoice, Roster, RunOutcome, SearchPaths,
};
use crate::error::LaunchError;
use crate::input::{ChoiceSource, Input};
use crate::output::{
    render_banner, render_eof, render_exit, render_invalid, render_launch, render_menu,
    render_not_found, render_prompt,
};
use crate::session::{Session, Tag};

#[derive(Debug, Clone)]
pub(crate) struct LauncherOptions {
    pub(crate) show_banner: bool,
    pub(crate) use_color: bool,
    /// Copy banner and menu renders into the transcript
    pub(crate) log_screens: bool,
    /// Used for agents that don't name their own
    pub(crate) interpreter: Option<String>,
    pub(crate) logs_dir: PathBuf,
}

pub(crate) struct Launcher<'a, S, R, W> {
    session: &'a Session,
    roster: &'a Roster,
    search: &'a SearchPaths,
    options: &'a LauncherOptions,
    input: S,
    runner: R,
    out: W,
}

impl<'a, S, R, W> Launcher<'a, S, R, W>
where
    S: ChoiceSource,
    R: AgentRunner,
    W: Write,
{
    pub(crate) fn new(
        session: &'a Session,
        roster: &'a Roster,
        search: &'a SearchPaths,
        options: &'a LauncherOptions,
        input: S,
        runner: R,
        out: W,
    ) -> Self {
        Launcher {
            session,
            roster,
            search,
            options,
            input,
            runner,
            out,
        }
    }

    /// Run until the operator exits or input ends.
    /// Errors are terminal I/O failures only.
    pub(crate) fn run(&mut self) -> io::Result<()> {
        if self.options.show_banner {
            writeln!(self.out, "{}", render_banner(self.options.use_color))?;
            if self.options.log_screens {
                self.session.append(&render_banner(false));
            }
        }

        let roster = self.roster;
        loop {
            self.show_menu()?;
            write!(self.out, "{}", render_prompt(roster))?;
            self.out.flush()?;

            let line = match self.input.next_choice()? {
                Input::Line(line) => line,
                Input::Interrupted => {
                    writeln!(self.out, "\n\nReturning to menu...\n")?;
                    continue;
                }
                Input::Eof => {
                    writeln!(self.out, "{}", render_eof(self.options.use_color))?;
                    self.session.log(Tag::Exit, "EOF detected, exiting");
                    return Ok(());
                }
            };

            let choice = line.trim();
            self.session
                .log(Tag::Select, format_args!("User chose: {choice}"));

            match roster.choose(choice) {
                MenuChoice::Agent(agent) => self.launch(agent)?,
                MenuChoice::Exit => {
                    writeln!(
                        self.out,
                        "{}",
                        render_exit(&self.options.logs_dir, self.options.use_color)
                    )?;
                    self.session.finish();
                    return Ok(());
                }
                MenuChoice::Invalid => {
                    writeln!(self.out, "{}", render_invalid(roster, self.options.use_color))?;
                    self.session
                        .log(Tag::Error, format_args!("Invalid choice: {choice}"));
                }
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let logs_dir = &self.options.logs_dir;
        writeln!(
            self.out,
            "{}",
            render_menu(self.roster, logs_dir, self.options.use_color)
        )?;
        if self.options.log_screens {
            self.session
                .append(&render_menu(self.roster, logs_dir, false));
        }
        Ok(())
    }

    /// Run one agent and record how it ended
    pub(crate) fn launch(&mut self, agent: &AgentDescriptor) -> io::Result<()> {
        self.session
            .log(Tag::Launch, format_args!("Starting {}", agent.name));
        writeln!(self.out, "{}", render_launch(&agent.name))?;
        self.out.flush()?;

        match self.run_agent(agent) {
            Ok(RunOutcome::Exited(code)) => {
                debug!(agent = %agent.name, code, "agent exited");
                self.session.log(
                    Tag::End,
                    format_args!("{} exited with code {code}", agent.name),
                );
            }
            Ok(RunOutcome::Interrupted) => {
                self.session.log(
                    Tag::Interrupt,
                    format_args!("{} interrupted by user", agent.name),
                );
                writeln!(self.out, "\n\nReturning to Dojo menu...")?;
            }
            Err(LaunchError::NotFound { file, searched }) => {
                write!(
                    self.out,
                    "{}",
                    render_not_found(&file, &searched, self.options.use_color)
                )?;
                self.session.log(Tag::Error, format_args!("{file} not found"));
            }
            Err(e @ LaunchError::Spawn { .. }) => {
                writeln!(self.out, "{e}")?;
                self.session.log(Tag::Error, &e);
            }
        }
        Ok(())
    }

    fn run_agent(&mut self, agent: &AgentDescriptor) -> Result<RunOutcome, LaunchError> {
        let path = self.search.resolve(&agent.file)?;
        let interpreter = agent
            .interpreter
            .as_deref()
            .or(self.options.interpreter.as_deref());
        let invocation = Invocation::new(&path, interpreter);
        self.runner
            .run(&invocation)
            .map_err(|source| LaunchError::Spawn {
                name: agent.name.clone(),
                source,
            })
    }
}
