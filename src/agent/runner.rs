use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Instant;

use tracing::debug;

use crate::consts::{CHILD_POLL_INTERVAL, INTERRUPT_GRACE};
use crate::interrupt::Interrupts;

/// How a resolved agent is started
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) program: OsString,
    pub(crate) args: Vec<OsString>,
}

impl Invocation {
    /// Run `path` through `interpreter` (which may carry its own arguments,
    /// e.g. "python3 -u"), or directly when none or an empty one is given.
    pub(crate) fn new(path: &Path, interpreter: Option<&str>) -> Self {
        let mut words = interpreter.unwrap_or_default().split_whitespace();
        match words.next() {
            Some(program) => {
                let mut args: Vec<OsString> = words.map(OsString::from).collect();
                args.push(path.as_os_str().to_owned());
                Invocation {
                    program: OsString::from(program),
                    args,
                }
            }
            None => Invocation {
                program: path.as_os_str().to_owned(),
                args: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunOutcome {
    /// The agent finished on its own; signal deaths report `-signal`
    Exited(i32),
    /// Ctrl-C arrived while the agent was running
    Interrupted,
}

pub(crate) trait AgentRunner {
    /// Run to completion. `Err` means the agent could not be started or waited on.
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<RunOutcome>;
}

/// Runs agents as child processes sharing this terminal
pub(crate) struct ProcessRunner {
    interrupts: Interrupts,
}

impl ProcessRunner {
    pub(crate) fn new(interrupts: Interrupts) -> Self {
        ProcessRunner { interrupts }
    }
}

impl AgentRunner for ProcessRunner {
    /// An interrupted agent gets `INTERRUPT_GRACE` to exit on its own, then
    /// it is killed so the menu comes back even when the agent traps SIGINT.
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<RunOutcome> {
        debug!(program = ?invocation.program, args = ?invocation.args, "spawning agent");
        let scope = self.interrupts.child_scope();
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        let mut interrupted_at: Option<Instant> = None;
        loop {
            if let Some(status) = child.try_wait()? {
                if interrupted_at.is_some() || scope.interrupted() {
                    return Ok(RunOutcome::Interrupted);
                }
                return Ok(RunOutcome::Exited(exit_code(status)));
            }
            match interrupted_at {
                None if scope.interrupted() => interrupted_at = Some(Instant::now()),
                Some(at) if at.elapsed() >= INTERRUPT_GRACE => {
                    debug!(pid = child.id(), "agent outlived the interrupt, killing it");
                    // It may have exited since try_wait; wait() settles either way
                    let _ = child.kill();
                    child.wait()?;
                    return Ok(RunOutcome::Interrupted);
                }
                _ => {}
            }
            thread::sleep(CHILD_POLL_INTERVAL);
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn interpreter_prefixes_path() {
        let inv = Invocation::new(Path::new("/lab/agents/html_professor.py"), Some("python3"));
        assert_eq!(inv.program, OsString::from("python3"));
        assert_eq!(inv.args, vec![OsString::from("/lab/agents/html_professor.py")]);
    }

    #[test]
    fn interpreter_arguments_come_first() {
        let inv = Invocation::new(Path::new("a.py"), Some("python3 -u -X dev"));
        assert_eq!(inv.program, OsString::from("python3"));
        assert_eq!(
            inv.args,
            ["-u", "-X", "dev", "a.py"].map(OsString::from).to_vec()
        );
    }

    #[test]
    fn no_or_blank_interpreter_runs_directly() {
        let path = PathBuf::from("/lab/agents/sensei");
        for interpreter in [None, Some(""), Some("   ")] {
            let inv = Invocation::new(&path, interpreter);
            assert_eq!(inv.program, path.clone().into_os_string());
            assert!(inv.args.is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn process_runner_reports_exit_code() {
        let mut runner = ProcessRunner::new(Interrupts::new(|| {}));
        let inv = Invocation {
            program: OsString::from("sh"),
            args: ["-c", "exit 7"].map(OsString::from).to_vec(),
        };
        assert_eq!(runner.run(&inv).unwrap(), RunOutcome::Exited(7));
    }

    #[cfg(unix)]
    #[test]
    fn process_runner_reports_signal_death_as_negative() {
        let mut runner = ProcessRunner::new(Interrupts::new(|| {}));
        let inv = Invocation {
            program: OsString::from("sh"),
            args: ["-c", "kill -TERM $$"].map(OsString::from).to_vec(),
        };
        assert_eq!(runner.run(&inv).unwrap(), RunOutcome::Exited(-15));
    }

    #[test]
    fn process_runner_surfaces_spawn_failure() {
        let mut runner = ProcessRunner::new(Interrupts::new(|| {}));
        let inv = Invocation::new(Path::new("/definitely/not/here/agent-bin"), None);
        assert!(runner.run(&inv).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn process_runner_kills_agent_that_ignores_interrupt() {
        let interrupts = Interrupts::new(|| {});
        let mut runner = ProcessRunner::new(interrupts.clone());
        let inv = Invocation {
            program: OsString::from("sh"),
            args: ["-c", "trap '' INT; exec sleep 5"].map(OsString::from).to_vec(),
        };
        let ctrl_c = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            interrupts.fire();
        });

        let started = Instant::now();
        assert_eq!(runner.run(&inv).unwrap(), RunOutcome::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(3), "took {:?}", started.elapsed());
        ctrl_c.join().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn uninterrupted_slow_agent_reports_its_code() {
        let mut runner = ProcessRunner::new(Interrupts::new(|| {}));
        let inv = Invocation {
            program: OsString::from("sh"),
            args: ["-c", "sleep 0.1; exit 3"].map(OsString::from).to_vec(),
        };
        assert_eq!(runner.run(&inv).unwrap(), RunOutcome::Exited(3));
    }
}
