//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Open the interactive agent menu (default)
    Run,
    /// List the agent roster and where each agent resolves
    Agents {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Resolve the effective command (no subcommand means `run`)
pub(crate) fn parse_command(cmd: Option<Commands>) -> Commands {
    cmd.unwrap_or(Commands::Run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_command_defaults_to_run() {
        assert!(matches!(parse_command(None), Commands::Run));
    }

    #[test]
    fn explicit_command_is_kept() {
        assert!(matches!(
            parse_command(Some(Commands::Agents { json: true })),
            Commands::Agents { json: true }
        ));
    }
}
