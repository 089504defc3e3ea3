//! Agent roster
//!
//! Agents are external programs. The roster maps menu keys to their
//! descriptors; keys are `1..=N` in roster order and `N+1` exits.

pub(crate) mod resolve;
pub(crate) mod runner;

use serde::Serialize;

use crate::config::AgentEntry;

pub(crate) use resolve::SearchPaths;
pub(crate) use runner::{AgentRunner, Invocation, ProcessRunner, RunOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AgentDescriptor {
    pub(crate) key: String,
    pub(crate) name: String,
    pub(crate) file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) summary: Option<String>,
    /// Overrides the launcher-wide interpreter; empty means run directly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) interpreter: Option<String>,
}

const BUILTIN_AGENTS: &[(&str, &str, &str)] = &[
    (
        "Diff Report Professor",
        "diff_report_professor.py",
        "Learn from nginx hardening reports",
    ),
    (
        "HTML Professor",
        "html_professor.py",
        "Web security fundamentals",
    ),
    (
        "Red Team Agent",
        "red_team_agent.py",
        "Attack methodology (lab only)",
    ),
    (
        "Blue Team Agent",
        "blue_team_agent.py",
        "Defense & incident response",
    ),
];

/// What a line of operator input selects
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum MenuChoice<'a> {
    Agent(&'a AgentDescriptor),
    Exit,
    Invalid,
}

#[derive(Debug, Clone)]
pub(crate) struct Roster {
    agents: Vec<AgentDescriptor>,
    exit_key: String,
}

impl Roster {
    pub(crate) fn builtin() -> Self {
        Self::build(
            BUILTIN_AGENTS
                .iter()
                .map(|(name, file, summary)| AgentEntry {
                    name: (*name).to_string(),
                    file: (*file).to_string(),
                    summary: Some((*summary).to_string()),
                    interpreter: None,
                })
                .collect(),
        )
    }

    /// Roster from `[[agents]]` tables, or the built-in one when none are given
    pub(crate) fn from_config(entries: &[AgentEntry]) -> Self {
        if entries.is_empty() {
            return Self::builtin();
        }
        Self::build(entries.to_vec())
    }

    fn build(entries: Vec<AgentEntry>) -> Self {
        let agents: Vec<AgentDescriptor> = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| AgentDescriptor {
                key: (i + 1).to_string(),
                name: entry.name,
                file: entry.file,
                summary: entry.summary,
                interpreter: entry.interpreter,
            })
            .collect();
        let exit_key = (agents.len() + 1).to_string();
        Roster { agents, exit_key }
    }

    pub(crate) fn agents(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    pub(crate) fn exit_key(&self) -> &str {
        &self.exit_key
    }

    /// Interpret one trimmed line of input
    pub(crate) fn choose(&self, input: &str) -> MenuChoice<'_> {
        if input == self.exit_key {
            return MenuChoice::Exit;
        }
        self.agents
            .iter()
            .find(|agent| agent.key == input)
            .map_or(MenuChoice::Invalid, MenuChoice::Agent)
    }
}
