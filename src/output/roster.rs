use comfy_table::Color;
use serde::Serialize;

use crate::agent::{AgentDescriptor, Roster, SearchPaths};
use crate::output::format::{create_styled_table, header_cell, styled_cell};

#[derive(Serialize)]
struct RosterRow<'a> {
    #[serde(flatten)]
    agent: &'a AgentDescriptor,
    resolved: Option<String>,
    searched: Vec<String>,
}

fn rows<'a>(roster: &'a Roster, search: &SearchPaths) -> Vec<RosterRow<'a>> {
    roster
        .agents()
        .iter()
        .map(|agent| RosterRow {
            agent,
            resolved: search
                .resolve(&agent.file)
                .ok()
                .map(|p| p.display().to_string()),
            searched: search
                .candidates(&agent.file)
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        })
        .collect()
}

pub(crate) fn render_roster_table(roster: &Roster, search: &SearchPaths, use_color: bool) -> String {
    let mut table = create_styled_table(use_color);
    table.set_header(vec![
        header_cell("Key", use_color),
        header_cell("Agent", use_color),
        header_cell("File", use_color),
        header_cell("Resolved", use_color),
    ]);

    for row in rows(roster, search) {
        let resolved = match &row.resolved {
            Some(path) => styled_cell(path, use_color.then_some(Color::Green), false),
            None => styled_cell("missing", use_color.then_some(Color::Red), true),
        };
        table.add_row(vec![
            styled_cell(&row.agent.key, None, true),
            styled_cell(&row.agent.name, None, false),
            styled_cell(&row.agent.file, None, false),
            resolved,
        ]);
    }
    table.to_string()
}

pub(crate) fn output_roster_json(roster: &Roster, search: &SearchPaths) -> String {
    serde_json::to_string_pretty(&rows(roster, search)).unwrap_or_else(|_| "[]".to_string())
}
