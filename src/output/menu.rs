//! Launcher screens: banner, menu, launch header and farewells

use std::path::{Path, PathBuf};

use comfy_table::Color;

use crate::agent::Roster;
use crate::consts::RULE_WIDTH;
use crate::output::format::{
    GREEN, MAGENTA, RED, create_styled_table, header_cell, paint, styled_cell,
};

const BANNER_LINES: &[&str] = &[
    "D A N B Y ' S   C Y B E R   D O J O",
    "Purple Team Training & Security Lab",
    "Brisbane, Australia",
];

pub(crate) fn render_banner(use_color: bool) -> String {
    let inner = RULE_WIDTH - 2;
    let mut out = String::new();
    out.push_str(&format!("╔{}╗\n", "═".repeat(inner)));
    for line in BANNER_LINES {
        let len = line.chars().count();
        let left = (inner.saturating_sub(len)) / 2;
        let right = inner.saturating_sub(len + left);
        out.push_str(&format!(
            "║{}{}{}║\n",
            " ".repeat(left),
            paint(line, MAGENTA, use_color),
            " ".repeat(right)
        ));
    }
    out.push_str(&format!("╚{}╝", "═".repeat(inner)));
    out
}

pub(crate) fn render_menu(roster: &Roster, logs_dir: &Path, use_color: bool) -> String {
    let mut table = create_styled_table(use_color);
    table.set_header(vec![
        header_cell("Key", use_color),
        header_cell("Agent", use_color),
        header_cell("Focus", use_color),
    ]);

    let key_color = use_color.then_some(Color::Green);
    for agent in roster.agents() {
        table.add_row(vec![
            styled_cell(&format!("[{}]", agent.key), key_color, true),
            styled_cell(&agent.name, None, false),
            styled_cell(agent.summary.as_deref().unwrap_or(""), None, false),
        ]);
    }
    table.add_row(vec![
        styled_cell(
            &format!("[{}]", roster.exit_key()),
            use_color.then_some(Color::Red),
            true,
        ),
        styled_cell("Exit Dojo", None, false),
        styled_cell("", None, false),
    ]);

    format!(
        "\nAGENT SELECTION\n{table}\n  All sessions logged to: {}\n  \
         Type /menu or /back in any agent to return here\n",
        logs_dir.display()
    )
}

pub(crate) fn render_prompt(roster: &Roster) -> String {
    format!("Select your training [1-{}]: ", roster.exit_key())
}

pub(crate) fn render_launch(name: &str) -> String {
    format!(
        "\nLaunching {name}...\n   (Type /menu or /back to return to Dojo menu)\n\n{}\n",
        "=".repeat(RULE_WIDTH)
    )
}

pub(crate) fn render_invalid(roster: &Roster, use_color: bool) -> String {
    let text = format!("Invalid choice. Please select 1-{}.", roster.exit_key());
    format!("\n{}\n", paint(&text, RED, use_color))
}

pub(crate) fn render_not_found(file: &str, searched: &[PathBuf], use_color: bool) -> String {
    let mut out = paint(&format!("Cannot find {file}"), RED, use_color);
    out.push_str("\n   Searched locations:\n");
    for path in searched {
        out.push_str(&format!("   - {}\n", path.display()));
    }
    out.push_str(&format!(
        "\n   Please ensure {file} is in one of these locations.\n"
    ));
    out
}

pub(crate) fn render_exit(logs_dir: &Path, use_color: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{rule}\nExiting Danby's Cyber Dojo\n{rule}\n\n{}\n   All session logs saved to: {}\n",
        paint("Keep training hard!", GREEN, use_color),
        logs_dir.display()
    )
}

pub(crate) fn render_eof(use_color: bool) -> String {
    format!("\n\n{}\n", paint("Exiting Dojo. Train hard!", GREEN, use_color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lines_are_equal_width() {
        let banner = render_banner(false);
        let widths: Vec<usize> = banner.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == RULE_WIDTH), "{widths:?}");
        assert!(banner.contains("C Y B E R"));
    }

    #[test]
    fn menu_lists_every_agent_and_exit() {
        let roster = Roster::builtin();
        let menu = render_menu(&roster, Path::new("/home/op/test_labs/logs"), false);
        for agent in roster.agents() {
            assert!(menu.contains(&agent.name));
            assert!(menu.contains(&format!("[{}]", agent.key)));
        }
        assert!(menu.contains("[5]"));
        assert!(menu.contains("Exit Dojo"));
        assert!(menu.contains("All sessions logged to: /home/op/test_labs/logs"));
        assert!(menu.contains("/menu or /back"));
    }

    #[test]
    fn prompt_and_invalid_name_the_range() {
        let roster = Roster::builtin();
        assert_eq!(render_prompt(&roster), "Select your training [1-5]: ");
        assert!(render_invalid(&roster, false).contains("Please select 1-5."));
    }

    #[test]
    fn not_found_lists_each_location() {
        let searched = vec![
            PathBuf::from("/cwd/a.py"),
            PathBuf::from("/lab/agents/a.py"),
            PathBuf::from("/lab/a.py"),
        ];
        let text = render_not_found("a.py", &searched, false);
        assert!(text.starts_with("Cannot find a.py\n"));
        assert!(text.contains("   - /cwd/a.py\n   - /lab/agents/a.py\n   - /lab/a.py\n"));
    }

    #[test]
    fn launch_header_mentions_navigation() {
        let text = render_launch("Red Team Agent");
        assert!(text.contains("Launching Red Team Agent..."));
        assert!(text.contains("/menu or /back"));
    }
}
