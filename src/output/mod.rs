mod format;
mod menu;
mod roster;

pub(crate) use menu::{
    render_banner, render_eof, render_exit, render_invalid, render_launch, render_menu,
    render_not_found, render_prompt,
};
pub(crate) use roster::{output_roster_json, render_roster_table};
