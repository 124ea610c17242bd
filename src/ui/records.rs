use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

use memory_match::leaderboard::{now_timestamp, LeaderboardEntry, Standings};
use memory_match::{Completion, StatusMessage};

use super::hud::set_status;
use super::state::AppState;

fn entry_row(rank: usize, entry: &LeaderboardEntry) -> gtk::Label {
    let label = gtk::Label::new(Some(&entry.display_line(rank)));
    label.add_css_class("leaderboard-row");
    label.add_css_class("body");
    label.set_halign(gtk::Align::Start);
    label.set_xalign(0.0);
    label
}

pub(super) fn section_title(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class("leaderboard-title");
    label.add_css_class("heading");
    label.set_halign(gtk::Align::Center);
    label.set_xalign(0.5);
    label
}

pub(super) fn build_leaderboard_list() -> gtk::ListBox {
    let list = gtk::ListBox::new();
    list.set_selection_mode(gtk::SelectionMode::None);
    list.add_css_class("boxed-list");
    let placeholder = gtk::Label::new(Some(&gettext("No finished games yet")));
    placeholder.add_css_class("dim-label");
    placeholder.set_margin_top(8);
    placeholder.set_margin_bottom(8);
    list.set_placeholder(Some(&placeholder));
    list
}

pub(super) fn render_leaderboard(st: &AppState) {
    let Some(list) = &st.leaderboard_list else {
        return;
    };
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
    for (idx, entry) in st.standings.iter().enumerate() {
        list.append(&entry_row(idx + 1, entry));
    }
}

/// Shows the standings and reports the first thing that went wrong getting
/// them, if anything.
fn apply_standings(st: &mut AppState, mut standings: Standings) {
    let issues = standings.take_issues();
    st.standings = standings.entries;
    render_leaderboard(st);
    if let Some(issue) = issues.first() {
        set_status(st, StatusMessage::error(issue));
    }
}

pub(super) fn load_leaderboard(st: &mut AppState) {
    let standings = st.leaderboard.load();
    apply_standings(st, standings);
}

pub(super) fn register_completion(st: &mut AppState, completion: &Completion) {
    set_status(st, StatusMessage::success(completion.message()));
    let entry = LeaderboardEntry::from_completion(completion, now_timestamp());
    let standings = st.leaderboard.save(entry);
    apply_standings(st, standings);
}
