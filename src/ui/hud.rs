use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4::glib;
use gtk4::prelude::*;
use memory_match::game::TimerToken;
use memory_match::{Severity, StatusMessage};

use super::state::AppState;

pub(super) fn update_moves(st: &AppState) {
    if let Some(label) = &st.moves_label {
        label.set_text(&format!("{} {}", gettext("Moves:"), st.session.move_count()));
    }
}

pub(super) fn update_timer(st: &AppState) {
    if let Some(label) = &st.timer_label {
        label.set_text(&format!("{} {}s", gettext("Time:"), st.session.seconds_elapsed()));
    }
}

pub(super) fn update_subtitle(st: &AppState) {
    if let Some(header) = &st.header
        && let Some(title) = header
            .title_widget()
            .and_then(|w| w.downcast::<libadwaita::WindowTitle>().ok())
    {
        let difficulty = st.session.difficulty();
        let size = st.session.grid_size();
        title.set_subtitle(&format!("{} | {size}×{size}", gettext(difficulty.name())));
    }
}

pub(super) fn refresh_hud(st: &AppState) {
    update_moves(st);
    update_timer(st);
    update_subtitle(st);
}

pub(super) fn set_status(st: &AppState, message: StatusMessage) {
    if let Some(label) = &st.status_label {
        label.set_text(&message.text);
        for severity in [Severity::Info, Severity::Success, Severity::Error] {
            label.remove_css_class(severity.css_class());
        }
        if !message.is_empty() {
            label.add_css_class(message.severity.css_class());
        }
    }
}

pub(super) fn stop_timer(st: &mut AppState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

/// Drives the session clock once a second for as long as `token` owns it.
pub(super) fn start_timer(state: &Rc<RefCell<AppState>>, token: TimerToken) {
    let mut st = state.borrow_mut();
    stop_timer(&mut st);

    let state_clone = state.clone();
    let handle = glib::timeout_add_local(std::time::Duration::from_secs(1), move || {
        let mut st = state_clone.borrow_mut();
        if st.session.tick_timer(token).is_none() {
            // The source dies with this Break, so the stored id is ours.
            st.timer_handle = None;
            return glib::ControlFlow::Break;
        }
        update_timer(&st);
        glib::ControlFlow::Continue
    });
    st.timer_handle = Some(handle);
}
