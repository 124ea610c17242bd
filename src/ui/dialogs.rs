use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let body = gettext(
        "Flip two cards per turn to find matching pairs.\n\
Matched pairs stay face up; a miss flips back after a moment.\n\
Clear the board in as few moves and seconds as you can.",
    );
    let dialog = adw::AlertDialog::new(Some(&gettext("Instructions")), Some(&body));
    dialog.add_response("ok", &gettext("Got it"));
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Memory Match")
        .application_icon("io.basshift.MemoryMatch")
        .developer_name("Sebastian Dávila (Basshift)")
        .developers(vec!["Sebastian Dávila (Basshift)"])
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext("Flip cards, find pairs, beat your best run."))
        .build();
    dialog.add_legal_section(
        "Memory Match",
        Some("© 2026 Sebastian Dávila (Basshift)"),
        gtk::License::MitX11,
        None,
    );
    dialog.present(app.active_window().as_ref());
    dialog
}
