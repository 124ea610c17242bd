use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use gettextrs::gettext;
use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

use memory_match::config::Settings;
use memory_match::game::PendingUnflip;
use memory_match::{ClickOutcome, Difficulty, StatusMessage};

use super::board::{rebuild_board, sync_card, CONTENT_MARGIN};
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::{refresh_hud, set_status, start_timer, stop_timer, update_moves, update_timer};
use super::records::{build_leaderboard_list, load_leaderboard, register_completion, section_title};
use super::state::AppState;

pub const APP_ID: &str = "io.basshift.MemoryMatch";

pub fn handle_card_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let mut st = state.borrow_mut();

    let outcome = match st.session.click(index) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!("ignored click: {err}");
            set_status(&st, StatusMessage::error(&err));
            return;
        }
    };

    match outcome {
        ClickOutcome::Ignored => {}
        ClickOutcome::Revealed { index, timer } => {
            sync_card(&mut st, index);
            if let Some(token) = timer {
                drop(st);
                start_timer(state, token);
            }
        }
        ClickOutcome::Matched {
            first,
            second,
            completion,
        } => {
            sync_card(&mut st, first);
            sync_card(&mut st, second);
            update_moves(&st);
            if let Some(completion) = completion {
                stop_timer(&mut st);
                update_timer(&st);
                register_completion(&mut st, &completion);
            }
        }
        ClickOutcome::Mismatched(pending) => {
            sync_card(&mut st, pending.second);
            update_moves(&st);
            let delay = st.session.mismatch_delay();
            drop(st);
            schedule_mismatch_reset(state, pending, delay);
        }
    }
}

fn schedule_mismatch_reset(
    state: &Rc<RefCell<AppState>>,
    pending: PendingUnflip,
    delay: std::time::Duration,
) {
    let state_clone = state.clone();
    glib::timeout_add_local_once(delay, move || {
        let mut st = state_clone.borrow_mut();
        // A new game in the meantime makes this a no-op.
        if st.session.resolve_mismatch(&pending) {
            sync_card(&mut st, pending.first);
            sync_card(&mut st, pending.second);
        }
    });
}

fn restart_game(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        stop_timer(&mut st);
        st.session.reset();
        set_status(&st, StatusMessage::cleared());
    }
    rebuild_board(state);
    refresh_hud(&state.borrow());
}

fn apply_difficulty_change(state: &Rc<RefCell<AppState>>, key: &str) {
    let changed = {
        let mut st = state.borrow_mut();
        match st.session.select_difficulty(key) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::warn!("difficulty change rejected: {err}");
                set_status(&st, StatusMessage::error(&err));
                false
            }
        }
    };
    if !changed {
        sync_dropdown(state);
        return;
    }

    {
        let mut st = state.borrow_mut();
        stop_timer(&mut st);
    }
    rebuild_board(state);
    let st = state.borrow();
    refresh_hud(&st);
    let name = gettext(st.session.difficulty().name());
    let text = gettext("Switched to {} difficulty").replacen("{}", &name, 1);
    set_status(&st, StatusMessage::info(text));
}

/// Points the dropdown back at the active difficulty after a rejected change.
fn sync_dropdown(state: &Rc<RefCell<AppState>>) {
    let (dropdown, current) = {
        let st = state.borrow();
        (st.difficulty_dropdown.clone(), st.session.difficulty())
    };
    let Some(dropdown) = dropdown else {
        return;
    };
    if let Some(pos) = Difficulty::ALL.iter().position(|d| *d == current)
        && dropdown.selected() != pos as u32
    {
        dropdown.set_selected(pos as u32);
    }
}

fn build_difficulty_dropdown(state: &Rc<RefCell<AppState>>) -> gtk::DropDown {
    let names: Vec<String> = Difficulty::ALL.iter().map(|d| gettext(d.name())).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let dropdown = gtk::DropDown::from_strings(&name_refs);
    dropdown.set_tooltip_text(Some(&gettext("Difficulty")));

    let current = state.borrow().session.difficulty();
    if let Some(pos) = Difficulty::ALL.iter().position(|d| *d == current) {
        dropdown.set_selected(pos as u32);
    }

    dropdown.connect_selected_notify({
        let state = state.clone();
        move |dropdown| {
            let key = Difficulty::ALL
                .get(dropdown.selected() as usize)
                .map(|d| d.key().to_string())
                .unwrap_or_else(|| dropdown.selected().to_string());
            apply_difficulty_change(&state, &key);
        }
    });
    dropdown
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);

    let hud = gtk::Box::new(gtk::Orientation::Horizontal, 24);
    hud.set_halign(gtk::Align::Center);
    hud.add_css_class("hud");
    let moves_label = gtk::Label::new(None);
    moves_label.add_css_class("numeric");
    let timer_label = gtk::Label::new(None);
    timer_label.add_css_class("numeric");
    hud.append(&moves_label);
    hud.append(&timer_label);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("memory-card-container");

    let status_label = gtk::Label::new(None);
    status_label.add_css_class("status-text");
    status_label.set_wrap(true);
    status_label.set_justify(gtk::Justification::Center);

    root.append(&hud);
    root.append(&board_card);
    root.append(&status_label);

    let mut st = state.borrow_mut();
    st.board_container = Some(board_card);
    st.moves_label = Some(moves_label);
    st.timer_label = Some(timer_label);
    st.status_label = Some(status_label);

    root
}

fn build_leaderboard_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
    root.add_css_class("leaderboard-root");
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);
    root.set_size_request(280, -1);

    let list = build_leaderboard_list();
    let scroller = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .vexpand(true)
        .child(&list)
        .build();

    root.append(&section_title(&gettext("TOP 10")));
    root.append(&scroller);

    state.borrow_mut().leaderboard_list = Some(list);
    root
}

fn load_css() {
    static RESOURCES_INIT: Once = Once::new();
    RESOURCES_INIT.call_once(|| {
        gio::resources_register_include!("memory-match.gresource")
            .expect("failed to register embedded resources");
    });

    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_resource("/io/basshift/MemoryMatch/style.css");
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

pub fn run(settings: Settings) -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();

        let state = match AppState::new(&settings) {
            Ok(st) => Rc::new(RefCell::new(st)),
            Err(err) => {
                tracing::error!("cannot start a game: {err}");
                app.quit();
                return;
            }
        };

        let new_game_action = SimpleAction::new("new-game", None);
        new_game_action.connect_activate({
            let state = state.clone();
            move |_, _| restart_game(&state)
        });
        app.add_action(&new_game_action);
        app.set_accels_for_action("app.new-game", &["<Control>n"]);

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);
        app.set_accels_for_action("app.quit", &["<Control>q"]);

        let dynamic_css_provider = gtk::CssProvider::new();
        if let Some(display) = gtk::gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &dynamic_css_provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }
        state.borrow_mut().dynamic_css_provider = Some(dynamic_css_provider);

        let title = adw::WindowTitle::new("Memory Match", "");
        let header = adw::HeaderBar::builder().title_widget(&title).build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .action_name("app.new-game")
            .build();
        restart_button.set_tooltip_text(Some(&gettext("New Game")));
        header.pack_start(&restart_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some(&gettext("New Game")), Some("app.new-game"));
        menu_model.append(Some(&gettext("Instructions")), Some("app.instructions"));
        menu_model.append(Some(&gettext("About Memory Match")), Some("app.about"));
        menu_model.append(Some(&gettext("Quit")), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let difficulty_dropdown = build_difficulty_dropdown(&state);
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&difficulty_dropdown);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let game_view = build_game_view(&state);
        let leaderboard_view = build_leaderboard_view(&state);
        let content = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        content.append(&game_view);
        content.append(&gtk::Separator::new(gtk::Orientation::Vertical));
        content.append(&leaderboard_view);

        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&content));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Memory Match")
            .icon_name(APP_ID)
            .default_width(980)
            .default_height(720)
            .content(&toolbar)
            .build();
        win.set_size_request(560, 480);
        win.add_css_class("app-window");

        {
            let mut st = state.borrow_mut();
            st.header = Some(header);
            st.difficulty_dropdown = Some(difficulty_dropdown);
        }

        rebuild_board(&state);
        {
            let mut st = state.borrow_mut();
            refresh_hud(&st);
            load_leaderboard(&mut st);
        }

        tracing::info!(
            difficulty = state.borrow().session.difficulty().key(),
            "window ready"
        );
        win.present();
    });

    app.run()
}
