use gtk4 as gtk;
use libadwaita as adw;

use memory_match::config::Settings;
use memory_match::leaderboard::{FileStore, Leaderboard, LeaderboardEntry};
use memory_match::{ConfigError, Session};

pub struct AppState {
    pub header: Option<adw::HeaderBar>,
    pub board_container: Option<gtk::Box>,
    pub dynamic_css_provider: Option<gtk::CssProvider>,
    pub moves_label: Option<gtk::Label>,
    pub timer_label: Option<gtk::Label>,
    pub status_label: Option<gtk::Label>,
    pub leaderboard_list: Option<gtk::ListBox>,
    pub difficulty_dropdown: Option<gtk::DropDown>,

    // Game state
    pub grid_buttons: Vec<gtk::Button>,
    pub flip_anim_phase: bool,
    pub timer_handle: Option<glib::SourceId>,
    pub session: Session,
    pub leaderboard: Leaderboard<FileStore>,
    pub standings: Vec<LeaderboardEntry>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let mut session = Session::new(settings.difficulty)?;
        session.set_mismatch_delay(settings.mismatch_delay);
        Ok(AppState {
            header: None,
            board_container: None,
            dynamic_css_provider: None,
            moves_label: None,
            timer_label: None,
            status_label: None,
            leaderboard_list: None,
            difficulty_dropdown: None,
            grid_buttons: Vec::new(),
            flip_anim_phase: false,
            timer_handle: None,
            session,
            leaderboard: Leaderboard::new(FileStore::new(&settings.data_dir)),
            standings: Vec::new(),
        })
    }
}
