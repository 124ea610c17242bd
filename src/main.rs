mod ui;

use gtk4::glib;
use memory_match::config::Settings;
use memory_match::logging;

const GETTEXT_PACKAGE: &str = "memory-match";
const LOCALE_DIR: &str = "/usr/share/locale";

fn init_i18n() {
    gettextrs::setlocale(gettextrs::LocaleCategory::LcAll, "");
    if let Err(err) = gettextrs::bindtextdomain(GETTEXT_PACKAGE, LOCALE_DIR) {
        tracing::warn!("translations unavailable: {err}");
        return;
    }
    if let Err(err) = gettextrs::bind_textdomain_codeset(GETTEXT_PACKAGE, "UTF-8") {
        tracing::warn!("translation codeset not set: {err}");
    }
    if let Err(err) = gettextrs::textdomain(GETTEXT_PACKAGE) {
        tracing::warn!("translation domain not set: {err}");
    }
}

fn main() -> glib::ExitCode {
    logging::init();
    init_i18n();

    let settings = Settings::from_env();
    tracing::info!(
        data_dir = %settings.data_dir.display(),
        difficulty = settings.difficulty.key(),
        "starting memory match"
    );
    ui::app::run(settings)
}
