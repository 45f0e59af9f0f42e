// ClipGlow - Point d'entree
// Retour visuel des copies pour Windows
//
// Ce binaire installe ClipGlow dans la zone de notification : chaque
// copie effective fait apparaitre une petite icone animee pres du
// curseur et clignoter l'icone du tray.
//
// # Prerequis
// - Windows 10 ou 11
//
// # Configuration
// Le fichier %APPDATA%\ClipGlow\config.json est cree au premier
// changement de preference ; le log est ecrit a cote (clipglow.log).

#![cfg_attr(all(windows, not(test)), windows_subsystem = "windows")]

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clipglow::app::App;
    use clipglow::config::{app_data_dir, default_config_path};
    use clipglow::constants::{APP_NAME, APP_VERSION};
    use clipglow::logging;
    use clipglow::system::instance::InstanceGuard;
    use clipglow::ui::dialogs;
    use tracing::{error, info};

    let _log_guard = logging::init(&app_data_dir());
    info!("{} v{} starting", APP_NAME, APP_VERSION);

    let Some(_instance) = InstanceGuard::acquire().context("single instance check failed")? else {
        info!("another instance is already running");
        dialogs::info(APP_NAME, "ClipGlow is already running.");
        return Ok(());
    };

    let result = App::new(&default_config_path())
        .context("initialization failed")
        .and_then(|mut app| app.run().context("fatal error"));
    if let Err(e) = &result {
        error!("{:#}", e);
        dialogs::error(APP_NAME, &format!("{:#}", e));
    }
    result
}

#[cfg(not(windows))]
fn main() {
    eprintln!("ClipGlow only runs on Windows.");
    std::process::exit(1);
}
