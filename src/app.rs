// ClipGlow - Orchestrateur principal
// Connecte le moteur d'evenements aux composants Windows : fenetre
// cachee, hook souris, presse-papiers, overlay, tray et mises a jour
//
// # Architecture
// Tout l'etat vit sur le thread UI. Le hook souris et la procedure de
// fenetre empilent des `AppEvent` (voir `engine`) ; `pump` les depile
// via le `Dispatcher`, qui applique les `Effect` a la `Surface`
// (overlay, timers, icone du tray). Les verifications de mise a jour
// tournent sur des threads dedies et renvoient leur `CheckReport` par
// un canal crossbeam, suivi d'un WM_APP_UPDATE pour reveiller le
// thread UI.
//
// Les menus et boites de dialogue sont modaux : leur boucle interne
// continue de distribuer les messages a `wndproc_main`. Les handlers
// ne prennent donc que `&App` ; le dispatcher et les preferences sont
// dans des `RefCell` separes, jamais empruntes pendant un appel
// modal. Les ticks et les copies sont ainsi traites pendant qu'un menu
// ou une boite de dialogue est ouvert. Une seule interaction modale a
// la fois (`in_modal`).
//
// # Cycle de vie
// 1. `App::new()` : preferences, moteur, client de mise a jour
// 2. `App::run()` : fenetres, ecouteur, tray, hook, autostart,
//    planificateur puis boucle de messages
// 3. `App::cleanup()` : arret des timers, retrait du tray et du hook
//
// # Messages Win32 geres
// - WM_CLIPBOARDUPDATE : contenu du presse-papiers modifie
// - WM_APP_INPUT       : evenements souris en attente
// - WM_TIMER           : frame d'animation ou pas de clignotement
// - WM_TRAY_CALLBACK   : clic droit sur l'icone du tray
// - WM_APP_UPDATE      : resultat d'une verification de mise a jour

use crate::clipboard::monitor::{self, SystemClipboard};
use crate::config::SettingsStore;
use crate::constants::*;
use crate::engine::{self, AppEvent, Dispatcher, Effect, EffectSink, Engine};
use crate::error::GlowResult;
use crate::feedback::icon::validate_custom_icon;
use crate::system::autostart;
use crate::system::hook::MouseHook;
use crate::system::tray::{self, TrayIcon};
use crate::tray::{apply_custom_icon, build_menu, Followup, MenuCommand};
use crate::ui::dialogs;
use crate::ui::overlay::{self, Overlay};
use crate::ui::window;
use crate::update::{
    spawn_check, CheckOutcome, CheckReport, GitHubClient, Schedule, UpdateChecker,
    UpdateScheduler,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, DispatchMessageW, GetMessageW, PostMessageW, PostQuitMessage,
    TranslateMessage, MSG, WM_CLIPBOARDUPDATE, WM_DESTROY, WM_RBUTTONUP, WM_TIMER,
};

const AUTOSTART_FAILED: &str =
    "Failed to configure start with Windows. Please check your permissions.";

/// Partie Win32 des effets du moteur.
struct Surface {
    hwnd: HWND,
    overlay: Option<Overlay>,
    tray: Option<TrayIcon>,
}

impl EffectSink for Surface {
    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ShowFeedback { origin, .. } => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.show_at(origin);
                }
            }
            Effect::PresentFeedback(frame) => {
                if let Some(overlay) = self.overlay.as_ref() {
                    if let Err(e) = overlay.present(&frame) {
                        debug!("frame not presented: {}", e);
                    }
                }
            }
            Effect::HideFeedback => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.hide();
                }
            }
            Effect::StartAnimationTimer => {
                window::start_timer(self.hwnd, TIMER_ANIMATION, ANIMATION_INTERVAL_MS)
            }
            Effect::StopAnimationTimer => window::stop_timer(self.hwnd, TIMER_ANIMATION),
            Effect::SetTrayIcon(kind) => {
                if let Some(tray) = self.tray.as_mut() {
                    tray.set(kind);
                }
            }
            Effect::StartFlashTimer => {
                window::start_timer(self.hwnd, TIMER_FLASH, FLASH_INTERVAL_MS)
            }
            Effect::StopFlashTimer => window::stop_timer(self.hwnd, TIMER_FLASH),
        }
    }
}

/// Etat global de l'application.
pub struct App {
    hwnd: HWND,
    store: RefCell<SettingsStore>,
    core: RefCell<Dispatcher<SystemClipboard, Surface>>,
    hook: Option<MouseHook>,
    checker: Arc<UpdateChecker<GitHubClient>>,
    scheduler: RefCell<UpdateScheduler>,
    reports_tx: Sender<CheckReport>,
    reports_rx: Receiver<CheckReport>,
    /// Menu ou boite de dialogue ouvert
    in_modal: Cell<bool>,
}

impl App {
    /// Charge les preferences depuis `config_path` et prepare le moteur.
    ///
    /// Aucune ressource Windows n'est creee avant `run`.
    pub fn new(config_path: &Path) -> GlowResult<Self> {
        let store = SettingsStore::load(config_path);
        let engine = Engine::new(SystemClipboard, store.settings());
        let surface = Surface {
            hwnd: HWND::default(),
            overlay: None,
            tray: None,
        };
        let checker = Arc::new(UpdateChecker::new(GitHubClient::new()?));
        let (reports_tx, reports_rx) = unbounded();
        Ok(Self {
            hwnd: HWND::default(),
            store: RefCell::new(store),
            core: RefCell::new(Dispatcher::new(engine, surface)),
            hook: None,
            checker,
            scheduler: RefCell::new(UpdateScheduler::idle()),
            reports_tx,
            reports_rx,
            in_modal: Cell::new(false),
        })
    }

    /// Initialise les composants et execute la boucle de messages.
    ///
    /// # Errors
    /// Seules la fenetre cachee et l'icone du tray sont indispensables ;
    /// les autres composants sont journalises et ignores en cas d'echec.
    pub fn run(&mut self) -> GlowResult<()> {
        window::register_class(window::MAIN_CLASS, Self::wndproc_main)?;
        overlay::register_class()?;

        self.hwnd = window::create_hidden_window()?;
        let surface = self.core.get_mut().sink_mut();
        surface.hwnd = self.hwnd;
        match Overlay::create() {
            Ok(o) => surface.overlay = Some(o),
            Err(e) => warn!("feedback overlay unavailable: {}", e),
        }
        surface.tray = Some(TrayIcon::add(self.hwnd)?);

        if let Err(e) = monitor::register_listener(self.hwnd) {
            error!("clipboard listener not registered: {}", e);
        }
        match MouseHook::install(self.hwnd) {
            Ok(h) => self.hook = Some(h),
            Err(e) => warn!("mouse hook unavailable, every copy will be shown: {}", e),
        }

        let settings = self.store.get_mut().settings().clone();
        if let Err(e) = autostart::sync(settings.enable_auto_start) {
            warn!("cannot sync start with Windows: {}", e);
        }
        if settings.enable_auto_update {
            self.start_scheduler();
        }

        info!("{} v{} running", APP_NAME, APP_VERSION);
        let this: &App = self;
        // SAFETY: `this` reste valide pendant toute la boucle ; les
        // handlers n'en prennent que des references partagees et le
        // pointeur est efface avant cleanup.
        unsafe { window::set_user_data(self.hwnd, this as *const App as *mut App) };
        this.message_loop();
        unsafe { window::set_user_data::<App>(self.hwnd, std::ptr::null_mut()) };

        self.cleanup();
        Ok(())
    }

    /// Boucle de messages Win32 principale.
    fn message_loop(&self) {
        // SAFETY: boucle de messages standard Win32.
        unsafe {
            let mut msg = MSG::default();
            while GetMessageW(&mut msg, HWND::default(), 0, 0).0 > 0 {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }

    /// Traite les evenements en attente.
    ///
    /// Si le dispatcher est deja emprunte plus haut dans la pile, les
    /// evenements restent en file jusqu'au prochain message.
    fn pump(&self) {
        let (Ok(store), Ok(mut core)) = (self.store.try_borrow(), self.core.try_borrow_mut())
        else {
            return;
        };
        core.drain(store.settings());
    }

    /// Execute une interaction modale. Les rapports de mise a jour
    /// arrives entre-temps sont affiches a sa suite.
    fn run_modal(&self, f: impl FnOnce(&App)) {
        if self.in_modal.replace(true) {
            return;
        }
        f(self);
        self.show_update_reports();
        self.in_modal.set(false);
    }

    /// Clic sur l'icone du tray.
    fn on_tray_message(&self, lparam: LPARAM) {
        if (lparam.0 as u32 & 0xFFFF) != WM_RBUTTONUP {
            return;
        }
        self.run_modal(|app| {
            let items = build_menu(app.store.borrow().settings());
            if let Some(command) = tray::show_menu(app.hwnd, &items) {
                app.on_menu_command(command);
            }
        });
    }

    fn on_menu_command(&self, command: MenuCommand) {
        debug!("menu command {:?}", command);
        let followup = if command.mutates_settings() {
            let mut followup = Followup::None;
            let saved = self.store.borrow_mut().update(|s| followup = command.apply(s));
            if let Err(e) = saved {
                error!("cannot save settings: {}", e);
            }
            followup
        } else {
            let mut scratch = self.store.borrow().settings().clone();
            command.apply(&mut scratch)
        };

        match followup {
            Followup::None => {}
            Followup::IconChanged => self.refresh_icon(),
            Followup::AutoStartChanged(enabled) => self.apply_autostart(enabled),
            Followup::AutoUpdateChanged(true) => self.start_scheduler(),
            Followup::AutoUpdateChanged(false) => self.scheduler.borrow_mut().stop(),
            Followup::PickCustomIcon => self.import_custom_icon(),
            Followup::CheckUpdates => {
                spawn_check(self.checker.clone(), false, self.report_sink())
            }
            Followup::ShowAbout => {
                dialogs::info(&format!("About {}", APP_NAME), &dialogs::about_text())
            }
            Followup::Exit => {
                info!("exit requested");
                // SAFETY: appel FFI Win32 sur le thread UI.
                unsafe { PostQuitMessage(0) };
            }
        }
    }

    /// Recalcule l'icone de retour visuel apres un changement de style,
    /// de taille ou d'image.
    fn refresh_icon(&self) {
        let store = self.store.borrow();
        match self.core.try_borrow_mut() {
            Ok(mut core) => core.engine_mut().settings_changed(store.settings()),
            Err(_) => warn!("feedback icon not refreshed, dispatcher busy"),
        }
    }

    /// Ecrit la cle Run ; en cas d'echec la preference est realignee sur
    /// l'etat reel du registre.
    fn apply_autostart(&self, enabled: bool) {
        let Err(e) = autostart::set_enabled(enabled) else {
            return;
        };
        warn!("cannot change start with Windows: {}", e);
        let actual = autostart::is_enabled();
        let saved = self.store.borrow_mut().update(|s| s.enable_auto_start = actual);
        if let Err(e) = saved {
            error!("cannot save settings: {}", e);
        }
        dialogs::warning(APP_NAME, AUTOSTART_FAILED);
    }

    fn import_custom_icon(&self) {
        let Some(path) = dialogs::pick_image() else {
            return;
        };
        if let Err(e) = validate_custom_icon(&path) {
            warn!("rejected custom icon {}: {}", path.display(), e);
            dialogs::error(APP_NAME, &format!("Cannot load this image:\n{}", e));
            return;
        }
        let saved = self.store.borrow_mut().update(|s| {
            apply_custom_icon(s, path.clone());
        });
        if let Err(e) = saved {
            error!("cannot save settings: {}", e);
        }
        self.refresh_icon();
        info!("custom icon set to {}", path.display());
        dialogs::info(APP_NAME, "Custom icon set successfully.");
    }

    fn start_scheduler(&self) {
        self.scheduler
            .borrow_mut()
            .start(self.checker.clone(), Schedule::default(), self.report_sink());
    }

    /// Callback des threads de mise a jour : envoie le rapport et
    /// reveille le thread UI.
    fn report_sink(&self) -> impl Fn(CheckReport) + Send + 'static {
        let tx = self.reports_tx.clone();
        let target = self.hwnd.0 as isize;
        move |report| {
            if tx.send(report).is_ok() {
                let hwnd = HWND(target as *mut std::ffi::c_void);
                // SAFETY: PostMessageW est utilisable depuis tout thread.
                unsafe {
                    let _ = PostMessageW(hwnd, WM_APP_UPDATE, WPARAM(0), LPARAM(0));
                }
            }
        }
    }

    /// Affiche les resultats de verification en attente.
    fn show_update_reports(&self) {
        while let Ok(report) = self.reports_rx.try_recv() {
            if !report.should_notify() {
                continue;
            }
            match report.outcome {
                CheckOutcome::UpdateAvailable(info) => {
                    if dialogs::confirm("Update available", &info.prompt(APP_VERSION)) {
                        if let Err(e) = dialogs::open_url(info.target_url()) {
                            error!("cannot open download page: {}", e);
                            dialogs::error(
                                APP_NAME,
                                &format!("Cannot open the browser. Please visit:\n{}", RELEASES_PAGE_URL),
                            );
                        }
                    }
                }
                CheckOutcome::UpToDate => dialogs::info(
                    "Check for updates",
                    &format!("You are running the latest version v{}", APP_VERSION),
                ),
                CheckOutcome::Failed(reason) => dialogs::error(
                    "Check for updates",
                    &format!("Update check failed, please try again later.\n\n{}", reason),
                ),
                CheckOutcome::Busy => {}
            }
        }
    }

    /// Libere les ressources dans l'ordre inverse de `run`.
    fn cleanup(&mut self) {
        self.scheduler.get_mut().stop();
        let core = self.core.get_mut();
        core.shutdown();
        window::stop_timer(self.hwnd, TIMER_ANIMATION);
        window::stop_timer(self.hwnd, TIMER_FLASH);

        self.hook = None;
        monitor::unregister_listener(self.hwnd);
        let surface = core.sink_mut();
        if let Some(mut tray) = surface.tray.take() {
            tray.remove();
        }
        surface.overlay = None;

        window::destroy(self.hwnd);
        info!("{} stopped after {} copies", APP_NAME, core.engine().copies());
    }

    /// Procedure de la fenetre principale cachee.
    unsafe extern "system" fn wndproc_main(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        let app = window::get_user_data::<App>(hwnd);
        if app.is_null() {
            return DefWindowProcW(hwnd, msg, wparam, lparam);
        }
        let app = &*app;

        match msg {
            WM_CLIPBOARDUPDATE => {
                engine::enqueue(AppEvent::ClipboardChanged {
                    at: Instant::now(),
                    cursor: window::cursor_pos(),
                });
                app.pump();
                LRESULT(0)
            }
            WM_TIMER => {
                let event = match wparam.0 {
                    TIMER_ANIMATION => Some(AppEvent::AnimationTick),
                    TIMER_FLASH => Some(AppEvent::FlashTick),
                    _ => None,
                };
                if let Some(event) = event {
                    engine::enqueue(event);
                    app.pump();
                }
                LRESULT(0)
            }
            WM_APP_INPUT => {
                app.pump();
                LRESULT(0)
            }
            WM_TRAY_CALLBACK => {
                app.on_tray_message(lparam);
                LRESULT(0)
            }
            WM_APP_UPDATE => {
                app.run_modal(|_| {});
                LRESULT(0)
            }
            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
