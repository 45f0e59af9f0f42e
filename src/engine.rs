// ClipGlow - Moteur d'evenements
//
// Le hook souris et la procedure de fenetre ne font qu'empiler des
// `AppEvent` ; la boucle de messages les depile un par un et les passe
// a `Engine::handle`, qui met a jour l'etat (souris, animation,
// clignotement) et renvoie la liste des `Effect` a appliquer par la
// couche Windows (overlay, timers, icone du tray).
//
// Le moteur ne connait aucune API systeme : il est pilote tel quel par
// les tests d'integration avec un presse-papiers en memoire.
//
// # File d'evenements
// `enqueue`/`dequeue` manipulent une file propre au thread UI : le hook
// souris empile et rend la main, la procedure de fenetre depile via
// `Dispatcher::drain`, y compris pendant la boucle modale d'un menu ou
// d'une boite de dialogue.
//
// # Copie acceptee
// - clignotement du tray si `enable_tray_flash` (et pas deja en cours)
// - animation au curseur si `enable_icon_feedback` (et pas deja en cours)

use crate::clipboard::watcher::{ClipboardEvent, ClipboardSource, ClipboardWatcher, Rejection};
use crate::config::Settings;
use crate::feedback::{FeedbackAnimator, FeedbackIcon, TickOutcome};
use crate::input::{InputTracker, MouseState, Point, PreCopyClassifier};
use crate::tray::{FlashStep, TrayFlasher, TrayIconKind};
use image::RgbaImage;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, info};

/// Evenement entrant, deja decode par la couche systeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    ButtonDown { pos: Point },
    ButtonUp { pos: Point, at: Instant },
    Move { pos: Point },
    /// WM_CLIPBOARDUPDATE, avec la position du curseur a cet instant
    ClipboardChanged { at: Instant, cursor: Point },
    AnimationTick,
    FlashTick,
}

/// Action a realiser par la couche Windows.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Positionner et afficher l'overlay (cote `size`) en `origin`
    ShowFeedback { origin: Point, size: u32 },
    /// Nouvelle image de l'overlay
    PresentFeedback(RgbaImage),
    HideFeedback,
    StartAnimationTimer,
    StopAnimationTimer,
    SetTrayIcon(TrayIconKind),
    StartFlashTimer,
    StopFlashTimer,
}

thread_local! {
    static EVENT_QUEUE: RefCell<VecDeque<AppEvent>> = const { RefCell::new(VecDeque::new()) };
}

/// Empile un evenement. Retourne true si la file etait vide : le thread
/// UI doit alors etre reveille (WM_APP_INPUT).
pub fn enqueue(event: AppEvent) -> bool {
    EVENT_QUEUE.with(|q| {
        let mut q = q.borrow_mut();
        let was_empty = q.is_empty();
        q.push_back(event);
        was_empty
    })
}

/// Depile le plus ancien evenement.
pub fn dequeue() -> Option<AppEvent> {
    EVENT_QUEUE.with(|q| q.borrow_mut().pop_front())
}

/// Nombre d'evenements en attente.
pub fn pending() -> usize {
    EVENT_QUEUE.with(|q| q.borrow().len())
}

/// Couche qui realise les effets.
pub trait EffectSink {
    fn apply(&mut self, effect: Effect);
}

/// Moteur associe a la couche qui applique ses effets.
///
/// Le thread UI le garde a part de l'etat tenu pendant les menus et
/// boites de dialogue, pour continuer a traiter les ticks et les copies
/// pendant leur boucle modale.
pub struct Dispatcher<C: ClipboardSource, S: EffectSink> {
    engine: Engine<C>,
    sink: S,
}

impl<C: ClipboardSource, S: EffectSink> Dispatcher<C, S> {
    pub fn new(engine: Engine<C>, sink: S) -> Self {
        Self { engine, sink }
    }

    pub fn engine(&self) -> &Engine<C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<C> {
        &mut self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Traite tous les evenements en attente. Retourne leur nombre.
    pub fn drain(&mut self, settings: &Settings) -> usize {
        let mut handled = 0;
        while let Some(event) = dequeue() {
            for effect in self.engine.handle(event, settings) {
                self.sink.apply(effect);
            }
            handled += 1;
        }
        handled
    }

    /// Applique les effets d'arret du moteur.
    pub fn shutdown(&mut self) {
        for effect in self.engine.shutdown() {
            self.sink.apply(effect);
        }
    }
}

/// Etat applicatif independant de la plateforme.
pub struct Engine<C: ClipboardSource> {
    tracker: InputTracker,
    watcher: ClipboardWatcher<C>,
    animator: FeedbackAnimator,
    icon: FeedbackIcon,
    flasher: TrayFlasher,
    last_copy: Option<ClipboardEvent>,
    copies: u64,
}

impl<C: ClipboardSource> Engine<C> {
    /// Moteur avec les seuils par defaut.
    pub fn new(source: C, settings: &Settings) -> Self {
        Self::with_parts(
            InputTracker::default(),
            ClipboardWatcher::new(source, Some(PreCopyClassifier::default())),
            FeedbackAnimator::default(),
            settings,
        )
    }

    pub fn with_parts(
        tracker: InputTracker,
        watcher: ClipboardWatcher<C>,
        animator: FeedbackAnimator,
        settings: &Settings,
    ) -> Self {
        Self {
            tracker,
            watcher,
            animator,
            icon: FeedbackIcon::from_settings(settings),
            flasher: TrayFlasher::new(),
            last_copy: None,
            copies: 0,
        }
    }

    pub fn mouse(&self) -> &MouseState {
        self.tracker.state()
    }

    pub fn animator(&self) -> &FeedbackAnimator {
        &self.animator
    }

    pub fn flasher(&self) -> &TrayFlasher {
        &self.flasher
    }

    pub fn icon(&self) -> &FeedbackIcon {
        &self.icon
    }

    pub fn last_copy(&self) -> Option<&ClipboardEvent> {
        self.last_copy.as_ref()
    }

    /// Nombre de copies acceptees depuis le demarrage.
    pub fn copies(&self) -> u64 {
        self.copies
    }

    /// Traite un evenement.
    pub fn handle(&mut self, event: AppEvent, settings: &Settings) -> Vec<Effect> {
        match event {
            AppEvent::ButtonDown { pos } => {
                self.tracker.on_button_down(pos);
                Vec::new()
            }
            AppEvent::Move { pos } => {
                self.tracker.on_move(pos);
                Vec::new()
            }
            AppEvent::ButtonUp { pos, at } => {
                self.tracker.on_button_up(pos, at);
                Vec::new()
            }
            AppEvent::ClipboardChanged { at, cursor } => self.on_clipboard(at, cursor, settings),
            AppEvent::AnimationTick => self.on_animation_tick(),
            AppEvent::FlashTick => self.on_flash_tick(),
        }
    }

    fn on_clipboard(&mut self, at: Instant, cursor: Point, settings: &Settings) -> Vec<Effect> {
        let event = match self.watcher.on_change(self.tracker.state(), at) {
            Ok(event) => event,
            Err(Rejection::PreCopy) => return Vec::new(),
            Err(reason) => {
                debug!("clipboard change ignored: {:?}", reason);
                return Vec::new();
            }
        };
        self.copies += 1;
        info!("copy detected ({} chars)", event.text.chars().count());
        self.last_copy = Some(event);

        let mut effects = Vec::new();
        if self.flasher.flash(settings.enable_tray_flash) {
            effects.push(Effect::StartFlashTimer);
        }
        if settings.enable_icon_feedback {
            if let Some(origin) = self.animator.trigger(cursor) {
                effects.push(Effect::ShowFeedback {
                    origin,
                    size: self.icon.canvas_size(),
                });
                if let Some(state) = self.animator.current() {
                    effects.push(Effect::PresentFeedback(self.icon.compose(&state)));
                }
                effects.push(Effect::StartAnimationTimer);
            }
        }
        effects
    }

    fn on_animation_tick(&mut self) -> Vec<Effect> {
        match self.animator.tick() {
            TickOutcome::Frame(state) => vec![Effect::PresentFeedback(self.icon.compose(&state))],
            TickOutcome::Finished(last) => vec![
                Effect::PresentFeedback(self.icon.compose(&last)),
                Effect::HideFeedback,
                Effect::StopAnimationTimer,
            ],
            // Tick residuel apres la fin du cycle
            TickOutcome::Idle => vec![Effect::StopAnimationTimer],
        }
    }

    fn on_flash_tick(&mut self) -> Vec<Effect> {
        match self.flasher.tick() {
            FlashStep::Show(kind) => vec![Effect::SetTrayIcon(kind)],
            FlashStep::Finished => vec![
                Effect::SetTrayIcon(TrayIconKind::Normal),
                Effect::StopFlashTimer,
            ],
            FlashStep::Idle => vec![Effect::StopFlashTimer],
        }
    }

    /// Les preferences ont change : recalcul de l'icone.
    pub fn settings_changed(&mut self, settings: &Settings) {
        self.icon.refresh(settings);
    }

    /// Arret : interrompt l'animation en cours.
    pub fn shutdown(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.animator.is_running() {
            self.animator.cancel();
            effects.push(Effect::HideFeedback);
            effects.push(Effect::StopAnimationTimer);
        }
        if self.flasher.is_flashing() {
            effects.push(Effect::StopFlashTimer);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::watcher::tests::FakeClipboard;
    use crate::error::GlowError;
    use crate::feedback::Phase;
    use crate::icon::IconStyle;
    use std::collections::VecDeque;
    use std::time::Duration;

    fn clipboard(reads: Vec<crate::error::GlowResult<Option<String>>>) -> FakeClipboard {
        FakeClipboard {
            reads: VecDeque::from(reads),
            read_count: 0,
        }
    }

    fn changed(at: Instant) -> AppEvent {
        AppEvent::ClipboardChanged {
            at,
            cursor: Point::new(300, 400),
        }
    }

    #[test]
    fn test_event_queue_order() {
        assert!(enqueue(AppEvent::AnimationTick));
        assert!(!enqueue(AppEvent::FlashTick));
        assert_eq!(dequeue(), Some(AppEvent::AnimationTick));
        assert_eq!(dequeue(), Some(AppEvent::FlashTick));
        assert_eq!(dequeue(), None);
        assert!(enqueue(AppEvent::FlashTick));
        assert_eq!(dequeue(), Some(AppEvent::FlashTick));
    }

    #[derive(Default)]
    struct Recorder(Vec<Effect>);

    impl EffectSink for Recorder {
        fn apply(&mut self, effect: Effect) {
            self.0.push(effect);
        }
    }

    #[test]
    fn test_dispatcher_drains_queue() {
        let settings = Settings::default();
        let engine = Engine::new(clipboard(vec![Ok(Some("a".into()))]), &settings);
        let mut dispatcher = Dispatcher::new(engine, Recorder::default());
        enqueue(changed(Instant::now()));
        enqueue(AppEvent::FlashTick);
        assert_eq!(pending(), 2);
        assert_eq!(dispatcher.drain(&settings), 2);
        assert_eq!(pending(), 0);
        assert_eq!(dispatcher.sink().0[0], Effect::StartFlashTimer);
        assert_eq!(
            dispatcher.sink().0.last(),
            Some(&Effect::SetTrayIcon(TrayIconKind::Accent))
        );

        dispatcher.sink_mut().0.clear();
        dispatcher.shutdown();
        assert!(dispatcher.sink().0.contains(&Effect::HideFeedback));
        assert!(!dispatcher.engine().animator().is_running());
    }

    #[test]
    fn test_accepted_copy_effects() {
        let settings = Settings::default();
        let mut engine = Engine::new(clipboard(vec![Ok(Some("hello".into()))]), &settings);
        let effects = engine.handle(changed(Instant::now()), &settings);

        assert_eq!(effects[0], Effect::StartFlashTimer);
        assert_eq!(
            effects[1],
            Effect::ShowFeedback {
                origin: Point::new(315, 415),
                size: 42
            }
        );
        assert!(matches!(effects[2], Effect::PresentFeedback(_)));
        assert_eq!(effects[3], Effect::StartAnimationTimer);
        assert_eq!(engine.copies(), 1);
        assert_eq!(engine.last_copy().map(|e| e.text.as_str()), Some("hello"));
        assert_eq!(engine.animator().phase(), Phase::FadeIn);
    }

    #[test]
    fn test_disabled_feedback_and_flash() {
        let settings = Settings {
            enable_icon_feedback: false,
            enable_tray_flash: false,
            ..Settings::default()
        };
        let mut engine = Engine::new(clipboard(vec![Ok(Some("x".into()))]), &settings);
        assert!(engine.handle(changed(Instant::now()), &settings).is_empty());
        assert_eq!(engine.copies(), 1);
        assert!(!engine.animator().is_running());
    }

    #[test]
    fn test_rejected_changes_have_no_effect() {
        let settings = Settings::default();
        let mut engine = Engine::new(
            clipboard(vec![
                Err(GlowError::Clipboard("locked".into())),
                Ok(None),
                Ok(Some(String::new())),
            ]),
            &settings,
        );
        for _ in 0..3 {
            assert!(engine.handle(changed(Instant::now()), &settings).is_empty());
        }
        assert_eq!(engine.copies(), 0);
    }

    #[test]
    fn test_animation_runs_to_completion() {
        let settings = Settings::default();
        let mut engine = Engine::new(clipboard(vec![Ok(Some("a".into()))]), &settings);
        engine.handle(changed(Instant::now()), &settings);

        let mut presented = 0;
        loop {
            let effects = engine.handle(AppEvent::AnimationTick, &settings);
            presented += 1;
            if let [Effect::PresentFeedback(last), Effect::HideFeedback, Effect::StopAnimationTimer] =
                effects.as_slice()
            {
                // La derniere frame est entierement transparente
                assert!(last.pixels().all(|p| p.0[3] == 0));
                break;
            }
            assert!(matches!(effects.as_slice(), [Effect::PresentFeedback(_)]));
        }
        assert_eq!(presented, 50);
        assert_eq!(
            engine.handle(AppEvent::AnimationTick, &settings),
            vec![Effect::StopAnimationTimer]
        );
    }

    #[test]
    fn test_second_copy_during_animation() {
        let settings = Settings::default();
        let mut engine = Engine::new(
            clipboard(vec![Ok(Some("a".into())), Ok(Some("a".into()))]),
            &settings,
        );
        engine.handle(changed(Instant::now()), &settings);
        engine.handle(AppEvent::AnimationTick, &settings);
        // Meme texte : pas de deduplication, mais ni animation ni flash relances
        let effects = engine.handle(changed(Instant::now()), &settings);
        assert!(effects.is_empty());
        assert_eq!(engine.copies(), 2);
        assert_eq!(engine.animator().frame(), 1);
    }

    #[test]
    fn test_flash_ticks_drive_tray_icon() {
        let settings = Settings::default();
        let mut engine = Engine::new(clipboard(vec![Ok(Some("a".into()))]), &settings);
        engine.handle(changed(Instant::now()), &settings);
        let icons: Vec<Vec<Effect>> = (0..6)
            .map(|_| engine.handle(AppEvent::FlashTick, &settings))
            .collect();
        assert_eq!(icons[0], vec![Effect::SetTrayIcon(TrayIconKind::Accent)]);
        assert_eq!(icons[1], vec![Effect::SetTrayIcon(TrayIconKind::Normal)]);
        assert_eq!(
            icons[5],
            vec![Effect::SetTrayIcon(TrayIconKind::Normal), Effect::StopFlashTimer]
        );
    }

    #[test]
    fn test_drag_selection_is_suppressed() {
        let settings = Settings::default();
        let mut engine = Engine::new(clipboard(vec![Ok(Some("sel".into()))]), &settings);
        let t0 = Instant::now();
        engine.handle(AppEvent::ButtonDown { pos: Point::new(0, 0) }, &settings);
        engine.handle(AppEvent::Move { pos: Point::new(40, 0) }, &settings);
        engine.handle(
            AppEvent::ButtonUp {
                pos: Point::new(40, 0),
                at: t0,
            },
            &settings,
        );
        let effects = engine.handle(changed(t0 + Duration::from_millis(5)), &settings);
        assert!(effects.is_empty());
        assert!(engine.mouse().was_dragging);
        assert_eq!(engine.copies(), 0);
    }

    #[test]
    fn test_settings_changed_refreshes_icon() {
        let settings = Settings::default();
        let mut engine = Engine::new(clipboard(vec![]), &settings);
        let bigger = Settings {
            icon_size: 48,
            icon_style: IconStyle::Star,
            ..Settings::default()
        };
        engine.settings_changed(&bigger);
        assert_eq!(engine.icon().canvas_size(), 58);
    }

    #[test]
    fn test_shutdown_stops_running_animation() {
        let settings = Settings::default();
        let mut engine = Engine::new(clipboard(vec![Ok(Some("a".into()))]), &settings);
        engine.handle(changed(Instant::now()), &settings);
        let effects = engine.shutdown();
        assert_eq!(
            effects,
            vec![Effect::HideFeedback, Effect::StopAnimationTimer, Effect::StopFlashTimer]
        );
        assert!(!engine.animator().is_running());
    }
}
