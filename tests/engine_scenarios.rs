//! Engine scenarios
//!
//! Drives the platform-independent engine with recorded mouse gestures
//! and an in-memory clipboard, as the Windows message loop would.

use clipglow::clipboard::watcher::ClipboardSource;
use clipglow::config::{Settings, SettingsStore};
use clipglow::engine::{enqueue, pending, AppEvent, Dispatcher, Effect, EffectSink, Engine};
use clipglow::error::GlowResult;
use clipglow::feedback::Phase;
use clipglow::icon::IconStyle;
use clipglow::input::{DragMetric, InputTracker, Point, PreCopyClassifier};
use proptest::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Clipboard that always holds the same text.
struct StaticClipboard(&'static str);

impl ClipboardSource for StaticClipboard {
    fn read_text(&mut self) -> GlowResult<Option<String>> {
        Ok(Some(self.0.to_string()))
    }
}

/// Records the effects instead of touching any window.
#[derive(Default)]
struct Recorder(Vec<Effect>);

impl EffectSink for Recorder {
    fn apply(&mut self, effect: Effect) {
        self.0.push(effect);
    }
}

fn gesture(engine: &mut Engine<StaticClipboard>, settings: &Settings, from: Point, to: Point, up_at: Instant) {
    engine.handle(AppEvent::ButtonDown { pos: from }, settings);
    engine.handle(AppEvent::Move { pos: to }, settings);
    engine.handle(AppEvent::ButtonUp { pos: to, at: up_at }, settings);
}

#[test]
fn test_click_then_copy_is_accepted() {
    let settings = Settings::default();
    let mut engine = Engine::new(StaticClipboard("hello"), &settings);
    let t0 = Instant::now();
    let p = Point::new(100, 100);
    gesture(&mut engine, &settings, p, p, t0);

    let effects = engine.handle(
        AppEvent::ClipboardChanged {
            at: t0 + Duration::from_millis(10),
            cursor: p,
        },
        &settings,
    );
    assert!(effects.contains(&Effect::StartAnimationTimer));
    assert!(effects.contains(&Effect::StartFlashTimer));
    assert!(!engine.mouse().was_dragging);
    assert_eq!(engine.animator().phase(), Phase::FadeIn);
    assert_eq!(engine.copies(), 1);
}

#[test]
fn test_drag_selection_is_suppressed() {
    let settings = Settings::default();
    let mut engine = Engine::new(StaticClipboard("selected words"), &settings);
    let t0 = Instant::now();
    gesture(&mut engine, &settings, Point::new(100, 100), Point::new(150, 100), t0);

    let effects = engine.handle(
        AppEvent::ClipboardChanged {
            at: t0 + Duration::from_millis(20),
            cursor: Point::new(150, 100),
        },
        &settings,
    );
    assert!(effects.is_empty());
    assert!(engine.mouse().was_dragging);
    assert_eq!(engine.animator().phase(), Phase::Idle);
    assert_eq!(engine.copies(), 0);
}

#[test]
fn test_copy_long_after_drag_is_accepted() {
    let settings = Settings::default();
    let mut engine = Engine::new(StaticClipboard("ctrl+c"), &settings);
    let t0 = Instant::now();
    gesture(&mut engine, &settings, Point::new(0, 0), Point::new(300, 20), t0);

    let effects = engine.handle(
        AppEvent::ClipboardChanged {
            at: t0 + Duration::from_millis(500),
            cursor: Point::new(300, 20),
        },
        &settings,
    );
    assert!(!effects.is_empty());
    assert_eq!(engine.copies(), 1);
}

#[test]
fn test_copy_while_dragging_is_suppressed() {
    let settings = Settings::default();
    let mut engine = Engine::new(StaticClipboard("x"), &settings);
    engine.handle(AppEvent::ButtonDown { pos: Point::new(0, 0) }, &settings);
    engine.handle(AppEvent::Move { pos: Point::new(0, 80) }, &settings);

    let later = Instant::now() + Duration::from_secs(5);
    let effects = engine.handle(
        AppEvent::ClipboardChanged {
            at: later,
            cursor: Point::new(0, 80),
        },
        &settings,
    );
    assert!(effects.is_empty());
}

#[test]
fn test_ticks_are_handled_while_menu_is_open() {
    let settings = RefCell::new(Settings::default());
    let core = RefCell::new(Dispatcher::new(
        Engine::new(StaticClipboard("hi"), &settings.borrow()),
        Recorder::default(),
    ));
    // Same guards as the window procedure
    let pump = || {
        let (Ok(s), Ok(mut c)) = (settings.try_borrow(), core.try_borrow_mut()) else {
            return 0;
        };
        c.drain(&s)
    };

    // The menu handler keeps reading the settings during its modal loop
    let menu_view = settings.borrow();
    enqueue(AppEvent::ClipboardChanged {
        at: Instant::now(),
        cursor: Point::new(10, 10),
    });
    assert_eq!(pump(), 1);

    let mut ticks = 0;
    while !core.borrow().sink().0.contains(&Effect::StopAnimationTimer) {
        enqueue(AppEvent::AnimationTick);
        if ticks % 7 == 0 {
            enqueue(AppEvent::FlashTick);
        }
        ticks += 1;
        pump();
        assert_eq!(pending(), 0);
        assert!(ticks <= 50);
    }
    drop(menu_view);

    assert_eq!(ticks, 50);
    let core = core.borrow();
    assert!(core.sink().0.contains(&Effect::HideFeedback));
    assert!(core.sink().0.contains(&Effect::StopFlashTimer));
    assert_eq!(core.engine().animator().phase(), Phase::Idle);
}

#[test]
fn test_busy_dispatcher_keeps_events_queued() {
    let settings = Settings::default();
    let core = RefCell::new(Dispatcher::new(
        Engine::new(StaticClipboard("hi"), &settings),
        Recorder::default(),
    ));
    let pump = || match core.try_borrow_mut() {
        Ok(mut c) => c.drain(&settings),
        Err(_) => 0,
    };

    {
        let _busy = core.borrow_mut();
        enqueue(AppEvent::FlashTick);
        assert_eq!(pump(), 0);
        assert_eq!(pending(), 1);
    }
    assert_eq!(pump(), 1);
    assert_eq!(pending(), 0);
}

fn any_settings() -> impl Strategy<Value = Settings> {
    (
        0..IconStyle::ALL.len(),
        16u32..=64,
        proptest::option::of("[a-z]{1,8}(/[a-z0-9_]{1,8}){0,2}\\.(png|ico)"),
        any::<[bool; 4]>(),
    )
        .prop_map(|(style, size, path, flags)| Settings {
            icon_style: IconStyle::ALL[style],
            icon_size: size,
            custom_icon_path: path.map(PathBuf::from),
            enable_tray_flash: flags[0],
            enable_icon_feedback: flags[1],
            enable_auto_start: flags[2],
            enable_auto_update: flags[3],
        })
}

proptest! {
    #[test]
    fn prop_settings_roundtrip(settings in any_settings()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        SettingsStore::with_settings(&path, settings.clone()).save().unwrap();
        let loaded = SettingsStore::load(&path);
        prop_assert_eq!(loaded.settings(), &settings);
    }

    #[test]
    fn prop_small_gestures_never_drag(dx in -10i32..=10, dy in -10i32..=10) {
        let mut tracker = InputTracker::new(10, DragMetric::Chebyshev);
        let t0 = Instant::now();
        tracker.on_button_down(Point::new(500, 500));
        tracker.on_move(Point::new(500 + dx, 500 + dy));
        tracker.on_button_up(Point::new(500 + dx, 500 + dy), t0);
        prop_assert!(!tracker.state().was_dragging);
        let classifier = PreCopyClassifier::default();
        prop_assert!(!classifier.is_possible_pre_copy(tracker.state(), t0));
    }

    #[test]
    fn prop_large_gestures_drag(dx in 11i32..2000, vertical in any::<bool>(), after_ms in 0u64..200) {
        let (x, y) = if vertical { (500, 500 + dx) } else { (500 - dx, 500) };
        let mut tracker = InputTracker::default();
        let t0 = Instant::now();
        tracker.on_button_down(Point::new(500, 500));
        tracker.on_button_up(Point::new(x, y), t0);
        prop_assert!(tracker.state().was_dragging);

        let classifier = PreCopyClassifier::default();
        let now = t0 + Duration::from_millis(after_ms);
        prop_assert_eq!(classifier.is_possible_pre_copy(tracker.state(), now), after_ms < 80);
    }

    #[test]
    fn prop_icon_size_is_clamped(size in any::<i64>()) {
        let json = format!(r#"{{"iconSize": {}}}"#, size);
        let settings: Settings = serde_json::from_str(&json).unwrap();
        prop_assert!((16..=64).contains(&settings.icon_size));
    }
}
