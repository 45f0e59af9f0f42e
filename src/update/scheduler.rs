// ClipGlow - Verification periodique des mises a jour
//
// Un thread dedie attend UPDATE_INITIAL_DELAY_SECS apres le demarrage,
// verifie en mode silencieux, puis recommence toutes les
// UPDATE_INTERVAL_SECS. L'attente se fait sur un canal crossbeam
// (`recv_timeout`) : fermer le canal reveille et termine le thread.
//
// Le rapport est transmis par un callback, appele depuis le thread du
// planificateur. L'application y poste un message vers son thread UI.

use crate::constants::{UPDATE_INITIAL_DELAY_SECS, UPDATE_INTERVAL_SECS};
use crate::update::checker::{CheckReport, ReleaseSource, UpdateChecker};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Delais de la verification periodique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub initial_delay: Duration,
    pub interval: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(UPDATE_INITIAL_DELAY_SECS),
            interval: Duration::from_secs(UPDATE_INTERVAL_SECS),
        }
    }
}

/// Thread de verification periodique. Arrete par `stop` ou au drop.
pub struct UpdateScheduler {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl UpdateScheduler {
    /// Planificateur inactif.
    pub fn idle() -> Self {
        Self {
            stop_tx: None,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }

    /// Demarre le thread ; sans effet s'il tourne deja.
    pub fn start<S, F>(&mut self, checker: Arc<UpdateChecker<S>>, schedule: Schedule, on_report: F)
    where
        S: ReleaseSource + 'static,
        F: Fn(CheckReport) + Send + 'static,
    {
        if self.is_running() {
            return;
        }
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let spawned = std::thread::Builder::new()
            .name("update-scheduler".into())
            .spawn(move || {
                let mut wait = schedule.initial_delay;
                loop {
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {
                            on_report(checker.check(true));
                            wait = schedule.interval;
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("update scheduler stopped");
            });
        match spawned {
            Ok(handle) => {
                debug!("update scheduler started");
                self.stop_tx = Some(stop_tx);
                self.handle = Some(handle);
            }
            Err(e) => warn!("cannot start update scheduler: {}", e),
        }
    }

    /// Arrete le thread sans attendre une verification en cours.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.try_send(());
        }
        self.handle = None;
    }

    /// Arrete le thread et attend sa fin.
    pub fn join(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Lance une verification ponctuelle sur un thread dedie.
pub fn spawn_check<S, F>(checker: Arc<UpdateChecker<S>>, silent: bool, on_report: F)
where
    S: ReleaseSource + 'static,
    F: FnOnce(CheckReport) + Send + 'static,
{
    let spawned = std::thread::Builder::new()
        .name("update-check".into())
        .spawn(move || on_report(checker.check(silent)));
    if let Err(e) = spawned {
        warn!("cannot start update check: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::checker::tests::FakeSource;
    use crate::update::checker::CheckOutcome;
    use crossbeam_channel::unbounded;
    use std::sync::atomic::Ordering;

    fn fast() -> Schedule {
        Schedule {
            initial_delay: Duration::from_millis(10),
            interval: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_default_schedule() {
        let s = Schedule::default();
        assert_eq!(s.initial_delay, Duration::from_secs(30));
        assert_eq!(s.interval, Duration::from_secs(6 * 3600));
    }

    #[test]
    fn test_periodic_checks_are_silent() {
        let checker = Arc::new(UpdateChecker::with_version(FakeSource::tag("v2.0.0"), "1.0.0"));
        let (tx, rx) = unbounded();
        let mut scheduler = UpdateScheduler::idle();
        scheduler.start(checker.clone(), fast(), move |r| {
            let _ = tx.send(r);
        });
        assert!(scheduler.is_running());

        for _ in 0..2 {
            let report = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert!(report.silent);
            assert!(matches!(report.outcome, CheckOutcome::UpdateAvailable(_)));
        }
        scheduler.join();
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_stop_before_first_check() {
        let checker = Arc::new(UpdateChecker::with_version(FakeSource::tag("v2.0.0"), "1.0.0"));
        let mut scheduler = UpdateScheduler::idle();
        let slow = Schedule {
            initial_delay: Duration::from_secs(60),
            interval: Duration::from_secs(60),
        };
        scheduler.start(checker.clone(), slow, |_| {});
        scheduler.join();
        assert_eq!(checker_calls(&checker), 0);
    }

    #[test]
    fn test_spawn_check_reports_once() {
        let checker = Arc::new(UpdateChecker::with_version(FakeSource::failing(), "1.0.0"));
        let (tx, rx) = unbounded();
        spawn_check(checker, false, move |r| {
            let _ = tx.send(r);
        });
        let report = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(!report.silent);
        assert!(report.should_notify());
    }

    fn checker_calls(checker: &UpdateChecker<FakeSource>) -> usize {
        checker.source().calls.load(Ordering::SeqCst)
    }
}
