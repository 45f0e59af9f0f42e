// ClipGlow - Verification des mises a jour
//
// Interroge /releases/latest de l'API GitHub (reqwest bloquant, appele
// hors du thread UI) et compare le tag a la version courante.
//
// # Concurrence
// Une seule verification a la fois : un drapeau atomique est pris par
// compare_exchange et relache a la fin, meme en cas d'erreur. Une
// demande concurrente renvoie `CheckOutcome::Busy` sans requete.
//
// # Mode silencieux
// Les verifications periodiques sont silencieuses : seules les
// nouvelles versions sont signalees, "a jour" et les erreurs vont
// uniquement dans le log.

use crate::constants::{APP_NAME, APP_VERSION, GITHUB_ACCEPT, UPDATE_API_URL, UPDATE_HTTP_TIMEOUT_SECS};
use crate::error::{GlowError, GlowResult};
use crate::update::release::{GitHubRelease, UpdateInfo};
use crate::update::version::Version;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fournisseur de la derniere release.
pub trait ReleaseSource: Send + Sync {
    fn fetch_latest(&self) -> GlowResult<GitHubRelease>;
}

/// Client HTTP de l'API GitHub.
pub struct GitHubClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl GitHubClient {
    pub fn new() -> GlowResult<Self> {
        Self::with_url(UPDATE_API_URL)
    }

    pub fn with_url(url: &str) -> GlowResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("{}/{}", APP_NAME, APP_VERSION))
            .default_headers(headers)
            .timeout(Duration::from_secs(UPDATE_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl ReleaseSource for GitHubClient {
    fn fetch_latest(&self) -> GlowResult<GitHubRelease> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GlowError::Update(format!("HTTP {}", status)));
        }
        let body = response.text()?;
        serde_json::from_str(&body)
            .map_err(|e| GlowError::Update(format!("invalid release payload: {}", e)))
    }
}

/// Resultat d'une verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    UpdateAvailable(UpdateInfo),
    UpToDate,
    Failed(String),
    /// Une verification etait deja en cours
    Busy,
}

/// Resultat accompagne du mode de la demande.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub outcome: CheckOutcome,
    pub silent: bool,
}

impl CheckReport {
    /// Vrai si l'utilisateur doit voir une boite de dialogue.
    pub fn should_notify(&self) -> bool {
        match self.outcome {
            CheckOutcome::UpdateAvailable(_) => true,
            CheckOutcome::UpToDate | CheckOutcome::Failed(_) => !self.silent,
            CheckOutcome::Busy => false,
        }
    }
}

/// Compare une release a la version courante.
pub fn evaluate(release: &GitHubRelease, current: &str) -> CheckOutcome {
    let latest = Version::parse(release.tag_name.as_deref().unwrap_or_default());
    if latest > Version::parse(current) {
        CheckOutcome::UpdateAvailable(UpdateInfo::from_release(release))
    } else {
        CheckOutcome::UpToDate
    }
}

/// Verificateur partage entre le planificateur et les demandes manuelles.
pub struct UpdateChecker<S> {
    source: S,
    current: String,
    checking: AtomicBool,
}

struct CheckingGuard<'a>(&'a AtomicBool);

impl Drop for CheckingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: ReleaseSource> UpdateChecker<S> {
    pub fn new(source: S) -> Self {
        Self::with_version(source, APP_VERSION)
    }

    pub fn with_version(source: S, current: &str) -> Self {
        Self {
            source,
            current: current.to_string(),
            checking: AtomicBool::new(false),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_checking(&self) -> bool {
        self.checking.load(Ordering::Acquire)
    }

    /// Verification bloquante.
    pub fn check(&self, silent: bool) -> CheckReport {
        if self
            .checking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("update check already in progress");
            return CheckReport {
                outcome: CheckOutcome::Busy,
                silent,
            };
        }
        let _guard = CheckingGuard(&self.checking);

        debug!("checking for updates (silent={})", silent);
        let outcome = match self.source.fetch_latest() {
            Ok(release) => evaluate(&release, &self.current),
            Err(e) => {
                warn!("update check failed: {}", e);
                CheckOutcome::Failed(e.to_string())
            }
        };
        match &outcome {
            CheckOutcome::UpdateAvailable(info) => info!("new version available: {}", info.version),
            CheckOutcome::UpToDate => debug!("already up to date (v{})", self.current),
            _ => {}
        }
        CheckReport { outcome, silent }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Barrier};

    /// Source factice : renvoie un tag fixe ou une erreur.
    pub(crate) struct FakeSource {
        pub tag: Option<String>,
        pub calls: AtomicUsize,
        pub gate: Option<Arc<Barrier>>,
    }

    impl FakeSource {
        pub fn tag(tag: &str) -> Self {
            Self {
                tag: Some(tag.into()),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        pub fn failing() -> Self {
            Self {
                tag: None,
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }
    }

    impl ReleaseSource for FakeSource {
        fn fetch_latest(&self) -> GlowResult<GitHubRelease> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.wait();
                gate.wait();
            }
            match &self.tag {
                Some(tag) => Ok(GitHubRelease {
                    tag_name: Some(tag.clone()),
                    ..Default::default()
                }),
                None => Err(GlowError::Update("HTTP 503 Service Unavailable".into())),
            }
        }
    }

    #[test]
    fn test_newer_release_is_available() {
        let checker = UpdateChecker::with_version(FakeSource::tag("v1.3.0"), "1.2.0");
        let report = checker.check(true);
        match &report.outcome {
            CheckOutcome::UpdateAvailable(info) => assert_eq!(info.version, "v1.3.0"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(report.should_notify());
        assert!(!checker.is_checking());
    }

    #[test]
    fn test_same_or_older_is_up_to_date() {
        for tag in ["v1.2.0", "1.2", "v1.1.9", "nightly"] {
            let checker = UpdateChecker::with_version(FakeSource::tag(tag), "1.2.0");
            assert_eq!(checker.check(false).outcome, CheckOutcome::UpToDate, "tag {}", tag);
        }
    }

    #[test]
    fn test_missing_tag_is_up_to_date() {
        // Sans tag_name, la release vaut 0.0.0
        assert_eq!(evaluate(&GitHubRelease::default(), "0.0.1"), CheckOutcome::UpToDate);
        assert_eq!(evaluate(&GitHubRelease::default(), "0.0.0"), CheckOutcome::UpToDate);
        let tagged = GitHubRelease {
            tag_name: Some("v0.0.2".into()),
            ..Default::default()
        };
        assert!(matches!(evaluate(&tagged, "0.0.1"), CheckOutcome::UpdateAvailable(_)));
    }

    #[test]
    fn test_silent_mode_notifications() {
        let failing = UpdateChecker::with_version(FakeSource::failing(), "1.0.0");
        let silent = failing.check(true);
        assert!(matches!(silent.outcome, CheckOutcome::Failed(_)));
        assert!(!silent.should_notify());
        assert!(failing.check(false).should_notify());

        let up_to_date = CheckReport {
            outcome: CheckOutcome::UpToDate,
            silent: true,
        };
        assert!(!up_to_date.should_notify());
        let busy = CheckReport {
            outcome: CheckOutcome::Busy,
            silent: false,
        };
        assert!(!busy.should_notify());
    }

    #[test]
    fn test_concurrent_check_is_busy() {
        let gate = Arc::new(Barrier::new(2));
        let source = FakeSource {
            gate: Some(gate.clone()),
            ..FakeSource::tag("v9.0.0")
        };
        let checker = Arc::new(UpdateChecker::with_version(source, "1.0.0"));
        let c2 = checker.clone();
        let handle = std::thread::spawn(move || c2.check(false));

        // Premiere verification bloquee dans fetch_latest
        gate.wait();
        assert!(checker.is_checking());
        assert_eq!(checker.check(false).outcome, CheckOutcome::Busy);
        gate.wait();

        let first = handle.join().unwrap();
        assert!(matches!(first.outcome, CheckOutcome::UpdateAvailable(_)));
        assert!(!checker.is_checking());
        assert_eq!(checker.source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_client_builds() {
        assert!(GitHubClient::new().is_ok());
    }
}
