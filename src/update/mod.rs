// ClipGlow - Module update
// Verification des nouvelles versions sur GitHub Releases
//
// - `version`   : analyse et comparaison des tags
// - `release`   : modele JSON de l'API et informations affichees
// - `checker`   : requete HTTP, comparaison, garde anti-concurrence
// - `scheduler` : thread de verification periodique

pub mod checker;
pub mod release;
pub mod scheduler;
pub mod version;

pub use checker::{evaluate, CheckOutcome, CheckReport, GitHubClient, ReleaseSource, UpdateChecker};
pub use release::{find_download_url, truncate_notes, GitHubRelease, UpdateInfo};
pub use scheduler::{spawn_check, Schedule, UpdateScheduler};
pub use version::Version;
