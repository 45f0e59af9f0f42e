// ClipGlow - Reponse de l'API GitHub Releases
//
// Seuls les champs utiles de /releases/latest sont decodes ; tous sont
// optionnels. `UpdateInfo` est la vue presentee a l'utilisateur.
//
// # Lien de telechargement
// Premier asset ".exe" (casse ignoree), sinon premier ".zip", sinon la
// page html de la release.

use crate::constants::{RELEASES_PAGE_URL, RELEASE_NOTES_MAX_CHARS};
use serde::Deserialize;

/// Release telle que renvoyee par GitHub.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubRelease {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

/// Fichier attache a une release.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubAsset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub browser_download_url: Option<String>,
}

/// Texte par defaut quand la release n'a pas de notes.
pub const NO_RELEASE_NOTES: &str = "No release notes.";

/// Informations sur une version plus recente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    /// Tag brut ("v1.3.0")
    pub version: String,
    pub release_notes: String,
    pub download_url: Option<String>,
    pub html_url: String,
}

impl UpdateInfo {
    pub fn from_release(release: &GitHubRelease) -> Self {
        Self {
            version: release.tag_name.clone().unwrap_or_else(|| "unknown".into()),
            release_notes: release
                .body
                .clone()
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| NO_RELEASE_NOTES.into()),
            download_url: find_download_url(release),
            html_url: release.html_url.clone().unwrap_or_default(),
        }
    }

    /// URL a ouvrir : lien de telechargement, page de la release, ou
    /// page generique des releases.
    pub fn target_url(&self) -> &str {
        match self.download_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ if !self.html_url.is_empty() => &self.html_url,
            _ => RELEASES_PAGE_URL,
        }
    }

    /// Message de la boite de dialogue "nouvelle version".
    pub fn prompt(&self, current: &str) -> String {
        format!(
            "A new version {} is available.\n\nCurrent version: v{}\n\nRelease notes:\n{}\n\nOpen the download page now?",
            self.version,
            current,
            truncate_notes(&self.release_notes, RELEASE_NOTES_MAX_CHARS)
        )
    }
}

fn asset_with_extension<'a>(assets: &'a [GitHubAsset], ext: &str) -> Option<&'a str> {
    assets.iter().find_map(|a| {
        let name = a.name.as_deref()?;
        if name.to_ascii_lowercase().ends_with(ext) {
            a.browser_download_url.as_deref()
        } else {
            None
        }
    })
}

/// Choisit le lien de telechargement d'une release.
pub fn find_download_url(release: &GitHubRelease) -> Option<String> {
    asset_with_extension(&release.assets, ".exe")
        .or_else(|| asset_with_extension(&release.assets, ".zip"))
        .map(str::to_string)
        .or_else(|| release.html_url.clone())
}

/// Tronque a `max` caracteres (et non octets) et ajoute "...".
pub fn truncate_notes(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, url: &str) -> GitHubAsset {
        GitHubAsset {
            name: Some(name.into()),
            browser_download_url: Some(url.into()),
        }
    }

    #[test]
    fn test_deserialize_github_payload() {
        let json = r#"{
            "tag_name": "v1.3.0",
            "name": "ClipGlow 1.3",
            "body": "Fixes",
            "html_url": "https://github.com/x/y/releases/tag/v1.3.0",
            "assets": [{"name": "ClipGlow.zip", "browser_download_url": "https://dl/zip", "size": 10}],
            "draft": false
        }"#;
        let r: GitHubRelease = serde_json::from_str(json).unwrap();
        assert_eq!(r.tag_name.as_deref(), Some("v1.3.0"));
        assert_eq!(r.assets.len(), 1);
    }

    #[test]
    fn test_download_url_prefers_exe() {
        let r = GitHubRelease {
            html_url: Some("https://html".into()),
            assets: vec![
                asset("source.zip", "https://zip"),
                asset("ClipGlow-Setup.EXE", "https://exe"),
            ],
            ..Default::default()
        };
        assert_eq!(find_download_url(&r).as_deref(), Some("https://exe"));
    }

    #[test]
    fn test_download_url_fallbacks() {
        let zip_only = GitHubRelease {
            html_url: Some("https://html".into()),
            assets: vec![asset("notes.txt", "https://txt"), asset("a.zip", "https://zip")],
            ..Default::default()
        };
        assert_eq!(find_download_url(&zip_only).as_deref(), Some("https://zip"));

        let none = GitHubRelease {
            html_url: Some("https://html".into()),
            ..Default::default()
        };
        assert_eq!(find_download_url(&none).as_deref(), Some("https://html"));
    }

    #[test]
    fn test_update_info_defaults() {
        let info = UpdateInfo::from_release(&GitHubRelease::default());
        assert_eq!(info.version, "unknown");
        assert_eq!(info.release_notes, NO_RELEASE_NOTES);
        assert_eq!(info.target_url(), RELEASES_PAGE_URL);
    }

    #[test]
    fn test_truncate_notes() {
        assert_eq!(truncate_notes("short", 300), "short");
        let long = "é".repeat(301);
        let t = truncate_notes(&long, 300);
        assert_eq!(t.chars().count(), 303);
        assert!(t.ends_with("..."));
        assert_eq!(truncate_notes(&"a".repeat(300), 300).len(), 300);
    }

    #[test]
    fn test_prompt_contains_versions() {
        let info = UpdateInfo {
            version: "v2.0.0".into(),
            release_notes: "New icons".into(),
            download_url: None,
            html_url: "https://html".into(),
        };
        let text = info.prompt("1.2.0");
        assert!(text.contains("v2.0.0"));
        assert!(text.contains("v1.2.0"));
        assert!(text.contains("New icons"));
        assert_eq!(info.target_url(), "https://html");
    }
}
