// ClipGlow - Numeros de version
//
// Les tags GitHub ont la forme "v1.2.3". L'analyse retire le prefixe
// v/V, complete "x.y" en "x.y.0" et accepte une quatrieme composante
// optionnelle. Toute autre forme (composante unique, texte, suffixe
// de pre-version) donne 0.0.0, qui n'est jamais plus recent que la
// version courante.

use std::fmt;

/// Version a trois ou quatre composantes, ordonnee composante par
/// composante. Une revision absente precede toute revision presente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: Option<u32>,
}

impl Version {
    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision: None,
        }
    }

    /// Analyse un tag ; les formes invalides donnent 0.0.0.
    pub fn parse(tag: &str) -> Self {
        Self::try_parse(tag).unwrap_or_default()
    }

    fn try_parse(tag: &str) -> Option<Self> {
        let clean = tag.trim().trim_start_matches(['v', 'V']);
        if clean.is_empty() {
            return None;
        }
        let parts = clean
            .split('.')
            .map(|p| p.parse::<u32>().ok())
            .collect::<Option<Vec<u32>>>()?;
        match parts.as_slice() {
            [major, minor] => Some(Self::new(*major, *minor, 0)),
            [major, minor, build] => Some(Self::new(*major, *minor, *build)),
            [major, minor, build, revision] => Some(Self {
                revision: Some(*revision),
                ..Self::new(*major, *minor, *build)
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)?;
        if let Some(rev) = self.revision {
            write!(f, ".{}", rev)?;
        }
        Ok(())
    }
}
