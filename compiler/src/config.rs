//! config.rs — Réglages globaux + configuration par projet.
//!
//! Tout est construit par l'hôte puis **injecté** dans le [`Dispatcher`] :
//! aucune consultation d'état global depuis la couche d'adaptation.
//!
//! - Defaults sûrs (`GlobalSettings::default()`)
//! - Lecture **ENV** (préfixe `ATELIER_...`) via `GlobalSettings::from_env()`
//! - Overrides explicites de l'hôte appliqués en dernier (champs publics)
//!
//! ENV supportés (tous facultatifs) :
//!   ATELIER_TSC_PATH=<chemin du binaire tsc>
//!   ATELIER_COFFEE_PATH=<chemin du binaire coffee>
//!   ATELIER_TIMEOUT_SECS=<u64>
//!
//! [`Dispatcher`]: crate::pipeline::Dispatcher

use std::collections::HashMap;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde::Deserialize;

use crate::file::ProjectId;

/// Borne par défaut sur la durée d'un process externe.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Réglages process-wide (chemins des compilateurs, timeout).
#[derive(Debug, Clone)]
pub struct GlobalSettings {
    /// Chemin du binaire `tsc` (si non fourni : `tsc` résolu via PATH).
    pub tsc_path: Option<Utf8PathBuf>,
    /// Chemin du binaire `coffee` (si non fourni : `coffee` résolu via PATH).
    pub coffee_path: Option<Utf8PathBuf>,
    /// Durée maximale d'un process enfant (tué au dépassement).
    pub timeout: Duration,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            tsc_path: None,
            coffee_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GlobalSettings {
    /// Construit depuis les valeurs par défaut + ENV.
    pub fn from_env() -> Self {
        let mut s = Self::default();
        s.apply_env();
        s
    }

    /// Applique les variables d'environnement `ATELIER_*`.
    pub fn apply_env(&mut self) {
        if let Some(v) = read_env("ATELIER_TSC_PATH") { self.tsc_path = Some(v.into()); }
        if let Some(v) = read_env("ATELIER_COFFEE_PATH") { self.coffee_path = Some(v.into()); }
        if let Some(v) = read_env("ATELIER_TIMEOUT_SECS") {
            if let Some(n) = parse_u64(&v) { self.timeout = Duration::from_secs(n); }
        }
    }
}

/// Configuration d'un projet (possédée par la couche persistance de l'hôte).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Options de ligne de commande fournies par l'utilisateur, placées en
    /// tête d'argv telles quelles, dans l'ordre.
    #[serde(default)]
    pub custom_options: Vec<String>,
}

/// Registre projet → configuration, rempli par l'hôte et injecté.
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    entries: HashMap<ProjectId, ProjectConfig>,
}

impl ProjectRegistry {
    pub fn insert(&mut self, id: ProjectId, cfg: ProjectConfig) {
        self.entries.insert(id, cfg);
    }

    pub fn get(&self, id: ProjectId) -> Option<&ProjectConfig> {
        self.entries.get(&id)
    }
}

/* ────────────────────────── Parsing d'ENV ────────────────────────── */

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn parse_u64(s: &str) -> Option<u64> {
    s.trim().parse::<u64>().ok()
}

/* ───────────────────────────── Tests ───────────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let s = GlobalSettings::default();
        assert!(s.tsc_path.is_none());
        assert!(s.coffee_path.is_none());
        assert_eq!(s.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn explicit_overrides_last_word() {
        let mut s = GlobalSettings::from_env();
        s.tsc_path = Some("/opt/tools/tsc".into());
        s.timeout = Duration::from_secs(30);
        assert_eq!(s.tsc_path.as_deref().map(|p| p.as_str()), Some("/opt/tools/tsc"));
        assert_eq!(s.timeout, Duration::from_secs(30));
    }

    #[test]
    fn u64_parse() {
        assert_eq!(parse_u64(" 12 "), Some(12));
        assert!(parse_u64("douze").is_none());
    }

    #[test]
    fn registry_lookup() {
        let mut reg = ProjectRegistry::default();
        reg.insert(ProjectId(3), ProjectConfig { custom_options: vec!["--strict".into()] });
        assert_eq!(reg.get(ProjectId(3)).unwrap().custom_options, vec!["--strict"]);
        assert!(reg.get(ProjectId(4)).is_none());
    }
}
