//! backends — un adaptateur par outil externe.
//!
//! Chaque backend traduit la requête générique en invocation concrète :
//! nom d'outil + argv. Le spawn borné et la relocalisation des artefacts
//! sont fournis par l'implémentation par défaut de `compile`.

#[cfg(feature = "coffeescript")]
pub mod coffeescript;
#[cfg(feature = "typescript")]
pub mod typescript;

use std::path::Path;

use async_trait::async_trait;

use crate::config::{GlobalSettings, ProjectConfig};
use crate::error::CompileError;
use crate::file::CompileFile;

/// Contexte résolu pour une tentative : réglages injectés par l'hôte,
/// configuration du projet propriétaire. Jamais d'état global.
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    pub settings: &'a GlobalSettings,
    pub project: &'a ProjectConfig,
}

/// Contrat uniforme des adaptateurs.
#[async_trait]
pub trait CompilerBackend: Send + Sync {
    /// Outil à invoquer : override des réglages globaux, sinon nom par
    /// défaut résolu via le PATH ambiant.
    fn tool_name(&self, settings: &GlobalSettings) -> String;

    /// Argv complet : options projet en tête (telles quelles, dans l'ordre),
    /// flags dérivés des réglages fichier, basename du source en dernier.
    fn argv(&self, file: &CompileFile, project: &ProjectConfig) -> Result<Vec<String>, CompileError>;

    /// Lance l'outil externe depuis le dossier du source puis normalise
    /// l'emplacement des artefacts produits.
    async fn compile(&self, file: &CompileFile, cx: &CompileContext<'_>) -> Result<(), CompileError> {
        let argv = self.argv(file, cx.project)?;
        let cwd = file.src.parent().unwrap_or_else(|| Path::new("."));
        let tool = self.tool_name(cx.settings);
        crate::spawn::run_tool(&tool, &argv, cwd, cx.settings.timeout).await?;
        crate::output::relocate(file)
    }
}

/// Backends disponibles, sélectionnés par extension du source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    #[cfg(feature = "typescript")]
    TypeScript,
    #[cfg(feature = "coffeescript")]
    CoffeeScript,
}

impl BackendKind {
    /// Backends actifs, dans l'ordre d'affichage côté hôte.
    pub fn available() -> Vec<Self> {
        let mut kinds = Vec::new();
        #[cfg(feature = "typescript")]
        kinds.push(Self::TypeScript);
        #[cfg(feature = "coffeescript")]
        kinds.push(Self::CoffeeScript);
        kinds
    }

    /// Extensions revendiquées par ce backend.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            #[cfg(feature = "typescript")]
            Self::TypeScript => &["ts", "tsx"],
            #[cfg(feature = "coffeescript")]
            Self::CoffeeScript => &["coffee", "litcoffee"],
        }
    }

    /// Backend retenu pour `path` d'après son extension (insensible à la casse).
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|s| s.to_str())?.to_ascii_lowercase();
        Self::available().into_iter().find(|k| k.extensions().contains(&ext.as_str()))
    }

    /// Nom lisible (affichage hôte).
    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "typescript")]
            Self::TypeScript => "typescript",
            #[cfg(feature = "coffeescript")]
            Self::CoffeeScript => "coffeescript",
        }
    }

    /// Instance (sans état) de l'adaptateur.
    pub fn backend(self) -> &'static dyn CompilerBackend {
        match self {
            #[cfg(feature = "typescript")]
            Self::TypeScript => &typescript::TypeScriptBackend,
            #[cfg(feature = "coffeescript")]
            Self::CoffeeScript => &coffeescript::CoffeeScriptBackend,
        }
    }
}
