//! error.rs — Taxonomie des échecs d'une tentative de compilation.
//!
//! Aucun échec n'est fatal pour l'hôte : chaque tentative est isolée, pas de
//! retry (c'est le prochain événement du watcher qui relance).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// L'outil externe a quitté avec un code non nul (message = stderr capturé).
    #[error("{tool}: {stderr}")]
    Tool { tool: String, stderr: String },

    /// Le process n'a pas pu être lancé (binaire introuvable, droits…).
    #[error("lancement de `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Le process a dépassé la borne de temps (il a été tué).
    #[error("`{tool}` a dépassé {secs}s, process tué")]
    Timeout { tool: String, secs: u64 },

    /// Déplacement de l'artefact principal vers la sortie demandée impossible.
    #[error("déplacement {} → {}: {}", from.display(), to.display(), source)]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Aucun backend ne reconnaît l'extension du fichier.
    #[error("extension non prise en charge: {}", path.display())]
    Unsupported { path: PathBuf },

    /// Chemin inexploitable (composant non UTF-8, pas de nom de fichier…).
    #[error("chemin invalide: {}", path.display())]
    InvalidPath { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failure_carries_stderr() {
        let e = CompileError::Tool { tool: "tsc".into(), stderr: "a.ts(1,1): error TS1005".into() };
        assert_eq!(e.to_string(), "tsc: a.ts(1,1): error TS1005");
    }

    #[test]
    fn timeout_names_tool_and_bound() {
        let e = CompileError::Timeout { tool: "coffee".into(), secs: 5 };
        assert!(e.to_string().contains("coffee"));
        assert!(e.to_string().contains("5s"));
    }
}
