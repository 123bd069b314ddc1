//! pipeline.rs — Orchestrateur côté hôte.
//!
//! Sélection du backend par extension, résolution de la configuration du
//! projet propriétaire, puis délégation à l'adaptateur. L'émission des
//! événements est centralisée ici : l'invariant « exactement un terminal,
//! puis `Always` » vit à un seul endroit.

use std::path::Path;

use crate::backends::{BackendKind, CompileContext};
use crate::config::{GlobalSettings, ProjectConfig, ProjectRegistry};
use crate::diagnostics::Diagnostic;
use crate::error::CompileError;
use crate::events::{CompileEvent, EventSink};
use crate::file::CompileFile;

/// Point d'entrée de la couche d'adaptation. Détient les réglages injectés
/// par l'hôte (aucun état global, aucun état mutable partagé).
pub struct Dispatcher {
    settings: GlobalSettings,
    projects: ProjectRegistry,
}

impl Dispatcher {
    pub fn new(settings: GlobalSettings) -> Self {
        Self { settings, projects: ProjectRegistry::default() }
    }

    pub fn with_projects(mut self, projects: ProjectRegistry) -> Self {
        self.projects = projects;
        self
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Backend retenu pour `path`, s'il y en a un.
    pub fn backend_for(&self, path: &Path) -> Option<BackendKind> {
        BackendKind::for_path(path)
    }

    /// Compile `file` et signale l'issue sur `sink`.
    ///
    /// Exactement un événement terminal (`Done` ou `Fail`) est émis, toujours
    /// suivi d'un `Always`. Un échec part aussi en diagnostic étiqueté du
    /// fichier d'origine, et revient au caller dans le `Result`.
    pub async fn compile(&self, file: &CompileFile, sink: &dyn EventSink) -> Result<(), CompileError> {
        let res = self.run(file).await;
        match &res {
            Ok(()) => sink.event(CompileEvent::Done),
            Err(err) => {
                sink.event(CompileEvent::Fail);
                sink.diagnostic(Diagnostic::error(err.to_string()).for_file(&file.src));
            }
        }
        sink.event(CompileEvent::Always);
        res
    }

    async fn run(&self, file: &CompileFile) -> Result<(), CompileError> {
        let kind = BackendKind::for_path(&file.src)
            .ok_or_else(|| CompileError::Unsupported { path: file.src.clone() })?;

        // Projet inconnu du registre : configuration vide (pas d'options).
        let fallback = ProjectConfig::default();
        let project = self.projects.get(file.project).unwrap_or(&fallback);

        let cx = CompileContext { settings: &self.settings, project };
        kind.backend().compile(file, &cx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::ProjectId;
    use std::sync::Mutex;

    /// Sink de test : enregistre tout dans l'ordre d'arrivée.
    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<CompileEvent>>,
        diags: Mutex<Vec<Diagnostic>>,
    }

    impl EventSink for RecordingSink {
        fn event(&self, ev: CompileEvent) {
            self.events.lock().unwrap().push(ev);
        }
        fn diagnostic(&self, d: Diagnostic) {
            self.diags.lock().unwrap().push(d);
        }
    }

    #[tokio::test]
    async fn unsupported_extension_fails_then_always() {
        let dispatcher = Dispatcher::new(GlobalSettings::default());
        let file = CompileFile::new("/proj/a.scss", "/proj/a.css", ProjectId(0));
        let sink = RecordingSink::default();

        let res = dispatcher.compile(&file, &sink).await;
        assert!(matches!(res, Err(CompileError::Unsupported { .. })));

        let events = sink.events.lock().unwrap().clone();
        assert_eq!(events, vec![CompileEvent::Fail, CompileEvent::Always]);

        let diags = sink.diags.lock().unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].file.as_deref(), Some(Path::new("/proj/a.scss")));
    }

    #[cfg(all(unix, feature = "typescript"))]
    #[tokio::test]
    async fn missing_tool_fails_then_always() {
        let mut settings = GlobalSettings::default();
        settings.tsc_path = Some("/nonexistent/atelier-tsc".into());

        let dispatcher = Dispatcher::new(settings);
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.ts");
        std::fs::write(&src, "let x = 1;").unwrap();

        let file = CompileFile::new(&src, dir.path().join("a.js"), ProjectId(0));
        let sink = RecordingSink::default();

        let res = dispatcher.compile(&file, &sink).await;
        assert!(matches!(res, Err(CompileError::Spawn { .. })));

        let events = sink.events.lock().unwrap().clone();
        assert_eq!(events, vec![CompileEvent::Fail, CompileEvent::Always]);
    }
}
