//! events.rs — Canal de notification par compilation (couche d'adaptation → hôte).

use tokio::sync::mpsc::UnboundedSender;

use crate::diagnostics::Diagnostic;

/// Signaux émis pour une tentative de compilation.
///
/// Invariant : exactement un événement terminal (`Done` ou `Fail`) par
/// tentative, toujours suivi d'un `Always` (hook « finally » pour les
/// consommateurs qui n'ont besoin que d'une fin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileEvent {
    Done,
    Fail,
    Always,
}

/// Écouteur côté hôte.
///
/// `diagnostic` alimente le mécanisme d'affichage des erreurs de l'hôte ;
/// no-op par défaut pour les consommateurs qui ne s'y intéressent pas.
pub trait EventSink: Send + Sync {
    fn event(&self, ev: CompileEvent);

    fn diagnostic(&self, _d: Diagnostic) {}
}

/// Sink basé canaux tokio : l'hôte consomme à son rythme, l'émission ne
/// bloque jamais la compilation (un récepteur fermé est simplement ignoré).
pub struct ChannelSink {
    events: UnboundedSender<CompileEvent>,
    diags: Option<UnboundedSender<Diagnostic>>,
}

impl ChannelSink {
    pub fn new(events: UnboundedSender<CompileEvent>) -> Self {
        Self { events, diags: None }
    }

    pub fn with_diagnostics(mut self, diags: UnboundedSender<Diagnostic>) -> Self {
        self.diags = Some(diags);
        self
    }
}

impl EventSink for ChannelSink {
    fn event(&self, ev: CompileEvent) {
        let _ = self.events.send(ev);
    }

    fn diagnostic(&self, d: Diagnostic) {
        if let Some(tx) = &self.diags {
            let _ = tx.send(d);
        }
    }
}

/// Sink muet (tests, déclenchements fire-and-forget).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn event(&self, _ev: CompileEvent) {}
}
