//! atelier-compiler — couche d'adaptation des compilateurs externes pour Atelier.
//! - Sélectionne un backend par extension (table de correspondance).
//! - Construit l'argv, lance l'outil pré-installé (timeout borné, un seul process).
//! - Relocalise les artefacts produits (`.js`, source map) vers la sortie demandée.
//! - API stable orientée hôte (watcher, GUI, CLI).

pub mod backends;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod file;
pub mod output;
pub mod pipeline;
pub mod spawn;
mod util;

pub use backends::{BackendKind, CompileContext, CompilerBackend};
pub use config::{GlobalSettings, ProjectConfig, ProjectRegistry};
pub use diagnostics::{Diagnostic, Severity};
pub use error::CompileError;
pub use events::{ChannelSink, CompileEvent, EventSink, NullSink};
pub use file::{CompileFile, FileSettings, ProjectId};
pub use pipeline::Dispatcher;
