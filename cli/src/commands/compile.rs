use std::path::PathBuf;

use camino::Utf8PathBuf;
use clap::Args as ClapArgs;
use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

use atelier_compiler::{
    BackendKind, ChannelSink, CompileFile, Diagnostic, Dispatcher, FileSettings, GlobalSettings,
    ProjectConfig, ProjectId, ProjectRegistry, Severity,
};

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Fichier source à compiler (.ts, .tsx, .coffee, .litcoffee)
    pub input: PathBuf,

    /// Chemin de sortie .js (défaut : à côté du source)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Demander une source map
    #[arg(long)]
    pub source_map: bool,

    /// Retirer les commentaires de la sortie (TypeScript)
    #[arg(long)]
    pub remove_comments: bool,

    /// Pas d'enveloppe IIFE (CoffeeScript)
    #[arg(long)]
    pub bare: bool,

    /// Source littéraire (CoffeeScript)
    #[arg(long)]
    pub literate: bool,

    /// Manifest projet atelier.toml (section [project], custom_options…)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Chemin du binaire compilateur (sinon ATELIER_*_PATH ou PATH)
    #[arg(long)]
    pub tool: Option<PathBuf>,
}

/// Manifest minimal d'un projet Atelier.
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    project: ProjectConfig,
}

fn read_manifest(text: &str) -> Result<Manifest> {
    toml::from_str(text).wrap_err("TOML invalide")
}

pub fn exec(args: Args) -> Result<()> {
    let kind = BackendKind::for_path(&args.input)
        .ok_or_else(|| eyre!("extension non prise en charge: {}", args.input.display()))?;

    let mut settings = GlobalSettings::from_env();
    if let Some(tool) = args.tool {
        let tool = Utf8PathBuf::from_path_buf(tool).map_err(|_| eyre!("chemin d'outil invalide"))?;
        match kind {
            BackendKind::TypeScript => settings.tsc_path = Some(tool),
            BackendKind::CoffeeScript => settings.coffee_path = Some(tool),
        }
    }

    let mut projects = ProjectRegistry::default();
    let pid = ProjectId(0);
    if let Some(manifest) = &args.project {
        let text = std::fs::read_to_string(manifest)
            .wrap_err_with(|| format!("lecture {}", manifest.display()))?;
        projects.insert(pid, read_manifest(&text)?.project);
    }

    let output = args.output.unwrap_or_else(|| args.input.with_extension("js"));
    let file = CompileFile::new(&args.input, &output, pid).with_settings(FileSettings {
        source_map: args.source_map,
        remove_comments: args.remove_comments,
        bare: args.bare,
        literate: args.literate,
    });

    let dispatcher = Dispatcher::new(settings).with_projects(projects);

    let (ev_tx, _ev_rx) = tokio::sync::mpsc::unbounded_channel();
    let (diag_tx, mut diag_rx) = tokio::sync::mpsc::unbounded_channel();
    let sink = ChannelSink::new(ev_tx).with_diagnostics(diag_tx);

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let res = rt.block_on(dispatcher.compile(&file, &sink));

    while let Ok(d) = diag_rx.try_recv() {
        print_diag(&d);
    }

    match res {
        Ok(()) => {
            eprintln!("✅  {} → {}", args.input.display(), output.display());
            Ok(())
        }
        Err(e) => Err(eyre!("compilation échouée: {e}")),
    }
}

fn print_diag(d: &Diagnostic) {
    let badge = match d.severity {
        Severity::Error => "❌",
        Severity::Warning => "⚠️",
        Severity::Info => "ℹ️",
    };
    match &d.file {
        Some(f) => eprintln!("{badge}  [{}] {}", f.display(), d.message),
        None => eprintln!("{badge}  {}", d.message),
    }
}
