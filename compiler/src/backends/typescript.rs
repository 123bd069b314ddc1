//! typescript.rs — Adaptateur `tsc` (TypeScript → JavaScript).

use async_trait::async_trait;

use crate::backends::CompilerBackend;
use crate::config::{GlobalSettings, ProjectConfig};
use crate::error::CompileError;
use crate::file::CompileFile;

/// Backend qui appelle le binaire `tsc` pré-installé.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptBackend;

const DEFAULT_TOOL: &str = "tsc";

#[async_trait]
impl CompilerBackend for TypeScriptBackend {
    fn tool_name(&self, settings: &GlobalSettings) -> String {
        settings
            .tsc_path
            .as_ref()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_TOOL.to_string())
    }

    fn argv(&self, file: &CompileFile, project: &ProjectConfig) -> Result<Vec<String>, CompileError> {
        let mut argv: Vec<String> = project.custom_options.clone();

        argv.push("--compile".to_string());
        if file.settings.source_map {
            argv.push("--sourcemap".to_string());
        }
        if file.settings.remove_comments {
            argv.push("--removeComments".to_string());
        }

        let base = file
            .src_basename()
            .ok_or_else(|| CompileError::InvalidPath { path: file.src.clone() })?;
        argv.push(base.to_string());
        Ok(argv)
    }
}
