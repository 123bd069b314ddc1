//! spawn.rs — Lancement borné de l'outil externe.
//!
//! Un seul process par invocation : cwd = dossier du source (les chemins
//! relatifs de l'outil tombent juste), stderr capturé, timeout dur.
//! Sur macOS le PATH est forcé à un minimum : les apps GUI lancées par
//! launchd héritent d'un environnement tronqué où `node` n'est pas
//! résolvable.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::error::CompileError;

/// PATH minimal injecté sur macOS.
const DARWIN_PATH: &str = "/usr/bin:/bin:/usr/sbin:/sbin:/usr/local/bin/";

/// Exécute `tool argv...` depuis `cwd`. Succès ⇔ code de sortie zéro.
///
/// Au dépassement de `timeout`, le process est tué et l'appel échoue.
pub async fn run_tool(
    tool: &str,
    argv: &[String],
    cwd: &Path,
    timeout: Duration,
) -> Result<(), CompileError> {
    let mut cmd = Command::new(tool);
    cmd.args(argv)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if cfg!(target_os = "macos") {
        cmd.env("PATH", DARWIN_PATH);
    }

    log::debug!("spawn: {tool} {argv:?} (cwd: {})", cwd.display());

    let out = match tokio::time::timeout(timeout, cmd.output()).await {
        Err(_) => {
            // kill_on_drop a tué l'enfant en lâchant le futur.
            return Err(CompileError::Timeout { tool: tool.to_string(), secs: timeout.as_secs() });
        }
        Ok(res) => res.map_err(|e| CompileError::Spawn { tool: tool.to_string(), source: e })?,
    };

    if out.status.success() {
        Ok(())
    } else {
        Err(CompileError::Tool {
            tool: tool.to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).trim_end().to_string(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cwd() -> PathBuf {
        std::env::temp_dir()
    }

    #[tokio::test]
    async fn zero_exit_is_ok() {
        let argv = vec!["-c".to_string(), "exit 0".to_string()];
        run_tool("sh", &argv, &cwd(), Duration::from_secs(5)).await.unwrap();
    }

    #[tokio::test]
    async fn nonzero_exit_carries_stderr() {
        let argv = vec!["-c".to_string(), "echo boom >&2; exit 2".to_string()];
        let err = run_tool("sh", &argv, &cwd(), Duration::from_secs(5)).await.unwrap_err();
        match err {
            CompileError::Tool { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("attendu Tool, obtenu {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let argv: Vec<String> = vec![];
        let err = run_tool("atelier-outil-inexistant", &argv, &cwd(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, CompileError::Spawn { .. }));
    }

    #[tokio::test]
    async fn timeout_kills_child() {
        let argv = vec!["-c".to_string(), "sleep 5".to_string()];
        let err = run_tool("sh", &argv, &cwd(), Duration::from_millis(200)).await.unwrap_err();
        assert!(matches!(err, CompileError::Timeout { .. }));
    }
}
