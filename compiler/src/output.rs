//! output.rs — Normalisation des artefacts produits par l'outil externe.
//!
//! L'outil émet `<stem>.js` (et `<stem>.map` si demandé) à côté du source.
//! Si le chemin de sortie demandé diffère (dossier ou nom de base), on
//! déplace l'artefact principal ; un échec ici fait échouer la compilation.
//! La source map suit ensuite en **best-effort** : déplacement à côté de la
//! sortie puis réécriture de son champ `sourceRoot` pour rester correct
//! relativement à son nouvel emplacement, sérialisation indentée
//! tabulations. Un échec sur la map est journalisé en warning, jamais
//! propagé : l'artefact principal est déjà en place.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::CompileError;
use crate::file::CompileFile;
use crate::util::fs as util_fs;

/// Vrai si la sortie par défaut de l'outil (`<stem>.js` à côté du source)
/// coïncide déjà avec la sortie demandée : même dossier **et** même stem.
pub fn already_in_place(src: &Path, output: &Path) -> bool {
    src.parent() == output.parent() && src.file_stem() == output.file_stem()
}

/// Déplace les artefacts produits vers la sortie demandée, si besoin.
pub fn relocate(file: &CompileFile) -> Result<(), CompileError> {
    if already_in_place(&file.src, &file.output) {
        return Ok(());
    }

    let src_dir = file.src.parent().unwrap_or_else(|| Path::new("."));
    let stem = file
        .src_stem()
        .ok_or_else(|| CompileError::InvalidPath { path: file.src.clone() })?;

    let produced = src_dir.join(format!("{stem}.js"));
    util_fs::ensure_parent(&file.output).map_err(|e| CompileError::Relocate {
        from: produced.clone(),
        to: file.output.clone(),
        source: e,
    })?;
    std::fs::rename(&produced, &file.output).map_err(|e| CompileError::Relocate {
        from: produced,
        to: file.output.clone(),
        source: e,
    })?;

    if file.settings.source_map {
        let out_dir = file.output.parent().unwrap_or_else(|| Path::new("."));
        relocate_map(src_dir, stem, out_dir);
    }

    Ok(())
}

/// Déplacement best-effort de `<stem>.map` à côté de la sortie, puis mise à
/// jour de `sourceRoot`.
fn relocate_map(src_dir: &Path, stem: &str, out_dir: &Path) {
    let map_name = format!("{stem}.map");
    let from = src_dir.join(&map_name);
    let to = out_dir.join(&map_name);

    if let Err(e) = std::fs::rename(&from, &to) {
        log::warn!("source map non déplacée ({} → {}): {e}", from.display(), to.display());
        return;
    }
    if let Err(e) = rewrite_source_root(&to, src_dir) {
        log::warn!("sourceRoot non réécrit ({}): {e}", to.display());
    }
}

/// Réécrit le champ `sourceRoot` (s'il est présent) en chemin relatif du
/// dossier de la map vers le dossier d'origine des sources, puis
/// re-sérialise l'objet entier indenté tabulations.
pub fn rewrite_source_root(map_path: &Path, src_dir: &Path) -> io::Result<()> {
    let bytes = std::fs::read(map_path)?;
    let mut v: Value =
        serde_json::from_slice(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if let Some(obj) = v.as_object_mut() {
        if obj.contains_key("sourceRoot") {
            let map_dir = map_path.parent().unwrap_or_else(|| Path::new(""));
            let rel = util_fs::relative_from(map_dir, src_dir);
            obj.insert("sourceRoot".to_string(), Value::String(rel));
        }
    }

    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    v.serialize(&mut ser).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(map_path, buf)?;
    Ok(())
}

/// Chemin de la map telle que posée à côté de la sortie (pour l'hôte).
pub fn map_path_beside(output: &Path, src_stem: &str) -> PathBuf {
    output
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{src_stem}.map"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn in_place_same_dir_same_stem() {
        assert!(already_in_place(Path::new("/p/a.ts"), Path::new("/p/a.js")));
    }

    #[test]
    fn not_in_place_when_dir_differs() {
        assert!(!already_in_place(Path::new("/p/a.ts"), Path::new("/p/dist/a.js")));
    }

    #[test]
    fn not_in_place_when_stem_differs() {
        assert!(!already_in_place(Path::new("/p/a.ts"), Path::new("/p/b.js")));
    }

    #[test]
    fn source_root_rewritten_with_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let src_dir = dir.path().join("proj");
        let out_dir = src_dir.join("dist");
        std::fs::create_dir_all(&out_dir).unwrap();

        let map = out_dir.join("a.map");
        std::fs::write(&map, r#"{"version":3,"sourceRoot":"","sources":["a.ts"]}"#).unwrap();

        rewrite_source_root(&map, &src_dir).unwrap();

        let text = std::fs::read_to_string(&map).unwrap();
        assert!(text.contains("\t\"sourceRoot\": \"..\""), "contenu: {text}");

        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["sourceRoot"], Value::String("..".to_string()));
        assert_eq!(v["version"], Value::from(3));
    }

    #[test]
    fn source_root_absent_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("a.map");
        std::fs::write(&map, r#"{"version":3,"sources":["a.ts"]}"#).unwrap();

        rewrite_source_root(&map, dir.path()).unwrap();

        let v: Value = serde_json::from_str(&std::fs::read_to_string(&map).unwrap()).unwrap();
        assert!(v.get("sourceRoot").is_none());
    }

    #[test]
    fn map_beside_output() {
        assert_eq!(map_path_beside(Path::new("/p/dist/a.js"), "a"), PathBuf::from("/p/dist/a.map"));
    }
}
