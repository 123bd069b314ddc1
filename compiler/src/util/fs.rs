use std::fs;
use std::io;
use std::path::{Component, Path};

pub fn ensure_parent(p: &Path) -> io::Result<()> {
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn file_name(p: &Path) -> Option<&str> {
    p.file_name()?.to_str()
}

pub fn file_stem(p: &Path) -> Option<&str> {
    p.file_stem()?.to_str()
}

/// Chemin relatif du dossier `from` vers le dossier `to`, séparateur `/`
/// (format attendu par le champ `sourceRoot` des source maps).
/// Deux dossiers identiques donnent la chaîne vide.
pub fn relative_from(from: &Path, to: &Path) -> String {
    let f: Vec<Component<'_>> = from.components().collect();
    let t: Vec<Component<'_>> = to.components().collect();
    let common = f.iter().zip(t.iter()).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..f.len() {
        parts.push("..".to_string());
    }
    for c in &t[common..] {
        parts.push(c.as_os_str().to_string_lossy().into_owned());
    }
    parts.join("/")
}
