use std::path::Path;

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Candidate file listing for the file pickers
// ---------------------------------------------------------------------------

/// Role a file name plays in a signal/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Signal,
    Background,
}

/// File names offered in the two pickers, sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    pub signals: Vec<String>,
    pub backgrounds: Vec<String>,
}

/// Classify a file name: it must start with `prefix`; it is a background
/// file when it also ends with `background_suffix`.
pub fn classify(name: &str, prefix: &str, background_suffix: &str) -> Option<FileRole> {
    if !name.starts_with(prefix) {
        return None;
    }
    if name.ends_with(background_suffix) {
        Some(FileRole::Background)
    } else {
        Some(FileRole::Signal)
    }
}

/// List regular files in `dir` that look like signal or background files.
pub fn list_candidates(dir: &Path, prefix: &str, background_suffix: &str) -> Result<Candidates> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;

    let mut candidates = Candidates::default();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            log::debug!("Skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        match classify(&name, prefix, background_suffix) {
            Some(FileRole::Signal) => candidates.signals.push(name),
            Some(FileRole::Background) => candidates.backgrounds.push(name),
            None => {}
        }
    }

    candidates.signals.sort();
    candidates.backgrounds.sort();
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn classify_by_prefix_and_suffix() {
        let c = |n| classify(n, "PIBPIF", "background.dat");
        assert_eq!(c("PIBPIF_run1.dat"), Some(FileRole::Signal));
        assert_eq!(c("PIBPIF_run1_background.dat"), Some(FileRole::Background));
        assert_eq!(c("other_background.dat"), None);
        assert_eq!(c("notes.txt"), None);
    }

    #[test]
    fn lists_sorted_regular_files_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "PIBPIF_b.dat",
            "PIBPIF_a.dat",
            "PIBPIF_a_background.dat",
            "readme.txt",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("PIBPIF_dir")).unwrap();

        let found = list_candidates(dir.path(), "PIBPIF", "background.dat").unwrap();
        assert_eq!(found.signals, vec!["PIBPIF_a.dat", "PIBPIF_b.dat"]);
        assert_eq!(found.backgrounds, vec!["PIBPIF_a_background.dat"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_candidates(&dir.path().join("nope"), "PIBPIF", "background.dat").is_err());
    }
}
