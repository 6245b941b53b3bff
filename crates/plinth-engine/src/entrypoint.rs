use std::io;
use std::path::Path;

/// The canonical root document of every artifact.
pub const INDEX_FILE: &str = "index.html";

/// Archive-tool metadata that should not count as real content when
/// deciding whether a bundle is wrapped in a single container folder.
const NOISE_ENTRIES: &[&str] = &["__MACOSX", ".DS_Store", "Thumbs.db"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPointOutcome {
    Satisfied,
    Unsatisfiable,
}

/// Guarantee `index.html` exists at the root of a freshly populated
/// directory, applying a deterministic fallback chain:
///
/// 1. `index.html` already at the root.
/// 2. The sole top-level entry (noise aside) is a directory: flatten its
///    children up one level, then re-check.
/// 3. Rename the lexicographically first root-level `.html`/`.htm` file to
///    `index.html`.
/// 4. Otherwise the payload has no usable entry point.
pub fn resolve(root: &Path) -> io::Result<EntryPointOutcome> {
    if root.join(INDEX_FILE).is_file() {
        return Ok(EntryPointOutcome::Satisfied);
    }

    flatten_single_directory(root)?;
    if root.join(INDEX_FILE).is_file() {
        return Ok(EntryPointOutcome::Satisfied);
    }

    promote_first_markup(root)
}

fn is_noise(name: &std::ffi::OsStr) -> bool {
    NOISE_ENTRIES
        .iter()
        .any(|noise| name.to_string_lossy() == *noise)
}

/// Bundled front-end output commonly arrives wrapped in one container
/// folder (`dist/`, `build/`, the project name). If that folder is the only
/// real top-level entry, lift its contents to the root.
fn flatten_single_directory(root: &Path) -> io::Result<()> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !is_noise(&entry.file_name()) {
            entries.push(entry);
        }
    }

    let [sole] = entries.as_slice() else {
        return Ok(());
    };
    if !sole.file_type()?.is_dir() {
        return Ok(());
    }

    // Move the container aside first so a child may carry its name.
    let container = root.join(".flatten");
    std::fs::rename(sole.path(), &container)?;
    for child in std::fs::read_dir(&container)? {
        let child = child?;
        std::fs::rename(child.path(), root.join(child.file_name()))?;
    }
    std::fs::remove_dir(&container)
}

fn promote_first_markup(root: &Path) -> io::Result<EntryPointOutcome> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".html") || lower.ends_with(".htm") {
            candidates.push(name);
        }
    }

    candidates.sort();
    match candidates.first() {
        Some(name) => {
            std::fs::rename(root.join(name), root.join(INDEX_FILE))?;
            Ok(EntryPointOutcome::Satisfied)
        }
        None => Ok(EntryPointOutcome::Unsatisfiable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn existing_index_is_left_alone() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(INDEX_FILE), "home").unwrap();
        std::fs::write(dir.path().join("about.html"), "about").unwrap();

        assert_eq!(resolve(dir.path()).unwrap(), EntryPointOutcome::Satisfied);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap(),
            "home"
        );
        assert!(dir.path().join("about.html").exists());
    }

    #[test]
    fn single_container_folder_is_flattened() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/index.html"), "app").unwrap();
        std::fs::write(dir.path().join("dist/app.js"), "js").unwrap();

        assert_eq!(resolve(dir.path()).unwrap(), EntryPointOutcome::Satisfied);
        assert!(dir.path().join(INDEX_FILE).is_file());
        assert!(dir.path().join("app.js").is_file());
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn noise_entries_do_not_block_flattening() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("__MACOSX")).unwrap();
        std::fs::create_dir(dir.path().join("site")).unwrap();
        std::fs::write(dir.path().join("site/index.html"), "app").unwrap();

        assert_eq!(resolve(dir.path()).unwrap(), EntryPointOutcome::Satisfied);
        assert!(dir.path().join(INDEX_FILE).is_file());
        assert!(!dir.path().join("site").exists());
    }

    #[test]
    fn first_markup_file_is_promoted() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("zeta.html"), "z").unwrap();
        std::fs::write(dir.path().join("game.html"), "g").unwrap();
        std::fs::write(dir.path().join("readme.txt"), "r").unwrap();

        assert_eq!(resolve(dir.path()).unwrap(), EntryPointOutcome::Satisfied);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap(),
            "g"
        );
        assert!(!dir.path().join("game.html").exists());
        assert!(dir.path().join("zeta.html").exists());
    }

    #[test]
    fn flatten_then_promote_chains() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("out")).unwrap();
        std::fs::write(dir.path().join("out/page.htm"), "p").unwrap();

        assert_eq!(resolve(dir.path()).unwrap(), EntryPointOutcome::Satisfied);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap(),
            "p"
        );
    }

    #[test]
    fn no_markup_is_unsatisfiable() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), "r").unwrap();

        assert_eq!(resolve(dir.path()).unwrap(), EntryPointOutcome::Unsatisfiable);
    }

    #[test]
    fn two_top_level_entries_are_not_flattened() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("a/index.html"), "deep").unwrap();

        assert_eq!(
            resolve(dir.path()).unwrap(),
            EntryPointOutcome::Unsatisfiable
        );
        assert!(dir.path().join("a/index.html").exists());
    }
}
