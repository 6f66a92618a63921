use anyhow::{bail, Context, Result};
use m8::file::{FileKind, M8File};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Walk a set of paths, yielding every file with one of the M8 extensions
pub fn iter_files<'a, I>(paths: I, recursive: bool) -> impl Iterator<Item = DirEntry> + 'a
where
    I: IntoIterator + 'a,
    <I as IntoIterator>::Item: AsRef<Path>,
{
    paths
        .into_iter()
        .flat_map(move |path| {
            let mut walk_dir = WalkDir::new(path.as_ref());
            if !recursive {
                walk_dir = walk_dir.max_depth(1);
            }

            walk_dir
        })
        .filter_map(Result::ok)
        .filter(|entry| !is_hidden(entry) && file_kind(entry.path()).is_some())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// The kind of file a path points to, judging by its extension
pub fn file_kind(path: &Path) -> Option<FileKind> {
    path.extension()
        .and_then(|extension| extension.to_str())
        .and_then(FileKind::from_extension)
}

/// Refuse to touch an existing file, unless forced to
pub fn check_for_overwrite(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists, use --force to overwrite it",
            path.display()
        );
    }

    Ok(())
}

/// Make sure a command line index falls within `0..=max`
pub fn check_range(what: &str, value: u16, max: u16) -> Result<()> {
    if value > max {
        bail!("The {what} index must be between 0 and {max}, got {value}");
    }

    Ok(())
}

/// Load an M8 file, with a message that names the path on failure
pub fn load(path: &Path) -> Result<M8File> {
    M8File::from_path(path).with_context(|| format!("Could not read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_by_extension() {
        assert_eq!(file_kind(Path::new("a/DEMO.m8s")), Some(FileKind::Song));
        assert_eq!(file_kind(Path::new("KICK.M8I")), Some(FileKind::Instrument));
        assert_eq!(file_kind(Path::new("notes.txt")), None);
        assert_eq!(file_kind(Path::new("m8s")), None);
    }

    #[test]
    fn ranges() {
        assert!(check_range("instrument", 127, 127).is_ok());
        assert!(check_range("instrument", 128, 127).is_err());
    }

    #[test]
    fn overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SONG.m8s");
        assert!(check_for_overwrite(&path, false).is_ok());

        std::fs::write(&path, b"").unwrap();
        assert!(check_for_overwrite(&path, false).is_err());
        assert!(check_for_overwrite(&path, true).is_ok());
    }
}
