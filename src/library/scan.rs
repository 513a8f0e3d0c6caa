use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{Result, ShelfError};

use super::model::{AudioFile, AudioKind, DirectoryNode};

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Walk the filesystem under `root` and build its directory tree.
///
/// Only directories that hold audio somewhere in their subtree are kept; when
/// nothing under `root` is audio the result is `Ok(None)`. Unreadable
/// subdirectories are logged and skipped. With `follow_links` enabled,
/// `walkdir` refuses to descend into an ancestor, which guards against
/// symlink cycles.
pub fn build(root: &Path, settings: &LibrarySettings) -> Result<Option<DirectoryNode>> {
    let meta = fs::metadata(root).map_err(|e| ShelfError::io(root, e))?;
    if !meta.is_dir() {
        return Err(ShelfError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut children: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    let mut files: HashMap<PathBuf, BTreeMap<PathBuf, AudioFile>> = HashMap::new();

    let walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(path = ?err.path(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        let Some(parent) = path.parent() else {
            continue;
        };

        if entry.file_type().is_dir() {
            children
                .entry(parent.to_path_buf())
                .or_default()
                .push(path.to_path_buf());
        } else if path.is_file() {
            if let Some(kind) = AudioKind::from_path(path, settings.case_insensitive_extensions) {
                files
                    .entry(parent.to_path_buf())
                    .or_default()
                    .insert(path.to_path_buf(), AudioFile::new(path.to_path_buf(), kind));
            }
        }
    }

    let tree = assemble(root.to_path_buf(), &mut children, &mut files);
    match &tree {
        Some(node) => debug!(
            root = %root.display(),
            files = node.total_audio_files(),
            "walk finished"
        ),
        None => debug!(root = %root.display(), "no audio found"),
    }
    Ok(tree)
}

fn assemble(
    path: PathBuf,
    children: &mut HashMap<PathBuf, Vec<PathBuf>>,
    files: &mut HashMap<PathBuf, BTreeMap<PathBuf, AudioFile>>,
) -> Option<DirectoryNode> {
    let mut node = DirectoryNode::new(path);
    node.audio_files = files.remove(&node.path).unwrap_or_default();

    for child in children.remove(&node.path).unwrap_or_default() {
        if let Some(sub) = assemble(child.clone(), children, files) {
            node.subdirectories.insert(child, sub);
        }
    }

    if node.audio_files.is_empty() && node.subdirectories.is_empty() {
        None
    } else {
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::touch;
    use tempfile::tempdir;

    fn contains_empty_subtree(node: &DirectoryNode) -> bool {
        node.total_audio_files() == 0 || node.subdirectories.values().any(contains_empty_subtree)
    }

    #[test]
    fn extension_matching_is_case_sensitive_by_default() {
        assert_eq!(
            AudioKind::from_path(Path::new("/tmp/a.mp3"), false),
            Some(AudioKind::Mp3)
        );
        assert_eq!(
            AudioKind::from_path(Path::new("/tmp/a.aiff"), false),
            Some(AudioKind::Aiff)
        );
        assert_eq!(AudioKind::from_path(Path::new("/tmp/a.MP3"), false), None);
        assert_eq!(
            AudioKind::from_path(Path::new("/tmp/a.MP3"), true),
            Some(AudioKind::Mp3)
        );
        assert_eq!(AudioKind::from_path(Path::new("/tmp/a.flac"), true), None);
        assert_eq!(AudioKind::from_path(Path::new("/tmp/a"), true), None);
    }

    #[test]
    fn build_drops_directories_without_audio_anywhere_below() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        touch(&root.join("rock").join("a.mp3"));
        touch(&root.join("empty_folder").join("notes.txt"));
        touch(&root.join("deep").join("still_empty").join("cover.jpg"));
        touch(&root.join("outer").join("inner").join("b.wav"));

        let node = build(&root, &LibrarySettings::default()).unwrap().unwrap();

        assert!(node.audio_files.is_empty());
        let subs: Vec<&PathBuf> = node.subdirectories.keys().collect();
        assert_eq!(subs, vec![&root.join("outer"), &root.join("rock")]);

        // "outer" has no files of its own but is kept for its child.
        let outer = &node.subdirectories[&root.join("outer")];
        assert!(outer.audio_files.is_empty());
        assert!(outer.subdirectories.contains_key(&root.join("outer").join("inner")));

        assert!(!contains_empty_subtree(&node));
        assert_eq!(node.total_audio_files(), 2);
    }

    #[test]
    fn build_returns_none_when_nothing_is_audio() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("sub").join("readme.txt"));

        assert!(build(dir.path(), &LibrarySettings::default()).unwrap().is_none());
    }

    #[test]
    fn build_records_files_with_names_and_kinds() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        touch(&root.join("Kick 01.wav"));
        touch(&root.join("pad.aiff"));
        touch(&root.join("LOUD.MP3"));

        let node = build(&root, &LibrarySettings::default()).unwrap().unwrap();
        assert_eq!(node.audio_files.len(), 2);

        let kick = &node.audio_files[&root.join("Kick 01.wav")];
        assert_eq!(kick.name, "Kick 01");
        assert_eq!(kick.kind, AudioKind::Wav);
        assert_eq!(kick.basename(), "Kick 01.wav");
        assert_eq!(node.audio_files[&root.join("pad.aiff")].kind, AudioKind::Aiff);

        let settings = LibrarySettings {
            case_insensitive_extensions: true,
            ..LibrarySettings::default()
        };
        let node = build(&root, &settings).unwrap().unwrap();
        assert_eq!(node.audio_files.len(), 3);
    }

    #[test]
    fn build_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        touch(&root.join(".stash").join("hidden.mp3"));
        touch(&root.join("visible.mp3"));

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let node = build(&root, &settings).unwrap().unwrap();
        assert!(node.subdirectories.is_empty());
        assert_eq!(node.audio_files.len(), 1);
    }

    #[test]
    fn build_rejects_missing_and_non_directory_roots() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.mp3");
        touch(&file);

        assert!(matches!(
            build(&file, &LibrarySettings::default()),
            Err(ShelfError::NotADirectory { .. })
        ));
        assert!(matches!(
            build(&dir.path().join("nope"), &LibrarySettings::default()),
            Err(ShelfError::Io { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn build_survives_symlink_cycles() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        touch(&root.join("music").join("a.mp3"));
        std::os::unix::fs::symlink(&root, root.join("music").join("loop")).unwrap();

        let settings = LibrarySettings {
            follow_links: true,
            ..LibrarySettings::default()
        };
        let node = build(&root, &settings).unwrap().unwrap();
        assert_eq!(node.total_audio_files(), 1);
        let music = &node.subdirectories[&root.join("music")];
        assert!(music.subdirectories.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn build_skips_unreadable_directories_and_keeps_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        touch(&root.join("open").join("a.mp3"));
        touch(&root.join("locked").join("b.mp3"));
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read it anyway; nothing to check then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = build(&root, &LibrarySettings::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let node = result.unwrap().unwrap();
        assert!(node.subdirectories.contains_key(&root.join("open")));
        assert!(!node.subdirectories.contains_key(&locked));
        assert_eq!(node.total_audio_files(), 1);
    }
}
