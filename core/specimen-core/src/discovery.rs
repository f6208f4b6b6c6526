//! Font file discovery.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use walkdir::WalkDir;

/// Trait for enumerating candidate font files from some backing store.
pub trait FontDiscovery {
    fn discover(&self) -> Result<Vec<PathBuf>>;
}

/// Recursive filesystem walker.
///
/// Every regular file is a candidate: non-fonts are rejected later by their
/// magic number, so no extension filter is applied. Paths come back absolute,
/// deduplicated and sorted so that face indices are stable between runs.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    roots: Vec<PathBuf>,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots = roots.into_iter().map(Into::into).collect();
        Self {
            roots,
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

impl FontDiscovery for PathDiscovery {
    fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();

        for root in &self.roots {
            if !root.exists() {
                return Err(anyhow!("root path does not exist: {}", root.display()));
            }
            let root = root
                .canonicalize()
                .with_context(|| format!("resolving {}", root.display()))?;

            for entry in WalkDir::new(&root).follow_links(self.follow_symlinks) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        log::warn!("skipping unreadable entry under {}: {err}", root.display());
                        continue;
                    }
                };
                if entry.file_type().is_file() {
                    found.push(entry.into_path());
                }
            }
        }

        found.sort();
        found.dedup();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::FontDiscovery;
    use super::PathDiscovery;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn discovers_every_nested_file() {
        let tmp = tempdir().expect("tempdir");
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).expect("mkdir");
        fs::write(nested.join("sample.ttf"), b"").expect("touch font");
        fs::write(nested.join("README"), b"").expect("touch readme");

        let discovery = PathDiscovery::new([tmp.path()]);
        let files = discovery.discover().expect("discover");

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_absolute()));
    }

    #[test]
    fn overlapping_roots_are_deduplicated_and_sorted() {
        let tmp = tempdir().expect("tempdir");
        let sub = tmp.path().join("sub");
        fs::create_dir_all(&sub).expect("mkdir");
        fs::write(tmp.path().join("z.otf"), b"").expect("touch");
        fs::write(sub.join("a.otf"), b"").expect("touch");

        let discovery = PathDiscovery::new([sub.clone(), tmp.path().to_path_buf()]);
        let files = discovery.discover().expect("discover");

        assert_eq!(files.len(), 2);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_when_enabled() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().expect("tempdir");
        let real_dir = tmp.path().join("real");
        let link_dir = tmp.path().join("link");
        fs::create_dir_all(&real_dir).expect("mkdir real");
        fs::write(real_dir.join("linked.otf"), b"").expect("touch font");
        fs::create_dir_all(&link_dir).expect("mkdir link");
        symlink(&real_dir, link_dir.join("inner")).expect("symlink");

        let plain = PathDiscovery::new([&link_dir]).discover().expect("discover");
        assert!(plain.is_empty());

        let followed = PathDiscovery::new([&link_dir])
            .follow_symlinks(true)
            .discover()
            .expect("discover");
        assert!(followed.iter().any(|f| f.ends_with("linked.otf")));
    }
}
