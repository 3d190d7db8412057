//! Startup asset scan.
//!
//! Decoding is an external collaborator's job; the core only walks the
//! asset root and reports each file to the loader. Failures are warnings —
//! a partially loaded game is still runnable for debugging.

use std::path::Path;

/// External asset-decoding collaborator.
///
/// Each method returns whether the file was decoded into a usable resource.
/// A `false` stops the scan of that file's directory early; the remaining
/// files in it are not attempted.
pub trait AssetLoader: Send + Sync {
    fn load_image(&self, file_name: &str) -> bool;
    fn load_audio(&self, file_name: &str) -> bool;
}

/// Scans `root/sprites/` then `root/audio/`, in directory-listing order.
///
/// Every failure mode is non-fatal: a missing directory or a failed decode
/// is logged and startup continues.
pub fn scan_asset_root(root: &Path, loader: &dyn AssetLoader) {
    scan_dir(&root.join("sprites"), "sprite", &|name| {
        loader.load_image(name)
    });
    scan_dir(&root.join("audio"), "audio", &|name| loader.load_audio(name));
}

fn scan_dir(dir: &Path, label: &str, load: &dyn Fn(&str) -> bool) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("{label} assets could not be listed at {}: {err}", dir.display());
            return;
        }
    };

    let mut loaded = 0usize;
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name().to_string_lossy().into_owned();

        if !load(&name) {
            // Stop early within this directory; the other category still runs.
            log::warn!("failed to load {label} asset `{name}`; remaining {label} files skipped");
            return;
        }
        loaded += 1;
    }

    log::debug!("loaded {loaded} {label} asset(s) from {}", dir.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct RecordingLoader {
        images: AtomicUsize,
        audio: AtomicUsize,
        image_result: bool,
        names: Mutex<Vec<String>>,
    }

    impl RecordingLoader {
        fn new(image_result: bool) -> Self {
            Self {
                images: AtomicUsize::new(0),
                audio: AtomicUsize::new(0),
                image_result,
                names: Mutex::new(Vec::new()),
            }
        }
    }

    impl AssetLoader for RecordingLoader {
        fn load_image(&self, file_name: &str) -> bool {
            self.images.fetch_add(1, Ordering::SeqCst);
            crate::lock(&self.names).push(file_name.to_string());
            self.image_result
        }

        fn load_audio(&self, file_name: &str) -> bool {
            self.audio.fetch_add(1, Ordering::SeqCst);
            crate::lock(&self.names).push(file_name.to_string());
            true
        }
    }

    fn scratch_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "planar-assets-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("sprites")).unwrap();
        std::fs::create_dir_all(root.join("audio")).unwrap();
        root
    }

    #[test]
    fn every_file_is_offered_to_the_loader() {
        let root = scratch_root("all");
        for name in ["a.png", "b.png", "c.png"] {
            std::fs::write(root.join("sprites").join(name), b"x").unwrap();
        }
        std::fs::write(root.join("audio").join("theme.ogg"), b"x").unwrap();

        let loader = RecordingLoader::new(true);
        scan_asset_root(&root, &loader);

        assert_eq!(loader.images.load(Ordering::SeqCst), 3);
        assert_eq!(loader.audio.load(Ordering::SeqCst), 1);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn first_failure_stops_that_directory_but_not_the_other() {
        let root = scratch_root("stop");
        for name in ["a.png", "b.png", "c.png"] {
            std::fs::write(root.join("sprites").join(name), b"x").unwrap();
        }
        std::fs::write(root.join("audio").join("theme.ogg"), b"x").unwrap();

        // Every image decode fails, so exactly one sprite is attempted
        // regardless of listing order; audio still runs.
        let loader = RecordingLoader::new(false);
        scan_asset_root(&root, &loader);

        assert_eq!(loader.images.load(Ordering::SeqCst), 1);
        assert_eq!(loader.audio.load(Ordering::SeqCst), 1);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_directories_are_warnings_not_errors() {
        let root = std::env::temp_dir().join(format!(
            "planar-assets-missing-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);

        let loader = RecordingLoader::new(true);
        scan_asset_root(&root, &loader);

        assert_eq!(loader.images.load(Ordering::SeqCst), 0);
        assert_eq!(loader.audio.load(Ordering::SeqCst), 0);
    }
}
