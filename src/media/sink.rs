// SPDX-License-Identifier: MPL-2.0
//! Destinations for exported images.

use crate::error::{Error, Result};
use crate::media::export::ExportedImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives every successfully encoded export.
pub trait SaveSink {
    /// Persists or forwards `image`.
    ///
    /// # Errors
    ///
    /// Implementations report storage failures as [`Error::Sink`] or
    /// [`Error::Io`].
    fn save(&mut self, image: &ExportedImage) -> Result<()>;
}

impl<F> SaveSink for F
where
    F: FnMut(&ExportedImage) -> Result<()>,
{
    fn save(&mut self, image: &ExportedImage) -> Result<()> {
        self(image)
    }
}

/// Keeps exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    saved: Vec<ExportedImage>,
}

impl MemorySink {
    #[must_use]
    pub fn saved(&self) -> &[ExportedImage] {
        &self.saved
    }

    #[must_use]
    pub fn last(&self) -> Option<&ExportedImage> {
        self.saved.last()
    }

    pub fn take(&mut self) -> Vec<ExportedImage> {
        std::mem::take(&mut self.saved)
    }
}

impl SaveSink for MemorySink {
    fn save(&mut self, image: &ExportedImage) -> Result<()> {
        self.saved.push(image.clone());
        Ok(())
    }
}

/// Writes exports as files into one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, oldest first.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SaveSink for DirectorySink {
    fn save(&mut self, image: &ExportedImage) -> Result<()> {
        // Only the final component is honored so names cannot escape `dir`
        let name = Path::new(&image.filename)
            .file_name()
            .ok_or_else(|| Error::Sink(format!("invalid filename: {:?}", image.filename)))?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, &image.bytes)?;
        tracing::debug!(path = %path.display(), "wrote export");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::export::ExportFormat;
    use tempfile::tempdir;

    fn image(filename: &str) -> ExportedImage {
        ExportedImage {
            bytes: vec![1, 2, 3],
            filename: filename.to_string(),
            format: ExportFormat::Png,
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn memory_sink_collects_in_order() {
        let mut sink = MemorySink::default();
        sink.save(&image("a.png")).expect("save");
        sink.save(&image("b.png")).expect("save");
        assert_eq!(sink.saved().len(), 2);
        assert_eq!(sink.last().map(|i| i.filename.as_str()), Some("b.png"));
        assert_eq!(sink.take().len(), 2);
        assert!(sink.saved().is_empty());
    }

    #[test]
    fn directory_sink_creates_dir_and_writes() {
        let root = tempdir().expect("temp dir");
        let mut sink = DirectorySink::new(root.path().join("out"));
        sink.save(&image("shot.png")).expect("save");

        let path = root.path().join("out").join("shot.png");
        assert_eq!(fs::read(&path).expect("read back"), vec![1, 2, 3]);
        assert_eq!(sink.written(), &[path]);
    }

    #[test]
    fn directory_sink_strips_parent_components() {
        let root = tempdir().expect("temp dir");
        let mut sink = DirectorySink::new(root.path());
        sink.save(&image("../escape.png")).expect("save");
        assert!(root.path().join("escape.png").exists());
    }

    #[test]
    fn directory_sink_rejects_empty_name() {
        let root = tempdir().expect("temp dir");
        let mut sink = DirectorySink::new(root.path());
        assert!(matches!(sink.save(&image("..")), Err(Error::Sink(_))));
    }

    #[test]
    fn closures_are_sinks() {
        let mut count = 0;
        let mut sink = |_: &ExportedImage| -> Result<()> {
            count += 1;
            Ok(())
        };
        sink.save(&image("x.png")).expect("save");
        drop(sink);
        assert_eq!(count, 1);
    }
}
