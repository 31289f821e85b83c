//! Output locations for figures and saved arrays.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ndarray_npy::WriteNpyExt;

use super::error::OutputError;

/// The two output directories an analysis writes into.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    figure_dir: PathBuf,
    array_dir: PathBuf,
}

impl OutputPaths {
    pub fn new(figure_dir: impl Into<PathBuf>, array_dir: impl Into<PathBuf>) -> Self {
        Self {
            figure_dir: figure_dir.into(),
            array_dir: array_dir.into(),
        }
    }

    /// Create the output directories if they do not exist yet
    pub fn ensure(&self) -> Result<(), OutputError> {
        for dir in [&self.figure_dir, &self.array_dir] {
            if !dir.exists() {
                log::info!("Creating output directory {}", dir.display());
                std::fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }

    /// Full path for a figure file
    pub fn figure(&self, name: impl AsRef<Path>) -> PathBuf {
        self.figure_dir.join(name)
    }

    /// Full path for a saved array file
    pub fn array(&self, name: impl AsRef<Path>) -> PathBuf {
        self.array_dir.join(name)
    }
}

/// Write an ndarray to disk in the npy format
pub fn write_array<A: WriteNpyExt>(path: &Path, array: &A) -> Result<(), OutputError> {
    let writer = BufWriter::new(File::create(path)?);
    array.write_npy(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    #[test]
    fn test_ensure_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path().join("figures"), dir.path().join("arrays"));
        paths.ensure().unwrap();
        assert!(dir.path().join("figures").exists());
        assert!(dir.path().join("arrays").exists());

        let array = Array1::<f64>::from_vec(vec![1.0, 2.0, 3.0]);
        let path = paths.array("test.npy");
        write_array(&path, &array).unwrap();
        assert!(path.metadata().unwrap().len() > 0);

        // Idempotent once the directories exist
        paths.ensure().unwrap();
    }
}
