use super::candidate;
use anyhow::{format_err, Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

/// Reads candidate names from each file in turn, one per line.
pub struct MultiFileScanner {
    current: usize,
    readers: Vec<(PathBuf, Lines<BufReader<File>>)>,
}

impl MultiFileScanner {
    fn new<F: AsRef<Path>>(file_paths: &[F]) -> Result<Self> {
        if file_paths.is_empty() {
            return Err(format_err!(
                "MultiFileScanner cannot be created without input files"
            ));
        }
        let mut readers = Vec::with_capacity(file_paths.len());

        for file_path in file_paths {
            let path = file_path.as_ref();
            let lines = File::open(path)
                .map(|file| BufReader::new(file).lines())
                .with_context(|| format!("failed to open name list {}", path.display()))?;
            readers.push((path.to_path_buf(), lines));
        }

        Ok(MultiFileScanner {
            current: 0,
            readers,
        })
    }

    pub fn init<F: AsRef<Path>>(file_paths: &[F]) -> Result<Box<dyn Iterator<Item = String>>> {
        let scanner = Self::new(file_paths).map(Box::new)?;
        Ok(scanner)
    }
}

impl Iterator for MultiFileScanner {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, lines)) = self.readers.get_mut(self.current) {
            match lines.next() {
                Some(Ok(line)) => {
                    if let Some(name) = candidate(&line) {
                        return Some(name);
                    }
                }
                Some(Err(e)) => {
                    log::warn!("skipping the rest of {}: {e}", path.display());
                    self.current += 1;
                }
                None => self.current += 1,
            }
        }
        None
    }
}
