use anyhow::{Result, Context};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Serialize a value as indented JSON and write it.
    ///
    /// serde_json writes UTF-8 as-is, so non-ASCII text stays readable.
    pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
        let mut json = serde_json::to_string_pretty(value)
            .context("Failed to serialize output to JSON")?;
        json.push('\n');
        Self::write_to_file(path, &json)
    }

    // @resolves: Output path, relative names land next to the working directory
    pub fn resolve_output_path<P: AsRef<Path>>(output: P) -> PathBuf {
        let output = output.as_ref();
        if output.is_absolute() {
            output.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(output))
                .unwrap_or_else(|_| output.to_path_buf())
        }
    }
}
