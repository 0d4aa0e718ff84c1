use std::path::{Component, Path};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use anyhow::{Result, bail};

use super::parser::{list_entries, read_entry};
use super::structures::TarEntry;

/// Ghost bundle extractor over an in-memory archive
pub struct TarExtractor<'a> {
    data: &'a [u8],
}

impl<'a> TarExtractor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// List all regular files in the archive
    pub fn list_files(&self) -> Vec<TarEntry> {
        list_entries(self.data)
    }

    /// Borrow file data without copying
    pub fn extract_to_memory(&self, entry: &TarEntry) -> &'a [u8] {
        read_entry(entry, self.data)
    }

    /// Extract file to disk
    pub async fn extract_to_file(&self, entry: &TarEntry, output_path: &Path) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(output_path).await?;
        file.write_all(self.extract_to_memory(entry)).await?;

        Ok(())
    }

    /// Extract file to stdout
    pub async fn extract_to_stdout(&self, entry: &TarEntry) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(self.extract_to_memory(entry)).await?;
        stdout.flush().await?;

        Ok(())
    }
}

/// Reject entry names that would escape the extraction directory.
pub fn ensure_relative(name: &str) -> Result<()> {
    let path = Path::new(name);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => bail!("Refusing to extract unsafe path: {}", name),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_names_are_accepted() {
        assert!(ensure_relative("ghost.yml").is_ok());
        assert!(ensure_relative("./level/ghost.bin").is_ok());
    }

    #[test]
    fn escaping_names_are_rejected() {
        assert!(ensure_relative("../etc/passwd").is_err());
        assert!(ensure_relative("/etc/passwd").is_err());
        assert!(ensure_relative("a/../../b").is_err());
    }
}
