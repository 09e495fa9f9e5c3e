//! pywal palette reader.
//!
//! `wal` writes its scheme to `~/.cache/wal/colors`, one hex color per line,
//! `color0` first. The file is read once and indexed directly.

use std::path::{Path, PathBuf};

use crate::error::{Result, TapoPywalError};

/// Number of entries in a pywal scheme.
pub const PALETTE_SIZE: usize = 16;

/// Palette entry used when no `--index` is given.
pub const ACCENT_INDEX: usize = 0;

/// Ordered palette entries as printed by pywal.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Default pywal cache path, if a home directory is known.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".cache").join("wal").join("colors"))
    }

    /// Read the palette file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TapoPywalError::Palette(format!(
                    "no pywal colors at {} (run `wal` first)",
                    path.display()
                ))
            } else {
                TapoPywalError::Palette(format!("cannot read {}: {e}", path.display()))
            }
        })?;
        let palette = Self::parse(&contents);
        if palette.is_empty() {
            return Err(TapoPywalError::Palette(format!(
                "{} has no colors (run `wal` first)",
                path.display()
            )));
        }
        log::debug!(
            "loaded {} palette colors from {}",
            palette.len(),
            path.display()
        );
        Ok(palette)
    }

    /// Split file contents into entries; blank lines are skipped.
    pub fn parse(contents: &str) -> Self {
        let colors = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Palette { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry at `index`, which must be in `0..PALETTE_SIZE` and present in the file.
    pub fn get(&self, index: usize) -> Result<&str> {
        check_index(index as i64)?;
        self.colors.get(index).map(String::as_str).ok_or_else(|| {
            TapoPywalError::Palette(format!(
                "palette has {} colors, no entry at index {index}",
                self.colors.len()
            ))
        })
    }
}

/// Reject indices outside `0..PALETTE_SIZE`.
pub fn check_index(index: i64) -> Result<usize> {
    match usize::try_from(index) {
        Ok(i) if i < PALETTE_SIZE => Ok(i),
        _ => Err(TapoPywalError::Palette(format!(
            "index {index} out of range (0-{})",
            PALETTE_SIZE - 1
        ))),
    }
}
