use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::debug;
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use crate::errors::SubtitleError;

// @module: File and directory utilities

/// Suffix added to the file stem of backups
pub const BACKUP_SUFFIX: &str = " (before STAC)";

// @const: Backup suffix written by the older tool, still recognised
const LEGACY_BACKUP_SUFFIX: &str = "(Avant SRAH 2.3)";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find `.srt` files under `dir`, `depth` folder levels deep, backups excluded
    ///
    /// Depth 0 only looks at the folder itself. Results are sorted by path.
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P, depth: usize) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(depth + 1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() || Self::is_backup_file(path) {
                continue;
            }
            if let Some(ext) = path.extension() {
                if ext.to_string_lossy().eq_ignore_ascii_case("srt") {
                    result.push(path.to_path_buf());
                }
            }
        }

        result.sort();
        Ok(result)
    }

    // @checks: Stem carries a backup suffix
    pub fn is_backup_file<P: AsRef<Path>>(path: P) -> bool {
        match path.as_ref().file_stem() {
            Some(stem) => {
                let stem = stem.to_string_lossy();
                stem.ends_with(BACKUP_SUFFIX.trim_start()) || stem.ends_with(LEGACY_BACKUP_SUFFIX)
            }
            None => false,
        }
    }

    /// `movie.fr.srt` -> `movie.fr (before STAC).srt`
    pub fn backup_path<P: AsRef<Path>>(path: P) -> PathBuf {
        let path = path.as_ref();
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        path.with_file_name(format!("{}{}{}", stem, BACKUP_SUFFIX, extension))
    }

    /// Copy the file next to itself, unless a backup already exists
    ///
    /// @returns: The backup path when a copy was made
    pub fn backup_file<P: AsRef<Path>>(path: P) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(anyhow!("Source file does not exist: {:?}", path));
        }

        let backup = Self::backup_path(path);
        if backup.exists() {
            debug!("Backup already present: {:?}", backup);
            return Ok(None);
        }

        fs::copy(path, &backup).with_context(|| format!("Failed to back up {:?}", path))?;
        Ok(Some(backup))
    }

    /// Read the raw bytes of a subtitle file
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Bytes to text: UTF-8 (BOM removed) when valid, Latin-1 otherwise
    ///
    /// A UTF-16 file comes out with the `ÿþ` artifact the parser reports.
    pub fn decode_text(bytes: &[u8]) -> String {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        }
    }

    /// Bytes to text as UTF-16, little-endian unless a big-endian BOM says otherwise
    pub fn decode_utf16(bytes: &[u8]) -> Result<String, SubtitleError> {
        let (big_endian, body) = match bytes {
            [0xFE, 0xFF, rest @ ..] => (true, rest),
            [0xFF, 0xFE, rest @ ..] => (false, rest),
            _ => (false, bytes),
        };
        if body.len() % 2 != 0 {
            return Err(SubtitleError::Decode(format!("odd UTF-16 length: {} bytes", body.len())));
        }

        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| {
                if big_endian {
                    u16::from_be_bytes([pair[0], pair[1]])
                } else {
                    u16::from_le_bytes([pair[0], pair[1]])
                }
            })
            .collect();

        String::from_utf16(&units).map_err(|e| SubtitleError::Decode(e.to_string()))
    }

    /// Split text into lines, each keeping its terminator
    pub fn split_lines(text: &str) -> Vec<String> {
        text.split_inclusive('\n').map(String::from).collect()
    }

    /// Read a subtitle file as raw lines
    pub fn read_subtitle_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let bytes = Self::read_bytes(path)?;
        Ok(Self::split_lines(&Self::decode_text(&bytes)))
    }

    /// Write lines as UTF-8 with a BOM, replacing the file atomically
    pub fn write_subtitle_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
        temp.write_all(UTF8_BOM)?;
        for line in lines {
            temp.write_all(line.as_bytes())?;
        }
        temp.flush()?;

        temp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        Ok(())
    }

    /// Replace whitespace in the file name with `_`, renaming the file
    ///
    /// @returns: The new path, or the old one when nothing changed
    pub fn clean_spaces_in_file_name<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        let Some(name) = path.file_name().map(|name| name.to_string_lossy().to_string()) else {
            return Ok(path.to_path_buf());
        };

        let cleaned: String = name.chars().map(|c| if c.is_whitespace() { '_' } else { c }).collect();
        if cleaned == name {
            return Ok(path.to_path_buf());
        }

        let target = path.with_file_name(cleaned);
        if target.exists() {
            return Err(anyhow!("Cannot rename {:?}: {:?} already exists", path, target));
        }
        fs::rename(path, &target).with_context(|| format!("Failed to rename {:?}", path))?;
        debug!("Renamed {:?} to {:?}", path, target);
        Ok(target)
    }
}
