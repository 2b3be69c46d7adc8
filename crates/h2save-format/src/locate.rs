//! Finding the Hades II save directory and the savefiles inside it.

use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Steam app id of Hades II, used for the Proton prefix on Linux.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
const HADES2_APP_ID: &str = "1145350";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    UnsupportedPlatform,
    NoHomeDir,
    NotFound(&'static str),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::UnsupportedPlatform => {
                write!(f, "Save directory detection is not supported on this platform")
            }
            LocateError::NoHomeDir => write!(f, "Could not determine home directory"),
            LocateError::NotFound(what) => write!(f, "Could not find {}", what),
        }
    }
}

impl std::error::Error for LocateError {}

/// A savefile found in the save directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

/// Locate the save directory of the current platform's Hades II install.
pub fn locate_save_dir() -> Result<PathBuf, LocateError> {
    let home = dirs::home_dir().ok_or(LocateError::NoHomeDir)?;
    save_dir_from_home(&home)
}

#[cfg(target_os = "windows")]
fn save_dir_from_home(home: &Path) -> Result<PathBuf, LocateError> {
    let dir = home.join("Saved Games/Hades II");
    if !dir.is_dir() {
        return Err(LocateError::NotFound("Hades II save directory"));
    }
    Ok(dir)
}

#[cfg(target_os = "linux")]
fn save_dir_from_home(home: &Path) -> Result<PathBuf, LocateError> {
    let steam_dir = steam_dir_candidates(home)
        .into_iter()
        .find(|dir| dir.is_dir())
        .ok_or(LocateError::NotFound("steam directory"))?;

    let dir = steam_dir.join(format!(
        "steamapps/compatdata/{}/pfx/drive_c/users/steamuser/Saved Games/Hades II",
        HADES2_APP_ID
    ));
    if !dir.is_dir() {
        return Err(LocateError::NotFound("Hades II save directory"));
    }
    Ok(dir)
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
fn save_dir_from_home(_home: &Path) -> Result<PathBuf, LocateError> {
    Err(LocateError::UnsupportedPlatform)
}

/// Flatpak, native and snap install locations, in lookup order.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn steam_dir_candidates(home: &Path) -> Vec<PathBuf> {
    let snap_dir = match std::env::var("SNAP_USER_DATA") {
        Ok(snap_dir) => PathBuf::from(snap_dir),
        Err(_) => home.join("snap"),
    };

    vec![
        home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"),
        home.join(".var/app/com.valvesoftware.Steam/.steam/steam"),
        home.join(".var/app/com.valvesoftware.Steam/.steam/root"),
        home.join(".local/share/Steam"),
        home.join(".steam/steam"),
        home.join(".steam/root"),
        home.join(".steam"),
        snap_dir.join("steam/common/.local/share/Steam"),
        snap_dir.join("steam/common/.steam/steam"),
        snap_dir.join("steam/common/.steam/root"),
    ]
}

/// List `*.sav` files directly inside `dir`, sorted by name.
pub fn list_saves(dir: &Path) -> std::io::Result<Vec<SaveEntry>> {
    let mut saves = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("sav") {
            continue;
        }

        saves.push(SaveEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: entry.metadata().map_err(std::io::Error::other)?.len(),
            path: path.to_path_buf(),
        });
    }

    saves.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(saves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_saves_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Profile2.sav"), b"bb").unwrap();
        std::fs::write(temp.path().join("Profile1.sav"), b"a").unwrap();
        std::fs::write(temp.path().join("Profile1.sav.txt"), b"ignored").unwrap();
        std::fs::create_dir(temp.path().join("nested.sav")).unwrap();

        let saves = list_saves(temp.path()).unwrap();
        let names: Vec<_> = saves.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Profile1.sav", "Profile2.sav"]);
        assert_eq!(saves[1].size, 2);
    }

    #[test]
    fn test_list_saves_missing_dir_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(list_saves(&temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_steam_candidates_prefer_flatpak() {
        let candidates = steam_dir_candidates(Path::new("/home/melinoe"));
        assert!(candidates[0].ends_with(".var/app/com.valvesoftware.Steam/.local/share/Steam"));
        assert_eq!(candidates.len(), 10);
    }
}
