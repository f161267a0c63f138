//! Read-only lookup of puzzle inputs on disk

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Puzzle inputs stored as `{dir}/{year}_day{day:02}.txt`
///
/// An override file, when set, stands in for every lookup; the CLI only
/// allows it together with a single selected day.
pub struct InputStore {
    dir: PathBuf,
    override_file: Option<PathBuf>,
}

impl InputStore {
    pub fn new(dir: PathBuf, override_file: Option<PathBuf>) -> Self {
        Self { dir, override_file }
    }

    /// Path the input for a specific year/day is read from
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        match &self.override_file {
            Some(file) => file.clone(),
            None => self.dir.join(format!("{year}_day{day:02}.txt")),
        }
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing(path),
            _ => InputError::Read { path, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"), None);
        assert_eq!(store.path(2020, 1), PathBuf::from("inputs/2020_day01.txt"));
        assert_eq!(store.path(2020, 25), PathBuf::from("inputs/2020_day25.txt"));
    }

    #[test]
    fn test_read_and_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), None);

        assert!(!store.contains(2020, 6));
        assert!(matches!(store.read(2020, 6), Err(InputError::Missing(_))));

        fs::write(temp.path().join("2020_day06.txt"), "abc\n\na\nb\n").unwrap();
        assert!(store.contains(2020, 6));
        assert_eq!(store.read(2020, 6).unwrap(), "abc\n\na\nb\n");
    }

    #[test]
    fn test_override_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("custom.txt");
        fs::write(&file, "389125467").unwrap();

        let store = InputStore::new(temp.path().join("unused"), Some(file.clone()));
        assert_eq!(store.path(2020, 23), file);
        assert_eq!(store.read(2020, 23).unwrap(), "389125467");
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2020_day02.txt")).unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), None);
        assert!(!store.contains(2020, 2));
        assert!(matches!(store.read(2020, 2), Err(InputError::Read { .. })));
    }
}
