//! This module provides the `ProgramLoader` struct, responsible for loading pushdown automaton
//! definitions from files, strings, and directories.

use crate::automaton::Pda;
use crate::parser::parse;
use crate::types::PdaError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of definition files.
pub const DEFINITION_EXTENSION: &str = "pda";

/// `ProgramLoader` is a utility struct for loading pushdown automaton definitions.
/// It provides methods to load a definition from a file or from string content,
/// and to discover and load all `.pda` files within a directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single definition from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the definition file.
    ///
    /// # Returns
    ///
    /// * `Ok(Pda)` if the file is successfully read and parsed.
    /// * `Err(PdaError::FileError)` if the file cannot be read.
    /// * `Err(PdaError::ParseError)` or `Err(PdaError::DefinitionError)` if the content is
    ///   not a valid definition.
    pub fn load_program(path: &Path) -> Result<Pda, PdaError> {
        let content = fs::read_to_string(path).map_err(|e| {
            PdaError::FileError(format!("File '{}' could not be read: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "loading definition");

        parse(&content)
    }

    /// Loads a single definition from the provided string content.
    pub fn load_program_from_string(content: &str) -> Result<Pda, PdaError> {
        parse(content)
    }

    /// Loads every definition file (`.pda` extension) found directly in a directory.
    ///
    /// Directories and files with other extensions are skipped. Each file yields its own
    /// result, so one broken definition does not hide the others.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Pda), PdaError>> {
        if !directory.exists() {
            return vec![Err(PdaError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(PdaError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut paths = Vec::new();
        let mut results = Vec::new();

        for entry in entries {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(e) => results.push(Err(PdaError::FileError(format!(
                    "Failed to read directory entry: {}",
                    e
                )))),
            }
        }

        // Directory order is platform dependent.
        paths.sort();

        for path in paths {
            if path.is_dir() || path.extension().is_none_or(|ext| ext != DEFINITION_EXTENSION) {
                continue;
            }

            results.push(Self::load_program(&path).map(|pda| (path, pda)));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const VALID: &str = "q\na\nZ\nq\nZ\nq a Z q .\n";

    fn write_file(path: &Path, content: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("single.pda");
        write_file(&file_path, VALID);

        let result = ProgramLoader::load_program(&file_path);
        assert!(result.is_ok());

        let pda = result.unwrap();
        assert_eq!(pda.states().len(), 1);
        assert_eq!(pda.accepts("a"), Ok(true));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();

        let result = ProgramLoader::load_program(&dir.path().join("missing.pda"));

        let error = result.unwrap_err();
        assert!(matches!(error, PdaError::FileError(_)));
        assert!(error.is_definition_error());
        assert!(error.to_string().contains("missing.pda"));
    }

    #[test]
    fn test_load_invalid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.pda");
        write_file(&file_path, "This is not a valid definition");

        let result = ProgramLoader::load_program(&file_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_program_from_string() {
        let pda = ProgramLoader::load_program_from_string(VALID).unwrap();

        assert_eq!(pda.transition_count(), 1);
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();

        write_file(&dir.path().join("valid.pda"), VALID);
        write_file(&dir.path().join("invalid.pda"), "q\na\nZ .\nq\nZ\n");
        write_file(&dir.path().join("ignored.txt"), "This file should be ignored");
        fs::create_dir(dir.path().join("nested.pda")).unwrap();

        let results = ProgramLoader::load_programs(dir.path());

        // Sorted by path: invalid.pda, valid.pda
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(PdaError::DefinitionError(_))));

        let (path, pda) = results[1].as_ref().unwrap();
        assert!(path.ends_with("valid.pda"));
        assert_eq!(pda.transition_count(), 1);
    }

    #[test]
    fn test_load_programs_missing_directory() {
        let dir = tempdir().unwrap();

        let results = ProgramLoader::load_programs(&dir.path().join("nope"));

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(PdaError::FileError(_))));
    }
}
