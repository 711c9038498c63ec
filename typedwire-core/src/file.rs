use std::{
    convert::Infallible,
    fmt,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use eyre::{Result, WrapErr};

/// Sentinel output name that selects standard output.
const STDOUT: &str = "stdout";

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held byte-identical content and was left alone
    Unchanged,
}

/// A generated file bound for disk
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the file unless it already holds the same content
    pub fn write(&self) -> Result<WriteResult> {
        if let Ok(existing) = std::fs::read_to_string(&self.path)
            && existing == self.content
        {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

/// Where synthesized text ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// The process standard output (`stdout` sentinel).
    Stdout,
    /// A file path.
    Path(PathBuf),
}

impl OutputTarget {
    /// Write content to this target.
    pub fn write(&self, content: &str) -> Result<WriteResult> {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .and_then(|()| stdout.flush())
                    .wrap_err("failed to write to stdout")?;
                Ok(WriteResult::Written)
            }
            Self::Path(path) => File::new(path, content).write(),
        }
    }
}

impl FromStr for OutputTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == STDOUT {
            Ok(Self::Stdout)
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str(STDOUT),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("gateway.rs");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gateway.rs");
        fs::write(&path, "original").unwrap();

        let result = File::new(&path, "updated").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_file_write_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gateway.rs");

        let file = File::new(&path, "same");
        assert!(!path.exists());
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert!(path.exists());
        assert_eq!(file.write().unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_output_target_parse() {
        assert_eq!("stdout".parse::<OutputTarget>().unwrap(), OutputTarget::Stdout);
        assert_eq!(
            "gen/gateway.rs".parse::<OutputTarget>().unwrap(),
            OutputTarget::Path(PathBuf::from("gen/gateway.rs"))
        );
        assert_eq!(OutputTarget::Stdout.to_string(), "stdout");
    }

    #[test]
    fn test_output_target_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.rs");

        let target = OutputTarget::Path(path.clone());
        assert_eq!(target.write("fn main() {}\n").unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fn main() {}\n");
    }
}
