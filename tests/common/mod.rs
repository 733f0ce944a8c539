#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway codebase under `<tmp>/<name>`, so the output lands in `<tmp>`
pub struct TestProject {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestProject {
    /// Create an empty project directory called `name`
    pub fn new(name: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join(name);
        fs::create_dir_all(&root)?;
        Ok(Self { temp_dir, root })
    }

    /// The `proj/a.txt` + `proj/sub/b.txt` layout used across the suite
    pub fn scenario() -> Result<Self> {
        let project = Self::new("proj")?;
        project.write("a.txt", "hi")?;
        project.write("sub/b.txt", "x\n")?;
        Ok(project)
    }

    /// Write a file relative to the project root, creating parents
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Where codetext writes the document for this project
    pub fn output_path(&self) -> Result<PathBuf> {
        let name = self.root.file_name().unwrap().to_string_lossy().into_owned();
        Ok(self.temp_dir.path().join(format!("{name}.txt")))
    }

    /// Content of the written document
    pub fn output(&self) -> Result<String> {
        Ok(fs::read_to_string(self.output_path()?)?)
    }

    /// A `codetext` command pointed at this project, config env cleared
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("codetext")?;
        cmd.env_remove("CODETEXT_CONFIG")
            .env_remove("CODETEXT_LOG")
            .arg(&self.root);
        Ok(cmd)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Header line codetext writes for a rendered path such as `\sub\b.txt`
pub fn header(rendered: &str) -> String {
    format!("********** BELOW IS THE CONTENT OF FILE: {rendered} **********")
}
