// src/project.rs
//! On-disk layout of a bootstrapped project.

#![deny(missing_docs)]

use crate::error::BootstrapResult;
use crate::prompt::Framework;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Every path the bootstrap touches, derived from one project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Layout rooted at `<cwd>/<project_dir>`.
    pub fn new(cwd: &Path, project_dir: &str) -> Self {
        Self {
            root: cwd.join(project_dir),
        }
    }

    /// Project root (the clone target).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// API server subtree.
    pub fn server(&self) -> PathBuf {
        self.root.join("server")
    }

    /// Webapp subtree, filled from one starter.
    pub fn webapp(&self) -> PathBuf {
        self.root.join("webapp")
    }

    /// All starters, removed after materialization.
    pub fn starters(&self) -> PathBuf {
        self.root.join("webapps-starters")
    }

    /// Starter for a (framework, components library) pair.
    pub fn starter(&self, framework: Framework, components: &str) -> PathBuf {
        self.starters().join(framework.as_str()).join(components)
    }

    /// Clone metadata.
    pub fn git_dir(&self) -> PathBuf {
        self.root.join(".git")
    }

    /// The repository's own launcher scripts, unused once bootstrapped.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Server dotenv file.
    pub fn env_file(&self) -> PathBuf {
        self.server().join(".env")
    }

    /// Directory holding the lucide vector index.
    pub fn vectordb_dir(&self) -> PathBuf {
        self.server()
            .join("library")
            .join("icons")
            .join("lucide")
            .join("vectordb")
    }

    /// Bundled index archive.
    pub fn vectordb_archive(&self) -> PathBuf {
        self.vectordb_dir().join("index.7z")
    }

    /// Create the root if absent. An existing directory is fine.
    pub fn ensure_root(&self) -> BootstrapResult<()> {
        if self.root.is_dir() {
            log::debug!("{} already exists", self.root.display());
            return Ok(());
        }
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating {}", self.root.display()))
    }

    /// The server subtree must exist for the `db` subcommands.
    pub fn require_server(&self) -> BootstrapResult<PathBuf> {
        let server = self.server();
        if !server.is_dir() {
            anyhow::bail!(
                "no openv0 server at {}. Run `openv0` without arguments first",
                server.display()
            );
        }
        Ok(server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn paths() {
        let l = ProjectLayout::new(Path::new("/work"), "openv0");
        assert_eq!(l.env_file(), PathBuf::from("/work/openv0/server/.env"));
        assert_eq!(
            l.starter(Framework::Svelte, "shadcn"),
            PathBuf::from("/work/openv0/webapps-starters/svelte/shadcn")
        );
        assert_eq!(
            l.vectordb_archive(),
            PathBuf::from("/work/openv0/server/library/icons/lucide/vectordb/index.7z")
        );
    }

    #[test]
    fn ensure_root_is_idempotent() {
        let tmp = assert_fs::TempDir::new().unwrap();
        tmp.child("openv0/keep.txt").write_str("x").unwrap();
        let l = ProjectLayout::new(tmp.path(), "openv0");
        l.ensure_root().unwrap();
        l.ensure_root().unwrap();
        tmp.child("openv0/keep.txt").assert("x");
    }

    #[test]
    fn require_server_explains_missing_project() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let err = ProjectLayout::new(tmp.path(), "openv0")
            .require_server()
            .unwrap_err();
        assert!(format!("{err}").contains("no openv0 server"));
    }
}
