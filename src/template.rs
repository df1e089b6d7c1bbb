// src/template.rs
//! Starter template materialization and post-clone cleanup.

#![deny(missing_docs)]

use crate::error::BootstrapResult;
use crate::project::ProjectLayout;
use crate::prompt::Framework;
use anyhow::{Context, bail};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy `webapps-starters/<framework>/<components>` into `webapp`.
///
/// The starter is not validated up front: a pair without a starter directory
/// surfaces as a filesystem error naming the missing path.
pub fn materialize(
    layout: &ProjectLayout,
    framework: Framework,
    components: &str,
) -> BootstrapResult<usize> {
    let webapp = layout.webapp();
    fs::create_dir_all(&webapp).with_context(|| format!("creating {}", webapp.display()))?;

    let source = layout.starter(framework, components);
    fs::metadata(&source)
        .with_context(|| format!("starter template not found: {}", source.display()))?;
    copy_tree(&source, &webapp)
}

/// Recursively copy `from` into `to`, hidden files included, no ignore rules.
/// Returns the number of files copied.
pub fn copy_tree(from: &Path, to: &Path) -> BootstrapResult<usize> {
    if !from.is_dir() {
        bail!("{} is not a directory", from.display());
    }
    let mut builder = WalkBuilder::new(from);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .max_depth(None);

    let mut copied = 0;
    for res in builder.build() {
        let dent = res.with_context(|| format!("walking {}", from.display()))?;
        let rel = dent
            .path()
            .strip_prefix(from)
            .with_context(|| format!("{} escapes {}", dent.path().display(), from.display()))?;
        let target = to.join(rel);
        let Some(ft) = dent.file_type() else { continue };

        if ft.is_symlink() {
            copy_link(dent.path(), &target)?;
            copied += 1;
        } else if ft.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("creating {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(dent.path(), &target).with_context(|| {
                format!("copying {} -> {}", dent.path().display(), target.display())
            })?;
            copied += 1;
        }
    }
    log::debug!("copied {copied} files from {} to {}", from.display(), to.display());
    Ok(copied)
}

/// Recreate the link at `from` as a link at `to`, target text unchanged.
fn copy_link(from: &Path, to: &Path) -> BootstrapResult<()> {
    let dest = fs::read_link(from).with_context(|| format!("reading link {}", from.display()))?;
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    if fs::symlink_metadata(to).is_ok() {
        fs::remove_file(to).with_context(|| format!("replacing {}", to.display()))?;
    }
    make_link(from, &dest, to).with_context(|| {
        format!("linking {} -> {}", to.display(), dest.display())
    })
}

#[cfg(unix)]
fn make_link(_from: &Path, dest: &Path, to: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(dest, to)
}

#[cfg(windows)]
fn make_link(from: &Path, dest: &Path, to: &Path) -> std::io::Result<()> {
    if fs::metadata(from).is_ok_and(|m| m.is_dir()) {
        std::os::windows::fs::symlink_dir(dest, to)
    } else {
        std::os::windows::fs::symlink_file(dest, to)
    }
}

/// Directories removed once the starter has been copied out.
pub fn cleanup_targets(layout: &ProjectLayout) -> [PathBuf; 3] {
    [layout.git_dir(), layout.bin_dir(), layout.starters()]
}

/// Remove every cleanup target. A missing path is not an error; other
/// failures are collected and returned together so the caller can report them.
pub fn cleanup(layout: &ProjectLayout) -> BootstrapResult<()> {
    let mut failed = Vec::new();
    for path in cleanup_targets(layout) {
        match fs::remove_dir_all(&path) {
            Ok(()) => log::debug!("removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => failed.push(format!("{}: {e}", path.display())),
        }
    }
    if !failed.is_empty() {
        bail!("could not remove {}", failed.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    fn fake_clone(tmp: &assert_fs::TempDir) -> ProjectLayout {
        for fw in Framework::ALL {
            for lib in fw.components() {
                tmp.child(format!("openv0/webapps-starters/{fw}/{lib}/package.json"))
                    .write_str(&format!("{{\"name\":\"{fw}-{lib}\"}}"))
                    .unwrap();
                tmp.child(format!("openv0/webapps-starters/{fw}/{lib}/src/App.tsx"))
                    .write_str("export default 1")
                    .unwrap();
                tmp.child(format!("openv0/webapps-starters/{fw}/{lib}/.env.example"))
                    .write_str("X=1")
                    .unwrap();
            }
        }
        tmp.child("openv0/.git/HEAD").write_str("ref: refs/heads/dev").unwrap();
        tmp.child("openv0/bin/cli.js").write_str("").unwrap();
        tmp.child("openv0/server/api.js").write_str("").unwrap();
        ProjectLayout::new(tmp.path(), "openv0")
    }

    /// `webapps-starters/<framework>/<library>` directories on the upstream dev branch.
    const UPSTREAM_STARTERS: &[(&str, &str)] = &[
        ("react", "nextui"),
        ("react", "flowbite"),
        ("react", "shadcn"),
        ("svelte", "flowbite"),
        ("svelte", "shadcn"),
        ("next", "nextui"),
        ("next", "flowbite"),
        ("next", "shadcn"),
    ];

    #[test]
    fn offered_pairs_match_upstream_starters() {
        let mut offered: Vec<(&str, &str)> = Framework::ALL
            .iter()
            .flat_map(|fw| fw.components().iter().map(move |lib| (fw.as_str(), *lib)))
            .collect();
        let mut upstream = UPSTREAM_STARTERS.to_vec();
        offered.sort_unstable();
        upstream.sort_unstable();
        assert_eq!(offered, upstream);
    }

    #[test]
    #[ignore = "clones the upstream repository"]
    fn offered_pairs_exist_in_real_clone() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let cfg = crate::config::Config::default();
        let layout = ProjectLayout::new(tmp.path(), &cfg.project_dir);
        crate::clone::clone_repository(&mut crate::runner::ProcessRunner, &cfg, &layout).unwrap();
        for fw in Framework::ALL {
            for lib in fw.components() {
                assert!(layout.starter(fw, lib).is_dir(), "{fw}/{lib}");
            }
            let mut present: Vec<String> = fs::read_dir(layout.starters().join(fw.as_str()))
                .unwrap()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            let mut offered: Vec<String> = fw.components().iter().map(|s| s.to_string()).collect();
            present.sort();
            offered.sort();
            assert_eq!(present, offered, "{fw}");
        }
    }

    #[test]
    fn copies_one_starter_including_dotfiles() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let layout = fake_clone(&tmp);
        let n = materialize(&layout, Framework::React, "flowbite").unwrap();
        assert_eq!(n, 3);
        tmp.child("openv0/webapp/package.json")
            .assert(predicate::str::contains("react-flowbite"));
        tmp.child("openv0/webapp/src/App.tsx").assert(predicate::path::exists());
        tmp.child("openv0/webapp/.env.example").assert(predicate::path::exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_copied_as_links() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let layout = fake_clone(&tmp);
        let starter = tmp.child("openv0/webapps-starters/react/shadcn");
        starter.child("src/lib/utils.ts").write_str("export {}").unwrap();
        std::os::unix::fs::symlink("src/lib", starter.child("lib").path()).unwrap();
        std::os::unix::fs::symlink("missing/tsconfig.json", starter.child("tsconfig.json").path())
            .unwrap();

        materialize(&layout, Framework::React, "shadcn").unwrap();

        let webapp = tmp.child("openv0/webapp");
        assert_eq!(
            fs::read_link(webapp.child("lib").path()).unwrap(),
            Path::new("src/lib")
        );
        assert_eq!(
            fs::read_link(webapp.child("tsconfig.json").path()).unwrap(),
            Path::new("missing/tsconfig.json")
        );
        webapp.child("lib/utils.ts").assert("export {}");

        // a second run over an existing webapp replaces the links
        materialize(&layout, Framework::React, "shadcn").unwrap();
    }

    #[test]
    fn unknown_pair_fails_with_path() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let layout = fake_clone(&tmp);
        let err = materialize(&layout, Framework::Svelte, "nextui").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("webapps-starters"), "got: {msg}");
    }

    #[test]
    fn cleanup_removes_scaffolding_and_tolerates_missing() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let layout = fake_clone(&tmp);
        materialize(&layout, Framework::Next, "shadcn").unwrap();
        cleanup(&layout).unwrap();
        for p in ["openv0/.git", "openv0/bin", "openv0/webapps-starters"] {
            tmp.child(p).assert(predicate::path::missing());
        }
        tmp.child("openv0/server/api.js").assert(predicate::path::exists());
        tmp.child("openv0/webapp/package.json").assert(predicate::path::exists());
        cleanup(&layout).unwrap();
    }
}
