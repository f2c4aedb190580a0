//! The `sdist` command object.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::archive::{make_archive, ArchiveArtifact, ArchiveFormat, ArchiveLayout, Ownership};
use crate::config::{OptionValue, ProjectConfig};
use crate::diagnostics::{Diagnostics, Source};
use crate::error::{Result, SrcpackError};
use crate::filelist::{nfs_pattern, read_template, translate_pattern, vcs_pattern, FileList};
use crate::filelist::pattern::compile;
use crate::manifest::{is_user_authored, read_manifest, write_manifest};
use crate::metadata::{check_metadata, fullname, render_pkg_info, PKG_INFO};

use super::defaults::add_defaults;
use super::options::{FinalizedOptions, SdistOptions};

/// Directory holding intermediate build output, always pruned.
pub const BUILD_DIR: &str = "build";

/// Lifecycle of a command object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandState {
    /// Options may be changed; `run` is refused.
    Unfinalized,
    /// Options validated; ready to run.
    Finalized,
    /// `run` completed at least once.
    Executed,
}

/// Outcome of one `sdist` run.
#[derive(Debug, Clone, Serialize)]
pub struct SdistReport {
    /// Archive root directory, `<name>-<version>`.
    pub base_dir: String,
    /// Final file list.
    pub files: Vec<String>,
    /// Whether the manifest was (re)generated.
    pub manifest_written: bool,
    /// Archives produced, in processing order.
    pub archives: Vec<ArchiveArtifact>,
    pub diagnostics: Diagnostics,
}

/// Builds a source distribution for one project.
pub struct SdistCommand {
    root: PathBuf,
    project: ProjectConfig,
    options: SdistOptions,
    finalized: Option<FinalizedOptions>,
    state: CommandState,
}

impl SdistCommand {
    /// Create a command for the project at `root`, seeded from its `sdist:` block.
    pub fn new(root: impl Into<PathBuf>, project: ProjectConfig) -> Self {
        let options = SdistOptions::from(&project.sdist);
        Self {
            root: root.into(),
            project,
            options,
            finalized: None,
            state: CommandState::Unfinalized,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Raw options.
    pub fn options(&self) -> &SdistOptions {
        &self.options
    }

    /// Finalized options, once [`SdistCommand::ensure_finalized`] succeeded.
    pub fn finalized(&self) -> Option<&FinalizedOptions> {
        self.finalized.as_ref()
    }

    /// Change options. The command must be finalized again before running.
    pub fn configure(&mut self, change: impl FnOnce(&mut SdistOptions)) {
        change(&mut self.options);
        self.finalized = None;
        self.state = CommandState::Unfinalized;
    }

    /// Set the `formats` option.
    pub fn set_formats(&mut self, formats: impl Into<OptionValue>) {
        let formats = formats.into();
        self.configure(|options| options.formats = Some(formats));
    }

    /// Validate options, once per configuration.
    pub fn ensure_finalized(&mut self) -> Result<&FinalizedOptions> {
        if self.state == CommandState::Unfinalized {
            let finalized = self.options.finalize(&self.root)?;
            tracing::debug!(formats = ?finalized.formats, "sdist options finalized");
            self.finalized = Some(finalized);
            self.state = CommandState::Finalized;
        }
        self.require_finalized()
    }

    fn require_finalized(&self) -> Result<&FinalizedOptions> {
        self.finalized.as_ref().ok_or_else(|| SrcpackError::NotFinalized {
            command: "sdist".to_string(),
        })
    }

    /// Archive root directory name.
    pub fn base_dir(&self) -> String {
        fullname(
            self.project.metadata.name.as_deref(),
            self.project.metadata.version.as_deref(),
        )
    }

    /// Build the file list, write the manifest and create the archives.
    pub fn run(&mut self) -> Result<SdistReport> {
        if self.state == CommandState::Unfinalized {
            return Err(SrcpackError::NotFinalized {
                command: "sdist".to_string(),
            });
        }

        let mut diagnostics = Diagnostics::new();
        let (files, manifest_written) = self.get_file_list(&mut diagnostics)?;

        let options = self.require_finalized()?;
        let mut report = SdistReport {
            base_dir: self.base_dir(),
            files,
            manifest_written,
            archives: Vec::new(),
            diagnostics: Diagnostics::new(),
        };

        if options.manifest_only {
            tracing::info!("manifest only, skipping archives");
        } else {
            if options.metadata_check {
                check_metadata(&self.project.metadata, &mut diagnostics);
            }
            report.archives = self.make_distribution(&report.files, &mut diagnostics)?;
        }

        report.diagnostics = diagnostics;
        self.state = CommandState::Executed;
        Ok(report)
    }

    /// Compute the final file list.
    ///
    /// A user-authored manifest is read verbatim. Otherwise defaults and the
    /// template are applied, the list pruned and the manifest regenerated.
    /// Returns the files and whether the manifest was written.
    pub fn get_file_list(&self, diagnostics: &mut Diagnostics) -> Result<(Vec<String>, bool)> {
        let options = self.require_finalized()?;
        let mut filelist = FileList::new(&self.root);

        if is_user_authored(&options.manifest)? {
            diagnostics.info(
                Source::Manifest,
                format!(
                    "manifest '{}' is not generated, using it as is",
                    file_name(&options.manifest)
                ),
            );
            filelist.extend(read_manifest(&options.manifest)?);
            filelist.sort();
            filelist.remove_duplicates();
            return Ok((filelist.into_files(), false));
        }

        let template_exists = options.template.is_file();
        if !template_exists {
            diagnostics.warn(
                Source::Template,
                format!(
                    "manifest template '{}' does not exist (using default file list)",
                    file_name(&options.template)
                ),
            );
        }

        if options.use_defaults {
            add_defaults(&self.project, &mut filelist, diagnostics)?;
        }

        if template_exists {
            read_template(&options.template, &mut filelist, diagnostics)?;
        }

        if options.prune {
            prune_file_list(&mut filelist, &self.base_dir())?;
        }

        filelist.sort();
        filelist.remove_duplicates();

        write_manifest(&options.manifest, filelist.files())?;
        Ok((filelist.into_files(), true))
    }

    /// Write one archive per requested format.
    ///
    /// Listed paths that are not regular files are skipped with a warning.
    /// A plain `tar` is written last. `PKG-INFO` is generated in memory.
    pub fn make_distribution(&self, files: &[String], diagnostics: &mut Diagnostics) -> Result<Vec<ArchiveArtifact>> {
        let options = self.require_finalized()?;
        let base_dir = self.base_dir();

        let mut members = Vec::with_capacity(files.len());
        for file in files {
            if self.root.join(file).is_file() {
                members.push(file.clone());
            } else {
                diagnostics.warn(
                    Source::Manifest,
                    format!("'{}' not a regular file, skipping", file),
                );
            }
        }

        let layout = ArchiveLayout::plan(
            &self.root,
            &base_dir,
            &members,
            vec![(PKG_INFO.to_string(), render_pkg_info(&self.project.metadata).into_bytes())],
        );

        let mut formats = options.formats.clone();
        if let Some(idx) = formats.iter().position(|f| *f == ArchiveFormat::Tar) {
            let tar = formats.remove(idx);
            formats.push(tar);
        }

        let ownership = if formats.iter().any(ArchiveFormat::supports_ownership) {
            Ownership::resolve(options.owner.as_deref(), options.group.as_deref(), diagnostics)
        } else {
            Ownership::default()
        };

        formats
            .into_iter()
            .map(|format| make_archive(format, &options.dist_dir, &layout, &ownership))
            .collect()
    }
}

/// Drop build output, the release tree, version-control data and NFS
/// leftovers from `filelist`.
pub fn prune_file_list(filelist: &mut FileList, base_dir: &str) -> Result<()> {
    filelist.exclude_matching(&translate_pattern(None, true, Some(BUILD_DIR))?);
    filelist.exclude_matching(&translate_pattern(None, true, Some(base_dir))?);
    filelist.exclude_matching(&compile(&vcs_pattern())?);
    filelist.exclude_matching(&compile(nfs_pattern())?);
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Metadata;
    use crate::diagnostics::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn fake_project() -> (TempDir, ProjectConfig) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("somecode")).unwrap();
        fs::write(temp.path().join("somecode/__init__.py"), "#").unwrap();
        fs::write(temp.path().join("README"), "xxx").unwrap();
        fs::write(temp.path().join("setup.py"), "from setuptools import setup\n").unwrap();

        let project = ProjectConfig {
            metadata: Metadata {
                name: Some("ns.fake--pkg".into()),
                version: Some("1.0".into()),
                url: Some("xxx".into()),
                author: Some("xxx".into()),
                author_email: Some("xxx".into()),
                ..Default::default()
            },
            packages: vec!["somecode".into()],
            ..Default::default()
        };
        (temp, project)
    }

    #[test]
    fn run_requires_finalize() {
        let (temp, project) = fake_project();
        let mut cmd = SdistCommand::new(temp.path(), project);
        assert_eq!(cmd.state(), CommandState::Unfinalized);
        assert!(matches!(cmd.run(), Err(SrcpackError::NotFinalized { .. })));
    }

    #[test]
    fn changing_options_resets_state() {
        let (temp, project) = fake_project();
        let mut cmd = SdistCommand::new(temp.path(), project);
        cmd.ensure_finalized().unwrap();
        assert_eq!(cmd.state(), CommandState::Finalized);

        cmd.set_formats("zip");
        assert_eq!(cmd.state(), CommandState::Unfinalized);
        assert!(cmd.finalized().is_none());
    }

    #[test]
    fn invalid_formats_fail_finalize() {
        let (temp, project) = fake_project();
        let mut cmd = SdistCommand::new(temp.path(), project);
        cmd.set_formats(1i64);
        assert!(matches!(cmd.ensure_finalized(), Err(SrcpackError::OptionError { .. })));
        cmd.set_formats("supazipa");
        assert!(cmd.ensure_finalized().is_err());
        cmd.set_formats(vec!["zip"]);
        assert!(cmd.ensure_finalized().is_ok());
    }

    #[test]
    fn base_dir_is_normalized() {
        let (temp, project) = fake_project();
        let cmd = SdistCommand::new(temp.path(), project);
        assert_eq!(cmd.base_dir(), "ns_fake_pkg-1.0");
    }

    #[test]
    fn prune_removes_build_release_and_vcs_files() {
        let temp = TempDir::new().unwrap();
        let mut filelist = FileList::new(temp.path());
        filelist.extend([
            "README",
            "build/lib/mod.py",
            "fake-1.0/README",
            ".git/config",
            "somecode/.svn/entries",
            "somecode/.nfs0001",
            "somecode/__init__.py",
            "buildout.cfg",
        ]);

        prune_file_list(&mut filelist, "fake-1.0").unwrap();
        assert_eq!(filelist.files(), &["README", "somecode/__init__.py", "buildout.cfg"]);
    }

    #[test]
    fn manifest_only_skips_archives() {
        let (temp, project) = fake_project();
        let mut cmd = SdistCommand::new(temp.path(), project);
        cmd.configure(|o| o.manifest_only = true);
        cmd.ensure_finalized().unwrap();
        let report = cmd.run().unwrap();

        assert!(report.manifest_written);
        assert!(report.archives.is_empty());
        assert!(temp.path().join("MANIFEST").is_file());
        assert!(!temp.path().join("dist").exists());
        assert_eq!(cmd.state(), CommandState::Executed);
    }

    #[test]
    fn missing_manifest_entries_are_skipped() {
        let (temp, project) = fake_project();
        fs::write(temp.path().join("MANIFEST"), "README\nsomecode\nnot_there.txt\n").unwrap();
        let mut cmd = SdistCommand::new(temp.path(), project);
        cmd.set_formats("zip");
        cmd.ensure_finalized().unwrap();
        let report = cmd.run().unwrap();

        let skipped: Vec<_> = report
            .diagnostics
            .filter(Severity::Warning, Source::Manifest)
            .into_iter()
            .map(|d| d.message.clone())
            .collect();
        assert_eq!(
            skipped,
            vec![
                "'not_there.txt' not a regular file, skipping",
                "'somecode' not a regular file, skipping"
            ]
        );
        assert_eq!(report.archives.len(), 1);
    }

    #[test]
    fn tar_is_processed_last() {
        let (temp, project) = fake_project();
        let mut cmd = SdistCommand::new(temp.path(), project);
        cmd.set_formats(vec!["tar", "zip"]);
        cmd.ensure_finalized().unwrap();
        let report = cmd.run().unwrap();

        let formats: Vec<_> = report.archives.iter().map(|a| a.format).collect();
        assert_eq!(formats, vec![ArchiveFormat::Zip, ArchiveFormat::Tar]);
    }
}
