//! Integration tests for building source distributions.

use std::fs;
use std::fs::File;
use std::path::Path;

use srcpack::config::{DataFile, Metadata, ProjectConfig};
use srcpack::diagnostics::{Severity, Source};
use srcpack::filelist::FileList;
use srcpack::manifest::MANIFEST_MARKER;
use srcpack::sdist::{prune_file_list, SdistCommand};
use srcpack::SrcpackError;
use tempfile::TempDir;

const EXPECTED_MANIFEST: &str = "\
# file GENERATED by distutils, do NOT edit
README
buildout.cfg
inroot.txt
setup.py
data{sep}data.dt
scripts{sep}script.py
some{sep}file.txt
some{sep}other_file.txt
somecode{sep}__init__.py
somecode{sep}doc.dat
somecode{sep}doc.txt
";

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fake_project() -> (TempDir, ProjectConfig) {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "somecode/__init__.py", "#");
    write(temp.path(), "README", "xxx");
    write(temp.path(), "setup.py", "from setuptools import setup\nsetup(name='fake')\n");

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

fn zip_names(path: &Path) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    names
}

fn tar_names(path: &Path) -> Vec<String> {
    let file = File::open(path).unwrap();
    let reader: Box<dyn std::io::Read> = if path.to_string_lossy().ends_with(".gz") {
        Box::new(flate2::read::GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut archive = tar::Archive::new(reader);
    let mut names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            let name = e.path().unwrap().to_string_lossy().trim_end_matches('/').to_string();
            if e.header().entry_type().is_dir() {
                format!("{}/", name)
            } else {
                name
            }
        })
        .collect();
    names.sort();
    names
}

fn manifest_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn prune_file_list_drops_vcs_build_and_release_dirs() {
    let (temp, project) = fake_project();
    for vcs in ["CVS", ".svn", ".hg", ".git", ".bzr", "_darcs", "RCS"] {
        write(temp.path(), &format!("{}/hooks", vcs), "#");
        write(temp.path(), &format!("somecode/{}/entries", vcs), "#");
    }
    write(temp.path(), "build/lib/somecode/__init__.py", "#");
    write(temp.path(), "ns_fake_pkg-1.0/README", "#");
    write(temp.path(), "somecode/.nfs0123abcd", "#");
    write(temp.path(), "MANIFEST.in", "global-include *\n");

    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.set_formats("zip");
    cmd.ensure_finalized().unwrap();
    let report = cmd.run().unwrap();

    let names = zip_names(&temp.path().join("dist/ns_fake_pkg-1.0.zip"));
    assert_eq!(
        names,
        vec![
            "ns_fake_pkg-1.0/",
            "ns_fake_pkg-1.0/MANIFEST.in",
            "ns_fake_pkg-1.0/PKG-INFO",
            "ns_fake_pkg-1.0/README",
            "ns_fake_pkg-1.0/setup.py",
            "ns_fake_pkg-1.0/somecode/",
            "ns_fake_pkg-1.0/somecode/__init__.py",
        ]
    );
    assert!(!report.files.iter().any(|f| f.starts_with("build/")));
}

#[test]
fn prune_file_list_function_leaves_ordinary_files() {
    let temp = TempDir::new().unwrap();
    let mut filelist = FileList::new(temp.path());
    filelist.extend(["a.py", "_darcs/x", "buildx/y", "pkg/CVS/Entries", "pkg/.nfs12"]);
    prune_file_list(&mut filelist, "pkg-1.0").unwrap();
    assert_eq!(filelist.files(), &["a.py", "buildx/y"]);
}

#[test]
fn make_distribution_gztar_and_tar_have_same_members() {
    let (temp, project) = fake_project();
    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.set_formats(vec!["gztar", "tar"]);
    cmd.ensure_finalized().unwrap();
    let report = cmd.run().unwrap();

    let mut dist: Vec<String> = fs::read_dir(temp.path().join("dist"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    dist.sort();
    assert_eq!(dist, vec!["ns_fake_pkg-1.0.tar", "ns_fake_pkg-1.0.tar.gz"]);

    let tar = tar_names(&temp.path().join("dist/ns_fake_pkg-1.0.tar"));
    let gztar = tar_names(&temp.path().join("dist/ns_fake_pkg-1.0.tar.gz"));
    assert_eq!(tar, gztar);
    assert_eq!(
        tar,
        vec![
            "ns_fake_pkg-1.0/",
            "ns_fake_pkg-1.0/PKG-INFO",
            "ns_fake_pkg-1.0/README",
            "ns_fake_pkg-1.0/setup.py",
            "ns_fake_pkg-1.0/somecode/",
            "ns_fake_pkg-1.0/somecode/__init__.py",
        ]
    );

    assert_eq!(report.archives.len(), 2);
    for archive in &report.archives {
        assert_eq!(archive.sha256.len(), 64);
    }
}

#[test]
fn add_defaults_includes_data_files_package_data_and_scripts() {
    let (temp, mut project) = fake_project();
    project
        .package_data
        .insert("".into(), vec!["*.cfg".into(), "*.dat".into()]);
    project.package_data.insert("somecode".into(), vec!["*.txt".into()]);
    write(temp.path(), "somecode/doc.txt", "#");
    write(temp.path(), "somecode/doc.dat", "#");

    write(temp.path(), "data/data.dt", "#");
    write(temp.path(), ".hg/last-message.txt", "#");
    write(temp.path(), "buildout.cfg", "#");
    write(temp.path(), "inroot.txt", "#");
    write(temp.path(), "some/file.txt", "#");
    write(temp.path(), "some/other_file.txt", "#");
    project.data_files = vec![
        DataFile::Group(
            "data".into(),
            vec![
                "data/data.dt".into(),
                "buildout.cfg".into(),
                "inroot.txt".into(),
                "notexisting".into(),
            ],
        ),
        DataFile::Path("some/file.txt".into()),
        DataFile::Path("some/other_file.txt".into()),
    ];

    write(temp.path(), "scripts/script.py", "#");
    project.scripts = vec!["scripts/script.py".into()];

    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.set_formats(vec!["zip"]);
    cmd.ensure_finalized().unwrap();
    cmd.run().unwrap();

    let dist: Vec<_> = fs::read_dir(temp.path().join("dist")).unwrap().collect();
    assert_eq!(dist.len(), 1);

    let expected: Vec<String> = [
        "",
        "PKG-INFO",
        "README",
        "buildout.cfg",
        "data/",
        "data/data.dt",
        "inroot.txt",
        "scripts/",
        "scripts/script.py",
        "setup.py",
        "some/",
        "some/file.txt",
        "some/other_file.txt",
        "somecode/",
        "somecode/__init__.py",
        "somecode/doc.dat",
        "somecode/doc.txt",
    ]
    .iter()
    .map(|x| format!("ns_fake_pkg-1.0/{}", x))
    .collect();
    assert_eq!(zip_names(&temp.path().join("dist/ns_fake_pkg-1.0.zip")), expected);

    let manifest = fs::read_to_string(temp.path().join("MANIFEST")).unwrap();
    let sep = std::path::MAIN_SEPARATOR.to_string();
    assert_eq!(manifest, EXPECTED_MANIFEST.replace("{sep}", &sep));
}

#[test]
fn metadata_check_warns_once_and_can_be_disabled() {
    let (temp, _) = fake_project();

    let mut cmd = SdistCommand::new(temp.path(), ProjectConfig::default());
    cmd.ensure_finalized().unwrap();
    let report = cmd.run().unwrap();
    let warnings = report.diagnostics.filter(Severity::Warning, Source::Check);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "missing required meta-data: name, version");

    let mut cmd = SdistCommand::new(temp.path(), ProjectConfig::default());
    cmd.configure(|o| o.metadata_check = false);
    cmd.ensure_finalized().unwrap();
    let report = cmd.run().unwrap();
    assert_eq!(report.diagnostics.count(Severity::Warning, Source::Check), 0);
}

#[test]
fn finalize_options_defaults_and_format_validation() {
    let (temp, project) = fake_project();
    let mut cmd = SdistCommand::new(temp.path(), project);
    let finalized = cmd.ensure_finalized().unwrap();
    assert_eq!(finalized.manifest, temp.path().join("MANIFEST"));
    assert_eq!(finalized.template, temp.path().join("MANIFEST.in"));
    assert_eq!(finalized.dist_dir, temp.path().join("dist"));

    cmd.set_formats(1i64);
    assert!(matches!(cmd.ensure_finalized(), Err(SrcpackError::OptionError { .. })));

    cmd.set_formats("supazipa");
    assert!(matches!(cmd.ensure_finalized(), Err(SrcpackError::OptionError { .. })));

    cmd.set_formats(vec!["zip"]);
    cmd.ensure_finalized().unwrap();
    assert!(!temp.path().join("MANIFEST").exists());
}

fn template_warnings(content: &str) -> usize {
    let (temp, project) = fake_project();
    write(temp.path(), "MANIFEST.in", content);
    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.configure(|o| o.manifest_only = true);
    cmd.ensure_finalized().unwrap();
    let report = cmd.run().unwrap();
    report.diagnostics.count(Severity::Warning, Source::Template)
}

#[test]
fn invalid_template_unknown_command() {
    assert_eq!(template_warnings("taunt knights *"), 1);
}

#[test]
fn invalid_template_wrong_arguments() {
    assert_eq!(template_warnings("prune"), 1);
}

#[cfg(windows)]
#[test]
fn invalid_template_wrong_path() {
    assert_eq!(template_warnings("include examples/"), 1);
}

#[test]
fn get_file_list_is_recomputed_each_run() {
    let (temp, mut project) = fake_project();
    project.package_data.insert("somecode".into(), vec!["*.txt".into()]);
    write(temp.path(), "somecode/doc.txt", "#");

    let mut cmd = SdistCommand::new(temp.path(), project.clone());
    cmd.ensure_finalized().unwrap();
    cmd.run().unwrap();
    let manifest = manifest_lines(&temp.path().join("MANIFEST"));
    assert_eq!(manifest.len(), 5);

    write(temp.path(), "somecode/doc2.txt", "#");
    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.ensure_finalized().unwrap();
    cmd.run().unwrap();
    let manifest = manifest_lines(&temp.path().join("MANIFEST"));
    assert_eq!(manifest.len(), 6);
    assert!(manifest.last().unwrap().contains("doc2.txt"));
}

#[test]
fn generated_manifest_starts_with_marker() {
    let (temp, project) = fake_project();
    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.configure(|o| o.manifest_only = true);
    cmd.ensure_finalized().unwrap();
    cmd.run().unwrap();

    let manifest = manifest_lines(&temp.path().join("MANIFEST"));
    assert_eq!(manifest[0], MANIFEST_MARKER);
}

#[test]
fn manifest_comments_are_ignored() {
    let (temp, project) = fake_project();
    write(temp.path(), "good.py", "#");
    write(temp.path(), "bad.py", "#");
    write(temp.path(), "#bad.py", "#");
    write(temp.path(), "MANIFEST", "# bad.py\n#bad.py\ngood.py\n");

    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.ensure_finalized().unwrap();
    let report = cmd.run().unwrap();
    assert_eq!(report.files, vec!["good.py"]);
}

#[test]
fn manual_manifest_is_used_and_left_alone() {
    let (temp, project) = fake_project();
    write(temp.path(), "README.manual", "This project maintains its MANIFEST file itself.");
    write(temp.path(), "MANIFEST", "README.manual");

    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.ensure_finalized().unwrap();
    let report = cmd.run().unwrap();

    assert!(!report.manifest_written);
    assert_eq!(manifest_lines(&temp.path().join("MANIFEST")), vec!["README.manual"]);

    let names = tar_names(&temp.path().join("dist/ns_fake_pkg-1.0.tar.gz"));
    assert_eq!(
        names,
        vec![
            "ns_fake_pkg-1.0/",
            "ns_fake_pkg-1.0/PKG-INFO",
            "ns_fake_pkg-1.0/README.manual",
        ]
    );
}

#[test]
fn manual_manifest_with_missing_entry_still_builds() {
    let (temp, project) = fake_project();
    write(temp.path(), "MANIFEST", "README\nsetup.py\nnot_there.txt\n");

    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.set_formats("gztar");
    cmd.ensure_finalized().unwrap();
    let report = cmd.run().unwrap();

    let skipped = report.diagnostics.filter(Severity::Warning, Source::Manifest);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].message, "'not_there.txt' not a regular file, skipping");
    assert_eq!(report.diagnostics.count(Severity::Info, Source::Manifest), 1);

    let names = tar_names(&temp.path().join("dist/ns_fake_pkg-1.0.tar.gz"));
    assert_eq!(
        names,
        vec![
            "ns_fake_pkg-1.0/",
            "ns_fake_pkg-1.0/PKG-INFO",
            "ns_fake_pkg-1.0/README",
            "ns_fake_pkg-1.0/setup.py",
        ]
    );
    assert_eq!(
        manifest_lines(&temp.path().join("MANIFEST")),
        vec!["README", "setup.py", "not_there.txt"]
    );
}

#[test]
fn pkg_info_is_generated_in_archive() {
    let (temp, project) = fake_project();
    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.set_formats("zip");
    cmd.ensure_finalized().unwrap();
    cmd.run().unwrap();

    let mut zip = zip::ZipArchive::new(File::open(temp.path().join("dist/ns_fake_pkg-1.0.zip")).unwrap()).unwrap();
    let mut content = String::new();
    std::io::Read::read_to_string(&mut zip.by_name("ns_fake_pkg-1.0/PKG-INFO").unwrap(), &mut content).unwrap();
    assert!(content.starts_with("Metadata-Version: 1.0\nName: ns.fake--pkg\nVersion: 1.0\n"));
    assert!(!temp.path().join("PKG-INFO").exists());
}

#[cfg(unix)]
#[test]
fn make_distribution_owner_group() {
    let (temp, project) = fake_project();

    let mut cmd = SdistCommand::new(temp.path(), project.clone());
    cmd.set_formats(vec!["gztar", "tar"]);
    cmd.configure(|o| {
        o.owner = Some("0".into());
        o.group = Some("0".into());
    });
    cmd.ensure_finalized().unwrap();
    cmd.run().unwrap();

    for name in ["ns_fake_pkg-1.0.tar", "ns_fake_pkg-1.0.tar.gz"] {
        let file = File::open(temp.path().join("dist").join(name)).unwrap();
        let reader: Box<dyn std::io::Read> = if name.ends_with(".gz") {
            Box::new(flate2::read::GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let mut archive = tar::Archive::new(reader);
        for entry in archive.entries().unwrap() {
            let entry = entry.unwrap();
            assert_eq!(entry.header().uid().unwrap(), 0);
            assert_eq!(entry.header().gid().unwrap(), 0);
        }
    }

    let mut cmd = SdistCommand::new(temp.path(), project);
    cmd.set_formats(vec!["gztar"]);
    cmd.ensure_finalized().unwrap();
    cmd.run().unwrap();

    // SAFETY: getuid has no preconditions.
    let uid = u64::from(unsafe { libc::getuid() });
    let file = File::open(temp.path().join("dist/ns_fake_pkg-1.0.tar.gz")).unwrap();
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
    for entry in archive.entries().unwrap() {
        assert_eq!(entry.unwrap().header().uid().unwrap(), uid);
    }
}

#[test]
fn unfinalized_run_fails() {
    let (temp, project) = fake_project();
    let mut cmd = SdistCommand::new(temp.path(), project);
    assert!(matches!(cmd.run(), Err(SrcpackError::NotFinalized { .. })));
}
