//! Default file discovery.
//!
//! Files every source distribution carries without being named in a
//! manifest template: the README, the setup script, package modules,
//! package data, extension sources, scripts and data files.

use std::collections::BTreeSet;

use crate::config::{DataFile, ProjectConfig};
use crate::diagnostics::{Diagnostics, Source};
use crate::error::Result;
use crate::filelist::{translate_pattern, FileList};

/// README names tried in order; the first one present is used.
pub const READMES: &[&str] = &["README", "README.txt", "README.rst", "README.md"];

/// Files included when present.
const OPTIONAL: &[&str] = &["test/test*.py", "setup.cfg", "srcpack.yml"];

/// Add every default file of `project` to `filelist`.
pub fn add_defaults(project: &ProjectConfig, filelist: &mut FileList, diagnostics: &mut Diagnostics) -> Result<()> {
    add_standard_files(project, filelist, diagnostics);
    add_optional_files(filelist)?;

    let modules = package_modules(project, filelist);
    filelist.extend(modules.iter().cloned());
    add_py_modules(project, filelist, diagnostics);
    add_package_data(project, &modules, filelist)?;
    add_existing(
        project
            .extensions
            .iter()
            .flat_map(|ext| ext.sources.iter().chain(ext.depends.iter())),
        "extension source",
        filelist,
        diagnostics,
    );
    add_existing(project.scripts.iter(), "script", filelist, diagnostics);
    add_data_files(project, filelist);

    Ok(())
}

fn add_standard_files(project: &ProjectConfig, filelist: &mut FileList, diagnostics: &mut Diagnostics) {
    match READMES.iter().find(|name| filelist.root().join(name).is_file()) {
        Some(readme) => filelist.append(*readme),
        None => diagnostics.warn(
            Source::Defaults,
            format!("standard file not found: should have one of {}", READMES.join(", ")),
        ),
    }

    let script = project.script_name();
    if filelist.root().join(script).is_file() {
        filelist.append(script);
    } else {
        diagnostics.warn(Source::Defaults, format!("standard file '{}' not found", script));
    }
}

fn add_optional_files(filelist: &mut FileList) -> Result<()> {
    for pattern in OPTIONAL {
        let re = translate_pattern(Some(*pattern), true, None)?;
        filelist.include_matching(&re);
    }
    Ok(())
}

/// Directory holding `package`, honoring `package_dir`.
///
/// The longest mapped prefix of the dotted name wins; the remaining
/// components become subdirectories. An empty result is the project root.
pub fn package_dir(project: &ProjectConfig, package: &str) -> String {
    let parts: Vec<&str> = package.split('.').filter(|p| !p.is_empty()).collect();

    for split in (0..=parts.len()).rev() {
        let key = parts[..split].join(".");
        if let Some(mapped) = project.package_dir.get(&key) {
            let mut dir: Vec<&str> = vec![mapped.trim_matches('/')];
            dir.extend(&parts[split..]);
            return join_relative(&dir);
        }
    }

    join_relative(&parts)
}

fn join_relative(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty() && **p != ".")
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

fn in_dir(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// `*.py` files directly inside each declared package directory.
fn package_modules(project: &ProjectConfig, filelist: &mut FileList) -> Vec<String> {
    let dirs: BTreeSet<String> = project.packages.iter().map(|p| package_dir(project, p)).collect();

    filelist
        .find_all()
        .iter()
        .filter(|file| {
            let (dir, name) = match file.rfind('/') {
                Some(idx) => (&file[..idx], &file[idx + 1..]),
                None => ("", file.as_str()),
            };
            name.ends_with(".py") && dirs.contains(dir)
        })
        .cloned()
        .collect()
}

fn add_py_modules(project: &ProjectConfig, filelist: &mut FileList, diagnostics: &mut Diagnostics) {
    for module in &project.py_modules {
        let (package, name) = match module.rfind('.') {
            Some(idx) => (&module[..idx], &module[idx + 1..]),
            None => ("", module.as_str()),
        };
        let path = in_dir(&package_dir(project, package), &format!("{}.py", name));
        if filelist.root().join(&path).is_file() {
            filelist.append(path);
        } else {
            diagnostics.warn(
                Source::Defaults,
                format!("file {} (for module {}) not found", path, module),
            );
        }
    }
}

fn add_package_data(project: &ProjectConfig, modules: &[String], filelist: &mut FileList) -> Result<()> {
    let global = project.package_data.get("").cloned().unwrap_or_default();

    for package in &project.packages {
        let dir = package_dir(project, package);
        let patterns = global
            .iter()
            .chain(project.package_data.get(package).into_iter().flatten());

        for pattern in patterns {
            let re = translate_pattern(Some(in_dir(&dir, pattern).as_str()), true, None)?;
            let matched: Vec<String> = filelist
                .find_all()
                .iter()
                .filter(|f| re.is_match(f) && !modules.contains(f))
                .cloned()
                .collect();
            filelist.extend(matched);
        }
    }
    Ok(())
}

fn add_existing<'a>(
    paths: impl Iterator<Item = &'a String>,
    kind: &str,
    filelist: &mut FileList,
    diagnostics: &mut Diagnostics,
) {
    for path in paths {
        let path = path.replace('\\', "/");
        if filelist.root().join(&path).is_file() {
            filelist.append(path);
        } else {
            diagnostics.warn(Source::Defaults, format!("{} '{}' not found", kind, path));
        }
    }
}

/// Data files whose source is missing are dropped without a warning.
fn add_data_files(project: &ProjectConfig, filelist: &mut FileList) {
    for entry in &project.data_files {
        let sources: Vec<&String> = match entry {
            DataFile::Path(path) => vec![path],
            DataFile::Group(_, paths) => paths.iter().collect(),
        };
        for source in sources {
            let source = source.replace('\\', "/");
            if filelist.root().join(&source).is_file() {
                filelist.append(source);
            }
        }
    }
}
