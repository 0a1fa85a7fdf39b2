//! Startup report of the served build artifacts.

use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One built artifact and the HTML needed to include it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    pub location: String,
    pub import_suggestion: String,
}

/// Lists every served build artifact with its public URL and an HTML
/// inclusion suggestion. Source maps are omitted; browsers find them
/// through the bundle's footer comment.
pub fn served_files(build_dir: &Path, serve_origin: &str) -> io::Result<Vec<ServedFile>> {
    let mut paths = Vec::new();
    collect_files(build_dir, &mut paths)?;
    paths.sort();

    Ok(paths
        .into_iter()
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) != Some("map"))
        .filter_map(|path| {
            let relative = path.strip_prefix(build_dir).ok()?;
            let mut location = serve_origin.trim_end_matches('/').to_string();
            for component in relative.components() {
                location.push('/');
                location.push_str(&component.as_os_str().to_string_lossy());
            }
            let import_suggestion = if location.ends_with(".css") {
                format!(r#"<link href="{location}" rel="stylesheet" type="text/css"/>"#)
            } else {
                format!(r#"<script defer src="{location}"></script>"#)
            };
            Some(ServedFile {
                location,
                import_suggestion,
            })
        })
        .collect())
}

fn collect_files(dir: &Path, paths: &mut Vec<PathBuf>) -> io::Result<()> {
    for dir_entry in fs::read_dir(dir)? {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if dir_entry.file_type()?.is_dir() {
            collect_files(&path, paths)?;
        } else {
            paths.push(path);
        }
    }
    Ok(())
}

/// Prints the served-files table shown after dev startup.
pub fn print_served_files(build_dir: &Path, serve_origin: &str) -> io::Result<()> {
    let files = served_files(build_dir, serve_origin)?;
    if files.is_empty() {
        println!("{}", "No build output to serve yet.".yellow());
        return Ok(());
    }

    println!("{}", "Serving build output:".bold());
    for file in &files {
        println!("  {}", file.location.cyan());
        println!("    {}", file.import_suggestion.dimmed());
    }
    Ok(())
}
