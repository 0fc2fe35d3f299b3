//! `ytthumb process` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use ytthumb_core::{Content, ThumbnailReplacer, ThumbnailSource};

use super::{CommonArgs, print_settings, replacer_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the process command.
#[derive(Args)]
pub(crate) struct ProcessArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// HTML files or directories to process (default: the output directory).
    paths: Vec<PathBuf>,
}

/// Result of processing one file.
#[derive(Debug, PartialEq, Eq)]
enum FileOutcome {
    /// Directives were replaced; holds the number of rewrites applied.
    Rewritten(usize),
    /// Document without directives.
    Unchanged,
    /// Not valid UTF-8, left alone.
    Static,
}

impl ProcessArgs {
    /// Execute the process command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any file cannot be processed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        print_settings(&output, &config);

        let roots = if self.paths.is_empty() {
            vec![config.output_path.clone()]
        } else {
            self.paths
        };
        let files = collect_html_files(&roots)?;
        if files.is_empty() {
            output.warning("No HTML files found");
            return Ok(());
        }

        let replacer = replacer_from_config(&config);
        let mut rewritten_files = 0;
        let mut rewrites = 0;

        for file in &files {
            match process_file(&replacer, file)? {
                FileOutcome::Rewritten(count) => {
                    rewritten_files += 1;
                    rewrites += count;
                    output.info(&format!("{}: {count} video(s)", file.display()));
                }
                FileOutcome::Unchanged => {}
                FileOutcome::Static => {
                    output.warning(&format!("{}: not UTF-8, skipped", file.display()));
                }
            }
        }

        output.success(&format!(
            "Replaced {rewrites} directive(s) in {rewritten_files} of {} file(s)",
            files.len()
        ));
        Ok(())
    }
}

/// Expand directories into the HTML files below them, keeping files as given.
fn collect_html_files(roots: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_dir() {
            let pattern = format!(
                "{}/**/*.html",
                glob::Pattern::escape(&root.to_string_lossy())
            );
            for entry in glob::glob(&pattern)? {
                files.push(entry?);
            }
        } else {
            files.push(root.clone());
        }
    }
    Ok(files)
}

/// Replace directives in a single file, writing it back only if it changed.
fn process_file<S: ThumbnailSource>(
    replacer: &ThumbnailReplacer<S>,
    path: &Path,
) -> Result<FileOutcome, CliError> {
    let Content::Document(mut html) = Content::from_bytes(std::fs::read(path)?) else {
        return Ok(FileOutcome::Static);
    };

    let rewrites = replacer
        .rewrites(&html)
        .map_err(|source| CliError::Thumbnail {
            path: path.to_path_buf(),
            source,
        })?;
    if rewrites.is_empty() {
        return Ok(FileOutcome::Unchanged);
    }

    let applied = rewrites.apply(&mut html);
    if applied == 0 {
        return Ok(FileOutcome::Unchanged);
    }
    std::fs::write(path, html)?;
    tracing::info!(path = %path.display(), applied, "rewrote page");
    Ok(FileOutcome::Rewritten(applied))
}
