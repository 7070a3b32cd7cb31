//! Expansion of `@file` tokens in the raw argument list.
//!
//! A token of the form `@path` is replaced by the lines of the file at
//! `path`, one argument per line. Argument files may reference further
//! argument files.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use log::debug;

use av1transcoder_core::CoreError;

use crate::error::{CliErrorContext, CliResult};

/// Marks a token as a reference to an argument file.
pub const ARGUMENT_FILE_PREFIX: char = '@';

/// Expands every `@path` token after the program name.
///
/// Blank lines in argument files are skipped. A file that includes itself,
/// directly or through other files, is an error.
pub fn expand_argument_files<I, T>(args: I) -> CliResult<Vec<OsString>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut expanded = Vec::new();
    expanded.extend(args.next());

    let mut open_files = Vec::new();
    for arg in args {
        expand_into(arg, &mut expanded, &mut open_files)?;
    }
    Ok(expanded)
}

fn expand_into(arg: OsString, expanded: &mut Vec<OsString>, open_files: &mut Vec<PathBuf>) -> CliResult<()> {
    let Some(path) = argument_file_path(&arg) else {
        expanded.push(arg);
        return Ok(());
    };

    let identity = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
    if open_files.contains(&identity) {
        return Err(CoreError::ArgumentFile {
            path,
            message: "the file includes itself".to_string(),
        });
    }

    let contents = fs::read_to_string(&path)
        .cli_with_context(|| format!("Cannot read argument file '{}'", path.display()))?;
    debug!("Reading arguments from {}", path.display());

    open_files.push(identity);
    for line in contents.lines().filter(|line| !line.is_empty()) {
        expand_into(OsString::from(line), expanded, open_files)?;
    }
    open_files.pop();
    Ok(())
}

fn argument_file_path(arg: &OsString) -> Option<PathBuf> {
    arg.to_str()?
        .strip_prefix(ARGUMENT_FILE_PREFIX)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}
