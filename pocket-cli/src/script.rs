//! Key-script loader.
//!
//! ## Format
//!
//! A key script lists calculator keys separated by whitespace, any number per
//! line. Everything after `#` on a line is a comment; blank lines are
//! skipped. Key names are the ones accepted by [`Action::from_key`].
//!
//! ```text
//! # 2 + 3, then times 4
//! 2 + 3
//! * 4 Enter
//! ```
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
};

use pocket_core::{Action, calculator::ParseActionError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a key script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("cannot open script '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {0}")]
    Read(#[from] io::Error),

    /// A key had no binding. `line` is 1-based.
    #[error("line {line}: {source}")]
    UnknownKey {
        line: usize,
        #[source]
        source: ParseActionError,
    },
}

/// Parses a script from any reader.
pub fn parse<R: Read>(reader: R) -> Result<Vec<Action>, ScriptError> {
    let mut actions = Vec::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let code = line.split('#').next().unwrap_or_default();
        for key in code.split_whitespace() {
            let action = Action::from_key(key).map_err(|source| ScriptError::UnknownKey {
                line: index + 1,
                source,
            })?;
            actions.push(action);
        }
    }

    debug!(count = actions.len(), "parsed key script");
    Ok(actions)
}

/// Parses a script from a string.
pub fn parse_str(text: &str) -> Result<Vec<Action>, ScriptError> {
    parse(text.as_bytes())
}

/// Opens `path` and parses it.
pub fn load_from_file(path: &Path) -> Result<Vec<Action>, ScriptError> {
    let file = File::open(path).map_err(|source| ScriptError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse(file)
}
