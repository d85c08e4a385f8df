use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("pattern {pattern} is declared twice ({first} and {duplicate})")]
    DuplicatePattern {
        pattern: String,
        first: String,
        duplicate: String,
    },
    #[error("node under {parent:?} has an empty path segment")]
    EmptySegment { parent: String },
    #[error("failed to read tree file {path}: {source}")]
    TreeFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tree file {path}: {source}")]
    TreeParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type NavResult<T> = Result<T, NavError>;
