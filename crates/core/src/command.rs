// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command file parsing
//!
//! A command file holds one line, `<verb> <group> <job-id>`, separated by
//! whitespace. Group and job identifiers are opaque.

use crate::id::{GroupId, JobId, JobKey};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 3 tokens (<verb> <group> <job-id>), found {found}")]
    WrongTokenCount { found: usize },

    #[error("unknown verb '{0}' (expected start or stop)")]
    UnknownVerb(String),
}

/// What a command asks the dispatcher to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Start,
    Stop,
}

impl FromStr for Verb {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Verb::Start),
            "stop" => Ok(Verb::Stop),
            other => Err(ParseError::UnknownVerb(other.to_string())),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Start => write!(f, "start"),
            Verb::Stop => write!(f, "stop"),
        }
    }
}

/// A parsed command, tied to the file it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub group: GroupId,
    pub job: JobId,
    pub source: PathBuf,
}

impl Command {
    /// Parse the content of a command file.
    ///
    /// Leading and trailing whitespace (including the trailing newline most
    /// editors add) is ignored.
    pub fn parse(line: &str, source: impl Into<PathBuf>) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [verb, group, job] = tokens.as_slice() else {
            return Err(ParseError::WrongTokenCount {
                found: tokens.len(),
            });
        };

        Ok(Self {
            verb: verb.parse()?,
            group: GroupId::new(*group),
            job: JobId::new(*job),
            source: source.into(),
        })
    }

    pub fn key(&self) -> JobKey {
        JobKey::from_parts(&self.group, &self.job)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.verb, self.group, self.job)
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
