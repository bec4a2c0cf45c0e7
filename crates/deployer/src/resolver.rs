//! Resolution of raw task tokens against a task's declared option schema.
//!
//! Each task declares its options as data; the resolver builds a
//! `clap::Command` from that schema on the fly and reduces the raw tokens
//! to a typed lookup. Unknown flags and missing values are rejected here,
//! before anything touches the network.

use std::collections::BTreeMap;

/// One declared option of a task.
#[derive(Clone, Copy, Debug)]
pub struct OptionSpec {
    pub name: &'static str,
    /// Short flag, e.g. `-m` for `--manager`.
    pub alias: Option<char>,
    /// Receives the first unflagged positional token. At most one option
    /// per schema may be marked as such.
    pub default_option: bool,
}

impl OptionSpec {
    pub const fn positional(name: &'static str) -> Self {
        Self {
            name,
            alias: None,
            default_option: true,
        }
    }

    pub const fn flag(name: &'static str, alias: char) -> Self {
        Self {
            name,
            alias: Some(alias),
            default_option: false,
        }
    }

    pub const fn long(name: &'static str) -> Self {
        Self {
            name,
            alias: None,
            default_option: false,
        }
    }
}

/// Typed view of the resolved tokens, one entry per declared option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedArgs(BTreeMap<&'static str, String>);

impl ResolvedArgs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl FromIterator<(&'static str, String)> for ResolvedArgs {
    fn from_iter<I: IntoIterator<Item = (&'static str, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("no task given")]
    MissingTask,
    #[error("unknown task {name:?}; known tasks: {}", known.join(", "))]
    UnknownTask {
        name: String,
        known: Vec<&'static str>,
    },
    #[error("{0}")]
    Invalid(#[from] clap::Error),
}

/// Parses raw tokens according to the schema. Pure; every declared option
/// is required and anything undeclared is an error.
pub fn resolve(
    options: &'static [OptionSpec],
    tokens: &[String],
) -> Result<ResolvedArgs, ResolutionError> {
    let mut command = clap::Command::new("task")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true);
    for option in options {
        let mut arg = clap::Arg::new(option.name)
            .value_name(option.name)
            .required(true);
        if !option.default_option {
            arg = arg.long(option.name);
            if let Some(alias) = option.alias {
                arg = arg.short(alias);
            }
        }
        command = command.arg(arg);
    }

    let matches = command.try_get_matches_from(tokens)?;
    Ok(options
        .iter()
        .filter_map(|option| {
            matches
                .get_one::<String>(option.name)
                .map(|value| (option.name, value.clone()))
        })
        .collect())
}
