//! Shell quoting for tokens embedded in `/bin/sh -c` command strings.

use std::{borrow::Cow, path::Path};

use crate::lib::errors::LaunchError;

/// Quote a single token so that `sh` parses it back to the same literal.
pub fn quote(argument: &str) -> Result<Cow<'_, str>, LaunchError> {
    shlex::try_quote(argument).map_err(|_| LaunchError::UnquotableArgument {
        argument: argument.to_string(),
    })
}

/// Quote every token and join them with single spaces.
pub fn join<'a, I>(arguments: I) -> Result<String, LaunchError>
where
    I: IntoIterator<Item = &'a str>,
{
    let quoted = arguments
        .into_iter()
        .map(quote)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join(" "))
}

/// Borrow a path as UTF-8 so it can be placed in an argument vector.
pub fn path_str(path: &Path) -> Result<&str, LaunchError> {
    path.to_str().ok_or_else(|| LaunchError::UnquotablePath {
        path: path.to_path_buf(),
    })
}
