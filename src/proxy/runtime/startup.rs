use std::process::ExitCode;

use anyhow::Error;

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: Option<String>,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: Some(format!("{err:?}")),
            exit_code: ExitCode::FAILURE,
        }
    }

    /// Propagate a child's exit code without an extra message.
    pub fn from_child_code(code: i32) -> Self {
        let code = u8::try_from(code).unwrap_or(1);
        Self {
            message: None,
            exit_code: ExitCode::from(code),
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(message) = self.message {
            eprintln!("{message}");
        }
        self.exit_code
    }
}
