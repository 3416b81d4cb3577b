use crate::error::{MammoconvError, Result};
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of one external program run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// First whitespace-delimited token of stdout
    pub fn first_stdout_token(&self) -> Option<&str> {
        self.stdout.split_whitespace().next()
    }
}

/// Runs external programs on behalf of the conversion pipeline
///
/// Implementations block until the program exits.
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ProcessOutput>;
}

/// Runs programs as child processes with captured output
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ProcessOutput> {
        debug!("Running {} {:?}", program.display(), args);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| MammoconvError::ToolLaunch {
                program: program.to_path_buf(),
                source,
            })?;

        let result = ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!("{} exited with {:?}", program.display(), result.status);

        Ok(result)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ProcessOutput> {
        (**self).run(program, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_stdout_token() {
        let output = ProcessOutput {
            status: Some(0),
            stdout: "  /tmp/A_1234_1.LEFT_CC.LJPEG.1-ddsmraw2pnm.pnm written\n".to_string(),
            stderr: String::new(),
        };
        assert!(output.success());
        assert_eq!(
            output.first_stdout_token(),
            Some("/tmp/A_1234_1.LEFT_CC.LJPEG.1-ddsmraw2pnm.pnm")
        );

        let empty = ProcessOutput::default();
        assert!(!empty.success());
        assert_eq!(empty.first_stdout_token(), None);
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let result = SystemRunner.run(Path::new("/nonexistent/mammoconv-tool"), &[]);
        assert!(matches!(result, Err(MammoconvError::ToolLaunch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_output() {
        let args: Vec<OsString> = vec!["-c".into(), "echo out; echo err >&2; exit 3".into()];
        let output = SystemRunner.run(Path::new("sh"), &args).unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
        assert!(!output.success());
    }
}
