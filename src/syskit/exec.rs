use crate::utils::error::{KitError, Result};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::debug;

const QUOTES: &[char] = &['"', '\'', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '«', '»'];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub lines: Vec<String>,
    pub last_line: String,
    /// Exit code. A process killed by a signal reports 1.
    pub status: i32,
}

impl ExecOutput {
    fn new(output: &str, status: ExitStatus) -> Self {
        let trimmed = output.trim_end_matches('\n');
        let lines: Vec<String> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('\n').map(str::to_string).collect()
        };
        Self {
            last_line: lines.last().cloned().unwrap_or_default(),
            lines,
            status: status.code().unwrap_or(1),
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Split on whitespace outside quotes, then drop a matching pair of
/// surrounding `"` or `'` from each word.
///
/// `/bin/sh -c "ls -a"` gives `["/bin/sh", "-c", "ls -a"]`.
pub fn split_command(command: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in command.chars() {
        match quote {
            Some(q) if ch == q => {
                quote = None;
                current.push(ch);
            }
            Some(_) => current.push(ch),
            None if QUOTES.contains(&ch) => {
                quote = Some(ch);
                current.push(ch);
            }
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            None => current.push(ch),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .into_iter()
        .map(|word| {
            let quoted = word.len() >= 2
                && ((word.starts_with('"') && word.ends_with('"'))
                    || (word.starts_with('\'') && word.ends_with('\'')));
            if quoted {
                word[1..word.len() - 1].to_string()
            } else {
                word
            }
        })
        .collect()
}

fn command_for(line: &str) -> Result<Command> {
    let words = split_command(line);
    let (program, args) = words
        .split_first()
        .ok_or_else(|| KitError::invalid_argument("empty command"))?;
    let mut command = Command::new(program);
    command.args(args);
    Ok(command)
}

fn spawn_error(program: &str, e: io::Error) -> KitError {
    KitError::CommandError {
        message: format!("{}: {}", program, e),
    }
}

/// Run `name` with `params`. Returns the command line and its stdout.
pub fn exec_sys_cmd(name: &str, params: &[&str]) -> Result<(String, String)> {
    let output = Command::new(name)
        .args(params)
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| spawn_error(name, e))?;

    let command_line = std::iter::once(name)
        .chain(params.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!("{} exited with {}", command_line, output.status);
    Ok((command_line, String::from_utf8_lossy(&output.stdout).into_owned()))
}

/// Run `command` and capture its output, stderr after stdout.
///
/// A command that cannot start is an error. A command that fails still
/// returns its output with a non-zero status.
pub fn exec(command: &str) -> Result<ExecOutput> {
    let output = command_for(command)?
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(command, e))?;
    debug!("'{}' exited with {}", command, output.status);

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(ExecOutput::new(&combined, output.status))
}

fn tee<R, W>(source: R, mut sink: W, buffer: Arc<Mutex<String>>) -> thread::JoinHandle<io::Result<()>>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            sink.write_all(line.as_bytes())?;
            sink.flush()?;
            if let Ok(mut buffer) = buffer.lock() {
                buffer.push_str(&line);
            }
            line.clear();
        }
        Ok(())
    })
}

/// Run `command`, echoing its output to this process's stdout and stderr
/// while also collecting it.
pub fn system(command: &str) -> Result<ExecOutput> {
    let mut child = command_for(command)?
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(command, e))?;

    let buffer = Arc::new(Mutex::new(String::new()));
    let mut copiers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        copiers.push(tee(stdout, io::stdout(), buffer.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        copiers.push(tee(stderr, io::stderr(), buffer.clone()));
    }

    let status = child.wait()?;
    for copier in copiers {
        copier
            .join()
            .map_err(|_| KitError::CommandError {
                message: format!("output copier for '{}' panicked", command),
            })??;
    }

    let collected = buffer.lock().map(|b| b.clone()).unwrap_or_default();
    Ok(ExecOutput::new(&collected, status))
}

/// Run `command` attached to this process's stdio. Returns the exit code.
pub fn passthru(command: &str) -> Result<i32> {
    let status = command_for(command)?
        .status()
        .map_err(|e| spawn_error(command, e))?;
    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("ls -a  -l"), vec!["ls", "-a", "-l"]);
        assert_eq!(
            split_command("/bin/sh -c \"ls -a\""),
            vec!["/bin/sh", "-c", "ls -a"]
        );
        assert_eq!(split_command("echo 'a b' c"), vec!["echo", "a b", "c"]);
        assert_eq!(split_command("grep \"x y\"z"), vec!["grep", "\"x y\"z"]);
        assert!(split_command("   ").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_collects_lines() {
        let out = exec("printf 'one\\ntwo\\n'").unwrap();
        assert_eq!(out.lines, vec!["one", "two"]);
        assert_eq!(out.last_line, "two");
        assert!(out.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_merges_stderr_and_reports_status() {
        let out = exec("sh -c 'echo oops >&2; exit 3'").unwrap();
        assert_eq!(out.last_line, "oops");
        assert_eq!(out.status, 3);
    }

    #[test]
    fn test_exec_errors() {
        assert!(matches!(exec(""), Err(KitError::InvalidArgument { .. })));
        assert!(matches!(
            exec("definitely-not-a-real-binary-4821"),
            Err(KitError::CommandError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_sys_cmd() {
        let (line, stdout) = exec_sys_cmd("echo", &["hello", "world"]).unwrap();
        assert_eq!(line, "echo hello world");
        assert_eq!(stdout, "hello world\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_and_passthru() {
        let out = system("sh -c 'echo first; echo last'").unwrap();
        assert_eq!(out.last_line, "last");
        assert_eq!(out.status, 0);

        assert_eq!(passthru("true").unwrap(), 0);
        assert_eq!(passthru("false").unwrap(), 1);
    }
}
