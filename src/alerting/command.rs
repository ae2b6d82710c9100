use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::debug;

use super::{Alert, AlertError, Notifier};

/// Runs an external program for each alert, writing the rendered alert to
/// its standard input. The mention's name, the keyword, and the speaker are
/// passed in the environment as NOTIFYI_MENTION, NOTIFYI_KEYWORD, and
/// NOTIFYI_FROM.
pub struct CommandNotifier {
    argv: Vec<String>,
}

impl CommandNotifier {
    pub fn new(argv: Vec<String>) -> CommandNotifier {
        CommandNotifier { argv }
    }

    fn program(&self) -> &str {
        self.argv
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, alert: &Alert, rendered: &str) -> Result<(), AlertError> {
        let program = self.program();

        let mut child = Command::new(program)
            .args(self.argv.iter().skip(1))
            .env("NOTIFYI_MENTION", alert.mention)
            .env("NOTIFYI_KEYWORD", alert.keyword)
            .env("NOTIFYI_FROM", alert.from)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| AlertError::Spawn(program.to_string(), e))?;

        // Write the alert to the process's stdin, then close it so the
        // child sees end of input.
        if let Some(mut stdin) = child
            .stdin
            .take()
        {
            let written = stdin
                .write_all(rendered.as_bytes())
                .and_then(|_| stdin.write_all(b"\n"));

            // a program that exits without reading its input is fine; its
            // exit status decides the outcome
            match written {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                    return Err(AlertError::Spawn(program.to_string(), e));
                }
                _ => {}
            }
        }

        let status = child
            .wait()
            .map_err(|e| AlertError::Spawn(program.to_string(), e))?;

        debug!("Process exited: {:?}", status);

        if status.success() {
            Ok(())
        } else {
            Err(AlertError::Failed(program.to_string(), status.code()))
        }
    }
}
