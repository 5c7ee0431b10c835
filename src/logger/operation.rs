//! Operation lifecycle logging.
//!
//! An operation is a unit of work narrated as
//! `op(<id>): [started] ...` followed by either `[finished]` at info or
//! `[failed]` at crit. Ids are per-logger, lowercase hex, starting at 1.

use std::fmt;

use super::Logger;

pub const STARTED: &str = "[started]";
pub const FINISHED: &str = "[finished]";
pub const FAILED: &str = "[failed]";

impl Logger {
    /// Run `action` as a logged operation described by `args`.
    ///
    /// The action receives this logger with an `op(<id>)` prefix pushed, so
    /// anything it logs (including nested operations) carries the id. The
    /// prefix is popped on every exit path. The action's result is returned
    /// unchanged; on error one crit line `[failed] <description>: <error>`
    /// is written first.
    pub fn log_op<T, E, F>(&mut self, action: F, args: fmt::Arguments<'_>) -> Result<T, E>
    where
        F: FnOnce(&mut Logger) -> Result<T, E>,
        E: fmt::Display,
    {
        self.op_seq += 1;
        let id = self.op_seq;
        let description = args.to_string();

        let mut scope = self.scoped_prefix(format_args!("op({:x})", id));
        let _ = scope.info(format_args!("{} {}", STARTED, description));

        match action(&mut *scope) {
            Ok(value) => {
                let _ = scope.info(format_args!("{} {}", FINISHED, description));
                Ok(value)
            }
            Err(err) => {
                let _ = scope.crit(format_args!("{} {}: {}", FAILED, description, err));
                Err(err)
            }
        }
    }
}
