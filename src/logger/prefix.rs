//! Prefix stack handling.

use std::fmt::{self, Write as _};
use std::ops::{Deref, DerefMut};

use super::Logger;

/// Appended to every prefix when composing a message.
pub const PREFIX_SEPARATOR: &str = ":";

impl Logger {
    /// Push a formatted label onto the prefix stack.
    ///
    /// Labels are prepended to every later message, outermost first.
    pub fn push_prefix(&mut self, args: fmt::Arguments<'_>) {
        self.prefixes.push(args.to_string());
    }

    /// Drop the most recently pushed label.
    ///
    /// Popping an empty stack is a no-op that logs one debug line.
    pub fn pop_prefix(&mut self) {
        if self.prefixes.pop().is_none() {
            let _ = self.debug(format_args!("popped from empty stack"));
        }
    }

    /// Current labels, outermost first.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Push a label that is popped again when the returned guard drops.
    ///
    /// The guard derefs to the logger, so everything inside the scope logs
    /// (and nests further scopes) through it.
    pub fn scoped_prefix(&mut self, args: fmt::Arguments<'_>) -> PrefixGuard<'_> {
        self.push_prefix(args);
        PrefixGuard { logger: self }
    }

    /// `"<p1>: <p2>: <message>"` for the current stack.
    pub(crate) fn compose(&self, args: fmt::Arguments<'_>) -> String {
        let mut line = String::new();
        for prefix in &self.prefixes {
            line.push_str(prefix);
            line.push_str(PREFIX_SEPARATOR);
            line.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = line.write_fmt(args);
        line
    }
}

/// Scoped prefix returned by [`Logger::scoped_prefix`].
///
/// Pops its label on drop, including during unwinding.
pub struct PrefixGuard<'a> {
    logger: &'a mut Logger,
}

impl Deref for PrefixGuard<'_> {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &*self.logger
    }
}

impl DerefMut for PrefixGuard<'_> {
    fn deref_mut(&mut self) -> &mut Logger {
        &mut *self.logger
    }
}

impl Drop for PrefixGuard<'_> {
    fn drop(&mut self) {
        self.logger.pop_prefix();
    }
}
