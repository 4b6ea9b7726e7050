//! User-facing notifications.
//!
//! The tool reports everything (usage, bad input, success, failure) through
//! this trait rather than exit codes, so a GUI build can swap the console
//! renderer for native message boxes without touching the transform.

/// A modal, titled message with one of two severities.
pub trait Notifier {
    fn info(&self, title: &str, body: &str);
    fn error(&self, title: &str, body: &str);
}

/// Renders notifications on the terminal: info to stdout, errors to stderr.
pub struct Console;

impl Notifier for Console {
    fn info(&self, title: &str, body: &str) {
        info!("{}", title);
        println!("{}\n{}", title, body);
    }

    fn error(&self, title: &str, body: &str) {
        warn!("{}", title);
        eprintln!("{}\n{}", title, body);
    }
}
