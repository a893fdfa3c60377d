//! Console-backed notifier.

use colored::Colorize;
use storesync::{NoticeKind, Notifier};

/// Prints engine notices the way the userscript toasts did: info lines to
/// stdout, warnings and errors marked up on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
	fn notify(&self, kind: NoticeKind, text: &str) {
		match kind {
			NoticeKind::Info => println!("{text}"),
			NoticeKind::Warning => eprintln!("{} {text}", "warning:".yellow().bold()),
			NoticeKind::Error => eprintln!("{} {text}", "error:".red().bold()),
		}
	}
}
