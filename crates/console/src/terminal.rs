//! Terminal rendition of the console UI.

use manga_admin_core::{ConsoleUi, Notice, NoticeLevel, Route};
use tracing::debug;

/// Prints notices to stderr, keeping stdout for command output.
#[derive(Debug, Default)]
pub struct TerminalUi;

impl ConsoleUi for TerminalUi {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", format_notice(&notice));
    }

    fn navigate(&self, route: Route) {
        match route {
            Route::Login => eprintln!("请先登录: manga-admin login <username>"),
            Route::Catalog => debug!("Navigate to {}", route.path()),
        }
    }
}

pub fn format_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warn",
        NoticeLevel::Error => "error",
    };
    format!("[{}] {}", tag, notice.message)
}
