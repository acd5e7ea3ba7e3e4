//! UI sink that records everything for assertions.

use std::sync::{Mutex, PoisonError};

use crate::ui::{ConsoleUi, Notice, NoticeLevel, Route};

#[derive(Debug, Default)]
pub struct RecordingUi {
    notices: Mutex<Vec<Notice>>,
    navigations: Mutex<Vec<Route>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of notices at `level`.
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(NoticeLevel::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(NoticeLevel::Warning)
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NoticeLevel::Success)
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ConsoleUi for RecordingUi {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }

    fn navigate(&self, route: Route) {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
