//! Route changes requested by pages.

use std::sync::Mutex;
use tracing::debug;

/// Collaborator that moves the user to another route.
pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);
}

/// In-memory navigation history. The last pushed route is the current one.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Navigator for History {
    fn push(&self, route: &str) {
        debug!(route, "Navigate");
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_tracks_current_route() {
        let history = History::new();
        assert_eq!(history.current(), None);
        history.push("/requirements");
        history.push("/success");
        assert_eq!(history.current().as_deref(), Some("/success"));
        assert_eq!(history.entries(), vec!["/requirements", "/success"]);
    }
}
