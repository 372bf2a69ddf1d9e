// Tab selection kept in sync with the URL fragment

#[derive(Debug, Clone)]
pub struct TabNavigator {
    tabs: Vec<String>,
    active: usize,
    scroll_top: u32,
}

impl TabNavigator {
    /// Restore the active tab from a fragment such as `#loadtest`, falling back to the first tab
    pub fn restore(tabs: Vec<String>, fragment: Option<&str>) -> Self {
        let active = fragment
            .map(|f| f.trim_start_matches('#'))
            .and_then(|id| tabs.iter().position(|t| t == id))
            .unwrap_or(0);
        Self {
            tabs,
            active,
            scroll_top: 0,
        }
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn active(&self) -> Option<&str> {
        self.tabs.get(self.active).map(String::as_str)
    }

    pub fn fragment(&self) -> Option<String> {
        self.active().map(|id| format!("#{}", id))
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn remember_scroll(&mut self, scroll_top: u32) {
        self.scroll_top = scroll_top;
    }

    /// Activate a tab and return its fragment; the scroll position is kept
    pub fn select(&mut self, tab: &str) -> Option<String> {
        let index = self.tabs.iter().position(|t| t == tab)?;
        self.active = index;
        self.fragment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> Vec<String> {
        vec!["loadtest".to_string(), "smoketest".to_string()]
    }

    #[test]
    fn test_restore_from_fragment() {
        let nav = TabNavigator::restore(tabs(), Some("#smoketest"));
        assert_eq!(nav.active(), Some("smoketest"));
    }

    #[test]
    fn test_restore_defaults_to_first_tab() {
        assert_eq!(TabNavigator::restore(tabs(), None).active(), Some("loadtest"));
        assert_eq!(TabNavigator::restore(tabs(), Some("#nope")).active(), Some("loadtest"));
    }

    #[test]
    fn test_select_updates_fragment_and_keeps_scroll() {
        let mut nav = TabNavigator::restore(tabs(), None);
        nav.remember_scroll(420);
        assert_eq!(nav.select("smoketest"), Some("#smoketest".to_string()));
        assert_eq!(nav.fragment(), Some("#smoketest".to_string()));
        assert_eq!(nav.scroll_top(), 420);
        assert_eq!(nav.select("unknown"), None);
        assert_eq!(nav.active(), Some("smoketest"));
    }
}
