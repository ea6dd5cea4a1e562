use crate::models::browser::Browser;

/// Read-only view of the browsers installed on this machine.
pub trait BrowserRegistry: Send + Sync {
    /// Looks up a previously detected browser.
    ///
    /// # Returns
    /// * `Some(Browser)` - if detection found it.
    /// * `None` - if the id is unknown or detection is stale.
    fn get_browser_by_id(&self, id: &str) -> Option<Browser>;
}
