//! Package name helpers.

use super::id::PackageName;

impl PackageName {
    /// Returns the package name with its last dot-separated segment removed.
    ///
    /// This is used as a stand-in developer identifier when no explicit one
    /// is known. Returns `None` when the name has no dot or the remaining
    /// prefix would be empty.
    ///
    /// ## Examples
    ///
    /// ```
    /// use market_link_core::PackageName;
    ///
    /// let package = PackageName::new("com.example.app").unwrap();
    /// assert_eq!(package.developer_prefix(), Some("com.example"));
    ///
    /// let package = PackageName::new("evernote").unwrap();
    /// assert_eq!(package.developer_prefix(), None);
    /// ```
    #[must_use]
    pub fn developer_prefix(&self) -> Option<&str> {
        let (prefix, _) = self.as_str().rsplit_once('.')?;
        if prefix.is_empty() {
            None
        } else {
            Some(prefix)
        }
    }
}
