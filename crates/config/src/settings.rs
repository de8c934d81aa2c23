use crate::globals::HostGlobals;
use url::Url;

/// Fully resolved settings; every field is guaranteed present and valid.
///
/// Only obtainable through [`HostGlobals::resolve`], so holding a `Settings`
/// is proof that the feature is allowed to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute URL of the revisions API namespace.
    pub api_base: Url,
    /// Opaque token sent with every API request.
    pub api_nonce: String,
    /// Number of revisions requested per page.
    pub per_page: u32,
    /// The post whose revisions are listed.
    pub post_id: u64,
    /// CSS selector of the content marker element.
    pub marker_selector: String,
}

impl HostGlobals {
    /// Validates the globals, returning `None` if anything required is
    /// missing or unusable.
    ///
    /// This is deliberately quiet: an incomplete configuration means the
    /// feature is not meant to be active for this page, which isn't an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use post_history_config::{HostGlobals, Scalar};
    ///
    /// let mut globals = HostGlobals::server_defaults();
    /// assert!(globals.resolve().is_none());
    ///
    /// globals.api_base = Some("https://example.com/wp-json/post-history/v1".to_string());
    /// globals.api_nonce = Some("abc123".to_string());
    /// globals.post_id = Some(Scalar::from("42"));
    /// let settings = globals.resolve().unwrap();
    /// assert_eq!(settings.post_id, 42);
    /// assert_eq!(settings.per_page, 3);
    /// ```
    pub fn resolve(&self) -> Option<Settings> {
        let api_base = Url::parse(self.api_base.as_deref()?).ok()?;
        let api_nonce = self.api_nonce.clone()?;
        let per_page = self
            .per_page_default
            .as_ref()?
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)?;
        let post_id = self.post_id.as_ref()?.as_u64()?;
        let marker_selector = self.marker_selector.clone()?;
        Some(Settings {
            api_base,
            api_nonce,
            per_page,
            post_id,
            marker_selector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globals::Scalar;
    use rstest::rstest;

    fn complete() -> HostGlobals {
        HostGlobals {
            api_base: Some("https://example.com/wp-json/post-history/v1".to_string()),
            api_nonce: Some("abc123".to_string()),
            per_page_default: Some(Scalar::Int(3)),
            post_id: Some(Scalar::from("42")),
            marker_selector: Some("[data-hm-post-history-content]".to_string()),
        }
    }

    #[test]
    fn test_resolve_complete() {
        let settings = complete().resolve().unwrap();
        assert_eq!(settings.api_base.as_str(), "https://example.com/wp-json/post-history/v1");
        assert!(settings.api_base.path().ends_with(crate::REST_NAMESPACE));
        assert_eq!(settings.api_nonce, "abc123");
        assert_eq!(settings.per_page, 3);
        assert_eq!(settings.post_id, 42);
        assert_eq!(settings.marker_selector, "[data-hm-post-history-content]");
    }

    #[rstest]
    #[case::api_base(|g: &mut HostGlobals| g.api_base = None)]
    #[case::api_nonce(|g: &mut HostGlobals| g.api_nonce = None)]
    #[case::per_page(|g: &mut HostGlobals| g.per_page_default = None)]
    #[case::post_id(|g: &mut HostGlobals| g.post_id = None)]
    #[case::marker(|g: &mut HostGlobals| g.marker_selector = None)]
    #[case::relative_api_base(|g: &mut HostGlobals| g.api_base = Some("/wp-json/post-history/v1".to_string()))]
    #[case::zero_per_page(|g: &mut HostGlobals| g.per_page_default = Some(Scalar::Int(0)))]
    #[case::nan_post_id(|g: &mut HostGlobals| g.post_id = Some(Scalar::from("abc")))]
    fn test_resolve_incomplete(#[case] break_it: fn(&mut HostGlobals)) {
        let mut globals = complete();
        break_it(&mut globals);
        assert_eq!(globals.resolve(), None);
    }
}
