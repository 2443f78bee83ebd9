//! Image thumbnail URL resolution.

/// Default thumbnail edge length in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 256;

/// Maps an image attachment URL to the URL of its thumbnail.
pub trait ThumbnailResolver {
    fn thumbnail_url(&self, src: &str) -> String;
}

/// Rewrites workspace asset URLs to the server's thumbnail endpoint:
/// `<server>/workspace/...` becomes `<server>/thumbnail/workspace/...?size=N`.
/// External URLs are returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultThumbnailResolver {
    /// Server prefix that marks internal assets. `None` treats any
    /// `/workspace/` URL as internal.
    pub server: Option<String>,
    pub size: u32,
}

impl Default for DefaultThumbnailResolver {
    fn default() -> Self {
        Self {
            server: None,
            size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl DefaultThumbnailResolver {
    fn is_internal(&self, src: &str) -> bool {
        let on_server = self
            .server
            .as_deref()
            .is_none_or(|server| src.starts_with(server.trim_end_matches('/')));
        on_server && src.contains("/workspace/")
    }
}

impl ThumbnailResolver for DefaultThumbnailResolver {
    fn thumbnail_url(&self, src: &str) -> String {
        if !self.is_internal(src) {
            return src.to_string();
        }
        format!(
            "{}?size={}",
            src.replacen("/workspace/", "/thumbnail/workspace/", 1),
            self.size
        )
    }
}
