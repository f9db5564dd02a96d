use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use reqwest::Url;
use std::fmt;

/// Name of the page query parameter carrying the tenant identifier.
pub const HOST_PARAM: &str = "host";

const SHOP_SUFFIX: &str = ".myshopify.com";
const ADMIN_STORE_PREFIX: &str = "admin.shopify.com/store/";

/// The opaque per-shop "host" value the platform appends to the app URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(value: impl Into<String>) -> Self {
        TenantId(value.into())
    }

    /// Reads the `host` query parameter from a page URL.
    ///
    /// Returns `None` when the URL cannot be parsed or has no `host` parameter.
    /// A parameter without a value yields an empty identifier.
    pub fn from_page_url(page_url: &str) -> Option<Self> {
        let url = Url::parse(page_url).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == HOST_PARAM)
            .map(|(_, value)| TenantId(value.into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Best-effort decoding of the shop domain behind the identifier.
    ///
    /// The host value is the base64 form of the shop's admin URL, either
    /// `admin.shopify.com/store/<name>` or `<name>.myshopify.com/admin`.
    /// Only used for log context; the identifier itself stays opaque.
    pub fn shop_domain(&self) -> Option<String> {
        let bytes = STANDARD
            .decode(self.0.as_bytes())
            .or_else(|_| STANDARD_NO_PAD.decode(self.0.as_bytes()))
            .ok()?;
        let decoded = String::from_utf8(bytes).ok()?;

        if let Some((_, rest)) = decoded.split_once(ADMIN_STORE_PREFIX) {
            let store = rest.split('/').next().unwrap_or_default();
            if store.is_empty() {
                return None;
            }
            return Some(format!("{}{}", store, SHOP_SUFFIX));
        }

        if decoded.contains(SHOP_SUFFIX) {
            let without_scheme = match decoded.find("://") {
                Some(idx) => &decoded[idx + 3..],
                None => decoded.as_str(),
            };
            let domain = without_scheme.split('/').next().unwrap_or_default();
            return Some(domain.to_string());
        }

        None
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
