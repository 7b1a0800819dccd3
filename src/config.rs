use std::time::Duration;

use url::Url;

pub const DEFAULT_USER: &str = "UJ4D3rYAAAAJ";
pub const DEFAULT_HOST: &str = "https://scholar.google.com";
pub const DEFAULT_OWNER: &str = "D Morelli";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Which profile to scrape and how to reach it.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: String,
    /// Scheme and host, e.g. `https://scholar.google.com`. Also the prefix of every record URL.
    pub host: String,
    pub page_size: u32,
    pub timeout: Duration,
    /// Shown in the placeholder record.
    pub owner: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            user: DEFAULT_USER.to_string(),
            host: DEFAULT_HOST.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            owner: DEFAULT_OWNER.to_string(),
        }
    }
}

impl Profile {
    /// Host with any trailing slash removed, ready for plain concatenation with a relative link.
    pub fn host_prefix(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// The listing page: first `page_size` entries, English UI.
    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(self.host_prefix())?.join("/citations")?;
        url.query_pairs_mut()
            .append_pair("user", &self.user)
            .append_pair("hl", "en")
            .append_pair("cstart", "0")
            .append_pair("pagesize", &self.page_size.to_string());
        Ok(url)
    }

    pub fn profile_url(&self) -> String {
        format!("{}/citations?user={}", self.host_prefix(), self.user)
    }

    /// Absolute record URL. Plain concatenation; no normalisation of `href`.
    pub fn record_url(&self, href: &str) -> String {
        format!("{}{}", self.host_prefix(), href)
    }
}
