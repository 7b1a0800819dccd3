use std::{fs, path::PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::debug;

use crate::config::{Profile, USER_AGENT};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid profile endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("failed to read markup from {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the profile markup comes from.
pub trait Source {
    /// Fetch the raw listing markup exactly once.
    fn fetch(&self) -> Result<String, FetchError>;
}

/// The live profile page, fetched with a single GET.
pub struct HttpSource<'a> {
    profile: &'a Profile,
}

impl<'a> HttpSource<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        HttpSource { profile }
    }
}

impl Source for HttpSource<'_> {
    fn fetch(&self) -> Result<String, FetchError> {
        let url = self.profile.endpoint()?;
        debug!(%url, timeout = ?self.profile.timeout, "fetching profile");

        // Non-2xx statuses surface as `ureq::Error::StatusCode`. No retries.
        let cfg = ureq::Agent::config_builder()
            .timeout_global(Some(self.profile.timeout))
            .http_status_as_error(true)
            .build();
        let agent = ureq::Agent::new_with_config(cfg);

        let spinner = spinner(&url);
        let res = agent
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .call()
            .and_then(|res| res.into_body().read_to_string());
        spinner.finish_and_clear();

        res.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Markup saved to disk beforehand, e.g. a fixture or a manually downloaded page.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl Source for FileSource {
    fn fetch(&self) -> Result<String, FetchError> {
        fs::read_to_string(&self.path).map_err(|source| FetchError::File {
            path: self.path.clone(),
            source,
        })
    }
}

fn spinner(url: &url::Url) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("GET {}", url.host_str().unwrap_or("profile")));
    // Drawn once; no ticker thread, the GET blocks this one.
    pb.tick();
    pb
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::{io::Write, time::Duration};
    use tempfile::NamedTempFile;

    use crate::fetch::testing::serve_once;

    fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
        head.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }

    #[test]
    fn http_source_sends_browser_agent_and_page_size() {
        let (host, server) = serve_once("200 OK", "<html>listing</html>");
        let profile = Profile {
            host,
            timeout: Duration::from_secs(5),
            ..Profile::default()
        };

        let body = HttpSource::new(&profile).fetch().unwrap();
        let head = server.join().unwrap();

        assert_eq!(body, "<html>listing</html>");
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("GET /citations?user=UJ4D3rYAAAAJ&hl=en&cstart=0&pagesize=100 "));
        assert_eq!(header(&head, "user-agent"), Some(USER_AGENT));
        assert!(USER_AGENT.starts_with("Mozilla/5.0 (Windows NT 10.0"));
    }

    #[test]
    fn http_source_treats_server_error_as_failure() {
        let (host, server) = serve_once("503 Service Unavailable", "try later");
        let profile = Profile {
            host,
            timeout: Duration::from_secs(5),
            ..Profile::default()
        };

        let err = HttpSource::new(&profile).fetch().unwrap_err();
        server.join().unwrap();

        match err {
            FetchError::Http { source, .. } => {
                assert!(matches!(source, ureq::Error::StatusCode(503)), "{source}")
            }
            other => panic!("expected an HTTP error, got {other}"),
        }
    }

    #[test]
    fn file_source_reads_markup() {
        let mut tmp = NamedTempFile::new().expect("tmp file");
        write!(tmp, "<table></table>").unwrap();
        let markup = FileSource::new(tmp.path()).fetch().unwrap();
        assert_eq!(markup, "<table></table>");
    }

    #[test]
    fn file_source_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.html"))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, FetchError::File { .. }));
    }

    #[test]
    fn http_source_fails_on_closed_port() {
        // Port 9 (discard) is not listening on loopback in test environments.
        let profile = Profile {
            host: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(2),
            ..Profile::default()
        };
        let err = HttpSource::new(&profile).fetch().unwrap_err();
        assert!(matches!(err, FetchError::Http { .. }));
    }

    #[test]
    fn http_source_rejects_unparseable_host() {
        let profile = Profile {
            host: "not a url".into(),
            ..Profile::default()
        };
        let err = HttpSource::new(&profile).fetch().unwrap_err();
        assert!(matches!(err, FetchError::Endpoint(_)));
    }
}
