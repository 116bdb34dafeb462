use std::path::PathBuf;

use thiserror::Error;

use super::model::{FeedDocument, FeedPayload};

/// USGS summary feed: magnitude 1.0+ events of the past 30 days.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/1.0_month.geojson";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    HttpError,
    NetworkError,
    SchemaError,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error {status} from {url}")]
    Http { status: u16, url: String },
    #[error("network error: {detail}")]
    Network { detail: String },
    #[error("unexpected feed format: {detail}")]
    Schema { detail: String },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Http { .. } => FetchErrorKind::HttpError,
            FetchError::Network { .. } => FetchErrorKind::NetworkError,
            FetchError::Schema { .. } => FetchErrorKind::SchemaError,
        }
    }
}

// ---------------------------------------------------------------------------
// Feed sources
// ---------------------------------------------------------------------------

/// Something that can produce a fresh [`FeedPayload`] on demand.
///
/// Every call hits the underlying source again; nothing is cached.
pub trait FeedSource {
    fn fetch(&self) -> Result<FeedPayload, FetchError>;

    /// Human-readable origin, for logs and the status bar.
    fn describe(&self) -> String;
}

impl<T: FeedSource + ?Sized> FeedSource for Box<T> {
    fn fetch(&self) -> Result<FeedPayload, FetchError> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Parse a GeoJSON summary feed.
pub fn parse_feed(text: &str) -> Result<FeedPayload, FetchError> {
    let doc: FeedDocument = serde_json::from_str(text).map_err(|e| FetchError::Schema {
        detail: e.to_string(),
    })?;
    Ok(doc.into())
}

/// Blocking HTTP GET against a fixed URL, one attempt per call.
pub struct HttpFeed {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

impl FeedSource for HttpFeed {
    fn fetch(&self) -> Result<FeedPayload, FetchError> {
        log::info!("Fetching feed from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| FetchError::Network {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().map_err(|e| FetchError::Network {
            detail: e.to_string(),
        })?;
        parse_feed(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A feed previously saved to disk.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileFeed {
    fn fetch(&self) -> Result<FeedPayload, FetchError> {
        log::info!("Reading feed from {}", self.path.display());

        let text = std::fs::read_to_string(&self.path).map_err(|e| FetchError::Network {
            detail: format!("{}: {e}", self.path.display()),
        })?;
        parse_feed(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use crate::data::criteria::FilterCriteria;
    use crate::data::selector::{select, SelectionErrorKind};

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": { "title": "USGS Magnitude 1.0+ Earthquakes, Past Month", "count": 2 },
        "features": [
            { "type": "Feature",
              "properties": { "mag": 4.6, "place": "off the coast", "time": 1700000000000, "title": "M 4.6 - off the coast" },
              "geometry": { "type": "Point", "coordinates": [142.1, 38.3, 35.0] } },
            { "type": "Feature",
              "properties": { "mag": null, "time": 1700000000000, "title": "M ? - unknown" },
              "geometry": { "type": "Point", "coordinates": [0.0, 0.0, 0.0] } }
        ]
    }"#;

    /// Serve exactly one canned HTTP response on a random local port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/feed.geojson")
    }

    /// Local test servers must not be routed through an ambient proxy.
    fn local_feed(url: String) -> HttpFeed {
        HttpFeed {
            url,
            client: reqwest::blocking::Client::builder()
                .no_proxy()
                .build()
                .unwrap(),
        }
    }

    #[test]
    fn parses_feed_document() {
        let payload = parse_feed(SAMPLE).unwrap();
        assert_eq!(payload.feed_title, "USGS Magnitude 1.0+ Earthquakes, Past Month");
        assert_eq!(payload.records.len(), 2);
        assert_eq!(payload.records[0].properties.as_ref().unwrap().mag, Some(4.6));
        assert_eq!(payload.records[1].properties.as_ref().unwrap().mag, None);
    }

    #[test]
    fn null_properties_parse_and_fail_at_selection() {
        let text = r#"{
            "metadata": { "title": "t" },
            "features": [ { "properties": null, "geometry": { "coordinates": [1.0, 2.0] } } ]
        }"#;
        let payload = parse_feed(text).unwrap();
        assert!(payload.records[0].properties.is_none());
        let err = select(&payload, &FilterCriteria::default(), 0).unwrap_err();
        assert_eq!(err.kind(), SelectionErrorKind::MissingField);
    }

    #[test]
    fn document_without_features_is_schema_error() {
        let err = parse_feed(r#"{ "metadata": { "title": "x" } }"#).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::SchemaError);
        let err = parse_feed("<html>maintenance</html>").unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::SchemaError);
    }

    #[test]
    fn http_503_is_http_error() {
        let url = serve_once("503 Service Unavailable", "");
        let err = local_feed(url).fetch().unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 503, .. }));
        assert_eq!(err.kind(), FetchErrorKind::HttpError);
    }

    #[test]
    fn http_success_is_parsed() {
        let url = serve_once("200 OK", SAMPLE);
        let payload = local_feed(url).fetch().unwrap();
        assert_eq!(payload.records.len(), 2);
    }

    #[test]
    fn http_success_with_bad_body_is_schema_error() {
        let url = serve_once("200 OK", r#"{"features": 3}"#);
        let err = local_feed(url).fetch().unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::SchemaError);
    }

    #[test]
    fn refused_connection_is_network_error() {
        // Bind then drop to get a port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = local_feed(format!("http://127.0.0.1:{port}/"))
            .fetch()
            .unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::NetworkError);
    }

    #[test]
    fn file_feed_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let feed = FileFeed::new(file.path());
        assert_eq!(feed.fetch().unwrap().records.len(), 2);

        let missing = FileFeed::new(file.path().with_extension("nope"));
        assert_eq!(missing.fetch().unwrap_err().kind(), FetchErrorKind::NetworkError);
    }
}
