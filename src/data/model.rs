use serde::Deserialize;

use super::selector::SelectionError;

// ---------------------------------------------------------------------------
// Feed document (serde view of the GeoJSON summary feed)
// ---------------------------------------------------------------------------

/// Top-level GeoJSON document.  Only `metadata.title` and `features` are
/// required; everything else in the feed is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    pub metadata: FeedMetadata,
    pub features: Vec<FeedFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedMetadata {
    pub title: String,
}

/// One feature of the feed.  Fields are optional here so that a single
/// malformed event does not fail the whole download; it is rejected later,
/// during selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedFeature {
    #[serde(default)]
    pub properties: Option<FeatureProperties>,
    #[serde(default)]
    pub geometry: Option<FeatureGeometry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    /// Event origin time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureGeometry {
    /// `[longitude, latitude, depth, ...]`
    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// FeedPayload – what a feed source hands to the selector
// ---------------------------------------------------------------------------

/// The result of one successful fetch.
#[derive(Debug, Clone)]
pub struct FeedPayload {
    pub feed_title: String,
    pub records: Vec<FeedFeature>,
}

impl From<FeedDocument> for FeedPayload {
    fn from(doc: FeedDocument) -> Self {
        FeedPayload {
            feed_title: doc.metadata.title,
            records: doc.features,
        }
    }
}

// ---------------------------------------------------------------------------
// RawEventRecord – a feature with every required field present
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RawEventRecord {
    pub magnitude: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub title: String,
    pub timestamp_millis: i64,
}

impl RawEventRecord {
    /// Extract the required fields from the feature at position `index`.
    pub fn from_feature(index: usize, feature: &FeedFeature) -> Result<Self, SelectionError> {
        let missing = |field: &'static str| SelectionError::MissingField { index, field };

        let props = feature
            .properties
            .as_ref()
            .ok_or_else(|| missing("properties"))?;
        let magnitude = props.mag.ok_or_else(|| missing("mag"))?;
        let coords = feature
            .geometry
            .as_ref()
            .map(|g| g.coordinates.as_slice())
            .ok_or_else(|| missing("geometry"))?;
        let longitude = coords
            .first()
            .copied()
            .flatten()
            .ok_or_else(|| missing("longitude"))?;
        let latitude = coords
            .get(1)
            .copied()
            .flatten()
            .ok_or_else(|| missing("latitude"))?;
        let title = props.title.clone().ok_or_else(|| missing("title"))?;
        let timestamp_millis = props.time.ok_or_else(|| missing("time"))?;

        Ok(RawEventRecord {
            magnitude,
            longitude,
            latitude,
            title,
            timestamp_millis,
        })
    }
}

// ---------------------------------------------------------------------------
// SelectionResult – parallel columns handed to the renderer
// ---------------------------------------------------------------------------

/// Selected events as five equal-length, order-preserving columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionResult {
    pub magnitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub latitudes: Vec<f64>,
    pub titles: Vec<String>,
    pub formatted_times: Vec<String>,
}

/// One row of a [`SelectionResult`], borrowed.
#[derive(Debug, Clone, Copy)]
pub struct SelectedEvent<'a> {
    pub magnitude: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub title: &'a str,
    pub time: &'a str,
}

impl SelectionResult {
    pub(crate) fn push(&mut self, record: RawEventRecord, formatted_time: String) {
        self.magnitudes.push(record.magnitude);
        self.longitudes.push(record.longitude);
        self.latitudes.push(record.latitude);
        self.titles.push(record.title);
        self.formatted_times.push(formatted_time);
    }

    /// Number of selected events.
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<SelectedEvent<'_>> {
        Some(SelectedEvent {
            magnitude: *self.magnitudes.get(i)?,
            longitude: *self.longitudes.get(i)?,
            latitude: *self.latitudes.get(i)?,
            title: self.titles.get(i)?,
            time: self.formatted_times.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SelectedEvent<'_>> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// Smallest and largest selected magnitude.
    pub fn magnitude_extent(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let min = self.magnitudes.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.magnitudes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}
