/// Data layer: feed types, fetching, filter criteria, and selection.
///
/// Architecture:
/// ```text
///   GeoJSON feed (HTTP / file)
///        │
///        ▼
///   ┌──────────┐
///   │ fetcher  │  one GET → FeedPayload
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │ selector │ ◄─── │ criteria │  inclusive magnitude / age / lon / lat bounds
///   └──────────┘      └──────────┘
///        │
///        ▼
///   SelectionResult   five parallel columns for the plot
/// ```

pub mod criteria;
pub mod fetcher;
pub mod model;
pub mod selector;
