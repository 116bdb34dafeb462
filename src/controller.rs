use crate::data::criteria::{Adjustment, FilterCriteria, InvalidInput};
use crate::data::fetcher::{FeedSource, FetchErrorKind};
use crate::data::model::SelectionResult;
use crate::data::selector::{self, SelectionErrorKind};

// ---------------------------------------------------------------------------
// Collaborator seams
// ---------------------------------------------------------------------------

/// Consumer of a finished selection (the plot).
pub trait Renderer {
    fn render(&mut self, selection: SelectionResult, plot_title: &str);
}

/// Which entry point configured the criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Continuous sliders, every change applied immediately.
    Interactive,
    /// Criteria gathered once from terminal prompts.
    Prompted,
}

/// Values currently shown by the slider controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub magnitude_min: f64,
    pub magnitude_max: f64,
    pub age_days: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// How one fetch → select → render cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered { count: usize },
    FetchFailed(FetchErrorKind),
    NoMatches,
    DataIntegrity,
}

// ---------------------------------------------------------------------------
// InteractionController
// ---------------------------------------------------------------------------

/// Owns the filter criteria and drives the fetch → select → render cycle.
pub struct InteractionController<F: FeedSource> {
    source: F,
    criteria: FilterCriteria,
    controls: Controls,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl<F: FeedSource> InteractionController<F> {
    pub fn new(source: F) -> Self {
        Self::with_criteria(source, FilterCriteria::default(), Mode::Interactive)
    }

    /// Start from criteria that were configured elsewhere (e.g. prompts).
    pub fn with_criteria(source: F, criteria: FilterCriteria, mode: Mode) -> Self {
        let controls = controls_for(&criteria);
        Self {
            source,
            criteria,
            controls,
            mode,
            status: None,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    /// Minimum-magnitude slider moved.  Pushes the maximum control along
    /// when the new minimum exceeds it.
    pub fn set_magnitude_min(&mut self, v: f64) -> Result<Adjustment, InvalidInput> {
        let adj = self.criteria.set_magnitude_min(v);
        self.after_adjustment(adj)
    }

    /// Maximum-magnitude slider moved.  Pushes the minimum control along
    /// when the new maximum is below it.
    pub fn set_magnitude_max(&mut self, v: f64) -> Result<Adjustment, InvalidInput> {
        let adj = self.criteria.set_magnitude_max(v);
        self.after_adjustment(adj)
    }

    pub fn set_age_days(&mut self, days: f64) -> Result<Adjustment, InvalidInput> {
        let adj = self.criteria.set_max_age_days(days);
        self.after_adjustment(adj)
    }

    pub fn set_longitude_range(&mut self, lo: f64, hi: f64) -> Result<Adjustment, InvalidInput> {
        let adj = self.criteria.set_longitude_range(lo, hi);
        self.after_adjustment(adj)
    }

    pub fn set_latitude_range(&mut self, lo: f64, hi: f64) -> Result<Adjustment, InvalidInput> {
        let adj = self.criteria.set_latitude_range(lo, hi);
        self.after_adjustment(adj)
    }

    fn after_adjustment(
        &mut self,
        adj: Result<Adjustment, InvalidInput>,
    ) -> Result<Adjustment, InvalidInput> {
        match &adj {
            Ok(Adjustment::Changed) => {
                self.controls = controls_for(&self.criteria);
                log::debug!("criteria now {}", self.criteria);
            }
            Ok(Adjustment::Unchanged) => {}
            Err(e) => log::warn!("Rejected filter change: {e}"),
        }
        adj
    }

    /// Run one fetch → select → render cycle.
    ///
    /// Failures are reported through [`Self::status`] and the log; the
    /// renderer is only called when there is something to show.
    pub fn on_apply_triggered(&mut self, renderer: &mut dyn Renderer) -> CycleOutcome {
        let payload = match self.source.fetch() {
            Ok(p) => p,
            Err(e) => {
                log::error!("Failed to fetch earthquake data from {}: {e}", self.source.describe());
                self.report(StatusLevel::Error, format!("Failed to fetch earthquake data: {e}"));
                return CycleOutcome::FetchFailed(e.kind());
            }
        };

        match selector::select_now(&payload, &self.criteria) {
            Ok(selection) => {
                let count = selection.len();
                log::info!("Plotting {count} of {} events", payload.records.len());
                self.report(
                    StatusLevel::Info,
                    format!("{count} of {} earthquakes shown", payload.records.len()),
                );
                renderer.render(selection, &payload.feed_title);
                CycleOutcome::Rendered { count }
            }
            Err(e) => match e.kind() {
                SelectionErrorKind::NoMatches => {
                    log::info!("There are no earthquakes in the selected range.");
                    self.report(
                        StatusLevel::Info,
                        "There are no earthquakes in the selected range.".to_string(),
                    );
                    CycleOutcome::NoMatches
                }
                SelectionErrorKind::MissingField => {
                    log::error!("Feed data is incomplete: {e}");
                    self.report(StatusLevel::Error, format!("Data missing: {e}"));
                    CycleOutcome::DataIntegrity
                }
            },
        }
    }

    fn report(&mut self, level: StatusLevel, text: String) {
        self.status = Some(StatusMessage { level, text });
    }
}

fn controls_for(criteria: &FilterCriteria) -> Controls {
    let mag = criteria.magnitude();
    Controls {
        magnitude_min: mag.min,
        magnitude_max: mag.max,
        age_days: criteria.max_age_days(),
    }
}
