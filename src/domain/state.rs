use crate::domain::errors::DataSourceError;
use crate::domain::market_data::{AssetId, AssetSummary, Catalog, HistoricalSeries, TimeWindow};

/// Where the historical chart is in its fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No series for the current selection + window
    #[default]
    Idle,
    /// A history fetch is in flight for the current selection + window
    Loading,
    /// A series for the current selection + window is rendered
    Loaded,
}

/// Which of the two mutually exclusive views is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Catalog,
    Detail,
}

/// Everything the dashboard knows. Mutated only by the controller.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub(crate) catalog: Catalog,
    pub(crate) selection: Option<AssetSummary>,
    pub(crate) window: TimeWindow,
    pub(crate) series: Option<HistoricalSeries>,
    pub(crate) generation: u64,
    pub(crate) phase: Phase,
    pub(crate) phase_before_fetch: Phase,
    pub(crate) search_open: bool,
    pub(crate) last_failure: Option<DataSourceError>,
}

impl DashboardState {
    pub fn new(window: TimeWindow) -> Self {
        Self { window, ..Self::default() }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> Option<&AssetSummary> {
        self.selection.as_ref()
    }

    pub fn selected_id(&self) -> Option<&AssetId> {
        self.selection.as_ref().map(|asset| &asset.id)
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Stored series, whatever key it was fetched for
    pub fn stored_series(&self) -> Option<&HistoricalSeries> {
        self.series.as_ref()
    }

    /// Series only if it belongs to the current selection and window
    pub fn current_series(&self) -> Option<&HistoricalSeries> {
        let selected = self.selected_id()?;
        self.series
            .as_ref()
            .filter(|series| series.is_for(selected, self.window))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_search_open(&self) -> bool {
        self.search_open
    }

    pub fn last_failure(&self) -> Option<&DataSourceError> {
        self.last_failure.as_ref()
    }

    pub fn active_view(&self) -> ActiveView {
        if self.selection.is_some() { ActiveView::Detail } else { ActiveView::Catalog }
    }

    /// Invalidates every request issued so far
    pub(crate) fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
