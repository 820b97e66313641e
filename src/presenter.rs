//! Page Presenter
//! Assembles the dashboard page: title, description and four figures in fixed order.

use crate::charts::{ChartBuilder, ChartSpec};
use crate::config::DashboardConfig;
use crate::data::{DataLoader, DataProcessor, Dataset, LoaderError, ProcessorError};
use thiserror::Error;

pub const LOAD_SUCCESS_MESSAGE: &str = "Data loaded successfully!";

#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Failed to prepare charts: {0}")]
    Build(#[from] ProcessorError),
}

/// A subsection header followed by its chart.
#[derive(Debug, Clone)]
pub struct Section {
    pub header: String,
    pub chart: ChartSpec,
}

/// Fully built dashboard page.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub description: String,
    pub status: String,
    pub sections: Vec<Section>,
}

impl Page {
    /// Build all four figures from a loaded dataset.
    pub fn build(config: &DashboardConfig, dataset: &Dataset) -> Result<Self, PageError> {
        let views = DataProcessor::derive_views(dataset)?;

        let sections = vec![
            Section {
                header: "Figure 1: Scatterplot of rates by item code".to_string(),
                chart: ChartBuilder::scatter_by_item_code(&views.all),
            },
            Section {
                header: "Figure 2: Bar chart of the maximum rate per year".to_string(),
                chart: ChartBuilder::max_per_year_bars(
                    &views.lcu_max_per_year,
                    &views.slc_max_per_year,
                ),
            },
            Section {
                header: "Figure 3: Scatterplot with animation".to_string(),
                chart: ChartBuilder::animated_scatter(&views.in_animation_window),
            },
            Section {
                header: "Figure 4: Line chart with range shortcuts".to_string(),
                chart: ChartBuilder::line_with_range_shortcuts(&views.slc),
            },
        ];

        Ok(Self {
            title: config.title.clone(),
            description: config.description.clone(),
            status: LOAD_SUCCESS_MESSAGE.to_string(),
            sections,
        })
    }

    pub fn chart_count(&self) -> usize {
        self.sections.len()
    }
}

/// Fetch the dataset and build the page. One attempt; the first error ends the render.
pub fn load_page(config: &DashboardConfig) -> Result<Page, PageError> {
    let dataset = DataLoader::fetch(&config.source_url)?;
    Page::build(config, &dataset)
}

/// Render lifecycle: `Loading` ends in exactly one of `Ready` or `Failed`.
#[derive(Debug)]
pub enum PageState {
    Loading,
    Ready(Page),
    Failed(String),
}

impl PageState {
    pub fn from_result(result: Result<Page, PageError>) -> Self {
        match result {
            Ok(page) => {
                log::info!("Page ready with {} charts", page.chart_count());
                PageState::Ready(page)
            }
            Err(e) => {
                log::error!("Error loading data: {e}");
                PageState::Failed(format!("Error loading data: {e}"))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            PageState::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn chart_count(&self) -> usize {
        self.page().map(Page::chart_count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::ChartKind;

    const SAMPLE_CSV: &str = "\
Year,Item Code,Item,Value,Currency
1988,5540,Local currency units per USD,409.23,Lebanese Pound
2019,5541,Standard local currency units per USD,1507.5,Lebanese Pound
2023,5541,Standard local currency units per USD,15000,Lebanese Pound
2023,5540,Local currency units per USD,89500,Lebanese Pound
";

    #[test]
    fn test_sections_in_fixed_order() {
        let config = DashboardConfig::default();
        let dataset = DataLoader::parse_csv(SAMPLE_CSV.as_bytes().to_vec()).unwrap();
        let page = Page::build(&config, &dataset).unwrap();

        assert_eq!(page.title, config.title);
        assert_eq!(page.status, LOAD_SUCCESS_MESSAGE);
        let kinds: Vec<ChartKind> = page.sections.iter().map(|s| s.chart.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Scatter,
                ChartKind::GroupedBar,
                ChartKind::AnimatedScatter,
                ChartKind::Line
            ]
        );
        assert!(page.sections[0].header.starts_with("Figure 1"));
        assert!(page.sections[3].header.starts_with("Figure 4"));

        // Range shortcuts follow the latest SLC year
        let line = &page.sections[3].chart;
        assert_eq!(line.range_shortcuts[2].range, Some([2013.0, 2023.0]));
    }

    #[test]
    fn test_unreachable_source_produces_no_charts() {
        let config = DashboardConfig {
            source_url: "http://127.0.0.1:9/rates.csv".to_string(),
            ..Default::default()
        };

        let state = PageState::from_result(load_page(&config));
        assert_eq!(state.chart_count(), 0);
        match state {
            PageState::Failed(message) => assert!(message.starts_with("Error loading data:")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_column_fails_before_charts() {
        let result = DataLoader::parse_csv(b"Year,Value\n2000,1\n".to_vec())
            .map_err(PageError::from)
            .and_then(|dataset| Page::build(&DashboardConfig::default(), &dataset));

        let state = PageState::from_result(result);
        assert!(matches!(state, PageState::Failed(_)));
        assert!(state.page().is_none());
    }
}
