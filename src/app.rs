//! Application state for the three-tab client.
//!
//! The resolver stays pure; everything that changes over a session (active
//! tab, latest position fix, last result, scanner flags) is owned here.

use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::dataset::Dataset;
use crate::models::{GeoPoint, NearestResult};
use crate::resolver::ResolveError;
use crate::scanner::ScannerSession;

/// Bottom navigation tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Scanner,
    WebPage,
    NearestMachine,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Scanner, Tab::WebPage, Tab::NearestMachine]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Tab::Scanner => "scanner",
            Tab::WebPage => "webpage",
            Tab::NearestMachine => "nearestOtto",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Scanner => "Skanneri",
            Tab::WebPage => "Verkkosivu",
            Tab::NearestMachine => "Lähin automaatti",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Scanner => "camera",
            Tab::WebPage => "web",
            Tab::NearestMachine => "atm",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Scanner => 0,
            Tab::WebPage => 1,
            Tab::NearestMachine => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("current location is not available")]
    LocationUnavailable,

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Default)]
pub struct AppState {
    tab: Tab,
    location: Option<GeoPoint>,
    nearest: Option<NearestResult>,
    scanner: ScannerSession,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Store the latest fix from the location service
    pub fn set_location(&mut self, point: GeoPoint) {
        self.location = Some(point);
    }

    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    pub fn nearest(&self) -> Option<&NearestResult> {
        self.nearest.as_ref()
    }

    pub fn scanner(&self) -> &ScannerSession {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut ScannerSession {
        &mut self.scanner
    }

    /// Forward a decoded code to the scanner; an accepted scan jumps to the
    /// web page tab.
    pub fn handle_scan(&mut self, code_type: &str, data: &str) -> bool {
        let accepted = self.scanner.on_scanned(code_type, data);
        if accepted {
            self.tab = Tab::WebPage;
        }
        accepted
    }

    /// What the web page tab shows
    pub fn web_view_url(&self) -> Option<Url> {
        self.scanner.scanned_data().and_then(|d| Url::parse(d).ok())
    }

    /// "Find nearest" action. The previous result is kept on failure.
    pub fn find_nearest(&mut self, dataset: &Dataset) -> Result<&NearestResult, AppError> {
        let location = self.location.ok_or_else(|| {
            warn!("Nearest machine requested before a location fix");
            AppError::LocationUnavailable
        })?;

        let result = dataset.nearest(location)?;
        info!(
            "Nearest machine: {} ({})",
            result.machine.street_address,
            result.distance_label()
        );
        Ok(&*self.nearest.insert(result))
    }
}
