//! QR scanner session state.
//!
//! Only the flags the scanner screen toggles live here. Camera access and
//! frame decoding belong to the platform; the host forwards decoded codes to
//! [`ScannerSession::on_scanned`].

use tracing::{debug, info};
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerSession {
    camera_open: bool,
    scanned: bool,
    code_type: Option<String>,
    url: Option<String>,
}

impl ScannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_camera(&mut self) {
        self.camera_open = true;
        self.scanned = false;
    }

    pub fn close_camera(&mut self) {
        self.camera_open = false;
        self.scanned = false;
    }

    /// Record a decoded code.
    ///
    /// Returns false and leaves the session untouched when the camera is
    /// closed or a previous scan has not been dismissed with [`Self::rescan`].
    pub fn on_scanned(&mut self, code_type: &str, data: &str) -> bool {
        if !self.camera_open || self.scanned {
            debug!("Ignoring {} code while scanner is not accepting", code_type);
            return false;
        }

        info!("Scanned barcode type: {}", code_type);
        self.scanned = true;
        self.code_type = Some(code_type.to_string());
        self.url = Some(data.to_string());
        true
    }

    /// "Check again": accept the next code
    pub fn rescan(&mut self) {
        self.scanned = false;
    }

    pub fn is_camera_open(&self) -> bool {
        self.camera_open
    }

    pub fn is_scanned(&self) -> bool {
        self.scanned
    }

    pub fn code_type(&self) -> Option<&str> {
        self.code_type.as_deref()
    }

    /// Raw data of the last scan, whether or not it is a URL
    pub fn scanned_data(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Page to open after a scan: only absolute http(s) URLs qualify
    pub fn web_target(&self) -> Option<Url> {
        if !self.scanned {
            return None;
        }
        self.url.as_deref().and_then(parse_web_url)
    }
}

fn parse_web_url(data: &str) -> Option<Url> {
    let url = Url::parse(data.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
