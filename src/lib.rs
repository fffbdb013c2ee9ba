pub mod analysis;
pub mod api;
pub mod config;
pub mod dictionary;
pub mod document;
pub mod error;
pub mod fetch;
pub mod scan;

use std::sync::Arc;

use config::Config;
use dictionary::PronunciationDictionary;
use error::Result;
use fetch::Fetcher;
use scan::Scanner;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<Scanner>,
}

impl AppState {
    pub fn new(config: &Config, dictionary: Arc<PronunciationDictionary>) -> Result<Self> {
        let fetcher = Fetcher::new(&config.fetch)?;

        Ok(Self {
            scanner: Arc::new(Scanner::new(fetcher, dictionary)),
        })
    }
}
