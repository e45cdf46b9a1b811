use crate::backend::error::BackendError;
use crate::backend::error::BackendError::{InvalidUrl, MissingBackendUrl};
use crate::tools::env_args::retrieve_expected_arg_value;
use derive_getters::Getters;
use reqwest::Url;

const BACKEND_URL_ARG: &str = "--backend-url";

#[derive(Debug, Getters, Clone, PartialEq)]
pub struct BackendConfig {
    url: String,
}

impl BackendConfig {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn from_args() -> Result<Self, BackendError> {
        let url = retrieve_expected_arg_value(BACKEND_URL_ARG, MissingBackendUrl)?;
        Url::parse(&url).map_err(|_| InvalidUrl(url.clone()))?;
        Ok(Self::new(url))
    }

    /// Backend URL for the given path, each `/`-separated segment being appended to the base.
    pub fn url_for(&self, path: &str) -> Result<Url, BackendError> {
        let invalid_url = || InvalidUrl(self.url.clone());
        let mut url = Url::parse(&self.url).map_err(|_| invalid_url())?;
        url.path_segments_mut()
            .map_err(|_| invalid_url())?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}
