use std::time::Duration;

use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::poller::parse_logs;
use crate::{ApiError, DownloadRequest, DownloadResponse, FailureKind};

/// Starts a job; resolves once the server is done with it.
pub const DOWNLOAD_PATH: &str = "download";
/// Full accumulated log of the current job.
pub const LOGS_PATH: &str = "download/logs";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Applies to each log poll only; the download request has no timeout.
    pub logs_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            logs_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(500),
        }
    }
}

#[async_trait::async_trait]
pub trait DownloadApi: Send + Sync {
    /// Posts the form and waits for the result body. Returns
    /// [`FailureKind::Cancelled`] as soon as `cancel` fires.
    async fn submit(
        &self,
        request: &DownloadRequest,
        cancel: &CancellationToken,
    ) -> Result<DownloadResponse, ApiError>;

    /// Fetches the log list. `Ok(None)` means the body was JSON but carried no
    /// usable `logs` array.
    async fn fetch_logs(&self) -> Result<Option<Vec<String>>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDownloadApi {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestDownloadApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = parse_base(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    async fn post_form(
        &self,
        url: Url,
        request: &DownloadRequest,
    ) -> Result<DownloadResponse, ApiError> {
        let response = self
            .client
            .post(url)
            .form(&request.fields)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        // Error statuses still count as an answer when the body has the result shape.
        match serde_json::from_slice::<DownloadResponse>(&body) {
            Ok(result) => Ok(result),
            Err(_) if !status.is_success() => Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            )),
            Err(err) => Err(ApiError::new(FailureKind::Decode, err.to_string())),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl DownloadApi for ReqwestDownloadApi {
    async fn submit(
        &self,
        request: &DownloadRequest,
        cancel: &CancellationToken,
    ) -> Result<DownloadResponse, ApiError> {
        let url = self.endpoint(DOWNLOAD_PATH)?;
        tokio::select! {
            _ = cancel.cancelled() => Err(ApiError::new(FailureKind::Cancelled, "download request aborted")),
            result = self.post_form(url, request) => result,
        }
    }

    async fn fetch_logs(&self) -> Result<Option<Vec<String>>, ApiError> {
        let url = self.endpoint(LOGS_PATH)?;
        let response = self
            .client
            .get(url)
            .timeout(self.settings.logs_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        Ok(parse_logs(&value))
    }
}

/// Relative endpoint paths resolve below the base, so it needs a trailing slash.
fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let mut base = Url::parse(raw.trim())
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(ApiError::new(
            FailureKind::InvalidUrl,
            format!("{raw} cannot be used as a server address"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_below_base_path() {
        let api = ReqwestDownloadApi::new(ClientSettings {
            base_url: "http://localhost:5000/app".into(),
            ..ClientSettings::default()
        })
        .unwrap();
        assert_eq!(
            api.endpoint(LOGS_PATH).unwrap().as_str(),
            "http://localhost:5000/app/download/logs"
        );

        let api = ReqwestDownloadApi::new(ClientSettings::default()).unwrap();
        assert_eq!(
            api.endpoint(DOWNLOAD_PATH).unwrap().as_str(),
            "http://127.0.0.1:5000/download"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        for raw in ["not a url", "mailto:someone@example.com"] {
            let err = ReqwestDownloadApi::new(ClientSettings {
                base_url: raw.into(),
                ..ClientSettings::default()
            })
            .unwrap_err();
            assert_eq!(err.kind, FailureKind::InvalidUrl, "{raw}");
        }
    }
}
