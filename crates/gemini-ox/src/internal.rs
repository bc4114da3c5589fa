use crate::{
    ApiKeyPlacement, Gemini, GeminiRequestError,
    generate_content::{request::GenerateContentRequest, response::GenerateContentResponse},
    parse_error_response,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Builds and sends authenticated requests for one [`Gemini`] client.
#[derive(Clone)]
pub(crate) struct GeminiRequestHelper {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    placement: ApiKeyPlacement,
    api_key: String,
}

impl GeminiRequestHelper {
    pub(crate) fn new(gemini: &Gemini) -> Result<Self, GeminiRequestError> {
        let api_key = gemini
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(GeminiRequestError::AuthenticationMissing)?;

        Ok(Self {
            client: gemini.client.clone(),
            base_url: gemini.base_url.clone(),
            api_version: gemini.api_version.clone(),
            placement: gemini.key_placement.clone(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, GeminiRequestError> {
        let raw = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| GeminiRequestError::UrlBuildError(e.to_string()))
    }

    fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.placement {
            ApiKeyPlacement::Query(name) => req.query(&[(name.as_str(), self.api_key.as_str())]),
            ApiKeyPlacement::Header(name) => req.header(name.as_str(), self.api_key.as_str()),
        }
    }

    /// POST `body` as JSON to `{base}/{version}/{path}` and decode the reply.
    pub(crate) async fn request_json<T, B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GeminiRequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(path)?;
        let res = self
            .build_request(Method::POST, url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;
        Self::handle_response(res).await
    }

    async fn handle_response<T: DeserializeOwned>(res: Response) -> Result<T, GeminiRequestError> {
        let status = res.status();
        let bytes = res.bytes().await?;

        if status.is_success() {
            serde_json::from_slice::<T>(&bytes).map_err(GeminiRequestError::Decode)
        } else {
            Err(parse_error_response(status, &bytes))
        }
    }

    /// Send a generate content request
    pub(crate) async fn send_generate_content_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiRequestError> {
        let path = format!("models/{}:generateContent", request.model);
        self.request_json(&path, request).await
    }
}
