use super::error::{self, Error, FALLBACK_REJECTION};
use super::register::{self, ErrorResp};
use url::Url;

/// Client for the registration API
#[derive(Debug, Clone)]
pub struct Client {
    /// Where registrations go. We POST to exactly this address; no path is
    /// added to it.
    pub endpoint: Url,
}

impl Client {
    /// Construct a new client
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    /// Register a new user. This is a single attempt: no retries, and no
    /// timeout beyond whatever `client` was built with.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn register(
        &self,
        client: &reqwest::Client,
        req: &register::Req,
    ) -> error::Result<register::Resp> {
        tracing::info!(endpoint = %self.endpoint, email = %req.email, "submitting registration");

        Self::handle_response(client.post(self.endpoint.clone()).json(req)).await
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Error::Network` if we never got a response
    /// - `Error::Rejected` if the server returned anything but a 2xx. The
    ///   message is taken from the body's `detail`, if it has a usable one.
    /// - `Error::Decode` if the server returned a 2xx with a body we can't
    ///   read
    async fn handle_response(req: reqwest::RequestBuilder) -> error::Result<register::Resp> {
        let resp = req.send().await.map_err(|err| {
            tracing::error!(?err, "could not reach registration API");
            Error::Network(err)
        })?;

        let status = resp.status();

        if status.is_success() {
            resp.json().await.map_err(|err| {
                tracing::error!(?err, %status, "could not read registration response");

                if err.is_decode() {
                    Error::Decode(err)
                } else {
                    Error::Network(err)
                }
            })
        } else {
            // A body we can't parse is no worse than a body without `detail`.
            let body = resp.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorResp>(&body)
                .ok()
                .and_then(|err| err.message())
                .unwrap_or_else(|| FALLBACK_REJECTION.to_owned());

            tracing::warn!(%status, reason = %message, "registration rejected");

            Err(Error::Rejected { status, message })
        }
    }
}
