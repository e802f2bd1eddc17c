//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::domain::{
    AccountStatus, Login, MessageId, OutgoingMessage, Password, PhoneNumber, SendResult,
    ValidationError,
};
use crate::transport;

/// Production endpoint accepting outgoing messages.
pub const DEFAULT_SEND_URL: &str = "https://smsgateapi.sluzba.cz/apixml30/receiver";
/// Production endpoint returning pending delivery reports.
pub const DEFAULT_DELIVERY_URL: &str = "https://smsgateapi.sluzba.cz/apixml30/sender";
/// Production endpoint acknowledging delivery reports.
pub const DEFAULT_CONFIRM_URL: &str = "https://smsgateapi.sluzba.cz/apixml30/confirm";
/// Production endpoint reporting credit and pricing.
pub const DEFAULT_INFO_URL: &str = "https://smsgateapi.sluzba.cz/apixml30/info/credit";

/// Boxed future returned by [`HttpTransport`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outcome of one HTTP exchange, as seen by this client.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Result of one [`HttpTransport`] call.
pub type TransportResult = Result<HttpResponse, Box<dyn StdError + Send + Sync>>;

/// Minimal HTTP capability this client needs from its collaborator.
///
/// Implementations resolve to the final status and body; transport-level
/// failures (DNS, TLS, timeouts) are returned as boxed errors and surface
/// from the client unwrapped, as [`SmsGateError::Transport`]. The default
/// implementation wraps [`reqwest::Client`]; tests substitute a scripted
/// fake.
pub trait HttpTransport: Send + Sync {
    /// Issue a POST with the given query parameters and a `text/xml` body.
    fn post<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, TransportResult>;

    /// Issue a GET with the given query parameters.
    fn get<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
    ) -> BoxFuture<'a, TransportResult>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, TransportResult> {
        Box::pin(async move {
            let url = Url::parse_with_params(url, &query)?;
            let response = self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "text/xml")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn get<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
    ) -> BoxFuture<'a, TransportResult> {
        Box::pin(async move {
            let url = Url::parse_with_params(url, &query)?;
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Gateway account credentials, attached as `login`/`password` query
/// parameters to every request.
pub struct Credentials {
    login: Login,
    password: Password,
}

impl Credentials {
    /// Create validated credentials.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    /// Assemble credentials from already-validated parts.
    pub fn from_parts(login: Login, password: Password) -> Self {
        Self { login, password }
    }

    fn push_query_params(&self, query: &mut Vec<(String, String)>) {
        query.push((Login::FIELD.to_owned(), self.login.as_str().to_owned()));
        query.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
    }
}

#[derive(Debug, Clone)]
/// Gateway endpoint configuration.
///
/// Immutable once the client is built; defaults point at the production
/// gateway and every URL can be overridden for testing.
pub struct Endpoints {
    pub send_url: String,
    pub delivery_url: String,
    pub confirm_url: String,
    pub info_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            send_url: DEFAULT_SEND_URL.to_owned(),
            delivery_url: DEFAULT_DELIVERY_URL.to_owned(),
            confirm_url: DEFAULT_CONFIRM_URL.to_owned(),
            info_url: DEFAULT_INFO_URL.to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsGateClient`].
pub enum SmsGateError {
    /// HTTP collaborator failure (DNS, TLS, timeouts, etc), surfaced as-is.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a non-200 status. `message` carries the
    /// decoded error-envelope text when one was available.
    #[error("gateway error (HTTP {status}): {}", .message.as_deref().unwrap_or("no detail provided by the gateway"))]
    Gateway { status: u16, message: Option<String> },

    /// The outgoing XML document could not be produced.
    #[error("encoding error: {0}")]
    Encoding(#[source] Box<dyn StdError + Send + Sync>),

    /// The response could not be parsed or lacked an expected element;
    /// points at a gateway contract change or a corrupted transport.
    #[error("protocol error: {0}")]
    Protocol(#[source] Box<dyn StdError + Send + Sync>),

    /// Caller-supplied input violated a local invariant; no request was
    /// made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, thiserror::Error)]
/// Error of a (possibly multi-recipient) send.
///
/// The gateway accepts each recipient with its own request and does not
/// roll back on a mid-batch failure, so the results it already accepted are
/// carried here instead of being discarded.
#[error("sms send failed after {} accepted message(s): {source}", .sent.len())]
pub struct SendSmsError {
    sent: Vec<SendResult>,
    source: SmsGateError,
}

impl SendSmsError {
    fn new(sent: Vec<SendResult>, source: SmsGateError) -> Self {
        Self { sent, source }
    }

    /// Results the gateway accepted before the failure, in send order.
    pub fn sent(&self) -> &[SendResult] {
        &self.sent
    }

    /// The underlying failure.
    pub fn error(&self) -> &SmsGateError {
        &self.source
    }

    /// Split into the accepted results and the underlying failure.
    pub fn into_parts(self) -> (Vec<SendResult>, SmsGateError) {
        (self.sent, self.source)
    }
}

#[derive(Clone)]
/// Builder for [`SmsGateClient`].
///
/// Use this to override endpoints, tune the built-in HTTP client, or
/// inject a custom [`HttpTransport`]. The `timeout`/`user_agent` settings
/// apply to the built-in transport only and are ignored when a custom
/// transport is injected.
pub struct SmsGateClientBuilder {
    credentials: Credentials,
    endpoints: Endpoints,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SmsGateClientBuilder {
    /// Create a builder with the production endpoints and the built-in
    /// transport.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: Endpoints::default(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Replace the whole endpoint configuration at once.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Override the send endpoint URL.
    pub fn send_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.send_url = url.into();
        self
    }

    /// Override the delivery-report endpoint URL.
    pub fn delivery_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.delivery_url = url.into();
        self
    }

    /// Override the confirm endpoint URL.
    pub fn confirm_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.confirm_url = url.into();
        self
    }

    /// Override the credit-info endpoint URL.
    pub fn info_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.info_url = url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Inject a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`SmsGateClient`].
    pub fn build(self) -> Result<SmsGateClient, SmsGateError> {
        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }

                let client = builder
                    .build()
                    .map_err(|err| SmsGateError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client }) as Arc<dyn HttpTransport>
            }
        };

        Ok(SmsGateClient {
            credentials: self.credentials,
            endpoints: self.endpoints,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level SMS Gate client.
///
/// Holds credentials, endpoint configuration, and a transport handle, and
/// exposes the four gateway operations. Every operation is stateless; an
/// instance can be shared across tasks as long as the transport is safe
/// for concurrent use. Note that [`send_sms`](Self::send_sms) is not
/// idempotent: repeating it sends duplicate messages.
pub struct SmsGateClient {
    credentials: Credentials,
    endpoints: Endpoints,
    http: Arc<dyn HttpTransport>,
}

impl SmsGateClient {
    /// Create a client using the production endpoints.
    ///
    /// For more customization, use [`SmsGateClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: Endpoints::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmsGateClientBuilder {
        SmsGateClientBuilder::new(credentials)
    }

    /// Send a message to every recipient, one sequential request per phone
    /// number, in list order.
    ///
    /// Returns one [`SendResult`] per recipient, positionally matching the
    /// message's phone list. A failure aborts the loop immediately;
    /// messages the gateway already accepted are not rolled back and are
    /// available on the returned [`SendSmsError`].
    ///
    /// Fails with a validation error before any request is made when the
    /// message text is empty.
    pub async fn send_sms(
        &self,
        message: &OutgoingMessage,
    ) -> Result<Vec<SendResult>, SendSmsError> {
        if message.text().is_empty() {
            return Err(SendSmsError::new(
                Vec::new(),
                ValidationError::Empty { field: "text" }.into(),
            ));
        }

        let dr_request = message.confirmation().interval_minutes();
        debug!(recipients = message.phones().len(), "sending sms batch");

        let mut results = Vec::with_capacity(message.phones().len());
        for recipient in message.phones() {
            let outcome = self
                .send_one(message.text(), recipient, dr_request, message.send_at())
                .await;
            match outcome {
                Ok(result) => results.push(result),
                Err(source) => return Err(SendSmsError::new(results, source)),
            }
        }

        Ok(results)
    }

    async fn send_one(
        &self,
        text: &str,
        recipient: &PhoneNumber,
        dr_request: Option<u16>,
        send_at: Option<chrono::NaiveDateTime>,
    ) -> Result<SendResult, SmsGateError> {
        let xml = transport::encode_send_sms_xml(text, recipient, dr_request, send_at)
            .map_err(|err| SmsGateError::Encoding(Box::new(err)))?;

        let mut query = Vec::new();
        self.credentials.push_query_params(&mut query);

        let response = self
            .http
            .post(&self.endpoints.send_url, query, xml)
            .await
            .map_err(SmsGateError::Transport)?;

        if response.status != 200 {
            return Err(gateway_error_from_envelope(response));
        }

        transport::decode_send_sms_response(&response.body)
            .map_err(|err| SmsGateError::Protocol(Box::new(err)))
    }

    /// Poll the gateway for pending delivery reports, up to one fixed-size
    /// batch of 30.
    ///
    /// Returns an id → delivery-timestamp map; for a duplicate id the last
    /// entry wins. Reports keep coming back until they are acknowledged
    /// with [`confirm_delivery_report`](Self::confirm_delivery_report).
    pub async fn get_delivery_reports(
        &self,
    ) -> Result<BTreeMap<MessageId, String>, SmsGateError> {
        let mut query = Vec::new();
        self.credentials.push_query_params(&mut query);
        query.extend(transport::encode_delivery_reports_query());

        debug!("polling delivery reports");
        let response = self
            .http
            .post(&self.endpoints.delivery_url, query, String::new())
            .await
            .map_err(SmsGateError::Transport)?;

        if response.status != 200 {
            return Err(gateway_error_from_envelope(response));
        }

        transport::decode_delivery_reports(&response.body)
            .map_err(|err| SmsGateError::Protocol(Box::new(err)))
    }

    /// Acknowledge one delivery report so the gateway stops returning it.
    pub async fn confirm_delivery_report(&self, id: &MessageId) -> Result<(), SmsGateError> {
        let mut query = Vec::new();
        self.credentials.push_query_params(&mut query);
        query.extend(transport::encode_confirm_query(id));

        debug!(%id, "confirming delivery report");
        let response = self
            .http
            .get(&self.endpoints.confirm_url, query)
            .await
            .map_err(SmsGateError::Transport)?;

        if response.status != 200 {
            return Err(SmsGateError::Gateway {
                status: response.status,
                message: None,
            });
        }

        Ok(())
    }

    /// Query the account's remaining credit and per-destination prices.
    pub async fn get_account_status(&self) -> Result<AccountStatus, SmsGateError> {
        let mut query = Vec::new();
        self.credentials.push_query_params(&mut query);

        debug!("querying account status");
        let response = self
            .http
            .get(&self.endpoints.info_url, query)
            .await
            .map_err(SmsGateError::Transport)?;

        if response.status != 200 {
            return Err(SmsGateError::Gateway {
                status: response.status,
                message: None,
            });
        }

        transport::decode_account_status(&response.body)
            .map_err(|err| SmsGateError::Protocol(Box::new(err)))
    }
}

/// Map a non-200 response to a gateway error, keeping the envelope text
/// when it decodes and degrading to a generic message when it does not.
fn gateway_error_from_envelope(response: HttpResponse) -> SmsGateError {
    let message = transport::decode_error_message(&response.body).ok();
    SmsGateError::Gateway {
        status: response.status,
        message,
    }
}
