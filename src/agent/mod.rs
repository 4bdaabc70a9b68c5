//! Protocol client for the Számla Agent endpoint.
//!
//! Each operation builds an XML request document, submits it as a single
//! multipart file upload to the fixed endpoint and classifies the
//! response: transport failure, HTTP-level error, service-signaled error
//! (via the `szlahu_error_code` / `szlahu_error` headers despite a 200
//! status), or success. There are no retries at this layer — one call is
//! exactly one attempt.
//!
//! The response-processing steps are plain functions of an
//! [`AgentResponse`](crate::core::AgentResponse), so callers with their
//! own transport can drive them directly.
//!
//! # Example
//!
//! ```no_run
//! use szamlazz::agent::{Auth, Client};
//! use szamlazz::core::Invoice;
//!
//! # async fn issue(invoice: Invoice) -> Result<(), szamlazz::core::SzamlazzError> {
//! let client = Client::builder(Auth::credentials("user", "password"))
//!     .request_invoice_download(true)
//!     .build()?;
//! let issued = client.issue_invoice(&invoice).await?;
//! println!("{} ({} / {})", issued.invoice_id, issued.net_total, issued.gross_total);
//! # Ok(())
//! # }
//! ```

mod envelope;
mod response;

pub use envelope::{InvoiceQuery, ReversalOptions};
pub use response::{
    classify_response, decode_header_message, InvoiceData, IssuedInvoice, ReversedInvoice,
};

use std::collections::HashMap;

use crate::core::{AgentResponse, Invoice, SzamlazzError};

/// The fixed agent endpoint. All operations POST here.
pub const AGENT_URL: &str = "https://www.szamlazz.hu/szamla/";

/// Namespace URIs and schema locations of the request documents.
pub mod ns {
    pub const XMLSZAMLA: &str = "http://www.szamlazz.hu/xmlszamla";
    pub const XMLSZAMLAXML: &str = "http://www.szamlazz.hu/xmlszamlaxml";
    pub const XMLSZAMLAST: &str = "http://www.szamlazz.hu/xmlszamlast";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
    pub const XMLSZAMLA_SCHEMA_LOCATION: &str =
        "http://www.szamlazz.hu/xmlszamla xmlszamla.xsd";
    pub const XMLSZAMLAXML_SCHEMA_LOCATION: &str =
        "http://www.szamlazz.hu/xmlszamlaxml xmlszamlaxml.xsd";
    pub const XMLSZAMLAST_SCHEMA_LOCATION: &str =
        "http://www.szamlazz.hu/xmlszamlast xmlszamlast.xsd";
}

/// Multipart file field names, one per operation.
const ISSUE_FILE_FIELD: &str = "action-xmlagentxmlfile";
const QUERY_FILE_FIELD: &str = "action-szamla_agent_xml";
const REVERSAL_FILE_FIELD: &str = "action-szamla_agent_st";

/// Authentication mode, selected at construction and fixed for the
/// client's lifetime.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Account user name and password (`felhasznalo` / `jelszo`).
    Credentials { user: String, password: String },
    /// Agent key (`szamlaagentkulcs`).
    Token(String),
}

impl Auth {
    pub fn credentials(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Credentials {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    fn validate(&self) -> Result<(), SzamlazzError> {
        match self {
            Self::Credentials { user, password } => {
                if user.trim().len() < 2 {
                    return Err(SzamlazzError::Validation(
                        "agent user must be at least 2 characters".into(),
                    ));
                }
                if password.trim().len() < 2 {
                    return Err(SzamlazzError::Validation(
                        "agent password must be at least 2 characters".into(),
                    ));
                }
                Ok(())
            }
            Self::Token(token) => {
                if token.trim().is_empty() {
                    return Err(SzamlazzError::Validation(
                        "agent key must not be empty".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Format of the response body when a download is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseVersion {
    /// Version 1 — the response body is the PDF itself.
    #[default]
    Pdf,
    /// Version 2 — the response body is an XML document with the PDF
    /// embedded as base64 under `xmlszamlavalasz.pdf`.
    XmlEmbedded,
}

impl ResponseVersion {
    /// Wire token (`valaszVerzio`).
    pub fn code(&self) -> u8 {
        match self {
            Self::Pdf => 1,
            Self::XmlEmbedded => 2,
        }
    }
}

/// Client for the agent endpoint.
///
/// Long-lived; the underlying HTTP session keeps the service's affinity
/// cookies across calls. Individual calls are otherwise independent and
/// may run concurrently.
pub struct Client {
    auth: Auth,
    e_invoice: bool,
    passphrase: Option<String>,
    request_invoice_download: bool,
    downloaded_invoice_count: u32,
    response_version: ResponseVersion,
    http: reqwest::Client,
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    auth: Auth,
    e_invoice: bool,
    passphrase: Option<String>,
    request_invoice_download: bool,
    downloaded_invoice_count: u32,
    response_version: ResponseVersion,
}

impl ClientBuilder {
    /// Request an electronic (digitally signed) invoice.
    pub fn e_invoice(mut self, value: bool) -> Self {
        self.e_invoice = value;
        self
    }

    /// Passphrase of the signing key stored with the account
    /// (`kulcstartojelszo`).
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Ask the service to return the finished invoice document.
    pub fn request_invoice_download(mut self, value: bool) -> Self {
        self.request_invoice_download = value;
        self
    }

    /// Number of copies in the downloaded document (`szamlaLetoltesPld`).
    pub fn downloaded_invoice_count(mut self, count: u32) -> Self {
        self.downloaded_invoice_count = count;
        self
    }

    pub fn response_version(mut self, version: ResponseVersion) -> Self {
        self.response_version = version;
        self
    }

    /// Validate the authentication data and build the client with its
    /// cookie-persisting HTTP session.
    pub fn build(self) -> Result<Client, SzamlazzError> {
        self.auth.validate()?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| SzamlazzError::Transport(e.to_string()))?;
        Ok(Client {
            auth: self.auth,
            e_invoice: self.e_invoice,
            passphrase: self.passphrase,
            request_invoice_download: self.request_invoice_download,
            downloaded_invoice_count: self.downloaded_invoice_count,
            response_version: self.response_version,
            http,
        })
    }
}

impl Client {
    pub fn builder(auth: Auth) -> ClientBuilder {
        ClientBuilder {
            auth,
            e_invoice: false,
            passphrase: None,
            request_invoice_download: false,
            downloaded_invoice_count: 1,
            response_version: ResponseVersion::default(),
        }
    }

    /// Flip the download request for subsequent calls.
    pub fn set_request_invoice_download(&mut self, value: bool) {
        self.request_invoice_download = value;
    }

    /// Issue an invoice. On success returns the assigned invoice number,
    /// the totals reported by the service, and — when the client was
    /// configured to download — the PDF bytes.
    pub async fn issue_invoice(&self, invoice: &Invoice) -> Result<IssuedInvoice, SzamlazzError> {
        let xml = self.invoice_request_xml(invoice)?;
        let response = self.post(ISSUE_FILE_FIELD, xml).await?;
        self.process_issue_response(response)
    }

    /// Fetch the metadata of a previously issued invoice by invoice
    /// number or order number. The response document is returned as a
    /// flattened dotted-path → text mapping.
    pub async fn get_invoice_data(
        &self,
        query: &InvoiceQuery,
    ) -> Result<InvoiceData, SzamlazzError> {
        let xml = self.query_request_xml(query)?;
        let response = self.post(QUERY_FILE_FIELD, xml).await?;
        self.process_query_response(response)
    }

    /// Request the reversal (storno) of a previously issued invoice.
    /// The e-invoice and download flags are passed explicitly per call.
    pub async fn reverse_invoice(
        &self,
        invoice_id: &str,
        options: &ReversalOptions,
    ) -> Result<ReversedInvoice, SzamlazzError> {
        let xml = self.reversal_request_xml(invoice_id, options)?;
        let response = self.post(REVERSAL_FILE_FIELD, xml).await?;
        self.process_reversal_response(response)
    }

    /// One multipart POST: the request document goes up as an attached
    /// file named `request.xml`, not as a form value.
    async fn post(
        &self,
        file_field: &'static str,
        xml: String,
    ) -> Result<AgentResponse, SzamlazzError> {
        tracing::debug!(field = file_field, bytes = xml.len(), "sending agent request");

        let part = reqwest::multipart::Part::bytes(xml.into_bytes())
            .file_name("request.xml")
            .mime_str("text/xml")
            .map_err(|e| SzamlazzError::Transport(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part(file_field, part);

        let resp = self
            .http
            .post(AGENT_URL)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SzamlazzError::Transport(e.to_string()))?;

        let status = resp.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let mut headers = HashMap::new();
        for (name, value) in resp.headers() {
            headers.insert(
                name.as_str().to_ascii_lowercase(),
                value.to_str().unwrap_or_default().to_string(),
            );
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| SzamlazzError::Transport(e.to_string()))?
            .to_vec();

        tracing::debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "agent response received"
        );

        Ok(AgentResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}
