//! Response classification and success-path extraction.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::core::{AgentResponse, SzamlazzError};
use crate::xml;

use super::{Client, ResponseVersion};

/// Dotted path of the embedded PDF in a version-2 response body.
const PDF_PATH: &str = "xmlszamlavalasz.pdf";

/// Result of a successful invoice issuance.
#[derive(Debug, Clone)]
pub struct IssuedInvoice {
    /// Invoice number assigned by the service (`szlahu_szamlaszam`).
    pub invoice_id: String,
    /// Net total as reported, unparsed (`szlahu_nettovegosszeg`).
    pub net_total: String,
    /// Gross total as reported, unparsed (`szlahu_bruttovegosszeg`).
    pub gross_total: String,
    /// The invoice document, when a download was requested.
    pub pdf: Option<Vec<u8>>,
    /// Raw transport response.
    pub response: AgentResponse,
}

/// Result of a successful invoice lookup.
#[derive(Debug, Clone)]
pub struct InvoiceData {
    /// The response document flattened into dotted-path → text.
    pub fields: BTreeMap<String, String>,
    /// Raw transport response.
    pub response: AgentResponse,
}

/// Result of a successful reversal request.
#[derive(Debug, Clone)]
pub struct ReversedInvoice {
    /// Number of the reversal invoice, when the service reported one.
    pub invoice_id: Option<String>,
    /// The response body as opaque text.
    pub body: String,
    /// Raw transport response.
    pub response: AgentResponse,
}

/// Classify a raw response. HTTP-level failures take precedence over the
/// service's header signal; a 200 with `szlahu_error_code` set is a
/// service rejection even though the transport succeeded.
pub fn classify_response(response: AgentResponse) -> Result<AgentResponse, SzamlazzError> {
    if response.status != 200 {
        return Err(SzamlazzError::Http {
            status: response.status,
            status_text: response.status_text.clone(),
            response,
        });
    }
    if let Some(code) = response.headers.get("szlahu_error_code") {
        let code = code.clone();
        let message = response
            .headers
            .get("szlahu_error")
            .map(|m| decode_header_message(m))
            .unwrap_or_default();
        return Err(SzamlazzError::Service {
            code,
            message,
            response,
        });
    }
    Ok(response)
}

/// Decode a service header value: `+` means space and `%XX` is a percent
/// escape. Invalid escapes are kept verbatim.
pub fn decode_header_message(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn required_header(response: &AgentResponse, name: &str) -> Result<String, SzamlazzError> {
    response.headers.get(name).cloned().ok_or_else(|| {
        SzamlazzError::Parse {
            message: format!("missing {name} header in agent response"),
            response: Some(response.clone()),
        }
    })
}

fn parse_err(message: impl Into<String>, response: &AgentResponse) -> SzamlazzError {
    SzamlazzError::Parse {
        message: message.into(),
        response: Some(response.clone()),
    }
}

fn attach_response(err: SzamlazzError, response: &AgentResponse) -> SzamlazzError {
    match err {
        SzamlazzError::Parse { message, .. } => parse_err(message, response),
        other => other,
    }
}

fn extract_pdf(
    response: &AgentResponse,
    version: ResponseVersion,
) -> Result<Vec<u8>, SzamlazzError> {
    match version {
        // Version 1: the whole body is the PDF.
        ResponseVersion::Pdf => Ok(response.body.clone()),
        // Version 2: the body is XML with the PDF embedded as base64.
        ResponseVersion::XmlEmbedded => {
            let text = std::str::from_utf8(&response.body)
                .map_err(|e| parse_err(format!("response body is not UTF-8: {e}"), response))?;
            let fields = xml::extract_by_paths(text, &[PDF_PATH])
                .map_err(|e| attach_response(e, response))?;
            let encoded = fields
                .get(PDF_PATH)
                .ok_or_else(|| parse_err("no pdf field in agent response body", response))?;
            let compact: String = encoded
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            BASE64
                .decode(compact)
                .map_err(|e| parse_err(format!("embedded pdf is not valid base64: {e}"), response))
        }
    }
}

impl Client {
    /// Interpret an issuance response. A PDF-extraction failure after an
    /// otherwise successful classification fails the whole call; the raw
    /// response travels inside the error.
    pub fn process_issue_response(
        &self,
        response: AgentResponse,
    ) -> Result<IssuedInvoice, SzamlazzError> {
        let response = classify_response(response)?;
        let invoice_id = required_header(&response, "szlahu_szamlaszam")?;
        let net_total = required_header(&response, "szlahu_nettovegosszeg")?;
        let gross_total = required_header(&response, "szlahu_bruttovegosszeg")?;
        let pdf = if self.request_invoice_download {
            Some(extract_pdf(&response, self.response_version)?)
        } else {
            None
        };
        Ok(IssuedInvoice {
            invoice_id,
            net_total,
            gross_total,
            pdf,
            response,
        })
    }

    /// Interpret a lookup response: the body is parsed as XML and
    /// flattened.
    pub fn process_query_response(
        &self,
        response: AgentResponse,
    ) -> Result<InvoiceData, SzamlazzError> {
        let response = classify_response(response)?;
        let text = std::str::from_utf8(&response.body)
            .map_err(|e| parse_err(format!("response body is not UTF-8: {e}"), &response))?;
        let fields = xml::flatten(text).map_err(|e| attach_response(e, &response))?;
        Ok(InvoiceData { fields, response })
    }

    /// Interpret a reversal response: the body stays opaque text.
    pub fn process_reversal_response(
        &self,
        response: AgentResponse,
    ) -> Result<ReversedInvoice, SzamlazzError> {
        let response = classify_response(response)?;
        let body = String::from_utf8_lossy(&response.body).into_owned();
        let invoice_id = response.headers.get("szlahu_szamlaszam").cloned();
        Ok(ReversedInvoice {
            invoice_id,
            body,
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)]) -> AgentResponse {
        AgentResponse {
            status,
            status_text: if status == 500 {
                "Internal Server Error".into()
            } else {
                "OK".into()
            },
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: Vec::new(),
        }
    }

    #[test]
    fn decode_plus_and_percent_escapes() {
        assert_eq!(
            decode_header_message("Hib%C3%A1s+vev%C5%91"),
            "Hibás vevő"
        );
        assert_eq!(decode_header_message("no+escapes+here"), "no escapes here");
        assert_eq!(decode_header_message("broken%2"), "broken%2");
        assert_eq!(decode_header_message("broken%zz"), "broken%zz");
    }

    #[test]
    fn http_error_wins_over_service_headers() {
        let err = classify_response(response(
            500,
            &[("szlahu_error_code", "57"), ("szlahu_error", "ignored")],
        ))
        .unwrap_err();
        match err {
            SzamlazzError::Http {
                status, response, ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(response.status, 500);
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[test]
    fn service_error_is_decoded() {
        let err = classify_response(response(
            200,
            &[
                ("szlahu_error_code", "57"),
                ("szlahu_error", "Some+error+message"),
            ],
        ))
        .unwrap_err();
        match err {
            SzamlazzError::Service { code, message, .. } => {
                assert_eq!(code, "57");
                assert_eq!(message, "Some error message");
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }

    #[test]
    fn clean_response_passes_through() {
        let resp = classify_response(response(200, &[("szlahu_szamlaszam", "2016-139")]));
        assert!(resp.is_ok());
    }
}
