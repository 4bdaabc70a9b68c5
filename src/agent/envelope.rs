//! Request document builders, one envelope shape per operation.

use crate::core::{Invoice, SzamlazzError};
use crate::xml::{self, Value, XmlWriter};

use super::{ns, Auth, Client};

/// Identifier for an invoice lookup — the protocol requires exactly one
/// of the two.
#[derive(Debug, Clone)]
pub enum InvoiceQuery {
    /// Look up by the invoice number (`szamlaszam`).
    InvoiceId(String),
    /// Look up by the order number given at issuance (`rendelesSzam`).
    OrderNumber(String),
}

/// Per-call flags of a reversal request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversalOptions {
    /// Reverse as an electronic invoice.
    pub e_invoice: bool,
    /// Ask for the reversal document in the response.
    pub request_invoice_download: bool,
}

impl Auth {
    fn fields(&self) -> Vec<(&'static str, Option<Value>)> {
        match self {
            Self::Credentials { user, password } => vec![
                ("felhasznalo", Some(user.as_str().into())),
                ("jelszo", Some(password.as_str().into())),
            ],
            Self::Token(token) => vec![("szamlaagentkulcs", Some(token.as_str().into()))],
        }
    }
}

impl Client {
    /// Full `xmlszamla` request document: settings block plus the
    /// invoice fragment, with the literal XML declaration and namespace
    /// decoration the service expects.
    pub fn invoice_request_xml(&self, invoice: &Invoice) -> Result<String, SzamlazzError> {
        let mut w = XmlWriter::new();
        w.declaration()?;
        w.start_element_with_attrs(
            "xmlszamla",
            &[
                ("xmlns", ns::XMLSZAMLA),
                ("xmlns:xsi", ns::XSI),
                ("xsi:schemaLocation", ns::XMLSZAMLA_SCHEMA_LOCATION),
            ],
        )?;

        let mut fields = self.auth.fields();
        fields.extend([
            ("eszamla", Some(self.e_invoice.into())),
            (
                "kulcstartojelszo",
                self.passphrase.as_deref().map(Into::into),
            ),
            ("szamlaLetoltes", Some(self.request_invoice_download.into())),
            (
                "szamlaLetoltesPld",
                Some(i64::from(self.downloaded_invoice_count).into()),
            ),
            (
                "valaszVerzio",
                Some(i64::from(self.response_version.code()).into()),
            ),
        ]);
        xml::wrap_with_element(&mut w, "beallitasok", &fields)?;

        invoice.write_xml(&mut w)?;
        w.end_element("xmlszamla")?;
        w.into_string()
    }

    /// `xmlszamlaxml` lookup document. The identifier fields are flat
    /// children of the root, not wrapped in a settings block.
    pub fn query_request_xml(&self, query: &InvoiceQuery) -> Result<String, SzamlazzError> {
        let mut w = XmlWriter::new();
        w.declaration()?;
        w.start_element_with_attrs(
            "xmlszamlaxml",
            &[
                ("xmlns", ns::XMLSZAMLAXML),
                ("xmlns:xsi", ns::XSI),
                ("xsi:schemaLocation", ns::XMLSZAMLAXML_SCHEMA_LOCATION),
            ],
        )?;

        let (invoice_id, order_number) = match query {
            InvoiceQuery::InvoiceId(id) => (Some(id.as_str()), None),
            InvoiceQuery::OrderNumber(number) => (None, Some(number.as_str())),
        };
        let mut fields = self.auth.fields();
        fields.extend([
            ("szamlaszam", invoice_id.map(Into::into)),
            ("rendelesSzam", order_number.map(Into::into)),
            ("pdf", Some(self.request_invoice_download.into())),
        ]);
        xml::write_fields(&mut w, &fields)?;

        w.end_element("xmlszamlaxml")?;
        w.into_string()
    }

    /// `xmlszamlast` reversal document: settings block plus a header
    /// naming the invoice to reverse.
    pub fn reversal_request_xml(
        &self,
        invoice_id: &str,
        options: &ReversalOptions,
    ) -> Result<String, SzamlazzError> {
        let mut w = XmlWriter::new();
        w.declaration()?;
        w.start_element_with_attrs(
            "xmlszamlast",
            &[
                ("xmlns", ns::XMLSZAMLAST),
                ("xmlns:xsi", ns::XSI),
                ("xsi:schemaLocation", ns::XMLSZAMLAST_SCHEMA_LOCATION),
            ],
        )?;

        let mut fields = self.auth.fields();
        fields.extend([
            ("eszamla", Some(options.e_invoice.into())),
            (
                "szamlaLetoltes",
                Some(options.request_invoice_download.into()),
            ),
        ]);
        xml::wrap_with_element(&mut w, "beallitasok", &fields)?;

        xml::wrap_with_element(
            &mut w,
            "fejlec",
            &[
                ("szamlaszam", Some(invoice_id.into())),
                ("keltDatum", Some(chrono::Local::now().date_naive().into())),
            ],
        )?;

        w.end_element("xmlszamlast")?;
        w.into_string()
    }
}
