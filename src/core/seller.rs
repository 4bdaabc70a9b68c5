use serde::{Deserialize, Serialize};

use super::error::SzamlazzError;
use crate::xml::{self, XmlWriter};

/// Bank account shown on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub account_number: String,
}

/// Settings for the e-mail the service sends alongside the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSettings {
    pub reply_to: String,
    pub subject: String,
    pub message: String,
}

/// Optional seller overrides. The account registered with the service
/// owns the seller identity; this entity only overrides bank data, the
/// outgoing e-mail envelope and the signer name, so every field is
/// optional and construction cannot fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seller {
    pub bank: Option<Bank>,
    pub email: Option<EmailSettings>,
    pub issuer_name: Option<String>,
}

/// Builder for [`Seller`].
#[derive(Default)]
pub struct SellerBuilder {
    bank: Option<Bank>,
    email: Option<EmailSettings>,
    issuer_name: Option<String>,
}

impl SellerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bank(mut self, name: impl Into<String>, account_number: impl Into<String>) -> Self {
        self.bank = Some(Bank {
            name: name.into(),
            account_number: account_number.into(),
        });
        self
    }

    pub fn email(
        mut self,
        reply_to: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.email = Some(EmailSettings {
            reply_to: reply_to.into(),
            subject: subject.into(),
            message: message.into(),
        });
        self
    }

    pub fn issuer_name(mut self, name: impl Into<String>) -> Self {
        self.issuer_name = Some(name.into());
        self
    }

    pub fn build(self) -> Seller {
        Seller {
            bank: self.bank,
            email: self.email,
            issuer_name: self.issuer_name,
        }
    }
}

impl Seller {
    /// Write the `elado` fragment.
    pub fn write_xml(&self, w: &mut XmlWriter) -> Result<(), SzamlazzError> {
        xml::wrap_with_element(
            w,
            "elado",
            &[
                ("bank", self.bank.as_ref().map(|b| b.name.as_str().into())),
                (
                    "bankszamlaszam",
                    self.bank.as_ref().map(|b| b.account_number.as_str().into()),
                ),
                (
                    "emailReplyto",
                    self.email.as_ref().map(|e| e.reply_to.as_str().into()),
                ),
                (
                    "emailTargy",
                    self.email.as_ref().map(|e| e.subject.as_str().into()),
                ),
                (
                    "emailSzoveg",
                    self.email.as_ref().map(|e| e.message.as_str().into()),
                ),
                ("alairoNeve", self.issuer_name.as_deref().map(Into::into)),
            ],
        )
    }

    /// Serialize a standalone `elado` document.
    pub fn to_xml(&self) -> Result<String, SzamlazzError> {
        let mut w = XmlWriter::new();
        self.write_xml(&mut w)?;
        w.into_string()
    }
}
