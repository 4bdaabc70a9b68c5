use serde::{Deserialize, Serialize};

use super::enums::TaxSubject;
use super::error::SzamlazzError;
use crate::xml::{self, Value, XmlWriter};

/// Postal address used when the invoice is mailed somewhere other than
/// the buyer's billing address. Mirrors the main address shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostAddress {
    pub name: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

/// The invoiced party. Required on every invoice.
///
/// Immutable after construction; [`BuyerBuilder::build`] runs the
/// required-field checks once, fail-fast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buyer {
    pub name: String,
    pub country: Option<String>,
    /// Postal code. Must be present but may be empty.
    pub zip: String,
    pub city: String,
    pub address: String,
    pub email: Option<String>,
    /// Ask the service to e-mail the invoice to the buyer.
    pub send_email: Option<bool>,
    pub tax_subject: Option<TaxSubject>,
    pub tax_number: Option<String>,
    pub tax_number_eu: Option<String>,
    pub post_address: PostAddress,
    pub identifier: Option<i64>,
    pub issuer_name: Option<String>,
    pub phone: Option<String>,
    pub comment: Option<String>,
}

/// Builder for [`Buyer`].
pub struct BuyerBuilder {
    name: String,
    country: Option<String>,
    zip: String,
    city: String,
    address: String,
    email: Option<String>,
    send_email: Option<bool>,
    tax_subject: Option<TaxSubject>,
    tax_number: Option<String>,
    tax_number_eu: Option<String>,
    post_address: PostAddress,
    identifier: Option<i64>,
    issuer_name: Option<String>,
    phone: Option<String>,
    comment: Option<String>,
}

impl BuyerBuilder {
    pub fn new(
        name: impl Into<String>,
        zip: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country: None,
            zip: zip.into(),
            city: city.into(),
            address: address.into(),
            email: None,
            send_email: None,
            tax_subject: None,
            tax_number: None,
            tax_number_eu: None,
            post_address: PostAddress::default(),
            identifier: None,
            issuer_name: None,
            phone: None,
            comment: None,
        }
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn send_email(mut self, send: bool) -> Self {
        self.send_email = Some(send);
        self
    }

    pub fn tax_subject(mut self, subject: TaxSubject) -> Self {
        self.tax_subject = Some(subject);
        self
    }

    pub fn tax_number(mut self, number: impl Into<String>) -> Self {
        self.tax_number = Some(number.into());
        self
    }

    pub fn tax_number_eu(mut self, number: impl Into<String>) -> Self {
        self.tax_number_eu = Some(number.into());
        self
    }

    pub fn post_address(mut self, post_address: PostAddress) -> Self {
        self.post_address = post_address;
        self
    }

    pub fn identifier(mut self, identifier: i64) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn issuer_name(mut self, name: impl Into<String>) -> Self {
        self.issuer_name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Validate the required fields and build the buyer. Fails on the
    /// first violation.
    pub fn build(self) -> Result<Buyer, SzamlazzError> {
        if self.name.trim().is_empty() {
            return Err(SzamlazzError::Validation(
                "buyer name must not be empty".into(),
            ));
        }
        if self.city.trim().is_empty() {
            return Err(SzamlazzError::Validation(
                "buyer city must not be empty".into(),
            ));
        }
        if self.address.trim().is_empty() {
            return Err(SzamlazzError::Validation(
                "buyer address must not be empty".into(),
            ));
        }

        Ok(Buyer {
            name: self.name,
            country: self.country,
            zip: self.zip,
            city: self.city,
            address: self.address,
            email: self.email,
            send_email: self.send_email,
            tax_subject: self.tax_subject,
            tax_number: self.tax_number,
            tax_number_eu: self.tax_number_eu,
            post_address: self.post_address,
            identifier: self.identifier,
            issuer_name: self.issuer_name,
            phone: self.phone,
            comment: self.comment,
        })
    }
}

impl Buyer {
    /// Write the `vevo` fragment.
    pub fn write_xml(&self, w: &mut XmlWriter) -> Result<(), SzamlazzError> {
        xml::wrap_with_element(
            w,
            "vevo",
            &[
                ("nev", Some(self.name.as_str().into())),
                ("orszag", self.country.as_deref().map(Into::into)),
                ("irsz", Some(self.zip.as_str().into())),
                ("telepules", Some(self.city.as_str().into())),
                ("cim", Some(self.address.as_str().into())),
                ("email", self.email.as_deref().map(Into::into)),
                ("sendEmail", self.send_email.map(Into::into)),
                (
                    "adoalany",
                    self.tax_subject.map(|t| Value::Int(i64::from(t.code()))),
                ),
                ("adoszam", self.tax_number.as_deref().map(Into::into)),
                ("adoszamEU", self.tax_number_eu.as_deref().map(Into::into)),
                (
                    "postazasiNev",
                    self.post_address.name.as_deref().map(Into::into),
                ),
                (
                    "postazasiOrszag",
                    self.post_address.country.as_deref().map(Into::into),
                ),
                (
                    "postazasiIrsz",
                    self.post_address.zip.as_deref().map(Into::into),
                ),
                (
                    "postazasiTelepules",
                    self.post_address.city.as_deref().map(Into::into),
                ),
                (
                    "postazasiCim",
                    self.post_address.address.as_deref().map(Into::into),
                ),
                ("azonosito", self.identifier.map(Value::Int)),
                ("alairoNeve", self.issuer_name.as_deref().map(Into::into)),
                ("telefonszam", self.phone.as_deref().map(Into::into)),
                ("megjegyzes", self.comment.as_deref().map(Into::into)),
            ],
        )
    }

    /// Serialize a standalone `vevo` document.
    pub fn to_xml(&self) -> Result<String, SzamlazzError> {
        let mut w = XmlWriter::new();
        self.write_xml(&mut w)?;
        w.into_string()
    }
}
