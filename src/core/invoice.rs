use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::buyer::Buyer;
use super::enums::{Currency, Language, PaymentMethod};
use super::error::SzamlazzError;
use super::item::Item;
use super::seller::Seller;
use crate::xml::{self, XmlWriter};

/// A complete invoice: header fields, optional seller overrides, the
/// mandatory buyer and the ordered line items.
///
/// Constructed once via [`InvoiceBuilder`], immutable afterwards;
/// serialization is a pure read and may run any number of times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub issue_date: NaiveDate,
    pub fulfillment_date: NaiveDate,
    pub due_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub currency: Currency,
    pub language: Language,
    pub exchange_rate: Decimal,
    pub exchange_bank: Option<String>,
    pub seller: Option<Seller>,
    pub buyer: Buyer,
    /// Must be non-empty by the time the invoice is serialized.
    pub items: Vec<Item>,
    pub order_number: Option<String>,
    /// Issue a proforma (díjbekérő) instead of a real invoice.
    pub proforma: Option<bool>,
    pub invoice_id_prefix: Option<String>,
    pub paid: Option<bool>,
    pub comment: Option<String>,
    /// Reference to an extra logo uploaded to the account.
    pub logo_image: Option<String>,
    /// Mark the invoice as a prepayment (előleg) invoice.
    pub prepayment: bool,
}

/// Builder for [`Invoice`] with the protocol's defaults: all three dates
/// default to the current local date, payment method to bank transfer,
/// currency to Ft, language to Hungarian.
pub struct InvoiceBuilder {
    issue_date: Option<NaiveDate>,
    fulfillment_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    payment_method: PaymentMethod,
    currency: Currency,
    language: Language,
    exchange_rate: Decimal,
    exchange_bank: Option<String>,
    seller: Option<Seller>,
    buyer: Buyer,
    items: Vec<Item>,
    order_number: Option<String>,
    proforma: Option<bool>,
    invoice_id_prefix: Option<String>,
    paid: Option<bool>,
    comment: Option<String>,
    logo_image: Option<String>,
    prepayment: bool,
}

impl InvoiceBuilder {
    pub fn new(buyer: Buyer) -> Self {
        Self {
            issue_date: None,
            fulfillment_date: None,
            due_date: None,
            payment_method: PaymentMethod::BankTransfer,
            currency: Currency::Ft,
            language: Language::Hungarian,
            exchange_rate: Decimal::ZERO,
            exchange_bank: None,
            seller: None,
            buyer,
            items: Vec::new(),
            order_number: None,
            proforma: None,
            invoice_id_prefix: None,
            paid: None,
            comment: None,
            logo_image: None,
            prepayment: false,
        }
    }

    pub fn issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn fulfillment_date(mut self, date: NaiveDate) -> Self {
        self.fulfillment_date = Some(date);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Exchange rate and the bank whose rate applies, for non-Ft
    /// currencies.
    pub fn exchange(mut self, bank: impl Into<String>, rate: Decimal) -> Self {
        self.exchange_bank = Some(bank.into());
        self.exchange_rate = rate;
        self
    }

    pub fn seller(mut self, seller: Seller) -> Self {
        self.seller = Some(seller);
        self
    }

    pub fn add_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn order_number(mut self, number: impl Into<String>) -> Self {
        self.order_number = Some(number.into());
        self
    }

    pub fn proforma(mut self, proforma: bool) -> Self {
        self.proforma = Some(proforma);
        self
    }

    pub fn invoice_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.invoice_id_prefix = Some(prefix.into());
        self
    }

    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = Some(paid);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn logo_image(mut self, logo: impl Into<String>) -> Self {
        self.logo_image = Some(logo.into());
        self
    }

    pub fn prepayment(mut self, prepayment: bool) -> Self {
        self.prepayment = prepayment;
        self
    }

    /// Build the invoice, filling unset dates with the current local
    /// date. Item-list emptiness is checked at serialization, not here.
    pub fn build(self) -> Invoice {
        let today = chrono::Local::now().date_naive();
        Invoice {
            issue_date: self.issue_date.unwrap_or(today),
            fulfillment_date: self.fulfillment_date.unwrap_or(today),
            due_date: self.due_date.unwrap_or(today),
            payment_method: self.payment_method,
            currency: self.currency,
            language: self.language,
            exchange_rate: self.exchange_rate,
            exchange_bank: self.exchange_bank,
            seller: self.seller,
            buyer: self.buyer,
            items: self.items,
            order_number: self.order_number,
            proforma: self.proforma,
            invoice_id_prefix: self.invoice_id_prefix,
            paid: self.paid,
            comment: self.comment,
            logo_image: self.logo_image,
            prepayment: self.prepayment,
        }
    }
}

impl Invoice {
    /// Write the invoice fragment: the `fejlec` header block, the `elado`
    /// overrides when a seller is present, the `vevo` block, then the
    /// items wrapped in `tetelek`, each formatted with the invoice
    /// currency's precision.
    pub fn write_xml(&self, w: &mut XmlWriter) -> Result<(), SzamlazzError> {
        if self.items.is_empty() {
            return Err(SzamlazzError::Validation(
                "invoice must contain at least one item".into(),
            ));
        }

        xml::wrap_with_element(
            w,
            "fejlec",
            &[
                ("keltDatum", Some(self.issue_date.into())),
                ("teljesitesDatum", Some(self.fulfillment_date.into())),
                ("fizetesiHataridoDatum", Some(self.due_date.into())),
                ("fizmod", Some(self.payment_method.code().into())),
                ("penznem", Some(self.currency.code().into())),
                ("szamlaNyelve", Some(self.language.code().into())),
                ("megjegyzes", self.comment.as_deref().map(Into::into)),
                ("arfolyamBank", self.exchange_bank.as_deref().map(Into::into)),
                ("arfolyam", Some(self.exchange_rate.into())),
                ("rendelesSzam", self.order_number.as_deref().map(Into::into)),
                ("elolegszamla", Some(self.prepayment.into())),
                ("dijbekero", self.proforma.map(Into::into)),
                ("logoExtra", self.logo_image.as_deref().map(Into::into)),
                (
                    "szamlaszamElotag",
                    self.invoice_id_prefix.as_deref().map(Into::into),
                ),
                ("fizetve", self.paid.map(Into::into)),
            ],
        )?;

        if let Some(seller) = &self.seller {
            seller.write_xml(w)?;
        }
        self.buyer.write_xml(w)?;

        w.start_element("tetelek")?;
        for item in &self.items {
            item.write_xml(w, self.currency)?;
        }
        w.end_element("tetelek")?;
        Ok(())
    }

    /// Serialize the fragment on its own, without the request envelope.
    pub fn to_xml_fragment(&self) -> Result<String, SzamlazzError> {
        let mut w = XmlWriter::new();
        self.write_xml(&mut w)?;
        w.into_string()
    }
}
