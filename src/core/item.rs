use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::enums::{Currency, VatRate};
use super::error::SzamlazzError;
use crate::xml::{self, Value, XmlWriter};

/// Derived line totals are carried at this precision; the invoice
/// currency's minor-unit precision applies only when formatting.
const DERIVED_SCALE: u32 = 2;

fn round_money(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(DERIVED_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// One billable row on an invoice.
///
/// Both unit prices and all line totals are present after construction —
/// [`ItemBuilder::build`] derives whichever side was not supplied from the
/// VAT rate. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub label: String,
    pub quantity: Decimal,
    /// Free-form unit of measure (e.g. "db", "óra").
    pub unit: String,
    pub vat: VatRate,
    pub net_unit_price: Decimal,
    pub gross_unit_price: Decimal,
    /// `net_unit_price × quantity`, rounded.
    pub net_total: Decimal,
    /// Zero for symbolic VAT codes.
    pub vat_value: Decimal,
    pub gross_total: Decimal,
    pub comment: Option<String>,
}

/// Builder for [`Item`]. Exactly one of
/// [`net_unit_price`](Self::net_unit_price) /
/// [`gross_unit_price`](Self::gross_unit_price) must be supplied.
pub struct ItemBuilder {
    label: String,
    quantity: Decimal,
    unit: String,
    vat: VatRate,
    net_unit_price: Option<Decimal>,
    gross_unit_price: Option<Decimal>,
    comment: Option<String>,
}

impl ItemBuilder {
    pub fn new(
        label: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        vat: VatRate,
    ) -> Self {
        Self {
            label: label.into(),
            quantity,
            unit: unit.into(),
            vat,
            net_unit_price: None,
            gross_unit_price: None,
            comment: None,
        }
    }

    pub fn net_unit_price(mut self, price: Decimal) -> Self {
        self.net_unit_price = Some(price);
        self
    }

    pub fn gross_unit_price(mut self, price: Decimal) -> Self {
        self.gross_unit_price = Some(price);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Validate the inputs and derive the complementary unit price, the
    /// line subtotal, the VAT amount and the gross total.
    pub fn build(self) -> Result<Item, SzamlazzError> {
        let rate = match self.vat {
            VatRate::Percent(p) => {
                if p < Decimal::ZERO || p > dec!(100) {
                    return Err(SzamlazzError::Validation(format!(
                        "VAT rate must be between 0 and 100, got {p}"
                    )));
                }
                Some(p)
            }
            _ => None,
        };

        let factor = rate.map(|r| Decimal::ONE + r / dec!(100));
        let (net_unit_price, gross_unit_price) =
            match (self.net_unit_price, self.gross_unit_price) {
                (Some(_), Some(_)) => {
                    return Err(SzamlazzError::Validation(
                        "exactly one of net and gross unit price must be supplied, got both"
                            .into(),
                    ));
                }
                (None, None) => {
                    return Err(SzamlazzError::Validation(
                        "exactly one of net and gross unit price must be supplied, got neither"
                            .into(),
                    ));
                }
                // Symbolic VAT codes make no net/gross distinction.
                (Some(net), None) => (net, factor.map_or(net, |f| net * f)),
                (None, Some(gross)) => (factor.map_or(gross, |f| gross / f), gross),
            };

        let net_total = round_money(net_unit_price * self.quantity);
        let (vat_value, gross_total) = match rate {
            Some(r) => {
                let vat = round_money(net_total * r / dec!(100));
                (vat, net_total + vat)
            }
            None => (Decimal::ZERO, net_total),
        };

        Ok(Item {
            label: self.label,
            quantity: self.quantity,
            unit: self.unit,
            vat: self.vat,
            net_unit_price,
            gross_unit_price,
            net_total,
            vat_value,
            gross_total,
            comment: self.comment,
        })
    }
}

impl Item {
    /// Write the `tetel` fragment. Monetary fields are formatted with the
    /// invoice currency's minor-unit precision.
    pub fn write_xml(&self, w: &mut XmlWriter, currency: Currency) -> Result<(), SzamlazzError> {
        let p = currency.precision();
        xml::wrap_with_element(
            w,
            "tetel",
            &[
                ("megnevezes", Some(self.label.as_str().into())),
                ("mennyiseg", Some(self.quantity.into())),
                ("mennyisegiEgyseg", Some(self.unit.as_str().into())),
                ("nettoEgysegar", Some(Value::Money(self.net_unit_price, p))),
                ("afakulcs", Some(self.vat.code().into())),
                ("nettoErtek", Some(Value::Money(self.net_total, p))),
                ("afaErtek", Some(Value::Money(self.vat_value, p))),
                ("bruttoErtek", Some(Value::Money(self.gross_total, p))),
                ("megjegyzes", self.comment.as_deref().map(Into::into)),
            ],
        )
    }

    /// Serialize a standalone `tetel` document.
    pub fn to_xml(&self, currency: Currency) -> Result<String, SzamlazzError> {
        let mut w = XmlWriter::new();
        self.write_xml(&mut w, currency)?;
        w.into_string()
    }
}
