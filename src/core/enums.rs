//! Closed wire-value sets of the agent XML dialect.
//!
//! Every field the protocol restricts to a fixed vocabulary is a Rust enum
//! here, each variant mapped 1:1 to the literal token the service expects.
//! Invalid members are unrepresentable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice currency (`penznem`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Hungarian forint, legacy "Ft" token.
    Ft,
    /// Hungarian forint, ISO token.
    Huf,
    Eur,
    Chf,
    Usd,
    Aud,
    Aed,
    Bgn,
    Cad,
    Cny,
    Czk,
    Dkk,
    Eek,
    Gbp,
    Hrk,
    Isk,
    Jpy,
    Ltl,
    Lvl,
    Nok,
    Nzd,
    Pln,
    Ron,
    Rub,
    Sek,
    Skk,
    Uah,
}

impl Currency {
    /// Wire token.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ft => "Ft",
            Self::Huf => "HUF",
            Self::Eur => "EUR",
            Self::Chf => "CHF",
            Self::Usd => "USD",
            Self::Aud => "AUD",
            Self::Aed => "AED",
            Self::Bgn => "BGN",
            Self::Cad => "CAD",
            Self::Cny => "CNY",
            Self::Czk => "CZK",
            Self::Dkk => "DKK",
            Self::Eek => "EEK",
            Self::Gbp => "GBP",
            Self::Hrk => "HRK",
            Self::Isk => "ISK",
            Self::Jpy => "JPY",
            Self::Ltl => "LTL",
            Self::Lvl => "LVL",
            Self::Nok => "NOK",
            Self::Nzd => "NZD",
            Self::Pln => "PLN",
            Self::Ron => "RON",
            Self::Rub => "RUB",
            Self::Sek => "SEK",
            Self::Skk => "SKK",
            Self::Uah => "UAH",
        }
    }

    /// Parse from a wire token.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Ft" => Some(Self::Ft),
            "HUF" => Some(Self::Huf),
            "EUR" => Some(Self::Eur),
            "CHF" => Some(Self::Chf),
            "USD" => Some(Self::Usd),
            "AUD" => Some(Self::Aud),
            "AED" => Some(Self::Aed),
            "BGN" => Some(Self::Bgn),
            "CAD" => Some(Self::Cad),
            "CNY" => Some(Self::Cny),
            "CZK" => Some(Self::Czk),
            "DKK" => Some(Self::Dkk),
            "EEK" => Some(Self::Eek),
            "GBP" => Some(Self::Gbp),
            "HRK" => Some(Self::Hrk),
            "ISK" => Some(Self::Isk),
            "JPY" => Some(Self::Jpy),
            "LTL" => Some(Self::Ltl),
            "LVL" => Some(Self::Lvl),
            "NOK" => Some(Self::Nok),
            "NZD" => Some(Self::Nzd),
            "PLN" => Some(Self::Pln),
            "RON" => Some(Self::Ron),
            "RUB" => Some(Self::Rub),
            "SEK" => Some(Self::Sek),
            "SKK" => Some(Self::Skk),
            "UAH" => Some(Self::Uah),
            _ => None,
        }
    }

    /// Minor-unit decimal places used when formatting monetary fields
    /// in this currency.
    pub fn precision(&self) -> u32 {
        match self {
            Self::Ft | Self::Huf | Self::Isk | Self::Jpy => 0,
            _ => 2,
        }
    }
}

/// Invoice language (`szamlaNyelve`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Hungarian,
    English,
    German,
    Italian,
    Romanian,
    Slovak,
}

impl Language {
    /// Wire token (ISO 639-1).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Hungarian => "hu",
            Self::English => "en",
            Self::German => "de",
            Self::Italian => "it",
            Self::Romanian => "ro",
            Self::Slovak => "sk",
        }
    }

    /// Parse from a wire token.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "hu" => Some(Self::Hungarian),
            "en" => Some(Self::English),
            "de" => Some(Self::German),
            "it" => Some(Self::Italian),
            "ro" => Some(Self::Romanian),
            "sk" => Some(Self::Slovak),
            _ => None,
        }
    }
}

/// Payment method (`fizmod`). The tokens are the Hungarian display
/// strings the service expects verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    CreditCard,
    PayPal,
}

impl PaymentMethod {
    /// Wire token.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cash => "készpénz",
            Self::BankTransfer => "átutalás",
            Self::CreditCard => "bankkártya",
            Self::PayPal => "PayPal",
        }
    }

    /// Parse from a wire token.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "készpénz" => Some(Self::Cash),
            "átutalás" => Some(Self::BankTransfer),
            "bankkártya" => Some(Self::CreditCard),
            "PayPal" => Some(Self::PayPal),
            _ => None,
        }
    }
}

/// Buyer tax-subject classification (`adoalany`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxSubject {
    /// Company outside the EU.
    NonEuCompany,
    /// Company inside the EU.
    EuCompany,
    /// Has a Hungarian tax number.
    HungarianTaxId,
    /// Classification unknown.
    Unknown,
    /// No tax number (private person).
    NoTaxId,
}

impl TaxSubject {
    /// Wire token (signed integer).
    pub fn code(&self) -> i8 {
        match self {
            Self::NonEuCompany => 7,
            Self::EuCompany => 6,
            Self::HungarianTaxId => 1,
            Self::Unknown => 0,
            Self::NoTaxId => -1,
        }
    }

    /// Parse from a wire token.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            7 => Some(Self::NonEuCompany),
            6 => Some(Self::EuCompany),
            1 => Some(Self::HungarianTaxId),
            0 => Some(Self::Unknown),
            -1 => Some(Self::NoTaxId),
            _ => None,
        }
    }
}

/// VAT treatment of a line item (`afakulcs`): a numeric percentage or one
/// of the symbolic exemption codes. Symbolic codes force a zero VAT value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VatRate {
    /// Numeric percentage, must lie in [0, 100].
    Percent(Decimal),
    /// TAM — tárgyi adómentes (exempt by the nature of the supply).
    Tam,
    /// AAM — alanyi adómentes (subject-level exemption).
    Aam,
    /// EU — intra-Community supply.
    Eu,
    /// EUK — supply outside the EU.
    Euk,
    /// MAA — mentes az adó alól (outside the scope of VAT).
    Maa,
}

impl VatRate {
    /// Wire token: the normalized percentage for numeric rates, the
    /// symbolic code otherwise.
    pub fn code(&self) -> String {
        match self {
            Self::Percent(p) => p.normalize().to_string(),
            Self::Tam => "TAM".into(),
            Self::Aam => "AAM".into(),
            Self::Eu => "EU".into(),
            Self::Euk => "EUK".into(),
            Self::Maa => "MAA".into(),
        }
    }

    /// The numeric percentage, if this is not a symbolic code.
    pub fn percent(&self) -> Option<Decimal> {
        match self {
            Self::Percent(p) => Some(*p),
            _ => None,
        }
    }

    /// Whether this is one of the symbolic exemption codes.
    pub fn is_exempt(&self) -> bool {
        !matches!(self, Self::Percent(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_codes_round_trip() {
        for c in [Currency::Ft, Currency::Huf, Currency::Eur, Currency::Jpy] {
            assert_eq!(Currency::from_code(c.code()), Some(c));
        }
        assert_eq!(Currency::from_code("XYZ"), None);
    }

    #[test]
    fn zero_decimal_currencies() {
        assert_eq!(Currency::Ft.precision(), 0);
        assert_eq!(Currency::Huf.precision(), 0);
        assert_eq!(Currency::Jpy.precision(), 0);
        assert_eq!(Currency::Eur.precision(), 2);
        assert_eq!(Currency::Usd.precision(), 2);
    }

    #[test]
    fn payment_method_tokens() {
        assert_eq!(PaymentMethod::BankTransfer.code(), "átutalás");
        assert_eq!(
            PaymentMethod::from_code("készpénz"),
            Some(PaymentMethod::Cash)
        );
        assert_eq!(PaymentMethod::from_code("cash"), None);
    }

    #[test]
    fn tax_subject_tokens() {
        assert_eq!(TaxSubject::NoTaxId.code(), -1);
        assert_eq!(TaxSubject::from_code(7), Some(TaxSubject::NonEuCompany));
        assert_eq!(TaxSubject::from_code(3), None);
    }

    #[test]
    fn vat_rate_tokens() {
        assert_eq!(VatRate::Percent(dec!(27)).code(), "27");
        assert_eq!(VatRate::Percent(dec!(5.5)).code(), "5.5");
        assert_eq!(VatRate::Tam.code(), "TAM");
        assert!(VatRate::Aam.is_exempt());
        assert!(!VatRate::Percent(dec!(0)).is_exempt());
        assert_eq!(VatRate::Percent(dec!(27)).percent(), Some(dec!(27)));
        assert_eq!(VatRate::Eu.percent(), None);
    }
}
