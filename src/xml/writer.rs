use std::io::Cursor;

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::{Decimal, RoundingStrategy};

use super::XmlResult;
use crate::core::SzamlazzError;

fn xml_io(e: std::io::Error) -> SzamlazzError {
    SzamlazzError::Xml(format!("XML write error: {e}"))
}

/// Indent-aware XML writer over a growable buffer.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    /// Emit the `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub fn declaration(&mut self) -> Result<&mut Self, SzamlazzError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn into_string(self) -> XmlResult {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| SzamlazzError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, SzamlazzError> {
        let elem = BytesStart::new(name);
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SzamlazzError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, SzamlazzError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, SzamlazzError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// A typed leaf value in an ordered field list. The closed set makes an
/// unsupported field type a compile-time error.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Escaped text content.
    Text(String),
    /// Rendered as the literal `true` / `false` tokens.
    Bool(bool),
    Int(i64),
    /// Locale-invariant decimal, trailing zeros stripped.
    Decimal(Decimal),
    /// Monetary amount rendered with a fixed number of decimal places.
    Money(Decimal, u32),
    /// Rendered as `YYYY-MM-DD`.
    Date(NaiveDate),
}

impl Value {
    fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Decimal(d) => format_decimal(*d),
            Self::Money(d, scale) => format_money(*d, *scale),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

/// Write an ordered field list as sibling elements, skipping absent
/// fields entirely — a `None` never produces an empty tag.
pub fn write_fields(
    w: &mut XmlWriter,
    fields: &[(&str, Option<Value>)],
) -> Result<(), SzamlazzError> {
    for (name, value) in fields {
        if let Some(v) = value {
            w.text_element(name, &v.render())?;
        }
    }
    Ok(())
}

/// Write an ordered field list wrapped in `tag`.
pub fn wrap_with_element(
    w: &mut XmlWriter,
    tag: &str,
    fields: &[(&str, Option<Value>)],
) -> Result<(), SzamlazzError> {
    w.start_element(tag)?;
    write_fields(w, fields)?;
    w.end_element(tag)?;
    Ok(())
}

/// Format a decimal in locale-invariant form with trailing zeros stripped.
pub fn format_decimal(d: Decimal) -> String {
    d.normalize().to_string()
}

/// Format a monetary amount with exactly `scale` decimal places, rounding
/// midpoints away from zero.
pub fn format_money(d: Decimal, scale: u32) -> String {
    let rounded = d
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let s = rounded.to_string();
    if scale == 0 {
        return s;
    }
    match s.find('.') {
        Some(dot) => {
            let decimals = (s.len() - dot - 1) as u32;
            if decimals < scale {
                format!("{s}{}", "0".repeat((scale - decimals) as usize))
            } else {
                s
            }
        }
        None => format!("{s}.{}", "0".repeat(scale as usize)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_money_cases() {
        assert_eq!(format_money(dec!(100), 2), "100.00");
        assert_eq!(format_money(dec!(54.297), 2), "54.30");
        assert_eq!(format_money(dec!(127.6985), 2), "127.70");
        assert_eq!(format_money(dec!(201.1), 2), "201.10");
        assert_eq!(format_money(dec!(201.1), 0), "201");
        assert_eq!(format_money(dec!(201.5), 0), "202");
        assert_eq!(format_money(dec!(-2.005), 2), "-2.01");
    }

    #[test]
    fn format_decimal_strips_trailing_zeros() {
        assert_eq!(format_decimal(dec!(27.00)), "27");
        assert_eq!(format_decimal(dec!(5.50)), "5.5");
        assert_eq!(format_decimal(dec!(0)), "0");
    }

    #[test]
    fn fields_skip_absent_values() {
        let mut w = XmlWriter::new();
        wrap_with_element(
            &mut w,
            "vevo",
            &[
                ("nev", Some("Kovács Bt.".into())),
                ("orszag", None),
                ("fizetve", Some(false.into())),
            ],
        )
        .unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.contains("<nev>Kovács Bt.</nev>"));
        assert!(!xml.contains("orszag"));
        assert!(xml.contains("<fizetve>false</fizetve>"));
    }

    #[test]
    fn text_is_escaped() {
        let mut w = XmlWriter::new();
        w.text_element("bank", "Test Bank <name> & co").unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.contains("Test Bank &lt;name&gt; &amp; co"));
    }

    #[test]
    fn date_and_int_rendering() {
        let mut w = XmlWriter::new();
        let date = NaiveDate::from_ymd_opt(2016, 5, 23).unwrap();
        write_fields(
            &mut w,
            &[
                ("keltDatum", Some(date.into())),
                ("azonosito", Some(Value::Int(42))),
            ],
        )
        .unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.contains("<keltDatum>2016-05-23</keltDatum>"));
        assert!(xml.contains("<azonosito>42</azonosito>"));
    }
}
