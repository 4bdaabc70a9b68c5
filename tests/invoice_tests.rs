#![cfg(feature = "core")]

use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::Reader;
use rust_decimal_macros::dec;
use szamlazz::core::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller() -> Seller {
    SellerBuilder::new()
        .bank("Test Bank <name>", "11111111-11111111-11111111")
        .email(
            "test@email.com",
            "Invoice email subject",
            "This is an email message",
        )
        .build()
}

fn buyer() -> Buyer {
    BuyerBuilder::new("Test Buyer Kft.", "1234", "City", "Some street address")
        .tax_number("12345678-1-42")
        .tax_subject(TaxSubject::Unknown)
        .post_address(PostAddress {
            name: Some("Some Buyer Name".into()),
            country: None,
            zip: Some("1234".into()),
            city: Some("City".into()),
            address: Some("Some street address".into()),
        })
        .identifier(1)
        .build()
        .expect("valid buyer")
}

fn sold_item_net() -> Item {
    ItemBuilder::new("First item", dec!(2), "qt", VatRate::Percent(dec!(27)))
        .net_unit_price(dec!(100.55))
        .comment("An item")
        .build()
        .expect("valid item")
}

fn sold_item_gross() -> Item {
    ItemBuilder::new("Second item", dec!(5), "qt", VatRate::Percent(dec!(27)))
        .gross_unit_price(dec!(1270))
        .build()
        .expect("valid item")
}

fn invoice() -> Invoice {
    InvoiceBuilder::new(buyer())
        .issue_date(date(2016, 5, 23))
        .fulfillment_date(date(2016, 5, 23))
        .due_date(date(2016, 6, 8))
        .payment_method(PaymentMethod::BankTransfer)
        .currency(Currency::Ft)
        .language(Language::Hungarian)
        .seller(seller())
        .items(vec![sold_item_net(), sold_item_gross()])
        .build()
}

/// Names of the depth-1 elements of the fragment, in document order.
fn top_level_sections(fragment: &str) -> Vec<String> {
    let doc = format!("<doc>{fragment}</doc>");
    let mut reader = Reader::from_str(&doc);
    reader.config_mut().trim_text(true);
    let mut depth = 0u32;
    let mut sections = Vec::new();
    loop {
        match reader.read_event().expect("well-formed fragment") {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 {
                    sections.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
            }
            Event::End(_) => depth -= 1,
            Event::Eof => break,
            _ => {}
        }
    }
    sections
}

// ---------------------------------------------------------------------------
// Fragment structure
// ---------------------------------------------------------------------------

#[test]
fn sections_appear_in_fixed_order() {
    let xml = invoice().to_xml_fragment().unwrap();
    assert_eq!(
        top_level_sections(&xml),
        ["fejlec", "elado", "vevo", "tetelek"]
    );
}

#[test]
fn seller_section_is_skipped_when_absent() {
    let invoice = InvoiceBuilder::new(buyer())
        .add_item(sold_item_net())
        .build();
    let xml = invoice.to_xml_fragment().unwrap();
    assert_eq!(top_level_sections(&xml), ["fejlec", "vevo", "tetelek"]);
}

#[test]
fn header_carries_defaults_and_dates() {
    let xml = invoice().to_xml_fragment().unwrap();
    assert!(xml.contains("<keltDatum>2016-05-23</keltDatum>"));
    assert!(xml.contains("<fizetesiHataridoDatum>2016-06-08</fizetesiHataridoDatum>"));
    assert!(xml.contains("<fizmod>átutalás</fizmod>"));
    assert!(xml.contains("<penznem>Ft</penznem>"));
    assert!(xml.contains("<szamlaNyelve>hu</szamlaNyelve>"));
    assert!(xml.contains("<arfolyam>0</arfolyam>"));
    assert!(xml.contains("<elolegszamla>false</elolegszamla>"));
}

#[test]
fn unset_optional_header_fields_are_omitted() {
    let xml = invoice().to_xml_fragment().unwrap();
    assert!(!xml.contains("<dijbekero>"));
    assert!(!xml.contains("<fizetve>"));
    assert!(!xml.contains("<logoExtra>"));
    assert!(!xml.contains("<szamlaszamElotag>"));
    assert!(!xml.contains("<rendelesSzam>"));
    assert!(!xml.contains("<arfolyamBank>"));
}

#[test]
fn set_optional_header_fields_appear() {
    let invoice = InvoiceBuilder::new(buyer())
        .add_item(sold_item_net())
        .order_number("ORD-42")
        .proforma(true)
        .paid(false)
        .invoice_id_prefix("WEB")
        .exchange("MNB", dec!(310.25))
        .currency(Currency::Eur)
        .build();
    let xml = invoice.to_xml_fragment().unwrap();
    assert!(xml.contains("<rendelesSzam>ORD-42</rendelesSzam>"));
    assert!(xml.contains("<dijbekero>true</dijbekero>"));
    assert!(xml.contains("<fizetve>false</fizetve>"));
    assert!(xml.contains("<szamlaszamElotag>WEB</szamlaszamElotag>"));
    assert!(xml.contains("<arfolyamBank>MNB</arfolyamBank>"));
    assert!(xml.contains("<arfolyam>310.25</arfolyam>"));
}

#[test]
fn empty_item_list_is_rejected_at_serialization() {
    let invoice = InvoiceBuilder::new(buyer()).build();
    let err = invoice.to_xml_fragment().unwrap_err();
    assert!(matches!(err, SzamlazzError::Validation(_)));
}

#[test]
fn serialization_is_idempotent() {
    let invoice = invoice();
    assert_eq!(
        invoice.to_xml_fragment().unwrap(),
        invoice.to_xml_fragment().unwrap()
    );
}

// ---------------------------------------------------------------------------
// Items inside the aggregate
// ---------------------------------------------------------------------------

#[test]
fn items_are_formatted_with_the_invoice_currency() {
    // Ft has no minor units: totals come out as whole numbers.
    let xml = invoice().to_xml_fragment().unwrap();
    assert!(xml.contains("<nettoErtek>201</nettoErtek>"));
    assert!(xml.contains("<bruttoErtek>255</bruttoErtek>"));
    assert!(xml.contains("<nettoErtek>5000</nettoErtek>"));
    assert!(xml.contains("<bruttoErtek>6350</bruttoErtek>"));

    let eur = InvoiceBuilder::new(buyer())
        .currency(Currency::Eur)
        .add_item(sold_item_net())
        .build();
    let xml = eur.to_xml_fragment().unwrap();
    assert!(xml.contains("<nettoErtek>201.10</nettoErtek>"));
    assert!(xml.contains("<afaErtek>54.30</afaErtek>"));
    assert!(xml.contains("<bruttoErtek>255.40</bruttoErtek>"));
}

#[test]
fn items_keep_their_order() {
    let xml = invoice().to_xml_fragment().unwrap();
    let first = xml.find("First item").unwrap();
    let second = xml.find("Second item").unwrap();
    assert!(first < second);
}

#[test]
fn symbolic_vat_item_serializes_the_code() {
    let item = ItemBuilder::new("Adómentes tétel", dec!(1), "db", VatRate::Tam)
        .net_unit_price(dec!(1000))
        .build()
        .unwrap();
    let invoice = InvoiceBuilder::new(buyer()).add_item(item).build();
    let xml = invoice.to_xml_fragment().unwrap();
    assert!(xml.contains("<afakulcs>TAM</afakulcs>"));
    assert!(xml.contains("<afaErtek>0</afaErtek>"));
}

// ---------------------------------------------------------------------------
// Party validation
// ---------------------------------------------------------------------------

#[test]
fn buyer_missing_required_field_fails_construction() {
    let err = BuyerBuilder::new("Test Buyer Kft.", "1234", "", "Some street")
        .build()
        .unwrap_err();
    match err {
        SzamlazzError::Validation(msg) => assert!(msg.contains("city")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn buyer_never_silently_defaults() {
    assert!(BuyerBuilder::new("  ", "1234", "City", "Street").build().is_err());
    assert!(BuyerBuilder::new("Name", "1234", "City", " ").build().is_err());
}
