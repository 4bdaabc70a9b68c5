//! Property-based tests for the line-item derivation laws.

#![cfg(feature = "core")]

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use szamlazz::core::*;

fn item(vat: VatRate) -> ItemBuilder {
    ItemBuilder::new("prop item", dec!(1), "db", vat)
}

proptest! {
    /// gross = net × (1 + rate/100), and the totals reconcile.
    #[test]
    fn net_input_derives_consistent_gross(
        net_cents in 1i64..10_000_000,
        rate in 0u8..=100,
        quantity in 1i64..1_000,
    ) {
        let net = Decimal::new(net_cents, 2);
        let rate = Decimal::from(rate);
        let item = ItemBuilder::new("x", Decimal::from(quantity), "db", VatRate::Percent(rate))
            .net_unit_price(net)
            .build()
            .unwrap();

        let expected_gross = net * (Decimal::ONE + rate / dec!(100));
        prop_assert!((item.gross_unit_price - expected_gross).abs() <= dec!(0.01));
        prop_assert_eq!(item.gross_total - item.net_total, item.vat_value);
        prop_assert!(item.vat_value >= Decimal::ZERO);
    }

    /// Deriving net from gross and re-deriving gross reproduces the
    /// original within rounding tolerance.
    #[test]
    fn gross_round_trips_through_net(
        gross_cents in 1i64..10_000_000,
        rate in 0u8..=100,
        quantity in 1i64..1_000,
    ) {
        let gross = Decimal::new(gross_cents, 2);
        let rate = VatRate::Percent(Decimal::from(rate));
        let qty = Decimal::from(quantity);

        let from_gross = ItemBuilder::new("x", qty, "db", rate)
            .gross_unit_price(gross)
            .build()
            .unwrap();
        let back = ItemBuilder::new("x", qty, "db", rate)
            .net_unit_price(from_gross.net_unit_price)
            .build()
            .unwrap();

        prop_assert!((back.gross_unit_price - gross).abs() <= dec!(0.01));
    }

    /// Supplying both or neither price always fails, for any VAT rate.
    #[test]
    fn price_one_of_is_enforced(rate in 0u8..=100) {
        let vat = VatRate::Percent(Decimal::from(rate));
        prop_assert!(item(vat).build().is_err());
        prop_assert!(item(vat)
            .net_unit_price(dec!(1))
            .gross_unit_price(dec!(2))
            .build()
            .is_err());
    }

    /// Symbolic codes force zero VAT whatever the price side.
    #[test]
    fn symbolic_codes_zero_the_vat(net_cents in 1i64..10_000_000) {
        let price = Decimal::new(net_cents, 2);
        for vat in [VatRate::Tam, VatRate::Aam, VatRate::Eu, VatRate::Euk, VatRate::Maa] {
            let from_net = item(vat).net_unit_price(price).build().unwrap();
            prop_assert_eq!(from_net.vat_value, Decimal::ZERO);
            prop_assert_eq!(from_net.net_unit_price, from_net.gross_unit_price);

            let from_gross = item(vat).gross_unit_price(price).build().unwrap();
            prop_assert_eq!(from_gross.gross_total, from_gross.net_total);
        }
    }

    /// Rates outside [0, 100] are always rejected.
    #[test]
    fn out_of_range_rates_fail(rate in 101i64..10_000) {
        let vat = VatRate::Percent(Decimal::from(rate));
        prop_assert!(item(vat).net_unit_price(dec!(10)).build().is_err());
    }
}
