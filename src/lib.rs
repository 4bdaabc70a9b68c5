//! # szamlazz
//!
//! Client library for the [Szamlazz.hu](https://www.szamlazz.hu) Számla
//! Agent: build invoice entities, serialize them into the agent's XML
//! dialect and issue, look up or reverse invoices over the multipart
//! HTTP API.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Entities are immutable after construction; validation runs once
//! in the builders and serialization is a pure read.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use szamlazz::core::*;
//!
//! let buyer = BuyerBuilder::new("Kovács Bt.", "2030", "Érd", "Tárnoki út 23.")
//!     .tax_number("12345678-1-42")
//!     .build()
//!     .unwrap();
//!
//! let invoice = InvoiceBuilder::new(buyer)
//!     .payment_method(PaymentMethod::BankTransfer)
//!     .currency(Currency::Ft)
//!     .add_item(
//!         ItemBuilder::new("Elvégzett munka", dec!(2), "óra", VatRate::Percent(dec!(27)))
//!             .net_unit_price(dec!(100.55))
//!             .build()
//!             .unwrap(),
//!     )
//!     .build();
//!
//! let xml = invoice.to_xml_fragment().unwrap();
//! assert!(xml.contains("<nettoErtek>201</nettoErtek>"));
//! ```
//!
//! Issuing the invoice requires the `agent` feature and an account:
//!
//! ```rust,no_run
//! # #[cfg(feature = "agent")]
//! # async fn issue(invoice: szamlazz::core::Invoice) -> Result<(), szamlazz::core::SzamlazzError> {
//! use szamlazz::agent::{Auth, Client};
//!
//! let client = Client::builder(Auth::credentials("user", "password"))
//!     .request_invoice_download(true)
//!     .build()?;
//! let issued = client.issue_invoice(&invoice).await?;
//! println!("issued {}", issued.invoice_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Entities, wire-value sets, XML serialization |
//! | `agent` | Protocol client (reqwest, multipart, cookie session) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod xml;

#[cfg(feature = "agent")]
pub mod agent;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
