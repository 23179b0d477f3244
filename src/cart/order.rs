//! Order Message Formatting
//!
//! Serializes a cart into the text message handed to the external chat
//! service, and builds the deep links that carry it.

use super::engine::Cart;

/// First line of every message sent from the storefront
pub const MESSAGE_HEADING: &str = "New Inquiry from Website:";

/// Blank fields the customer fills in inside the chat client
pub const CONTACT_FIELDS: [&str; 5] = ["Name", "Phone", "Email", "Address", "Notes"];

/// Fields of the general "chat with us" inquiry
pub const INQUIRY_FIELDS: [&str; 3] = ["Name", "Email", "Message"];

/// Shown instead of a price for items priced at 0
pub const PRICE_ON_REQUEST: &str = "Contact for pricing";

/// Where and how order messages are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSettings {
    /// Messaging service base address, e.g. `https://wa.me`
    pub base_url: String,

    /// Recipient identifier appended to the base address
    pub recipient: String,

    /// Prefix used for every amount
    pub currency_symbol: String,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            recipient: "919531468479".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl OrderSettings {
    /// Formats an amount as the currency symbol followed directly by the
    /// integer (no decimals, no separators), e.g. `₹150`.
    pub fn format_currency(&self, amount: u64) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }

    /// Like [`Self::format_currency`], but renders 0 as "Contact for pricing".
    pub fn format_unit_price(&self, unit_price: u64) -> String {
        if unit_price > 0 {
            self.format_currency(unit_price)
        } else {
            PRICE_ON_REQUEST.to_string()
        }
    }

    /// Deep link carrying `message`: `<base>/<recipient>?text=<encoded>`.
    pub fn order_link(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            self.recipient,
            encode_message(message)
        )
    }
}

/// Percent-encodes a message for use as a URL query value.
pub fn encode_message(message: &str) -> String {
    urlencoding::encode(message).into_owned()
}

/// Builds the plain-text order message for `cart`.
///
/// Returns `None` for an empty cart. The header names every provider
/// represented in the cart, in order of first appearance; items follow in
/// cart order with their line totals.
pub fn build_order_message(cart: &Cart, settings: &OrderSettings) -> Option<String> {
    if cart.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(cart.len() + 11);
    lines.push(MESSAGE_HEADING.to_string());
    lines.push(format!("*Provider:* {}", cart.provider_names().join(", ")));
    lines.push("*Items:*".to_string());
    for line in cart.lines() {
        lines.push(format!(
            "- {} x {} ({})",
            line.title,
            line.quantity,
            settings.format_currency(line.line_total())
        ));
    }
    lines.push(format!(
        "*Subtotal:* {}",
        settings.format_currency(cart.subtotal())
    ));
    lines.push(String::new());
    lines.extend(CONTACT_FIELDS.iter().map(|f| format!("*{f}:*")));

    Some(lines.join("\n"))
}

/// Builds the hand-off URL `<base>/<recipient>?text=<encoded message>`.
///
/// Returns `None` for an empty cart; no degenerate message is ever built.
pub fn build_order_url(cart: &Cart, settings: &OrderSettings) -> Option<String> {
    build_order_message(cart, settings).map(|message| settings.order_link(&message))
}

/// Builds the general inquiry link, independent of any cart.
pub fn build_inquiry_url(settings: &OrderSettings) -> String {
    let mut lines = vec![MESSAGE_HEADING.to_string()];
    lines.extend(INQUIRY_FIELDS.iter().map(|f| format!("*{f}:*")));
    settings.order_link(&lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::LineKey;
    use crate::catalog::Catalog;

    fn add(cart: &mut Cart, catalog: &Catalog, provider_id: &str, item_id: &str) {
        let (provider, item) = catalog.resolve(provider_id, item_id).unwrap();
        cart.add_item(provider, item);
    }

    #[test]
    fn currency_has_no_separators_or_decimals() {
        let settings = OrderSettings::default();
        assert_eq!(settings.format_currency(150), "₹150");
        assert_eq!(settings.format_currency(123_456), "₹123456");
        assert_eq!(settings.format_currency(0), "₹0");
        assert_eq!(settings.format_unit_price(0), "Contact for pricing");
        assert_eq!(settings.format_unit_price(99), "₹99");
    }

    #[test]
    fn single_provider_message_layout() {
        let catalog = Catalog::bundled().unwrap();
        let mut cart = Cart::new();
        add(&mut cart, &catalog, "p1", "m1");
        add(&mut cart, &catalog, "p1", "m1");
        add(&mut cart, &catalog, "p1", "m3");

        let message = build_order_message(&cart, &OrderSettings::default()).unwrap();
        let expected = "New Inquiry from Website:\n\
                        *Provider:* Spark Cleaners\n\
                        *Items:*\n\
                        - Wash & Fold (per kg) x 2 (₹198)\n\
                        - Dry Clean (per item) x 1 (₹199)\n\
                        *Subtotal:* ₹397\n\
                        \n\
                        *Name:*\n\
                        *Phone:*\n\
                        *Email:*\n\
                        *Address:*\n\
                        *Notes:*";
        assert_eq!(message, expected);
    }

    #[test]
    fn multi_provider_header_names_first_added_provider_first() {
        let catalog = Catalog::bundled().unwrap();
        let mut cart = Cart::new();
        add(&mut cart, &catalog, "p1", "m1");
        add(&mut cart, &catalog, "p2", "m3");

        let message = build_order_message(&cart, &OrderSettings::default()).unwrap();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[1], "*Provider:* Spark Cleaners, FreshThreads");
        assert_eq!(lines[3], "- Wash & Fold (per kg) x 1 (₹99)");
        assert_eq!(lines[4], "- Stain Treatment x 1 (₹59)");
        assert_eq!(lines[5], "*Subtotal:* ₹158");
    }

    #[test]
    fn price_on_request_lines_total_zero() {
        let catalog = Catalog::bundled().unwrap();
        let mut cart = Cart::new();
        add(&mut cart, &catalog, "p3", "m1");
        add(&mut cart, &catalog, "p3", "m1");

        let message = build_order_message(&cart, &OrderSettings::default()).unwrap();
        assert!(message.contains("- Hotel Contract Plan x 2 (₹0)"));
        assert!(message.contains("*Subtotal:* ₹0"));
    }

    #[test]
    fn message_is_deterministic() {
        let catalog = Catalog::bundled().unwrap();
        let build = || {
            let mut cart = Cart::new();
            add(&mut cart, &catalog, "p2", "m2");
            add(&mut cart, &catalog, "p1", "m2");
            add(&mut cart, &catalog, "p2", "m2");
            build_order_message(&cart, &OrderSettings::default())
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn empty_cart_produces_nothing() {
        let catalog = Catalog::bundled().unwrap();
        let settings = OrderSettings::default();
        let mut cart = Cart::new();
        assert_eq!(build_order_message(&cart, &settings), None);
        assert_eq!(build_order_url(&cart, &settings), None);

        add(&mut cart, &catalog, "p1", "m1");
        cart.adjust_quantity(&LineKey::new("p1", "m1"), -1);
        assert_eq!(build_order_url(&cart, &settings), None);

        add(&mut cart, &catalog, "p1", "m1");
        cart.clear();
        assert_eq!(build_order_message(&cart, &settings), None);
    }

    #[test]
    fn order_url_encodes_message() {
        let catalog = Catalog::bundled().unwrap();
        let mut cart = Cart::new();
        add(&mut cart, &catalog, "p2", "m3");

        let settings = OrderSettings {
            base_url: "https://chat.example/".to_string(),
            recipient: "15550001111".to_string(),
            currency_symbol: "$".to_string(),
        };
        let url = build_order_url(&cart, &settings).unwrap();
        let prefix = "https://chat.example/15550001111?text=";
        assert!(url.starts_with(prefix));

        let encoded = &url[prefix.len()..];
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        assert!(encoded.starts_with("New%20Inquiry%20from%20Website%3A%0A"));
        assert!(encoded.contains("Stain%20Treatment%20x%201%20%28%2459%29"));

        let decoded = urlencoding::decode(encoded).unwrap();
        assert_eq!(Some(decoded.into_owned()), build_order_message(&cart, &settings));
    }

    #[test]
    fn inquiry_url_has_fixed_fields() {
        let url = build_inquiry_url(&OrderSettings::default());
        let encoded = url
            .strip_prefix("https://wa.me/919531468479?text=")
            .unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        assert_eq!(
            decoded,
            "New Inquiry from Website:\n*Name:*\n*Email:*\n*Message:*"
        );
    }
}
