use kasir_printer::EscPosBuilder;
use rust_decimal::Decimal;
use shared::models::{AppSettings, PaperWidth, PaymentMethod, Transaction};
use shared::util::short_id;

use super::format::{format_currency, format_rupiah, format_timestamp};
use crate::pricing::to_rupiah;

/// Lines fed after the footer so the tear bar clears the text
const TRAILING_FEED: u8 = 3;

/// Summary amounts in whole Rupiah
///
/// TOTAL and Tunai are rounded once (and Diskon when tax applies); Kembali,
/// Kasbon and the remaining summary row are derived from those, so the
/// printed column always adds up.
struct PrintedTotals {
    subtotal: i64,
    discount: i64,
    tax: i64,
    total: i64,
    cash: i64,
    change: i64,
    debt: i64,
}

impl PrintedTotals {
    fn of(tx: &Transaction) -> Self {
        let subtotal = to_rupiah(tx.subtotal);
        let total = to_rupiah(tx.total_amount);
        let cash = to_rupiah(tx.cash_paid);

        let (discount, tax) = if tx.tax_amount.is_zero() {
            (subtotal.saturating_sub(total), 0)
        } else {
            let discount = to_rupiah(tx.discount_amount);
            (discount, total.saturating_sub(subtotal).saturating_add(discount))
        };

        Self {
            subtotal,
            discount,
            tax,
            total,
            cash,
            change: cash.saturating_sub(total).max(0),
            debt: total.saturating_sub(cash).max(0),
        }
    }
}

/// Renders a finished transaction as ESC/POS bytes
pub struct ReceiptRenderer<'a> {
    tx: &'a Transaction,
    settings: &'a AppSettings,
    width: usize,
}

impl<'a> ReceiptRenderer<'a> {
    /// Renderer for the paper width configured in `settings`
    pub fn new(tx: &'a Transaction, settings: &'a AppSettings) -> Self {
        Self {
            tx,
            settings,
            width: settings.paper_width.columns(),
        }
    }

    /// Override the paper width
    pub fn with_paper(mut self, paper: PaperWidth) -> Self {
        self.width = paper.columns();
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn render(&self) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);
        self.render_header(&mut b);
        self.render_items(&mut b);
        self.render_totals(&mut b);
        self.render_footer(&mut b);
        b.build()
    }

    fn render_header(&self, b: &mut EscPosBuilder) {
        let store = &self.settings.store;

        b.center().bold().line(&store.name).bold_off();
        if !store.address.trim().is_empty() {
            b.line(&store.address);
        }
        if !store.phone.trim().is_empty() {
            b.line(&format!("Telp: {}", store.phone));
        }

        b.left();
        b.line(&format!("No: {}", short_id(&self.tx.id).to_uppercase()));
        b.line(&format_timestamp(
            self.tx.timestamp,
            self.settings.utc_offset_minutes,
        ));
        if let Some(customer) = &self.tx.customer {
            b.line(&format!("Pelanggan: {}", customer.name));
        }
        b.sep_single();
    }

    fn render_items(&self, b: &mut EscPosBuilder) {
        for item in &self.tx.items {
            if item.conversion > 1 {
                b.line(&format!("{} ({})", item.product_name, item.unit_name));
            } else {
                b.line(&item.product_name);
            }
            b.line_lr(
                &format!(
                    "{} x {}",
                    item.quantity,
                    format_rupiah(Decimal::from(item.price))
                ),
                &format_rupiah(Decimal::from(item.line_total())),
            );
        }
        b.sep_single();
    }

    fn render_totals(&self, b: &mut EscPosBuilder) {
        let tx = self.tx;
        let printed = PrintedTotals::of(tx);
        let rp = |amount: i64| format_currency(Decimal::from(amount));

        if !tx.discount_amount.is_zero() || !tx.tax_amount.is_zero() {
            b.line_lr("Subtotal", &rp(printed.subtotal));
            if !tx.discount_amount.is_zero() {
                b.line_lr("Diskon", &rp(-printed.discount));
            }
            if !tx.tax_amount.is_zero() {
                b.line_lr("Pajak", &rp(printed.tax));
            }
        }

        b.bold();
        b.line_lr("TOTAL", &rp(printed.total));
        b.bold_off();

        b.line_lr("Tunai", &rp(printed.cash));
        b.line_lr("Kembali", &rp(printed.change));
        if tx.debt_amount > Decimal::ZERO {
            b.line_lr("Kasbon", &rp(printed.debt));
        }
        if tx.payment_method != PaymentMethod::Cash {
            b.line(&format!("Bayar: {}", tx.payment_method.label()));
        }
    }

    fn render_footer(&self, b: &mut EscPosBuilder) {
        b.newline();
        b.center();
        if !self.settings.footer_message.trim().is_empty() {
            b.line(&self.settings.footer_message);
        }
        b.feed(TRAILING_FEED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CartItem, CustomerRef, Tier};

    fn transaction() -> Transaction {
        Transaction {
            id: "3f2a9c1e-0000-4000-8000-000000000000".to_string(),
            timestamp: 1_792_134_300_000,
            items: vec![
                CartItem {
                    product_id: "p-1".to_string(),
                    product_name: "Indomie Goreng".to_string(),
                    unit_name: "pcs".to_string(),
                    price: 3500,
                    buy_price: 2900,
                    quantity: 2,
                    conversion: 1,
                },
                CartItem {
                    product_id: "p-2".to_string(),
                    product_name: "Aqua 600ml".to_string(),
                    unit_name: "btl".to_string(),
                    price: 2000,
                    buy_price: 1500,
                    quantity: 1,
                    conversion: 1,
                },
            ],
            subtotal: Decimal::from(9000),
            discount_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: Decimal::from(9000),
            payment_method: PaymentMethod::Cash,
            cash_paid: Decimal::from(10_000),
            change: Decimal::from(1000),
            customer: None,
            debt_amount: Decimal::ZERO,
        }
    }

    fn settings() -> AppSettings {
        let mut settings = AppSettings::default();
        settings.store.name = "Warung Bu Tini".to_string();
        settings.store.address = "Jl. Merdeka 10".to_string();
        settings.store.phone = "0812345678".to_string();
        settings
    }

    /// Printable lines with ESC sequences removed
    fn text_lines(bytes: &[u8]) -> Vec<String> {
        let mut text = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == 0x1B {
                // ESC @ has no argument; ESC a/E/d take one byte
                i += if bytes.get(i + 1) == Some(&b'@') { 2 } else { 3 };
                continue;
            }
            text.push(bytes[i]);
            i += 1;
        }
        String::from_utf8(text)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_layout_cash_sale() {
        let tx = transaction();
        let settings = settings();
        let data = ReceiptRenderer::new(&tx, &settings).render();

        assert_eq!(&data[..2], &[0x1B, 0x40]);
        assert!(contains(
            &data,
            b"\x1B\x61\x01\x1B\x45\x01Warung Bu Tini\n\x1B\x45\x00"
        ));
        assert_eq!(&data[data.len() - 3..], &[0x1B, 0x64, TRAILING_FEED]);

        let lines = text_lines(&data);
        let separator = "-".repeat(32);
        let expected = [
            "Warung Bu Tini",
            "Jl. Merdeka 10",
            "Telp: 0812345678",
            "No: 3F2A9C1E",
            "16/10/2026 14:05",
            separator.as_str(),
            "Indomie Goreng",
            "2 x 3.500                  7.000",
            "Aqua 600ml",
            "1 x 2.000                  2.000",
            separator.as_str(),
            "TOTAL                   Rp 9.000",
            "Tunai                  Rp 10.000",
            "Kembali                 Rp 1.000",
            "",
            "Terima kasih atas kunjungan Anda",
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_rows_fill_width_exactly() {
        let tx = transaction();
        let settings = settings();
        let data = ReceiptRenderer::new(&tx, &settings)
            .with_paper(PaperWidth::Mm80)
            .render();

        let lines = text_lines(&data);
        assert!(lines.contains(&"-".repeat(48)));
        let total = lines.iter().find(|l| l.starts_with("TOTAL")).unwrap();
        assert_eq!(total.chars().count(), 48);
        assert!(total.ends_with("Rp 9.000"));
    }

    #[test]
    fn test_discount_tax_and_customer_rows() {
        let mut tx = transaction();
        tx.customer = Some(CustomerRef {
            id: "c-1".to_string(),
            name: "Bu Sari".to_string(),
            tier: Tier::Gold,
        });
        tx.discount_amount = Decimal::from(450);
        tx.tax_amount = Decimal::new(94050, 2);
        tx.total_amount = Decimal::new(949050, 2);
        let settings = settings();

        let lines = text_lines(&ReceiptRenderer::new(&tx, &settings).render());
        assert!(lines.contains(&"Pelanggan: Bu Sari".to_string()));
        assert!(lines.contains(&"Subtotal                Rp 9.000".to_string()));
        assert!(lines.contains(&"Diskon                   -Rp 450".to_string()));
        assert!(lines.contains(&"Pajak                     Rp 941".to_string()));
        assert!(lines.contains(&"TOTAL                   Rp 9.491".to_string()));
    }

    #[test]
    fn test_fractional_total_prints_consistent_change() {
        let mut tx = transaction();
        tx.discount_amount = Decimal::from(450);
        tx.tax_amount = Decimal::new(94050, 2);
        tx.total_amount = Decimal::new(949050, 2);
        tx.cash_paid = Decimal::from(10_000);
        tx.change = Decimal::new(50950, 2);
        let settings = settings();

        let lines = text_lines(&ReceiptRenderer::new(&tx, &settings).render());
        assert!(lines.contains(&"TOTAL                   Rp 9.491".to_string()));
        assert!(lines.contains(&"Tunai                  Rp 10.000".to_string()));
        assert!(lines.contains(&"Kembali                   Rp 509".to_string()));
    }

    #[test]
    fn test_printed_totals_add_up() {
        let mut tx = transaction();
        tx.discount_amount = Decimal::new(50, 2);
        tx.total_amount = Decimal::new(899950, 2);
        tx.cash_paid = Decimal::new(899950, 2);
        tx.change = Decimal::ZERO;

        let printed = PrintedTotals::of(&tx);
        assert_eq!(printed.total, 9000);
        assert_eq!(printed.subtotal - printed.discount + printed.tax, printed.total);
        assert_eq!(printed.cash - printed.total, printed.change);
        assert_eq!(printed.change, 0);

        tx.payment_method = PaymentMethod::Debt;
        tx.tax_amount = Decimal::new(99050, 2);
        tx.discount_amount = Decimal::new(45050, 2);
        tx.total_amount = Decimal::new(954000, 2);
        tx.cash_paid = Decimal::new(400050, 2);

        let printed = PrintedTotals::of(&tx);
        assert_eq!(printed.subtotal - printed.discount + printed.tax, printed.total);
        assert_eq!(printed.cash + printed.debt, printed.total);
        assert_eq!(printed.change, 0);
    }

    #[test]
    fn test_no_summary_rows_without_discount_or_tax() {
        let tx = transaction();
        let settings = settings();
        let lines = text_lines(&ReceiptRenderer::new(&tx, &settings).render());
        assert!(!lines.iter().any(|l| l.starts_with("Subtotal")));
        assert!(!lines.iter().any(|l| l.starts_with("Diskon")));
    }

    #[test]
    fn test_credit_sale_rows() {
        let mut tx = transaction();
        tx.payment_method = PaymentMethod::Debt;
        tx.cash_paid = Decimal::from(4000);
        tx.change = Decimal::ZERO;
        tx.debt_amount = Decimal::from(5000);
        let settings = settings();

        let lines = text_lines(&ReceiptRenderer::new(&tx, &settings).render());
        assert!(lines.contains(&"Kasbon                  Rp 5.000".to_string()));
        assert!(lines.contains(&"Bayar: Kasbon".to_string()));
    }

    #[test]
    fn test_unit_name_on_multi_unit_lines() {
        let mut tx = transaction();
        tx.items[0].unit_name = "Dus".to_string();
        tx.items[0].conversion = 40;
        let settings = settings();

        let lines = text_lines(&ReceiptRenderer::new(&tx, &settings).render());
        assert!(lines.contains(&"Indomie Goreng (Dus)".to_string()));
    }

    #[test]
    fn test_diacritics_stripped_and_long_rows_overflow() {
        let mut tx = transaction();
        tx.items[0].product_name = "Kopi Señor Café".to_string();
        tx.items[0].price = 3_500_000_000;
        tx.items[0].quantity = 1_000_000;
        let settings = settings();

        let data = ReceiptRenderer::new(&tx, &settings).render();
        assert!(data.is_ascii());

        let lines = text_lines(&data);
        assert!(lines.contains(&"Kopi Senor Cafe".to_string()));
        let row = lines
            .iter()
            .find(|l| l.starts_with("1000000 x"))
            .unwrap();
        assert_eq!(row, "1000000 x 3.500.000.000 3.500.000.000.000.000");
    }
}
