//! A4 invoice document.
//!
//! `layout_invoice` places every string and rule on pages (millimetres from
//! the top-left corner) and handles wrapping and pagination. `render_invoice`
//! hands that layout to printpdf. Keeping the two apart lets the page
//! breaking be tested without parsing PDF output.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, Point};
use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument};

use crate::config::CompanyConfig;
use crate::model::invoice::{round_money, AmountOverflow, Invoice};
use crate::model::Status;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
const FOOTER_HEIGHT: f32 = 18.0;
/// Lowest y any body content may reach; the footer sits below it.
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN - FOOTER_HEIGHT;
/// Footer rule; everything at or below it belongs to the footer.
pub const FOOTER_RULE: f32 = CONTENT_BOTTOM + 2.0;
const FOOTER_TOP: f32 = FOOTER_RULE + 4.0;
const CONTINUATION_TOP: f32 = MARGIN + 16.0;

const BODY_SIZE: f32 = 10.0;
const SMALL_SIZE: f32 = 8.5;
const LINE_HEIGHT: f32 = 5.0;
const ROW_PADDING: f32 = 2.0;
const TOTALS_ROW_HEIGHT: f32 = 6.5;

const COL_DESCRIPTION: f32 = MARGIN;
const DESCRIPTION_WIDTH: f32 = 92.0;
const COL_QTY_RIGHT: f32 = 132.0;
const COL_RATE_RIGHT: f32 = 160.0;
const COL_AMOUNT_RIGHT: f32 = PAGE_WIDTH - MARGIN;
const TOTALS_LABEL_X: f32 = 120.0;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("Failed to render PDF: {0}")]
    Render(String),
    #[error(transparent)]
    Amounts(#[from] AmountOverflow),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text { x: f32, y: f32, size: f32, bold: bool, text: String },
    Rule { x1: f32, x2: f32, y: f32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub elements: Vec<Element>,
}

impl PageLayout {
    /// Every text run on the page, in placement order.
    pub fn texts(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { text, .. } => Some(text.as_str()),
                Element::Rule { .. } => None,
            })
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

/// `£1,234.50`
pub fn format_money(value: Decimal) -> String {
    let rounded = format!("{:.2}", round_money(value).abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value.is_sign_negative() && !round_money(value).is_zero() { "-" } else { "" };
    format!("{}£{}.{}", sign, grouped, cents)
}

/// `Invoice_{number}_{client}.pdf`; whitespace runs become `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped.
pub fn invoice_filename(number: &str, client: &str) -> String {
    fn clean(s: &str) -> String {
        let mut out = String::new();
        let mut pending_gap = false;
        for c in s.trim().chars() {
            if c.is_whitespace() {
                pending_gap = true;
            } else if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                if pending_gap && !out.is_empty() {
                    out.push('_');
                }
                pending_gap = false;
                out.push(c);
            }
        }
        out
    }

    let number = clean(number);
    let client = clean(client);
    if client.is_empty() {
        format!("Invoice_{}.pdf", number)
    } else {
        format!("Invoice_{}_{}.pdf", number, client)
    }
}

/// Rough Helvetica advance width in mm.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.3528 * 0.5
}

fn max_chars(width: f32, size: f32) -> usize {
    ((width / (size * 0.3528 * 0.5)).floor() as usize).max(1)
}

/// Greedy word wrap; words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() { word.chars().count() } else { current.chars().count() + 1 + word.chars().count() };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

struct Composer<'a> {
    invoice: &'a Invoice,
    pages: Vec<PageLayout>,
    y: f32,
}

impl<'a> Composer<'a> {
    fn new(invoice: &'a Invoice) -> Self {
        Composer { invoice, pages: vec![PageLayout::default()], y: MARGIN }
    }

    fn page(&mut self) -> &mut PageLayout {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, text: impl Into<String>) {
        self.page().elements.push(Element::Text { x, y, size, bold, text: text.into() });
    }

    fn text_right(&mut self, right: f32, y: f32, size: f32, bold: bool, text: impl Into<String>) {
        let text = text.into();
        let x = right - text_width(&text, size);
        self.text(x, y, size, bold, text);
    }

    fn rule(&mut self, y: f32) {
        self.page().elements.push(Element::Rule { x1: MARGIN, x2: PAGE_WIDTH - MARGIN, y });
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= CONTENT_BOTTOM
    }

    fn continuation_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = MARGIN + 6.0;
        let title = format!("Invoice {} (continued)", self.invoice.invoice_number);
        self.text(MARGIN, self.y, 12.0, true, title);
        self.y = CONTINUATION_TOP;
    }

    fn table_break(&mut self) {
        self.continuation_page();
        self.table_header();
    }

    fn header(&mut self, company: &CompanyConfig) {
        let invoice = self.invoice;
        self.y += 8.0;
        self.text(MARGIN, self.y, 18.0, true, company.name.clone());
        self.text_right(COL_AMOUNT_RIGHT, self.y, 20.0, true, "INVOICE");

        let mut left = self.y + 7.0;
        let contact = company
            .address_lines
            .iter()
            .cloned()
            .chain([company.email.clone(), company.phone.clone(), company.website.clone()])
            .filter(|l| !l.trim().is_empty());
        for line in contact {
            self.text(MARGIN, left, SMALL_SIZE, false, line);
            left += 4.5;
        }

        let mut right = self.y + 7.0;
        let meta = [
            ("Invoice no.", invoice.invoice_number.clone()),
            ("Issue date", invoice.issue_date.format("%d %b %Y").to_string()),
            ("Due date", invoice.due_date.format("%d %b %Y").to_string()),
            ("Status", invoice.status.as_str().to_uppercase()),
        ];
        for (label, value) in meta {
            self.text(TOTALS_LABEL_X, right, BODY_SIZE, true, label);
            self.text_right(COL_AMOUNT_RIGHT, right, BODY_SIZE, false, value);
            right += LINE_HEIGHT;
        }

        self.y = left.max(right) + 6.0;
    }

    fn bill_to(&mut self) {
        let invoice = self.invoice;
        self.text(MARGIN, self.y, 11.0, true, "Bill to");
        self.y += 6.0;
        let lines = [Some(invoice.client_name.clone()), invoice.client_company.clone()]
            .into_iter()
            .flatten()
            .chain(invoice.client_address.iter().flat_map(|a| a.lines().map(str::to_string).collect::<Vec<_>>()))
            .chain([invoice.client_email.clone()])
            .filter(|l| !l.trim().is_empty())
            .collect::<Vec<_>>();
        for line in lines {
            self.text(MARGIN, self.y, BODY_SIZE, false, line.trim().to_string());
            self.y += LINE_HEIGHT;
        }
        self.y += 6.0;
    }

    fn table_header(&mut self) {
        self.rule(self.y);
        self.y += LINE_HEIGHT;
        self.text(COL_DESCRIPTION, self.y, BODY_SIZE, true, "Description");
        self.text_right(COL_QTY_RIGHT, self.y, BODY_SIZE, true, "Qty");
        self.text_right(COL_RATE_RIGHT, self.y, BODY_SIZE, true, "Rate");
        self.text_right(COL_AMOUNT_RIGHT, self.y, BODY_SIZE, true, "Amount");
        self.y += ROW_PADDING;
        self.rule(self.y);
        self.y += ROW_PADDING;
    }

    /// Rows that fit on a fresh page are never split; taller ones flow line
    /// by line, repeating the table header on each new page.
    fn line_items(&mut self) -> Result<(), AmountOverflow> {
        self.table_header();
        let width = max_chars(DESCRIPTION_WIDTH, BODY_SIZE);
        let invoice = self.invoice;
        let fresh_page_room = CONTENT_BOTTOM - CONTINUATION_TOP - LINE_HEIGHT - 2.0 * ROW_PADDING;
        for item in &invoice.line_items {
            let lines = wrap_text(&item.description, width);
            let height = lines.len() as f32 * LINE_HEIGHT + ROW_PADDING;
            if !self.fits(height) && (height <= fresh_page_room || !self.fits(LINE_HEIGHT)) {
                self.table_break();
            }
            let top = self.y + LINE_HEIGHT;
            self.text_right(COL_QTY_RIGHT, top, BODY_SIZE, false, item.quantity.normalize().to_string());
            self.text_right(COL_RATE_RIGHT, top, BODY_SIZE, false, format_money(item.rate));
            self.text_right(COL_AMOUNT_RIGHT, top, BODY_SIZE, false, format_money(item.amount()?));
            for line in lines {
                if !self.fits(LINE_HEIGHT) {
                    self.table_break();
                }
                self.y += LINE_HEIGHT;
                self.text(COL_DESCRIPTION, self.y, BODY_SIZE, false, line);
            }
            self.y = (self.y + ROW_PADDING).min(CONTENT_BOTTOM);
        }
        self.rule(self.y);
        self.y += 4.0;
        Ok(())
    }

    fn totals(&mut self) -> Result<(), AmountOverflow> {
        let invoice = self.invoice;
        let totals = invoice.totals()?;
        let mut rows = vec![("Subtotal".to_string(), format_money(totals.subtotal), false)];
        if let Some(discount) = &invoice.discount {
            rows.push((discount.label(), format!("-{}", format_money(totals.discount_amount)), false));
        }
        rows.push((format!("Tax ({}%)", invoice.tax_rate.normalize()), format_money(totals.tax_amount), false));
        rows.push(("Total".to_string(), format_money(totals.total), true));

        let height = rows.len() as f32 * TOTALS_ROW_HEIGHT + 4.0;
        if !self.fits(height) {
            self.continuation_page();
        }
        for (label, value, bold) in rows {
            self.y += TOTALS_ROW_HEIGHT;
            let size = if bold { 12.0 } else { BODY_SIZE };
            self.text(TOTALS_LABEL_X, self.y, size, bold, label);
            self.text_right(COL_AMOUNT_RIGHT, self.y, size, bold, value);
        }
        self.y += 8.0;
        Ok(())
    }

    fn paragraph(&mut self, title: &str, body: &str) {
        let lines = wrap_text(body, max_chars(PAGE_WIDTH - 2.0 * MARGIN, BODY_SIZE));
        if !self.fits(LINE_HEIGHT * 2.0) {
            self.continuation_page();
        }
        self.y += LINE_HEIGHT;
        self.text(MARGIN, self.y, 11.0, true, title);
        for line in lines {
            if !self.fits(LINE_HEIGHT) {
                self.continuation_page();
            }
            self.y += LINE_HEIGHT;
            self.text(MARGIN, self.y, BODY_SIZE, false, line);
        }
        self.y += 4.0;
    }

    fn footers(&mut self, company: &CompanyConfig) {
        let total = self.pages.len();
        let bank = [
            ("Bank", &company.bank_name),
            ("Account name", &company.account_name),
            ("Sort code", &company.sort_code),
            ("Account no.", &company.account_number),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join("   ");

        for (i, page) in self.pages.iter_mut().enumerate() {
            page.elements.push(Element::Rule { x1: MARGIN, x2: PAGE_WIDTH - MARGIN, y: FOOTER_RULE });
            if !bank.is_empty() {
                page.elements.push(Element::Text {
                    x: MARGIN,
                    y: FOOTER_TOP,
                    size: SMALL_SIZE,
                    bold: false,
                    text: bank.clone(),
                });
            }
            let label = format!("Page {} of {}", i + 1, total);
            page.elements.push(Element::Text {
                x: COL_AMOUNT_RIGHT - text_width(&label, SMALL_SIZE),
                y: FOOTER_TOP + 5.0,
                size: SMALL_SIZE,
                bold: false,
                text: label,
            });
        }
    }
}

/// Places the whole invoice onto as many A4 pages as it needs.
pub fn layout_invoice(invoice: &Invoice, company: &CompanyConfig) -> Result<Vec<PageLayout>, AmountOverflow> {
    let mut composer = Composer::new(invoice);
    composer.header(company);
    composer.bill_to();
    composer.line_items()?;
    composer.totals()?;

    let terms = invoice.payment_terms.clone().unwrap_or_else(|| company.payment_terms_text());
    composer.paragraph("Payment terms", &terms);
    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        composer.paragraph("Notes", notes);
    }
    composer.footers(company);

    debug!(pages = composer.pages.len(), "Invoice laid out");
    Ok(composer.pages)
}

/// Renders the invoice to PDF bytes.
#[instrument(skip(invoice, company), fields(invoice_number = %invoice.invoice_number))]
pub fn render_invoice(invoice: &Invoice, company: &CompanyConfig) -> Result<Vec<u8>, PdfError> {
    let pages = layout_invoice(invoice, company)?;
    let title = format!("Invoice {}", invoice.invoice_number);
    let (doc, first_page, first_layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Render(e.to_string()))?;

    for (i, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        layer.set_outline_thickness(0.4);

        for element in &page.elements {
            match element {
                Element::Text { x, y, size, bold: is_bold, text } => {
                    let font: &IndirectFontRef = if *is_bold { &bold } else { &regular };
                    layer.use_text(text.clone(), *size, Mm(*x), Mm(PAGE_HEIGHT - *y), font);
                }
                Element::Rule { x1, x2, y } => {
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(Mm(*x1), Mm(PAGE_HEIGHT - *y)), false),
                            (Point::new(Mm(*x2), Mm(PAGE_HEIGHT - *y)), false),
                        ],
                        is_closed: false,
                    });
                }
            }
        }
    }

    let bytes = doc.save_to_bytes().map_err(|e| {
        error!("Failed to serialise PDF: {}", e);
        PdfError::Render(e.to_string())
    })?;
    info!(pages = pages.len(), size = bytes.len(), "Invoice PDF rendered");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::invoice::{Discount, DiscountKind, InvoiceStatus, LineItem};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn invoice(items: usize) -> Invoice {
        Invoice {
            id: None,
            invoice_number: "HO-2026-0007".to_string(),
            client_name: "Jo Baker".to_string(),
            client_email: "jo@example.com".to_string(),
            client_company: Some("Bristol Bakery".to_string()),
            client_address: Some("1 High Street\nBristol".to_string()),
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            line_items: (0..items)
                .map(|i| LineItem {
                    description: format!("Design work, iteration {}", i + 1),
                    quantity: dec!(1.5),
                    rate: dec!(400),
                })
                .collect(),
            discount: Some(Discount { kind: DiscountKind::Percentage, value: dec!(10) }),
            tax_rate: dec!(20),
            notes: Some("Thanks for your business.".to_string()),
            payment_terms: None,
            status: InvoiceStatus::Draft,
            sent_at: None,
            paid_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn max_body_y(page: &PageLayout) -> f32 {
        page.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { y, .. } if *y < FOOTER_RULE => Some(*y),
                _ => None,
            })
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(0)), "£0.00");
        assert_eq!(format_money(dec!(1234.5)), "£1,234.50");
        assert_eq!(format_money(dec!(1234567.005)), "£1,234,567.01");
        assert_eq!(format_money(dec!(999.999)), "£1,000.00");
    }

    #[test]
    fn test_invoice_filename() {
        assert_eq!(invoice_filename("HO-2026-0007", "Jo Baker"), "Invoice_HO-2026-0007_Jo_Baker.pdf");
        assert_eq!(invoice_filename("HO-2026-0007", "  Smith &  Sons / Ltd "), "Invoice_HO-2026-0007_Smith_Sons_Ltd.pdf");
        assert_eq!(invoice_filename("HO-2026-0007", "../etc"), "Invoice_HO-2026-0007_..etc.pdf");
        assert_eq!(invoice_filename("HO-2026-0007", "  "), "Invoice_HO-2026-0007.pdf");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        for line in wrap_text("lorem ipsum dolor sit amet consectetur adipiscing elit", 12) {
            assert!(line.chars().count() <= 12);
        }
    }

    #[test]
    fn test_short_invoice_fits_one_page() {
        let pages = layout_invoice(&invoice(3), &CompanyConfig::default()).unwrap();
        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        for needle in ["Harbonline", "INVOICE", "HO-2026-0007", "Bill to", "Jo Baker", "Description", "Subtotal", "Total", "Payment terms", "Page 1 of 1"] {
            assert!(page.contains(needle), "missing {needle}");
        }
        assert!(page.contains("Discount (10%)"));
        assert!(page.contains("Payment due within 14 days"));
    }

    #[test]
    fn test_long_invoice_repeats_table_header_on_each_page() {
        let pages = layout_invoice(&invoice(80), &CompanyConfig::default()).unwrap();
        assert!(pages.len() > 2);

        let rows: usize = pages
            .iter()
            .map(|p| p.texts().iter().filter(|t| t.starts_with("Design work")).count())
            .sum();
        assert_eq!(rows, 80);

        for (i, page) in pages.iter().enumerate() {
            assert!(page.contains(&format!("Page {} of {}", i + 1, pages.len())));
            assert!(max_body_y(page) <= CONTENT_BOTTOM, "page {} overflows", i + 1);
            if page.texts().iter().any(|t| t.starts_with("Design work")) {
                assert!(page.contains("Description"), "page {} lacks table header", i + 1);
            }
            if i > 0 {
                assert!(page.contains("Invoice HO-2026-0007 (continued)"));
            }
        }
        assert_eq!(pages.iter().filter(|p| p.contains("Subtotal")).count(), 1);
        assert!(!pages[0].contains("Subtotal"));
    }

    #[test]
    fn test_long_descriptions_wrap() {
        let mut inv = invoice(1);
        inv.line_items[0].description = "word ".repeat(60);
        let pages = layout_invoice(&inv, &CompanyConfig::default()).unwrap();
        let wrapped = pages[0].texts().iter().filter(|t| t.starts_with("word")).count();
        assert!(wrapped > 1);
    }

    #[test]
    fn test_row_taller_than_a_page_flows_across_pages() {
        let mut inv = invoice(2);
        inv.line_items[0].description = "word ".repeat(1200);
        let pages = layout_invoice(&inv, &CompanyConfig::default()).unwrap();
        assert!(pages.len() > 2);

        let mut rows_seen = 0;
        for (i, page) in pages.iter().enumerate() {
            assert!(max_body_y(page) <= CONTENT_BOTTOM, "page {} overflows", i + 1);
            let row_text = page.texts().iter().filter(|t| t.starts_with("word")).count();
            if row_text > 0 {
                rows_seen += 1;
                assert!(page.contains("Description"), "page {} lacks table header", i + 1);
            }
        }
        assert!(rows_seen > 1);

        // The figures go once, beside the first line of the row.
        let amounts: usize = pages.iter().map(|p| p.texts().iter().filter(|&&t| t == "£600.00").count()).sum();
        assert_eq!(amounts, 2);
        assert_eq!(pages.iter().filter(|p| p.contains("Design work, iteration 2")).count(), 1);
    }

    #[test]
    fn test_footer_is_ignored_when_measuring_body() {
        let pages = layout_invoice(&invoice(1), &CompanyConfig::default()).unwrap();
        let footer = pages[0]
            .elements
            .iter()
            .any(|e| matches!(e, Element::Text { y, text, .. } if *y > FOOTER_RULE && text.starts_with("Account name")));
        assert!(footer);
        assert!(max_body_y(&pages[0]) <= CONTENT_BOTTOM);
    }

    #[test]
    fn test_layout_reports_overflowing_amounts() {
        let mut inv = invoice(1);
        inv.line_items[0].quantity = Decimal::MAX;
        inv.line_items[0].rate = dec!(2);
        assert_eq!(layout_invoice(&inv, &CompanyConfig::default()), Err(AmountOverflow));
    }

    #[test]
    fn test_totals_move_to_new_page_when_they_do_not_fit() {
        // Grow the table until the totals block no longer fits under it.
        let mut n = 1;
        loop {
            let pages = layout_invoice(&invoice(n), &CompanyConfig::default()).unwrap();
            let items_on_first = pages[0].texts().iter().filter(|t| t.starts_with("Design work")).count();
            if items_on_first == n && !pages[0].contains("Subtotal") {
                assert!(pages[1].contains("Subtotal"));
                assert!(pages[1].contains("(continued)"));
                assert!(!pages[1].contains("Description"));
                break;
            }
            assert!(items_on_first == n, "table split before totals moved");
            n += 1;
        }
    }

    #[test]
    fn test_bank_footer_present_when_configured() {
        let company = CompanyConfig {
            bank_name: "Harbour Bank".to_string(),
            sort_code: "12-34-56".to_string(),
            account_number: "12345678".to_string(),
            ..CompanyConfig::default()
        };
        let pages = layout_invoice(&invoice(2), &company).unwrap();
        assert!(pages[0].contains("Bank: Harbour Bank"));
        assert!(pages[0].contains("Sort code: 12-34-56"));
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_invoice(&invoice(40), &CompanyConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
