use chrono::NaiveDate;
use dotenv::dotenv;
use rust_decimal::Decimal;
use tracing::info;

use harbonline_backend::config::CompanyConfig;
use harbonline_backend::model::invoice::{Discount, DiscountKind, Invoice, InvoiceStatus, LineItem};
use harbonline_backend::util::invoice_pdf::{format_money, invoice_filename, render_invoice};
use harbonline_backend::util::logger::Logger;

// Renders a sample invoice to the current directory using COMPANY_* settings.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv();
    let _logger = Logger::new()?;

    let company = CompanyConfig::from_env()?;
    let issue_date = NaiveDate::from_ymd_opt(2026, 3, 2).ok_or("invalid date")?;
    let line_items = (1..=30)
        .map(|i| LineItem {
            description: format!("Landing page variant {} with copy review and analytics set-up", i),
            quantity: Decimal::ONE,
            rate: Decimal::new(12_500, 2),
        })
        .collect();

    let invoice = Invoice {
        id: None,
        invoice_number: "HO-2026-0042".to_string(),
        client_name: "Jo Baker".to_string(),
        client_email: "jo@example.com".to_string(),
        client_company: Some("Baker & Co".to_string()),
        client_address: Some("1 Harbour Street\nBristol BS1 4XX".to_string()),
        issue_date,
        due_date: issue_date + chrono::Duration::days(company.payment_terms_days),
        line_items,
        discount: Some(Discount { kind: DiscountKind::Percentage, value: Decimal::TEN }),
        tax_rate: Decimal::new(20, 0),
        notes: Some("Thank you for choosing us for your new site.".to_string()),
        payment_terms: None,
        status: InvoiceStatus::Draft,
        sent_at: None,
        paid_at: None,
        created_at: None,
        updated_at: None,
    };

    let bytes = render_invoice(&invoice, &company)?;
    let filename = invoice_filename(&invoice.invoice_number, &invoice.client_name);
    std::fs::write(&filename, &bytes)?;
    info!(file = %filename, total = %format_money(invoice.totals()?.total), bytes = bytes.len(), "Invoice rendered");
    Ok(())
}
