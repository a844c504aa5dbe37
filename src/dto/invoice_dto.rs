use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::invoice::{AmountOverflow, Discount, Invoice, InvoiceStatus, InvoiceTotals, LineItem};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    /// Generated as `HO-{year}-{seq:04}` when absent or blank
    #[validate(length(max = 50, message = "Invoice number must be at most 50 characters"))]
    pub invoice_number: Option<String>,
    #[validate(length(min = 2, max = 200, message = "Client name must be between 2 and 200 characters"))]
    pub client_name: String,
    #[validate(email(message = "A valid client email is required"))]
    pub client_email: String,
    pub client_company: Option<String>,
    pub client_address: Option<String>,
    /// Defaults to today
    pub issue_date: Option<NaiveDate>,
    /// Defaults to the issue date plus the configured payment terms
    pub due_date: Option<NaiveDate>,
    pub line_items: Vec<LineItem>,
    pub discount: Option<Discount>,
    #[serde(default)]
    pub tax_rate: Decimal,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
    pub payment_terms: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
    #[validate(length(min = 2, max = 200))]
    pub client_name: Option<String>,
    #[validate(email)]
    pub client_email: Option<String>,
    pub client_company: Option<String>,
    pub client_address: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub line_items: Option<Vec<LineItem>>,
    pub discount: Option<Discount>,
    /// Drops the stored discount
    #[serde(default)]
    pub remove_discount: bool,
    pub tax_rate: Option<Decimal>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
    pub payment_terms: Option<String>,
    pub status: Option<InvoiceStatus>,
}

impl UpdateInvoiceRequest {
    /// True when only `status` is set.
    pub fn is_status_only(&self) -> bool {
        self.client_name.is_none()
            && self.client_email.is_none()
            && self.client_company.is_none()
            && self.client_address.is_none()
            && self.issue_date.is_none()
            && self.due_date.is_none()
            && self.line_items.is_none()
            && self.discount.is_none()
            && !self.remove_discount
            && self.tax_rate.is_none()
            && self.notes.is_none()
            && self.payment_terms.is_none()
    }
}

/// Stored invoice plus its derived totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceResponse {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub totals: InvoiceTotals,
    /// Sent and past due, even if nobody has flagged it yet
    pub overdue: bool,
}

impl InvoiceResponse {
    pub fn new(invoice: Invoice, today: NaiveDate) -> Result<Self, AmountOverflow> {
        let totals = invoice.totals()?;
        let overdue = invoice.is_overdue_on(today);
        Ok(InvoiceResponse { invoice, totals, overdue })
    }
}

impl TryFrom<Invoice> for InvoiceResponse {
    type Error = AmountOverflow;

    fn try_from(invoice: Invoice) -> Result<Self, Self::Error> {
        InvoiceResponse::new(invoice, chrono::Utc::now().date_naive())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendInvoiceRequest {
    /// Overrides the client email for this send only
    #[validate(email)]
    pub to: Option<String>,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}
