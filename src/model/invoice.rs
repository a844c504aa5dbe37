use bson::oid::ObjectId;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::model::{Document, Status};
use crate::util::filter::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

/// A money figure went past what `Decimal` can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invoice amounts are too large")]
pub struct AmountOverflow;

impl LineItem {
    pub fn amount(&self) -> Result<Decimal, AmountOverflow> {
        self.quantity.checked_mul(self.rate).map(round_money).ok_or(AmountOverflow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl Discount {
    /// Discount in money terms, never more than the subtotal.
    pub fn amount_on(&self, subtotal: Decimal) -> Result<Decimal, AmountOverflow> {
        let raw = match self.kind {
            DiscountKind::Percentage => subtotal
                .checked_mul(self.value)
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                .ok_or(AmountOverflow)?,
            DiscountKind::Fixed => self.value,
        };
        Ok(round_money(raw).clamp(Decimal::ZERO, subtotal.max(Decimal::ZERO)))
    }

    pub fn label(&self) -> String {
        match self.kind {
            DiscountKind::Percentage => format!("Discount ({}%)", self.value.normalize()),
            DiscountKind::Fixed => "Discount".to_string(),
        }
    }
}

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derived figures of an invoice. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    pub fn compute(items: &[LineItem], discount: Option<&Discount>, tax_rate: Decimal) -> Result<Self, AmountOverflow> {
        let subtotal = items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.amount()?).ok_or(AmountOverflow)
        })?;
        let discount_amount = match discount {
            Some(d) => d.amount_on(subtotal)?,
            None => Decimal::ZERO,
        };
        let taxable_amount = subtotal.checked_sub(discount_amount).ok_or(AmountOverflow)?;
        let tax_amount = taxable_amount
            .checked_mul(tax_rate)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .map(round_money)
            .ok_or(AmountOverflow)?;
        let total = taxable_amount.checked_add(tax_amount).ok_or(AmountOverflow)?;
        Ok(InvoiceTotals { subtotal, discount_amount, taxable_amount, tax_amount, total })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl Status for InvoiceStatus {
    fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    fn allowed_next(&self) -> &'static [Self] {
        match self {
            InvoiceStatus::Draft => &[InvoiceStatus::Sent, InvoiceStatus::Cancelled],
            InvoiceStatus::Sent => &[InvoiceStatus::Paid, InvoiceStatus::Overdue, InvoiceStatus::Cancelled],
            InvoiceStatus::Overdue => &[InvoiceStatus::Paid, InvoiceStatus::Cancelled],
            InvoiceStatus::Paid | InvoiceStatus::Cancelled => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub invoice_number: String,

    pub client_name: String,
    pub client_email: String,
    pub client_company: Option<String>,
    pub client_address: Option<String>,

    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,

    pub line_items: Vec<LineItem>,
    pub discount: Option<Discount>,
    pub tax_rate: Decimal,

    pub notes: Option<String>,
    pub payment_terms: Option<String>,

    pub status: InvoiceStatus,
    pub sent_at: Option<String>,
    pub paid_at: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Invoice {
    pub fn totals(&self) -> Result<InvoiceTotals, AmountOverflow> {
        InvoiceTotals::compute(&self.line_items, self.discount.as_ref(), self.tax_rate)
    }

    /// Moves to `status`; `sent_at` and `paid_at` are stamped the first time.
    pub fn apply_status(&mut self, status: InvoiceStatus, now: &str) {
        self.status = status;
        match status {
            InvoiceStatus::Sent if self.sent_at.is_none() => self.sent_at = Some(now.to_string()),
            InvoiceStatus::Paid if self.paid_at.is_none() => self.paid_at = Some(now.to_string()),
            _ => {}
        }
    }

    /// Whether line items, client details and amounts may still change.
    pub fn is_editable(&self) -> bool {
        !matches!(self.status, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }

    /// Sent but unpaid past the due date, whether or not anyone flagged it.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.status {
            InvoiceStatus::Overdue => true,
            InvoiceStatus::Sent => self.due_date < today,
            _ => false,
        }
    }

    /// Checks the money inputs, including that the totals can be computed.
    pub fn validate_amounts(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.line_items.is_empty() {
            errors.push("An invoice needs at least one line item".to_string());
        }
        for (i, item) in self.line_items.iter().enumerate() {
            if item.description.trim().is_empty() {
                errors.push(format!("Line item {} needs a description", i + 1));
            }
            if item.quantity.is_sign_negative() {
                errors.push(format!("Line item {} quantity cannot be negative", i + 1));
            }
            if item.rate.is_sign_negative() {
                errors.push(format!("Line item {} rate cannot be negative", i + 1));
            }
        }
        if let Some(discount) = &self.discount {
            if discount.value.is_sign_negative() {
                errors.push("Discount cannot be negative".to_string());
            }
            if discount.kind == DiscountKind::Percentage && discount.value > Decimal::ONE_HUNDRED {
                errors.push("Percentage discount cannot exceed 100".to_string());
            }
        }
        if self.tax_rate.is_sign_negative() || self.tax_rate > Decimal::ONE_HUNDRED {
            errors.push("Tax rate must be between 0 and 100".to_string());
        }
        if self.due_date < self.issue_date {
            errors.push("Due date cannot be before the issue date".to_string());
        }
        if errors.is_empty() {
            if let Err(e) = self.totals() {
                errors.push(e.to_string());
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Document for Invoice {
    const COLLECTION: &'static str = "invoices";

    fn id(&self) -> Option<ObjectId> { self.id }
    fn set_id(&mut self, id: ObjectId) { self.id = Some(id); }
    fn created_at(&self) -> Option<&str> { self.created_at.as_deref() }
    fn set_created_at(&mut self, at: String) { self.created_at = Some(at); }
    fn set_updated_at(&mut self, at: String) { self.updated_at = Some(at); }
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.invoice_number.as_str(),
            self.client_name.as_str(),
            self.client_email.as_str(),
        ];
        fields.extend(self.client_company.as_deref());
        fields
    }

    fn status_str(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// `HO-{year}-{seq:04}`
pub fn format_invoice_number(year: i32, sequence: u32) -> String {
    format!("HO-{}-{:04}", year, sequence)
}

/// Next sequence for `year` given the numbers already issued.
pub fn next_invoice_sequence<'a>(year: i32, existing: impl IntoIterator<Item = &'a str>) -> u32 {
    let prefix = format!("HO-{}-", year);
    existing
        .into_iter()
        .filter_map(|n| n.strip_prefix(&prefix))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, rate: Decimal) -> LineItem {
        LineItem { description: "Work".to_string(), quantity, rate }
    }

    #[test]
    fn test_totals_without_discount_or_tax() {
        let totals = InvoiceTotals::compute(&[item(dec!(2), dec!(150)), item(dec!(1), dec!(99.99))], None, Decimal::ZERO).unwrap();
        assert_eq!(totals.subtotal, dec!(399.99));
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, dec!(399.99));
    }

    #[test]
    fn test_percentage_discount_then_tax_on_discounted_subtotal() {
        let discount = Discount { kind: DiscountKind::Percentage, value: dec!(10) };
        let totals = InvoiceTotals::compute(&[item(dec!(10), dec!(100))], Some(&discount), dec!(20)).unwrap();
        assert_eq!(totals.subtotal, dec!(1000));
        assert_eq!(totals.discount_amount, dec!(100.00));
        assert_eq!(totals.taxable_amount, dec!(900.00));
        assert_eq!(totals.tax_amount, dec!(180.00));
        assert_eq!(totals.total, dec!(1080.00));
    }

    #[test]
    fn test_fixed_discount_is_capped_at_subtotal() {
        let discount = Discount { kind: DiscountKind::Fixed, value: dec!(500) };
        let totals = InvoiceTotals::compute(&[item(dec!(1), dec!(120))], Some(&discount), dec!(20)).unwrap();
        assert_eq!(totals.discount_amount, dec!(120));
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        let totals = InvoiceTotals::compute(&[item(dec!(1), dec!(0.625))], None, Decimal::ZERO).unwrap();
        assert_eq!(totals.subtotal, dec!(0.63));

        // 10% of 1.25 is exactly 0.125
        let totals = InvoiceTotals::compute(&[item(dec!(1), dec!(1.25))], None, dec!(10)).unwrap();
        assert_eq!(totals.tax_amount, dec!(0.13));
        assert_eq!(totals.total, dec!(1.38));
    }

    #[test]
    fn test_total_identity_holds_over_a_grid_of_inputs() {
        let quantities = [dec!(0), dec!(1), dec!(2.5), dec!(3), dec!(17)];
        let rates = [dec!(0), dec!(0.01), dec!(33.33), dec!(49.995), dec!(1250)];
        let discounts = [
            None,
            Some(Discount { kind: DiscountKind::Percentage, value: dec!(12.5) }),
            Some(Discount { kind: DiscountKind::Percentage, value: dec!(100) }),
            Some(Discount { kind: DiscountKind::Fixed, value: dec!(75.5) }),
        ];
        let tax_rates = [dec!(0), dec!(5), dec!(17.5), dec!(20)];

        for q in quantities {
            for r in rates {
                for d in &discounts {
                    for t in tax_rates {
                        let items = [item(q, r), item(dec!(1), r)];
                        let totals = InvoiceTotals::compute(&items, d.as_ref(), t).unwrap();
                        let expected_subtotal: Decimal = items.iter().map(|i| round_money(i.quantity * i.rate)).sum();
                        assert_eq!(totals.subtotal, expected_subtotal);
                        assert_eq!(totals.total, totals.subtotal - totals.discount_amount + totals.tax_amount);
                        assert!(totals.discount_amount >= Decimal::ZERO);
                        assert!(totals.discount_amount <= totals.subtotal);
                        assert!(totals.total >= Decimal::ZERO);
                    }
                }
            }
        }
    }

    #[test]
    fn test_totals_report_overflow_instead_of_panicking() {
        let huge = [item(Decimal::MAX, dec!(2))];
        assert_eq!(InvoiceTotals::compute(&huge, None, Decimal::ZERO), Err(AmountOverflow));

        let two_max = [item(dec!(1), Decimal::MAX), item(dec!(1), Decimal::MAX)];
        assert_eq!(InvoiceTotals::compute(&two_max, None, Decimal::ZERO), Err(AmountOverflow));

        let big = [item(dec!(1), Decimal::MAX)];
        assert_eq!(InvoiceTotals::compute(&big, None, dec!(20)), Err(AmountOverflow));
    }

    #[test]
    fn test_validate_amounts_rejects_overflowing_totals() {
        let mut inv = sample_invoice();
        inv.line_items = vec![item(Decimal::MAX, dec!(2))];
        let errors = inv.validate_amounts().unwrap_err();
        assert_eq!(errors, vec!["Invoice amounts are too large".to_string()]);
    }

    #[test]
    fn test_invoice_status_lifecycle() {
        assert!(InvoiceStatus::Draft.can_transition_to(InvoiceStatus::Sent));
        assert!(InvoiceStatus::Sent.can_transition_to(InvoiceStatus::Overdue));
        assert!(InvoiceStatus::Overdue.can_transition_to(InvoiceStatus::Paid));
        assert!(!InvoiceStatus::Draft.can_transition_to(InvoiceStatus::Paid));
        assert!(!InvoiceStatus::Paid.can_transition_to(InvoiceStatus::Cancelled));
        assert!(!InvoiceStatus::Cancelled.can_transition_to(InvoiceStatus::Draft));
    }

    fn sample_invoice() -> Invoice {
        Invoice {
            id: None,
            invoice_number: "HO-2026-0001".to_string(),
            client_name: "Jo".to_string(),
            client_email: "jo@example.com".to_string(),
            client_company: None,
            client_address: None,
            issue_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            line_items: vec![item(dec!(1), dec!(100))],
            discount: None,
            tax_rate: dec!(0),
            notes: None,
            payment_terms: None,
            status: InvoiceStatus::Draft,
            sent_at: None,
            paid_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_apply_status_stamps_sent_and_paid_once() {
        let mut inv = sample_invoice();
        inv.apply_status(InvoiceStatus::Sent, "t1");
        inv.apply_status(InvoiceStatus::Overdue, "t2");
        inv.apply_status(InvoiceStatus::Paid, "t3");
        assert_eq!(inv.sent_at.as_deref(), Some("t1"));
        assert_eq!(inv.paid_at.as_deref(), Some("t3"));
        assert!(!inv.is_editable());
        assert!(!inv.is_overdue_on(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }

    #[test]
    fn test_next_invoice_sequence() {
        let existing = ["HO-2026-0001", "HO-2026-0007", "HO-2025-0042", "custom"];
        assert_eq!(next_invoice_sequence(2026, existing), 8);
        assert_eq!(next_invoice_sequence(2027, existing), 1);
        assert_eq!(format_invoice_number(2026, 8), "HO-2026-0008");
    }

    #[test]
    fn test_discount_label() {
        let d = Discount { kind: DiscountKind::Percentage, value: dec!(12.50) };
        assert_eq!(d.label(), "Discount (12.5%)");
    }
}
