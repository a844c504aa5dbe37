use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::model::callback::Callback;
use crate::model::invoice::{AmountOverflow, Invoice, InvoiceStatus};
use crate::model::project::Project;
use crate::model::quote::Quote;
use crate::model::review::Review;
use crate::model::Status;
use crate::repository::Repository;
use crate::util::error::ServiceError;

/// Dashboard figures for the admin landing page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
	pub quotes: BTreeMap<String, u64>,
	pub callbacks: BTreeMap<String, u64>,
	pub invoices: BTreeMap<String, u64>,
	/// Total of sent and overdue invoices
	pub outstanding_total: Decimal,
	pub paid_total: Decimal,
	/// Sent invoices already past their due date
	pub overdue_count: u64,
	pub published_projects: u64,
	pub pending_reviews: u64,
}

pub struct StatsService {
	pub quote_repo: Arc<dyn Repository<Quote>>,
	pub callback_repo: Arc<dyn Repository<Callback>>,
	pub invoice_repo: Arc<dyn Repository<Invoice>>,
	pub project_repo: Arc<dyn Repository<Project>>,
	pub review_repo: Arc<dyn Repository<Review>>,
}

fn count_by<S: Status>(statuses: impl Iterator<Item = S>) -> BTreeMap<String, u64> {
	let mut counts = BTreeMap::new();
	for status in statuses {
		*counts.entry(status.as_str().to_string()).or_insert(0) += 1;
	}
	counts
}

impl StatsService {
	#[instrument(skip(self))]
	pub async fn dashboard(&self) -> Result<DashboardStats, ServiceError> {
		let quotes = self.quote_repo.list().await?;
		let callbacks = self.callback_repo.list().await?;
		let invoices = self.invoice_repo.list().await?;
		let projects = self.project_repo.list().await?;
		let reviews = self.review_repo.list().await?;
		let today = Utc::now().date_naive();

		let mut stats = DashboardStats {
			quotes: count_by(quotes.iter().map(|q| q.status)),
			callbacks: count_by(callbacks.iter().map(|c| c.status)),
			invoices: count_by(invoices.iter().map(|i| i.status)),
			published_projects: projects.iter().filter(|p| p.published).count() as u64,
			pending_reviews: reviews.iter().filter(|r| !r.published).count() as u64,
			..DashboardStats::default()
		};
		for invoice in &invoices {
			let total = invoice.totals()?.total;
			match invoice.status {
				InvoiceStatus::Sent | InvoiceStatus::Overdue => {
					stats.outstanding_total = stats.outstanding_total.checked_add(total).ok_or(AmountOverflow)?;
				}
				InvoiceStatus::Paid => {
					stats.paid_total = stats.paid_total.checked_add(total).ok_or(AmountOverflow)?;
				}
				InvoiceStatus::Draft | InvoiceStatus::Cancelled => {}
			}
			if invoice.is_overdue_on(today) {
				stats.overdue_count += 1;
			}
		}
		Ok(stats)
	}
}
