//! Step model of the public quote wizard.
//!
//! The wizard walks a visitor through five field groups. The client keeps
//! its own copy of the state; the server re-runs the same checks when a step
//! is validated and when the final payload is submitted.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::quote::{Budget, ProjectType, Quote, QuoteStatus, ServiceSelection, Timeline};

pub const TOTAL_STEPS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ProjectType = 1,
    Services = 2,
    TimelineBudget = 3,
    Details = 4,
    Contact = 5,
}

impl WizardStep {
    pub fn from_number(step: u8) -> Option<Self> {
        match step {
            1 => Some(WizardStep::ProjectType),
            2 => Some(WizardStep::Services),
            3 => Some(WizardStep::TimelineBudget),
            4 => Some(WizardStep::Details),
            5 => Some(WizardStep::Contact),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ProjectType => "Project type",
            WizardStep::Services => "Services",
            WizardStep::TimelineBudget => "Timeline & budget",
            WizardStep::Details => "Project details",
            WizardStep::Contact => "Contact details",
        }
    }
}

/// Everything the wizard collects; every field is optional until its step
/// is validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteDraft {
    pub project_type: Option<ProjectType>,
    pub services: ServiceSelection,
    pub timeline: Option<Timeline>,
    pub budget: Option<Budget>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub referral_source: Option<String>,
}

#[derive(Debug, Validate)]
struct ContactDetails {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    name: String,
    #[validate(email(message = "A valid email address is required"))]
    email: String,
    #[validate(length(min = 6, max = 20, message = "Phone number must be between 6 and 20 characters"))]
    phone: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl QuoteDraft {
    /// Required-field check for one step. Returns the user-facing messages.
    pub fn validate_step(&self, step: WizardStep) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        match step {
            WizardStep::ProjectType => {
                if self.project_type.is_none() {
                    errors.push("Please choose a project type".to_string());
                }
            }
            WizardStep::Services => {
                if !self.services.any() {
                    errors.push("Please select at least one service".to_string());
                }
            }
            WizardStep::TimelineBudget => {
                if self.timeline.is_none() {
                    errors.push("Please choose a timeline".to_string());
                }
                if self.budget.is_none() {
                    errors.push("Please choose a budget".to_string());
                }
            }
            WizardStep::Details => match non_blank(&self.description) {
                None => errors.push("Please describe your project".to_string()),
                Some(d) if d.chars().count() > 5000 => {
                    errors.push("Project description must be at most 5000 characters".to_string())
                }
                Some(_) => {}
            },
            WizardStep::Contact => {
                let contact = ContactDetails {
                    name: non_blank(&self.name).unwrap_or_default().to_string(),
                    email: non_blank(&self.email).unwrap_or_default().to_string(),
                    phone: non_blank(&self.phone).map(str::to_string),
                };
                if let Err(e) = contact.validate() {
                    for (_, field_errors) in e.field_errors() {
                        for fe in field_errors {
                            errors.push(
                                fe.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| fe.code.to_string()),
                            );
                        }
                    }
                    errors.sort();
                }
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Builds the stored quote once every step validates.
    pub fn into_quote(self) -> Result<Quote, WizardError> {
        for n in 1..=TOTAL_STEPS {
            let step = WizardStep::from_number(n).ok_or(WizardError::UnknownStep(n))?;
            self.validate_step(step).map_err(|errors| WizardError::Incomplete { step, errors })?;
        }
        let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let incomplete = |step| WizardError::Incomplete { step, errors: vec!["missing field".to_string()] };

        Ok(Quote {
            id: None,
            name: trimmed(self.name).ok_or_else(|| incomplete(WizardStep::Contact))?,
            email: trimmed(self.email).ok_or_else(|| incomplete(WizardStep::Contact))?,
            phone: trimmed(self.phone),
            company: trimmed(self.company),
            project_type: self.project_type.ok_or_else(|| incomplete(WizardStep::ProjectType))?,
            services: self.services,
            timeline: self.timeline.ok_or_else(|| incomplete(WizardStep::TimelineBudget))?,
            budget: self.budget.ok_or_else(|| incomplete(WizardStep::TimelineBudget))?,
            description: trimmed(self.description).ok_or_else(|| incomplete(WizardStep::Details))?,
            location: trimmed(self.location),
            referral_source: trimmed(self.referral_source),
            status: QuoteStatus::New,
            notes: None,
            created_at: None,
            updated_at: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("Unknown wizard step {0}")]
    UnknownStep(u8),
    #[error("Step {} ({}) is incomplete: {}", .step.number(), .step.title(), .errors.join(", "))]
    Incomplete { step: WizardStep, errors: Vec<String> },
}

/// Position of a visitor in the wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteWizard {
    pub step: u8,
    pub draft: QuoteDraft,
}

impl Default for QuoteWizard {
    fn default() -> Self {
        QuoteWizard { step: 1, draft: QuoteDraft::default() }
    }
}

impl QuoteWizard {
    pub fn new(step: u8, draft: QuoteDraft) -> Self {
        QuoteWizard { step: step.clamp(1, TOTAL_STEPS), draft }
    }

    pub fn current(&self) -> WizardStep {
        WizardStep::from_number(self.step.clamp(1, TOTAL_STEPS)).unwrap_or(WizardStep::ProjectType)
    }

    /// Advances one step if the current one validates; stays on the last step.
    pub fn next(&mut self) -> Result<u8, WizardError> {
        let step = self.current();
        self.draft
            .validate_step(step)
            .map_err(|errors| WizardError::Incomplete { step, errors })?;
        self.step = (self.step + 1).min(TOTAL_STEPS);
        Ok(self.step)
    }

    /// Goes back one step without validating; stays on the first step.
    pub fn back(&mut self) -> u8 {
        self.step = self.step.saturating_sub(1).max(1);
        self.step
    }

    pub fn is_last(&self) -> bool {
        self.step == TOTAL_STEPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> QuoteDraft {
        QuoteDraft {
            project_type: Some(ProjectType::BusinessWebsite),
            services: ServiceSelection { web_design: true, seo: true, ..Default::default() },
            timeline: Some(Timeline::OneToThreeMonths),
            budget: Some(Budget::From1kTo3k),
            description: Some("  A new site for my bakery  ".to_string()),
            location: Some("Bristol".to_string()),
            name: Some("Jo Baker".to_string()),
            email: Some("jo@example.com".to_string()),
            phone: Some("07700 900123".to_string()),
            company: Some("".to_string()),
            referral_source: None,
        }
    }

    #[test]
    fn test_cannot_leave_step_one_without_project_type() {
        let mut wizard = QuoteWizard::default();
        let err = wizard.next().unwrap_err();
        assert!(matches!(err, WizardError::Incomplete { step: WizardStep::ProjectType, .. }));
        assert_eq!(wizard.step, 1);

        wizard.draft.project_type = Some(ProjectType::Ecommerce);
        assert_eq!(wizard.next().unwrap(), 2);
    }

    #[test]
    fn test_back_never_goes_below_one() {
        let mut wizard = QuoteWizard::default();
        assert_eq!(wizard.back(), 1);
        assert_eq!(wizard.back(), 1);
    }

    #[test]
    fn test_next_never_exceeds_total_steps() {
        let mut wizard = QuoteWizard::new(1, complete_draft());
        for _ in 0..10 {
            wizard.next().unwrap();
        }
        assert_eq!(wizard.step, TOTAL_STEPS);
        assert!(wizard.is_last());
    }

    #[test]
    fn test_new_clamps_out_of_range_steps() {
        assert_eq!(QuoteWizard::new(0, QuoteDraft::default()).step, 1);
        assert_eq!(QuoteWizard::new(42, QuoteDraft::default()).step, TOTAL_STEPS);
    }

    #[test]
    fn test_timeline_step_reports_both_missing_fields() {
        let errors = QuoteDraft::default().validate_step(WizardStep::TimelineBudget).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_contact_step_rejects_bad_email() {
        let draft = QuoteDraft { email: Some("not-an-email".to_string()), ..complete_draft() };
        let errors = draft.validate_step(WizardStep::Contact).unwrap_err();
        assert_eq!(errors, vec!["A valid email address is required".to_string()]);
    }

    #[test]
    fn test_into_quote_trims_and_drops_blank_fields() {
        let quote = complete_draft().into_quote().unwrap();
        assert_eq!(quote.description, "A new site for my bakery");
        assert_eq!(quote.company, None);
        assert_eq!(quote.status, QuoteStatus::New);
        assert_eq!(quote.services.selected_labels(), vec!["Web design", "SEO"]);
    }

    #[test]
    fn test_into_quote_reports_first_incomplete_step() {
        let draft = QuoteDraft { services: ServiceSelection::default(), ..complete_draft() };
        match draft.into_quote() {
            Err(WizardError::Incomplete { step, .. }) => assert_eq!(step, WizardStep::Services),
            other => panic!("expected incomplete services step, got {:?}", other),
        }
    }
}
