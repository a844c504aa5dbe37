use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::{Document, Status};
use crate::util::filter::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    BusinessWebsite,
    Ecommerce,
    LandingPage,
    WebApplication,
    Redesign,
    Other,
}

impl ProjectType {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::BusinessWebsite => "Business website",
            ProjectType::Ecommerce => "E-commerce store",
            ProjectType::LandingPage => "Landing page",
            ProjectType::WebApplication => "Web application",
            ProjectType::Redesign => "Website redesign",
            ProjectType::Other => "Other",
        }
    }
}

/// Services ticked in the quote wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSelection {
    pub web_design: bool,
    pub web_development: bool,
    pub ecommerce: bool,
    pub seo: bool,
    pub hosting: bool,
    pub maintenance: bool,
    pub copywriting: bool,
}

impl ServiceSelection {
    pub fn selected_labels(&self) -> Vec<&'static str> {
        [
            (self.web_design, "Web design"),
            (self.web_development, "Web development"),
            (self.ecommerce, "E-commerce"),
            (self.seo, "SEO"),
            (self.hosting, "Hosting"),
            (self.maintenance, "Maintenance"),
            (self.copywriting, "Copywriting"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }

    pub fn any(&self) -> bool {
        !self.selected_labels().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    Asap,
    OneToThreeMonths,
    ThreeToSixMonths,
    Flexible,
}

impl Timeline {
    pub fn label(&self) -> &'static str {
        match self {
            Timeline::Asap => "As soon as possible",
            Timeline::OneToThreeMonths => "1-3 months",
            Timeline::ThreeToSixMonths => "3-6 months",
            Timeline::Flexible => "Flexible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "under_1k")]
    Under1k,
    #[serde(rename = "1k_3k")]
    From1kTo3k,
    #[serde(rename = "3k_5k")]
    From3kTo5k,
    #[serde(rename = "5k_10k")]
    From5kTo10k,
    #[serde(rename = "over_10k")]
    Over10k,
    #[serde(rename = "not_sure")]
    NotSure,
}

impl Budget {
    pub fn label(&self) -> &'static str {
        match self {
            Budget::Under1k => "Under £1,000",
            Budget::From1kTo3k => "£1,000 - £3,000",
            Budget::From3kTo5k => "£3,000 - £5,000",
            Budget::From5kTo10k => "£5,000 - £10,000",
            Budget::Over10k => "£10,000+",
            Budget::NotSure => "Not sure yet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    New,
    Reviewed,
    Quoted,
    Accepted,
    Declined,
}

impl Status for QuoteStatus {
    fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::New => "new",
            QuoteStatus::Reviewed => "reviewed",
            QuoteStatus::Quoted => "quoted",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Declined => "declined",
        }
    }

    fn allowed_next(&self) -> &'static [Self] {
        match self {
            QuoteStatus::New => &[QuoteStatus::Reviewed, QuoteStatus::Declined],
            QuoteStatus::Reviewed => &[QuoteStatus::Quoted, QuoteStatus::Declined],
            QuoteStatus::Quoted => &[QuoteStatus::Accepted, QuoteStatus::Declined],
            QuoteStatus::Accepted | QuoteStatus::Declined => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: ProjectType,
    pub services: ServiceSelection,
    pub timeline: Timeline,
    pub budget: Budget,
    pub description: String,
    pub location: Option<String>,
    pub referral_source: Option<String>,

    pub status: QuoteStatus,
    pub notes: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Document for Quote {
    const COLLECTION: &'static str = "quotes";

    fn id(&self) -> Option<ObjectId> { self.id }
    fn set_id(&mut self, id: ObjectId) { self.id = Some(id); }
    fn created_at(&self) -> Option<&str> { self.created_at.as_deref() }
    fn set_created_at(&mut self, at: String) { self.created_at = Some(at); }
    fn set_updated_at(&mut self, at: String) { self.updated_at = Some(at); }
}

impl Searchable for Quote {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.description.as_str()];
        fields.extend(self.company.as_deref());
        fields
    }

    fn status_str(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_status_lifecycle() {
        assert!(QuoteStatus::New.can_transition_to(QuoteStatus::Reviewed));
        assert!(QuoteStatus::Reviewed.can_transition_to(QuoteStatus::Quoted));
        assert!(QuoteStatus::Quoted.can_transition_to(QuoteStatus::Accepted));
        assert!(QuoteStatus::Quoted.can_transition_to(QuoteStatus::Declined));
        assert!(QuoteStatus::New.can_transition_to(QuoteStatus::New));

        assert!(!QuoteStatus::New.can_transition_to(QuoteStatus::Accepted));
        assert!(!QuoteStatus::Accepted.can_transition_to(QuoteStatus::Declined));
        assert!(!QuoteStatus::Declined.can_transition_to(QuoteStatus::New));
    }

    #[test]
    fn test_selected_service_labels() {
        let services = ServiceSelection { seo: true, web_design: true, ..Default::default() };
        assert_eq!(services.selected_labels(), vec!["Web design", "SEO"]);
        assert!(services.any());
        assert!(!ServiceSelection::default().any());
    }

    #[test]
    fn test_enums_use_snake_case_on_the_wire() {
        assert_eq!(serde_json::to_string(&Budget::From1kTo3k).unwrap(), "\"1k_3k\"");
        assert_eq!(serde_json::to_string(&Timeline::OneToThreeMonths).unwrap(), "\"one_to_three_months\"");
        assert_eq!(serde_json::to_string(&ProjectType::WebApplication).unwrap(), "\"web_application\"");
    }
}
