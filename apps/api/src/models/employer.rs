use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employer {
    pub id: EntityId,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tax_code: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub industry: String,
    pub is_verified: bool,
    pub is_active: bool,
    /// Always equal to the number of jobs whose `employer_id` is this employer.
    pub job_posts: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Company profile supplied when an employer signs up.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfile {
    pub company_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tax_code: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub industry: String,
}

/// Partial profile update. Counters and verification flags are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerPatch {
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_code: Option<String>,
    pub contact_person: Option<String>,
    pub position: Option<String>,
    pub industry: Option<String>,
    pub is_active: Option<bool>,
}

impl EmployerPatch {
    pub fn apply(self, employer: &mut Employer) {
        if let Some(v) = self.company_name {
            employer.company_name = v;
        }
        if let Some(v) = self.phone {
            employer.phone = v;
        }
        if let Some(v) = self.address {
            employer.address = v;
        }
        if let Some(v) = self.tax_code {
            employer.tax_code = v;
        }
        if let Some(v) = self.contact_person {
            employer.contact_person = v;
        }
        if let Some(v) = self.position {
            employer.position = v;
        }
        if let Some(v) = self.industry {
            employer.industry = v;
        }
        if let Some(v) = self.is_active {
            employer.is_active = v;
        }
    }
}
