//! Records supplied by the job/candidate data provider.
//!
//! These types mirror the provider's boundary contract: jobs with their
//! requirements, and candidate ATS profiles with skills, experience,
//! education, and languages. Persistence of these records is owned
//! elsewhere; this crate only reads them.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};


/// Proficiency level attached to a profile skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// A single skill entry on a candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: SkillLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            name: name.into(),
            level,
            category: None,
        }
    }
}

/// One position held by a candidate. Dates may be open-ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// One education entry on a candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A language with its proficiency label (e.g. "Spanish" / "Native").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub level: String,
}

/// A candidate's ATS profile as supplied by the data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub languages: Vec<Language>,
    /// Whether the provider considers the profile filled out.
    #[serde(default)]
    pub complete: bool,
}

impl CandidateProfile {
    /// Total years of experience, summing entry durations (open-ended
    /// entries run to today). Months are truncated to whole years.
    pub fn total_experience_years(&self) -> u32 {
        let today = Utc::now().date_naive();
        let total_months: i64 = self
            .experience
            .iter()
            .filter_map(|exp| {
                let start = exp.start_date?;
                let end = exp.end_date.unwrap_or(today);
                Some(months_between(start, end).max(0))
            })
            .sum();

        (total_months / 12).max(0) as u32
    }

    /// Lower-cased skill names, used for overlap matching.
    pub fn skill_names_lowercase(&self) -> Vec<String> {
        self.skills
            .iter()
            .map(|skill| skill.name.to_lowercase())
            .collect()
    }
}

/// A job posting as supplied by the data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    /// Minimum years of experience the posting asks for.
    #[serde(default = "default_min_experience")]
    pub min_experience_years: u32,
}

fn default_min_experience() -> u32 {
    1
}

/// Complete calendar months between two dates. A month counts only once the
/// day-of-month is reached, so Jan 31 to Feb 1 is zero months.
fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);
    if end.day() < start.day() {
        months -= 1;
    }
    months
}
