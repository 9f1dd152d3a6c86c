use bevy::prelude::*;
use constants::sections::SectionKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PortfolioError;

const FALLBACK_NAME: &str = "Welcome";
const FALLBACK_TITLE: &str = "Explore My Portfolio";

/// Portfolio document as a Bevy asset and resource. Mirrors the JSON served by
/// the portfolio backend; every field is optional and section contents are
/// kept as raw JSON since the scene only checks them for presence.
#[derive(Asset, Resource, TypePath, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

impl PortfolioData {
    /// Parse a portfolio pushed by the host page.
    pub fn from_json_value(value: Value) -> Result<Self, PortfolioError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Raw contents of a section field, if the document carries one.
    pub fn section(&self, key: SectionKey) -> Option<&Value> {
        match key {
            SectionKey::Skills => self.skills.as_ref(),
            SectionKey::Experience => self.experience.as_ref(),
            SectionKey::Projects => self.projects.as_ref(),
            SectionKey::Education => self.education.as_ref(),
            SectionKey::Contact => self.contact.as_ref(),
        }
    }

    /// Intro heading: `personalInfo.name`, or a generic greeting.
    pub fn display_name(&self) -> &str {
        self.personal_info_field("name").unwrap_or(FALLBACK_NAME)
    }

    /// Intro subheading: `personalInfo.title`, or a generic prompt.
    pub fn display_title(&self) -> &str {
        self.personal_info_field("title").unwrap_or(FALLBACK_TITLE)
    }

    fn personal_info_field(&self, field: &str) -> Option<&str> {
        self.personal_info
            .as_ref()?
            .get(field)?
            .as_str()
            .filter(|s| !s.is_empty())
    }
}
