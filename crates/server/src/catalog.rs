//! The fixed, ordered tool catalog.
//!
//! [`ToolName`] is the closed set of tools this server handles. The advertised descriptors and
//! the router are both driven from it, so the two can never disagree.

use linkedin_mcp_client::Proficiency;
use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};
use std::fmt;
use std::sync::{Arc, LazyLock};

pub const DEFAULT_POSTS_LIMIT: u32 = 10;
pub const DEFAULT_CONNECTIONS_LIMIT: u32 = 50;
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetProfile,
    GetPosts,
    GetConnections,
    SharePost,
    SearchPeople,
    AddSkill,
    DeleteSkill,
    AddPosition,
    UpdatePosition,
    DeletePosition,
    AddEducation,
    DeleteEducation,
    AddCertification,
    DeleteCertification,
    AddPublication,
    DeletePublication,
    AddLanguage,
    DeleteLanguage,
}

/// A required argument and the words used to name it in error messages.
#[derive(Debug, Clone, Copy)]
pub struct RequiredArg {
    pub key: &'static str,
    pub label: &'static str,
    /// `label` is grammatically plural ("keywords are required").
    pub plural: bool,
}

const fn arg(key: &'static str, label: &'static str) -> RequiredArg {
    RequiredArg {
        key,
        label,
        plural: false,
    }
}

impl ToolName {
    /// Catalog order. Clients display tools in this order.
    pub const ALL: [Self; 18] = [
        Self::GetProfile,
        Self::GetPosts,
        Self::GetConnections,
        Self::SharePost,
        Self::SearchPeople,
        Self::AddSkill,
        Self::DeleteSkill,
        Self::AddPosition,
        Self::UpdatePosition,
        Self::DeletePosition,
        Self::AddEducation,
        Self::DeleteEducation,
        Self::AddCertification,
        Self::DeleteCertification,
        Self::AddPublication,
        Self::DeletePublication,
        Self::AddLanguage,
        Self::DeleteLanguage,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetProfile => "get_linkedin_profile",
            Self::GetPosts => "get_linkedin_posts",
            Self::GetConnections => "get_linkedin_connections",
            Self::SharePost => "share_linkedin_post",
            Self::SearchPeople => "search_linkedin_people",
            Self::AddSkill => "add_linkedin_skill",
            Self::DeleteSkill => "delete_linkedin_skill",
            Self::AddPosition => "add_linkedin_position",
            Self::UpdatePosition => "update_linkedin_position",
            Self::DeletePosition => "delete_linkedin_position",
            Self::AddEducation => "add_linkedin_education",
            Self::DeleteEducation => "delete_linkedin_education",
            Self::AddCertification => "add_linkedin_certification",
            Self::DeleteCertification => "delete_linkedin_certification",
            Self::AddPublication => "add_linkedin_publication",
            Self::DeletePublication => "delete_linkedin_publication",
            Self::AddLanguage => "add_linkedin_language",
            Self::DeleteLanguage => "delete_linkedin_language",
        }
    }

    /// Resolve a wire name. `None` means the caller asked for a tool we do not have.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::GetProfile => "Get the authenticated user's LinkedIn profile information",
            Self::GetPosts => "Get the user's recent LinkedIn posts",
            Self::GetConnections => "Get the user's LinkedIn connections",
            Self::SharePost => "Share a new post on LinkedIn",
            Self::SearchPeople => "Search for people on LinkedIn",
            Self::AddSkill => "Add a skill to your LinkedIn profile",
            Self::DeleteSkill => "Delete a skill from your LinkedIn profile",
            Self::AddPosition => "Add a work position to your LinkedIn profile",
            Self::UpdatePosition => "Update an existing position on your LinkedIn profile",
            Self::DeletePosition => "Delete a position from your LinkedIn profile",
            Self::AddEducation => "Add education to your LinkedIn profile",
            Self::DeleteEducation => "Delete education from your LinkedIn profile",
            Self::AddCertification => "Add a certification to your LinkedIn profile",
            Self::DeleteCertification => "Delete a certification from your LinkedIn profile",
            Self::AddPublication => "Add a publication to your LinkedIn profile",
            Self::DeletePublication => "Delete a publication from your LinkedIn profile",
            Self::AddLanguage => "Add a language to your LinkedIn profile",
            Self::DeleteLanguage => "Delete a language from your LinkedIn profile",
        }
    }

    /// Required arguments, in the order they are reported when missing.
    #[must_use]
    pub fn required_args(self) -> &'static [RequiredArg] {
        match self {
            Self::GetProfile | Self::GetPosts | Self::GetConnections => &[],
            Self::SharePost => const { &[arg("text", "text")] },
            Self::SearchPeople => &[RequiredArg {
                key: "keywords",
                label: "keywords",
                plural: true,
            }],
            Self::AddSkill => const { &[arg("name", "skill name")] },
            Self::DeleteSkill => const { &[arg("skillId", "skill ID")] },
            Self::AddPosition => const {
                &[
                    arg("title", "title"),
                    arg("company", "company"),
                    arg("startYear", "start year"),
                ]
            },
            Self::UpdatePosition | Self::DeletePosition => {
                const { &[arg("positionId", "position ID")] }
            }
            Self::AddEducation => const { &[arg("schoolName", "school name")] },
            Self::DeleteEducation => const { &[arg("educationId", "education ID")] },
            Self::AddCertification => const {
                &[
                    arg("name", "certification name"),
                    arg("authority", "authority"),
                ]
            },
            Self::DeleteCertification => {
                const { &[arg("certificationId", "certification ID")] }
            }
            Self::AddPublication => const { &[arg("name", "publication name")] },
            Self::DeletePublication => const { &[arg("publicationId", "publication ID")] },
            Self::AddLanguage => const { &[arg("name", "language name")] },
            Self::DeleteLanguage => const { &[arg("languageId", "language ID")] },
        }
    }

    /// Trailing context appended to the missing-argument message.
    #[must_use]
    pub fn missing_argument_context(self) -> Option<&'static str> {
        match self {
            Self::SharePost => Some("for sharing a post"),
            Self::SearchPeople => Some("for searching people"),
            _ => None,
        }
    }

    fn properties(self) -> Value {
        match self {
            Self::GetProfile => json!({}),
            Self::GetPosts => json!({
                "limit": limit_property("posts to retrieve", DEFAULT_POSTS_LIMIT),
            }),
            Self::GetConnections => json!({
                "limit": limit_property("connections to retrieve", DEFAULT_CONNECTIONS_LIMIT),
            }),
            Self::SharePost => json!({
                "text": string_property("The text content of the post"),
            }),
            Self::SearchPeople => json!({
                "keywords": string_property("Search keywords"),
                "limit": limit_property("results", DEFAULT_SEARCH_LIMIT),
            }),
            Self::AddSkill => json!({
                "name": string_property("The name of the skill to add"),
            }),
            Self::DeleteSkill => json!({
                "skillId": string_property("The ID of the skill to delete"),
            }),
            Self::AddPosition => json!({
                "title": string_property("Job title"),
                "company": string_property("Company name"),
                "description": string_property("Job description (optional)"),
                "startYear": number_property("Start year"),
                "startMonth": number_property("Start month (1-12, optional)"),
                "endYear": number_property("End year (optional, omit if current)"),
                "endMonth": number_property("End month (1-12, optional)"),
                "current": { "type": "boolean", "description": "Is this your current position?" },
            }),
            Self::UpdatePosition => json!({
                "positionId": string_property("The ID of the position to update"),
                "title": string_property("Job title (optional)"),
                "company": string_property("Company name (optional)"),
                "description": string_property("Job description (optional)"),
                "startYear": number_property("Start year (optional)"),
                "startMonth": number_property("Start month (1-12, optional)"),
                "endYear": number_property("End year (optional)"),
                "endMonth": number_property("End month (1-12, optional)"),
            }),
            Self::DeletePosition => json!({
                "positionId": string_property("The ID of the position to delete"),
            }),
            Self::AddEducation => json!({
                "schoolName": string_property("Name of the school"),
                "degree": string_property("Degree name (optional)"),
                "fieldOfStudy": string_property("Field of study (optional)"),
                "startYear": number_property("Start year (optional)"),
                "startMonth": number_property("Start month (1-12, optional)"),
                "endYear": number_property("End year (optional)"),
                "endMonth": number_property("End month (1-12, optional)"),
                "grade": string_property("Grade or GPA (optional)"),
                "activities": string_property("Activities and societies (optional)"),
            }),
            Self::DeleteEducation => json!({
                "educationId": string_property("The ID of the education entry to delete"),
            }),
            Self::AddCertification => json!({
                "name": string_property("Certification name"),
                "authority": string_property("Issuing authority/organization"),
                "licenseNumber": string_property("License or certification number (optional)"),
                "startYear": number_property("Issue year (optional)"),
                "startMonth": number_property("Issue month (1-12, optional)"),
                "endYear": number_property("Expiration year (optional)"),
                "endMonth": number_property("Expiration month (1-12, optional)"),
                "url": string_property("URL to certification (optional)"),
            }),
            Self::DeleteCertification => json!({
                "certificationId": string_property("The ID of the certification to delete"),
            }),
            Self::AddPublication => json!({
                "name": string_property("Publication name"),
                "publisher": string_property("Publisher name (optional)"),
                "year": number_property("Publication year (optional)"),
                "month": number_property("Publication month (1-12, optional)"),
                "day": number_property("Publication day (1-31, optional)"),
                "description": string_property("Publication description (optional)"),
                "url": string_property("URL to publication (optional)"),
            }),
            Self::DeletePublication => json!({
                "publicationId": string_property("The ID of the publication to delete"),
            }),
            Self::AddLanguage => json!({
                "name": string_property("Language name"),
                "proficiency": {
                    "type": "string",
                    "description": "Proficiency level",
                    "enum": Proficiency::ALL.map(Proficiency::as_str),
                },
            }),
            Self::DeleteLanguage => json!({
                "languageId": string_property("The ID of the language to delete"),
            }),
        }
    }

    /// JSON schema of the tool's arguments.
    #[must_use]
    pub fn input_schema(self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), self.properties());
        let required = self.required_args();
        if !required.is_empty() {
            let keys: Vec<&str> = required.iter().map(|r| r.key).collect();
            schema.insert("required".to_string(), json!(keys));
        }
        schema
    }

    #[must_use]
    pub fn descriptor(self) -> Tool {
        Tool::new(
            self.as_str(),
            self.description(),
            Arc::new(self.input_schema()),
        )
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn string_property(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn number_property(description: &str) -> Value {
    json!({ "type": "number", "description": description })
}

fn limit_property(what: &str, default: u32) -> Value {
    json!({
        "type": "number",
        "description": format!("Maximum number of {what} (default: {default})"),
        "default": default,
    })
}

static CATALOG: LazyLock<Vec<Tool>> =
    LazyLock::new(|| ToolName::ALL.into_iter().map(ToolName::descriptor).collect());

/// Every tool this server exposes, in catalog order.
#[must_use]
pub fn list_tools() -> Vec<Tool> {
    CATALOG.clone()
}
