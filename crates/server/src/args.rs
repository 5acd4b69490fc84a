//! Argument validation.
//!
//! Turns the caller's untyped argument map into a typed [`ValidatedArgs`] record for one tool.
//! Required-field checks are driven by [`ToolName::required_args`]; everything else is typed
//! extraction with absent optional fields left as `None`.

use crate::catalog::{
    DEFAULT_CONNECTIONS_LIMIT, DEFAULT_POSTS_LIMIT, DEFAULT_SEARCH_LIMIT, RequiredArg, ToolName,
};
use crate::error::ToolError;
use linkedin_mcp_client::Proficiency;
use rmcp::model::JsonObject;
use serde_json::Value;

/// Profile sections that support deletion by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Skill,
    Position,
    Education,
    Certification,
    Publication,
    Language,
}

impl Section {
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Position => "position",
            Self::Education => "education",
            Self::Certification => "certification",
            Self::Publication => "publication",
            Self::Language => "language",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionArgs {
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    pub start_year: i32,
    pub start_month: Option<u8>,
    pub end_year: Option<i32>,
    pub end_month: Option<u8>,
    pub current: Option<bool>,
}

/// Fields the caller supplied for a position update. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionChanges {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub start_year: Option<i32>,
    pub start_month: Option<u8>,
    pub end_year: Option<i32>,
    pub end_month: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationArgs {
    pub school_name: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_year: Option<i32>,
    pub start_month: Option<u8>,
    pub end_year: Option<i32>,
    pub end_month: Option<u8>,
    pub grade: Option<String>,
    pub activities: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationArgs {
    pub name: String,
    pub authority: String,
    pub license_number: Option<String>,
    pub start_year: Option<i32>,
    pub start_month: Option<u8>,
    pub end_year: Option<i32>,
    pub end_month: Option<u8>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationArgs {
    pub name: String,
    pub publisher: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// Typed arguments for exactly one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedArgs {
    GetProfile,
    GetPosts {
        limit: u32,
    },
    GetConnections {
        limit: u32,
    },
    SharePost {
        text: String,
    },
    SearchPeople {
        keywords: String,
        limit: u32,
    },
    AddSkill {
        name: String,
    },
    AddPosition(PositionArgs),
    UpdatePosition {
        position_id: String,
        changes: PositionChanges,
    },
    AddEducation(EducationArgs),
    AddCertification(CertificationArgs),
    AddPublication(PublicationArgs),
    AddLanguage {
        name: String,
        proficiency: Option<Proficiency>,
    },
    Delete {
        section: Section,
        id: String,
    },
}

/// Validate `arguments` for `tool`.
///
/// # Errors
///
/// Returns [`ToolError::MissingArgument`] naming every missing required field, or
/// [`ToolError::InvalidArgument`] for the first field with the wrong type.
pub fn validate(tool: ToolName, arguments: &JsonObject) -> Result<ValidatedArgs, ToolError> {
    let args = Arguments { tool, map: arguments };
    args.check_required()?;

    let validated = match tool {
        ToolName::GetProfile => ValidatedArgs::GetProfile,
        ToolName::GetPosts => ValidatedArgs::GetPosts {
            limit: args.limit(DEFAULT_POSTS_LIMIT)?,
        },
        ToolName::GetConnections => ValidatedArgs::GetConnections {
            limit: args.limit(DEFAULT_CONNECTIONS_LIMIT)?,
        },
        ToolName::SharePost => ValidatedArgs::SharePost {
            text: args.required_string("text")?,
        },
        ToolName::SearchPeople => ValidatedArgs::SearchPeople {
            keywords: args.required_string("keywords")?,
            limit: args.limit(DEFAULT_SEARCH_LIMIT)?,
        },
        ToolName::AddSkill => ValidatedArgs::AddSkill {
            name: args.required_string("name")?,
        },
        ToolName::AddPosition => ValidatedArgs::AddPosition(PositionArgs {
            title: args.required_string("title")?,
            company: args.required_string("company")?,
            description: args.string("description")?,
            start_year: args.year("startYear")?.ok_or_else(|| args.missing_error())?,
            start_month: args.month("startMonth")?,
            end_year: args.year("endYear")?,
            end_month: args.month("endMonth")?,
            current: args.boolean("current")?,
        }),
        ToolName::UpdatePosition => ValidatedArgs::UpdatePosition {
            position_id: args.required_string("positionId")?,
            changes: PositionChanges {
                title: args.string("title")?,
                company: args.string("company")?,
                description: args.string("description")?,
                start_year: args.year("startYear")?,
                start_month: args.month("startMonth")?,
                end_year: args.year("endYear")?,
                end_month: args.month("endMonth")?,
            },
        },
        ToolName::AddEducation => ValidatedArgs::AddEducation(EducationArgs {
            school_name: args.required_string("schoolName")?,
            degree: args.string("degree")?,
            field_of_study: args.string("fieldOfStudy")?,
            start_year: args.year("startYear")?,
            start_month: args.month("startMonth")?,
            end_year: args.year("endYear")?,
            end_month: args.month("endMonth")?,
            grade: args.string("grade")?,
            activities: args.string("activities")?,
        }),
        ToolName::AddCertification => ValidatedArgs::AddCertification(CertificationArgs {
            name: args.required_string("name")?,
            authority: args.required_string("authority")?,
            license_number: args.string("licenseNumber")?,
            start_year: args.year("startYear")?,
            start_month: args.month("startMonth")?,
            end_year: args.year("endYear")?,
            end_month: args.month("endMonth")?,
            url: args.string("url")?,
        }),
        ToolName::AddPublication => ValidatedArgs::AddPublication(PublicationArgs {
            name: args.required_string("name")?,
            publisher: args.string("publisher")?,
            year: args.year("year")?,
            month: args.month("month")?,
            day: args.day("day")?,
            description: args.string("description")?,
            url: args.string("url")?,
        }),
        ToolName::AddLanguage => ValidatedArgs::AddLanguage {
            name: args.required_string("name")?,
            proficiency: args.proficiency("proficiency")?,
        },
        ToolName::DeleteSkill => args.delete(Section::Skill, "skillId")?,
        ToolName::DeletePosition => args.delete(Section::Position, "positionId")?,
        ToolName::DeleteEducation => args.delete(Section::Education, "educationId")?,
        ToolName::DeleteCertification => {
            args.delete(Section::Certification, "certificationId")?
        }
        ToolName::DeletePublication => args.delete(Section::Publication, "publicationId")?,
        ToolName::DeleteLanguage => args.delete(Section::Language, "languageId")?,
    };
    Ok(validated)
}

struct Arguments<'a> {
    tool: ToolName,
    map: &'a JsonObject,
}

impl Arguments<'_> {
    /// Absent, `null` and `""` all count as missing for required fields.
    fn is_missing(&self, key: &str) -> bool {
        match self.map.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    fn check_required(&self) -> Result<(), ToolError> {
        let missing: Vec<&RequiredArg> = self
            .tool
            .required_args()
            .iter()
            .filter(|r| self.is_missing(r.key))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ToolError::MissingArgument(missing_message(
                &missing,
                self.tool.missing_argument_context(),
            )))
        }
    }

    fn missing_error(&self) -> ToolError {
        let all: Vec<&RequiredArg> = self.tool.required_args().iter().collect();
        ToolError::MissingArgument(missing_message(
            &all,
            self.tool.missing_argument_context(),
        ))
    }

    fn present(&self, key: &str) -> Option<&Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Optional string. An empty string is a supplied value, not an absent one.
    fn string(&self, key: &str) -> Result<Option<String>, ToolError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(invalid(key, "a string")),
        }
    }

    fn required_string(&self, key: &str) -> Result<String, ToolError> {
        self.string(key)?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| self.missing_error())
    }

    fn integer(&self, key: &str) -> Result<Option<i64>, ToolError> {
        match self.present(key) {
            None => Ok(None),
            Some(v) => as_integer(v).map(Some).ok_or_else(|| invalid(key, "an integer")),
        }
    }

    fn year(&self, key: &str) -> Result<Option<i32>, ToolError> {
        self.integer(key)?
            .map(|n| i32::try_from(n).map_err(|_| invalid(key, "a valid year")))
            .transpose()
    }

    fn bounded(&self, key: &str, max: u8, kind: &str) -> Result<Option<u8>, ToolError> {
        self.integer(key)?
            .map(|n| {
                u8::try_from(n)
                    .ok()
                    .filter(|n| (1..=max).contains(n))
                    .ok_or_else(|| invalid(key, kind))
            })
            .transpose()
    }

    fn month(&self, key: &str) -> Result<Option<u8>, ToolError> {
        self.bounded(key, 12, "a month between 1 and 12")
    }

    fn day(&self, key: &str) -> Result<Option<u8>, ToolError> {
        self.bounded(key, 31, "a day between 1 and 31")
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, ToolError> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(invalid(key, "a boolean")),
        }
    }

    /// `limit` falls back to `default` when absent, `null` or zero.
    fn limit(&self, default: u32) -> Result<u32, ToolError> {
        match self.integer("limit")? {
            None | Some(0) => Ok(default),
            Some(n) => u32::try_from(n).map_err(|_| invalid("limit", "a positive integer")),
        }
    }

    fn proficiency(&self, key: &str) -> Result<Option<Proficiency>, ToolError> {
        self.string(key)?
            .map(|s| {
                s.parse::<Proficiency>().map_err(|_| {
                    let allowed: Vec<&str> =
                        Proficiency::ALL.iter().map(|p| p.as_str()).collect();
                    invalid(key, &format!("one of {}", allowed.join(", ")))
                })
            })
            .transpose()
    }

    fn delete(&self, section: Section, key: &str) -> Result<ValidatedArgs, ToolError> {
        Ok(ValidatedArgs::Delete {
            section,
            id: self.required_string(key)?,
        })
    }
}

fn as_integer(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    // Some clients send every number as a float (`2020.0`).
    v.as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
        .map(|f| f as i64)
}

fn invalid(key: &str, kind: &str) -> ToolError {
    ToolError::InvalidArgument(format!("\"{key}\" must be {kind}"))
}

/// "Title is required", "Name and authority are required", "Title, company, and start year
/// are required", optionally followed by context ("... for sharing a post").
fn missing_message(missing: &[&RequiredArg], context: Option<&str>) -> String {
    let labels: Vec<&str> = missing.iter().map(|r| r.label).collect();
    let subject = match labels.as_slice() {
        [] => "arguments".to_string(),
        [one] => (*one).to_string(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    };
    let plural = missing.len() > 1 || missing.first().is_some_and(|r| r.plural);
    let verb = if plural { "are" } else { "is" };

    let mut msg = capitalize(&subject);
    msg.push(' ');
    msg.push_str(verb);
    msg.push_str(" required");
    if let Some(context) = context {
        msg.push(' ');
        msg.push_str(context);
    }
    msg
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
