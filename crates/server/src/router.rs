//! Routes a validated tool call to exactly one LinkedIn operation.
//!
//! Stateless: nothing is cached between calls and client failures propagate unchanged.

use crate::args::{
    CertificationArgs, EducationArgs, PositionArgs, PositionChanges, PublicationArgs, Section,
    ValidatedArgs, validate,
};
use crate::catalog::ToolName;
use crate::error::ToolError;
use crate::result::Outcome;
use linkedin_mcp_client::{
    DateParts, LinkedInApi, NewCertification, NewEducation, NewLanguage, NewPosition,
    NewPublication, NewSkill, PositionUpdate,
};
use rmcp::model::JsonObject;

/// Resolve `name`, validate `arguments` and run the matching operation.
///
/// # Errors
///
/// Returns [`ToolError::UnknownTool`] for names outside the catalog, a validation error, or
/// whatever the client failed with.
pub async fn route<A>(api: &A, name: &str, arguments: &JsonObject) -> Result<Outcome, ToolError>
where
    A: LinkedInApi + ?Sized,
{
    let tool = ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    let args = validate(tool, arguments)?;
    dispatch(api, args).await
}

/// Run the LinkedIn operation for already-validated arguments.
///
/// # Errors
///
/// Returns the client's error unchanged, wrapped in [`ToolError::Remote`].
pub async fn dispatch<A>(api: &A, args: ValidatedArgs) -> Result<Outcome, ToolError>
where
    A: LinkedInApi + ?Sized,
{
    match args {
        ValidatedArgs::GetProfile => Outcome::json(&api.get_profile().await?),
        ValidatedArgs::GetPosts { limit } => Outcome::json(&api.get_posts(limit).await?),
        ValidatedArgs::GetConnections { limit } => {
            Outcome::json(&api.get_connections(limit).await?)
        }
        ValidatedArgs::SharePost { text } => Outcome::json(&api.share_post(&text).await?),
        ValidatedArgs::SearchPeople { keywords, limit } => {
            Outcome::json(&api.search_people(&keywords, limit).await?)
        }
        ValidatedArgs::AddSkill { name } => {
            let created = api.add_skill(NewSkill { name: name.clone() }).await?;
            Ok(Outcome::Confirmation(format!(
                "Successfully added skill: {name} (ID: {})",
                created.id
            )))
        }
        ValidatedArgs::AddPosition(position) => {
            let (title, company) = (position.title.clone(), position.company.clone());
            let created = api.add_position(new_position(position)).await?;
            Ok(Outcome::Confirmation(format!(
                "Successfully added position: {title} at {company} (ID: {})",
                created.id
            )))
        }
        ValidatedArgs::UpdatePosition {
            position_id,
            changes,
        } => {
            api.update_position(&position_id, position_update(changes))
                .await?;
            Ok(Outcome::Confirmation(format!(
                "Successfully updated position: {position_id}"
            )))
        }
        ValidatedArgs::AddEducation(education) => {
            let school = education.school_name.clone();
            let created = api.add_education(new_education(education)).await?;
            Ok(Outcome::Confirmation(format!(
                "Successfully added education: {school} (ID: {})",
                created.id
            )))
        }
        ValidatedArgs::AddCertification(certification) => {
            let (name, authority) = (
                certification.name.clone(),
                certification.authority.clone(),
            );
            let created = api
                .add_certification(new_certification(certification))
                .await?;
            Ok(Outcome::Confirmation(format!(
                "Successfully added certification: {name} from {authority} (ID: {})",
                created.id
            )))
        }
        ValidatedArgs::AddPublication(publication) => {
            let name = publication.name.clone();
            let created = api.add_publication(new_publication(publication)).await?;
            Ok(Outcome::Confirmation(format!(
                "Successfully added publication: {name} (ID: {})",
                created.id
            )))
        }
        ValidatedArgs::AddLanguage { name, proficiency } => {
            let created = api
                .add_language(NewLanguage {
                    name: name.clone(),
                    proficiency,
                })
                .await?;
            Ok(Outcome::Confirmation(format!(
                "Successfully added language: {name} (ID: {})",
                created.id
            )))
        }
        ValidatedArgs::Delete { section, id } => {
            match section {
                Section::Skill => api.delete_skill(&id).await?,
                Section::Position => api.delete_position(&id).await?,
                Section::Education => api.delete_education(&id).await?,
                Section::Certification => api.delete_certification(&id).await?,
                Section::Publication => api.delete_publication(&id).await?,
                Section::Language => api.delete_language(&id).await?,
            }
            Ok(Outcome::Confirmation(format!(
                "Successfully deleted {}: {id}",
                section.noun()
            )))
        }
    }
}

/// A date exists only when its year was supplied.
fn date(year: Option<i32>, month: Option<u8>) -> Option<DateParts> {
    year.map(|year| DateParts::year_month(year, month))
}

fn new_position(p: PositionArgs) -> NewPosition {
    NewPosition {
        title: p.title,
        company: p.company,
        description: p.description,
        start_date: DateParts::year_month(p.start_year, p.start_month),
        end_date: date(p.end_year, p.end_month),
        current: p.current,
    }
}

fn position_update(c: PositionChanges) -> PositionUpdate {
    PositionUpdate {
        title: c.title,
        company: c.company,
        description: c.description,
        start_date: date(c.start_year, c.start_month),
        end_date: date(c.end_year, c.end_month),
    }
}

fn new_education(e: EducationArgs) -> NewEducation {
    NewEducation {
        school_name: e.school_name,
        degree: e.degree,
        field_of_study: e.field_of_study,
        start_date: date(e.start_year, e.start_month),
        end_date: date(e.end_year, e.end_month),
        grade: e.grade,
        activities: e.activities,
    }
}

fn new_certification(c: CertificationArgs) -> NewCertification {
    NewCertification {
        name: c.name,
        authority: c.authority,
        license_number: c.license_number,
        start_date: date(c.start_year, c.start_month),
        end_date: date(c.end_year, c.end_month),
        url: c.url,
    }
}

fn new_publication(p: PublicationArgs) -> NewPublication {
    NewPublication {
        name: p.name,
        publisher: p.publisher,
        date: p.year.map(|year| DateParts {
            year,
            month: p.month,
            day: p.day,
        }),
        description: p.description,
        url: p.url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkedin_mcp_client::Proficiency;
    use linkedin_mcp_test_support::{Call, FakeLinkedIn};
    use serde_json::{Value, json};

    fn obj(v: Value) -> JsonObject {
        v.as_object().cloned().expect("object")
    }

    #[tokio::test]
    async fn unknown_tool_never_reaches_the_client() {
        let api = FakeLinkedIn::new();
        let err = route(&api, "unknown_tool", &JsonObject::new())
            .await
            .expect_err("unknown");
        assert!(matches!(err, ToolError::UnknownTool(_)));
        assert_eq!(err.to_string(), "Unknown tool: unknown_tool");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn validation_failures_never_reach_the_client() {
        let api = FakeLinkedIn::new();
        let err = route(&api, "share_linkedin_post", &JsonObject::new())
            .await
            .expect_err("missing text");
        assert!(err.to_string().contains("Text is required"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn add_position_groups_dates_and_passes_month_as_unset() {
        let api = FakeLinkedIn::new();
        let outcome = route(
            &api,
            "add_linkedin_position",
            &obj(json!({
                "title": "Engineer",
                "company": "Acme",
                "startYear": 2020,
                "endMonth": 6,
                "current": true
            })),
        )
        .await
        .expect("ok");

        assert_eq!(
            api.calls(),
            vec![Call::AddPosition(NewPosition {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                description: None,
                start_date: DateParts::year_month(2020, None),
                end_date: None,
                current: Some(true),
            })]
        );
        assert_eq!(
            outcome,
            Outcome::Confirmation(
                "Successfully added position: Engineer at Acme (ID: position-1)".to_string()
            )
        );
    }

    #[tokio::test]
    async fn update_position_sends_only_supplied_fields() {
        let api = FakeLinkedIn::new();
        let outcome = route(
            &api,
            "update_linkedin_position",
            &obj(json!({
                "positionId": "pos-9",
                "company": "NewCo",
                "startMonth": 3,
                "endYear": 2023,
                "endMonth": 11
            })),
        )
        .await
        .expect("ok");

        assert_eq!(
            api.calls(),
            vec![Call::UpdatePosition {
                id: "pos-9".to_string(),
                update: PositionUpdate {
                    company: Some("NewCo".to_string()),
                    end_date: Some(DateParts::year_month(2023, Some(11))),
                    ..PositionUpdate::default()
                },
            }]
        );
        assert_eq!(outcome.text(), "Successfully updated position: pos-9");
    }

    #[tokio::test]
    async fn add_publication_groups_full_date() {
        let api = FakeLinkedIn::new();
        route(
            &api,
            "add_linkedin_publication",
            &obj(json!({ "name": "On Engines", "year": 1843, "month": 9, "day": 1 })),
        )
        .await
        .expect("ok");

        let Some(Call::AddPublication(publication)) = api.calls().pop() else {
            panic!("expected AddPublication");
        };
        assert_eq!(
            publication.date,
            Some(DateParts {
                year: 1843,
                month: Some(9),
                day: Some(1)
            })
        );
    }

    #[tokio::test]
    async fn add_position_with_end_year_sends_end_date() {
        let api = FakeLinkedIn::new();
        route(
            &api,
            "add_linkedin_position",
            &obj(json!({
                "title": "Engineer",
                "company": "Acme",
                "startYear": 2018,
                "startMonth": 2,
                "endYear": 2021,
                "endMonth": 7
            })),
        )
        .await
        .expect("ok");

        let Some(Call::AddPosition(position)) = api.calls().pop() else {
            panic!("expected AddPosition");
        };
        assert_eq!(position.start_date, DateParts::year_month(2018, Some(2)));
        assert_eq!(
            position.end_date,
            Some(DateParts::year_month(2021, Some(7)))
        );
    }

    #[tokio::test]
    async fn update_position_with_start_year_sends_start_date() {
        let api = FakeLinkedIn::new();
        route(
            &api,
            "update_linkedin_position",
            &obj(json!({ "positionId": "pos-1", "startYear": 2019, "startMonth": 4 })),
        )
        .await
        .expect("ok");

        assert_eq!(
            api.calls(),
            vec![Call::UpdatePosition {
                id: "pos-1".to_string(),
                update: PositionUpdate {
                    start_date: Some(DateParts::year_month(2019, Some(4))),
                    ..PositionUpdate::default()
                },
            }]
        );
    }

    #[tokio::test]
    async fn add_publication_without_year_has_no_date() {
        let api = FakeLinkedIn::new();
        route(
            &api,
            "add_linkedin_publication",
            &obj(json!({ "name": "Notes", "month": 9, "day": 1, "publisher": "Self" })),
        )
        .await
        .expect("ok");

        assert_eq!(
            api.calls(),
            vec![Call::AddPublication(NewPublication {
                name: "Notes".to_string(),
                publisher: Some("Self".to_string()),
                date: None,
                description: None,
                url: None,
            })]
        );
    }

    #[tokio::test]
    async fn add_education_without_years_has_no_dates() {
        let api = FakeLinkedIn::new();
        let outcome = route(
            &api,
            "add_linkedin_education",
            &obj(json!({ "schoolName": "MIT", "startMonth": 9, "degree": "BSc" })),
        )
        .await
        .expect("ok");

        let Some(Call::AddEducation(education)) = api.calls().pop() else {
            panic!("expected AddEducation");
        };
        assert_eq!(education.start_date, None);
        assert_eq!(education.degree.as_deref(), Some("BSc"));
        assert_eq!(
            outcome.text(),
            "Successfully added education: MIT (ID: education-1)"
        );
    }

    #[tokio::test]
    async fn add_certification_and_language_confirmations() {
        let api = FakeLinkedIn::new();
        let cert = route(
            &api,
            "add_linkedin_certification",
            &obj(json!({ "name": "CKA", "authority": "CNCF", "startYear": 2022 })),
        )
        .await
        .expect("ok");
        assert_eq!(
            cert.text(),
            "Successfully added certification: CKA from CNCF (ID: certification-1)"
        );

        let lang = route(
            &api,
            "add_linkedin_language",
            &obj(json!({ "name": "French", "proficiency": "ELEMENTARY" })),
        )
        .await
        .expect("ok");
        assert_eq!(
            lang.text(),
            "Successfully added language: French (ID: language-2)"
        );
        assert_eq!(
            api.calls().last(),
            Some(&Call::AddLanguage(NewLanguage {
                name: "French".to_string(),
                proficiency: Some(Proficiency::Elementary),
            }))
        );
    }

    #[tokio::test]
    async fn delete_tools_route_to_their_section() {
        let cases = [
            ("delete_linkedin_skill", "skillId", "skill"),
            ("delete_linkedin_position", "positionId", "position"),
            ("delete_linkedin_education", "educationId", "education"),
            (
                "delete_linkedin_certification",
                "certificationId",
                "certification",
            ),
            ("delete_linkedin_publication", "publicationId", "publication"),
            ("delete_linkedin_language", "languageId", "language"),
        ];

        let api = FakeLinkedIn::new();
        for (tool, key, noun) in cases {
            let mut args = JsonObject::new();
            args.insert(key.to_string(), json!("id-1"));
            let outcome = route(&api, tool, &args).await.expect("ok");
            assert_eq!(
                outcome.text(),
                format!("Successfully deleted {noun}: id-1"),
                "{tool}"
            );
        }

        assert_eq!(
            api.calls(),
            vec![
                Call::DeleteSkill("id-1".to_string()),
                Call::DeletePosition("id-1".to_string()),
                Call::DeleteEducation("id-1".to_string()),
                Call::DeleteCertification("id-1".to_string()),
                Call::DeletePublication("id-1".to_string()),
                Call::DeleteLanguage("id-1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn client_failures_propagate_unchanged() {
        let api = FakeLinkedIn::new().failing_with("API Error");
        let err = route(&api, "get_linkedin_profile", &JsonObject::new())
            .await
            .expect_err("fails");
        assert!(matches!(err, ToolError::Remote(_)));
        assert_eq!(err.to_string(), "API Error");
        assert_eq!(api.calls(), vec![Call::GetProfile]);
    }
}
