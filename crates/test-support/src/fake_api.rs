//! Scriptable in-memory [`LinkedInApi`] that records every call it receives.

use async_trait::async_trait;
use linkedin_mcp_client::{
    CreatedEntity, LinkedInApi, LinkedInError, NewCertification, NewEducation, NewLanguage,
    NewPosition, NewPublication, NewSkill, Person, PositionUpdate, Post, Profile, Result,
    SharedPost,
};
use parking_lot::Mutex;
use std::time::Duration;

/// A call observed by [`FakeLinkedIn`], with the exact arguments it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetProfile,
    GetPosts { limit: u32 },
    GetConnections { limit: u32 },
    SharePost { text: String },
    SearchPeople { keywords: String, limit: u32 },
    AddSkill(NewSkill),
    DeleteSkill(String),
    AddPosition(NewPosition),
    UpdatePosition { id: String, update: PositionUpdate },
    DeletePosition(String),
    AddEducation(NewEducation),
    DeleteEducation(String),
    AddCertification(NewCertification),
    DeleteCertification(String),
    AddPublication(NewPublication),
    DeletePublication(String),
    AddLanguage(NewLanguage),
    DeleteLanguage(String),
}

pub struct FakeLinkedIn {
    profile: Profile,
    posts: Vec<Post>,
    connections: Vec<Person>,
    people: Vec<Person>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeLinkedIn {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeLinkedIn {
    #[must_use]
    pub fn new() -> Self {
        Self {
            profile: Profile {
                id: "member-1".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                headline: Some("Analyst".to_string()),
                vanity_name: None,
                profile_url: None,
            },
            posts: Vec::new(),
            connections: Vec::new(),
            people: Vec::new(),
            failure: None,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    #[must_use]
    pub fn with_connections(mut self, connections: Vec<Person>) -> Self {
        self.connections = connections;
        self
    }

    #[must_use]
    pub fn with_people(mut self, people: Vec<Person>) -> Self {
        self.people = people;
        self
    }

    /// Every operation fails with [`LinkedInError::Other`] carrying `message`.
    #[must_use]
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Every operation sleeps for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Calls received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    async fn enter(&self, call: Call) -> Result<()> {
        self.calls.lock().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(LinkedInError::Other(message.clone())),
            None => Ok(()),
        }
    }

    fn created(&self, kind: &str) -> CreatedEntity {
        CreatedEntity {
            id: format!("{kind}-{}", self.calls.lock().len()),
        }
    }
}

#[async_trait]
impl LinkedInApi for FakeLinkedIn {
    async fn get_profile(&self) -> Result<Profile> {
        self.enter(Call::GetProfile).await?;
        Ok(self.profile.clone())
    }

    async fn get_posts(&self, limit: u32) -> Result<Vec<Post>> {
        self.enter(Call::GetPosts { limit }).await?;
        Ok(self.posts.iter().take(limit as usize).cloned().collect())
    }

    async fn get_connections(&self, limit: u32) -> Result<Vec<Person>> {
        self.enter(Call::GetConnections { limit }).await?;
        Ok(self
            .connections
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn share_post(&self, text: &str) -> Result<SharedPost> {
        self.enter(Call::SharePost {
            text: text.to_string(),
        })
        .await?;
        let CreatedEntity { id } = self.created("post");
        Ok(SharedPost {
            url: format!("https://www.linkedin.com/feed/update/{id}"),
            id,
        })
    }

    async fn search_people(&self, keywords: &str, limit: u32) -> Result<Vec<Person>> {
        self.enter(Call::SearchPeople {
            keywords: keywords.to_string(),
            limit,
        })
        .await?;
        Ok(self.people.iter().take(limit as usize).cloned().collect())
    }

    async fn add_skill(&self, skill: NewSkill) -> Result<CreatedEntity> {
        self.enter(Call::AddSkill(skill)).await?;
        Ok(self.created("skill"))
    }

    async fn delete_skill(&self, skill_id: &str) -> Result<()> {
        self.enter(Call::DeleteSkill(skill_id.to_string())).await
    }

    async fn add_position(&self, position: NewPosition) -> Result<CreatedEntity> {
        self.enter(Call::AddPosition(position)).await?;
        Ok(self.created("position"))
    }

    async fn update_position(&self, position_id: &str, update: PositionUpdate) -> Result<()> {
        self.enter(Call::UpdatePosition {
            id: position_id.to_string(),
            update,
        })
        .await
    }

    async fn delete_position(&self, position_id: &str) -> Result<()> {
        self.enter(Call::DeletePosition(position_id.to_string()))
            .await
    }

    async fn add_education(&self, education: NewEducation) -> Result<CreatedEntity> {
        self.enter(Call::AddEducation(education)).await?;
        Ok(self.created("education"))
    }

    async fn delete_education(&self, education_id: &str) -> Result<()> {
        self.enter(Call::DeleteEducation(education_id.to_string()))
            .await
    }

    async fn add_certification(&self, certification: NewCertification) -> Result<CreatedEntity> {
        self.enter(Call::AddCertification(certification)).await?;
        Ok(self.created("certification"))
    }

    async fn delete_certification(&self, certification_id: &str) -> Result<()> {
        self.enter(Call::DeleteCertification(certification_id.to_string()))
            .await
    }

    async fn add_publication(&self, publication: NewPublication) -> Result<CreatedEntity> {
        self.enter(Call::AddPublication(publication)).await?;
        Ok(self.created("publication"))
    }

    async fn delete_publication(&self, publication_id: &str) -> Result<()> {
        self.enter(Call::DeletePublication(publication_id.to_string()))
            .await
    }

    async fn add_language(&self, language: NewLanguage) -> Result<CreatedEntity> {
        self.enter(Call::AddLanguage(language)).await?;
        Ok(self.created("language"))
    }

    async fn delete_language(&self, language_id: &str) -> Result<()> {
        self.enter(Call::DeleteLanguage(language_id.to_string()))
            .await
    }
}
