//! The capability the MCP server consumes.

use crate::error::Result;
use crate::types::{
    CreatedEntity, NewCertification, NewEducation, NewLanguage, NewPosition, NewPublication,
    NewSkill, Person, PositionUpdate, Post, Profile, SharedPost,
};
use async_trait::async_trait;

/// One method per LinkedIn operation exposed as an MCP tool.
///
/// Implementations must be safe to share across concurrent tool calls.
#[async_trait]
pub trait LinkedInApi: Send + Sync {
    async fn get_profile(&self) -> Result<Profile>;

    async fn get_posts(&self, limit: u32) -> Result<Vec<Post>>;

    async fn get_connections(&self, limit: u32) -> Result<Vec<Person>>;

    async fn share_post(&self, text: &str) -> Result<SharedPost>;

    async fn search_people(&self, keywords: &str, limit: u32) -> Result<Vec<Person>>;

    async fn add_skill(&self, skill: NewSkill) -> Result<CreatedEntity>;

    async fn delete_skill(&self, skill_id: &str) -> Result<()>;

    async fn add_position(&self, position: NewPosition) -> Result<CreatedEntity>;

    async fn update_position(&self, position_id: &str, update: PositionUpdate) -> Result<()>;

    async fn delete_position(&self, position_id: &str) -> Result<()>;

    async fn add_education(&self, education: NewEducation) -> Result<CreatedEntity>;

    async fn delete_education(&self, education_id: &str) -> Result<()>;

    async fn add_certification(&self, certification: NewCertification) -> Result<CreatedEntity>;

    async fn delete_certification(&self, certification_id: &str) -> Result<()>;

    async fn add_publication(&self, publication: NewPublication) -> Result<CreatedEntity>;

    async fn delete_publication(&self, publication_id: &str) -> Result<()>;

    async fn add_language(&self, language: NewLanguage) -> Result<CreatedEntity>;

    async fn delete_language(&self, language_id: &str) -> Result<()>;
}
