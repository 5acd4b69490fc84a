//! `reqwest` implementation of [`LinkedInApi`] against the Rest.li v2 endpoints.

use crate::api::LinkedInApi;
use crate::error::{LinkedInError, Result, redact_url};
use crate::types::{
    CreatedEntity, NewCertification, NewEducation, NewLanguage, NewPosition, NewPublication,
    NewSkill, Person, PositionUpdate, Post, Profile, SharedPost,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/v2";

const RESTLI_PROTOCOL_HEADER: &str = "X-Restli-Protocol-Version";
const RESTLI_METHOD_HEADER: &str = "X-RestLi-Method";
const RESTLI_ID_HEADER: &str = "x-restli-id";

#[derive(Clone)]
pub struct LinkedInClient {
    base_url: Url,
    access_token: String,
    http: Client,
}

impl LinkedInClient {
    /// Build a client for `base_url` authenticated with `access_token`.
    ///
    /// A zero `timeout` disables the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedInError::Config`] if the token is empty or the base URL is invalid.
    pub fn new(access_token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        if access_token.is_empty() {
            return Err(LinkedInError::Config(
                "LinkedIn access token is required".to_string(),
            ));
        }

        // `Url::join` treats the last segment as a file unless the base ends in '/'.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| LinkedInError::Config(format!("invalid LinkedIn base URL: {e}")))?;

        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            base_url,
            access_token: access_token.to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| LinkedInError::Config(format!("join base URL with '{path}': {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, url = %redact_url(&url), "linkedin request");
        self.http
            .request(method, url)
            .bearer_auth(&self.access_token)
            .header(RESTLI_PROTOCOL_HEADER, "2.0.0")
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let resp = self.request(Method::GET, url).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    async fn member_urn(&self) -> Result<String> {
        let me = self.get_profile().await?;
        Ok(format!("urn:li:person:{}", me.id))
    }

    fn section_url(&self, member_id: &str, section: &str, entity_id: Option<&str>) -> Result<Url> {
        let mut url = self.url(&format!("people/(id:{member_id})/{section}"))?;
        if let Some(id) = entity_id {
            let url_str = url.to_string();
            url.path_segments_mut()
                .map_err(|()| LinkedInError::Config(format!("base URL cannot hold a path: {url_str}")))?
                .push(id);
        }
        Ok(url)
    }

    async fn create_in_section<T: Serialize + Sync>(
        &self,
        section: &str,
        kind: &'static str,
        body: &T,
    ) -> Result<CreatedEntity> {
        let member_id = self.get_profile().await?.id;
        let url = self.section_url(&member_id, section, None)?;
        let resp = self.request(Method::POST, url).json(body).send().await?;
        let resp = check_status(resp).await?;
        created_entity(resp, kind).await
    }

    async fn delete_in_section(&self, section: &str, entity_id: &str) -> Result<()> {
        let member_id = self.get_profile().await?.id;
        let url = self.section_url(&member_id, section, Some(entity_id))?;
        let resp = self.request(Method::DELETE, url).send().await?;
        check_status(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl LinkedInApi for LinkedInClient {
    async fn get_profile(&self) -> Result<Profile> {
        let me: MemberWire = self.get_json(self.url("me")?).await?;
        Ok(me.into_profile())
    }

    async fn get_posts(&self, limit: u32) -> Result<Vec<Post>> {
        let urn = self.member_urn().await?;
        let mut url = self.url("ugcPosts")?;
        url.set_query(Some(&format!(
            "q=authors&authors=List({})&count={limit}",
            encode(&urn)
        )));
        let page: Elements<Value> = self.get_json(url).await?;
        Ok(page.elements.iter().map(post_from_ugc).collect())
    }

    async fn get_connections(&self, limit: u32) -> Result<Vec<Person>> {
        let mut url = self.url("connections")?;
        url.set_query(Some(&format!("q=viewer&start=0&count={limit}")));
        let page: Elements<MemberWire> = self.get_json(url).await?;
        Ok(page
            .elements
            .into_iter()
            .map(MemberWire::into_person)
            .collect())
    }

    async fn share_post(&self, text: &str) -> Result<SharedPost> {
        let author = self.member_urn().await?;
        let body = json!({
            "author": author,
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": text },
                    "shareMediaCategory": "NONE"
                }
            },
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" }
        });
        let resp = self
            .request(Method::POST, self.url("ugcPosts")?)
            .json(&body)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let CreatedEntity { id } = created_entity(resp, "post").await?;
        let url = format!("https://www.linkedin.com/feed/update/{id}");
        Ok(SharedPost { id, url })
    }

    async fn search_people(&self, keywords: &str, limit: u32) -> Result<Vec<Person>> {
        let mut url = self.url("peopleSearch")?;
        url.query_pairs_mut()
            .append_pair("q", "keywords")
            .append_pair("keywords", keywords)
            .append_pair("count", &limit.to_string());
        let page: Elements<MemberWire> = self.get_json(url).await?;
        Ok(page
            .elements
            .into_iter()
            .map(MemberWire::into_person)
            .collect())
    }

    async fn add_skill(&self, skill: NewSkill) -> Result<CreatedEntity> {
        self.create_in_section("skills", "skill", &skill).await
    }

    async fn delete_skill(&self, skill_id: &str) -> Result<()> {
        self.delete_in_section("skills", skill_id).await
    }

    async fn add_position(&self, position: NewPosition) -> Result<CreatedEntity> {
        self.create_in_section("positions", "position", &position)
            .await
    }

    async fn update_position(&self, position_id: &str, update: PositionUpdate) -> Result<()> {
        let member_id = self.get_profile().await?.id;
        let url = self.section_url(&member_id, "positions", Some(position_id))?;
        let resp = self
            .request(Method::POST, url)
            .header(RESTLI_METHOD_HEADER, "PARTIAL_UPDATE")
            .json(&json!({ "patch": { "$set": update } }))
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn delete_position(&self, position_id: &str) -> Result<()> {
        self.delete_in_section("positions", position_id).await
    }

    async fn add_education(&self, education: NewEducation) -> Result<CreatedEntity> {
        self.create_in_section("educations", "education", &education)
            .await
    }

    async fn delete_education(&self, education_id: &str) -> Result<()> {
        self.delete_in_section("educations", education_id).await
    }

    async fn add_certification(&self, certification: NewCertification) -> Result<CreatedEntity> {
        self.create_in_section("certifications", "certification", &certification)
            .await
    }

    async fn delete_certification(&self, certification_id: &str) -> Result<()> {
        self.delete_in_section("certifications", certification_id)
            .await
    }

    async fn add_publication(&self, publication: NewPublication) -> Result<CreatedEntity> {
        self.create_in_section("publications", "publication", &publication)
            .await
    }

    async fn delete_publication(&self, publication_id: &str) -> Result<()> {
        self.delete_in_section("publications", publication_id).await
    }

    async fn add_language(&self, language: NewLanguage) -> Result<CreatedEntity> {
        self.create_in_section("languages", "language", &language)
            .await
    }

    async fn delete_language(&self, language_id: &str) -> Result<()> {
        self.delete_in_section("languages", language_id).await
    }
}

#[derive(Debug, Deserialize)]
struct Elements<T> {
    #[serde(default = "Vec::new")]
    elements: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberWire {
    id: String,
    #[serde(default)]
    localized_first_name: String,
    #[serde(default)]
    localized_last_name: String,
    #[serde(default)]
    localized_headline: Option<String>,
    #[serde(default)]
    vanity_name: Option<String>,
}

impl MemberWire {
    fn profile_url(&self) -> Option<String> {
        self.vanity_name
            .as_deref()
            .map(|v| format!("https://www.linkedin.com/in/{v}"))
    }

    fn into_profile(self) -> Profile {
        Profile {
            profile_url: self.profile_url(),
            id: self.id,
            first_name: self.localized_first_name,
            last_name: self.localized_last_name,
            headline: self.localized_headline,
            vanity_name: self.vanity_name,
        }
    }

    fn into_person(self) -> Person {
        Person {
            profile_url: self.profile_url(),
            id: self.id,
            first_name: self.localized_first_name,
            last_name: self.localized_last_name,
            headline: self.localized_headline,
        }
    }
}

fn post_from_ugc(v: &Value) -> Post {
    Post {
        id: v
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        text: v
            .pointer("/specificContent/com.linkedin.ugc.ShareContent/shareCommentary/text")
            .and_then(Value::as_str)
            .map(str::to_string),
        created_at: v.pointer("/created/time").and_then(Value::as_i64),
        visibility: v
            .pointer("/visibility/com.linkedin.ugc.MemberNetworkVisibility")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Map a non-success response to [`LinkedInError::Http`], preferring the API's `message` field.
async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    Err(LinkedInError::Http {
        status: status.as_u16(),
        message,
    })
}

/// Rest.li returns the created id in a header; some endpoints echo it in the body instead.
async fn created_entity(resp: Response, kind: &'static str) -> Result<CreatedEntity> {
    if let Some(id) = resp
        .headers()
        .get(RESTLI_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        return Ok(CreatedEntity { id: id.to_string() });
    }

    let body = resp.text().await?;
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("id").and_then(id_as_string))
        .map(|id| CreatedEntity { id })
        .ok_or(LinkedInError::MissingEntityId(kind))
}

fn id_as_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Form-encode a query-string value.
fn encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
