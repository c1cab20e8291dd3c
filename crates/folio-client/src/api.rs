//! Typed resource operations.
//!
//! | Resource | Paths |
//! |----------|-------|
//! | Profile | `profile` |
//! | About me | `about` |
//! | Education | `education` |
//! | Career summary | `career_summary` |
//! | Experience | `experience`, `experience/{id}`, `experience/jobs/{id}` (delete) |
//! | Projects | `projects`, `projects/{id}` |
//! | Skills | `skills_technologies`, `skills_technologies/{id}` |
//! | Skill categories | `skills_categories`, `skills_categories/{id}` |
//! | Blog | `blog`, `blog/{id}` |
//! | Login | `auth/login` |
//!
//! Responses may be bare or wrapped in `{"data": ...}`; both are accepted.

use std::path::Path;

use folio_core::{
  Notifier, ResourceId,
  about::AboutMe,
  blog::{BlogPost, BlogPostRecord},
  education::{Education, EducationItem, EducationPatch},
  experience::{CareerSummary, Experience, ExperienceRecord},
  profile::Profile,
  project::{Project, ProjectRecord},
  session::{LoginForm, Session, User},
  skill::{Skill, SkillCategory, SkillCategoryRecord, SkillRecord},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
  ClientError, Dispatcher,
  request::{ApiRequest, file_part, text_parts},
  session::SessionContext,
  transport::{RawResponse, Transport},
};

pub const LOGIN_PATH: &str = "auth/login";

pub struct PortfolioApi<T, N> {
  dispatcher: Dispatcher<T, N>,
}

impl<T: Transport, N: Notifier> PortfolioApi<T, N> {
  pub fn new(dispatcher: Dispatcher<T, N>) -> Self { Self { dispatcher } }

  pub fn dispatcher(&self) -> &Dispatcher<T, N> { &self.dispatcher }

  pub fn session(&self) -> &SessionContext { self.dispatcher.session() }

  pub fn notifier(&self) -> &N { self.dispatcher.notifier() }

  // ── Plumbing ──────────────────────────────────────────────────────────────

  async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ClientError> {
    let response = self.dispatcher.dispatch(&request).await?;
    decode(&response)
  }

  async fn send_only(&self, request: ApiRequest) -> Result<(), ClientError> {
    self.dispatcher.dispatch(&request).await.map(|_| ())
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  /// `POST auth/login`: on success the session context holds the new
  /// token and user.
  pub async fn login(&self, form: &LoginForm) -> Result<Session, ClientError> {
    #[derive(Deserialize)]
    struct LoginResponse {
      token: String,
      #[serde(default)]
      user:  Option<User>,
    }

    let request = ApiRequest::post(LOGIN_PATH).json(form)?;
    let response = self.dispatcher.dispatch_public(&request).await?;
    let body: LoginResponse = decode(&response)?;
    let session = Session {
      user:  body.user.or_else(|| Some(User { email: form.email.clone(), ..Default::default() })),
      token: body.token,
    };
    self.session().set(session.clone()).await;
    tracing::info!(email = %form.email, "signed in");
    Ok(session)
  }

  pub async fn logout(&self) {
    self.session().clear().await;
    tracing::info!("signed out");
  }

  // ── Profile ───────────────────────────────────────────────────────────────

  /// `GET profile`
  pub async fn get_profile(&self) -> Result<Profile, ClientError> {
    self.fetch(ApiRequest::get("profile")).await
  }

  /// `PATCH profile`: multipart when a new thumbnail file is attached.
  pub async fn update_profile(&self, profile: &Profile) -> Result<Profile, ClientError> {
    let request = with_optional_file(
      ApiRequest::patch("profile"),
      profile,
      "thumbnailFile",
      "thumbnail",
      profile.thumbnail_file.as_deref(),
    )
    .await?;
    self.fetch(request).await
  }

  // ── About ─────────────────────────────────────────────────────────────────

  /// `GET about`
  pub async fn get_about(&self) -> Result<AboutMe, ClientError> {
    self.fetch(ApiRequest::get("about")).await
  }

  /// `PATCH about`
  pub async fn update_about(&self, about: &AboutMe) -> Result<AboutMe, ClientError> {
    self.fetch(ApiRequest::patch("about").json(about)?).await
  }

  // ── Education ─────────────────────────────────────────────────────────────

  /// `GET education`
  pub async fn get_education(&self) -> Result<Education, ClientError> {
    self.fetch(ApiRequest::get("education")).await
  }

  /// `PATCH education` with the whole document.
  pub async fn update_education(&self, education: &Education) -> Result<Education, ClientError> {
    self.fetch(ApiRequest::patch("education").json(education)?).await
  }

  /// `PATCH education` with only the arrays in `patch`.
  pub async fn patch_education(&self, patch: &EducationPatch) -> Result<Education, ClientError> {
    self.fetch(ApiRequest::patch("education").json(patch)?).await
  }

  /// Append one achievement, subject or course: read the current document,
  /// then `PATCH` only the affected array.
  pub async fn add_education_item(&self, item: EducationItem) -> Result<Education, ClientError> {
    let current = self.get_education().await?;
    self.patch_education(&item.append_to(&current)).await
  }

  // ── Experience ────────────────────────────────────────────────────────────

  /// `GET career_summary`
  pub async fn get_career_summary(&self) -> Result<CareerSummary, ClientError> {
    self.fetch(ApiRequest::get("career_summary")).await
  }

  /// `PATCH career_summary`
  pub async fn update_career_summary(
    &self,
    summary: &CareerSummary,
  ) -> Result<CareerSummary, ClientError> {
    self.fetch(ApiRequest::patch("career_summary").json(summary)?).await
  }

  /// `GET experience`
  pub async fn list_experience(&self) -> Result<Vec<ExperienceRecord>, ClientError> {
    self.fetch(ApiRequest::get("experience")).await
  }

  /// `GET experience/{id}`
  pub async fn get_experience(&self, id: &ResourceId) -> Result<Experience, ClientError> {
    self.fetch(ApiRequest::get(format!("experience/{id}"))).await
  }

  /// `POST experience`
  pub async fn add_experience(&self, job: &Experience) -> Result<Value, ClientError> {
    self.fetch(ApiRequest::post("experience").json(job)?).await
  }

  /// `PATCH experience/{id}`
  pub async fn update_experience(
    &self,
    id: &ResourceId,
    job: &Experience,
  ) -> Result<Value, ClientError> {
    self.fetch(ApiRequest::patch(format!("experience/{id}")).json(job)?).await
  }

  /// `DELETE experience/jobs/{id}`
  pub async fn delete_experience(&self, id: &ResourceId) -> Result<(), ClientError> {
    self.send_only(ApiRequest::delete(format!("experience/jobs/{id}"))).await
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  /// `GET projects`
  pub async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ClientError> {
    self.fetch(ApiRequest::get("projects")).await
  }

  /// `GET projects/{id}`
  pub async fn get_project(&self, id: &ResourceId) -> Result<ProjectRecord, ClientError> {
    self.fetch(ApiRequest::get(format!("projects/{id}"))).await
  }

  /// `POST projects`: multipart when an image file is attached.
  pub async fn add_project(&self, project: &Project) -> Result<Value, ClientError> {
    let request = with_optional_file(
      ApiRequest::post("projects"),
      project,
      "imageFile",
      "image",
      project.image_file.as_deref(),
    )
    .await?;
    self.fetch(request).await
  }

  /// `PATCH projects/{id}`: the stored image is kept unless a new file is
  /// attached.
  pub async fn update_project(&self, id: &ResourceId, project: &Project) -> Result<Value, ClientError> {
    let request = with_optional_file(
      ApiRequest::patch(format!("projects/{id}")),
      project,
      "imageFile",
      "image",
      project.image_file.as_deref(),
    )
    .await?;
    self.fetch(request).await
  }

  /// `DELETE projects/{id}`
  pub async fn delete_project(&self, id: &ResourceId) -> Result<(), ClientError> {
    self.send_only(ApiRequest::delete(format!("projects/{id}"))).await
  }

  // ── Skills ────────────────────────────────────────────────────────────────

  /// `GET skills_technologies`
  pub async fn list_skills(&self) -> Result<Vec<SkillRecord>, ClientError> {
    self.fetch(ApiRequest::get("skills_technologies")).await
  }

  /// `GET skills_technologies/{id}`
  pub async fn get_skill(&self, id: &ResourceId) -> Result<SkillRecord, ClientError> {
    self.fetch(ApiRequest::get(format!("skills_technologies/{id}"))).await
  }

  /// `POST skills_technologies`
  pub async fn add_skill(&self, skill: &Skill) -> Result<Value, ClientError> {
    self.fetch(ApiRequest::post("skills_technologies").json(skill)?).await
  }

  /// `PATCH skills_technologies/{id}`
  pub async fn update_skill(&self, id: &ResourceId, skill: &Skill) -> Result<Value, ClientError> {
    self
      .fetch(ApiRequest::patch(format!("skills_technologies/{id}")).json(skill)?)
      .await
  }

  /// `DELETE skills_technologies/{id}`
  pub async fn delete_skill(&self, id: &ResourceId) -> Result<(), ClientError> {
    self.send_only(ApiRequest::delete(format!("skills_technologies/{id}"))).await
  }

  /// `GET skills_categories`
  pub async fn list_categories(&self) -> Result<Vec<SkillCategoryRecord>, ClientError> {
    self.fetch(ApiRequest::get("skills_categories")).await
  }

  /// `GET skills_categories/{id}`
  pub async fn get_category(&self, id: &ResourceId) -> Result<SkillCategoryRecord, ClientError> {
    self.fetch(ApiRequest::get(format!("skills_categories/{id}"))).await
  }

  /// `POST skills_categories`
  pub async fn add_category(&self, category: &SkillCategory) -> Result<Value, ClientError> {
    self.fetch(ApiRequest::post("skills_categories").json(category)?).await
  }

  /// `PATCH skills_categories/{id}`
  pub async fn update_category(
    &self,
    id: &ResourceId,
    category: &SkillCategory,
  ) -> Result<Value, ClientError> {
    self
      .fetch(ApiRequest::patch(format!("skills_categories/{id}")).json(category)?)
      .await
  }

  /// `DELETE skills_categories/{id}`
  pub async fn delete_category(&self, id: &ResourceId) -> Result<(), ClientError> {
    self.send_only(ApiRequest::delete(format!("skills_categories/{id}"))).await
  }

  // ── Blog ──────────────────────────────────────────────────────────────────

  /// `GET blog`
  pub async fn list_blog_posts(&self) -> Result<Vec<BlogPostRecord>, ClientError> {
    self.fetch(ApiRequest::get("blog")).await
  }

  /// `GET blog/{id}`
  pub async fn get_blog_post(&self, id: &ResourceId) -> Result<BlogPostRecord, ClientError> {
    self.fetch(ApiRequest::get(format!("blog/{id}"))).await
  }

  /// `POST blog`
  pub async fn add_blog_post(&self, post: &BlogPost) -> Result<Value, ClientError> {
    self.fetch(ApiRequest::post("blog").json(post)?).await
  }

  /// `PATCH blog/{id}`
  pub async fn update_blog_post(&self, id: &ResourceId, post: &BlogPost) -> Result<Value, ClientError> {
    self.fetch(ApiRequest::patch(format!("blog/{id}")).json(post)?).await
  }

  /// `DELETE blog/{id}`
  pub async fn delete_blog_post(&self, id: &ResourceId) -> Result<(), ClientError> {
    self.send_only(ApiRequest::delete(format!("blog/{id}"))).await
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Decode a success body, unwrapping a `{"data": ...}` envelope when the
/// payload sits inside one. Empty bodies decode as JSON `null`.
pub fn decode<R: DeserializeOwned>(response: &RawResponse) -> Result<R, ClientError> {
  let value: Value = if response.body.is_empty() {
    Value::Null
  } else {
    response.json()?
  };
  if let Some(inner) = value.get("data") {
    if let Ok(r) = R::deserialize(inner) {
      return Ok(r);
    }
  }
  serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Attach `body` as JSON, or as multipart with the file at `file` under
/// `file_field` when a file is given. `local_key` (the draft's file-path
/// member) is never sent.
async fn with_optional_file<B: Serialize>(
  request: ApiRequest,
  body: &B,
  local_key: &str,
  file_field: &str,
  file: Option<&str>,
) -> Result<ApiRequest, ClientError> {
  let mut fields = serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))?;
  if let Value::Object(map) = &mut fields {
    map.remove(local_key);
  }
  match file.filter(|f| !f.is_empty()) {
    Some(path) => {
      if let Value::Object(map) = &mut fields {
        map.remove(file_field);
      }
      let mut parts = text_parts(&fields);
      parts.push(file_part(file_field, Path::new(path)).await?);
      Ok(request.multipart(parts))
    }
    None => request.json(&fields),
  }
}

#[cfg(test)]
mod tests {
  use folio_core::profile::Profile;
  use serde_json::json;

  use super::*;
  use crate::request::{FormPart, RequestBody};

  #[test]
  fn decode_bare_and_enveloped() {
    let bare = RawResponse::new(200, r#"{"description":"Ten chars!"}"#);
    let wrapped = RawResponse::new(200, r#"{"success":true,"data":{"description":"Ten chars!"}}"#);
    let a: CareerSummary = decode(&bare).unwrap();
    let b: CareerSummary = decode(&wrapped).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn decode_mismatch_is_decode_error() {
    let r = RawResponse::new(200, r#"{"unexpected":1}"#);
    assert!(matches!(decode::<CareerSummary>(&r), Err(ClientError::Decode(_))));
  }

  #[test]
  fn empty_body_decodes_to_null_value() {
    let r = RawResponse::new(204, "");
    assert_eq!(decode::<Value>(&r).unwrap(), Value::Null);
  }

  #[tokio::test]
  async fn json_body_drops_local_file_key() {
    let profile = Profile { name: "Ada".into(), ..Default::default() };
    let req = with_optional_file(ApiRequest::patch("profile"), &profile, "thumbnailFile", "thumbnail", None)
      .await
      .unwrap();
    let RequestBody::Json(body) = req.body else { panic!("expected json") };
    assert_eq!(body["name"], json!("Ada"));
    assert!(body.get("thumbnailFile").is_none());
  }

  #[tokio::test]
  async fn file_switches_to_multipart() {
    let path = std::env::temp_dir().join(format!("folio-upload-{}.png", uuid::Uuid::new_v4()));
    std::fs::write(&path, b"\x89PNG").unwrap();
    let path_str = path.to_string_lossy().into_owned();

    let project = Project {
      title: "Folio".into(),
      image: "https://cdn.example.com/old.png".into(),
      image_file: Some(path_str.clone()),
      ..Default::default()
    };
    let req = with_optional_file(
      ApiRequest::post("projects"),
      &project,
      "imageFile",
      "image",
      Some(&path_str),
    )
    .await
    .unwrap();
    std::fs::remove_file(&path).ok();

    let RequestBody::Multipart(parts) = req.body else { panic!("expected multipart") };
    assert!(parts.iter().any(|p| matches!(p, FormPart::File { name, mime, .. } if name == "image" && mime == "image/png")));
    assert!(parts.iter().all(|p| !matches!(p, FormPart::Text { name, .. } if name == "image" || name == "imageFile")));
  }
}
