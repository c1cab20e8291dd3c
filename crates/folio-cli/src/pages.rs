//! What each screen edits or lists, and how its submission reaches the API.

use anyhow::Result;
use folio_client::{ClientError, PortfolioApi, Transport};
use folio_core::{
  Notifier, ResourceId,
  about::AboutMe,
  education::{Achievement, Course, Education, EducationItem, Subject},
  experience::{CareerSummary, Experience, ExperienceRecord},
  profile::Profile,
  project::{Project, ProjectRecord},
  session::LoginForm,
  skill::{Skill, SkillCategory, SkillRecord},
};
use folio_forms::{Column, DataTable, TableRow};
use serde_json::json;

use crate::{
  editor::{Editor, FieldSpec, FormEditor, Leaf},
  route::EducationItemKind,
};

pub const MAX_PROJECT_TAGS: usize = 10;

// ─── Submission ───────────────────────────────────────────────────────────────

/// Validated values from a form, tagged with the mutation they are for.
/// `None` ids mean create.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
  Login(LoginForm),
  Profile(Profile),
  About(AboutMe),
  Education(Education),
  EducationItem(EducationItem),
  CareerSummary(CareerSummary),
  Experience(Option<ResourceId>, Experience),
  Project(Option<ResourceId>, Project),
  Skill(Option<ResourceId>, Skill),
  Category(SkillCategory),
}

impl Submission {
  pub async fn send<T: Transport, N: Notifier>(self, api: &PortfolioApi<T, N>) -> Result<(), ClientError> {
    match self {
      Submission::Login(form) => api.login(&form).await.map(drop),
      Submission::Profile(p) => api.update_profile(&p).await.map(drop),
      Submission::About(a) => api.update_about(&a).await.map(drop),
      Submission::Education(e) => api.update_education(&e).await.map(drop),
      Submission::EducationItem(item) => api.add_education_item(item).await.map(drop),
      Submission::CareerSummary(c) => api.update_career_summary(&c).await.map(drop),
      Submission::Experience(None, e) => api.add_experience(&e).await.map(drop),
      Submission::Experience(Some(id), e) => api.update_experience(&id, &e).await.map(drop),
      Submission::Project(None, p) => api.add_project(&p).await.map(drop),
      Submission::Project(Some(id), p) => api.update_project(&id, &p).await.map(drop),
      Submission::Skill(None, s) => api.add_skill(&s).await.map(drop),
      Submission::Skill(Some(id), s) => api.update_skill(&id, &s).await.map(drop),
      Submission::Category(c) => api.add_category(&c).await.map(drop),
    }
  }

  /// Singletons stay on their page and refetch; everything else returns to
  /// its list.
  pub fn leaves_page(&self) -> bool {
    !matches!(
      self,
      Submission::Profile(_)
        | Submission::About(_)
        | Submission::Education(_)
    )
  }
}

// ─── Forms ────────────────────────────────────────────────────────────────────

type Boxed = Result<Box<dyn Editor>>;

pub fn login() -> Boxed {
  let editor = FormEditor::new(
    "Sign in",
    LoginForm::default(),
    vec![
      FieldSpec::input("email", "Email"),
      FieldSpec::leaf("password", "Password", Leaf::Secret),
    ],
    "Logged in successfully!",
    Submission::Login,
  )?;
  Ok(Box::new(editor))
}

pub fn profile(current: Profile) -> Boxed {
  let editor = FormEditor::new(
    "Profile",
    current,
    vec![
      FieldSpec::input("name", "Name"),
      FieldSpec::input("title", "Title"),
      FieldSpec::input("experience", "Experience"),
      FieldSpec::leaf("thumbnailFile", "Thumbnail file", Leaf::File),
      FieldSpec::input("resumeFile", "Resume URL"),
      FieldSpec::input("github", "GitHub"),
      FieldSpec::input("linkedin", "LinkedIn"),
      FieldSpec::input("twitter", "Twitter"),
    ],
    "Profile updated successfully!",
    Submission::Profile,
  )?;
  Ok(Box::new(editor))
}

pub fn about(current: AboutMe) -> Boxed {
  let editor = FormEditor::new(
    "About Me",
    current,
    vec![
      FieldSpec::text_area("description", "Description"),
      FieldSpec::repeatable(
        "personalInfo",
        "Personal info",
        vec![("label", "Label", Leaf::Input), ("value", "Value", Leaf::Input)],
        json!({ "label": "", "value": "" }),
      ),
      FieldSpec::repeatable(
        "features",
        "Features",
        vec![
          ("icon", "Icon", Leaf::Icon),
          ("title", "Title", Leaf::Input),
          ("description", "Description", Leaf::TextArea),
        ],
        json!({ "icon": "", "title": "", "description": "" }),
      ),
    ],
    "About me information updated successfully!",
    Submission::About,
  )?;
  Ok(Box::new(editor))
}

pub fn education(current: Education) -> Boxed {
  let editor = FormEditor::new(
    "Education",
    current,
    vec![
      FieldSpec::input("degree", "Degree"),
      FieldSpec::input("institution", "Institution"),
      FieldSpec::input("location", "Location"),
      FieldSpec::input("period", "Period"),
      FieldSpec::text_area("description", "Description"),
      FieldSpec::input("cgpa", "CGPA"),
      FieldSpec::repeatable(
        "achievements",
        "Achievements",
        achievement_fields(),
        json!({ "icon": "", "title": "", "description": "" }),
      ),
      FieldSpec::repeatable(
        "subjects",
        "Subjects",
        subject_fields(),
        json!({ "name": "", "icon": "" }),
      ),
      FieldSpec::repeatable(
        "courses",
        "Courses",
        course_fields(),
        json!({ "name": "", "provider": "", "year": "", "icon": "" }),
      ),
    ],
    "Education information updated successfully!",
    Submission::Education,
  )?;
  Ok(Box::new(editor))
}

fn achievement_fields() -> Vec<(&'static str, &'static str, Leaf)> {
  vec![
    ("icon", "Icon", Leaf::Icon),
    ("title", "Title", Leaf::Input),
    ("description", "Description", Leaf::TextArea),
  ]
}

fn subject_fields() -> Vec<(&'static str, &'static str, Leaf)> {
  vec![("name", "Name", Leaf::Input), ("icon", "Icon", Leaf::Icon)]
}

fn course_fields() -> Vec<(&'static str, &'static str, Leaf)> {
  vec![
    ("name", "Name", Leaf::Input),
    ("provider", "Provider", Leaf::Input),
    ("year", "Year", Leaf::Input),
    ("icon", "Icon", Leaf::Icon),
  ]
}

/// Turn a sub-record's field list into top-level specs.
fn flat(fields: Vec<(&'static str, &'static str, Leaf)>) -> Vec<FieldSpec> {
  fields.into_iter().map(|(path, label, leaf)| FieldSpec::leaf(path, label, leaf)).collect()
}

pub fn education_item(kind: EducationItemKind) -> Boxed {
  let editor: Box<dyn Editor> = match kind {
    EducationItemKind::Achievement => Box::new(FormEditor::new(
      "Add Achievement",
      Achievement::default(),
      flat(achievement_fields()),
      "Achievement added successfully!",
      |a| Submission::EducationItem(EducationItem::Achievement(a)),
    )?),
    EducationItemKind::Subject => Box::new(FormEditor::new(
      "Add Subject",
      Subject::default(),
      flat(subject_fields()),
      "Subject added successfully!",
      |s| Submission::EducationItem(EducationItem::Subject(s)),
    )?),
    EducationItemKind::Course => Box::new(FormEditor::new(
      "Add Course",
      Course::default(),
      flat(course_fields()),
      "Course added successfully!",
      |c| Submission::EducationItem(EducationItem::Course(c)),
    )?),
  };
  Ok(editor)
}

pub fn career_summary(current: CareerSummary) -> Boxed {
  let editor = FormEditor::new(
    "Career Summary",
    current,
    vec![FieldSpec::text_area("description", "Summary")],
    "Career Summary updated successfully!",
    Submission::CareerSummary,
  )?;
  Ok(Box::new(editor))
}

pub fn experience(id: Option<ResourceId>, current: Experience) -> Boxed {
  let (title, success) = match id {
    Some(_) => ("Edit Experience", "Experience updated successfully!"),
    None => ("Add Experience", "Job experience added successfully!"),
  };
  let editor = FormEditor::new(
    title,
    current,
    vec![
      FieldSpec::input("position", "Position"),
      FieldSpec::input("company", "Company"),
      FieldSpec::input("location", "Location"),
      FieldSpec::input("period", "Period"),
      FieldSpec::text_area("description", "Description"),
      FieldSpec::repeatable(
        "responsibilities",
        "Responsibilities",
        vec![("", "Responsibility", Leaf::Input)],
        json!(""),
      ),
    ],
    success,
    move |e| Submission::Experience(id.clone(), e),
  )?;
  Ok(Box::new(editor))
}

pub fn project(id: Option<ResourceId>, current: Project) -> Boxed {
  let (title, success) = match id {
    Some(_) => ("Edit Project", "Project updated successfully!"),
    None => ("Add Project", "Project added successfully!"),
  };
  let editor = FormEditor::new(
    title,
    current,
    vec![
      FieldSpec::input("title", "Title"),
      FieldSpec::text_area("description", "Description"),
      FieldSpec::input("category", "Category"),
      FieldSpec::leaf("tags", "Tags", Leaf::Tags { max: Some(MAX_PROJECT_TAGS) }),
      FieldSpec::input("demoUrl", "Demo URL"),
      FieldSpec::input("repoUrl", "Repo URL"),
      FieldSpec::repeatable("features", "Features", vec![("", "Feature", Leaf::Input)], json!("")),
      FieldSpec::leaf("isFeatured", "Featured", Leaf::Switch),
      FieldSpec::leaf("imageFile", "Image file", Leaf::File),
    ],
    success,
    move |p| Submission::Project(id.clone(), p),
  )?;
  Ok(Box::new(editor))
}

/// `categories` are the names offered for the category field.
pub fn skill(id: Option<ResourceId>, current: Skill, categories: Vec<String>) -> Boxed {
  let (title, success) = match id {
    Some(_) => ("Edit Skill", "Skill updated successfully!"),
    None => ("Add Skill", "Skill added successfully!"),
  };
  let editor = FormEditor::new(
    title,
    current,
    vec![
      FieldSpec::input("name", "Name"),
      FieldSpec::leaf("icon", "Icon", Leaf::Icon),
      FieldSpec::leaf("category", "Category", Leaf::Choice(categories)),
    ],
    success,
    move |s| Submission::Skill(id.clone(), s),
  )?;
  Ok(Box::new(editor))
}

pub fn category() -> Boxed {
  let editor = FormEditor::new(
    "Add Category",
    SkillCategory::default(),
    vec![
      FieldSpec::input("name", "Name"),
      FieldSpec::leaf("icon", "Icon", Leaf::Icon),
    ],
    "Category added successfully!",
    Submission::Category,
  )?;
  Ok(Box::new(editor))
}

// ─── Lists ────────────────────────────────────────────────────────────────────

/// Which collection a list screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
  Projects,
  Experience,
  Skills,
}

/// A stored record flattened to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
  pub id:    ResourceId,
  pub cells: Vec<(&'static str, String)>,
}

impl ListRow {
  /// How the row is named in prompts: its first cell, quoted.
  pub fn label(&self) -> String {
    match self.cells.first() {
      Some((_, value)) if !value.is_empty() => format!("\"{value}\""),
      _ => format!("#{}", self.id),
    }
  }
}

impl TableRow for ListRow {
  fn cell(&self, key: &str) -> String {
    self
      .cells
      .iter()
      .find(|(k, _)| *k == key)
      .map(|(_, v)| v.clone())
      .unwrap_or_default()
  }
}

pub fn project_table(records: Vec<ProjectRecord>) -> DataTable<ListRow> {
  let rows = records
    .into_iter()
    .map(|r| ListRow {
      id:    r.id,
      cells: vec![
        ("title", r.value.title),
        ("category", r.value.category),
        ("tags", r.value.tags.join(", ")),
        ("featured", if r.value.is_featured { "Yes" } else { "No" }.to_owned()),
      ],
    })
    .collect();
  DataTable::new(
    vec![
      Column::new("title", "Title").sortable(),
      Column::new("category", "Category").sortable(),
      Column::new("tags", "Tags"),
      Column::new("featured", "Featured").sortable(),
    ],
    rows,
  )
}

pub fn experience_table(records: Vec<ExperienceRecord>) -> DataTable<ListRow> {
  let rows = records
    .into_iter()
    .map(|r| ListRow {
      id:    r.id,
      cells: vec![
        ("position", r.value.position),
        ("company", r.value.company),
        ("location", r.value.location),
        ("period", r.value.period),
      ],
    })
    .collect();
  DataTable::new(
    vec![
      Column::new("position", "Position").sortable(),
      Column::new("company", "Company").sortable(),
      Column::new("location", "Location"),
      Column::new("period", "Period"),
    ],
    rows,
  )
}

pub fn skill_table(records: Vec<SkillRecord>) -> DataTable<ListRow> {
  let rows = records
    .into_iter()
    .map(|r| ListRow {
      id:    r.id,
      cells: vec![
        ("name", r.value.name),
        ("icon", r.value.icon),
        ("category", r.value.category),
      ],
    })
    .collect();
  DataTable::new(
    vec![
      Column::new("name", "Name").sortable(),
      Column::new("icon", "Icon"),
      Column::new("category", "Category").sortable(),
    ],
    rows,
  )
}

#[cfg(test)]
mod tests {
  use folio_core::Identified;
  use folio_forms::TableBody;

  use super::*;

  fn skill_record(id: &str, name: &str, category: &str) -> SkillRecord {
    Identified {
      id:    ResourceId::new(id),
      value: Skill { name: name.into(), icon: "tabler:code".into(), category: category.into() },
    }
  }

  #[test]
  fn skill_rows_sort_by_name() {
    let mut table = skill_table(vec![
      skill_record("1", "Rust", "Languages"),
      skill_record("2", "Docker", "Tools"),
    ]);
    assert!(table.toggle_sort(0));
    let TableBody::Rows(rows) = table.body() else { panic!("expected rows") };
    assert_eq!(rows[0].cell("name"), "Docker");
    assert_eq!(rows[1].id.as_str(), "1");
  }

  #[test]
  fn empty_lists_show_the_spanning_row() {
    let table = project_table(Vec::new());
    assert_eq!(table.body(), TableBody::Empty { message: "No results found.", span: 4 });
  }

  #[test]
  fn unknown_cell_is_blank() {
    let row = ListRow { id: ResourceId::new("x"), cells: vec![("name", "Rust".into())] };
    assert_eq!(row.cell("missing"), "");
  }

  #[test]
  fn every_page_builds() {
    login().unwrap();
    profile(Profile::default()).unwrap();
    about(AboutMe::default()).unwrap();
    education(Education::default()).unwrap();
    career_summary(CareerSummary::default()).unwrap();
    experience(None, Experience::default()).unwrap();
    project(Some(ResourceId::new("7")), Project::default()).unwrap();
    skill(None, Skill::default(), vec!["Languages".into()]).unwrap();
    category().unwrap();
    for kind in [EducationItemKind::Achievement, EducationItemKind::Subject, EducationItemKind::Course] {
      education_item(kind).unwrap();
    }
  }

  #[test]
  fn empty_education_arrays_get_one_blank_entry() {
    let editor = education(Education::default()).unwrap();
    assert_eq!(editor.value("subjects"), json!([{ "name": "", "icon": "" }]));
    assert!(!editor.is_dirty());
  }

  #[test]
  fn singletons_stay_on_their_page() {
    assert!(!Submission::Profile(Profile::default()).leaves_page());
    assert!(Submission::Category(SkillCategory::default()).leaves_page());
  }
}
