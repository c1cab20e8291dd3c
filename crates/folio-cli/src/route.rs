//! Navigation: path parsing, the sidebar sections and the sign-in guard.

use folio_core::ResourceId;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationItemKind {
  Achievement,
  Subject,
  Course,
}

impl EducationItemKind {
  fn slug(self) -> &'static str {
    match self {
      EducationItemKind::Achievement => "achievement",
      EducationItemKind::Subject => "subject",
      EducationItemKind::Course => "course",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Dashboard,
  Profile,
  About,
  Education,
  EducationAdd(EducationItemKind),
  Projects,
  ProjectAdd,
  ProjectEdit(ResourceId),
  Experience,
  ExperienceAdd,
  ExperienceEdit(ResourceId),
  Skills,
  SkillAdd,
  SkillEdit(ResourceId),
  SkillCategoryAdd,
  Login,
}

impl Route {
  /// Unknown paths resolve to the dashboard.
  pub fn parse(path: &str) -> Self {
    let segments: Vec<&str> = path.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
      [] => Route::Dashboard,
      ["profile"] => Route::Profile,
      ["about"] => Route::About,
      ["education"] => Route::Education,
      ["education", "add", "achievement"] => Route::EducationAdd(EducationItemKind::Achievement),
      ["education", "add", "subject"] => Route::EducationAdd(EducationItemKind::Subject),
      ["education", "add", "course"] => Route::EducationAdd(EducationItemKind::Course),
      ["projects"] => Route::Projects,
      ["projects", "add"] => Route::ProjectAdd,
      ["projects", "edit", id] => Route::ProjectEdit(ResourceId::new(*id)),
      ["experience"] => Route::Experience,
      ["experience", "add"] => Route::ExperienceAdd,
      ["experience", "edit", id] => Route::ExperienceEdit(ResourceId::new(*id)),
      ["skills"] => Route::Skills,
      ["skills", "add"] => Route::SkillAdd,
      ["skills", "edit", id] => Route::SkillEdit(ResourceId::new(*id)),
      ["skills", "add-category"] => Route::SkillCategoryAdd,
      ["login"] => Route::Login,
      _ => Route::Dashboard,
    }
  }

  pub fn path(&self) -> String {
    match self {
      Route::Dashboard => "/".into(),
      Route::Profile => "/profile".into(),
      Route::About => "/about".into(),
      Route::Education => "/education".into(),
      Route::EducationAdd(kind) => format!("/education/add/{}", kind.slug()),
      Route::Projects => "/projects".into(),
      Route::ProjectAdd => "/projects/add".into(),
      Route::ProjectEdit(id) => format!("/projects/edit/{id}"),
      Route::Experience => "/experience".into(),
      Route::ExperienceAdd => "/experience/add".into(),
      Route::ExperienceEdit(id) => format!("/experience/edit/{id}"),
      Route::Skills => "/skills".into(),
      Route::SkillAdd => "/skills/add".into(),
      Route::SkillEdit(id) => format!("/skills/edit/{id}"),
      Route::SkillCategoryAdd => "/skills/add-category".into(),
      Route::Login => "/login".into(),
    }
  }

  pub fn is_protected(&self) -> bool { *self != Route::Login }

  /// Where Esc leads from this route.
  pub fn parent(&self) -> Route {
    match self {
      Route::EducationAdd(_) => Route::Education,
      Route::ProjectAdd | Route::ProjectEdit(_) => Route::Projects,
      Route::ExperienceAdd | Route::ExperienceEdit(_) => Route::Experience,
      Route::SkillAdd | Route::SkillEdit(_) | Route::SkillCategoryAdd => Route::Skills,
      _ => Route::Dashboard,
    }
  }

  pub fn section(&self) -> Option<Section> {
    Some(match self {
      Route::Dashboard => Section::Dashboard,
      Route::Profile => Section::Profile,
      Route::About => Section::About,
      Route::Education | Route::EducationAdd(_) => Section::Education,
      Route::Projects | Route::ProjectAdd | Route::ProjectEdit(_) => Section::Projects,
      Route::Experience | Route::ExperienceAdd | Route::ExperienceEdit(_) => Section::Experience,
      Route::Skills | Route::SkillAdd | Route::SkillEdit(_) | Route::SkillCategoryAdd => {
        Section::Skills
      }
      Route::Login => return None,
    })
  }
}

/// Sidebar entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Section {
  Dashboard,
  Profile,
  #[strum(to_string = "About Me")]
  About,
  Education,
  Projects,
  Experience,
  Skills,
}

impl Section {
  pub fn route(self) -> Route {
    match self {
      Section::Dashboard => Route::Dashboard,
      Section::Profile => Route::Profile,
      Section::About => Route::About,
      Section::Education => Route::Education,
      Section::Projects => Route::Projects,
      Section::Experience => Route::Experience,
      Section::Skills => Route::Skills,
    }
  }
}

/// Outcome of checking a navigation against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
  Allow(Route),
  /// Send the user to the login screen; `from` is where to return after.
  Login { from: String },
}

pub fn guard(route: Route, authenticated: bool) -> Guard {
  if route.is_protected() && !authenticated {
    Guard::Login { from: route.path() }
  } else {
    Guard::Allow(route)
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn paths_round_trip() {
    for path in [
      "/",
      "/profile",
      "/education/add/subject",
      "/projects/edit/42",
      "/experience/add",
      "/skills/add-category",
      "/login",
    ] {
      assert_eq!(Route::parse(path).path(), path);
    }
  }

  #[test]
  fn unknown_paths_go_home() {
    assert_eq!(Route::parse("/nope"), Route::Dashboard);
    assert_eq!(Route::parse("/projects/edit"), Route::Dashboard);
    assert_eq!(Route::parse("/education/add/degree"), Route::Dashboard);
  }

  #[test]
  fn guard_preserves_origin() {
    let route = Route::parse("/projects/edit/7");
    assert_eq!(guard(route.clone(), false), Guard::Login { from: "/projects/edit/7".into() });
    assert_eq!(guard(route.clone(), true), Guard::Allow(route));
    assert_eq!(guard(Route::Login, false), Guard::Allow(Route::Login));
  }

  #[test]
  fn sections_cover_sidebar() {
    let labels: Vec<String> = Section::iter().map(|s| s.to_string()).collect();
    assert_eq!(labels[2], "About Me");
    for section in Section::iter() {
      assert_eq!(section.route().section(), Some(section));
    }
  }
}
