//! Domain models shared by the catalog loader, the browser controller and the
//! terminal front-end. They stay plain data holders; filtering and navigation
//! live in [`crate::browser`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A single course card as described by the catalog file.
pub struct Course {
    /// Unique identifier. Navigation to the materials view is keyed on it.
    pub id: i64,
    /// Title shown on the card and used for sorting.
    pub title: String,
    /// Short blurb shown under the title. Searched together with the title.
    pub description: String,
    /// Material category key (see [`MaterialCategory::key`]) to URL.
    #[serde(default)]
    pub materials: BTreeMap<String, String>,
}

impl Course {
    /// Look up the link for one material category. Blank entries count as
    /// missing so the UI can treat them as inert nodes.
    pub fn material_link(&self, category: MaterialCategory) -> Option<&str> {
        self.materials
            .get(category.key())
            .map(|link| link.trim())
            .filter(|link| !link.is_empty())
    }

    /// Case-insensitive substring match against title and description.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// The nine document types linked from every course, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialCategory {
    Lab,
    Assignments,
    Quizzes,
    SessionalOne,
    SessionalTwo,
    Finals,
    Books,
    Outlines,
    Slides,
}

impl MaterialCategory {
    /// Every category in the order the materials chain shows them.
    pub const ALL: [MaterialCategory; 9] = [
        MaterialCategory::Lab,
        MaterialCategory::Assignments,
        MaterialCategory::Quizzes,
        MaterialCategory::SessionalOne,
        MaterialCategory::SessionalTwo,
        MaterialCategory::Finals,
        MaterialCategory::Books,
        MaterialCategory::Outlines,
        MaterialCategory::Slides,
    ];

    /// Key used inside a course's `materials` object.
    pub fn key(self) -> &'static str {
        match self {
            MaterialCategory::Lab => "lab",
            MaterialCategory::Assignments => "assignments",
            MaterialCategory::Quizzes => "quizzes",
            MaterialCategory::SessionalOne => "sessional-1",
            MaterialCategory::SessionalTwo => "sessional-2",
            MaterialCategory::Finals => "finals",
            MaterialCategory::Books => "books",
            MaterialCategory::Outlines => "outlines",
            MaterialCategory::Slides => "slides",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MaterialCategory::Lab => "Lab Sessions",
            MaterialCategory::Assignments => "Assignments",
            MaterialCategory::Quizzes => "Quizzes",
            MaterialCategory::SessionalOne => "Sessional 1",
            MaterialCategory::SessionalTwo => "Sessional 2",
            MaterialCategory::Finals => "Finals",
            MaterialCategory::Books => "Books",
            MaterialCategory::Outlines => "Outlines",
            MaterialCategory::Slides => "Slides",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MaterialCategory::Lab => "Practical exercises",
            MaterialCategory::Assignments => "Course assignments",
            MaterialCategory::Quizzes => "Quiz papers",
            MaterialCategory::SessionalOne => "Mid-term exams",
            MaterialCategory::SessionalTwo => "Second sessional",
            MaterialCategory::Finals => "Final examinations",
            MaterialCategory::Books => "Reference materials",
            MaterialCategory::Outlines => "Course outlines",
            MaterialCategory::Slides => "Course slides",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(materials: &[(&str, &str)]) -> Course {
        Course {
            id: 7,
            title: "Operating Systems".to_string(),
            description: "Processes and Threads".to_string(),
            materials: materials
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn categories_keep_display_order() {
        let keys: Vec<&str> = MaterialCategory::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            [
                "lab",
                "assignments",
                "quizzes",
                "sessional-1",
                "sessional-2",
                "finals",
                "books",
                "outlines",
                "slides"
            ]
        );
    }

    #[test]
    fn blank_material_links_are_missing() {
        let course = course(&[("lab", "https://example.com/lab"), ("slides", "   ")]);
        assert_eq!(
            course.material_link(MaterialCategory::Lab),
            Some("https://example.com/lab")
        );
        assert_eq!(course.material_link(MaterialCategory::Slides), None);
        assert_eq!(course.material_link(MaterialCategory::Books), None);
    }

    #[test]
    fn matching_checks_title_and_description() {
        let course = course(&[]);
        assert!(course.matches("operating"));
        assert!(course.matches("threads"));
        assert!(course.matches(""));
        assert!(!course.matches("biology"));
    }
}
