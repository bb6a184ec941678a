//! The course catalog: the full, immutable list of courses for one session,
//! plus the loader that reads it from the JSON resource.

mod error;
mod loader;

pub use error::CatalogError;
pub use loader::{load_catalog, parse_catalog, spawn_loader, LoadResult};

use std::collections::HashSet;

use crate::models::Course;

/// Ordered list of every course as it appeared in the resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids so navigation by id stays
    /// unambiguous.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !seen.insert(course.id) {
                return Err(CatalogError::DuplicateId(course.id));
            }
        }
        Ok(Self { courses })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn find(&self, id: i64) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses whose title or description contains `term`, ignoring case,
    /// in catalog order.
    pub fn filter(&self, term: &str) -> Vec<Course> {
        let needle = term.to_lowercase();
        self.courses
            .iter()
            .filter(|course| course.matches(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, title: &str, description: &str) -> Course {
        Course {
            id,
            title: title.to_string(),
            description: description.to_string(),
            materials: Default::default(),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![course(1, "A", ""), course(1, "B", "")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(1)));
    }

    #[test]
    fn filter_keeps_catalog_order() {
        let catalog = Catalog::new(vec![
            course(1, "Calculus", "Limits and series"),
            course(2, "Linear Algebra", "Matrices"),
            course(3, "Data Structures", "Lists, trees and SERIES of nodes"),
        ])
        .unwrap();

        let ids: Vec<i64> = catalog.filter("Series").iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 3]);
        assert_eq!(catalog.filter("").len(), 3);
        assert!(catalog.filter("chemistry").is_empty());
    }

    #[test]
    fn find_by_id() {
        let catalog = Catalog::new(vec![course(4, "Physics", "")]).unwrap();
        assert_eq!(catalog.find(4).map(|c| c.title.as_str()), Some("Physics"));
        assert!(catalog.find(5).is_none());
    }
}
