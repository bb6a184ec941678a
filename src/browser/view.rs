use std::cmp::Ordering;

use feruca::Collator;

use crate::models::Course;

/// Direction used by the sort toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Text shown next to the sort indicator.
    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "A-Z",
            SortDirection::Descending => "Z-A",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↓",
            SortDirection::Descending => "↑",
        }
    }
}

/// Filter buttons on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order, restricted by the current search.
    #[default]
    Catalog,
    Alphabetical,
}

impl SortOrder {
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Catalog => "All",
            SortOrder::Alphabetical => "Alphabetical",
        }
    }
}

/// Title collation using the Unicode Collation Algorithm with the root
/// locale: accents sort next to their base letter and lowercase precedes
/// uppercase when titles otherwise match.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

/// Stable sort by title. Equal titles keep their relative order.
pub fn sort_by_title(courses: &mut [Course], direction: SortDirection) {
    let mut collator = Collator::default();
    match direction {
        SortDirection::Ascending => {
            courses.sort_by(|a, b| collator.collate(a.title.as_str(), b.title.as_str()));
        }
        SortDirection::Descending => {
            courses.sort_by(|a, b| collator.collate(b.title.as_str(), a.title.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, title: &str) -> Course {
        Course {
            id,
            title: title.to_string(),
            description: String::new(),
            materials: Default::default(),
        }
    }

    fn titles(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn collation_orders_letters_before_case() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Zebra", "apple"), Ordering::Greater);
        assert_ne!(compare_titles("Apple", "apple"), Ordering::Equal);
    }

    #[test]
    fn accented_titles_sort_with_their_base_letter() {
        let mut courses = vec![
            course(1, "Zoology"),
            course(2, "Éthique"),
            course(3, "Algebra"),
        ];
        sort_by_title(&mut courses, SortDirection::Ascending);
        assert_eq!(titles(&courses), ["Algebra", "Éthique", "Zoology"]);

        sort_by_title(&mut courses, SortDirection::Descending);
        assert_eq!(titles(&courses), ["Zoology", "Éthique", "Algebra"]);
    }

    #[test]
    fn lowercase_precedes_uppercase_on_equal_letters() {
        let mut courses = vec![course(1, "Apple"), course(2, "apple"), course(3, "Banana")];
        sort_by_title(&mut courses, SortDirection::Ascending);
        assert_eq!(titles(&courses), ["apple", "Apple", "Banana"]);
        assert_eq!(compare_titles("apple", "Apple"), Ordering::Less);
    }

    #[test]
    fn descending_reverses_ascending() {
        let mut courses = vec![
            course(1, "physics"),
            course(2, "Algebra"),
            course(3, "Chemistry"),
        ];
        sort_by_title(&mut courses, SortDirection::Ascending);
        let ascending: Vec<String> = titles(&courses).iter().map(|t| t.to_string()).collect();
        sort_by_title(&mut courses, SortDirection::Descending);
        let mut descending: Vec<String> =
            titles(&courses).iter().map(|t| t.to_string()).collect();
        descending.reverse();
        assert_eq!(ascending, descending);
        assert_eq!(ascending, ["Algebra", "Chemistry", "physics"]);
    }

    #[test]
    fn duplicate_titles_keep_relative_order() {
        let mut courses = vec![course(1, "Ethics"), course(2, "Art"), course(3, "Ethics")];
        sort_by_title(&mut courses, SortDirection::Ascending);
        let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
        assert_eq!(ids, [2, 1, 3]);

        sort_by_title(&mut courses, SortDirection::Descending);
        let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 3, 2]);
    }

    #[test]
    fn direction_labels() {
        assert_eq!(SortDirection::default().label(), "A-Z");
        assert_eq!(SortDirection::Ascending.flipped().label(), "Z-A");
        assert_eq!(SortDirection::Descending.flipped(), SortDirection::Ascending);
    }
}
