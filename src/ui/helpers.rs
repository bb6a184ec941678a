use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::Course;

/// Label of the action control on every card.
pub(crate) const CARD_ACTION: &str = "[ Get Stuff ]";

/// Build the text of a course card: bold title, muted description, and the
/// action control highlighted when the card is selected.
pub(crate) fn course_card_lines(course: &Course, selected: bool) -> Vec<Line<'static>> {
    let title_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let action_style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    vec![
        Line::from(Span::styled(course.title.clone(), title_style)),
        Line::from(Span::styled(
            course.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(CARD_ACTION, action_style)),
    ]
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for the popup overlay.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// True when the cell at (`column`, `row`) lies inside `area`.
pub(crate) fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn centered_rect_sits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn contains_checks_bounds() {
        let area = Rect::new(10, 5, 4, 2);
        assert!(contains(area, 10, 5));
        assert!(contains(area, 13, 6));
        assert!(!contains(area, 14, 6));
        assert!(!contains(area, 9, 5));
        assert!(!contains(area, 10, 7));
    }

    #[test]
    fn surface_error_reports_root_cause() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("disk unplugged"));
        let err = err.context("failed to open link").unwrap_err();
        assert_eq!(surface_error(&err), "disk unplugged");
    }

    #[test]
    fn card_shows_title_description_and_action() {
        let course = Course {
            id: 1,
            title: "Algorithms".to_string(),
            description: "CS core".to_string(),
            materials: Default::default(),
        };
        let lines = course_card_lines(&course, false);
        let text: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        assert_eq!(text, ["Algorithms", "CS core", "", CARD_ACTION]);
    }
}
