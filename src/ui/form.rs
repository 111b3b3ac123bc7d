//! Selection form rendering
//!
//! One row per [`FocusField`]. Dependent fields show their loading state and
//! feedback underneath so an empty selector always says why it is empty.

use crate::app::{AppMode, AppState};
use crate::logic::cascade::SessionState;
use crate::logic::family::group_by_category;
use crate::logic::options::{Choice, OptionList};
use crate::theme::{Styles, Theme, UiText};
use crate::types::{FocusField, Validity};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Label of the selected entry, or a placeholder for the list's state
fn selected_label<T: Choice>(list: &OptionList<T>, value: &str) -> String {
    if let Some(entry) = list.get(value) {
        return entry.label();
    }
    match list.validity() {
        Validity::Loading => UiText::LOADING.to_string(),
        _ if value.is_empty() => UiText::NO_SELECTION.to_string(),
        _ => value.to_string(),
    }
}

/// Display value and list state for a field
fn field_value(session: &SessionState, field: FocusField) -> (String, Option<(Validity, String)>) {
    let selection = &session.selection;
    let feedback = |validity: Validity, text: Option<&str>| {
        text.map(|t| (validity, t.to_string()))
    };
    match field {
        FocusField::Region => (selected_label(&session.regions, &selection.region), None),
        FocusField::Architecture => (selection.architecture.to_string(), None),
        FocusField::Category => (
            selected_label(&session.categories, &selection.category),
            None,
        ),
        FocusField::Family => (
            selected_label(&session.families, &selection.family),
            feedback(session.families.validity(), session.families.feedback()),
        ),
        FocusField::Size => (
            selected_label(&session.sizes, &selection.size),
            feedback(session.sizes.validity(), session.sizes.feedback()),
        ),
        FocusField::Operation => (
            selected_label(&session.operations, &selection.operation),
            None,
        ),
        FocusField::VolumeType => (
            selected_label(&session.volume_types, &selection.volume_type),
            None,
        ),
        FocusField::VolumeSize => (format!("{} GiB", selection.volume_size), None),
    }
}

/// Families sharing the selected family's category, e.g. `general: m5 m6i m7i`
fn family_group_line(session: &SessionState) -> Option<String> {
    let selected = session.selection.family.as_str();
    let (category, members) = group_by_category(session.families.entries())
        .into_iter()
        .find(|(_, members)| members.iter().any(|f| f.name == selected))?;
    let names: Vec<&str> = members.iter().map(|f| f.name.as_str()).collect();
    let category = if category.is_empty() { "families" } else { category };
    Some(format!("{category}: {}", names.join(" ")))
}

/// Render the selection form
pub fn render_form(f: &mut Frame, state: &AppState, area: Rect) {
    let session = &state.session;
    let active = state.mode == AppMode::Form;
    let mut lines: Vec<Line> = Vec::new();

    for field in FocusField::ALL {
        let focused = active && field == state.focus;
        let (value, feedback) = field_value(session, field);

        let marker = if focused { "> " } else { "  " };
        let value_style = if focused {
            Styles::selected()
        } else {
            Styles::text()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Styles::title()),
            Span::styled(format!("{:<14}", field.to_string()), Styles::text_secondary()),
            Span::styled(format!(" {value} "), value_style),
        ]));

        if let Some((validity, text)) = feedback {
            lines.push(Line::from(vec![
                Span::styled(" ".repeat(16), Style::default()),
                Span::styled(text, Theme::validity_style(validity)),
            ]));
        } else if focused && field == FocusField::Family {
            if let Some(group) = family_group_line(session) {
                lines.push(Line::from(vec![
                    Span::styled(" ".repeat(16), Style::default()),
                    Span::styled(group, Styles::text_muted()),
                ]));
            }
        }
    }

    lines.push(Line::from(""));
    let (label, style) = if session.can_query() {
        ("[ Enter: Quick Look ]", Styles::title())
    } else if session.instance.loading || session.volume.loading {
        ("[ Looking up prices... ]", Styles::info())
    } else {
        ("[ Quick Look unavailable ]", Styles::text_muted())
    };
    lines.push(Line::from(Span::styled(label, style)));

    let border = if active {
        Styles::border_active()
    } else {
        Styles::border_inactive()
    };
    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Selection "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(form, area);
}
