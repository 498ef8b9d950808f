// src/ports/html.rs
use crate::application::{EditState, NoticeLevel, NotesPage};
use crate::domain::{ImageDisplay, NoteRow};
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

/// Renders the notes page: form, notices, note table and sign-out action
#[derive(Debug)]
pub struct HtmlPresenter {
    title: String,
}

impl Default for HtmlPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self {
            title: "My Notes".to_string(),
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn render_form(&self, page: &NotesPage<'_>) -> String {
        let (submit_label, editing, cancel) = match page.edit_state {
            EditState::None => ("Create Note", String::new(), String::new()),
            EditState::Editing(id) => (
                "Update Note",
                format!(
                    r#"<input type="hidden" name="id" value="{}">"#,
                    encode_double_quoted_attribute(id.as_str())
                ),
                r#"<button type="reset" class="warning">Cancel</button>"#.to_string(),
            ),
        };

        format!(
            r#"<form class="note-form" method="post" enctype="multipart/form-data">
        {editing}
        <input name="name" placeholder="Note Name" aria-label="Note Name" required value="{name}">
        <input name="description" placeholder="Note Description" aria-label="Note Description" required value="{description}">
        <input name="image" type="file" accept="image/*" aria-label="Note Image">
        <button type="submit" class="primary">{submit_label}</button>
        {cancel}
    </form>"#,
            editing = editing,
            name = encode_double_quoted_attribute(&page.form.name),
            description = encode_double_quoted_attribute(&page.form.description),
            submit_label = submit_label,
            cancel = cancel,
        )
    }

    fn render_notices(&self, page: &NotesPage<'_>) -> String {
        page.notices
            .iter()
            .map(|notice| {
                let class = match notice.level {
                    NoticeLevel::Warning => "notice warning",
                    NoticeLevel::Error => "notice error",
                };
                format!(
                    r#"<div class="{}" data-notice-id="{}">{}</div>"#,
                    class,
                    notice.id,
                    encode_text(&notice.message)
                )
            })
            .collect::<Vec<_>>()
            .join("\n    ")
    }

    fn render_image_cell(&self, row: &NoteRow) -> String {
        match &row.image {
            ImageDisplay::None => String::new(),
            ImageDisplay::Url(url) => format!(
                r#"<img src="{}" alt="{}">"#,
                encode_double_quoted_attribute(url),
                encode_double_quoted_attribute(&row.note.name)
            ),
            ImageDisplay::Unavailable => {
                r#"<span class="image-unavailable">image unavailable</span>"#.to_string()
            }
        }
    }

    fn render_row(&self, row: &NoteRow, edit_state: &EditState) -> String {
        let editing = matches!(edit_state, EditState::Editing(id) if id == row.id());
        let id = encode_double_quoted_attribute(row.id().as_str());
        format!(
            r#"<tr data-note-id="{id}"{class}>
            <td>{name}</td>
            <td>{description}</td>
            <td>{image}</td>
            <td><button class="link" data-action="edit" data-note-id="{id}">Edit</button></td>
            <td><button class="link" data-action="delete" data-note-id="{id}">Delete</button></td>
        </tr>"#,
            id = id,
            class = if editing { r#" class="editing""# } else { "" },
            name = encode_text(&row.note.name),
            description = encode_text(&row.note.description),
            image = self.render_image_cell(row),
        )
    }

    #[instrument(level = "debug", skip(self, page), fields(rows = page.rows.len()))]
    pub fn render(&self, page: &NotesPage<'_>) -> String {
        let rows = page
            .rows
            .iter()
            .map(|row| self.render_row(row, page.edit_state))
            .collect::<Vec<_>>()
            .join("\n        ");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            max-width: 960px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }}
        .navbar {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            border-bottom: 1px solid #dee2e6;
        }}
        .note-form {{
            display: flex;
            gap: 8px;
            justify-content: center;
            margin: 3rem 0;
        }}
        .notice {{
            padding: 8px 12px;
            border-radius: 4px;
            margin: 4px 0;
        }}
        .notice.warning {{ background: #fff3cd; }}
        .notice.error {{ background: #f8d7da; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ text-align: left; padding: 6px; border-bottom: 1px solid #e9ecef; }}
        tr.editing {{ background: #e7f1ff; }}
        td img {{ max-width: 120px; }}
        .image-unavailable {{ color: #6c757d; font-style: italic; }}
    </style>
</head>
<body>
    <nav class="navbar">
        <h1>{title}</h1>
        <span class="user">{username}</span>
    </nav>
    {notices}
    {form}
    <h2>Current Notes</h2>
    <table>
        <thead>
            <tr>
                <th>Name</th>
                <th>Description</th>
                <th>Image</th>
                <th>Edit</th>
                <th>Delete</th>
            </tr>
        </thead>
        <tbody>
        {rows}
        </tbody>
    </table>
    <form method="post" action="sign-out">
        <button type="submit">Sign Out</button>
    </form>
</body>
</html>"#,
            title = encode_text(&self.title),
            username = encode_text(page.username),
            notices = self.render_notices(page),
            form = self.render_form(page),
            rows = rows,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Notice, NoteForm};
    use crate::domain::{Note, NoteId};

    fn row(id: &str, name: &str, image: ImageDisplay) -> NoteRow {
        NoteRow {
            note: Note {
                id: NoteId::new(id),
                name: name.to_string(),
                description: format!("{} description", name),
                image: None,
            },
            image,
        }
    }

    #[test]
    fn given_user_text_when_rendering_then_escapes_markup() {
        let presenter = HtmlPresenter::new();
        let rows = vec![row("1", "<script>alert(1)</script>", ImageDisplay::None)];
        let form = NoteForm::default();
        let page = NotesPage {
            username: "alice",
            rows: &rows,
            edit_state: &EditState::None,
            form: &form,
            notices: &[],
        };

        let html = presenter.render(&page);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn given_editing_state_when_rendering_then_shows_update_and_cancel() {
        let presenter = HtmlPresenter::new();
        let rows = vec![row("1", "X", ImageDisplay::None)];
        let form = NoteForm {
            name: "X".to_string(),
            description: "say \"hi\"".to_string(),
            image: None,
        };
        let state = EditState::Editing(NoteId::new("1"));
        let page = NotesPage {
            username: "alice",
            rows: &rows,
            edit_state: &state,
            form: &form,
            notices: &[],
        };

        let html = presenter.render(&page);

        assert!(html.contains("Update Note"));
        assert!(html.contains("Cancel"));
        assert!(html.contains(r#"class="editing""#));
        assert!(html.contains(r#"value="say &quot;hi&quot;""#));
        assert!(!html.contains("Create Note"));
    }

    #[test]
    fn given_image_states_when_rendering_then_draws_each_cell() {
        let presenter = HtmlPresenter::new();
        let rows = vec![
            row("1", "Cat", ImageDisplay::Url("file:///tmp/Cat".to_string())),
            row("2", "Dog", ImageDisplay::Unavailable),
        ];
        let form = NoteForm::default();
        let notices = vec![Notice {
            id: 3,
            level: NoticeLevel::Error,
            message: "Storage error: gone".to_string(),
        }];
        let page = NotesPage {
            username: "alice",
            rows: &rows,
            edit_state: &EditState::None,
            form: &form,
            notices: &notices,
        };

        let html = presenter.render(&page);

        assert!(html.contains(r#"<img src="file:///tmp/Cat" alt="Cat">"#));
        assert!(html.contains("image unavailable"));
        assert!(html.contains(r#"data-notice-id="3""#));
        assert!(html.contains("Sign Out"));
    }
}
