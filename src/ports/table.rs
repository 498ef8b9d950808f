// src/ports/table.rs
use crate::constants::DESCRIPTION_COLUMN_WIDTH;
use crate::domain::{ImageDisplay, NoteRow};
use crate::util::text::{first_line, preview};

const HEADERS: [&str; 4] = ["ID", "NAME", "DESCRIPTION", "IMAGE"];

/// Plain-text rendering of the note list for the terminal
#[derive(Debug)]
pub struct TablePresenter {
    description_width: usize,
}

impl TablePresenter {
    pub fn new() -> Self {
        Self {
            description_width: DESCRIPTION_COLUMN_WIDTH,
        }
    }

    pub fn with_description_width(description_width: usize) -> Self {
        Self { description_width }
    }

    fn cells(&self, row: &NoteRow) -> [String; 4] {
        let image = match &row.image {
            ImageDisplay::None => "-".to_string(),
            ImageDisplay::Url(url) => url.clone(),
            ImageDisplay::Unavailable => "(unavailable)".to_string(),
        };
        [
            row.id().to_string(),
            first_line(&row.note.name),
            preview(&row.note.description, self.description_width),
            image,
        ]
    }

    pub fn render(&self, rows: &[NoteRow]) -> String {
        if rows.is_empty() {
            return "No notes\n".to_string();
        }

        let body: Vec<[String; 4]> = rows.iter().map(|row| self.cells(row)).collect();
        let mut widths = HEADERS.map(|h| h.chars().count());
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header = HEADERS.map(str::to_string);
        for cells in std::iter::once(&header).chain(body.iter()) {
            let line = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| {
                    let pad = width - cell.chars().count();
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl Default for TablePresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, NoteId};

    fn row(id: &str, name: &str, description: &str, image: ImageDisplay) -> NoteRow {
        NoteRow {
            note: Note {
                id: NoteId::new(id),
                name: name.to_string(),
                description: description.to_string(),
                image: None,
            },
            image,
        }
    }

    #[test]
    fn given_no_rows_when_rendering_then_says_so() {
        assert_eq!(TablePresenter::new().render(&[]), "No notes\n");
    }

    #[test]
    fn given_rows_when_rendering_then_aligns_columns() {
        let rows = vec![
            row("1", "Cat", "A cat", ImageDisplay::Url("file:///c".to_string())),
            row("22", "Dog", "A dog\nthat barks", ImageDisplay::Unavailable),
        ];

        let table = TablePresenter::new().render(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID  NAME  DESCRIPTION  IMAGE");
        assert_eq!(lines[1], "1   Cat   A cat        file:///c");
        assert_eq!(lines[2], "22  Dog   A dog …      (unavailable)");
    }

    #[test]
    fn given_long_description_when_rendering_then_truncates_to_width() {
        let rows = vec![row("1", "N", "abcdefghijklmnop", ImageDisplay::None)];

        let table = TablePresenter::with_description_width(8).render(&rows);

        assert!(table.contains("abcdefg…"));
        assert!(!table.contains("abcdefgh"));
    }

    #[test]
    fn given_multiline_name_when_rendering_then_keeps_one_line_per_row() {
        let rows = vec![
            row("1", "Shopping\nlist", "milk", ImageDisplay::None),
            row("2", "  Tabs\tand   spaces", "x", ImageDisplay::None),
        ];

        let table = TablePresenter::new().render(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1   Shopping         milk         -");
        assert_eq!(lines[2], "2   Tabs and spaces  x            -");
    }
}
