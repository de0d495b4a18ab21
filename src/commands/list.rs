//! `animascii list`

use anyhow::Result;

use animascii::animation::LibraryItem;
use animascii::frame::{line_width, pad_line};
use animascii::theme::current_theme;

use super::Session;

const HEADERS: [&str; 5] = ["NAME", "FRAMES", "DIMS", "SIZE", "MODIFIED"];

pub fn handle(session: &Session) -> Result<()> {
    let library = session.open_library()?;
    let theme = current_theme();
    if library.is_empty() {
        println!(
            "{}",
            theme.secondary_text(&format!("No animations in {}", library.dir().display()))
        );
        return Ok(());
    }

    let rows: Vec<[String; 5]> = library.items().iter().map(row).collect();
    let table = format_table(&rows);
    let mut lines = table.lines();
    if let Some(header) = lines.next() {
        println!("{}", theme.accent_text(header));
    }
    for line in lines {
        println!("{}", theme.primary_text(line));
    }
    println!(
        "{}",
        theme.secondary_text(&format!(
            "{} animations in {}",
            library.items().len(),
            library.dir().display()
        ))
    );
    Ok(())
}

fn row(item: &LibraryItem) -> [String; 5] {
    [
        item.name.clone(),
        item.frame_count.to_string(),
        format!("{}x{}", item.width, item.height),
        item.size_human(),
        item.modified_display(),
    ]
}

/// Left-aligned columns separated by two spaces, header first.
fn format_table(rows: &[[String; 5]]) -> String {
    let mut widths = HEADERS.map(line_width);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(line_width(cell));
        }
    }

    let header = HEADERS.map(str::to_string);
    std::iter::once(&header)
        .chain(rows)
        .map(|cells| {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, w)| pad_line(cell, w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_columns_align() {
        let rows = vec![
            ["spinner".to_string(), "4".into(), "1x1".into(), "60 B".into(), "-".into()],
            ["wave".to_string(), "12".into(), "10x3".into(), "1.2 KiB".into(), "-".into()],
        ];
        let table = format_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "NAME     FRAMES  DIMS  SIZE     MODIFIED");
        assert_eq!(lines[1], "spinner  4       1x1   60 B     -");
        assert_eq!(lines[2], "wave     12      10x3  1.2 KiB  -");
    }

    #[test]
    fn row_cells_match_headers() {
        let item = LibraryItem {
            path: "/lib/wave.json".into(),
            name: "wave".into(),
            frame_count: 12,
            width: 10,
            height: 3,
            size_bytes: 2048,
            modified: None,
        };
        let cells = row(&item);
        let cell = |header: &str| cells[HEADERS.iter().position(|h| *h == header).unwrap()].clone();
        assert_eq!(cell("FRAMES"), "12");
        assert_eq!(cell("DIMS"), "10x3");
        assert_eq!(cell("SIZE"), item.size_human());
    }

    #[test]
    fn wide_names_use_display_width() {
        let rows = vec![["日本".to_string(), "1".into(), "1x1".into(), "1 B".into(), "-".into()]];
        let table = format_table(&rows);
        assert_eq!(table.lines().nth(1).unwrap(), "日本  1       1x1   1 B   -");
    }
}
