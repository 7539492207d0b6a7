// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;

use colored::Colorize;
use things_cloud_core::{Status, TodoItem};

/// Renders to-dos as one line each: status glyph, id, title, list markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoFormatter;

impl TodoFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(
        &self,
        w: &mut impl io::Write,
        todos: &[&TodoItem],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for todo in todos {
            writeln!(w, "{}", self.line(todo))?;
        }
        Ok(())
    }

    fn line(&self, todo: &TodoItem) -> String {
        let glyph = match todo.status() {
            Status::Todo => "☐".normal(),
            Status::Complete => "☑".green(),
            Status::Cancelled => "✕".red(),
        };
        let mut line = format!("{glyph} {} {}", todo.id().as_str().dimmed(), todo.title());
        if todo.trashed() {
            line.push_str(&format!(" {}", "[trash]".red()));
        } else if todo.is_evening() {
            line.push_str(&format!(" {}", "[evening]".blue()));
        } else if todo.is_today() {
            line.push_str(&format!(" {}", "[today]".yellow()));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use things_cloud_core::Clock;

    #[test]
    fn writes_one_line_per_todo() {
        colored::control::set_override(false);

        let mut a = TodoItem::new(Clock::system());
        a.set_title("first");
        let mut b = TodoItem::new(Clock::system());
        b.set_title("second");
        b.complete().unwrap();

        let mut out = Vec::new();
        TodoFormatter::new()
            .write(&mut out, &[&a, &b])
            .expect("write should succeed");

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
        assert!(lines[1].starts_with('☑'));
    }
}
