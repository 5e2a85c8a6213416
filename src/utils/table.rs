//! Plain fixed-width table rendering for the `list` output.

pub struct Column {
    pub header: &'static str,
    pub width: usize,
}

impl Column {
    pub fn new(header: &'static str, width: usize) -> Self {
        Self { header, width }
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for col in &self.columns {
            out.push_str(&format!("{:<w$}  ", col.header, w = col.width));
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push_str("  ");
        }
        out.push('\n');

        for row in &self.rows {
            for (cell, col) in row.iter().zip(&self.columns) {
                out.push_str(&format!("{:<w$}  ", cell, w = col.width));
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_separator_and_rows() {
        let mut t = Table::new(vec![Column::new("member", 8), Column::new("status", 7)]);
        t.add_row(vec!["m-001".into(), "present".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("member"));
        assert!(lines[1].starts_with("--------"));
        assert!(lines[2].contains("m-001"));
    }
}
