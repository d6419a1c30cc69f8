//! Fixed-width plain-text table layout shared by the report renderers.

use std::fmt;

/// A row in a [`TextTable`].
#[derive(Debug, Clone)]
enum Row {
    Cells(Vec<String>),
    Rule(char),
}

/// Column-aligned text table: first column left-aligned, the rest right-aligned.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    rows: Vec<Row>,
}

impl TextTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .push(Row::Cells(cells.into_iter().map(Into::into).collect()));
        self
    }

    /// A horizontal rule spanning the full table width.
    pub fn push_rule(&mut self, ch: char) -> &mut Self {
        self.rows.push(Row::Rule(ch));
        self
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in &self.rows {
            if let Row::Cells(cells) = row {
                for (j, cell) in cells.iter().enumerate() {
                    let w = cell.chars().count();
                    if j >= widths.len() {
                        widths.push(w);
                    } else {
                        widths[j] = widths[j].max(w);
                    }
                }
            }
        }
        widths
    }
}

const GAP: usize = 2;

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let total = widths.iter().sum::<usize>() + GAP * widths.len().saturating_sub(1);

        for row in &self.rows {
            match row {
                Row::Rule(ch) => writeln!(f, "{}", ch.to_string().repeat(total))?,
                Row::Cells(cells) => {
                    let mut line = String::new();
                    for (j, width) in widths.iter().enumerate() {
                        let cell = cells.get(j).map(String::as_str).unwrap_or("");
                        let pad = width.saturating_sub(cell.chars().count());
                        if j == 0 {
                            line.push_str(cell);
                            line.push_str(&" ".repeat(pad));
                        } else {
                            line.push_str(&" ".repeat(GAP + pad));
                            line.push_str(cell);
                        }
                    }
                    writeln!(f, "{}", line.trim_end())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment() {
        let mut table = TextTable::new();
        table.push_row(["name", "value"]);
        table.push_rule('-');
        table.push_row(["a", "1.5"]);
        table.push_row(["longer", "10.25"]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "name    value");
        assert_eq!(lines[1], "-------------");
        assert_eq!(lines[2], "a         1.5");
        assert_eq!(lines[3], "longer  10.25");
    }

    #[test]
    fn test_ragged_rows() {
        let mut table = TextTable::new();
        table.push_row(["x", "1", "2"]);
        table.push_row(["y"]);

        let rendered = table.to_string();
        assert_eq!(rendered.lines().nth(1), Some("y"));
    }
}
