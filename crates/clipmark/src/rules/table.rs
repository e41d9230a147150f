//! Table rule: HTML tables become pipe tables with the first row as header.

use super::Rule;
use crate::context::Context;
use crate::convert::Converter;
use crate::node::Node;
use crate::utilities::{replace_newlines, tidy_inline, CELL_BREAK};

/// Upper bound on `colspan`, as browsers clamp it
const MAX_COLSPAN: usize = 1000;

pub(super) fn rules() -> Vec<Rule> {
    vec![table_rule()]
}

fn table_rule() -> Rule {
    Rule::for_tag("table", |conv, node, ctx| {
        if ctx.in_table_cell() {
            return format!(" {} ", conv.convert_children(node, ctx));
        }

        let matrix = TableMatrix::new(
            table_rows(node)
                .into_iter()
                .map(|row| convert_row(conv, row, ctx))
                .filter(|cells| !cells.is_empty())
                .collect(),
        );
        if matrix.is_empty() {
            return String::new();
        }
        format!("\n\n{}\n\n", matrix.render())
    })
}

/// Rectangular grid of converted cell contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMatrix {
    rows: Vec<Vec<String>>,
    columns: usize,
}

impl TableMatrix {
    /// Build a matrix, padding short rows with empty cells
    pub fn new(mut rows: Vec<Vec<String>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(columns, String::new());
        }
        Self { rows, columns }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns == 0
    }

    /// Header row, separator row, then the remaining rows
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        for (i, row) in self.rows.iter().enumerate() {
            lines.push(format_row(row.iter().map(String::as_str)));
            if i == 0 {
                lines.push(format_row(std::iter::repeat("---").take(self.columns)));
            }
        }
        lines.join("\n")
    }
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    format!("| {} |", cells.collect::<Vec<_>>().join(" | "))
}

/// Rows directly under the table or under its row groups
fn table_rows(table: &Node) -> Vec<&Node> {
    let mut rows = Vec::new();
    for child in table.element_children() {
        match child.tag_name().as_str() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => {
                rows.extend(child.element_children().filter(|c| c.tag_name() == "tr"))
            }
            _ => {}
        }
    }
    rows
}

fn convert_row(conv: &Converter<'_>, row: &Node, ctx: &Context) -> Vec<String> {
    let mut cells = Vec::new();
    for cell in row.element_children() {
        let tag = cell.tag_name();
        if tag != "td" && tag != "th" {
            continue;
        }
        cells.push(convert_cell(conv, cell, ctx));

        let span = cell
            .attr("colspan")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_COLSPAN);
        cells.extend(std::iter::repeat(String::new()).take(span - 1));
    }
    cells
}

/// Cell content on a single line, with pipes escaped
fn convert_cell(conv: &Converter<'_>, cell: &Node, ctx: &Context) -> String {
    let content = tidy_inline(&conv.convert_children(cell, &ctx.table_cell()));
    replace_newlines(&content, CELL_BREAK).replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::rules::Rules;
    use crate::utilities::strip_markers;

    fn cell(tag: &str, text: &str) -> Node {
        Node::element(tag).with_child(Node::text(text))
    }

    fn convert(node: &Node) -> String {
        let options = Options::default();
        let rules = Rules::new();
        strip_markers(&Converter::new(&options, &rules).convert_node(node, &Context::new()))
    }

    #[test]
    fn test_matrix_pads_rows() {
        let matrix = TableMatrix::new(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ]);
        assert_eq!(matrix.column_count(), 2);
        assert_eq!(matrix.rows()[1], vec!["c".to_string(), String::new()]);
        assert_eq!(matrix.render(), "| a | b |\n| --- | --- |\n| c |  |");
    }

    #[test]
    fn test_table_with_row_groups() {
        let table = Node::element("table")
            .with_child(Node::element("thead").with_child(
                Node::element("tr").with_children([cell("th", "Name"), cell("th", "Score")]),
            ))
            .with_child(Node::element("tbody").with_child(
                Node::element("tr").with_children([cell("td", "Ada"), cell("td", "a|b")]),
            ));

        assert_eq!(
            convert(&table),
            "\n\n| Name | Score |\n| --- | --- |\n| Ada | a\\|b |\n\n"
        );
    }

    #[test]
    fn test_colspan_pads_cells() {
        let wide = Node::element_with_attrs("td", vec![("colspan", "2")]).with_child(Node::text("wide"));
        let table = Node::element("table")
            .with_child(Node::element("tr").with_children([cell("th", "a"), cell("th", "b")]))
            .with_child(Node::element("tr").with_child(wide));

        assert_eq!(convert(&table), "\n\n| a | b |\n| --- | --- |\n| wide |  |\n\n");
    }

    #[test]
    fn test_cell_line_breaks() {
        let td = Node::element("td")
            .with_child(Node::text("one"))
            .with_child(Node::element("br"))
            .with_child(Node::text("two"));
        let table = Node::element("table").with_child(Node::element("tr").with_child(td));

        assert_eq!(convert(&table), "\n\n| one<br>two |\n| --- |\n\n");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(convert(&Node::element("table")), "");
    }
}
