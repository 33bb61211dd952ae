use super::{AnnotatedToken, SentenceGraph, TokenId};
use crate::conjunction::Clause;
use crate::root_chunk::Member;
use std::fmt::{self, Write};
use unicode_width::UnicodeWidthStr;

const COLUMN_SEPARATOR: &str = " | ";

fn pad(cell: &str, width: usize) -> String {
    let mut padded = cell.to_string();
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(cell.width())));
    padded
}

fn token_label(token: &AnnotatedToken) -> &'static str {
    token.tag().map_or_else(|| token.pos().label(), |tag| tag.label())
}

fn write_lines(f: &mut fmt::Formatter<'_>, lines: &[String]) -> fmt::Result {
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            f.write_char('\n')?;
        }
        f.write_str(line.trim_end())?;
    }
    Ok(())
}

/// One row per token: text, dependency role, head text, head POS, children.
///
/// ```text
/// text | dep  | head.text | head.pos | children
/// ---------------------------------------------
/// ip4  | ROOT | ip4       | NOUN     | [with]
/// with | prep | ip4       | NOUN     | []
/// ```
pub struct TreeTableDisplay<'a> {
    graph: &'a SentenceGraph,
}

impl<'a> TreeTableDisplay<'a> {
    pub fn new(graph: &'a SentenceGraph) -> Self {
        Self { graph }
    }
}

impl<'a> fmt::Display for TreeTableDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = ["text", "dep", "head.text", "head.pos", "children"];
        let rows: Vec<[String; 5]> = self
            .graph
            .tokens()
            .iter()
            .map(|token| {
                let head = &self.graph[token.head()];
                let children: Vec<&str> = token
                    .children()
                    .iter()
                    .map(|&child| self.graph[child].text())
                    .collect();
                [
                    token.text().to_string(),
                    token.dep().to_string(),
                    head.text().to_string(),
                    head.pos().label().to_string(),
                    format!("[{}]", children.join(", ")),
                ]
            })
            .collect();

        let mut widths = header.map(|cell: &str| cell.width());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.width());
            }
        }

        let render = |cells: [&str; 5]| {
            let mut line = String::new();
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    line.push_str(COLUMN_SEPARATOR);
                }
                if i + 1 == cells.len() {
                    line.push_str(cell);
                } else {
                    line.push_str(&pad(cell, widths[i]));
                }
            }
            line
        };

        let header_line = render(header);
        let mut lines = vec![header_line.clone(), "-".repeat(header_line.trim_end().width())];
        for row in &rows {
            lines.push(render([
                row[0].as_str(),
                row[1].as_str(),
                row[2].as_str(),
                row[3].as_str(),
                row[4].as_str(),
            ]));
        }
        write_lines(f, &lines)
    }
}

/// The dependency tree, one token per line as `text_TAG`, children indented.
pub struct TreeDisplay<'a> {
    graph: &'a SentenceGraph,
}

impl<'a> TreeDisplay<'a> {
    pub fn new(graph: &'a SentenceGraph) -> Self {
        Self { graph }
    }
}

impl<'a> fmt::Display for TreeDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.graph.root() else {
            return Ok(());
        };

        let mut lines = Vec::with_capacity(self.graph.len());
        let mut stack: Vec<(TokenId, usize)> = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            let token = &self.graph[id];
            lines.push(format!(
                "{}{}_{}",
                "  ".repeat(depth),
                token.text(),
                token_label(token)
            ));
            stack.extend(token.children().iter().rev().map(|&child| (child, depth + 1)));
        }
        write_lines(f, &lines)
    }
}

/// One line per clause: members, then root text, role, POS and head text.
pub struct ClausesDisplay<'a> {
    graph: &'a SentenceGraph,
    clauses: &'a [Clause],
}

impl<'a> ClausesDisplay<'a> {
    pub fn new(graph: &'a SentenceGraph, clauses: &'a [Clause]) -> Self {
        Self { graph, clauses }
    }
}

impl<'a> fmt::Display for ClausesDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .clauses
            .iter()
            .map(|clause| {
                let members = clause.member_texts(self.graph).join(", ");
                let root = match clause.root {
                    Member::Token(id) => {
                        let token = &self.graph[id];
                        [
                            token.text(),
                            token.dep().as_str(),
                            token.pos().label(),
                            self.graph[token.head()].text(),
                        ]
                        .join(COLUMN_SEPARATOR)
                    }
                    Member::Unresolved { .. } => ["?", "-", "-", "-"].join(COLUMN_SEPARATOR),
                };
                format!("[{}]{}{}", members, COLUMN_SEPARATOR, root)
            })
            .collect();
        write_lines(f, &lines)
    }
}
