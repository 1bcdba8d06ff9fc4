// src/process/raw_table.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::utils::{clean_cell, column_names};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("static selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));

/// Upper bound on `colspan` so a hostile page cannot blow up a row.
const MAX_COLSPAN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column labels, unique and exactly as wide as every row.
    pub headers: Vec<String>,
    /// Body rows as cell text, in page order.
    pub rows: Vec<Vec<String>>,
}

/// Parse `html` and read the first `<table>` element in document order.
/// Tables hidden inside HTML comments are not elements and never match.
pub fn parse_first_table(html: &str) -> Option<RawTable> {
    let doc = Html::parse_document(html);
    let table = doc.select(&TABLE).next()?;
    Some(read_table(table))
}

fn read_table(table: ElementRef<'_>) -> RawTable {
    // rows of nested tables belong to those tables
    let rows: Vec<ElementRef<'_>> = table
        .select(&ROW)
        .filter(|tr| owning_table(*tr) == Some(table))
        .collect();
    let in_thead: Vec<bool> = rows
        .iter()
        .map(|tr| parent_name(*tr) == Some("thead"))
        .collect();

    // last thead row wins over any over-header rows above it
    let header_idx = match in_thead.iter().rposition(|&h| h) {
        Some(i) => Some(i),
        None if rows.first().map_or(false, |tr| is_header_row(*tr)) => Some(0),
        None => None,
    };
    let header = header_idx.map(|i| expand_cells(rows[i])).unwrap_or_default();

    let mut body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .filter(|(i, tr)| {
            !in_thead[*i] && Some(*i) != header_idx && has_data_cell(**tr) && !repeats_header(**tr)
        })
        .map(|(_, tr)| expand_cells(*tr))
        .collect();

    let width = body.iter().map(Vec::len).max().unwrap_or(0).max(header.len());
    for row in &mut body {
        row.resize(width, String::new());
    }

    RawTable {
        headers: column_names(&header, width),
        rows: body,
    }
}

fn owning_table<'a>(tr: ElementRef<'a>) -> Option<ElementRef<'a>> {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

fn parent_name<'a>(tr: ElementRef<'a>) -> Option<&'a str> {
    tr.parent()
        .and_then(ElementRef::wrap)
        .map(|p| p.value().name())
}

fn cells<'a>(tr: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "td" | "th"))
}

fn is_header_row(tr: ElementRef<'_>) -> bool {
    let mut any = false;
    for cell in cells(tr) {
        if cell.value().name() != "th" {
            return false;
        }
        any = true;
    }
    any
}

fn has_data_cell(tr: ElementRef<'_>) -> bool {
    cells(tr).any(|c| c.value().name() == "td")
}

/// sports-reference repeats the header every so often inside `<tbody>`.
fn repeats_header(tr: ElementRef<'_>) -> bool {
    tr.value().classes().any(|c| c == "thead")
}

fn expand_cells(tr: ElementRef<'_>) -> Vec<String> {
    let mut out = Vec::new();
    for cell in cells(tr) {
        let text = clean_cell(cell.text());
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1)
            .min(MAX_COLSPAN);
        out.extend(std::iter::repeat(text).take(span));
    }
    out
}
