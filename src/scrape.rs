//! Offline extraction of the foreign-name table from a saved reference page.
//!
//! The page lists one pokemon per table row of eight cells: the foreign name
//! sits in the second cell and the English name in the third.

use scraper::{Html, Selector};
use tracing::warn;

use crate::translation::TranslationTable;

pub const CELLS_PER_ROW: usize = 8;
const FOREIGN_CELL: usize = 1;
const ENGLISH_CELL: usize = 2;

pub fn extract_translations(html: &str) -> TranslationTable {
    let document = Html::parse_document(html);
    let mut table = TranslationTable::default();

    let Ok(cell_selector) = Selector::parse("td") else {
        return table;
    };
    let cells: Vec<String> = document
        .select(&cell_selector)
        .map(|el| el.text().collect::<String>())
        .collect();

    let rows = cells.chunks_exact(CELLS_PER_ROW);
    let leftover = rows.remainder().len();
    for (row, chunk) in rows.enumerate() {
        let foreign = strip_newline(&chunk[FOREIGN_CELL]);
        let english = canonical_name(strip_newline(&chunk[ENGLISH_CELL]));
        if foreign.is_empty() || english.is_empty() {
            warn!(row, cell = %chunk[0].trim(), "skipping row without a name pair");
            continue;
        }
        table.insert(foreign.to_string(), english);
    }
    if leftover > 0 {
        warn!(cells = leftover, "ignoring trailing cells that do not fill a row");
    }

    table
}

fn strip_newline(cell: &str) -> &str {
    cell.strip_suffix('\n').unwrap_or(cell)
}

/// Spell an English display name the way the catalog does,
/// e.g. `Mr. Mime` -> `mr-mime`, `Farfetch'd` -> `farfetchd`.
pub fn canonical_name(english: &str) -> String {
    let mut out = String::with_capacity(english.len());
    for c in english.trim().chars().flat_map(char::to_lowercase) {
        match c {
            '.' | '\'' | '’' | ':' => {}
            'é' => out.push('e'),
            '♀' => out.push_str("-f"),
            '♂' => out.push_str("-m"),
            c if c.is_whitespace() || c == '-' => {
                if !out.is_empty() && !out.ends_with('-') {
                    out.push('-');
                }
            }
            c => out.push(c),
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
