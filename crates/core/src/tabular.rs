//! Tabular fallback reconstruction.
//!
//! Corrective branch for documents whose party lists live in a bordered
//! table the linear path cannot read. Works on page geometry instead of the
//! normalized text: pages with enough aligned columns are regrouped into
//! rows, split name rows are rejoined, and the shared name pattern recovers
//! entities per row. A non-empty result replaces the linear lists outright.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::classify::classify;
use crate::model::{Entity, EntityKind, NameOrder, PageGeometry, Role};
use crate::params::PipelineParams;
use crate::patterns::{self, HEADER_TOKENS, NAME_RUN};
use crate::person::{split_person_name, NameOrderStrategy};
use crate::score::name_quality;

/// Outcome of the tabular path. `Unavailable` is an ordinary result, not an
/// error: the caller keeps its linear lists.
#[derive(Debug, Clone, PartialEq)]
pub enum TabularOutcome {
    Applied {
        grantors: Vec<Entity>,
        beneficiaries: Vec<Entity>,
    },
    Unavailable,
}

/// Reconstructs party lists from page geometry.
pub fn reconstruct(pages: &[PageGeometry], params: &PipelineParams) -> TabularOutcome {
    let mut rows: Vec<String> = Vec::new();
    for page in pages.iter().take(params.max_pages) {
        if !has_grid_structure(page, params) {
            debug!(page = page.page, "page has no grid structure, skipping");
            continue;
        }
        rows.extend(page_rows(page, params));
    }
    if rows.is_empty() {
        return TabularOutcome::Unavailable;
    }

    let lines = rejoin_split_rows(&rows);

    let mut grantors: Vec<Entity> = Vec::new();
    let mut beneficiaries: Vec<Entity> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    // Role labels carry over: rows after a "BENEFICIARIO" header belong to
    // beneficiaries until the next label.
    let mut current = Role::Grantors;
    for line in &lines {
        if line.chars().count() < params.min_row_len {
            continue;
        }
        let folded = patterns::fold(line);
        if folded.contains("OTORGANTE")
            || folded.contains("COMPARECIENTE")
            || folded.contains("GRANTOR")
        {
            current = Role::Grantors;
        } else if folded.contains("A FAVOR DE")
            || folded.contains("BENEFICIARI")
            || folded.contains("IN FAVOR OF")
        {
            current = Role::Beneficiaries;
        }
        for name in row_names(&folded, params) {
            if !seen.insert(patterns::dedup_key(&name)) {
                continue;
            }
            let entity = build_entity(name);
            match current {
                Role::Beneficiaries => beneficiaries.push(entity),
                _ => grantors.push(entity),
            }
        }
    }

    if grantors.is_empty() && beneficiaries.is_empty() {
        TabularOutcome::Unavailable
    } else {
        TabularOutcome::Applied { grantors, beneficiaries }
    }
}

/// True when the page's spans align into at least `min_aligned_columns`
/// columns, each shared by more than one span.
fn has_grid_structure(page: &PageGeometry, params: &PipelineParams) -> bool {
    let mut columns: Vec<(f64, usize)> = Vec::new();
    for span in &page.spans {
        match columns
            .iter_mut()
            .find(|(x, _)| (span.x0 - *x).abs() <= params.column_x_tolerance)
        {
            Some((_, count)) => *count += 1,
            None => columns.push((span.x0, 1)),
        }
    }
    columns.iter().filter(|(_, count)| *count >= 2).count() >= params.min_aligned_columns
}

/// Groups a page's spans into rows by vertical position and concatenates
/// each row's non-empty cells left to right.
fn page_rows(page: &PageGeometry, params: &PipelineParams) -> Vec<String> {
    let mut spans: Vec<_> = page.spans.iter().filter(|s| !s.text.trim().is_empty()).collect();
    spans.sort_by(|a, b| {
        a.top
            .partial_cmp(&b.top)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut rows: Vec<(f64, Vec<&crate::model::TextSpan>)> = Vec::new();
    for span in spans {
        match rows.last_mut() {
            Some((top, cells)) if (span.top - *top).abs() <= params.row_y_tolerance => {
                cells.push(span);
            }
            _ => rows.push((span.top, vec![span])),
        }
    }

    rows.into_iter()
        .take(params.max_rows_per_page)
        .map(|(_, mut cells)| {
            cells.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));
            cells
                .iter()
                .map(|s| s.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|row| !row.is_empty())
        .collect()
}

/// Rejoins rows the table split mid-name: a two-word row absorbs a
/// following short all-word row.
pub fn rejoin_split_rows(rows: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(rows.len());
    let mut i = 0;
    while i < rows.len() {
        let cur = rows[i].trim();
        if i + 1 < rows.len() {
            let next = rows[i + 1].trim();
            if word_count_in(cur, 2, 2) && word_count_in(next, 1, 2) {
                out.push(format!("{cur} {next}"));
                i += 2;
                continue;
            }
        }
        if !cur.is_empty() {
            out.push(cur.to_string());
        }
        i += 1;
    }
    out
}

fn word_count_in(s: &str, min: usize, max: usize) -> bool {
    let words: Vec<&str> = s.split_whitespace().collect();
    (min..=max).contains(&words.len()) && words.iter().all(|w| w.chars().count() >= 2)
}

/// Names recovered from one folded row: headers stripped, the shared name
/// pattern applied, role vocabulary excluded, capped per row.
fn row_names(folded_row: &str, params: &PipelineParams) -> Vec<String> {
    let mut text = folded_row.to_string();
    for header in HEADER_TOKENS.iter() {
        text = header.replace_all(&text, " ").into_owned();
    }
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out: Vec<String> = Vec::new();
    for m in NAME_RUN.find_iter(&text) {
        let cand = m.as_str().trim().to_string();
        if cand.is_empty()
            || ["FAVOR", "BENEFICIARI", "NOTARIO", "OTORGANTE", "GRANTOR"]
                .iter()
                .any(|x| cand.contains(x))
        {
            continue;
        }
        if !out.contains(&cand) {
            out.push(cand);
        }
        if out.len() >= params.max_row_names {
            break;
        }
    }
    out
}

fn build_entity(name: String) -> Entity {
    let kind = classify(&name);
    let confidence = name_quality(&name);
    let (surname, given_names, detected_order) = match kind {
        EntityKind::Natural => {
            let parts = split_person_name(&name, NameOrderStrategy::Lenient);
            (parts.surname, parts.given_names, parts.order)
        }
        EntityKind::Juridica => (String::new(), String::new(), NameOrder::Unknown),
    };
    Entity {
        name,
        kind,
        representatives: Vec::new(),
        surname,
        given_names,
        detected_order,
        confidence,
    }
}
