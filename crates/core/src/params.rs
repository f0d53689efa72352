//! Pipeline tuning parameters.
//!
//! Contains PipelineParams, the read-only configuration consulted by every
//! stage. The defaults are calibrated against a corpus of scanned notarial
//! extracts; changing them without validation data will shift accept/reject
//! behavior across the whole pipeline.

use crate::person::NameOrderStrategy;

/// Parameters controlling the extraction pipeline.
///
/// All thresholds are calibrated behavior, not incidental values.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParams {
    /// Minimum normalized-text length below which the document is rejected
    /// as unprocessable.
    pub min_text_len: usize,

    /// Minimum number of non-space characters a section window must contain
    /// to be accepted from a label pattern.
    pub min_window_chars: usize,

    /// Stop-word ratio above which a candidate is rejected on the tightened
    /// (linear extraction) path.
    pub stop_ratio_tight: f64,

    /// Stop-word ratio for the legacy/tabular path.
    pub stop_ratio_legacy: f64,

    /// Minimum cleaned candidate length on the legacy path.
    pub min_candidate_len: usize,

    /// Minimum cleaned candidate length for strict callers.
    pub strict_candidate_len: usize,

    /// Default cap on candidates returned per window.
    pub max_candidates: usize,

    /// Hard upper bound on candidates regardless of caller request.
    pub max_candidates_cap: usize,

    /// A line shorter than this may be a name fragment split by a page or
    /// column break.
    pub fragment_line_max: usize,

    /// Maximum length of the continuation line a fragment may absorb.
    pub fragment_next_max: usize,

    /// Maximum word count for a line to qualify as a fragment.
    pub fragment_max_words: usize,

    /// Rows shorter than this are discarded by the tabular reconstructor.
    pub min_row_len: usize,

    /// Maximum names recovered from a single table row.
    pub max_row_names: usize,

    /// Maximum pages consumed by the tabular reconstructor.
    pub max_pages: usize,

    /// Maximum rows reconstructed per page.
    pub max_rows_per_page: usize,

    /// Vertical tolerance when grouping spans into table rows, in page units.
    pub row_y_tolerance: f64,

    /// Horizontal tolerance when clustering spans into columns.
    pub column_x_tolerance: f64,

    /// Minimum aligned columns for a page to count as grid-structured.
    pub min_aligned_columns: usize,

    /// Surname/given-name splitting strategy for the linear path.
    pub name_order: NameOrderStrategy,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            min_text_len: 20,
            min_window_chars: 10,
            stop_ratio_tight: 0.3,
            stop_ratio_legacy: 0.4,
            min_candidate_len: 4,
            strict_candidate_len: 6,
            max_candidates: 10,
            max_candidates_cap: 15,
            fragment_line_max: 30,
            fragment_next_max: 50,
            fragment_max_words: 3,
            min_row_len: 4,
            max_row_names: 6,
            max_pages: 8,
            max_rows_per_page: 200,
            row_y_tolerance: 8.0,
            column_x_tolerance: 30.0,
            min_aligned_columns: 3,
            name_order: NameOrderStrategy::Strict,
        }
    }
}
