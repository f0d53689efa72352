//! Natural-person vs. legal-entity classification.

use crate::model::EntityKind;
use crate::patterns::{self, CORPORATE_MARKERS};

/// Classifies a cleaned name.
///
/// A name is `Juridica` when it contains a corporate or institutional
/// marker as a whole word, case- and accent-insensitive. Word-boundary
/// matching is load-bearing: "PATRICIA" contains the letters of "CIA" but
/// names a person.
pub fn classify(name: &str) -> EntityKind {
    if CORPORATE_MARKERS.is_match(&patterns::fold(name)) {
        EntityKind::Juridica
    } else {
        EntityKind::Natural
    }
}
