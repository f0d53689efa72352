//! Person name normalization.
//!
//! Splits a natural person's full name into surname and given-name parts
//! using Hispanic naming conventions. Two heuristics survive from field use
//! as named strategies: `Strict` consults a curated given-name list to
//! detect token ordering and is the pipeline default; `Lenient` assumes
//! surname-first and is used by the tabular fallback, where rows already
//! carry that ordering. Neither is ever applied to juridical entities.

use crate::model::NameOrder;
use crate::patterns::{self, GIVEN_NAMES, PARTICLES, PARTICLE_ARTICLES};

/// Surname/given-name splitting heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameOrderStrategy {
    /// Consult the curated given-name list to detect ordering.
    #[default]
    Strict,
    /// Assume surname-first, particle-aware. Used for tabular rows.
    Lenient,
}

/// The outcome of splitting a person name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub surname: String,
    pub given_names: String,
    pub order: NameOrder,
}

/// Merges connector particles with the token(s) they govern, so that
/// "JUAN DE LA TORRE PEREZ" chunks as ["JUAN", "DE LA TORRE", "PEREZ"].
///
/// A particle followed by an article absorbs two tokens; a bare particle
/// absorbs one. A trailing particle with nothing after it stays alone.
pub fn merge_connector_chunks(tokens: &[&str]) -> Vec<String> {
    let mut chunks = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let tok = tokens[i];
        if PARTICLES.contains(patterns::fold(tok).as_str()) && i + 1 < tokens.len() {
            if i + 2 < tokens.len()
                && PARTICLE_ARTICLES.contains(patterns::fold(tokens[i + 1]).as_str())
            {
                chunks.push(format!("{tok} {} {}", tokens[i + 1], tokens[i + 2]));
                i += 3;
            } else {
                chunks.push(format!("{tok} {}", tokens[i + 1]));
                i += 2;
            }
        } else {
            chunks.push(tok.to_string());
            i += 1;
        }
    }
    chunks
}

/// Splits `name` into surname and given names under `strategy`.
pub fn split_person_name(name: &str, strategy: NameOrderStrategy) -> NameParts {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let chunks = merge_connector_chunks(&tokens);
    match strategy {
        NameOrderStrategy::Strict => split_strict(&chunks),
        NameOrderStrategy::Lenient => split_lenient(&chunks),
    }
}

fn split_strict(chunks: &[String]) -> NameParts {
    if chunks.len() < 2 {
        return NameParts {
            surname: String::new(),
            given_names: chunks.join(" "),
            order: NameOrder::Unknown,
        };
    }
    if chunks.len() >= 4 {
        let given_like = |c: &String| GIVEN_NAMES.contains(patterns::fold(c).as_str());
        let n = chunks.len();
        let head_given = given_like(&chunks[0]) && given_like(&chunks[1]);
        let tail_given = given_like(&chunks[n - 2]) && given_like(&chunks[n - 1]);
        if head_given && !tail_given {
            return NameParts {
                surname: chunks[n - 2..].join(" "),
                given_names: chunks[..n - 2].join(" "),
                order: NameOrder::GivenFirst,
            };
        }
        if tail_given && !head_given {
            return NameParts {
                surname: chunks[..2].join(" "),
                given_names: chunks[2..].join(" "),
                order: NameOrder::SurnameFirst,
            };
        }
    }
    if chunks.len() >= 3 {
        return NameParts {
            surname: chunks[..2].join(" "),
            given_names: chunks[2..].join(" "),
            order: NameOrder::SurnameFirst,
        };
    }
    NameParts {
        surname: chunks[0].clone(),
        given_names: chunks[1].clone(),
        order: NameOrder::Unknown,
    }
}

fn split_lenient(chunks: &[String]) -> NameParts {
    match chunks.len() {
        0 => NameParts {
            surname: String::new(),
            given_names: String::new(),
            order: NameOrder::Unknown,
        },
        1 => NameParts {
            surname: String::new(),
            given_names: chunks[0].clone(),
            order: NameOrder::Unknown,
        },
        2 => NameParts {
            surname: chunks[0].clone(),
            given_names: chunks[1].clone(),
            order: NameOrder::Unknown,
        },
        _ => NameParts {
            surname: chunks[..2].join(" "),
            given_names: chunks[2..].join(" "),
            order: NameOrder::SurnameFirst,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_stay_attached() {
        let chunks = merge_connector_chunks(&["JUAN", "DE", "LA", "TORRE", "PEREZ"]);
        assert_eq!(chunks, vec!["JUAN", "DE LA TORRE", "PEREZ"]);
    }

    #[test]
    fn two_token_particle_merges() {
        let chunks = merge_connector_chunks(&["SAN", "MARTIN", "LUCIA"]);
        assert_eq!(chunks, vec!["SAN MARTIN", "LUCIA"]);
    }

    #[test]
    fn trailing_particle_stands_alone() {
        let chunks = merge_connector_chunks(&["TORRES", "DE"]);
        assert_eq!(chunks, vec!["TORRES", "DE"]);
    }

    #[test]
    fn strict_detects_given_first_order() {
        let parts = split_person_name("MARIA FERNANDA TORRES VILLACIS", NameOrderStrategy::Strict);
        assert_eq!(parts.order, NameOrder::GivenFirst);
        assert_eq!(parts.surname, "TORRES VILLACIS");
        assert_eq!(parts.given_names, "MARIA FERNANDA");
    }

    #[test]
    fn strict_detects_surname_first_order() {
        let parts = split_person_name("TORRES VILLACIS MARIA FERNANDA", NameOrderStrategy::Strict);
        assert_eq!(parts.order, NameOrder::SurnameFirst);
        assert_eq!(parts.surname, "TORRES VILLACIS");
        assert_eq!(parts.given_names, "MARIA FERNANDA");
    }

    #[test]
    fn strict_three_chunks_fall_back_to_surname_first() {
        let parts = split_person_name("GOMEZ PEREZ RAUL", NameOrderStrategy::Strict);
        assert_eq!(parts.order, NameOrder::SurnameFirst);
        assert_eq!(parts.surname, "GOMEZ PEREZ");
        assert_eq!(parts.given_names, "RAUL");
    }

    #[test]
    fn strict_two_chunks_are_order_unknown() {
        let parts = split_person_name("GOMEZ RAUL", NameOrderStrategy::Strict);
        assert_eq!(parts.order, NameOrder::Unknown);
        assert_eq!(parts.surname, "GOMEZ");
        assert_eq!(parts.given_names, "RAUL");
    }

    #[test]
    fn single_chunk_has_no_surname() {
        let parts = split_person_name("MADONNA", NameOrderStrategy::Strict);
        assert_eq!(parts.surname, "");
        assert_eq!(parts.given_names, "MADONNA");
        assert_eq!(parts.order, NameOrder::Unknown);
    }

    #[test]
    fn lenient_keeps_particle_surname_whole() {
        let parts = split_person_name("DE LA TORRE GOMEZ JUAN CARLOS", NameOrderStrategy::Lenient);
        assert_eq!(parts.surname, "DE LA TORRE GOMEZ");
        assert_eq!(parts.given_names, "JUAN CARLOS");
        assert_eq!(parts.order, NameOrder::SurnameFirst);
    }
}
