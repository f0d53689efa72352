//! Rule-based quality validation.
//!
//! Each rule runs independently and emits an advisory issue with a
//! severity-like confidence. Issues are data for the host, never errors;
//! an empty list is a meaningful "nothing flagged" outcome.

use crate::model::{ActProfile, Entity, ValidationIssue};
use crate::patterns::fold;

const SPECIFIC_ACT_KEYWORDS: &[&str] = &[
    "PODER", "POWER", "COMPRAVENTA", "SALE", "DONACION", "DONATION", "TESTAMENTO", "TESTAMENT",
    "PROCURACION", "PROCURATION", "REVOCATORIA", "REVOCATION",
];

/// Runs the validation rule set over an act's fields.
pub fn validate(
    act_type: &str,
    grantors: &[Entity],
    beneficiaries: &[Entity],
    profile: &ActProfile,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if act_type.trim().is_empty() {
        issues.push(ValidationIssue {
            code: "tipo_acto_vacio".to_string(),
            message: "no se pudo identificar el tipo de acto".to_string(),
            field: Some("tipo_acto".to_string()),
            confidence: 0.85,
        });
    }

    if grantors.is_empty() {
        issues.push(ValidationIssue {
            code: "sin_otorgantes".to_string(),
            message: "no se encontraron otorgantes en el documento".to_string(),
            field: Some("otorgantes".to_string()),
            confidence: 0.90,
        });
    }

    if profile.requires_beneficiary && beneficiaries.is_empty() {
        issues.push(ValidationIssue {
            code: "beneficiarios_faltantes".to_string(),
            message: "el acto requiere beneficiarios pero no se encontraron".to_string(),
            field: Some("beneficiarios".to_string()),
            confidence: profile.beneficiary_confidence,
        });
    }

    let folded = fold(act_type);
    if profile.is_generic && !SPECIFIC_ACT_KEYWORDS.iter().any(|k| folded.contains(k)) {
        issues.push(ValidationIssue {
            code: "acto_generico".to_string(),
            message: "tipo de acto generico, revisar manualmente".to_string(),
            field: Some("tipo_acto".to_string()),
            confidence: 0.60,
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityKind, NameOrder};

    fn entity(name: &str) -> Entity {
        Entity {
            name: name.to_string(),
            kind: EntityKind::Natural,
            representatives: Vec::new(),
            surname: String::new(),
            given_names: String::new(),
            detected_order: NameOrder::Unknown,
            confidence: 0.8,
        }
    }

    fn profile(requires: bool, generic: bool) -> ActProfile {
        ActProfile {
            detected_type: String::new(),
            requires_beneficiary: requires,
            beneficiary_confidence: 0.72,
            is_generic: generic,
            possible_multiple_acts: false,
        }
    }

    #[test]
    fn clean_act_has_no_issues() {
        let issues = validate(
            "PODER ESPECIAL",
            &[entity("JUAN PEREZ GOMEZ")],
            &[entity("MARIA TORRES")],
            &profile(true, false),
        );
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn rules_fire_independently() {
        let issues = validate("", &[], &[], &profile(true, true));
        let codes: Vec<&str> = issues.iter().map(|i| i.code.as_str()).collect();
        assert!(codes.contains(&"tipo_acto_vacio"));
        assert!(codes.contains(&"sin_otorgantes"));
        assert!(codes.contains(&"beneficiarios_faltantes"));
        assert!(codes.contains(&"acto_generico"));
    }

    #[test]
    fn missing_beneficiaries_carry_profiler_confidence() {
        let issues = validate("PODER ESPECIAL", &[entity("JUAN PEREZ GOMEZ")], &[], &profile(true, false));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "beneficiarios_faltantes");
        assert_eq!(issues[0].confidence, 0.72);
    }

    #[test]
    fn generic_act_with_specific_keyword_is_not_flagged() {
        let issues = validate(
            "PODER ESPECIAL",
            &[entity("JUAN PEREZ GOMEZ")],
            &[entity("MARIA TORRES")],
            &profile(false, true),
        );
        assert!(issues.is_empty(), "{issues:?}");
    }
}
