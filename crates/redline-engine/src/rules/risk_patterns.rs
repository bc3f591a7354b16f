//! High-risk legal phrase patterns and the risk assessment built on them
//!
//! Patterns are tested in table order against both sides of a change. The
//! first pattern that matches exactly one side decides the verdict: a
//! pattern only in the new text was *introduced*, one only in the original
//! was *removed*. Changes that hit no pattern fall back on per-type defaults.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{ChangeType, Severity};

use crate::similarity::{similarity, whitespace_normalized_eq};

#[derive(Debug)]
pub struct RiskPattern {
    pub id: &'static str,
    pub level: Severity,
    pub pattern: Regex,
    pub description: &'static str,
}

lazy_static! {
    static ref RISK_PATTERNS: Vec<RiskPattern> = vec![
        RiskPattern {
            id: "unlimited_liability",
            level: Severity::Critical,
            pattern: Regex::new(r"(?i)\bsınırsız\s+(?:sorumlu|tazmin)\w*|\bunlimited\s+liability\b|\bwithout\s+(?:any\s+)?limitation\s+of\s+liability\b").unwrap(),
            description: "unlimited liability",
        },
        RiskPattern {
            id: "unilateral_termination",
            level: Severity::Critical,
            pattern: Regex::new(r"(?i)\btek\s+taraflı\s+(?:olarak\s+)?fes(?:ih|h\w*)|\bsebep\s+göstermeksizin\s+fes\w*|\bunilateral(?:ly)?\s+terminat\w*|\bterminate\s+(?:this\s+agreement\s+)?at\s+(?:any\s+time|will)\b").unwrap(),
            description: "unilateral termination right",
        },
        RiskPattern {
            id: "withdrawal_right_waiver",
            level: Severity::Critical,
            pattern: Regex::new(r"(?i)\bcayma\s+hakk\w*\s+(?:bulunmamaktadır|yoktur|kullanılamaz)|\bcayma\s+hakkından\s+feragat\w*|\bno\s+right\s+of\s+withdrawal\b|\bwaives?\s+(?:the\s+|any\s+)?right\s+(?:of|to)\s+withdraw\w*").unwrap(),
            description: "waiver of the right of withdrawal",
        },
        RiskPattern {
            id: "liability_exclusion",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\bhiçbir\s+(?:şekilde\s+)?sorumlu\w*|\bsorumlu\s+(?:tutulamaz|değildir|olmayacaktır)|\bshall\s+not\s+be\s+liable\b|\bno\s+liability\b").unwrap(),
            description: "exclusion of liability",
        },
        RiskPattern {
            id: "indemnification",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\btüm\s+zararları\w*\s+tazmin\w*|\btazmin\s+etmekle\s+yükümlü\w*|\bindemnify\s+and\s+hold\s+harmless\b|\bshall\s+indemnify\b").unwrap(),
            description: "broad indemnification obligation",
        },
        RiskPattern {
            id: "automatic_renewal",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\b(?:otomatik(?:man)?|kendiliğinden)\s+(?:olarak\s+)?(?:yenilen|uza)\w*|\bautomatic(?:ally)?\s+renew\w*|\bauto-renew\w*").unwrap(),
            description: "automatic renewal",
        },
        RiskPattern {
            id: "perpetual_confidentiality",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\bsüresiz\s+(?:olarak\s+)?gizli\w*|\bgizlilik\s+yükümlülüğü\s+süresiz\w*|\bperpetual\s+confidential\w*|\bconfidential\w*\s+(?:obligations?\s+)?(?:shall\s+)?survive\s+indefinitely\b").unwrap(),
            description: "perpetual confidentiality obligation",
        },
        RiskPattern {
            id: "non_compete_duration",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\brekabet\s+(?:yasağı|etmeme)\D{0,80}\d+\s*(?:yıl|ay)\w*|\b(?:non-compet\w*|not\s+to\s+compete)\D{0,80}\d+\s*(?:years?|months?)\b").unwrap(),
            description: "non-compete restriction with a fixed duration",
        },
        RiskPattern {
            id: "penalty_amount",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\bcezai\s+şart\w*|\bceza\s+(?:bedeli|tutarı)\b|\bliquidated\s+damages\b|\bcontractual\s+penalt\w*|\bpenalty\s+of\b").unwrap(),
            description: "penalty amount",
        },
        RiskPattern {
            id: "unilateral_price_change",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\btek\s+taraflı\s+(?:olarak\s+)?(?:fiyat|ücret|bedel)\w*|\b(?:fiyat|ücret|bedel)\w*\s+tek\s+taraflı\w*|\bsole\s+discretion\s+to\s+(?:change|increase|adjust)\b").unwrap(),
            description: "unilateral price change right",
        },
        RiskPattern {
            id: "ip_assignment",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\bfikri\s+(?:ve\s+sınai\s+)?mülkiyet\s+haklar\w*\s+(?:devr|münhasıran)\w*|\bassigns?\s+all\s+(?:right|intellectual)\w*|\bintellectual\s+property\s+(?:rights\s+)?shall\s+(?:vest|be\s+assigned)\b").unwrap(),
            description: "assignment of intellectual property rights",
        },
        RiskPattern {
            id: "warranty_disclaimer",
            level: Severity::Major,
            pattern: Regex::new(r"(?i)\bgaranti\s+(?:verilmemektedir|vermez|kapsamı\s+dışında\w*)|\bayıptan\s+sorumlu\s+değil\w*|\bas-is\b|\bon\s+an\s+\x22?as\s+is\b|\bwithout\s+(?:any\s+)?warrant\w*").unwrap(),
            description: "warranty disclaimer",
        },
        RiskPattern {
            id: "late_payment_interest",
            level: Severity::Minor,
            pattern: Regex::new(r"(?i)\b(?:gecikme|temerrüt)\s+faizi\w*|\blate\s+payment\s+(?:interest|fee)s?\b").unwrap(),
            description: "late payment interest",
        },
        RiskPattern {
            id: "exclusive_jurisdiction",
            level: Severity::Minor,
            pattern: Regex::new(r"(?i)\bmünhasır(?:an)?\s+yetkili\w*|\bexclusive\s+jurisdiction\b|\bbinding\s+arbitration\b").unwrap(),
            description: "exclusive jurisdiction or mandatory arbitration",
        },
    ];
}

/// Whether a pattern appeared in or disappeared from the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternDirection {
    Introduced,
    Removed,
}

#[derive(Debug, Clone, Copy)]
pub struct PatternHit {
    pub pattern: &'static RiskPattern,
    pub direction: PatternDirection,
}

impl PatternHit {
    pub fn risk_score(&self) -> f64 {
        match (self.direction, self.pattern.level) {
            (PatternDirection::Introduced, Severity::Critical) => 1.0,
            (PatternDirection::Introduced, Severity::Major) => 0.7,
            (PatternDirection::Introduced, _) => 0.4,
            (PatternDirection::Removed, Severity::Critical) => 0.8,
            (PatternDirection::Removed, Severity::Major) => 0.5,
            (PatternDirection::Removed, _) => 0.3,
        }
    }

    pub fn implication(&self) -> String {
        match self.direction {
            PatternDirection::Introduced => format!(
                "Introduces {}; this shifts legal exposure and should be reviewed before acceptance.",
                self.pattern.description
            ),
            PatternDirection::Removed => format!(
                "Removes {}; confirm the deletion is intended and the resulting position is acceptable.",
                self.pattern.description
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskVerdict {
    pub severity: Severity,
    pub risk_score: f64,
    pub implication: Option<String>,
    pub pattern_id: Option<&'static str>,
}

impl RiskVerdict {
    fn plain(severity: Severity, risk_score: f64) -> Self {
        Self {
            severity,
            risk_score,
            implication: None,
            pattern_id: None,
        }
    }
}

/// The table in evaluation order
pub fn patterns() -> &'static [RiskPattern] {
    &RISK_PATTERNS
}

/// First pattern that matches exactly one side
pub fn first_divergent_pattern(original: &str, new: &str) -> Option<PatternHit> {
    patterns().iter().find_map(|pattern| {
        match (pattern.pattern.is_match(original), pattern.pattern.is_match(new)) {
            (false, true) => Some(PatternHit {
                pattern,
                direction: PatternDirection::Introduced,
            }),
            (true, false) => Some(PatternHit {
                pattern,
                direction: PatternDirection::Removed,
            }),
            _ => None,
        }
    })
}

/// Assess the legal risk of one change.
///
/// The similarity used for modified text is computed with the default
/// cut-over; use [`assess_risk_with_similarity`] to supply a known value.
pub fn assess_risk(original: &str, new: &str, change_type: ChangeType) -> RiskVerdict {
    assess(original, new, change_type, || similarity(original, new))
}

pub fn assess_risk_with_similarity(
    original: &str,
    new: &str,
    change_type: ChangeType,
    similarity: f64,
) -> RiskVerdict {
    assess(original, new, change_type, || similarity)
}

fn assess(
    original: &str,
    new: &str,
    change_type: ChangeType,
    similarity: impl FnOnce() -> f64,
) -> RiskVerdict {
    if change_type == ChangeType::Formatting || whitespace_normalized_eq(original, new) {
        return RiskVerdict::plain(Severity::Cosmetic, 0.0);
    }

    if let Some(hit) = first_divergent_pattern(original, new) {
        return RiskVerdict {
            severity: hit.pattern.level,
            risk_score: hit.risk_score(),
            implication: Some(hit.implication()),
            pattern_id: Some(hit.pattern.id),
        };
    }

    match change_type {
        ChangeType::Removed => RiskVerdict::plain(Severity::Major, 0.5),
        ChangeType::Added => RiskVerdict::plain(Severity::Minor, 0.3),
        ChangeType::Modified => {
            let score = similarity();
            if score < 0.3 {
                RiskVerdict::plain(Severity::Major, 0.6)
            } else if score < 0.7 {
                RiskVerdict::plain(Severity::Minor, 0.4)
            } else {
                RiskVerdict::plain(Severity::Cosmetic, 0.1)
            }
        }
        ChangeType::Moved | ChangeType::Formatting | ChangeType::Unchanged => {
            RiskVerdict::plain(Severity::Cosmetic, 0.1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_is_cosmetic() {
        let verdict = assess_risk("a", "b", ChangeType::Formatting);
        assert_eq!(verdict.severity, Severity::Cosmetic);
        assert_eq!(verdict.risk_score, 0.0);

        let verdict = assess_risk("Madde 1.", "Madde  1.  ", ChangeType::Modified);
        assert_eq!(verdict.risk_score, 0.0);
    }

    #[test]
    fn test_removed_unlimited_liability_is_critical() {
        let verdict = assess_risk(
            "Satıcı, zararlardan sınırsız sorumluluk taşır.",
            "Satıcı, zararlardan sorumluluk taşır.",
            ChangeType::Modified,
        );
        assert_eq!(verdict.severity, Severity::Critical);
        assert_eq!(verdict.risk_score, 0.8);
        assert_eq!(verdict.pattern_id, Some("unlimited_liability"));
        assert!(verdict.implication.unwrap().starts_with("Removes unlimited liability"));
    }

    #[test]
    fn test_introduced_pattern_scores() {
        let critical = assess_risk(
            "",
            "Sağlayıcı sözleşmeyi tek taraflı olarak feshedebilir.",
            ChangeType::Added,
        );
        assert_eq!(critical.severity, Severity::Critical);
        assert_eq!(critical.risk_score, 1.0);

        let major = assess_risk(
            "The term is one year.",
            "The term is one year and renews automatically.",
            ChangeType::Modified,
        );
        // "renews automatically" is not "automatically renews"
        assert_eq!(major.pattern_id, None);

        let major = assess_risk(
            "The term is one year.",
            "The term is one year and shall automatically renew.",
            ChangeType::Modified,
        );
        assert_eq!(major.severity, Severity::Major);
        assert_eq!(major.risk_score, 0.7);

        let minor = assess_risk(
            "Bedel zamanında ödenir.",
            "Bedel zamanında ödenir, aksi halde gecikme faizi uygulanır.",
            ChangeType::Modified,
        );
        assert_eq!(minor.severity, Severity::Minor);
        assert_eq!(minor.risk_score, 0.4);
    }

    #[test]
    fn test_removed_pattern_scores() {
        let major = assess_risk(
            "Cezai şart olarak 10.000 TL ödenir.",
            "",
            ChangeType::Removed,
        );
        assert_eq!(major.severity, Severity::Major);
        assert_eq!(major.risk_score, 0.5);

        let minor = assess_risk(
            "Disputes go to binding arbitration.",
            "",
            ChangeType::Removed,
        );
        assert_eq!(minor.risk_score, 0.3);
    }

    #[test]
    fn test_first_hit_short_circuits() {
        // Both unlimited liability and a penalty are introduced; table order decides
        let verdict = assess_risk(
            "",
            "Satıcı sınırsız sorumluluk taşır ve cezai şart öder.",
            ChangeType::Added,
        );
        assert_eq!(verdict.pattern_id, Some("unlimited_liability"));
    }

    #[test]
    fn test_pattern_on_both_sides_is_ignored() {
        let verdict = assess_risk(
            "Satıcı sınırsız sorumluluk taşır.",
            "Alıcı ve satıcı sınırsız sorumluluk taşır.",
            ChangeType::Modified,
        );
        assert_eq!(verdict.pattern_id, None);
    }

    #[test]
    fn test_type_defaults() {
        assert_eq!(
            assess_risk("Eski madde.", "", ChangeType::Removed),
            RiskVerdict::plain(Severity::Major, 0.5)
        );
        assert_eq!(
            assess_risk("", "Yeni madde eklendi.", ChangeType::Added),
            RiskVerdict::plain(Severity::Minor, 0.3)
        );
        assert_eq!(
            assess_risk_with_similarity("x", "y", ChangeType::Modified, 0.2).risk_score,
            0.6
        );
        assert_eq!(
            assess_risk_with_similarity("x", "y", ChangeType::Modified, 0.3).risk_score,
            0.4
        );
        assert_eq!(
            assess_risk_with_similarity("x", "y", ChangeType::Modified, 0.7).risk_score,
            0.1
        );
    }

    #[test]
    fn test_scores_agree_with_buckets() {
        for pattern in patterns() {
            for direction in [PatternDirection::Introduced, PatternDirection::Removed] {
                let hit = PatternHit { pattern, direction };
                assert_eq!(
                    Severity::from_risk_score(hit.risk_score()),
                    pattern.level,
                    "{} {:?}",
                    pattern.id,
                    direction
                );
            }
        }
    }

    #[test]
    fn test_table_ids_unique() {
        let mut ids: Vec<_> = patterns().iter().map(|p| p.id).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert!(count >= 14);
    }
}
