//! Clause category rule table
//!
//! Ordered list of (category, patterns). The classifier walks it top to
//! bottom and the first category with a matching pattern wins. The same
//! patterns are run over whole documents to decide whether a category is
//! present at all.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::ClauseCategory;

lazy_static! {
    static ref CATEGORY_PATTERNS: Vec<(ClauseCategory, Vec<Regex>)> = vec![
        (
            ClauseCategory::Parties,
            vec![
                Regex::new(r"(?i)sözleşmenin\s+tarafları|\btaraflar\s*:").unwrap(),
                Regex::new(r"(?i)\bparties\s*:|\bby\s+and\s+between\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Definitions,
            vec![
                Regex::new(r"(?i)\btanımlar\b|\btanım\w*\s*:").unwrap(),
                Regex::new(r"(?i)\bdefinitions?\b|\bshall\s+mean\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Subject,
            vec![
                Regex::new(r"(?i)sözleşmenin\s+(?:konusu|amacı)|\bkonu\s*:").unwrap(),
                Regex::new(r"(?i)subject\s+(?:matter\s+)?of\s+(?:this\s+)?(?:agreement|contract)|\bpurpose\s+of\s+this\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Term,
            vec![
                Regex::new(r"(?i)sözleşmenin\s+süresi|\bsüre\s*:|\byürürlü(?:k|ğe)\w*").unwrap(),
                Regex::new(r"(?i)\bterm\s+of\s+(?:this\s+)?(?:agreement|contract)\b|\beffective\s+date\b|\bduration\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Price,
            vec![
                Regex::new(r"(?i)\bbedel\w*|\bfiyat\w*|\bücret\w*").unwrap(),
                Regex::new(r"(?i)\bprices?\b|\bfees?\b|\bconsideration\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Payment,
            vec![
                Regex::new(r"(?i)\bödeme\w*|\bödenecek\w*|\bödenir\b|\bfatura\w*").unwrap(),
                Regex::new(r"(?i)\bpayments?\b|\bpayable\b|\binvoic\w*").unwrap(),
            ],
        ),
        (
            ClauseCategory::Delivery,
            vec![
                Regex::new(r"(?i)\bteslim\w*").unwrap(),
                Regex::new(r"(?i)\bdeliver\w*|\bshipment\w*").unwrap(),
            ],
        ),
        (
            ClauseCategory::Warranty,
            vec![
                Regex::new(r"(?i)\bgaranti\w*|\bayıp\w*").unwrap(),
                Regex::new(r"(?i)\bwarrant\w*|\bguarantee\w*").unwrap(),
            ],
        ),
        (
            ClauseCategory::Liability,
            vec![
                Regex::new(r"(?i)\bsorumlu\w*|\btazmin\w*").unwrap(),
                Regex::new(r"(?i)\bliab\w*|\bindemn\w*").unwrap(),
            ],
        ),
        (
            ClauseCategory::Penalty,
            vec![
                Regex::new(r"(?i)\bcezai\s+şart\w*|\bceza\w*").unwrap(),
                Regex::new(r"(?i)\bpenalt\w*|\bliquidated\s+damages\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Confidentiality,
            vec![
                Regex::new(r"(?i)\bgizli\w*|\bticari\s+sır\w*").unwrap(),
                Regex::new(r"(?i)\bconfidential\w*|\bnon-disclosure\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::NonCompete,
            vec![
                Regex::new(r"(?i)\brekabet\w*").unwrap(),
                Regex::new(r"(?i)\bnon-compet\w*|\bnot\s+to\s+compete\b|\bcompet(?:e|ing|ition)\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::IntellectualProperty,
            vec![
                Regex::new(r"(?i)\bfikri\s+(?:ve\s+sınai\s+)?mülkiyet\w*|\btelif\w*|\bmarka\w*").unwrap(),
                Regex::new(r"(?i)\bintellectual\s+property\b|\bcopyright\w*|\bpatent\w*|\btrademark\w*").unwrap(),
            ],
        ),
        (
            ClauseCategory::Termination,
            vec![
                Regex::new(r"(?i)\bfesih\b|\bfesh\w*|\bsona\s+er\w*").unwrap(),
                Regex::new(r"(?i)\bterminat\w*|\bcancel\w*").unwrap(),
            ],
        ),
        (
            ClauseCategory::ForceMajeure,
            vec![
                Regex::new(r"(?i)\bmücbir\s+sebep\w*").unwrap(),
                Regex::new(r"(?i)\bforce\s+majeure\b|\bacts?\s+of\s+god\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::DisputeResolution,
            vec![
                Regex::new(r"(?i)\buyuşmazlık\w*|\bihtilaf\w*|\btahkim\w*").unwrap(),
                Regex::new(r"(?i)\bmahkeme\w*|\bicra\s+daire\w*").unwrap(),
                Regex::new(r"(?i)\bdisputes?\b|\barbitrat\w*|\bjurisdiction\b|\bgoverning\s+law\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Notice,
            vec![
                Regex::new(r"(?i)\btebligat\w*|\bbildirim\w*|\bihbar\w*").unwrap(),
                Regex::new(r"(?i)\bnotices?\b|\bnotif\w*").unwrap(),
            ],
        ),
        (
            ClauseCategory::GeneralProvisions,
            vec![
                Regex::new(r"(?i)\b(?:genel|diğer|son)\s+hükümler\b|\bdeğişiklik\w*").unwrap(),
                Regex::new(r"(?i)\bentire\s+agreement\b|\bseverab\w*|\bamendment\w*|\bmiscellaneous\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Signatures,
            vec![
                Regex::new(r"(?i)\bimza\w*").unwrap(),
                Regex::new(r"(?i)\bsignature\w*|\bsigned\b|\bin\s+witness\s+whereof\b").unwrap(),
            ],
        ),
        (
            ClauseCategory::Appendices,
            vec![
                Regex::new(r"(?i)\bekler\b|\bek\s*[-:\d]").unwrap(),
                Regex::new(r"(?i)\bannex\w*|\bappendi\w*|\bexhibit\w*|\bschedule\s+\d").unwrap(),
            ],
        ),
    ];
}

/// Classify a single segment's text; first matching category wins
pub fn classify(text: &str) -> ClauseCategory {
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(text)))
        .map(|(category, _)| *category)
        .unwrap_or(ClauseCategory::Other)
}

/// Whether any of the category's patterns occurs anywhere in `document`.
///
/// Always false for `Other`, which has no patterns.
pub fn is_present(category: ClauseCategory, document: &str) -> bool {
    CATEGORY_PATTERNS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, patterns)| patterns.iter().any(|p| p.is_match(document)))
        .unwrap_or(false)
}
