//! Curated English-Hebrew fallback translations.
//!
//! A small hand-authored dictionary consulted before live API results.
//! Entries here carry the highest confidence (100) and always appear
//! first in a merged translation list.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::word::{normalize_term, Language};

static COMMON_TRANSLATIONS: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        let entries: &[(&str, &[&str])] = &[
            // Common verbs with multiple meanings
            ("play", &["לשחק", "לנגן", "משחק"]),
            ("run", &["לרוץ", "להפעיל", "לנהל"]),
            ("work", &["לעבוד", "עבודה", "לפעול"]),
            ("read", &["לקרוא"]),
            ("write", &["לכתוב"]),
            ("eat", &["לאכול"]),
            ("drink", &["לשתות"]),
            ("sleep", &["לישון"]),
            ("walk", &["ללכת", "לטייל"]),
            ("talk", &["לדבר", "שיחה"]),
            ("listen", &["להקשיב"]),
            ("watch", &["לצפות", "לראות", "שעון"]),
            ("learn", &["ללמוד"]),
            ("teach", &["ללמד"]),
            ("study", &["ללמוד", "לחקור"]),
            ("think", &["לחשוב"]),
            ("know", &["לדעת", "להכיר"]),
            ("understand", &["להבין"]),
            ("speak", &["לדבר"]),
            ("help", &["לעזור", "עזרה"]),
            ("like", &["לאהוב", "כמו"]),
            ("love", &["לאהוב", "אהבה"]),
            ("want", &["לרצות"]),
            ("make", &["לעשות", "ליצור"]),
            ("take", &["לקחת"]),
            ("give", &["לתת"]),
            ("get", &["לקבל", "להשיג"]),
            ("come", &["לבוא"]),
            ("go", &["ללכת", "לנסוע"]),
            ("see", &["לראות"]),
            ("look", &["להסתכל", "לחפש"]),
            ("find", &["למצוא"]),
            ("feel", &["להרגיש"]),
            ("try", &["לנסות"]),
            ("leave", &["לעזוב", "להשאיר"]),
            ("call", &["להתקשר", "לקרוא"]),
            ("ask", &["לשאול", "לבקש"]),
            ("tell", &["לספר", "להגיד"]),
            ("say", &["לומר"]),
            ("show", &["להראות", "מופע"]),
            ("use", &["להשתמש", "שימוש"]),
            ("start", &["להתחיל", "התחלה"]),
            ("stop", &["לעצור", "תחנה"]),
            ("open", &["לפתוח", "פתוח"]),
            ("close", &["לסגור", "סגור"]),
            ("buy", &["לקנות"]),
            ("sell", &["למכור"]),
            ("pay", &["לשלם"]),
            ("win", &["לנצח"]),
            ("lose", &["להפסיד", "לאבד"]),
            ("send", &["לשלוח"]),
            ("receive", &["לקבל"]),
            ("bring", &["להביא"]),
            ("hold", &["להחזיק"]),
            ("keep", &["לשמור", "להמשיך"]),
            ("put", &["לשים"]),
            ("move", &["לזוז", "להעביר"]),
            ("live", &["לחיות", "לגור"]),
            ("change", &["לשנות", "שינוי"]),
            ("happen", &["לקרות"]),
            ("wait", &["לחכות"]),
            ("meet", &["לפגוש", "להיפגש"]),
            ("remember", &["לזכור"]),
            ("forget", &["לשכוח"]),
            ("hope", &["לקוות", "תקווה"]),
            ("believe", &["להאמין"]),
            // Common nouns
            ("book", &["ספר"]),
            ("house", &["בית"]),
            ("car", &["מכונית", "רכב"]),
            ("food", &["אוכל", "מזון"]),
            ("water", &["מים"]),
            ("time", &["זמן"]),
            ("day", &["יום"]),
            ("year", &["שנה"]),
            ("child", &["ילד", "ילדה"]),
            ("friend", &["חבר", "חברה"]),
            ("family", &["משפחה"]),
            ("school", &["בית ספר"]),
            ("teacher", &["מורה"]),
            ("student", &["תלמיד", "סטודנט"]),
            ("music", &["מוזיקה"]),
            ("city", &["עיר"]),
            ("country", &["מדינה", "ארץ"]),
            ("world", &["עולם"]),
            ("money", &["כסף"]),
            ("question", &["שאלה"]),
            ("answer", &["תשובה"]),
            ("problem", &["בעיה"]),
            ("word", &["מילה"]),
            ("language", &["שפה"]),
            ("name", &["שם"]),
            ("number", &["מספר"]),
            // Common adjectives
            ("small", &["קטן", "קטנה"]),
            ("new", &["חדש", "חדשה"]),
            ("old", &["ישן", "זקן"]),
            ("happy", &["שמח", "שמחה"]),
            ("sad", &["עצוב", "עצובה"]),
            ("hot", &["חם", "חמה"]),
            ("cold", &["קר", "קרה"]),
            ("fast", &["מהיר", "מהירה"]),
            ("easy", &["קל", "קלה"]),
            ("hard", &["קשה"]),
            ("strong", &["חזק", "חזקה"]),
            ("important", &["חשוב", "חשובה"]),
            ("different", &["שונה"]),
            ("possible", &["אפשרי", "אפשרית"]),
            ("necessary", &["הכרחי", "נחוץ"]),
        ];
        entries.iter().copied().collect()
    });

/// Look up curated translations for a term.
///
/// Returns an empty slice when the term is unknown or the pair is not
/// English to Hebrew.
pub fn common_translations(term: &str, source: Language, target: Language) -> &'static [&'static str] {
    if source != Language::En || target != Language::He {
        return &[];
    }
    COMMON_TRANSLATIONS
        .get(normalize_term(term).as_str())
        .copied()
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_term_table_order() {
        let trans = common_translations("play", Language::En, Language::He);
        assert_eq!(trans, ["לשחק", "לנגן", "משחק"]);
    }

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        assert_eq!(
            common_translations("  Play ", Language::En, Language::He),
            common_translations("play", Language::En, Language::He)
        );
    }

    #[test]
    fn test_unknown_term_empty() {
        assert!(common_translations("hypothesis", Language::En, Language::He).is_empty());
    }

    #[test]
    fn test_only_en_to_he_pairs() {
        assert!(common_translations("play", Language::He, Language::En).is_empty());
    }
}
