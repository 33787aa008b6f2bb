//! Picking the quality table for the configured language.

use tracing::debug;

use super::types::{QualityTable, TorrentTable};

static EMPTY_TABLE: QualityTable = QualityTable::new();

/// Flatten a torrent table to the quality table for `language`.
///
/// Flat tables are returned as-is. Language codes are compared
/// case-insensitively; when `language` is missing the first language in
/// document order is used.
pub fn resolve_language<'a>(table: &'a TorrentTable, language: &str) -> &'a QualityTable {
    let languages = match table {
        TorrentTable::Flat(quality_table) => return quality_table,
        TorrentTable::ByLanguage(languages) => languages,
    };

    if let Some((_, quality_table)) = languages
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(language))
    {
        return quality_table;
    }

    match languages.first() {
        Some((code, quality_table)) => {
            debug!(
                requested = language,
                fallback = %code,
                "Language not available, using first language"
            );
            quality_table
        }
        None => &EMPTY_TABLE,
    }
}
