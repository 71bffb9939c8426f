use crate::types::{MediaItem, ResolvedMedia, Row, Stats};

/// Drop everything from the first `#` on.
pub fn strip_fragment(link: &str) -> &str {
    match link.find('#') {
        Some(i) => &link[..i],
        None => link,
    }
}

pub fn fallback_id(index: usize) -> String { format!("row_{}", index) }

/// Build the display record for one resolved row.
pub fn media_item_from(index: usize, row: &Row, permalink: &str, resolved: ResolvedMedia) -> MediaItem {
    let ResolvedMedia { id, media } = resolved;
    let is_video = media.is_video();
    let poster = media.thumbnail_url.clone().filter(|s| !s.is_empty()).or_else(|| media.media_url.clone());
    MediaItem {
        id: id.filter(|s| !s.is_empty()).unwrap_or_else(|| fallback_id(index)),
        permalink: permalink.to_string(),
        label: row.name.clone(),
        video_url: if is_video { media.media_url } else { None },
        thumbnail_url: poster.clone(),
        preview: poster,
        stats: Stats { results: row.results, cpr: row.cpr },
    }
}
