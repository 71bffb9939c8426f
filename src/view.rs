//! Card presentation state: hover-to-preview playback, a mute toggle, and the
//! stats caption shown over each card.

use crate::types::{MediaItem, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Idle,
    Hovering { playing: bool },
}

/// Per-card view state. Playback follows the pointer; mute is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardState {
    pub playback: Playback,
    pub muted: bool,
    has_video: bool,
}

impl CardState {
    pub fn new(item: &MediaItem) -> Self {
        Self { playback: Playback::Idle, muted: true, has_video: item.is_video() }
    }

    /// Image-only cards hover without playing.
    pub fn pointer_enter(&mut self) {
        self.playback = Playback::Hovering { playing: self.has_video };
    }

    pub fn pointer_leave(&mut self) { self.playback = Playback::Idle; }

    pub fn toggle_mute(&mut self) {
        if self.has_video { self.muted = !self.muted; }
    }

    pub fn status_label(&self) -> &'static str {
        match self.playback {
            Playback::Idle => "Hover to preview",
            Playback::Hovering { playing: true } => "Playing",
            Playback::Hovering { playing: false } => "Paused",
        }
    }

    pub fn mute_label(&self) -> &'static str {
        if self.muted { "Sound off" } else { "Sound on" }
    }
}

/// `"2 results · CPR 0.2"`; absent stats are left out.
pub fn stats_caption(stats: &Stats) -> String {
    let mut parts = Vec::new();
    if let Some(r) = stats.results { parts.push(format!("{} results", compact(r))); }
    if let Some(c) = stats.cpr { parts.push(format!("· CPR {}", js_display(c))); }
    parts.join(" ")
}

const UNITS: [&str; 5] = ["", "K", "M", "B", "T"];

/// Compact notation: `1234 -> 1.2K`, `30 -> 30`, `1500000 -> 1.5M`.
pub fn compact(n: f64) -> String {
    if !n.is_finite() {
        return js_display(n);
    }
    let sign = if n < 0.0 { "-" } else { "" };
    let mut scaled = n.abs();
    let mut unit = 0;
    while scaled >= 1000.0 && unit < UNITS.len() - 1 {
        scaled /= 1000.0;
        unit += 1;
    }
    let mut shown = round_compact(scaled);
    // 999_999 rounds up into the next unit
    if shown >= 1000.0 && unit < UNITS.len() - 1 {
        shown = round_compact(shown / 1000.0);
        unit += 1;
    }
    if shown == 0.0 {
        return "0".to_string();
    }
    format!("{}{}{}", sign, shown, UNITS[unit])
}

fn round_compact(x: f64) -> f64 {
    if x >= 10.0 || x == 0.0 {
        return x.round();
    }
    // two significant digits below ten
    let digits = x.log10().floor() as i32;
    let factor = 10f64.powi(1 - digits);
    (x * factor).round() / factor
}

fn js_display(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        format!("{}", n)
    }
}

/// Plain-text rendering of one card.
pub fn render_card(item: &MediaItem) -> String {
    let state = CardState::new(item);
    let kind = if item.is_video() { "video" } else { "image" };
    let mut out = format!("[{}] {}\n", kind, item.label.as_deref().unwrap_or("Post"));
    let caption = stats_caption(&item.stats);
    if !caption.is_empty() {
        out.push_str(&format!("  {}\n", caption));
    }
    if let Some(poster) = item.poster() {
        out.push_str(&format!("  poster: {}\n", poster));
    }
    if let Some(video) = &item.video_url {
        out.push_str(&format!("  video:  {}\n", video));
    }
    out.push_str(&format!("  open:   {}\n", item.permalink));
    out.push_str(&format!("  {} · {}\n", state.mute_label(), state.status_label()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(video: bool) -> MediaItem {
        MediaItem {
            id: "1".into(),
            permalink: "https://x/p/A/".into(),
            label: Some("A".into()),
            video_url: video.then(|| "https://cdn/v.mp4".to_string()),
            thumbnail_url: Some("https://cdn/t.jpg".into()),
            preview: Some("https://cdn/t.jpg".into()),
            stats: Stats { results: Some(2.0), cpr: Some(0.2) },
        }
    }

    #[test]
    fn hover_plays_video_and_leave_resets() {
        let mut s = CardState::new(&item(true));
        assert_eq!(s.status_label(), "Hover to preview");
        s.pointer_enter();
        assert_eq!(s.playback, Playback::Hovering { playing: true });
        assert_eq!(s.status_label(), "Playing");
        s.pointer_leave();
        assert_eq!(s.playback, Playback::Idle);
    }

    #[test]
    fn image_cards_pause_on_hover_and_ignore_mute() {
        let mut s = CardState::new(&item(false));
        s.pointer_enter();
        assert_eq!(s.status_label(), "Paused");
        s.toggle_mute();
        assert!(s.muted);
    }

    #[test]
    fn mute_toggles_independently_of_hover() {
        let mut s = CardState::new(&item(true));
        assert_eq!(s.mute_label(), "Sound off");
        s.toggle_mute();
        s.pointer_enter();
        s.pointer_leave();
        assert_eq!(s.mute_label(), "Sound on");
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(compact(2.0), "2");
        assert_eq!(compact(30.0), "30");
        assert_eq!(compact(0.12), "0.12");
        assert_eq!(compact(1234.0), "1.2K");
        assert_eq!(compact(12_345.0), "12K");
        assert_eq!(compact(123_456.0), "123K");
        assert_eq!(compact(1_500_000.0), "1.5M");
        assert_eq!(compact(999_999.0), "1M");
        assert_eq!(compact(-4200.0), "-4.2K");
        assert_eq!(compact(f64::NAN), "NaN");
        assert_eq!(compact(f64::INFINITY), "Infinity");
        assert_eq!(compact(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn caption_skips_absent_stats() {
        assert_eq!(stats_caption(&Stats { results: Some(2.0), cpr: Some(0.2) }), "2 results · CPR 0.2");
        assert_eq!(stats_caption(&Stats { results: None, cpr: Some(0.12) }), "· CPR 0.12");
        assert_eq!(stats_caption(&Stats::default()), "");
    }

    #[test]
    fn renders_card_text() {
        let text = render_card(&item(true));
        assert!(text.starts_with("[video] A\n"));
        assert!(text.contains("2 results · CPR 0.2"));
        assert!(text.contains("Sound off · Hover to preview"));
    }
}
