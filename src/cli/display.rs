// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the sifter CLI.
//!
//! Results come out of the renderer as HTML (`<mark>` around matches, entities
//! for `<`, `&` and quotes). Here that markup becomes ANSI: marks turn into
//! bold yellow, entities are decoded. Without a TTY, or with `NO_COLOR` set,
//! marks become `[`…`]` so the matches stay visible in pipelines.
//!
//! # Theme detection order
//!
//! 1. `SIFTER_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use sifter::render::{MARK_CLOSE, MARK_OPEN};

/// Width between │ and │ (excluding border chars).
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SIFTER_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": colors 7+ (except 8) are light backgrounds
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTE (OneDark / One Light, true color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

#[derive(Debug, Clone, Copy)]
pub enum Role {
    /// Box borders
    Border,
    /// Section labels
    Label,
    /// Result titles
    Heading,
    /// Highlighted matches
    Match,
    /// URLs
    Link,
    /// Secondary text
    Muted,
    /// Exact-match scores
    Strong,
    /// Prefix-only scores
    Weak,
}

impl Role {
    fn rgb(self) -> (u8, u8, u8) {
        match (theme(), self) {
            (Theme::Dark, Role::Border) => (92, 99, 112),
            (Theme::Dark, Role::Label) => (86, 182, 194),
            (Theme::Dark, Role::Heading) => (97, 175, 239),
            (Theme::Dark, Role::Match) => (229, 192, 123),
            (Theme::Dark, Role::Link) => (198, 120, 221),
            (Theme::Dark, Role::Muted) => (171, 178, 191),
            (Theme::Dark, Role::Strong) => (152, 195, 121),
            (Theme::Dark, Role::Weak) => (229, 192, 123),
            (Theme::Light, Role::Border) => (160, 161, 167),
            (Theme::Light, Role::Label) => (1, 132, 188),
            (Theme::Light, Role::Heading) => (64, 120, 242),
            (Theme::Light, Role::Match) => (193, 132, 1),
            (Theme::Light, Role::Link) => (166, 38, 164),
            (Theme::Light, Role::Muted) => (56, 58, 66),
            (Theme::Light, Role::Strong) => (80, 161, 79),
            (Theme::Light, Role::Weak) => (193, 132, 1),
        }
    }

    fn code(self) -> String {
        rgb(self.rgb())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Whether stdout gets ANSI colors.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Paint `text` in `role`, with optional modifiers. Plain text without colors.
pub fn paint(role: Role, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), role.code(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length (excluding ANSI codes).
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Human-readable byte size.
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MARKUP → TERMINAL
// ═══════════════════════════════════════════════════════════════════════════

/// Decode the entities `escape_html` produces.
pub fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Turn highlighted markup into terminal text.
///
/// Nested marks (a later query token matching inside an earlier `<mark>` tag)
/// are flattened: any text inside at least one mark is highlighted.
pub fn markup_to_terminal(markup: &str, colors: bool) -> String {
    let (open, close) = if colors {
        (format!("{}{}", BOLD, Role::Match.code()), RESET.to_string())
    } else {
        ("[".to_string(), "]".to_string())
    };

    let mut out = String::with_capacity(markup.len());
    let mut depth = 0usize;
    let mut rest = markup;
    while !rest.is_empty() {
        let next_open = rest.find(MARK_OPEN);
        let next_close = rest.find(MARK_CLOSE);
        let (pos, is_open) = match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => (o, true),
            (_, Some(c)) => (c, false),
            (Some(o), None) => (o, true),
            (None, None) => {
                out.push_str(&unescape_entities(rest));
                break;
            }
        };

        out.push_str(&unescape_entities(&rest[..pos]));
        if is_open {
            if depth == 0 {
                out.push_str(&open);
            }
            depth += 1;
            rest = &rest[pos + MARK_OPEN.len()..];
        } else {
            if depth == 1 {
                out.push_str(&close);
            }
            depth = depth.saturating_sub(1);
            rest = &rest[pos + MARK_CLOSE.len()..];
        }
    }
    out
}

/// Score, colored strong when it is worth at least one exact match.
pub fn score_badge(score: u32) -> String {
    let text = format!("{:>4}", score);
    if score >= sifter::EXACT_MATCH_SCORE {
        paint(Role::Strong, &[BOLD], &text)
    } else {
        paint(Role::Weak, &[], &text)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(piece: &str) -> String {
    paint(Role::Border, &[], piece)
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", paint(Role::Label, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let label_part = format!("─ {} ", paint(Role::Label, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("├"),
        label_part,
        border(&format!("{}┤", "─".repeat(remaining)))
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// Wrap `text` to lines of at most `width` visible chars, on word boundaries.
/// Words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let word_len = visible_len(word);
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
