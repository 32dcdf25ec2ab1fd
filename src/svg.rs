use crate::icons::Glyph;
use crate::stats::{LanguageShare, ProfileStats};

const WIDTH: i32 = 400;
const HEIGHT: i32 = 280;
const PADDING: i32 = 20;
const FIRST_ROW_Y: i32 = 120;
const ROW_HEIGHT: i32 = 20;
const BAR_X: i32 = PADDING + 200;
const BAR_WIDTH: f64 = 120.0;
const BAR_HEIGHT: i32 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub title: &'static str,
    pub muted: &'static str,
    pub border: &'static str,
    pub bar: &'static str,
    pub bar_bg: &'static str,
    pub faint: &'static str,
}

impl Theme {
    /// Case-insensitive `dark` / `light`.
    pub fn parse(s: &str) -> Option<Theme> {
        if s.eq_ignore_ascii_case("dark") {
            Some(Theme::Dark)
        } else if s.eq_ignore_ascii_case("light") {
            Some(Theme::Light)
        } else {
            None
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#1a1a1a",
                text: "#e6e6e6",
                title: "#ffffff",
                muted: "#cccccc",
                border: "#444444",
                bar: "#ffffff",
                bar_bg: "#333333",
                faint: "#666666",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                title: "#1f2328",
                muted: "#57606a",
                border: "#d0d7de",
                bar: "#24292f",
                bar_bg: "#eaeef2",
                faint: "#8c959f",
            },
        }
    }
}

// Utilities for building SVG content

/// Vertical positions that depend on how many language rows are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub separator_y: i32,
    pub section_title_y: i32,
    pub section_value_y: i32,
    pub git_glyph_y: i32,
    pub border_height: i32,
    pub updated_y: i32,
}

impl Layout {
    pub fn for_rows(rows: usize) -> Self {
        let shift = ROW_HEIGHT * rows.min(3) as i32;
        Self {
            separator_y: 135 + shift,
            section_title_y: 155 + shift,
            section_value_y: 175 + shift,
            git_glyph_y: 152 + shift,
            border_height: 170 + shift,
            updated_y: 208 + shift,
        }
    }
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn dot(cx: i32, cy: i32, r: i32, fill: &str) -> String {
    format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#)
}

/// A glyph scaled into place, or a plain dot when there is none.
fn glyph_or_dot(glyph: Option<Glyph>, x: i32, y: i32, size: i32, faint: &str) -> String {
    match glyph {
        Some(g) => format!(
            r#"<g transform="translate({x}, {ty}) scale(0.8)"><svg width="{size}" height="{size}" viewBox="0 0 24 24">{body}</svg></g>"#,
            ty = y - 8,
            body = g.fragment(),
        ),
        None => dot(x + 8, y, 6, faint),
    }
}

fn git_glyph(x: i32, y: i32) -> String {
    format!(
        r#"<g transform="translate({x}, {ty}) scale(1.2)"><svg width="15" height="15" viewBox="0 0 24 24">{body}</svg></g>"#,
        ty = y - 10,
        body = Glyph::Git.fragment(),
    )
}

fn build_language_row(i: usize, lang: &LanguageShare, faint: &str) -> String {
    let y = FIRST_ROW_Y + ROW_HEIGHT * i as i32;
    let pct = lang.percentage.min(100);
    let fill = f64::from(pct) * BAR_WIDTH / 100.0;

    format!(
        r#"
  <g class="lang-icon">{icon}</g>
  <text x="{name_x}" y="{text_y}" class="container">{name}</text>
  <rect x="{BAR_X}" y="{bar_y}" width="{BAR_WIDTH}" height="{BAR_HEIGHT}" class="bar-bg" rx="4"/>
  <rect x="{BAR_X}" y="{bar_y}" width="{fill}" height="{BAR_HEIGHT}" class="bar" rx="4"/>
  <text x="{pct_x}" y="{text_y}" class="percentage">{pct}%</text>"#,
        icon = glyph_or_dot(Glyph::for_language(&lang.name), PADDING + 15, y, 16, faint),
        name_x = PADDING + 40,
        text_y = y + 3,
        name = escape_xml(&lang.name),
        bar_y = y - 3,
        pct_x = BAR_X + BAR_WIDTH as i32 + 10,
    )
}

/// Renders the card in the default dark theme.
pub fn render(stats: &ProfileStats, username: &str) -> String {
    render_themed(stats, username, Theme::Dark)
}

/// Fixed 400x280 card. Output depends only on the arguments.
pub fn render_themed(stats: &ProfileStats, username: &str, theme: Theme) -> String {
    let colors = theme.colors();
    let languages = &stats.top_languages[..stats.top_languages.len().min(3)];
    let layout = Layout::for_rows(languages.len());

    let rows: String = languages
        .iter()
        .enumerate()
        .map(|(i, lang)| build_language_row(i, lang, colors.faint))
        .collect();

    format!(
        r#"<svg width="{WIDTH}" height="{HEIGHT}" xmlns="http://www.w3.org/2000/svg">
<defs>
<style>
.container {{ font-family: 'SF Mono', Monaco, 'Cascadia Code', 'Roboto Mono', Consolas, 'Courier New', monospace; font-size: 12px; fill: {text}; }}
.title {{ font-family: 'SF Mono', Monaco, Consolas, monospace; font-size: 16px; font-weight: bold; fill: {title}; }}
.username {{ font-family: 'SF Mono', Monaco, Consolas, monospace; font-size: 14px; fill: {muted}; }}
.section-title {{ font-family: 'SF Mono', Monaco, Consolas, monospace; font-size: 13px; font-weight: bold; fill: {title}; }}
.value {{ font-family: 'SF Mono', Monaco, Consolas, monospace; font-size: 14px; font-weight: bold; fill: {title}; }}
.percentage {{ font-family: 'SF Mono', Monaco, Consolas, monospace; font-size: 11px; fill: {muted}; }}
.border-line {{ stroke: {border}; stroke-width: 1; fill: none; shape-rendering: crispEdges; }}
.bar {{ fill: {bar}; shape-rendering: crispEdges; }}
.bar-bg {{ fill: {bar_bg}; shape-rendering: crispEdges; }}
.lang-icon {{ opacity: 0.9; }}
.update-time {{ font-family: 'SF Mono', Monaco, Consolas, monospace; font-size: 10px; fill: {faint}; }}
</style>
</defs>

<rect width="{WIDTH}" height="{HEIGHT}" fill="{bg}" rx="8"/>
<rect x="{PADDING}" y="{PADDING}" width="{content_w}" height="{border_h}" class="border-line" rx="6" stroke-dasharray="2,2"/>

<text x="{center}" y="45" class="title" text-anchor="middle">GitHub Profile Stats</text>
<text x="{center}" y="65" class="username" text-anchor="middle">{username}</text>
<line x1="{rule_x1}" y1="80" x2="{rule_x2}" y2="80" class="border-line"/>

<g class="lang-icon">{folder}</g>
<text x="{label_x}" y="100" class="section-title">Top Languages</text>
{rows}

<line x1="{rule_x1}" y1="{sep_y}" x2="{rule_x2}" y2="{sep_y}" class="border-line"/>

<text x="{left_x}" y="{title_y}" class="section-title">⭐ Total Stars</text>
<text x="{left_x}" y="{value_y}" class="value">{stars}</text>

<g class="lang-icon">{git}</g>
<text x="{commits_label_x}" y="{title_y}" class="section-title">Recent Commits</text>
<text x="{BAR_X}" y="{value_y}" class="value">{commits}</text>

<text x="{center}" y="{updated_y}" class="update-time" text-anchor="middle">Updated {updated}</text>
</svg>
"#,
        bg = colors.bg,
        text = colors.text,
        title = colors.title,
        muted = colors.muted,
        border = colors.border,
        bar = colors.bar,
        bar_bg = colors.bar_bg,
        faint = colors.faint,
        content_w = WIDTH - PADDING * 2,
        border_h = layout.border_height,
        center = WIDTH / 2,
        username = escape_xml(username),
        rule_x1 = PADDING + 10,
        rule_x2 = WIDTH - PADDING - 10,
        folder = glyph_or_dot(Some(Glyph::Folder), PADDING + 15, 95, 22, colors.faint),
        label_x = PADDING + 40,
        sep_y = layout.separator_y,
        left_x = PADDING + 15,
        title_y = layout.section_title_y,
        value_y = layout.section_value_y,
        stars = group_thousands(stats.total_stars),
        git = git_glyph(BAR_X, layout.git_glyph_y),
        commits_label_x = PADDING + 222,
        commits = stats.recent_commits,
        updated_y = layout.updated_y,
        updated = stats.last_updated.format("%-m/%-d/%Y"),
    )
}
