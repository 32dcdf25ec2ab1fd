//! Decorative glyphs drawn next to language names and section titles.
//!
//! Every glyph is a fragment in a 24x24 view box. Languages outside the table
//! have no glyph and the renderer draws a plain dot instead.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Go,
    Rust,
    Cpp,
    C,
    Html,
    Css,
    Vue,
    React,
    Php,
    Ruby,
    Swift,
    Kotlin,
    Folder,
    Git,
}

impl Glyph {
    /// Glyph for a GitHub primary language name. Matching is exact, as GitHub
    /// reports canonical names.
    pub fn for_language(name: &str) -> Option<Glyph> {
        let glyph = match name {
            "JavaScript" => Glyph::JavaScript,
            "TypeScript" => Glyph::TypeScript,
            "Python" => Glyph::Python,
            "Java" => Glyph::Java,
            "Go" => Glyph::Go,
            "Rust" => Glyph::Rust,
            "C++" => Glyph::Cpp,
            "C" => Glyph::C,
            "HTML" => Glyph::Html,
            "CSS" => Glyph::Css,
            "Vue" => Glyph::Vue,
            "React" => Glyph::React,
            "PHP" => Glyph::Php,
            "Ruby" => Glyph::Ruby,
            "Swift" => Glyph::Swift,
            "Kotlin" => Glyph::Kotlin,
            _ => return None,
        };
        Some(glyph)
    }

    /// SVG body of the glyph, without the enclosing `<svg>` element.
    pub fn fragment(self) -> String {
        match self {
            Glyph::Folder => concat!(
                r##"<path d="M2 5.5A1.5 1.5 0 0 1 3.5 4h6l2 2.5h9A1.5 1.5 0 0 1 22 8v10.5a1.5 1.5 0 0 1-1.5 1.5h-17A1.5 1.5 0 0 1 2 18.5z" fill="#c09553"/>"##,
                r##"<path d="M4.5 10h18l-2.5 10H2z" fill="#dcb67a"/>"##,
            )
            .to_string(),
            Glyph::Git => concat!(
                r##"<path d="M23.5 11 13 .5a1.7 1.7 0 0 0-2.4 0L8.4 2.7l2.8 2.8a2 2 0 0 1 2.6 2.6l2.7 2.7a2 2 0 1 1-1.2 1.2l-2.5-2.5v6.6a2 2 0 1 1-1.7-.1V9.3a2 2 0 0 1-1.1-2.7L7.2 3.9.5 10.6a1.7 1.7 0 0 0 0 2.4L11 23.5a1.7 1.7 0 0 0 2.4 0L23.5 13.4a1.7 1.7 0 0 0 0-2.4z" fill="#f05133"/>"##,
            )
            .to_string(),
            Glyph::React => concat!(
                r##"<circle cx="12" cy="12" r="2.2" fill="#00d8ff"/>"##,
                r##"<g fill="none" stroke="#00d8ff" stroke-width="1.2">"##,
                r##"<ellipse cx="12" cy="12" rx="10" ry="4"/>"##,
                r##"<ellipse cx="12" cy="12" rx="10" ry="4" transform="rotate(60 12 12)"/>"##,
                r##"<ellipse cx="12" cy="12" rx="10" ry="4" transform="rotate(120 12 12)"/>"##,
                r##"</g>"##,
            )
            .to_string(),
            Glyph::Vue => concat!(
                r##"<path d="M1 3h4.5L12 14.2 18.5 3H23L12 22z" fill="#41b883"/>"##,
                r##"<path d="M5.5 3h3.9L12 7.6 14.6 3h3.9L12 14.2z" fill="#35495e"/>"##,
            )
            .to_string(),
            _ => {
                let (fill, ink, label) = self.badge();
                format!(
                    r##"<rect width="24" height="24" rx="4" fill="{fill}"/><text x="12" y="16.5" font-family="Arial,sans-serif" font-size="{size}" font-weight="bold" text-anchor="middle" fill="{ink}">{label}</text>"##,
                    size = if label.len() > 2 { 8 } else { 11 },
                )
            }
        }
    }

    /// Background, label colour and label for the lettered badge glyphs.
    fn badge(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Glyph::JavaScript => ("#f7df1e", "#000000", "JS"),
            Glyph::TypeScript => ("#3178c6", "#ffffff", "TS"),
            Glyph::Python => ("#3776ab", "#ffd43b", "Py"),
            Glyph::Java => ("#e76f00", "#ffffff", "Jv"),
            Glyph::Go => ("#00add8", "#ffffff", "Go"),
            Glyph::Rust => ("#dea584", "#000000", "Rs"),
            Glyph::Cpp => ("#00599c", "#ffffff", "C++"),
            Glyph::C => ("#a8b9cc", "#000000", "C"),
            Glyph::Html => ("#e34f26", "#ffffff", "&lt;/&gt;"),
            Glyph::Css => ("#1572b6", "#ffffff", "CSS"),
            Glyph::Php => ("#777bb4", "#ffffff", "php"),
            Glyph::Ruby => ("#cc342d", "#ffffff", "Rb"),
            Glyph::Swift => ("#f05138", "#ffffff", "Sw"),
            Glyph::Kotlin => ("#7f52ff", "#ffffff", "Kt"),
            Glyph::Folder | Glyph::Git | Glyph::React | Glyph::Vue => ("#666666", "#ffffff", ""),
        }
    }
}
