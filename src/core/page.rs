//! Portfolio content model, content-file parser and document layout.
//!
//! Layout works in terminal cells with rows counted from the top of the
//! document.  Pixel geometry for the scroll logic is derived from it with a
//! fixed `row_px`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::effects::DocRect;
use super::reveal::Band;
use super::sections::{NavLink, NavLinks, SectionGeometry};

/// Rows covered by the fixed navbar.
pub const NAVBAR_ROWS: usize = 3;
const MARGIN_X: u16 = 2;
const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: usize = 5;
const CARD_GAP: u16 = 2;
const BUTTON_HEIGHT: usize = 3;
const BUTTON_GAP: u16 = 2;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("content defines no sections")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub text: String,
}

/// Headline block of the first section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroText {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSection {
    pub id: String,
    pub title: String,
    pub hero: Option<HeroText>,
    pub lines: Vec<String>,
    pub cards: Vec<Card>,
    pub buttons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub brand: String,
    pub sections: Vec<PageSection>,
}

/// Hero elements that fade in one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroPart {
    Avatar,
    Brand,
    Subtitle,
    Description,
    Buttons,
}

impl Page {
    /// Built-in page used when no content file is given.
    pub fn sample() -> Self {
        Self::parse(include_str!("sample_page.txt")).unwrap_or_else(|_| Self {
            brand: "Portfolio".into(),
            sections: vec![PageSection {
                id: "home".into(),
                title: "Home".into(),
                ..PageSection::default()
            }],
        })
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse the plain-text content format:
    ///
    /// ```text
    /// brand = Jordan Lee
    /// [section home] Home
    /// title: Hi, I'm Jordan
    /// card: Rust | Systems programming
    /// button: Contact me
    /// Any other line is body text.
    /// ```
    pub fn parse(text: &str) -> Result<Self, ContentError> {
        let mut brand = String::from("Portfolio");
        let mut sections: Vec<PageSection> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end();
            let syntax = |message: String| ContentError::Syntax {
                line: line_no,
                message,
            };

            if line.trim_start().starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let (head, title) = rest
                    .split_once(']')
                    .ok_or_else(|| syntax("unterminated section header".into()))?;
                let id = head
                    .strip_prefix("section")
                    .map(str::trim)
                    .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
                    .ok_or_else(|| syntax(format!("expected `[section <id>]`, got `[{head}]`")))?;
                if sections.iter().any(|s| s.id == id) {
                    return Err(syntax(format!("duplicate section id `{id}`")));
                }
                let title = title.trim();
                sections.push(PageSection {
                    id: id.to_string(),
                    title: if title.is_empty() { id.to_string() } else { title.to_string() },
                    ..PageSection::default()
                });
                continue;
            }

            let first_section = sections.len() == 1;
            let Some(section) = sections.last_mut() else {
                if line.trim().is_empty() {
                    continue;
                }
                match line.split_once('=') {
                    Some((key, value)) if key.trim() == "brand" => {
                        brand = value.trim().to_string();
                        continue;
                    }
                    _ => return Err(syntax("text before the first section".into())),
                }
            };

            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim().to_string();
                match key.trim() {
                    "title" | "subtitle" | "description" => {
                        if !first_section {
                            return Err(syntax(format!(
                                "`{}` is only allowed in the first section",
                                key.trim()
                            )));
                        }
                        let hero = section.hero.get_or_insert_with(HeroText::default);
                        match key.trim() {
                            "title" => hero.title = value,
                            "subtitle" => hero.subtitle = value,
                            _ => hero.description = value,
                        }
                        continue;
                    }
                    "card" => {
                        let (title, text) = value.split_once('|').unwrap_or((value.as_str(), ""));
                        section.cards.push(Card {
                            title: title.trim().to_string(),
                            text: text.trim().to_string(),
                        });
                        continue;
                    }
                    "button" => {
                        section.buttons.push(value);
                        continue;
                    }
                    _ => {}
                }
            }
            section.lines.push(line.to_string());
        }

        if sections.is_empty() {
            return Err(ContentError::Empty);
        }
        for s in &mut sections {
            while s.lines.last().is_some_and(|l| l.trim().is_empty()) {
                s.lines.pop();
            }
        }
        Ok(Self { brand, sections })
    }

    pub fn hero(&self) -> Option<&HeroText> {
        self.sections.first().and_then(|s| s.hero.as_ref())
    }

    /// One nav link per section, in document order.
    pub fn nav_links(&self) -> NavLinks {
        NavLinks::new(
            self.sections
                .iter()
                .map(|s| NavLink::new(s.id.clone(), s.title.clone()))
                .collect(),
        )
    }

    /// Lay the page out for a viewport `width` columns wide and
    /// `viewport_rows` tall (the hero fills at least one screen).
    pub fn layout(&self, width: u16, viewport_rows: usize) -> PageLayout {
        let mut b = LayoutBuilder::new(width);

        for (index, section) in self.sections.iter().enumerate() {
            let top = b.y;
            match (index, &section.hero) {
                (0, Some(hero)) => b.hero(self, section, hero, viewport_rows),
                _ => b.section(section),
            }
            b.sections.push(SectionBox {
                id: section.id.clone(),
                top,
                height: (b.y - top).max(1),
            });
        }

        b.y += 1;
        b.push(ItemKind::Footer, self.brand.clone(), b.x0, b.content_w, 1);
        b.y += 2;

        PageLayout {
            items: b.items,
            sections: b.sections,
            cards: b.cards,
            buttons: b.buttons,
            avatar: b.avatar,
            total_rows: b.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    SectionTitle,
    Text,
    HeroTitle,
    Hero(HeroPart),
    Avatar,
    Card(usize),
    Button(usize),
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutItem {
    pub rect: DocRect,
    pub kind: ItemKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBox {
    pub id: String,
    pub top: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonBox {
    pub label: String,
    pub rect: DocRect,
    /// Buttons inside the hero fade in with the rest of it.
    pub in_hero: bool,
}

/// What sits under a document cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHit {
    Button(usize),
    Card(usize),
    Avatar,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub items: Vec<LayoutItem>,
    pub sections: Vec<SectionBox>,
    pub cards: Vec<DocRect>,
    pub buttons: Vec<ButtonBox>,
    pub avatar: Option<DocRect>,
    pub total_rows: usize,
}

impl PageLayout {
    pub fn section_geometry(&self, row_px: f64) -> Vec<SectionGeometry> {
        self.sections
            .iter()
            .map(|s| SectionGeometry::new(s.id.clone(), s.top as f64 * row_px, s.height as f64 * row_px))
            .collect()
    }

    pub fn card_bands(&self, row_px: f64) -> Vec<Band> {
        self.cards
            .iter()
            .map(|r| Band {
                top: r.y as f64 * row_px,
                height: r.height as f64 * row_px,
            })
            .collect()
    }

    /// Rows of the hero section (first section), if any.
    pub fn hero_rows(&self) -> Option<(usize, usize)> {
        self.sections.first().map(|s| (s.top, s.top + s.height))
    }

    pub fn hit(&self, col: u16, row: usize) -> Option<PageHit> {
        if let Some(i) = self.buttons.iter().position(|b| b.rect.contains(col, row)) {
            return Some(PageHit::Button(i));
        }
        if let Some(i) = self.cards.iter().position(|c| c.contains(col, row)) {
            return Some(PageHit::Card(i));
        }
        self.avatar
            .filter(|a| a.contains(col, row))
            .map(|_| PageHit::Avatar)
    }
}

struct LayoutBuilder {
    x0: u16,
    content_w: u16,
    y: usize,
    items: Vec<LayoutItem>,
    sections: Vec<SectionBox>,
    cards: Vec<DocRect>,
    buttons: Vec<ButtonBox>,
    avatar: Option<DocRect>,
}

impl LayoutBuilder {
    fn new(width: u16) -> Self {
        let content_w = width.saturating_sub(MARGIN_X * 2).max(10);
        Self {
            x0: MARGIN_X,
            content_w,
            y: 0,
            items: Vec::new(),
            sections: Vec::new(),
            cards: Vec::new(),
            buttons: Vec::new(),
            avatar: None,
        }
    }

    fn push(&mut self, kind: ItemKind, text: String, x: u16, width: u16, height: usize) {
        self.items.push(LayoutItem {
            rect: DocRect {
                x,
                y: self.y,
                width,
                height,
            },
            kind,
            text,
        });
    }

    /// Push one item per wrapped line and advance.
    fn wrapped(&mut self, kind: ItemKind, text: &str, x: u16, width: u16) {
        if text.trim().is_empty() {
            self.y += 1;
            return;
        }
        for line in wrap(text, width as usize) {
            self.push(kind, line, x, width, 1);
            self.y += 1;
        }
    }

    fn hero(&mut self, page: &Page, section: &PageSection, hero: &HeroText, viewport_rows: usize) {
        let top = self.y;
        self.y += NAVBAR_ROWS + 2;

        // Wide screens put the avatar to the right of the text.
        let side_by_side = self.content_w >= 60;
        let (avatar_w, avatar_h) = if side_by_side {
            let w = (self.content_w / 3).min(28);
            (w, (w / 2) as usize)
        } else {
            (16, 8)
        };
        let (text_x, text_w) = if side_by_side {
            (self.x0, self.content_w - avatar_w - 2)
        } else {
            let x = self.x0 + (self.content_w.saturating_sub(avatar_w)) / 2;
            self.avatar = Some(DocRect { x, y: self.y, width: avatar_w, height: avatar_h });
            self.push(ItemKind::Avatar, String::new(), x, avatar_w, avatar_h);
            self.y += avatar_h + 1;
            (self.x0, self.content_w)
        };
        if side_by_side {
            let x = self.x0 + self.content_w - avatar_w;
            self.avatar = Some(DocRect { x, y: self.y, width: avatar_w, height: avatar_h });
            self.push(ItemKind::Avatar, String::new(), x, avatar_w, avatar_h);
        }
        let text_top = self.y;

        self.push(ItemKind::HeroTitle, hero.title.clone(), text_x, text_w, 1);
        self.y += 2;
        self.wrapped(ItemKind::Hero(HeroPart::Brand), &page.brand, text_x, text_w);
        self.wrapped(ItemKind::Hero(HeroPart::Subtitle), &hero.subtitle, text_x, text_w);
        self.y += 1;
        self.wrapped(ItemKind::Hero(HeroPart::Description), &hero.description, text_x, text_w);
        for line in &section.lines {
            self.wrapped(ItemKind::Text, line, text_x, text_w);
        }
        self.y += 1;
        self.button_rows(&section.buttons, text_x, text_w, true);

        if side_by_side {
            self.y = self.y.max(text_top + avatar_h + 1);
        }
        self.y = (self.y + 2).max(top + viewport_rows);
    }

    fn section(&mut self, section: &PageSection) {
        self.y += 1;
        self.push(ItemKind::SectionTitle, section.title.clone(), self.x0, self.content_w, 1);
        self.y += 2;

        for line in &section.lines {
            self.wrapped(ItemKind::Text, line, self.x0, self.content_w);
        }

        if !section.cards.is_empty() {
            if !section.lines.is_empty() {
                self.y += 1;
            }
            let per_row = ((self.content_w + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1) as usize;
            let card_w = CARD_WIDTH.min(self.content_w);
            for (i, card) in section.cards.iter().enumerate() {
                let col = (i % per_row) as u16;
                if i > 0 && col == 0 {
                    self.y += CARD_HEIGHT + 1;
                }
                let x = self.x0 + col * (CARD_WIDTH + CARD_GAP);
                let index = self.cards.len();
                let rect = DocRect { x, y: self.y, width: card_w, height: CARD_HEIGHT };
                self.cards.push(rect);
                self.items.push(LayoutItem {
                    rect,
                    kind: ItemKind::Card(index),
                    text: format!("{}\n{}", card.title, card.text),
                });
            }
            self.y += CARD_HEIGHT + 1;
        }

        if !section.buttons.is_empty() {
            self.y += 1;
            self.button_rows(&section.buttons, self.x0, self.content_w, false);
        }
        self.y += 2;
    }

    fn button_rows(&mut self, labels: &[String], x0: u16, width: u16, in_hero: bool) {
        if labels.is_empty() {
            return;
        }
        let mut x = x0;
        for label in labels {
            let w = (label.chars().count() as u16 + 4).min(width);
            if x > x0 && x + w > x0 + width {
                x = x0;
                self.y += BUTTON_HEIGHT + 1;
            }
            let index = self.buttons.len();
            let rect = DocRect { x, y: self.y, width: w, height: BUTTON_HEIGHT };
            self.buttons.push(ButtonBox { label: label.clone(), rect, in_hero });
            self.items.push(LayoutItem { rect, kind: ItemKind::Button(index), text: label.clone() });
            x += w + BUTTON_GAP;
        }
        self.y += BUTTON_HEIGHT + 1;
    }
}

/// Greedy word wrap by character count.  Overlong words are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "\
brand = Sam Park
# comment
[section home] Home
title: Hello there
subtitle: Engineer
description: I build things.
button: Work
button: Contact

[section skills] Skills
Some intro text.
card: Rust | Fast and safe
card: Go | Simple
card: SQL

[section contact] Contact
Write me.
button: Email
";

    #[test]
    fn sample_page_parses() {
        let page = Page::parse(include_str!("sample_page.txt")).unwrap();
        assert!(page.hero().is_some());
        assert!(page.sections.len() >= 4);
    }

    #[test]
    fn parses_sections_cards_and_buttons() {
        let page = Page::parse(CONTENT).unwrap();
        assert_eq!(page.brand, "Sam Park");
        let ids: Vec<_> = page.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["home", "skills", "contact"]);
        let hero = page.hero().unwrap();
        assert_eq!(hero.title, "Hello there");
        assert_eq!(page.sections[0].buttons, ["Work", "Contact"]);
        assert_eq!(page.sections[1].cards.len(), 3);
        assert_eq!(page.sections[1].cards[2].text, "");
        assert_eq!(page.sections[2].lines, ["Write me."]);
    }

    #[test]
    fn rejects_bad_content() {
        assert!(matches!(Page::parse("brand = x\n"), Err(ContentError::Empty)));
        assert!(matches!(
            Page::parse("hello\n[section a] A\n"),
            Err(ContentError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            Page::parse("[chapter a] A\n"),
            Err(ContentError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            Page::parse("[section a] A\n[section a] B\n"),
            Err(ContentError::Syntax { line: 2, .. })
        ));
        assert!(matches!(
            Page::parse("[section a] A\n[section b] B\ntitle: nope\n"),
            Err(ContentError::Syntax { line: 3, .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Page::load(Path::new("/no/such/content.txt")).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.txt");
        std::fs::write(&path, CONTENT).unwrap();
        assert_eq!(Page::load(&path).unwrap().sections.len(), 3);
    }

    #[test]
    fn sections_tile_the_document() {
        let page = Page::parse(CONTENT).unwrap();
        for width in [40u16, 80, 140] {
            let layout = page.layout(width, 30);
            assert_eq!(layout.sections[0].top, 0);
            assert!(layout.sections[0].height >= 30);
            for pair in layout.sections.windows(2) {
                assert_eq!(pair[0].top + pair[0].height, pair[1].top);
            }
            let last = layout.sections.last().unwrap();
            assert!(last.top + last.height < layout.total_rows);
            assert_eq!(layout.cards.len(), 3);
            assert_eq!(layout.buttons.len(), 3);
        }
    }

    #[test]
    fn geometry_scales_rows_to_pixels() {
        let page = Page::parse(CONTENT).unwrap();
        let layout = page.layout(80, 30);
        let geo = layout.section_geometry(16.0);
        assert_eq!(geo[1].top, layout.sections[1].top as f64 * 16.0);
        assert_eq!(geo[1].height, layout.sections[1].height as f64 * 16.0);
    }

    #[test]
    fn hit_testing_finds_buttons_cards_and_avatar() {
        let page = Page::parse(CONTENT).unwrap();
        let layout = page.layout(100, 30);
        let b = layout.buttons[1].rect;
        assert_eq!(layout.hit(b.x, b.y), Some(PageHit::Button(1)));
        let c = layout.cards[0];
        assert_eq!(layout.hit(c.x + 1, c.y + 1), Some(PageHit::Card(0)));
        let a = layout.avatar.unwrap();
        assert_eq!(layout.hit(a.x, a.y), Some(PageHit::Avatar));
        assert_eq!(layout.hit(0, 0), None);
    }

    #[test]
    fn wrap_respects_width() {
        assert_eq!(wrap("the quick brown fox", 9), ["the quick", "brown fox"]);
        assert_eq!(wrap("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert!(wrap("   ", 5).is_empty());
    }
}
