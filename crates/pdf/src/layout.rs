//! Page-independent text layout: wrapping, sanitizing and pagination.

/// A4 portrait, millimetres
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;

const PT_TO_MM: f32 = 0.3528;
// Average Helvetica glyph width relative to the font size
const AVG_GLYPH_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.3;

/// One styled paragraph before wrapping
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub text: String,
    pub size_pt: f32,
    pub indent_mm: f32,
    pub space_before_mm: f32,
}

impl Block {
    pub fn new(text: impl Into<String>, size_pt: f32) -> Self {
        Self {
            text: text.into(),
            size_pt,
            indent_mm: 0.0,
            space_before_mm: 0.0,
        }
    }

    pub fn indent(mut self, indent_mm: f32) -> Self {
        self.indent_mm = indent_mm;
        self
    }

    pub fn space_before(mut self, space_mm: f32) -> Self {
        self.space_before_mm = space_mm;
        self
    }
}

/// A wrapped line with its final position on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub size_pt: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

/// Wrap blocks and distribute the lines over as many pages as needed
pub fn paginate(blocks: &[Block]) -> Vec<Vec<PlacedLine>> {
    let usable_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let top = PAGE_HEIGHT_MM - MARGIN_MM;

    let mut pages = Vec::new();
    let mut current: Vec<PlacedLine> = Vec::new();
    let mut cursor = top;

    for block in blocks {
        let line_height = block.size_pt * PT_TO_MM * LINE_SPACING;
        let glyph_width = block.size_pt * PT_TO_MM * AVG_GLYPH_EM;
        let max_chars = ((usable_width - block.indent_mm) / glyph_width).floor().max(10.0) as usize;

        // Spacing is dropped at the top of a page
        if cursor < top {
            cursor -= block.space_before_mm;
        }

        for line in wrap_text(&sanitize(&block.text), max_chars) {
            if cursor - line_height < MARGIN_MM {
                pages.push(std::mem::take(&mut current));
                cursor = top;
            }
            cursor -= line_height;
            current.push(PlacedLine {
                text: line,
                size_pt: block.size_pt,
                x_mm: MARGIN_MM + block.indent_mm,
                y_mm: cursor,
            });
        }
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

/// Greedy word wrap; words longer than a line are split
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for source_line in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in source_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_chars {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > max_chars && line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line_len += word.len();
            line.extend(word);
        }

        if line_len > 0 {
            lines.push(line);
        }
    }

    lines
}

/// Map text onto what the built-in Helvetica encoding can draw
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' | '\u{1F449}' => out.push('-'),
            '\t' => out.push(' '),
            '\n' => out.push('\n'),
            c if (' '..='~').contains(&c) || ('\u{A0}'..='\u{FF}').contains(&c) => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
