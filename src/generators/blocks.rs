//! Document blocks: the ordered, styled fragments a generator emits and the
//! render engine lays out.

/// Visual treatment of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockStyle {
    Title,
    Subtitle,
    Section,
    Clause,
    Body,
    Indented,
    Centered,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Styled text; `\n` forces a line break.
    Text { style: BlockStyle, text: String },
    /// Vertical whitespace in points.
    Spacer(f32),
    /// Two blank signature lines side by side, labelled with party roles.
    Signatures { left: String, right: String },
    PageBreak,
}

impl Block {
    pub fn text(style: BlockStyle, text: impl Into<String>) -> Self {
        Block::Text {
            style,
            text: text.into(),
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::text(BlockStyle::Title, text)
    }

    pub fn subtitle(text: impl Into<String>) -> Self {
        Self::text(BlockStyle::Subtitle, text)
    }

    pub fn section(text: impl Into<String>) -> Self {
        Self::text(BlockStyle::Section, text)
    }

    pub fn clause(text: impl Into<String>) -> Self {
        Self::text(BlockStyle::Clause, text)
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self::text(BlockStyle::Body, text)
    }

    pub fn indented(text: impl Into<String>) -> Self {
        Self::text(BlockStyle::Indented, text)
    }

    pub fn centered(text: impl Into<String>) -> Self {
        Self::text(BlockStyle::Centered, text)
    }

    pub fn signatures(left: impl Into<String>, right: impl Into<String>) -> Self {
        Block::Signatures {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Body block made of `label: value` lines.
    pub fn labelled_lines(lines: &[(&str, String)]) -> Self {
        let text = lines
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self::body(text)
    }

    pub fn style(&self) -> Option<BlockStyle> {
        match self {
            Block::Text { style, .. } => Some(*style),
            _ => None,
        }
    }

    /// Text content; signature blocks report their labels.
    pub fn content(&self) -> Option<String> {
        match self {
            Block::Text { text, .. } => Some(text.clone()),
            Block::Signatures { left, right } => Some(format!("{left} {right}")),
            Block::Spacer(_) | Block::PageBreak => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_lines_joins_with_newlines() {
        let block = Block::labelled_lines(&[
            ("Nome", "Ana Sá".to_string()),
            ("NIF", "123456789".to_string()),
        ]);
        assert_eq!(block.style(), Some(BlockStyle::Body));
        assert_eq!(block.content().unwrap(), "Nome: Ana Sá\nNIF: 123456789");
    }

    #[test]
    fn test_non_text_blocks_have_no_style() {
        assert_eq!(Block::Spacer(10.0).style(), None);
        assert_eq!(Block::PageBreak.content(), None);
        assert_eq!(
            Block::signatures("Devedor", "Credor").content().unwrap(),
            "Devedor Credor"
        );
    }
}
