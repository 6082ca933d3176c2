use yomu_types::Token;

/// How a single token should be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenView<'a> {
    Plain(&'a str),
    /// Base text with an annotation above it
    Ruby { base: &'a str, ruby: String },
}

impl<'a> TokenView<'a> {
    pub fn of(token: &'a Token) -> Self {
        if !token.is_word() {
            return TokenView::Plain(&token.value);
        }

        match (token.show_furigana, token.show_translation) {
            (true, false) => TokenView::Ruby {
                base: &token.kanji,
                ruby: token.furigana.clone(),
            },
            (true, true) => TokenView::Ruby {
                base: &token.kanji,
                ruby: format!("{}, {}", token.furigana, token.translation),
            },
            _ => TokenView::Plain(&token.kanji),
        }
    }
}

#[cfg(test)]
mod tests {
    use yomu_types::TokenKind;

    use super::*;

    fn word() -> Token {
        Token {
            id: Some(7),
            kind: TokenKind::Word,
            kanji: "猫".to_string(),
            furigana: "ねこ".to_string(),
            translation: "cat".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn hidden_word_shows_kanji() {
        assert_eq!(TokenView::of(&word()), TokenView::Plain("猫"));
    }

    #[test]
    fn furigana_only() {
        let mut token = word();
        token.show_furigana = true;
        assert_eq!(
            TokenView::of(&token),
            TokenView::Ruby {
                base: "猫",
                ruby: "ねこ".to_string()
            }
        );
    }

    #[test]
    fn furigana_and_translation() {
        let mut token = word();
        token.toggle();
        assert_eq!(
            TokenView::of(&token),
            TokenView::Ruby {
                base: "猫",
                ruby: "ねこ, cat".to_string()
            }
        );
    }

    #[test]
    fn translation_without_furigana_is_hidden() {
        let mut token = word();
        token.show_translation = true;
        assert_eq!(TokenView::of(&token), TokenView::Plain("猫"));
    }

    #[test]
    fn text_tokens_show_their_value() {
        let token = Token {
            value: "は".to_string(),
            ..Default::default()
        };
        assert_eq!(TokenView::of(&token), TokenView::Plain("は"));
    }
}
