//! Edge case tests for rillc-lex.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use rillc_util::Handler;

    use crate::token::{Token, TokenKind};
    use crate::Scanner;

    fn scan(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        let mut scanner = Scanner::new(source.as_bytes(), &handler).unwrap();
        scanner.scan_all().unwrap()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_edge_whitespace_only() {
        assert!(scan("  \t\r\n \n ").is_empty());
    }

    #[test]
    fn test_edge_single_letter() {
        let t = scan("x");
        assert_eq!(t[0].kind, TokenKind::FieldId);
    }

    #[test]
    fn test_edge_all_fixed_operators() {
        let t = scan("+ - * / ( ) [ ] , ; : . ~ < <= > >= == != <--- &&& @@@");
        let kinds: Vec<_> = t.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Op,
                TokenKind::Cl,
                TokenKind::Sql,
                TokenKind::Sqr,
                TokenKind::Comma,
                TokenKind::Sem,
                TokenKind::Colon,
                TokenKind::Dot,
                TokenKind::Not,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::AssignOp,
                TokenKind::And,
                TokenKind::Or,
            ]
        );
    }

    #[test]
    fn test_edge_adjacent_tokens_without_spaces() {
        let kinds: Vec<_> = scan("b2<---3;").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Id,
                TokenKind::AssignOp,
                TokenKind::Num,
                TokenKind::Sem,
            ]
        );
    }

    #[test]
    fn test_edge_uppercase_is_unknown() {
        let t = scan("A");
        assert_eq!(t[0].kind, TokenKind::Error);
    }

    #[test]
    fn test_edge_record_access_chain() {
        let kinds: Vec<_> = scan("point . x").iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::FieldId, TokenKind::Dot, TokenKind::FieldId]);
    }

    #[test]
    fn test_edge_declaration_line() {
        let t = scan("type #point : record with x : int ; endrecord");
        let kinds: Vec<_> = t.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Type,
                TokenKind::Ruid,
                TokenKind::Colon,
                TokenKind::Record,
                TokenKind::With,
                TokenKind::FieldId,
                TokenKind::Colon,
                TokenKind::Int,
                TokenKind::Sem,
                TokenKind::Endrecord,
            ]
        );
    }

    #[test]
    fn test_edge_token_spanning_buffer_boundary() {
        // Pad so an identifier straddles the half boundary.
        let pad = crate::BUFFER_SIZE - 3;
        let source = format!("{}b234", " ".repeat(pad));
        let t = scan(&source);
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].kind, TokenKind::Id);
        assert_eq!(t[0].lexeme, "b234");
    }

    #[test]
    fn test_edge_retraction_at_buffer_boundary() {
        // Put "<-" right at the half boundary so the failed `<---`
        // lookahead retracts across it.
        let pad = crate::BUFFER_SIZE - 1;
        let source = format!("{}<-x", " ".repeat(pad));
        let kinds: Vec<_> = scan(&source).iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Lt, TokenKind::Minus, TokenKind::FieldId]);
    }

    #[test]
    fn test_edge_crlf_lines() {
        let t = scan("a\r\nb2");
        assert_eq!(t[0].line, 1);
        assert_eq!(t[1].line, 2);
    }

    #[test]
    fn test_edge_error_count_matches_handler() {
        let handler = Handler::new();
        let mut scanner = Scanner::new("? = ! 12.3".as_bytes(), &handler).unwrap();
        let tokens = scanner.scan_all().unwrap();
        let error_tokens = tokens.iter().filter(|t| t.kind == TokenKind::Error).count();
        assert_eq!(error_tokens, 4);
        assert_eq!(handler.error_count(), 4);
    }

    #[test]
    fn test_edge_keyword_prefix_is_field_id() {
        // Prefixes and extensions of keywords are ordinary field ids.
        assert_eq!(scan("rea")[0].kind, TokenKind::FieldId);
        assert_eq!(scan("reads")[0].kind, TokenKind::FieldId);
    }

    // ==================== PROPERTIES ====================

    /// Lexemes whose classification is known and stable when separated by
    /// whitespace, paired with the kind they must scan to.
    const LEXEMES: &[(&str, TokenKind)] = &[
        ("b22", TokenKind::Id),
        ("cd345", TokenKind::Id),
        ("call", TokenKind::Call),
        ("salary", TokenKind::FieldId),
        ("_go", TokenKind::FunId),
        ("_main", TokenKind::Main),
        ("#pt", TokenKind::Ruid),
        ("#record", TokenKind::Record),
        ("7", TokenKind::Num),
        ("12.50", TokenKind::Rnum),
        ("<---", TokenKind::AssignOp),
        ("<=", TokenKind::Le),
        ("<", TokenKind::Lt),
        (";", TokenKind::Sem),
        ("~", TokenKind::Not),
        ("&&&", TokenKind::And),
    ];

    const SEPARATORS: &[&str] = &[" ", "  ", "\t", "\n", " \n", "\n\n ", "\r\n"];

    proptest! {
        /// Kinds and line numbers survive arbitrary whitespace layout:
        /// each token's line equals one plus the newlines before it.
        #[test]
        fn prop_line_accounting(
            picks in proptest::collection::vec(0usize..LEXEMES.len(), 1..32),
            seps in proptest::collection::vec(0usize..SEPARATORS.len(), 32),
        ) {
            let mut source = String::new();
            let mut expected = Vec::new();
            for (i, &pick) in picks.iter().enumerate() {
                let sep = SEPARATORS[seps[i]];
                source.push_str(sep);
                let line = 1 + source.bytes().filter(|&b| b == b'\n').count() as u32;
                let (lexeme, kind) = LEXEMES[pick];
                expected.push((kind, line));
                source.push_str(lexeme);
            }

            let tokens = scan(&source);
            let got: Vec<_> = tokens.iter().map(|t| (t.kind, t.line)).collect();
            prop_assert_eq!(got, expected);
        }

        /// The scanner terminates on arbitrary printable input and every
        /// error token is mirrored in the handler.
        #[test]
        fn prop_arbitrary_input_terminates(source in "[ -~\n]{0,200}") {
            let handler = Handler::new();
            let mut scanner = Scanner::new(source.as_bytes(), &handler).unwrap();
            let tokens = scanner.scan_all().unwrap();
            let errors = tokens.iter().filter(|t| t.kind == TokenKind::Error).count();
            prop_assert_eq!(errors, handler.error_count());
            // Every token sits on a real line of the input.
            let lines = 1 + source.bytes().filter(|&b| b == b'\n').count() as u32;
            for token in &tokens {
                prop_assert!(token.line >= 1 && token.line <= lines);
            }
        }

        /// Non-comment, non-whitespace bytes are covered by exactly the
        /// emitted lexemes, in order.
        #[test]
        fn prop_token_coverage(
            picks in proptest::collection::vec(0usize..LEXEMES.len(), 1..24),
        ) {
            let source: Vec<&str> = picks.iter().map(|&p| LEXEMES[p].0).collect();
            let joined = source.join(" ");
            let tokens = scan(&joined);
            let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
            prop_assert_eq!(lexemes, source);
        }
    }
}
