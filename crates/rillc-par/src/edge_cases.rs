//! Edge case and whole-pipeline tests for rillc-par.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rillc_lex::{write_token_file, Scanner, TokenKind};
    use rillc_util::Handler;

    use crate::driver::Parser;
    use crate::first_follow::FirstFollow;
    use crate::grammar::Grammar;
    use crate::stream;
    use crate::table::{Cell, ParseTable};

    /// A small statement-language grammar over the real token alphabet.
    const MINI: &str = "\
Program Stmts
Stmts Stmt Stmts
Stmts TK_EPS
Stmt TK_FIELDID TK_ASSIGNOP Expr TK_SEM
Stmt TK_READ TK_OP TK_FIELDID TK_CL TK_SEM
Stmt TK_WRITE TK_OP Expr TK_CL TK_SEM
Expr Term Etail
Etail TK_PLUS Term Etail
Etail TK_MINUS Term Etail
Etail TK_EPS
Term TK_NUM
Term TK_RNUM
Term TK_ID
Term TK_FIELDID
";

    const PROGRAM: &str = "\
% compute totals
total <--- 12.50 + b22 ;
read ( amount ) ;
write ( total - 7 ) ;
";

    fn mini() -> Grammar {
        Grammar::from_str_text(MINI).unwrap()
    }

    #[test]
    fn test_program_parses_cleanly() {
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();
        let outcome = parser.parse_source(PROGRAM.as_bytes(), &handler).unwrap();
        assert!(!outcome.had_error, "{:?}", handler.take());
    }

    #[test]
    fn test_leaves_reproduce_token_stream() {
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();

        let mut scanner = Scanner::new(PROGRAM.as_bytes(), &handler).unwrap();
        let tokens = stream::prepare(scanner.scan_all().unwrap());
        let expected: Vec<&str> = tokens
            .iter()
            .filter(|t| !t.is_dollar())
            .map(|t| t.lexeme.as_str())
            .collect();

        let outcome = parser.parse_tokens(&tokens, &handler);
        assert!(!outcome.had_error);

        let got: Vec<String> = outcome
            .tree
            .leaf_lexemes()
            .into_iter()
            .filter(|l| l != "eps")
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_listing_of_full_program() {
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();
        let outcome = parser.parse_source(PROGRAM.as_bytes(), &handler).unwrap();

        let mut out = Vec::new();
        outcome.tree.write_listing(&grammar, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Token/Non-Terminal"));
        assert!(text.contains("TK_ASSIGNOP"));
        assert!(text.contains("12.50"));
        assert!(text.lines().any(|l| l.starts_with("Program")));
        assert!(text.lines().filter(|l| l.contains("internal")).count() >= 4);
    }

    #[test]
    fn test_recovery_resumes_at_next_statement() {
        // The first statement is missing its expression; the rest of the
        // program must still parse.
        let source = "total <--- ;\nread ( amount ) ;\n";
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();
        let outcome = parser.parse_source(source.as_bytes(), &handler).unwrap();

        assert!(outcome.had_error);
        assert!(handler.has_errors());
        let lexemes = outcome.tree.leaf_lexemes();
        assert!(lexemes.contains(&"amount".to_string()));
    }

    #[test]
    fn test_error_lines_point_at_offender() {
        let source = "total <--- ;\nread ( amount ) ;\n";
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();
        parser.parse_source(source.as_bytes(), &handler).unwrap();

        let diags = handler.take();
        assert!(!diags.is_empty());
        assert!(diags.iter().all(|d| d.line == 1), "{diags:?}");
    }

    #[test]
    fn test_lexical_errors_do_not_stop_the_parse() {
        let source = "total <--- 12.3 ;\nread ( amount ) ;\n";
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();
        let outcome = parser.parse_source(source.as_bytes(), &handler).unwrap();

        // 12.3 is a malformed real: the scanner reports it, the driver
        // skips the error token and recovers.
        assert!(outcome.had_error);
        let lexemes = outcome.tree.leaf_lexemes();
        assert!(lexemes.contains(&"amount".to_string()));
    }

    #[test]
    fn test_garbage_terminates_with_tree() {
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();
        let outcome = parser
            .parse_source("] ] <--- ? 99 @@@ ;".as_bytes(), &handler)
            .unwrap();
        assert!(outcome.had_error);
        assert!(outcome.tree.len() >= 1);
    }

    #[test]
    fn test_table_projection_is_sound() {
        // For every rule A -> alpha: table[A][t] selects the rule for
        // every t in FIRST(alpha), and for every t in FOLLOW(A) when
        // alpha derives epsilon. MINI is LL(1), so no cell is overwritten.
        let grammar = mini();
        let sets = FirstFollow::compute(&grammar);
        let table = ParseTable::build(&grammar, &sets);

        for (id, rule) in grammar.rules().iter_enumerated() {
            let (first, derives_epsilon) = sets.first_of_sequence(&grammar, &rule.rhs);
            for t in first.iter() {
                assert_eq!(
                    table.get(rule.lhs, t),
                    Cell::Rule(id),
                    "rule {} at {}",
                    grammar.rule_number(id),
                    grammar.terminal_name(t)
                );
            }
            if derives_epsilon {
                for t in sets.follow(rule.lhs).iter() {
                    assert_eq!(table.get(rule.lhs, t), Cell::Rule(id));
                }
            }
        }
    }

    #[test]
    fn test_pipeline_through_files() {
        // Grammar file on disk, token file in between, parse at the end:
        // the textual interchange the front-end speaks.
        let mut grammar_file = tempfile::NamedTempFile::new().unwrap();
        grammar_file.write_all(MINI.as_bytes()).unwrap();
        let grammar = Grammar::from_path(grammar_file.path()).unwrap();

        let handler = Handler::new();
        let mut scanner = Scanner::new(PROGRAM.as_bytes(), &handler).unwrap();
        let scanned = scanner.scan_all().unwrap();

        let mut token_file = tempfile::NamedTempFile::new().unwrap();
        write_token_file(&mut token_file, &scanned).unwrap();
        let token_file = token_file.reopen().unwrap();
        let tokens = stream::read_token_file(std::io::BufReader::new(token_file)).unwrap();

        // The reader already dropped comments and appended the marker.
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
        assert!(tokens.last().is_some_and(|t| t.is_dollar()));

        let parser = Parser::new(&grammar);
        let outcome = parser.parse_tokens(&tokens, &handler);
        assert!(!outcome.had_error, "{:?}", handler.take());
    }

    #[test]
    fn test_dollar_line_is_last_real_token_line() {
        let handler = Handler::new();
        let source = "total <--- 7 ;\n% trailing comment\n\n";
        let mut scanner = Scanner::new(source.as_bytes(), &handler).unwrap();
        let tokens = stream::prepare(scanner.scan_all().unwrap());
        let dollar = tokens.last().unwrap();
        assert!(dollar.is_dollar());
        assert_eq!(dollar.line, 1);
    }

    #[test]
    fn test_empty_program_on_nullable_start() {
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();
        let outcome = parser.parse_source("".as_bytes(), &handler).unwrap();
        assert!(!outcome.had_error);
        // Program -> Stmts -> eps: two internal nodes and the marker leaf.
        assert_eq!(outcome.tree.leaf_lexemes(), vec!["eps"]);
    }

    #[test]
    fn test_comment_only_program() {
        let grammar = mini();
        let parser = Parser::new(&grammar);
        let handler = Handler::new();
        let outcome = parser
            .parse_source("% nothing here\n% at all\n".as_bytes(), &handler)
            .unwrap();
        assert!(!outcome.had_error);
    }
}
