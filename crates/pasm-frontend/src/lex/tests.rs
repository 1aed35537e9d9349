use super::{lex, Token};

fn kinds(line: &str) -> Vec<Token> {
    lex(line, 0, 0).into_iter().map(|(token, _)| token).collect()
}

#[test]
fn lex_instruction() {
    let expected = vec![
        Token::Name("ADD".into()),
        Token::Name("R1".into()),
        Token::Name("R2".into()),
        Token::Name("R3".into()),
    ];

    assert_eq!(expected, kinds("ADD R1 R2 R3"));
}

#[test]
fn lex_label_prefix() {
    let expected = vec![
        Token::Label("loop".into()),
        Token::Name("SUBi".into()),
        Token::Name("SP".into()),
        Token::Name("SP".into()),
        Token::Number("4".into()),
    ];

    assert_eq!(expected, kinds("loop: SUBi SP SP 4"));
}

#[test]
fn lex_numbers() {
    let expected = vec![
        Token::Name("ADDi".into()),
        Token::Name("R1".into()),
        Token::Name("R1".into()),
        Token::Number("-12".into()),
        Token::Number("0x1f".into()),
    ];

    assert_eq!(expected, kinds("ADDi R1 R1 -12 0x1f"));
}

#[test]
fn lex_trailing_comment() {
    let expected = vec![
        Token::Name("OUT".into()),
        Token::Name("R4".into()),
        Token::Comment("# print the result, R5".into()),
    ];

    assert_eq!(expected, kinds("OUT R4   # print the result, R5  "));
}

#[test]
fn lex_reports_unknown_characters() {
    assert!(kinds("ADD R1, R2").contains(&Token::Error));
}

#[test]
fn lex_spans_are_offset() {
    let tokens = lex("  JMP end", 100, 3);

    let (token, span) = &tokens[1];
    assert_eq!(&Token::Name("end".into()), token);
    assert_eq!((106, 109, 3), (span.start, span.end, span.file));
}
