use assert_matches::assert_matches;
use std::io::Write;
use tempfile::NamedTempFile;
use yardlex::config::RuntimeConfig;
use yardlex::diagnostics;
use yardlex::expressions::{reduce, ExpressionToken};
use yardlex::pipeline::{self, PipelineError};
use yardlex::source::{self, SourceError};
use yardlex::tokenizer;
use yardlex::{RuleCatalog, RuleSet, SyntaxError, TokenKind};

const CALCULATOR: &str = r#"
[[rule]]
name = "number"
kind = "constant"
pattern = '[0-9]+(\.[0-9]+)?'

[[rule]]
name = "identifier"
kind = "variable"
pattern = '[A-Za-z_][A-Za-z0-9_]*'

[[rule]]
name = "function"
kind = "function"
priority = 5
pattern = '(?i)sqrt|max|min'

[[rule]]
name = "additive"
kind = "operator"
pattern = '[-+]'
operator_priority = 1

[[rule]]
name = "multiplicative"
kind = "operator"
pattern = '[*/%]'
operator_priority = 2

[[rule]]
name = "power"
kind = "operator"
pattern = '\^'
operator_priority = 3

[[rule]]
name = "open"
kind = "brace_open"
pattern = '[(\[]'

[[rule]]
name = "close"
kind = "brace_close"
pattern = '[)\]]'

[[rule]]
name = "comma"
kind = "delimiter"
pattern = ','

[[rule]]
name = "block_comment"
priority = 10
start = '/\*'
stop = '\*/'

[[rule]]
name = "line_comment"
priority = 10
start = '//'
stop = '$'
"#;

fn calculator() -> RuleSet {
    RuleCatalog::from_toml_str(CALCULATOR)
        .unwrap()
        .compile()
        .unwrap()
}

fn postfix_text(source: &str) -> String {
    pipeline::postfix_all(source::lines_from_str(source), &calculator())
        .unwrap()
        .iter()
        .map(ExpressionToken::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn catalog_driven_expressions() {
    assert_eq!(postfix_text("1 + 2 * 3"), "1 2 3 * +");
    assert_eq!(postfix_text("(1 + 2) * 3"), "1 2 + 3 *");
    assert_eq!(postfix_text("a - b - c"), "a b - c -");
    assert_eq!(postfix_text("max(a, b) ^ 2"), "a b max 2 ^");
    assert_eq!(postfix_text("sqrt([x + 1.5]) / 2"), "x 1.5 + sqrt 2 /");
}

#[test]
fn comments_span_lines_and_vanish_from_postfix() {
    let source = "a /* the first\n   operand */ + // trailing\nb";
    assert_eq!(postfix_text(source), "a b +");

    let tokens = pipeline::tokenize_all(source::lines_from_str(source), &calculator()).unwrap();
    let comment = &tokens[1];
    assert_eq!(comment.rule().name(), "block_comment");
    assert_eq!(comment.text(), "/* the first\n   operand */");
    assert_eq!((comment.start_line(), comment.start_column()), (0, 2));
    assert_eq!((comment.stop_line(), comment.stop_column()), (1, 13));

    let line_comment = &tokens[3];
    assert_eq!(line_comment.text(), "// trailing");
    assert!(!line_comment.is_multiline());
}

#[test]
fn mismatched_brackets_name_the_pair() {
    let result = pipeline::postfix_all(["(a + b]"], &calculator());
    assert_matches!(
        result,
        Err(PipelineError::Precedence(yardlex::PrecedenceError::MismatchedBrackets { opening, closing }))
            if opening == "(" && closing == "]"
    );
}

#[test]
fn unknown_character_renders_a_diagnostic() {
    let lines = ["a + b", "c $ d"];
    let error = tokenizer::parse(lines, &calculator())
        .find_map(Result::err)
        .unwrap();

    assert_eq!(error.line(), Some(1));
    assert_eq!(error.column(), Some(2));

    let rendered = diagnostics::render(&lines, &error);
    assert!(rendered.starts_with("error[E020]: Syntax error at 00002 : 003\n"));
    assert!(rendered.ends_with("2 | c $ d\n  |   ^\n"));
}

#[test]
fn dangling_comment_reports_its_start() {
    let error = pipeline::tokenize_all(["x", "y /* never", "closed"], &calculator()).unwrap_err();
    assert_matches!(
        error.as_syntax(),
        Some(SyntaxError::DanglingToken { line: 1, column: 2, .. })
    );
}

#[test]
fn tokens_reduce_without_conversion() {
    let rules = calculator();
    let tokens = pipeline::tokenize_all(["2 * (3 + 4)"], &rules).unwrap();
    let order: Vec<String> = reduce(&tokens)
        .map(|token| token.unwrap().text().to_string())
        .collect();
    assert_eq!(order, ["2", "3", "4", "+", "*"]);
    assert!(tokens.iter().all(|t| t.kind() != TokenKind::None));
}

#[test]
fn files_are_read_line_by_line() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "/* header").unwrap();
    writeln!(file, "*/").unwrap();
    writeln!(file, "a * (b + c)").unwrap();

    let config = RuntimeConfig::default();
    let postfix = pipeline::postfix_file(file.path(), &calculator(), &config).unwrap();
    let names: Vec<&str> = postfix.iter().map(|t| t.name()).collect();
    assert_eq!(names, ["a", "b", "c", "+", "*"]);

    let tokens = pipeline::tokenize_file(file.path(), &calculator(), &config).unwrap();
    assert_eq!(tokens.len(), 8);
}

#[test]
fn unreadable_input_is_a_source_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"a + /* \xff\n*/ b\n").unwrap();

    let error = pipeline::postfix_file(file.path(), &calculator(), &RuntimeConfig::default())
        .unwrap_err();
    assert_matches!(error, PipelineError::Source(SourceError::InvalidEncoding { line: 1, .. }));

    let missing = std::path::Path::new("/no/such/input.calc");
    assert_matches!(
        pipeline::tokenize_file(missing, &calculator(), &RuntimeConfig::default()),
        Err(PipelineError::Source(SourceError::FileNotFound { .. }))
    );
}

#[test]
fn rule_sets_are_shared_across_threads() {
    let rules = std::sync::Arc::new(calculator());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rules = std::sync::Arc::clone(&rules);
            std::thread::spawn(move || {
                let line = format!("x{} + {} * y", i, i);
                pipeline::postfix_all([line], &rules)
                    .unwrap()
                    .len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }
}
