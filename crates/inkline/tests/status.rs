//! Banner and footer helpers, shortcuts and brackets.

use inkline::style::palette::{self, NamedStyle};
use inkline::Inkline;
use serial_test::serial;

fn ink() -> Inkline {
    let mut ink = Inkline::new();
    ink.set_columns(Some(80));
    ink
}

fn chain(names: &[&str], text: &str) -> String {
    let styles: Vec<NamedStyle> = names
        .iter()
        .map(|name| palette::lookup(name).unwrap())
        .collect();
    palette::apply_all(&styles, text)
}

fn format(template: &str) -> String {
    ink().format(template, &()).unwrap()
}

fn bracketed(inner: &str) -> String {
    format!(
        "{}{}{}",
        chain(&["bold", "blue"], "["),
        inner,
        chain(&["bold", "blue"], "]")
    )
}

fn footer(span: i64, inner: &str) -> String {
    format!("\n\x1b[1A\x1b[{}C{}", span, bracketed(inner))
}

#[test]
fn banner() {
    assert_eq!(format("{{B}}"), "");
    assert_eq!(format("{{B other}}"), bracketed(&chain(&["bold"], "OTHER")));
    assert_eq!(format("{{B info}}"), bracketed(&chain(&["bold", "white"], " INFO")));
    assert_eq!(
        format("{{B info red}}"),
        bracketed(&chain(&["bold", "white", "red"], "INFO RED"))
    );
    assert_eq!(
        format("{{B \"info\" \"red\"}}"),
        bracketed(&chain(&["red"], " INFO"))
    );
}

#[test]
fn banner_with_context_arguments() {
    let ctx = serde_json::json!({"status": "pass"});
    let out = ink().format("{{B \"deploy\" status}}", &ctx).unwrap();
    assert_eq!(out, bracketed(&chain(&["bold", "magenta"], "DEPLOY")));
}

#[test]
fn banner_shortcuts() {
    let shortcuts = [
        ("BI", "info"),
        ("BW", "warn"),
        ("BO", "ok"),
        ("BF", "fail"),
        ("BE", "error"),
        ("BP", "pass"),
        ("BS", "skip"),
        ("BD", "debug"),
    ];
    for (shortcut, name) in shortcuts {
        assert_eq!(
            format(&format!("{{{{{}}}}}", shortcut)),
            format(&format!("{{{{B {}}}}}", name)),
            "{}",
            shortcut
        );
    }
}

#[test]
fn footer_alignment_and_padding() {
    assert_eq!(format("{{E}}"), "");
    assert_eq!(format("{{E ok}}"), footer(74, &chain(&["bold", "green"], " OK ")));
    assert_eq!(format("{{E o}}"), footer(74, &chain(&["bold", "green"], " O  ")));
    assert_eq!(format("{{E ooo}}"), footer(74, &chain(&["bold", "green"], " OOO")));
    assert_eq!(
        format("{{E ok red}}"),
        footer(72, &chain(&["bold", "green", "red"], "OK RED"))
    );
    assert_eq!(
        format("{{E \"ok\" \"red\"}}"),
        footer(74, &chain(&["red"], " OK "))
    );
}

#[test]
fn footer_after_text() {
    assert_eq!(
        format("This is another message {{E ok}}"),
        format!(
            "This is another message {}",
            footer(74, &chain(&["bold", "green"], " OK "))
        )
    );
    assert_eq!(
        format("This is another message {{E \"warn\" \"green\"}}"),
        format!(
            "This is another message {}",
            footer(74, &chain(&["green"], "WARN"))
        )
    );
}

#[test]
fn footer_shortcuts() {
    let shortcuts = [
        ("EI", "info"),
        ("EW", "warn"),
        ("EO", "ok"),
        ("EF", "fail"),
        ("EE", "error"),
        ("EP", "pass"),
        ("ES", "skip"),
        ("ED", "debug"),
    ];
    for (shortcut, name) in shortcuts {
        assert_eq!(
            format(&format!("{{{{{}}}}}", shortcut)),
            format(&format!("{{{{E {}}}}}", name)),
            "{}",
            shortcut
        );
    }
}

#[test]
fn custom_shortcut() {
    let mut ink = ink();
    ink.define_style("note", "cyan").unwrap();
    ink.set_shortcut("N", "note");
    assert_eq!(
        ink.format("{{BN}}", &()).unwrap(),
        ink.format("{{B note}}", &()).unwrap()
    );
    assert_eq!(ink.remove_shortcut("N").as_deref(), Some("note"));
}

#[test]
fn custom_brackets() {
    let mut ink = ink();
    ink.set_brackets("(", ")");
    assert_eq!(
        ink.format("{{B warn}} Message {{E skip}}", &()).unwrap(),
        format!(
            "({}) Message \n\x1b[1A\x1b[74C({})",
            chain(&["bold", "yellow"], " WARN"),
            chain(&["bold", "gray"], "SKIP")
        )
    );
}

#[test]
fn styled_custom_brackets() {
    let mut ink = ink();
    ink.set_brackets("{{#C light_bracket}}<{{/C}}", "{{#C light_bracket}}>{{/C}}");
    let angle_open = "\x1b[38;5;25m<\x1b[39m";
    let angle_close = "\x1b[38;5;25m>\x1b[39m";
    assert_eq!(
        ink.format("{{B ok}}", &()).unwrap(),
        format!("{}{}{}", angle_open, chain(&["bold", "green"], "   OK"), angle_close)
    );
}

#[test]
fn broken_bracket_fails_expansion() {
    let mut ink = ink();
    ink.set_brackets("{{#C red}}[", "]");
    assert_eq!(ink.format("{{B warn}}", &()).unwrap(), "{{B warn}}");

    ink.set_silent(false);
    assert!(ink.format("{{B warn}}", &()).is_err());
}

#[test]
fn self_referencing_bracket_fails_expansion() {
    let mut ink = ink();
    ink.set_brackets("{{B x}}", "]");
    assert_eq!(ink.format("{{B warn}}", &()).unwrap(), "{{B warn}}");

    ink.set_silent(false);
    assert!(ink.format("{{B warn}}", &()).is_err());

    ink.set_brackets("[", "]");
    assert_eq!(ink.format_no_color("{{B warn}}", &()).unwrap(), "[ WARN]");
}

#[test]
fn footer_span_can_be_negative() {
    let mut ink = ink();
    ink.set_columns(Some(3));
    assert!(ink
        .format_no_color("{{E ok}}", &())
        .unwrap()
        .starts_with("\n\x1b[1A\x1b[-3C"));
}

#[test]
#[serial]
fn footer_uses_terminal_width_when_unset() {
    inkline::set_width_detector(|| 100);
    let ink = Inkline::new();
    assert_eq!(ink.columns(), 100);
    assert_eq!(
        ink.format_no_color("{{E ok}}", &()).unwrap(),
        "\n\x1b[1A\x1b[94C[ OK ]"
    );
    inkline::reset_width_detector();
}
