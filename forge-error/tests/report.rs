use ariadne::Source;
use forge_attrs::ErrorKind;
use forge_error::{Error, ErrorKind};

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = ["this is not allowed here"],
    help = "remove it",
)]
struct Unexpected;

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("unknown variable `{}`", self.name))]
struct Unknown {
    name: String,
}

/// Renders the report of the given error to a plain string with ANSI colors removed.
fn render(err: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    err.build_report("input")
        .write(("input", Source::from(source)), &mut buf)
        .unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn report_with_label() {
    let err = Error::new(vec![2..3], Unexpected);
    let report = render(&err, "x $ y");

    assert!(report.contains("unexpected token"));
    assert!(report.contains("this is not allowed here"));
    assert!(report.contains("remove it"));
}

#[test]
fn spanless_report() {
    let err = Error::spanless(Unknown { name: "y".to_string() });
    let report = render(&err, "x + y");

    assert!(report.contains("unknown variable `y`"));
}

#[test]
fn display_and_downcast() {
    let err = Error::spanless(Unknown { name: "z".to_string() });
    assert_eq!(err.to_string(), "unknown variable `z`");
    assert!(err.is::<Unknown>());
    assert!(!err.is::<Unexpected>());
    assert_eq!(err.downcast_ref::<Unknown>().map(|k| k.name.as_str()), Some("z"));
}
