//! Preview of a validated request
//!
//! The binary reports what a command would do instead of running it.

use crate::cli::app::BIN_NAME;
use crate::cli::registry;
use crate::config::HoloConfig;
use crate::operations::request::Request;
use std::fmt::Write as _;

/// Render `request` as a banner line followed by one `LABEL: value` line per argument
///
/// Submissions also show the submitter taken from `config`.
#[must_use]
pub fn render_preview(request: &Request, config: &HoloConfig) -> String {
    let command = request.command();
    let path: Vec<&str> = command.split(' ').collect();
    let usage = registry::resolve(&path).map_or("", |spec| spec.args_usage);

    let mut out = String::new();
    let banner = format!("{BIN_NAME} {command} {usage}");
    let _ = writeln!(out, "### {} ###", banner.trim_end());

    for (label, value) in request.fields() {
        push_field(&mut out, label, &value);
    }
    if request.needs_submitter() {
        let submitter = config.user.as_deref().unwrap_or("(not configured)");
        push_field(&mut out, "submitter", submitter);
    }
    out
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if value.contains('\n') {
        let _ = writeln!(out, "{label}:");
        for line in value.lines() {
            let _ = writeln!(out, "  {line}");
        }
        return;
    }
    let _ = writeln!(out, "{label}: {value}");
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn artifacts_get_preview() {
        let request = Request::GetArtifact {
            filename: "foo.tar.gz".to_owned(),
            destination: PathBuf::from("/tmp/out"),
            release: "R1".to_owned(),
        };
        let preview = render_preview(&request, &HoloConfig::default());
        assert_eq!(
            preview,
            "### holo artifacts get FILENAME DESTINATION --release RELEASE ###\n\
             FILENAME: foo.tar.gz\n\
             DESTINATION: /tmp/out\n\
             release: R1\n"
        );
    }

    #[test]
    fn submit_preview_lists_notes_and_submitter() {
        let request = Request::Submit {
            submission: "osd-38".parse().unwrap(),
            src_root: PathBuf::from("."),
            trains: Vec::new(),
            notes: vec!["a".to_owned(), "b".to_owned()],
            force: false,
        };
        let config = HoloConfig {
            user: Some("steve@example.com".to_owned()),
        };
        let preview = render_preview(&request, &config);
        assert!(preview.contains("notes:\n  a\n  b\n"), "{preview}");
        assert!(preview.ends_with("submitter: steve@example.com\n"), "{preview}");
    }

    #[test]
    fn list_commands_have_only_a_banner() {
        let preview = render_preview(&Request::ListTrains, &HoloConfig::default());
        assert_eq!(preview, "### holo trains ls ###\n");
    }
}
