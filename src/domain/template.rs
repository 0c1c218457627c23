//! Path templating
//!
//! Templates use `{destination}` and `{version}` placeholders; `{{` and `}}`
//! produce literal braces. A leading `~` is expanded to the home directory
//! after substitution.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DomainError;

/// Values bound to the template placeholders for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateVars<'a> {
    pub destination: &'a str,
    pub version: &'a str,
}

impl<'a> TemplateVars<'a> {
    pub fn new(destination: &'a str, version: &'a str) -> Self {
        Self {
            destination,
            version,
        }
    }

    fn lookup(&self, name: &str) -> Option<&'a str> {
        match name {
            "destination" => Some(self.destination),
            "version" => Some(self.version),
            _ => None,
        }
    }
}

/// `{{`, `}}`, a `{name}` placeholder, or a lone brace.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("template token pattern compiles")
});

/// Substitute placeholders in `template`.
pub fn render(template: &str, vars: &TemplateVars<'_>) -> Result<String, DomainError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in TOKEN.captures_iter(template) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..token.start()]);
        last = token.end();

        match (token.as_str(), caps.get(1)) {
            ("{{", _) => out.push('{'),
            ("}}", _) => out.push('}'),
            (_, Some(name)) => {
                let value = vars.lookup(name.as_str()).ok_or_else(|| {
                    DomainError::UnboundPlaceholder {
                        template: template.to_string(),
                        placeholder: name.as_str().to_string(),
                    }
                })?;
                out.push_str(value);
            }
            (brace, None) => {
                let reason = if brace == "{" {
                    "unclosed '{'"
                } else {
                    "single '}' encountered"
                };
                return Err(DomainError::MalformedTemplate {
                    template: template.to_string(),
                    reason: reason.to_string(),
                });
            }
        }
    }
    out.push_str(&template[last..]);

    Ok(out)
}

/// Render `template` and expand a leading `~`.
pub fn expand_path(template: &str, vars: &TemplateVars<'_>) -> Result<PathBuf, DomainError> {
    let rendered = render(template, vars)?;
    Ok(PathBuf::from(shellexpand::tilde(&rendered).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_both_placeholders_when_render_then_substitutes() {
        let vars = TemplateVars::new("draft", "v1.2-3-gabc");
        let out = render("out/{destination}/paper_{version}.pdf", &vars).unwrap();
        assert_eq!(out, "out/draft/paper_v1.2-3-gabc.pdf");
    }

    #[test]
    fn given_repeated_placeholder_when_render_then_substitutes_each() {
        let vars = TemplateVars::new("release", "1.0");
        let out = render("{version}/{version}", &vars).unwrap();
        assert_eq!(out, "1.0/1.0");
    }

    #[test]
    fn given_escaped_braces_when_render_then_literal() {
        let vars = TemplateVars::new("draft", "1.0");
        let out = render("{{literal}}_{version}", &vars).unwrap();
        assert_eq!(out, "{literal}_1.0");
    }

    #[test]
    fn given_unknown_placeholder_when_render_then_unbound_error() {
        let vars = TemplateVars::new("draft", "1.0");
        let err = render("out/{author}.pdf", &vars).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnboundPlaceholder {
                template: "out/{author}.pdf".into(),
                placeholder: "author".into(),
            }
        );
    }

    #[test]
    fn given_unclosed_brace_when_render_then_malformed() {
        let vars = TemplateVars::new("draft", "1.0");
        assert!(matches!(
            render("out/{version", &vars),
            Err(DomainError::MalformedTemplate { .. })
        ));
        assert!(matches!(
            render("out/version}", &vars),
            Err(DomainError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn given_text_around_placeholders_when_render_then_text_kept() {
        let vars = TemplateVars::new("draft", "1.0");
        let out = render("a-{version}-b{{c}}d{destination}", &vars).unwrap();
        assert_eq!(out, "a-1.0-b{c}ddraft");
        assert_eq!(render("plain/path.txt", &vars).unwrap(), "plain/path.txt");
    }

    #[test]
    fn given_tilde_when_expand_path_then_home_dir() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let vars = TemplateVars::new("draft", "1.0");
        let path = expand_path("~/pub/{destination}.pdf", &vars).unwrap();
        assert_eq!(path, PathBuf::from(format!("{home}/pub/draft.pdf")));
    }

    #[test]
    fn given_tilde_not_leading_when_expand_path_then_untouched() {
        let vars = TemplateVars::new("draft", "1.0");
        let path = expand_path("out/~/{version}", &vars).unwrap();
        assert_eq!(path, PathBuf::from("out/~/1.0"));
    }
}
