//! Tags page templates.
//!
//! Templates use Jinja syntax and are interpreted by `minijinja` over a
//! JSON value tree. Nothing in a template is executed as code. The
//! environment matches a default `jinja2.Environment`: no auto-escaping,
//! undefined values render as empty strings, and a single trailing
//! newline of the source is dropped.
//!
//! Besides the built-in filters, templates get `slug` for heading anchors.
//!
//! # Example
//!
//! ```ignore
//! let template = Template::parse("tags.md", "{% for tag, pages in tags %}- {{ tag }}\n{% endfor %}")?;
//! let output = template.render(&context)?;
//! ```

use std::fmt;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

pub use minijinja::Error as TemplateError;

use crate::page::JsonMap;
use crate::utils::slug::slugify;

/// A parsed template, ready to render any number of times.
pub struct Template {
    env: Environment<'static>,
    name: String,
}

impl Template {
    /// Parse template source. `name` shows up in error messages.
    pub fn parse(name: impl Into<String>, source: impl Into<String>) -> Result<Self, TemplateError> {
        let name = name.into();
        let mut env = environment();
        env.add_template_owned(name.clone(), source.into())?;
        Ok(Self { env, name })
    }

    /// Render with the given top-level variables.
    pub fn render(&self, context: &JsonMap) -> Result<String, TemplateError> {
        self.env.get_template(&self.name)?.render(context)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Output is markdown, whatever the template file is called.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_undefined_behavior(UndefinedBehavior::Lenient);
    env.add_filter("slug", slug);
    env
}

fn slug(value: &str) -> String {
    slugify(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::ErrorKind;
    use serde_json::{Value as JsonValue, json};

    fn context(value: JsonValue) -> JsonMap {
        let JsonValue::Object(map) = value else {
            panic!("context must be an object");
        };
        map
    }

    fn render(source: &str, value: JsonValue) -> String {
        Template::parse("test.md", source)
            .unwrap()
            .render(&context(value))
            .unwrap()
    }

    #[test]
    fn test_interpolation() {
        assert_eq!(render("Hello {{ name }}!", json!({"name": "tola"})), "Hello tola!");
        assert_eq!(render("[{{ missing }}]", json!({})), "[]");
        assert_eq!(render("{{ 'lit' | upper }}", json!({})), "LIT");
    }

    #[test]
    fn test_pairs_and_loop() {
        let out = render(
            "{% for tag, pages in tags %}{{ loop.index }}.{{ tag }}={{ pages | join(',') }}{% if not loop.last %};{% endif %}{% endfor %}",
            json!({"tags": [["x", ["a", "b"]], ["y", ["b"]]]}),
        );
        assert_eq!(out, "1.x=a,b;2.y=b");
    }

    #[test]
    fn test_jinja_constructs() {
        let source = "{% set mark = '!' %}\
            {% if tags | length > 0 %}\
            {% for tag, pages in tags %}{{ tag ~ mark }}\
            {% for p in pages | sort(attribute='title') %} {{ p.title | e }}{% endfor %}\n\
            {% endfor %}\
            {% endif %}";
        let out = render(
            source,
            json!({"tags": [["x", [{"title": "b"}, {"title": "a <&>"}]]]}),
        );
        assert_eq!(out, "x! a &lt;&amp;&gt; b\n");
    }

    #[test]
    fn test_no_autoescape_for_html_names() {
        let template = Template::parse("tags.html", "{{ v }}").unwrap();
        let out = template.render(&context(json!({"v": "<b>"}))).unwrap();
        assert_eq!(out, "<b>");
    }

    #[test]
    fn test_whitespace_control() {
        let source = "<ul>\n{%- for x in xs %}\n  <li>{{ x }}</li>\n{%- endfor %}\n</ul>";
        assert_eq!(
            render(source, json!({"xs": [1, 2]})),
            "<ul>\n  <li>1</li>\n  <li>2</li>\n</ul>"
        );
    }

    #[test]
    fn test_trailing_newline_dropped() {
        assert_eq!(render("line\n", json!({})), "line");
        assert_eq!(render("line\n\n", json!({})), "line\n");
    }

    #[test]
    fn test_slug_filter() {
        assert_eq!(render("{{ t | slug }}", json!({"t": "  Big Data!"})), "big-data");
        assert_eq!(render("{{ t | slug }}", json!({"t": "Café"})), "cafe");
    }

    #[test]
    fn test_tojson_quotes_title() {
        assert_eq!(
            render("title: {{ title | tojson }}", json!({"title": "Tags: #1"})),
            "title: \"Tags: #1\""
        );
    }

    #[test]
    fn test_undefined_iterates_empty() {
        assert_eq!(render("[{% for x in nope %}{{ x }}{% endfor %}]", json!({})), "[]");
    }

    #[test]
    fn test_syntax_error() {
        let err = Template::parse("broken.md", "ok\n{% for x in tags %}\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
        assert!(err.to_string().contains("broken.md"));
    }

    #[test]
    fn test_render_error() {
        let template = Template::parse("t.md", "{% for a, b in xs %}{% endfor %}").unwrap();
        assert!(template.render(&context(json!({"xs": [[1, 2, 3]]}))).is_err());
    }

    #[test]
    fn test_parse_is_reusable() {
        let template = Template::parse("n.md", "{{ n }}").unwrap();
        for n in 0..3 {
            let out = template.render(&context(json!({ "n": n }))).unwrap();
            assert_eq!(out, n.to_string());
        }
    }
}
