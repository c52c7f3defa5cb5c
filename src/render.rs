//! Row preparation and rendering for documentation tables.
//!
//! The resolver's output is consumed by a documentation renderer that turns
//! each descriptor into a table row. This module builds the per-parameter
//! template context ([`RowContext`]) and ships a default renderer that
//! produces RST `list-table` rows or plain HTML table rows from embedded
//! Tera templates.
//!
//! Descriptions may embed a literal example block introduced by the RST
//! `::` marker; the block is split out of the prose so templates can place
//! it separately.
//!
//! # Examples
//!
//! ```
//! use paramref::render::{render_rows, RenderFormat, RenderOptions};
//! use paramref::table::ParameterTable;
//!
//! let doc = r#"
//! resource_provider_uuid:
//!   type: string
//!   in: path
//!   required: true
//!   description: The uuid of a resource provider.
//! "#;
//! let resolved = ParameterTable::from_str(doc)?.resolve()?;
//! let rst = render_rows(&resolved, &RenderOptions::default())?;
//! assert!(rst.contains("* - resource_provider_uuid"));
//! # Ok::<(), paramref::Error>(())
//! ```

// Internal imports (std, crate)
use std::str::FromStr;

use crate::descriptor::ParameterDescriptor;
use crate::error::{Error, Result};
use crate::table::ResolvedTable;

// External imports (alphabetized)
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

const RST_TEMPLATE: &str = "rows.rst";
const HTML_TEMPLATE: &str = "rows.html";

/// Indentation of literal-block content inside an RST list-table cell
const RST_BLOCK_INDENT: &str = "         ";

const RST_ROWS: &str = r#".. list-table::{% if title %} {{ title }}{% endif %}
   :header-rows: 1
   :widths: 20 10 10 10 50

   * - Name
     - In
     - Type
     - Required
     - Description{% for row in rows %}
   * - {{ row.name }}
     - {{ row.location }}
     - {{ row.param_type }}
     - {% if row.required %}required{% else %}optional{% endif %}
     - {{ row.description }}{% if row.example_block %}

       ::

{{ row.example_block }}{% endif %}{% endfor %}
"#;

const HTML_ROWS: &str = r#"<table class="api-ref-params">
  <tr>
    <th>Name</th>
    <th>In</th>
    <th>Type</th>
    <th>Required</th>
    <th>Description</th>
  </tr>{% for row in rows %}
  <tr>
    <td>{{ row.name }}</td>
    <td>{{ row.location }}</td>
    <td>{{ row.param_type }}</td>
    <td>{% if row.required %}required{% else %}optional{% endif %}</td>
    <td>{{ row.description }}{% if row.example %}<pre>{{ row.example }}</pre>{% endif %}</td>
  </tr>{% endfor %}
</table>
"#;

/// Shared Tera engine holding the embedded row templates.
///
/// Templates named `*.html` are auto-escaped by Tera, which is exactly what
/// the HTML rows need.
static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![(RST_TEMPLATE, RST_ROWS), (HTML_TEMPLATE, HTML_ROWS)])
        .expect("embedded row templates are valid");
    tera
});

/// Output format for rendered rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// RST `list-table` rows, the format api-ref tables are written in
    #[default]
    Rst,
    /// Plain HTML table rows
    Html,
}

impl RenderFormat {
    /// Wire name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rst => "rst",
            Self::Html => "html",
        }
    }

    fn template_name(&self) -> &'static str {
        match self {
            Self::Rst => RST_TEMPLATE,
            Self::Html => HTML_TEMPLATE,
        }
    }
}

impl FromStr for RenderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rst" => Ok(Self::Rst),
            "html" => Ok(Self::Html),
            other => Err(Error::config(format!("unknown render format '{other}'"))),
        }
    }
}

/// Options controlling row rendering
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Output format
    pub format: RenderFormat,
    /// Optional table caption
    pub title: Option<String>,
    /// If non-empty, only these parameters are rendered
    pub include: Vec<String>,
    /// Parameters to leave out
    pub exclude: Vec<String>,
}

impl RenderOptions {
    fn selects(&self, name: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|n| n == name) {
            return false;
        }
        !self.exclude.iter().any(|n| n == name)
    }
}

/// Per-parameter template context handed to the row templates
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowContext {
    /// Parameter name
    pub name: String,
    /// Wire name of the location ("path", "query", "body")
    pub location: String,
    /// Wire name of the type
    pub param_type: String,
    /// Whether the parameter must be supplied
    pub required: bool,
    /// Description prose, collapsed to a single line for the table cell
    pub description: String,
    /// Embedded example block, dedented, if the description carried one
    pub example: Option<String>,
    /// The example pre-indented for an RST literal block inside a cell
    pub example_block: Option<String>,
}

impl RowContext {
    /// Build the template context for one resolved descriptor
    pub fn new(desc: &ParameterDescriptor) -> Self {
        let (prose, example) = split_example(&desc.description);
        let description = prose.split_whitespace().collect::<Vec<_>>().join(" ");
        let example = example.map(|block| dedent(&block));
        let example_block = example
            .as_deref()
            .map(|block| indent_block(block, RST_BLOCK_INDENT));
        Self {
            name: desc.name.clone(),
            location: desc.location.as_str().to_string(),
            param_type: desc.param_type.as_str().to_string(),
            required: desc.required,
            description,
            example,
            example_block,
        }
    }
}

/// Render the resolved table into documentation rows.
///
/// Rows follow the authoring order of the source document, filtered by the
/// options' include/exclude lists.
pub fn render_rows(table: &ResolvedTable, options: &RenderOptions) -> Result<String> {
    let rows: Vec<RowContext> = table
        .iter()
        .filter(|desc| options.selects(&desc.name))
        .map(RowContext::new)
        .collect();

    let mut context = Context::new();
    context.insert("title", &options.title);
    context.insert("rows", &rows);
    let rendered = TEMPLATES.render(options.format.template_name(), &context)?;
    Ok(rendered)
}

/// Split a description into prose and an embedded literal example block.
///
/// The block is introduced by the RST `::` marker. A marker attached to the
/// prose ("Example::") renders as a single colon; a detached marker is
/// dropped entirely, matching RST literal-block semantics.
fn split_example(description: &str) -> (String, Option<String>) {
    let Some((head, tail)) = description.split_once("::\n") else {
        return (description.trim().to_string(), None);
    };
    let block = tail.trim_matches('\n').trim_end().to_string();
    let block = if block.is_empty() { None } else { Some(block) };
    let attached = head.chars().last().map(|c| !c.is_whitespace()).unwrap_or(false);
    let prose = if attached {
        format!("{}:", head.trim_start())
    } else {
        head.trim().to_string()
    };
    (prose, block)
}

/// Strip the common leading indentation from every line of a block
fn dedent(block: &str) -> String {
    let indent = block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    block
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.chars().skip(indent).collect()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every non-blank line of a block with the given indentation
fn indent_block(block: &str, prefix: &str) -> String {
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
