//! Print stylesheet generation
//!
//! The stylesheet is built from the configuration: page box, heading scale,
//! code box and one colour rule per highlight class.

use crate::config::Config;
use crate::highlight::{Category, ClassFamily};

/// Build the complete stylesheet for a converted document
pub fn generate_css(config: &Config) -> String {
    let base = config.typography.base_font_size;
    let code = &config.code;
    let wrap = if code.wrap { "pre-wrap" } else { "pre" };

    format!(
        r#"
    @page {{
        size: {page_size};
        margin: {margin}cm;
    }}

    * {{
        margin: 0;
        padding: 0;
        box-sizing: border-box;
    }}

    body {{
        font-family: 'DejaVu Sans', Georgia, serif;
        line-height: 1.5;
        color: #1a1a1a;
        font-size: {base}pt;
    }}

    h1 {{
        color: #2c3e50;
        font-size: {h1}pt;
        margin-bottom: 15px;
        margin-top: 0;
        padding-bottom: 8px;
        border-bottom: 2px solid #3498db;
        page-break-after: avoid;
    }}

    h2 {{
        color: #34495e;
        font-size: {h2}pt;
        margin-top: 20px;
        margin-bottom: 10px;
        padding-top: 5px;
        border-top: 1px solid #ecf0f1;
        page-break-after: avoid;
    }}

    h3 {{
        color: #555;
        font-size: {h3}pt;
        margin-top: 15px;
        margin-bottom: 8px;
        page-break-after: avoid;
    }}

    h4 {{
        color: #666;
        font-size: {base}pt;
        margin-top: 12px;
        margin-bottom: 6px;
    }}

    p {{
        margin-bottom: {paragraph}px;
        text-align: justify;
    }}

    strong {{
        color: #2c3e50;
        font-weight: 600;
    }}

    code {{
        font-family: 'DejaVu Sans Mono', 'Consolas', 'Monaco', 'Courier New', monospace;
        font-size: {base}pt;
        color: #000000;
    }}

    pre {{
        background-color: {code_bg} !important;
        padding: {pad_v}px {pad_h}px !important;
        margin: {margin_top}px 0 {margin_bottom}px 0 !important;
        border-radius: 3px;
        overflow: visible;
        word-wrap: break-word;
    }}

    .code-line {{
        font-family: 'DejaVu Sans Mono', 'Consolas', 'Monaco', 'Courier New', monospace;
        font-size: {code_size}pt;
        line-height: 1.4;
        margin: 0;
        padding: 0;
        border: none;
        background: transparent !important;
        display: block;
        white-space: {wrap};
        word-break: break-word;
    }}

    .code-block {{
        background-color: {code_bg} !important;
        overflow: visible;
        white-space: normal;
        word-wrap: break-word;
    }}
{highlight}
    table {{
        width: 100%;
        border-collapse: collapse;
        margin: 10px 0;
        font-size: {table_size}pt;
        page-break-inside: avoid;
    }}

    table th {{
        background-color: #3498db;
        color: white;
        padding: 5px 8px;
        text-align: left;
        font-weight: 600;
        border: 1px solid #2980b9;
        line-height: 1.2;
    }}

    table td {{
        border: 1px solid #ddd;
        padding: 4px 8px;
        vertical-align: top;
        line-height: 1.2;
    }}

    table tr:nth-child(even) {{
        background-color: #f9f9f9;
    }}

    ul, ol {{
        margin-left: 25px;
        margin-bottom: 10px;
    }}

    li {{
        margin-bottom: 4px;
        line-height: 1.4;
    }}

    blockquote {{
        border-left: 3px solid #3498db;
        padding: 8px 12px;
        margin: 10px 0;
        color: #555;
        font-style: italic;
        background-color: #f8f9fa;
    }}

    hr {{
        border: none;
        border-top: 1px solid #ecf0f1;
        margin: 15px 0;
    }}
{callouts}"#,
        page_size = config.page.page_size,
        margin = config.page.margin_cm,
        base = base,
        h1 = scaled(base, 2.0),
        h2 = scaled(base, 1.4),
        h3 = scaled(base, 1.2),
        paragraph = config.typography.paragraph_spacing,
        code_bg = code.background,
        pad_v = code.padding_vertical,
        pad_h = code.padding_horizontal,
        margin_top = code.margin_top,
        margin_bottom = code.margin_bottom,
        code_size = config.typography.code_font_size,
        wrap = wrap,
        highlight = highlight_rules(config),
        table_size = base - 1.0,
        callouts = callout_rules(),
    )
}

/// `base * factor` rounded to a tenth of a point
fn scaled(base: f64, factor: f64) -> f64 {
    (base * factor * 10.0).round() / 10.0
}

/// One rule per category and class family
fn highlight_rules(config: &Config) -> String {
    let colors = &config.colors;
    let mut css = String::new();
    for family in [ClassFamily::Sql, ClassFamily::Python] {
        for category in Category::ALL {
            let (color, extra) = match category {
                Category::Keyword => (colors.keyword.as_str(), "\n        font-weight: bold;"),
                Category::Comment => (colors.comment.as_str(), "\n        font-style: italic;"),
                Category::String => (colors.string.as_str(), ""),
                Category::Number => (colors.number.as_str(), ""),
                Category::Function if family == ClassFamily::Sql => {
                    (colors.function.as_str(), "\n        font-weight: bold;")
                }
                Category::Function | Category::Operator => (colors.function.as_str(), ""),
                Category::Decorator => (colors.decorator.as_str(), ""),
            };
            css.push_str(&format!(
                "\n    .{} {{\n        color: {};{}\n    }}\n",
                category.class_name(family),
                color,
                extra
            ));
        }
    }
    css
}

fn callout_rules() -> String {
    [
        ("warning", "#fff3cd", "#ffc107"),
        ("success", "#d4edda", "#28a745"),
        ("error", "#f8d7da", "#dc3545"),
        ("info", "#d1ecf1", "#0c5460"),
    ]
    .iter()
    .map(|(class, background, border)| {
        format!(
            "\n    .{class} {{\n        background-color: {background};\n        \
             border-left: 3px solid {border};\n        padding: 8px 12px;\n        \
             margin: 10px 0;\n        border-radius: 3px;\n    }}\n"
        )
    })
    .collect()
}
