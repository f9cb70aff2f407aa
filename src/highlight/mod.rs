//! Lexical syntax highlighting for fenced code
//!
//! One algorithm, parametrized by a static [`Lexicon`]:
//!
//! 1. normalize box-drawing characters to ASCII
//! 2. protect comments and strings in a single leftmost-first scan
//! 3. protect numbers, decorators, builtins/functions, keywords and operators,
//!    in that order
//! 4. escape the remaining plain text and restore every protected region as a
//!    `<span>` carrying its category class
//!
//! Anything protected earlier is invisible to later steps, which gives the
//! precedence comments > strings > numbers > decorators > functions/builtins >
//! keywords > operators. A word listed both as a builtin and a keyword is
//! therefore tagged as a builtin.

mod category;
pub mod lexicon;
pub mod normalize;
pub mod vault;

pub use category::{Category, ClassFamily};
pub use lexicon::{Dialect, LexemeRule, Lexicon, BUILTIN_LEXICONS};
pub use vault::{ProtectedRegion, Vault};

use regex::{Captures, Regex};
use std::ops::Range;

use crate::error::{HighlightError, HighlightResult};
use crate::utils::text::escape_text;
use normalize::normalize_structure;

/// Default cap on fragment size; larger fragments pass through unhighlighted
pub const DEFAULT_MAX_FRAGMENT_BYTES: usize = 1024 * 1024;

/// Options shared by every highlighter in a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Escape `&`, `<`, `>` in emitted text. Disable when the caller has
    /// already escaped the fragment.
    pub escape_html: bool,
    /// Fragments above this size are rejected with
    /// [`HighlightError::FragmentTooLarge`]
    pub max_fragment_bytes: usize,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            escape_html: true,
            max_fragment_bytes: DEFAULT_MAX_FRAGMENT_BYTES,
        }
    }
}

/// A span of raw code plus its declared fence language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFragment<'a> {
    pub code: &'a str,
    /// Free-form language tag, matched case-insensitively; may be empty
    pub language: &'a str,
}

impl<'a> SourceFragment<'a> {
    pub fn new(code: &'a str, language: &'a str) -> Self {
        Self { code, language }
    }
}

/// Highlighted code: the fragment's text with `<span>` markup inserted.
///
/// Spans never cross a newline, so the text can be split into lines and each
/// line wrapped independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedOutput {
    /// Name of the lexicon that produced the markup
    pub language: &'static str,
    pub text: String,
}

impl TaggedOutput {
    /// Unhighlighted output: normalized and, if requested, escaped
    pub fn passthrough(code: &str, escape_html: bool) -> Self {
        let normalized = normalize_structure(code);
        let text = if escape_html {
            escape_text(&normalized).into_owned()
        } else {
            normalized.into_owned()
        };
        Self {
            language: lexicon::PLAIN.name,
            text,
        }
    }

    /// One entry per physical source line
    pub fn lines(&self) -> std::str::Split<'_, char> {
        self.text.split('\n')
    }
}

/// Comment/string rules of a lexicon compiled into one alternation
#[derive(Debug)]
struct LexemeSet {
    regex: Regex,
    groups: Vec<(String, Category)>,
}

impl LexemeSet {
    fn compile(rules: &[LexemeRule]) -> HighlightResult<Option<Self>> {
        if rules.is_empty() {
            return Ok(None);
        }
        let groups: Vec<(String, Category)> = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (format!("lex{i}"), rule.category))
            .collect();
        let pattern = rules
            .iter()
            .zip(&groups)
            .map(|(rule, (name, _))| format!("(?P<{name}>{})", rule.pattern))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Some(Self {
            regex: Regex::new(&pattern)?,
            groups,
        }))
    }

    fn select(&self, caps: &Captures<'_>) -> Option<(Range<usize>, Category)> {
        self.groups
            .iter()
            .find_map(|(name, category)| caps.name(name).map(|m| (m.range(), *category)))
    }
}

/// Compile a whole-word alternation, longest terms first.
///
/// With `call_syntax` the term must be followed by `(` and only the term
/// itself (group `tok`) is tagged.
fn word_set<'a>(
    terms: impl IntoIterator<Item = &'a str>,
    case_insensitive: bool,
    call_syntax: bool,
) -> HighlightResult<Option<Regex>> {
    let mut terms: Vec<&str> = terms.into_iter().collect();
    if terms.is_empty() {
        return Ok(None);
    }
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.dedup();

    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    let flags = if case_insensitive { "(?i)" } else { "" };
    let pattern = if call_syntax {
        format!(r"{flags}\b(?P<tok>{alternation})\s*\(")
    } else {
        format!(r"{flags}\b(?:{alternation})\b")
    };
    Ok(Some(Regex::new(&pattern)?))
}

/// Compile operator spellings, each in literal and HTML-escaped form
fn operator_set(operators: &[&str]) -> HighlightResult<Option<Regex>> {
    if operators.is_empty() {
        return Ok(None);
    }
    let mut spellings: Vec<String> = Vec::with_capacity(operators.len() * 2);
    for op in operators {
        spellings.push(op.to_string());
        let escaped = escape_text(op);
        if escaped != *op {
            spellings.push(escaped.into_owned());
        }
    }
    spellings.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    spellings.dedup();

    let pattern = spellings
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(Regex::new(&pattern)?))
}

/// A lexicon with its patterns compiled, ready to highlight fragments
#[derive(Debug)]
pub struct Highlighter {
    lexicon: &'static Lexicon,
    options: HighlightOptions,
    lexemes: Option<LexemeSet>,
    number: Option<Regex>,
    decorator: Option<Regex>,
    builtins: Option<Regex>,
    keywords: Option<Regex>,
    operators: Option<Regex>,
}

impl Highlighter {
    pub fn new(lexicon: &'static Lexicon, options: HighlightOptions) -> HighlightResult<Self> {
        Ok(Self {
            lexicon,
            lexemes: LexemeSet::compile(lexicon.lexemes)?,
            number: lexicon.number.map(Regex::new).transpose()?,
            decorator: lexicon.decorator.map(Regex::new).transpose()?,
            builtins: word_set(
                lexicon.builtin_terms(),
                lexicon.case_insensitive,
                lexicon.call_syntax,
            )?,
            keywords: word_set(
                lexicon.keywords.iter().copied(),
                lexicon.case_insensitive,
                false,
            )?,
            operators: operator_set(lexicon.operators)?,
            options,
        })
    }

    pub fn lexicon(&self) -> &'static Lexicon {
        self.lexicon
    }

    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Tag one fragment of code.
    ///
    /// Every byte of the (normalized) input survives; only span markup and,
    /// when enabled, HTML escapes are added.
    pub fn highlight(&self, code: &str) -> HighlightResult<TaggedOutput> {
        if code.len() > self.options.max_fragment_bytes {
            return Err(HighlightError::FragmentTooLarge {
                size: code.len(),
                max: self.options.max_fragment_bytes,
            });
        }

        let normalized = normalize_structure(code);
        let mut vault = Vault::for_text(&normalized)?;
        let mut text = normalized.into_owned();

        if let Some(lexemes) = &self.lexemes {
            text = vault.protect(&text, &lexemes.regex, |caps| lexemes.select(caps));
        }
        if let Some(number) = &self.number {
            text = vault.protect_matches(&text, number, Category::Number);
        }
        if let Some(decorator) = &self.decorator {
            text = vault.protect_matches(&text, decorator, Category::Decorator);
        }
        if let Some(builtins) = &self.builtins {
            text = vault.protect_token_group(&text, builtins, Category::Function);
        }
        if let Some(keywords) = &self.keywords {
            text = vault.protect_matches(&text, keywords, Category::Keyword);
        }
        if let Some(operators) = &self.operators {
            text = vault.protect_matches(&text, operators, Category::Operator);
        }

        log::trace!(
            "highlighted {} bytes of {} into {} regions",
            code.len(),
            self.lexicon.name,
            vault.len()
        );

        let plain = if self.options.escape_html {
            escape_text(&text)
        } else {
            text.as_str().into()
        };
        Ok(TaggedOutput {
            language: self.lexicon.name,
            text: vault.restore(&plain, |category, raw| self.wrap(category, raw)),
        })
    }

    /// Render a protected region, one `<span>` per line
    fn wrap(&self, category: Category, raw: &str) -> String {
        let class = category.class_name(self.lexicon.family);
        let mut out = String::with_capacity(raw.len() + 32);
        for (i, line) in raw.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if line.is_empty() {
                continue;
            }
            out.push_str("<span class=\"");
            out.push_str(class);
            out.push_str("\">");
            if self.options.escape_html {
                out.push_str(&escape_text(line));
            } else {
                out.push_str(line);
            }
            out.push_str("</span>");
        }
        out
    }
}

/// All compiled highlighters, resolved by fence tag.
///
/// Built once and passed by reference to whatever needs to highlight.
#[derive(Debug)]
pub struct Registry {
    highlighters: Vec<Highlighter>,
    plain: Highlighter,
}

impl Registry {
    /// Registry of the built-in SQL, Python, PySpark and R lexicons
    pub fn new(options: HighlightOptions) -> HighlightResult<Self> {
        Self::from_lexicons(&BUILTIN_LEXICONS, options)
    }

    pub fn from_lexicons(
        lexicons: &[&'static Lexicon],
        options: HighlightOptions,
    ) -> HighlightResult<Self> {
        let highlighters = lexicons
            .iter()
            .map(|&lexicon| Highlighter::new(lexicon, options.clone()))
            .collect::<HighlightResult<Vec<_>>>()?;
        Ok(Self {
            highlighters,
            plain: Highlighter::new(&lexicon::PLAIN, options)?,
        })
    }

    /// Highlighter for a fence tag, or the plain highlighter if unknown
    pub fn resolve(&self, tag: &str) -> &Highlighter {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return &self.plain;
        }
        match self
            .highlighters
            .iter()
            .find(|h| h.lexicon.matches_tag(&tag))
        {
            Some(highlighter) => highlighter,
            None => {
                log::debug!("no lexicon for language tag {tag:?}, passing through");
                &self.plain
            }
        }
    }

    /// Whether a fence tag selects a real lexicon
    pub fn is_known(&self, tag: &str) -> bool {
        !std::ptr::eq(self.resolve(tag), &self.plain)
    }

    /// Highlight a fragment, degrading to passthrough on failure
    pub fn highlight(&self, fragment: SourceFragment<'_>) -> TaggedOutput {
        let highlighter = self.resolve(fragment.language);
        match highlighter.highlight(fragment.code) {
            Ok(output) => output,
            Err(err) => {
                log::warn!(
                    "highlighting {} fragment failed, using plain text: {}",
                    highlighter.lexicon.name,
                    err
                );
                TaggedOutput::passthrough(fragment.code, highlighter.options.escape_html)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_registry() -> Registry {
        Registry::new(HighlightOptions {
            escape_html: false,
            ..Default::default()
        })
        .unwrap()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_sql_end_to_end() {
        let registry = Registry::new(HighlightOptions::default()).unwrap();
        let code = "-- get users\nSELECT name FROM users WHERE age > 18;";
        let out = registry.resolve("sql").highlight(code).unwrap();

        assert_eq!(
            out.text,
            "<span class=\"sql-comment\">-- get users</span>\n\
             <span class=\"sql-keyword\">SELECT</span> name \
             <span class=\"sql-keyword\">FROM</span> users \
             <span class=\"sql-keyword\">WHERE</span> age &gt; \
             <span class=\"sql-number\">18</span>;"
        );
    }

    #[test]
    fn test_sql_keyword_inside_string_not_tagged() {
        let registry = raw_registry();
        let out = registry
            .resolve("sql")
            .highlight("SELECT '--SELECT--' FROM t")
            .unwrap();

        assert_eq!(count(&out.text, "<span class=\"sql-keyword\">SELECT</span>"), 1);
        assert!(out.text.contains("<span class=\"sql-string\">'--SELECT--'</span>"));
        assert!(!out.text.contains("sql-comment"));
    }

    #[test]
    fn test_sql_word_boundary() {
        let registry = raw_registry();
        let out = registry.resolve("sql").highlight("SELECTED_ROWS").unwrap();
        assert_eq!(out.text, "SELECTED_ROWS");
    }

    #[test]
    fn test_sql_keywords_case_insensitive() {
        let registry = raw_registry();
        let out = registry.resolve("sql").highlight("select 1 from dual").unwrap();
        assert!(out.text.contains("<span class=\"sql-keyword\">select</span>"));
        assert!(out.text.contains("<span class=\"sql-keyword\">from</span>"));
    }

    #[test]
    fn test_sql_function_needs_call_syntax() {
        let registry = raw_registry();
        let out = registry
            .resolve("sql")
            .highlight("SELECT COUNT(*), DATE (created), date FROM t")
            .unwrap();
        assert!(out.text.contains("<span class=\"sql-function\">COUNT</span>(*)"));
        assert!(out.text.contains("<span class=\"sql-function\">DATE</span> (created)"));
        assert!(out.text.contains("<span class=\"sql-keyword\">date</span> "));
    }

    #[test]
    fn test_sql_block_comment_spanning_lines() {
        let registry = raw_registry();
        let out = registry
            .resolve("sql")
            .highlight("/* first\nsecond */ SELECT 1")
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "<span class=\"sql-comment\">/* first</span>");
        assert!(lines[1].starts_with("<span class=\"sql-comment\">second */</span>"));
    }

    #[test]
    fn test_python_comment_hash_inside_string() {
        let registry = raw_registry();
        let out = registry
            .resolve("python")
            .highlight("x = \"# not a comment\"  # real")
            .unwrap();
        assert!(out.text.contains("<span class=\"py-string\">\"# not a comment\"</span>"));
        assert!(out.text.contains("<span class=\"py-comment\"># real</span>"));
    }

    #[test]
    fn test_python_triple_quote_is_one_string() {
        let registry = raw_registry();
        let out = registry
            .resolve("py")
            .highlight("doc = \"\"\"say \"hi\" for x in y\"\"\"")
            .unwrap();
        assert_eq!(
            out.text,
            "doc = <span class=\"py-string\">\"\"\"say \"hi\" for x in y\"\"\"</span>"
        );
    }

    #[test]
    fn test_python_decorator_keyword_builtin() {
        let registry = raw_registry();
        let out = registry
            .resolve("python")
            .highlight("@app.route\ndef f(): return len(x)")
            .unwrap();
        assert!(out.text.contains("<span class=\"py-decorator\">@app.route</span>"));
        assert!(out.text.contains("<span class=\"py-keyword\">def</span>"));
        assert!(out.text.contains("<span class=\"py-keyword\">return</span>"));
        assert!(out.text.contains("<span class=\"py-builtin\">len</span>"));
    }

    #[test]
    fn test_python_keywords_case_sensitive() {
        let registry = raw_registry();
        let out = registry.resolve("python").highlight("DEF = None").unwrap();
        assert!(!out.text.contains(">DEF<"));
        assert!(out.text.contains("<span class=\"py-keyword\">None</span>"));
    }

    #[test]
    fn test_pyspark_dialect_adds_builtins() {
        let registry = raw_registry();
        let code = "df.withColumn('a', col('b'))";
        let spark = registry.resolve("pyspark").highlight(code).unwrap();
        let python = registry.resolve("python").highlight(code).unwrap();
        assert!(spark.text.contains("<span class=\"py-builtin\">withColumn</span>"));
        assert!(!python.text.contains("py-builtin"));
    }

    #[test]
    fn test_markup_words_are_not_retagged() {
        // `class` is a Python keyword and appears in every span's markup
        let registry = raw_registry();
        let out = registry.resolve("python").highlight("class A: x = 1").unwrap();
        assert_eq!(
            out.text,
            "<span class=\"py-keyword\">class</span> A: x = <span class=\"py-number\">1</span>"
        );
    }

    #[test]
    fn test_r_numbers_with_suffix() {
        let registry = raw_registry();
        let out = registry.resolve("r").highlight("x <- 10L + 2.5e3").unwrap();
        assert!(out.text.contains("<span class=\"py-number\">10L</span>"));
        assert!(out.text.contains("<span class=\"py-number\">2.5e3</span>"));
    }

    #[test]
    fn test_r_operators_both_spellings() {
        let registry = raw_registry();
        let literal = registry.resolve("r").highlight("x <- 1").unwrap();
        let escaped = registry.resolve("r").highlight("x &lt;- 1").unwrap();
        assert!(literal.text.contains("<span class=\"py-operator\"><-</span>"));
        assert!(escaped.text.contains("<span class=\"py-operator\">&lt;-</span>"));
    }

    #[test]
    fn test_r_pipe_and_dotted_builtins() {
        let registry = raw_registry();
        let out = registry
            .resolve("rscript")
            .highlight("df %>% filter(is.na(x)) |> data.frame()")
            .unwrap();
        assert!(out.text.contains("<span class=\"py-operator\">%>%</span>"));
        assert!(out.text.contains("<span class=\"py-operator\">|></span>"));
        assert!(out.text.contains("<span class=\"py-builtin\">is.na</span>"));
        assert!(out.text.contains("<span class=\"py-builtin\">data.frame</span>"));
    }

    #[test]
    fn test_unknown_language_passes_through() {
        let registry = Registry::new(HighlightOptions::default()).unwrap();
        assert!(!registry.is_known("cobol"));
        assert!(registry.is_known(" SQL "));
        let out = registry.highlight(SourceFragment::new("if a < b", "cobol"));
        assert_eq!(out.language, "plain");
        assert_eq!(out.text, "if a &lt; b");
    }

    #[test]
    fn test_oversized_fragment_degrades() {
        let registry = Registry::new(HighlightOptions {
            max_fragment_bytes: 8,
            ..Default::default()
        })
        .unwrap();
        let code = "SELECT 1 FROM big_table";
        assert!(matches!(
            registry.resolve("sql").highlight(code),
            Err(HighlightError::FragmentTooLarge { .. })
        ));
        let out = registry.highlight(SourceFragment::new(code, "sql"));
        assert_eq!(out.text, code);
    }

    #[test]
    fn test_tree_characters_normalized_before_highlighting() {
        let registry = raw_registry();
        let out = registry.resolve("").highlight("├── src").unwrap();
        assert_eq!(out.text, "|-- src");
    }

    const SAMPLES: &[(&str, &str)] = &[
        (
            "sql",
            "/* header\n   spans lines */\nSELECT COUNT(*) AS n, 'it''s' -- trailing\nFROM orders o\nWHERE o.total >= 1.5e3 AND o.note <> 'a & b';",
        ),
        (
            "python",
            "@dataclass\nclass Row:\n    \"\"\"Doc with 'quotes' and # hash\"\"\"\n    def f(self, x=0x1F):\n        return len(x) if x < 10 else None  # done\n",
        ),
        (
            "pyspark",
            "df = spark.read.csv('in.csv')\ndf.groupBy('k').agg(count('*')).show()\n",
        ),
        (
            "r",
            "x <- c(1L, 2.5, 3i)\n# comment with <- arrow\ny <<- x %>% filter(!is.na(.)) |> head()\nz <- r\"(raw \"string\")\"\n",
        ),
        ("text", "plain <b>text</b> & more\n"),
    ];

    fn escaped_registry() -> Registry {
        Registry::new(HighlightOptions::default()).unwrap()
    }

    /// Remove span markup and undo HTML escaping
    fn strip_markup(html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut rest = html;
        while let Some(start) = rest.find('<') {
            out.push_str(&rest[..start]);
            let end = rest[start..].find('>').expect("unclosed tag") + start;
            rest = &rest[end + 1..];
        }
        out.push_str(rest);
        out.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
    }

    /// Deepest span nesting in the output
    fn max_span_depth(html: &str) -> usize {
        let mut depth = 0usize;
        let mut max = 0;
        let mut rest = html;
        while let Some(pos) = rest.find('<') {
            rest = &rest[pos..];
            if rest.starts_with("<span") {
                depth += 1;
                max = max.max(depth);
            } else if rest.starts_with("</span>") {
                depth -= 1;
            }
            rest = &rest[1..];
        }
        assert_eq!(depth, 0, "unbalanced spans in {html}");
        max
    }

    #[test]
    fn test_containment_keyword_inside_string() {
        let registry = escaped_registry();
        let out = registry.highlight(SourceFragment::new("SELECT '--SELECT--' FROM t", "sql"));

        assert_eq!(out.text.matches("sql-keyword\">SELECT<").count(), 1);
        assert!(out.text.contains("<span class=\"sql-string\">'--SELECT--'</span>"));
        assert!(!out.text.contains("sql-comment"));
    }

    #[test]
    fn test_containment_keyword_inside_comment() {
        let registry = escaped_registry();
        let out = registry.highlight(SourceFragment::new("x = 1  # if return while", "python"));
        assert!(!out.text.contains("py-keyword"));
        assert!(out.text.contains("<span class=\"py-comment\"># if return while</span>"));
    }

    #[test]
    fn test_word_boundary() {
        let registry = escaped_registry();
        let out = registry.highlight(SourceFragment::new("SELECTED_ROWS", "sql"));
        assert_eq!(out.text, "SELECTED_ROWS");

        let out = registry.highlight(SourceFragment::new("classify = define", "python"));
        assert_eq!(out.text, "classify = define");
    }

    #[test]
    fn test_round_trip_byte_preservation() {
        let registry = escaped_registry();
        for (language, code) in SAMPLES {
            let out = registry.highlight(SourceFragment::new(code, language));
            assert_eq!(&strip_markup(&out.text), code, "language {language}");
        }
    }

    #[test]
    fn test_round_trip_without_escaping() {
        let registry = raw_registry();
        let code = "SELECT a, b FROM t WHERE c = 'x' -- note";
        let out = registry.highlight(SourceFragment::new(code, "postgres"));
        assert_eq!(strip_markup(&out.text), code);
    }

    #[test]
    fn test_spans_never_nest() {
        let registry = escaped_registry();
        for (language, code) in SAMPLES {
            let out = registry.highlight(SourceFragment::new(code, language));
            assert!(max_span_depth(&out.text) <= 1, "language {language}: {}", out.text);
        }
    }

    #[test]
    fn test_spans_never_cross_lines() {
        let registry = escaped_registry();
        for (language, code) in SAMPLES {
            let out = registry.highlight(SourceFragment::new(code, language));
            for line in out.lines() {
                max_span_depth(line);
            }
        }
    }

    #[test]
    fn test_synonym_equivalence() {
        let registry = escaped_registry();
        let (_, code) = SAMPLES[1];
        let py = registry.highlight(SourceFragment::new(code, "py"));
        let python = registry.highlight(SourceFragment::new(code, "python"));
        let python3 = registry.highlight(SourceFragment::new(code, "Python3"));
        assert_eq!(py, python);
        assert_eq!(python, python3);

        let (_, sql) = SAMPLES[0];
        let reference = registry.highlight(SourceFragment::new(sql, "sql"));
        for tag in ["mysql", "postgresql", "postgres", "sqlite", "tsql", "plsql"] {
            assert_eq!(registry.highlight(SourceFragment::new(sql, tag)).text, reference.text);
        }
    }

    #[test]
    fn test_operator_dual_spelling() {
        let literal = escaped_registry().highlight(SourceFragment::new("x <- y |> f()", "r"));
        let pre_escaped = raw_registry().highlight(SourceFragment::new("x &lt;- y |&gt; f()", "r"));

        assert_eq!(literal.text, pre_escaped.text);
        assert!(literal.text.contains("<span class=\"py-operator\">&lt;-</span>"));
        assert!(literal.text.contains("<span class=\"py-operator\">|&gt;</span>"));
    }

    #[test]
    fn test_fragments_highlight_in_parallel() {
        let registry = escaped_registry();
        let expected: Vec<String> = SAMPLES
            .iter()
            .map(|(language, code)| registry.highlight(SourceFragment::new(code, language)).text)
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = SAMPLES
                .iter()
                .map(|(language, code)| {
                    let registry = &registry;
                    scope.spawn(move || registry.highlight(SourceFragment::new(code, language)).text)
                })
                .collect();
            for (handle, expected) in handles.into_iter().zip(&expected) {
                assert_eq!(&handle.join().unwrap(), expected);
            }
        });
    }
}
