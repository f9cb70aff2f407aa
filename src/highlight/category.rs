//! Lexical categories and the CSS class names they render to.

/// Lexical category assigned to a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Comment,
    String,
    Number,
    /// Function calls and builtin names
    Function,
    Keyword,
    Decorator,
    /// Assignment arrows and pipe operators
    Operator,
}

impl Category {
    /// Every category, in precedence order
    pub const ALL: [Category; 7] = [
        Category::Comment,
        Category::String,
        Category::Number,
        Category::Decorator,
        Category::Function,
        Category::Keyword,
        Category::Operator,
    ];

    /// CSS class used for this category within a language family
    pub fn class_name(self, family: ClassFamily) -> &'static str {
        match (family, self) {
            (ClassFamily::Sql, Category::Comment) => "sql-comment",
            (ClassFamily::Sql, Category::String) => "sql-string",
            (ClassFamily::Sql, Category::Number) => "sql-number",
            (ClassFamily::Sql, Category::Function) => "sql-function",
            (ClassFamily::Sql, Category::Keyword) => "sql-keyword",
            (ClassFamily::Sql, Category::Decorator) => "sql-decorator",
            (ClassFamily::Sql, Category::Operator) => "sql-operator",
            (ClassFamily::Python, Category::Comment) => "py-comment",
            (ClassFamily::Python, Category::String) => "py-string",
            (ClassFamily::Python, Category::Number) => "py-number",
            (ClassFamily::Python, Category::Function) => "py-builtin",
            (ClassFamily::Python, Category::Keyword) => "py-keyword",
            (ClassFamily::Python, Category::Decorator) => "py-decorator",
            (ClassFamily::Python, Category::Operator) => "py-operator",
        }
    }
}

/// Class-naming scheme shared by a group of languages.
///
/// SQL dialects use the `sql-` prefix; Python, PySpark and R share `py-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassFamily {
    Sql,
    Python,
}

impl ClassFamily {
    pub fn prefix(self) -> &'static str {
        match self {
            ClassFamily::Sql => "sql",
            ClassFamily::Python => "py",
        }
    }
}
