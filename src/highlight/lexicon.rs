//! Static language lexicons
//!
//! Each [`Lexicon`] is read-only data: keyword and builtin word lists plus the
//! handful of patterns that differ between languages (comment and string
//! delimiters, numeric literal shape, operators). The highlighting algorithm
//! itself lives in [`super::Highlighter`] and is shared by every lexicon, so a
//! new language is added by declaring another `Lexicon` here.

use super::{Category, ClassFamily};

/// One alternative of a lexicon's comment/string scan.
///
/// Rules are tried leftmost-first; at the same start position earlier rules
/// win, so longer delimiters must be listed before their prefixes.
/// Patterns must only use non-capturing groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexemeRule {
    pub category: Category,
    pub pattern: &'static str,
}

impl LexemeRule {
    pub const fn comment(pattern: &'static str) -> Self {
        Self {
            category: Category::Comment,
            pattern,
        }
    }

    pub const fn string(pattern: &'static str) -> Self {
        Self {
            category: Category::String,
            pattern,
        }
    }
}

/// Library-specific builtin names layered on top of a base lexicon.
#[derive(Debug)]
pub struct Dialect {
    pub name: &'static str,
    pub builtins: &'static [&'static str],
}

/// Static description of one highlightable language.
#[derive(Debug)]
pub struct Lexicon {
    /// Canonical name, also the first alias
    pub name: &'static str,
    /// Lower-case fence tags that select this lexicon
    pub aliases: &'static [&'static str],
    pub family: ClassFamily,
    /// Keywords and builtins match regardless of case
    pub case_insensitive: bool,
    /// Comment and string delimiters in precedence order
    pub lexemes: &'static [LexemeRule],
    /// Numeric literal pattern
    pub number: Option<&'static str>,
    /// Decorator pattern
    pub decorator: Option<&'static str>,
    pub builtins: &'static [&'static str],
    /// Builtins are only tagged when followed by `(`
    pub call_syntax: bool,
    pub dialect: Option<&'static Dialect>,
    pub keywords: &'static [&'static str],
    /// Operator spellings. The HTML-escaped form of each is matched as well.
    pub operators: &'static [&'static str],
}

impl Lexicon {
    /// Base builtins followed by any dialect additions
    pub fn builtin_terms(&self) -> impl Iterator<Item = &'static str> + '_ {
        let extra: &'static [&'static str] = self.dialect.map(|d| d.builtins).unwrap_or(&[]);
        self.builtins.iter().chain(extra.iter()).copied()
    }

    /// Whether `tag` (already trimmed and lower-cased) selects this lexicon
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.aliases.iter().any(|alias| *alias == tag)
    }
}

/// Lexicons compiled into every default registry, in lookup order
pub static BUILTIN_LEXICONS: [&Lexicon; 4] = [&SQL, &PYTHON, &PYSPARK, &R];

/// Fallback for unknown or missing fence tags: no rules at all.
pub static PLAIN: Lexicon = Lexicon {
    name: "plain",
    aliases: &[],
    family: ClassFamily::Python,
    case_insensitive: false,
    lexemes: &[],
    number: None,
    decorator: None,
    builtins: &[],
    call_syntax: false,
    dialect: None,
    keywords: &[],
    operators: &[],
};

pub static SQL: Lexicon = Lexicon {
    name: "sql",
    aliases: &[
        "sql",
        "mysql",
        "postgresql",
        "postgres",
        "sqlite",
        "tsql",
        "plsql",
    ],
    family: ClassFamily::Sql,
    case_insensitive: true,
    lexemes: &[
        LexemeRule::comment(r"/\*[\s\S]*?\*/"),
        LexemeRule::comment(r"--[^\n]*"),
        LexemeRule::string(r"'(?:[^'\\]|\\[\s\S])*'"),
    ],
    number: Some(r"\b\d+\.?\d*(?:[eE][+-]?\d+)?\b"),
    decorator: None,
    builtins: SQL_FUNCTIONS,
    call_syntax: true,
    dialect: None,
    keywords: SQL_KEYWORDS,
    operators: &[],
};

const PYTHON_BASE: Lexicon = Lexicon {
    name: "python",
    aliases: &["python", "py", "python3"],
    family: ClassFamily::Python,
    case_insensitive: false,
    lexemes: &[
        LexemeRule::string(r#""""(?:\\[\s\S]|[^\\])*?""""#),
        LexemeRule::string(r"'''(?:\\[\s\S]|[^\\])*?'''"),
        LexemeRule::comment(r"#[^\n]*"),
        LexemeRule::string(r#""(?:[^"\\\n]|\\[\s\S])*""#),
        LexemeRule::string(r"'(?:[^'\\\n]|\\[\s\S])*'"),
    ],
    number: Some(r"\b\d+\.?\d*(?:[eE][+-]?\d+)?[jJ]?\b"),
    decorator: Some(r"@[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*"),
    builtins: PYTHON_BUILTINS,
    call_syntax: false,
    dialect: None,
    keywords: PYTHON_KEYWORDS,
    operators: &[],
};

pub static PYTHON: Lexicon = PYTHON_BASE;

pub static SPARK_DIALECT: Dialect = Dialect {
    name: "pyspark",
    builtins: PYSPARK_BUILTINS,
};

pub static PYSPARK: Lexicon = Lexicon {
    name: "pyspark",
    aliases: &["pyspark", "spark"],
    dialect: Some(&SPARK_DIALECT),
    ..PYTHON_BASE
};

pub static R: Lexicon = Lexicon {
    name: "r",
    aliases: &["r", "rlang", "rscript"],
    family: ClassFamily::Python,
    case_insensitive: false,
    lexemes: &[
        LexemeRule::comment(r"#[^\n]*"),
        LexemeRule::string(r#"\b[rR]["'](?:\([\s\S]*?\)|\[[\s\S]*?\]|\{[\s\S]*?\})["']"#),
        LexemeRule::string(r#""(?:[^"\\]|\\[\s\S])*""#),
        LexemeRule::string(r"'(?:[^'\\]|\\[\s\S])*'"),
    ],
    number: Some(r"\b\d+\.?\d*(?:[eE][+-]?\d+)?[Li]?\b"),
    decorator: None,
    builtins: R_BUILTINS,
    call_syntax: false,
    dialect: None,
    keywords: R_KEYWORDS,
    operators: &["<<-", "<-", "->>", "->", "%>%", "%<>%", "|>"],
};

const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER",
    "TABLE", "DATABASE", "INDEX", "VIEW", "JOIN", "LEFT", "RIGHT", "INNER", "OUTER",
    "FULL", "CROSS", "ON", "USING", "AS", "AND", "OR", "NOT", "NULL", "IS", "IN",
    "BETWEEN", "LIKE", "ORDER", "BY", "GROUP", "HAVING", "LIMIT", "OFFSET", "DISTINCT",
    "UNION", "ALL", "INTERSECT", "EXCEPT", "EXISTS", "CASE", "WHEN", "THEN", "ELSE",
    "END", "IF", "WITH", "RECURSIVE", "ASC", "DESC", "INTO", "VALUES", "SET", "DEFAULT",
    "PRIMARY", "KEY", "FOREIGN", "REFERENCES", "CONSTRAINT", "UNIQUE", "CHECK",
    "AUTO_INCREMENT", "SERIAL", "AUTOINCREMENT", "IDENTITY", "RETURNS", "BEGIN",
    "COMMIT", "ROLLBACK", "TRANSACTION", "GRANT", "REVOKE", "CASCADE", "RESTRICT",
    "INT", "INTEGER", "BIGINT", "SMALLINT", "TINYINT", "DECIMAL", "NUMERIC", "FLOAT",
    "REAL", "DOUBLE", "VARCHAR", "CHAR", "TEXT", "BLOB", "DATE", "TIME", "DATETIME",
    "TIMESTAMP", "BOOLEAN", "BOOL", "ENUM", "JSON", "ARRAY",
];

const SQL_FUNCTIONS: &[&str] = &[
    "COUNT", "SUM", "AVG", "MAX", "MIN", "CONCAT", "UPPER", "LOWER", "LENGTH",
    "SUBSTRING", "TRIM", "ROUND", "FLOOR", "CEIL", "ABS", "NOW", "CURRENT_DATE",
    "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATE", "TIME", "YEAR", "MONTH", "DAY",
    "COALESCE", "NULLIF", "CAST", "CONVERT",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "as", "if", "elif", "else", "for", "while",
    "return", "try", "except", "finally", "with", "lambda", "yield", "async", "await",
    "pass", "break", "continue", "and", "or", "not", "in", "is", "None", "True", "False",
    "raise", "assert", "del", "global", "nonlocal",
];

const PYTHON_BUILTINS: &[&str] = &[
    "print", "len", "range", "str", "int", "float", "list", "dict", "set", "tuple",
    "open", "input", "type", "isinstance", "enumerate", "zip", "map", "filter", "sum",
    "max", "min", "sorted", "reversed", "all", "any", "abs", "round", "pow",
];

const PYSPARK_BUILTINS: &[&str] = &[
    "SparkSession", "SparkContext", "SQLContext", "HiveContext",
    "DataFrame", "Column", "Row", "GroupedData",
    "select", "filter", "where", "groupBy", "orderBy", "sortBy",
    "join", "union", "distinct", "drop", "dropDuplicates",
    "withColumn", "withColumnRenamed", "alias", "cast",
    "agg", "count", "collect", "show", "printSchema", "describe",
    "read", "write", "csv", "json", "parquet", "orc", "jdbc",
    "createDataFrame", "createOrReplaceTempView", "sql",
    "cache", "persist", "unpersist", "checkpoint", "repartition", "coalesce",
    "broadcast", "accumulator", "parallelize",
    "map", "flatMap", "reduceByKey", "groupByKey", "sortByKey",
    "col", "lit", "when", "otherwise", "isnull", "isnan",
    "concat", "concat_ws", "substring", "trim", "lower", "upper",
    "split", "explode", "array", "struct", "to_date", "to_timestamp",
    "datediff", "date_add", "date_sub", "year", "month", "dayofmonth",
    "window", "partitionBy", "over", "rowNumber", "rank", "dense_rank",
    "lag", "lead", "first", "last", "collect_list", "collect_set",
    "approx_count_distinct", "countDistinct", "sumDistinct",
    "udf", "pandas_udf", "PandasUDFType",
];

const R_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "repeat", "in", "next", "break",
    "function", "return", "TRUE", "FALSE", "NULL", "NA", "NA_integer_",
    "NA_real_", "NA_complex_", "NA_character_", "Inf", "NaN",
    "library", "require", "source", "setwd", "getwd",
];

const R_BUILTINS: &[&str] = &[
    "print", "cat", "paste", "paste0", "sprintf", "format",
    "c", "list", "vector", "matrix", "array", "data.frame", "tibble",
    "length", "nrow", "ncol", "dim", "names", "colnames", "rownames",
    "head", "tail", "str", "summary", "class", "typeof", "mode",
    "sum", "mean", "median", "sd", "var", "min", "max", "range",
    "abs", "sqrt", "log", "log10", "log2", "exp", "round", "floor", "ceiling",
    "seq", "rep", "sort", "order", "rank", "rev", "unique", "duplicated",
    "which", "any", "all", "is.na", "is.null", "is.numeric", "is.character",
    "as.numeric", "as.character", "as.factor", "as.Date", "as.POSIXct",
    "subset", "merge", "rbind", "cbind", "split", "apply", "lapply", "sapply",
    "mapply", "tapply", "aggregate", "transform", "within",
    "read.csv", "read.table", "write.csv", "write.table", "readRDS", "saveRDS",
    "grep", "grepl", "sub", "gsub", "regexpr", "strsplit", "nchar", "substr",
    "tolower", "toupper", "trimws", "chartr",
    "factor", "levels", "nlevels", "droplevels", "cut", "table", "prop.table",
    "plot", "hist", "boxplot", "barplot", "pie", "lines", "points", "abline",
    "ggplot", "aes", "geom_point", "geom_line", "geom_bar", "geom_histogram",
    "geom_boxplot", "facet_wrap", "facet_grid", "theme", "labs", "ggtitle",
    "mutate", "select", "filter", "arrange", "group_by", "summarise", "summarize",
    "left_join", "right_join", "inner_join", "full_join", "anti_join", "semi_join",
    "bind_rows", "bind_cols", "pivot_longer", "pivot_wider", "gather", "spread",
    "rename", "relocate", "across", "everything", "starts_with", "ends_with",
    "contains", "matches", "num_range", "where", "pull", "distinct", "count",
    "slice", "slice_head", "slice_tail", "slice_min", "slice_max", "slice_sample",
    "lm", "glm", "aov", "anova", "t.test", "chisq.test", "cor", "cov",
    "predict", "fitted", "residuals", "coef", "confint",
    "tryCatch", "stop", "warning", "message", "stopifnot",
];
