//! Tunable word lists for the text validator.
//!
//! Kept apart from the rule code so thresholds and vocabularies can be tuned
//! without touching control flow.

/// Letters treated as vowels by the phonetic check.
pub const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Acts as a vowel anywhere but at the start of a word (`sky`, `rhythm`, but `you`).
pub const SEMI_VOWEL: char = 'y';

/// Minimum share of words that must look English for a candidate to pass.
pub const PHONETIC_WORD_RATIO: f64 = 0.5;

/// Minimum share of adjacent-letter transitions that alternate vowel/consonant.
pub const ALTERNATION_RATIO: f64 = 0.3;

/// Words longer than this must contain a common bigram.
pub const BIGRAM_MIN_WORD_LEN: usize = 4;

/// Runs of this many consonants (or vowels) need an allow-listed cluster.
pub const MAX_PLAIN_RUN: usize = 4;

/// Bounds of the mixed alphanumeric ID rule.
pub const ID_TOKEN_MIN_LEN: usize = 6;
pub const ID_TOKEN_MAX_LEN: usize = 64;

/// Frequent English bigrams. Longer words must contain at least one.
pub const COMMON_BIGRAMS: &[&str] = &[
    "th", "he", "in", "er", "an", "re", "on", "at", "en", "nd", "ti", "es", "or", "te", "of", "ed",
    "is", "it", "al", "ar", "st", "to", "nt", "ng", "se", "ha", "as", "ou", "io", "le", "ve", "co",
    "me", "de", "hi", "ri", "ro", "ic", "ne", "ea", "ra", "ce", "li", "ch", "ll", "be", "ma", "si",
    "om", "ur", "ca", "el", "ta", "la", "ns", "ge", "ly", "ei", "os", "no", "pe", "do", "su", "pa",
    "ec", "ac", "ot", "di", "ol", "tr", "sh", "lo", "ut", "us", "wa", "ad", "ai", "wh", "ow", "mo",
    "ss", "ee", "oo", "ck", "un", "ir", "ab", "ap", "up", "ie",
];

/// Closed set of English words of one or two letters.
pub const SHORT_WORDS: &[&str] = &[
    "a", "i", "ad", "ah", "am", "an", "as", "at", "aw", "ax", "be", "by", "do", "eh", "go", "ha",
    "he", "hi", "if", "in", "is", "it", "me", "my", "no", "of", "oh", "ok", "on", "or", "ow", "ox",
    "so", "to", "tv", "uh", "um", "up", "us", "we", "yo",
];

/// Clusters that make a run of four or more consonants acceptable.
pub const ALLOWED_CLUSTERS: &[&str] = &[
    "tch", "sch", "str", "scr", "spr", "spl", "thr", "chr", "phr", "shr", "nth", "ngth", "ght",
    "nch", "rst", "mpt", "nst", "lth", "fth", "rth", "ncl", "nsc", "mpl", "ntr", "ctr", "xtr",
    "ldr", "rds", "nds", "nts", "rts", "sts", "cts", "pts", "rld", "cks", "xth",
];

/// Single words that are markup or code vocabulary, never UI copy.
pub const TECHNICAL_WORDS: &[&str] = &[
    "div", "span", "img", "svg", "px", "em", "rem", "vh", "vw", "sm", "md", "lg", "xl", "xxl",
    "xs", "true", "false", "null", "nil", "undefined", "nan", "void", "async", "await", "const",
    "var", "let", "func", "fn", "impl", "enum", "struct", "typeof", "instanceof", "utf8", "json",
    "xml", "yaml", "html", "css", "scss", "http", "https", "api", "uuid", "flex", "grid",
    "inline", "stylesheet", "onclick", "href", "src", "btn", "noop", "todo", "fixme", "lorem",
    "ipsum", "params", "props", "args", "init", "config", "env", "tsx", "jsx", "vue", "npm",
    "localhost", "nowrap", "webkit", "moz",
];

/// Keywords whose presence next to `{` or `;` marks a candidate as code.
pub const CODE_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "return", "function", "const", "let", "var", "switch", "case",
    "import", "export", "class", "new", "throw", "try", "catch",
];

/// Extensions that make a space-free token read as a file path.
pub const FILE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "bmp", "avif", "css", "scss", "sass",
    "less", "js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "json", "html", "htm", "php", "md",
    "txt", "pdf", "xml", "yml", "yaml", "woff", "woff2", "ttf", "otf", "eot", "mp4", "mp3",
    "webm", "wav", "ogg", "zip", "csv", "xlsx", "docx",
];
