//! Constants for export-tidy
//!
//! Default policy lists, patterns and message formats shared across modules.

// === Patterns ===

/// UUID suffix appended by the exporter: leading whitespace, then 32 hex
/// digits optionally grouped 8-4-4-4-12 by dashes or spaces
pub const UUID_SUFFIX_PATTERN: &str = r"\s+[a-fA-F0-9]{8}[-\s]?[a-fA-F0-9]{4}[-\s]?[a-fA-F0-9]{4}[-\s]?[a-fA-F0-9]{4}[-\s]?[a-fA-F0-9]{12}";

// === File and Directory Names ===

/// Directory names never traversed or renamed
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // version control
    ".git", ".svn", ".hg", ".bzr",
    // tooling
    "node_modules", "__pycache__", ".idea", ".vscode", ".vs", "vendor", "bin", "obj",
    // build output and caches
    "build", "dist", ".cache", ".npm", ".yarn",
    // macOS
    ".DS_Store", ".Spotlight-V100", ".Trashes", ".AppleDouble", ".LSOverride",
    // Windows
    "$RECYCLE.BIN", "System Volume Information", "Thumbs.db", "ehthumbs.db", "Desktop.ini",
    // scratch
    "tmp", "temp", ".tmp", ".temp",
];

/// OS-generated files left untouched
pub const DEFAULT_IGNORE_FILES: &[&str] = &["Thumbs.db", ".DS_Store", "desktop.ini", "Desktop.ini"];

/// Extensions (lowercase, without dot) whose content gets cleaned
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown",
    "html", "htm", "css", "js",
    "json", "yaml", "yml", "xml", "ini", "conf",
    "py", "java", "c", "cpp", "h", "cs", "php", "rb", "pl", "sh", "bat", "ps1",
    "csv", "tsv", "sql",
];

/// Extension of files that get lint fixes and relinking
pub const MARKDOWN_EXTENSION: &str = "md";

/// Number of bytes read when probing a file for UTF-8
pub const TEXT_PROBE_BYTES: usize = 1024;

// === Environment ===

/// Root directory override used when `--root` is absent
pub const ENV_ROOT: &str = "EXPORT_TIDY_ROOT";

// === Markdown ===

/// Trailing heading punctuation removed by the linter
pub const HEADING_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '。', '，', '；', '：', '！'];

/// Hard line break marker kept at the end of a line
pub const HARD_BREAK: &str = "  ";
