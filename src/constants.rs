/// Fixed store and artifact locations shared by every entry point.
///
/// The extractor reads the raw corpus once, writes the derived store once,
/// and each chart binary re-reads the derived store on its own.

/// Raw corpus: an array of per-paper entries, each with a "Data" list.
pub const RAW_STORE: &str = "WAAM.json";

/// Derived store: flat records grouped under their alloy-category label.
pub const DERIVED_STORE: &str = "WAAM_alloy_data.json";

/// Authors-institute artifact produced by the `authors` subcommand.
pub const AUTHORS_OUTPUT: &str = "authors_institutes.json";

/// Directory for rotating JSON log files.
pub const LOG_DIR: &str = "logs";
