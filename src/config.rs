//! Configuration for parsing and importing.

/// How the tabular source is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Number of leading lines to skip before data rows start.
    pub header_lines: usize,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_lines: 1,
            delimiter: b',',
        }
    }
}

impl ParserConfig {
    pub fn header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Settings for one [`TransactionImporter`](crate::TransactionImporter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub parser: ParserConfig,
    /// Remove the source file once its transactions are saved.
    pub remove_source: bool,
    /// How many times category resolution runs when the store reports that
    /// another writer created one of the new titles first.
    pub category_attempts: u32,
    /// Capacity of the channel between the row reader and the importer.
    pub channel_capacity: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            remove_source: true,
            category_attempts: 3,
            channel_capacity: 1024,
        }
    }
}

impl ImportConfig {
    pub fn parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn remove_source(mut self, remove_source: bool) -> Self {
        self.remove_source = remove_source;
        self
    }

    /// Values below 1 are raised to 1.
    pub fn category_attempts(mut self, attempts: u32) -> Self {
        self.category_attempts = attempts.max(1);
        self
    }

    /// Values below 1 are raised to 1.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}
