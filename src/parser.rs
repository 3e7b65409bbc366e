//! Streaming reader for the tabular transaction source.
//!
//! Rows are read by a producer task and handed to the consumer through a
//! bounded channel. Only the shape of a row is checked here; interpreting the
//! type and value is left to the importer.

use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::debug;

use crate::config::ParserConfig;
use crate::dto::ParsedRow;
use crate::error::{Error, ParseError};

/// Cells per row: title, type, value, category.
const COLUMNS: usize = 4;

/// Reads rows from `reader` and sends them through the provided channel.
/// Returns the number of data rows that were skipped as blank.
pub async fn read_rows<R>(
    reader: R,
    config: ParserConfig,
    tx: mpsc::Sender<ParsedRow>,
) -> Result<usize, ParseError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(config.delimiter)
        .create_reader(reader);

    let mut records = csv_reader.records().skip(config.header_lines);
    let mut skipped = 0;
    while let Some(record) = records.next().await {
        match parse_record(&record?)? {
            Some(row) => {
                if tx.send(row).await.is_err() {
                    // Receiver dropped, nobody is interested in the rest
                    break;
                }
            }
            None => skipped += 1,
        }
    }
    Ok(skipped)
}

/// Spawns [`read_rows`] on its own task and drains the channel into a vector.
/// The whole input has to be read before categories can be resolved, so there
/// is nothing to gain from handing rows out one by one.
pub async fn collect_rows<R>(
    reader: R,
    config: ParserConfig,
    capacity: usize,
) -> Result<Vec<ParsedRow>, Error>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel(capacity.max(1));
    let reader_handle = tokio::spawn(read_rows(reader, config, tx));

    let mut rows = Vec::new();
    while let Some(row) = rx.recv().await {
        rows.push(row);
    }

    // The channel also closes when the reader fails, so the task result decides
    let skipped = reader_handle.await??;
    debug!(rows = rows.len(), skipped, "finished reading source");
    Ok(rows)
}

/// Returns `None` for rows that should be skipped silently.
fn parse_record(record: &StringRecord) -> Result<Option<ParsedRow>, ParseError> {
    let line = record.position().map_or(0, |pos| pos.line());

    if record.iter().all(str::is_empty) {
        return Ok(None);
    }
    if record.len() != COLUMNS {
        return Err(ParseError::UnexpectedCellCount {
            line,
            expected: COLUMNS,
            found: record.len(),
        });
    }

    let [title, tx_type, raw_value, category] = [0, 1, 2, 3].map(|i| record.get(i).unwrap_or(""));
    if title.is_empty() || tx_type.is_empty() || raw_value.is_empty() {
        debug!(line, "skipping row with blank title, type or value");
        return Ok(None);
    }

    Ok(Some(ParsedRow {
        line,
        title: title.to_owned(),
        tx_type: tx_type.to_owned(),
        raw_value: raw_value.to_owned(),
        category: category.to_owned(),
    }))
}
