use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::{
    balance::{balance, Balance},
    config::ImportConfig,
    fs::LocalFs,
    stores::MemoryStore,
    Error, TransactionImporter,
};

/// Imports the given files, in order, into a fresh in-memory store and writes
/// the resulting balance to the provided writer.
///
/// # Arguments
/// * `input_paths` - CSV files to import; categories are shared between them
/// * `writer` - Where to write the balance (e.g. stdout)
/// * `config` - Import settings, including whether the files are removed
///
/// # Errors
/// Stops at the first file that fails to import, leaving it and every later
/// file in place. Also fails if writing to the output fails.
pub async fn run<P, W>(input_paths: &[P], writer: W, config: ImportConfig) -> Result<Balance, Error>
where
    P: AsRef<Path>,
    W: Write,
{
    let store = MemoryStore::new();
    let importer = TransactionImporter::new(&store, &LocalFs, config);

    for path in input_paths {
        let saved = importer.execute(path).await?;
        info!(path = %path.as_ref().display(), transactions = saved.len(), "imported file");
    }

    let balance = balance(&store).await?;
    write_csv(writer, std::iter::once(balance))?;
    Ok(balance)
}

/// Writes an iterator of records to a CSV writer, header first.
fn write_csv<T, W>(writer: W, records: impl Iterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
