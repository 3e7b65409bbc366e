mod balance;
mod config;
mod dto;
mod error;
mod fs;
mod importer;
mod parser;
mod resolver;
mod runner;
mod stores;

pub use balance::{balance, compute_balance, Balance};
pub use config::{ImportConfig, ParserConfig};
pub use dto::{ParsedRow, TransactionType};
pub use error::{BalanceError, ConsistencyError, Error, ParseError, PersistenceError, ValidationError};
pub use fs::{FileSystem, LocalFs};
pub use importer::TransactionImporter;
pub use parser::{collect_rows, read_rows};
pub use resolver::CategoryResolver;
pub use runner::run;
pub use stores::{
    CategoriesStore, Category, CategoryId, MemoryStore, NewCategory, NewTransaction, Store,
    Transaction, TransactionId, TransactionSpec, TransactionsStore,
};
