mod clear;
mod config_gen;
mod issue;
mod list;

pub use clear::clear_ledger;
pub use config_gen::generate_config;
pub use issue::issue_tokens;
pub use list::list_records;
