pub mod ip;

pub use ip::source_address;
