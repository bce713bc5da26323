pub mod markets;
pub mod order_requests;
pub mod xex_exchange;

pub use markets::{PairCatalog, SymbolAsId};
pub use xex_exchange::Xex;
