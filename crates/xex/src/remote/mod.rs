pub mod balance_response;
pub mod endpoints;
pub mod envelope;
pub mod http_transport;
pub mod kline_response;
pub mod markets_response;
pub mod order_response;
pub mod orderbook_response;
pub mod signer;
pub mod ticker_response;
pub mod trade_response;
pub mod values;

pub use balance_response::WalletResponse;
pub use http_transport::HttpTransport;
pub use kline_response::KlineRow;
pub use markets_response::SymbolListResponse;
pub use order_response::{OrderDetailResponse, OrderRow};
pub use orderbook_response::OrderBookResponse;
pub use signer::{Api, Credentials, HttpMethod, Params, SignDigest, SignedRequest, Signer};
pub use ticker_response::TickerResponse;
pub use trade_response::{MyTradeRow, TradeRow};
