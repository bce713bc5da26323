pub mod balance;
pub mod datetime;
pub mod kline;
pub mod market;
pub mod order;
pub mod orderbook;
pub mod side;
pub mod ticker;
pub mod trade;

pub use balance::{BalanceEntry, Balances};
pub use datetime::iso8601;
pub use kline::Ohlcv;
pub use market::Market;
pub use order::{LeverOrderPlaced, LeverOrders, Order, OrderStatus, PlacedOrder};
pub use orderbook::{OrderBook, PriceLevel};
pub use side::Side;
pub use ticker::Ticker;
pub use trade::Trade;
