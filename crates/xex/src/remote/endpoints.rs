use super::signer::{Api, HttpMethod};

pub const DEFAULT_API_URL: &str = "https://api.xex-dev.com";
pub const DEFAULT_MARKETS_URL: &str = "https://web.crossexchange.io/bb/symbol/all?leverageType=0";

/// A route as XEX publishes it. The method prefix is part of the path itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub api: Api,
    pub method: HttpMethod,
}

impl Endpoint {
    const fn new(path: &'static str, api: Api, method: HttpMethod) -> Self {
        Self { path, api, method }
    }
}

pub const TICKER: Endpoint = Endpoint::new("GET/v1/api/ticker", Api::Public, HttpMethod::Get);
pub const KLINE: Endpoint = Endpoint::new("GET/v1/api/kline", Api::Public, HttpMethod::Get);
pub const DEPTH: Endpoint = Endpoint::new("GET/v1/api/depth", Api::Public, HttpMethod::Get);
pub const TRADES: Endpoint = Endpoint::new("GET/v1/api/trades", Api::Public, HttpMethod::Get);

pub const ORDER_DETAIL: Endpoint =
    Endpoint::new("GET/v1/api/orderdetail", Api::Private, HttpMethod::Get);
pub const WALLET: Endpoint = Endpoint::new("GET/v1/api/auth/wallet", Api::Private, HttpMethod::Get);
pub const MINE_LIMIT: Endpoint =
    Endpoint::new("GET/v1/api/mineLimit", Api::Private, HttpMethod::Get);

pub const MY_TRADES: Endpoint = Endpoint::new("POST/v1/api/trades", Api::Private, HttpMethod::Post);
pub const ORDERS: Endpoint = Endpoint::new("POST/v1/api/orders", Api::Private, HttpMethod::Post);
pub const OPEN_ORDERS: Endpoint =
    Endpoint::new("POST/v1/api/auth/orders", Api::Private, HttpMethod::Post);
pub const CANCEL_ORDER: Endpoint =
    Endpoint::new("POST/v1/api/cancelOrder", Api::Private, HttpMethod::Post);
pub const PLACE_ORDER: Endpoint =
    Endpoint::new("POST/v1/api/placeOrder", Api::Private, HttpMethod::Post);

pub const MAKE_LEVER_ORDER: Endpoint =
    Endpoint::new("POST/api/v1/make/leverOrder", Api::Private, HttpMethod::Post);
// "cancle" is the exchange's own spelling.
pub const CANCEL_LEVER_ORDER: Endpoint =
    Endpoint::new("POST/api/v1/cancle/leverOrder", Api::Private, HttpMethod::Post);
pub const CHANGE_LEVER_ORDER: Endpoint =
    Endpoint::new("POST/api/v1/leverage/change/order", Api::Private, HttpMethod::Post);
pub const LEVERAGE_CHARGE: Endpoint =
    Endpoint::new("POST/api/v1/leverage/charge", Api::Private, HttpMethod::Post);
pub const SHOW_LEVER_ORDERS: Endpoint =
    Endpoint::new("POST/api/v1/show/open/leverOrder", Api::Private, HttpMethod::Post);
