use common::models::{
    Balances, LeverOrderPlaced, LeverOrders, Market, Ohlcv, Order, OrderBook, PlacedOrder, Side,
    Ticker, Trade,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::XexConfig;
use crate::error::XexError;
use crate::remote::endpoints::{self, Endpoint};
use crate::remote::values::as_text;
use crate::remote::{
    HttpTransport, KlineRow, MyTradeRow, OrderBookResponse, OrderDetailResponse, OrderRow, Params,
    SignedRequest, Signer, SymbolListResponse, TickerResponse, TradeRow, WalletResponse, envelope,
};
use crate::services::markets::SymbolAsId;
use crate::services::order_requests::{
    OrderType, cancel_order_params, create_lever_order_params, extend, lever_order_id_params,
    leverage_charge_params, order_detail_params, place_order_params, required,
    show_lever_orders_params,
};
use crate::timeframe::exchange_interval;
use crate::traits::{MarketResolver, RemoteResponse, Transport};

/// The XEX adapter: signs, sends through the injected transport, and normalizes replies.
/// Holds no per-call state, so one instance can serve concurrent callers.
pub struct Xex<T: Transport> {
    transport: T,
    signer: Signer,
    resolver: Box<dyn MarketResolver>,
    markets_url: String,
}

impl Xex<HttpTransport> {
    pub fn from_config(config: &XexConfig) -> Result<Self, XexError> {
        Ok(Self::new(
            HttpTransport::new(config)?,
            config.signer(),
            config.markets_url.clone(),
        ))
    }
}

impl<T: Transport> Xex<T> {
    pub fn new(transport: T, signer: Signer, markets_url: impl Into<String>) -> Self {
        Self {
            transport,
            signer,
            resolver: Box::new(SymbolAsId),
            markets_url: markets_url.into(),
        }
    }

    pub fn with_resolver<R: MarketResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    async fn request(&self, endpoint: Endpoint, params: &Params) -> Result<Value, XexError> {
        let request = self
            .signer
            .sign(endpoint.path, endpoint.api, endpoint.method, params)?;
        let response = self.transport.fetch(&request).await?;
        envelope::ensure_success(&response)?;
        Ok(response)
    }

    fn pair_params(&self, symbol: &str) -> Result<Params, XexError> {
        let mut params = Params::new();
        params.insert("pair".to_string(), Value::String(self.resolver.market_id(symbol)?));
        Ok(params)
    }

    pub async fn fetch_markets(&self) -> Result<Vec<Market>, XexError> {
        let response = self
            .transport
            .fetch(&SignedRequest::get(self.markets_url.as_str()))
            .await?;
        let markets = SymbolListResponse::new(&response)?.to_canonical()?;
        info!("Loaded {} XEX pairs", markets.len());
        Ok(markets)
    }

    pub async fn fetch_ticker(&self, symbol: &str, params: &Params) -> Result<Ticker, XexError> {
        let symbol = required(Some(symbol), "fetch_ticker", "symbol")?;
        let request = extend(self.pair_params(symbol)?, params);

        let response = self.request(endpoints::TICKER, &request).await?;
        TickerResponse::new(symbol, envelope::data(&response, "ticker")?)?.to_canonical()
    }

    pub async fn fetch_order_book(
        &self,
        symbol: &str,
        params: &Params,
    ) -> Result<OrderBook, XexError> {
        let symbol = required(Some(symbol), "fetch_order_book", "symbol")?;
        let request = extend(self.pair_params(symbol)?, params);

        let response = self.request(endpoints::DEPTH, &request).await?;
        OrderBookResponse::new(symbol, envelope::data(&response, "depth")?)?.to_canonical()
    }

    pub async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        since: Option<i64>,
        limit: Option<usize>,
        params: &Params,
    ) -> Result<Vec<Ohlcv>, XexError> {
        let symbol = required(Some(symbol), "fetch_ohlcv", "symbol")?;
        let interval = exchange_interval(timeframe)?;
        let mut request = self.pair_params(symbol)?;
        request.insert("type".to_string(), Value::from(interval));

        let response = self.request(endpoints::KLINE, &extend(request, params)).await?;
        let candles: Vec<Ohlcv> =
            decode_rows(envelope::data_array(&response, "kline")?, KlineRow::from_row)?;
        Ok(filter_by_since_limit(candles, |c| Some(c.timestamp), since, limit))
    }

    pub async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<usize>,
        params: &Params,
    ) -> Result<Vec<Trade>, XexError> {
        let symbol = required(Some(symbol), "fetch_trades", "symbol")?;
        let request = extend(self.pair_params(symbol)?, params);

        let response = self.request(endpoints::TRADES, &request).await?;
        let trades: Vec<Trade> = decode_rows(envelope::data_array(&response, "trades")?, |row| {
            TradeRow::from_public_row(row, symbol)
        })?;
        Ok(filter_by_since_limit(trades, |t| t.timestamp, since, limit))
    }

    /// The exchange scopes fills by account, not pair: the symbol is only checked.
    pub async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<usize>,
        params: &Params,
    ) -> Result<Vec<Trade>, XexError> {
        required(symbol, "fetch_my_trades", "symbol")?;

        let response = self.request(endpoints::MY_TRADES, params).await?;
        let trades: Vec<Trade> =
            decode_rows(envelope::data_array(&response, "my trades")?, MyTradeRow::from_row)?;
        Ok(filter_by_since_limit(trades, |t| t.timestamp, since, limit))
    }

    pub async fn fetch_order(&self, id: &str, params: &Params) -> Result<Order, XexError> {
        let request = extend(order_detail_params(Some(id))?, params);

        let response = self.request(endpoints::ORDER_DETAIL, &request).await?;
        OrderDetailResponse::new(id, envelope::data(&response, "order detail")?)?.to_canonical()
    }

    /// Account order history (`POST/v1/api/orders`).
    pub async fn fetch_orders(&self, params: &Params) -> Result<Vec<Order>, XexError> {
        let response = self.request(endpoints::ORDERS, params).await?;
        let orders = decode_order_list(&response, "orders")?;
        Ok(filter_by_since_limit(orders, |o| o.timestamp, None, None))
    }

    pub async fn fetch_open_orders(
        &self,
        since: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Order>, XexError> {
        let response = self.request(endpoints::OPEN_ORDERS, &Params::new()).await?;
        let orders = decode_order_list(&response, "open orders")?;
        Ok(filter_by_since_limit(orders, |o| o.timestamp, since, limit))
    }

    pub async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: Side,
        amount: f64,
        price: Option<f64>,
        params: &Params,
    ) -> Result<PlacedOrder, XexError> {
        let symbol = required(Some(symbol), "create_order", "symbol")?;
        let pair = self.resolver.market_id(symbol)?;
        let request = extend(place_order_params(&pair, order_type, side, amount, price)?, params);

        let response = self.request(endpoints::PLACE_ORDER, &request).await?;
        let id = data_id(&response, "orderId", "place order")?;
        info!("Placed {} {} {} {} -> {}", order_type.as_str(), side, amount, symbol, id);

        Ok(PlacedOrder { id, info: response })
    }

    /// Returns the raw acknowledgement.
    pub async fn cancel_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: &Params,
    ) -> Result<Value, XexError> {
        let symbol = required(symbol, "cancel_order", "symbol")?;
        let pair = self.resolver.market_id(symbol)?;
        let request = extend(cancel_order_params(Some(id), Some(&pair))?, params);

        self.request(endpoints::CANCEL_ORDER, &request).await
    }

    pub async fn fetch_balance(&self, params: &Params) -> Result<Balances, XexError> {
        let response = self.request(endpoints::WALLET, params).await?;
        WalletResponse::new(&response)?.to_canonical()
    }

    pub async fn fetch_mine_limit(&self, params: &Params) -> Result<Value, XexError> {
        self.request(endpoints::MINE_LIMIT, params).await
    }

    pub async fn show_lever_orders(
        &self,
        page: u32,
        page_size: u32,
        params: &Params,
    ) -> Result<LeverOrders, XexError> {
        let request = extend(show_lever_orders_params(page, page_size), params);

        let response = self.request(endpoints::SHOW_LEVER_ORDERS, &request).await?;
        let orders = envelope::data(&response, "lever orders")?
            .get("orders")
            .cloned()
            .ok_or_else(|| XexError::malformed("lever orders: missing `data.orders`"))?;

        Ok(LeverOrders {
            orders,
            info: response,
        })
    }

    pub async fn create_lever_order(
        &self,
        symbol: &str,
        side: Side,
        amount: f64,
        price: f64,
        rate: f64,
        params: &Params,
    ) -> Result<LeverOrderPlaced, XexError> {
        let symbol = required(Some(symbol), "create_lever_order", "symbol")?;
        let pair = self.resolver.market_id(symbol)?;
        let request = extend(create_lever_order_params(&pair, side, amount, price, rate)?, params);

        let response = self.request(endpoints::MAKE_LEVER_ORDER, &request).await?;
        let order_id = data_id(&response, "orderId", "lever order")?;

        Ok(LeverOrderPlaced {
            order_id,
            info: response,
        })
    }

    pub async fn change_lever_order(&self, id: &str, params: &Params) -> Result<Value, XexError> {
        let request = extend(lever_order_id_params(Some(id), "change_lever_order")?, params);
        self.request(endpoints::CHANGE_LEVER_ORDER, &request).await
    }

    /// Adds or withdraws margin on a lever order.
    pub async fn leverage_charge(
        &self,
        id: &str,
        amount: f64,
        params: &Params,
    ) -> Result<Value, XexError> {
        let request = extend(leverage_charge_params(Some(id), amount)?, params);
        self.request(endpoints::LEVERAGE_CHARGE, &request).await
    }

    pub async fn cancel_lever_order(&self, id: &str, params: &Params) -> Result<Value, XexError> {
        let request = extend(lever_order_id_params(Some(id), "cancel_lever_order")?, params);
        self.request(endpoints::CANCEL_LEVER_ORDER, &request).await
    }
}

fn decode_rows<W, T, F>(rows: &[Value], parse: F) -> Result<Vec<T>, XexError>
where
    W: RemoteResponse<T>,
    F: Fn(&Value) -> Result<W, XexError>,
{
    let records = rows
        .iter()
        .map(|row| parse(row)?.to_canonical())
        .collect::<Result<Vec<T>, XexError>>()?;
    debug!("Decoded {} rows", records.len());
    Ok(records)
}

/// Order list endpoints answer without `data` when there is nothing to report.
fn decode_order_list(response: &Value, endpoint: &str) -> Result<Vec<Order>, XexError> {
    match response.get("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(_) => decode_rows(envelope::data_array(response, endpoint)?, OrderRow::from_row),
    }
}

fn data_id(response: &Value, key: &str, endpoint: &str) -> Result<String, XexError> {
    envelope::data(response, endpoint)?
        .get(key)
        .and_then(as_text)
        .ok_or_else(|| XexError::malformed(format!("{endpoint}: missing `data.{key}`")))
}

/// Sorts by timestamp, keeps entries at or after `since`, then the first `limit`.
pub fn filter_by_since_limit<T, F>(
    mut items: Vec<T>,
    timestamp: F,
    since: Option<i64>,
    limit: Option<usize>,
) -> Vec<T>
where
    F: Fn(&T) -> Option<i64>,
{
    items.sort_by_key(|item| timestamp(item));
    if let Some(since) = since {
        items.retain(|item| timestamp(item).is_some_and(|t| t >= since));
    }
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
