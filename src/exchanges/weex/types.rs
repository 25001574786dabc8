//! Raw response schemas.
//!
//! Every field is optional and read leniently; the same logical field appears
//! under several spellings depending on the endpoint, so each spelling gets
//! its own slot and the parsers pick the first one present.

use crate::core::conversion::{lenient_vec, opt_bool, opt_decimal, opt_i64, opt_string};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// `{ code, msg, requestTime, data }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexResponse {
    #[serde(default, deserialize_with = "opt_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub msg: Option<String>,
    #[serde(default, rename = "requestTime", deserialize_with = "opt_i64")]
    pub request_time: Option<i64>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexServerTime {
    #[serde(default, rename = "serverTime", deserialize_with = "opt_i64")]
    pub server_time: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexMarket {
    #[serde(default, deserialize_with = "opt_string")]
    pub symbol: Option<String>,
    #[serde(default, rename = "baseCoin", deserialize_with = "opt_string")]
    pub base_coin: Option<String>,
    #[serde(default, rename = "baseAsset", deserialize_with = "opt_string")]
    pub base_asset: Option<String>,
    #[serde(default, rename = "quoteCoin", deserialize_with = "opt_string")]
    pub quote_coin: Option<String>,
    #[serde(default, rename = "quoteAsset", deserialize_with = "opt_string")]
    pub quote_asset: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(default, rename = "tickSize", deserialize_with = "opt_decimal")]
    pub tick_size: Option<Decimal>,
    #[serde(default, rename = "stepSize", deserialize_with = "opt_decimal")]
    pub step_size: Option<Decimal>,
    #[serde(default, rename = "minTradeAmount", deserialize_with = "opt_decimal")]
    pub min_trade_amount: Option<Decimal>,
    #[serde(default, rename = "maxTradeAmount", deserialize_with = "opt_decimal")]
    pub max_trade_amount: Option<Decimal>,
    #[serde(default, rename = "minTradeUSDT", deserialize_with = "opt_decimal")]
    pub min_trade_usdt: Option<Decimal>,
    #[serde(default, rename = "minNotional", deserialize_with = "opt_decimal")]
    pub min_notional: Option<Decimal>,
    #[serde(default, rename = "minPrice", deserialize_with = "opt_decimal")]
    pub min_price: Option<Decimal>,
    #[serde(default, rename = "maxPrice", deserialize_with = "opt_decimal")]
    pub max_price: Option<Decimal>,
    #[serde(default, rename = "makerFeeRate", deserialize_with = "opt_decimal")]
    pub maker_fee_rate: Option<Decimal>,
    #[serde(default, rename = "takerFeeRate", deserialize_with = "opt_decimal")]
    pub taker_fee_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexChain {
    #[serde(default, rename = "chainName", deserialize_with = "opt_string")]
    pub chain_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub chain: Option<String>,
    #[serde(default, rename = "rechargeable", deserialize_with = "opt_bool")]
    pub rechargeable: Option<bool>,
    #[serde(default, rename = "depositEnable", deserialize_with = "opt_bool")]
    pub deposit_enable: Option<bool>,
    #[serde(default, rename = "withdrawable", deserialize_with = "opt_bool")]
    pub withdrawable: Option<bool>,
    #[serde(default, rename = "withdrawEnable", deserialize_with = "opt_bool")]
    pub withdraw_enable: Option<bool>,
    #[serde(default, rename = "withdrawFee", deserialize_with = "opt_decimal")]
    pub withdraw_fee: Option<Decimal>,
    #[serde(default, rename = "minDepositAmount", deserialize_with = "opt_decimal")]
    pub min_deposit_amount: Option<Decimal>,
    #[serde(default, rename = "minWithdrawAmount", deserialize_with = "opt_decimal")]
    pub min_withdraw_amount: Option<Decimal>,
    #[serde(default, rename = "maxWithdrawAmount", deserialize_with = "opt_decimal")]
    pub max_withdraw_amount: Option<Decimal>,
    #[serde(default, rename = "depositConfirm", deserialize_with = "opt_i64")]
    pub deposit_confirm: Option<i64>,
    #[serde(default, rename = "withdrawConfirm", deserialize_with = "opt_i64")]
    pub withdraw_confirm: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexCurrency {
    #[serde(default, rename = "coinId", deserialize_with = "opt_string")]
    pub coin_id: Option<String>,
    #[serde(default, rename = "coinName", deserialize_with = "opt_string")]
    pub coin_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub coin: Option<String>,
    #[serde(default, rename = "fullName", deserialize_with = "opt_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub chains: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexTicker {
    #[serde(default, deserialize_with = "opt_string")]
    pub symbol: Option<String>,
    #[serde(default, rename = "lastPrice", deserialize_with = "opt_decimal")]
    pub last_price: Option<Decimal>,
    #[serde(default, rename = "close", deserialize_with = "opt_decimal")]
    pub close: Option<Decimal>,
    #[serde(default, rename = "openPrice", deserialize_with = "opt_decimal")]
    pub open_price: Option<Decimal>,
    #[serde(default, rename = "open", deserialize_with = "opt_decimal")]
    pub open: Option<Decimal>,
    #[serde(default, rename = "highPrice", deserialize_with = "opt_decimal")]
    pub high_price: Option<Decimal>,
    #[serde(default, rename = "high", deserialize_with = "opt_decimal")]
    pub high: Option<Decimal>,
    #[serde(default, rename = "lowPrice", deserialize_with = "opt_decimal")]
    pub low_price: Option<Decimal>,
    #[serde(default, rename = "low", deserialize_with = "opt_decimal")]
    pub low: Option<Decimal>,
    #[serde(default, rename = "bidPrice", deserialize_with = "opt_decimal")]
    pub bid_price: Option<Decimal>,
    #[serde(default, rename = "bestBid", deserialize_with = "opt_decimal")]
    pub best_bid: Option<Decimal>,
    #[serde(default, rename = "bidSize", deserialize_with = "opt_decimal")]
    pub bid_size: Option<Decimal>,
    #[serde(default, rename = "askPrice", deserialize_with = "opt_decimal")]
    pub ask_price: Option<Decimal>,
    #[serde(default, rename = "bestAsk", deserialize_with = "opt_decimal")]
    pub best_ask: Option<Decimal>,
    #[serde(default, rename = "askSize", deserialize_with = "opt_decimal")]
    pub ask_size: Option<Decimal>,
    #[serde(default, rename = "baseVolume", deserialize_with = "opt_decimal")]
    pub base_volume: Option<Decimal>,
    #[serde(default, rename = "volume", deserialize_with = "opt_decimal")]
    pub volume: Option<Decimal>,
    #[serde(default, rename = "quoteVolume", deserialize_with = "opt_decimal")]
    pub quote_volume: Option<Decimal>,
    #[serde(default, rename = "priceChange", deserialize_with = "opt_decimal")]
    pub price_change: Option<Decimal>,
    #[serde(default, rename = "priceChangePercent", deserialize_with = "opt_decimal")]
    pub price_change_percent: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub timestamp: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub ts: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexOrderBook {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub bids: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub asks: Vec<Value>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub timestamp: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub ts: Option<i64>,
}

/// Public fill or own fill.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexTrade {
    #[serde(default, rename = "tradeId", deserialize_with = "opt_string")]
    pub trade_id: Option<String>,
    #[serde(default, rename = "fillId", deserialize_with = "opt_string")]
    pub fill_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, rename = "orderId", deserialize_with = "opt_string")]
    pub order_id: Option<String>,
    #[serde(default, rename = "order_id", deserialize_with = "opt_string")]
    pub order_id_snake: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, rename = "fillPrice", deserialize_with = "opt_decimal")]
    pub fill_price: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub quantity: Option<Decimal>,
    #[serde(default, rename = "fillQuantity", deserialize_with = "opt_decimal")]
    pub fill_quantity: Option<Decimal>,
    #[serde(default, rename = "fillTotalAmount", deserialize_with = "opt_decimal")]
    pub fill_total_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_string")]
    pub side: Option<String>,
    #[serde(default, rename = "orderType", deserialize_with = "opt_string")]
    pub order_type: Option<String>,
    #[serde(default, rename = "tradeScope", deserialize_with = "opt_string")]
    pub trade_scope: Option<String>,
    #[serde(default, rename = "isBuyerMaker", deserialize_with = "opt_bool")]
    pub is_buyer_maker: Option<bool>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub fees: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub fee: Option<Decimal>,
    #[serde(default, rename = "feeCoin", deserialize_with = "opt_string")]
    pub fee_coin: Option<String>,
    #[serde(default, rename = "feeCurrency", deserialize_with = "opt_string")]
    pub fee_currency: Option<String>,
    #[serde(default, rename = "createTime", deserialize_with = "opt_i64")]
    pub create_time: Option<i64>,
    #[serde(default, rename = "cTime", deserialize_with = "opt_i64")]
    pub c_time: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub timestamp: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub ts: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexOrder {
    #[serde(default, rename = "orderId", deserialize_with = "opt_string")]
    pub order_id: Option<String>,
    #[serde(default, rename = "order_id", deserialize_with = "opt_string")]
    pub order_id_snake: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, rename = "clientOrderId", deserialize_with = "opt_string")]
    pub client_order_id: Option<String>,
    #[serde(default, rename = "client_oid", deserialize_with = "opt_string")]
    pub client_oid_snake: Option<String>,
    #[serde(default, rename = "clientOid", deserialize_with = "opt_string")]
    pub client_oid: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub quantity: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_string")]
    pub side: Option<String>,
    #[serde(default, rename = "orderType", deserialize_with = "opt_string")]
    pub order_type: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub force: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(default, rename = "fillPrice", deserialize_with = "opt_decimal")]
    pub fill_price: Option<Decimal>,
    #[serde(default, rename = "priceAvg", deserialize_with = "opt_decimal")]
    pub price_avg: Option<Decimal>,
    #[serde(default, rename = "avgPrice", deserialize_with = "opt_decimal")]
    pub avg_price: Option<Decimal>,
    #[serde(default, rename = "fillQuantity", deserialize_with = "opt_decimal")]
    pub fill_quantity: Option<Decimal>,
    #[serde(default, rename = "filledQuantity", deserialize_with = "opt_decimal")]
    pub filled_quantity: Option<Decimal>,
    #[serde(default, rename = "fillSize", deserialize_with = "opt_decimal")]
    pub fill_size: Option<Decimal>,
    #[serde(default, rename = "fillTotalAmount", deserialize_with = "opt_decimal")]
    pub fill_total_amount: Option<Decimal>,
    #[serde(default, rename = "filledAmount", deserialize_with = "opt_decimal")]
    pub filled_amount: Option<Decimal>,
    #[serde(default, rename = "fillValue", deserialize_with = "opt_decimal")]
    pub fill_value: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub fees: Option<Decimal>,
    #[serde(default, rename = "feeCoin", deserialize_with = "opt_string")]
    pub fee_coin: Option<String>,
    #[serde(default, rename = "createTime", deserialize_with = "opt_i64")]
    pub create_time: Option<i64>,
    #[serde(default, rename = "cTime", deserialize_with = "opt_i64")]
    pub c_time: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub timestamp: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub ts: Option<i64>,
    #[serde(default, rename = "updateTime", deserialize_with = "opt_i64")]
    pub update_time: Option<i64>,
    #[serde(default, rename = "uTime", deserialize_with = "opt_i64")]
    pub u_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexBalance {
    #[serde(default, rename = "coinName", deserialize_with = "opt_string")]
    pub coin_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub coin: Option<String>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub available: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub frozen: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub locked: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub equity: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexBill {
    #[serde(default, rename = "billId", deserialize_with = "opt_string")]
    pub bill_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, rename = "coinName", deserialize_with = "opt_string")]
    pub coin_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub coin: Option<String>,
    #[serde(default, rename = "groupType", deserialize_with = "opt_string")]
    pub group_type: Option<String>,
    #[serde(default, rename = "businessType", deserialize_with = "opt_string")]
    pub business_type: Option<String>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub balance: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub fees: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub fee: Option<Decimal>,
    #[serde(default, rename = "cTime", deserialize_with = "opt_i64")]
    pub c_time: Option<i64>,
    #[serde(default, rename = "createTime", deserialize_with = "opt_i64")]
    pub create_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeexTransfer {
    #[serde(default, rename = "transferId", deserialize_with = "opt_string")]
    pub transfer_id: Option<String>,
    #[serde(default, rename = "tradeId", deserialize_with = "opt_string")]
    pub trade_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, rename = "coinName", deserialize_with = "opt_string")]
    pub coin_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub coin: Option<String>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "opt_decimal")]
    pub size: Option<Decimal>,
    #[serde(default, rename = "fromType", deserialize_with = "opt_string")]
    pub from_type: Option<String>,
    #[serde(default, rename = "toType", deserialize_with = "opt_string")]
    pub to_type: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(default, rename = "cTime", deserialize_with = "opt_i64")]
    pub c_time: Option<i64>,
    #[serde(default, rename = "createTime", deserialize_with = "opt_i64")]
    pub create_time: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub ts: Option<i64>,
}
