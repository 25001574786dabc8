//! Venue JSON to unified records.
//!
//! Parsers never fail: a missing or malformed field becomes `None` and a record
//! too broken to identify is skipped by the caller.

use super::describe::describe;
use super::types::{
    WeexBalance, WeexBill, WeexChain, WeexCurrency, WeexMarket, WeexOrder, WeexOrderBook,
    WeexServerTime, WeexTicker, WeexTrade, WeexTransfer,
};
use crate::core::conversion::{
    first_present, iso8601, schema, value_to_decimal, value_to_i64,
};
use crate::core::types::{
    Balance, Balances, Currency, CurrencyNetwork, Fee, LedgerDirection, LedgerEntry, Market,
    MarketLimits, MarketPrecision, MinMax, NetworkLimits, Ohlcv, Order, OrderBook,
    OrderBookEntry, OrderSide, OrderStatus, OrderType, TakerOrMaker, Ticker, TimeInForce, Trade,
    TransferEntry,
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Elements of a list payload. Some endpoints wrap the list in an object.
pub fn list_payload<'a>(data: &'a Value, wrapper_keys: &[&str]) -> &'a [Value] {
    if let Value::Array(items) = data {
        return items;
    }
    wrapper_keys
        .iter()
        .find_map(|key| data.get(key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn symbol_for(market: Option<&Market>, raw_id: Option<&String>) -> Option<String> {
    market
        .map(|m| m.symbol.clone())
        .or_else(|| raw_id.cloned())
}

fn parse_side(raw: Option<&str>) -> Option<OrderSide> {
    raw.and_then(|side| side.parse().ok())
}

fn parse_order_type(raw: Option<&str>) -> Option<OrderType> {
    raw.and_then(|order_type| order_type.parse().ok())
}

pub fn parse_time_in_force(raw: &str) -> Option<TimeInForce> {
    match raw.to_ascii_lowercase().as_str() {
        "normal" | "gtc" => Some(TimeInForce::GTC),
        "ioc" => Some(TimeInForce::IOC),
        "fok" => Some(TimeInForce::FOK),
        "post_only" | "postonly" | "po" => Some(TimeInForce::PO),
        _ => None,
    }
}

/// `new`/`partial_fill` are open, `full_fill` closed, `cancelled` canceled.
/// Any other value is carried through untouched.
pub fn parse_order_status(raw: &str) -> OrderStatus {
    match raw {
        "new" | "partial_fill" => OrderStatus::Open,
        "full_fill" => OrderStatus::Closed,
        "cancelled" => OrderStatus::Canceled,
        other => OrderStatus::Other(other.to_string()),
    }
}

pub fn parse_time(data: &Value) -> Option<i64> {
    value_to_i64(data).or_else(|| {
        let raw: WeexServerTime = schema(data);
        first_present(&[&raw.server_time, &raw.timestamp])
    })
}

fn is_active(status: &str) -> bool {
    status.eq_ignore_ascii_case("online") || status.eq_ignore_ascii_case("trading")
}

pub fn parse_market(raw: &Value) -> Option<Market> {
    let market: WeexMarket = schema(raw);
    let id = market.symbol?;
    let base_id = first_present(&[&market.base_coin, &market.base_asset])?;
    let quote_id = first_present(&[&market.quote_coin, &market.quote_asset])?;
    let base = base_id.to_uppercase();
    let quote = quote_id.to_uppercase();
    let fees = describe().fees;

    Some(Market {
        symbol: format!("{}/{}", base, quote),
        id,
        base,
        quote,
        base_id,
        quote_id,
        active: market.status.as_deref().map(is_active),
        spot: true,
        market_type: "spot".to_string(),
        taker: market.taker_fee_rate.or(Some(fees.taker)),
        maker: market.maker_fee_rate.or(Some(fees.maker)),
        precision: MarketPrecision {
            amount: market.step_size,
            price: market.tick_size,
        },
        limits: MarketLimits {
            amount: MinMax {
                min: market.min_trade_amount,
                max: market.max_trade_amount,
            },
            price: MinMax {
                min: market.min_price,
                max: market.max_price,
            },
            cost: MinMax {
                min: first_present(&[&market.min_trade_usdt, &market.min_notional]),
                max: None,
            },
        },
        info: raw.clone(),
    })
}

/// Accepts `[..]` or `{ symbols: [..] }`.
pub fn parse_markets(data: &Value) -> Vec<Market> {
    list_payload(data, &["symbols", "list"])
        .iter()
        .filter_map(|raw| {
            let market = parse_market(raw);
            if market.is_none() {
                debug!(?raw, "skipping unidentifiable market");
            }
            market
        })
        .collect()
}

fn parse_network(raw: &Value) -> Option<CurrencyNetwork> {
    let chain: WeexChain = schema(raw);
    let id = first_present(&[&chain.chain_name, &chain.chain])?;
    let deposit = first_present(&[&chain.rechargeable, &chain.deposit_enable]);
    let withdraw = first_present(&[&chain.withdrawable, &chain.withdraw_enable]);
    let active = match (deposit, withdraw) {
        (Some(d), Some(w)) => Some(d && w),
        _ => None,
    };

    Some(CurrencyNetwork {
        network: id.to_uppercase(),
        id,
        active,
        deposit,
        withdraw,
        fee: chain.withdraw_fee,
        deposit_confirmations: chain.deposit_confirm,
        withdraw_confirmations: chain.withdraw_confirm,
        limits: NetworkLimits {
            deposit: MinMax {
                min: chain.min_deposit_amount,
                max: None,
            },
            withdraw: MinMax {
                min: chain.min_withdraw_amount,
                max: chain.max_withdraw_amount,
            },
        },
        info: raw.clone(),
    })
}

fn any_flag(flags: impl Iterator<Item = Option<bool>>) -> Option<bool> {
    flags.flatten().reduce(|acc, flag| acc || flag)
}

pub fn parse_currency(raw: &Value) -> Option<Currency> {
    let currency: WeexCurrency = schema(raw);
    let id = first_present(&[&currency.coin_name, &currency.coin])?;

    let networks: BTreeMap<String, CurrencyNetwork> = currency
        .chains
        .iter()
        .filter_map(parse_network)
        .map(|network| (network.network.clone(), network))
        .collect();

    let deposit = any_flag(networks.values().map(|n| n.deposit));
    let withdraw = any_flag(networks.values().map(|n| n.withdraw));
    let active = match (deposit, withdraw) {
        (Some(d), Some(w)) => Some(d && w),
        _ => None,
    };
    // A single network's fee is the currency fee; with several it is ambiguous.
    let fee = if networks.len() == 1 {
        networks.values().next().and_then(|n| n.fee)
    } else {
        None
    };

    Some(Currency {
        code: id.to_uppercase(),
        id,
        name: currency.full_name,
        active,
        deposit,
        withdraw,
        fee,
        networks,
        info: raw.clone(),
    })
}

pub fn parse_currencies(data: &Value) -> BTreeMap<String, Currency> {
    list_payload(data, &["list", "coins"])
        .iter()
        .filter_map(parse_currency)
        .map(|currency| (currency.code.clone(), currency))
        .collect()
}

pub fn parse_ticker(raw: &Value, market: Option<&Market>) -> Ticker {
    let ticker: WeexTicker = schema(raw);
    let last = first_present(&[&ticker.last_price, &ticker.close]);
    let open = first_present(&[&ticker.open_price, &ticker.open]);
    let base_volume = first_present(&[&ticker.base_volume, &ticker.volume]);
    let quote_volume = ticker.quote_volume;
    let timestamp = first_present(&[&ticker.timestamp, &ticker.ts]);

    let change = ticker.price_change.or_else(|| match (last, open) {
        (Some(last), Some(open)) => last.checked_sub(open),
        _ => None,
    });
    let percentage = ticker.price_change_percent.or_else(|| match (change, open) {
        (Some(change), Some(open)) => change
            .checked_div(open)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
        _ => None,
    });
    let average = match (open, last) {
        (Some(open), Some(last)) => open
            .checked_add(last)
            .and_then(|sum| sum.checked_div(Decimal::TWO)),
        _ => None,
    };
    let vwap = match (quote_volume, base_volume) {
        (Some(quote), Some(base)) => quote.checked_div(base),
        _ => None,
    };

    Ticker {
        symbol: symbol_for(market, ticker.symbol.as_ref()).unwrap_or_default(),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        high: first_present(&[&ticker.high_price, &ticker.high]),
        low: first_present(&[&ticker.low_price, &ticker.low]),
        bid: first_present(&[&ticker.bid_price, &ticker.best_bid]),
        bid_volume: ticker.bid_size,
        ask: first_present(&[&ticker.ask_price, &ticker.best_ask]),
        ask_volume: ticker.ask_size,
        vwap,
        open,
        close: last,
        last,
        change,
        percentage,
        average,
        base_volume,
        quote_volume,
        info: raw.clone(),
    }
}

fn parse_book_entry(raw: &Value) -> Option<OrderBookEntry> {
    let (price, amount) = match raw {
        Value::Array(pair) => (pair.first()?, pair.get(1)?),
        Value::Object(_) => (raw.get("price")?, raw.get("size").or_else(|| raw.get("quantity"))?),
        _ => return None,
    };
    Some(OrderBookEntry {
        price: value_to_decimal(price)?,
        amount: value_to_decimal(amount)?,
    })
}

pub fn parse_order_book(raw: &Value, symbol: &str) -> OrderBook {
    let book: WeexOrderBook = schema(raw);
    let mut bids: Vec<_> = book.bids.iter().filter_map(parse_book_entry).collect();
    let mut asks: Vec<_> = book.asks.iter().filter_map(parse_book_entry).collect();
    bids.sort_by(|a, b| b.price.cmp(&a.price));
    asks.sort_by(|a, b| a.price.cmp(&b.price));
    let timestamp = first_present(&[&book.timestamp, &book.ts]);

    OrderBook {
        symbol: symbol.to_string(),
        bids,
        asks,
        timestamp,
        datetime: timestamp.and_then(iso8601),
        nonce: None,
    }
}

pub fn parse_trade(raw: &Value, market: Option<&Market>) -> Trade {
    let trade: WeexTrade = schema(raw);
    let price = first_present(&[&trade.price, &trade.fill_price]);
    let amount = first_present(&[&trade.size, &trade.quantity, &trade.fill_quantity]);
    let cost = trade.fill_total_amount.or_else(|| match (price, amount) {
        (Some(price), Some(amount)) => price.checked_mul(amount),
        _ => None,
    });
    let timestamp = first_present(&[
        &trade.create_time,
        &trade.c_time,
        &trade.time,
        &trade.timestamp,
        &trade.ts,
    ]);
    // Public fills only flag the maker side; the reported side is the taker's.
    let side = parse_side(trade.side.as_deref()).or_else(|| {
        trade
            .is_buyer_maker
            .map(|buyer_maker| if buyer_maker { OrderSide::Sell } else { OrderSide::Buy })
    });
    let taker_or_maker = trade
        .trade_scope
        .as_deref()
        .and_then(|scope| match scope.to_ascii_lowercase().as_str() {
            "maker" => Some(TakerOrMaker::Maker),
            "taker" => Some(TakerOrMaker::Taker),
            _ => None,
        });
    let fee_cost = first_present(&[&trade.fees, &trade.fee]);
    let fee_currency = first_present(&[&trade.fee_coin, &trade.fee_currency]);
    let fee = (fee_cost.is_some() || fee_currency.is_some()).then(|| Fee {
        cost: fee_cost,
        currency: fee_currency,
        rate: None,
    });

    Trade {
        id: first_present(&[&trade.trade_id, &trade.fill_id, &trade.id]),
        order: first_present(&[&trade.order_id, &trade.order_id_snake]),
        symbol: symbol_for(market, trade.symbol.as_ref()),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        side,
        order_type: parse_order_type(trade.order_type.as_deref()),
        taker_or_maker,
        price,
        amount,
        cost,
        fee,
        info: raw.clone(),
    }
}

pub fn parse_order(raw: &Value, market: Option<&Market>) -> Order {
    let order: WeexOrder = schema(raw);
    let amount = first_present(&[&order.quantity, &order.size]);
    let filled = first_present(&[
        &order.fill_quantity,
        &order.filled_quantity,
        &order.fill_size,
    ]);
    let mut average = first_present(&[&order.fill_price, &order.price_avg, &order.avg_price]);
    let mut cost = first_present(&[
        &order.fill_total_amount,
        &order.filled_amount,
        &order.fill_value,
    ]);
    if average.is_none() {
        average = match (cost, filled) {
            (Some(cost), Some(filled)) if !filled.is_zero() => cost.checked_div(filled),
            _ => None,
        };
    }
    if cost.is_none() {
        cost = match (filled, average) {
            (Some(filled), Some(average)) => filled.checked_mul(average),
            _ => None,
        };
    }
    let remaining = match (amount, filled) {
        (Some(amount), Some(filled)) => amount.checked_sub(filled),
        _ => None,
    };
    let timestamp = first_present(&[
        &order.create_time,
        &order.c_time,
        &order.timestamp,
        &order.ts,
    ]);
    let fee = (order.fees.is_some() || order.fee_coin.is_some()).then(|| Fee {
        cost: order.fees,
        currency: order.fee_coin.clone(),
        rate: None,
    });

    Order {
        id: first_present(&[&order.order_id, &order.order_id_snake, &order.id]),
        client_order_id: first_present(&[
            &order.client_order_id,
            &order.client_oid_snake,
            &order.client_oid,
        ]),
        symbol: symbol_for(market, order.symbol.as_ref()),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        last_trade_timestamp: first_present(&[&order.update_time, &order.u_time]),
        status: order.status.as_deref().map(parse_order_status),
        side: parse_side(order.side.as_deref()),
        order_type: parse_order_type(order.order_type.as_deref()),
        time_in_force: order.force.as_deref().and_then(parse_time_in_force),
        price: order.price,
        average,
        amount,
        filled,
        remaining,
        cost,
        fee,
        trades: Vec::new(),
        info: raw.clone(),
    }
}

/// `[timestamp, open, high, low, close, baseVolume, quoteVolume]`; the quote
/// volume is dropped.
pub fn parse_ohlcv(raw: &Value) -> Option<Ohlcv> {
    let fields = raw.as_array()?;
    if fields.len() < 6 {
        return None;
    }
    Some(Ohlcv {
        timestamp: value_to_i64(&fields[0])?,
        open: value_to_decimal(&fields[1])?,
        high: value_to_decimal(&fields[2])?,
        low: value_to_decimal(&fields[3])?,
        close: value_to_decimal(&fields[4])?,
        volume: value_to_decimal(&fields[5])?,
    })
}

pub fn parse_balance(data: &Value) -> Balances {
    let mut balances = BTreeMap::new();
    for raw in list_payload(data, &["balances", "list"]) {
        let entry: WeexBalance = schema(raw);
        let Some(code) = first_present(&[&entry.coin_name, &entry.coin]) else {
            continue;
        };
        let free = entry.available;
        let used = first_present(&[&entry.frozen, &entry.locked]);
        let total = first_present(&[&entry.equity, &entry.total]).or_else(|| match (free, used) {
            (Some(free), Some(used)) => free.checked_add(used),
            _ => None,
        });
        balances.insert(code.to_uppercase(), Balance { free, used, total });
    }

    Balances {
        timestamp: None,
        datetime: None,
        balances,
        info: data.clone(),
    }
}

pub fn parse_ledger_entry(raw: &Value) -> LedgerEntry {
    let bill: WeexBill = schema(raw);
    let signed = first_present(&[&bill.amount, &bill.size]);
    let direction = signed.map(|amount| {
        if amount.is_sign_negative() && !amount.is_zero() {
            LedgerDirection::Out
        } else {
            LedgerDirection::In
        }
    });
    let currency = first_present(&[&bill.coin_name, &bill.coin]).map(|c| c.to_uppercase());
    let fee_cost = first_present(&[&bill.fees, &bill.fee]);
    let timestamp = first_present(&[&bill.c_time, &bill.create_time]);

    LedgerEntry {
        id: first_present(&[&bill.bill_id, &bill.id]),
        fee: fee_cost.map(|cost| Fee {
            cost: Some(cost),
            currency: currency.clone(),
            rate: None,
        }),
        currency,
        direction,
        amount: signed.map(|amount| amount.abs()),
        after: bill.balance,
        entry_type: first_present(&[&bill.business_type, &bill.group_type]),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        info: raw.clone(),
    }
}

pub fn parse_transfer(raw: &Value) -> TransferEntry {
    let transfer: WeexTransfer = schema(raw);
    let timestamp = first_present(&[&transfer.c_time, &transfer.create_time, &transfer.ts]);

    TransferEntry {
        id: first_present(&[&transfer.transfer_id, &transfer.trade_id, &transfer.id]),
        currency: first_present(&[&transfer.coin_name, &transfer.coin]).map(|c| c.to_uppercase()),
        amount: first_present(&[&transfer.amount, &transfer.size]),
        from_account: transfer.from_type,
        to_account: transfer.to_type,
        status: transfer.status,
        timestamp,
        datetime: timestamp.and_then(iso8601),
        info: raw.clone(),
    }
}
