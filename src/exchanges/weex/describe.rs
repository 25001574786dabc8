//! Static venue descriptor: endpoints, capabilities, timeframes, fees and error codes.

use crate::core::errors::ErrorKind;
use crate::core::types::Timeframe;
use rust_decimal::Decimal;

pub const EXCHANGE_ID: &str = "weex";
pub const EXCHANGE_NAME: &str = "WEEX";
pub const COUNTRIES: &[&str] = &["SC"];
pub const API_VERSION: &str = "v2";
pub const REST_URL: &str = "https://api-spot.weex.com";
pub const WWW_URL: &str = "https://www.weex.com";
pub const DOC_URL: &str = "https://www.weex.com/api-doc";

/// Envelope `code` of a successful response
pub const SUCCESS_CODE: &str = "00000";

/// Request weight refilled per second
pub const RATE_LIMIT_PER_SECOND: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

impl HttpVerb {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Time,
    Currencies,
    Products,
    ExchangeInfo,
    Ticker,
    Tickers,
    MarketFills,
    Candles,
    Depth,
    Assets,
    TransferRecords,
    Bills,
    PlaceOrder,
    BatchOrders,
    CancelOrder,
    CancelBatchOrders,
    CancelSymbolOrders,
    OrderInfo,
    OpenOrders,
    OrderHistory,
    TradeFills,
}

impl Endpoint {
    pub const ALL: [Self; 21] = [
        Self::Time,
        Self::Currencies,
        Self::Products,
        Self::ExchangeInfo,
        Self::Ticker,
        Self::Tickers,
        Self::MarketFills,
        Self::Candles,
        Self::Depth,
        Self::Assets,
        Self::TransferRecords,
        Self::Bills,
        Self::PlaceOrder,
        Self::BatchOrders,
        Self::CancelOrder,
        Self::CancelBatchOrders,
        Self::CancelSymbolOrders,
        Self::OrderInfo,
        Self::OpenOrders,
        Self::OrderHistory,
        Self::TradeFills,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Time => "/api/v2/public/time",
            Self::Currencies => "/api/v2/public/currencies",
            Self::Products => "/api/v2/public/products",
            Self::ExchangeInfo => "/api/v2/public/exchangeInfo",
            Self::Ticker => "/api/v2/market/ticker",
            Self::Tickers => "/api/v2/market/tickers",
            Self::MarketFills => "/api/v2/market/fills",
            Self::Candles => "/api/v2/market/candles",
            Self::Depth => "/api/v2/market/depth",
            Self::Assets => "/api/v2/account/assets",
            Self::TransferRecords => "/api/v2/account/transferRecords",
            Self::Bills => "/api/v2/account/bills",
            Self::PlaceOrder => "/api/v2/trade/orders",
            Self::BatchOrders => "/api/v2/trade/batch-orders",
            Self::CancelOrder => "/api/v2/trade/cancel-order",
            Self::CancelBatchOrders => "/api/v2/trade/cancel-batch-orders",
            Self::CancelSymbolOrders => "/api/v2/trade/cancel-symbol-order",
            Self::OrderInfo => "/api/v2/trade/orderInfo",
            Self::OpenOrders => "/api/v2/trade/open-orders",
            Self::OrderHistory => "/api/v2/trade/history",
            Self::TradeFills => "/api/v2/trade/fills",
        }
    }

    pub const fn verb(self) -> HttpVerb {
        match self {
            Self::Time
            | Self::Currencies
            | Self::Products
            | Self::ExchangeInfo
            | Self::Ticker
            | Self::Tickers
            | Self::MarketFills
            | Self::Candles
            | Self::Depth
            | Self::Assets
            | Self::TransferRecords => HttpVerb::Get,
            _ => HttpVerb::Post,
        }
    }

    pub const fn access(self) -> Access {
        match self {
            Self::Time
            | Self::Currencies
            | Self::Products
            | Self::ExchangeInfo
            | Self::Ticker
            | Self::Tickers
            | Self::MarketFills
            | Self::Candles
            | Self::Depth => Access::Public,
            _ => Access::Private,
        }
    }

    pub const fn is_private(self) -> bool {
        matches!(self.access(), Access::Private)
    }

    /// Relative rate-limit cost
    pub const fn weight(self) -> u32 {
        match self {
            Self::BatchOrders | Self::CancelBatchOrders | Self::CancelSymbolOrders => 5,
            Self::Tickers | Self::Currencies | Self::ExchangeInfo | Self::Products => 2,
            _ => 1,
        }
    }
}

/// Unified operations the connector supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    pub spot: bool,
    pub margin: bool,
    pub swap: bool,
    pub future: bool,
    pub option: bool,
    pub ws: bool,
    pub fetch_time: bool,
    pub fetch_currencies: bool,
    pub fetch_markets: bool,
    pub fetch_ticker: bool,
    pub fetch_tickers: bool,
    pub fetch_order_book: bool,
    pub fetch_trades: bool,
    pub fetch_ohlcv: bool,
    pub fetch_balance: bool,
    pub create_order: bool,
    pub create_orders: bool,
    pub cancel_order: bool,
    pub cancel_orders: bool,
    pub cancel_all_orders: bool,
    pub fetch_order: bool,
    pub fetch_open_orders: bool,
    pub fetch_orders: bool,
    pub fetch_my_trades: bool,
    pub fetch_ledger: bool,
    pub fetch_transfers: bool,
    pub fetch_deposits: bool,
    pub fetch_withdrawals: bool,
    pub withdraw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingFees {
    pub maker: Decimal,
    pub taker: Decimal,
    pub percentage: bool,
    pub tier_based: bool,
}

#[derive(Debug)]
pub struct ExchangeDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub countries: &'static [&'static str],
    pub version: &'static str,
    pub public_url: &'static str,
    pub private_url: &'static str,
    pub www: &'static str,
    pub doc: &'static str,
    pub rate_limit_per_second: u32,
    pub has: Capabilities,
    pub fees: TradingFees,
    pub exact_errors: &'static [(&'static str, ErrorKind)],
    pub broad_errors: &'static [(&'static str, ErrorKind)],
}

impl ExchangeDescriptor {
    /// Venue period for a unified timeframe, `None` when unsupported.
    pub fn timeframe(&self, timeframe: Timeframe) -> Option<&'static str> {
        TIMEFRAMES
            .iter()
            .find(|(tf, _)| *tf == timeframe)
            .map(|(_, period)| *period)
    }

    pub fn timeframes(&self) -> impl Iterator<Item = Timeframe> {
        TIMEFRAMES.iter().map(|(tf, _)| *tf)
    }

    pub fn exact_error(&self, code: &str) -> Option<ErrorKind> {
        self.exact_errors
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, kind)| *kind)
    }

    pub fn broad_error(&self, message: &str) -> Option<ErrorKind> {
        self.broad_errors
            .iter()
            .find(|(fragment, _)| message.contains(fragment))
            .map(|(_, kind)| *kind)
    }
}

const TIMEFRAMES: &[(Timeframe, &str)] = &[
    (Timeframe::Minutes1, "1m"),
    (Timeframe::Minutes5, "5m"),
    (Timeframe::Minutes15, "15m"),
    (Timeframe::Minutes30, "30m"),
    (Timeframe::Hours1, "1h"),
    (Timeframe::Hours4, "4h"),
    (Timeframe::Hours12, "12h"),
    (Timeframe::Days1, "1d"),
    (Timeframe::Weeks1, "1w"),
];

const EXACT_ERRORS: &[(&str, ErrorKind)] = &[
    ("40001", ErrorKind::Authentication),
    ("40002", ErrorKind::Authentication),
    ("40003", ErrorKind::Authentication),
    ("40005", ErrorKind::InvalidNonce),
    ("40006", ErrorKind::Authentication),
    ("40008", ErrorKind::InvalidNonce),
    ("40009", ErrorKind::Authentication),
    ("40011", ErrorKind::Authentication),
    ("40012", ErrorKind::Authentication),
    ("40013", ErrorKind::AccountSuspended),
    ("40014", ErrorKind::PermissionDenied),
    ("40015", ErrorKind::Exchange),
    ("40016", ErrorKind::PermissionDenied),
    ("40017", ErrorKind::BadRequest),
    ("40018", ErrorKind::PermissionDenied),
    ("40019", ErrorKind::BadRequest),
    ("40020", ErrorKind::BadRequest),
    ("40034", ErrorKind::BadSymbol),
    ("40200", ErrorKind::OnMaintenance),
    ("40301", ErrorKind::PermissionDenied),
    ("40404", ErrorKind::BadRequest),
    ("429", ErrorKind::RateLimitExceeded),
    ("43001", ErrorKind::OrderNotFound),
    ("43004", ErrorKind::OrderNotFound),
    ("43011", ErrorKind::InvalidOrder),
    ("43115", ErrorKind::InvalidOrder),
    ("45110", ErrorKind::InvalidOrder),
];

// No message fragments are known to be stable for this venue.
const BROAD_ERRORS: &[(&str, ErrorKind)] = &[];

static DESCRIPTOR: ExchangeDescriptor = ExchangeDescriptor {
    id: EXCHANGE_ID,
    name: EXCHANGE_NAME,
    countries: COUNTRIES,
    version: API_VERSION,
    public_url: REST_URL,
    private_url: REST_URL,
    www: WWW_URL,
    doc: DOC_URL,
    rate_limit_per_second: RATE_LIMIT_PER_SECOND,
    has: Capabilities {
        spot: true,
        margin: false,
        swap: false,
        future: false,
        option: false,
        ws: false,
        fetch_time: true,
        fetch_currencies: true,
        fetch_markets: true,
        fetch_ticker: true,
        fetch_tickers: true,
        fetch_order_book: true,
        fetch_trades: true,
        fetch_ohlcv: true,
        fetch_balance: true,
        create_order: true,
        create_orders: true,
        cancel_order: true,
        cancel_orders: true,
        cancel_all_orders: true,
        fetch_order: true,
        fetch_open_orders: true,
        fetch_orders: true,
        fetch_my_trades: true,
        fetch_ledger: true,
        fetch_transfers: true,
        fetch_deposits: false,
        fetch_withdrawals: false,
        withdraw: false,
    },
    fees: TradingFees {
        maker: Decimal::from_parts(1, 0, 0, false, 3),
        taker: Decimal::from_parts(1, 0, 0, false, 3),
        percentage: true,
        tier_based: false,
    },
    exact_errors: EXACT_ERRORS,
    broad_errors: BROAD_ERRORS,
};

pub fn describe() -> &'static ExchangeDescriptor {
    &DESCRIPTOR
}
