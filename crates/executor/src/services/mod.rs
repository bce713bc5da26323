pub mod market_probe;
