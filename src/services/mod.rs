// Dashpad network-backed stores and provider clients
// Services own the async fetch pipelines: feed aggregation and weather.

pub mod feed_client;
pub mod geo_client;
pub mod news_aggregator;
pub mod weather_service;
