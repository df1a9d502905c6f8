pub mod currency_layer;
pub mod http;
pub mod odata;
pub mod rest_countries;
