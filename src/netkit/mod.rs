//! HTTP client helpers, host lookups and query parameter access.

mod host;
mod http;
mod params;

pub use host::{gethostbyname, gethostbynamel, gethostname, ip2long, long2ip, network_status};
pub use http::{http_get, http_get_with_proxy, http_post_json, post, HttpClient, JSON_CONTENT_TYPE};
pub use params::{param, DataConverter};
