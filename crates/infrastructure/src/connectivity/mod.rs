mod http_monitor;

pub use http_monitor::HttpConnectivityMonitor;
