mod dashboard;
mod defaults;
mod distribution;
mod fmt;
mod metrics;
mod set;
mod statistics;
mod time_statistic;

pub use dashboard::AsciiDashboard;
pub use defaults::{metric_names, metric_tags};
pub use distribution::*;
pub use fmt::{fmt_duration, render_dashboard, render_full, render_metric_rows_full, sparkline};
pub use metrics::*;
pub use set::MetricSet;
pub use statistics::*;
pub use time_statistic::*;
