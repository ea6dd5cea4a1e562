use indicatif::ProgressStyle;
use tracing::{Span, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::registry::LookupSpan;

const TICKS: [&str; 8] = [
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Progress layer that draws a spinner for spans marked `indicatif.pb_show`.
pub fn layer<S>() -> IndicatifLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer: IndicatifLayer<S> = IndicatifLayer::new();
    match ProgressStyle::with_template("{spinner:.blue} {span_name} {msg}") {
        Ok(style) => layer.with_progress_style(style.tick_strings(&TICKS)),
        Err(_) => layer,
    }
}

pub fn set_message(msg: &str) {
    Span::current().pb_set_message(msg);
}

pub fn report_progress(current: usize, total: usize, label: &str) {
    set_message(&format!("[{current}/{total}] {label}"));
}
