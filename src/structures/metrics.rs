use std::time::Instant;
use prometheus::{
    exponential_buckets, opts, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Registry, TextEncoder,
};

const LATENCY_BUCKET_START: f64 = 0.005;
const LATENCY_BUCKET_COUNT: usize = 11;

// Regroupe le registry Prometheus et les métriques HTTP du service
pub struct Metrics {
    pub registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub uptime_seconds: IntGauge,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            opts!("http_requests_total", "Total HTTP requests by method and status"),
            &["method", "status"],
        )?;

        // 5 ms, 10 ms, 20 ms ... ~5 s
        let histogram_opts = HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latencies in seconds",
        ).buckets(exponential_buckets(LATENCY_BUCKET_START, 2.0, LATENCY_BUCKET_COUNT)?);

        let http_request_duration_seconds = HistogramVec::new(histogram_opts, &["method"])?;

        let uptime_seconds = IntGauge::new("uptime_seconds", "Process uptime in seconds")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            uptime_seconds,
            start_time: Instant::now(),
        })
    }

    pub fn observe(&self, method: &str, status: u16, elapsed_secs: f64) {
        let status = status.to_string();
        self.http_requests_total.with_label_values(&[method, &status]).inc();
        self.http_request_duration_seconds.with_label_values(&[method]).observe(elapsed_secs);
    }

    // Rafraîchit la jauge d'uptime puis encode tout le registry au format texte
    pub fn gather_text(&self) -> prometheus::Result<String> {
        self.uptime_seconds.set(self.start_time.elapsed().as_secs() as i64);

        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
