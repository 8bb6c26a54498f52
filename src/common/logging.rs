use anyhow::Context;
use time::macros::format_description;
use tracing::Subscriber;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

impl LogOutput {
    fn writer(self) -> BoxMakeWriter {
        match self {
            LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

// Une ligne JSON par événement, horodatage UTC
pub fn json_layer<S>(writer: BoxMakeWriter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // RFC3339-like with UTC
    let timer = UtcTime::new(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z"));

    fmt::layer()
        .event_format(fmt::format().json().with_current_span(false).with_span_list(false))
        .fmt_fields(fmt::format::JsonFields::new())
        .with_timer(timer)
        .with_writer(writer)
}

// Initialise le pipeline de logs JSON. RUST_LOG prend le pas sur `default_level`.
// Les journaux internes de Rocket sont coupés dans `web::build`: seuls nos événements sortent.
pub fn init(default_level: &str, output: LogOutput) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("invalid log filter: {default_level}"))?;

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer(output.writer()));
    tracing::subscriber::set_global_default(subscriber).context("tracing subscriber already set")?;

    Ok(())
}

pub fn short_uuid() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    id.split('-').next().unwrap_or(&id).to_string()
}

pub mod events {
    pub const APP_START: &str = "app_start";
    pub const APP_READY: &str = "app_ready";
    pub const APP_SHUTDOWN: &str = "app_shutdown";
    pub const APP_ERROR: &str = "app_error";

    pub const HTTP_REQUEST: &str = "http_request";
    pub const HTTP_RESPONSE: &str = "http_response";

    pub const RENDER_START: &str = "render_start";
    pub const RENDER_DONE: &str = "render_done";
}

#[cfg(test)]
pub mod testing {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::writer::BoxMakeWriter;

    // Tampon partagé pour relire les lignes JSON écrites par `json_layer`
    #[derive(Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn writer(&self) -> BoxMakeWriter {
            let sink = self.clone();
            BoxMakeWriter::new(move || sink.clone())
        }

        pub fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
