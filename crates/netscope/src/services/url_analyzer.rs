//! URL analysis: parsing plus reachability, DNS and address classification

use crate::api::types::{QueryParameter, UrlAnalysisResult};
use crate::network::{DnsResolver, ReachabilityProber};
use common::classify_host;
use metrics::counter;
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use tracing::{info, warn, Instrument, Span};
use url::Url;

/// Scheme assumed when the input has none
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Parses URLs and enriches them with network facts about the host
pub struct UrlAnalyzer {
    prober: Arc<dyn ReachabilityProber>,
    resolver: Arc<dyn DnsResolver>,
    span: Span,
}

impl UrlAnalyzer {
    /// Create an analyzer using the given probes
    pub fn new(
        prober: Arc<dyn ReachabilityProber>,
        resolver: Arc<dyn DnsResolver>,
        span: Span,
    ) -> Self {
        Self {
            prober,
            resolver,
            span,
        }
    }

    /// Analyze `raw`
    ///
    /// Always produces a result. A URL that cannot be parsed comes back with
    /// `is_valid == false` and the parser's message; probe failures leave
    /// their fields at the defaults.
    pub async fn analyze(&self, raw: &str) -> UrlAnalysisResult {
        self.analyze_inner(raw)
            .instrument(self.span.clone())
            .await
    }

    async fn analyze_inner(&self, raw: &str) -> UrlAnalysisResult {
        let mut result = UrlAnalysisResult::new(raw);

        let url = match parse_with_default_scheme(raw) {
            Ok(url) => url,
            Err(message) => {
                warn!(url = raw, "URL rejected: {message}");
                counter!("netscope_url_analyses_total", "valid" => "false").increment(1);
                result.validation_error = Some(message);
                return result;
            }
        };

        let host = url.host_str().unwrap_or_default().to_string();
        let query = url.query().map(|q| format!("?{q}")).unwrap_or_default();

        result.is_valid = true;
        result.scheme = url.scheme().to_string();
        result.host = host.clone();
        result.port = url.port_or_known_default();
        result.path = url.path().to_string();
        result.query_parameters = url.query().map(parse_query).unwrap_or_default();
        result.fragment = url.fragment().map(|f| format!("#{f}")).unwrap_or_default();
        result.user_info = Some(user_info(&url));
        result.authority = Some(authority(&url));
        result.absolute_uri = Some(url.as_str().to_string());
        result.local_path = Some(percent_decode_str(url.path()).decode_utf8_lossy().into_owned());
        result.path_and_query = Some(format!("{}{}", url.path(), query));
        result.query_string = Some(query.clone());
        result.query = query;

        let reachability = self.prober.probe(&host).await;
        if let Some(err) = reachability.failure() {
            warn!(host = %host, "Treating host as unavailable: {err}");
        }
        result.is_available = reachability.value_or(false);

        let records = self.resolver.resolve(&host).await;
        if let Some(err) = records.failure() {
            warn!(host = %host, "No DNS records: {err}");
        }
        result.dns_records = records
            .value_or_default()
            .into_iter()
            .map(|ip| ip.to_string())
            .collect();

        result.address_type = classify_host(&host);

        counter!("netscope_url_analyses_total", "valid" => "true").increment(1);
        info!(url = %url, available = result.is_available, address_type = %result.address_type, "URL analyzed");
        result
    }
}

/// Parse `raw`, prefixing `https://` unless it already names http or https
pub fn parse_with_default_scheme(raw: &str) -> Result<Url, String> {
    let candidate = if has_http_scheme(raw) {
        raw.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{raw}")
    };

    let url = Url::parse(&candidate).map_err(|e| format!("Invalid URL: {e}"))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err("Invalid URL: the hostname could not be parsed".to_string());
    }
    Ok(url)
}

fn has_http_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Split a raw query string (without `?`) into parameters
///
/// Pairs split on `&`, then on the first `=`. Names stay raw, values are
/// percent-decoded (`+` is kept as is). Order and duplicates are preserved.
pub fn parse_query(query: &str) -> Vec<QueryParameter> {
    if query.is_empty() {
        return Vec::new();
    }

    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => QueryParameter {
                name: name.to_string(),
                value: Some(percent_decode_str(value).decode_utf8_lossy().into_owned()),
            },
            None => QueryParameter {
                name: pair.to_string(),
                value: None,
            },
        })
        .collect()
}

fn user_info(url: &Url) -> String {
    match url.password() {
        Some(password) => format!("{}:{}", url.username(), password),
        None => url.username().to_string(),
    }
}

fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
