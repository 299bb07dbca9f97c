use super::{CheckOptions, format_json, runtime};
use anyhow::Result;
use pagecheck_core::ResourceRequest;
use pagecheck_core::analysis::{PerformanceChecker, SeoAnalyzer};

/// Resolve a `perf://` or `seo://` URI. Output is always JSON.
pub fn execute(uri: &str, options: &CheckOptions) -> Result<()> {
    let request = ResourceRequest::parse(uri)?;
    tracing::info!("Resolving {}", request);

    let performance = PerformanceChecker::new(&options.performance_config())?;
    let seo = SeoAnalyzer::new(&options.seo_config())?;

    let value = runtime()?.block_on(request.resolve(&performance, &seo))?;
    println!("{}", format_json(&value)?);

    Ok(())
}
