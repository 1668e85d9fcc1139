use std::env;
use std::future::Future;

use typered::Template;

pub type BoxError = Box<dyn std::error::Error>;
pub type MainResult = Result<(), BoxError>;

/// Runs a doc example against a template connected to `REDIS_URL`.
///
/// Exits successfully without running the body when the env var is absent,
/// so the examples pass on machines without a server.
pub fn with_template<F, Fut>(run: F) -> MainResult
where
    F: FnOnce(Template) -> Fut,
    Fut: Future<Output = MainResult>,
{
    let url = match env::var("REDIS_URL") {
        Ok(url) => url,
        Err(_) => std::process::exit(0),
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let template = Template::new(1, &url).await?;
        run(template).await
    })
}
