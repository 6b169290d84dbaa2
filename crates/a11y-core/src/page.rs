//! Page capability shared by every browser driver

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// A live browser page that scripts can be run in.
///
/// Each automation driver family provides one implementation; the audit
/// runner only talks to this trait.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate to a URL and wait for the load to finish
    async fn visit(&self, url: &str) -> Result<()>;

    /// Run a script for its side effects, discarding any value
    async fn execute_script(&self, script: &str) -> Result<()>;

    /// Evaluate a single expression and return its value as JSON
    async fn evaluate(&self, expression: &str) -> Result<Value>;

    /// Close the page and its session
    async fn quit(&self) -> Result<()>;
}

#[async_trait]
impl<P: Page + ?Sized> Page for std::sync::Arc<P> {
    async fn visit(&self, url: &str) -> Result<()> {
        (**self).visit(url).await
    }

    async fn execute_script(&self, script: &str) -> Result<()> {
        (**self).execute_script(script).await
    }

    async fn evaluate(&self, expression: &str) -> Result<Value> {
        (**self).evaluate(expression).await
    }

    async fn quit(&self) -> Result<()> {
        (**self).quit().await
    }
}
