//! Browser session lifecycle for test scenarios

use crate::cdp::CdpPage;
use crate::error::Result;
use crate::webdriver::WebDriverPage;
use a11y_core::{BrowserConfig, DriverKind, Page};
use tracing::info;

/// One browser session per scenario.
///
/// The driver family is picked from [`BrowserConfig::driver`] when the
/// session opens; afterwards everything goes through the [`Page`] trait.
pub struct BrowserSession {
    page: Box<dyn Page>,
    driver: DriverKind,
}

impl BrowserSession {
    /// Open a fresh session with the configured driver
    ///
    /// # Example
    /// ```no_run
    /// use a11y_browser::BrowserSession;
    /// use a11y_core::BrowserConfig;
    ///
    /// #[tokio::main]
    /// async fn main() -> a11y_core::Result<()> {
    ///     let session = BrowserSession::open(&BrowserConfig::default()).await?;
    ///     session.visit("https://example.com").await?;
    ///     session.quit().await
    /// }
    /// ```
    pub async fn open(config: &BrowserConfig) -> Result<Self> {
        let page: Box<dyn Page> = match config.driver {
            DriverKind::Cdp => match config.debug_port {
                Some(port) => Box::new(CdpPage::connect(port, config).await?),
                None => Box::new(CdpPage::launch_with_config(config).await?),
            },
            DriverKind::WebDriver => Box::new(WebDriverPage::open(config).await?),
        };

        info!("Browser session opened ({:?})", config.driver);
        Ok(Self {
            page,
            driver: config.driver,
        })
    }

    /// Wrap an already opened page
    pub fn from_page(page: Box<dyn Page>, driver: DriverKind) -> Self {
        Self { page, driver }
    }

    /// Navigate to a URL
    pub async fn visit(&self, url: &str) -> Result<()> {
        self.page.visit(url).await
    }

    /// Page handle for running audits
    pub fn page(&self) -> &dyn Page {
        self.page.as_ref()
    }

    pub fn driver(&self) -> DriverKind {
        self.driver
    }

    /// Close the session
    pub async fn quit(self) -> Result<()> {
        info!("Closing browser session");
        self.page.quit().await
    }
}
