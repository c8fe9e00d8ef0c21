//! Chrome DevTools Protocol driver.
//!
//! Element access goes through `Runtime.evaluate` with the JavaScript queries
//! produced by [`Selector`](crate::Selector), so CSS, id and XPath locators
//! share one code path. Lookups poll until the locator's own timeout or,
//! without one, the configured implicit wait.

use crate::driver::{BrowserDriver, BrowserKind, DriverConfig, RunEnv, Screenshot};
use crate::locator::Locator;
use crate::result::{ShopError, ShopResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, CaptureScreenshotParams};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Wrapper so a present element whose value is JSON `null` differs from a
/// missing element.
#[derive(Debug, Deserialize)]
struct Found<T> {
    v: T,
}

/// Browser driver backed by a real Chromium over CDP
#[derive(Debug)]
pub struct ChromiumDriver {
    config: DriverConfig,
    browser: Mutex<CdpBrowser>,
    page: CdpPage,
    handle: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::BrowserLaunch`] for browsers or environments CDP
    /// cannot drive, or when the process fails to start.
    pub async fn launch(config: DriverConfig) -> ShopResult<Self> {
        if config.browser != BrowserKind::Chrome {
            return Err(ShopError::BrowserLaunch {
                message: format!(
                    "{} is not supported over CDP; use --browser chrome",
                    config.browser
                ),
            });
        }
        if config.run_env == RunEnv::Docker {
            return Err(ShopError::BrowserLaunch {
                message: format!(
                    "docker runs need a WebDriver grid at {}; CDP drives a local chrome only",
                    config.remote_url
                ),
            });
        }

        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .args(config.launch_args().into_iter().filter(|a| a != "--headless"));

        if !config.headless {
            builder = builder.with_head();
        }
        builder = builder.no_sandbox();
        if let Some(ref path) = config.executable_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|message| ShopError::BrowserLaunch { message })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| ShopError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ShopError::BrowserLaunch {
                message: e.to_string(),
            })?;

        tracing::info!(headless = config.headless, "chrome launched");
        Ok(Self {
            config,
            browser: Mutex::new(browser),
            page,
            handle,
        })
    }

    /// Configuration the browser was launched with
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    async fn eval<T: DeserializeOwned + Send>(&self, expr: &str) -> ShopResult<T> {
        let result = self
            .page
            .evaluate(expr)
            .await
            .map_err(|e| ShopError::driver(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| ShopError::driver(e.to_string()))
    }

    /// Evaluate `body` against the first match, polling until it exists.
    async fn with_element<T: DeserializeOwned + Send>(&self, locator: &Locator, body: &str) -> ShopResult<T> {
        let expr = format!(
            "(() => {{ const el = {}; if (!el) return null; return {{ v: {body} }}; }})()",
            locator.selector().to_query()
        );
        let deadline = self.lookup_timeout(locator);
        let start = Instant::now();
        loop {
            if let Some(found) = self.eval::<Option<Found<T>>>(&expr).await? {
                return Ok(found.v);
            }
            if start.elapsed() >= deadline {
                return Err(ShopError::ElementNotFound {
                    locator: locator.to_string(),
                });
            }
            tokio::time::sleep(locator.options().poll_interval).await;
        }
    }

    async fn set_value(&self, locator: &Locator, value_expr: &str) -> ShopResult<()> {
        // React tracks input values through the native setter
        let body = format!(
            "(() => {{ const set = Object.getOwnPropertyDescriptor(HTMLInputElement.prototype, 'value').set; \
             set.call(el, {value_expr}); \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); return true; }})()"
        );
        let _: bool = self.with_element(locator, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl BrowserDriver for ChromiumDriver {
    async fn navigate(&mut self, url: &str) -> ShopResult<()> {
        tracing::debug!(url, "navigate");
        let _ = self
            .page
            .goto(url)
            .await
            .map_err(|e| ShopError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> ShopResult<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| ShopError::driver(e.to_string()))?;
        Ok(url.unwrap_or_default())
    }

    async fn title(&self) -> ShopResult<String> {
        self.eval("document.title").await
    }

    async fn count(&self, locator: &Locator) -> ShopResult<usize> {
        self.eval(&format!("{}.length", locator.selector().to_query_all()))
            .await
    }

    async fn text(&self, locator: &Locator) -> ShopResult<String> {
        self.with_element(locator, "(el.innerText || el.textContent || '').trim()")
            .await
    }

    async fn texts(&self, locator: &Locator) -> ShopResult<Vec<String>> {
        let expr = format!(
            "{}.map(el => (el.innerText || el.textContent || '').trim())",
            locator.selector().to_query_all()
        );
        let deadline = self.lookup_timeout(locator);
        let start = Instant::now();
        loop {
            let texts: Vec<String> = self.eval(&expr).await?;
            if !texts.is_empty() || start.elapsed() >= deadline {
                return Ok(texts);
            }
            tokio::time::sleep(locator.options().poll_interval).await;
        }
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> ShopResult<Option<String>> {
        self.with_element(locator, &format!("el.getAttribute({name:?})"))
            .await
    }

    async fn inner_html(&self, locator: &Locator) -> ShopResult<String> {
        self.with_element(locator, "el.innerHTML").await
    }

    async fn is_displayed(&self, locator: &Locator) -> ShopResult<bool> {
        self.eval(&format!(
            "(() => {{ const el = {}; if (!el) return false; const s = getComputedStyle(el); \
             return s.display !== 'none' && s.visibility !== 'hidden' && el.getClientRects().length > 0; }})()",
            locator.selector().to_query()
        ))
        .await
    }

    async fn click(&mut self, locator: &Locator) -> ShopResult<()> {
        tracing::debug!(%locator, "click");
        let _: bool = self.with_element(locator, "(el.click(), true)").await?;
        Ok(())
    }

    async fn click_nth(&mut self, locator: &Locator, index: usize) -> ShopResult<()> {
        tracing::debug!(%locator, index, "click nth");
        let clicked: bool = self
            .eval(&format!(
                "(() => {{ const el = {}[{index}]; if (!el) return false; el.click(); return true; }})()",
                locator.selector().to_query_all()
            ))
            .await?;
        if clicked {
            Ok(())
        } else {
            Err(ShopError::ElementNotFound {
                locator: format!("{locator}[{index}]"),
            })
        }
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> ShopResult<()> {
        tracing::debug!(%locator, "type");
        self.set_value(locator, &format!("el.value + {text:?}")).await
    }

    async fn clear(&mut self, locator: &Locator) -> ShopResult<()> {
        self.set_value(locator, "''").await
    }

    async fn select_option_by_text(&mut self, locator: &Locator, text: &str) -> ShopResult<()> {
        tracing::debug!(%locator, option = text, "select");
        let body = format!(
            "(() => {{ const opt = Array.from(el.options).find(o => o.text.trim() === {text:?}); \
             if (!opt) return false; \
             const set = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value').set; \
             set.call(el, opt.value); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); return true; }})()"
        );
        if self.with_element::<bool>(locator, &body).await? {
            Ok(())
        } else {
            Err(ShopError::ElementNotFound {
                locator: format!("{locator} option '{text}'"),
            })
        }
    }

    async fn screenshot(&self) -> ShopResult<Screenshot> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let shot = self
            .page
            .execute(params)
            .await
            .map_err(|e| ShopError::driver(e.to_string()))?;

        use base64::Engine;
        let data = base64::engine::general_purpose::STANDARD
            .decode(&shot.data)
            .map_err(|e| ShopError::driver(e.to_string()))?;
        Ok(Screenshot::new(data))
    }

    async fn close(&mut self) -> ShopResult<()> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| ShopError::driver(e.to_string()))?;
        let _ = browser.wait().await;
        self.handle.abort();
        tracing::info!("chrome closed");
        Ok(())
    }

    fn implicit_wait(&self) -> Duration {
        self.config.implicit_wait
    }

    fn set_implicit_wait(&mut self, wait: Duration) {
        self.config.implicit_wait = wait;
    }
}
