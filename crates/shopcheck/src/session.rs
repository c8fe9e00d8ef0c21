//! A browser session owned by one scenario.
//!
//! The session is created before a scenario runs and closed after it, so no
//! browser state leaks between scenarios.

use crate::driver::{BrowserDriver, DriverConfig};
use crate::pages::{InventoryPage, LoginPage, PageContext, SideBar};
use crate::result::ShopResult;
use crate::wait::WaitOptions;
use std::path::{Path, PathBuf};

/// One driver plus the configuration it was created with
#[derive(Debug)]
pub struct Session<D: BrowserDriver> {
    driver: D,
    config: DriverConfig,
}

impl<D: BrowserDriver> Session<D> {
    /// Wrap an already launched driver, applying the configured implicit wait
    pub fn new(mut driver: D, config: DriverConfig) -> Self {
        driver.set_implicit_wait(config.implicit_wait);
        Self { driver, config }
    }

    /// Driver configuration
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The underlying driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// The underlying driver, mutably
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Explicit wait used by page actions
    pub fn wait(&self) -> WaitOptions {
        WaitOptions::from(self.config.explicit_wait)
    }

    fn context(&mut self) -> PageContext<'_, D> {
        let wait = self.wait();
        PageContext::new(&mut self.driver, wait)
    }

    /// Navigate to the storefront and return the login page
    pub async fn open(&mut self) -> ShopResult<LoginPage<'_, D>> {
        tracing::info!(url = %self.config.base_url, "opening storefront");
        let url = self.config.base_url.clone();
        self.driver.navigate(&url).await?;
        Ok(self.login_page())
    }

    /// The login page, assuming the browser shows it
    pub fn login_page(&mut self) -> LoginPage<'_, D> {
        LoginPage::new(self.context())
    }

    /// The inventory, assuming the browser shows it
    pub fn inventory_page(&mut self) -> InventoryPage<'_, D> {
        InventoryPage::new(self.context())
    }

    /// Open the storefront and log in with the standard account
    pub async fn login_as(&mut self, username: &str, password: &str) -> ShopResult<InventoryPage<'_, D>> {
        self.open().await?.login(username, password).await
    }

    /// Clear cart and product state from whichever screen is showing
    pub async fn reset_app_state(&mut self) -> ShopResult<()> {
        SideBar::new(self.context()).reset_app_state().await
    }

    /// Save a screenshot named after a failed scenario.
    ///
    /// Returns the path written.
    pub async fn capture_failure(&self, name: &str, dir: &Path) -> ShopResult<PathBuf> {
        let shot = self.driver.screenshot().await?;
        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = dir.join(format!("{name}_{stamp}.png"));
        shot.save(&path)?;
        tracing::warn!(path = %path.display(), "saved failure screenshot");
        Ok(path)
    }

    /// Close the browser
    pub async fn close(mut self) -> ShopResult<()> {
        self.driver.close().await
    }
}

#[cfg(feature = "browser")]
impl Session<crate::cdp::ChromiumDriver> {
    /// Launch Chrome with `config` and wrap it
    pub async fn launch(config: DriverConfig) -> ShopResult<Self> {
        let driver = crate::cdp::ChromiumDriver::launch(config.clone()).await?;
        Ok(Self::new(driver, config))
    }
}
