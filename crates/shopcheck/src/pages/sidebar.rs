//! Burger menu available on every screen after login.

use super::common::PageContext;
use super::login::LoginPage;
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::result::ShopResult;
use crate::wait::wait_for_displayed;

pub(crate) fn menu_button() -> Locator {
    Locator::id("react-burger-menu-btn")
}

pub(crate) fn close_button() -> Locator {
    Locator::id("react-burger-cross-btn")
}

pub(crate) fn logout_link() -> Locator {
    Locator::id("logout_sidebar_link")
}

pub(crate) fn reset_link() -> Locator {
    Locator::id("reset_sidebar_link")
}

/// Side menu
#[derive(Debug)]
pub struct SideBar<'a, D: BrowserDriver> {
    ctx: PageContext<'a, D>,
}

impl<'a, D: BrowserDriver> SideBar<'a, D> {
    pub fn new(ctx: PageContext<'a, D>) -> Self {
        Self { ctx }
    }

    /// Open the menu unless it is already showing
    pub async fn open(&mut self) -> ShopResult<()> {
        if self.ctx.is_displayed(&logout_link()).await? {
            return Ok(());
        }
        self.ctx.click(&menu_button()).await?;
        let _ = wait_for_displayed(self.ctx.driver(), &logout_link(), self.ctx.wait()).await?;
        Ok(())
    }

    /// Clear the cart and product state, then close the menu
    pub async fn reset_app_state(mut self) -> ShopResult<()> {
        self.open().await?;
        self.ctx.click(&reset_link()).await?;
        self.ctx.click(&close_button()).await?;
        tracing::debug!("app state reset");
        Ok(())
    }

    /// Log out and return to the login page
    pub async fn logout(mut self) -> ShopResult<LoginPage<'a, D>> {
        self.open().await?;
        self.ctx.click(&logout_link()).await?;
        let login = LoginPage::new(self.ctx);
        login.wait_until_loaded().await?;
        tracing::info!("logged out");
        Ok(login)
    }

    /// Reset app state, then log out
    pub async fn reset_app_state_and_logout(mut self) -> ShopResult<LoginPage<'a, D>> {
        self.open().await?;
        self.ctx.click(&reset_link()).await?;
        self.logout().await
    }
}
