//! Browser driver abstraction.
//!
//! Page objects talk to the browser only through [`BrowserDriver`]. Two
//! implementations exist:
//!
//! - [`MockDriver`]: scripted in-memory screens, used by unit tests
//! - `ChromiumDriver` (feature `browser`): Chrome over CDP via chromiumoxide

use crate::locator::{Locator, DEFAULT_IMPLICIT_WAIT_MS};
use crate::result::{ShopError, ShopResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

/// Storefront under test
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com/";

/// Selenium grid endpoint used for docker runs
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:4444";

/// Browser family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Google Chrome / Chromium
    #[default]
    Chrome,
    /// Mozilla Firefox
    Firefox,
    /// Microsoft Edge
    Edge,
}

impl BrowserKind {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Edge => "edge",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = ShopError;

    fn from_str(s: &str) -> ShopResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" => Ok(Self::Chrome),
            "firefox" => Ok(Self::Firefox),
            "edge" => Ok(Self::Edge),
            other => Err(ShopError::Config {
                message: format!(
                    "unknown browser '{other}': choose between chrome, firefox, or edge"
                ),
            }),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the browser runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunEnv {
    /// Browser launched on this machine
    #[default]
    Local,
    /// Browser inside a container reached over the network
    Docker,
}

impl RunEnv {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Docker => "docker",
        }
    }
}

impl FromStr for RunEnv {
    type Err = ShopError;

    fn from_str(s: &str) -> ShopResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "docker" => Ok(Self::Docker),
            other => Err(ShopError::Config {
                message: format!("unknown run environment '{other}': choose local or docker"),
            }),
        }
    }
}

impl fmt::Display for RunEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screenshot data with metadata
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Raw PNG data
    pub data: Vec<u8>,
    /// Timestamp when screenshot was taken
    pub timestamp: SystemTime,
}

impl Screenshot {
    /// Create a new screenshot
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            timestamp: SystemTime::now(),
        }
    }

    /// Check if screenshot has data
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty()
    }

    /// Write the PNG to disk
    pub fn save(&self, path: &Path) -> ShopResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Browser configuration for a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Browser family
    pub browser: BrowserKind,
    /// Local or containerised browser
    pub run_env: RunEnv,
    /// Run without a visible window
    pub headless: bool,
    /// Storefront entry URL
    pub base_url: String,
    /// Grid endpoint for docker runs
    pub remote_url: String,
    /// How long element lookups wait
    #[serde(with = "millis")]
    pub implicit_wait: Duration,
    /// How long explicit visibility/clickability waits last
    #[serde(with = "millis")]
    pub explicit_wait: Duration,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Browser executable override
    pub executable_path: Option<String>,
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chrome,
            run_env: RunEnv::Local,
            headless: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            implicit_wait: Duration::from_millis(DEFAULT_IMPLICIT_WAIT_MS),
            explicit_wait: Duration::from_secs(10),
            viewport_width: 1920,
            viewport_height: 1080,
            executable_path: None,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set browser family
    #[must_use]
    pub const fn browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Set run environment
    #[must_use]
    pub const fn run_env(mut self, run_env: RunEnv) -> Self {
        self.run_env = run_env;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set entry URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set implicit wait
    #[must_use]
    pub const fn implicit_wait(mut self, wait: Duration) -> Self {
        self.implicit_wait = wait;
        self
    }

    /// Set explicit wait
    #[must_use]
    pub const fn explicit_wait(mut self, wait: Duration) -> Self {
        self.explicit_wait = wait;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set browser executable
    #[must_use]
    pub fn executable_path(mut self, path: impl Into<String>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Command-line switches for the configured browser and environment
    #[must_use]
    pub fn launch_args(&self) -> Vec<String> {
        let args: &[&str] = match (self.browser, self.run_env) {
            (BrowserKind::Chrome, RunEnv::Docker) => &[
                "--headless",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
            ],
            (BrowserKind::Chrome, RunEnv::Local) if self.headless => &[
                "--headless",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--ignore-certificate-errors",
                "--disable-autofill",
                "--disable-autocomplete",
            ],
            (BrowserKind::Chrome, RunEnv::Local) => &[
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--ignore-certificate-errors",
                "--disable-autofill",
                "--disable-autocomplete",
            ],
            (BrowserKind::Firefox, RunEnv::Docker) => &["-headless"],
            (BrowserKind::Firefox, RunEnv::Local) => &[],
            (BrowserKind::Edge, RunEnv::Docker) => &["start-maximized", "headless", "--disable-gpu"],
            (BrowserKind::Edge, RunEnv::Local) => &["start-maximized"],
        };
        args.iter().map(ToString::to_string).collect()
    }
}

/// Abstract driver trait for browser automation.
///
/// Lookups wait up to [`BrowserDriver::lookup_timeout`] in real drivers;
/// element absence surfaces as [`ShopError::ElementNotFound`].
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> ShopResult<()>;

    /// Current URL
    async fn current_url(&self) -> ShopResult<String>;

    /// Document title
    async fn title(&self) -> ShopResult<String>;

    /// Number of elements matching the locator
    async fn count(&self, locator: &Locator) -> ShopResult<usize>;

    /// Visible text of the first match
    async fn text(&self, locator: &Locator) -> ShopResult<String>;

    /// Visible text of every match, in document order
    async fn texts(&self, locator: &Locator) -> ShopResult<Vec<String>>;

    /// Attribute of the first match
    async fn attribute(&self, locator: &Locator, name: &str) -> ShopResult<Option<String>>;

    /// Inner HTML of the first match
    async fn inner_html(&self, locator: &Locator) -> ShopResult<String>;

    /// Whether the first match exists and is displayed
    async fn is_displayed(&self, locator: &Locator) -> ShopResult<bool>;

    /// Click the first match
    async fn click(&mut self, locator: &Locator) -> ShopResult<()>;

    /// Click the match at `index` in document order
    async fn click_nth(&mut self, locator: &Locator, index: usize) -> ShopResult<()>;

    /// Type into the first match
    async fn type_text(&mut self, locator: &Locator, text: &str) -> ShopResult<()>;

    /// Clear the first match
    async fn clear(&mut self, locator: &Locator) -> ShopResult<()>;

    /// Choose a dropdown option by its visible text
    async fn select_option_by_text(&mut self, locator: &Locator, text: &str) -> ShopResult<()>;

    /// Capture the viewport as PNG
    async fn screenshot(&self) -> ShopResult<Screenshot>;

    /// Close the browser
    async fn close(&mut self) -> ShopResult<()>;

    /// How long lookups wait for a locator without its own timeout
    fn implicit_wait(&self) -> Duration;

    /// Change the implicit wait
    fn set_implicit_wait(&mut self, wait: Duration);

    /// Deadline for looking up `locator`
    fn lookup_timeout(&self, locator: &Locator) -> Duration {
        locator.options().timeout_or(self.implicit_wait())
    }
}

/// One element in a scripted mock screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    /// Visible text
    pub text: String,
    /// Attributes (placeholder, value, ...)
    pub attributes: HashMap<String, String>,
    /// Inner HTML
    pub inner_html: String,
    /// Displayed flag
    pub displayed: bool,
    /// Options when the element is a dropdown
    pub options: Vec<String>,
}

impl MockElement {
    /// A displayed element with text
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            inner_html: text.clone(),
            text,
            displayed: true,
            ..Self::default()
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set inner HTML
    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    /// Mark as hidden
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Set dropdown options
    #[must_use]
    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// A scripted screen: URL, title and elements keyed by selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockScreen {
    /// URL shown while the screen is active
    pub url: String,
    /// Document title
    pub title: String,
    /// Elements by selector key (see [`crate::Selector`]'s `Display`)
    pub elements: HashMap<String, Vec<MockElement>>,
}

impl MockScreen {
    /// Create an empty screen at `url`
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: "Swag Labs".to_string(),
            elements: HashMap::new(),
        }
    }

    /// Add one element under a locator
    #[must_use]
    pub fn with(mut self, locator: &Locator, element: MockElement) -> Self {
        self.elements
            .entry(locator.to_string())
            .or_default()
            .push(element);
        self
    }

    /// Add a displayed text element under a locator
    #[must_use]
    pub fn with_text(self, locator: &Locator, text: impl Into<String>) -> Self {
        self.with(locator, MockElement::text(text))
    }

    /// Add several text elements under one locator
    #[must_use]
    pub fn with_texts<S: Into<String>>(
        mut self,
        locator: &Locator,
        texts: impl IntoIterator<Item = S>,
    ) -> Self {
        let entry = self.elements.entry(locator.to_string()).or_default();
        entry.extend(texts.into_iter().map(MockElement::text));
        self
    }
}

/// Mock driver for unit testing.
///
/// Holds the active [`MockScreen`]; clicks and dropdown selections can be
/// scripted to switch to another screen. When several screens are queued for
/// the same trigger they are consumed in order and the last one repeats.
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Active screen
    pub screen: MockScreen,
    /// Screens reached by navigating to a URL
    pub routes: HashMap<String, MockScreen>,
    /// Screens reached by clicking a locator
    pub on_click: HashMap<String, VecDeque<MockScreen>>,
    /// Screens reached by selecting `(locator, option)`
    pub on_select: HashMap<(String, String), MockScreen>,
    /// Screenshot returned by `screenshot`
    pub screenshot_data: Option<Screenshot>,
    /// Call history for verification
    pub call_history: Vec<String>,
    /// Whether `close` was called
    pub closed: bool,
    /// Reported implicit wait; misses still fail at once
    pub implicit_wait: Duration,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on a screen
    #[must_use]
    pub fn with_screen(mut self, screen: MockScreen) -> Self {
        self.screen = screen;
        self
    }

    /// Serve a screen for a URL
    #[must_use]
    pub fn route(mut self, url: impl Into<String>, screen: MockScreen) -> Self {
        let _ = self.routes.insert(url.into(), screen);
        self
    }

    /// Switch to `screen` when `locator` is clicked
    #[must_use]
    pub fn on_click(mut self, locator: &Locator, screen: MockScreen) -> Self {
        self.on_click
            .entry(locator.to_string())
            .or_default()
            .push_back(screen);
        self
    }

    /// Switch to `screen` when `option` is selected in `locator`
    #[must_use]
    pub fn on_select(mut self, locator: &Locator, option: impl Into<String>, screen: MockScreen) -> Self {
        let _ = self
            .on_select
            .insert((locator.to_string(), option.into()), screen);
        self
    }

    /// Set mock screenshot
    #[must_use]
    pub fn with_screenshot(mut self, screenshot: Screenshot) -> Self {
        self.screenshot_data = Some(screenshot);
        self
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    /// Value typed into an element, if any
    #[must_use]
    pub fn value_of(&self, locator: &Locator) -> Option<&str> {
        self.first(locator)
            .ok()
            .and_then(|e| e.attributes.get("value"))
            .map(String::as_str)
    }

    fn first(&self, locator: &Locator) -> ShopResult<&MockElement> {
        self.screen
            .elements
            .get(&locator.to_string())
            .and_then(|all| all.first())
            .ok_or_else(|| ShopError::ElementNotFound {
                locator: locator.to_string(),
            })
    }

    fn first_mut(&mut self, locator: &Locator) -> ShopResult<&mut MockElement> {
        self.screen
            .elements
            .get_mut(&locator.to_string())
            .and_then(|all| all.first_mut())
            .ok_or_else(|| ShopError::ElementNotFound {
                locator: locator.to_string(),
            })
    }

    fn react_to_click(&mut self, key: &str) {
        if let Some(queue) = self.on_click.get_mut(key) {
            let next = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(screen) = next {
                self.screen = screen;
            }
        }
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> ShopResult<()> {
        self.call_history.push(format!("navigate:{url}"));
        if let Some(screen) = self.routes.get(url) {
            self.screen = screen.clone();
        } else {
            self.screen.url = url.to_string();
        }
        Ok(())
    }

    async fn current_url(&self) -> ShopResult<String> {
        Ok(self.screen.url.clone())
    }

    async fn title(&self) -> ShopResult<String> {
        Ok(self.screen.title.clone())
    }

    async fn count(&self, locator: &Locator) -> ShopResult<usize> {
        Ok(self
            .screen
            .elements
            .get(&locator.to_string())
            .map_or(0, Vec::len))
    }

    async fn text(&self, locator: &Locator) -> ShopResult<String> {
        self.first(locator).map(|e| e.text.clone())
    }

    async fn texts(&self, locator: &Locator) -> ShopResult<Vec<String>> {
        Ok(self
            .screen
            .elements
            .get(&locator.to_string())
            .map(|all| all.iter().map(|e| e.text.clone()).collect())
            .unwrap_or_default())
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> ShopResult<Option<String>> {
        self.first(locator).map(|e| e.attributes.get(name).cloned())
    }

    async fn inner_html(&self, locator: &Locator) -> ShopResult<String> {
        self.first(locator).map(|e| e.inner_html.clone())
    }

    async fn is_displayed(&self, locator: &Locator) -> ShopResult<bool> {
        Ok(self.first(locator).map_or(false, |e| e.displayed))
    }

    async fn click(&mut self, locator: &Locator) -> ShopResult<()> {
        let key = locator.to_string();
        self.call_history.push(format!("click:{key}"));
        let _ = self.first(locator)?;
        self.react_to_click(&key);
        Ok(())
    }

    async fn click_nth(&mut self, locator: &Locator, index: usize) -> ShopResult<()> {
        let key = locator.to_string();
        self.call_history.push(format!("click_nth:{key}:{index}"));
        let available = self.screen.elements.get(&key).map_or(0, Vec::len);
        if index >= available {
            return Err(ShopError::ElementNotFound {
                locator: format!("{key}[{index}]"),
            });
        }
        self.react_to_click(&key);
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> ShopResult<()> {
        self.call_history.push(format!("type:{locator}:{text}"));
        let element = self.first_mut(locator)?;
        let value = element.attributes.entry("value".to_string()).or_default();
        value.push_str(text);
        Ok(())
    }

    async fn clear(&mut self, locator: &Locator) -> ShopResult<()> {
        self.call_history.push(format!("clear:{locator}"));
        let element = self.first_mut(locator)?;
        let _ = element.attributes.remove("value");
        Ok(())
    }

    async fn select_option_by_text(&mut self, locator: &Locator, text: &str) -> ShopResult<()> {
        let key = locator.to_string();
        self.call_history.push(format!("select:{key}:{text}"));
        let element = self.first(locator)?;
        if !element.options.iter().any(|o| o == text) {
            return Err(ShopError::ElementNotFound {
                locator: format!("{key} option '{text}'"),
            });
        }
        if let Some(screen) = self.on_select.get(&(key, text.to_string())) {
            self.screen = screen.clone();
        }
        Ok(())
    }

    async fn screenshot(&self) -> ShopResult<Screenshot> {
        self.screenshot_data
            .clone()
            .ok_or_else(|| ShopError::driver("No mock screenshot set"))
    }

    async fn close(&mut self) -> ShopResult<()> {
        self.call_history.push("close".to_string());
        self.closed = true;
        Ok(())
    }

    fn implicit_wait(&self) -> Duration {
        self.implicit_wait
    }

    fn set_implicit_wait(&mut self, wait: Duration) {
        self.implicit_wait = wait;
    }
}
