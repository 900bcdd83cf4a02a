// src/services/browser.rs

//! WebDriver session wrapper.
//!
//! Thin layer over `fantoccini` providing the few interactions the archive
//! form needs, each bounded by the configured wait timeout.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use tokio::time::{Instant, sleep};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ArchiveConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

// WebDriver key codepoints
const KEY_CONTROL: char = '\u{e009}';
const KEY_DELETE: char = '\u{e017}';

const CLICK_SCRIPT: &str = "arguments[0].scrollIntoView(); arguments[0].click();";

/// Element locator used by the search form.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Id(&'a str),
    XPath(&'a str),
}

impl Target<'_> {
    fn locator(&self) -> Locator<'_> {
        match self {
            Target::Id(id) => Locator::Id(id),
            Target::XPath(xpath) => Locator::XPath(xpath),
        }
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Id(id) => write!(f, "#{id}"),
            Target::XPath(xpath) => write!(f, "{xpath}"),
        }
    }
}

/// One browser session. Not shared between searches.
pub struct BrowserSession {
    client: Client,
    timeout: Duration,
}

impl BrowserSession {
    /// Open a new browser through the configured WebDriver endpoint.
    pub async fn connect(config: &ArchiveConfig) -> Result<Self> {
        let client = ClientBuilder::native()
            .capabilities(Self::capabilities(config))
            .connect(&config.webdriver_url)
            .await?;
        log::debug!("Opened WebDriver session at {}", config.webdriver_url);

        Ok(Self {
            client,
            timeout: Duration::from_secs(config.wait_timeout_secs),
        })
    }

    fn capabilities(config: &ArchiveConfig) -> Map<String, Value> {
        let mut args = Vec::new();
        if config.headless {
            args.push("--headless".to_string());
        }
        args.extend(config.browser_args.iter().cloned());

        let mut caps = Map::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        caps
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    /// Wait until the element exists.
    pub async fn wait_present(&self, target: Target<'_>) -> Result<Element> {
        self.wait_for(target, false).await
    }

    /// Wait until the element exists and is displayed.
    pub async fn wait_visible(&self, target: Target<'_>) -> Result<Element> {
        self.wait_for(target, true).await
    }

    async fn wait_for(&self, target: Target<'_>, visible: bool) -> Result<Element> {
        poll_until(self.timeout, &target.to_string(), || {
            self.find_once(target, visible)
        })
        .await
    }

    async fn find_once(&self, target: Target<'_>, visible: bool) -> Result<Option<Element>> {
        let Some(element) = found(self.client.find(target.locator()).await)? else {
            return Ok(None);
        };
        if visible && !element.is_displayed().await? {
            return Ok(None);
        }
        Ok(Some(element))
    }

    /// Scroll an element into view and click it from script, which also
    /// works on options hidden behind the site's custom dropdowns.
    pub async fn click(&self, target: Target<'_>) -> Result<()> {
        let element = self.wait_present(target).await?;
        self.client
            .execute(CLICK_SCRIPT, vec![serde_json::to_value(&element)?])
            .await?;
        Ok(())
    }

    /// Type into a visible input.
    pub async fn type_into(&self, target: Target<'_>, text: &str) -> Result<()> {
        let element = self.wait_visible(target).await?;
        element.send_keys(text).await?;
        Ok(())
    }

    /// Replace the contents of an input and wait until its value reads back.
    ///
    /// Only the digits are compared, so a date mask that rewrites the
    /// separators still counts as set.
    pub async fn replace_value(&self, target: Target<'_>, value: &str) -> Result<()> {
        let element = self.wait_visible(target).await?;
        element
            .send_keys(&format!("{KEY_CONTROL}a{KEY_CONTROL}{KEY_DELETE}"))
            .await?;
        element.send_keys(value).await?;

        let waited = poll_until(self.timeout, &target.to_string(), || {
            value_reads(&element, value)
        })
        .await;

        match waited {
            Err(AppError::Timeout { .. }) => {
                let current = element.prop("value").await?.unwrap_or_default();
                Err(AppError::timeout(
                    format!("{target} to read '{value}' (reads '{current}')"),
                    self.timeout,
                ))
            }
            other => other,
        }
    }

    /// Unconditional pause; no-op for zero.
    pub async fn pause(&self, millis: u64) {
        if millis > 0 {
            sleep(Duration::from_millis(millis)).await;
        }
    }

    /// Rendered page source.
    pub async fn source(&self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    pub async fn current_url(&self) -> Result<Url> {
        Ok(self.client.current_url().await?)
    }

    /// End the session and shut the browser down.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        log::debug!("Closed WebDriver session");
        Ok(())
    }
}

/// Run `attempt` every [`POLL_INTERVAL`] until it yields a value, failing
/// with a timeout naming `what` once `timeout` has passed.
async fn poll_until<T, F, Fut>(timeout: Duration, what: &str, mut attempt: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = attempt().await? {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            return Err(AppError::timeout(what, timeout));
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// A missing element is "not yet" while waiting; anything else is fatal.
fn found<T>(result: std::result::Result<T, CmdError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_no_such_element() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn value_reads(element: &Element, expected: &str) -> Result<Option<()>> {
    let current = element.prop("value").await?.unwrap_or_default();
    Ok(same_digits(&current, expected).then_some(()))
}

fn same_digits(actual: &str, expected: &str) -> bool {
    actual
        .chars()
        .filter(char::is_ascii_digit)
        .eq(expected.chars().filter(char::is_ascii_digit))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fantoccini::error::{ErrorStatus, WebDriver};

    use super::*;

    #[test]
    fn test_headless_capabilities() {
        let mut config = ArchiveConfig::default();
        config.browser_args = vec!["--window-size=1920,1080".to_string()];

        let caps = BrowserSession::capabilities(&config);
        assert_eq!(
            caps["goog:chromeOptions"]["args"],
            json!(["--headless", "--window-size=1920,1080"])
        );
    }

    #[test]
    fn test_headed_capabilities() {
        let config = ArchiveConfig {
            headless: false,
            ..ArchiveConfig::default()
        };
        let caps = BrowserSession::capabilities(&config);
        assert_eq!(caps["goog:chromeOptions"]["args"], json!([]));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::Id("keyword").to_string(), "#keyword");
        assert_eq!(Target::XPath("//button").to_string(), "//button");
    }

    fn webdriver_error(status: ErrorStatus) -> CmdError {
        CmdError::Standard(WebDriver::new(status, "from test"))
    }

    #[tokio::test]
    async fn test_missing_element_keeps_polling() {
        let mut replies = vec![
            Err(webdriver_error(ErrorStatus::NoSuchElement)),
            Err(webdriver_error(ErrorStatus::NoSuchElement)),
            Ok(7),
        ]
        .into_iter();
        let attempts = AtomicUsize::new(0);

        let value = poll_until(Duration::from_secs(5), "#keyword", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            let reply = replies.next().unwrap();
            async move { found(reply) }
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_other_webdriver_errors_stop_polling() {
        let attempts = AtomicUsize::new(0);

        let result: Result<u32> = poll_until(Duration::from_secs(5), "#keyword", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { found::<u32>(Err(webdriver_error(ErrorStatus::InvalidSelector))) }
        })
        .await;

        assert!(matches!(result, Err(AppError::WebDriver(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_poll_times_out() {
        let result: Result<u32> = poll_until(Duration::ZERO, "#filtrar", || async {
            found::<u32>(Err(webdriver_error(ErrorStatus::NoSuchElement)))
        })
        .await;

        assert!(matches!(
            result,
            Err(AppError::Timeout { ref target, secs: 0 }) if target == "#filtrar"
        ));
    }

    #[test]
    fn test_same_digits_ignores_mask() {
        assert!(same_digits("22/04/2023", "22/04/2023"));
        assert!(same_digits("22-04-2023", "22/04/2023"));
        assert!(same_digits("22042023", "22/04/2023"));
        assert!(!same_digits("", "22/04/2023"));
        assert!(!same_digits("22/04/2022", "22/04/2023"));
    }
}
