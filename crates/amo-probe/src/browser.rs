//! Chromium driver over CDP.
//!
//! The driver owns a tokio runtime and blocks on every call, so page objects
//! stay synchronous. Element handles carry their selector and match index and
//! are re-resolved on every use; a handle whose element disappeared reports
//! [`ProbeError::StaleElement`].

use crate::driver::{Driver, DriverConfig, ElementHandle};
use crate::result::{ProbeError, ProbeResult};
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

/// Real browser behind the [`Driver`] trait
#[derive(Debug)]
pub struct ChromiumDriver {
    config: DriverConfig,
    runtime: Runtime,
    browser: CdpBrowser,
    page: CdpPage,
    handler: JoinHandle<()>,
    closed: bool,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::BrowserNotFound`] if no executable is found, or
    /// [`ProbeError::BrowserLaunchError`] if the browser does not start
    pub fn launch(config: &DriverConfig) -> ProbeResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .request_timeout(Duration::from_millis(config.navigation_timeout_ms));
        if !config.headless {
            builder = builder.with_head();
        }
        if config.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder.build().map_err(|message| {
            if message.contains("executable") {
                ProbeError::BrowserNotFound
            } else {
                ProbeError::BrowserLaunchError { message }
            }
        })?;

        let (browser, page, handler) = runtime.block_on(async {
            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| ProbeError::BrowserLaunchError {
                        message: e.to_string(),
                    })?;
            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });
            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ProbeError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
            Ok::<_, ProbeError>((browser, page, handler))
        })?;

        tracing::info!(
            headless = config.headless,
            width = config.viewport_width,
            height = config.viewport_height,
            "chromium launched"
        );
        Ok(Self {
            config: config.clone(),
            runtime,
            browser,
            page,
            handler,
            closed: false,
        })
    }

    /// Driver configuration
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn block<F, T>(&self, what: &str, future: F) -> ProbeResult<T>
    where
        F: Future<Output = ProbeResult<T>>,
    {
        let ms = self.config.navigation_timeout_ms;
        self.runtime.block_on(async {
            tokio::time::timeout(Duration::from_millis(ms), future)
                .await
                .map_err(|_| ProbeError::Timeout {
                    ms,
                    waited_for: what.to_string(),
                })?
        })
    }

    fn eval<T: DeserializeOwned>(&self, script: String) -> ProbeResult<T> {
        let page = &self.page;
        self.block("script evaluation", async move {
            page.evaluate(script)
                .await
                .map_err(driver_error)?
                .into_value()
                .map_err(driver_error)
        })
    }

    fn element(&self, handle: &ElementHandle) -> ProbeResult<Element> {
        let page = &self.page;
        let css = handle.selector.clone();
        let found = self.block("element lookup", async move {
            page.find_elements(css).await.map_err(driver_error)
        })?;
        found
            .into_iter()
            .nth(handle.index)
            .ok_or_else(|| ProbeError::StaleElement {
                id: handle.id.clone(),
            })
    }

    /// Run `body` with `el` bound to the handle's element
    fn on_element<T: DeserializeOwned>(
        &self,
        handle: &ElementHandle,
        body: &str,
    ) -> ProbeResult<Option<T>> {
        let script = format!(
            "(() => {{ const el = document.querySelectorAll({})[{}]; \
             if (!el) {{ return {{ gone: true }}; }} return {{ v: (() => {{ {body} }})() }}; }})()",
            js_string(&handle.selector),
            handle.index,
        );
        let value: serde_json::Value = self.eval(script)?;
        if value.get("gone").is_some() {
            return Err(ProbeError::StaleElement {
                id: handle.id.clone(),
            });
        }
        let inner = value.get("v").cloned().unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(inner)?)
    }

    fn wait_for_load(&self) -> ProbeResult<()> {
        let page = &self.page;
        self.block("page load", async move {
            let _ = page.wait_for_navigation().await.map_err(driver_error)?;
            Ok(())
        })
    }
}

impl Driver for ChromiumDriver {
    fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        tracing::debug!(url, "navigate");
        let page = &self.page;
        let target = url.to_string();
        self.block("navigation", async move {
            let _ = page
                .goto(target.as_str())
                .await
                .map_err(|e| ProbeError::NavigationError {
                    url: target.clone(),
                    message: e.to_string(),
                })?;
            Ok(())
        })?;
        self.wait_for_load()
    }

    fn current_url(&mut self) -> ProbeResult<String> {
        let page = &self.page;
        let url = self.block("current url", async move {
            page.url().await.map_err(driver_error)
        })?;
        Ok(url.unwrap_or_default())
    }

    fn title(&mut self) -> ProbeResult<String> {
        let page = &self.page;
        let title = self.block("title", async move {
            page.get_title().await.map_err(driver_error)
        })?;
        Ok(title.unwrap_or_default())
    }

    fn find_all(&mut self, css: &str) -> ProbeResult<Vec<ElementHandle>> {
        let count: usize = self.eval(format!(
            "document.querySelectorAll({}).length",
            js_string(css)
        ))?;
        Ok((0..count)
            .map(|index| ElementHandle::new(format!("cdp:{index}:{css}"), css, index))
            .collect())
    }

    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        tracing::debug!(selector = %element.selector, index = element.index, "click");
        let el = self.element(element)?;
        self.block("click", async move {
            let _ = el.scroll_into_view().await.map_err(driver_error)?;
            let _ = el.click().await.map_err(driver_error)?;
            Ok(())
        })
    }

    fn hover(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        let el = self.element(element)?;
        self.block("hover", async move {
            let _ = el.scroll_into_view().await.map_err(driver_error)?;
            let _ = el.hover().await.map_err(driver_error)?;
            Ok(())
        })
    }

    fn fill(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        let _: Option<bool> = self.on_element(element, "el.value = ''; return true;")?;
        let el = self.element(element)?;
        let text = text.to_string();
        self.block("typing", async move {
            let _ = el.focus().await.map_err(driver_error)?;
            let _ = el.type_str(text).await.map_err(driver_error)?;
            Ok(())
        })
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        let text: Option<String> =
            self.on_element(element, "return (el.innerText || el.textContent || '');")?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        // Live form state lives in properties; markup state in attributes.
        let body = format!(
            "const n = {name}; \
             if (n === 'value' && 'value' in el) {{ return String(el.value); }} \
             if (n === 'checked' && 'checked' in el) {{ return el.checked ? 'checked' : null; }} \
             return el.getAttribute(n);",
            name = js_string(name),
        );
        self.on_element(element, &body)
    }

    fn is_visible(&mut self, element: &ElementHandle) -> ProbeResult<bool> {
        let visible: Option<bool> = self.on_element(
            element,
            "const s = window.getComputedStyle(el); \
             return s.display !== 'none' && s.visibility !== 'hidden' \
                 && el.getClientRects().length > 0;",
        )?;
        Ok(visible.unwrap_or(false))
    }

    fn go_back(&mut self) -> ProbeResult<()> {
        let _: bool = self.eval("(() => { history.back(); return true; })()".to_string())?;
        self.wait_for_load()
    }

    fn close(&mut self) -> ProbeResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let browser = &mut self.browser;
        self.runtime.block_on(async {
            let _ = browser.close().await.map_err(driver_error)?;
            let _ = browser.wait().await?;
            Ok::<_, ProbeError>(())
        })?;
        self.handler.abort();
        tracing::info!("chromium closed");
        Ok(())
    }
}

impl Drop for ChromiumDriver {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "closing chromium on drop");
        }
    }
}

fn driver_error(e: impl std::fmt::Display) -> ProbeError {
    ProbeError::DriverError {
        message: e.to_string(),
    }
}

/// Quote `s` as a JavaScript string literal
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string("a[href=\"x\"]"), r#""a[href=\"x\"]""#);
        assert_eq!(js_string("it's"), "\"it's\"");
    }

    #[test]
    fn test_driver_error_keeps_message() {
        let err = driver_error("socket closed");
        assert!(err.to_string().contains("socket closed"));
    }

    #[test]
    #[ignore = "requires a local chromium"]
    fn test_launch_and_navigate() {
        let mut driver = ChromiumDriver::launch(&DriverConfig::default().headless(true)).unwrap();
        driver.navigate("about:blank").unwrap();
        assert_eq!(driver.current_url().unwrap(), "about:blank");
        driver.close().unwrap();
    }
}
