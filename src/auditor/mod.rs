use crate::browser::{Browser, scripts};
use crate::config::{AuditConfig, AuditTarget};
use crate::error::{AuditError, Result};
use crate::inspect::{PageSnapshot, SEARCH_INPUT};
use crate::report;
use crate::results::PageAuditResult;
use crate::utils::{RgbColor, truncate_chars};
use serde_json::{Value, json};
use std::io::Write;
use std::path::PathBuf;
use tokio::time::{Duration, Instant, sleep};
use url::Url;

#[cfg(test)]
mod tests;

/// How often the resource count is polled while waiting for network idle
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Characters of the first heading shown in the report
const H1_PREVIEW_CHARS: usize = 50;

/// What the interaction check observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionFindings {
    /// Selector that located the search input, if any
    pub search_selector: Option<&'static str>,
    pub nav_links: usize,
    /// Tag name of the element focused after one Tab press
    pub focused_tag: Option<String>,
    pub focus_visible: bool,
}

/// What the theme check observed
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeFindings {
    pub dark_class_present: bool,
    pub background: String,
    pub background_is_dark: bool,
    /// Trimmed value of the theme custom property, when set
    pub variable: Option<String>,
}

/// One poll of the page's loading state
struct NetworkActivity {
    /// `document.readyState === 'complete'`
    complete: bool,
    /// Resources finished since the page loaded
    resources: u64,
}

/// Runs the page checklist against one browser window, writing the
/// human-readable report to `out`
pub struct Auditor<'a, B: Browser, W: Write> {
    browser: &'a mut B,
    config: &'a AuditConfig,
    out: W,
    timeouts_armed: bool,
}

impl<'a, B: Browser, W: Write> Auditor<'a, B, W> {
    pub fn new(browser: &'a mut B, config: &'a AuditConfig, out: W) -> Self {
        Self {
            browser,
            config,
            out,
            timeouts_armed: false,
        }
    }

    /// Visit every target, then run the interaction and theme checks.
    ///
    /// Page failures are recorded in the results; failures in the
    /// interaction or theme checks abort the run.
    pub async fn run(&mut self) -> Result<Vec<PageAuditResult>> {
        report::write_header(&mut self.out)?;

        let results = self.audit_targets().await?;
        self.check_interactions().await?;
        self.check_theme().await?;

        Ok(results)
    }

    /// Visit every target in order, one result per target
    pub async fn audit_targets(&mut self) -> Result<Vec<PageAuditResult>> {
        let config = self.config;
        tokio::fs::create_dir_all(&config.screenshot_dir).await?;

        let mut results = Vec::with_capacity(config.targets.len());
        for target in &config.targets {
            report::write_banner(&mut self.out, &format!("TESTANDO: {}", target.name))?;
            let result = self.visit(target).await;
            ::log::info!("{}: {}", target.name, result.status.label());
            results.push(result);

            sleep(config.timings.between_targets()).await;
        }

        Ok(results)
    }

    /// Audit one page. Never fails: any error degrades this target's
    /// result to a failure.
    pub async fn visit(&mut self, target: &AuditTarget) -> PageAuditResult {
        let resolved = target.resolve(&self.config.base_url);
        let url = match &resolved {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.config.base_url, target.path),
        };

        let outcome = match resolved {
            Ok(resolved) => self.audit_page(target, &resolved).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok((screenshot, console_errors)) => {
                PageAuditResult::pass(target.name.clone(), url, screenshot, console_errors)
            }
            Err(e) => {
                ::log::error!("Failed to audit {}: {}", url, e);
                if let Err(io) = self.emit(format!("✗ ERRO: {}", e)) {
                    ::log::warn!("Could not write report line: {}", io);
                }
                PageAuditResult::fail(target.name.clone(), url, e.to_string())
            }
        }
    }

    /// The fallible part of a page visit; returns the screenshot path and
    /// the console errors captured while the page was open
    async fn audit_page(
        &mut self,
        target: &AuditTarget,
        url: &Url,
    ) -> Result<(PathBuf, Vec<String>)> {
        let config = self.config;

        self.navigate(url.as_str()).await?;
        self.browser
            .execute(scripts::INSTALL_CONSOLE_HOOK, vec![])
            .await?;
        sleep(config.timings.settle()).await;

        let screenshot = config.screenshot_path(target);
        let png = self.browser.screenshot_full_page().await?;
        tokio::fs::write(&screenshot, png).await?;
        self.emit(format!("✓ Screenshot: {}", screenshot.display()))?;

        let title = self.browser.title().await?;
        self.emit(format!("✓ Título: {}", title))?;

        let html = self.browser.source().await?;
        let snapshot = PageSnapshot::parse(&html);
        self.report_snapshot(&snapshot)?;

        // Flush point: everything logged up to here belongs to this page
        let console_errors = self.drain_console_errors().await?;
        if !console_errors.is_empty() {
            self.emit(format!("⚠ Erros de console: {}", console_errors.len()))?;
            for error in &console_errors {
                self.emit(format!("  - {}", error))?;
            }
        }

        Ok((screenshot, console_errors))
    }

    fn report_snapshot(&mut self, snapshot: &PageSnapshot) -> Result<()> {
        if snapshot.main_content.is_some() {
            self.emit("✓ Conteúdo principal encontrado")?;
        } else {
            self.emit("✗ ERRO: Conteúdo principal NÃO encontrado")?;
        }

        if snapshot.sidebar.is_some() {
            self.emit("✓ Sidebar encontrada")?;
        } else {
            self.emit("⚠ Sidebar não encontrada")?;
        }

        match &snapshot.h1 {
            Some(text) => {
                let preview = truncate_chars(text, H1_PREVIEW_CHARS);
                self.emit(format!("✓ H1 presente: {}...", preview))?;
            }
            None => self.emit("⚠ Sem H1 na página")?,
        }

        self.emit(format!("✓ Links encontrados: {}", snapshot.link_count))?;

        if snapshot.images_without_alt > 0 {
            self.emit(format!(
                "⚠ Imagens sem alt: {} de {}",
                snapshot.images_without_alt, snapshot.image_count
            ))?;
        } else {
            self.emit(format!("✓ Todas imagens têm alt ({})", snapshot.image_count))?;
        }

        Ok(())
    }

    /// Search, sidebar links and keyboard focus on the Storybook home page
    pub async fn check_interactions(&mut self) -> Result<InteractionFindings> {
        let config = self.config;
        report::write_banner(&mut self.out, "TESTANDO INTERAÇÕES")?;

        self.navigate(&config.base_url).await?;
        sleep(config.timings.settle()).await;

        self.emit("\n🔍 Testando Search...")?;
        let mut search_selector = None;
        for pattern in SEARCH_INPUT {
            if self.browser.type_into(pattern, &config.search_query).await? {
                search_selector = Some(*pattern);
                break;
            }
        }
        match search_selector {
            Some(pattern) => {
                ::log::debug!("Search input matched {}", pattern);
                sleep(config.timings.search_settle()).await;
                self.emit("✓ Search funcional")?;
            }
            None => self.emit("⚠ Search input não encontrado")?,
        }

        self.emit("\n📂 Testando Sidebar Navigation...")?;
        let html = self.browser.source().await?;
        let nav_links = PageSnapshot::parse(&html).nav_link_count;
        self.emit(format!("✓ {} links de navegação encontrados", nav_links))?;

        self.emit("\n⌨️ Testando Keyboard Navigation...")?;
        self.browser.press_tab().await?;
        sleep(config.timings.focus_settle()).await;

        let focused_tag = self
            .browser
            .execute(scripts::ACTIVE_ELEMENT_TAG, vec![])
            .await?
            .as_str()
            .map(str::to_string);
        self.emit(format!(
            "✓ Focus após Tab: {}",
            focused_tag.as_deref().unwrap_or("(nenhum)")
        ))?;

        let focus_visible = self
            .browser
            .execute(scripts::FOCUS_VISIBLE, vec![])
            .await?
            .as_bool()
            .unwrap_or(false);
        if focus_visible {
            self.emit("✓ Focus visible presente")?;
        } else {
            self.emit("⚠ Focus visible pode não estar visível")?;
        }

        Ok(InteractionFindings {
            search_selector,
            nav_links,
            focused_tag,
            focus_visible,
        })
    }

    /// Light theme enforcement on the Storybook home page
    pub async fn check_theme(&mut self) -> Result<ThemeFindings> {
        let config = self.config;
        let theme = &config.theme;
        report::write_banner(&mut self.out, "TESTANDO TEMA")?;

        self.navigate(&config.base_url).await?;

        let dark_class_present = self
            .browser
            .execute(scripts::ROOT_HAS_CLASS, vec![json!(theme.dark_class)])
            .await?
            .as_bool()
            .unwrap_or(false);
        if dark_class_present {
            self.emit(format!(
                "⚠ Classe '{}' detectada (deveria ser light only)",
                theme.dark_class
            ))?;
        } else {
            self.emit(format!(
                "✓ Tema light ativo (sem classe '{}')",
                theme.dark_class
            ))?;
        }

        let background = self
            .browser
            .execute(scripts::BODY_BACKGROUND, vec![])
            .await?
            .as_str()
            .unwrap_or_default()
            .to_string();
        self.emit(format!("✓ Background color: {}", background))?;

        let background_is_dark = match RgbColor::parse(&background) {
            Some(color) if color.is_dark() => {
                self.emit(format!(
                    "⚠ Background parece escuro (luminância {:.2})",
                    color.relative_luminance()
                ))?;
                true
            }
            _ => false,
        };

        let variable = self
            .browser
            .execute(scripts::ROOT_CSS_VARIABLE, vec![json!(theme.variable)])
            .await?
            .as_str()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        match &variable {
            Some(value) => self.emit(format!("✓ Variável {}: {}", theme.variable, value))?,
            None => self.emit(format!("⚠ Variável {} não definida", theme.variable))?,
        }

        Ok(ThemeFindings {
            dark_class_present,
            background,
            background_is_dark,
            variable,
        })
    }

    /// Navigate and wait for network idle, bounded by the navigation timeout.
    ///
    /// The driver enforces the page-load limit itself: an abandoned `goto`
    /// would stay queued on the session and stall every later command.
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let limit = self.config.timings.navigation_timeout();
        if !self.timeouts_armed {
            self.browser.set_command_timeouts(limit).await?;
            self.timeouts_armed = true;
        }

        let started = Instant::now();
        let deadline = started + limit;
        let timed_out = || AuditError::NavigationTimeout {
            url: url.to_string(),
            seconds: limit.as_secs(),
        };

        if let Err(e) = self.browser.goto(url).await {
            if started.elapsed() >= limit {
                ::log::debug!("Page load for {} aborted by the driver: {}", url, e);
                return Err(timed_out());
            }
            return Err(e);
        }

        if !self.wait_for_network_idle(deadline).await? {
            return Err(timed_out());
        }
        Ok(())
    }

    /// Poll network activity until the document is complete and the resource
    /// count stays unchanged for the idle window. Returns `false` when the
    /// deadline passes first.
    async fn wait_for_network_idle(&mut self, deadline: Instant) -> Result<bool> {
        let window = self.config.timings.network_idle();
        let mut last: Option<u64> = None;
        let mut stable_since = Instant::now();

        loop {
            let activity = self.network_activity().await?;
            if !activity.complete || last != Some(activity.resources) {
                last = activity.complete.then_some(activity.resources);
                stable_since = Instant::now();
            } else if stable_since.elapsed() >= window {
                ::log::trace!("Network idle with {} resources", activity.resources);
                return Ok(true);
            }

            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(IDLE_POLL_INTERVAL).await;
        }
    }

    async fn network_activity(&mut self) -> Result<NetworkActivity> {
        let value = self
            .browser
            .execute(scripts::NETWORK_ACTIVITY, vec![])
            .await?;
        Ok(NetworkActivity {
            complete: value["complete"].as_bool().unwrap_or(false),
            resources: value["resources"].as_u64().unwrap_or(0),
        })
    }

    async fn drain_console_errors(&mut self) -> Result<Vec<String>> {
        let value = self
            .browser
            .execute(scripts::DRAIN_CONSOLE_ERRORS, vec![])
            .await?;

        let errors = match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        };
        Ok(errors)
    }

    fn emit(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.out, "{}", line.as_ref())?;
        Ok(())
    }
}
