//! In-page scripts, run through WebDriver `execute`.

/// Document readiness plus the number of resources finished since load.
///
/// Entries are moved into a page-global tally and the timing buffer is
/// cleared on every poll, so the count keeps growing past the browser's
/// 250-entry buffer limit.
pub const NETWORK_ACTIVITY: &str = r#"
const perf = window.performance;
if (!window.__auditResources) {
    window.__auditResources = { seen: 0 };
    perf.setResourceTimingBufferSize(10000);
}
const state = window.__auditResources;
state.seen += perf.getEntriesByType('resource').length;
perf.clearResourceTimings();
return { complete: document.readyState === 'complete', resources: state.seen };
"#;

/// Record console errors and uncaught page errors into a page-global buffer.
/// Safe to run twice on the same document.
pub const INSTALL_CONSOLE_HOOK: &str = r#"
if (!window.__auditConsoleErrors) {
    window.__auditConsoleErrors = [];
    const original = console.error;
    console.error = function (...args) {
        window.__auditConsoleErrors.push(args.map(String).join(' '));
        return original.apply(console, args);
    };
    window.addEventListener('error', (event) => {
        window.__auditConsoleErrors.push(event.message);
    });
}
return true;
"#;

/// Return and clear everything the console hook captured
pub const DRAIN_CONSOLE_ERRORS: &str = r#"
const errors = window.__auditConsoleErrors || [];
window.__auditConsoleErrors = [];
return errors;
"#;

/// Full scrollable height of the document
pub const DOCUMENT_HEIGHT: &str = r#"
const body = document.body;
const root = document.documentElement;
return Math.max(root.scrollHeight, body ? body.scrollHeight : 0);
"#;

pub const ACTIVE_ELEMENT_TAG: &str =
    "return document.activeElement ? document.activeElement.tagName : null;";

/// Whether the focused element shows an outline or a ring-style shadow
pub const FOCUS_VISIBLE: &str = r#"
const el = document.activeElement;
if (!el) {
    return false;
}
const style = window.getComputedStyle(el);
return style.outlineStyle !== 'none' || style.boxShadow.includes('ring');
"#;

/// `arguments[0]`: class name to look for on the root element
pub const ROOT_HAS_CLASS: &str =
    "return document.documentElement.classList.contains(arguments[0]);";

pub const BODY_BACKGROUND: &str =
    "return window.getComputedStyle(document.body).backgroundColor;";

/// `arguments[0]`: custom property name, e.g. `--educacross-primary`
pub const ROOT_CSS_VARIABLE: &str =
    "return getComputedStyle(document.documentElement).getPropertyValue(arguments[0]);";
