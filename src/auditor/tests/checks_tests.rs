use super::mock::{MockBrowser, MockPage};
use super::{BASE_URL, output_text, test_config};
use crate::auditor::Auditor;

const NO_SEARCH_HOME: &str = r#"<html><body>
    <nav><a href="/a">A</a></nav><main><h1>Home</h1></main>
    </body></html>"#;

#[tokio::test(start_paused = true)]
async fn test_interactions_find_search_by_placeholder() {
    let config = test_config("checks-search", &[("Home", "/")]);
    let page = MockPage::new(
        "Storybook",
        r#"<html><body>
        <nav><input placeholder="Search stories">
        <a href="/a">A</a><a href="/b">B</a><a href="/c">C</a></nav>
        <aside><a href="/d">D</a></aside>
        </body></html>"#,
    );
    let mut browser = MockBrowser::new().with_page(BASE_URL, page);

    let mut out = Vec::new();
    let findings = Auditor::new(&mut browser, &config, &mut out)
        .check_interactions()
        .await
        .unwrap();

    assert_eq!(findings.search_selector, Some("input[placeholder*='Search']"));
    assert_eq!(findings.nav_links, 4);
    assert_eq!(findings.focused_tag.as_deref(), Some("A"));
    assert!(findings.focus_visible);
    assert_eq!(
        browser.typed,
        [(
            "input[placeholder*='Search']".to_string(),
            "button".to_string()
        )]
    );

    let text = output_text(out);
    assert!(text.contains("✓ Search funcional"));
    assert!(text.contains("✓ 4 links de navegação encontrados"));
    assert!(text.contains("✓ Focus após Tab: A"));
    assert!(text.contains("✓ Focus visible presente"));
}

#[tokio::test(start_paused = true)]
async fn test_interactions_missing_search_is_a_warning() {
    let config = test_config("checks-no-search", &[("Home", "/")]);
    let mut page = MockPage::new("Storybook", NO_SEARCH_HOME);
    page.focus_ring = false;
    let mut browser = MockBrowser::new().with_page(BASE_URL, page);

    let mut out = Vec::new();
    let findings = Auditor::new(&mut browser, &config, &mut out)
        .check_interactions()
        .await
        .unwrap();

    assert_eq!(findings.search_selector, None);
    assert!(!findings.focus_visible);
    assert!(browser.typed.is_empty());

    let text = output_text(out);
    assert!(text.contains("⚠ Search input não encontrado"));
    assert!(text.contains("⚠ Focus visible pode não estar visível"));
}

#[tokio::test(start_paused = true)]
async fn test_theme_light() {
    let config = test_config("checks-theme-light", &[("Home", "/")]);
    let mut page = MockPage::new("Storybook", NO_SEARCH_HOME);
    page.css_variables
        .insert("--educacross-primary".to_string(), "  #6e63e8".to_string());
    let mut browser = MockBrowser::new().with_page(BASE_URL, page);

    let mut out = Vec::new();
    let findings = Auditor::new(&mut browser, &config, &mut out)
        .check_theme()
        .await
        .unwrap();

    assert!(!findings.dark_class_present);
    assert!(!findings.background_is_dark);
    assert_eq!(findings.background, "rgb(255, 255, 255)");
    assert_eq!(findings.variable.as_deref(), Some("#6e63e8"));

    let text = output_text(out);
    assert!(text.contains("✓ Tema light ativo (sem classe 'dark')"));
    assert!(text.contains("✓ Background color: rgb(255, 255, 255)"));
    assert!(text.contains("✓ Variável --educacross-primary: #6e63e8"));
}

#[tokio::test(start_paused = true)]
async fn test_theme_dark_signals() {
    let mut config = test_config("checks-theme-dark", &[("Home", "/")]);
    config.theme.dark_class = "theme-dark".to_string();

    let mut page = MockPage::new("Storybook", NO_SEARCH_HOME);
    page.root_classes.insert("theme-dark".to_string());
    page.background = "rgb(17, 24, 39)".to_string();
    let mut browser = MockBrowser::new().with_page(BASE_URL, page);

    let mut out = Vec::new();
    let findings = Auditor::new(&mut browser, &config, &mut out)
        .check_theme()
        .await
        .unwrap();

    assert!(findings.dark_class_present);
    assert!(findings.background_is_dark);
    assert_eq!(findings.variable, None);

    let text = output_text(out);
    assert!(text.contains("⚠ Classe 'theme-dark' detectada"));
    assert!(text.contains("⚠ Background parece escuro"));
    assert!(text.contains("⚠ Variável --educacross-primary não definida"));
}
