use handlebars::Handlebars;
use serde::Serialize;

use super::Page;

const TEMPLATE_NAME: &str = "dashboard";
const TEMPLATE: &str = include_str!("../../templates/dashboard.hbs");
const CODE_ICON: &str = include_str!("../../assets/code_gray.svg");

#[derive(Serialize)]
struct HtmlPage<'a> {
    #[serde(flatten)]
    page: &'a Page,
    icon: &'static str,
}

/// Self-contained HTML document; every value coming from GitHub is escaped.
pub fn render_html(page: &Page) -> anyhow::Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_template_string(TEMPLATE_NAME, TEMPLATE)?;

    Ok(handlebars.render(
        TEMPLATE_NAME,
        &HtmlPage {
            page,
            icon: CODE_ICON,
        },
    )?)
}
