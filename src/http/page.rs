//! Page rendering.
//!
//! The page is a fixed template: navigation bar, heading, balance line and a
//! placeholder paragraph. It does not read the session, so its output is the
//! same before and after the bootstrap resolves. The "0 ETH" balance is a
//! placeholder, not a fetched value. The title comes from validated config
//! and is inserted as-is.

/// Balance line shown until a balance display is wired up.
pub const BALANCE_PLACEHOLDER: &str = "<strong>Your ETH Balance:</strong> 0 ETH";

/// Navigation region.
pub fn render_navigation(title: &str) -> String {
    format!(
        concat!(
            "<nav class=\"navbar my-3\">\n",
            "  <a class=\"navbar-brand\" href=\"/\">{}</a>\n",
            "</nav>\n"
        ),
        title
    )
}

/// Full HTML document.
pub fn render_page(title: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "  <meta charset=\"utf-8\">\n",
            "  <title>{title}</title>\n",
            "</head>\n",
            "<body>\n",
            "<div class=\"container\">\n",
            "{nav}",
            "<h1 class=\"my-4 text-center\">{title}</h1>\n",
            "<p class=\"text-center\">{balance}</p>\n",
            "<p class=\"text-center\">Edit src/http/page.rs to add your code here.</p>\n",
            "</div>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = title,
        nav = render_navigation(title),
        balance = BALANCE_PLACEHOLDER,
    )
}
