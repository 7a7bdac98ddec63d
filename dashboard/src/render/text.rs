use super::Page;

pub fn render_text(page: &Page) -> String {
    let mut result = format!("{} ({})\n", page.heading, page.week);

    for card in &page.cards {
        result.push_str(&format!("\n== {}\n", card.owner));
        if !card.avatar_url.is_empty() {
            result.push_str(&format!("   {}\n", card.avatar_url));
        }
        result.push_str(&format!("   {}\n", card.count_badge));
        if let Some(warning) = &card.warning {
            result.push_str(&format!("   {warning}\n"));
        }

        for entry in &card.entries {
            match &entry.level {
                Some(level) => result.push_str(&format!("   - {} [{level}]\n", entry.title)),
                None => result.push_str(&format!("   - {}\n", entry.title)),
            }
            result.push_str(&format!("     {}\n     {}\n", entry.date, entry.url));
        }
    }

    result
}
